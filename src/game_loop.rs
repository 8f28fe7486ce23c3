//! Per-frame game loop.
//!
//! [`Game`] owns every subsystem and runs them in a fixed order once per
//! host frame. Raw input arrives between frames through the `key_*` and
//! `mouse_*` methods; nothing simulates outside [`Game::frame`].

use crate::assets::AssetProvider;
use crate::camera::Camera;
use crate::components::Model;
use crate::config::GameConfig;
use crate::equipment::{EquipError, EquipmentManager};
use crate::events::GameEvent;
use crate::input::{InputAction, InputManager, KeyBinding, KeyboardListener, MouseButton, MouseListener};
use crate::navmesh::NavMesh;
use crate::player::Player;
use crate::renderer::{Anchor, CameraView, FrameSnapshot, RenderSurface};
use crate::session::SessionContext;
use crate::spawning;
use crate::stamina::Stamina;
use crate::systems;
use crate::vfx::VfxManager;
use crate::weapon::{GunId, GunKind};
use hecs::World;

pub struct Game<A: AssetProvider, R: RenderSurface> {
    config: GameConfig,
    assets: A,
    render: R,
    session: SessionContext,
    world: World,
    navmesh: NavMesh,
    keyboard: KeyboardListener,
    mouse: MouseListener,
    input: InputManager,
    stamina: Stamina,
    player: Player,
    camera: Camera,
    equipment: EquipmentManager,
    vfx: VfxManager,
    /// Processed events waiting for the shell
    outbox: Vec<GameEvent>,
}

impl<A: AssetProvider, R: RenderSurface> Game<A, R> {
    /// Build the level, spawn enemies and start equipping the starting weapon
    pub fn new(config: GameConfig, assets: A, mut render: R) -> Self {
        let navmesh = assets.get_nav_mesh();
        log::info!("Navmesh has {} regions", navmesh.regions().len());

        let mut keyboard = KeyboardListener::new();
        let mut input = InputManager::from_bindings(&config.key_bindings);
        input.enable(&mut keyboard);
        let mut mouse = MouseListener::new();
        mouse.enable();

        let stamina = Stamina::new(&config.stamina);
        let player = Player::new(&config.player, &navmesh);
        let mut camera = Camera::new(&config.camera);
        camera.follow(player.position);

        let equipment = EquipmentManager::new(
            config.reload_policy,
            config.timing.gun_show_duration,
            config.timing.gun_hide_duration,
        );
        let vfx = VfxManager::new(assets.get_texture("bullet-hole"));

        let mut world = World::new();
        let enemies = spawning::spawn_enemies(&mut world, &assets, &mut render, &config.enemy_spawns);
        log::info!("Spawned {} enemies", enemies.len());

        let mut game = Self {
            config,
            assets,
            render,
            session: SessionContext::start(),
            world,
            navmesh,
            keyboard,
            mouse,
            input,
            stamina,
            player,
            camera,
            equipment,
            vfx,
            outbox: Vec::new(),
        };

        if let Some(kind) = game.config.starting_weapon {
            let id = game.pickup_weapon(kind);
            if let Err(e) = game.equipment.equip(id) {
                log::error!("Could not equip starting weapon: {}", e);
            }
        }
        game
    }

    /// Add a gun of this kind to the held list; returns its id
    pub fn pickup_weapon(&mut self, kind: GunKind) -> GunId {
        let spec = self.config.gun_spec(kind);
        self.equipment
            .pickup_weapon(&spec, &self.assets, &mut self.keyboard)
    }

    pub fn equip(&mut self, id: GunId) -> Result<(), EquipError> {
        self.equipment.equip(id)
    }

    pub fn select_by_hotkey(&mut self, slot: usize) -> Result<(), EquipError> {
        self.equipment.select_by_hotkey(slot)
    }

    pub fn reload(&mut self) -> Result<u32, EquipError> {
        self.equipment.reload(&mut self.session.events)
    }

    pub fn key_down(&mut self, key: &str) {
        if self.session.is_paused() || !self.session.is_active() {
            return;
        }
        for binding in self.keyboard.key_down(key) {
            match binding {
                KeyBinding::Action(_) => self.input.record(binding, true),
                KeyBinding::Reload => {
                    if let Err(e) = self.reload() {
                        log::debug!("Reload ignored: {}", e);
                    }
                }
                KeyBinding::Hotkey(slot) => {
                    if let Err(e) = self.select_by_hotkey(slot) {
                        log::debug!("Hotkey {} ignored: {}", slot + 1, e);
                    }
                }
            }
        }
    }

    pub fn key_up(&mut self, key: &str) {
        for binding in self.keyboard.key_up(key) {
            if let KeyBinding::Action(_) = binding {
                self.input.record(binding, false);
            }
        }
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        if !self.session.is_paused() {
            self.mouse.button_down(button);
        }
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        self.mouse.button_up(button);
    }

    pub fn mouse_move(&mut self, dx: f32, dy: f32) {
        self.mouse.mouse_move(dx, dy);
    }

    /// Pointer lock was released by the host: freeze and drop all held input
    pub fn pointer_lock_lost(&mut self) {
        if self.session.pause() {
            self.input.disable(&mut self.keyboard);
            self.keyboard.release_all();
            self.mouse.disable();
        }
        self.process_events();
    }

    /// Unfreeze after a pause
    pub fn resume_game(&mut self) {
        if self.session.resume() {
            self.input.enable(&mut self.keyboard);
            self.mouse.enable();
        }
        self.process_events();
    }

    /// Advance the simulation by one host frame and submit it for rendering.
    /// While paused only queued session events are delivered.
    pub fn frame(&mut self, dt: f32) {
        puffin::profile_function!();

        if !self.session.is_active() {
            return;
        }
        let dt = dt.clamp(0.0, self.config.timing.max_frame_dt);

        if self.session.is_paused() {
            self.process_events();
            return;
        }

        self.camera.look(self.mouse.take_look_delta());

        {
            puffin::profile_scope!("equip_transition");
            self.equipment
                .advance_transition(dt, &mut self.render, &mut self.session.events);
        }

        {
            puffin::profile_scope!("locomotion");
            let sprinting = self.input.state().is_pressed(InputAction::Sprint);
            if self.stamina.update(dt, sprinting) {
                self.session.events.push(GameEvent::StaminaChanged {
                    current: self.stamina.current(),
                    maximum: self.stamina.maximum(),
                });
            }
            self.player
                .update(dt, self.input.state(), &self.stamina, &self.camera, &self.navmesh);
            self.camera.follow(self.player.position);
        }

        {
            puffin::profile_scope!("equipment");
            self.equipment.update(
                dt,
                self.mouse.trigger_held(),
                self.camera.aim(),
                &mut self.render,
                &mut self.session.events,
            );
        }

        systems::update_enemy_animations(&mut self.world, dt);
        self.vfx.update(dt);
        self.process_events();

        {
            puffin::profile_scope!("render");
            let snapshot = FrameSnapshot {
                camera: CameraView {
                    position: self.camera.position,
                    yaw: self.camera.yaw,
                    pitch: self.camera.pitch,
                },
                entities: systems::collect_renderables(&self.world),
                effects: self.vfx.effects.clone(),
            };
            self.render.render_frame(dt, &snapshot);
        }

        self.session.advance_frame(dt);
    }

    /// Hand queued events to in-game consumers, then keep them for the shell
    fn process_events(&mut self) {
        for event in self.session.events.drain() {
            self.vfx.handle_event(&event, &self.navmesh);
            self.outbox.push(event);
        }
    }

    /// Events processed since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Stop listening for input and remove everything this game put in the scene
    pub fn teardown(&mut self) {
        self.input.disable(&mut self.keyboard);
        self.keyboard.release_all();
        self.mouse.disable();

        self.equipment.teardown(&mut self.render);
        for (_, model) in self.world.query::<&Model>().iter() {
            self.render.detach(&model.0, Anchor::Scene);
        }
        self.world.clear();
        self.vfx.effects.clear();
        self.outbox.clear();
        self.session.teardown();
    }

    pub fn is_paused(&self) -> bool {
        self.session.is_paused()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn stamina(&self) -> &Stamina {
        &self.stamina
    }

    pub fn input(&self) -> &InputManager {
        &self.input
    }

    pub fn equipment(&self) -> &EquipmentManager {
        &self.equipment
    }

    pub fn vfx(&self) -> &VfxManager {
        &self.vfx
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn navmesh(&self) -> &NavMesh {
        &self.navmesh
    }

    pub fn render(&self) -> &R {
        &self.render
    }
}
