//! End-to-end scenarios driven through the public game API.

use fps_survival::app::AppState;
use fps_survival::assets::AssetLibrary;
use fps_survival::config::GameConfig;
use fps_survival::equipment::EquipError;
use fps_survival::events::GameEvent;
use fps_survival::game_loop::Game;
use fps_survival::input::MouseButton;
use fps_survival::renderer::{Anchor, RecordingSurface, RenderCall};
use fps_survival::weapon::{GunKind, GunState};

const DT: f32 = 1.0 / 60.0;

type TestGame = Game<AssetLibrary, RecordingSurface>;

fn new_game(config: GameConfig) -> TestGame {
    Game::new(config, AssetLibrary::prototype_level(), RecordingSurface::new())
}

fn run(game: &mut TestGame, seconds: f32) {
    let frames = (seconds / DT).ceil() as usize;
    for _ in 0..frames {
        game.frame(DT);
    }
}

fn click(game: &mut TestGame) {
    game.mouse_down(MouseButton::Left);
    game.frame(DT);
    game.mouse_up(MouseButton::Left);
    game.frame(DT);
}

#[test]
fn empty_pistol_stops_after_twelve_rounds() {
    let config: GameConfig = GameConfig::from_json(
        r#"{
            "weapons": [{
                "kind": "pistol",
                "firing_mode": "semi-auto",
                "rounds_per_minute": 180,
                "magazine_size": 12,
                "reserve_ammo": 0,
                "reload_duration": 1.0,
                "hold_position": [0.15, -0.2, -0.5],
                "model": "pistol"
            }]
        }"#,
    )
    .unwrap();
    let mut game = new_game(config);
    run(&mut game, 1.0);

    for _ in 0..13 {
        click(&mut game);
        run(&mut game, 0.5);
    }

    let events = game.drain_events();
    let shots = events
        .iter()
        .filter(|e| matches!(e, GameEvent::ShotFired { .. }))
        .count();
    assert_eq!(shots, 12);
    assert!(events.iter().any(|e| matches!(e, GameEvent::DryFire { .. })));
    assert_eq!(game.equipment().equipped_gun().unwrap().magazine_ammo(), 0);

    // Manual reload with an empty reserve is refused
    game.key_down("r");
    assert_eq!(game.equipment().equipped_gun().unwrap().state(), GunState::Equipped);
}

#[test]
fn rapid_clicks_are_rate_limited() {
    let mut game = new_game(GameConfig::default());
    run(&mut game, 1.0);

    // Two presses one frame apart; 180 rpm needs a third of a second between shots
    click(&mut game);
    click(&mut game);
    let gun = game.equipment().equipped_gun().unwrap();
    assert_eq!(gun.magazine_ammo(), gun.magazine_size() - 1);
}

#[test]
fn rifle_fires_while_trigger_held() {
    let mut config = GameConfig::default();
    config.starting_weapon = Some(GunKind::Rifle);
    let mut game = new_game(config);
    run(&mut game, 1.0);

    game.mouse_down(MouseButton::Left);
    run(&mut game, 0.5);
    game.mouse_up(MouseButton::Left);

    let gun = game.equipment().equipped_gun().unwrap();
    let fired = gun.magazine_size() - gun.magazine_ammo();
    // 600 rpm over half a second
    assert!((4..=6).contains(&fired), "fired {}", fired);
}

#[test]
fn hotkey_switch_never_overlaps_guns() {
    let mut game = new_game(GameConfig::default());
    let rifle = game.pickup_weapon(GunKind::Rifle);
    run(&mut game, 1.0);

    game.key_down("2");
    assert_eq!(game.select_by_hotkey(0), Err(EquipError::TransitionInProgress));
    for _ in 0..60 {
        game.frame(DT);
        assert!(game.render().attached_to(Anchor::Camera).len() <= 1);
    }
    game.key_up("2");
    assert_eq!(game.equipment().equipped(), Some(rifle));

    let camera_calls: Vec<&RenderCall> = game
        .render()
        .calls
        .iter()
        .filter(|call| {
            matches!(
                call,
                RenderCall::Attach { parent: Anchor::Camera, .. }
                    | RenderCall::Detach { parent: Anchor::Camera, .. }
            )
        })
        .collect();
    // attach pistol, detach pistol, attach rifle
    assert_eq!(camera_calls.len(), 3);
    assert!(matches!(camera_calls[1], RenderCall::Detach { .. }));

    // Hotkey for the gun already in hand is a reported no-op
    assert_eq!(
        game.select_by_hotkey(1),
        Err(EquipError::AlreadyEquipped(rifle))
    );
    assert_eq!(game.select_by_hotkey(5), Err(EquipError::HotkeyOutOfRange(5)));
}

fn camera_calls(game: &TestGame) -> Vec<&RenderCall> {
    game.render()
        .calls
        .iter()
        .filter(|call| {
            matches!(
                call,
                RenderCall::Attach { parent: Anchor::Camera, .. }
                    | RenderCall::Detach { parent: Anchor::Camera, .. }
            )
        })
        .collect()
}

#[test]
fn hotkeys_switch_back_and_forth_from_empty_hands() {
    let mut config = GameConfig::default();
    config.starting_weapon = None;
    let mut game = new_game(config);
    let pistol = game.pickup_weapon(GunKind::Pistol);
    let rifle = game.pickup_weapon(GunKind::Rifle);
    assert_eq!(game.equipment().equipped(), None);

    game.select_by_hotkey(1).unwrap();
    run(&mut game, 1.0);
    assert_eq!(game.equipment().equipped(), Some(rifle));
    assert_eq!(camera_calls(&game).len(), 1);

    game.select_by_hotkey(0).unwrap();
    for _ in 0..60 {
        game.frame(DT);
        assert!(game.render().attached_to(Anchor::Camera).len() <= 1);
        if game.equipment().transition_in_progress() {
            assert_eq!(game.equipment().equipped(), Some(rifle));
        }
    }
    assert_eq!(game.equipment().equipped(), Some(pistol));

    let calls = camera_calls(&game);
    assert_eq!(calls.len(), 3);
    assert!(matches!(calls[0], RenderCall::Attach { object, .. } if object.name() == "rifle"));
    assert!(matches!(calls[1], RenderCall::Detach { object, .. } if object.name() == "rifle"));
    assert!(matches!(calls[2], RenderCall::Attach { object, .. } if object.name() == "pistol"));
}

#[test]
fn sprinting_until_exhausted_falls_back_to_walking() {
    let mut game = new_game(GameConfig::default());
    game.key_down("w");
    game.key_down("shift");
    run(&mut game, 1.5);
    assert_eq!(game.stamina().current(), 0.0);

    let start = game.player().position;
    run(&mut game, 1.0);
    let walked = (game.player().position - start).length();
    let speed = game.config().player.speed;
    assert!((walked - speed).abs() < 0.2, "walked {}", walked);

    game.key_up("shift");
    run(&mut game, 0.5);
    assert!(game.stamina().current() > 0.0);
}

#[test]
fn unknown_bindings_and_assets_degrade_gracefully() {
    let config = GameConfig::from_json(
        r#"{
            "key_bindings": { "w": "forward", "q": "teleport" },
            "enemy_spawns": [[1.0, 0.0, -4.0]],
            "weapons": [{
                "kind": "pistol",
                "firing_mode": "semi-auto",
                "rounds_per_minute": 180,
                "magazine_size": 12,
                "reserve_ammo": 10,
                "reload_duration": 1.0,
                "hold_position": [0.15, -0.2, -0.5],
                "model": "golden-pistol"
            }]
        }"#,
    )
    .unwrap();
    let mut game = new_game(config);
    assert_eq!(game.input().bindings().len(), 1);

    run(&mut game, 1.0);
    let gun = game.equipment().equipped_gun().unwrap();
    assert!(gun.model().is_placeholder());

    game.key_down("q");
    game.key_down("w");
    run(&mut game, 0.5);
    assert!(game.player().position.z < 0.0);
}

#[test]
fn shell_pauses_and_resumes() {
    let mut app: AppState<AssetLibrary, RecordingSurface> = AppState::new();
    app.on_load(AssetLibrary::prototype_level());
    app.start_game(GameConfig::default(), RecordingSurface::new())
        .unwrap();
    for _ in 0..10 {
        app.frame(DT);
    }

    app.pointer_lock_lost();
    assert!(app.is_paused());
    assert!(app.hud.pause_overlay);
    let frame = app.game().unwrap().session().frame;
    for _ in 0..10 {
        app.frame(DT);
    }
    assert_eq!(app.game().unwrap().session().frame, frame);

    app.resume_game();
    app.frame(DT);
    assert!(!app.hud.pause_overlay);
    assert_eq!(app.game().unwrap().session().frame, frame + 1);
}
