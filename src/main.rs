//! Headless demo: loads the prototype level, plays a short scripted session
//! against a recording surface and logs what happened.
//!
//! Usage: `fps-survival [config.json] [--profile]`

use fps_survival::app::AppState;
use fps_survival::assets::AssetLibrary;
use fps_survival::config::GameConfig;
use fps_survival::game_loop::Game;
use fps_survival::input::MouseButton;
use fps_survival::renderer::RecordingSurface;
use fps_survival::weapon::GunKind;

const FRAME_DT: f32 = 1.0 / 60.0;
const DEMO_FRAMES: u32 = 600;

/// One scripted input at a given frame
enum Step {
    KeyDown(&'static str),
    KeyUp(&'static str),
    MouseDown,
    MouseUp,
    Look(f32, f32),
    Pickup(GunKind),
    LosePointer,
    Resume,
}

const SCRIPT: &[(u32, Step)] = &[
    (30, Step::KeyDown("w")),
    (90, Step::KeyDown("shift")),
    (150, Step::KeyUp("shift")),
    (180, Step::KeyUp("w")),
    (190, Step::Look(0.0, 300.0)),
    (200, Step::MouseDown),
    (202, Step::MouseUp),
    (220, Step::MouseDown),
    (222, Step::MouseUp),
    (240, Step::KeyDown("r")),
    (241, Step::KeyUp("r")),
    (260, Step::Pickup(GunKind::Rifle)),
    (320, Step::KeyDown("2")),
    (321, Step::KeyUp("2")),
    (380, Step::MouseDown),
    (420, Step::MouseUp),
    (450, Step::LosePointer),
    (500, Step::Resume),
    (520, Step::KeyDown("1")),
    (521, Step::KeyUp("1")),
];

fn apply(game: &mut Game<AssetLibrary, RecordingSurface>, step: &Step) {
    match step {
        Step::KeyDown(key) => game.key_down(key),
        Step::KeyUp(key) => game.key_up(key),
        Step::MouseDown => game.mouse_down(MouseButton::Left),
        Step::MouseUp => game.mouse_up(MouseButton::Left),
        Step::Look(dx, dy) => game.mouse_move(*dx, *dy),
        Step::Pickup(kind) => {
            game.pickup_weapon(*kind);
        }
        Step::LosePointer | Step::Resume => {}
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut config_path = None;
    let mut profile = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--profile" => profile = true,
            _ => config_path = Some(arg),
        }
    }

    let _profiler = if profile {
        puffin::set_scopes_on(true);
        let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        match puffin_http::Server::new(&addr) {
            Ok(server) => {
                log::info!("Profiler listening on {}", addr);
                Some(server)
            }
            Err(e) => {
                log::error!("Could not start profiler: {}", e);
                None
            }
        }
    } else {
        None
    };

    let config = match config_path {
        Some(path) => GameConfig::load(&path)?,
        None => GameConfig::default(),
    };

    let mut app: AppState<AssetLibrary, RecordingSurface> = AppState::new();
    app.on_load(AssetLibrary::prototype_level());
    app.start_game(config, RecordingSurface::new())?;

    for frame in 0..DEMO_FRAMES {
        for (_, step) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            match step {
                Step::LosePointer => app.pointer_lock_lost(),
                Step::Resume => app.resume_game(),
                step => {
                    if let Some(game) = app.game_mut() {
                        apply(game, step);
                    }
                }
            }
        }

        app.frame(FRAME_DT);
        puffin::GlobalProfiler::lock().new_frame();
    }

    if let Some(game) = app.game() {
        let player = game.player();
        log::info!(
            "Player at ({:.2}, {:.2}, {:.2}), stamina {:.0}/{:.0}",
            player.position.x,
            player.position.y,
            player.position.z,
            game.stamina().current(),
            game.stamina().maximum()
        );
        if let Some(gun) = game.equipment().equipped_gun() {
            log::info!(
                "Holding {} with {} | {}",
                gun.kind().name(),
                gun.magazine_ammo(),
                gun.reserve_ammo()
            );
        }
        log::info!(
            "{} frames simulated, {} rendered, {} effects alive",
            game.session().frame,
            game.render().frames_rendered(),
            game.vfx().effects.len()
        );
    }
    if let Some(ammo) = app.hud.ammo_text() {
        log::info!("HUD ammo: {}", ammo);
    }

    app.end_game();
    Ok(())
}
