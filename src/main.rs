use anyhow::Result;
use log::{debug, info};
use std::time::Duration;
use winit::keyboard::KeyCode;

use ladder_runner::engine::game_loop::GameLoop;
use ladder_runner::engine::input::{Action, InputConfig, PlayerInput};
use ladder_runner::game::characters::{MovementConfig, MovementIntent, PlayerTuning};
use ladder_runner::game::level::{GameStatus, Level, LevelLayout};

/// Simulated display refresh
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Length of the scripted run
const FRAMES: u32 = 900;

/// (frame, key, pressed) events fed to the input layer.
/// The demo level is walled in, so every segment runs whatever the physics does.
const SCRIPT: &[(u32, KeyCode, bool)] = &[
    // Run right towards the ladder, hopping over the crate
    (30, KeyCode::KeyD, true),
    (45, KeyCode::KeyW, true),
    (50, KeyCode::KeyW, false),
    (105, KeyCode::KeyD, false),
    // Climb, then step right off the top of the ladder onto the ledge
    (110, KeyCode::ArrowUp, true),
    (150, KeyCode::ArrowRight, true),
    (170, KeyCode::ArrowUp, false),
    // Pause for one second mid-run
    (200, KeyCode::KeyP, true),
    (201, KeyCode::KeyP, false),
    (260, KeyCode::KeyP, true),
    (261, KeyCode::KeyP, false),
    // Keep going right, off the ledge and against the right wall
    (400, KeyCode::ArrowRight, false),
    // Head back left along the floor
    (420, KeyCode::ArrowLeft, true),
    (600, KeyCode::ArrowLeft, false),
];

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Ladder Runner (headless demo)...");

    let config = MovementConfig::default();
    let tuning = PlayerTuning::default();
    let mut level = Level::new(LevelLayout::demo(), config, tuning)?;
    let bindings = InputConfig::default();
    let mut input = PlayerInput::new();
    let mut game_loop = GameLoop::new();
    let mut last_animation = None;

    for frame in 0..FRAMES {
        for &(_, key, pressed) in SCRIPT.iter().filter(|(at, _, _)| *at == frame) {
            match input.handle_key(&bindings, key, pressed) {
                Some(Action::Pause) if pressed => game_loop.toggle_pause(),
                Some(Action::Reset) if pressed => level.reset()?,
                _ => {}
            }
        }

        let updates = game_loop.begin_frame(FRAME_TIME);
        for _ in 0..updates {
            let intent = MovementIntent::from_input(&input);
            let report = level.tick(&intent);
            input.update();

            if let Some(outcome) = report.player {
                if outcome.animation.is_some() && outcome.animation != last_animation {
                    debug!(
                        "Tick {}: {:?} at {:?}",
                        level.ticks(),
                        outcome.animation,
                        level.player_position()
                    );
                    last_animation = outcome.animation;
                }
            }
        }

        if level.status() == GameStatus::GameOver {
            info!("Player fell out of the level");
            break;
        }
    }

    let player = level.player();
    info!(
        "Finished: {} ticks, score {}, {} items left, position {:?}, {:.1} fps",
        level.ticks(),
        player.score(),
        level.remaining_collectibles(),
        level.player_position(),
        game_loop.fps()
    );
    if player.scoreboard().all_collected() {
        info!("All collectibles picked up!");
    }

    Ok(())
}
