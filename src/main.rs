//! Lantern's Festival - headless demo.
//!
//! Runs the festival grounds simulation for a few seconds of scripted
//! input (walk to the stage, jump, air dash) and logs what the character
//! does. Useful for eyeballing game feel numbers without a renderer.

use festival_game::{AnimationState, Level, RawInput, Simulation};

/// Scripted input for one tick of the demo.
fn scripted_input(frame: u64) -> RawInput {
    let mut raw = RawInput::default();

    match frame {
        // Walk toward the stage.
        0..=199 => {
            raw.up = true;
        }
        // Jump while still moving forward.
        200..=209 => {
            raw.up = true;
            raw.jump = true;
        }
        // Dash mid-air, keep holding forward.
        210..=239 => {
            raw.up = true;
            raw.dash = true;
        }
        // Let the character land and settle.
        _ => {}
    }

    raw
}

fn main() {
    env_logger::init();

    let mut simulation = Simulation::with_level(Level::festival_grounds())
        .expect("festival grounds should always be playable");

    log::info!(
        "starting demo at {:?}, {} ticks/s",
        simulation.player.position(),
        simulation.config.tick_rate
    );

    let mut last_animation = simulation.player.animation();
    let total_ticks = simulation.config.tick_rate as u64 * 6;

    for frame in 0..total_ticks {
        simulation.tick(&scripted_input(frame));

        let animation = simulation.player.animation();
        if animation != last_animation {
            log::info!(
                "tick {:4}: {:?} -> {:?} at {:?}",
                frame,
                last_animation,
                animation,
                simulation.player.position()
            );
            last_animation = animation;
        }
    }

    let player = &simulation.player;
    log::info!(
        "demo finished at {:?} (grounded: {}, animation: {:?})",
        player.position(),
        player.grounded(),
        player.animation()
    );

    // A plain summary so the demo says something even without RUST_LOG.
    println!(
        "ran {} ticks; final position {:?}, animation {:?}",
        simulation.frame,
        player.position(),
        player.animation()
    );

    if last_animation == AnimationState::Idle {
        println!("the character made it back to solid ground");
    }
}
