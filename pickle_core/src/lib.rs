pub mod ai;
pub mod collab;
pub mod components;
pub mod config;
pub mod court;
pub mod game;
pub mod params;
pub mod physics;
pub mod resources;
pub mod systems;

pub use ai::*;
pub use collab::*;
pub use components::*;
pub use config::*;
pub use court::*;
pub use game::*;
pub use params::*;
pub use resources::*;

use hecs::World;
use systems::*;

/// Run the pickleball rally simulation for one frame.
///
/// Returns the point that ended the rally, if any. Stepping stops on the
/// micro-step that decided it, so nothing moves after the rally is over.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &Time,
    court: &Court,
    config: &Config,
    input: &InputState,
    events: &mut Events,
    rng: &mut dyn RandomSource,
) -> Option<(Side, PointReason)> {
    // Clamp dt to prevent large jumps
    let clamped_dt = time.dt.clamp(0.0, Params::MAX_DT);

    // Fixed micro-steps for stable physics
    let mut remaining_dt = clamped_dt;
    let mut point = None;
    while remaining_dt > 0.0 {
        let step_dt = remaining_dt.min(Params::FIXED_DT);
        remaining_dt -= step_dt;

        let step_time = Time::new(step_dt);

        // 1. Ingest inputs (apply to the human paddle's intent)
        ingest_inputs(world, input);

        // 2. Brains pick intents for computer-driven paddles
        update_ai(world, &step_time, court, config, rng);

        // 3. Move paddles based on intents
        move_paddles(world, &step_time, court, config);

        // 4. Fly the ball (gravity, ground bounces)
        move_ball(world, &step_time, court, config, events);

        // 5. Check collisions (ball vs paddles)
        check_collisions(world, config, input, events, rng);

        // 6. Judge the rally
        point = check_scoring(world, court, config);
        if point.is_some() {
            break;
        }
    }

    point
}

/// Helper to create a human-controlled paddle entity
pub fn create_paddle(world: &mut World, side: Side, config: &Config) -> hecs::Entity {
    world.spawn((Paddle::new(side, config.paddle_home(side)), PaddleIntent::new()))
}

/// Helper to create a brain-driven paddle entity
pub fn create_ai_paddle(world: &mut World, side: Side, config: &Config) -> hecs::Entity {
    world.spawn((
        Paddle::new(side, config.paddle_home(side)),
        PaddleIntent::new(),
        AiBrain::new(config.center_x()),
    ))
}

/// Helper to create the ball entity, parked at the net
pub fn create_ball(world: &mut World, config: &Config) -> hecs::Entity {
    world.spawn((Ball::new(config), Trail::new()))
}
