use hecs::World;

use crate::{AiBrain, Ball, Config, Court, Paddle, PaddleIntent, RandomSource, Time};

/// Let every brain-driven paddle choose its intent for this tick
pub fn update_ai(
    world: &mut World,
    time: &Time,
    court: &Court,
    config: &Config,
    rng: &mut dyn RandomSource,
) {
    let ball = {
        let mut ball_query = world.query::<&Ball>();
        ball_query.iter().next().map(|(_e, ball)| *ball)
    };

    let ball = match ball {
        Some(ball) => ball,
        None => return, // No ball in world
    };

    for (_entity, (paddle, intent, brain)) in
        world.query_mut::<(&Paddle, &mut PaddleIntent, &mut AiBrain)>()
    {
        *intent = brain.think(time.dt, paddle, &ball, court, config, rng);
    }
}
