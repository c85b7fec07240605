use hecs::World;
use tracing::trace;

use crate::physics::integrate;
use crate::{Ball, Config, Court, Events, Paddle, PaddleIntent, SoundCue, Time, Trail};

/// Apply paddle movement based on intents
pub fn move_paddles(world: &mut World, time: &Time, court: &Court, config: &Config) {
    let ball_x = {
        let mut ball_query = world.query::<&Ball>();
        ball_query
            .iter()
            .next()
            .map(|(_e, ball)| ball.center(config).x)
            .unwrap_or(court.center_x)
    };

    for (_entity, (paddle, intent)) in world.query_mut::<(&mut Paddle, &PaddleIntent)>() {
        paddle.update(time.dt, intent, ball_x, court, config);
    }
}

/// Fly the ball, reporting ground bounces as sound cues
pub fn move_ball(world: &mut World, time: &Time, court: &Court, config: &Config, events: &mut Events) {
    for (_entity, (ball, trail)) in world.query_mut::<(&mut Ball, &mut Trail)>() {
        if let Some(bounce) = integrate(ball, trail, time.dt, court, config) {
            trace!(side = ?bounce.side, bounces = ball.bounces, "ground bounce");
            events.play(SoundCue::Bounce);
        }
    }
}
