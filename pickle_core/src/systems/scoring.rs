use hecs::World;

use crate::{Ball, Config, Court, PointReason, Side};

/// Decide whether the rally is over, returning the side that wins the point.
///
/// Two bounces beat out-of-bounds; the side the second bounce landed on loses.
/// An out ball is the fault of the bounce side after one bounce and of the
/// last hitter when it never touched down.
pub fn judge(ball: &Ball, court: &Court, config: &Config) -> Option<(Side, PointReason)> {
    let ball_side = court.side_of(ball.center(config).y);

    if ball.bounces >= 2 {
        let loser = ball.last_bounce_side.unwrap_or(ball_side);
        return Some((loser.opponent(), PointReason::DoubleBounce));
    }

    if !court.is_out(&ball.aabb(config)) {
        return None;
    }

    if ball.bounces == 1 {
        let loser = ball.last_bounce_side.unwrap_or(ball_side);
        Some((loser.opponent(), PointReason::BouncedOut))
    } else {
        // Nobody struck it: whoever sent it toward this half is at fault
        let loser = ball.last_hit_by.unwrap_or(ball_side.opponent());
        Some((loser.opponent(), PointReason::OutOnTheFly))
    }
}

/// Judge the ball in the world, if there is one
pub fn check_scoring(world: &World, court: &Court, config: &Config) -> Option<(Side, PointReason)> {
    let mut ball_query = world.query::<&Ball>();
    ball_query
        .iter()
        .next()
        .and_then(|(_e, ball)| judge(ball, court, config))
}
