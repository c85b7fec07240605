//! Ball flight and paddle contact.
//!
//! Both functions are pure over their arguments: the systems layer fetches
//! the ball and paddles out of the world, calls in here, and turns the
//! returned contacts into sound/particle events.

use glam::Vec2;

use crate::{Ball, Config, Court, Paddle, RandomSource, Side, Trail};

/// A ground contact that counted as a bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundBounce {
    pub side: Side,
    pub at: Vec2,
}

/// A ball struck by a paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleHit {
    pub side: Side,
    pub offset: f32, // -1 = left edge of the paddle, 1 = right edge
    pub power: bool,
    pub at: Vec2,
}

/// Advance the ball by `dt` under gravity, bouncing or settling on the court
pub fn integrate(
    ball: &mut Ball,
    trail: &mut Trail,
    dt: f32,
    court: &Court,
    config: &Config,
) -> Option<GroundBounce> {
    let dt = dt.max(0.0);

    trail.push(ball.pos, config.trail_length);
    ball.pos += ball.vel * dt;

    // Resting on the court: gravity can't push it further down
    if ball.height <= 0.0 && ball.vz <= 0.0 && ball.vz > -config.bounce_threshold {
        ball.height = 0.0;
        ball.vz = 0.0;
        return None;
    }

    ball.vz -= config.gravity * dt;
    ball.height += ball.vz * dt;

    if ball.height > 0.0 {
        return None;
    }
    ball.height = 0.0;

    if ball.vz < -config.bounce_threshold {
        let at = ball.center(config);
        let side = court.side_of(at.y);
        ball.bounces = ball.bounces.saturating_add(1);
        ball.last_bounce_side = Some(side);
        ball.vz = -ball.vz * config.restitution;
        Some(GroundBounce { side, at })
    } else {
        ball.vz = 0.0;
        None
    }
}

/// Resolve contact with the first overlapping paddle, human before AI.
///
/// `power_requested` only applies when the human is the striker.
pub fn collide(
    ball: &mut Ball,
    paddles: &[Paddle],
    power_requested: bool,
    config: &Config,
    rng: &mut dyn RandomSource,
) -> Option<PaddleHit> {
    if ball.height >= config.reach_height {
        return None;
    }

    let ball_box = ball.aabb(config);
    let mut order: Vec<&Paddle> = paddles.iter().collect();
    order.sort_by_key(|p| p.side);
    let paddle = order
        .into_iter()
        .find(|p| p.aabb(config).overlaps(&ball_box))?;

    let paddle_box = paddle.aabb(config);
    let half_width = config.paddle_width / 2.0;
    let offset = ((ball_box.center().x - paddle_box.center().x) / half_width).clamp(-1.0, 1.0);

    ball.bounces = 0;
    ball.last_bounce_side = None;
    ball.last_hit_by = Some(paddle.side);

    // Arc it back over the net
    ball.vz = rng.range(config.hit_lift_min, config.hit_lift_max);

    // Return heads away from the striker, angled by where it met the paddle
    let angle = offset * config.max_deflection_deg.to_radians();
    let incoming = ball.vel.length();
    let direction = paddle.side.attack_direction();
    let aimed = Vec2::new(angle.sin() * incoming, angle.cos() * incoming * direction);

    let power = power_requested && paddle.is_human();
    if power {
        ball.speed = (ball.speed * config.power_speed_multiplier).min(config.power_speed_max);
        ball.vz *= config.power_lift_multiplier;
    } else {
        let ratcheted = (ball.speed * config.ball_speed_increase).min(config.ball_speed_max);
        ball.speed = ball.speed.max(ratcheted);
    }

    // Zero-length velocity keeps its old direction
    if let Some(unit) = aimed.try_normalize() {
        ball.vel = unit * ball.speed;
    }

    match paddle.side {
        Side::Player => ball.pos.y = paddle_box.min.y - config.ball_size - 1.0,
        Side::Ai => ball.pos.y = paddle_box.max.y + 1.0,
    }

    Some(PaddleHit {
        side: paddle.side,
        offset,
        power,
        at: ball.center(config),
    })
}
