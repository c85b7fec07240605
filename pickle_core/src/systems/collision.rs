use hecs::World;
use tracing::trace;

use crate::physics::collide;
use crate::{Ball, Burst, Config, Events, InputState, Paddle, RandomSource, SoundCue};

/// Check ball contact with the paddles and turn a hit into feedback events
pub fn check_collisions(
    world: &mut World,
    config: &Config,
    input: &InputState,
    events: &mut Events,
    rng: &mut dyn RandomSource,
) {
    // Snapshot paddles without holding a borrow on the world
    let paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| *paddle)
        .collect();

    let mut contact = None;
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        contact = collide(ball, &paddles, input.power_shot, config, rng);
        if contact.is_some() {
            break;
        }
    }

    let hit = match contact {
        Some(hit) => hit,
        None => return,
    };

    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side == hit.side {
            paddle.hit();
        }
    }

    trace!(side = ?hit.side, offset = hit.offset, power = hit.power, "paddle hit");
    events.paddle_hit = Some(hit.side);

    if hit.power {
        events.play(SoundCue::PowerShot);
        events.bursts.push(Burst {
            pos: hit.at,
            count: config.power_burst_count,
        });
        events.request_shake(config.power_shake);
    } else {
        events.play(SoundCue::PaddleHit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ai_paddle, create_ball, create_paddle, ScriptedRng, Side};
    use glam::Vec2;

    fn setup_world() -> (World, Config, Events, hecs::Entity, hecs::Entity, hecs::Entity) {
        let config = Config::new();
        let mut world = World::new();
        let human = create_paddle(&mut world, Side::Player, &config);
        let ai = create_ai_paddle(&mut world, Side::Ai, &config);
        let ball = create_ball(&mut world, &config);
        (world, config, Events::new(), human, ai, ball)
    }

    /// Drop the ball onto the middle of a paddle, travelling toward it
    fn place_on(world: &mut World, config: &Config, ball: hecs::Entity, paddle: hecs::Entity) {
        let target = world.get::<&Paddle>(paddle).expect("paddle").center(config);
        let mut ball = world.get::<&mut Ball>(ball).expect("ball");
        ball.pos = target - Ball::size(config) * 0.5;
        ball.height = 5.0;
        ball.vel = Vec2::new(0.0, 300.0);
    }

    #[test]
    fn test_normal_hit_plays_paddle_sound() {
        let (mut world, config, mut events, human, _ai, ball) = setup_world();
        place_on(&mut world, &config, ball, human);

        let input = InputState::new();
        check_collisions(&mut world, &config, &input, &mut events, &mut ScriptedRng::constant(0.5));

        assert_eq!(events.paddle_hit, Some(Side::Player));
        assert_eq!(events.cues, vec![SoundCue::PaddleHit]);
        assert!(events.bursts.is_empty());
        assert_eq!(events.shake, 0.0);
        let swing = world.get::<&Paddle>(human).expect("paddle").hit_animation;
        assert_eq!(swing, 1.0, "Striker should start its swing");
    }

    #[test]
    fn test_power_shot_requests_effects() {
        let (mut world, config, mut events, human, ai, ball) = setup_world();
        place_on(&mut world, &config, ball, human);

        let input = InputState {
            power_shot: true,
            ..InputState::new()
        };
        check_collisions(&mut world, &config, &input, &mut events, &mut ScriptedRng::constant(0.5));

        assert_eq!(events.cues, vec![SoundCue::PowerShot]);
        assert_eq!(events.bursts.len(), 1);
        assert_eq!(events.bursts[0].count, config.power_burst_count);
        assert_eq!(events.shake, config.power_shake);
        let idle = world.get::<&Paddle>(ai).expect("paddle").hit_animation;
        assert_eq!(idle, 0.0, "Only the striker swings");
    }

    #[test]
    fn test_power_effects_follow_config() {
        let (mut world, mut config, mut events, human, _ai, ball) = setup_world();
        config.power_burst_count = 8;
        config.power_shake = 2.5;
        place_on(&mut world, &config, ball, human);

        let input = InputState {
            power_shot: true,
            ..InputState::new()
        };
        check_collisions(&mut world, &config, &input, &mut events, &mut ScriptedRng::constant(0.5));

        assert_eq!(events.bursts[0].count, 8);
        assert_eq!(events.shake, 2.5);
    }

    #[test]
    fn test_ai_cannot_power_shot() {
        let (mut world, config, mut events, _human, ai, ball) = setup_world();
        place_on(&mut world, &config, ball, ai);
        world.get::<&mut Ball>(ball).expect("ball").vel = Vec2::new(0.0, -300.0);

        let input = InputState {
            power_shot: true,
            ..InputState::new()
        };
        check_collisions(&mut world, &config, &input, &mut events, &mut ScriptedRng::constant(0.5));

        assert_eq!(events.paddle_hit, Some(Side::Ai));
        assert_eq!(events.cues, vec![SoundCue::PaddleHit]);
    }

    #[test]
    fn test_no_collision_when_no_ball() {
        let config = Config::new();
        let mut world = World::new();
        create_paddle(&mut world, Side::Player, &config);
        let mut events = Events::new();

        // Should not panic or error
        check_collisions(&mut world, &config, &InputState::new(), &mut events, &mut ScriptedRng::constant(0.5));

        assert!(events.paddle_hit.is_none());
        assert!(events.cues.is_empty());
    }

    #[test]
    fn test_ball_at_center_touches_nothing() {
        let (mut world, config, mut events, _human, _ai, _ball) = setup_world();
        check_collisions(&mut world, &config, &InputState::new(), &mut events, &mut ScriptedRng::constant(0.5));
        assert!(events.paddle_hit.is_none());
    }
}
