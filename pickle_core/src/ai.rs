use crate::{Ball, Config, Court, Paddle, PaddleIntent, Params, RandomSource};

/// Target-tracking opponent component.
///
/// The target is only re-sampled every `reaction_delay` seconds, while the
/// steering toward the held target runs every tick.
#[derive(Debug, Clone, Copy)]
pub struct AiBrain {
    pub difficulty: f32, // 0 = hopeless, 1 = perfect
    pub reaction_delay: f32,
    pub reaction_timer: f32,
    pub target_x: f32, // desired paddle centre
}

impl AiBrain {
    pub fn new(target_x: f32) -> Self {
        Self {
            difficulty: Params::AI_DIFFICULTY,
            reaction_delay: Params::AI_REACTION_DELAY,
            reaction_timer: 0.0,
            target_x,
        }
    }

    /// Clamp skill to [0, 1]; higher skill reacts faster
    pub fn set_difficulty(&mut self, difficulty: f32) {
        self.difficulty = difficulty.clamp(0.0, 1.0);
        self.reaction_delay = 0.02 + (1.0 - self.difficulty) * 0.2;
    }

    /// Half-width of the uniform aim error band
    pub fn aim_error(&self, config: &Config) -> f32 {
        (1.0 - self.difficulty) * config.ai_aim_error
    }

    pub fn reset(&mut self, target_x: f32) {
        self.reaction_timer = 0.0;
        self.target_x = target_x;
    }

    /// One tick of AI control for `paddle`
    pub fn think(
        &mut self,
        dt: f32,
        paddle: &Paddle,
        ball: &Ball,
        court: &Court,
        config: &Config,
        rng: &mut dyn RandomSource,
    ) -> PaddleIntent {
        self.reaction_timer += dt;
        if self.reaction_timer >= self.reaction_delay {
            self.reaction_timer = 0.0;
            self.retarget(paddle, ball, court, config, rng);
        }
        self.steer(paddle, config, rng)
    }

    fn retarget(
        &mut self,
        paddle: &Paddle,
        ball: &Ball,
        court: &Court,
        config: &Config,
        rng: &mut dyn RandomSource,
    ) {
        let ball_center = ball.center(config);
        let paddle_center = paddle.center(config);

        // Incoming balls travel against this side's attack direction
        let incoming = ball.vel.y * paddle.side.attack_direction() < 0.0;
        if !incoming {
            self.target_x = court.center_x;
            return;
        }

        let time_to_reach = ((paddle_center.y - ball_center.y) / ball.vel.y).abs();
        let predicted = ball_center.x + ball.vel.x * time_to_reach;

        let half = config.paddle_width / 2.0;
        let lo = court.left_at(paddle_center.y) + half;
        let hi = court.right_at(paddle_center.y) - half;
        let error = self.aim_error(config);

        self.target_x = predicted.min(hi).max(lo) + rng.range(-error, error);
    }

    fn steer(&self, paddle: &Paddle, config: &Config, rng: &mut dyn RandomSource) -> PaddleIntent {
        let gap = self.target_x - paddle.center(config).x;
        let mut intent = if gap.abs() <= config.ai_dead_zone {
            PaddleIntent::new()
        } else if gap > 0.0 {
            PaddleIntent::right()
        } else {
            PaddleIntent::left()
        };

        // Fumbled input
        if !rng.chance(self.difficulty) {
            intent.stop();
        }
        intent
    }
}
