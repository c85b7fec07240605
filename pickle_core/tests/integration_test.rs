use glam::Vec2;
use pickle_core::*;

fn new_match() -> Match {
    Match::new(Config::new(), Box::new(ScriptedRng::constant(0.5)))
}

/// Run the serve delay out so the rally is live
fn serve(game: &mut Match) {
    game.update(game.config.serve_delay);
    assert_eq!(game.phase(), GamePhase::Playing);
}

/// Put the ball just above the court, about to land for the second time on `half`
fn drop_second_bounce(game: &mut Match, half: Side) {
    let net = game.court.net_y();
    let depth = match half {
        Side::Ai => net - 60.0,
        Side::Player => net + 60.0,
    };
    let center = Vec2::new(game.court.center_x, depth);
    let size = Ball::size(&game.config);
    let ball = game.ball_mut().expect("ball");
    ball.pos = center - size * 0.5;
    ball.vel = Vec2::ZERO;
    ball.height = 0.5;
    ball.vz = -300.0;
    ball.bounces = 1;
    ball.last_bounce_side = Some(half);
}

/// Win one point for `winner` via a double bounce on the loser's half
fn win_point(game: &mut Match, winner: Side) {
    drop_second_bounce(game, winner.opponent());
    game.update(0.02);
    assert_eq!(game.events.point.map(|(side, _)| side), Some(winner));
}

#[test]
fn test_double_bounce_point_then_next_serve() {
    let mut game = new_match();
    game.start();
    serve(&mut game);

    drop_second_bounce(&mut game, Side::Ai);
    game.update(0.02);

    assert_eq!(game.phase(), GamePhase::PointWon);
    assert_eq!(game.score, Score { player: 1, ai: 0 });
    assert_eq!(game.server, Side::Player);
    assert_eq!(game.events.point, Some((Side::Player, PointReason::DoubleBounce)));
    assert!(game.events.cues.contains(&SoundCue::Bounce));
    assert!(game.events.cues.contains(&SoundCue::PointScored));

    // Frozen until the point delay runs out
    game.update(game.config.point_delay / 2.0);
    assert_eq!(game.phase(), GamePhase::PointWon);
    game.update(game.config.point_delay / 2.0);
    assert_eq!(game.phase(), GamePhase::Serving);

    let ball = game.ball().expect("ball");
    assert_eq!(ball.vel, Vec2::ZERO, "Ball reset for the next point");
    assert_eq!(ball.bounces, 0);

    serve(&mut game);
    let ball = game.ball().expect("ball");
    assert!(ball.vel.y < 0.0, "Player serve should head toward the AI");
}

#[test]
fn test_winner_of_point_serves_next() {
    let mut game = new_match();
    game.start();
    serve(&mut game);

    win_point(&mut game, Side::Ai);
    assert_eq!(game.server, Side::Ai);

    game.update(game.config.point_delay);
    serve(&mut game);
    assert!(game.ball().expect("ball").vel.y > 0.0, "AI serve heads for the human");
}

#[test]
fn test_out_on_the_fly_after_ai_hit() {
    let mut game = new_match();
    game.start();
    serve(&mut game);

    let baseline = game.court.near_y + game.court.out_margin;
    {
        let ball = game.ball_mut().expect("ball");
        ball.pos = Vec2::new(300.0, baseline - 10.0);
        ball.vel = Vec2::new(0.0, 300.0);
        ball.height = 100.0;
        ball.vz = 0.0;
        ball.bounces = 0;
        ball.last_hit_by = Some(Side::Ai);
    }
    game.update(0.02);

    assert_eq!(game.events.point, Some((Side::Player, PointReason::OutOnTheFly)));
    assert_eq!(game.score.player, 1);
}

#[test]
fn test_win_by_two() {
    let mut game = new_match();
    game.start();
    serve(&mut game);
    game.score = Score { player: 10, ai: 10 };

    win_point(&mut game, Side::Player);
    assert_eq!(game.score, Score { player: 11, ai: 10 });
    assert_eq!(game.phase(), GamePhase::PointWon, "11-10 is not a win");
    assert!(game.events.game_over.is_none());
    assert!(game.events.leaderboard.is_empty());

    game.update(game.config.point_delay);
    serve(&mut game);
    win_point(&mut game, Side::Player);

    assert_eq!(game.score, Score { player: 12, ai: 10 });
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.events.game_over, Some(Side::Player));
    assert!(game.events.cues.contains(&SoundCue::Win));
    assert_eq!(
        game.events.leaderboard,
        vec![
            LeaderboardRequest::SubmitScore { player: 12, ai: 10 },
            LeaderboardRequest::FetchRank
        ]
    );

    let mut collab = Collaborators::new(
        Box::new(Silent),
        Box::new(Silent),
        Box::new(MemoryLeaderboard::new()),
    );
    collab.dispatch(&game.events);
    assert_eq!(collab.status.as_deref(), Some("Rank #1"));
}

#[test]
fn test_ai_win_plays_lose_and_only_fetches_rank() {
    let mut game = new_match();
    game.start();
    serve(&mut game);
    game.score = Score { player: 3, ai: 10 };

    win_point(&mut game, Side::Ai);

    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(game.events.cues.contains(&SoundCue::Lose));
    assert!(!game.events.cues.contains(&SoundCue::Win));
    assert_eq!(game.events.leaderboard, vec![LeaderboardRequest::FetchRank]);
}

#[test]
fn test_game_over_ignores_time_until_restart() {
    let mut game = new_match();
    game.start();
    serve(&mut game);
    game.score = Score { player: 10, ai: 0 };
    win_point(&mut game, Side::Player);
    assert_eq!(game.phase(), GamePhase::GameOver);

    game.update(30.0);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(!game.toggle_pause().success, "Cannot pause a finished game");

    assert!(game.start().success);
    assert_eq!(game.phase(), GamePhase::Serving);
    assert_eq!(game.score, Score::new(), "A new game starts from zero");
    assert_eq!(game.server, Side::Player);
}

#[test]
fn test_reset_during_point_delay() {
    let mut game = new_match();
    game.start();
    serve(&mut game);
    win_point(&mut game, Side::Ai);
    assert!(game.delay_pending());

    game.reset();
    game.update(game.config.point_delay * 4.0);

    assert_eq!(game.phase(), GamePhase::Start);
    assert_eq!(game.score, Score::new());
    assert_eq!(game.server, Side::Player);
}

#[test]
fn test_pause_holds_the_rally() {
    let mut game = new_match();
    game.start();
    serve(&mut game);
    game.toggle_pause();

    let before = game.ball().expect("ball");
    for _ in 0..100 {
        game.update(0.05);
    }
    let after = game.ball().expect("ball");
    assert_eq!(before.pos, after.pos);
    assert_eq!(before.height, after.height);
    assert_eq!(game.phase(), GamePhase::Paused);
}

#[test]
fn test_seeded_autopilot_match_keeps_invariants() {
    let mut game = Match::new(Config::new(), Box::new(GameRng::new(2024)));
    let human = game.entity(Side::Player);
    game.world
        .insert_one(human, AiBrain::new(game.court.center_x))
        .expect("human paddle exists");
    game.start();

    let mut points = 0;
    for _ in 0..(60 * 600) {
        game.update(1.0 / 60.0);

        let ball = game.ball().expect("ball");
        assert!(ball.height >= 0.0, "Ball sank below the court");
        assert!(ball.speed <= game.config.ball_speed_max + 1e-3);

        for side in [Side::Player, Side::Ai] {
            let paddle = game.paddle(side).expect("paddle");
            let cy = paddle.center(&game.config).y;
            assert!(paddle.pos.x >= game.court.left_at(cy) - 1e-3);
            assert!(paddle.pos.x + game.config.paddle_width <= game.court.right_at(cy) + 1e-3);
        }

        if game.events.point.is_some() {
            points += 1;
        }
        if game.phase() == GamePhase::GameOver {
            let winner = game.events.game_over.or_else(|| {
                game.score
                    .winner(game.config.win_score, game.config.win_margin)
            });
            assert!(winner.is_some(), "Game over needs a decided score");
            break;
        }
    }

    assert!(points > 0, "Ten minutes of play should produce a point");
    assert_eq!(
        u32::from(game.score.player) + u32::from(game.score.ai),
        points,
        "Every point event is scored exactly once"
    );
}
