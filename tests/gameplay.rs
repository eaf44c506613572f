//! End-to-end shot scenarios driven through the public tick API

use hoop_shot::consts::{BALL_START, DEFAULT_POWER};
use hoop_shot::highscores::HighScoreEntry;
use hoop_shot::sim::{Feedback, GameEvent, GameState, TickInput, reset, shoot_with, tick};
use hoop_shot::{HighScores, Leaderboard};
use proptest::prelude::*;
use rand::RngCore;

/// Draws exactly 0.5 from `random::<f32>()`, so shots carry no jitter
struct Centered;

impl RngCore for Centered {
    fn next_u32(&mut self) -> u32 {
        0x8000_0000
    }

    fn next_u64(&mut self) -> u64 {
        0x8000_0000_0000_0000
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0x80);
    }
}

/// Counts every submission, qualifying or not
#[derive(Default)]
struct RecordingBoard {
    submitted: Vec<u32>,
    inner: HighScores,
}

impl Leaderboard for RecordingBoard {
    fn submit(&mut self, score: u32, timestamp: f64) -> Option<usize> {
        self.submitted.push(score);
        self.inner.submit(score, timestamp)
    }

    fn top_n(&self, n: usize) -> Vec<HighScoreEntry> {
        self.inner.top_n(n)
    }
}

fn manual_state() -> GameState {
    let mut state = GameState::new(7);
    state.auto_reset = false;
    state
}

/// Shoot from wherever the ball rests at `power`, without jitter
fn take_shot(state: &mut GameState, power: u8) {
    state.session.shot_power = power;
    assert!(shoot_with(state, &mut Centered).is_some());
}

/// Tick until `done` matches an event (inclusive). Returns every event seen
/// with the tick offset it was drained on.
fn run_until(
    state: &mut GameState,
    board: &mut dyn Leaderboard,
    max_ticks: usize,
    done: impl Fn(&GameEvent) -> bool,
) -> Vec<(usize, GameEvent)> {
    let mut seen: Vec<(usize, GameEvent)> =
        state.drain_events().into_iter().map(|e| (0, e)).collect();
    for t in 1..=max_ticks {
        tick(state, &TickInput::default(), board);
        let events = state.drain_events();
        let finished = events.iter().any(&done);
        seen.extend(events.into_iter().map(|e| (t, e)));
        if finished {
            return seen;
        }
    }
    panic!("no matching event within {} ticks; saw {:?}", max_ticks, seen);
}

fn is_settled(e: &GameEvent) -> bool {
    matches!(e, GameEvent::Settled { .. })
}

fn is_reset(e: &GameEvent) -> bool {
    matches!(e, GameEvent::Reset { .. })
}

fn count(events: &[(usize, GameEvent)], pred: impl Fn(&GameEvent) -> bool) -> usize {
    events.iter().filter(|(_, e)| pred(e)).count()
}

fn position(events: &[(usize, GameEvent)], pred: impl Fn(&GameEvent) -> bool) -> Option<usize> {
    events.iter().position(|(_, e)| pred(e))
}

#[test]
fn test_swish_from_center() {
    let mut state = manual_state();
    let mut board = HighScores::new();
    take_shot(&mut state, 35);

    let events = run_until(&mut state, &mut board, 600, is_settled);

    let scored: Vec<_> = events
        .iter()
        .filter_map(|(_, e)| match e {
            GameEvent::Scored { points, swish, combo, .. } => Some((*points, *swish, *combo)),
            _ => None,
        })
        .collect();
    assert_eq!(scored, vec![(5, true, 1)]);
    assert_eq!(count(&events, |e| matches!(e, GameEvent::RimBounce { .. })), 0);
    assert_eq!(count(&events, |e| matches!(e, GameEvent::NetSway { .. })), 1);
    assert_eq!(count(&events, |e| *e == GameEvent::Missed), 0);

    assert_eq!(state.session.score, 5);
    assert_eq!(state.session.shots_made, 1);
    assert_eq!(state.session.shot_attempts, 1);
    assert_eq!(state.feedback(), Feedback::Swish);
    assert!(!state.ball.is_airborne);
    assert_eq!(state.snapshot().accuracy, 100);
}

#[test]
fn test_bank_shot_keeps_swish() {
    let mut state = manual_state();
    let mut board = HighScores::new();
    take_shot(&mut state, 36);

    let events = run_until(&mut state, &mut board, 600, is_settled);

    let board_hit = position(&events, |e| matches!(e, GameEvent::BackboardHit { .. }));
    let scored = position(&events, |e| matches!(e, GameEvent::Scored { swish: true, .. }));
    assert!(board_hit.is_some());
    assert!(board_hit < scored);
    assert_eq!(state.session.score, 5);
}

#[test]
fn test_rim_touch_make_is_plain() {
    let mut state = manual_state();
    let mut board = HighScores::new();
    take_shot(&mut state, 38);

    let events = run_until(&mut state, &mut board, 600, is_settled);

    let rim = position(&events, |e| matches!(e, GameEvent::RimBounce { .. }));
    let scored = position(&events, |e| {
        matches!(e, GameEvent::Scored { swish: false, points: 2, .. })
    });
    assert!(rim.is_some());
    assert!(scored.is_some());
    assert!(rim < scored);
    assert_eq!(state.session.score, 2);
    assert_eq!(state.feedback(), Feedback::Made);
}

#[test]
fn test_rim_out_is_a_miss() {
    let mut state = manual_state();
    let mut board = RecordingBoard::default();
    take_shot(&mut state, 37);

    let events = run_until(&mut state, &mut board, 600, is_settled);

    assert!(count(&events, |e| matches!(e, GameEvent::RimBounce { .. })) >= 1);
    assert_eq!(count(&events, |e| matches!(e, GameEvent::Scored { .. })), 0);
    assert_eq!(count(&events, |e| *e == GameEvent::Missed), 1);
    assert_eq!(state.feedback(), Feedback::Missed);
    assert_eq!(state.session.combo_streak, 0);

    // Nothing scored, so the round is not submitted
    assert_eq!(reset(&mut state, &mut board, 0.0), None);
    assert!(board.submitted.is_empty());
}

#[test]
fn test_three_swishes_build_combo() {
    let mut state = manual_state();
    let mut board = HighScores::new();

    let mut bonuses = Vec::new();
    for _ in 0..3 {
        state.ball.position = BALL_START;
        take_shot(&mut state, 35);
        let events = run_until(&mut state, &mut board, 600, is_settled);
        bonuses.extend(events.iter().filter_map(|(_, e)| match e {
            GameEvent::Scored { combo_bonus, .. } => Some(*combo_bonus),
            _ => None,
        }));
    }
    assert_eq!(bonuses, vec![0, 2, 3]);

    // 5 + (5 + 2) + (5 + 3)
    assert_eq!(state.session.score, 20);
    assert_eq!(state.session.combo_streak, 3);
    assert_eq!(state.session.max_combo, 3);
    assert_eq!(state.feedback(), Feedback::Combo(3));
    assert_eq!(state.feedback().message(), "COMBO x3! +3 BONUS!");
}

#[test]
fn test_rim_contact_breaks_combo_even_on_make() {
    let mut state = manual_state();
    let mut board = HighScores::new();

    take_shot(&mut state, 35);
    run_until(&mut state, &mut board, 600, is_settled);
    assert_eq!(state.session.combo_streak, 1);

    state.ball.position = BALL_START;
    take_shot(&mut state, 38);
    run_until(&mut state, &mut board, 600, is_settled);

    // The second make restarts the streak instead of extending it
    assert_eq!(state.session.shots_made, 2);
    assert_eq!(state.session.combo_streak, 1);
    assert_eq!(state.session.max_combo, 1);
    assert_eq!(state.session.score, 7);
    assert_eq!(state.feedback(), Feedback::Made);
}

#[test]
fn test_auto_reset_submits_round_once() {
    let mut state = GameState::new(7);
    let mut board = RecordingBoard::default();
    take_shot(&mut state, 35);

    let events = run_until(&mut state, &mut board, 1000, is_reset);

    let settled_at = events.iter().find(|(_, e)| is_settled(e)).map(|(t, _)| *t);
    let reset_at = events.iter().find(|(_, e)| is_reset(e)).map(|(t, _)| *t);
    let (Some(settled_at), Some(reset_at)) = (settled_at, reset_at) else {
        panic!("missing settle/reset in {:?}", events);
    };
    // 2000 ms at 60 Hz
    assert!((119..=120).contains(&(reset_at - settled_at)));
    assert!(events.iter().any(|(_, e)| matches!(
        e,
        GameEvent::ResetScheduled { delay_ms: 2000, .. }
    )));
    assert!(events.iter().any(|(_, e)| matches!(
        e,
        GameEvent::Reset { submitted: true, rank: Some(1) }
    )));

    assert_eq!(board.submitted, vec![5]);
    assert_eq!(state.ball.position, BALL_START);
    assert_eq!(state.session.shot_power, DEFAULT_POWER);
    assert_eq!(state.session.score, 0);
    assert_eq!(state.feedback(), Feedback::None);

    for _ in 0..300 {
        tick(&mut state, &TickInput::default(), &mut board);
    }
    assert_eq!(board.submitted.len(), 1);
}

#[test]
fn test_new_shot_outruns_pending_reset() {
    let mut state = GameState::new(7);
    let mut board = RecordingBoard::default();

    take_shot(&mut state, 35);
    run_until(&mut state, &mut board, 600, is_settled);
    assert!(state.reset_timer.is_pending());

    state.ball.position = BALL_START;
    take_shot(&mut state, 35);
    for _ in 0..130 {
        tick(&mut state, &TickInput::default(), &mut board);
    }

    assert!(!state.drain_events().iter().any(is_reset));
    assert!(board.submitted.is_empty());
    assert!(state.ball.is_airborne);
    assert_eq!(state.session.shot_attempts, 2);
    assert_eq!(state.session.shots_made, 2);
}

#[test]
fn test_full_power_flies_out_of_bounds() {
    let mut state = GameState::new(7);
    let mut board = RecordingBoard::default();
    take_shot(&mut state, 100);

    let events = run_until(&mut state, &mut board, 600, is_reset);

    assert_eq!(count(&events, |e| matches!(e, GameEvent::OutOfBounds { .. })), 1);
    assert_eq!(count(&events, |e| *e == GameEvent::Missed), 1);
    assert!(events.iter().any(|(_, e)| matches!(
        e,
        GameEvent::ResetScheduled { delay_ms: 1000, .. }
    )));
    assert_eq!(count(&events, is_settled), 0);
    assert!(board.submitted.is_empty());
    assert_eq!(state.ball.position, BALL_START);
}

#[test]
fn test_reset_and_shoot_same_tick() {
    let mut state = GameState::new(3);
    let mut board = HighScores::new();
    state.ball.position.x = 5.0;
    let input = TickInput {
        reset: true,
        shoot: true,
        ..Default::default()
    };
    tick(&mut state, &input, &mut board);

    let events = state.drain_events();
    assert!(matches!(events[0], GameEvent::Reset { submitted: false, .. }));
    assert!(matches!(events[1], GameEvent::ShotTaken { power: DEFAULT_POWER, .. }));
    assert!(state.ball.is_airborne);
    assert_eq!(state.generation, 2);
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<[bool; 6]>(), prop::bool::weighted(0.1), prop::bool::weighted(0.01)).prop_map(
        |(keys, shoot, reset)| TickInput {
            left: keys[0],
            right: keys[1],
            forward: keys[2],
            back: keys[3],
            power_up: keys[4],
            power_down: keys[5],
            shoot,
            reset,
            timestamp_ms: 0.0,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_session_invariants_hold(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 0..600),
    ) {
        let mut state = GameState::new(seed);
        let mut board = HighScores::new();
        let radius = state.tuning.ball_radius;

        for input in &inputs {
            tick(&mut state, input, &mut board);
            let s = &state.session;
            prop_assert!(s.shots_made <= s.shot_attempts);
            prop_assert!(s.max_combo >= s.combo_streak);
            prop_assert!(s.shot_power <= 100);
            prop_assert!(state.ball.position.y >= radius - 1e-4);
            prop_assert!(state.trail.len() <= state.trail.capacity());
        }

        let scores: Vec<u32> = board.top_n(10).iter().map(|e| e.score).collect();
        prop_assert!(scores.len() <= 5);
        prop_assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn prop_same_seed_same_game(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 0..300),
    ) {
        let mut a = GameState::new(seed);
        let mut b = GameState::new(seed);
        let mut board_a = HighScores::new();
        let mut board_b = HighScores::new();
        for input in &inputs {
            tick(&mut a, input, &mut board_a);
            tick(&mut b, input, &mut board_b);
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
        prop_assert_eq!(a.drain_events(), b.drain_events());
        prop_assert_eq!(board_a, board_b);
    }
}
