extern crate mcgo;
extern crate rand;

mod common;

use common::{MockBoard};
use mcgo::board::{Board, Color, Move, Point};
use mcgo::config::{PlayoutConfig};
use mcgo::error::{ErrorKind, PlayoutError};
use mcgo::fastboard::{FastBoard};
use mcgo::features::{FeatureId, GammaWeights, PatternFeatureExtractor};
use mcgo::playout::{NoFeatures, PlayoutDriver};
use mcgo::policy::{SimulationPolicy, generate_move_with_filter, generate_random_move, select_move};
use mcgo::probs::{FeatureModel};
use mcgo::random::{XorShift128PlusRng};

use rand::{SeedableRng};
use std::sync::{Arc};

fn config(policy: SimulationPolicy, limit: usize) -> PlayoutConfig {
  PlayoutConfig{
    komi:               0.5,
    limit:              limit,
    simulation_policy:  policy,
    .. PlayoutConfig::default()
  }
}

#[test]
fn test_random_playout_5x5() {
  let mut rng = XorShift128PlusRng::seed_from_u64(1);
  let mut driver = PlayoutDriver::new(config(SimulationPolicy::Random, 1000)).unwrap();
  for _ in 0 .. 20 {
    let mut board = FastBoard::new(5);
    let outcome = driver.run(&mut board, Color::Black, &mut rng).unwrap();
    assert!(outcome.plies <= 1000);
    assert_eq!(outcome.plies, board.num_plies());
    assert!(outcome.terminal);
    assert!(board.is_terminal());
    assert_eq!(outcome.winner == Color::Black, outcome.margin > 0.0);
  }
}

#[test]
fn test_rulebased_playout_5x5() {
  let mut rng = XorShift128PlusRng::seed_from_u64(2);
  let mut driver = PlayoutDriver::new(config(SimulationPolicy::RuleBased, 1000)).unwrap();
  for _ in 0 .. 20 {
    let mut board = FastBoard::new(5);
    let winner = driver.play_game(&mut board, Color::White, &mut rng).unwrap();
    assert!(winner == Color::Black || winner == Color::White);
    assert!(board.num_plies() <= 1000);
  }
}

#[test]
fn test_probabilistic_playout_5x5() {
  let table = GammaWeights::from_pairs(vec![
    (FeatureId::PASS_NEW, 0.05),
    (FeatureId::PASS_CONSECUTIVE, 0.5),
    (FeatureId::CAPTURE, 10.0),
    (FeatureId::SELFATARI, 0.1),
  ]).unwrap();
  let model = Arc::new(FeatureModel::new(PatternFeatureExtractor, Arc::new(table)).unwrap());
  let mut driver = PlayoutDriver::with_model(config(SimulationPolicy::Probabilistic, 200), model).unwrap();
  let mut rng = XorShift128PlusRng::seed_from_u64(3);
  for _ in 0 .. 5 {
    let mut board = FastBoard::new(5);
    let outcome = driver.run(&mut board, Color::Black, &mut rng).unwrap();
    assert!(outcome.plies <= 200);
    assert_eq!(outcome.terminal, board.is_terminal());
  }
}

#[test]
fn test_limit_truncates() {
  let mut board = MockBoard::new(9);
  board.never_ends = true;
  let mut driver = PlayoutDriver::new(config(SimulationPolicy::Random, 7)).unwrap();
  let mut rng = XorShift128PlusRng::seed_from_u64(4);
  let outcome = driver.run(&mut board, Color::Black, &mut rng).unwrap();
  assert_eq!(outcome.plies, 7);
  assert!(!outcome.terminal);
  assert_eq!(board.played.len(), 7);
  // Colors alternate starting from the given color.
  assert_eq!(board.played[0].0, Color::Black);
  assert_eq!(board.played[1].0, Color::White);
  assert_eq!(board.played[6].0, Color::Black);
}

#[test]
fn test_unknown_option_fails_before_play() {
  match PlayoutDriver::from_options(&[("komi", "6.5"), ("foo", "1")]) {
    Err(e) => {
      assert_eq!(e.kind(), ErrorKind::Configuration);
      match e {
        PlayoutError::UnknownOption(key) => assert_eq!(key, "foo"),
        other => panic!("unexpected error: {:?}", other),
      }
    }
    Ok(_) => panic!("unknown option accepted"),
  }
}

#[test]
fn test_probabilistic_requires_model() {
  match PlayoutDriver::new(config(SimulationPolicy::Probabilistic, 10)) {
    Err(PlayoutError::MissingFeatureModel) => {}
    Err(e) => panic!("unexpected error: {}", e),
    Ok(_) => panic!("driver built without a feature model"),
  }
}

#[test]
fn test_illegal_move_aborts_playout() {
  let mut board = MockBoard::new(4);
  board.reject_all = true;
  let mut driver = PlayoutDriver::new(config(SimulationPolicy::Random, 100)).unwrap();
  let mut rng = XorShift128PlusRng::seed_from_u64(5);
  match driver.run(&mut board, Color::White, &mut rng) {
    Err(e @ PlayoutError::IllegalMove{..}) => {
      assert_eq!(e.kind(), ErrorKind::InvariantViolation);
      assert!(e.is_fatal());
    }
    other => panic!("expected IllegalMove, got {:?}", other),
  }
}

#[test]
fn test_all_eyes_means_pass() {
  let mut board = MockBoard::new(3);
  for p in 0 .. 3 {
    board.eyes.insert(Point(p));
  }
  let mut driver = PlayoutDriver::new(config(SimulationPolicy::Random, 100)).unwrap();
  let mut rng = XorShift128PlusRng::seed_from_u64(6);
  let outcome = driver.run(&mut board, Color::Black, &mut rng).unwrap();
  assert!(outcome.terminal);
  assert_eq!(outcome.plies, 2);
  assert_eq!(board.played, vec![(Color::Black, Move::Pass), (Color::White, Move::Pass)]);
  assert_eq!(outcome.winner, Color::White);
}

#[test]
fn test_random_move_eye_filter() {
  let mut board = MockBoard::new(2);
  board.eyes.insert(Point(0));
  board.illegal.insert(Point(1));
  let mut buf = Vec::new();
  let mut rng = XorShift128PlusRng::seed_from_u64(7);
  assert_eq!(generate_random_move(&board, Color::Black, true, &mut buf, &mut rng), None);
  assert_eq!(generate_random_move(&board, Color::Black, false, &mut buf, &mut rng), Some(Point(0)));
}

#[test]
fn test_rulebased_prefers_filtered_pattern_moves() {
  let mut board = MockBoard::new(6);
  board.pattern = vec![Point(3), Point(4), Point(5)];
  board.illegal.insert(Point(3));
  board.selfatari.insert(Point(4));
  let mut buf = Vec::new();
  let mut rng = XorShift128PlusRng::seed_from_u64(8);
  for _ in 0 .. 20 {
    let point = generate_move_with_filter(&board, Color::Black, true, true, &mut buf, &mut rng);
    assert_eq!(point, Some(Point(5)));
  }

  // With every pattern move filtered, fall back to a random non-eye move.
  board.selfatari.insert(Point(5));
  board.eyes.insert(Point(0));
  for _ in 0 .. 20 {
    let point = generate_move_with_filter(&board, Color::Black, true, true, &mut buf, &mut rng).unwrap();
    assert!(point != Point(0) && point != Point(3));
  }

  // Self-atari checking off lets the pattern move through.
  let point = generate_move_with_filter(&board, Color::Black, true, false, &mut buf, &mut rng).unwrap();
  assert!(point == Point(4) || point == Point(5));
}

#[test]
fn test_select_move_dispatch() {
  let board = MockBoard::new(3);
  let cfg = config(SimulationPolicy::Probabilistic, 10);
  let mut buf = Vec::new();
  let mut rng = XorShift128PlusRng::seed_from_u64(9);
  match select_move::<_, NoFeatures, _>(&board, Color::Black, &cfg, None, &mut buf, &mut rng) {
    Err(PlayoutError::MissingFeatureModel) => {}
    other => panic!("unexpected result: {:?}", other),
  }
  let cfg = config(SimulationPolicy::Random, 10);
  let action = select_move::<_, NoFeatures, _>(&board, Color::Black, &cfg, None, &mut buf, &mut rng).unwrap();
  assert!(!action.is_pass());
}
