extern crate mcgo;

use mcgo::board::{Board, Color, Move};
use mcgo::error::{ErrorKind, PlayoutError};
use mcgo::fastboard::{FastBoard};
use mcgo::features::{FeatureExtractor, FeatureId, FeatureSet, GammaWeights, PatternFeatureExtractor};
use mcgo::pattern::{Pattern3x3, PAT_BLACK, PAT_EMPTY, PAT_WHITE};

#[test]
fn test_parse_gamma_table() {
  let text = "\
# id gamma
0 0.25
10 4.0   # capture

1000 1.5
";
  let table: GammaWeights = text.parse().unwrap();
  assert_eq!(table.len(), 3);
  assert_eq!(table.get(FeatureId::PASS_NEW), Some(0.25));
  assert_eq!(table.get(FeatureId::CAPTURE), Some(4.0));
  assert_eq!(table.get(FeatureId::pattern(0)), Some(1.5));
  assert_eq!(table.get(FeatureId::ATARI), None);
}

#[test]
fn test_parse_errors_report_line() {
  match GammaWeights::parse("0 1.0\n1 abc\n") {
    Err(e @ PlayoutError::WeightParse{line: 2, ..}) => {
      assert_eq!(e.kind(), ErrorKind::Configuration);
    }
    other => panic!("unexpected result: {:?}", other),
  }
  match GammaWeights::parse("0 1.0 2.0\n") {
    Err(PlayoutError::WeightParse{line: 1, ..}) => {}
    other => panic!("unexpected result: {:?}", other),
  }
  match GammaWeights::parse("\n\n3 -1.0\n") {
    Err(PlayoutError::WeightParse{line: 3, ..}) => {}
    other => panic!("unexpected result: {:?}", other),
  }
}

#[test]
fn test_move_gamma_is_product_of_known_weights() {
  let table = GammaWeights::from_pairs(vec![
    (FeatureId::CAPTURE, 4.0),
    (FeatureId::ATARI, 0.5),
  ]).unwrap();
  assert_eq!(table.move_gamma(&[]), 1.0);
  assert_eq!(table.move_gamma(&[FeatureId::CAPTURE]), 4.0);
  assert_eq!(table.move_gamma(&[FeatureId::CAPTURE, FeatureId::ATARI]), 2.0);
  assert_eq!(table.move_gamma(&[FeatureId::CAPTURE, FeatureId(999)]), 4.0);
}

#[test]
fn test_feature_id_ranges() {
  assert_eq!(FeatureId::line(0), None);
  assert_eq!(FeatureId::line(5), None);
  assert!(FeatureId::line(4).is_some());
  assert_eq!(FeatureId::dist_prev(40), FeatureId::dist_prev(FeatureId::MAX_DIST_PREV));
  assert!(FeatureId::dist_prev(2) != FeatureId::dist_prev(3));
}

#[test]
fn test_pass_features() {
  let mut board = FastBoard::new(5);
  let mut features = FeatureSet::new();
  PatternFeatureExtractor.extract_features(&board, Color::Black, &mut features);
  assert_eq!(features.get(Move::Pass), Some(&[FeatureId::PASS_NEW][..]));
  assert_eq!(features.num_points(), 25);

  assert!(board.play(Move::Pass, Color::Black));
  PatternFeatureExtractor.extract_features(&board, Color::White, &mut features);
  assert_eq!(features.get(Move::Pass), Some(&[FeatureId::PASS_CONSECUTIVE][..]));
}

#[test]
fn test_tactical_features() {
  let mut board = FastBoard::from_rows(&[
    ".X...",
    "XO...",
    ".X...",
    ".....",
    ".....",
  ], Color::White);
  assert!(board.play(Move::Place{point: board.point(4, 4)}, Color::White));
  let mut features = FeatureSet::new();
  PatternFeatureExtractor.extract_features(&board, Color::Black, &mut features);

  let capture = features.get(Move::Place{point: board.point(2, 1)}).unwrap();
  assert!(capture.contains(&FeatureId::CAPTURE));
  assert!(capture.contains(&FeatureId::line(2).unwrap()));
  assert!(capture.contains(&FeatureId::dist_prev(8)));

  let corner = features.get(Move::Place{point: board.point(0, 0)}).unwrap();
  assert!(corner.contains(&FeatureId::line(1).unwrap()));
  assert!(!corner.contains(&FeatureId::CAPTURE));

  // Occupied points get no entry.
  assert!(!features.contains(Move::Place{point: board.point(1, 1)}));
}

#[test]
fn test_atari_and_selfatari_features() {
  let board = FastBoard::from_rows(&[
    ".....",
    ".O...",
    ".....",
    ".....",
    ".....",
  ], Color::Black);
  let mut features = FeatureSet::new();
  PatternFeatureExtractor.extract_features(&board, Color::Black, &mut features);
  let next_to = features.get(Move::Place{point: board.point(1, 0)}).unwrap();
  assert!(!next_to.contains(&FeatureId::ATARI));

  let board = FastBoard::from_rows(&[
    "XO...",
    ".....",
    ".....",
    ".....",
    ".....",
  ], Color::Black);
  PatternFeatureExtractor.extract_features(&board, Color::Black, &mut features);
  let atari = features.get(Move::Place{point: board.point(2, 0)}).unwrap();
  assert!(atari.contains(&FeatureId::ATARI));
  PatternFeatureExtractor.extract_features(&board, Color::White, &mut features);
  let capture = features.get(Move::Place{point: board.point(0, 1)}).unwrap();
  assert!(capture.contains(&FeatureId::CAPTURE));
  assert!(!capture.contains(&FeatureId::SELFATARI));

  let board = FastBoard::from_rows(&[
    ".X...",
    ".....",
    ".....",
    ".....",
    ".....",
  ], Color::White);
  PatternFeatureExtractor.extract_features(&board, Color::White, &mut features);
  let selfatari = features.get(Move::Place{point: board.point(0, 0)}).unwrap();
  assert!(selfatari.contains(&FeatureId::SELFATARI));
}

#[test]
fn test_pattern_invariance() {
  let corner = Pattern3x3(0).with(0, PAT_BLACK);
  let opposite_corner = Pattern3x3(0).with(7, PAT_BLACK);
  let side = Pattern3x3(0).with(1, PAT_BLACK);
  assert_eq!(corner.to_invariant(), opposite_corner.to_invariant());
  assert!(corner.to_invariant() != side.to_invariant());

  let white_corner = Pattern3x3(0).with(2, PAT_WHITE);
  assert_eq!(white_corner.relative_to(Color::White).to_invariant(), corner.to_invariant());
  assert_eq!(corner.get(0), PAT_BLACK);
  assert_eq!(corner.get(1), PAT_EMPTY);
  assert!(corner.has_stone(Color::Black));
  assert!(!corner.has_stone(Color::White));
}

#[test]
fn test_edge_pattern() {
  let board = FastBoard::new(5);
  let pat = board.pattern3x3(board.point(0, 0));
  assert_eq!(pat.count(PAT_EMPTY), 3);
  assert_eq!(board.max_point(), 25);
}
