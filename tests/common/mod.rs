#![allow(dead_code)]

use mcgo::board::{Board, Color, Move, Point};
use mcgo::features::{FeatureExtractor, FeatureId, FeatureSet};

use std::collections::{HashMap, HashSet};

/// A scripted board: a fixed set of empty points, some of them illegal or
/// eyes. Moves are recorded but never change the candidate set.
#[derive(Clone, Debug)]
pub struct MockBoard {
  pub empty:        Vec<Point>,
  pub illegal:      HashSet<Point>,
  pub eyes:         HashSet<Point>,
  pub selfatari:    HashSet<Point>,
  pub pattern:      Vec<Point>,
  pub reject_all:   bool,
  pub never_ends:   bool,
  pub played:       Vec<(Color, Move)>,
  pub winner:       Color,
}

impl MockBoard {
  pub fn new(num_points: usize) -> MockBoard {
    MockBoard{
      empty:        (0 .. num_points).map(Point::from_idx).collect(),
      illegal:      HashSet::new(),
      eyes:         HashSet::new(),
      selfatari:    HashSet::new(),
      pattern:      Vec::new(),
      reject_all:   false,
      never_ends:   false,
      played:       Vec::new(),
      winner:       Color::White,
    }
  }

  fn consecutive_passes(&self) -> usize {
    self.played.iter().rev().take_while(|&&(_, m)| m.is_pass()).count()
  }
}

impl Board for MockBoard {
  fn max_point(&self) -> usize {
    self.empty.iter().map(|p| p.idx() + 1).max().unwrap_or(0)
  }

  fn current_turn(&self) -> Color {
    match self.played.last() {
      Some(&(color, _)) => color.opponent(),
      None => Color::Black,
    }
  }

  fn fill_empty_points(&self, points: &mut Vec<Point>) {
    points.clear();
    points.extend(self.empty.iter().cloned());
  }

  fn is_legal(&self, point: Point, _color: Color) -> bool {
    !self.illegal.contains(&point)
  }

  fn is_eye(&self, point: Point, _color: Color) -> bool {
    self.eyes.contains(&point)
  }

  fn is_selfatari(&self, point: Point, _color: Color) -> bool {
    self.selfatari.contains(&point)
  }

  fn fill_pattern_moves(&self, _color: Color, points: &mut Vec<Point>) {
    points.clear();
    points.extend(self.pattern.iter().cloned());
  }

  fn play(&mut self, action: Move, color: Color) -> bool {
    if self.reject_all {
      return false;
    }
    self.played.push((color, action));
    true
  }

  fn is_terminal(&self) -> bool {
    !self.never_ends && self.consecutive_passes() >= 2
  }

  fn score(&self, komi: f32) -> (Color, f32) {
    match self.winner {
      Color::Black => (Color::Black, 1.0 - komi),
      Color::White => (Color::White, -komi),
    }
  }
}

/// Hands out fixed feature lists per point.
#[derive(Clone, Default, Debug)]
pub struct MockExtractor {
  pub point_features: HashMap<Point, Vec<FeatureId>>,
  pub pass_features:  Vec<FeatureId>,
}

impl MockExtractor {
  pub fn new() -> MockExtractor {
    MockExtractor::default()
  }

  pub fn with_point(mut self, point: Point, features: &[u32]) -> MockExtractor {
    self.point_features.insert(point, features.iter().map(|&id| FeatureId(id)).collect());
    self
  }

  pub fn with_pass(mut self, features: &[u32]) -> MockExtractor {
    self.pass_features = features.iter().map(|&id| FeatureId(id)).collect();
    self
  }
}

impl FeatureExtractor<MockBoard> for MockExtractor {
  fn extract_features(&self, board: &MockBoard, color: Color, features: &mut FeatureSet) {
    features.clear();
    let mut points = Vec::new();
    board.fill_legal_points(color, &mut points);
    for &point in points.iter() {
      let point_features = self.point_features.get(&point).cloned().unwrap_or_default();
      features.insert(Move::Place{point: point}, point_features);
    }
    features.insert(Move::Pass, self.pass_features.clone());
  }
}
