use std::fmt;

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Color {
  Black = 0,
  White = 1,
}

impl Color {
  #[inline]
  pub fn offset(self) -> usize {
    match self {
      Color::Black => 0,
      Color::White => 1,
    }
  }

  #[inline]
  pub fn opponent(self) -> Color {
    match self {
      Color::Black => Color::White,
      Color::White => Color::Black,
    }
  }
}

#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Point(pub i16);

impl Point {
  #[inline]
  pub fn from_idx(idx: usize) -> Point {
    Point(idx as i16)
  }

  #[inline]
  pub fn idx(self) -> usize {
    self.0 as usize
  }
}

/// A move is either a stone placed on a board point or a pass. There is no
/// sentinel point for passing.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub enum Move {
  Place{point: Point},
  Pass,
}

impl Move {
  #[inline]
  pub fn point(self) -> Option<Point> {
    match self {
      Move::Place{point} => Some(point),
      Move::Pass => None,
    }
  }

  #[inline]
  pub fn is_pass(self) -> bool {
    match self {
      Move::Pass => true,
      _ => false,
    }
  }
}

impl From<Point> for Move {
  fn from(point: Point) -> Move {
    Move::Place{point: point}
  }
}

impl fmt::Debug for Move {
  fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      Move::Place{point} => write!(formatter, "Place({})", point.0),
      Move::Pass => formatter.write_str("Pass"),
    }
  }
}

/// The game state a playout runs on. Implementations own the rules (legality,
/// captures, eyes, scoring); the playout layer only asks questions and applies
/// moves.
pub trait Board {
  /// Upper bound (exclusive) on `Point::idx()` for this board.
  fn max_point(&self) -> usize;

  fn current_turn(&self) -> Color;

  // The `fill_*` methods clear the buffer before filling it.

  fn fill_empty_points(&self, points: &mut Vec<Point>);

  fn is_legal(&self, point: Point, color: Color) -> bool;

  fn is_eye(&self, point: Point, color: Color) -> bool;

  /// Whether placing at `point` leaves the placed chain with one liberty.
  fn is_selfatari(&self, point: Point, color: Color) -> bool;

  /// Candidate moves suggested by local shape around the previous move.
  fn fill_pattern_moves(&self, color: Color, points: &mut Vec<Point>);

  /// Applies the move. Returns `false` and leaves the board untouched when the
  /// move is illegal.
  fn play(&mut self, action: Move, color: Color) -> bool;

  fn is_terminal(&self) -> bool;

  /// Declared winner and the margin in black's favor after komi.
  fn score(&self, komi: f32) -> (Color, f32);

  fn fill_legal_points(&self, color: Color, points: &mut Vec<Point>) {
    self.fill_empty_points(points);
    points.retain(|&point| self.is_legal(point, color));
  }
}
