use crate::board::{Board, Color, Move, Point};
use crate::pattern::{Pattern3x3, PAT_EMPTY, color_code};

use bit_set::{BitSet};
use std::fmt;
use std::iter::{repeat};

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum IllegalReason {
  OffBoard,
  NotEmpty,
  Ko,
  Suicide,
}

/// A plain N x N Go board: captures, simple ko, suicide is illegal, and the
/// game ends after two consecutive passes.
#[derive(Clone, Debug)]
pub struct FastBoard {
  dim:          i16,
  stones:       Vec<Option<Color>>,
  turn:         Color,
  ko:           Option<(Color, Point)>,
  num_passes:   usize,
  num_plies:    usize,
  num_captures: [usize; 2],
  last_move:    Option<(Color, Move)>,
  last_placed:  Option<(Color, Point)>,
}

impl FastBoard {
  pub const MIN_DIM:  usize = 2;
  pub const MAX_DIM:  usize = 25;

  pub fn new(dim: usize) -> FastBoard {
    assert!(dim >= Self::MIN_DIM && dim <= Self::MAX_DIM, "unsupported board size: {}", dim);
    FastBoard{
      dim:          dim as i16,
      stones:       repeat(None).take(dim * dim).collect(),
      turn:         Color::Black,
      ko:           None,
      num_passes:   0,
      num_plies:    0,
      num_captures: [0, 0],
      last_move:    None,
      last_placed:  None,
    }
  }

  /// Builds a position from rows of `X` (black), `O` (white) and `.` (empty).
  /// The first row is y = 0. Stones are set directly, without captures.
  pub fn from_rows(rows: &[&str], turn: Color) -> FastBoard {
    let dim = rows.len();
    let mut board = FastBoard::new(dim);
    for (y, row) in rows.iter().enumerate() {
      assert_eq!(dim, row.len(), "row {} has the wrong width", y);
      for (x, c) in row.chars().enumerate() {
        let stone = match c {
          'X' | 'x' => Some(Color::Black),
          'O' | 'o' => Some(Color::White),
          _ => None,
        };
        let point = board.point(x, y);
        board.stones[point.idx()] = stone;
      }
    }
    board.turn = turn;
    board
  }

  pub fn reset(&mut self) {
    for p in 0 .. self.stones.len() {
      self.stones[p] = None;
    }
    self.turn = Color::Black;
    self.ko = None;
    self.num_passes = 0;
    self.num_plies = 0;
    self.num_captures = [0, 0];
    self.last_move = None;
    self.last_placed = None;
  }

  #[inline]
  pub fn dim(&self) -> usize {
    self.dim as usize
  }

  #[inline]
  pub fn point(&self, x: usize, y: usize) -> Point {
    Point(x as i16 + y as i16 * self.dim)
  }

  #[inline]
  pub fn coord(&self, point: Point) -> (usize, usize) {
    ((point.0 % self.dim) as usize, (point.0 / self.dim) as usize)
  }

  #[inline]
  pub fn contains(&self, point: Point) -> bool {
    point.0 >= 0 && point.idx() < self.stones.len()
  }

  #[inline]
  pub fn stone(&self, point: Point) -> Option<Color> {
    self.stones[point.idx()]
  }

  pub fn ko(&self) -> Option<(Color, Point)> {
    self.ko
  }

  pub fn last_move(&self) -> Option<(Color, Move)> {
    self.last_move
  }

  pub fn last_placed(&self) -> Option<(Color, Point)> {
    self.last_placed
  }

  pub fn num_plies(&self) -> usize {
    self.num_plies
  }

  pub fn num_captures(&self, color: Color) -> usize {
    self.num_captures[color.offset()]
  }

  pub fn num_stones(&self, color: Color) -> usize {
    self.stones.iter().filter(|&&s| s == Some(color)).count()
  }

  pub fn is_edge(&self, point: Point) -> bool {
    let (x, y) = self.coord(point);
    let upper = self.dim() - 1;
    x == 0 || x == upper || y == 0 || y == upper
  }

  /// Distance to the nearest edge, counting the edge itself as line 1.
  pub fn line(&self, point: Point) -> usize {
    let (x, y) = self.coord(point);
    let upper = self.dim() - 1;
    1 + x.min(y).min(upper - x).min(upper - y)
  }

  pub fn for_each_adjacent<F>(&self, point: Point, mut f: F) where F: FnMut(Point) {
    let (x, y) = (point.0 % self.dim, point.0 / self.dim);
    let upper = self.dim - 1;
    if x >= 1 {
      f(Point(point.0 - 1));
    }
    if y >= 1 {
      f(Point(point.0 - self.dim));
    }
    if x < upper {
      f(Point(point.0 + 1));
    }
    if y < upper {
      f(Point(point.0 + self.dim));
    }
  }

  pub fn for_each_diagonal<F>(&self, point: Point, mut f: F) where F: FnMut(Point) {
    let (x, y) = (point.0 % self.dim, point.0 / self.dim);
    let upper = self.dim - 1;
    if x >= 1 && y >= 1 {
      f(Point(point.0 - 1 - self.dim));
    }
    if x < upper && y >= 1 {
      f(Point(point.0 + 1 - self.dim));
    }
    if x < upper && y < upper {
      f(Point(point.0 + 1 + self.dim));
    }
    if x >= 1 && y < upper {
      f(Point(point.0 - 1 + self.dim));
    }
  }

  pub fn for_each_x8<F>(&self, point: Point, mut f: F) where F: FnMut(u8, Point) {
    let (x, y) = (point.0 % self.dim, point.0 / self.dim);
    let upper = self.dim - 1;
    if x >= 1 && y >= 1 {
      f(0, Point(point.0 - 1 - self.dim));
    }
    if y >= 1 {
      f(1, Point(point.0 - self.dim));
    }
    if x < upper && y >= 1 {
      f(2, Point(point.0 + 1 - self.dim));
    }
    if x >= 1 {
      f(3, Point(point.0 - 1));
    }
    if x < upper {
      f(4, Point(point.0 + 1));
    }
    if x >= 1 && y < upper {
      f(5, Point(point.0 - 1 + self.dim));
    }
    if y < upper {
      f(6, Point(point.0 + self.dim));
    }
    if x < upper && y < upper {
      f(7, Point(point.0 + 1 + self.dim));
    }
  }

  pub fn pattern3x3(&self, point: Point) -> Pattern3x3 {
    let mut pat = Pattern3x3::EDGE;
    self.for_each_x8(point, |i, adj_pt| {
      let code = match self.stones[adj_pt.idx()] {
        None => PAT_EMPTY,
        Some(color) => color_code(color),
      };
      pat = pat.with(i, code);
    });
    pat
  }

  /// Flood fills the chain through `point`, adding its stones to `chain` and
  /// its liberties to `libs`.
  fn fill_chain(&self, point: Point, chain: &mut BitSet, libs: &mut BitSet) {
    let color = self.stones[point.idx()];
    let mut stack = vec![point];
    chain.insert(point.idx());
    while let Some(p) = stack.pop() {
      self.for_each_adjacent(p, |adj_pt| {
        let a = adj_pt.idx();
        match self.stones[a] {
          None => {
            libs.insert(a);
          }
          stone if stone == color => {
            if chain.insert(a) {
              stack.push(adj_pt);
            }
          }
          _ => {}
        }
      });
    }
  }

  pub fn count_chain(&self, point: Point) -> usize {
    if self.stones[point.idx()].is_none() {
      return 0;
    }
    let mut chain = BitSet::with_capacity(self.stones.len());
    let mut libs = BitSet::with_capacity(self.stones.len());
    self.fill_chain(point, &mut chain, &mut libs);
    chain.len()
  }

  pub fn count_libs(&self, point: Point) -> usize {
    if self.stones[point.idx()].is_none() {
      return 0;
    }
    let mut chain = BitSet::with_capacity(self.stones.len());
    let mut libs = BitSet::with_capacity(self.stones.len());
    self.fill_chain(point, &mut chain, &mut libs);
    libs.len()
  }

  fn remove_chain(&mut self, point: Point, captured: &mut Vec<Point>) {
    let mut chain = BitSet::with_capacity(self.stones.len());
    let mut libs = BitSet::with_capacity(self.stones.len());
    self.fill_chain(point, &mut chain, &mut libs);
    for p in chain.iter() {
      self.stones[p] = None;
      captured.push(Point::from_idx(p));
    }
  }

  /// A point is "eyeish" for a color if every orthogonal neighbor is a stone
  /// of that color belonging to a chain with at least 2 liberties.
  pub fn is_eyeish(&self, point: Point, color: Color) -> bool {
    if !self.contains(point) || self.stones[point.idx()].is_some() {
      return false;
    }
    let mut eyeish = true;
    self.for_each_adjacent(point, |adj_pt| {
      if !eyeish {
        return;
      }
      if self.stones[adj_pt.idx()] != Some(color) || self.count_libs(adj_pt) <= 1 {
        eyeish = false;
      }
    });
    eyeish
  }

  /// The "2/4" rule on top of `is_eyeish`: at most one diagonal may belong to
  /// the opponent, and an edge point already counts as having one. Some true
  /// eyes ("two headed dragon") are missed.
  pub fn is_eyelike(&self, point: Point, color: Color) -> bool {
    if !self.is_eyeish(point, color) {
      return false;
    }
    let opp = color.opponent();
    let mut false_count = if self.is_edge(point) { 1 } else { 0 };
    self.for_each_diagonal(point, |diag_pt| {
      if self.stones[diag_pt.idx()] == Some(opp) {
        false_count += 1;
      }
    });
    false_count < 2
  }

  pub fn check_legal(&self, point: Point, color: Color) -> Result<(), IllegalReason> {
    if !self.contains(point) {
      return Err(IllegalReason::OffBoard);
    }
    if self.stones[point.idx()].is_some() {
      return Err(IllegalReason::NotEmpty);
    }
    if self.ko == Some((color, point)) {
      return Err(IllegalReason::Ko);
    }
    // Legal if the new stone ends up with a liberty: an empty neighbor, a
    // friendly chain with a liberty elsewhere, or a capture.
    let mut has_lib = false;
    self.for_each_adjacent(point, |adj_pt| {
      if has_lib {
        return;
      }
      match self.stones[adj_pt.idx()] {
        None => has_lib = true,
        Some(adj_color) => {
          let libs = self.count_libs(adj_pt);
          if adj_color == color && libs >= 2 {
            has_lib = true;
          } else if adj_color != color && libs == 1 {
            has_lib = true;
          }
        }
      }
    });
    if has_lib {
      Ok(())
    } else {
      Err(IllegalReason::Suicide)
    }
  }

  /// Places a stone, removing captured chains. Returns the number of stones
  /// captured.
  pub fn try_place(&mut self, point: Point, color: Color) -> Result<usize, IllegalReason> {
    self.check_legal(point, color)?;
    let opp = color.opponent();
    self.stones[point.idx()] = Some(color);

    let mut adj_points = Vec::with_capacity(4);
    self.for_each_adjacent(point, |adj_pt| adj_points.push(adj_pt));
    let mut captured = Vec::new();
    for &adj_pt in adj_points.iter() {
      if self.stones[adj_pt.idx()] == Some(opp) && self.count_libs(adj_pt) == 0 {
        self.remove_chain(adj_pt, &mut captured);
      }
    }
    self.num_captures[color.offset()] += captured.len();

    // Simple ko: a lone stone that captured a lone stone and has that point as
    // its only liberty.
    self.ko = None;
    if captured.len() == 1 && self.count_chain(point) == 1 && self.count_libs(point) == 1 {
      self.ko = Some((opp, captured[0]));
    }

    self.num_passes = 0;
    self.num_plies += 1;
    self.last_move = Some((color, Move::Place{point: point}));
    self.last_placed = Some((color, point));
    self.turn = opp;
    Ok(captured.len())
  }

  pub fn pass(&mut self, color: Color) {
    self.ko = None;
    self.num_passes += 1;
    self.num_plies += 1;
    self.last_move = Some((color, Move::Pass));
    self.turn = color.opponent();
  }

  /// Number of liberties the chain at `point` would have after `color` plays
  /// there, or `None` if the move is illegal.
  pub fn libs_after_place(&self, point: Point, color: Color) -> Option<usize> {
    let mut next = self.clone();
    match next.try_place(point, color) {
      Ok(_) => Some(next.count_libs(point)),
      Err(_) => None,
    }
  }

  /// Tromp-Taylor area counts: stones plus empty regions that reach only one
  /// color.
  pub fn area_scores(&self) -> [usize; 2] {
    let n = self.stones.len();
    let mut scores = [0, 0];
    let mut visited = BitSet::with_capacity(n);
    for p in 0 .. n {
      match self.stones[p] {
        Some(color) => {
          scores[color.offset()] += 1;
        }
        None => {
          if visited.contains(p) {
            continue;
          }
          let mut region_size = 0;
          let mut reaches = [false, false];
          let mut stack = vec![Point::from_idx(p)];
          visited.insert(p);
          while let Some(pt) = stack.pop() {
            region_size += 1;
            self.for_each_adjacent(pt, |adj_pt| {
              match self.stones[adj_pt.idx()] {
                Some(color) => {
                  reaches[color.offset()] = true;
                }
                None => {
                  if visited.insert(adj_pt.idx()) {
                    stack.push(adj_pt);
                  }
                }
              }
            });
          }
          match (reaches[0], reaches[1]) {
            (true, false) => scores[0] += region_size,
            (false, true) => scores[1] += region_size,
            _ => {}
          }
        }
      }
    }
    scores
  }
}

impl Board for FastBoard {
  fn max_point(&self) -> usize {
    self.stones.len()
  }

  fn current_turn(&self) -> Color {
    self.turn
  }

  fn fill_empty_points(&self, points: &mut Vec<Point>) {
    points.clear();
    for p in 0 .. self.stones.len() {
      if self.stones[p].is_none() {
        points.push(Point::from_idx(p));
      }
    }
  }

  fn is_legal(&self, point: Point, color: Color) -> bool {
    self.check_legal(point, color).is_ok()
  }

  fn is_eye(&self, point: Point, color: Color) -> bool {
    self.is_eyelike(point, color)
  }

  fn is_selfatari(&self, point: Point, color: Color) -> bool {
    self.libs_after_place(point, color) == Some(1)
  }

  fn fill_pattern_moves(&self, color: Color, points: &mut Vec<Point>) {
    points.clear();
    let last_point = match self.last_placed {
      Some((_, point)) => point,
      None => return,
    };
    self.for_each_x8(last_point, |_, adj_pt| {
      if self.stones[adj_pt.idx()].is_some() {
        return;
      }
      let pat = self.pattern3x3(adj_pt);
      if pat.has_stone(color) && pat.has_stone(color.opponent()) {
        points.push(adj_pt);
      }
    });
  }

  fn play(&mut self, action: Move, color: Color) -> bool {
    match action {
      Move::Pass => {
        self.pass(color);
        true
      }
      Move::Place{point} => {
        self.try_place(point, color).is_ok()
      }
    }
  }

  fn is_terminal(&self) -> bool {
    self.num_passes >= 2
  }

  fn score(&self, komi: f32) -> (Color, f32) {
    let scores = self.area_scores();
    let margin = scores[0] as f32 - scores[1] as f32 - komi;
    if margin > 0.0 {
      (Color::Black, margin)
    } else {
      (Color::White, margin)
    }
  }
}

impl fmt::Display for FastBoard {
  fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    for y in 0 .. self.dim() {
      for x in 0 .. self.dim() {
        let c = match self.stones[self.point(x, y).idx()] {
          Some(Color::Black) => 'X',
          Some(Color::White) => 'O',
          None => '.',
        };
        write!(formatter, "{}", c)?;
      }
      writeln!(formatter)?;
    }
    Ok(())
  }
}
