use crate::board::{Color};

use std::cmp::{min};

// Neighbor slots, in the order of `FastBoard::for_each_x8`:
//   0 1 2
//   3 . 4
//   5 6 7
// Each row maps slot i to its image under one of the 8 board symmetries.
static MASK_8_TRANS_MAPS: [[u8; 8]; 8] = [
  [0, 1, 2, 3, 4, 5, 6, 7],
  [2, 1, 0, 4, 3, 7, 6, 5],
  [5, 6, 7, 3, 4, 0, 1, 2],
  [7, 6, 5, 4, 3, 2, 1, 0],
  [0, 3, 5, 1, 6, 2, 4, 7],
  [2, 4, 7, 1, 6, 0, 3, 5],
  [5, 3, 0, 6, 1, 7, 4, 2],
  [7, 4, 2, 6, 1, 5, 3, 0],
];

pub const PAT_EMPTY:  u16 = 0x0;
pub const PAT_BLACK:  u16 = 0x1;
pub const PAT_WHITE:  u16 = 0x2;
pub const PAT_EDGE:   u16 = 0x3;

/// The 3x3 neighborhood of a point, two bits per neighbor.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Pattern3x3(pub u16);

impl Pattern3x3 {
  /// All neighbors off the board.
  pub const EDGE: Pattern3x3 = Pattern3x3(0xffff);

  #[inline]
  pub fn get(self, i: u8) -> u16 {
    (self.0 >> (2 * i)) & 0x3
  }

  #[inline]
  pub fn with(self, i: u8, code: u16) -> Pattern3x3 {
    let cleared = self.0 & !(0x3_u16 << (2 * i));
    Pattern3x3(cleared | ((code & 0x3) << (2 * i)))
  }

  pub fn count(self, code: u16) -> usize {
    (0 .. 8).filter(|&i| self.get(i) == code).count()
  }

  pub fn has_stone(self, color: Color) -> bool {
    self.count(color_code(color)) > 0
  }

  /// Swaps black and white when `color` is white, so that the side to move is
  /// always encoded as black.
  pub fn relative_to(self, color: Color) -> Pattern3x3 {
    match color {
      Color::Black => self,
      Color::White => {
        let mut pat = self;
        for i in 0 .. 8 {
          match self.get(i) {
            PAT_BLACK => pat = pat.with(i, PAT_WHITE),
            PAT_WHITE => pat = pat.with(i, PAT_BLACK),
            _ => {}
          }
        }
        pat
      }
    }
  }

  pub fn to_invariant(self) -> InvariantPattern3x3 {
    let mut min_mask8 = u16::max_value();
    for t in 0 .. 8 {
      let mut mask8: u16 = 0;
      for i in 0 .. 8 {
        let x = self.get(i as u8);
        let t_i = MASK_8_TRANS_MAPS[t][i];
        mask8 |= x << (2 * t_i);
      }
      min_mask8 = min(min_mask8, mask8);
    }
    InvariantPattern3x3(min_mask8)
  }
}

/// Canonical representative of a pattern's symmetry class.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct InvariantPattern3x3(u16);

impl InvariantPattern3x3 {
  pub fn idx(self) -> u32 {
    self.0 as u32
  }
}

#[inline]
pub fn color_code(color: Color) -> u16 {
  match color {
    Color::Black => PAT_BLACK,
    Color::White => PAT_WHITE,
  }
}
