use crate::board::{Board, Color, Move, Point};
use crate::error::{PlayoutError, PlayoutResult};
use crate::fastboard::{FastBoard};

use std::fs::{File};
use std::io::{Read};
use std::path::{Path};
use std::str::{FromStr};
use vec_map::{VecMap};

#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct FeatureId(pub u32);

impl FeatureId {
  pub const PASS_NEW:         FeatureId = FeatureId(0);
  pub const PASS_CONSECUTIVE: FeatureId = FeatureId(1);
  pub const CAPTURE:          FeatureId = FeatureId(10);
  pub const ATARI:            FeatureId = FeatureId(11);
  pub const SELFATARI:        FeatureId = FeatureId(12);

  pub const LINE_BASE:        u32 = 20;
  pub const MAX_LINE:         usize = 4;
  pub const DIST_PREV_BASE:   u32 = 30;
  pub const MAX_DIST_PREV:    usize = 17;
  pub const PATTERN_BASE:     u32 = 1000;

  /// Distance to the edge; lines past `MAX_LINE` have no feature.
  pub fn line(line: usize) -> Option<FeatureId> {
    if line >= 1 && line <= Self::MAX_LINE {
      Some(FeatureId(Self::LINE_BASE + line as u32))
    } else {
      None
    }
  }

  pub fn dist_prev(dist: usize) -> FeatureId {
    FeatureId(Self::DIST_PREV_BASE + dist.min(Self::MAX_DIST_PREV) as u32)
  }

  pub fn pattern(pattern_idx: u32) -> FeatureId {
    FeatureId(Self::PATTERN_BASE + pattern_idx)
  }

  #[inline]
  pub fn idx(self) -> usize {
    self.0 as usize
  }
}

/// Active features for each candidate move of one position. PASS has its own
/// slot.
#[derive(Clone, Default, Debug)]
pub struct FeatureSet {
  points: VecMap<Vec<FeatureId>>,
  pass:   Vec<FeatureId>,
}

impl FeatureSet {
  pub fn new() -> FeatureSet {
    FeatureSet::default()
  }

  pub fn with_capacity(max_point: usize) -> FeatureSet {
    FeatureSet{
      points: VecMap::with_capacity(max_point),
      pass:   Vec::new(),
    }
  }

  pub fn clear(&mut self) {
    self.points.clear();
    self.pass.clear();
  }

  pub fn insert(&mut self, action: Move, features: Vec<FeatureId>) {
    match action {
      Move::Place{point} => {
        self.points.insert(point.idx(), features);
      }
      Move::Pass => {
        self.pass = features;
      }
    }
  }

  /// Always returns a slice for PASS, possibly empty.
  pub fn get(&self, action: Move) -> Option<&[FeatureId]> {
    match action {
      Move::Place{point} => self.points.get(point.idx()).map(|fs| fs.as_slice()),
      Move::Pass => Some(self.pass.as_slice()),
    }
  }

  pub fn contains(&self, action: Move) -> bool {
    match action {
      Move::Place{point} => self.points.contains_key(point.idx()),
      Move::Pass => true,
    }
  }

  pub fn num_points(&self) -> usize {
    self.points.len()
  }
}

pub trait FeatureExtractor<B: ?Sized> {
  /// Fills `features` for every legal point of `color` plus PASS.
  fn extract_features(&self, board: &B, color: Color, features: &mut FeatureSet);
}

/// Feature weights of a Bradley-Terry move model.
#[derive(Clone, Default, Debug)]
pub struct GammaWeights {
  weights:  VecMap<f64>,
}

impl GammaWeights {
  pub fn new() -> GammaWeights {
    GammaWeights::default()
  }

  pub fn from_pairs<I>(pairs: I) -> PlayoutResult<GammaWeights> where I: IntoIterator<Item=(FeatureId, f64)> {
    let mut table = GammaWeights::new();
    for (line, (id, gamma)) in pairs.into_iter().enumerate() {
      if !(gamma >= 0.0) || !gamma.is_finite() {
        return Err(PlayoutError::WeightParse{
          line:   line + 1,
          reason: format!("feature {} has invalid gamma {}", id.0, gamma),
        });
      }
      table.weights.insert(id.idx(), gamma);
    }
    Ok(table)
  }

  /// Parses one `<feature id> <gamma>` pair per line. Blank lines and text
  /// after `#` are ignored.
  pub fn parse(text: &str) -> PlayoutResult<GammaWeights> {
    let mut pairs = Vec::new();
    for (i, raw_line) in text.lines().enumerate() {
      let line = match raw_line.find('#') {
        Some(pos) => &raw_line[.. pos],
        None => raw_line,
      };
      let mut toks = line.split_whitespace();
      let (id_tok, gamma_tok) = match (toks.next(), toks.next(), toks.next()) {
        (None, _, _) => continue,
        (Some(id_tok), Some(gamma_tok), None) => (id_tok, gamma_tok),
        _ => {
          return Err(PlayoutError::WeightParse{
            line:   i + 1,
            reason: format!("expected '<id> <gamma>', got '{}'", raw_line.trim()),
          });
        }
      };
      let id: u32 = id_tok.parse().map_err(|_| PlayoutError::WeightParse{
        line:   i + 1,
        reason: format!("bad feature id '{}'", id_tok),
      })?;
      let gamma: f64 = gamma_tok.parse().map_err(|_| PlayoutError::WeightParse{
        line:   i + 1,
        reason: format!("bad gamma '{}'", gamma_tok),
      })?;
      if !(gamma >= 0.0) || !gamma.is_finite() {
        return Err(PlayoutError::WeightParse{
          line:   i + 1,
          reason: format!("gamma must be finite and non-negative, got {}", gamma),
        });
      }
      pairs.push((FeatureId(id), gamma));
    }
    let table = GammaWeights::from_pairs(pairs)?;
    debug!("parsed gamma table: {} features", table.len());
    Ok(table)
  }

  pub fn load<P: AsRef<Path>>(path: P) -> PlayoutResult<GammaWeights> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    info!("loading gamma table from {}", path.display());
    GammaWeights::parse(&text)
  }

  pub fn get(&self, id: FeatureId) -> Option<f64> {
    self.weights.get(id.idx()).cloned()
  }

  pub fn len(&self) -> usize {
    self.weights.len()
  }

  pub fn is_empty(&self) -> bool {
    self.weights.is_empty()
  }

  /// Product of the weights of the active features. Features missing from the
  /// table contribute a factor of 1.
  pub fn move_gamma(&self, features: &[FeatureId]) -> f64 {
    let mut gamma = 1.0;
    for &id in features.iter() {
      if let Some(w) = self.weights.get(id.idx()) {
        gamma *= *w;
      }
    }
    gamma
  }
}

impl FromStr for GammaWeights {
  type Err = PlayoutError;

  fn from_str(s: &str) -> PlayoutResult<GammaWeights> {
    GammaWeights::parse(s)
  }
}

/// Local shape and tactical features on a `FastBoard`.
#[derive(Clone, Copy, Default, Debug)]
pub struct PatternFeatureExtractor;

impl PatternFeatureExtractor {
  // dx + dy + max(dx, dy), as in Coulom's move distance.
  fn distance(board: &FastBoard, p: Point, q: Point) -> usize {
    let (px, py) = board.coord(p);
    let (qx, qy) = board.coord(q);
    let dx = if px > qx { px - qx } else { qx - px };
    let dy = if py > qy { py - qy } else { qy - py };
    dx + dy + dx.max(dy)
  }

  fn point_features(board: &FastBoard, point: Point, color: Color, features: &mut Vec<FeatureId>) {
    let opp = color.opponent();
    let mut next = board.clone();
    let num_captured = match next.try_place(point, color) {
      Ok(n) => n,
      Err(_) => return,
    };
    if num_captured > 0 {
      features.push(FeatureId::CAPTURE);
    }
    if next.count_libs(point) == 1 {
      features.push(FeatureId::SELFATARI);
    }
    let mut atari = false;
    next.for_each_adjacent(point, |adj_pt| {
      if next.stone(adj_pt) == Some(opp) && next.count_libs(adj_pt) == 1 {
        atari = true;
      }
    });
    if atari {
      features.push(FeatureId::ATARI);
    }
    if let Some(id) = FeatureId::line(board.line(point)) {
      features.push(id);
    }
    if let Some((prev_color, Move::Place{point: prev_point})) = board.last_move() {
      if prev_color == opp {
        features.push(FeatureId::dist_prev(Self::distance(board, point, prev_point)));
      }
    }
    let pat = board.pattern3x3(point).relative_to(color).to_invariant();
    features.push(FeatureId::pattern(pat.idx()));
  }
}

impl FeatureExtractor<FastBoard> for PatternFeatureExtractor {
  fn extract_features(&self, board: &FastBoard, color: Color, features: &mut FeatureSet) {
    features.clear();
    let mut points = Vec::with_capacity(board.max_point());
    board.fill_legal_points(color, &mut points);
    for &point in points.iter() {
      let mut point_features = Vec::with_capacity(6);
      Self::point_features(board, point, color, &mut point_features);
      features.insert(Move::Place{point: point}, point_features);
    }
    let pass_feature = match board.last_move() {
      Some((_, Move::Pass)) => FeatureId::PASS_CONSECUTIVE,
      _ => FeatureId::PASS_NEW,
    };
    features.insert(Move::Pass, vec![pass_feature]);
  }
}
