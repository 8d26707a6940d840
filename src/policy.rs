use crate::board::{Board, Color, Move, Point};
use crate::config::{PlayoutConfig};
use crate::error::{PlayoutError, PlayoutResult};
use crate::features::{FeatureExtractor};
use crate::probs::{FeatureModel};
use crate::random::{choose_without_replace};

use rand::{Rng};
use serde::{Deserialize};
use std::fmt;
use std::str::{FromStr};

#[derive(Clone, Copy, Eq, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationPolicy {
  Random,
  RuleBased,
  Probabilistic,
}

impl FromStr for SimulationPolicy {
  type Err = PlayoutError;

  fn from_str(s: &str) -> PlayoutResult<SimulationPolicy> {
    match s {
      "random"        => Ok(SimulationPolicy::Random),
      "rulebased"     => Ok(SimulationPolicy::RuleBased),
      "probabilistic" => Ok(SimulationPolicy::Probabilistic),
      _ => Err(PlayoutError::InvalidOptionValue{
        key:    "simulation_policy".to_owned(),
        value:  s.to_owned(),
      }),
    }
  }
}

impl fmt::Display for SimulationPolicy {
  fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    formatter.write_str(match *self {
      SimulationPolicy::Random        => "random",
      SimulationPolicy::RuleBased     => "rulebased",
      SimulationPolicy::Probabilistic => "probabilistic",
    })
  }
}

/// Uniformly random legal point, skipping own eyes when `use_eye_filter` is
/// set. `None` means the side to move should pass.
pub fn generate_random_move<B, R>(board: &B, color: Color, use_eye_filter: bool, candidates: &mut Vec<Point>, rng: &mut R) -> Option<Point>
where B: Board + ?Sized, R: Rng + ?Sized {
  board.fill_empty_points(candidates);
  while let Some(point) = choose_without_replace(candidates, rng) {
    if use_eye_filter && board.is_eye(point, color) {
      continue;
    }
    if board.is_legal(point, color) {
      return Some(point);
    }
  }
  None
}

/// Whether a candidate should be rejected: illegal, filling an own eye, or
/// (optionally) a self-atari.
pub fn is_filtered<B>(board: &B, point: Point, color: Color, check_selfatari: bool) -> bool
where B: Board + ?Sized {
  if !board.is_legal(point, color) || board.is_eye(point, color) {
    return true;
  }
  check_selfatari && board.is_selfatari(point, color)
}

/// Draws from `candidates` without replacement until one passes the filter.
pub fn filter_moves_and_generate<B, R>(board: &B, color: Color, candidates: &mut Vec<Point>, check_selfatari: bool, rng: &mut R) -> Option<Point>
where B: Board + ?Sized, R: Rng + ?Sized {
  while let Some(point) = choose_without_replace(candidates, rng) {
    if !is_filtered(board, point, color, check_selfatari) {
      return Some(point);
    }
  }
  None
}

/// Pattern moves around the previous move first, then a random non-eye move.
pub fn generate_move_with_filter<B, R>(board: &B, color: Color, use_pattern: bool, check_selfatari: bool, candidates: &mut Vec<Point>, rng: &mut R) -> Option<Point>
where B: Board + ?Sized, R: Rng + ?Sized {
  if use_pattern {
    board.fill_pattern_moves(color, candidates);
    if let Some(point) = filter_moves_and_generate(board, color, candidates, check_selfatari, rng) {
      return Some(point);
    }
  }
  generate_random_move(board, color, true, candidates, rng)
}

pub fn generate_move_with_feature_based_probs<B, F, R>(board: &B, color: Color, model: &FeatureModel<F>, rng: &mut R) -> PlayoutResult<Move>
where B: Board + ?Sized, F: FeatureExtractor<B>, R: Rng + ?Sized {
  let dist = model.move_distribution(board, color)?;
  match dist.sample(rng) {
    Some(action) => Ok(action),
    None => Err(PlayoutError::EmptyDistribution),
  }
}

/// Greedy variant: the most probable move.
pub fn generate_move_with_feature_based_probs_max<B, F>(board: &B, color: Color, model: &FeatureModel<F>) -> PlayoutResult<Move>
where B: Board + ?Sized, F: FeatureExtractor<B> {
  let dist = model.move_distribution(board, color)?;
  match dist.argmax() {
    Some(action) => Ok(action),
    None => Err(PlayoutError::EmptyDistribution),
  }
}

/// Picks the next move for `color` according to `cfg.simulation_policy`.
pub fn select_move<B, F, R>(board: &B, color: Color, cfg: &PlayoutConfig, model: Option<&FeatureModel<F>>, candidates: &mut Vec<Point>, rng: &mut R) -> PlayoutResult<Move>
where B: Board + ?Sized, F: FeatureExtractor<B>, R: Rng + ?Sized {
  let point = match cfg.simulation_policy {
    SimulationPolicy::Random => {
      generate_random_move(board, color, true, candidates, rng)
    }
    SimulationPolicy::RuleBased => {
      generate_move_with_filter(board, color, cfg.use_pattern, cfg.check_selfatari, candidates, rng)
    }
    SimulationPolicy::Probabilistic => {
      let model = match model {
        Some(model) => model,
        None => return Err(PlayoutError::MissingFeatureModel),
      };
      return generate_move_with_feature_based_probs(board, color, model, rng);
    }
  };
  Ok(match point {
    Some(point) => Move::Place{point: point},
    None => Move::Pass,
  })
}
