use crate::array_util::{array_argmax, array_max, array_sum};
use crate::board::{Board, Color, Move, Point};
use crate::discrete::{sample_discrete};
use crate::error::{PlayoutError, PlayoutResult};
use crate::features::{FeatureExtractor, FeatureSet, GammaWeights};

use rand::{Rng};
use std::sync::{Arc};

/// Candidate moves paired with their probabilities, in generation order:
/// legal non-eye points first, PASS last. Valid only for the position it was
/// computed from.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct MoveDistribution {
  moves:  Vec<Move>,
  probs:  Vec<f64>,
}

impl MoveDistribution {
  pub fn empty() -> MoveDistribution {
    MoveDistribution::default()
  }

  /// Normalizes raw gammas into probabilities. An empty move list yields an
  /// empty distribution; a non-empty one must have finite, non-negative gammas
  /// with a positive sum.
  pub fn from_gammas(moves: Vec<Move>, mut gammas: Vec<f64>) -> PlayoutResult<MoveDistribution> {
    assert_eq!(moves.len(), gammas.len());
    if moves.is_empty() {
      return Ok(MoveDistribution::empty());
    }
    if let Some(index) = gammas.iter().position(|&g| !(g >= 0.0) || !g.is_finite()) {
      error!("gamma {} for candidate move {:?}", gammas[index], moves[index]);
      return Err(PlayoutError::InvalidGamma{
        index:  index,
        gamma:  gammas[index],
      });
    }
    let gamma_sum = array_sum(&gammas);
    if !(gamma_sum > 0.0) || !gamma_sum.is_finite() {
      error!("gamma sum {} over {} candidate moves", gamma_sum, moves.len());
      return Err(PlayoutError::ZeroGammaSum{
        num_moves:  moves.len(),
        gamma_sum:  gamma_sum,
      });
    }
    for g in gammas.iter_mut() {
      *g /= gamma_sum;
    }
    Ok(MoveDistribution{
      moves:  moves,
      probs:  gammas,
    })
  }

  pub fn len(&self) -> usize {
    self.moves.len()
  }

  pub fn is_empty(&self) -> bool {
    self.moves.is_empty()
  }

  pub fn moves(&self) -> &[Move] {
    &self.moves
  }

  pub fn probs(&self) -> &[f64] {
    &self.probs
  }

  pub fn iter<'a>(&'a self) -> impl Iterator<Item=(Move, f64)> + 'a {
    self.moves.iter().cloned().zip(self.probs.iter().cloned())
  }

  pub fn prob(&self, action: Move) -> Option<f64> {
    self.moves.iter().position(|&m| m == action).map(|j| self.probs[j])
  }

  pub fn max_prob(&self) -> Option<f64> {
    array_max(&self.probs)
  }

  /// Weighted random draw.
  pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Move> {
    sample_discrete(&self.probs, rng).map(|j| self.moves[j])
  }

  /// The most probable move; the earliest one wins ties.
  pub fn argmax(&self) -> Option<Move> {
    array_argmax(&self.probs).map(|j| self.moves[j])
  }
}

/// A feature extractor bound to a shared, read-only gamma table.
#[derive(Debug)]
pub struct FeatureModel<F> {
  extractor:  F,
  weights:    Arc<GammaWeights>,
}

impl<F> FeatureModel<F> {
  pub fn new(extractor: F, weights: Arc<GammaWeights>) -> PlayoutResult<FeatureModel<F>> {
    if weights.is_empty() {
      return Err(PlayoutError::EmptyWeightTable);
    }
    Ok(FeatureModel{
      extractor:  extractor,
      weights:    weights,
    })
  }

  pub fn extractor(&self) -> &F {
    &self.extractor
  }

  pub fn weights(&self) -> &Arc<GammaWeights> {
    &self.weights
  }

  /// Gamma-weighted distribution over the legal non-eye points of `color`
  /// plus PASS.
  pub fn move_distribution<B>(&self, board: &B, color: Color) -> PlayoutResult<MoveDistribution>
  where B: Board + ?Sized, F: FeatureExtractor<B> {
    let mut features = FeatureSet::with_capacity(board.max_point());
    self.extractor.extract_features(board, color, &mut features);

    let mut empty_points: Vec<Point> = Vec::with_capacity(board.max_point());
    board.fill_empty_points(&mut empty_points);

    let mut moves = Vec::with_capacity(empty_points.len() + 1);
    let mut gammas = Vec::with_capacity(empty_points.len() + 1);
    for &point in empty_points.iter() {
      if !board.is_legal(point, color) || board.is_eye(point, color) {
        continue;
      }
      let action = Move::Place{point: point};
      let gamma = match features.get(action) {
        Some(point_features) => self.weights.move_gamma(point_features),
        None => {
          warn!("no features extracted for legal move {:?}", action);
          self.weights.move_gamma(&[])
        }
      };
      moves.push(action);
      gammas.push(gamma);
    }

    let pass_features = features.get(Move::Pass).unwrap_or(&[]);
    moves.push(Move::Pass);
    gammas.push(self.weights.move_gamma(pass_features));

    MoveDistribution::from_gammas(moves, gammas)
  }
}
