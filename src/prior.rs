use crate::board::{Board, Color, Move};
use crate::error::{PlayoutError, PlayoutResult};
use crate::features::{FeatureExtractor};
use crate::probs::{FeatureModel, MoveDistribution};

use std::sync::{Arc};

/// Pseudo-simulations credited to the most probable move.
pub const PRIOR_SIMULATIONS: f64 = 10.0;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PriorKnowledge {
  pub action:       Move,
  pub wins:         u32,
  pub simulations:  f64,
  pub winrate:      f64,
}

impl PriorKnowledge {
  /// Entries with no pseudo-simulations carry no evidence either way.
  pub fn is_informative(&self) -> bool {
    self.simulations > 0.0
  }
}

/// One entry per move of `dist`, in the same order. Relative strength
/// r = p / max_p gives r * 10 simulations at winrate r / 2 + 0.5.
pub fn prior_knowledge_initialization(dist: &MoveDistribution) -> PlayoutResult<Vec<PriorKnowledge>> {
  let max_prob = match dist.max_prob() {
    Some(max_prob) => max_prob,
    None => return Ok(Vec::new()),
  };
  if !(max_prob > 0.0) {
    error!("prior: distribution over {} moves has max probability {}", dist.len(), max_prob);
    return Err(PlayoutError::DegenerateDistribution{max_prob: max_prob});
  }
  let mut priors = Vec::with_capacity(dist.len());
  for (action, prob) in dist.iter() {
    let strength = prob / max_prob;
    let simulations = PRIOR_SIMULATIONS * strength;
    let winrate = strength / 2.0 + 0.5;
    // Half-way cases round to even.
    let wins = (winrate * simulations).round_ties_even() as u32;
    priors.push(PriorKnowledge{
      action:       action,
      wins:         wins,
      simulations:  simulations,
      winrate:      winrate,
    });
  }
  Ok(priors)
}

pub trait PriorPolicy<B: ?Sized> {
  fn fill_prior_knowledge(&self, board: &B, color: Color, priors: &mut Vec<PriorKnowledge>) -> PlayoutResult<()>;
}

/// Seeds priors from a gamma-weighted feature model.
pub struct FeaturePriorPolicy<F> {
  model:  Arc<FeatureModel<F>>,
}

impl<F> FeaturePriorPolicy<F> {
  pub fn new(model: Arc<FeatureModel<F>>) -> FeaturePriorPolicy<F> {
    FeaturePriorPolicy{model: model}
  }
}

impl<B, F> PriorPolicy<B> for FeaturePriorPolicy<F> where B: Board + ?Sized, F: FeatureExtractor<B> {
  fn fill_prior_knowledge(&self, board: &B, color: Color, priors: &mut Vec<PriorKnowledge>) -> PlayoutResult<()> {
    priors.clear();
    let dist = self.model.move_distribution(board, color)?;
    let entries = prior_knowledge_initialization(&dist)?;
    trace!("prior: {} entries for {:?}", entries.len(), color);
    priors.extend(entries);
    Ok(())
  }
}
