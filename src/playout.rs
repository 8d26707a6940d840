use crate::board::{Board, Color, Point};
use crate::config::{PlayoutConfig};
use crate::error::{PlayoutError, PlayoutResult};
use crate::features::{FeatureExtractor, FeatureSet};
use crate::policy::{SimulationPolicy, select_move};
use crate::probs::{FeatureModel};

use rand::{Rng};
use std::sync::{Arc};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PlayoutOutcome {
  pub winner:   Color,
  /// Black's margin after komi, as reported by the board.
  pub margin:   f32,
  pub plies:    usize,
  /// `false` when the ply limit stopped the game first.
  pub terminal: bool,
}

/// Extractor for drivers that never use the probabilistic policy.
#[derive(Clone, Copy, Default, Debug)]
pub struct NoFeatures;

impl<B: ?Sized> FeatureExtractor<B> for NoFeatures {
  fn extract_features(&self, _board: &B, _color: Color, features: &mut FeatureSet) {
    features.clear();
  }
}

/// Runs single playouts with one fixed configuration. The driver holds no
/// board state; each call mutates the board it is given.
pub struct PlayoutDriver<F=NoFeatures> {
  cfg:        PlayoutConfig,
  model:      Option<Arc<FeatureModel<F>>>,
  candidates: Vec<Point>,
}

impl PlayoutDriver<NoFeatures> {
  pub fn new(cfg: PlayoutConfig) -> PlayoutResult<PlayoutDriver<NoFeatures>> {
    PlayoutDriver::from_parts(cfg, None)
  }

  /// Parses playout options (see `PlayoutConfig::from_options`).
  pub fn from_options<K, V>(options: &[(K, V)]) -> PlayoutResult<PlayoutDriver<NoFeatures>> where K: AsRef<str>, V: AsRef<str> {
    PlayoutDriver::new(PlayoutConfig::from_options(options)?)
  }
}

impl<F> PlayoutDriver<F> {
  pub fn with_model(cfg: PlayoutConfig, model: Arc<FeatureModel<F>>) -> PlayoutResult<PlayoutDriver<F>> {
    PlayoutDriver::from_parts(cfg, Some(model))
  }

  pub fn from_parts(cfg: PlayoutConfig, model: Option<Arc<FeatureModel<F>>>) -> PlayoutResult<PlayoutDriver<F>> {
    cfg.validate()?;
    if cfg.simulation_policy == SimulationPolicy::Probabilistic && model.is_none() {
      return Err(PlayoutError::MissingFeatureModel);
    }
    Ok(PlayoutDriver{
      cfg:        cfg,
      model:      model,
      candidates: Vec::new(),
    })
  }

  pub fn config(&self) -> &PlayoutConfig {
    &self.cfg
  }

  /// Plays `board` out from `color` to move and returns the winner under the
  /// configured komi. The board is left in its final simulated state.
  pub fn play_game<B, R>(&mut self, board: &mut B, color: Color, rng: &mut R) -> PlayoutResult<Color>
  where B: Board + ?Sized, F: FeatureExtractor<B>, R: Rng + ?Sized {
    self.run(board, color, rng).map(|outcome| outcome.winner)
  }

  pub fn run<B, R>(&mut self, board: &mut B, color: Color, rng: &mut R) -> PlayoutResult<PlayoutOutcome>
  where B: Board + ?Sized, F: FeatureExtractor<B>, R: Rng + ?Sized {
    let model = self.model.as_ref().map(|model| &**model);
    let mut turn = color;
    let mut plies = 0;
    let mut terminal = false;
    for _ in 0 .. self.cfg.limit {
      let action = match select_move(&*board, turn, &self.cfg, model, &mut self.candidates, rng) {
        Ok(action) => action,
        Err(PlayoutError::EmptyDistribution) => {
          warn!("playout: no candidate moves for {:?} at ply {}, stopping", turn, plies);
          break;
        }
        Err(e) => return Err(e),
      };
      trace!("playout: ply {} {:?} {:?}", plies, turn, action);
      if !board.play(action, turn) {
        error!("playout: policy {} selected illegal move {:?} for {:?}", self.cfg.simulation_policy, action, turn);
        return Err(PlayoutError::IllegalMove{action: action, color: turn});
      }
      plies += 1;
      if board.is_terminal() {
        terminal = true;
        break;
      }
      turn = turn.opponent();
    }
    let (winner, margin) = board.score(self.cfg.komi);
    debug!("playout: plies: {} terminal: {} winner: {:?} margin: {:.1}", plies, terminal, winner, margin);
    Ok(PlayoutOutcome{
      winner:   winner,
      margin:   margin,
      plies:    plies,
      terminal: terminal,
    })
  }
}
