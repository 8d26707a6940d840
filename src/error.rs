use crate::board::{Color, Move};

use std::io;
use thiserror::{Error};

pub type PlayoutResult<T> = Result<T, PlayoutError>;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ErrorKind {
  /// Bad options or input tables; nothing was simulated.
  Configuration,
  /// A collaborator broke its contract; the current playout is aborted.
  InvariantViolation,
  /// No candidate move exists; callers fall back or end the game.
  EmptyDistribution,
  Io,
}

#[derive(Debug, Error)]
pub enum PlayoutError {
  #[error("unrecognized playout option '{0}'")]
  UnknownOption(String),
  #[error("invalid value '{value}' for playout option '{key}'")]
  InvalidOptionValue{key: String, value: String},
  #[error("failed to parse playout config: {0}")]
  ConfigParse(#[from] toml::de::Error),
  #[error("the probabilistic simulation policy requires a feature model")]
  MissingFeatureModel,
  #[error("gamma weight table is empty")]
  EmptyWeightTable,
  #[error("bad gamma weight on line {line}: {reason}")]
  WeightParse{line: usize, reason: String},

  #[error("policy selected illegal move {action:?} for {color:?}")]
  IllegalMove{action: Move, color: Color},
  #[error("gamma of candidate move {index} is negative or not finite: {gamma}")]
  InvalidGamma{index: usize, gamma: f64},
  #[error("gamma sum over {num_moves} candidate moves is not positive: {gamma_sum}")]
  ZeroGammaSum{num_moves: usize, gamma_sum: f64},
  #[error("maximum move probability is not positive: {max_prob}")]
  DegenerateDistribution{max_prob: f64},
  #[error("playout worker failed: {0}")]
  Worker(String),

  #[error("no candidate moves available")]
  EmptyDistribution,

  #[error(transparent)]
  Io(#[from] io::Error),
}

impl PlayoutError {
  pub fn kind(&self) -> ErrorKind {
    match *self {
      PlayoutError::UnknownOption(_) |
      PlayoutError::InvalidOptionValue{..} |
      PlayoutError::ConfigParse(_) |
      PlayoutError::MissingFeatureModel |
      PlayoutError::EmptyWeightTable |
      PlayoutError::WeightParse{..} => ErrorKind::Configuration,
      PlayoutError::IllegalMove{..} |
      PlayoutError::InvalidGamma{..} |
      PlayoutError::ZeroGammaSum{..} |
      PlayoutError::DegenerateDistribution{..} |
      PlayoutError::Worker(_) => ErrorKind::InvariantViolation,
      PlayoutError::EmptyDistribution => ErrorKind::EmptyDistribution,
      PlayoutError::Io(_) => ErrorKind::Io,
    }
  }

  pub fn is_fatal(&self) -> bool {
    self.kind() == ErrorKind::InvariantViolation
  }
}
