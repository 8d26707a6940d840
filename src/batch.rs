use crate::board::{Board, Color};
use crate::config::{PlayoutConfig};
use crate::error::{PlayoutError, PlayoutResult};
use crate::features::{FeatureExtractor};
use crate::playout::{NoFeatures, PlayoutDriver, PlayoutOutcome};
use crate::probs::{FeatureModel};
use crate::random::{XorShift128PlusRng};

use rand::{Rng, SeedableRng, thread_rng};
use std::sync::{Arc};
use std::sync::mpsc::{Sender, channel};
use threadpool::{ThreadPool};

/// Aggregated results of many playouts from one position.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct BatchStats {
  pub num_playouts:   usize,
  pub wins:           [usize; 2],
  pub num_terminal:   usize,
  pub num_truncated:  usize,
  pub total_plies:    usize,
}

impl BatchStats {
  pub fn record(&mut self, outcome: &PlayoutOutcome) {
    self.num_playouts += 1;
    self.wins[outcome.winner.offset()] += 1;
    if outcome.terminal {
      self.num_terminal += 1;
    } else {
      self.num_truncated += 1;
    }
    self.total_plies += outcome.plies;
  }

  pub fn merge(&mut self, other: &BatchStats) {
    self.num_playouts += other.num_playouts;
    self.wins[0] += other.wins[0];
    self.wins[1] += other.wins[1];
    self.num_terminal += other.num_terminal;
    self.num_truncated += other.num_truncated;
    self.total_plies += other.total_plies;
  }

  pub fn win_rate(&self, color: Color) -> f64 {
    if self.num_playouts == 0 {
      return 0.0;
    }
    self.wins[color.offset()] as f64 / self.num_playouts as f64
  }

  pub fn mean_plies(&self) -> f64 {
    if self.num_playouts == 0 {
      return 0.0;
    }
    self.total_plies as f64 / self.num_playouts as f64
  }
}

/// Runs independent playouts on a fixed pool of worker threads. Every playout
/// gets its own copy of the starting board; workers share only the read-only
/// feature model.
pub struct PlayoutBatch<F=NoFeatures> {
  num_workers:  usize,
  pool:         ThreadPool,
  cfg:          PlayoutConfig,
  model:        Option<Arc<FeatureModel<F>>>,
}

impl PlayoutBatch<NoFeatures> {
  pub fn new(num_workers: usize, cfg: PlayoutConfig) -> PlayoutResult<PlayoutBatch<NoFeatures>> {
    PlayoutBatch::from_parts(num_workers, cfg, None)
  }
}

impl<F> PlayoutBatch<F> where F: 'static + Send + Sync {
  pub fn with_model(num_workers: usize, cfg: PlayoutConfig, model: Arc<FeatureModel<F>>) -> PlayoutResult<PlayoutBatch<F>> {
    PlayoutBatch::from_parts(num_workers, cfg, Some(model))
  }

  fn from_parts(num_workers: usize, cfg: PlayoutConfig, model: Option<Arc<FeatureModel<F>>>) -> PlayoutResult<PlayoutBatch<F>> {
    if num_workers == 0 {
      return Err(PlayoutError::InvalidOptionValue{
        key:    "num_workers".to_owned(),
        value:  num_workers.to_string(),
      });
    }
    // Fail on a bad config here rather than once per worker.
    PlayoutDriver::from_parts(cfg.clone(), model.clone())?;
    Ok(PlayoutBatch{
      num_workers:  num_workers,
      pool:         ThreadPool::new(num_workers),
      cfg:          cfg,
      model:        model,
    })
  }

  pub fn num_workers(&self) -> usize {
    self.num_workers
  }

  pub fn config(&self) -> &PlayoutConfig {
    &self.cfg
  }

  /// Plays `num_playouts` games from `board` with `color` to move. The first
  /// failed playout aborts the batch.
  pub fn run<B>(&self, board: &B, color: Color, num_playouts: usize) -> PlayoutResult<BatchStats>
  where B: 'static + Board + Clone + Send, F: FeatureExtractor<B> {
    let base_seed: u64 = thread_rng().gen();
    self.run_seeded(board, color, num_playouts, base_seed)
  }

  /// Like `run`, but worker seeds are derived from `base_seed`, so the same
  /// seed and worker count reproduce the same stats.
  pub fn run_seeded<B>(&self, board: &B, color: Color, num_playouts: usize, base_seed: u64) -> PlayoutResult<BatchStats>
  where B: 'static + Board + Clone + Send, F: FeatureExtractor<B> {
    debug!("batch: base seed: {}", base_seed);
    let mut seed_rng = XorShift128PlusRng::seed_from_u64(base_seed);
    let (out_tx, out_rx) = channel();
    let mut num_jobs = 0;
    for tid in 0 .. self.num_workers {
      let num_worker_playouts = num_playouts / self.num_workers
          + if tid < num_playouts % self.num_workers { 1 } else { 0 };
      if num_worker_playouts == 0 {
        continue;
      }
      let board = board.clone();
      let cfg = self.cfg.clone();
      let model = self.model.clone();
      let out_tx = out_tx.clone();
      let seed: u64 = seed_rng.gen();
      self.pool.execute(move || {
        run_worker(tid, cfg, model, board, color, num_worker_playouts, seed, out_tx);
      });
      num_jobs += 1;
    }
    drop(out_tx);

    let mut stats = BatchStats::default();
    for _ in 0 .. num_jobs {
      match out_rx.recv() {
        Ok(Ok(worker_stats)) => stats.merge(&worker_stats),
        Ok(Err(e)) => return Err(e),
        Err(_) => {
          error!("batch: a playout worker exited without reporting");
          return Err(PlayoutError::Worker("result channel closed".to_owned()));
        }
      }
    }
    info!("batch: playouts: {} wins: B {} W {} truncated: {} mean plies: {:.1}",
        stats.num_playouts, stats.wins[0], stats.wins[1], stats.num_truncated, stats.mean_plies());
    Ok(stats)
  }
}

fn run_worker<B, F>(
    tid: usize,
    cfg: PlayoutConfig,
    model: Option<Arc<FeatureModel<F>>>,
    init_board: B,
    color: Color,
    num_playouts: usize,
    seed: u64,
    out_tx: Sender<PlayoutResult<BatchStats>>)
where B: Board + Clone, F: FeatureExtractor<B> {
  let mut rng = XorShift128PlusRng::seed_from_u64(seed);
  let result = PlayoutDriver::from_parts(cfg, model).and_then(|mut driver| {
    let mut stats = BatchStats::default();
    for _ in 0 .. num_playouts {
      let mut board = init_board.clone();
      let outcome = driver.run(&mut board, color, &mut rng)?;
      stats.record(&outcome);
    }
    Ok(stats)
  });
  if let Err(ref e) = result {
    error!("batch: worker {} failed: {}", tid, e);
  }
  // The receiver only hangs up after an earlier worker failed.
  let _ = out_tx.send(result);
}
