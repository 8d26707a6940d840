extern crate env_logger;
extern crate getopts;
#[macro_use] extern crate log;
extern crate mcgo;

use mcgo::batch::{BatchStats, PlayoutBatch};
use mcgo::board::{Color};
use mcgo::config::{PlayoutConfig};
use mcgo::error::{PlayoutResult};
use mcgo::fastboard::{FastBoard};
use mcgo::features::{GammaWeights, PatternFeatureExtractor};
use mcgo::probs::{FeatureModel};

use getopts::{Options};
use std::env;
use std::process;
use std::sync::{Arc};
use std::time::{Instant};

fn run_batch(size: usize, num_playouts: usize, num_threads: usize, cfg: PlayoutConfig, weights_path: Option<String>, seed: Option<u64>) -> PlayoutResult<BatchStats> {
  let board = FastBoard::new(size);
  match (weights_path, seed) {
    (Some(path), seed) => {
      let weights = Arc::new(GammaWeights::load(&path)?);
      let model = Arc::new(FeatureModel::new(PatternFeatureExtractor, weights)?);
      let batch = PlayoutBatch::with_model(num_threads, cfg, model)?;
      match seed {
        Some(seed) => batch.run_seeded(&board, Color::Black, num_playouts, seed),
        None => batch.run(&board, Color::Black, num_playouts),
      }
    }
    (None, Some(seed)) => {
      PlayoutBatch::new(num_threads, cfg)?.run_seeded(&board, Color::Black, num_playouts, seed)
    }
    (None, None) => {
      PlayoutBatch::new(num_threads, cfg)?.run(&board, Color::Black, num_playouts)
    }
  }
}

fn main() {
  env_logger::init();

  let args: Vec<_> = env::args().collect();
  let mut opts = Options::new();
  opts.optopt("s", "size", "board size (default 9)", "N");
  opts.optopt("n", "num-playouts", "number of playouts (default 1000)", "N");
  opts.optopt("t", "threads", "worker threads (default 1)", "N");
  opts.optopt("c", "config", "playout config file (toml)", "PATH");
  opts.optopt("w", "weights", "gamma weight table", "PATH");
  opts.optopt("r", "seed", "base seed for reproducible runs", "N");
  opts.optmulti("o", "option", "playout option override", "KEY=VALUE");
  opts.optflag("h", "help", "print this help");
  let matches = match opts.parse(&args[1 ..]) {
    Ok(m) => m,
    Err(e) => {
      eprintln!("bench-playout: {}", e);
      process::exit(2);
    }
  };
  if matches.opt_present("h") {
    print!("{}", opts.usage("Usage: bench-playout [options]"));
    return;
  }

  let parse_count = |name: &str, default: usize| -> usize {
    match matches.opt_str(name) {
      None => default,
      Some(s) => match s.parse() {
        Ok(n) => n,
        Err(_) => {
          eprintln!("bench-playout: --{} should be an integer, got '{}'", name, s);
          process::exit(2);
        }
      },
    }
  };
  let size = parse_count("size", 9);
  let num_playouts = parse_count("num-playouts", 1000);
  let num_threads = parse_count("threads", 1);
  let seed: Option<u64> = match matches.opt_str("seed") {
    None => None,
    Some(s) => match s.parse() {
      Ok(seed) => Some(seed),
      Err(_) => {
        eprintln!("bench-playout: --seed should be an integer, got '{}'", s);
        process::exit(2);
      }
    },
  };
  if size < FastBoard::MIN_DIM || size > FastBoard::MAX_DIM {
    eprintln!("bench-playout: unsupported board size: {}", size);
    process::exit(2);
  }

  let mut cfg = match matches.opt_str("config") {
    Some(path) => PlayoutConfig::load(&path),
    None => PlayoutConfig::from_env(),
  }.unwrap_or_else(|e| {
    eprintln!("bench-playout: {}", e);
    process::exit(2);
  });
  let mut overrides = Vec::new();
  for kv in matches.opt_strs("option") {
    let mut toks = kv.splitn(2, '=');
    let key = toks.next().unwrap_or("").to_owned();
    let value = toks.next().unwrap_or("").to_owned();
    overrides.push((key, value));
  }
  if let Err(e) = cfg.apply_options(&overrides[..]) {
    eprintln!("bench-playout: {}", e);
    process::exit(2);
  }
  info!("bench-playout: size: {} playouts: {} threads: {} cfg: {:?}", size, num_playouts, num_threads, cfg);

  let start = Instant::now();
  let stats = match run_batch(size, num_playouts, num_threads, cfg, matches.opt_str("weights"), seed) {
    Ok(stats) => stats,
    Err(e) => {
      error!("bench-playout: {}", e);
      eprintln!("bench-playout: {}", e);
      process::exit(1);
    }
  };
  let elapsed = start.elapsed().as_secs_f64();

  println!("playouts:   {}", stats.num_playouts);
  println!("black wins: {} ({:.3})", stats.wins[0], stats.win_rate(Color::Black));
  println!("white wins: {} ({:.3})", stats.wins[1], stats.win_rate(Color::White));
  println!("truncated:  {}", stats.num_truncated);
  println!("mean plies: {:.1}", stats.mean_plies());
  if elapsed > 0.0 {
    println!("elapsed:    {:.3} s ({:.1} playouts/s)", elapsed, stats.num_playouts as f64 / elapsed);
  }
}
