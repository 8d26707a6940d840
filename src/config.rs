use crate::error::{PlayoutError, PlayoutResult};
use crate::policy::{SimulationPolicy};

use serde::{Deserialize};
use std::env;
use std::fs::{File};
use std::io::{Read};
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &'static str = "PLAYOUT_CONFIG_PATH";

pub const DEFAULT_LIMIT: usize = 1000;

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayoutConfig {
  pub komi:               f32,
  pub limit:              usize,
  pub simulation_policy:  SimulationPolicy,
  pub use_pattern:        bool,
  pub check_selfatari:    bool,
}

impl Default for PlayoutConfig {
  fn default() -> PlayoutConfig {
    PlayoutConfig{
      komi:               0.0,
      limit:              DEFAULT_LIMIT,
      simulation_policy:  SimulationPolicy::Random,
      use_pattern:        true,
      check_selfatari:    true,
    }
  }
}

fn parse_option<T: std::str::FromStr>(key: &str, value: &str) -> PlayoutResult<T> {
  value.trim().parse().map_err(|_| PlayoutError::InvalidOptionValue{
    key:    key.to_owned(),
    value:  value.to_owned(),
  })
}

impl PlayoutConfig {
  /// Builds a config from string key/value pairs over defaults. Any key outside
  /// the recognized set is rejected.
  pub fn from_options<K, V>(options: &[(K, V)]) -> PlayoutResult<PlayoutConfig> where K: AsRef<str>, V: AsRef<str> {
    let mut cfg = PlayoutConfig::default();
    cfg.apply_options(options)?;
    Ok(cfg)
  }

  /// Overrides fields from key/value pairs. On error `self` may be partially
  /// updated.
  pub fn apply_options<K, V>(&mut self, options: &[(K, V)]) -> PlayoutResult<()> where K: AsRef<str>, V: AsRef<str> {
    for &(ref key, ref value) in options.iter() {
      let (key, value) = (key.as_ref(), value.as_ref());
      match key {
        "komi"              => self.komi = parse_option(key, value)?,
        "limit"             => self.limit = parse_option(key, value)?,
        "simulation_policy" => self.simulation_policy = parse_option(key, value)?,
        "use_pattern"       => self.use_pattern = parse_option(key, value)?,
        "check_selfatari"   => self.check_selfatari = parse_option(key, value)?,
        _ => return Err(PlayoutError::UnknownOption(key.to_owned())),
      }
    }
    self.validate()
  }

  pub fn from_toml_str(s: &str) -> PlayoutResult<PlayoutConfig> {
    let cfg: PlayoutConfig = toml::from_str(s)?;
    cfg.validate()?;
    Ok(cfg)
  }

  pub fn load<P: AsRef<Path>>(path: P) -> PlayoutResult<PlayoutConfig> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut s = String::new();
    file.read_to_string(&mut s)?;
    let cfg = PlayoutConfig::from_toml_str(&s)?;
    debug!("loaded playout config from {}: {:?}", path.display(), cfg);
    Ok(cfg)
  }

  /// Loads the file named by `PLAYOUT_CONFIG_PATH`, or the defaults when the
  /// variable is unset.
  pub fn from_env() -> PlayoutResult<PlayoutConfig> {
    match env::var_os(CONFIG_PATH_ENV) {
      Some(path) => PlayoutConfig::load(PathBuf::from(path)),
      None => Ok(PlayoutConfig::default()),
    }
  }

  pub fn validate(&self) -> PlayoutResult<()> {
    if self.limit == 0 {
      return Err(PlayoutError::InvalidOptionValue{
        key:    "limit".to_owned(),
        value:  self.limit.to_string(),
      });
    }
    if !self.komi.is_finite() {
      return Err(PlayoutError::InvalidOptionValue{
        key:    "komi".to_owned(),
        value:  self.komi.to_string(),
      });
    }
    Ok(())
  }
}
