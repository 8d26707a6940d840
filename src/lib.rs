#[macro_use]
extern crate log;

extern crate bit_set;
extern crate rand;
extern crate serde;
extern crate thiserror;
extern crate threadpool;
extern crate toml;
extern crate vec_map;

pub mod array_util;
pub mod batch;
pub mod board;
pub mod config;
pub mod discrete;
pub mod error;
pub mod fastboard;
pub mod features;
pub mod pattern;
pub mod playout;
pub mod policy;
pub mod prior;
pub mod probs;
pub mod random;
