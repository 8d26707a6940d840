use rand::{Rng};

/// Draws an index from a normalized probability vector with a single uniform
/// draw and one cumulative pass. Zero entries are never returned. Roundoff
/// that leaves the draw past the final cumulative value falls back to the last
/// nonzero entry.
pub fn sample_discrete<R: Rng + ?Sized>(probs: &[f64], rng: &mut R) -> Option<usize> {
  let u: f64 = rng.gen();
  let mut cumulative = 0.0;
  let mut last_nonzero = None;
  for (j, &p) in probs.iter().enumerate() {
    if !(p > 0.0) {
      continue;
    }
    cumulative += p;
    last_nonzero = Some(j);
    if u < cumulative {
      return Some(j);
    }
  }
  last_nonzero
}
