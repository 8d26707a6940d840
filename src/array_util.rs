/// Index of the largest element; the first one wins ties. NaNs are skipped.
pub fn array_argmax(xs: &[f64]) -> Option<usize> {
  let mut argmax: Option<(usize, f64)> = None;
  for (j, &x) in xs.iter().enumerate() {
    if x.is_nan() {
      continue;
    }
    match argmax {
      Some((_, max_x)) if max_x >= x => {}
      _ => argmax = Some((j, x)),
    }
  }
  argmax.map(|(j, _)| j)
}

pub fn array_max(xs: &[f64]) -> Option<f64> {
  array_argmax(xs).map(|j| xs[j])
}

pub fn array_sum(xs: &[f64]) -> f64 {
  xs.iter().fold(0.0, |acc, &x| acc + x)
}
