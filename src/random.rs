use rand::{Error, Rng, RngCore, SeedableRng};

/// Removes and returns a uniformly chosen element. Order of the remaining
/// elements is not preserved.
pub fn choose_without_replace<T: Copy, R: Rng + ?Sized>(xs: &mut Vec<T>, rng: &mut R) -> Option<T> {
  if xs.is_empty() {
    return None;
  }
  let j = rng.gen_range(0 .. xs.len());
  Some(xs.swap_remove(j))
}

#[derive(Clone, Debug)]
pub struct XorShift128PlusRng {
  state: [u64; 2],
}

impl XorShift128PlusRng {
  // The all-zero state is a fixed point of the generator.
  const NONZERO_SEED: [u64; 2] = [0x9e3779b97f4a7c15, 0xbf58476d1ce4e5b9];
}

impl RngCore for XorShift128PlusRng {
  fn next_u64(&mut self) -> u64 {
    let mut s1 = self.state[0];
    let s0 = self.state[1];
    self.state[0] = s0;
    s1 ^= s1 << 23;
    s1 = s1 ^ s0 ^ (s1 >> 17) ^ (s0 >> 26);
    self.state[1] = s1;
    s1.wrapping_add(s0)
  }

  fn next_u32(&mut self) -> u32 {
    (self.next_u64() >> 32) as u32
  }

  fn fill_bytes(&mut self, dest: &mut [u8]) {
    for chunk in dest.chunks_mut(8) {
      let bytes = self.next_u64().to_le_bytes();
      let n = chunk.len();
      chunk.copy_from_slice(&bytes[.. n]);
    }
  }

  fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
    self.fill_bytes(dest);
    Ok(())
  }
}

impl SeedableRng for XorShift128PlusRng {
  type Seed = [u8; 16];

  fn from_seed(seed: [u8; 16]) -> XorShift128PlusRng {
    let mut lo = [0u8; 8];
    let mut hi = [0u8; 8];
    lo.copy_from_slice(&seed[.. 8]);
    hi.copy_from_slice(&seed[8 ..]);
    let mut state = [u64::from_le_bytes(lo), u64::from_le_bytes(hi)];
    if state == [0, 0] {
      state = Self::NONZERO_SEED;
    }
    XorShift128PlusRng{
      state:  state,
    }
  }
}
