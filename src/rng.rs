//! Byte source for simulated process contents.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::FALLBACK_SEED;

/// xorshift64, seeded once per session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    pub fn with_seed(seed: u64) -> Self {
        let state = if seed == 0 { FALLBACK_SEED } else { seed };
        Xorshift64 { state }
    }

    /// Seed from the wall clock
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(FALLBACK_SEED);
        Self::with_seed(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    #[inline]
    pub fn next_byte(&mut self) -> u8 {
        // high bits mix better than the low ones
        (self.next_u64() >> 56) as u8
    }
}
