// default capacity of the process registry
pub const MAX_PROCESSES: usize = 100;

// xorshift seed used when the requested one is zero or the clock is unusable;
// a zero state would lock the generator at zero
pub const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;
