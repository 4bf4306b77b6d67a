use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A source that returns the same word forever.
///
/// Every `f32` drawn through [`rand::Rng::random`] comes out as the same value, so
/// `ConstRng::half()` makes every jitter term exactly zero. Useful for replaying a
/// tick without noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstRng(pub u32);

impl ConstRng {
    /// Every `f32` draw yields exactly `0.5`.
    pub fn half() -> Self {
        ConstRng(0x8000_0000)
    }

    /// Every `f32` draw yields `unit`, truncated to 24 bits of precision.
    pub fn from_unit(unit: f32) -> Self {
        let clamped = unit.clamp(0.0, 1.0 - f32::EPSILON);
        ConstRng(((clamped * (1u32 << 24) as f32) as u32) << 8)
    }
}

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        self.0
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.0) << 32) | u64::from(self.0)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.0.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
