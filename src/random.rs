use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

const BUFFER_LEN: usize = 1024;

/// Source of uniformly distributed indices.
///
/// The generator draws one index per output character through this trait,
/// so tests can swap in a seeded or scripted source without touching the
/// sampling loop.
pub trait RandomSource {
    /// Returns an index uniformly distributed over `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// ChaCha20 keystream with unbiased rejection sampling.
pub struct KeystreamSource {
    cipher: ChaCha20,
    buffer: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl KeystreamSource {
    pub fn from_seed(key: &[u8; 32]) -> Self {
        let cipher = ChaCha20::new(key.into(), &[0u8; 12].into());
        Self {
            cipher,
            buffer: Zeroizing::new(vec![0u8; BUFFER_LEN]),
            // Forces a refill on the first draw.
            pos: BUFFER_LEN,
        }
    }

    /// Reproducible source for tests and `--seed`.
    pub fn from_u64(seed: u64) -> Self {
        let mut key = Zeroizing::new([0u8; 32]);
        key[..8].copy_from_slice(&seed.to_le_bytes());
        Self::from_seed(&key)
    }

    /// Keyed from operating system entropy.
    pub fn from_entropy() -> Self {
        let mut key = Zeroizing::new([0u8; 32]);
        OsRng.fill_bytes(&mut key[..]);
        Self::from_seed(&key)
    }

    fn next_u64(&mut self) -> u64 {
        if self.pos + 8 > self.buffer.len() {
            self.buffer.fill(0);
            self.cipher.apply_keystream(&mut self.buffer);
            self.pos = 0;
        }

        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.buffer[self.pos..self.pos + 8]);
        self.pos += 8;

        u64::from_le_bytes(bytes)
    }
}

impl RandomSource for KeystreamSource {
    fn next_index(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be non-zero");
        let bound = bound as u64;

        let rejection_threshold = (u64::MAX / bound) * bound;

        loop {
            let random_u64 = self.next_u64();
            if random_u64 < rejection_threshold {
                return (random_u64 % bound) as usize;
            }
        }
    }
}
