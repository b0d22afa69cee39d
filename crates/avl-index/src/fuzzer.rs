use std::collections::HashSet;

use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::loader::Record;
use crate::types::{Key, MAX_KEY, MIN_KEY};

const NAME_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ ";

/// Random record generator for stress tests.
///
/// Uses the xoshiro256** PRNG, so a fixed seed reproduces the same
/// sequence.
///
/// # Examples
///
/// ```
/// use avl_index::fuzzer::RecordFuzzer;
/// use avl_index::{MAX_KEY, MIN_KEY};
///
/// let mut fuzzer = RecordFuzzer::from_u64(7);
/// let key = fuzzer.random_key();
/// assert!((MIN_KEY..=MAX_KEY).contains(&key));
///
/// let records = fuzzer.distinct_records(100);
/// assert_eq!(records.len(), 100);
/// ```
pub struct RecordFuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl RecordFuzzer {
    /// Create a fuzzer with an optional seed; `None` draws one from `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });

        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::new(Some(bytes))
    }

    /// Key in `[MIN_KEY, MAX_KEY]`.
    pub fn random_key(&mut self) -> Key {
        self.rng.gen_range(MIN_KEY..=MAX_KEY)
    }

    /// Name of `len` letters and spaces.
    pub fn random_name(&mut self, len: usize) -> String {
        let chars: Vec<char> = NAME_CHARS.chars().collect();
        (0..len)
            .map(|_| chars[self.rng.gen_range(0..chars.len())])
            .collect()
    }

    pub fn record(&mut self) -> Record {
        let len = self.rng.gen_range(0..=16);
        (self.random_key(), self.random_name(len))
    }

    /// `n` records, duplicates allowed.
    pub fn records(&mut self, n: usize) -> Vec<Record> {
        (0..n).map(|_| self.record()).collect()
    }

    /// `n` records with pairwise distinct keys.
    pub fn distinct_records(&mut self, n: usize) -> Vec<Record> {
        let mut seen = HashSet::with_capacity(n);
        let mut out = Vec::with_capacity(n);
        while out.len() < n {
            let (key, name) = self.record();
            if seen.insert(key) {
                out.push((key, name));
            }
        }
        out
    }

    /// Pick a random element from a slice.
    pub fn pick<'a, T>(&mut self, elements: &'a [T]) -> &'a T {
        &elements[self.rng.gen_range(0..elements.len())]
    }

    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }
}
