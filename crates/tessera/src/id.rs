//! Object identity.

use parking_lot::Mutex;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{
    fmt,
    sync::{Arc, OnceLock},
};

/// Runtime identity of an object, unique among live objects of one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({:#018x})", self.0)
    }
}

/// Source of random 64-bit object ids.
///
/// Thread-safe; one generator is usually shared by a whole object tree via
/// [`Services`](crate::Services).
pub struct IdGenerator {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl IdGenerator {
    /// Generator seeded from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self::from_rng(ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Deterministic generator, for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Process-wide generator.
    pub fn shared() -> Arc<IdGenerator> {
        static SHARED: OnceLock<Arc<IdGenerator>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(IdGenerator::from_entropy()))
            .clone()
    }

    pub fn next_id(&self) -> ObjectId {
        ObjectId(self.rng.lock().next_u64())
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}
