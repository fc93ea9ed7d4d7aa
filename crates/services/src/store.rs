use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuestionSet};

/// Draws the working set of questions for a session from the full pool.
///
/// Stateless; call it again on restart to draw a fresh set.
pub struct QuestionStore;

impl QuestionStore {
    /// Shuffle `pool` with the thread-local RNG and keep the first [`QuestionSet::CAP`].
    ///
    /// An empty pool yields an empty set. Callers must check before starting a session.
    #[must_use]
    pub fn load(pool: Vec<Question>) -> QuestionSet {
        Self::load_with_rng(pool, &mut rand::rng())
    }

    /// Same as [`QuestionStore::load`] with a caller-provided RNG.
    #[must_use]
    pub fn load_with_rng<R: Rng + ?Sized>(mut pool: Vec<Question>, rng: &mut R) -> QuestionSet {
        if pool.is_empty() {
            tracing::warn!("question pool is empty");
            return QuestionSet::default();
        }
        // Fisher-Yates; every permutation is equally likely.
        pool.shuffle(rng);
        QuestionSet::from_ordered(pool)
    }
}
