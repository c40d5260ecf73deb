//! Best score ever reached
//!
//! Cached in memory, persisted through a `ScoreStore` whenever it improves.

use crate::platform::storage::ScoreStore;

/// High score tracker over a store
#[derive(Debug)]
pub struct HighScore<S: ScoreStore> {
    store: S,
    best: Option<u64>,
}

impl<S: ScoreStore> HighScore<S> {
    /// Read the stored best. A failing store starts with no high score.
    pub fn load(store: S) -> Self {
        let best = match store.load() {
            Ok(best) => {
                if let Some(best) = best {
                    log::info!("Loaded high score {}", best);
                }
                best
            }
            Err(e) => {
                log::warn!("High score unavailable: {}", e);
                None
            }
        };
        Self { store, best }
    }

    /// Current best, `None` until something is stored
    pub fn best(&self) -> Option<u64> {
        self.best
    }

    /// Value worth showing: a high score of zero is suppressed
    pub fn display(&self) -> Option<u64> {
        self.best.filter(|b| *b > 0)
    }

    /// Apply `max(cached, stored, score)`. Returns true when `score` is a new best.
    ///
    /// The store is re-read first: another session on the same store may
    /// have written a higher value since this one loaded.
    pub fn record(&mut self, score: u64) -> bool {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(e) => {
                log::debug!("High score re-read failed: {}", e);
                None
            }
        };
        let previous = self.best.max(stored);
        let best = previous.map_or(score, |b| b.max(score));
        self.best = Some(best);

        if stored != Some(best) {
            if let Err(e) = self.store.store(best) {
                log::warn!("Failed to save high score {}: {}", best, e);
            }
        }
        previous.is_none_or(|b| score > b)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
