//! Persisted best score
//!
//! One integer in LocalStorage under a fixed key. Absent or unparseable
//! values read as zero; there is no versioning and no schema.

/// The best score seen across sessions
#[derive(Debug, Clone, Copy, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neon_runner_high";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Fold a finished session's score into the record.
    ///
    /// Returns true when the score is a new best (the caller should save).
    /// Recording the same score twice is idempotent.
    pub fn record(&mut self, score: u32) -> bool {
        let score = u64::from(score);
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = raw.trim().parse::<u64>() {
                    log::info!("Loaded high score: {}", best);
                    return Self { best };
                }
                log::warn!("Ignoring malformed high score {:?}", raw);
            }
        }

        Self::new()
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.best.to_string());
            log::info!("High score saved: {}", self.best);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
