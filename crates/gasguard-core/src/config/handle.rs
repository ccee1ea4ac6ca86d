//! Shared holder for the active configuration snapshot.
//!
//! Concurrent analyses read the current snapshot through [`ConfigHandle::current`];
//! a refresh swaps in a new snapshot atomically. A call that already loaded a
//! snapshot keeps using it in full, so no call ever sees a mix of two epochs.

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::ConfigSnapshot;
use crate::errors::Result;

/// Atomically swappable reference to the current [`ConfigSnapshot`].
///
/// Cloning the handle shares the same underlying slot.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    current: Arc<ArcSwap<ConfigSnapshot>>,
}

impl ConfigHandle {
    /// Create a handle after validating the initial snapshot.
    pub fn new(snapshot: ConfigSnapshot) -> Result<Self> {
        snapshot.validate()?;
        tracing::info!(version = %snapshot.version, "config: installed snapshot");
        Ok(Self {
            current: Arc::new(ArcSwap::from_pointee(snapshot)),
        })
    }

    /// The snapshot in effect right now.
    pub fn current(&self) -> Arc<ConfigSnapshot> {
        self.current.load_full()
    }

    /// Version tag of the snapshot in effect.
    pub fn version(&self) -> String {
        self.current.load().version.clone()
    }

    /// Validate `snapshot` and make it current, returning the one it replaced.
    ///
    /// An invalid snapshot is rejected and the current one stays in place.
    pub fn replace(&self, snapshot: ConfigSnapshot) -> Result<Arc<ConfigSnapshot>> {
        if let Err(err) = snapshot.validate() {
            tracing::warn!(
                version = %snapshot.version,
                error = %err,
                "config: rejected snapshot refresh"
            );
            return Err(err);
        }
        let new_version = snapshot.version.clone();
        let previous = self.current.swap(Arc::new(snapshot));
        tracing::info!(
            previous = %previous.version,
            current = %new_version,
            "config: swapped snapshot"
        );
        Ok(previous)
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(ConfigSnapshot::mainnet())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_replace_swaps_whole_snapshot() {
        let handle = ConfigHandle::new(ConfigSnapshot::mainnet()).unwrap();
        let before = handle.current();

        let previous = handle
            .replace(ConfigSnapshot::mainnet().with_version("mainnet-v21"))
            .unwrap();

        assert_eq!(previous.version, "mainnet-v20");
        assert_eq!(handle.version(), "mainnet-v21");
        // A reader holding the old snapshot still sees it unchanged
        assert_eq!(before.version, "mainnet-v20");
    }

    #[test]
    fn test_invalid_refresh_keeps_current() {
        let handle = ConfigHandle::default();
        let mut bad = ConfigSnapshot::mainnet().with_version("broken");
        bad.limits.tx_max_instructions = 0;

        assert!(handle.replace(bad).unwrap_err().is_configuration());
        assert_eq!(handle.version(), "mainnet-v20");
    }

    #[test]
    fn test_new_rejects_invalid() {
        let mut bad = ConfigSnapshot::mainnet();
        bad.limits.tx_memory_limit = 0;
        assert!(ConfigHandle::new(bad).is_err());
    }

    #[test]
    fn test_concurrent_readers_see_complete_snapshots() {
        let handle = ConfigHandle::default();
        let mut alt = ConfigSnapshot::mainnet().with_version("alt");
        alt.limits.tx_max_instructions = 50_000_000;

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let handle = handle.clone();
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        let snapshot = handle.current();
                        let expected = if snapshot.version == "alt" {
                            50_000_000
                        } else {
                            100_000_000
                        };
                        assert_eq!(snapshot.limits.tx_max_instructions, expected);
                    }
                })
            })
            .collect();

        for i in 0..100 {
            let next = if i % 2 == 0 {
                alt.clone()
            } else {
                ConfigSnapshot::mainnet()
            };
            handle.replace(next).unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
