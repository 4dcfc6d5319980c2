//! Cached GPU inventory.

use std::sync::{Arc, PoisonError, RwLock};

use gpupin_core::ports::GpuInventoryPort;
use gpupin_core::{GpuDevice, GpuInventory};
use tracing::debug;

type Snapshot = Arc<[Arc<dyn GpuDevice>]>;

/// Inventory wrapper that enumerates once and serves a shared snapshot.
///
/// The snapshot is replaced as a whole by [`refresh`](Self::refresh): the
/// new inventory is enumerated outside the lock and swapped in afterwards,
/// so readers see either the old or the new inventory, never a mix.
pub struct CachedGpuInventory<P> {
    inner: P,
    snapshot: RwLock<Option<Snapshot>>,
}

impl<P: GpuInventoryPort> CachedGpuInventory<P> {
    /// Wrap `inner`. Nothing is enumerated until the first read.
    pub const fn new(inner: P) -> Self {
        Self {
            inner,
            snapshot: RwLock::new(None),
        }
    }

    /// Re-enumerate and atomically replace the snapshot.
    pub fn refresh(&self) -> usize {
        let fresh: Snapshot = self.inner.gpus().into();
        let count = fresh.len();
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(fresh);
        debug!(count, "GPU inventory refreshed");
        count
    }

    fn current(&self) -> Option<Snapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<P: GpuInventoryPort> GpuInventoryPort for CachedGpuInventory<P> {
    fn gpus(&self) -> GpuInventory {
        if let Some(snapshot) = self.current() {
            return snapshot.to_vec();
        }

        self.refresh();
        self.current().map(|s| s.to_vec()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpupin_core::{GpuCard, device_for_card};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns one more GPU on every enumeration.
    struct GrowingInventory {
        calls: AtomicUsize,
    }

    impl GpuInventoryPort for GrowingInventory {
        fn gpus(&self) -> GpuInventory {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            (0..n)
                .map(|i| {
                    device_for_card(GpuCard {
                        card: format!("card{i}"),
                        pci_slot: format!("0000:0{i}:00.0"),
                        vendor_id: "1002".to_string(),
                        device_id: "73df".to_string(),
                        driver: "amdgpu".to_string(),
                        embedded_display: false,
                    })
                })
                .collect()
        }
    }

    fn cached() -> CachedGpuInventory<GrowingInventory> {
        CachedGpuInventory::new(GrowingInventory {
            calls: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_lazy_first_read_then_cached() {
        let cache = cached();
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 0);

        assert_eq!(cache.gpus().len(), 1);
        assert_eq!(cache.gpus().len(), 1);
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_refresh_replaces_snapshot() {
        let cache = cached();
        let before = cache.gpus();

        assert_eq!(cache.refresh(), 2);
        let after = cache.gpus();

        // Earlier readers keep their own copy
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert_eq!(after[1].card().card, "card1");
    }

    #[test]
    fn test_concurrent_readers_see_whole_snapshots() {
        let cache = Arc::new(cached());
        cache.refresh();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        if i == 0 {
                            cache.refresh();
                        }
                        let gpus = cache.gpus();
                        // Snapshot n always holds cards 0..n in order
                        for (idx, gpu) in gpus.iter().enumerate() {
                            assert_eq!(gpu.card().card, format!("card{idx}"));
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
