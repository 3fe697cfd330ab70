/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::SystemStatus;

struct CachedStatus {
    status: SystemStatus,
    refreshed_at: Instant,
}

/**
 * Time-boxed copy of the latest system status.
 *
 * The controller refreshes it after every tick; readers take a copy without
 * going through the controller as long as it is younger than `ttl`.
 */
#[derive(Clone)]
pub struct StatusCache {
    inner: Arc<Mutex<Option<CachedStatus>>>,
    ttl: Duration,
}

impl StatusCache {
    pub fn new(ttl: Duration) -> StatusCache {
        StatusCache {
            inner: Arc::new(Mutex::new(None)),
            ttl,
        }
    }

    pub fn store(&self, status: SystemStatus) {
        *self.lock() = Some(CachedStatus {
            status,
            refreshed_at: Instant::now(),
        });
    }

    /// Cached status, if it is still within the TTL.
    pub fn fresh(&self) -> Option<SystemStatus> {
        self.lock()
            .as_ref()
            .filter(|cached| cached.refreshed_at.elapsed() <= self.ttl)
            .map(|cached| cached.status.clone())
    }

    // A panic while holding the lock cannot leave a half-written status behind.
    fn lock(&self) -> MutexGuard<'_, Option<CachedStatus>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
