use std::{
    sync::{Arc, Condvar, Mutex, PoisonError},
    time::Duration,
};

/// How a [`CancellationContext::wait`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Expired,
    Canceled,
}

/// Shared cancellation flag that doubles as an interruptible sleep.
///
/// Clones share the same flag. Once canceled it stays canceled.
#[derive(Debug, Clone, Default)]
pub struct CancellationContext {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancellationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag and wake every waiter
    pub fn cancel(&self) {
        let (lock, cvar) = &*self.inner;
        let mut canceled = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *canceled = true;
        cvar.notify_all();
    }

    pub fn is_canceled(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleep for `timeout` unless canceled first. Spurious wakeups are
    /// absorbed: only the flag decides the outcome.
    pub fn wait(&self, timeout: Duration) -> WaitOutcome {
        let (lock, cvar) = &*self.inner;
        let canceled = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (canceled, _) = cvar
            .wait_timeout_while(canceled, timeout, |canceled| !*canceled)
            .unwrap_or_else(PoisonError::into_inner);

        if *canceled {
            WaitOutcome::Canceled
        } else {
            WaitOutcome::Expired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Instant};

    #[test]
    fn test_wait_expires() {
        let cancel = CancellationContext::new();
        assert_eq!(cancel.wait(Duration::from_millis(10)), WaitOutcome::Expired);
        assert!(!cancel.is_canceled());
    }

    #[test]
    fn test_cancel_wakes_waiter() {
        let cancel = CancellationContext::new();
        let remote = cancel.clone();
        let start = Instant::now();

        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            remote.cancel();
        });

        assert_eq!(cancel.wait(Duration::from_secs(30)), WaitOutcome::Canceled);
        assert!(start.elapsed() < Duration::from_secs(5));
        canceller.join().unwrap();
    }

    #[test]
    fn test_cancel_is_sticky() {
        let cancel = CancellationContext::new();
        cancel.cancel();
        assert!(cancel.is_canceled());
        assert_eq!(cancel.wait(Duration::from_secs(30)), WaitOutcome::Canceled);
        assert_eq!(cancel.clone().wait(Duration::ZERO), WaitOutcome::Canceled);
    }
}
