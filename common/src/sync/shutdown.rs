use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

/// A latching flag telling the checklist UI to tear itself down. Clones
/// share the same flag.
#[derive(Clone, Default)]
pub struct ShutdownSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        let (flag, cvar) = &*self.inner;
        *flag.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    pub fn is_set(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait up to `timeout` for the signal, returning whether it is set.
    pub fn wait(&self, timeout: Duration) -> bool {
        let (flag, cvar) = &*self.inner;
        let guard = flag.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = cvar
            .wait_timeout_while(guard, timeout, |set| !*set)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_wait_times_out_when_unset() {
        let signal = ShutdownSignal::new();
        assert!(!signal.wait(Duration::from_millis(1)));
        assert!(!signal.is_set());
    }

    #[test]
    fn test_set_wakes_waiter() {
        let signal = ShutdownSignal::new();
        let remote = signal.clone();

        let start = Instant::now();
        let setter = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            remote.set();
        });

        assert!(signal.wait(Duration::from_secs(10)));
        assert!(start.elapsed() < Duration::from_secs(10));
        setter.join().unwrap();
    }
}
