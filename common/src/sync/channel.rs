use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use heapless::Deque;

/// A bounded FIFO queue which never blocks the sender. When full, the
/// oldest queued value is discarded to make room for the new one.
///
/// Safe to share between one producing and one consuming thread.
pub struct StateChannel<T, const N: usize> {
    state: Mutex<CriticalSectionRawMutex, RefCell<Deque<T, N>>>,
}

impl<T, const N: usize> Default for StateChannel<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> StateChannel<T, N> {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn receiver(&self) -> Receiver<'_, T, N> {
        Receiver { inner: self }
    }

    pub const fn sender(&self) -> Sender<'_, T, N> {
        Sender { inner: self }
    }

    /// Queue `value`, returning the value it displaced if the queue was full.
    pub fn send(&self, value: T) -> Option<T> {
        self.state.lock(|deque| {
            let mut deque = deque.borrow_mut();
            let dropped = if deque.is_full() { deque.pop_front() } else { None };

            // Can not fail, there is room after the pop above
            _ = deque.push_back(value);
            dropped
        })
    }

    /// True if at least one value is waiting.
    pub fn poll(&self) -> bool {
        self.state.lock(|deque| !deque.borrow().is_empty())
    }

    /// Take the oldest queued value.
    pub fn receive(&self) -> Option<T> {
        self.state.lock(|deque| deque.borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        self.state.lock(|deque| deque.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        !self.poll()
    }
}

pub struct Sender<'a, T, const N: usize> {
    inner: &'a StateChannel<T, N>,
}

impl<T, const N: usize> Sender<'_, T, N> {
    pub fn send(&self, value: T) -> Option<T> {
        self.inner.send(value)
    }
}

pub struct Receiver<'a, T, const N: usize> {
    inner: &'a StateChannel<T, N>,
}

impl<T, const N: usize> Receiver<'_, T, N> {
    pub fn poll(&self) -> bool {
        self.inner.poll()
    }

    pub fn receive(&self) -> Option<T> {
        self.inner.receive()
    }

    /// Iterate over everything that is queued right now.
    pub fn drain(&self) -> impl Iterator<Item = T> + '_ {
        core::iter::from_fn(move || self.inner.receive())
    }
}
