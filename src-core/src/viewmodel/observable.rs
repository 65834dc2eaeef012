//! Observable Value
//!
//! Single-writer, multi-reader cell. Every `set` replaces the whole value and
//! wakes all subscribers; a subscriber that falls behind sees only the latest.

use tokio::sync::watch;

pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            rx: self.tx.subscribe(),
            primed: false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Receiving side of an [`Observable`]
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
    primed: bool,
}

impl<T: Clone> Subscription<T> {
    /// Wait for the next value.
    ///
    /// The first call returns the value current at subscription time without
    /// waiting. Returns `None` once the observable is dropped.
    pub async fn next(&mut self) -> Option<T> {
        if !self.primed {
            self.primed = true;
            return Some(self.rx.borrow_and_update().clone());
        }
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Latest value without waiting, marking it seen
    pub fn latest(&mut self) -> T {
        self.primed = true;
        self.rx.borrow_and_update().clone()
    }

    /// True if a value was published that this subscriber has not seen
    pub fn has_pending(&self) -> bool {
        !self.primed || self.rx.has_changed().unwrap_or(false)
    }
}
