use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::sender::Sender;
use super::shared::Shared;

/// Consumer handle of a channel.
///
/// Holds one unit of the channel's receiver count until
/// [`reset`](Receiver::reset) or drop. When the last receiver leaves, every
/// subsequent send fails.
pub struct Receiver<T> {
    shared: Option<Arc<Shared<T>>>,
}

impl<T> Receiver<T> {
    pub(crate) fn from_shared(shared: Arc<Shared<T>>) -> Self {
        Self {
            shared: Some(shared),
        }
    }

    /// Blocks until a value arrives.
    ///
    /// Returns `None` once every sender has been released and the queue is
    /// empty, or immediately for an empty handle.
    pub fn receive(&self) -> Option<T> {
        self.shared.as_ref()?.pop()
    }

    /// Like [`receive`](Self::receive), but returns `None` after `timeout`
    /// even if the channel is still open.
    pub fn receive_for(&self, timeout: Duration) -> Option<T> {
        let shared = self.shared.as_ref()?;
        match Instant::now().checked_add(timeout) {
            Some(deadline) => shared.pop_until(deadline),
            None => shared.pop(),
        }
    }

    /// Pops a queued value without waiting.
    pub fn try_receive(&self) -> Option<T> {
        self.shared.as_ref()?.try_pop()
    }

    /// Blocking iterator over received values; ends when the channel closes.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { rx: self }
    }

    /// Returns another receiver on the same channel, incrementing the receiver count.
    #[must_use]
    pub fn share(&self) -> Self {
        if let Some(shared) = &self.shared {
            shared.add_receiver();
        }
        Self {
            shared: self.shared.clone(),
        }
    }

    /// Releases this handle. Calling it on an empty handle is a no-op.
    pub fn reset(&mut self) {
        if let Some(shared) = self.shared.take() {
            shared.release_receiver();
        }
    }

    /// Number of live senders (0 for an empty handle).
    #[must_use]
    pub fn sender_count(&self) -> usize {
        self.shared.as_ref().map_or(0, |s| s.lock().senders)
    }

    /// Number of live receivers, this one included (0 for an empty handle).
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.shared.as_ref().map_or(0, |s| s.lock().receivers)
    }

    /// True while at least one sender could still deliver a value.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.sender_count() > 0
    }

    pub(crate) fn open_sender(&self) -> Sender<T> {
        match &self.shared {
            Some(shared) => {
                shared.add_sender();
                Sender::from_shared(Arc::clone(shared))
            }
            None => Sender::default(),
        }
    }
}

impl<T> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        self.share()
    }
}

impl<T> Default for Receiver<T> {
    fn default() -> Self {
        Self { shared: None }
    }
}

impl<T> Drop for Receiver<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> fmt::Debug for Receiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver")
            .field("attached", &self.shared.is_some())
            .finish()
    }
}

/// Iterator returned by [`Receiver::iter`].
pub struct Iter<'a, T> {
    rx: &'a Receiver<T>,
}

impl<T> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.rx.receive()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{create, open};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_counts_follow_share_and_reset() {
        let (tx, rx) = create::<i32>();
        assert_eq!(tx.receiver_count(), 1);
        assert_eq!(rx.sender_count(), 1);

        let tx2 = tx.share();
        assert_eq!(tx.receiver_count(), 1);
        assert_eq!(rx.sender_count(), 2);

        let rx2 = rx.share();
        assert_eq!(tx.receiver_count(), 2);
        assert_eq!(rx.sender_count(), 2);

        tx.send(1).unwrap();
        tx2.send(2).unwrap();
        let a = rx.receive().unwrap();
        let b = rx2.receive().unwrap();
        assert!((a, b) == (1, 2) || (a, b) == (2, 1));

        let (mut rx, mut rx2) = (rx, rx2);
        rx.reset();
        rx2.reset();
        assert!(!tx.is_open());
        assert!(!tx2.is_open());
        assert!(!rx.is_open());
        assert!(!rx2.is_open());
    }

    #[test]
    fn test_send_fails_without_receivers() {
        let (tx, rx) = create::<&str>();
        drop(rx);
        let err = tx.send("lost").unwrap_err();
        assert_eq!(err.0, "lost");
    }

    #[test]
    fn test_receive_returns_none_after_last_sender() {
        let (tx, rx) = create::<u8>();
        let tx2 = tx.clone();
        tx.send(7).unwrap();
        drop(tx);
        assert!(rx.is_open());
        drop(tx2);
        assert_eq!(rx.receive(), Some(7));
        assert_eq!(rx.receive(), None);
    }

    #[test]
    fn test_blocked_receiver_wakes_on_close() {
        let (tx, rx) = create::<u8>();
        let waiter = thread::spawn(move || rx.receive());
        thread::sleep(Duration::from_millis(20));
        drop(tx);
        assert_eq!(waiter.join().unwrap(), None);
    }

    #[test]
    fn test_receive_for_times_out_while_open() {
        let (tx, rx) = create::<u8>();
        assert_eq!(rx.receive_for(Duration::from_millis(10)), None);
        assert!(rx.is_open());
        tx.send(3).unwrap();
        assert_eq!(rx.receive_for(Duration::from_millis(10)), Some(3));
    }

    #[test]
    fn test_fifo_within_one_sender() {
        let (tx, rx) = create::<usize>();
        for i in 0..100 {
            tx.send(i).unwrap();
        }
        drop(tx);
        let got: Vec<usize> = rx.iter().collect();
        assert_eq!(got, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_open_mints_sender_from_receiver() {
        let (tx, rx) = create::<u8>();
        let minted = open(&rx);
        assert_eq!(rx.sender_count(), 2);
        drop(tx);
        minted.send(9).unwrap();
        drop(minted);
        assert_eq!(rx.iter().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn test_empty_handles_are_inert() {
        let rx = super::Receiver::<u8>::default();
        assert_eq!(rx.receive(), None);
        assert_eq!(rx.receive_for(Duration::from_millis(1)), None);
        let tx = open(&rx);
        assert!(tx.send(1).is_err());
        assert!(!tx.is_open());
    }

    fn run_many_to_many(producers: usize, consumers: usize) {
        const PER_PRODUCER: usize = 100;

        let sent = AtomicUsize::new(0);
        let (tx, rx) = create::<(usize, usize)>();
        let tallies: Vec<HashMap<(usize, usize), usize>> = thread::scope(|s| {
            for from in 0..producers {
                let tx = tx.share();
                let sent = &sent;
                s.spawn(move || {
                    for i in 0..PER_PRODUCER {
                        tx.send((from, i * 10)).unwrap();
                        sent.fetch_add(1, Ordering::Relaxed);
                    }
                });
            }
            let handles: Vec<_> = (0..consumers)
                .map(|_| {
                    let rx = rx.share();
                    s.spawn(move || {
                        let mut seen = HashMap::new();
                        loop {
                            match rx.receive_for(Duration::from_millis(20)) {
                                Some(v) => *seen.entry(v).or_insert(0) += 1,
                                None if rx.is_open() => continue,
                                None => match rx.try_receive() {
                                    Some(v) => *seen.entry(v).or_insert(0) += 1,
                                    None => break,
                                },
                            }
                        }
                        seen
                    })
                })
                .collect();
            let (mut tx, mut rx) = (tx, rx);
            tx.reset();
            rx.reset();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let mut merged: HashMap<(usize, usize), usize> = HashMap::new();
        for t in tallies {
            for (k, n) in t {
                *merged.entry(k).or_insert(0) += n;
            }
        }
        assert_eq!(sent.load(Ordering::Relaxed), producers * PER_PRODUCER);
        assert_eq!(merged.len(), producers * PER_PRODUCER);
        assert!(merged.values().all(|&n| n == 1));
    }

    #[test]
    fn test_many_to_many_delivers_exactly_once() {
        run_many_to_many(1, 1);
        run_many_to_many(1, 64);
        run_many_to_many(64, 1);
        run_many_to_many(32, 32);
    }
}
