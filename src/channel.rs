//! Bounded intent queue for `no_std` targets
//!
//! Producers (switch ISR, touch task, command handler) push with
//! [`Sender::try_send`]; the control loop drains with [`Receiver::drain`]
//! once per tick. Access is serialized with `critical-section` and the
//! storage is a fixed-size `heapless::Deque`, so a full queue rejects the
//! value instead of allocating.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// The queue was full; carries the rejected value back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

impl<T> TrySendError<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// The queue was empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

pub struct Channel<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Producer handle; any number may exist
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Consumer handle, normally held by the control loop only
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    fn with_queue<R>(&self, f: impl FnOnce(&mut Deque<T, SIZE>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.queue.borrow(cs).borrow_mut()))
    }

    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.with_queue(|queue| queue.push_back(value).map_err(TrySendError))
    }

    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.with_queue(|queue| queue.pop_front().ok_or(TryReceiveError))
    }

    /// Number of queued values
    pub fn len(&self) -> usize {
        self.with_queue(|queue| queue.len())
    }

    pub fn is_empty(&self) -> bool {
        self.with_queue(|queue| queue.is_empty())
    }

    pub const fn capacity(&self) -> usize {
        SIZE
    }

    /// Drop everything queued
    pub fn clear(&self) {
        self.with_queue(Deque::clear);
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    /// Queue a value; a full queue hands it back in the error
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<'a, T, const SIZE: usize> Receiver<'a, T, SIZE> {
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }

    /// Pop values in send order until the queue is empty
    ///
    /// Values sent while draining are picked up by the same iterator.
    pub fn drain(&self) -> impl Iterator<Item = T> + use<'a, T, SIZE> {
        let channel = self.channel;
        core::iter::from_fn(move || channel.try_receive().ok())
    }
}
