//! Reusable record buffers
//!
//! A bounded free-list of byte buffers. [`BufferPool::get`] hands out a
//! [`PooledBuffer`] guard that returns the buffer when dropped, on every
//! exit path including unwinding. When the free-list is empty a new buffer
//! is allocated; when it is full a returned buffer is simply dropped.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::ops::{Deref, DerefMut};
use std::sync::OnceLock;

const DEFAULT_POOL_SIZE: usize = 64;
const DEFAULT_BUFFER_CAPACITY: usize = 1024;
/// Buffers that grew beyond this are not kept
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

pub struct BufferPool {
    sender: Sender<Vec<u8>>,
    receiver: Receiver<Vec<u8>>,
}

impl BufferPool {
    pub fn new(size: usize) -> Self {
        let (sender, receiver) = bounded(size);
        Self { sender, receiver }
    }

    /// Check out a buffer with length zero
    pub fn get(&self) -> PooledBuffer<'_> {
        let mut buffer = self
            .receiver
            .try_recv()
            .unwrap_or_else(|_| Vec::with_capacity(DEFAULT_BUFFER_CAPACITY));
        buffer.clear();

        PooledBuffer {
            buffer,
            pool: self,
        }
    }

    /// Number of idle buffers
    pub fn idle(&self) -> usize {
        self.receiver.len()
    }

    fn put(&self, buffer: Vec<u8>) {
        if buffer.capacity() <= MAX_RETAINED_CAPACITY {
            let _ = self.sender.try_send(buffer);
        }
    }
}

/// Buffer checked out of a [`BufferPool`]
pub struct PooledBuffer<'p> {
    buffer: Vec<u8>,
    pool: &'p BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buffer
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.buffer));
    }
}

/// Pool shared by every logger in the process
pub fn buffer_pool() -> &'static BufferPool {
    static POOL: OnceLock<BufferPool> = OnceLock::new();
    POOL.get_or_init(|| BufferPool::new(DEFAULT_POOL_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_is_returned_and_reset() {
        let pool = BufferPool::new(4);
        {
            let mut buffer = pool.get();
            buffer.extend_from_slice(b"{\"message\":\"hello\"}");
        }
        assert_eq!(pool.idle(), 1);

        let buffer = pool.get();
        assert!(buffer.is_empty());
        assert!(buffer.capacity() >= DEFAULT_BUFFER_CAPACITY);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_nested_checkout_allocates() {
        let pool = BufferPool::new(4);
        let first = pool.get();
        let second = pool.get();
        drop(first);
        drop(second);
        assert_eq!(pool.idle(), 2);
    }

    #[test]
    fn test_pool_is_bounded() {
        let pool = BufferPool::new(1);
        let first = pool.get();
        let second = pool.get();
        drop(first);
        drop(second);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_oversized_buffers_are_dropped() {
        let pool = BufferPool::new(4);
        {
            let mut buffer = pool.get();
            buffer.reserve(MAX_RETAINED_CAPACITY * 2);
        }
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_returned_on_unwind() {
        let pool = BufferPool::new(4);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _buffer = pool.get();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(pool.idle(), 1);
    }
}
