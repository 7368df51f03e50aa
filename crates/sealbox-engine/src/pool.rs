//! Shared scratch-buffer pool
//!
//! One pool instance is shared by every operation of an engine (injected at
//! construction, never a hidden process-wide default). Renting hands out a
//! [`PooledBuf`] guard with exclusive ownership of its backing `Vec`; the
//! drop impl returns the buffer on every exit path, including when the
//! owning future is cancelled.
//!
//! Rented buffers may carry stale bytes from a previous operation: capacity
//! is the contract, content is not.

use std::mem;
use std::sync::{Arc, Mutex};

/// How many idle buffers the pool keeps before letting extras drop.
const MAX_IDLE: usize = 8;

/// A pool of byte buffers sized to (at least) one coarse size class.
pub struct BufferPool {
    /// Minimum capacity of a freshly allocated buffer.
    class: usize,
    shelf: Mutex<Vec<Vec<u8>>>,
}

impl BufferPool {
    /// Create a pool whose size class is `class` bytes (typically the
    /// engine's chunk size plus tag overhead).
    pub fn new(class: usize) -> Arc<Self> {
        Arc::new(Self {
            class,
            shelf: Mutex::new(Vec::new()),
        })
    }

    /// Rent a buffer with capacity of at least `min` bytes.
    ///
    /// The returned guard dereferences to an empty `Vec<u8>` with the
    /// requested capacity; callers `resize` it to their read length.
    pub fn rent(self: &Arc<Self>, min: usize) -> PooledBuf {
        PooledBuf {
            buf: self.take(min),
            pool: Arc::clone(self),
        }
    }

    fn take(&self, min: usize) -> Vec<u8> {
        let mut shelf = self.lock();
        if let Some(pos) = shelf.iter().position(|b| b.capacity() >= min) {
            return shelf.swap_remove(pos);
        }
        drop(shelf);
        Vec::with_capacity(min.max(self.class))
    }

    fn put_back(&self, mut buf: Vec<u8>) {
        buf.clear();
        let mut shelf = self.lock();
        if shelf.len() < MAX_IDLE {
            shelf.push(buf);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<u8>>> {
        // The shelf only holds reusable byte buffers; a poisoned lock
        // cannot leave them in an unusable state.
        self.shelf.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[cfg(test)]
    fn idle_count(&self) -> usize {
        self.lock().len()
    }
}

/// Exclusive handle on a pooled buffer; returns it to the pool on drop.
pub struct PooledBuf {
    buf: Vec<u8>,
    pool: Arc<BufferPool>,
}

impl PooledBuf {
    /// Grow-only capacity policy: keep the current buffer while it fits,
    /// swap it through the pool for a larger one only on shortfall.
    pub fn ensure_capacity(&mut self, min: usize) {
        if self.buf.capacity() < min {
            let bigger = self.pool.take(min);
            let old = mem::replace(&mut self.buf, bigger);
            self.pool.put_back(old);
        }
    }
}

impl std::ops::Deref for PooledBuf {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl std::ops::DerefMut for PooledBuf {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuf {
    fn drop(&mut self) {
        self.pool.put_back(mem::take(&mut self.buf));
    }
}
