//! Reusable scratch buffers.
//!
//! A [`Pool`] hands out cleared values through a [`PoolGuard`]. The guard
//! clears the value and puts it back when dropped, so a buffer is returned on
//! every exit path, including early returns on cancellation.

use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

/// A value that can be cleared for reuse without giving up its storage.
pub trait Poolable: Default + Send {
    fn reset(&mut self);
}

impl<T: Send> Poolable for Vec<T> {
    fn reset(&mut self) {
        self.clear();
    }
}

/// Values kept beyond this many are dropped on return.
const DEFAULT_CAPACITY: usize = 16;

#[derive(Debug)]
pub struct Pool<T: Poolable> {
    free: Mutex<Vec<T>>,
    capacity: usize,
}

impl<T: Poolable> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Poolable> Pool<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Take a cleared value out of the pool, allocating one if none is free.
    pub fn checkout(&self) -> PoolGuard<'_, T> {
        let value = self.free.lock().pop().unwrap_or_default();
        PoolGuard {
            pool: self,
            value: Some(value),
        }
    }

    /// Number of values waiting to be reused.
    pub fn available(&self) -> usize {
        self.free.lock().len()
    }

    fn give_back(&self, mut value: T) {
        value.reset();
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(value);
        }
    }
}

/// Scoped checkout of a pooled value.
pub struct PoolGuard<'a, T: Poolable> {
    pool: &'a Pool<T>,
    // Only `None` while dropping
    value: Option<T>,
}

impl<T: Poolable> Deref for PoolGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.value {
            Some(value) => value,
            None => unreachable!("pooled value taken before drop"),
        }
    }
}

impl<T: Poolable> DerefMut for PoolGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.value {
            Some(value) => value,
            None => unreachable!("pooled value taken before drop"),
        }
    }
}

impl<T: Poolable> Drop for PoolGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.give_back(value);
        }
    }
}
