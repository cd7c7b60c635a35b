//! Pooled scratch buffers with RAII leases.
//!
//! Every transient buffer the forward pass needs comes from the pool and goes
//! back when its [`Lease`] drops, so repeated refinements reuse memory
//! instead of growing it.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A free list of `f32` buffers.
#[derive(Debug, Default)]
pub struct ScratchPool {
    free: Mutex<Vec<Vec<f32>>>,
    outstanding: AtomicUsize,
}

impl ScratchPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lease a zeroed buffer of `len` elements.
    pub fn lease(&self, len: usize) -> Lease<'_> {
        let mut buf = self
            .free
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop()
            .unwrap_or_default();
        buf.clear();
        buf.resize(len, 0.0);
        self.outstanding.fetch_add(1, Ordering::Relaxed);
        Lease { pool: self, buf }
    }

    /// Leases not yet dropped.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }

    /// Buffers waiting in the free list.
    pub fn pooled(&self) -> usize {
        self.free
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Drop every pooled buffer.
    pub fn clear(&self) {
        self.free
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    fn give_back(&self, buf: Vec<f32>) {
        self.free
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(buf);
        self.outstanding.fetch_sub(1, Ordering::Relaxed);
    }
}

/// A leased buffer. Returned to its pool on drop.
#[derive(Debug)]
pub struct Lease<'a> {
    pool: &'a ScratchPool,
    buf: Vec<f32>,
}

impl Deref for Lease<'_> {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.buf
    }
}

impl DerefMut for Lease<'_> {
    fn deref_mut(&mut self) -> &mut [f32] {
        &mut self.buf
    }
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        self.pool.give_back(std::mem::take(&mut self.buf));
    }
}
