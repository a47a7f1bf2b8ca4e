// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scratch memory for decoded images.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::ops::{Deref, DerefMut};

/// Source of the transient buffers that hold decoded pixels.
///
/// Every buffer handed out by [`alloc`](Allocator::alloc) is returned through
/// [`free`](Allocator::free) before the load call that requested it returns.
pub trait Allocator {
    /// Returns a buffer with room for at least `size` bytes, or `None` if
    /// memory is exhausted.
    ///
    /// The contents are not read; codecs overwrite whatever the buffer holds.
    fn alloc(&mut self, size: usize) -> Option<Vec<u8>>;

    /// Takes back a buffer previously returned by [`alloc`](Allocator::alloc).
    fn free(&mut self, buffer: Vec<u8>);
}

impl<A: Allocator + ?Sized> Allocator for &mut A {
    fn alloc(&mut self, size: usize) -> Option<Vec<u8>> {
        (**self).alloc(size)
    }

    fn free(&mut self, buffer: Vec<u8>) {
        (**self).free(buffer);
    }
}

/// Allocator backed by the global heap.
///
/// Buffers come back empty with the capacity reserved. Allocation failures
/// are reported instead of aborting.
#[derive(Copy, Clone, Debug, Default)]
pub struct Global;

impl Allocator for Global {
    fn alloc(&mut self, size: usize) -> Option<Vec<u8>> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(size).ok()?;
        Some(buffer)
    }

    fn free(&mut self, buffer: Vec<u8>) {
        drop(buffer);
    }
}

/// A buffer on loan from an [`Allocator`], returned to it when dropped.
pub(crate) struct ScratchBuffer<'a, A: Allocator + ?Sized> {
    buffer: Vec<u8>,
    allocator: &'a mut A,
}

impl<'a, A: Allocator + ?Sized> ScratchBuffer<'a, A> {
    /// Borrows `size` bytes from `allocator`, or `None` if it is exhausted.
    pub(crate) fn new(allocator: &'a mut A, size: usize) -> Option<Self> {
        let buffer = allocator.alloc(size)?;
        Some(Self { buffer, allocator })
    }

    pub(crate) fn as_mut_vec(&mut self) -> &mut Vec<u8> {
        &mut self.buffer
    }
}

impl<A: Allocator + ?Sized> Deref for ScratchBuffer<'_, A> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buffer
    }
}

impl<A: Allocator + ?Sized> DerefMut for ScratchBuffer<'_, A> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }
}

impl<A: Allocator + ?Sized> Drop for ScratchBuffer<'_, A> {
    fn drop(&mut self) {
        self.allocator.free(core::mem::take(&mut self.buffer));
    }
}

impl<A: Allocator + ?Sized> Debug for ScratchBuffer<'_, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScratchBuffer")
            .field("len", &self.buffer.len())
            .finish_non_exhaustive()
    }
}
