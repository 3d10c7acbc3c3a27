//! Growable output buffer
//!
//! Accumulates the converted body of one input unit. Capacity is tracked
//! explicitly and only ever doubles, so growth stays exponential no matter
//! what the allocator would pick on its own. Storage for the logical
//! capacity is reserved on first use, so an oversized capacity surfaces as
//! an allocation error rather than an abort.

use tracing::debug;

use crate::error::{Error, Result};

/// Default initial capacity in bytes
pub const DEFAULT_CAPACITY: usize = 4096;

/// Byte buffer with a doubling growth policy
#[derive(Debug)]
pub struct OutputBuffer {
    data: Vec<u8>,
    capacity: usize,
    initial_capacity: usize,
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl OutputBuffer {
    /// Create an empty buffer
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: Vec::new(),
            capacity,
            initial_capacity: capacity,
        }
    }

    /// Make room for `required` bytes in total, doubling as needed.
    ///
    /// Existing content is preserved. Fails without touching the content if
    /// the backing store cannot be resized.
    pub fn ensure_capacity(&mut self, required: usize) -> Result<()> {
        let mut target = self.capacity;
        while target < required {
            target = target
                .checked_mul(2)
                .ok_or(Error::AllocationFailure { requested: required })?;
        }

        if self.data.capacity() < target {
            self.data
                .try_reserve_exact(target - self.data.len())
                .map_err(|_| Error::AllocationFailure { requested: target })?;
        }
        if target > self.capacity {
            debug!(from = self.capacity, to = target, "grew output buffer");
            self.capacity = target;
        }
        Ok(())
    }

    /// Append a single byte
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.ensure_capacity(self.data.len() + 1)?;
        self.data.push(byte);
        Ok(())
    }

    /// Append a run of bytes
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_capacity(self.data.len() + bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take the accumulated bytes, leaving the buffer empty at its initial capacity
    pub fn take(&mut self) -> Vec<u8> {
        self.capacity = self.initial_capacity;
        std::mem::take(&mut self.data)
    }

    /// Discard content and return to the initial capacity
    pub fn reset(&mut self) {
        self.data = Vec::new();
        self.capacity = self.initial_capacity;
    }
}
