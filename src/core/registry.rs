//! Color Registry
//!
//! Stores the distinct colors seen during one conversion and gives each a
//! stable symbolic name. Names are `<prefix><index>` where the index is the
//! zero-based position of the color's first occurrence.
//!
//! Storage grows by doubling an explicit capacity. A name that would not fit
//! in the configured name length is a hard failure; names are never truncated
//! since two truncated names could collide.

use tracing::debug;

use super::Color;
use crate::error::{Error, Result};

/// Default prefix for generated color names
pub const DEFAULT_PREFIX: &str = "groffhl_";

/// Default maximum length of a generated name
pub const DEFAULT_MAX_NAME_LEN: usize = 15;

/// Default number of entry slots reserved on first insert
pub const DEFAULT_CAPACITY: usize = 256;

/// A registered color and its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    color: Color,
    name: String,
}

impl Entry {
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Insertion-ordered set of colors with generated names
#[derive(Debug)]
pub struct ColorRegistry {
    entries: Vec<Entry>,
    /// Logical capacity, doubled whenever `entries` is full
    capacity: usize,
    initial_capacity: usize,
    prefix: String,
    max_name_len: usize,
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_MAX_NAME_LEN, DEFAULT_CAPACITY)
    }
}

impl ColorRegistry {
    /// Create an empty registry
    pub fn new(prefix: impl Into<String>, max_name_len: usize, initial_capacity: usize) -> Self {
        let initial_capacity = initial_capacity.max(1);
        Self {
            entries: Vec::new(),
            capacity: initial_capacity,
            initial_capacity,
            prefix: prefix.into(),
            max_name_len,
        }
    }

    /// Return the name for `color`, registering it first if it is new
    pub fn lookup_or_insert(&mut self, color: Color) -> Result<&str> {
        if let Some(pos) = self.position(color) {
            return Ok(&self.entries[pos].name);
        }

        let index = self.entries.len();
        let name = self.render_name(index)?;

        if index >= self.capacity {
            self.grow()?;
        } else if self.entries.capacity() == index {
            self.reserve(self.capacity)?;
        }

        debug!(%color, %name, "registered color");
        self.entries.push(Entry { color, name });
        Ok(&self.entries[index].name)
    }

    /// Name of an already registered color
    pub fn lookup(&self, color: Color) -> Option<&str> {
        self.position(color).map(|pos| self.entries[pos].name.as_str())
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry and return to the initial capacity
    pub fn reset(&mut self) {
        self.entries = Vec::new();
        self.capacity = self.initial_capacity;
    }

    fn position(&self, color: Color) -> Option<usize> {
        self.entries.iter().position(|entry| entry.color == color)
    }

    fn render_name(&self, index: usize) -> Result<String> {
        let max_digits = self.max_name_len.saturating_sub(self.prefix.len());
        let digits = digit_count(index);
        if digits > max_digits {
            return Err(Error::NamingCapacityExceeded { index, max_digits });
        }
        Ok(format!("{}{}", self.prefix, index))
    }

    fn grow(&mut self) -> Result<()> {
        let requested = self
            .capacity
            .checked_mul(2)
            .ok_or(Error::AllocationFailure { requested: usize::MAX })?;
        self.reserve(requested)?;
        debug!(from = self.capacity, to = requested, "grew color registry");
        self.capacity = requested;
        Ok(())
    }

    /// Back `capacity` slots with storage
    fn reserve(&mut self, capacity: usize) -> Result<()> {
        self.entries
            .try_reserve_exact(capacity - self.entries.len())
            .map_err(|_| Error::AllocationFailure { requested: capacity })
    }
}

/// Number of decimal digits in `n`
fn digit_count(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
