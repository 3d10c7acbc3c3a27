//! Conversion Core Module
//!
//! State owned by a single conversion. This module contains:
//! - Color values read from escape sequences
//! - The color registry that names each distinct color
//! - The growable buffer the converted body is assembled in
//!
//! Nothing here is shared between conversions: every input unit gets its
//! own registry and buffer.

mod buffer;
mod color;
mod registry;

pub use buffer::OutputBuffer;
pub use color::Color;
pub use registry::{ColorRegistry, Entry};

pub mod defaults {
    //! Default limits and capacities
    pub use super::buffer::DEFAULT_CAPACITY as BUFFER_CAPACITY;
    pub use super::registry::{
        DEFAULT_CAPACITY as REGISTRY_CAPACITY, DEFAULT_MAX_NAME_LEN as MAX_NAME_LEN,
        DEFAULT_PREFIX as NAME_PREFIX,
    };
}
