//! groffhl Library
//!
//! Converts text containing ANSI 24-bit color escape sequences into groff
//! input. Each distinct color is declared once with `.defcolor` at the top
//! of the document and referenced by name with `\m[NAME]` in the body:
//!
//! - `core`: Color values, color registry, growable output buffer
//! - `parser`: Escape sequence recognizer
//! - `converter`: Single-pass conversion of one input unit
//! - `driver`: Sequential conversion of several inputs
//! - `app`: Configuration

pub mod app;
pub mod converter;
pub mod core;
pub mod driver;
pub mod error;
pub mod parser;

pub use converter::{Converter, Declaration, Document};
pub use error::{Error, Result};
