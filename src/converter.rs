//! Stream Converter
//!
//! Turns one input unit into a groff document. Bytes go through the
//! recognizer; plain text is escaped and copied, color sequences become
//! `\m[NAME]`, resets become `\m[]`, and anything else is copied verbatim.
//!
//! The color declarations must precede the body, but they are only known
//! once the whole input has been read. The body is therefore assembled in
//! memory and the document is produced at end of input.
//!
//! # Output
//!
//! ```text
//! .defcolor groffhl_0 rgb 1.000000f 0.000000f 0.000000f
//!
//! A\m[groffhl_0]B\m[]C
//! ```

use std::fmt;
use std::io::{self, BufReader, Read, Write};

use tracing::{debug, warn};

use crate::app::Config;
use crate::core::{Color, ColorRegistry, OutputBuffer};
use crate::error::Result;
use crate::parser::{Action, Recognizer, Sequence};

/// Replacement for a backslash in plain text
pub const BACKSLASH_ESCAPE: &[u8] = b"\\e";

/// Emitted for a plain reset sequence
pub const RESET_TOKEN: &[u8] = b"\\m[]";

const COLOR_OPEN: &[u8] = b"\\m[";
const COLOR_CLOSE: &[u8] = b"]";

/// A `.defcolor` request for one registered color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub color: Color,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".defcolor {} rgb {}", self.name, self.color.groff_rgb())
    }
}

/// A converted input unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// One entry per distinct color, in first-seen order
    pub declarations: Vec<Declaration>,
    /// The converted text
    pub body: Vec<u8>,
}

impl Document {
    /// Write the header, a blank line, then the body
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for declaration in &self.declarations {
            writeln!(writer, "{}", declaration)?;
        }
        writer.write_all(b"\n")?;
        writer.write_all(&self.body)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// The rendered document as bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.body.len() + 64 * self.declarations.len() + 2);
        for declaration in &self.declarations {
            out.extend_from_slice(declaration.to_string().as_bytes());
            out.push(b'\n');
        }
        out.push(b'\n');
        out.extend_from_slice(&self.body);
        out.push(b'\n');
        out
    }
}

/// Converts input units one at a time
#[derive(Debug)]
pub struct Converter {
    recognizer: Recognizer,
    registry: ColorRegistry,
    output: OutputBuffer,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Converter {
    pub fn new(config: &Config) -> Self {
        Self {
            recognizer: Recognizer::new(config.max_sequence_len),
            registry: ColorRegistry::new(
                config.name_prefix.clone(),
                config.max_name_len,
                config.initial_registry_capacity,
            ),
            output: OutputBuffer::with_capacity(config.initial_buffer_capacity),
        }
    }

    /// Convert everything `reader` yields until end of stream.
    ///
    /// State from earlier calls never leaks into this one. On error nothing
    /// of the partial conversion is returned.
    pub fn convert<R: Read>(&mut self, reader: R) -> Result<Document> {
        self.reset();
        match self.run(reader) {
            Ok(()) => Ok(self.finish()),
            Err(e) => {
                self.reset();
                Err(e)
            },
        }
    }

    /// Convert an in-memory input
    pub fn convert_bytes(&mut self, input: &[u8]) -> Result<Document> {
        self.convert(input)
    }

    fn run<R: Read>(&mut self, reader: R) -> Result<()> {
        for byte in BufReader::new(reader).bytes() {
            if let Some(action) = self.recognizer.advance(byte?)? {
                self.apply(action)?;
            }
        }

        if self.recognizer.in_sequence() {
            warn!(
                pending = ?self.recognizer.pending(),
                "input ended inside an escape sequence, discarding it"
            );
        }
        Ok(())
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Text(b'\\') => self.output.extend_from_slice(BACKSLASH_ESCAPE),
            Action::Text(byte) => self.output.push(byte),
            Action::Sequence(Sequence::Reset) => self.output.extend_from_slice(RESET_TOKEN),
            Action::Sequence(Sequence::Unrecognized(raw)) => {
                debug!(?raw, "passing through unrecognized sequence");
                self.output.extend_from_slice(&raw)
            },
            Action::Sequence(Sequence::Color(color)) => {
                let name = self.registry.lookup_or_insert(color)?;
                let len = COLOR_OPEN.len() + name.len() + COLOR_CLOSE.len();
                self.output.ensure_capacity(self.output.len() + len)?;
                self.output.extend_from_slice(COLOR_OPEN)?;
                self.output.extend_from_slice(name.as_bytes())?;
                self.output.extend_from_slice(COLOR_CLOSE)
            },
        }
    }

    fn finish(&mut self) -> Document {
        let declarations = self
            .registry
            .iter()
            .map(|entry| Declaration {
                name: entry.name().to_string(),
                color: entry.color(),
            })
            .collect();
        let body = self.output.take();
        self.reset();

        Document { declarations, body }
    }

    fn reset(&mut self) {
        self.recognizer.reset();
        self.registry.reset();
        self.output.reset();
    }
}
