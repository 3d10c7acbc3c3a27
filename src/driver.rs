//! Input driver
//!
//! Runs one conversion per input, strictly in order, and writes each
//! document as soon as its input has been fully converted.
//!
//! - An input that cannot be opened is reported and skipped.
//! - A fatal conversion error is reported, nothing is written for that
//!   input, and the remaining inputs are not processed.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{debug, info};

use crate::app::Config;
use crate::converter::Converter;

/// Where a unit of input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    Path(PathBuf),
}

impl Input {
    /// Inputs for the given file arguments; stdin when there are none
    pub fn from_args(files: &[PathBuf]) -> Vec<Input> {
        if files.is_empty() {
            vec![Input::Stdin]
        } else {
            files.iter().cloned().map(Input::Path).collect()
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => write!(f, "<stdin>"),
            Input::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every input was converted
    Success,
    /// Some inputs could not be opened; the others were converted
    InputsSkipped,
    /// A conversion failed and the run was aborted
    Fatal,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::InputsSkipped => 1,
            ExitStatus::Fatal => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Counts of what happened during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub converted: usize,
    pub skipped: Vec<PathBuf>,
    pub failed: Option<String>,
}

impl RunSummary {
    pub fn status(&self) -> ExitStatus {
        if self.failed.is_some() {
            ExitStatus::Fatal
        } else if !self.skipped.is_empty() {
            ExitStatus::InputsSkipped
        } else {
            ExitStatus::Success
        }
    }
}

/// Convert every input, writing documents to `out` and diagnostics to `err`
pub fn run<W: Write, E: Write>(
    inputs: &[Input],
    config: &Config,
    mut out: W,
    mut err: E,
) -> RunSummary {
    let mut converter = Converter::new(config);
    let mut summary = RunSummary::default();

    for input in inputs {
        info!(%input, "converting");

        let result = match input {
            Input::Stdin => converter.convert(io::stdin().lock()),
            Input::Path(path) => match File::open(path) {
                Ok(file) => converter.convert(file),
                Err(e) => {
                    let _ = writeln!(
                        err,
                        "groffhl: failed to open file \"{}\": {}",
                        path.display(),
                        e
                    );
                    summary.skipped.push(path.clone());
                    continue;
                },
            },
        };

        let document = match result {
            Ok(document) => document,
            Err(e) => {
                let _ = writeln!(err, "groffhl: {}: {}", input, e);
                summary.failed = Some(e.to_string());
                return summary;
            },
        };

        debug!(
            %input,
            colors = document.declarations.len(),
            bytes = document.body.len(),
            "converted"
        );
        if let Err(e) = document.write_to(&mut out).and_then(|()| out.flush()) {
            let _ = writeln!(err, "groffhl: write error: {}", e);
            summary.failed = Some(e.to_string());
            return summary;
        }
        summary.converted += 1;
    }

    summary
}
