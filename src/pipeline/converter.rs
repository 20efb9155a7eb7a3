//! External Markdown-to-help converter.
//!
//! The program reads Markdown on stdin and writes help text on stdout.
//! Failures are reported as `BundleError::Converter`; the docs stage treats
//! them as a signal to fall back to the built-in help renderer.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::config::ConverterConfig;
use crate::types::{BundleError, Result};

#[derive(Debug, Clone)]
pub struct ExternalConverter {
    program: String,
    args: Vec<String>,
}

impl ExternalConverter {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// `None` when the converter is disabled
    pub fn from_config(config: &ConverterConfig) -> Option<Self> {
        config.enabled.then(|| Self {
            program: config.program.clone(),
            args: config.args.clone(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn convert(&self, markdown: &str) -> Result<String> {
        debug!("Running {} {}", self.program, self.args.join(" "));

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                BundleError::Converter(format!("Failed to spawn {}: {}", self.program, e))
            })?;

        // Fed from a separate thread so a converter that streams output
        // before draining stdin cannot fill both pipes.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = markdown.to_string();
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output().map_err(|e| {
            BundleError::Converter(format!("{} did not complete: {}", self.program, e))
        })?;

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => debug!("{} closed stdin early: {}", self.program, e),
                Err(_) => {
                    return Err(BundleError::Converter(format!(
                        "Input writer for {} panicked",
                        self.program
                    )));
                }
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BundleError::Converter(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        if text.trim().is_empty() {
            return Err(BundleError::Converter(format!(
                "{} produced no output",
                self.program
            )));
        }
        Ok(text)
    }
}
