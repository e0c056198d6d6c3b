//! Wire serialization of composed status lines for the bar host.
//!
//! Two formats are supported:
//!
//! - [`OutputMode::Plain`]: one newline-terminated line per tick.
//! - [`OutputMode::I3bar`]: the i3bar/swaybar streaming protocol. A
//!   `{"version":1}` header line, a single `[`, then one single-block array per
//!   tick followed by `,`. The outer array is never closed; the host parses it
//!   element by element.
//!
//! Every write is flushed immediately.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::ui::markup::PANGO;

/// Output format selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Plain,
    I3bar,
}

/// Streaming protocol progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolState {
    /// Nothing written yet
    Uninitialized,
    /// Header line written, outer array not yet opened
    HeaderSent,
    /// `[` written; every further element is appended with a trailing comma
    Streaming,
}

#[derive(Serialize)]
struct Header {
    version: u32,
}

/// One i3bar block. Field order is part of the wire format.
#[derive(Serialize)]
struct Block<'a> {
    separator: bool,
    full_text: &'a str,
    markup: &'a str,
}

/// Append-only writer for the bar host's stream
pub struct WireEmitter<W: Write> {
    out: W,
    mode: OutputMode,
    state: ProtocolState,
}

impl<W: Write> WireEmitter<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self {
            out,
            mode,
            state: ProtocolState::Uninitialized,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    /// Write the protocol header if the mode has one. Idempotent.
    pub fn begin(&mut self) -> Result<()> {
        if self.mode == OutputMode::I3bar && self.state == ProtocolState::Uninitialized {
            serde_json::to_writer(&mut self.out, &Header { version: 1 })?;
            self.out.write_all(b"\n")?;
            self.out.flush()?;
            log::debug!("i3bar protocol header sent");
        }
        self.state = match self.state {
            ProtocolState::Uninitialized => ProtocolState::HeaderSent,
            other => other,
        };
        Ok(())
    }

    /// Write one composed line and flush it.
    pub fn emit(&mut self, line: &str) -> Result<()> {
        match self.mode {
            OutputMode::Plain => {
                self.state = ProtocolState::Streaming;
                self.out.write_all(line.as_bytes())?;
                self.out.write_all(b"\n")?;
            }
            OutputMode::I3bar => {
                if self.state == ProtocolState::Uninitialized {
                    self.begin()?;
                }
                if self.state == ProtocolState::HeaderSent {
                    self.out.write_all(b"[")?;
                    self.state = ProtocolState::Streaming;
                }

                let block = Block {
                    separator: false,
                    full_text: line,
                    markup: PANGO,
                };
                serde_json::to_writer(&mut self.out, &[block])?;
                self.out.write_all(b",")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
