// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command stream replay
//!
//! A command stream is a recorded sequence of GPU port writes. Two
//! encodings are supported:
//!
//! - **Hex text**: one 32-bit word per line, optionally prefixed with the
//!   port (`gp0:` or `gp1:`, default GP0). `#` starts a comment; blank lines
//!   are ignored.
//! - **Binary**: little-endian GP0 words, nothing else.
//!
//! ```text
//! # Red 16×16 fill, then enable the display
//! 020000FF
//! 00000000
//! 00100010
//! gp1: 03000000
//! ```
//!
//! Replay submits runs of consecutive GP0 words through the buffer (DMA)
//! path, or word by word through the command port in direct mode.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{EmulatorError, Result};
use crate::core::GPU;

/// Command stream encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StreamFormat {
    /// One hex word per line
    Hex,

    /// Little-endian GP0 words
    Binary,
}

/// GPU port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    /// Drawing and data commands
    Gp0,

    /// Control commands
    Gp1,
}

/// One recorded port write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortWrite {
    pub port: Port,
    pub word: u32,
}

/// Counts reported after a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Words written to GP0
    pub gp0_words: usize,

    /// Words written to GP1
    pub gp1_words: usize,

    /// GP0 runs submitted through the buffer path
    pub batches: usize,
}

/// A parsed command stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandStream {
    writes: Vec<PortWrite>,
}

impl CommandStream {
    /// Parse the hex text encoding
    ///
    /// # Errors
    ///
    /// Returns [`EmulatorError::InvalidStream`] naming the first line that
    /// is not a valid word.
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::replay::{CommandStream, Port};
    ///
    /// let stream = CommandStream::parse_hex("gp1: 0x08000001\nE1000200 # dither\n").unwrap();
    /// assert_eq!(stream.writes()[0].port, Port::Gp1);
    /// assert_eq!(stream.writes()[1].word, 0xE100_0200);
    /// ```
    pub fn parse_hex(text: &str) -> Result<Self> {
        let mut writes = Vec::new();

        for (number, line) in text.lines().enumerate() {
            let line = match line.find('#') {
                Some(comment) => &line[..comment],
                None => line,
            }
            .trim();
            if line.is_empty() {
                continue;
            }

            let (port, value) = split_port(line);
            let word = parse_word(value).ok_or_else(|| EmulatorError::InvalidStream {
                line: number + 1,
                reason: format!("'{}' is not a 32-bit hex word", value),
            })?;

            writes.push(PortWrite { port, word });
        }

        Ok(Self { writes })
    }

    /// Decode the binary encoding
    ///
    /// # Errors
    ///
    /// Returns [`EmulatorError::Parse`] if the length is not a multiple of 4.
    pub fn from_binary(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 4 != 0 {
            return Err(EmulatorError::Parse(format!(
                "binary stream length {} is not a multiple of 4",
                bytes.len()
            )));
        }

        let writes = bytes
            .chunks_exact(4)
            .map(|chunk| PortWrite {
                port: Port::Gp0,
                word: u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
            })
            .collect();

        Ok(Self { writes })
    }

    /// Load a stream file in the given encoding
    pub fn load<P: AsRef<Path>>(path: P, format: StreamFormat) -> Result<Self> {
        let path = path.as_ref();
        let stream = match format {
            StreamFormat::Hex => Self::parse_hex(&std::fs::read_to_string(path)?)?,
            StreamFormat::Binary => Self::from_binary(&std::fs::read(path)?)?,
        };

        log::info!(
            "Loaded {} port writes from {}",
            stream.writes.len(),
            path.display()
        );
        Ok(stream)
    }

    /// Recorded writes in order
    pub fn writes(&self) -> &[PortWrite] {
        &self.writes
    }

    /// Number of recorded writes
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Whether the stream has no writes
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Replay every write into `gpu`
    ///
    /// With `direct` set every GP0 word goes through
    /// [`GPU::write_gp0`]; otherwise each run of GP0 words between GP1
    /// writes is handed to [`GPU::write_gp0_buffer`]. Both produce the same
    /// VRAM and register state.
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::GPU;
    /// use psrx_gpu::replay::CommandStream;
    ///
    /// let stream = CommandStream::parse_hex("020000FF\n00000000\n00100010\n").unwrap();
    /// let mut gpu = GPU::new();
    /// let stats = stream.replay(&mut gpu, false);
    /// assert_eq!(stats.gp0_words, 3);
    /// assert_eq!(gpu.read_vram(0, 0), 0x001F);
    /// ```
    pub fn replay(&self, gpu: &mut GPU, direct: bool) -> ReplayStats {
        let mut stats = ReplayStats::default();
        let mut batch: Vec<u32> = Vec::new();

        for write in &self.writes {
            match write.port {
                Port::Gp0 => {
                    stats.gp0_words += 1;
                    if direct {
                        gpu.write_gp0(write.word);
                    } else {
                        batch.push(write.word);
                    }
                }
                Port::Gp1 => {
                    flush(gpu, &mut batch, &mut stats);
                    stats.gp1_words += 1;
                    gpu.write_gp1(write.word);
                }
            }
        }
        flush(gpu, &mut batch, &mut stats);

        log::debug!(
            "Replayed {} GP0 words ({} batches) and {} GP1 words",
            stats.gp0_words,
            stats.batches,
            stats.gp1_words
        );
        stats
    }
}

/// Submit a pending GP0 run through the buffer path
fn flush(gpu: &mut GPU, batch: &mut Vec<u32>, stats: &mut ReplayStats) {
    if batch.is_empty() {
        return;
    }
    gpu.write_gp0_buffer(batch);
    stats.batches += 1;
    batch.clear();
}

/// Split an optional `gp0:`/`gp1:` prefix off a line
fn split_port(line: &str) -> (Port, &str) {
    match line.split_once(':') {
        Some((prefix, rest)) if prefix.trim().eq_ignore_ascii_case("gp1") => {
            (Port::Gp1, rest.trim())
        }
        Some((prefix, rest)) if prefix.trim().eq_ignore_ascii_case("gp0") => {
            (Port::Gp0, rest.trim())
        }
        _ => (Port::Gp0, line),
    }
}

/// Parse a hex word with optional `0x` prefix and `_` separators
fn parse_word(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() || digits.len() > 8 {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word() {
        assert_eq!(parse_word("E1000200"), Some(0xE100_0200));
        assert_eq!(parse_word("0x0000_00ff"), Some(0xFF));
        assert_eq!(parse_word("123456789"), None);
        assert_eq!(parse_word("xyz"), None);
        assert_eq!(parse_word(""), None);
    }

    #[test]
    fn test_split_port() {
        assert_eq!(split_port("gp1: 03000000"), (Port::Gp1, "03000000"));
        assert_eq!(split_port("GP0:E1000000"), (Port::Gp0, "E1000000"));
        assert_eq!(split_port("E1000000"), (Port::Gp0, "E1000000"));
    }

    #[test]
    fn test_parse_hex_reports_line() {
        let err = CommandStream::parse_hex("# header\n\nE1000000\nnot-a-word\n").unwrap_err();
        match err {
            EmulatorError::InvalidStream { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_binary_stream() {
        let stream = CommandStream::from_binary(&[0x00, 0x02, 0x00, 0xE1, 0xFF, 0, 0, 0x02]).unwrap();
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.writes()[0].word, 0xE100_0200);
        assert_eq!(stream.writes()[1].word, 0x0200_00FF);

        assert!(CommandStream::from_binary(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_gp1_splits_batches() {
        let stream = CommandStream::parse_hex(
            "E1000200\ngp1: 08000001\n020000FF\n00000000\n00100010\n",
        )
        .unwrap();

        let mut gpu = GPU::new();
        let stats = stream.replay(&mut gpu, false);
        assert_eq!(
            stats,
            ReplayStats {
                gp0_words: 4,
                gp1_words: 1,
                batches: 2
            }
        );
        assert_eq!(gpu.display_resolution(), (320, 240));
        assert_eq!(gpu.read_vram(8, 8), 0x001F);
    }

    #[test]
    fn test_direct_and_buffered_agree() {
        let stream = CommandStream::parse_hex(
            "# shaded triangle then a polyline\n\
             300000FF\n00000000\n0000FF00\n00000040\n00FF0000\n00400000\n\
             48FFFFFF\n00500050\n00500080\n00800080\n55555555\n",
        )
        .unwrap();

        let mut direct = GPU::new();
        let mut buffered = GPU::new();
        stream.replay(&mut direct, true);
        stream.replay(&mut buffered, false);

        assert_eq!(direct.vram().as_native(), buffered.vram().as_native());
        assert_ne!(direct.read_vram(0x60, 0x50), 0);
    }
}
