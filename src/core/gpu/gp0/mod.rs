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

//! GP0 command decoder
//!
//! GP0 words arrive either one at a time through the command port or as a
//! contiguous buffer (the DMA path). The decoder has two modes:
//!
//! - [`Gp0Mode::Command`]: the first word's top byte is the opcode and a
//!   256-entry length table says how many words the command needs
//! - [`Gp0Mode::PixelTransfer`]: every word is two packed pixels for an
//!   active CPU→VRAM upload
//!
//! # Command Classes
//!
//! | Opcode    | Command                          |
//! |-----------|----------------------------------|
//! | 0x00-0x1F | NOP, cache clear, fill, IRQ      |
//! | 0x20-0x3F | Polygons                         |
//! | 0x40-0x5F | Lines and polylines              |
//! | 0x60-0x7F | Rectangles                       |
//! | 0x80-0x9F | VRAM→VRAM copy                   |
//! | 0xA0-0xBF | CPU→VRAM copy                    |
//! | 0xC0-0xDF | VRAM→CPU copy                    |
//! | 0xE1-0xE6 | Drawing environment              |
//!
//! Polylines (0x48-0x5F with bit 3 set) have no fixed length; they end at a
//! word matching `0x5000_5000` under mask `0xF000_F000`.

mod drawing_mode;
mod fill;
mod line;
mod polygon;
mod rectangle;
mod transfer;

use serde::{Deserialize, Serialize};

use super::cursor::TransferCursor;
use super::GPU;

/// Capacity of the direct-path command FIFO
pub(in crate::core::gpu) const FIFO_CAPACITY: usize = 16;

/// GP0 decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gp0Mode {
    /// Words are commands and their parameters
    Command,

    /// Words are pixel pairs for an active CPU→VRAM upload
    PixelTransfer(TransferCursor),
}

/// Scratch buffer for one command on the direct write path
#[derive(Debug, Clone)]
pub(in crate::core::gpu) struct CommandFifo {
    words: [u32; FIFO_CAPACITY],
    len: usize,
    expected: usize,

    /// The current polyline resumed after a full FIFO
    continued: bool,
}

impl CommandFifo {
    pub(in crate::core::gpu) fn new() -> Self {
        Self {
            words: [0; FIFO_CAPACITY],
            len: 0,
            expected: 0,
            continued: false,
        }
    }

    pub(in crate::core::gpu) fn clear(&mut self) {
        self.len = 0;
        self.expected = 0;
        self.continued = false;
    }

    pub(in crate::core::gpu) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(in crate::core::gpu) fn as_slice(&self) -> &[u32] {
        &self.words[..self.len]
    }

    fn push(&mut self, word: u32) {
        self.words[self.len] = word;
        self.len += 1;
    }

    fn opcode(&self) -> u8 {
        (self.words[0] >> 24) as u8
    }

    /// Whether the pending polyline resumed after a full FIFO
    pub(in crate::core::gpu) fn is_continued(&self) -> bool {
        self.continued
    }

    /// Rebuild a partially assembled command
    ///
    /// The expected length always comes from the opcode table, and a pending
    /// command is never complete, so at most `expected - 1` words are kept.
    pub(in crate::core::gpu) fn restore(&mut self, words: &[u32], continued: bool) {
        self.clear();

        let Some(&first) = words.first() else {
            return;
        };
        let opcode = (first >> 24) as u8;
        let expected = COMMAND_LENGTHS[opcode as usize];

        for &word in words.iter().take(expected - 1) {
            self.push(word);
        }
        if !self.is_empty() {
            self.expected = expected;
            self.continued = continued && is_polyline(opcode);
        }
    }
}

/// Number of words a GP0 command occupies, including the command word
///
/// Polylines report the FIFO capacity; they really end at a terminator.
///
/// # Examples
///
/// ```
/// use psrx_gpu::core::gpu::command_length;
///
/// assert_eq!(command_length(0x20), 4); // Flat triangle
/// assert_eq!(command_length(0x3C), 12); // Shaded textured quad
/// assert_eq!(command_length(0x60), 3); // Variable-size rectangle
/// assert_eq!(command_length(0xE1), 1);
/// ```
pub const fn command_length(opcode: u8) -> usize {
    match opcode {
        0x02 => 3,
        0x20..=0x3F => {
            let vertices = if opcode & 0x08 != 0 { 4 } else { 3 };
            let mut words = 1 + vertices;
            if opcode & 0x04 != 0 {
                words += vertices;
            }
            if opcode & 0x10 != 0 {
                words += vertices - 1;
            }
            words
        }
        0x40..=0x5F => {
            if is_polyline(opcode) {
                FIFO_CAPACITY
            } else if opcode & 0x10 != 0 {
                4
            } else {
                3
            }
        }
        0x60..=0x7F => {
            let mut words = 2;
            if opcode & 0x04 != 0 {
                words += 1;
            }
            if (opcode >> 3) & 3 == 0 {
                words += 1;
            }
            words
        }
        0x80..=0x9F => 4,
        0xA0..=0xDF => 3,
        _ => 1,
    }
}

/// Command lengths indexed by opcode
const COMMAND_LENGTHS: [usize; 256] = {
    let mut table = [1; 256];
    let mut opcode = 0;
    while opcode < 256 {
        table[opcode] = command_length(opcode as u8);
        opcode += 1;
    }
    table
};

/// Whether an opcode starts an open-ended polyline
#[inline(always)]
pub(in crate::core::gpu) const fn is_polyline(opcode: u8) -> bool {
    opcode >= 0x40 && opcode <= 0x5F && opcode & 0x08 != 0
}

/// Whether a word ends a polyline vertex list
///
/// # Examples
///
/// ```
/// use psrx_gpu::core::gpu::is_polyline_terminator;
///
/// assert!(is_polyline_terminator(0x5555_5555));
/// assert!(is_polyline_terminator(0x5000_5000));
/// assert!(!is_polyline_terminator(0x0050_0050));
/// ```
#[inline(always)]
pub const fn is_polyline_terminator(word: u32) -> bool {
    word & 0xF000_F000 == 0x5000_5000
}

/// Whether the word at `index` of a polyline may be a terminator
///
/// At least two vertices must precede it, and in shaded polylines it can
/// only take the place of a color word.
#[inline(always)]
fn terminator_slot(index: usize, shaded: bool, continued: bool) -> bool {
    let first = match (shaded, continued) {
        (_, true) => 2,
        (false, false) => 3,
        (true, false) => 4,
    };
    index >= first && (!shaded || index % 2 == 0)
}

impl GPU {
    /// Process GP0 command (drawing and VRAM commands)
    ///
    /// Commands are buffered until complete and then executed. While a
    /// CPU→VRAM upload is active each word is consumed as two pixels.
    ///
    /// # Arguments
    ///
    /// * `value` - 32-bit GP0 command word
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// // Fill 16×16 at (0, 0) with red
    /// gpu.write_gp0(0x0200_00FF);
    /// gpu.write_gp0(0x0000_0000);
    /// gpu.write_gp0(0x0010_0010);
    /// assert_eq!(gpu.read_vram(15, 15), 0x001F);
    /// ```
    pub fn write_gp0(&mut self, value: u32) {
        if matches!(self.gp0_mode, Gp0Mode::PixelTransfer(_)) {
            self.upload_word(value);
            return;
        }

        if self.fifo.is_empty() {
            self.fifo.expected = COMMAND_LENGTHS[(value >> 24) as usize];
            self.fifo.push(value);
        } else {
            let opcode = self.fifo.opcode();
            if is_polyline(opcode)
                && is_polyline_terminator(value)
                && terminator_slot(self.fifo.len, opcode & 0x10 != 0, self.fifo.continued)
            {
                self.dispatch_fifo();
                return;
            }
            self.fifo.push(value);
        }

        if self.fifo.len >= self.fifo.expected {
            if is_polyline(self.fifo.opcode()) {
                self.continue_polyline();
            } else {
                self.dispatch_fifo();
            }
        }
    }

    /// Process a buffer of GP0 words (DMA path)
    ///
    /// Equivalent to calling [`write_gp0`](Self::write_gp0) for every word,
    /// but complete commands are executed straight from the buffer and
    /// upload data is consumed in a tight loop.
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// gpu.write_gp0_buffer(&[
    ///     0xA000_0000, // CPU→VRAM
    ///     0x0000_0000, // at (0, 0)
    ///     0x0001_0002, // 2×1
    ///     0x7FFF_001F, // two pixels
    /// ]);
    /// assert_eq!(gpu.read_vram(0, 0), 0x001F);
    /// assert_eq!(gpu.read_vram(1, 0), 0x7FFF);
    /// ```
    pub fn write_gp0_buffer(&mut self, words: &[u32]) {
        let mut index = 0;

        while index < words.len() {
            if matches!(self.gp0_mode, Gp0Mode::PixelTransfer(_)) {
                while index < words.len() && matches!(self.gp0_mode, Gp0Mode::PixelTransfer(_)) {
                    self.upload_word(words[index]);
                    index += 1;
                }
                continue;
            }

            // A partially assembled command has to finish on the direct path
            if !self.fifo.is_empty() {
                self.write_gp0(words[index]);
                index += 1;
                continue;
            }

            let rest = &words[index..];
            let opcode = (rest[0] >> 24) as u8;

            let consumed = if is_polyline(opcode) {
                find_polyline_end(rest, opcode & 0x10 != 0).map(|end| {
                    self.execute_command(&rest[..end]);
                    end + 1
                })
            } else {
                let len = COMMAND_LENGTHS[opcode as usize];
                (len <= rest.len()).then(|| {
                    self.execute_command(&rest[..len]);
                    len
                })
            };

            match consumed {
                Some(count) => index += count,
                None => {
                    // Command continues past the end of this buffer
                    for &word in rest {
                        self.write_gp0(word);
                    }
                    return;
                }
            }
        }
    }

    /// Execute the FIFO contents and reset it
    fn dispatch_fifo(&mut self) {
        let fifo = self.fifo.clone();
        self.fifo.clear();
        self.execute_command(fifo.as_slice());
    }

    /// Draw a polyline whose vertices overflowed the FIFO and keep going
    ///
    /// The last vertex (and its color) seeds the FIFO so the strip stays
    /// connected.
    fn continue_polyline(&mut self) {
        let fifo = self.fifo.clone();
        self.execute_command(fifo.as_slice());

        let words = fifo.as_slice();
        let command = words[0] & 0xFF00_0000;
        let last_vertex = words[words.len() - 1];
        let last_color = if fifo.opcode() & 0x10 != 0 {
            words[words.len() - 2] & 0x00FF_FFFF
        } else {
            words[0] & 0x00FF_FFFF
        };

        self.fifo.clear();
        self.fifo.expected = FIFO_CAPACITY;
        self.fifo.continued = true;
        self.fifo.push(command | last_color);
        self.fifo.push(last_vertex);
    }

    /// Execute one complete command
    ///
    /// `words` holds exactly the command's words (for polylines: every
    /// word up to, not including, the terminator).
    pub(in crate::core::gpu) fn execute_command(&mut self, words: &[u32]) {
        let opcode = (words[0] >> 24) as u8;

        match opcode {
            0x00 => {}
            0x01 => self.gp0_clear_cache(),
            0x02 => self.gp0_fill_rectangle(words),
            0x03..=0x1E => {}
            0x1F => self.gp0_interrupt_request(),
            0x20..=0x3F => self.gp0_polygon(words),
            0x40..=0x5F => self.gp0_line(words),
            0x60..=0x7F => self.gp0_rectangle(words),
            0x80..=0x9F => self.gp0_vram_to_vram_transfer(words),
            0xA0..=0xBF => self.gp0_cpu_to_vram_transfer(words),
            0xC0..=0xDF => self.gp0_vram_to_cpu_transfer(words),
            0xE1 => self.gp0_draw_mode(words[0]),
            0xE2 => self.gp0_texture_window(words[0]),
            0xE3 => self.gp0_draw_area_top_left(words[0]),
            0xE4 => self.gp0_draw_area_bottom_right(words[0]),
            0xE5 => self.gp0_draw_offset(words[0]),
            0xE6 => self.gp0_mask_settings(words[0]),
            _ => {
                log::warn!(
                    "Unimplemented GP0 command: 0x{:02X} (word 0x{:08X})",
                    opcode,
                    words[0]
                );
            }
        }
    }
}

/// Length of a polyline at the start of `words`, excluding the terminator
fn find_polyline_end(words: &[u32], shaded: bool) -> Option<usize> {
    words
        .iter()
        .enumerate()
        .skip(1)
        .find(|&(index, &word)| is_polyline_terminator(word) && terminator_slot(index, shaded, false))
        .map(|(index, _)| index)
}
