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

//! GP0 VRAM transfer commands
//!
//! Implements CPU↔VRAM and VRAM↔VRAM transfer operations.

use super::super::cursor::{decode_position, decode_size, TransferCursor};
use super::super::GPU;
use super::Gp0Mode;

impl GPU {
    /// GP0(0xA0): CPU→VRAM Transfer
    ///
    /// Initiates a transfer from CPU to VRAM. The transfer requires 3 command words:
    /// - Word 0: Command (0xA0000000)
    /// - Word 1: Destination coordinates (X in bits 0-9, Y in bits 16-24)
    /// - Word 2: Size (width in bits 0-15, height in bits 16-31, 0 = maximum)
    ///
    /// After this command, subsequent GP0 writes are treated as VRAM data.
    pub(in crate::core::gpu) fn gp0_cpu_to_vram_transfer(&mut self, words: &[u32]) {
        let cursor = TransferCursor::from_command(words[1], words[2]);

        log::debug!(
            "CPU→VRAM transfer: ({}, {}) size {}×{}",
            cursor.x,
            cursor.y,
            cursor.width,
            cursor.height
        );

        self.gp0_mode = Gp0Mode::PixelTransfer(cursor);
    }

    /// Consume one word of CPU→VRAM data
    ///
    /// Each word contains two 16-bit pixels, low half first. Pixels get the
    /// set-mask bit OR'd in and are skipped when the check-mask rule
    /// protects the destination.
    ///
    /// The transfer ends as soon as its last pixel is written, even after
    /// the first half of a word; the second half is then discarded.
    pub(in crate::core::gpu) fn upload_word(&mut self, value: u32) {
        let Gp0Mode::PixelTransfer(cursor) = &mut self.gp0_mode else {
            return;
        };

        let mask = self.regs.mask;
        let mut complete = false;

        for pixel in [value as u16, (value >> 16) as u16] {
            let (x, y) = cursor.position();
            if mask.can_write(self.vram.read(x, y)) {
                self.vram.write(x, y, pixel | mask.or_bits());
            }

            if cursor.advance() {
                complete = true;
                break;
            }
        }

        if complete {
            self.gp0_mode = Gp0Mode::Command;
            log::debug!("CPU→VRAM transfer complete");
        }
    }

    /// GP0(0xC0): VRAM→CPU Transfer
    ///
    /// Initiates a transfer from VRAM to CPU. The transfer requires 3 command words:
    /// - Word 0: Command (0xC0000000)
    /// - Word 1: Source coordinates (X in bits 0-9, Y in bits 16-24)
    /// - Word 2: Size (width in bits 0-15, height in bits 16-31, 0 = maximum)
    ///
    /// After this command, the CPU can read pixel data via GPUREAD. The
    /// decoder stays in command mode.
    pub(in crate::core::gpu) fn gp0_vram_to_cpu_transfer(&mut self, words: &[u32]) {
        let cursor = TransferCursor::from_command(words[1], words[2]);

        log::debug!(
            "VRAM→CPU transfer: ({}, {}) size {}×{}",
            cursor.x,
            cursor.y,
            cursor.width,
            cursor.height
        );

        self.readback = Some(cursor);
    }

    /// GP0(0x80): VRAM→VRAM Transfer
    ///
    /// Copies a rectangle within VRAM. The transfer requires 4 command words:
    /// - Word 0: Command (0x80000000)
    /// - Word 1: Source coordinates (X in bits 0-9, Y in bits 16-24)
    /// - Word 2: Destination coordinates (X in bits 0-9, Y in bits 16-24)
    /// - Word 3: Size (width in bits 0-15, height in bits 16-31, 0 = maximum)
    ///
    /// Source and destination wrap at the VRAM edges. Each source row is
    /// buffered before it is written, the check-mask rule applies to the
    /// destination and the set-mask bit is OR'd into every copied pixel.
    pub(in crate::core::gpu) fn gp0_vram_to_vram_transfer(&mut self, words: &[u32]) {
        let (src_x, src_y) = decode_position(words[1]);
        let (dst_x, dst_y) = decode_position(words[2]);
        let (width, height) = decode_size(words[3]);

        log::debug!(
            "VRAM→VRAM transfer: ({}, {}) → ({}, {}) size {}×{}",
            src_x,
            src_y,
            dst_x,
            dst_y,
            width,
            height
        );

        let mask = self.regs.mask;
        let mut row = vec![0u16; width as usize];

        for y in 0..height {
            let sy = src_y.wrapping_add(y);
            let dy = dst_y.wrapping_add(y);

            for (x, pixel) in (0..width).zip(row.iter_mut()) {
                *pixel = self.vram.read(src_x.wrapping_add(x), sy);
            }

            for (x, &pixel) in (0..width).zip(row.iter()) {
                let dx = dst_x.wrapping_add(x);
                if mask.can_write(self.vram.read(dx, dy)) {
                    self.vram.write(dx, dy, pixel | mask.or_bits());
                }
            }
        }
    }
}
