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

//! GP1 control commands
//!
//! | Opcode    | Command                       |
//! |-----------|-------------------------------|
//! | 0x00      | Reset GPU                     |
//! | 0x01      | Reset command buffer          |
//! | 0x02      | Acknowledge interrupt         |
//! | 0x03      | Display enable                |
//! | 0x04      | DMA direction                 |
//! | 0x05      | Start of display area         |
//! | 0x06      | Horizontal display range      |
//! | 0x07      | Vertical display range        |
//! | 0x08      | Display mode                  |
//! | 0x09      | Allow texture disable         |
//! | 0x10-0x1F | Get GPU info                  |
//!
//! Other opcodes are ignored.

mod control;
mod display;

use super::GPU;

impl GPU {
    /// Process GP1 command (control commands)
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// gpu.write_gp1(0x0300_0000); // Enable display
    /// assert_eq!(gpu.status() & (1 << 23), 0);
    /// ```
    pub fn write_gp1(&mut self, value: u32) {
        let command = (value >> 24) & 0xFF;

        match command {
            0x00 => self.gp1_reset_gpu(),
            0x01 => self.gp1_reset_command_buffer(),
            0x02 => self.gp1_acknowledge_interrupt(),
            0x03 => self.gp1_display_enable(value),
            0x04 => self.gp1_dma_direction(value),
            0x05 => self.gp1_display_area_start(value),
            0x06 => self.gp1_horizontal_display_range(value),
            0x07 => self.gp1_vertical_display_range(value),
            0x08 => self.gp1_display_mode(value),
            0x09 => self.gp1_allow_texture_disable(value),
            0x10..=0x1F => self.gp1_get_gpu_info(value),
            _ => {
                log::trace!("Ignoring GP1 command: 0x{:02X}", command);
            }
        }
    }
}
