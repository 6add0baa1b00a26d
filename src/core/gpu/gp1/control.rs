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
//! Implements GPU control operations including reset, interrupt, DMA and
//! info queries.

use super::super::gp0::Gp0Mode;
use super::super::registers::DmaDirection;
use super::super::GPU;

impl GPU {
    /// GP1(0x00): Reset GPU
    ///
    /// Resets the command buffer, acknowledges the interrupt, disables the
    /// display, turns DMA off, and restores the default display start,
    /// display ranges, display mode and drawing environment.
    /// VRAM contents are preserved.
    ///
    /// The "display enable" step is GP1(0x03) with parameter 1, which turns
    /// the display off, so GPUSTAT bit 23 reads 1 afterwards.
    pub(in crate::core::gpu) fn gp1_reset_gpu(&mut self) {
        self.reset_state_preserving_vram();
        log::debug!("GPU reset");
    }

    /// GP1(0x01): Reset Command Buffer
    ///
    /// Clears the GP0 command FIFO and cancels an active CPU→VRAM upload.
    pub(in crate::core::gpu) fn gp1_reset_command_buffer(&mut self) {
        self.fifo.clear();

        if matches!(self.gp0_mode, Gp0Mode::PixelTransfer(_)) {
            log::debug!("CPU→VRAM transfer cancelled");
        }
        self.gp0_mode = Gp0Mode::Command;

        log::debug!("Command buffer reset");
    }

    /// GP1(0x02): Acknowledge GPU Interrupt
    ///
    /// Clears the interrupt request flag raised by GP0(0x1F).
    pub(in crate::core::gpu) fn gp1_acknowledge_interrupt(&mut self) {
        self.regs.interrupt_request = false;
        log::debug!("GPU interrupt acknowledged");
    }

    /// GP1(0x04): DMA Direction
    ///
    /// Sets the DMA transfer direction/mode. The DMA request status bit
    /// follows the direction: 0 = always 0, 1 = FIFO state, 2 = ready to
    /// receive a DMA block, 3 = ready to send VRAM to CPU.
    ///
    /// # Arguments
    ///
    /// * `value` - Bits 0-1: Direction (0=Off, 1=FIFO, 2=CPUtoGP0, 3=GPUREADtoCPU)
    pub(in crate::core::gpu) fn gp1_dma_direction(&mut self, value: u32) {
        let direction = DmaDirection::from_bits(value);
        self.regs.dma_direction = direction;

        log::debug!("DMA direction: {:?}", direction);
    }

    /// GP1(0x09): Allow Texture Disable
    ///
    /// Bit 0 permits GP0(E1h) bit 11 to switch texturing off.
    pub(in crate::core::gpu) fn gp1_allow_texture_disable(&mut self, value: u32) {
        self.regs.texture_disable_allowed = value & 1 != 0;
        log::debug!(
            "Texture disable allowed: {}",
            self.regs.texture_disable_allowed
        );
    }

    /// GP1(0x10-0x1F): GPU Info
    ///
    /// Latches a value that the next GPUREAD returns (when no VRAM→CPU
    /// transfer is active).
    ///
    /// # Arguments
    ///
    /// * `value` - Bits 0-3: Info type
    ///   - 0x02: Texture window settings
    ///   - 0x03: Draw area top left
    ///   - 0x04: Draw area bottom right
    ///   - 0x05: Draw offset
    ///   - 0x07: GPU version (2)
    ///   - 0x08: Always 0
    ///   - Others: latched value unchanged
    ///
    /// # Examples
    ///
    /// ```
    /// # use psrx_gpu::core::GPU;
    /// let mut gpu = GPU::new();
    /// gpu.write_gp1(0x1000_0007);
    /// assert_eq!(gpu.read_gpuread(), 2);
    /// ```
    pub(in crate::core::gpu) fn gp1_get_gpu_info(&mut self, value: u32) {
        let info_type = value & 0x0F;

        let info = match info_type {
            0x02 => Some(self.regs.texture_window.to_bits()),
            0x03 => Some(self.regs.draw_area.top_left_bits()),
            0x04 => Some(self.regs.draw_area.bottom_right_bits()),
            0x05 => Some(self.regs.draw_offset.to_bits()),
            0x07 => Some(GPU::GPU_VERSION),
            0x08 => Some(0),
            _ => None,
        };

        if let Some(info) = info {
            self.gpuread = info;
        }

        log::debug!("GPU info request: type {} → 0x{:08X}", info_type, self.gpuread);
    }
}
