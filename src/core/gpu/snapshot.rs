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

//! Capture and restore of [`GpuState`]

use super::vram::Framebuffer;
use super::GPU;
use crate::core::error::GpuError;
use crate::core::save_state::{GpuState, SaveStateMetadata, SAVE_STATE_VERSION};

impl GPU {
    /// Capture the complete GPU state
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::GPU;
    ///
    /// let mut gpu = GPU::new();
    /// gpu.write_vram(3, 4, 0x1234);
    ///
    /// let state = gpu.snapshot();
    /// let mut other = GPU::new();
    /// other.restore(&state).unwrap();
    /// assert_eq!(other.read_vram(3, 4), 0x1234);
    /// ```
    pub fn snapshot(&self) -> GpuState {
        GpuState {
            version: SAVE_STATE_VERSION,
            metadata: SaveStateMetadata::now(self.timing.frames()),
            vram: self.vram.as_native().to_vec(),
            registers: self.regs,
            gp0_mode: self.gp0_mode,
            fifo: self.fifo.as_slice().to_vec(),
            fifo_continued: self.fifo.is_continued(),
            readback: self.readback,
            gpuread: self.gpuread,
            timing: self.timing,
        }
    }

    /// Restore a previously captured state
    ///
    /// Both VRAM views are rebuilt from the native pixels. On error the GPU
    /// is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`GpuError::IncompatibleSaveState`] if the version does not match
    /// - [`GpuError::InvalidVramSize`] if the VRAM is not 1024×512 pixels
    pub fn restore(&mut self, state: &GpuState) -> Result<(), GpuError> {
        if state.version != SAVE_STATE_VERSION {
            return Err(GpuError::IncompatibleSaveState {
                expected: SAVE_STATE_VERSION,
                got: state.version,
            });
        }

        self.vram = Framebuffer::from_native(&state.vram)?;
        self.regs = state.registers;
        self.gp0_mode = state.gp0_mode;
        self.fifo.restore(&state.fifo, state.fifo_continued);
        self.readback = state.readback;
        self.gpuread = state.gpuread;
        self.timing = state.timing;

        log::debug!(
            "GPU state restored (frame {}, mode {:?})",
            state.metadata.frame_count,
            self.gp0_mode
        );
        Ok(())
    }
}
