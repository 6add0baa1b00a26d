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

//! GPU save state serialization
//!
//! A save state captures everything needed to resume a GPU exactly where it
//! stopped: native VRAM, the register file, the GP0 decoder (mode, pending
//! FIFO words, transfer cursors), the GPUREAD latch and the timing counters.
//! The 32-bit VRAM view is not stored; it is rebuilt from the native pixels
//! on restore.
//!
//! # Save State Format
//!
//! Save states are serialized using bincode for efficient binary encoding.
//! Types that only implement serde (registers, cursors, timestamps) go
//! through bincode's serde compatibility layer.
//!
//! # Version Compatibility
//!
//! Save states include a version number to ensure compatibility.
//! Loading a save state with a different version will fail with an error.
//!
//! # Example
//!
//! ```no_run
//! use psrx_gpu::core::save_state::GpuState;
//! use psrx_gpu::core::GPU;
//!
//! let mut gpu = GPU::new();
//! // ... submit commands ...
//!
//! gpu.snapshot().save_to_file("gpu.state")?;
//!
//! let state = GpuState::load_from_file("gpu.state")?;
//! gpu.restore(&state)?;
//! # Ok::<(), psrx_gpu::core::EmulatorError>(())
//! ```

use bincode::{config, Decode, Encode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use super::error::{GpuError, Result};
use super::gpu::{Gp0Mode, Registers, Timing, TransferCursor};

/// Save state version for compatibility checking
///
/// This version number should be incremented whenever the save state format changes
/// in a way that breaks backward compatibility.
pub const SAVE_STATE_VERSION: u32 = 2;

/// Complete GPU save state
#[derive(Debug, Clone, Serialize, Deserialize, Encode, Decode)]
pub struct GpuState {
    /// Version number for compatibility checking
    pub version: u32,

    /// Save state metadata
    pub metadata: SaveStateMetadata,

    /// Native VRAM (1024×512 16-bit pixels, row-major)
    pub vram: Vec<u16>,

    /// Register file
    #[bincode(with_serde)]
    pub registers: Registers,

    /// GP0 decoder mode, including an active CPU→VRAM cursor
    #[bincode(with_serde)]
    pub gp0_mode: Gp0Mode,

    /// Words of a partially assembled GP0 command
    pub fifo: Vec<u32>,

    /// The pending command is a polyline resumed after a full FIFO
    pub fifo_continued: bool,

    /// Active VRAM→CPU cursor
    #[bincode(with_serde)]
    pub readback: Option<TransferCursor>,

    /// Latched GPUREAD value
    pub gpuread: u32,

    /// Scanline/frame counters
    #[bincode(with_serde)]
    pub timing: Timing,
}

/// Save state metadata
///
/// Contains information about when the save state was created.
#[derive(Debug, Clone, Serialize, Deserialize, Encode, Decode)]
#[bincode(encode_bounds = "", decode_bounds = "")]
pub struct SaveStateMetadata {
    /// Timestamp when the save state was created
    #[bincode(with_serde)]
    pub timestamp: DateTime<Utc>,

    /// Frame count at save time
    pub frame_count: u64,
}

impl SaveStateMetadata {
    /// Metadata stamped with the current time
    pub fn now(frame_count: u64) -> Self {
        Self {
            timestamp: Utc::now(),
            frame_count,
        }
    }
}

impl GpuState {
    /// Encode to bytes
    ///
    /// # Errors
    ///
    /// Returns [`EmulatorError::SaveState`](super::EmulatorError::SaveState)
    /// if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::encode_to_vec(self, config::standard())?)
    }

    /// Decode from bytes and verify version compatibility
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or the version does not match
    /// [`SAVE_STATE_VERSION`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (state, _): (GpuState, usize) = bincode::decode_from_slice(bytes, config::standard())?;

        if state.version != SAVE_STATE_VERSION {
            return Err(GpuError::IncompatibleSaveState {
                expected: SAVE_STATE_VERSION,
                got: state.version,
            }
            .into());
        }

        Ok(state)
    }

    /// Save state to file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be created
    /// - Serialization fails
    /// - Write operation fails
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let encoded = self.to_bytes()?;
        let mut file = File::create(path.as_ref())?;
        file.write_all(&encoded)?;

        log::debug!(
            "Saved GPU state ({} bytes) to {}",
            encoded.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Load state from file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be opened
    /// - File cannot be read
    /// - Deserialization fails
    /// - Version is incompatible
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path.as_ref())?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;

        let state = Self::from_bytes(&buffer)?;
        log::debug!(
            "Loaded GPU state from {} (saved {})",
            path.as_ref().display(),
            state.metadata.timestamp
        );
        Ok(state)
    }
}
