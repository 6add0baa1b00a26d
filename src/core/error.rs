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

/// Error types
///
/// GP0/GP1 command processing never fails; errors only come from the
/// host-facing edges (command stream files, configuration, snapshots).
use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Main error type for the emulator
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid command stream at line {line}: {reason}")]
    InvalidStream { line: usize, reason: String },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Image export error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Save state error: {0}")]
    SaveState(String),

    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}

/// GPU-specific error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GpuError {
    #[error("Invalid VRAM size: {got} pixels (expected {expected})")]
    InvalidVramSize { expected: usize, got: usize },

    #[error("Incompatible save state version: expected {expected}, got {got}")]
    IncompatibleSaveState { expected: u32, got: u32 },
}

impl From<bincode::error::EncodeError> for EmulatorError {
    fn from(err: bincode::error::EncodeError) -> Self {
        EmulatorError::SaveState(err.to_string())
    }
}

impl From<bincode::error::DecodeError> for EmulatorError {
    fn from(err: bincode::error::DecodeError) -> Self {
        EmulatorError::SaveState(err.to_string())
    }
}
