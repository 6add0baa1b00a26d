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

//! Replay tool configuration
//!
//! Configuration is read from a TOML file. Every field has a default, so a
//! file only needs the keys it wants to change:
//!
//! ```toml
//! [replay]
//! format = "hex"
//! direct = false
//! frames = 1
//! export = "display"
//! output = "frame.ppm"
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! The file path comes from `--config` or the `PSRX_GPU_CONFIG` environment
//! variable. Command line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::export::ExportArea;
use crate::replay::StreamFormat;

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "PSRX_GPU_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Command stream replay settings
    pub replay: ReplayConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Command stream replay settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Input encoding
    pub format: StreamFormat,

    /// Write GP0 words one at a time instead of through the buffer path
    pub direct: bool,

    /// Frames of timing to run after the stream
    pub frames: u32,

    /// Region written by the framebuffer export
    pub export: ExportArea,

    /// Image output path (.ppm or .png); no export when unset
    pub output: Option<PathBuf>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            format: StreamFormat::Hex,
            direct: false,
            frames: 1,
            export: ExportArea::Display,
            output: None,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level (`off`, `error`, `warn`, `info`, `debug`, `trace`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level, `Info` if the configured name is not recognized
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Parse configuration from TOML text
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::config::Config;
    ///
    /// let config = Config::parse("[replay]\ndirect = true\n").unwrap();
    /// assert!(config.replay.direct);
    /// assert_eq!(config.replay.frames, 1);
    /// assert_eq!(config.logging.level, "info");
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    /// for this schema.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::parse(&text)?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Configuration file to use: the explicit path, else `PSRX_GPU_CONFIG`
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
    }

    /// Load the resolved configuration file, or defaults if there is none
    pub fn load_or_default(explicit: Option<PathBuf>) -> Result<Self> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
