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

//! GPU module tests
//!
//! Tests are organized into the following modules:
//! - `basic`: Initialization, reset, status word, GPUREAD latch
//! - `vram`: Dual-view VRAM, fills, wrapping
//! - `gp0_commands`: GP0 decoding, FIFO, polylines, buffer path
//! - `gp1_commands`: GP1 control commands and info queries
//! - `rendering`: Triangles, lines, rectangles, blending, textures
//! - `timing`: Scanlines, frames, VBlank, interlace
//! - `transfer`: CPU↔VRAM and VRAM↔VRAM transfers
//! - `properties`: Property-based rasterizer and transfer checks

mod gp0_commands;
mod properties;
mod transfer;
mod vram;
