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

//! PlayStation 1 GPU emulation core library
//!
//! This library emulates the PlayStation GPU: the GP0/GP1 command ports,
//! the register file and status word, a software rasterizer for polygons,
//! lines and rectangles, CPU↔VRAM transfers and the 1024×512 VRAM.
//! Around the core it provides command-stream replay, framebuffer export
//! and save states.
//!
//! # Example
//!
//! ```
//! use psrx_gpu::core::GPU;
//!
//! let mut gpu = GPU::new();
//!
//! // Flat red triangle
//! gpu.write_gp0_buffer(&[0x2000_00FF, 0x0000_0000, 0x0000_0020, 0x0020_0000]);
//! assert_eq!(gpu.read_vram(4, 4), 0x001F);
//! ```

pub mod config;
pub mod core;
pub mod export;
pub mod replay;
