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

//! Framebuffer export
//!
//! Captures either the visible display area or all of VRAM as an
//! [`image::RgbImage`] and saves it through the `image` crate, which picks
//! the encoder (PPM or PNG) from the file extension. 15-bit pixels come from
//! the 32-bit VRAM view; in 24-bit display mode the display area is decoded
//! from the packed byte stream in native VRAM instead.

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::Result;
use crate::core::gpu::{ColorDepth, Framebuffer};
use crate::core::GPU;

/// Region of VRAM to export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportArea {
    /// The area selected by GP1(05h) at the display-mode resolution
    Display,

    /// The whole 1024×512 VRAM
    Vram,
}

/// Capture a region of VRAM as RGB
///
/// # Examples
///
/// ```
/// use psrx_gpu::core::GPU;
/// use psrx_gpu::export::{capture, ExportArea};
///
/// let mut gpu = GPU::new();
/// gpu.write_vram(0, 0, 0x001F);
///
/// let image = capture(&gpu, ExportArea::Display);
/// assert_eq!(image.dimensions(), (256, 240));
/// assert_eq!(image.get_pixel(0, 0).0, [0xF8, 0, 0]);
/// ```
pub fn capture(gpu: &GPU, area: ExportArea) -> RgbImage {
    match area {
        ExportArea::Vram => capture_rgba(
            gpu,
            0,
            0,
            Framebuffer::WIDTH as u16,
            Framebuffer::HEIGHT as u16,
        ),
        ExportArea::Display => {
            let (x, y) = gpu.display_start();
            let (width, height) = gpu.display_resolution();
            match gpu.registers().display_mode.color_depth {
                ColorDepth::C15Bit => capture_rgba(gpu, x, y, width, height),
                ColorDepth::C24Bit => capture_24bit(gpu, x, y, width, height),
            }
        }
    }
}

/// Capture a region of VRAM and save it as an image file
///
/// The format follows the extension of `path` (`.ppm` or `.png`).
///
/// # Errors
///
/// Returns an error if the extension is unsupported or the file cannot be
/// written.
pub fn save_image<P: AsRef<Path>>(gpu: &GPU, area: ExportArea, path: P) -> Result<()> {
    let image = capture(gpu, area);
    image.save(path.as_ref())?;

    log::info!(
        "Exported {}×{} {:?} to {}",
        image.width(),
        image.height(),
        area,
        path.as_ref().display()
    );
    Ok(())
}

/// Region of the 32-bit view, wrapping at the VRAM edges
fn capture_rgba(gpu: &GPU, x0: u16, y0: u16, width: u16, height: u16) -> RgbImage {
    let rgba = gpu.framebuffer();

    RgbImage::from_fn(width as u32, height as u32, |col, row| {
        let pixel =
            rgba[Framebuffer::index(x0.wrapping_add(col as u16), y0.wrapping_add(row as u16))];
        Rgb([pixel as u8, (pixel >> 8) as u8, (pixel >> 16) as u8])
    })
}

/// Region of native VRAM read as packed 24-bit RGB
fn capture_24bit(gpu: &GPU, x0: u16, y0: u16, width: u16, height: u16) -> RgbImage {
    RgbImage::from_fn(width as u32, height as u32, |col, row| {
        let y = y0.wrapping_add(row as u16);
        let byte = |offset: usize| {
            let halfword = gpu.read_vram(x0.wrapping_add((offset / 2) as u16), y);
            if offset % 2 == 0 {
                halfword as u8
            } else {
                (halfword >> 8) as u8
            }
        };

        let base = col as usize * 3;
        Rgb([byte(base), byte(base + 1), byte(base + 2)])
    })
}
