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

//! GPU primitive type definitions
//!
//! This module contains the value types decoded from GP0 command words:
//! colors, vertices, texture coordinates, texture page/CLUT descriptors,
//! semi-transparency blend modes and the transient [`Primitive`] that carries
//! one decoded draw command into the rasterizer.
//!
//! All packed hardware fields are plain integers with explicit accessor
//! functions; nothing here aliases memory.

use bitflags::bitflags;

/// A 24-bit RGB color used in GPU commands
///
/// PlayStation GPU commands use 24-bit RGB colors (8 bits per channel)
/// which are converted to 15-bit RGB for VRAM storage.
///
/// # Examples
///
/// ```
/// use psrx_gpu::core::gpu::Color;
///
/// let color = Color::from_u32(0x00FF8040);
/// assert_eq!(color.r, 0x40);
/// assert_eq!(color.g, 0x80);
/// assert_eq!(color.b, 0xFF);
///
/// let rgb15 = color.to_rgb15();
/// assert_eq!(rgb15 & 0x1F, 0x08); // Red: 0x40 >> 3 = 8
/// assert_eq!((rgb15 >> 5) & 0x1F, 0x10); // Green: 0x80 >> 3 = 16
/// assert_eq!((rgb15 >> 10) & 0x1F, 0x1F); // Blue: 0xFF >> 3 = 31
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Color {
    /// Create a color from its three 8-bit channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a Color from a 32-bit command word
    ///
    /// The color is encoded in the lower 24 bits:
    /// - Bits 0-7: Red
    /// - Bits 8-15: Green
    /// - Bits 16-23: Blue
    ///
    /// The command byte (bits 24-31) is ignored.
    pub fn from_u32(value: u32) -> Self {
        Self {
            r: (value & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: ((value >> 16) & 0xFF) as u8,
        }
    }

    /// Expand a native 15-bit pixel to 8-bit channels
    ///
    /// Each 5-bit channel is shifted left by 3. The mask bit is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::gpu::Color;
    ///
    /// let color = Color::from_rgb15(0x7FFF);
    /// assert_eq!(color, Color::new(248, 248, 248));
    /// ```
    pub fn from_rgb15(pixel: u16) -> Self {
        Self {
            r: ((pixel & 0x1F) << 3) as u8,
            g: (((pixel >> 5) & 0x1F) << 3) as u8,
            b: (((pixel >> 10) & 0x1F) << 3) as u8,
        }
    }

    /// Convert 24-bit RGB to 15-bit RGB format for VRAM
    ///
    /// Converts each 8-bit channel to 5-bit by right-shifting by 3.
    /// The result is packed in VRAM's 5-5-5 RGB format:
    /// - Bits 0-4: Red (5 bits)
    /// - Bits 5-9: Green (5 bits)
    /// - Bits 10-14: Blue (5 bits)
    ///
    /// Bit 15 (mask) is always 0.
    pub fn to_rgb15(&self) -> u16 {
        let r = ((self.r as u16) >> 3) & 0x1F;
        let g = ((self.g as u16) >> 3) & 0x1F;
        let b = ((self.b as u16) >> 3) & 0x1F;
        (b << 10) | (g << 5) | r
    }

    /// Modulate a texel with this color
    ///
    /// Computes `clamp(self * texel >> 7)` per channel, so a base color of
    /// 128 leaves the texel unchanged and 255 roughly doubles it.
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::gpu::Color;
    ///
    /// let neutral = Color::new(128, 128, 128);
    /// let texel = Color::new(200, 100, 8);
    /// assert_eq!(neutral.modulate(texel), texel);
    ///
    /// let bright = Color::new(255, 255, 255);
    /// assert_eq!(bright.modulate(Color::new(200, 0, 0)).r, 255);
    /// ```
    pub fn modulate(&self, texel: Color) -> Color {
        #[inline(always)]
        fn channel(base: u8, texel: u8) -> u8 {
            ((base as u32 * texel as u32) >> 7).min(255) as u8
        }

        Color {
            r: channel(self.r, texel.r),
            g: channel(self.g, texel.g),
            b: channel(self.b, texel.b),
        }
    }
}

/// A 2D vertex position used in primitive rendering
///
/// Vertex coordinates are signed 11-bit values (-1024 to +1023) packed into
/// the low bits of each half-word; the upper bits are ignored by hardware.
///
/// # Examples
///
/// ```
/// use psrx_gpu::core::gpu::Vertex;
///
/// let vertex = Vertex::from_u32(0x00640032);
/// assert_eq!(vertex.x, 50);
/// assert_eq!(vertex.y, 100);
///
/// let negative = Vertex::from_u32(0x07FF_07FF);
/// assert_eq!((negative.x, negative.y), (-1, -1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vertex {
    /// X coordinate (signed 11-bit)
    pub x: i16,
    /// Y coordinate (signed 11-bit)
    pub y: i16,
}

impl Vertex {
    /// Create a vertex from explicit coordinates
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Create a Vertex from a 32-bit command word
    ///
    /// - Bits 0-10: X coordinate (signed)
    /// - Bits 16-26: Y coordinate (signed)
    pub fn from_u32(value: u32) -> Self {
        Self {
            x: sign_extend_11(value as u16),
            y: sign_extend_11((value >> 16) as u16),
        }
    }

    /// Pack the vertex back into its command-word layout
    pub fn to_u32(&self) -> u32 {
        ((self.y as u16 as u32 & 0x7FF) << 16) | (self.x as u16 as u32 & 0x7FF)
    }
}

/// Sign-extend the low 11 bits of a half-word
#[inline(always)]
pub(crate) fn sign_extend_11(value: u16) -> i16 {
    ((value << 5) as i16) >> 5
}

/// Texture coordinate for textured primitives
///
/// - U: Horizontal texture coordinate (0-255)
/// - V: Vertical texture coordinate (0-255)
///
/// Coordinates wrap within the texture page.
///
/// # Examples
///
/// ```
/// use psrx_gpu::core::gpu::TexCoord;
///
/// let texcoord = TexCoord::from_u32(0x00804020);
/// assert_eq!(texcoord.u, 0x20);
/// assert_eq!(texcoord.v, 0x40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TexCoord {
    /// U coordinate (horizontal, 0-255)
    pub u: u8,
    /// V coordinate (vertical, 0-255)
    pub v: u8,
}

impl TexCoord {
    /// Create a texture coordinate from explicit values
    pub const fn new(u: u8, v: u8) -> Self {
        Self { u, v }
    }

    /// Create a TexCoord from a 32-bit command word
    ///
    /// - Bits 0-7: U coordinate
    /// - Bits 8-15: V coordinate
    ///
    /// The upper half-word (CLUT or texture page) is decoded separately.
    pub fn from_u32(value: u32) -> Self {
        Self {
            u: (value & 0xFF) as u8,
            v: ((value >> 8) & 0xFF) as u8,
        }
    }
}

/// Texture color depth modes
///
/// - 4-bit: 16 colors using a 16-color CLUT (Color Lookup Table)
/// - 8-bit: 256 colors using a 256-color CLUT
/// - 15-bit: Direct color (no CLUT needed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureDepth {
    /// 4-bit indexed color (16 colors, uses CLUT)
    #[default]
    T4Bit,
    /// 8-bit indexed color (256 colors, uses CLUT)
    T8Bit,
    /// 15-bit direct color (no CLUT)
    T15Bit,
}

impl From<u8> for TextureDepth {
    /// Convert a 2-bit texture depth field (0=4bit, 1=8bit, 2/3=15bit)
    fn from(value: u8) -> Self {
        match value & 3 {
            0 => TextureDepth::T4Bit,
            1 => TextureDepth::T8Bit,
            _ => TextureDepth::T15Bit,
        }
    }
}

/// Texture mapping information
///
/// Contains all information needed to sample a texture from VRAM: the
/// texture page base, the CLUT location and the color depth.
///
/// # Examples
///
/// ```
/// use psrx_gpu::core::gpu::{TextureDepth, TextureInfo};
///
/// // Texpage 0x0182: page X=2 (128), Y=0, 8-bit; CLUT at (0x10 * 16, 5)
/// let texture = TextureInfo::from_words(0x0182, (5 << 6) | 0x10);
/// assert_eq!(texture.page_x, 128);
/// assert_eq!(texture.page_y, 0);
/// assert_eq!(texture.clut_x, 256);
/// assert_eq!(texture.clut_y, 5);
/// assert_eq!(texture.depth, TextureDepth::T15Bit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureInfo {
    /// Texture page base X coordinate (in pixels)
    pub page_x: u16,

    /// Texture page base Y coordinate (0 or 256)
    pub page_y: u16,

    /// CLUT X position in VRAM (for 4-bit/8-bit textures)
    pub clut_x: u16,

    /// CLUT Y position in VRAM (for 4-bit/8-bit textures)
    pub clut_y: u16,

    /// Texture color depth
    pub depth: TextureDepth,
}

impl TextureInfo {
    /// Decode texture page and CLUT half-words
    ///
    /// Texpage layout: bits 0-3 X base (N*64), bit 4 Y base (N*256),
    /// bits 7-8 color depth. CLUT layout: bits 0-5 X (N*16), bits 6-14 Y.
    pub fn from_words(texpage: u16, clut: u16) -> Self {
        Self {
            page_x: (texpage & 0x0F) * 64,
            page_y: ((texpage >> 4) & 1) * 256,
            clut_x: (clut & 0x3F) * 16,
            clut_y: (clut >> 6) & 0x1FF,
            depth: TextureDepth::from(((texpage >> 7) & 3) as u8),
        }
    }
}

/// Semi-transparency blending modes
///
/// Each mode combines the background color (B, already in VRAM) with the
/// foreground color (F, being drawn). Every channel is processed
/// independently in 8-bit precision and saturated to 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// (B + F) / 2
    #[default]
    Average,

    /// B + F, clamped to 255
    Additive,

    /// B - F, clamped to 0
    Subtractive,

    /// B + F/4, clamped to 255
    AddQuarter,
}

impl BlendMode {
    /// Create BlendMode from the 2-bit semi-transparency field
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::gpu::BlendMode;
    ///
    /// assert_eq!(BlendMode::from_bits(0), BlendMode::Average);
    /// assert_eq!(BlendMode::from_bits(1), BlendMode::Additive);
    /// assert_eq!(BlendMode::from_bits(2), BlendMode::Subtractive);
    /// assert_eq!(BlendMode::from_bits(3), BlendMode::AddQuarter);
    /// ```
    pub fn from_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => BlendMode::Average,
            1 => BlendMode::Additive,
            2 => BlendMode::Subtractive,
            _ => BlendMode::AddQuarter,
        }
    }

    /// The 2-bit field value of this mode
    pub fn bits(&self) -> u8 {
        match self {
            BlendMode::Average => 0,
            BlendMode::Additive => 1,
            BlendMode::Subtractive => 2,
            BlendMode::AddQuarter => 3,
        }
    }

    /// Blend background and foreground colors
    ///
    /// # Examples
    ///
    /// ```
    /// use psrx_gpu::core::gpu::{BlendMode, Color};
    ///
    /// let back = Color::new(200, 100, 50);
    /// let front = Color::new(100, 50, 0);
    /// assert_eq!(BlendMode::Average.blend(back, front), Color::new(150, 75, 25));
    /// ```
    pub fn blend(&self, background: Color, foreground: Color) -> Color {
        let op = |b: u8, f: u8| -> u8 {
            let (b, f) = (b as i32, f as i32);
            let value = match self {
                BlendMode::Average => (b + f) >> 1,
                BlendMode::Additive => b + f,
                BlendMode::Subtractive => b - f,
                BlendMode::AddQuarter => b + (f >> 2),
            };
            value.clamp(0, 255) as u8
        };

        Color {
            r: op(background.r, foreground.r),
            g: op(background.g, foreground.g),
            b: op(background.b, foreground.b),
        }
    }
}

bitflags! {
    /// Rendering attributes encoded in the low opcode bits of a draw command
    ///
    /// The flag values match the opcode bit positions, so a command byte can
    /// be converted directly with [`PrimitiveFlags::from_opcode`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PrimitiveFlags: u8 {
        /// Texture colors are used as-is (no modulation by the vertex color)
        const RAW_TEXTURE = 0x01;
        /// Semi-transparent blending is enabled
        const SEMI_TRANSPARENT = 0x02;
        /// Primitive is texture mapped
        const TEXTURED = 0x04;
        /// Per-vertex colors are interpolated (Gouraud shading)
        const SHADED = 0x10;
    }
}

impl PrimitiveFlags {
    /// Extract the rendering flags from a GP0 command byte
    ///
    /// Bit 3 (quad / polyline / size) is not a rendering attribute and is
    /// dropped. Callers mask out flags that don't apply to their primitive
    /// class (lines are never textured, rectangles are never shaded).
    pub fn from_opcode(opcode: u8) -> Self {
        Self::from_bits_truncate(opcode)
    }
}

/// A decoded draw command on its way to the rasterizer
///
/// Built fresh from the command words of one polygon, consumed by the
/// rasterizer and then dropped. Up to four vertices; quads are split into
/// the triangles (0, 1, 2) and (1, 2, 3).
#[derive(Debug, Clone, Copy, Default)]
pub struct Primitive {
    /// Vertex positions (drawing offset not yet applied)
    pub vertices: [Vertex; 4],

    /// Per-vertex colors; only index 0 is used for flat primitives
    pub colors: [Color; 4],

    /// Per-vertex texture coordinates (textured primitives only)
    pub texcoords: [TexCoord; 4],

    /// Number of valid vertices (3 or 4)
    pub vertex_count: usize,

    /// Rendering attributes
    pub flags: PrimitiveFlags,

    /// Texture page, CLUT and depth captured for this draw
    pub texture: TextureInfo,

    /// Semi-transparency mode captured for this draw
    pub blend_mode: BlendMode,
}

impl Primitive {
    /// Vertex index triples to rasterize, in draw order
    pub fn triangles(&self) -> &'static [[usize; 3]] {
        const TRIANGLE: [[usize; 3]; 1] = [[0, 1, 2]];
        const QUAD: [[usize; 3]; 2] = [[0, 1, 2], [1, 2, 3]];

        if self.vertex_count == 4 {
            &QUAD
        } else {
            &TRIANGLE
        }
    }

    /// Whether this primitive interpolates vertex colors
    #[inline(always)]
    pub fn is_shaded(&self) -> bool {
        self.flags.contains(PrimitiveFlags::SHADED)
    }

    /// Whether this primitive samples a texture
    #[inline(always)]
    pub fn is_textured(&self) -> bool {
        self.flags.contains(PrimitiveFlags::TEXTURED)
    }
}
