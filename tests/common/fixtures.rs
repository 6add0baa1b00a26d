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


//! Test fixtures for common test scenarios

use psrx_gpu::core::GPU;
use psrx_gpu::replay::CommandStream;

/// A 320×240 NTSC scene: display on, full draw area, blue background,
/// a red flat triangle and a green 16×16 sprite
#[allow(dead_code)]
pub const SCENE_HEX: &str = "\
# Display setup
gp1: 0x00000000
gp1: 0x08000001
gp1: 0x05000000
gp1: 0x03000000

# Draw area (0, 0)-(319, 239), no offset
E3000000
E403BD3F
E5000000

# Clear to blue
02FF0000
00000000
00F00140

# Red triangle
200000FF
00000000
00000040
00400000

# Green 16x16 sprite at (100, 100)
7800FF00
00640064
";

/// Create a GPU with the display enabled at 320×240
#[allow(dead_code)]
pub fn create_display_gpu() -> GPU {
    let mut gpu = GPU::new();
    gpu.write_gp1(0x0800_0001);
    gpu.write_gp1(0x0300_0000);
    gpu
}

/// Create a GPU with [`SCENE_HEX`] already replayed
#[allow(dead_code)]
pub fn create_scene_gpu() -> GPU {
    let mut gpu = GPU::new();
    let stream = CommandStream::parse_hex(SCENE_HEX).expect("scene parses");
    stream.replay(&mut gpu, false);
    gpu
}

/// Encode words as a little-endian binary stream
#[allow(dead_code)]
pub fn to_binary(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_le_bytes()).collect()
}
