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

use clap::Parser;
use log::{error, info};
use psrx_gpu::config::Config;
use psrx_gpu::core::error::{EmulatorError, Result};
use psrx_gpu::core::gpu::Timing;
use psrx_gpu::core::GPU;
use psrx_gpu::export::{self, ExportArea};
use psrx_gpu::replay::{CommandStream, StreamFormat};
use std::path::PathBuf;

/// PlayStation GPU command stream replayer
#[derive(Parser)]
#[command(name = "psrx-gpu")]
#[command(about = "Replay a PlayStation GPU command stream", long_about = None)]
struct Args {
    /// Path to the command stream
    input: PathBuf,

    /// TOML configuration file (falls back to $PSRX_GPU_CONFIG)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the framebuffer to this path (.ppm or .png)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Command stream encoding
    #[arg(short = 'f', long, value_enum)]
    format: Option<StreamFormat>,

    /// Write GP0 words one at a time instead of through the DMA path
    #[arg(long)]
    direct: bool,

    /// Region to export
    #[arg(short = 'e', long, value_enum)]
    export: Option<ExportArea>,

    /// Frames of display timing to run after the stream
    #[arg(short = 'n', long)]
    frames: Option<u32>,

    /// Save the final GPU state to this path
    #[arg(long)]
    save_state: Option<PathBuf>,

    /// Print the register file as JSON
    #[arg(long)]
    dump_registers: bool,
}

fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = Config::load_or_default(args.config.clone())?;

    // Initialize logger with the configured level; RUST_LOG still wins
    env_logger::Builder::new()
        .filter_level(config.logging.level_filter())
        .parse_default_env()
        .init();

    info!("psrx-gpu v{}", env!("CARGO_PKG_VERSION"));

    // Command line flags override the file
    let replay = &mut config.replay;
    if let Some(format) = args.format {
        replay.format = format;
    }
    if let Some(export) = args.export {
        replay.export = export;
    }
    if let Some(frames) = args.frames {
        replay.frames = frames;
    }
    if args.output.is_some() {
        replay.output = args.output.clone();
    }
    replay.direct |= args.direct;

    let stream = CommandStream::load(&args.input, replay.format).inspect_err(|e| {
        error!("Failed to load {}: {}", args.input.display(), e);
    })?;

    let mut gpu = GPU::new();
    let stats = stream.replay(&mut gpu, replay.direct);
    info!(
        "Replayed {} GP0 / {} GP1 words",
        stats.gp0_words, stats.gp1_words
    );

    let mode = gpu.registers().display_mode;
    let frame_cycles = Timing::cycles_per_scanline(mode.video_mode)
        * Timing::scanlines_per_frame(mode.video_mode) as u32;
    for _ in 0..replay.frames {
        gpu.tick(frame_cycles);
    }

    let (width, height) = gpu.display_resolution();
    info!(
        "Status 0x{:08X} | display {}×{} | frames {}",
        gpu.status(),
        width,
        height,
        gpu.frame_count()
    );

    if args.dump_registers {
        let json = serde_json::to_string_pretty(gpu.registers())
            .map_err(|e| EmulatorError::Parse(e.to_string()))?;
        println!("{}", json);
    }

    if let Some(path) = &replay.output {
        export::save_image(&gpu, replay.export, path)?;
    }

    if let Some(path) = &args.save_state {
        gpu.snapshot().save_to_file(path)?;
        info!("Saved GPU state to {}", path.display());
    }

    Ok(())
}
