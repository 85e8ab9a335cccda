// sketch — approximate input images with randomly placed line segments.
//
// Reads numbered frames (input_001.png, input_002.png, …), runs the
// accept/reject line optimizer on each, and writes one frame_NNN.png per
// completed frame plus optional timed incr_NNN.png snapshots:
//
//   ffmpeg -i input.webm input_%03d.png && sketch && ffmpeg -i frame_%03d.png output.webm

mod canvas;
mod diff;
mod error;
mod optimizer;
mod palette;
mod raster;
mod snapshot;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::canvas::{Frame, Image, Pixel};
use crate::error::{SketchError, SketchResult};
use crate::optimizer::{Counters, Options};
use crate::palette::Palette;
use crate::snapshot::PngSink;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sketch images with randomly placed lines", long_about = None)]
struct Args {
    /// Iteration limit per frame (negative for unbounded)
    #[arg(long, default_value_t = 5_000_000, allow_negative_numbers = true)]
    iter: i64,

    /// Starting frame number
    #[arg(long, default_value_t = 1)]
    start: u32,

    /// Limit for total number of output frames (0 for unbounded)
    #[arg(long, default_value_t = 0)]
    frame_limit: u32,

    /// Line length limit
    #[arg(short = 'l', long, default_value_t = 40, value_parser = clap::value_parser!(u32).range(1..))]
    line_len: u32,

    /// Remove duplicate colours from the palette
    #[arg(short = 'p', long)]
    palettize: bool,

    /// Incremental save interval in seconds (<= 0 disables)
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    save_interval: f64,

    /// Statistics reporting interval in seconds
    #[arg(long, default_value_t = 1.0)]
    stat_interval: f64,

    /// RNG seed
    #[arg(long, default_value_t = 1234)]
    seed: u64,
}

/// Decode the next numbered frame. A missing file is the normal
/// end-of-sequence signal; any other failure is fatal.
fn load_frame(path: &Path) -> SketchResult<Option<Image>> {
    let decoded = match image::open(path) {
        Ok(img) => img,
        Err(image::ImageError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(None);
        }
        Err(source) => {
            return Err(SketchError::Decode {
                path: path.to_owned(),
                source,
            });
        }
    };
    Ok(Some(Image::from_rgba8(&decoded.to_rgba8())))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();

    let opts = Options {
        iter_limit: args.iter,
        line_len: args.line_len,
        save_interval: args.save_interval,
        stat_interval: args.stat_interval,
    };
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut counters = Counters::new(args.start);
    let mut sink = PngSink;

    let mut frame_num = args.start;
    let mut frames_done: u32 = 0;

    loop {
        if args.frame_limit > 0 && frames_done >= args.frame_limit {
            break;
        }

        let path = PathBuf::from(format!("input_{frame_num:03}.png"));
        info!("looking for {}", path.display());
        let Some(target) = load_frame(&path)? else {
            break;
        };
        frame_num += 1;

        let palette = Palette::from_image(&target, args.palettize)?;
        info!("{} colours in palette", palette.len());

        let mut frame = Frame::new(target, Pixel::BLACK);
        optimizer::sketch(&mut frame, &palette, &opts, &mut rng, &mut counters, &mut sink)?;
        frames_done += 1;
    }

    info!("end of frames");
    Ok(())
}
