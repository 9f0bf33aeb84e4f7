//! Frame-loop demo: stands in for the live capture/display pipeline by
//! pushing the same decoded image through the render context N times,
//! timing each frame to judge real-time headroom.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use frame_denoise::{DenoiseParams, Frame, ParamControls, RenderContext};

#[derive(Parser)]
#[command(about = "Run the denoise filter over an image as a simulated frame loop")]
struct Args {
    /// Input image (any format the image crate decodes).
    input: PathBuf,
    /// Output image for the last rendered frame.
    output: PathBuf,
    /// Spatial blur standard deviation.
    #[arg(long, default_value_t = 10.0)]
    sigma: f32,
    /// Kernel radius multiplier.
    #[arg(long, default_value_t = 1.0)]
    k_sigma: f32,
    /// Color-similarity standard deviation.
    #[arg(long, default_value_t = 0.05)]
    threshold: f32,
    /// Number of frames to render.
    #[arg(long, default_value_t = 30)]
    frames: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let img = image::open(&args.input)
        .with_context(|| format!("cannot open {}", args.input.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    let frame = Frame::from_channels(img.as_raw(), width, height);

    let controls = ParamControls::new(DenoiseParams::new(
        args.sigma,
        args.k_sigma,
        args.threshold,
    ));
    let mut ctx = RenderContext::new(width, height);

    for n in 0..args.frames {
        let begin = Instant::now();
        ctx.render(&frame, controls.snapshot());
        info!(
            "frame {n}: {}x{} in {} ms",
            width,
            height,
            begin.elapsed().as_millis()
        );
    }

    let out: Vec<u8> = ctx.output().to_channels(4);
    let out_img = image::RgbaImage::from_raw(width, height, out)
        .context("output buffer does not match frame dimensions")?;
    out_img
        .save(&args.output)
        .with_context(|| format!("cannot write {}", args.output.display()))?;
    Ok(())
}
