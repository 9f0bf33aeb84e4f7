//! Still-image CLI: denoise a PNG while preserving its color type and bit
//! depth (8/16-bit grayscale, RGB or RGBA).

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use byteorder::{BigEndian, ReadBytesExt};
use clap::Parser;
use png::{BitDepth, ColorType};

use frame_denoise::{denoise_buffer, DenoiseParams};

#[derive(Parser)]
#[command(about = "Denoise a PNG image with an edge-preserving bilateral filter")]
struct Args {
    /// Input PNG.
    input: PathBuf,
    /// Output PNG (same color type and bit depth as the input).
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
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let params = DenoiseParams::new(args.sigma, args.k_sigma, args.threshold);

    let in_file =
        File::open(&args.input).with_context(|| format!("cannot open {}", args.input.display()))?;
    let mut decoder = png::Decoder::new(in_file);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder
        .read_info()
        .with_context(|| format!("cannot decode {}", args.input.display()))?;

    let (width, height, color_type, bit_depth) = {
        let info = reader.info();
        let (width, height) = info.size();
        (width, height, info.color_type, info.bit_depth)
    };
    match color_type {
        ColorType::Grayscale | ColorType::Rgb | ColorType::Rgba => {}
        other => bail!("unsupported png color type {other:?}"),
    }

    let mut buffer = vec![0u8; reader.output_buffer_size()];
    reader.next_frame(&mut buffer)?;

    let out_file = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(out_file), width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);
    let mut writer = encoder.write_header()?;

    match bit_depth {
        BitDepth::Eight => {
            let result = denoise_buffer(&buffer, width, height, params);
            writer.write_image_data(&result)?;
        }
        BitDepth::Sixteen => {
            // png hands back big-endian byte pairs
            let mut samples = vec![0u16; buffer.len() / 2];
            Cursor::new(buffer).read_u16_into::<BigEndian>(&mut samples)?;
            let result = denoise_buffer(&samples, width, height, params);
            let bytes: Vec<u8> = result.iter().flat_map(|v| v.to_be_bytes()).collect();
            writer.write_image_data(&bytes)?;
        }
        other => bail!("supposed to be an 8 or 16 bit image, got {other:?}"),
    }
    Ok(())
}
