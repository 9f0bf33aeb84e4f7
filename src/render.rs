//! Full-frame evaluation: one data-parallel batch of independent per-pixel
//! kernel runs, no cross-pixel communication.

use rayon::prelude::*;

use crate::frame::{Channel, Frame};
use crate::kernel::denoise_px;
use crate::params::DenoiseParams;

/// Filter a whole frame into a new allocation.
pub fn denoise_frame(src: &Frame, params: DenoiseParams) -> Frame {
    let mut out = Frame::new(src.width(), src.height());
    denoise_frame_into(src, params, &mut out);
    out
}

/// Filter a whole frame into an existing output frame of the same size.
///
/// Parameters are sanitized once up front; every pixel of the batch sees
/// that single snapshot, so a caller mutating its parameter source mid-frame
/// can never tear one render.
///
/// # Panics
/// Panics if `out` dimensions differ from `src`.
pub fn denoise_frame_into(src: &Frame, params: DenoiseParams, out: &mut Frame) {
    assert!(
        src.width() == out.width() && src.height() == out.height(),
        "output frame {}x{} does not match source {}x{}",
        out.width(),
        out.height(),
        src.width(),
        src.height()
    );
    let params = params.sanitized();
    let width = src.width() as usize;

    out.pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate() {
                let uv = src.texel_center(x as u32, y as u32);
                *px = denoise_px(src, uv, params);
            }
        });
}

/// Filter a raw channel buffer with 1, 3 or 4 samples per pixel, returning
/// a buffer of the same layout.
///
/// # Panics
/// Panics if the buffer length is not a 1/3/4-sample multiple of
/// `width * height`.
pub fn denoise_buffer<C: Channel>(
    buf: &[C],
    width: u32,
    height: u32,
    params: DenoiseParams,
) -> Vec<C> {
    let src = Frame::from_channels(buf, width, height);
    let samples = buf.len() / (width as usize * height as usize);
    denoise_frame(&src, params).to_channels(samples)
}
