//! The denoise kernel: a circular-footprint bilateral blur evaluated
//! independently per output pixel.
//!
//! Per-neighbor weight is the product of a spatial-distance Gaussian and a
//! color-similarity Gaussian, so flat regions smooth heavily while the
//! color term collapses toward zero across strong discontinuities and
//! leaves edges intact. The disc-shaped footprint avoids the directional
//! bias a square window would impose.

use glam::{Vec2, Vec4};
use std::f32::consts::FRAC_1_PI;

use crate::frame::Frame;
use crate::params::DenoiseParams;

const INV_SQRT_OF_2PI: f32 = 0.398_942_28; // 1.0 / sqrt(2.0 * PI)

/// Filter one output pixel.
///
/// `uv` is the normalized coordinate of the output pixel; neighbors are
/// sampled at `uv + (dx, dy) / (W, H)` with the frame's clamp-to-edge
/// policy. Stateless and idempotent: the same inputs always produce the
/// same color. Parameters are clamped into the kernel's domain on entry.
pub fn smart_denoise(frame: &Frame, uv: Vec2, params: DenoiseParams) -> Vec4 {
    denoise_px(frame, uv, params.sanitized())
}

/// Kernel body. Callers must pass sanitized parameters; the weight-sum
/// guard at the end still catches anything degenerate that slips through,
/// falling back to the unfiltered center pixel instead of dividing by zero.
pub(crate) fn denoise_px(frame: &Frame, uv: Vec2, params: DenoiseParams) -> Vec4 {
    let radius = params.radius();
    let rad_q = (radius * radius) as f32;

    let inv_sigma_qx2 = 0.5 / (params.sigma * params.sigma);
    let inv_sigma_qx2_pi = FRAC_1_PI * inv_sigma_qx2; // 1 / (2 * PI * sigma^2)

    let inv_threshold_sqx2 = 0.5 / (params.threshold * params.threshold);
    let inv_threshold_sqrt_2pi = INV_SQRT_OF_2PI / params.threshold; // 1 / (sqrt(2*PI) * threshold)

    let size = Vec2::new(frame.width() as f32, frame.height() as f32);
    let centr_px = frame.sample_uv(uv);

    let mut z_buff = 0.0f32;
    let mut a_buff = Vec4::ZERO;

    for x in -radius..=radius {
        // yRadius: have circular trend
        let pt = (rad_q - (x * x) as f32).sqrt().floor() as i32;
        for y in -pt..=pt {
            let d = Vec2::new(x as f32, y as f32);

            let blur_factor = (-d.dot(d) * inv_sigma_qx2).exp() * inv_sigma_qx2_pi;

            let walk_px = frame.sample_uv(uv + d / size);

            let d_c = walk_px - centr_px;
            let delta_factor =
                (-d_c.dot(d_c) * inv_threshold_sqx2).exp() * inv_threshold_sqrt_2pi * blur_factor;

            z_buff += delta_factor;
            a_buff += delta_factor * walk_px;
        }
    }

    if z_buff > 0.0 {
        a_buff / z_buff
    } else {
        centr_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec4, b: Vec4, tol: f32) {
        let d = a - b;
        assert!(
            d.abs().max_element() <= tol,
            "{a:?} != {b:?} (tolerance {tol})"
        );
    }

    #[test]
    fn uniform_frame_is_identity() {
        let c = Vec4::new(0.25, 0.5, 0.75, 1.0);
        let frame = Frame::from_pixels(9, 9, vec![c; 81]);
        for params in [
            DenoiseParams::new(2.0, 1.0, 0.05),
            DenoiseParams::new(0.5, 3.0, 1.0),
            DenoiseParams::default(),
        ] {
            let out = smart_denoise(&frame, frame.texel_center(4, 4), params);
            assert_close(out, c, 1e-4);
        }
    }

    #[test]
    fn single_texel_frame_returns_its_color() {
        // every disc sample clamps onto the one texel
        let c = Vec4::new(0.1, 0.9, 0.4, 1.0);
        let frame = Frame::from_pixels(1, 1, vec![c]);
        let out = smart_denoise(&frame, frame.texel_center(0, 0), DenoiseParams::default());
        assert_close(out, c, 1e-4);
    }

    #[test]
    fn zero_radius_returns_center() {
        let frame = Frame::from_fn(5, 5, |x, y| Vec4::new(x as f32 / 4.0, y as f32 / 4.0, 0.0, 1.0));
        let params = DenoiseParams::new(2.0, 0.0, 0.05);
        let out = smart_denoise(&frame, frame.texel_center(3, 1), params);
        assert_close(out, frame.get(3, 1), 1e-6);
    }

    #[test]
    fn degenerate_params_fall_back_to_center() {
        let frame = Frame::from_fn(5, 5, |x, _| Vec4::new(x as f32 / 4.0, 0.0, 0.0, 1.0));
        let center = frame.get(2, 2);
        // bypass sanitization: sigma = 0 poisons every weight, the guard
        // must return the untouched center instead of NaN
        let out = denoise_px(
            &frame,
            frame.texel_center(2, 2),
            DenoiseParams::new(0.0, 1.0, 0.05),
        );
        assert_eq!(out, center);

        let out = denoise_px(
            &frame,
            frame.texel_center(2, 2),
            DenoiseParams::new(2.0, 1.0, 0.0),
        );
        assert_eq!(out, center);
    }

    #[test]
    fn sanitization_keeps_public_entry_finite() {
        let frame = Frame::from_fn(5, 5, |x, _| Vec4::new(x as f32 / 4.0, 0.0, 0.0, 1.0));
        let out = smart_denoise(
            &frame,
            frame.texel_center(2, 2),
            DenoiseParams::new(0.0, 1.0, 0.0),
        );
        assert!(out.is_finite());
    }

    #[test]
    fn output_stays_in_convex_hull_of_samples() {
        let frame = Frame::from_fn(8, 8, |x, y| {
            Vec4::new(x as f32 / 7.0, y as f32 / 7.0, (x + y) as f32 / 14.0, 1.0)
        });
        let params = DenoiseParams::new(2.0, 1.0, 0.5);
        for y in 0..8 {
            for x in 0..8 {
                let out = smart_denoise(&frame, frame.texel_center(x, y), params);
                let mut lo = Vec4::splat(f32::INFINITY);
                let mut hi = Vec4::splat(f32::NEG_INFINITY);
                for sy in -2..=2i64 {
                    for sx in -2..=2i64 {
                        let s = frame.sample(x as i64 + sx, y as i64 + sy);
                        lo = lo.min(s);
                        hi = hi.max(s);
                    }
                }
                // weighted average, never extrapolated
                assert!(out.cmpge(lo - Vec4::splat(1e-5)).all(), "{out:?} below {lo:?}");
                assert!(out.cmple(hi + Vec4::splat(1e-5)).all(), "{out:?} above {hi:?}");
            }
        }
    }

    #[test]
    fn horizontal_flip_symmetry() {
        let frame = Frame::from_fn(9, 7, |x, y| {
            Vec4::new(
                (x as f32 * 0.37).sin().abs(),
                (y as f32 * 0.53).cos().abs(),
                ((x * y) as f32 * 0.11).sin().abs(),
                1.0,
            )
        });
        let flipped = Frame::from_fn(9, 7, |x, y| frame.get(8 - x, y));
        let params = DenoiseParams::new(1.5, 1.0, 0.3);
        for y in 0..7 {
            for x in 0..9 {
                let a = smart_denoise(&frame, frame.texel_center(x, y), params);
                let b = smart_denoise(&flipped, flipped.texel_center(8 - x, y), params);
                assert_close(a, b, 1e-5);
            }
        }
    }

    #[test]
    fn vertical_flip_symmetry() {
        let frame = Frame::from_fn(6, 8, |x, y| {
            Vec4::new((x + 2 * y) as f32 / 20.0, (y % 3) as f32 / 2.0, 0.5, 1.0)
        });
        let flipped = Frame::from_fn(6, 8, |x, y| frame.get(x, 7 - y));
        let params = DenoiseParams::new(2.0, 1.0, 0.4);
        for y in 0..8 {
            for x in 0..6 {
                let a = smart_denoise(&frame, frame.texel_center(x, y), params);
                let b = smart_denoise(&flipped, flipped.texel_center(x, 7 - y), params);
                assert_close(a, b, 1e-5);
            }
        }
    }
}
