/// Lower clamp for `sigma` and `threshold`; both enter the kernel as
/// divisors, so zero or negative values must never reach it.
pub const MIN_SIGMA: f32 = 1e-4;
pub const MIN_THRESHOLD: f32 = 1e-4;

/// Filter parameters, read once per frame.
///
/// `sigma` is the spatial standard deviation of the blur, `k_sigma` scales
/// the kernel radius (`radius = round(k_sigma * sigma)`), and `threshold` is
/// the color-similarity standard deviation: smaller values preserve edges
/// harder, larger values approach a plain Gaussian blur.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DenoiseParams {
    pub sigma: f32,
    pub k_sigma: f32,
    pub threshold: f32,
}

impl DenoiseParams {
    pub fn new(sigma: f32, k_sigma: f32, threshold: f32) -> Self {
        Self {
            sigma,
            k_sigma,
            threshold,
        }
    }

    /// Clamp the parameters into the domain the kernel is defined on:
    /// strictly positive `sigma`/`threshold`, non-negative `k_sigma`.
    /// NaN collapses to the respective minimum.
    pub fn sanitized(self) -> Self {
        Self {
            sigma: self.sigma.max(MIN_SIGMA),
            k_sigma: self.k_sigma.max(0.0),
            threshold: self.threshold.max(MIN_THRESHOLD),
        }
    }

    /// Effective integer kernel radius.
    pub fn radius(&self) -> i32 {
        (self.k_sigma * self.sigma).round() as i32
    }
}

impl Default for DenoiseParams {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            k_sigma: 1.0,
            threshold: 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_slider_positions() {
        let p = DenoiseParams::default();
        assert_eq!(p.sigma, 10.0);
        assert_eq!(p.k_sigma, 1.0);
        assert_eq!(p.threshold, 0.05);
    }

    #[test]
    fn sanitized_clamps_degenerate_values() {
        let p = DenoiseParams::new(0.0, -2.0, -1.0).sanitized();
        assert_eq!(p.sigma, MIN_SIGMA);
        assert_eq!(p.k_sigma, 0.0);
        assert_eq!(p.threshold, MIN_THRESHOLD);

        let p = DenoiseParams::new(f32::NAN, f32::NAN, f32::NAN).sanitized();
        assert_eq!(p.sigma, MIN_SIGMA);
        assert_eq!(p.k_sigma, 0.0);
        assert_eq!(p.threshold, MIN_THRESHOLD);
    }

    #[test]
    fn sanitized_leaves_valid_values_alone() {
        let p = DenoiseParams::new(2.0, 1.5, 0.1);
        assert_eq!(p.sanitized(), p);
    }

    #[test]
    fn radius_rounds_k_sigma_times_sigma() {
        assert_eq!(DenoiseParams::new(2.0, 1.0, 0.05).radius(), 2);
        assert_eq!(DenoiseParams::new(1.5, 1.0, 0.05).radius(), 2);
        assert_eq!(DenoiseParams::new(10.0, 0.0, 0.05).radius(), 0);
        assert_eq!(DenoiseParams::new(10.0, 0.7, 0.05).radius(), 7);
    }
}
