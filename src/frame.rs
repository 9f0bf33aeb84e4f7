use glam::{Vec2, Vec4};
use num_traits::AsPrimitive;

/// Raw channel types a frame can be built from and written back to.
///
/// Integer channels are mapped to [0,1] on the way in and quantized with
/// rounding on the way out; `f32` passes through untouched.
pub trait Channel: Copy + AsPrimitive<f32> + Send + Sync + 'static {
    /// Raw value that maps to 1.0.
    const FULL_SCALE: f32;

    /// Quantize a [0,1] value back to the raw representation.
    fn from_normalized(v: f32) -> Self;
}

impl Channel for u8 {
    const FULL_SCALE: f32 = 255.0;

    fn from_normalized(v: f32) -> Self {
        // float-to-int `as` casts saturate, NaN becomes 0
        (v * Self::FULL_SCALE).round() as u8
    }
}

impl Channel for u16 {
    const FULL_SCALE: f32 = 65535.0;

    fn from_normalized(v: f32) -> Self {
        (v * Self::FULL_SCALE).round() as u16
    }
}

impl Channel for f32 {
    const FULL_SCALE: f32 = 1.0;

    fn from_normalized(v: f32) -> Self {
        v
    }
}

/// One video frame: a row-major grid of RGBA samples with channels in [0,1].
///
/// Sampling out of bounds clamps to the nearest edge texel, matching the
/// clamp-to-edge address mode a live video texture is sampled with.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    data: Vec<Vec4>,
    width: u32,
    height: u32,
}

impl Frame {
    /// Zero-initialized frame.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "frame dimensions must be non-zero, got {width}x{height}"
        );
        Self {
            data: vec![Vec4::ZERO; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Build a frame from an existing pixel vector, row-major.
    ///
    /// # Panics
    /// Panics if `data.len() != width * height` or a dimension is zero.
    pub fn from_pixels(width: u32, height: u32, data: Vec<Vec4>) -> Self {
        assert!(
            width > 0 && height > 0,
            "frame dimensions must be non-zero, got {width}x{height}"
        );
        assert_eq!(
            data.len(),
            width as usize * height as usize,
            "pixel vector length {} does not match {width}x{height}",
            data.len()
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Build a frame by evaluating `f` at every (x, y).
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Vec4) -> Self {
        let mut frame = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                frame.set(x, y, f(x, y));
            }
        }
        frame
    }

    /// Build a frame from a raw channel buffer with 1, 3 or 4 samples per
    /// pixel (inferred from the buffer length). Grayscale is splatted to RGB;
    /// missing alpha becomes opaque.
    ///
    /// # Panics
    /// Panics if the buffer length is not a 1/3/4-sample multiple of
    /// `width * height`.
    pub fn from_channels<C: Channel>(buf: &[C], width: u32, height: u32) -> Self {
        let px_count = width as usize * height as usize;
        assert!(
            px_count > 0,
            "frame dimensions must be non-zero, got {width}x{height}"
        );
        assert!(
            buf.len() % px_count == 0,
            "buffer length {} does not cover {width}x{height} pixels",
            buf.len()
        );
        let scale = 1.0 / C::FULL_SCALE;
        let data = match buf.len() / px_count {
            1 => buf
                .iter()
                .map(|c| {
                    let v = c.as_() * scale;
                    Vec4::new(v, v, v, 1.0)
                })
                .collect(),
            3 => buf
                .chunks_exact(3)
                .map(|c| Vec4::new(c[0].as_() * scale, c[1].as_() * scale, c[2].as_() * scale, 1.0))
                .collect(),
            4 => buf
                .chunks_exact(4)
                .map(|c| {
                    Vec4::new(
                        c[0].as_() * scale,
                        c[1].as_() * scale,
                        c[2].as_() * scale,
                        c[3].as_() * scale,
                    )
                })
                .collect(),
            n => panic!("unsupported sample count {n} per pixel, expected 1, 3 or 4"),
        };
        Self {
            data,
            width,
            height,
        }
    }

    /// Quantize the frame back to a raw channel buffer with the given number
    /// of samples per pixel (1 = take the red plane, 3 = drop alpha).
    ///
    /// # Panics
    /// Panics if `samples` is not 1, 3 or 4.
    pub fn to_channels<C: Channel>(&self, samples: usize) -> Vec<C> {
        match samples {
            1 => self.data.iter().map(|px| C::from_normalized(px.x)).collect(),
            3 => self
                .data
                .iter()
                .flat_map(|px| {
                    [
                        C::from_normalized(px.x),
                        C::from_normalized(px.y),
                        C::from_normalized(px.z),
                    ]
                })
                .collect(),
            4 => self
                .data
                .iter()
                .flat_map(|px| {
                    [
                        C::from_normalized(px.x),
                        C::from_normalized(px.y),
                        C::from_normalized(px.z),
                        C::from_normalized(px.w),
                    ]
                })
                .collect(),
            n => panic!("unsupported sample count {n} per pixel, expected 1, 3 or 4"),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y).
    ///
    /// # Panics
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x},{y}) out of bounds for frame {}x{}",
            self.width,
            self.height
        );
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, px: Vec4) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x},{y}) out of bounds for frame {}x{}",
            self.width,
            self.height
        );
        self.data[y as usize * self.width as usize + x as usize] = px;
    }

    /// Sample at integer texel coordinates with clamp-to-edge addressing.
    #[inline]
    pub fn sample(&self, x: i64, y: i64) -> Vec4 {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.data[y * self.width as usize + x]
    }

    /// Sample at a normalized uv coordinate with clamp-to-edge addressing.
    /// uv maps onto the texel grid so that (x + 0.5)/W lands on texel x.
    #[inline]
    pub fn sample_uv(&self, uv: Vec2) -> Vec4 {
        let x = (uv.x * self.width as f32).floor() as i64;
        let y = (uv.y * self.height as f32).floor() as i64;
        self.sample(x, y)
    }

    /// Normalized coordinate of the center of texel (x, y).
    #[inline]
    pub fn texel_center(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) / self.width as f32,
            (y as f32 + 0.5) / self.height as f32,
        )
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Vec4] {
        &self.data
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Vec4] {
        &mut self.data
    }
}
