//! Per-application render state and shared live-tunable parameters.
//!
//! The original pipeline kept its render state in process-wide globals
//! initialized lazily on the first frame and let UI callbacks poke uniform
//! values at any time. Here the state is an explicitly constructed
//! [`RenderContext`] owned by the application shell, and the tunables live
//! in a [`ParamControls`] cell that each frame snapshots exactly once.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::frame::Frame;
use crate::params::DenoiseParams;
use crate::render::denoise_frame_into;

/// Render state reused across frames: owns the output frame so steady-state
/// rendering allocates nothing.
pub struct RenderContext {
    output: Frame,
}

impl RenderContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            output: Frame::new(width, height),
        }
    }

    /// Filter one frame. The output allocation is reused until a source
    /// with different dimensions arrives (live sources can renegotiate
    /// resolution between frames).
    pub fn render(&mut self, src: &Frame, params: DenoiseParams) -> &Frame {
        if self.output.width() != src.width() || self.output.height() != src.height() {
            log::info!(
                "resizing output frame {}x{} -> {}x{}",
                self.output.width(),
                self.output.height(),
                src.width(),
                src.height()
            );
            self.output = Frame::new(src.width(), src.height());
        }
        let begin = Instant::now();
        denoise_frame_into(src, params, &mut self.output);
        log::debug!(
            "denoised {}x{} frame in {} ms",
            src.width(),
            src.height(),
            begin.elapsed().as_millis()
        );
        &self.output
    }

    /// The most recently rendered frame.
    pub fn output(&self) -> &Frame {
        &self.output
    }
}

/// Cloneable handle to the three live-adjustable filter scalars.
///
/// A control surface mutates the cell from its own thread; the render loop
/// calls [`snapshot`](Self::snapshot) once per frame and passes the copy by
/// value into the batch, so a single frame always sees a consistent set.
#[derive(Clone, Debug)]
pub struct ParamControls {
    cell: Arc<Mutex<DenoiseParams>>,
}

impl ParamControls {
    pub fn new(params: DenoiseParams) -> Self {
        Self {
            cell: Arc::new(Mutex::new(params)),
        }
    }

    pub fn set_sigma(&self, sigma: f32) {
        self.lock().sigma = sigma;
    }

    pub fn set_k_sigma(&self, k_sigma: f32) {
        self.lock().k_sigma = k_sigma;
    }

    pub fn set_threshold(&self, threshold: f32) {
        self.lock().threshold = threshold;
    }

    pub fn set(&self, params: DenoiseParams) {
        *self.lock() = params;
    }

    /// Current parameter set, copied out atomically.
    pub fn snapshot(&self) -> DenoiseParams {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DenoiseParams> {
        self.cell.lock().expect("parameter cell poisoned")
    }
}

impl Default for ParamControls {
    fn default() -> Self {
        Self::new(DenoiseParams::default())
    }
}
