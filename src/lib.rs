//! Edge-preserving denoise filter for live video frames.
//!
//! Implements a circular-kernel bilateral blur (spatial Gaussian weighted by
//! color similarity) as a pure per-pixel kernel, plus the frame-level
//! machinery around it: a rayon-parallel whole-frame batch, a reusable
//! render context, and a thread-safe cell for the three live-adjustable
//! parameters (sigma, radius multiplier, threshold).

pub mod context;
pub mod frame;
pub mod kernel;
pub mod params;
pub mod render;

pub use context::{ParamControls, RenderContext};
pub use frame::{Channel, Frame};
pub use kernel::smart_denoise;
pub use params::DenoiseParams;
pub use render::{denoise_buffer, denoise_frame, denoise_frame_into};
