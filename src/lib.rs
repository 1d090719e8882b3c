//! Per-monitor DPI awareness and live window rescaling.
//!
//! The core is platform-neutral: a capability trait for the operating
//! system's DPI queries ([`DpiOps`]), a collaborator trait for the hosting
//! window ([`WindowHost`]), and a controller ([`DpiWindow`]) that drives the
//! awareness-declaration / realize / rescale state machine. The
//! `platform::win32` module supplies the Windows implementations.

// Include the log module so the log! macro works
#[macro_use]
pub mod log;

pub mod controller;
pub mod dpi;
pub mod error;
pub mod platform;
pub mod state;

pub use controller::{DpiWindow, WindowHost};
pub use dpi::{AwarenessMode, DpiOps, MonitorHandle, WindowHandle, BASELINE_DPI};
pub use error::DpiError;
pub use state::{decode_density, DensityChange, Rect, WindowDpiState};
