//! Win32 platform implementation

pub mod dpi;
pub mod window;

pub use dpi::Win32Dpi;
pub use window::{apply_suggested_bounds, density_change_from_message, HwndHost, VisualRoot};
