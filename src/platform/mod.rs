//! Platform implementations of the DPI capability surface.

#[cfg(windows)]
pub mod win32;
