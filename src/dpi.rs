//! DPI awareness modes and the platform capability surface.

use crate::error::DpiError;

/// The universal unscaled baseline (100% = 96 dots per inch). Also the
/// lenient fallback when a monitor density read fails.
pub const BASELINE_DPI: u32 = 96;

/// Process-wide DPI awareness mode, set at most once per process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AwarenessMode {
    /// The system lies to the process: everything is 96 DPI.
    Unaware,
    /// One system-wide density, fixed at logon.
    SystemAware,
    /// The true density of each monitor is reported individually.
    PerMonitorAware,
}

/// Opaque native window handle (HWND on Windows).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// Opaque native monitor handle (HMONITOR on Windows).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MonitorHandle(pub isize);

/// Capability surface over the operating system's DPI configuration and
/// query calls. Stateless request/response; the controller depends only on
/// this trait so platform code can be substituted in tests.
pub trait DpiOps {
    /// Declare the process per-monitor DPI aware. Must be called once,
    /// early, before any window is realized. Returns false when the
    /// declaration could not be applied; callers treat false as fatal for
    /// awareness purposes.
    fn declare_per_monitor_aware(&self) -> bool;

    /// Read back the currently active awareness mode. Strict: errors are
    /// propagated, never replaced with a guess.
    fn query_awareness(&self) -> Result<AwarenessMode, DpiError>;

    /// Effective density of the monitor nearest the window. Lenient: a
    /// failed read yields [`BASELINE_DPI`] rather than an error.
    fn density_for_window(&self, window: WindowHandle) -> u32;

    /// Density of the default display device context.
    fn system_density(&self) -> u32;

    /// The monitor the window currently occupies, defaulting to the nearest
    /// one when the window does not overlap any monitor exactly.
    fn monitor_for_window(&self, window: WindowHandle) -> MonitorHandle;
}
