//! Win32 DPI queries behind the capability trait.
//!
//! Awareness lives in shcore, monitor resolution in user32, and the system
//! density comes from the default screen device context via gdi32.

use windows::Win32::Graphics::Gdi::{
    GetDC, GetDeviceCaps, MonitorFromWindow, ReleaseDC, HDC, HMONITOR, LOGPIXELSX,
    MONITOR_DEFAULTTONEAREST,
};
use windows::Win32::UI::HiDpi::{
    GetDpiForMonitor, GetProcessDpiAwareness, SetProcessDpiAwareness, MDT_EFFECTIVE_DPI,
    PROCESS_DPI_UNAWARE, PROCESS_PER_MONITOR_DPI_AWARE, PROCESS_SYSTEM_DPI_AWARE,
};

use super::window::hwnd;
use crate::dpi::{AwarenessMode, DpiOps, MonitorHandle, WindowHandle, BASELINE_DPI};
use crate::error::DpiError;

/// Device context for the default display, released on drop so the handle
/// never leaks past a single query even on early return.
struct ScreenDc(HDC);

impl ScreenDc {
    fn acquire() -> Self {
        Self(unsafe { GetDC(None) })
    }

    fn raw(&self) -> HDC {
        self.0
    }
}

impl Drop for ScreenDc {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(None, self.0);
        }
    }
}

/// Win32 implementation of [`DpiOps`].
pub struct Win32Dpi;

impl DpiOps for Win32Dpi {
    fn declare_per_monitor_aware(&self) -> bool {
        // Per-process, one-shot: fails when the manifest or an earlier call
        // already fixed a different awareness mode.
        unsafe { SetProcessDpiAwareness(PROCESS_PER_MONITOR_DPI_AWARE).is_ok() }
    }

    fn query_awareness(&self) -> Result<AwarenessMode, DpiError> {
        let awareness = unsafe { GetProcessDpiAwareness(None) }
            .map_err(|e| DpiError::AwarenessQuery(e.to_string()))?;

        Ok(match awareness {
            PROCESS_DPI_UNAWARE => AwarenessMode::Unaware,
            PROCESS_SYSTEM_DPI_AWARE => AwarenessMode::SystemAware,
            PROCESS_PER_MONITOR_DPI_AWARE => AwarenessMode::PerMonitorAware,
            other => {
                return Err(DpiError::AwarenessQuery(format!(
                    "unexpected awareness value {}",
                    other.0
                )))
            }
        })
    }

    fn density_for_window(&self, window: WindowHandle) -> u32 {
        let monitor = self.monitor_for_window(window);
        let mut dpi_x = 0u32;
        let mut dpi_y = 0u32;

        let read = unsafe {
            GetDpiForMonitor(
                HMONITOR(monitor.0 as _),
                MDT_EFFECTIVE_DPI,
                &mut dpi_x,
                &mut dpi_y,
            )
        };
        match read {
            Ok(()) => dpi_x,
            Err(e) => {
                log!("GetDpiForMonitor failed ({}), using {} DPI", e, BASELINE_DPI);
                BASELINE_DPI
            }
        }
    }

    fn system_density(&self) -> u32 {
        let dc = ScreenDc::acquire();
        unsafe { GetDeviceCaps(dc.raw(), LOGPIXELSX) as u32 }
    }

    fn monitor_for_window(&self, window: WindowHandle) -> MonitorHandle {
        // Nearest, never null or primary: a window straddling monitors still
        // resolves to something sensible.
        let monitor = unsafe { MonitorFromWindow(hwnd(window), MONITOR_DEFAULTTONEAREST) };
        MonitorHandle(monitor.0 as isize)
    }
}
