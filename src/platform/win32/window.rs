//! Win32 window glue: density-changed message filtering and geometry-only
//! placement.

use windows::Win32::Foundation::{HWND, LPARAM, RECT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    SetWindowPos, SWP_NOACTIVATE, SWP_NOOWNERZORDER, SWP_NOZORDER, WM_DPICHANGED,
};

use crate::controller::WindowHost;
use crate::dpi::WindowHandle;
use crate::state::{decode_density, DensityChange, Rect};

pub(crate) fn hwnd(window: WindowHandle) -> HWND {
    HWND(window.0 as _)
}

/// Translate a raw window message into a density-change payload.
///
/// Filters for exactly `WM_DPICHANGED`; every other message yields `None`.
/// Feed this from the host's window procedure or message hook and hand any
/// `Some` to [`DpiWindow::on_density_changed`](crate::DpiWindow::on_density_changed).
pub fn density_change_from_message(
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> Option<DensityChange> {
    if msg != WM_DPICHANGED {
        return None;
    }

    // lParam points at the RECT the system suggests for the new monitor.
    // Only valid for the duration of this message.
    let raw = unsafe { *(lparam.0 as *const RECT) };
    Some(DensityChange {
        density: decode_density(wparam.0),
        suggested: Rect {
            left: raw.left,
            top: raw.top,
            right: raw.right,
            bottom: raw.bottom,
        },
    })
}

/// Move/resize the window to the suggested bounds. Z-order, owner z-order,
/// and activation are all left untouched.
pub fn apply_suggested_bounds(window: WindowHandle, bounds: Rect) {
    unsafe {
        let _ = SetWindowPos(
            hwnd(window),
            None,
            bounds.left,
            bounds.top,
            bounds.width(),
            bounds.height(),
            SWP_NOZORDER | SWP_NOOWNERZORDER | SWP_NOACTIVATE,
        );
    }
}

/// The toolkit-side pieces of a window the controller scales: the
/// composition transform ratio, the logical size, and the layout-transform
/// slot on the visual root. Implemented by whatever UI layer hosts the
/// window.
pub trait VisualRoot {
    fn device_transform_ratio(&self) -> f64;
    fn logical_size(&self) -> (f64, f64);
    fn set_logical_size(&mut self, width: f64, height: f64);
    fn set_layout_scale(&mut self, scale: Option<f64>);
}

/// Ready-made [`WindowHost`] over a raw HWND plus the hosting toolkit's
/// visual root. Placement goes through `SetWindowPos`; everything visual is
/// delegated.
pub struct HwndHost<V: VisualRoot> {
    window: WindowHandle,
    root: V,
}

impl<V: VisualRoot> HwndHost<V> {
    pub fn new(window: WindowHandle, root: V) -> Self {
        Self { window, root }
    }

    pub fn root(&self) -> &V {
        &self.root
    }
}

impl<V: VisualRoot> WindowHost for HwndHost<V> {
    fn handle(&self) -> WindowHandle {
        self.window
    }

    fn device_transform_ratio(&self) -> f64 {
        self.root.device_transform_ratio()
    }

    fn logical_size(&self) -> (f64, f64) {
        self.root.logical_size()
    }

    fn set_logical_size(&mut self, width: f64, height: f64) {
        self.root.set_logical_size(width, height);
    }

    fn apply_suggested_bounds(&mut self, bounds: Rect) {
        apply_suggested_bounds(self.window, bounds);
    }

    fn set_layout_scale(&mut self, scale: Option<f64>) {
        self.root.set_layout_scale(scale);
    }
}
