//! DPI snapshot state and density-change notification payloads.

/// Window bounds in physical pixels, mirroring the native RECT layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Immutable snapshot of a window's DPI situation.
///
/// The controller replaces the whole snapshot on each transition instead of
/// mutating fields in place, so observers handed a snapshot never see a
/// half-updated state. `scale_factor` is derived from the two density
/// fields here and nowhere else.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowDpiState {
    /// Latest known density of the monitor hosting the window.
    pub current_density: u32,
    /// Density the rendering toolkit assumed when it computed the window's
    /// initial device-independent layout (96 x device transform ratio).
    pub baseline_density: f64,
    /// `current_density / baseline_density`.
    pub scale_factor: f64,
}

impl WindowDpiState {
    pub fn new(current_density: u32, baseline_density: f64) -> Self {
        Self {
            current_density,
            baseline_density,
            scale_factor: current_density as f64 / baseline_density,
        }
    }

    /// Snapshot for a new monitor density, keeping the baseline.
    pub fn with_density(self, density: u32) -> Self {
        Self::new(density, self.baseline_density)
    }
}

/// Extract the new density from a raw density-changed notification word.
/// The value sits in the low 16 bits; the high bits carry the Y-axis
/// density, identical in practice.
pub fn decode_density(wparam: usize) -> u32 {
    (wparam & 0xFFFF) as u32
}

/// Decoded payload of one density-changed notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityChange {
    /// New monitor density.
    pub density: u32,
    /// Window bounds the system suggests for the new monitor.
    pub suggested: Rect,
}

impl DensityChange {
    pub fn from_raw(wparam: usize, suggested: Rect) -> Self {
        Self {
            density: decode_density(wparam),
            suggested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factor_is_density_over_baseline() {
        assert_eq!(WindowDpiState::new(144, 96.0).scale_factor, 1.5);
        assert_eq!(WindowDpiState::new(96, 96.0).scale_factor, 1.0);
        assert_eq!(WindowDpiState::new(192, 96.0).scale_factor, 2.0);
        assert_eq!(WindowDpiState::new(120, 96.0).scale_factor, 1.25);
    }

    #[test]
    fn test_with_density_keeps_baseline() {
        let state = WindowDpiState::new(96, 96.0).with_density(120);
        assert_eq!(state.current_density, 120);
        assert_eq!(state.baseline_density, 96.0);
        assert_eq!(state.scale_factor, 1.25);
    }

    #[test]
    fn test_decode_density_takes_low_16_bits() {
        // Packed X/Y densities: 0x0096 (150) high, 0x0078 (120) low.
        assert_eq!(decode_density(0x0096_0078), 120);
        assert_eq!(decode_density(96), 96);
        assert_eq!(decode_density(0xFFFF_0090), 144);
    }

    #[test]
    fn test_from_raw_decodes_and_carries_rect() {
        let suggested = Rect {
            left: 10,
            top: 20,
            right: 910,
            bottom: 620,
        };
        let change = DensityChange::from_raw(0x0090_0090, suggested);
        assert_eq!(change.density, 144);
        assert_eq!(change.suggested, suggested);
    }

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect {
            left: 100,
            top: 50,
            right: 1000,
            bottom: 650,
        };
        assert_eq!(rect.width(), 900);
        assert_eq!(rect.height(), 600);
    }
}
