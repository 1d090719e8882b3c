//! DPI-aware window controller state machine.
//!
//! Lifecycle: construction declares per-monitor awareness (fatal on
//! failure), the host's "loaded" signal triggers the initial scale
//! computation, and each density-changed notification repositions the
//! window and reapplies the visual transform.

use crate::dpi::{AwarenessMode, DpiOps, WindowHandle, BASELINE_DPI};
use crate::error::DpiError;
use crate::state::{DensityChange, Rect, WindowDpiState};

/// What the controller needs from the hosting window. The host owns window
/// construction, the message loop, and the visual tree; the controller only
/// reaches through this trait.
pub trait WindowHost {
    /// Native handle of the realized window.
    fn handle(&self) -> WindowHandle;

    /// Device-to-logical pixel ratio of the realized window's composition
    /// target. Baseline density is 96 times this.
    fn device_transform_ratio(&self) -> f64;

    /// Current logical width and height.
    fn logical_size(&self) -> (f64, f64);

    fn set_logical_size(&mut self, width: f64, height: f64);

    /// Move/resize the native window to the suggested bounds without
    /// touching z-order, owner z-order, or activation.
    fn apply_suggested_bounds(&mut self, bounds: Rect);

    /// Attach a uniform scale transform to the window's visual root, or
    /// clear the slot entirely when `None`.
    fn set_layout_scale(&mut self, scale: Option<f64>);
}

type DpiChangedHandler = Box<dyn FnMut(WindowDpiState)>;

/// Per-window DPI lifecycle controller.
///
/// Owns the only mutable DPI state for its window; everything runs on the
/// window's UI thread, driven by the host's message loop.
pub struct DpiWindow<O: DpiOps> {
    ops: O,
    per_monitor_enabled: bool,
    state: Option<WindowDpiState>,
    dpi_changed: Option<DpiChangedHandler>,
}

impl<O: DpiOps> DpiWindow<O> {
    /// Declare per-monitor awareness and build the controller.
    ///
    /// The declaration is a per-process setting that must happen before any
    /// window is realized, so it runs here rather than at load time. A
    /// failed declaration aborts construction; no message hook exists yet
    /// at that point.
    pub fn new(ops: O) -> Result<Self, DpiError> {
        if !ops.declare_per_monitor_aware() {
            return Err(DpiError::AwarenessDeclaration);
        }
        Ok(Self {
            ops,
            per_monitor_enabled: true,
            state: None,
            dpi_changed: None,
        })
    }

    /// Register the observer notified after each confirmed density change.
    /// The payload is the snapshot the controller just switched to.
    pub fn on_dpi_changed<F>(&mut self, handler: F)
    where
        F: FnMut(WindowDpiState) + 'static,
    {
        self.dpi_changed = Some(Box::new(handler));
    }

    /// "Window loaded" transition: compute the initial scale and apply it.
    ///
    /// The toolkit has already sized the window for the system density; this
    /// re-sizes it for the density of the monitor it actually landed on.
    /// The caller installs the message hook once this returns.
    pub fn on_loaded(&mut self, host: &mut dyn WindowHost) {
        if !self.per_monitor_enabled {
            // Awareness was never achieved; leave the window system-scaled.
            return;
        }

        let baseline = BASELINE_DPI as f64 * host.device_transform_ratio();
        let current = self.ops.density_for_window(host.handle());
        let state = WindowDpiState::new(current, baseline);

        let (width, height) = host.logical_size();
        host.set_logical_size(width * state.scale_factor, height * state.scale_factor);
        apply_layout_scale(host, &state);

        log!(
            "window realized: monitor DPI {}, baseline {}, scale {}",
            state.current_density,
            state.baseline_density,
            state.scale_factor
        );
        self.state = Some(state);
    }

    /// Density-changed notification handler.
    ///
    /// The suggested bounds are applied unconditionally and first; rescaling
    /// happens only when the decoded density actually differs, so repeated
    /// identical notifications neither rewrite the transform nor re-fire the
    /// event.
    pub fn on_density_changed(&mut self, host: &mut dyn WindowHost, change: DensityChange) {
        host.apply_suggested_bounds(change.suggested);

        let Some(state) = self.state else {
            // Not realized yet; nothing to rescale.
            return;
        };
        if change.density == state.current_density {
            return;
        }

        let next = state.with_density(change.density);
        apply_layout_scale(host, &next);
        self.state = Some(next);

        log!(
            "monitor DPI changed {} -> {}, scale {}",
            state.current_density,
            next.current_density,
            next.scale_factor
        );
        if let Some(handler) = self.dpi_changed.as_mut() {
            handler(next);
        }
    }

    /// Latest known monitor density, 0 until the window is realized.
    pub fn current_density(&self) -> u32 {
        self.state.map(|s| s.current_density).unwrap_or(0)
    }

    /// Current scale factor, 1.0 until the window is realized.
    pub fn scale_factor(&self) -> f64 {
        self.state.map(|s| s.scale_factor).unwrap_or(1.0)
    }

    /// Snapshot of the current DPI state, if realized.
    pub fn dpi_state(&self) -> Option<WindowDpiState> {
        self.state
    }

    /// One-line summary of the active awareness mode and the density in
    /// use. Strict on the awareness query.
    pub fn describe_configuration(&self) -> Result<String, DpiError> {
        let awareness = self.ops.query_awareness()?;
        let system = self.ops.system_density();

        Ok(match awareness {
            AwarenessMode::Unaware => {
                format!("Application is DPI Unaware. Using {} DPI.", system)
            }
            AwarenessMode::SystemAware => {
                format!("Application is System DPI Aware. Using System DPI: {}.", system)
            }
            AwarenessMode::PerMonitorAware => format!(
                "Application is Per-Monitor DPI Aware. Using monitor DPI = {} (System DPI = {}).",
                self.current_density(),
                system
            ),
        })
    }
}

/// Attach the scale transform, or clear the slot exactly when unscaled so
/// no near-identity transform lingers.
fn apply_layout_scale(host: &mut dyn WindowHost, state: &WindowDpiState) {
    if state.scale_factor != 1.0 {
        host.set_layout_scale(Some(state.scale_factor));
    } else {
        host.set_layout_scale(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpi::MonitorHandle;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeOps {
        declare_ok: bool,
        awareness: AwarenessMode,
        density: u32,
        density_reads: Rc<Cell<usize>>,
    }

    impl FakeOps {
        fn at(density: u32) -> Self {
            Self {
                declare_ok: true,
                awareness: AwarenessMode::PerMonitorAware,
                density,
                density_reads: Rc::new(Cell::new(0)),
            }
        }
    }

    impl DpiOps for FakeOps {
        fn declare_per_monitor_aware(&self) -> bool {
            self.declare_ok
        }

        fn query_awareness(&self) -> Result<AwarenessMode, DpiError> {
            Ok(self.awareness)
        }

        fn density_for_window(&self, _window: WindowHandle) -> u32 {
            self.density_reads.set(self.density_reads.get() + 1);
            self.density
        }

        fn system_density(&self) -> u32 {
            96
        }

        fn monitor_for_window(&self, _window: WindowHandle) -> MonitorHandle {
            MonitorHandle(1)
        }
    }

    struct FakeHost {
        size: (f64, f64),
        ratio: f64,
        layout_scale: Option<f64>,
        scale_writes: usize,
        bounds: Vec<Rect>,
    }

    impl FakeHost {
        fn new(width: f64, height: f64) -> Self {
            Self {
                size: (width, height),
                ratio: 1.0,
                layout_scale: None,
                scale_writes: 0,
                bounds: Vec::new(),
            }
        }
    }

    impl WindowHost for FakeHost {
        fn handle(&self) -> WindowHandle {
            WindowHandle(42)
        }

        fn device_transform_ratio(&self) -> f64 {
            self.ratio
        }

        fn logical_size(&self) -> (f64, f64) {
            self.size
        }

        fn set_logical_size(&mut self, width: f64, height: f64) {
            self.size = (width, height);
        }

        fn apply_suggested_bounds(&mut self, bounds: Rect) {
            self.bounds.push(bounds);
        }

        fn set_layout_scale(&mut self, scale: Option<f64>) {
            self.layout_scale = scale;
            self.scale_writes += 1;
        }
    }

    fn change_to(density: u32) -> DensityChange {
        DensityChange {
            density,
            suggested: Rect {
                left: 0,
                top: 0,
                right: 900,
                bottom: 600,
            },
        }
    }

    #[test]
    fn test_declaration_failure_aborts_construction() {
        let mut ops = FakeOps::at(96);
        ops.declare_ok = false;
        let density_reads = ops.density_reads.clone();

        let result = DpiWindow::new(ops);
        assert!(matches!(result, Err(DpiError::AwarenessDeclaration)));
        // Nothing else ran: no density query, hence no hook installation.
        assert_eq!(density_reads.get(), 0);
    }

    #[test]
    fn test_realize_scales_window_for_monitor_density() {
        let mut window = DpiWindow::new(FakeOps::at(144)).unwrap();
        let mut host = FakeHost::new(600.0, 400.0);

        window.on_loaded(&mut host);

        assert_eq!(window.current_density(), 144);
        assert_eq!(window.scale_factor(), 1.5);
        assert_eq!(host.size, (900.0, 600.0));
        assert_eq!(host.layout_scale, Some(1.5));
    }

    #[test]
    fn test_realize_at_baseline_density_clears_transform() {
        let mut window = DpiWindow::new(FakeOps::at(96)).unwrap();
        let mut host = FakeHost::new(600.0, 400.0);
        host.layout_scale = Some(1.0000001); // stale residue from the host

        window.on_loaded(&mut host);

        assert_eq!(window.scale_factor(), 1.0);
        assert_eq!(host.size, (600.0, 400.0));
        assert_eq!(host.layout_scale, None);
    }

    #[test]
    fn test_clearing_transform_twice_leaves_it_cleared() {
        let mut host = FakeHost::new(600.0, 400.0);
        let unscaled = WindowDpiState::new(96, 96.0);

        apply_layout_scale(&mut host, &unscaled);
        apply_layout_scale(&mut host, &unscaled);

        assert_eq!(host.layout_scale, None);
    }

    #[test]
    fn test_density_change_fires_event_exactly_once() {
        let mut window = DpiWindow::new(FakeOps::at(96)).unwrap();
        let mut host = FakeHost::new(600.0, 400.0);
        let fired = Rc::new(Cell::new(0usize));
        let fired_in_handler = fired.clone();
        window.on_dpi_changed(move |state| {
            assert_eq!(state.current_density, 144);
            assert_eq!(state.scale_factor, 1.5);
            fired_in_handler.set(fired_in_handler.get() + 1);
        });
        window.on_loaded(&mut host);

        window.on_density_changed(&mut host, change_to(144));
        assert_eq!(fired.get(), 1);
        assert_eq!(host.layout_scale, Some(1.5));
        assert_eq!(window.current_density(), 144);

        // Same density again: bounds still applied, nothing else happens.
        let writes_before = host.scale_writes;
        window.on_density_changed(&mut host, change_to(144));
        assert_eq!(fired.get(), 1);
        assert_eq!(host.scale_writes, writes_before);
        assert_eq!(host.bounds.len(), 2);
    }

    #[test]
    fn test_returning_to_baseline_clears_transform() {
        let mut window = DpiWindow::new(FakeOps::at(144)).unwrap();
        let mut host = FakeHost::new(600.0, 400.0);
        window.on_loaded(&mut host);
        assert_eq!(host.layout_scale, Some(1.5));

        window.on_density_changed(&mut host, change_to(96));
        assert_eq!(host.layout_scale, None);
        assert_eq!(window.scale_factor(), 1.0);
    }

    #[test]
    fn test_suggested_bounds_applied_before_realize_state_exists() {
        let mut window = DpiWindow::new(FakeOps::at(96)).unwrap();
        let mut host = FakeHost::new(600.0, 400.0);
        let fired = Rc::new(Cell::new(0usize));
        let fired_in_handler = fired.clone();
        window.on_dpi_changed(move |_| fired_in_handler.set(fired_in_handler.get() + 1));

        // Notification before the loaded signal: geometry only.
        window.on_density_changed(&mut host, change_to(144));
        assert_eq!(host.bounds.len(), 1);
        assert_eq!(host.scale_writes, 0);
        assert_eq!(fired.get(), 0);
        assert!(window.dpi_state().is_none());
    }

    #[test]
    fn test_fallback_density_leaves_baseline_untouched() {
        // Host realized on a 150% toolkit baseline while the monitor read
        // degraded to the 96 fallback.
        let mut window = DpiWindow::new(FakeOps::at(96)).unwrap();
        let mut host = FakeHost::new(600.0, 400.0);
        host.ratio = 1.5;

        window.on_loaded(&mut host);

        let state = window.dpi_state().unwrap();
        assert_eq!(state.baseline_density, 144.0);
        assert_eq!(state.current_density, 96);
        assert_eq!(state.scale_factor, 96.0 / 144.0);
    }

    #[test]
    fn test_describe_configuration_variants() {
        let mut ops = FakeOps::at(96);
        ops.awareness = AwarenessMode::Unaware;
        let window = DpiWindow::new(ops).unwrap();
        assert_eq!(
            window.describe_configuration().unwrap(),
            "Application is DPI Unaware. Using 96 DPI."
        );

        let mut ops = FakeOps::at(96);
        ops.awareness = AwarenessMode::SystemAware;
        let window = DpiWindow::new(ops).unwrap();
        assert_eq!(
            window.describe_configuration().unwrap(),
            "Application is System DPI Aware. Using System DPI: 96."
        );

        let mut window = DpiWindow::new(FakeOps::at(120)).unwrap();
        let mut host = FakeHost::new(600.0, 400.0);
        window.on_loaded(&mut host);
        assert_eq!(
            window.describe_configuration().unwrap(),
            "Application is Per-Monitor DPI Aware. Using monitor DPI = 120 (System DPI = 96)."
        );
    }
}
