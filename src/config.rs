use std::time::Duration;

use crate::constants::{
    ACTIVATION_DELAY, DESIGN_GRID_SIZE, DESIGN_HANDLE_SIZE, RESIZE_GRIP_SIZE,
};

/// Tunables consulted by the window manager at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WmConfig {
    pub design_grid: f64,
    pub design_handle_size: f64,
    pub activation_delay: Duration,
    pub resize_grip: f64,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            design_grid: DESIGN_GRID_SIZE,
            design_handle_size: DESIGN_HANDLE_SIZE,
            activation_delay: ACTIVATION_DELAY,
            resize_grip: RESIZE_GRIP_SIZE,
        }
    }
}

impl WmConfig {
    pub fn with_design_grid(mut self, grid: f64) -> Self {
        if grid.is_finite() && grid > 0.0 {
            self.design_grid = grid;
        }
        self
    }

    pub fn with_activation_delay(mut self, delay: Duration) -> Self {
        self.activation_delay = delay;
        self
    }
}
