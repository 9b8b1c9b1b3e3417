//! Air-dash state machine.
//!
//! The dash is an air-mobility tool: it can only start while airborne, runs
//! for a fixed number of ticks, and is spent until the character touches
//! ground again. Holding the dash input does not restart it.

use serde::{Deserialize, Serialize};

/// Dash state tracked across ticks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DashState {
    /// A dash is currently in progress.
    active: bool,

    /// Ticks elapsed since the dash started.
    elapsed_ticks: u32,

    /// The single air charge has not been spent yet.
    available: bool,
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            active: false,
            elapsed_ticks: 0,
            available: true,
        }
    }
}

impl DashState {
    /// Try to begin a dash.
    ///
    /// Starts only when the input is held, no dash is already running, the
    /// air charge is available, and the character is airborne. Returns
    /// whether a dash began this tick.
    pub fn try_start(&mut self, dash_held: bool, grounded: bool) -> bool {
        if dash_held && !self.active && self.available && !grounded {
            self.active = true;
            self.available = false;
            self.elapsed_ticks = 0;
            return true;
        }
        false
    }

    /// Advance the dash by one tick and return the planar speed factor.
    ///
    /// While active, movement is scaled by `factor`; once the elapsed count
    /// exceeds `duration_ticks` the dash ends and the factor returns to 1.
    pub fn advance(&mut self, duration_ticks: u32, factor: f32) -> f32 {
        if !self.active {
            return 1.0;
        }
        if self.elapsed_ticks > duration_ticks {
            self.elapsed_ticks = 0;
            self.active = false;
            return 1.0;
        }
        self.elapsed_ticks += 1;
        factor
    }

    /// Reset on touching ground: any running dash is cancelled and the air
    /// charge is restored.
    pub fn land(&mut self) {
        self.active = false;
        self.elapsed_ticks = 0;
        self.available = true;
    }

    /// A dash is currently in progress.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The air charge has not been spent since the last landing.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Ticks elapsed in the current dash.
    #[inline]
    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: u32 = 10;
    const FACTOR: f32 = 2.5;

    #[test]
    fn dash_cannot_start_on_ground() {
        let mut dash = DashState::default();
        assert!(!dash.try_start(true, true));
        assert!(!dash.is_active());
        // The charge is untouched by the refused start.
        assert!(dash.is_available());
    }

    #[test]
    fn dash_starts_in_air_and_spends_charge() {
        let mut dash = DashState::default();
        assert!(dash.try_start(true, false));
        assert!(dash.is_active());
        assert!(!dash.is_available());
    }

    #[test]
    fn dash_does_not_restart_while_active() {
        let mut dash = DashState::default();
        assert!(dash.try_start(true, false));
        assert!(!dash.try_start(true, false));
    }

    #[test]
    fn one_dash_per_airtime() {
        let mut dash = DashState::default();
        assert!(dash.try_start(true, false));

        // Run the dash to completion in the air.
        while dash.is_active() {
            dash.advance(DURATION, FACTOR);
        }

        // Still airborne, still held: no second dash.
        assert!(!dash.try_start(true, false));

        // After landing the charge is back.
        dash.land();
        assert!(dash.try_start(true, false));
    }

    #[test]
    fn dash_ends_after_duration_despite_held_input() {
        let mut dash = DashState::default();
        assert!(dash.try_start(true, false));

        let mut scaled_ticks = 0;
        for _ in 0..40 {
            dash.try_start(true, false);
            if dash.advance(DURATION, FACTOR) > 1.0 {
                scaled_ticks += 1;
            }
        }

        assert!(!dash.is_active());
        // Elapsed runs 0..=DURATION inclusive before the cutoff trips.
        assert_eq!(scaled_ticks, DURATION + 1);
    }

    #[test]
    fn landing_mid_dash_cancels_and_rearms() {
        let mut dash = DashState::default();
        assert!(dash.try_start(true, false));
        dash.advance(DURATION, FACTOR);
        assert!(dash.is_active());

        dash.land();
        assert!(!dash.is_active());
        assert_eq!(dash.elapsed_ticks(), 0);
        assert!(dash.is_available());
    }

    #[test]
    fn inactive_dash_has_unit_factor() {
        let mut dash = DashState::default();
        assert_eq!(dash.advance(DURATION, FACTOR), 1.0);
    }
}
