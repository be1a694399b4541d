/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds the per-run
 * configuration of the flock. Values are checked once when a Simulation is
 * built and never change while it runs; the viewer edits a copy and restarts.
 */

use std::ops::RangeInclusive;

use crate::error::SimulationError;

// Parameters for one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub resolution: u32,
    pub birds: Option<u32>,
    pub separation: f32,
    pub alignment: f32,
    pub cohesion: f32,
    pub freedom: f32,
    pub bounds: f32,
    // Reproducible initial state and containment scatter
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            resolution: 32,
            birds: None,
            separation: 20.0,
            alignment: 30.0,
            cohesion: 20.0,
            freedom: 0.3,
            bounds: 500.0,
            seed: None,
            parallel: true,
        }
    }
}

/// Zone geometry derived from the three configured distances.
///
/// `radius_sq` is the squared influence radius `Z²`; the two thresholds split
/// the normalized distance interval `[0, 1]` into separation, alignment and
/// cohesion bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zones {
    pub radius_sq: f32,
    pub separation_thresh: f32,
    pub alignment_thresh: f32,
}

impl Zones {
    pub fn new(separation: f32, alignment: f32, cohesion: f32) -> Self {
        let radius = separation + alignment + cohesion;

        // A zero radius disables neighbor influence entirely
        if radius <= 0.0 {
            return Self {
                radius_sq: 0.0,
                separation_thresh: 0.0,
                alignment_thresh: 0.0,
            };
        }

        Self {
            radius_sq: radius * radius,
            separation_thresh: separation / radius,
            alignment_thresh: (separation + alignment) / radius,
        }
    }

    pub fn has_influence(&self) -> bool {
        self.radius_sq > 0.0
    }
}

impl SimulationParams {
    pub fn agent_count(&self) -> usize {
        match self.birds {
            Some(birds) => birds as usize,
            None => (self.resolution as usize) * (self.resolution as usize),
        }
    }

    // Side length of the addressing grid
    pub fn grid_resolution(&self) -> u32 {
        match self.birds {
            Some(birds) => (birds as f64).sqrt().ceil() as u32,
            None => self.resolution,
        }
    }

    pub fn zones(&self) -> Zones {
        Zones::new(self.separation, self.alignment, self.cohesion)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !Self::get_resolution_range().contains(&self.resolution) {
            return Err(SimulationError::InvalidConfig(format!(
                "resolution {} must be within {:?}",
                self.resolution,
                Self::get_resolution_range()
            )));
        }

        if let Some(birds) = self.birds {
            if !Self::get_birds_range().contains(&birds) {
                return Err(SimulationError::InvalidConfig(format!(
                    "birds {} must be within {:?}",
                    birds,
                    Self::get_birds_range()
                )));
            }
        }

        for (name, value) in [
            ("separation", self.separation),
            ("alignment", self.alignment),
            ("cohesion", self.cohesion),
        ] {
            check_float(name, value, Self::get_zone_distance_range())?;
        }

        check_float("freedom", self.freedom, Self::get_freedom_range())?;
        check_float("bounds", self.bounds, Self::get_bounds_range())?;

        Ok(())
    }

    // Get parameter ranges for validation and UI sliders
    pub fn get_resolution_range() -> RangeInclusive<u32> {
        1..=1024
    }

    pub fn get_birds_range() -> RangeInclusive<u32> {
        1..=1_048_576
    }

    pub fn get_zone_distance_range() -> RangeInclusive<f32> {
        0.0..=1000.0
    }

    pub fn get_freedom_range() -> RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_bounds_range() -> RangeInclusive<f32> {
        1.0..=100_000.0
    }
}

fn check_float(name: &str, value: f32, range: RangeInclusive<f32>) -> Result<(), SimulationError> {
    // NaN fails `contains`, infinities fall outside every range above
    if !range.contains(&value) {
        return Err(SimulationError::InvalidConfig(format!(
            "{name} {value} must be a finite value within {range:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = SimulationParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.agent_count(), 1024);
        assert_eq!(params.grid_resolution(), 32);
    }

    #[test]
    fn birds_override_resolution() {
        let params = SimulationParams {
            birds: Some(1000),
            ..SimulationParams::default()
        };
        assert_eq!(params.agent_count(), 1000);
        assert_eq!(params.grid_resolution(), 32);

        let params = SimulationParams {
            birds: Some(1025),
            ..SimulationParams::default()
        };
        assert_eq!(params.grid_resolution(), 33);
    }

    #[test]
    fn default_zone_thresholds() {
        let zones = SimulationParams::default().zones();
        assert_eq!(zones.radius_sq, 4900.0);
        assert!((zones.separation_thresh - 20.0 / 70.0).abs() < 1e-6);
        assert!((zones.alignment_thresh - 50.0 / 70.0).abs() < 1e-6);
    }

    #[test]
    fn zero_radius_has_no_influence() {
        let zones = Zones::new(0.0, 0.0, 0.0);
        assert!(!zones.has_influence());
        assert!(zones.separation_thresh.is_finite());
        assert!(zones.alignment_thresh.is_finite());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cases = [
            SimulationParams { resolution: 0, ..SimulationParams::default() },
            SimulationParams { birds: Some(0), ..SimulationParams::default() },
            SimulationParams { separation: -1.0, ..SimulationParams::default() },
            SimulationParams { cohesion: f32::NAN, ..SimulationParams::default() },
            SimulationParams { freedom: 1.5, ..SimulationParams::default() },
            SimulationParams { bounds: f32::INFINITY, ..SimulationParams::default() },
        ];

        for params in cases {
            assert!(
                matches!(params.validate(), Err(SimulationError::InvalidConfig(_))),
                "{params:?} should be rejected"
            );
        }
    }
}
