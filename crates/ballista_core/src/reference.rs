use crate::error::SimulationError;
use crate::fields::G;
use crate::params::{Projectile2dParams, Projectile3dParams};
use crate::runner::{simulate_projectile_2d, simulate_projectile_3d};
use serde::Serialize;

/// Closed-form flight time for the drag-free launch: `2 v0 sin(theta) / g`.
pub fn analytic_flight_time(speed: f64, angle_deg: f64) -> f64 {
    2.0 * speed * angle_deg.to_radians().sin() / G
}

/// Closed-form planar range: `v0^2 sin(2 theta) / g`.
pub fn analytic_range_2d(speed: f64, angle_deg: f64) -> f64 {
    speed * speed * (2.0 * angle_deg.to_radians()).sin() / G
}

/// Closed-form horizontal range in 3D: `v0 cos(elevation) * T`.
pub fn analytic_range_3d(speed: f64, elevation_deg: f64) -> f64 {
    speed * elevation_deg.to_radians().cos() * analytic_flight_time(speed, elevation_deg)
}

/// Closed-form apex height: `(v0 sin(theta))^2 / (2 g)`.
pub fn analytic_max_height(speed: f64, angle_deg: f64) -> f64 {
    (speed * angle_deg.to_radians().sin()).powi(2) / (2.0 * G)
}

/// One numerical-versus-analytic figure.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Comparison {
    pub numerical: f64,
    pub analytic: f64,
    /// Absolute error `|numerical - analytic|`.
    pub error: f64,
}

impl Comparison {
    fn new(numerical: f64, analytic: f64) -> Self {
        Self {
            numerical,
            analytic,
            error: (numerical - analytic).abs(),
        }
    }

    /// Error relative to the analytic value (absolute error when the
    /// analytic value is zero).
    pub fn relative_error(&self) -> f64 {
        if self.analytic == 0.0 {
            self.error
        } else {
            self.error / self.analytic.abs()
        }
    }
}

/// Cross-validation of a degenerate-parameter run against the
/// closed-form solution. Used to bound integrator error; never part of
/// a production run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub flight_time: Comparison,
    pub range: Comparison,
    pub max_height: Comparison,
}

fn require_zero(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value == 0.0 {
        Ok(())
    } else {
        Err(SimulationError::UnsupportedReference { name, value })
    }
}

/// Runs the 2D simulation and compares it against the analytic
/// solution. The parameter set must have zero drag, wind, and spin;
/// anything else has no closed form and is rejected.
pub fn validate_projectile_2d(
    params: &Projectile2dParams,
) -> Result<ValidationReport, SimulationError> {
    require_zero("drag_coefficient", params.drag_coefficient)?;
    require_zero("spin_rate", params.spin_rate)?;
    require_zero("wind_x", params.wind[0])?;
    require_zero("wind_y", params.wind[1])?;

    let series = simulate_projectile_2d(params)?;
    Ok(ValidationReport {
        flight_time: Comparison::new(
            series.flight_time(),
            analytic_flight_time(params.speed, params.angle_deg),
        ),
        range: Comparison::new(
            series.downrange_distance().unwrap_or(0.0),
            analytic_range_2d(params.speed, params.angle_deg),
        ),
        max_height: Comparison::new(
            series.max_height().unwrap_or(0.0),
            analytic_max_height(params.speed, params.angle_deg),
        ),
    })
}

/// 3D counterpart of [`validate_projectile_2d`]; range is the
/// horizontal distance of the landing sample.
pub fn validate_projectile_3d(
    params: &Projectile3dParams,
) -> Result<ValidationReport, SimulationError> {
    require_zero("drag_coefficient", params.drag_coefficient)?;
    require_zero("wind_x", params.wind[0])?;
    require_zero("wind_y", params.wind[1])?;
    require_zero("wind_z", params.wind[2])?;

    let series = simulate_projectile_3d(params)?;
    Ok(ValidationReport {
        flight_time: Comparison::new(
            series.flight_time(),
            analytic_flight_time(params.speed, params.elevation_deg),
        ),
        range: Comparison::new(
            series.downrange_distance().unwrap_or(0.0),
            analytic_range_3d(params.speed, params.elevation_deg),
        ),
        max_height: Comparison::new(
            series.max_height().unwrap_or(0.0),
            analytic_max_height(params.speed, params.elevation_deg),
        ),
    })
}
