use crate::error::SimulationError;
use crate::fields::{
    ForceModel, LorenzField, ProjectileAerodynamics2d, ProjectileAerodynamics3d,
};
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Default integration step for projectile runs, s.
pub const DEFAULT_PROJECTILE_DT: f64 = 1e-3;

/// Launch parameters for a planar projectile with drag, wind, and spin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile2dParams {
    /// Launch speed v0, m/s.
    pub speed: f64,
    /// Launch angle above the horizontal, degrees.
    pub angle_deg: f64,
    /// Wind vector (x, y), m/s. Zero vector means still air.
    pub wind: [f64; 2],
    /// Projectile mass, kg.
    pub mass: f64,
    /// Cross-section radius, m.
    pub radius: f64,
    /// Drag coefficient Cd.
    pub drag_coefficient: f64,
    /// Spin rate omega, rad/s.
    pub spin_rate: f64,
    /// Integration step, s.
    pub dt: f64,
}

impl Projectile2dParams {
    pub fn validate(&self) -> Result<(), SimulationError> {
        require_non_negative("speed", self.speed)?;
        require_finite("angle_deg", self.angle_deg)?;
        require_finite("wind_x", self.wind[0])?;
        require_finite("wind_y", self.wind[1])?;
        require_positive("mass", self.mass)?;
        require_non_negative("radius", self.radius)?;
        require_non_negative("drag_coefficient", self.drag_coefficient)?;
        require_finite("spin_rate", self.spin_rate)?;
        require_positive("dt", self.dt)?;
        Ok(())
    }

    /// Initial `[x, y, vx, vy]` at the origin, velocity from the launch
    /// angle.
    pub fn initial_state(&self) -> Vec<f64> {
        let angle = self.angle_deg.to_radians();
        vec![0.0, 0.0, self.speed * angle.cos(), self.speed * angle.sin()]
    }

    pub fn force_model(&self) -> ForceModel {
        ForceModel::Projectile2d(ProjectileAerodynamics2d {
            wind: Vector2::new(self.wind[0], self.wind[1]),
            mass: self.mass,
            radius: self.radius,
            drag_coefficient: self.drag_coefficient,
            spin_rate: self.spin_rate,
        })
    }
}

/// Launch parameters for a 3D projectile with drag and wind (no spin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile3dParams {
    /// Launch speed v0, m/s.
    pub speed: f64,
    /// Elevation above the horizontal, degrees.
    pub elevation_deg: f64,
    /// Azimuth from the x axis, degrees.
    pub azimuth_deg: f64,
    /// Wind vector (x, y, z), m/s.
    pub wind: [f64; 3],
    pub mass: f64,
    pub radius: f64,
    pub drag_coefficient: f64,
    pub dt: f64,
}

impl Projectile3dParams {
    pub fn validate(&self) -> Result<(), SimulationError> {
        require_non_negative("speed", self.speed)?;
        require_finite("elevation_deg", self.elevation_deg)?;
        require_finite("azimuth_deg", self.azimuth_deg)?;
        require_finite("wind_x", self.wind[0])?;
        require_finite("wind_y", self.wind[1])?;
        require_finite("wind_z", self.wind[2])?;
        require_positive("mass", self.mass)?;
        require_non_negative("radius", self.radius)?;
        require_non_negative("drag_coefficient", self.drag_coefficient)?;
        require_positive("dt", self.dt)?;
        Ok(())
    }

    /// Initial `[x, y, z, vx, vy, vz]` at the origin.
    pub fn initial_state(&self) -> Vec<f64> {
        let elevation = self.elevation_deg.to_radians();
        let azimuth = self.azimuth_deg.to_radians();
        vec![
            0.0,
            0.0,
            0.0,
            self.speed * elevation.cos() * azimuth.cos(),
            self.speed * elevation.cos() * azimuth.sin(),
            self.speed * elevation.sin(),
        ]
    }

    pub fn force_model(&self) -> ForceModel {
        ForceModel::Projectile3d(ProjectileAerodynamics3d {
            wind: Vector3::new(self.wind[0], self.wind[1], self.wind[2]),
            mass: self.mass,
            radius: self.radius,
            drag_coefficient: self.drag_coefficient,
        })
    }
}

/// Parameters for a Lorenz system run over a fixed time horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LorenzParams {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
    /// Initial (x, y, z).
    pub initial: [f64; 3],
    /// Total simulated time, s.
    pub t_max: f64,
    /// Integration step, s.
    pub dt: f64,
}

impl Default for LorenzParams {
    /// The classic chaotic parameter set.
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
            initial: [1.0, 1.0, 1.0],
            t_max: 40.0,
            dt: 0.01,
        }
    }
}

impl LorenzParams {
    pub fn validate(&self) -> Result<(), SimulationError> {
        require_finite("sigma", self.sigma)?;
        require_finite("rho", self.rho)?;
        require_finite("beta", self.beta)?;
        require_finite("initial_x", self.initial[0])?;
        require_finite("initial_y", self.initial[1])?;
        require_finite("initial_z", self.initial[2])?;
        require_positive("t_max", self.t_max)?;
        require_positive("dt", self.dt)?;
        Ok(())
    }

    pub fn initial_state(&self) -> Vec<f64> {
        self.initial.to_vec()
    }

    pub fn force_model(&self) -> ForceModel {
        ForceModel::Lorenz(LorenzField {
            sigma: self.sigma,
            rho: self.rho,
            beta: self.beta,
        })
    }
}

fn require_finite(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { name, value })
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), SimulationError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { name, value })
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<(), SimulationError> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;

    fn base_2d() -> Projectile2dParams {
        Projectile2dParams {
            speed: 25.0,
            angle_deg: 75.0,
            wind: [0.0, 0.0],
            mass: 1.0,
            radius: 0.1,
            drag_coefficient: 0.6,
            spin_rate: 60.0,
            dt: DEFAULT_PROJECTILE_DT,
        }
    }

    fn assert_rejects(result: Result<(), SimulationError>, expected_name: &str) {
        match result {
            Err(SimulationError::InvalidParameter { name, .. }) => {
                assert_eq!(name, expected_name)
            }
            other => panic!("expected InvalidParameter({expected_name}), got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_mass_zero_dt_negative_radius() {
        let mut p = base_2d();
        p.mass = 0.0;
        assert_rejects(p.validate(), "mass");

        let mut p = base_2d();
        p.dt = 0.0;
        assert_rejects(p.validate(), "dt");

        let mut p = base_2d();
        p.radius = -0.1;
        assert_rejects(p.validate(), "radius");
    }

    #[test]
    fn rejects_non_finite_inputs() {
        let mut p = base_2d();
        p.wind[0] = f64::NAN;
        assert_rejects(p.validate(), "wind_x");

        let mut p = base_2d();
        p.speed = f64::INFINITY;
        assert_rejects(p.validate(), "speed");

        let mut lorenz = LorenzParams::default();
        lorenz.t_max = -1.0;
        assert_rejects(lorenz.validate(), "t_max");
    }

    #[test]
    fn launch_angle_resolves_into_velocity_components() {
        let mut p = base_2d();
        p.speed = 10.0;
        p.angle_deg = 90.0;
        let state = p.initial_state();
        assert!(state[2].abs() < 1e-12);
        assert!((state[3] - 10.0).abs() < 1e-12);

        let p3 = Projectile3dParams {
            speed: 50.0,
            elevation_deg: 45.0,
            azimuth_deg: 30.0,
            wind: [0.0, 0.0, 0.0],
            mass: 1.0,
            radius: 0.05,
            drag_coefficient: 0.0,
            dt: DEFAULT_PROJECTILE_DT,
        };
        let state = p3.initial_state();
        let horizontal = 50.0 * std::f64::consts::FRAC_PI_4.cos();
        assert!((state[3] - horizontal * 30f64.to_radians().cos()).abs() < 1e-9);
        assert!((state[4] - horizontal * 30f64.to_radians().sin()).abs() < 1e-9);
        assert!((state[5] - 50.0 * std::f64::consts::FRAC_PI_4.sin()).abs() < 1e-9);
    }
}
