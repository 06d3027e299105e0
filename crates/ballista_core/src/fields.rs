use crate::traits::VectorField;
use nalgebra::{Vector2, Vector3};

/// Gravitational acceleration at the surface, m/s^2.
pub const G: f64 = 9.81;
/// Air density at ground level, kg/m^3.
pub const AIR_DENSITY: f64 = 1.29;

/// Quadratic drag plus Magnus lift in a vertical plane.
///
/// State layout: `[x, y, vx, vy]` with y the altitude axis.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileAerodynamics2d {
    pub wind: Vector2<f64>,
    pub mass: f64,
    pub radius: f64,
    pub drag_coefficient: f64,
    /// Spin rate omega, rad/s.
    pub spin_rate: f64,
}

impl ProjectileAerodynamics2d {
    fn cross_section(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    /// Net acceleration on the projectile at the given velocity.
    ///
    /// At zero wind-relative speed both drag and Magnus forces are the
    /// zero vector through an explicit branch, not an epsilon guard.
    pub fn acceleration(&self, velocity: Vector2<f64>) -> Vector2<f64> {
        let v_rel = velocity - self.wind;
        let speed = v_rel.norm();
        let mut force = Vector2::zeros();
        if speed > 0.0 {
            let area = self.cross_section();
            // F_d = -0.5 rho Cd A |v_rel| v_rel
            force -= 0.5 * AIR_DENSITY * self.drag_coefficient * area * speed * v_rel;
            // Magnus lift, perpendicular to the relative velocity.
            let magnus = 0.5 * AIR_DENSITY * area * self.radius * self.spin_rate;
            force += Vector2::new(magnus * v_rel.y, -magnus * v_rel.x);
        }
        force / self.mass + Vector2::new(0.0, -G)
    }
}

/// Quadratic drag in three dimensions, no spin.
///
/// State layout: `[x, y, z, vx, vy, vz]` with z the altitude axis.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileAerodynamics3d {
    pub wind: Vector3<f64>,
    pub mass: f64,
    pub radius: f64,
    pub drag_coefficient: f64,
}

impl ProjectileAerodynamics3d {
    fn cross_section(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    pub fn acceleration(&self, velocity: Vector3<f64>) -> Vector3<f64> {
        let v_rel = velocity - self.wind;
        let speed = v_rel.norm();
        let mut force = Vector3::zeros();
        if speed > 0.0 {
            force -= 0.5 * AIR_DENSITY * self.drag_coefficient * self.cross_section() * speed * v_rel;
        }
        force / self.mass + Vector3::new(0.0, 0.0, -G)
    }
}

/// The Lorenz system. Autonomous; the time argument is ignored.
#[derive(Debug, Clone, Copy)]
pub struct LorenzField {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

/// Tagged union of every vector field the engine integrates.
///
/// The near-identical 2D/3D projectile variants of the source scripts
/// collapse into this one enumeration, selected by configuration.
#[derive(Debug, Clone, Copy)]
pub enum ForceModel {
    Projectile2d(ProjectileAerodynamics2d),
    Projectile3d(ProjectileAerodynamics3d),
    Lorenz(LorenzField),
}

impl ForceModel {
    /// Wind-relative speed at the given state, for the projectile
    /// variants. The Lorenz field has no notion of wind.
    pub fn relative_speed(&self, state: &[f64]) -> Option<f64> {
        match self {
            ForceModel::Projectile2d(f) => {
                Some((Vector2::new(state[2], state[3]) - f.wind).norm())
            }
            ForceModel::Projectile3d(f) => {
                Some((Vector3::new(state[3], state[4], state[5]) - f.wind).norm())
            }
            ForceModel::Lorenz(_) => None,
        }
    }
}

impl VectorField<f64> for ForceModel {
    fn dimension(&self) -> usize {
        match self {
            ForceModel::Projectile2d(_) => 4,
            ForceModel::Projectile3d(_) => 6,
            ForceModel::Lorenz(_) => 3,
        }
    }

    fn apply(&self, _t: f64, x: &[f64], out: &mut [f64]) {
        match self {
            ForceModel::Projectile2d(f) => {
                let a = f.acceleration(Vector2::new(x[2], x[3]));
                out[0] = x[2];
                out[1] = x[3];
                out[2] = a.x;
                out[3] = a.y;
            }
            ForceModel::Projectile3d(f) => {
                let a = f.acceleration(Vector3::new(x[3], x[4], x[5]));
                out[0] = x[3];
                out[1] = x[4];
                out[2] = x[5];
                out[3] = a.x;
                out[4] = a.y;
                out[5] = a.z;
            }
            ForceModel::Lorenz(f) => {
                out[0] = f.sigma * (x[1] - x[0]);
                out[1] = x[0] * (f.rho - x[2]) - x[1];
                out[2] = x[0] * x[1] - f.beta * x[2];
            }
        }
    }
}
