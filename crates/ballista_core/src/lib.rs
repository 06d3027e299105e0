//! `ballista_core` is a fixed-step trajectory integration engine for
//! ballistic projectiles (quadratic drag, wind advection, Magnus lift)
//! and the Lorenz chaotic system.
//!
//! Key components:
//! - **Traits**: `Scalar` (numeric type abstraction), `VectorField`
//!   (ODE right-hand sides), `Steppable` (fixed-step integrators).
//! - **Solvers**: semi-implicit Euler (projectile runs) and classic RK4
//!   (Lorenz runs).
//! - **Fields**: the `ForceModel` enumeration of aerodynamic and Lorenz
//!   vector fields.
//! - **Runner**: termination policies, divergence detection, step
//!   budgets, and the trajectory loop producing an ordered
//!   `TrajectorySeries`.
//! - **Reference**: the closed-form drag-free projectile solution, used
//!   only to cross-validate the integrators.
//!
//! Plotting, animation, and parameter entry are external consumers of
//! the series this crate produces; the crate holds no process-wide
//! state and every run is self-contained.

pub mod error;
pub mod fields;
pub mod params;
pub mod reference;
pub mod runner;
pub mod series;
pub mod solvers;
pub mod traits;
