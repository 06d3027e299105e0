use crate::error::SimulationError;
use crate::fields::ForceModel;
use crate::params::{LorenzParams, Projectile2dParams, Projectile3dParams};
use crate::series::{RunOutcome, Sample, TrajectorySeries};
use crate::solvers::{SymplecticEuler, RK4};
use crate::traits::{Steppable, VectorField};
use log::{debug, warn};

/// Default step budget. Ground-impact runs are data-dependent and can
/// in principle loop for a very long time (near-zero net vertical
/// deceleration); the budget turns that into a truncated series.
pub const DEFAULT_MAX_STEPS: usize = 10_000_000;

/// Decides when a run stops advancing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminationPolicy {
    /// Continue while `state[axis] >= 0`. The first below-ground sample
    /// is recorded as the terminal sample; no interpolation back to the
    /// exact zero crossing is performed, so flight time, range, and
    /// height read off the series carry an O(dt) truncation bias.
    GroundImpact { axis: usize },
    /// Continue for exactly `floor(t_max / dt) + 1` samples. Used for
    /// the Lorenz system, which has no natural halting condition.
    FixedHorizon { t_max: f64 },
}

impl TerminationPolicy {
    fn max_samples(&self, dt: f64) -> Option<usize> {
        match self {
            TerminationPolicy::GroundImpact { .. } => None,
            TerminationPolicy::FixedHorizon { t_max } => {
                // Snap division noise to the nearest integer so the
                // count matches exact-arithmetic floor(t_max/dt) + 1;
                // e.g. 1.0 / 1e-5 lands just below 100000 in f64 and a
                // bare floor would drop the final sample.
                let quotient = t_max / dt;
                let nearest = quotient.round();
                let whole = if (quotient - nearest).abs() <= nearest.abs() * 4.0 * f64::EPSILON {
                    nearest
                } else {
                    quotient.floor()
                };
                Some(whole as usize + 1)
            }
        }
    }

    fn active(&self, state: &[f64]) -> bool {
        match self {
            TerminationPolicy::GroundImpact { axis } => state[*axis] >= 0.0,
            TerminationPolicy::FixedHorizon { .. } => true,
        }
    }
}

/// Named integration rule, resolved to a concrete stepper per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperKind {
    SymplecticEuler,
    Rk4,
}

impl StepperKind {
    fn build(self, dim: usize) -> InternalStepper {
        match self {
            StepperKind::SymplecticEuler => {
                InternalStepper::SymplecticEuler(SymplecticEuler::new(dim))
            }
            StepperKind::Rk4 => InternalStepper::Rk4(RK4::new(dim)),
        }
    }
}

enum InternalStepper {
    SymplecticEuler(SymplecticEuler<f64>),
    Rk4(RK4<f64>),
}

impl InternalStepper {
    fn step(&mut self, field: &ForceModel, t: &mut f64, state: &mut [f64], dt: f64) {
        match self {
            InternalStepper::SymplecticEuler(s) => s.step(field, t, state, dt),
            InternalStepper::Rk4(s) => s.step(field, t, state, dt),
        }
    }
}

/// Per-run knobs that are not physics parameters.
#[derive(Debug, Clone, Copy)]
pub struct RunSettings {
    /// Upper bound on integration steps before the run is truncated
    /// with [`RunOutcome::BudgetExhausted`].
    pub max_steps: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Integrates one trajectory: record the current state, stop if the
/// termination policy says so, otherwise advance one step and repeat.
///
/// Samples are recorded before each step, so the first sample is the
/// initial condition. Divergence to a non-finite state aborts the run
/// with the last finite sample; exhausting the step budget returns the
/// truncated series instead of looping forever. `cancel` is evaluated
/// once per step and turns a runaway run into
/// [`SimulationError::Cancelled`].
///
/// Each invocation is self-contained; runs over independent parameter
/// sets may execute on independent threads with no coordination.
pub fn run_trajectory(
    field: &ForceModel,
    stepper: StepperKind,
    policy: TerminationPolicy,
    initial_state: Vec<f64>,
    dt: f64,
    settings: RunSettings,
    mut cancel: Option<&mut dyn FnMut() -> bool>,
) -> Result<TrajectorySeries, SimulationError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SimulationError::InvalidParameter {
            name: "dt",
            value: dt,
        });
    }
    let dim = field.dimension();
    if initial_state.len() != dim {
        return Err(SimulationError::DimensionMismatch {
            expected: dim,
            actual: initial_state.len(),
        });
    }
    if let Some(&bad) = initial_state.iter().find(|v| !v.is_finite()) {
        return Err(SimulationError::InvalidParameter {
            name: "initial_state",
            value: bad,
        });
    }

    let max_samples = policy.max_samples(dt);
    let mut stepper = stepper.build(dim);
    let mut samples: Vec<Sample> = Vec::new();
    let mut state = initial_state;
    let mut t = 0.0;

    let outcome = loop {
        if state.iter().any(|v| !v.is_finite()) {
            let (last_time, last_state) = samples
                .last()
                .map(|s| (s.time, s.state.clone()))
                .unwrap_or((0.0, Vec::new()));
            let step = samples.len();
            warn!("run diverged at step {step} (last finite t = {last_time})");
            return Err(SimulationError::NumericDivergence {
                step,
                last_time,
                last_state,
            });
        }

        samples.push(Sample {
            time: t,
            state: state.clone(),
            relative_speed: field.relative_speed(&state),
        });

        if let Some(max) = max_samples {
            if samples.len() >= max {
                break RunOutcome::HorizonReached;
            }
        }
        if !policy.active(&state) {
            break RunOutcome::Impact;
        }
        if let Some(check) = cancel.as_mut() {
            if check() {
                return Err(SimulationError::Cancelled {
                    step: samples.len(),
                });
            }
        }
        if samples.len() > settings.max_steps {
            warn!(
                "step budget of {} exhausted; returning truncated series",
                settings.max_steps
            );
            break RunOutcome::BudgetExhausted;
        }

        stepper.step(field, &mut t, &mut state, dt);
    };

    Ok(TrajectorySeries::from_parts(dim, samples, outcome))
}

/// Planar projectile run: symplectic Euler until ground impact on the
/// y axis.
pub fn simulate_projectile_2d(
    params: &Projectile2dParams,
) -> Result<TrajectorySeries, SimulationError> {
    params.validate()?;
    debug!(
        "projectile 2d run: v0 = {} m/s, angle = {} deg, dt = {} s",
        params.speed, params.angle_deg, params.dt
    );
    run_trajectory(
        &params.force_model(),
        StepperKind::SymplecticEuler,
        TerminationPolicy::GroundImpact { axis: 1 },
        params.initial_state(),
        params.dt,
        RunSettings::default(),
        None,
    )
}

/// 3D projectile run: symplectic Euler until ground impact on the z
/// axis.
pub fn simulate_projectile_3d(
    params: &Projectile3dParams,
) -> Result<TrajectorySeries, SimulationError> {
    params.validate()?;
    debug!(
        "projectile 3d run: v0 = {} m/s, elevation = {} deg, azimuth = {} deg, dt = {} s",
        params.speed, params.elevation_deg, params.azimuth_deg, params.dt
    );
    run_trajectory(
        &params.force_model(),
        StepperKind::SymplecticEuler,
        TerminationPolicy::GroundImpact { axis: 2 },
        params.initial_state(),
        params.dt,
        RunSettings::default(),
        None,
    )
}

/// Lorenz run: RK4 over a fixed horizon of `floor(t_max/dt) + 1`
/// samples.
pub fn simulate_lorenz(params: &LorenzParams) -> Result<TrajectorySeries, SimulationError> {
    params.validate()?;
    debug!(
        "lorenz run: sigma = {}, rho = {}, beta = {}, t_max = {} s, dt = {} s",
        params.sigma, params.rho, params.beta, params.t_max, params.dt
    );
    run_trajectory(
        &params.force_model(),
        StepperKind::Rk4,
        TerminationPolicy::FixedHorizon {
            t_max: params.t_max,
        },
        params.initial_state(),
        params.dt,
        RunSettings::default(),
        None,
    )
}
