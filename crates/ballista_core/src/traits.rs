use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in the integration engine.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// The right-hand side of an ODE system: maps (t, state) to d(state)/dt.
///
/// Implementations must be pure: no hidden state, no mutation of the
/// input slice, identical output for identical input. RK4 evaluates the
/// field four times per step at intermediate states and relies on this.
pub trait VectorField<T: Scalar> {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the field.
    /// x: current state
    /// t: current time (ignored by autonomous systems)
    /// out: buffer to write d(state)/dt into
    fn apply(&self, t: T, x: &[T], out: &mut [T]);
}

/// A trait for fixed-increment steppers that advance a state in place.
///
/// Steppers do not validate their inputs: a non-finite state propagates
/// through the arithmetic unchanged. Detecting divergence is the
/// caller's responsibility.
pub trait Steppable<T: Scalar> {
    /// Performs one step of size dt.
    /// t: current time (updated after step)
    /// state: current state (updated after step)
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, state: &mut [T], dt: T);
}
