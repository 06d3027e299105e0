use crate::traits::{Scalar, Steppable, VectorField};

/// Semi-implicit (symplectic) Euler stepper.
///
/// Operates on second-order systems flattened as `[q.., v..]`: the first
/// half of the state slice holds positions, the second half velocities,
/// and the field's derivative is `[v.., a..]`. The velocity half is
/// updated first, then each position is advanced with the
/// already-updated velocity. That ordering is what makes the method
/// symplectic; position-first would be plain explicit Euler.
pub struct SymplecticEuler<T: Scalar> {
    deriv: Vec<T>,
}

impl<T: Scalar> SymplecticEuler<T> {
    /// dim must be even: positions then velocities.
    pub fn new(dim: usize) -> Self {
        debug_assert!(dim % 2 == 0, "symplectic Euler needs a [q.., v..] state");
        Self {
            deriv: vec![T::from_f64(0.0).unwrap(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for SymplecticEuler<T> {
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, state: &mut [T], dt: T) {
        let half = state.len() / 2;

        field.apply(*t, state, &mut self.deriv);

        // Velocities first.
        for i in 0..half {
            state[half + i] = state[half + i] + self.deriv[half + i] * dt;
        }
        // Positions from the updated velocities.
        for i in 0..half {
            state[i] = state[i] + state[half + i] * dt;
        }

        *t = *t + dt;
    }
}

/// Classic Runge-Kutta 4th order stepper over the full state vector.
pub struct RK4<T: Scalar> {
    k1: Vec<T>,
    k2: Vec<T>,
    k3: Vec<T>,
    k4: Vec<T>,
    tmp: Vec<T>,
}

impl<T: Scalar> RK4<T> {
    pub fn new(dim: usize) -> Self {
        let z = T::from_f64(0.0).unwrap();
        Self {
            k1: vec![z; dim],
            k2: vec![z; dim],
            k3: vec![z; dim],
            k4: vec![z; dim],
            tmp: vec![z; dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for RK4<T> {
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, state: &mut [T], dt: T) {
        let half = T::from_f64(0.5).unwrap();
        let sixth = T::from_f64(1.0 / 6.0).unwrap();
        let two = T::from_f64(2.0).unwrap();

        let t0 = *t;

        // k1 = f(t, y)
        field.apply(t0, state, &mut self.k1);

        // k2 = f(t + dt/2, y + dt*k1/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k1[i] * half;
        }
        field.apply(t0 + dt * half, &self.tmp, &mut self.k2);

        // k3 = f(t + dt/2, y + dt*k2/2)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k2[i] * half;
        }
        field.apply(t0 + dt * half, &self.tmp, &mut self.k3);

        // k4 = f(t + dt, y + dt*k3)
        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k3[i];
        }
        field.apply(t0 + dt, &self.tmp, &mut self.k4);

        // y_next = y + dt/6 * (k1 + 2k2 + 2k3 + k4)
        for i in 0..state.len() {
            state[i] = state[i]
                + dt * sixth * (self.k1[i] + two * self.k2[i] + two * self.k3[i] + self.k4[i]);
        }

        *t = t0 + dt;
    }
}
