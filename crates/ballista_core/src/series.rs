use serde::{Deserialize, Serialize};

/// One snapshot of the integrated state, taken before the step that
/// follows it. The first sample of a series is always the initial
/// condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub state: Vec<f64>,
    /// Wind-relative speed at this sample; `None` for non-projectile
    /// runs.
    pub relative_speed: Option<f64>,
}

/// How a run came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The ground-impact predicate failed; the series ends with exactly
    /// one below-ground sample.
    Impact,
    /// The fixed horizon was reached; the series ends with the final
    /// fixed-step sample.
    HorizonReached,
    /// The step budget ran out before the termination predicate fired.
    /// The series is truncated but otherwise valid.
    BudgetExhausted,
}

/// The ordered, fully materialized result of one run. Immutable once
/// returned; consumers may index arbitrarily without re-running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectorySeries {
    dim: usize,
    samples: Vec<Sample>,
    outcome: RunOutcome,
}

impl TrajectorySeries {
    pub(crate) fn from_parts(dim: usize, samples: Vec<Sample>, outcome: RunOutcome) -> Self {
        Self {
            dim,
            samples,
            outcome,
        }
    }

    /// State-space dimension of each sample.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time).collect()
    }

    /// Extracts one state component as a column.
    pub fn component(&self, index: usize) -> Vec<f64> {
        self.samples.iter().map(|s| s.state[index]).collect()
    }

    pub fn relative_speeds(&self) -> Vec<Option<f64>> {
        self.samples.iter().map(|s| s.relative_speed).collect()
    }

    fn velocity_offset(&self) -> Option<usize> {
        match self.dim {
            4 => Some(2),
            6 => Some(3),
            _ => None,
        }
    }

    /// Position components of each sample, for `[q.., v..]` state
    /// layouts. `None` for Lorenz runs.
    pub fn positions(&self) -> Option<Vec<&[f64]>> {
        let offset = self.velocity_offset()?;
        Some(self.samples.iter().map(|s| &s.state[..offset]).collect())
    }

    /// Velocity components of each sample; `None` for Lorenz runs.
    pub fn velocities(&self) -> Option<Vec<&[f64]>> {
        let offset = self.velocity_offset()?;
        Some(self.samples.iter().map(|s| &s.state[offset..]).collect())
    }

    /// Time of the last recorded sample, or zero for an empty series.
    pub fn flight_time(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.time)
    }

    /// Horizontal distance covered by the last sample. `None` for state
    /// layouts without a position/velocity split (Lorenz runs).
    pub fn downrange_distance(&self) -> Option<f64> {
        let last = self.samples.last()?;
        match self.dim {
            4 => Some(last.state[0]),
            6 => Some((last.state[0].powi(2) + last.state[1].powi(2)).sqrt()),
            _ => None,
        }
    }

    /// Peak altitude over the whole series. `None` for Lorenz runs.
    pub fn max_height(&self) -> Option<f64> {
        let axis = match self.dim {
            4 => 1,
            6 => 2,
            _ => return None,
        };
        self.samples
            .iter()
            .map(|s| s.state[axis])
            .fold(None, |best, y| match best {
                Some(b) if b >= y => Some(b),
                _ => Some(y),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{RunOutcome, Sample, TrajectorySeries};

    fn sample_2d(time: f64, x: f64, y: f64) -> Sample {
        Sample {
            time,
            state: vec![x, y, 1.0, 1.0],
            relative_speed: Some(1.0),
        }
    }

    #[test]
    fn columns_and_summaries() {
        let series = TrajectorySeries::from_parts(
            4,
            vec![
                sample_2d(0.0, 0.0, 0.0),
                sample_2d(0.1, 1.0, 2.0),
                sample_2d(0.2, 2.0, -0.5),
            ],
            RunOutcome::Impact,
        );
        assert_eq!(series.len(), 3);
        assert_eq!(series.times(), vec![0.0, 0.1, 0.2]);
        assert_eq!(series.component(1), vec![0.0, 2.0, -0.5]);
        assert_eq!(series.flight_time(), 0.2);
        assert_eq!(series.downrange_distance(), Some(2.0));
        assert_eq!(series.max_height(), Some(2.0));
        assert_eq!(series.outcome(), RunOutcome::Impact);
        assert_eq!(series.get(1), Some(&sample_2d(0.1, 1.0, 2.0)));
    }

    #[test]
    fn positions_and_velocities_split_the_state_layout() {
        let series = TrajectorySeries::from_parts(
            4,
            vec![sample_2d(0.0, 0.0, 0.0), sample_2d(0.1, 1.0, 2.0)],
            RunOutcome::Impact,
        );
        let positions = series.positions().expect("projectile layout");
        let velocities = series.velocities().expect("projectile layout");
        assert_eq!(positions[1], [1.0, 2.0]);
        assert_eq!(velocities[1], [1.0, 1.0]);
        assert_eq!(positions.len(), series.len());
    }

    #[test]
    fn lorenz_layout_has_no_projectile_summaries() {
        let series = TrajectorySeries::from_parts(
            3,
            vec![Sample {
                time: 0.0,
                state: vec![1.0, 1.0, 1.0],
                relative_speed: None,
            }],
            RunOutcome::HorizonReached,
        );
        assert!(series.downrange_distance().is_none());
        assert!(series.max_height().is_none());
        assert!(series.positions().is_none());
        assert!(series.velocities().is_none());
        assert_eq!(series.relative_speeds(), vec![None]);
    }
}
