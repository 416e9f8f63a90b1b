use super::RunningStats;
use crate::{trajectory::Trajectory, Day, Real};
use getset::{CopyGetters, Getters};
use ndarray::prelude::*;

/// Column of the daily profile holding the number of courses still running.
pub const ACTIVE: usize = 0;
/// Column holding the summed infectivity, averaged over strains.
pub const INFECTIVITY: usize = 1;
/// Column holding the number of symptomatic individuals.
pub const SYMPTOMATIC: usize = 2;

/// Aggregates many trajectories into population-level daily curves.
///
/// Day 0 is the day of exposure of each individual, so curves describe the
/// average course of an infection rather than an epidemic.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct TrajectoryProfile {
    totals: Array2<Real>,
    #[getset(get_copy = "pub")]
    count: usize,
    #[getset(get = "pub")]
    duration: RunningStats,
    #[getset(get = "pub")]
    incubation: RunningStats,
}

impl TrajectoryProfile {
    /// Profile pre-sized for courses up to `max_days` long.
    pub fn new(max_days: Day) -> Self {
        TrajectoryProfile {
            totals: Array2::zeros((max_days, 3)),
            count: 0,
            duration: RunningStats::new(),
            incubation: RunningStats::new(),
        }
    }

    pub fn max_days(&self) -> Day {
        self.totals.nrows()
    }

    /// Add a trajectory. Rows are appended for courses longer than the
    /// profile.
    pub fn add(&mut self, trajectory: &Trajectory) {
        let n_strains = trajectory.strains().count().max(1) as Real;
        let days = trajectory.duration();
        if days > self.max_days() {
            self.grow(days);
        }
        for day in 0..days {
            let infectivity: Real = trajectory
                .strains()
                .map(|s| trajectory.infectivity_on(s, day))
                .sum();
            let mut row = self.totals.row_mut(day);
            row[ACTIVE] += 1.0;
            row[INFECTIVITY] += infectivity / n_strains;
            row[SYMPTOMATIC] += trajectory.symptomaticity_on(day);
        }
        self.count += 1;
        self.duration.add(trajectory.duration() as Real);
        self.incubation.add(trajectory.days_incubating() as Real);
    }

    fn grow(&mut self, days: Day) {
        let mut totals = Array2::zeros((days, self.totals.ncols()));
        totals
            .slice_mut(s![..self.totals.nrows(), ..])
            .assign(&self.totals);
        self.totals = totals;
    }

    pub fn add_many<'a>(&mut self, trajectories: impl IntoIterator<Item = &'a Trajectory>) {
        for trajectory in trajectories {
            self.add(trajectory);
        }
    }

    /// Per-day curves divided by the number of trajectories.
    pub fn mean_curves(&self) -> Array2<Real> {
        if self.count == 0 {
            return self.totals.clone();
        }
        &self.totals / self.count as Real
    }

    /// Mean of one column of the profile for each day.
    pub fn curve(&self, column: usize) -> Vec<Real> {
        self.mean_curves().column(column).to_vec()
    }

    /// Render mean curves as CSV.
    pub fn render_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record(&["day", "active", "infectivity", "symptomatic"])?;
        for (day, row) in self.mean_curves().outer_iter().enumerate() {
            writer.serialize((day, row[ACTIVE], row[INFECTIVITY], row[SYMPTOMATIC]))?;
        }
        let data = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}
