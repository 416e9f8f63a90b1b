use crate::{Day, Real, StrainId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Day-indexed course of a single infection.
///
/// Day 0 is the day of exposure. All infectivity sequences and the
/// symptomaticity sequence have the same length, the total duration of the
/// infection. Values past the end read as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trajectory {
    infectivity: BTreeMap<StrainId, Vec<Real>>,
    symptomaticity: Vec<Real>,
}

/// One (infection, day, strain) entry of a flattened trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRow {
    pub infection: usize,
    pub day: Day,
    pub strain: StrainId,
    pub infectivity: Real,
    pub symptomaticity: Real,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_infectivity_trajectory(&mut self, strain: StrainId, values: Vec<Real>) {
        self.infectivity.insert(strain, values);
    }

    pub fn set_symptomaticity_trajectory(&mut self, values: Vec<Real>) {
        self.symptomaticity = values;
    }

    /// Total number of days covered.
    pub fn duration(&self) -> Day {
        self.symptomaticity.len()
    }

    pub fn strains(&self) -> impl Iterator<Item = StrainId> + '_ {
        self.infectivity.keys().copied()
    }

    pub fn infectivity(&self, strain: StrainId) -> Option<&[Real]> {
        self.infectivity.get(&strain).map(|v| v.as_slice())
    }

    pub fn infectivity_by_strain(&self) -> &BTreeMap<StrainId, Vec<Real>> {
        &self.infectivity
    }

    pub fn symptomaticity(&self) -> &[Real] {
        &self.symptomaticity
    }

    pub fn infectivity_on(&self, strain: StrainId, day: Day) -> Real {
        self.infectivity
            .get(&strain)
            .and_then(|v| v.get(day).copied())
            .unwrap_or(0.0)
    }

    pub fn symptomaticity_on(&self, day: Day) -> Real {
        self.symptomaticity.get(day).copied().unwrap_or(0.0)
    }

    /// True if any strain is transmissible on the given day.
    pub fn is_infectious_on(&self, day: Day) -> bool {
        self.infectivity
            .values()
            .any(|v| v.get(day).map_or(false, |&x| x > 0.0))
    }

    pub fn is_symptomatic_on(&self, day: Day) -> bool {
        self.symptomaticity_on(day) > 0.0
    }

    /// Days before symptom onset. Equals the full duration for infections that
    /// never show symptoms.
    pub fn days_incubating(&self) -> Day {
        self.symptomaticity
            .iter()
            .position(|&s| s > 0.0)
            .unwrap_or_else(|| self.duration())
    }

    /// Flatten into one row per day and strain.
    pub fn rows(&self, infection: usize) -> Vec<TrajectoryRow> {
        let mut rows = Vec::with_capacity(self.duration() * self.infectivity.len());
        for (&strain, values) in self.infectivity.iter() {
            for (day, &infectivity) in values.iter().enumerate() {
                rows.push(TrajectoryRow {
                    infection,
                    day,
                    strain,
                    infectivity,
                    symptomaticity: self.symptomaticity_on(day),
                });
            }
        }
        return rows;
    }
}
