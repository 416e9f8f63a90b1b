use crate::{error::ConfigError, prelude::ForAge, Age, Real, MAX_AGE};
use getset::Getters;
use serde::{Deserialize, Serialize};
use std::{io::Read, path::Path};

/// Piecewise-constant table of values over age brackets.
///
/// Brackets are inclusive on both ends and searched in order: the first one
/// containing an age wins. Ages outside every bracket read as zero.
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct AgeMap {
    name: String,
    brackets: Vec<(Age, Age)>,
    values: Vec<Real>,
}

/// Serialized form of an [`AgeMap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeMapInput {
    pub ages: Vec<[Age; 2]>,
    pub values: Vec<Real>,
}

#[derive(Debug, Deserialize)]
struct AgeMapRow {
    age_min: Age,
    age_max: Age,
    value: Real,
}

impl AgeMap {
    pub fn new(name: &str, brackets: Vec<(Age, Age)>, values: Vec<Real>) -> Result<Self, ConfigError> {
        if brackets.is_empty() {
            return Err(ConfigError::age_map(name, "no age brackets"));
        }
        if brackets.len() != values.len() {
            return Err(ConfigError::age_map(
                name,
                format!("{} brackets but {} values", brackets.len(), values.len()),
            ));
        }
        for &(lo, hi) in brackets.iter() {
            if lo > hi || hi > MAX_AGE {
                return Err(ConfigError::age_map(
                    name,
                    format!("invalid bracket [{}, {}]", lo, hi),
                ));
            }
        }
        if let Some(v) = values.iter().find(|v| !v.is_finite()) {
            return Err(ConfigError::age_map(name, format!("invalid value {}", v)));
        }

        Ok(AgeMap {
            name: name.to_string(),
            brackets,
            values,
        })
    }

    /// Same value for every age.
    pub fn constant(name: &str, value: Real) -> Result<Self, ConfigError> {
        Self::new(name, vec![(0, MAX_AGE)], vec![value])
    }

    pub fn from_input(name: &str, input: AgeMapInput) -> Result<Self, ConfigError> {
        let brackets = input.ages.iter().map(|&[lo, hi]| (lo, hi)).collect();
        Self::new(name, brackets, input.values)
    }

    /// Read `age_min,age_max,value` rows from CSV data with a header line.
    pub fn from_csv_reader<R: Read>(name: &str, reader: R) -> Result<Self, ConfigError> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut brackets = vec![];
        let mut values = vec![];
        for res in reader.deserialize() {
            let row: AgeMapRow = res?;
            brackets.push((row.age_min, row.age_max));
            values.push(row.value);
        }
        Self::new(name, brackets, values)
    }

    pub fn from_csv_path(name: &str, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(name, file)
    }

    pub fn value_at(&self, age: Age) -> Real {
        self.brackets
            .iter()
            .position(|&(lo, hi)| lo <= age && age <= hi)
            .map_or(0.0, |i| self.values[i])
    }

    pub fn to_input(&self) -> AgeMapInput {
        AgeMapInput {
            ages: self.brackets.iter().map(|&(lo, hi)| [lo, hi]).collect(),
            values: self.values.clone(),
        }
    }
}

impl ForAge<Real> for AgeMap {
    fn for_age(&self, age: Age) -> Real {
        self.value_at(age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brackets() -> AgeMap {
        AgeMap::new("location", vec![(0, 4), (5, 17), (18, 64)], vec![1.0, 2.0, 3.0]).unwrap()
    }

    #[test]
    fn lookup_by_bracket() {
        let map = brackets();
        assert_eq!(map.value_at(0), 1.0);
        assert_eq!(map.value_at(4), 1.0);
        assert_eq!(map.value_at(5), 2.0);
        assert_eq!(map.value_at(64), 3.0);
        assert_eq!(map.for_age(30), 3.0);
    }

    #[test]
    fn uncovered_ages_read_zero() {
        assert_eq!(brackets().value_at(65), 0.0);
        assert_eq!(brackets().value_at(MAX_AGE), 0.0);
    }

    #[test]
    fn first_matching_bracket_wins() {
        let map = AgeMap::new("scale", vec![(0, 50), (40, 109)], vec![1.0, 2.0]).unwrap();
        assert_eq!(map.value_at(45), 1.0);
        assert_eq!(map.value_at(51), 2.0);
    }

    #[test]
    fn rejects_bad_tables() {
        assert!(AgeMap::new("x", vec![], vec![]).is_err());
        assert!(AgeMap::new("x", vec![(0, 10)], vec![1.0, 2.0]).is_err());
        assert!(AgeMap::new("x", vec![(10, 5)], vec![1.0]).is_err());
        assert!(AgeMap::new("x", vec![(0, 110)], vec![1.0]).is_err());
        assert!(AgeMap::new("x", vec![(0, 10)], vec![Real::NAN]).is_err());
    }

    #[test]
    fn reads_csv() {
        let data = "age_min,age_max,value\n0,17,0.5\n18,109,1.5\n";
        let map = AgeMap::from_csv_reader("location", data.as_bytes()).unwrap();
        assert_eq!(map.value_at(10), 0.5);
        assert_eq!(map.value_at(90), 1.5);
        assert_eq!(map.to_input().ages, vec![[0, 17], [18, 109]]);
    }
}
