use super::{AgeMap, AgeMapInput, ParamStore};
use crate::{error::ConfigError, DiseaseId, Real};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use toml::{value::Table, Value};

/// Parameters read from a TOML document.
///
/// Each `[[disease]]` table is one disease; ids follow file order. Age maps are
/// either inline tables (`{ ages = [[0, 17], [18, 109]], values = [..] }`) or
/// paths to CSV files relative to the parameter file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamFile {
    diseases: Vec<Table>,
    base_dir: Option<PathBuf>,
}

impl ParamFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let mut params: ParamFile = data.parse()?;
        params.base_dir = path.parent().map(Path::to_path_buf);
        Ok(params)
    }

    fn lookup(&self, name: &str, disease: DiseaseId) -> Result<&Value, ConfigError> {
        self.diseases
            .get(disease)
            .and_then(|table| table.get(name))
            .ok_or_else(|| ConfigError::missing(name, disease))
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl FromStr for ParamFile {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let root: Value = toml::from_str(data)?;
        let diseases = match root.get("disease") {
            None => vec![],
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(id, item)| {
                    item.as_table()
                        .cloned()
                        .ok_or_else(|| ConfigError::malformed("disease", id, "expected a table"))
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(ConfigError::malformed(
                    "disease",
                    0,
                    "expected an array of [[disease]] tables",
                ))
            }
        };
        Ok(ParamFile {
            diseases,
            base_dir: None,
        })
    }
}

fn as_number(value: &Value) -> Option<Real> {
    match value {
        Value::Float(x) => Some(*x),
        Value::Integer(n) => Some(*n as Real),
        _ => None,
    }
}

impl ParamStore for ParamFile {
    fn disease_count(&self) -> usize {
        self.diseases.len()
    }

    fn contains(&self, name: &str, disease: DiseaseId) -> bool {
        self.lookup(name, disease).is_ok()
    }

    fn scalar(&self, name: &str, disease: DiseaseId) -> Result<Real, ConfigError> {
        let value = self.lookup(name, disease)?;
        as_number(value).ok_or_else(|| ConfigError::malformed(name, disease, "expected a number"))
    }

    fn integer(&self, name: &str, disease: DiseaseId) -> Result<i64, ConfigError> {
        let value = self.lookup(name, disease)?;
        value
            .as_integer()
            .ok_or_else(|| ConfigError::malformed(name, disease, "expected an integer"))
    }

    fn text(&self, name: &str, disease: DiseaseId) -> Result<String, ConfigError> {
        let value = self.lookup(name, disease)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ConfigError::malformed(name, disease, "expected a string"))
    }

    fn vector(&self, name: &str, disease: DiseaseId) -> Result<Vec<Real>, ConfigError> {
        let items = self
            .lookup(name, disease)?
            .as_array()
            .ok_or_else(|| ConfigError::malformed(name, disease, "expected an array"))?;
        items
            .iter()
            .map(|x| {
                as_number(x).ok_or_else(|| {
                    ConfigError::malformed(name, disease, format!("non-numeric entry {}", x))
                })
            })
            .collect()
    }

    fn age_map(&self, name: &str, disease: DiseaseId) -> Result<AgeMap, ConfigError> {
        let value = self.lookup(name, disease)?;
        match value {
            Value::String(path) => AgeMap::from_csv_path(name, self.resolve(path)),
            Value::Table(_) => {
                let input = value
                    .clone()
                    .try_into::<AgeMapInput>()
                    .map_err(|e| ConfigError::malformed(name, disease, e.to_string()))?;
                AgeMap::from_input(name, input)
            }
            _ => Err(ConfigError::malformed(
                name,
                disease,
                "expected an inline table or a CSV path",
            )),
        }
    }
}
