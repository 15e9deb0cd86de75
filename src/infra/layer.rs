//! Configuration layers
//!
//! A layer is one YAML file of the region/stage/application hierarchy. Layers
//! are kept as raw mappings so keys this tool does not know survive a
//! load/save cycle untouched.

use crate::error::ConfigError;

use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::Path;

/// Level of the hierarchy a layer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerLocation {
    Region,
    Stage,
    Application,
}

impl LayerLocation {
    /// Value used in `*_configs_location` fields
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerLocation::Region => "region",
            LayerLocation::Stage => "stage",
            LayerLocation::Application => "application",
        }
    }

    /// Parse a location pointer, accepting only `allowed` locations
    pub fn parse(key: &str, value: &str, allowed: &[LayerLocation]) -> Result<Self, ConfigError> {
        allowed
            .iter()
            .copied()
            .find(|loc| loc.as_str() == value)
            .ok_or_else(|| ConfigError::LocationInvalid {
                key: key.to_string(),
                value: value.to_string(),
                expected: allowed
                    .iter()
                    .map(LayerLocation::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl fmt::Display for LayerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One loaded configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    location: LayerLocation,
    name: String,
    data: Mapping,
}

impl Layer {
    /// Create a layer from an in-memory mapping
    pub fn new(location: LayerLocation, name: impl Into<String>, data: Mapping) -> Self {
        Self {
            location,
            name: name.into(),
            data,
        }
    }

    /// Load a layer from a YAML file; an empty file is an empty layer
    pub fn load<P: AsRef<Path>>(
        path: P,
        location: LayerLocation,
        name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::from_read(path, e))?;

        let data = match serde_yaml::from_str::<Value>(&content) {
            Ok(Value::Mapping(m)) => m,
            Ok(Value::Null) => Mapping::new(),
            Ok(_) => {
                return Err(ConfigError::ParseError {
                    path: path.display().to_string(),
                    message: "top level is not a mapping".to_string(),
                })
            }
            Err(e) => {
                return Err(ConfigError::ParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
        };

        Ok(Self::new(location, name, data))
    }

    /// Region, stage or application name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Look up a top-level key that must be a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Look up a top-level key that must be a mapping
    ///
    /// Fails with `NotFound` when the key is absent or not a mapping.
    pub fn require_mapping(&self, key: &str) -> Result<&Mapping, ConfigError> {
        self.get(key)
            .and_then(Value::as_mapping)
            .ok_or_else(|| ConfigError::NotFound {
                key: key.to_string(),
                layer: format!("{} '{}'", self.location, self.name),
            })
    }

    /// Raw mapping
    pub fn data(&self) -> &Mapping {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut Mapping {
        &mut self.data
    }
}
