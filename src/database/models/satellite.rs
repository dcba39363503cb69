use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use crate::api::validate::{check_finite, Validate};

/// Stored satellite record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Satellite {
    pub id: i64,
    pub acronym: String,
    pub mass: f64,
    pub power: f64,
}

/// Body of POST and PUT: every field required
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteCreate {
    pub acronym: String,
    pub mass: f64,
    pub power: f64,
}

/// Body of PATCH: only the supplied fields are applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SatelliteUpdate {
    pub acronym: Option<String>,
    pub mass: Option<f64>,
    pub power: Option<f64>,
}

impl Validate for SatelliteCreate {
    fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();
        check_finite(&mut errors, "mass", self.mass);
        check_finite(&mut errors, "power", self.power);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Validate for SatelliteUpdate {
    fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();
        if let Some(mass) = self.mass {
            check_finite(&mut errors, "mass", mass);
        }
        if let Some(power) = self.power {
            check_finite(&mut errors, "power", power);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
