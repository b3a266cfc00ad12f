//! Request Validator for Model Inputs

use crate::error::{ValidationError, ValidationErrors};
use feature_engine::{Feature, FeatureColumn, FeatureSchema, FeatureVector, Vocabulary};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Plausible ranges for continuous features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Odometer reading (km)
    pub km_driven_range: (f64, f64),
    /// Fuel efficiency (kmpl or km/kg)
    pub mileage_range: (f64, f64),
    /// Displacement (CC)
    pub engine_range: (f64, f64),
    /// Power (bhp)
    pub max_power_range: (f64, f64),
    /// Torque (N·m)
    pub torque_range: (f64, f64),
    /// Seat count
    pub seats_range: (f64, f64),
    /// Age in years
    pub age_range: (f64, f64),
    /// Ex-showroom price
    pub present_price_range: (f64, f64),
    /// Previous owner count
    pub previous_owners_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            km_driven_range: (0.0, 10_000_000.0),
            mileage_range: (0.0, 200.0),
            engine_range: (0.0, 10_000.0),
            max_power_range: (0.0, 2_000.0),
            torque_range: (0.0, 5_000.0),
            seats_range: (1.0, 20.0),
            age_range: (0.0, 100.0),
            present_price_range: (0.0, 1e9),
            previous_owners_range: (0.0, 20.0),
        }
    }
}

impl ValidationConfig {
    /// Allowed range of a continuous feature; `None` for categorical ones
    pub fn range_for(&self, feature: Feature) -> Option<(f64, f64)> {
        match feature {
            Feature::KmDriven => Some(self.km_driven_range),
            Feature::Mileage => Some(self.mileage_range),
            Feature::Engine => Some(self.engine_range),
            Feature::MaxPower => Some(self.max_power_range),
            Feature::Torque => Some(self.torque_range),
            Feature::Seats => Some(self.seats_range),
            Feature::Age => Some(self.age_range),
            Feature::PresentPrice => Some(self.present_price_range),
            Feature::PreviousOwners => Some(self.previous_owners_range),
            Feature::Fuel | Feature::SellerType | Feature::Transmission | Feature::Owner => None,
        }
    }
}

/// Validator for model inputs against a schema and vocabulary
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate one already-numeric value for a schema column
    pub fn validate_value(
        &self,
        column: &FeatureColumn,
        vocabulary: &Vocabulary,
        value: f64,
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite {
                field: column.label.clone(),
            });
        }

        if let Some(field) = column.feature.categorical_field() {
            let known = value >= 0.0
                && value.fract() == 0.0
                && value <= f64::from(u32::MAX)
                && vocabulary.map(field).contains_code(value as u32);
            if !known {
                return Err(ValidationError::UnknownCategoryCode {
                    field: column.label.clone(),
                    code: value,
                });
            }
            return Ok(());
        }

        match self.config.range_for(column.feature) {
            Some(range) => self.validate_range(&column.label, value, range),
            None => Ok(()),
        }
    }

    /// Validate a pre-encoded request body and return its row in schema order.
    ///
    /// The body must be a JSON object whose keys are exactly the schema's
    /// column labels. Values may be JSON numbers or numeric strings. All
    /// problems are collected, not just the first.
    pub fn validate_request(
        &self,
        schema: &FeatureSchema,
        vocabulary: &Vocabulary,
        body: &Value,
    ) -> Result<Vec<f64>, ValidationErrors> {
        let object = body.as_object().ok_or_else(|| {
            ValidationError::InvalidFormat("expected a JSON object of feature values".to_string())
        })?;

        let mut errors = Vec::new();
        let mut row = Vec::with_capacity(schema.len());

        for column in &schema.columns {
            let value = match object.get(&column.label) {
                None | Some(Value::Null) => {
                    errors.push(ValidationError::MissingField(column.label.clone()));
                    continue;
                }
                Some(v) => v,
            };

            match numeric(value) {
                Some(v) => match self.validate_value(column, vocabulary, v) {
                    Ok(()) => row.push(v),
                    Err(e) => errors.push(e),
                },
                None => errors.push(ValidationError::NotNumeric {
                    field: column.label.clone(),
                }),
            }
        }

        for key in object.keys() {
            if schema.position(key).is_none() {
                errors.push(ValidationError::UnknownField(key.clone()));
            }
        }

        if errors.is_empty() {
            Ok(row)
        } else {
            debug!("Rejected request with {} validation errors", errors.len());
            Err(ValidationErrors(errors))
        }
    }

    /// Validate a normalized feature vector and return it densely.
    ///
    /// Missing entries are reported by column label.
    pub fn validate_vector(
        &self,
        schema: &FeatureSchema,
        vocabulary: &Vocabulary,
        vector: &FeatureVector,
    ) -> Result<Vec<f64>, ValidationErrors> {
        if vector.len() != schema.len() {
            return Err(ValidationError::InvalidFormat(format!(
                "expected {} features, got {}",
                schema.len(),
                vector.len()
            ))
            .into());
        }

        let mut errors = Vec::new();
        let mut row = Vec::with_capacity(schema.len());

        for (column, value) in schema.columns.iter().zip(&vector.values) {
            match value {
                None => errors.push(ValidationError::MissingField(column.label.clone())),
                Some(v) => match self.validate_value(column, vocabulary, *v) {
                    Ok(()) => row.push(*v),
                    Err(e) => errors.push(e),
                },
            }
        }

        if errors.is_empty() {
            Ok(row)
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
