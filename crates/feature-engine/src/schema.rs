//! Feature Schemas
//!
//! A schema fixes which features a model sees and in which order. Models
//! are sensitive to column order, so the schema is persisted next to the
//! fitted model and reused verbatim at inference time.

use crate::error::FeatureError;
use crate::vocabulary::CategoricalField;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single model input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Odometer reading, passed through
    KmDriven,
    /// Encoded fuel label
    Fuel,
    /// Encoded seller type label
    SellerType,
    /// Encoded transmission label
    Transmission,
    /// Encoded ownership label ("First Owner", ...)
    Owner,
    /// Fuel efficiency, number extracted from text
    Mileage,
    /// Displacement, number extracted from text
    Engine,
    /// Power, number extracted from text
    MaxPower,
    /// Torque in N·m
    Torque,
    /// Seat count, integral
    Seats,
    /// `current_year - year`
    Age,
    /// Ex-showroom price, passed through (legacy layout)
    PresentPrice,
    /// Numeric previous-owner count (legacy layout)
    PreviousOwners,
}

impl Feature {
    /// Categorical field backing this feature, if any
    pub fn categorical_field(&self) -> Option<CategoricalField> {
        match self {
            Feature::Fuel => Some(CategoricalField::Fuel),
            Feature::SellerType => Some(CategoricalField::SellerType),
            Feature::Transmission => Some(CategoricalField::Transmission),
            Feature::Owner => Some(CategoricalField::Owner),
            _ => None,
        }
    }
}

/// A feature under the column label clients and datasets use for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureColumn {
    pub label: String,
    pub feature: Feature,
}

/// Ordered feature layout of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub name: String,
    pub columns: Vec<FeatureColumn>,
}

impl FeatureSchema {
    fn from_columns(name: &str, columns: &[(&str, Feature)]) -> Self {
        Self {
            name: name.to_string(),
            columns: columns
                .iter()
                .map(|&(label, feature)| FeatureColumn {
                    label: label.to_string(),
                    feature,
                })
                .collect(),
        }
    }

    /// Full CarDekho layout, the shape of the `/predict` request
    pub fn full() -> Self {
        Self::from_columns(
            "full",
            &[
                ("km_driven", Feature::KmDriven),
                ("fuel", Feature::Fuel),
                ("seller_type", Feature::SellerType),
                ("transmission", Feature::Transmission),
                ("owner", Feature::Owner),
                ("mileage", Feature::Mileage),
                ("engine", Feature::Engine),
                ("max_power", Feature::MaxPower),
                ("torque", Feature::Torque),
                ("seats", Feature::Seats),
                ("age", Feature::Age),
            ],
        )
    }

    /// Listings without mileage, engine, power, torque or seats
    pub fn basic() -> Self {
        Self::from_columns(
            "basic",
            &[
                ("km_driven", Feature::KmDriven),
                ("fuel", Feature::Fuel),
                ("seller_type", Feature::SellerType),
                ("transmission", Feature::Transmission),
                ("owner", Feature::Owner),
                ("age", Feature::Age),
            ],
        )
    }

    /// Older `car data.csv` layout
    pub fn legacy() -> Self {
        Self::from_columns(
            "legacy",
            &[
                ("Present_Price", Feature::PresentPrice),
                ("Kms_Driven", Feature::KmDriven),
                ("Fuel_Type", Feature::Fuel),
                ("Seller_Type", Feature::SellerType),
                ("Transmission", Feature::Transmission),
                ("Owner", Feature::PreviousOwners),
                ("Age", Feature::Age),
            ],
        )
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no features
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column labels in model order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.label.as_str())
    }

    /// Position of a column label
    pub fn position(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.label == label)
    }
}

impl FromStr for FeatureSchema {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::full()),
            "basic" => Ok(Self::basic()),
            "legacy" => Ok(Self::legacy()),
            other => Err(FeatureError::UnknownSchema(other.to_string())),
        }
    }
}

impl fmt::Display for FeatureSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.name)?;
        for (i, label) in self.labels().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(label)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_schema_order() {
        let labels: Vec<_> = FeatureSchema::full().labels().map(String::from).collect();
        assert_eq!(
            labels,
            [
                "km_driven", "fuel", "seller_type", "transmission", "owner", "mileage",
                "engine", "max_power", "torque", "seats", "age"
            ]
        );
    }

    #[test]
    fn test_legacy_owner_is_numeric() {
        let schema = FeatureSchema::legacy();
        let owner = &schema.columns[schema.position("Owner").unwrap()];
        assert_eq!(owner.feature, Feature::PreviousOwners);
        assert!(owner.feature.categorical_field().is_none());
    }

    #[test]
    fn test_parse_by_name() {
        assert_eq!("basic".parse::<FeatureSchema>().unwrap().len(), 6);
        assert!(matches!(
            "wide".parse::<FeatureSchema>(),
            Err(FeatureError::UnknownSchema(_))
        ));
    }

    #[test]
    fn test_display_lists_labels() {
        assert_eq!(
            FeatureSchema::basic().to_string(),
            "basic [km_driven, fuel, seller_type, transmission, owner, age]"
        );
    }
}
