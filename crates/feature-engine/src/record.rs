//! Raw Listing Record

use crate::vocabulary::CategoricalField;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One used-car listing as it appears in a CSV row or a raw JSON request.
///
/// Every field is optional. Column names are exact and case-sensitive; the
/// capitalized aliases cover the older `car data.csv` layout. Numeric
/// columns are read leniently: a value that does not parse becomes `None`
/// instead of failing the whole row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, alias = "Year", deserialize_with = "lenient_number")]
    pub year: Option<f64>,
    #[serde(default, alias = "Selling_Price", deserialize_with = "lenient_number")]
    pub selling_price: Option<f64>,
    #[serde(default, alias = "Present_Price", deserialize_with = "lenient_number")]
    pub present_price: Option<f64>,
    #[serde(default, alias = "Kms_Driven", deserialize_with = "lenient_number")]
    pub km_driven: Option<f64>,
    #[serde(default, alias = "Fuel_Type", deserialize_with = "lenient_text")]
    pub fuel: Option<String>,
    #[serde(default, alias = "Seller_Type", deserialize_with = "lenient_text")]
    pub seller_type: Option<String>,
    #[serde(default, alias = "Transmission", deserialize_with = "lenient_text")]
    pub transmission: Option<String>,
    #[serde(default, alias = "Owner", deserialize_with = "lenient_text")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mileage: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub engine: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub max_power: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub torque: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub seats: Option<f64>,
}

impl RawRecord {
    /// Raw label of a categorical column
    pub fn label(&self, field: CategoricalField) -> Option<&str> {
        match field {
            CategoricalField::Fuel => self.fuel.as_deref(),
            CategoricalField::SellerType => self.seller_type.as_deref(),
            CategoricalField::Transmission => self.transmission.as_deref(),
            CategoricalField::Owner => self.owner.as_deref(),
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientNumber)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientText)
}

struct LenientNumber;

impl<'de> Visitor<'de> for LenientNumber {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string, or nothing")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v).filter(|v| v.is_finite()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }
}

struct LenientText;

impl<'de> Visitor<'de> for LenientText {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, a number, or nothing")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()).filter(|s| !s.is_empty()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(self)
    }
}
