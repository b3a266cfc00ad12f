//! Feature Vector Assembly

use crate::extract::extract_number;
use crate::record::RawRecord;
use crate::schema::{Feature, FeatureSchema};
use crate::torque::normalize_torque;
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};

/// Model input for one listing, in schema order.
///
/// `None` marks a field that could not be parsed or mapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: Vec<Option<f64>>,
}

impl FeatureVector {
    /// Wrap already-ordered values
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector has no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every entry is present
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Number of missing entries
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Dense values, or `None` if any entry is missing
    pub fn to_dense(&self) -> Option<Vec<f64>> {
        self.values.iter().copied().collect()
    }

    /// Indices of missing entries
    pub fn missing_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.is_none().then_some(i))
    }
}

/// Normalizes raw listings into feature vectors for one schema.
///
/// Pure: the output depends only on the record, the vocabulary and the
/// reference year fixed at construction.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    schema: FeatureSchema,
    vocabulary: Vocabulary,
    current_year: i32,
}

impl RecordNormalizer {
    /// Create a normalizer
    pub fn new(schema: FeatureSchema, vocabulary: Vocabulary, current_year: i32) -> Self {
        Self {
            schema,
            vocabulary,
            current_year,
        }
    }

    /// Schema this normalizer produces
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Vocabulary used for categorical fields
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Reference year for `age`
    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Normalize one record
    pub fn normalize(&self, record: &RawRecord) -> FeatureVector {
        FeatureVector::new(
            self.schema
                .columns
                .iter()
                .map(|column| self.feature_value(column.feature, record))
                .collect(),
        )
    }

    fn feature_value(&self, feature: Feature, record: &RawRecord) -> Option<f64> {
        match feature {
            Feature::KmDriven => record.km_driven,
            Feature::PresentPrice => record.present_price,
            Feature::Fuel | Feature::SellerType | Feature::Transmission | Feature::Owner => {
                let field = feature.categorical_field()?;
                self.vocabulary
                    .encode(field, record.label(field))
                    .map(f64::from)
            }
            Feature::Mileage => extract_number(record.mileage.as_deref()),
            Feature::Engine => extract_number(record.engine.as_deref()),
            Feature::MaxPower => extract_number(record.max_power.as_deref()),
            Feature::Torque => normalize_torque(record.torque.as_deref()),
            Feature::PreviousOwners => extract_number(record.owner.as_deref()),
            Feature::Seats => record.seats.filter(|s| s.fract() == 0.0),
            Feature::Age => record
                .year
                .filter(|y| y.fract() == 0.0)
                .map(|year| f64::from(self.current_year) - year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> RawRecord {
        RawRecord {
            km_driven: Some(70000.0),
            fuel: Some("Petrol".into()),
            seller_type: Some("Individual".into()),
            transmission: Some("Manual".into()),
            owner: Some("First Owner".into()),
            mileage: Some("20.0 kmpl".into()),
            engine: Some("1197 CC".into()),
            max_power: Some("82 bhp".into()),
            torque: Some("113Nm".into()),
            seats: Some(5.0),
            year: Some(2015.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_sample_record_end_to_end() {
        let normalizer = RecordNormalizer::new(FeatureSchema::full(), Vocabulary::default(), 2025);
        let vector = normalizer.normalize(&sample_record());

        assert_eq!(
            vector.values,
            vec![
                Some(70000.0), // km_driven
                Some(0.0),     // fuel
                Some(1.0),     // seller_type
                Some(0.0),     // transmission
                Some(0.0),     // owner
                Some(20.0),    // mileage
                Some(1197.0),  // engine
                Some(82.0),    // max_power
                Some(113.0),   // torque
                Some(5.0),     // seats
                Some(10.0),    // age
            ]
        );
        assert!(vector.is_complete());
    }

    #[test]
    fn test_unknown_label_and_bad_text_are_missing() {
        let normalizer = RecordNormalizer::new(FeatureSchema::full(), Vocabulary::default(), 2025);
        let record = RawRecord {
            fuel: Some("Hybrid".into()),
            torque: Some("unknown".into()),
            ..sample_record()
        };
        let vector = normalizer.normalize(&record);

        assert_eq!(vector.missing_count(), 2);
        assert_eq!(vector.missing_indices().collect::<Vec<_>>(), vec![1, 8]);
        assert!(vector.to_dense().is_none());
    }

    #[test]
    fn test_fractional_seats_are_missing() {
        let normalizer = RecordNormalizer::new(FeatureSchema::full(), Vocabulary::default(), 2025);
        let record = RawRecord {
            seats: Some(5.5),
            ..sample_record()
        };
        assert_eq!(normalizer.normalize(&record).values[9], None);
    }

    #[test]
    fn test_basic_schema_projects_subset() {
        let normalizer =
            RecordNormalizer::new(FeatureSchema::basic(), Vocabulary::default(), 2025);
        let record = RawRecord {
            mileage: None,
            engine: None,
            torque: None,
            year: Some(2007.0),
            ..sample_record()
        };
        let vector = normalizer.normalize(&record);
        assert_eq!(
            vector.to_dense().unwrap(),
            vec![70000.0, 0.0, 1.0, 0.0, 0.0, 18.0]
        );
    }

    #[test]
    fn test_legacy_schema() {
        let normalizer =
            RecordNormalizer::new(FeatureSchema::legacy(), Vocabulary::default(), 2025);
        let record = RawRecord {
            present_price: Some(5.59),
            km_driven: Some(27000.0),
            fuel: Some("Petrol".into()),
            seller_type: Some("Dealer".into()),
            transmission: Some("Manual".into()),
            owner: Some("0".into()),
            year: Some(2014.0),
            ..Default::default()
        };
        let vector = normalizer.normalize(&record);
        assert_eq!(
            vector.to_dense().unwrap(),
            vec![5.59, 27000.0, 0.0, 0.0, 0.0, 0.0, 11.0]
        );
    }
}
