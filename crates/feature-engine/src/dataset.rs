//! CSV Listing Ingestion

use crate::error::FeatureError;
use crate::features::{FeatureVector, RecordNormalizer};
use crate::record::RawRecord;
use std::path::Path;
use tracing::{info, warn};

/// Listings read from a CSV file
#[derive(Debug, Clone, Default)]
pub struct RawDataset {
    /// Header names as they appear in the file
    pub columns: Vec<String>,
    /// Parsed rows
    pub records: Vec<RawRecord>,
    /// Rows the CSV reader could not split into fields
    pub skipped_rows: usize,
}

impl RawDataset {
    /// Number of parsed rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no rows were parsed
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalize every record that carries a selling price.
    ///
    /// Returns the feature vectors, their targets, and the number of rows
    /// left out for lacking a price.
    pub fn labeled_vectors(
        &self,
        normalizer: &RecordNormalizer,
    ) -> (Vec<FeatureVector>, Vec<f64>, usize) {
        let mut vectors = Vec::with_capacity(self.records.len());
        let mut targets = Vec::with_capacity(self.records.len());
        let mut unlabeled = 0;

        for record in &self.records {
            match record.selling_price {
                Some(price) => {
                    vectors.push(normalizer.normalize(record));
                    targets.push(price);
                }
                None => unlabeled += 1,
            }
        }

        (vectors, targets, unlabeled)
    }
}

/// Read listings from a CSV file with a header row.
///
/// Unknown columns are ignored and absent columns read as missing. Rows
/// that are structurally broken (wrong field count, invalid UTF-8) are
/// skipped and counted, never fatal.
pub fn load_csv(path: impl AsRef<Path>) -> Result<RawDataset, FeatureError> {
    let path = path.as_ref();
    let dataset_error = |message: String| FeatureError::Dataset {
        path: path.display().to_string(),
        message,
    };

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| dataset_error(format!("Failed to open CSV: {}", e)))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| dataset_error(format!("Failed to read headers: {}", e)))?
        .iter()
        .map(String::from)
        .collect();

    let mut dataset = RawDataset {
        columns,
        ..Default::default()
    };

    for (line, row) in reader.deserialize::<RawRecord>().enumerate() {
        match row {
            Ok(record) => dataset.records.push(record),
            Err(e) => {
                warn!("Skipping CSV row {}: {}", line + 2, e);
                dataset.skipped_rows += 1;
            }
        }
    }

    info!(
        "Loaded {} rows and {} columns from {}",
        dataset.records.len(),
        dataset.columns.len(),
        path.display()
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FeatureSchema;
    use crate::vocabulary::Vocabulary;

    fn write_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("feature-engine-dataset-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_cardekho_rows() {
        let path = write_csv(
            "cardekho.csv",
            "name,year,selling_price,km_driven,fuel,seller_type,transmission,owner,mileage,engine,max_power,torque,seats\n\
             Maruti Swift Dzire VDI,2014,450000,145500,Diesel,Individual,Manual,First Owner,23.4 kmpl,1248 CC,74 bhp,190Nm@ 2000rpm,5\n\
             Hyundai i20 Sportz,2010,225000,127000,Diesel,Individual,Manual,First Owner,23.0 kmpl,1396 CC,90 bhp,22.4 kgm at 1750-2750rpm,5\n\
             Maruti 800,2001,45000,5000,Petrol,Individual,Manual,Second Owner,,,,,\n",
        );

        let dataset = load_csv(&path).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.columns.len(), 13);
        assert_eq!(dataset.skipped_rows, 0);
        assert_eq!(dataset.records[0].torque.as_deref(), Some("190Nm@ 2000rpm"));
        assert_eq!(dataset.records[2].mileage, None);
        assert_eq!(dataset.records[2].seats, None);

        let normalizer = RecordNormalizer::new(FeatureSchema::full(), Vocabulary::default(), 2025);
        let (vectors, targets, unlabeled) = dataset.labeled_vectors(&normalizer);
        assert_eq!(unlabeled, 0);
        assert_eq!(targets, vec![450000.0, 225000.0, 45000.0]);
        assert!(vectors[0].is_complete());
        assert!(vectors[1].is_complete());
        assert!(!vectors[2].is_complete());
    }

    #[test]
    fn test_rows_without_price_are_unlabeled() {
        let path = write_csv(
            "unlabeled.csv",
            "year,selling_price,km_driven,fuel,seller_type,transmission,owner\n\
             2015,,70000,Petrol,Individual,Manual,First Owner\n\
             2015,350000,70000,Petrol,Individual,Manual,First Owner\n",
        );

        let dataset = load_csv(&path).unwrap();
        let normalizer =
            RecordNormalizer::new(FeatureSchema::basic(), Vocabulary::default(), 2025);
        let (vectors, targets, unlabeled) = dataset.labeled_vectors(&normalizer);
        assert_eq!(unlabeled, 1);
        assert_eq!(vectors.len(), 1);
        assert_eq!(targets, vec![350000.0]);
    }

    #[test]
    fn test_ragged_row_is_skipped() {
        let path = write_csv(
            "ragged.csv",
            "year,selling_price,km_driven\n2015,1,2\n2016,3\n2017,4,5\n",
        );
        let dataset = load_csv(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.skipped_rows, 1);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_csv("/nonexistent/listings.csv"),
            Err(FeatureError::Dataset { .. })
        ));
    }
}
