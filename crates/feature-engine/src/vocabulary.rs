//! Categorical Vocabulary
//!
//! One versioned table of label-to-code maps shared by training and
//! serving. The table travels inside the model artifact, so the codes a
//! model was fit with are the codes it is queried with.

use crate::error::FeatureError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Version of the built-in vocabulary
pub const VOCABULARY_VERSION: u32 = 1;

/// Categorical columns of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Fuel,
    SellerType,
    Transmission,
    Owner,
}

impl CategoricalField {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoricalField::Fuel => "fuel",
            CategoricalField::SellerType => "seller_type",
            CategoricalField::Transmission => "transmission",
            CategoricalField::Owner => "owner",
        }
    }
}

/// Closed mapping from label to integer code for one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMap(BTreeMap<String, u32>);

impl CategoryMap {
    /// Build a map from `(label, code)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(label, code)| (label.to_string(), code))
                .collect(),
        )
    }

    /// Look up a label; exact, case-sensitive match
    pub fn encode(&self, label: &str) -> Option<u32> {
        self.0.get(label).copied()
    }

    /// Whether `code` is produced by some label
    pub fn contains_code(&self, code: u32) -> bool {
        self.0.values().any(|&c| c == code)
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no labels
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Versioned set of category maps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub version: u32,
    pub fuel: CategoryMap,
    pub seller_type: CategoryMap,
    pub transmission: CategoryMap,
    pub owner: CategoryMap,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            version: VOCABULARY_VERSION,
            fuel: CategoryMap::from_pairs([
                ("Petrol", 0),
                ("Diesel", 1),
                ("CNG", 2),
                ("LPG", 3),
                ("Electric", 4),
            ]),
            seller_type: CategoryMap::from_pairs([
                ("Dealer", 0),
                ("Individual", 1),
                ("Trustmark Dealer", 2),
            ]),
            transmission: CategoryMap::from_pairs([("Manual", 0), ("Automatic", 1)]),
            owner: CategoryMap::from_pairs([
                ("First Owner", 0),
                ("Second Owner", 1),
                ("Third Owner", 2),
                ("Fourth & Above Owner", 3),
                ("Test Drive Car", 4),
            ]),
        }
    }
}

impl Vocabulary {
    /// Load a vocabulary from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FeatureError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FeatureError::InvalidVocabulary(format!("{}: {}", path.display(), e))
        })?;
        let vocabulary: Vocabulary = serde_json::from_str(&text).map_err(|e| {
            FeatureError::InvalidVocabulary(format!("{}: {}", path.display(), e))
        })?;

        for field in [
            CategoricalField::Fuel,
            CategoricalField::SellerType,
            CategoricalField::Transmission,
            CategoricalField::Owner,
        ] {
            if vocabulary.map(field).is_empty() {
                return Err(FeatureError::InvalidVocabulary(format!(
                    "{}: no labels for {}",
                    path.display(),
                    field.as_str()
                )));
            }
        }

        info!(
            "Loaded vocabulary v{} from {}",
            vocabulary.version,
            path.display()
        );
        Ok(vocabulary)
    }

    /// Category map for a field
    pub fn map(&self, field: CategoricalField) -> &CategoryMap {
        match field {
            CategoricalField::Fuel => &self.fuel,
            CategoricalField::SellerType => &self.seller_type,
            CategoricalField::Transmission => &self.transmission,
            CategoricalField::Owner => &self.owner,
        }
    }

    /// Encode a label; unknown or absent labels give `None`
    pub fn encode(&self, field: CategoricalField, label: Option<&str>) -> Option<u32> {
        self.map(field).encode(label?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.encode(CategoricalField::Fuel, Some("Petrol")), Some(0));
        assert_eq!(vocab.encode(CategoricalField::Fuel, Some("Electric")), Some(4));
        assert_eq!(
            vocab.encode(CategoricalField::SellerType, Some("Individual")),
            Some(1)
        );
        assert_eq!(
            vocab.encode(CategoricalField::Owner, Some("Fourth & Above Owner")),
            Some(3)
        );
    }

    #[test]
    fn test_encoding_is_a_pure_lookup() {
        let vocab = Vocabulary::default();
        let first = vocab.encode(CategoricalField::Transmission, Some("Automatic"));
        let second = vocab.encode(CategoricalField::Transmission, Some("Automatic"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_label_is_missing() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.encode(CategoricalField::Fuel, Some("Hybrid")), None);
        assert_eq!(vocab.encode(CategoricalField::Fuel, Some("petrol")), None);
        assert_eq!(vocab.encode(CategoricalField::Fuel, None), None);
    }

    #[test]
    fn test_contains_code() {
        let vocab = Vocabulary::default();
        assert!(vocab.transmission.contains_code(1));
        assert!(!vocab.transmission.contains_code(2));
    }

    #[test]
    fn test_json_roundtrip_keeps_labels() {
        let vocab = Vocabulary::default();
        let json = serde_json::to_string(&vocab).unwrap();
        assert!(json.contains("\"Trustmark Dealer\":2"));
        let parsed: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vocab);
    }

    #[test]
    fn test_load_from_file_rejects_empty_map() {
        let dir = std::env::temp_dir().join("feature-engine-vocab-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("empty_owner.json");
        let mut vocab = Vocabulary::default();
        vocab.owner = CategoryMap::default();
        std::fs::write(&path, serde_json::to_string(&vocab).unwrap()).unwrap();

        assert!(matches!(
            Vocabulary::from_path(&path),
            Err(FeatureError::InvalidVocabulary(_))
        ));
    }

    #[test]
    fn test_shipped_vocabulary_matches_default() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/vocabulary.json");
        assert_eq!(Vocabulary::from_path(path).unwrap(), Vocabulary::default());
    }
}
