//! Feature Engineering Engine
//!
//! Turns raw used-car listings (free-text mileage, engine, torque and
//! categorical labels) into fixed-order numeric feature vectors for the
//! price models. Every parser here is forgiving: a value it cannot read
//! becomes `None` and is dealt with once, by the dataset filter.

mod dataset;
mod error;
mod extract;
mod features;
mod filter;
mod record;
mod schema;
mod torque;
mod vocabulary;

pub use dataset::{load_csv, RawDataset};
pub use error::FeatureError;
pub use extract::extract_number;
pub use features::{FeatureVector, RecordNormalizer};
pub use filter::{filter_complete, FilteredDataset};
pub use record::RawRecord;
pub use schema::{Feature, FeatureColumn, FeatureSchema};
pub use torque::{normalize_torque, KGF_M_TO_NM};
pub use vocabulary::{CategoricalField, CategoryMap, Vocabulary, VOCABULARY_VERSION};
