//! Car Price Model Training - Main Entry Point

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, Utc};
use clap::Parser;
use estimators::ModelKind;
use feature_engine::{
    filter_complete, load_csv, Feature, FeatureSchema, RawRecord, RecordNormalizer, Vocabulary,
};
use model_selector::{training_arrays, ModelSelector, SelectorConfig};
use model_store::{load_artifact, save_artifact, ModelArtifact, DEFAULT_MODEL_PATH};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Train candidate regressors on a used-car CSV and persist the best one
#[derive(Debug, Parser)]
#[command(name = "train-price-model", version, about)]
struct Args {
    /// Listings CSV with a header row
    #[arg(long)]
    data: PathBuf,

    /// Feature layout: full, basic or legacy
    #[arg(long, default_value = "full")]
    schema: FeatureSchema,

    /// Where to write the model artifact
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    output: PathBuf,

    /// Categorical vocabulary JSON; built-in table when absent
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    /// Fraction of rows held out for scoring
    #[arg(long, default_value_t = 0.2)]
    test_size: f64,

    /// Seed for the split and seeded estimators
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Reference year for `age`; defaults to the current year
    #[arg(long)]
    current_year: Option<i32>,

    /// Comma-separated candidates, in comparison order
    #[arg(long, value_delimiter = ',', default_values_t = ModelKind::ALL)]
    candidates: Vec<ModelKind>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: Level,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_logging(level: Level, json: bool) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.context("Failed to set tracing subscriber")
}

/// The listing the trained model is demonstrated on
fn sample_listing(schema: &FeatureSchema, current_year: i32) -> RawRecord {
    let legacy_owner = schema
        .columns
        .iter()
        .any(|c| c.feature == Feature::PreviousOwners);

    RawRecord {
        year: Some(f64::from(current_year - 18)),
        present_price: Some(5.59),
        km_driven: Some(70000.0),
        fuel: Some("Petrol".into()),
        seller_type: Some(if legacy_owner { "Dealer" } else { "Individual" }.into()),
        transmission: Some("Manual".into()),
        owner: Some(if legacy_owner { "0" } else { "First Owner" }.into()),
        mileage: Some("20.0 kmpl".into()),
        engine: Some("1197 CC".into()),
        max_power: Some("82 bhp".into()),
        torque: Some("113Nm".into()),
        seats: Some(5.0),
        ..Default::default()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level, args.log_json)?;

    info!("=== Car Price Model Training v{} ===", env!("CARGO_PKG_VERSION"));

    let vocabulary = match &args.vocabulary {
        Some(path) => Vocabulary::from_path(path)
            .with_context(|| format!("Failed to load vocabulary from {}", path.display()))?,
        None => Vocabulary::default(),
    };
    let current_year = args.current_year.unwrap_or_else(|| Local::now().year());
    info!(
        "Schema {}, vocabulary v{}, reference year {}",
        args.schema, vocabulary.version, current_year
    );

    let dataset = load_csv(&args.data)?;
    info!(
        "Dataset shape: {} rows x {} columns ({} malformed rows skipped)",
        dataset.len(),
        dataset.columns.len(),
        dataset.skipped_rows
    );

    let normalizer = RecordNormalizer::new(args.schema.clone(), vocabulary.clone(), current_year);
    let (vectors, targets, unlabeled) = dataset.labeled_vectors(&normalizer);
    if unlabeled > 0 {
        warn!("{} rows have no selling price and were ignored", unlabeled);
    }

    let filtered = filter_complete(vectors, targets)?;
    info!(
        "Kept {} complete rows, dropped {} with missing features",
        filtered.len(),
        filtered.dropped
    );
    for (label, missing) in args.schema.labels().zip(&filtered.missing_by_feature) {
        if *missing > 0 {
            info!("  {:<16} missing in {} rows", label, missing);
        }
    }
    if filtered.is_empty() {
        bail!("No complete rows left to train on");
    }

    let (x, y) = training_arrays(&filtered, args.schema.len())?;

    let selector = ModelSelector::new(SelectorConfig {
        test_size: args.test_size,
        seed: args.seed,
        candidates: args.candidates.clone(),
    });
    let selection = selector.select(x.view(), y.view())?;

    if let Some(best) = selection.report.best_score() {
        info!(
            "Best model: {} (R2 {:.4}, MAE {:.2})",
            best.kind.display_name(),
            best.r2,
            best.mae
        );
    }

    let artifact = ModelArtifact::new(
        args.schema.clone(),
        vocabulary,
        selection.model,
        selection.report,
        Utc::now().timestamp_millis(),
    );
    save_artifact(&artifact, &args.output)?;

    // Reload from disk so the sample prediction exercises the saved bytes
    let reloaded = load_artifact(&args.output)?;
    let sample_normalizer =
        RecordNormalizer::new(reloaded.schema.clone(), reloaded.vocabulary.clone(), current_year);
    let sample = sample_normalizer.normalize(&sample_listing(&reloaded.schema, current_year));
    match sample.to_dense() {
        Some(row) => {
            let price = reloaded.model.predict_one(&row)?;
            info!("Sample prediction: {:.2} for features {:?}", price, row);
        }
        None => warn!("Sample listing is incomplete under schema {}", reloaded.schema.name),
    }

    Ok(())
}
