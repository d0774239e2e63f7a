//! Train the salary prediction pipeline
//!
//! Usage: cargo run --bin train -- --data ds_salaries.csv --trees 100

use anyhow::{Context, Result};
use clap::Parser;
use salary_predictor::data::{load_records, SalaryTable};
use salary_predictor::models::{ForestConfig, SalaryPipeline};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Train the salary prediction model")]
struct Args {
    /// Salary dataset CSV
    #[arg(short, long, default_value = "ds_salaries.csv")]
    data: PathBuf,

    /// Output path for the model artifact
    #[arg(short, long, default_value = "salary_prediction_model.bin")]
    output: PathBuf,

    /// Number of trees
    #[arg(short, long, default_value = "100")]
    trees: usize,

    /// Max tree depth
    #[arg(long, default_value = "16")]
    max_depth: usize,

    /// Test set ratio
    #[arg(long, default_value = "0.2")]
    test_ratio: f64,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("salary_predictor=info")
        .init();

    let args = Args::parse();

    println!("===========================================");
    println!("  Salary Prediction - Model Training");
    println!("===========================================\n");

    // Load data
    info!("loading dataset from {}", args.data.display());

    let records = load_records(&args.data)
        .with_context(|| format!("failed to read dataset {}", args.data.display()))?;
    let total = records.len();

    let (table, dropped) = SalaryTable::from_records(records);
    println!("Loaded {} rows from {}", total, args.data.display());
    if dropped > 0 {
        println!("Dropped {} rows with missing salary_in_usd", dropped);
    }

    // Split data
    let split = table
        .random_split(args.test_ratio, args.seed)
        .context("failed to split dataset")?;
    println!("\nTrain set: {} samples", split.train.len());
    println!("Test set:  {} samples\n", split.test.len());

    // Fit the pipeline
    let config = ForestConfig {
        n_trees: args.trees,
        max_depth: args.max_depth,
        seed: args.seed,
        ..Default::default()
    };

    println!("Training Random Forest with {} trees...", args.trees);
    println!("(This may take a moment)\n");

    let start_time = std::time::Instant::now();
    let mut pipeline =
        SalaryPipeline::fit(&split.train, config).context("failed to fit pipeline")?;
    let training_time = start_time.elapsed();

    println!("Training completed in {:.2}s\n", training_time.as_secs_f64());

    // Evaluate
    println!("=== Model Evaluation (held-out split) ===\n");

    let scores = pipeline.evaluate(&split.test);
    println!("R²:   {:.4}", scores.r2);
    println!("MAE:  ${:.2}", scores.mae);
    println!("RMSE: ${:.2}", scores.rmse);

    // Feature importance
    println!("\n=== Feature Importance Ranking ===\n");

    for (i, (name, imp)) in pipeline
        .feature_importance_ranking()
        .iter()
        .take(15)
        .enumerate()
    {
        let bar = "█".repeat((imp * 40.0) as usize);
        println!("{:2}. {:35} {:.4} {}", i + 1, name, imp, bar);
    }

    // Persist
    pipeline
        .save(&args.output)
        .with_context(|| format!("failed to save artifact {}", args.output.display()))?;

    println!("\nModel saved to {}", args.output.display());
    println!("Start the serve binary to take predictions.");

    Ok(())
}
