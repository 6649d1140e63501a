use anyhow::{Context as _, Result};
use apriori_rules::config::{PipelineConfig, SupportStrategy};
use apriori_rules::pipeline;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "apriori-rules",
    about = "Mine frequent itemsets and association rules from a transaction CSV"
)]
struct Cli {
    /// TOML file with pipeline settings. Flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cleaned transactions CSV (header row, items joined in the first column)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Destination of the frequent-itemsets table
    #[arg(long)]
    itemsets_out: Option<PathBuf>,

    /// Destination of the association-rules table
    #[arg(long)]
    rules_out: Option<PathBuf>,

    #[arg(long)]
    min_support: Option<f64>,

    #[arg(long)]
    min_confidence: Option<f64>,

    #[arg(long)]
    min_lift: Option<f64>,

    /// Separator between items inside an input cell
    #[arg(long)]
    delimiter: Option<String>,

    /// Separator between items in the output tables
    #[arg(long)]
    output_delimiter: Option<String>,

    /// How candidate support is computed
    #[arg(long, value_enum)]
    strategy: Option<SupportStrategy>,

    /// Evaluate each level's candidates in parallel
    #[arg(long)]
    parallel: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn into_config(self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(path) = self.itemsets_out {
            config.itemsets_output = path;
        }
        if let Some(path) = self.rules_out {
            config.rules_output = path;
        }
        if let Some(value) = self.min_support {
            config.mining.min_support = value;
        }
        if let Some(value) = self.min_confidence {
            config.mining.min_confidence = value;
        }
        if let Some(value) = self.min_lift {
            config.mining.min_lift = value;
        }
        if let Some(delimiter) = self.delimiter {
            config.item_delimiter = delimiter;
        }
        if let Some(delimiter) = self.output_delimiter {
            config.output_delimiter = delimiter;
        }
        if let Some(strategy) = self.strategy {
            config.mining.strategy = strategy;
        }
        if self.parallel {
            config.mining.parallel = true;
        }
        Ok(config)
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let result = cli
        .into_config()
        .and_then(|config| pipeline::run(&config).context("Mining run aborted"));

    match result {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
