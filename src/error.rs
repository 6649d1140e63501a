use std::path::PathBuf;

/// Errors raised while loading transactions, mining, or writing results.
#[derive(Debug, thiserror::Error)]
pub enum MiningError {
    #[error("input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("no valid transactions loaded; support is undefined")]
    EmptyTransactionSet,

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("failed to parse config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MiningError>;
