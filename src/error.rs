use thiserror::Error;

#[derive(Error, Debug)]
pub enum AbatorError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("MSSQL error: {0}")]
    Mssql(#[from] tiberius::error::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration:\n  {}", .0.join("\n  "))]
    InvalidConfiguration(Vec<String>),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Unknown generator: {0}")]
    UnknownGenerator(String),
}
