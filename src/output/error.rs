/// Errors that can occur while writing results
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the TSV writer
    #[error("TSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Error serializing the JSON summary
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error rendering a plot
    #[error("Plot rendering error: {0}")]
    Plot(String),
}
