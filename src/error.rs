use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoadNetError {
    #[error("HTTP client initialization failed: {0}")]
    ClientInit(#[source] reqwest::Error),

    #[error("Request failed for layer {layer}: {source}")]
    Transport {
        layer: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid JSON returned (status {status})")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File I/O error: {0}")]
    FileIO(#[from] std::io::Error),
}

/// Stop signal raised by the interactive console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cancellation {
    /// `q` / `quit` / `exit` typed at a prompt.
    Quit,
    /// Ctrl-C or end of input.
    Interrupted,
}

impl Cancellation {
    pub fn exit_code(self) -> i32 {
        match self {
            Cancellation::Quit => 0,
            Cancellation::Interrupted => 1,
        }
    }
}
