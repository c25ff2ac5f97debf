use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Kilo request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Kilo rejected {endpoint} with status {status}: {body}")]
    Rejected {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },
}
