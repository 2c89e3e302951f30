use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown character encoding: {0}")]
    UnknownEncoding(String),
    #[error("Invalid device fingerprint: {0}")]
    InvalidFingerprint(String),
    #[error("Failed to enumerate network interfaces: {0}")]
    Interfaces(String),
    #[error("Telephony query failed: {0}")]
    Telephony(String),
}

pub type Result<T> = std::result::Result<T, DeviceError>;
