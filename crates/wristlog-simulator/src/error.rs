use thiserror_no_std::Error;
use wristlog_core::AppError;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("I/O error: {0}")]
    Io(std::io::Error),
    #[error("invalid config: {0}")]
    Config(toml::de::Error),
    #[error("watch app failed: {0}")]
    App(AppError),
}

impl From<std::io::Error> for SimError {
    fn from(value: std::io::Error) -> Self {
        SimError::Io(value)
    }
}

impl From<toml::de::Error> for SimError {
    fn from(value: toml::de::Error) -> Self {
        SimError::Config(value)
    }
}

impl From<AppError> for SimError {
    fn from(value: AppError) -> Self {
        SimError::App(value)
    }
}
