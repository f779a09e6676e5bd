use fintrack_config::ConfigError;
use fintrack_core::CoreError;
use fintrack_domain::{
    MoneyParseError, UnknownPaymentMethod, UnknownPeriodMode, UnknownRecordKind,
    UnknownReserveKind,
};
use thiserror::Error;

/// Everything the facade and the CLI can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid amount: {0}")]
    Amount(#[from] MoneyParseError),
    #[error(transparent)]
    PaymentMethod(#[from] UnknownPaymentMethod),
    #[error(transparent)]
    PeriodMode(#[from] UnknownPeriodMode),
    #[error(transparent)]
    RecordKind(#[from] UnknownRecordKind),
    #[error(transparent)]
    ReserveKind(#[from] UnknownReserveKind),
    #[error("{0}")]
    InvalidArguments(String),
    #[error("No user selected. Pass `--user <uuid>` once to remember it.")]
    NoUser,
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
