use thiserror::Error;

use crate::ledger::Units;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Insufficient bankroll: requested {requested}, available {available}")]
    InsufficientFunds { requested: Units, available: Units },
    #[error("{key} bets are locked while a hand is in progress")]
    BettingClosed { key: String },
    #[error("Enable advanced mode to place {key}")]
    ModeDisabled { key: String },
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
    #[error("Unknown bet: {key}")]
    UnknownBet { key: String },
    #[error("Unknown paytable: {id}")]
    UnknownPaytable { id: String },
    #[error("Invalid chip: {units}")]
    InvalidChip { units: Units },
}

/// Run-log delivery failure. Never affects the outcome of a settled round.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("run log I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("run log record could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("run log rejected the record: {0}")]
    Rejected(String),
}
