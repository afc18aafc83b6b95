//! Gatekeeper error types

use crate::validator::RejectionReason;
use thiserror::Error;

/// Errors that can occur during gatekeeper operations
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A relationship def violated one or more rules
    #[error("Relationship def '{type_name}' rejected: {}", summarize(.reasons))]
    Rejected {
        /// Name of the offending typedef
        type_name: String,
        /// Every rule the typedef violated
        reasons: Vec<RejectionReason>,
    },
}

fn summarize(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
