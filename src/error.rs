// Error types for store planning

use crate::models::{Cell, ItemId};
use crate::planning::session::SessionId;
use std::fmt;
use thiserror::Error;

/// Which end of a path request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Planner error type
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("invalid {endpoint} cell {cell}: outside the grid or blocked")]
    InvalidEndpoint { endpoint: Endpoint, cell: Cell },

    #[error("no route from {start} to {goal}")]
    NoRouteFound { start: Cell, goal: Cell },

    #[error("catalog has no items to choose from")]
    EmptyCatalog,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("item {0} is not located on the store map")]
    UnknownItem(ItemId),

    #[error("unknown session {0}")]
    UnknownSession(SessionId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for PlannerError {
    fn from(e: toml::de::Error) -> Self {
        PlannerError::Configuration(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_cell() {
        let err = PlannerError::InvalidEndpoint {
            endpoint: Endpoint::Goal,
            cell: Cell::new(3, -1),
        };
        assert_eq!(
            err.to_string(),
            "invalid goal cell (3, -1): outside the grid or blocked"
        );

        let err = PlannerError::NoRouteFound {
            start: Cell::new(0, 0),
            goal: Cell::new(4, 4),
        };
        assert_eq!(err.to_string(), "no route from (0, 0) to (4, 4)");
    }

    #[test]
    fn test_toml_errors_become_configuration_errors() {
        let parse_err = toml::from_str::<toml::Value>("[broken").unwrap_err();
        let err: PlannerError = parse_err.into();
        assert!(matches!(err, PlannerError::Configuration(_)));
    }
}
