//! Typed failures returned by the simulation kernel.

use thiserror::Error;

use crate::types::{FleetId, ObjectId};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    #[error("unknown object id {0}")]
    UnknownId(ObjectId),
    #[error("object {0} is not a ship")]
    NotAShip(ObjectId),
    #[error("object capacity reached ({0})")]
    CapacityExceeded(usize),
    #[error("no celestial objects to choose from")]
    EmptyPopulation,
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("ship {ship} is not in fleet {fleet}")]
    PermissionDenied { ship: ObjectId, fleet: FleetId },
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

pub type SimResult<T> = Result<T, SimError>;
