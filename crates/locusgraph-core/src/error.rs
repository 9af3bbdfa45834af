//! Error type shared by the locus engine.

use thiserror::Error;

use crate::model::EntityKind;

pub type Result<T, E = LocusError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum LocusError {
    /// An edge names an id that no entity of the matching kind carries.
    ///
    /// The remote service guarantees referential integrity within one
    /// response, so this is a contract violation and fails the whole call.
    #[error("{edge} edge references unknown {entity} '{id}'")]
    DanglingReference {
        edge: &'static str,
        entity: EntityKind,
        id: String,
    },

    #[error("unknown chromosome '{0}'")]
    UnknownChromosome(String),

    #[error("invalid locus window: start {start} is after end {end}")]
    InvalidWindow { start: u64, end: u64 },

    #[error("could not decode locus JSON: {0}")]
    Json(#[from] serde_json::Error),
}
