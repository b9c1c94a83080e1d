use crate::levels::OccurrenceId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("catalog contains practice id `{id}` more than once")]
    DuplicatePractice { id: String },

    #[error(
        "level {level} entry `{id}` ({occurrence}) references parent {parent}, which is not in any level"
    )]
    UnknownOccurrence {
        level: usize,
        id: String,
        occurrence: OccurrenceId,
        parent: OccurrenceId,
    },

    #[error("level {level} is empty; levels must be contiguous")]
    EmptyLevel { level: usize },

    #[error("occurrence {occurrence} (`{id}`) appears more than once in the level map")]
    DuplicateOccurrence { occurrence: OccurrenceId, id: String },

    #[error(
        "edge {parent} -> {occurrence} (`{id}`) spans level {parent_level} to level {level}; edges must join adjacent levels"
    )]
    NonAdjacentEdge {
        id: String,
        occurrence: OccurrenceId,
        level: usize,
        parent: OccurrenceId,
        parent_level: usize,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
