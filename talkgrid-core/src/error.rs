//! Error types for talkgrid.

use thiserror::Error;

/// Errors that can occur in talkgrid operations.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not load talk catalog: {0}")]
    CatalogUnavailable(String),

    #[error("Talk catalog is not valid JSON: {0}")]
    CatalogParse(String),

    #[error("Talk catalog contains invalid talks: {}", .0.join("; "))]
    InvalidCatalog(Vec<String>),

    #[error("Unknown time slot '{0}'")]
    UnknownSlot(String),

    #[error("No talk matching '{talk}' at {slot}")]
    UnknownTalk { slot: String, talk: String },

    #[error("{slot} conflicts with the workshop starting at {workshop_slot}")]
    WorkshopConflict { slot: String, workshop_slot: String },

    #[error("Your schedule is empty. Add some talks first")]
    EmptySelection,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GridError {
    /// Conflicts are rejected transitions; the grid is left untouched.
    pub fn is_conflict(&self) -> bool {
        matches!(self, GridError::WorkshopConflict { .. })
    }
}

/// Result type alias for talkgrid operations.
pub type GridResult<T> = Result<T, GridError>;
