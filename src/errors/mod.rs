use anyhow::Context as _;
use thiserror::Error;

/// Errors raised by the significance and distance engine.
///
/// All of these are recoverable by the caller: the consuming layer decides
/// whether to skip the affected event, substitute a default or report it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("missing coordinate for {0}")]
    MissingCoordinate(String),

    #[error("invalid colour format: {0:?}")]
    InvalidColorFormat(String),

    #[error("unknown event classification id: {0}")]
    UnknownClassificationTier(i32),

    #[error("unknown club id: {0}")]
    UnknownClub(i64),

    #[error("club hierarchy has a cycle through club {0}")]
    CyclicHierarchy(i64),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Add context to snapshot loading errors
pub fn load_context(what: &str) -> String {
    format!("Failed to load {}", what)
}

/// Add context to import errors
pub fn import_context(what: &str, id: i64) -> String {
    format!("Failed to import {} with id {}", what, id)
}

/// Wrap result with load context
pub fn with_load_context<T, E>(result: Result<T, E>, what: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(load_context(what))
}

/// Wrap result with import context
pub fn with_import_context<T, E>(result: Result<T, E>, what: &str, id: i64) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(import_context(what, id))
}
