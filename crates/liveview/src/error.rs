use thiserror::Error;

/// Errors raised by the live view and its surfaces
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViewError {
    /// A sample arrived for a name that was never registered
    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    /// Registration of a name that is already tracked, under the reject policy
    #[error("entity '{0}' is already registered")]
    DuplicateRegistration(String),

    /// The presenting surface is gone (e.g. the window was closed)
    #[error("surface closed")]
    SurfaceClosed,

    /// Writing a chart snapshot failed
    #[error("snapshot error: {0}")]
    Snapshot(String),
}
