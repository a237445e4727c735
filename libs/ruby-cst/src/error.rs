use thiserror::Error;

/// Errors raised while loading a serialized raw tree.
#[derive(Debug, Error)]
pub enum CstLoadError {
    /// The input is not a well-formed serialized tree
    #[error("invalid serialized syntax tree: {0}")]
    Json(#[from] serde_json::Error),
}
