//! Error types for tree loading and walking

use crate::kind::NodeKind;

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected an ESTree node object with a string `type` field")]
    NotANode,
}

#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("Malformed `{kind}` node: slot '{slot}' should hold {expected}")]
    Malformed {
        kind: NodeKind,
        slot: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Transform(Box<dyn std::error::Error + Send + Sync>),
}

impl WalkError {
    /// Wraps a failure raised inside a caller-supplied transform.
    pub fn transform(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        WalkError::Transform(error.into())
    }
}

pub type WalkResult = Result<Option<crate::node::Node>, WalkError>;
