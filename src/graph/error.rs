//! Graph error types
//!
//! Every failure is a caller-input error raised before any mutation, so a
//! failed operation leaves the graph exactly as it was.

use super::types::Direction;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("{operation}: invalid identity {id:?}, node ids must be non-empty strings")]
    InvalidIdentity {
        operation: &'static str,
        id: String,
    },

    #[error("Invalid options for {context}: {reason}")]
    InvalidOptions {
        context: &'static str,
        reason: String,
    },

    #[error("Unknown direction mode: {0}")]
    UnknownMode(String),

    #[error("Option {option} must be a boolean, got {found}")]
    TypeMismatch { option: String, found: String },

    #[error("{operation}: a node with id {id:?} already exists in this graph (enable override to replace it)")]
    DuplicateIdentity {
        operation: &'static str,
        id: String,
    },

    #[error("{operation}: {reason}")]
    OwnershipViolation {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation}: node {node} is not in this graph")]
    NodeNotFound {
        operation: &'static str,
        node: String,
    },

    #[error("{operation}: edge {edge} is not in this graph")]
    EdgeNotFound {
        operation: &'static str,
        edge: String,
    },

    #[error("{operation}: edge between {from} and {to} already exists")]
    EdgeAlreadyExists {
        operation: &'static str,
        from: String,
        to: String,
    },

    #[error("{operation}: self-loops are not allowed (node {node})")]
    SelfLoopNotAllowed {
        operation: &'static str,
        node: String,
    },

    #[error("{operation} requires mixed direction, graph is {mode}")]
    IllegalModeOperation {
        operation: &'static str,
        mode: Direction,
    },

    #[error("Node {node:?} already holds connection {connection}")]
    DuplicateConnection { node: String, connection: String },
}

/// Coarse classification of [`GraphError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidIdentity,
    InvalidOptions,
    UnknownMode,
    TypeMismatch,
    DuplicateIdentity,
    OwnershipViolation,
    NotFound,
    EdgeConflict,
    IllegalModeOperation,
    InvalidArgument,
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::InvalidIdentity { .. } => ErrorKind::InvalidIdentity,
            GraphError::InvalidOptions { .. } => ErrorKind::InvalidOptions,
            GraphError::UnknownMode(_) => ErrorKind::UnknownMode,
            GraphError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            GraphError::DuplicateIdentity { .. } => ErrorKind::DuplicateIdentity,
            GraphError::OwnershipViolation { .. } => ErrorKind::OwnershipViolation,
            GraphError::NodeNotFound { .. } | GraphError::EdgeNotFound { .. } => {
                ErrorKind::NotFound
            }
            GraphError::EdgeAlreadyExists { .. } | GraphError::SelfLoopNotAllowed { .. } => {
                ErrorKind::EdgeConflict
            }
            GraphError::IllegalModeOperation { .. } => ErrorKind::IllegalModeOperation,
            GraphError::DuplicateConnection { .. } => ErrorKind::InvalidArgument,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
