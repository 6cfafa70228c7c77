use std::fmt;

use crate::types::{NumericType, Semantic};

/// An invalid-construction error raised while assembling a shader program
/// graph. These indicate a bug in the composition driver feeding this crate,
/// not a recoverable runtime condition; the graph is left unchanged when one
/// is raised.
#[derive(Debug, Clone, PartialEq)]
pub enum GenError {
    /// A parameter with the same name already exists in a scope that requires
    /// name uniqueness.
    DuplicateParameterName { name: String, owner: String },
    /// An input or output parameter with the same (semantic, index) already
    /// exists in that direction's list.
    DuplicateSemanticIndex {
        semantic: Semantic,
        index: i32,
        function: String,
    },
    /// A resolve-by-identity found an existing parameter whose type (or
    /// semantic/index, for local-by-name resolution) disagrees with the
    /// request.
    ParameterTypeMismatch {
        name: String,
        requested: NumericType,
        existing: NumericType,
        owner: String,
    },
    /// `create_function` invoked with a name already registered on the
    /// program.
    DuplicateFunctionName { name: String, program: String },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::DuplicateParameterName { name, owner } => {
                write!(f, "duplicate parameter name `{name}` in `{owner}`")
            }
            GenError::DuplicateSemanticIndex {
                semantic,
                index,
                function,
            } => write!(
                f,
                "duplicate semantic parameter {semantic:?}{index} in function `{function}`"
            ),
            GenError::ParameterTypeMismatch {
                name,
                requested,
                existing,
                owner,
            } => write!(
                f,
                "parameter type mismatch for `{name}` in `{owner}`: requested {requested:?}, existing {existing:?}"
            ),
            GenError::DuplicateFunctionName { name, program } => {
                write!(f, "function `{name}` already declared in program `{program}`")
            }
        }
    }
}

impl std::error::Error for GenError {}

pub type Result<T> = std::result::Result<T, GenError>;
