//! Runtime shader program synthesis.
//!
//! This crate composes shader stages out of typed building blocks — semantic
//! tagged [`Parameter`]s, orderable body [`atom`]s, [`Function`]s that
//! resolve and deduplicate their parameters, and [`Program`]s holding the
//! globals and dependency includes of one stage — then serializes each stage
//! to HLSL, GLSL, or Cg source with [`ProgramWriter`]. Downstream stage
//! inputs are rewired to mirror upstream outputs with
//! [`Function::synchronize_input_params_to`], enforcing pipeline
//! connectivity before emission.
//!
//! The graph is built and emitted synchronously on one thread; the actual
//! shader compiler, GPU device, and material system live outside this crate.
//!
//! [`Parameter`]: parameter::Parameter
//! [`Function`]: function::Function
//! [`Program`]: program::Program
//! [`ProgramWriter`]: writer::ProgramWriter

pub mod atom;
pub mod error;
pub mod function;
pub mod parameter;
pub mod program;
pub mod types;
pub mod validation;
pub mod writer;

pub use atom::{AssignmentAtom, FunctionAtom, FunctionInvocation, Operand, TransformAtom};
pub use error::{GenError, Result};
pub use function::Function;
pub use parameter::{Parameter, ParameterFactory, ParameterPtr};
pub use program::Program;
pub use types::{
    AutoConstant, AutoConstantData, AutoConstantType, Content, Direction, NumericType, Semantic,
    ShaderType, TargetLanguage,
};
pub use writer::ProgramWriter;
