//! Function atoms: the indivisible, orderable units of generated shader body
//! code. Each atom kind is the sole authority on its own source shape and
//! renders itself for a given target language.

use crate::parameter::ParameterPtr;
use crate::types::TargetLanguage;

/// One emittable unit of shader body code.
///
/// Atoms are ordered by `(group_execution_order, internal_execution_order)`
/// ascending, ties broken by insertion order. `write_source` appends one or
/// more complete statements, each on its own tab-indented line terminated
/// with a newline.
pub trait FunctionAtom {
    /// Coarse execution phase (e.g. lighting before fog).
    fn group_execution_order(&self) -> u32;

    /// Fine tiebreak within a phase.
    fn internal_execution_order(&self) -> u32;

    fn write_source(&self, out: &mut String, language: TargetLanguage);
}

/// A parameter reference used as an atom operand, with an optional swizzle
/// mask (e.g. `xyz`).
#[derive(Debug, Clone)]
pub struct Operand {
    parameter: ParameterPtr,
    swizzle: Option<&'static str>,
}

impl Operand {
    pub fn new(parameter: ParameterPtr) -> Self {
        Self {
            parameter,
            swizzle: None,
        }
    }

    pub fn swizzled(parameter: ParameterPtr, swizzle: &'static str) -> Self {
        Self {
            parameter,
            swizzle: Some(swizzle),
        }
    }

    pub fn parameter(&self) -> &ParameterPtr {
        &self.parameter
    }

    fn write(&self, out: &mut String) {
        out.push_str(self.parameter.name());
        if let Some(mask) = self.swizzle {
            out.push('.');
            out.push_str(mask);
        }
    }
}

/// Calls a named library function with the given operands:
/// `name(op0, op1, ...);`. Output operands are passed positionally, as the
/// dependency libraries declare them.
#[derive(Clone)]
pub struct FunctionInvocation {
    function_name: String,
    group_order: u32,
    internal_order: u32,
    operands: Vec<Operand>,
}

impl FunctionInvocation {
    pub fn new(function_name: impl Into<String>, group_order: u32, internal_order: u32) -> Self {
        Self {
            function_name: function_name.into(),
            group_order,
            internal_order,
            operands: Vec::new(),
        }
    }

    pub fn push_operand(&mut self, operand: Operand) {
        self.operands.push(operand);
    }

    pub fn with_operands(mut self, operands: impl IntoIterator<Item = Operand>) -> Self {
        self.operands.extend(operands);
        self
    }
}

impl FunctionAtom for FunctionInvocation {
    fn group_execution_order(&self) -> u32 {
        self.group_order
    }

    fn internal_execution_order(&self) -> u32 {
        self.internal_order
    }

    fn write_source(&self, out: &mut String, _language: TargetLanguage) {
        out.push('\t');
        out.push_str(&self.function_name);
        out.push('(');
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            operand.write(out);
        }
        out.push_str(");\n");
    }
}

/// Plain assignment: `dst = src;`.
#[derive(Clone)]
pub struct AssignmentAtom {
    dst: Operand,
    src: Operand,
    group_order: u32,
    internal_order: u32,
}

impl AssignmentAtom {
    pub fn new(dst: Operand, src: Operand, group_order: u32, internal_order: u32) -> Self {
        Self {
            dst,
            src,
            group_order,
            internal_order,
        }
    }
}

impl FunctionAtom for AssignmentAtom {
    fn group_execution_order(&self) -> u32 {
        self.group_order
    }

    fn internal_execution_order(&self) -> u32 {
        self.internal_order
    }

    fn write_source(&self, out: &mut String, _language: TargetLanguage) {
        out.push('\t');
        self.dst.write(out);
        out.push_str(" = ");
        self.src.write(out);
        out.push_str(";\n");
    }
}

/// Matrix-vector transform: `output = mul(matrix, input);` in HLSL/Cg,
/// `output = matrix * input;` in GLSL.
#[derive(Clone)]
pub struct TransformAtom {
    matrix: Operand,
    input: Operand,
    output: Operand,
    group_order: u32,
    internal_order: u32,
}

impl TransformAtom {
    pub fn new(
        matrix: Operand,
        input: Operand,
        output: Operand,
        group_order: u32,
        internal_order: u32,
    ) -> Self {
        Self {
            matrix,
            input,
            output,
            group_order,
            internal_order,
        }
    }
}

impl FunctionAtom for TransformAtom {
    fn group_execution_order(&self) -> u32 {
        self.group_order
    }

    fn internal_execution_order(&self) -> u32 {
        self.internal_order
    }

    fn write_source(&self, out: &mut String, language: TargetLanguage) {
        out.push('\t');
        self.output.write(out);
        match language {
            TargetLanguage::Hlsl | TargetLanguage::Cg => {
                out.push_str(" = mul(");
                self.matrix.write(out);
                out.push_str(", ");
                self.input.write(out);
                out.push_str(");\n");
            }
            TargetLanguage::Glsl => {
                out.push_str(" = ");
                self.matrix.write(out);
                out.push_str(" * ");
                self.input.write(out);
                out.push_str(";\n");
            }
        }
    }
}
