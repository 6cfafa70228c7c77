//! GLSL emitter. The language has no parameter semantics, so stage inputs
//! and outputs become `layout(location = N)` globals, the first function is
//! emitted as the stage entry, and a vertex-stage POSITION output is routed
//! through `gl_Position`. The emitted text is a parseable GLSL 450
//! translation unit (see the `validation` module).

use std::fmt::Write;

use crate::function::Function;
use crate::parameter::ParameterPtr;
use crate::program::Program;
use crate::types::{NumericType, Semantic, ShaderType, TargetLanguage};

use super::{write_function_title, write_program_title};

fn numeric_token(ty: NumericType) -> &'static str {
    match ty {
        NumericType::Float => "float",
        NumericType::Float2 => "vec2",
        NumericType::Float3 => "vec3",
        NumericType::Float4 => "vec4",
        NumericType::Int => "int",
        NumericType::Int2 => "ivec2",
        NumericType::Int3 => "ivec3",
        NumericType::Int4 => "ivec4",
        NumericType::Matrix2x2 => "mat2",
        NumericType::Matrix2x3 => "mat2x3",
        NumericType::Matrix2x4 => "mat2x4",
        NumericType::Matrix3x2 => "mat3x2",
        NumericType::Matrix3x3 => "mat3",
        NumericType::Matrix3x4 => "mat3x4",
        NumericType::Matrix4x2 => "mat4x2",
        NumericType::Matrix4x3 => "mat4x3",
        NumericType::Matrix4x4 => "mat4",
        NumericType::Sampler1D => "sampler1D",
        NumericType::Sampler2D => "sampler2D",
        NumericType::Sampler3D => "sampler3D",
        NumericType::SamplerCube => "samplerCube",
    }
}

/// A stage input/output that cannot be declared as a plain `in`/`out` global
/// and is instead materialized as a `main`-local backed by a builtin.
fn builtin_alias(program: &Program, param: &ParameterPtr, is_output: bool) -> Option<&'static str> {
    if param.semantic() != Semantic::Position {
        return None;
    }
    match (program.shader_type(), is_output) {
        (ShaderType::Vertex, true) => Some("gl_Position"),
        (ShaderType::Fragment, false) => Some("gl_FragCoord"),
        _ => None,
    }
}

pub(super) fn write_program(out: &mut String, program: &Program) {
    // The version directive must be the first line of the translation unit.
    out.push_str("#version 450\n\n");
    write_program_title(out, program, TargetLanguage::Glsl);

    // GLSL has no include mechanism; dependencies are recorded for an
    // external resolver to inline.
    for dep in program.dependencies() {
        writeln!(out, "// dependency: {dep}").ok();
    }
    if !program.dependencies().is_empty() {
        out.push('\n');
    }

    for param in program.parameters() {
        writeln!(out, "uniform {} {};", numeric_token(param.numeric_type()), param.name()).ok();
    }
    if !program.parameters().is_empty() {
        out.push('\n');
    }

    let mut functions = program.functions().iter();
    if let Some(entry) = functions.next() {
        write_entry_io(out, program, entry);
        write_function_title(out, entry.name(), entry.description());
        writeln!(out, "void {}()", entry.name()).ok();
        out.push_str("{\n");

        // Builtin-backed stage parameters become locals inside the entry.
        for param in entry.input_parameters() {
            if let Some(builtin) = builtin_alias(program, param, false) {
                writeln!(
                    out,
                    "\t{} {} = {builtin};",
                    numeric_token(param.numeric_type()),
                    param.name()
                )
                .ok();
            }
        }
        for param in entry.output_parameters() {
            if builtin_alias(program, param, true).is_some() {
                writeln!(out, "\t{} {};", numeric_token(param.numeric_type()), param.name()).ok();
            }
        }
        for local in entry.local_parameters() {
            writeln!(out, "\t{} {};", numeric_token(local.numeric_type()), local.name()).ok();
        }

        for atom in entry.atoms() {
            atom.write_source(out, TargetLanguage::Glsl);
        }

        for param in entry.output_parameters() {
            if let Some(builtin) = builtin_alias(program, param, true) {
                writeln!(out, "\t{builtin} = {};", param.name()).ok();
            }
        }
        out.push_str("}\n\n");
    }

    // Remaining functions are plain helpers with qualified parameters.
    for function in functions {
        write_function_title(out, function.name(), function.description());
        write!(out, "void {}(", function.name()).ok();
        let total = function.input_parameters().len() + function.output_parameters().len();
        let mut written = 0usize;
        for (qualifier, list) in [
            ("in", function.input_parameters()),
            ("out", function.output_parameters()),
        ] {
            for param in list {
                write!(
                    out,
                    "{qualifier} {} {}",
                    numeric_token(param.numeric_type()),
                    param.name()
                )
                .ok();
                written += 1;
                if written < total {
                    out.push_str(", ");
                }
            }
        }
        out.push_str(")\n{\n");
        for local in function.local_parameters() {
            writeln!(out, "\t{} {};", numeric_token(local.numeric_type()), local.name()).ok();
        }
        for atom in function.atoms() {
            atom.write_source(out, TargetLanguage::Glsl);
        }
        out.push_str("}\n\n");
    }
}

/// Declare the entry function's stage inputs and outputs as globals.
fn write_entry_io(out: &mut String, program: &Program, entry: &Function) {
    let mut location = 0u32;
    for param in entry.input_parameters() {
        if builtin_alias(program, param, false).is_some() {
            continue;
        }
        writeln!(
            out,
            "layout(location = {location}) in {} {};",
            numeric_token(param.numeric_type()),
            param.name()
        )
        .ok();
        location += 1;
    }

    let mut location = 0u32;
    for param in entry.output_parameters() {
        if builtin_alias(program, param, true).is_some() {
            continue;
        }
        writeln!(
            out,
            "layout(location = {location}) out {} {};",
            numeric_token(param.numeric_type()),
            param.name()
        )
        .ok();
        location += 1;
    }
    if !entry.input_parameters().is_empty() || !entry.output_parameters().is_empty() {
        out.push('\n');
    }
}
