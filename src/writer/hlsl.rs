//! Semantic-annotated emitter shared by HLSL and Cg. The two dialects differ
//! only in include extension and in Cg's explicit sampler register bindings.

use std::fmt::Write;

use crate::parameter::Parameter;
use crate::program::Program;
use crate::types::{NumericType, Semantic, TargetLanguage};

use super::{write_function_title, write_program_title};

fn numeric_token(ty: NumericType) -> &'static str {
    match ty {
        NumericType::Float => "float",
        NumericType::Float2 => "float2",
        NumericType::Float3 => "float3",
        NumericType::Float4 => "float4",
        NumericType::Int => "int",
        NumericType::Int2 => "int2",
        NumericType::Int3 => "int3",
        NumericType::Int4 => "int4",
        NumericType::Matrix2x2 => "float2x2",
        NumericType::Matrix2x3 => "float2x3",
        NumericType::Matrix2x4 => "float2x4",
        NumericType::Matrix3x2 => "float3x2",
        NumericType::Matrix3x3 => "float3x3",
        NumericType::Matrix3x4 => "float3x4",
        NumericType::Matrix4x2 => "float4x2",
        NumericType::Matrix4x3 => "float4x3",
        NumericType::Matrix4x4 => "float4x4",
        NumericType::Sampler1D => "sampler1D",
        NumericType::Sampler2D => "sampler2D",
        NumericType::Sampler3D => "sampler3D",
        NumericType::SamplerCube => "samplerCUBE",
    }
}

fn semantic_token(semantic: Semantic) -> &'static str {
    match semantic {
        Semantic::Position => "POSITION",
        Semantic::BlendWeights => "BLENDWEIGHT",
        Semantic::BlendIndices => "BLENDINDICES",
        Semantic::Normal => "NORMAL",
        Semantic::Color => "COLOR",
        Semantic::Texcoord => "TEXCOORD",
        Semantic::Binormal => "BINORMAL",
        Semantic::Tangent => "TANGENT",
        // Generic varyings travel through texture coordinate slots.
        Semantic::Unknown => "TEXCOORD",
    }
}

fn write_annotated_parameter(out: &mut String, qualifier: &str, param: &Parameter) {
    write!(
        out,
        "\t{qualifier} {} {} : {}",
        numeric_token(param.numeric_type()),
        param.name(),
        semantic_token(param.semantic()),
    )
    .ok();
    // There is only ever one position; every other indexed semantic carries
    // its numeric suffix.
    if param.semantic() != Semantic::Position {
        write!(out, "{}", param.index()).ok();
    }
}

pub(super) fn write_program(out: &mut String, program: &Program, language: TargetLanguage) {
    write_program_title(out, program, language);

    let include_ext = language.display_name();
    for dep in program.dependencies() {
        writeln!(out, "#include \"{dep}.{include_ext}\"").ok();
    }
    if !program.dependencies().is_empty() {
        out.push('\n');
    }

    let mut sampler_slot = 0u32;
    for param in program.parameters() {
        let token = numeric_token(param.numeric_type());
        if param.is_sampler() {
            if language.explicit_sampler_registers() {
                writeln!(out, "{token} {} : register(s{sampler_slot});", param.name()).ok();
            } else {
                writeln!(out, "{token} {};", param.name()).ok();
            }
            sampler_slot += 1;
        } else {
            writeln!(out, "{token} {};", param.name()).ok();
        }
    }
    if !program.parameters().is_empty() {
        out.push('\n');
    }

    for function in program.functions() {
        write_function_title(out, function.name(), function.description());
        write!(out, "void {}(", function.name()).ok();

        let total =
            function.input_parameters().len() + function.output_parameters().len();
        let mut written = 0usize;
        for param in function.input_parameters() {
            out.push('\n');
            write_annotated_parameter(out, "in", param);
            written += 1;
            if written < total {
                out.push(',');
            }
        }
        for param in function.output_parameters() {
            out.push('\n');
            write_annotated_parameter(out, "out", param);
            written += 1;
            if written < total {
                out.push(',');
            }
        }
        out.push_str(")\n{\n");

        for local in function.local_parameters() {
            writeln!(out, "\t{} {};", numeric_token(local.numeric_type()), local.name()).ok();
        }

        for atom in function.atoms() {
            atom.write_source(out, language);
        }

        out.push_str("}\n\n");
    }
}
