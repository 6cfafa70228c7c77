//! Core type definitions shared by the parameter / function / program graph.

use serde::{Deserialize, Serialize};

/// Scalar, vector, matrix, or sampler shape of a shader parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericType {
    Float,
    Float2,
    Float3,
    Float4,
    Int,
    Int2,
    Int3,
    Int4,
    Matrix2x2,
    Matrix2x3,
    Matrix2x4,
    Matrix3x2,
    Matrix3x3,
    Matrix3x4,
    Matrix4x2,
    Matrix4x3,
    Matrix4x4,
    Sampler1D,
    Sampler2D,
    Sampler3D,
    SamplerCube,
}

impl NumericType {
    pub fn is_sampler(self) -> bool {
        matches!(
            self,
            NumericType::Sampler1D
                | NumericType::Sampler2D
                | NumericType::Sampler3D
                | NumericType::SamplerCube
        )
    }

    pub fn is_matrix(self) -> bool {
        matches!(
            self,
            NumericType::Matrix2x2
                | NumericType::Matrix2x3
                | NumericType::Matrix2x4
                | NumericType::Matrix3x2
                | NumericType::Matrix3x3
                | NumericType::Matrix3x4
                | NumericType::Matrix4x2
                | NumericType::Matrix4x3
                | NumericType::Matrix4x4
        )
    }
}

/// Standardized role of a vertex/fragment attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semantic {
    Position,
    BlendWeights,
    BlendIndices,
    Normal,
    Color,
    Texcoord,
    Binormal,
    Tangent,
    Unknown,
}

/// Finer-grained role qualifier distinguishing, e.g., object-space from
/// world-space position when several parameters share one coarse semantic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Content {
    Unknown,
    PositionObjectSpace,
    PositionWorldSpace,
    PositionViewSpace,
    PositionProjectiveSpace,
    NormalObjectSpace,
    NormalWorldSpace,
    NormalViewSpace,
    TangentObjectSpace,
    BinormalObjectSpace,
    ColorDiffuse,
    ColorSpecular,
    TextureCoordinate,
    BlendWeights,
    BlendIndices,
}

/// Direction of a parameter inside a function's parameter lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
}

/// One shader compilation unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderType {
    Vertex,
    Fragment,
    Geometry,
    Hull,
    Domain,
    Compute,
}

impl ShaderType {
    /// Human-readable stage name used in emitted header comments.
    pub fn display_name(self) -> &'static str {
        match self {
            ShaderType::Vertex => "Vertex",
            ShaderType::Fragment => "Fragment",
            ShaderType::Geometry => "Geometry",
            ShaderType::Hull => "Hull",
            ShaderType::Domain => "Domain",
            ShaderType::Compute => "Compute",
        }
    }
}

/// Target shading language for source emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetLanguage {
    Hlsl,
    Glsl,
    Cg,
}

impl TargetLanguage {
    pub fn display_name(self) -> &'static str {
        match self {
            TargetLanguage::Hlsl => "hlsl",
            TargetLanguage::Glsl => "glsl",
            TargetLanguage::Cg => "cg",
        }
    }

    /// Whether the language requires explicit register bindings for samplers.
    pub fn explicit_sampler_registers(self) -> bool {
        matches!(self, TargetLanguage::Cg)
    }
}

/// Engine-provided constants a global parameter can be auto-bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutoConstantType {
    WorldMatrix,
    InverseWorldMatrix,
    ViewMatrix,
    ProjectionMatrix,
    WorldViewMatrix,
    ViewProjMatrix,
    WorldViewProjMatrix,
    CameraPosition,
    CameraPositionObjectSpace,
    AmbientLightColour,
    LightPosition,
    LightDirection,
    LightDiffuseColour,
    LightSpecularColour,
    LightAttenuation,
    TimeElapsed,
}

impl AutoConstantType {
    /// Numeric shape of the bound constant.
    pub fn numeric_type(self) -> NumericType {
        match self {
            AutoConstantType::WorldMatrix
            | AutoConstantType::InverseWorldMatrix
            | AutoConstantType::ViewMatrix
            | AutoConstantType::ProjectionMatrix
            | AutoConstantType::WorldViewMatrix
            | AutoConstantType::ViewProjMatrix
            | AutoConstantType::WorldViewProjMatrix => NumericType::Matrix4x4,
            AutoConstantType::CameraPosition
            | AutoConstantType::CameraPositionObjectSpace
            | AutoConstantType::AmbientLightColour
            | AutoConstantType::LightPosition
            | AutoConstantType::LightDiffuseColour
            | AutoConstantType::LightSpecularColour
            | AutoConstantType::LightAttenuation => NumericType::Float4,
            AutoConstantType::LightDirection => NumericType::Float4,
            AutoConstantType::TimeElapsed => NumericType::Float,
        }
    }

    /// Canonical uniform name for the bound constant.
    pub fn uniform_name(self) -> &'static str {
        match self {
            AutoConstantType::WorldMatrix => "world_matrix",
            AutoConstantType::InverseWorldMatrix => "inverse_world_matrix",
            AutoConstantType::ViewMatrix => "view_matrix",
            AutoConstantType::ProjectionMatrix => "projection_matrix",
            AutoConstantType::WorldViewMatrix => "worldview_matrix",
            AutoConstantType::ViewProjMatrix => "viewproj_matrix",
            AutoConstantType::WorldViewProjMatrix => "worldviewproj_matrix",
            AutoConstantType::CameraPosition => "camera_position",
            AutoConstantType::CameraPositionObjectSpace => "camera_position_object_space",
            AutoConstantType::AmbientLightColour => "ambient_light_colour",
            AutoConstantType::LightPosition => "light_position",
            AutoConstantType::LightDirection => "light_direction",
            AutoConstantType::LightDiffuseColour => "light_diffuse_colour",
            AutoConstantType::LightSpecularColour => "light_specular_colour",
            AutoConstantType::LightAttenuation => "light_attenuation",
            AutoConstantType::TimeElapsed => "time_elapsed",
        }
    }
}

/// Payload associated with an auto-bound constant (e.g. a light index or a
/// time multiplier).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AutoConstantData {
    Real(f32),
    Int(u32),
}

impl AutoConstantData {
    /// Whether the payload is the "no extra data" default.
    pub fn is_zero(self) -> bool {
        match self {
            AutoConstantData::Real(v) => v == 0.0,
            AutoConstantData::Int(v) => v == 0,
        }
    }
}

/// An auto-constant binding carried by a global parameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutoConstant {
    pub auto_type: AutoConstantType,
    pub data: AutoConstantData,
}
