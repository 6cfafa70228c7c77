//! Shader parameter descriptors and the factory for canonical vertex
//! attributes.

use std::rc::Rc;

use crate::types::{AutoConstant, Content, Direction, NumericType, Semantic};

/// Shared handle to a parameter.
///
/// A parameter is owned by the function or program that created it, but a
/// downstream function's input list may hold additional handles to the same
/// descriptor after stage synchronization, so parameters are reference
/// counted rather than uniquely owned. Identity comparisons (deletion, the
/// get-or-create contract) use `Rc::ptr_eq`.
pub type ParameterPtr = Rc<Parameter>;

/// A typed, named, semantically tagged shader variable descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    semantic: Semantic,
    content: Content,
    numeric_type: NumericType,
    index: i32,
    direction: Option<Direction>,
    auto_constant: Option<AutoConstant>,
}

impl Parameter {
    /// A plain parameter with no direction and no auto-constant binding
    /// (locals and non-auto program globals).
    pub fn new(
        name: impl Into<String>,
        semantic: Semantic,
        content: Content,
        numeric_type: NumericType,
        index: i32,
    ) -> Self {
        Self {
            name: name.into(),
            semantic,
            content,
            numeric_type,
            index,
            direction: None,
            auto_constant: None,
        }
    }

    /// A directed parameter for a function's input or output list.
    pub fn with_direction(
        name: impl Into<String>,
        semantic: Semantic,
        content: Content,
        numeric_type: NumericType,
        index: i32,
        direction: Direction,
    ) -> Self {
        Self {
            direction: Some(direction),
            ..Self::new(name, semantic, content, numeric_type, index)
        }
    }

    /// A global parameter auto-bound to an engine constant.
    pub fn auto(name: impl Into<String>, auto_constant: AutoConstant) -> Self {
        Self {
            name: name.into(),
            semantic: Semantic::Unknown,
            content: Content::Unknown,
            numeric_type: auto_constant.auto_type.numeric_type(),
            index: 0,
            direction: None,
            auto_constant: Some(auto_constant),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn semantic(&self) -> Semantic {
        self.semantic
    }

    pub fn content(&self) -> Content {
        self.content
    }

    pub fn numeric_type(&self) -> NumericType {
        self.numeric_type
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn auto_constant(&self) -> Option<AutoConstant> {
        self.auto_constant
    }

    pub fn is_auto(&self) -> bool {
        self.auto_constant.is_some()
    }

    pub fn is_sampler(&self) -> bool {
        self.numeric_type.is_sampler()
    }

    /// Deep copy marked as an input, used when a downstream stage mirrors an
    /// upstream stage's output.
    pub fn clone_as_input(&self) -> Parameter {
        Parameter {
            direction: Some(Direction::In),
            ..self.clone()
        }
    }
}

/// Numeric type a semantic mandates, if any. Texcoord is caller-typed since
/// texture coordinates may carry 1-4 components.
fn mandated_type(semantic: Semantic) -> Option<NumericType> {
    match semantic {
        Semantic::Position => Some(NumericType::Float4),
        Semantic::Normal | Semantic::Tangent | Semantic::Binormal => Some(NumericType::Float3),
        Semantic::Color => Some(NumericType::Float4),
        _ => None,
    }
}

fn name_stem(semantic: Semantic) -> &'static str {
    match semantic {
        Semantic::Position => "position",
        Semantic::BlendWeights => "blend_weights",
        Semantic::BlendIndices => "blend_indices",
        Semantic::Normal => "normal",
        Semantic::Color => "colour",
        Semantic::Texcoord => "texcoord",
        Semantic::Binormal => "binormal",
        Semantic::Tangent => "tangent",
        Semantic::Unknown => "param",
    }
}

/// Constructs canonical parameters for the standard vertex attributes.
pub struct ParameterFactory;

impl ParameterFactory {
    /// Get a preconfigured parameter for `(semantic, direction)` at `index`.
    ///
    /// Returns `None` for semantics with no canonical constructor
    /// (blend weights/indices, unknown) — a caller-visible "could not
    /// resolve" outcome.
    ///
    /// Panics if `requested` disagrees with a type the semantic mandates;
    /// that is a contract violation in the composition driver.
    pub fn create(
        semantic: Semantic,
        index: i32,
        direction: Direction,
        content: Content,
        requested: NumericType,
    ) -> Option<ParameterPtr> {
        let numeric_type = match mandated_type(semantic) {
            Some(mandated) => {
                assert!(
                    mandated == requested,
                    "semantic {semantic:?} mandates {mandated:?}, got {requested:?}"
                );
                mandated
            }
            None if matches!(
                semantic,
                Semantic::BlendWeights | Semantic::BlendIndices | Semantic::Unknown
            ) =>
            {
                return None;
            }
            None => requested,
        };

        let prefix = match direction {
            Direction::In => "i",
            Direction::Out => "o",
        };
        let name = format!("{prefix}_{}_{index}", name_stem(semantic));
        Some(Rc::new(Parameter::with_direction(
            name,
            semantic,
            content,
            numeric_type,
            index,
            direction,
        )))
    }

    pub fn in_position(index: i32) -> ParameterPtr {
        Self::create(
            Semantic::Position,
            index,
            Direction::In,
            Content::PositionObjectSpace,
            NumericType::Float4,
        )
        .expect("position has a canonical constructor")
    }

    pub fn out_position(index: i32) -> ParameterPtr {
        Self::create(
            Semantic::Position,
            index,
            Direction::Out,
            Content::PositionProjectiveSpace,
            NumericType::Float4,
        )
        .expect("position has a canonical constructor")
    }

    pub fn in_normal(index: i32) -> ParameterPtr {
        Self::create(
            Semantic::Normal,
            index,
            Direction::In,
            Content::NormalObjectSpace,
            NumericType::Float3,
        )
        .expect("normal has a canonical constructor")
    }

    pub fn out_normal(index: i32) -> ParameterPtr {
        Self::create(
            Semantic::Normal,
            index,
            Direction::Out,
            Content::NormalObjectSpace,
            NumericType::Float3,
        )
        .expect("normal has a canonical constructor")
    }

    pub fn in_color(index: i32) -> ParameterPtr {
        Self::create(
            Semantic::Color,
            index,
            Direction::In,
            Content::ColorDiffuse,
            NumericType::Float4,
        )
        .expect("colour has a canonical constructor")
    }

    pub fn out_color(index: i32) -> ParameterPtr {
        Self::create(
            Semantic::Color,
            index,
            Direction::Out,
            Content::ColorDiffuse,
            NumericType::Float4,
        )
        .expect("colour has a canonical constructor")
    }

    pub fn in_texcoord(index: i32, numeric_type: NumericType) -> ParameterPtr {
        Self::create(
            Semantic::Texcoord,
            index,
            Direction::In,
            Content::TextureCoordinate,
            numeric_type,
        )
        .expect("texcoord has a canonical constructor")
    }

    pub fn out_texcoord(index: i32, numeric_type: NumericType) -> ParameterPtr {
        Self::create(
            Semantic::Texcoord,
            index,
            Direction::Out,
            Content::TextureCoordinate,
            numeric_type,
        )
        .expect("texcoord has a canonical constructor")
    }

    pub fn in_tangent(index: i32) -> ParameterPtr {
        Self::create(
            Semantic::Tangent,
            index,
            Direction::In,
            Content::TangentObjectSpace,
            NumericType::Float3,
        )
        .expect("tangent has a canonical constructor")
    }

    pub fn in_binormal(index: i32) -> ParameterPtr {
        Self::create(
            Semantic::Binormal,
            index,
            Direction::In,
            Content::BinormalObjectSpace,
            NumericType::Float3,
        )
        .expect("binormal has a canonical constructor")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_fixes_mandated_types() {
        let p = ParameterFactory::in_position(0);
        assert_eq!(p.numeric_type(), NumericType::Float4);
        assert_eq!(p.semantic(), Semantic::Position);
        assert_eq!(p.direction(), Some(Direction::In));

        let n = ParameterFactory::in_normal(0);
        assert_eq!(n.numeric_type(), NumericType::Float3);
    }

    #[test]
    fn factory_passes_through_texcoord_type() {
        let t = ParameterFactory::in_texcoord(2, NumericType::Float2);
        assert_eq!(t.numeric_type(), NumericType::Float2);
        assert_eq!(t.index(), 2);
        assert_eq!(t.name(), "i_texcoord_2");
    }

    #[test]
    fn factory_has_no_constructor_for_blend_attributes() {
        assert!(
            ParameterFactory::create(
                Semantic::BlendWeights,
                0,
                Direction::In,
                Content::BlendWeights,
                NumericType::Float4,
            )
            .is_none()
        );
    }

    #[test]
    #[should_panic(expected = "mandates")]
    fn factory_rejects_inconsistent_mandated_type() {
        ParameterFactory::create(
            Semantic::Position,
            0,
            Direction::In,
            Content::PositionObjectSpace,
            NumericType::Float2,
        );
    }

    #[test]
    fn clone_as_input_is_a_distinct_deep_copy() {
        let out = ParameterFactory::out_texcoord(0, NumericType::Float2);
        let cloned = Rc::new(out.clone_as_input());
        assert!(!Rc::ptr_eq(&out, &cloned));
        assert_eq!(cloned.direction(), Some(Direction::In));
        assert_eq!(cloned.name(), out.name());
        assert_eq!(cloned.numeric_type(), out.numeric_type());
    }
}
