use roxmltree::Node;

use crate::error::GeneratorError;

use super::{
    complex_type_def::ComplexTypeDefinition, element_children, is_xsd, MappingContext, Occurs,
    TypeRef,
};

/// A top-level `<element>` of a schema.
#[derive(Clone, Debug)]
pub struct ElementDeclaration {
    pub name: String,
    pub content: ElementContent,
}

#[derive(Clone, Debug)]
pub enum ElementContent {
    /// `<element name="X" type="prefix:T"/>`
    Named(TypeRef),
    /// `<element name="X"><complexType>...</complexType></element>`, named after the element
    Inline(ComplexTypeDefinition),
}

impl ElementDeclaration {
    pub const TAG_NAME: &'static str = "element";

    pub(crate) fn map_from_xml(
        context: &MappingContext,
        element: Node,
    ) -> Result<Self, GeneratorError> {
        let name = context.name(element)?;
        let children = element_children(element).collect::<Vec<_>>();

        let content = if element.has_attribute("type") {
            if !children.is_empty() {
                return Err(context.structural(element, "element has both a type and content"));
            }
            ElementContent::Named(context.type_ref(element, "type")?)
        } else {
            match children.as_slice() {
                [child] if is_xsd(*child, ComplexTypeDefinition::TAG_NAME) => {
                    ElementContent::Inline(ComplexTypeDefinition::map_from_xml(
                        context,
                        *child,
                        Some(&name),
                    )?)
                }
                _ => {
                    return Err(context.structural(
                        element,
                        "element without a type must contain exactly one complexType",
                    ))
                }
            }
        };

        Ok(Self { name, content })
    }
}

/// An `<element>` inside a `<sequence>`, i.e. one field of a struct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: String,
    pub type_ref: TypeRef,
    pub occurs: Occurs,
}

impl FieldDeclaration {
    pub(crate) fn map_from_xml(
        context: &MappingContext,
        element: Node,
    ) -> Result<Self, GeneratorError> {
        if element.has_attribute("ref") {
            return Err(context.structural(element, "element references are not supported"));
        }
        if !element.has_attribute("type") {
            return Err(context.structural(element, "anonymous field types are not supported"));
        }
        Ok(Self {
            name: context.name(element)?,
            type_ref: context.type_ref(element, "type")?,
            occurs: context.occurs(element)?,
        })
    }

    /// Maps every `<element>` child of a `<sequence>`, in document order.
    pub(crate) fn map_sequence(
        context: &MappingContext,
        sequence: Node,
    ) -> Result<Vec<Self>, GeneratorError> {
        element_children(sequence)
            .map(|element| {
                if is_xsd(element, ElementDeclaration::TAG_NAME) {
                    Self::map_from_xml(context, element)
                } else {
                    Err(context.structural(element, "sequence may only contain elements"))
                }
            })
            .collect()
    }
}
