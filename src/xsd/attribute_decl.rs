use roxmltree::Node;

use crate::error::GeneratorError;

use super::{MappingContext, Occurs, TypeRef};

/// An `<attribute>` of a simple-content extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeDeclaration {
    pub name: String,
    pub type_ref: TypeRef,
    pub occurs: Occurs,
}

impl AttributeDeclaration {
    pub const TAG_NAME: &'static str = "attribute";

    pub(crate) fn map_from_xml(
        context: &MappingContext,
        attribute: Node,
    ) -> Result<Self, GeneratorError> {
        Ok(Self {
            name: context.name(attribute)?,
            type_ref: context.type_ref(attribute, "type")?,
            occurs: context.occurs(attribute)?,
        })
    }
}
