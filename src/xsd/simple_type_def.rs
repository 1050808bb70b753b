use roxmltree::Node;

use crate::{error::GeneratorError, generator::naming};

use super::{element_children, is_xsd, MappingContext};

/// A named `<simpleType>`. Every simple type in this schema family is a string enumeration.
#[derive(Clone, Debug)]
pub struct SimpleTypeDefinition {
    pub name: String,
    pub values: Vec<EnumValue>,
}

/// One `<enumeration value="...">` of an enumeration type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub type_name: String,
    pub value: String,
}

impl EnumValue {
    /// The generated constant: the type name followed by the capitalized value, or by `Null`
    /// for the empty value.
    pub fn identifier(&self) -> String {
        naming::enum_constant(&self.type_name, &self.value)
    }
}

impl SimpleTypeDefinition {
    pub const TAG_NAME: &'static str = "simpleType";

    pub(crate) fn map_from_xml(
        context: &MappingContext,
        simple_type: Node,
    ) -> Result<Self, GeneratorError> {
        let name = context.name(simple_type)?;

        let restriction = match element_children(simple_type).collect::<Vec<_>>().as_slice() {
            [restriction] if is_xsd(*restriction, "restriction") => *restriction,
            _ => {
                return Err(context.structural(
                    simple_type,
                    "simpleType must consist of a single restriction",
                ))
            }
        };

        let values = element_children(restriction)
            .map(|facet| {
                if !is_xsd(facet, "enumeration") {
                    return Err(context.structural(facet, "only enumeration facets are supported"));
                }
                Ok(EnumValue {
                    type_name: name.clone(),
                    value: context.required_attribute(facet, "value")?.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name, values })
    }
}
