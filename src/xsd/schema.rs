use roxmltree::Node;

use crate::error::GeneratorError;

use super::{
    complex_type_def::ComplexTypeDefinition, components::TypeDeclaration, element_children,
    element_decl::ElementDeclaration, is_xsd, simple_type_def::SimpleTypeDefinition, validation,
    MappingContext,
};

/// One `<schema>`, with the schemas it includes already loaded.
#[derive(Clone, Debug)]
pub struct Schema {
    pub location: String,
    pub includes: Vec<Schema>,
    pub declarations: Vec<TypeDeclaration>,
}

impl Schema {
    pub const TAG_NAME: &'static str = "schema";

    /// Validates and maps `schema`, loading its includes through the context's loader.
    pub(crate) fn map_from_xml(
        context: &mut MappingContext,
        schema: Node,
    ) -> Result<Self, GeneratorError> {
        if !is_xsd(schema, Self::TAG_NAME) {
            return Err(context.structural(schema, "expected an XML Schema <schema> element"));
        }
        validation::validate_assumptions(context, schema)?;

        let mut includes = Vec::new();
        let mut declarations = Vec::new();
        for child in element_children(schema) {
            if !child.tag_name().namespace().is_some_and(|ns| ns == super::XS_NAMESPACE) {
                return Err(context.structural(child, "unknown schema child"));
            }
            match child.tag_name().name() {
                "include" => {
                    let location = context.required_attribute(child, "schemaLocation")?;
                    if let Some(include) = Self::load_include(context, location)? {
                        includes.push(include);
                    }
                }
                "import" | "annotation" => {}
                ElementDeclaration::TAG_NAME => declarations.push(TypeDeclaration::Element(
                    ElementDeclaration::map_from_xml(context, child)?,
                )),
                SimpleTypeDefinition::TAG_NAME => declarations.push(TypeDeclaration::SimpleType(
                    SimpleTypeDefinition::map_from_xml(context, child)?,
                )),
                ComplexTypeDefinition::TAG_NAME => declarations.push(
                    TypeDeclaration::ComplexType(ComplexTypeDefinition::map_from_xml(
                        context, child, None,
                    )?),
                ),
                other => {
                    return Err(context.structural(child, format!("unknown schema child <{other}>")))
                }
            }
        }

        Ok(Self {
            location: context.document().to_string(),
            includes,
            declarations,
        })
    }

    fn load_include(
        context: &mut MappingContext,
        location: &str,
    ) -> Result<Option<Self>, GeneratorError> {
        let Some(text) = context.load_include(location)? else {
            return Ok(None);
        };
        let document = context.parse(location, &text)?;
        context
            .in_document(location, |context| {
                Self::map_from_xml(context, document.root_element())
            })
            .map(Some)
    }

    /// All declarations, depth-first: included schemas come before this schema's own.
    pub fn types(&self) -> Vec<&TypeDeclaration> {
        let mut types = Vec::new();
        self.collect_types(&mut types);
        types
    }

    fn collect_types<'a>(&'a self, types: &mut Vec<&'a TypeDeclaration>) {
        for include in &self.includes {
            include.collect_types(types);
        }
        types.extend(self.declarations.iter());
    }
}
