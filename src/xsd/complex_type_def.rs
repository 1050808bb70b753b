use roxmltree::Node;

use crate::error::GeneratorError;

use super::{
    attribute_decl::AttributeDeclaration, element_children, element_decl::FieldDeclaration,
    is_xsd, MappingContext, Namespace, TypeRef,
};

/// A `<complexType>`, either top-level or the anonymous type of a top-level element.
#[derive(Clone, Debug)]
pub struct ComplexTypeDefinition {
    pub name: String,
    /// `None` for an empty `<complexType/>`, a marker type without fields.
    pub content: Option<ContentType>,
}

/// The three content shapes a complex type may take.
#[derive(Clone, Debug)]
pub enum ContentType {
    /// `<sequence>` of fields
    Sequence(Vec<FieldDeclaration>),
    /// `<simpleContent><extension base="xsd:T">` with attributes: a scalar value plus attributes
    SimpleContent {
        base: TypeRef,
        attributes: Vec<AttributeDeclaration>,
    },
    /// `<complexContent><extension base="prefix:T"><sequence>`: single inheritance from `base`
    ComplexContent {
        base: TypeRef,
        fields: Vec<FieldDeclaration>,
    },
}

impl ComplexTypeDefinition {
    pub const TAG_NAME: &'static str = "complexType";

    /// `name` overrides the `name` attribute for anonymous types nested in an element.
    pub(crate) fn map_from_xml(
        context: &MappingContext,
        complex_type: Node,
        name: Option<&str>,
    ) -> Result<Self, GeneratorError> {
        let name = match name {
            Some(name) => name.to_string(),
            None => context.name(complex_type)?,
        };

        let children = element_children(complex_type).collect::<Vec<_>>();
        let content = match children.as_slice() {
            [] => None,
            [child] => Some(Self::map_content(context, *child)?),
            _ => {
                return Err(context.structural(
                    complex_type,
                    "complexType must have at most one content child",
                ))
            }
        };

        Ok(Self { name, content })
    }

    fn map_content(context: &MappingContext, content: Node) -> Result<ContentType, GeneratorError> {
        match content.tag_name().name() {
            "sequence" if is_xsd(content, "sequence") => Ok(ContentType::Sequence(
                FieldDeclaration::map_sequence(context, content)?,
            )),
            "simpleContent" if is_xsd(content, "simpleContent") => {
                let extension = Self::single_extension(context, content)?;
                let base = context.type_ref(extension, "base")?;
                let attributes = element_children(extension)
                    .map(|attribute| {
                        if is_xsd(attribute, AttributeDeclaration::TAG_NAME) {
                            AttributeDeclaration::map_from_xml(context, attribute)
                        } else {
                            Err(context.structural(
                                attribute,
                                "simpleContent extension may only contain attributes",
                            ))
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if attributes.is_empty() {
                    return Err(context.structural(
                        extension,
                        "simpleContent extension must declare at least one attribute",
                    ));
                }
                Ok(ContentType::SimpleContent { base, attributes })
            }
            "complexContent" if is_xsd(content, "complexContent") => {
                let extension = Self::single_extension(context, content)?;
                let base = context.type_ref(extension, "base")?;
                if base.namespace != Namespace::Service {
                    return Err(context.malformed(
                        extension,
                        &base.to_string(),
                        "complexContent may only extend a service type",
                    ));
                }
                let fields = match element_children(extension).collect::<Vec<_>>().as_slice() {
                    [sequence] if is_xsd(*sequence, "sequence") => {
                        FieldDeclaration::map_sequence(context, *sequence)?
                    }
                    _ => {
                        return Err(context.structural(
                            extension,
                            "complexContent extension must contain exactly one sequence",
                        ))
                    }
                };
                Ok(ContentType::ComplexContent { base, fields })
            }
            other => Err(context.structural(
                content,
                format!("unsupported complexType content <{other}>"),
            )),
        }
    }

    fn single_extension<'a, 'input>(
        context: &MappingContext,
        content: Node<'a, 'input>,
    ) -> Result<Node<'a, 'input>, GeneratorError> {
        match element_children(content).collect::<Vec<_>>().as_slice() {
            [extension] if is_xsd(*extension, "extension") => Ok(*extension),
            _ => Err(context.structural(content, "expected a single extension")),
        }
    }
}
