// Only the XSD subset used by the vSphere-style service schemas is modelled. Anything else is
// rejected during validation or mapping.

pub mod attribute_decl;
pub mod complex_type_def;
pub mod components;
pub mod element_decl;
pub mod loader;
pub mod schema;
pub mod simple_type_def;
pub mod validation;
pub mod xstypes;

mod mapping_context;

pub use attribute_decl::AttributeDeclaration;
pub use complex_type_def::{ComplexTypeDefinition, ContentType};
pub use components::{DeclarationVisitor, TypeDeclaration};
pub use element_decl::{ElementContent, ElementDeclaration, FieldDeclaration};
pub use schema::Schema;
pub use simple_type_def::{EnumValue, SimpleTypeDefinition};
pub use xstypes::{Namespace, Occurs, QName, TypeRef, XS_NAMESPACE};

pub(crate) use mapping_context::MappingContext;

use roxmltree::Node;

/// True if `node` is the XML Schema element `name`.
pub(crate) fn is_xsd(node: Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(XS_NAMESPACE)
        && node.tag_name().name() == name
}

pub(crate) fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

/// Renders an element's position for error messages, e.g.
/// `/definitions/types/schema/complexType[@name="Foo"]/sequence`.
pub(crate) fn node_path(node: Node) -> String {
    let mut segments = node
        .ancestors()
        .filter(Node::is_element)
        .map(|n| match n.attribute("name") {
            Some(name) => format!("{}[@name={name:?}]", n.tag_name().name()),
            None => n.tag_name().name().to_string(),
        })
        .collect::<Vec<_>>();
    segments.reverse();
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_path_names_each_ancestor() {
        let doc = roxmltree::Document::parse(
            r#"<schema xmlns="http://www.w3.org/2001/XMLSchema">
                <complexType name="Foo"><sequence><element name="x" type="xsd:int"/></sequence></complexType>
            </schema>"#,
        )
        .unwrap();
        let field = doc
            .descendants()
            .find(|n| is_xsd(*n, "element"))
            .unwrap();
        assert_eq!(
            node_path(field),
            r#"/schema/complexType[@name="Foo"]/sequence/element[@name="x"]"#
        );
    }
}
