//! Pre-flight checks of the structural assumptions the rest of the generator relies on.
//!
//! Mapping would reject most of these shapes too, but checking the whole document up front
//! reports the first offending construct before any type is built.

use roxmltree::Node;

use crate::error::GeneratorError;

use super::{element_children, is_xsd, MappingContext, Namespace, TypeRef};

/// Validates every schema construct below `schema`. The first violation aborts.
pub(crate) fn validate_assumptions(
    context: &MappingContext,
    schema: Node,
) -> Result<(), GeneratorError> {
    for node in schema.descendants().filter(Node::is_element) {
        if is_xsd(node, "enumeration") {
            validate_enumeration(context, node)?;
        } else if is_xsd(node, "restriction") {
            validate_restriction(context, node)?;
        } else if is_xsd(node, "complexContent") {
            validate_complex_content(context, node)?;
        } else if is_xsd(node, "complexType") {
            validate_complex_type(context, node)?;
        }
    }
    Ok(())
}

fn parent_is(node: Node, name: &str) -> bool {
    node.parent_element().is_some_and(|parent| is_xsd(parent, name))
}

fn validate_enumeration(context: &MappingContext, node: Node) -> Result<(), GeneratorError> {
    if !parent_is(node, "restriction") {
        return Err(context.structural(node, "enumeration outside of a restriction"));
    }
    Ok(())
}

fn validate_restriction(context: &MappingContext, node: Node) -> Result<(), GeneratorError> {
    let base = context.type_ref(node, "base")?;
    if base != TypeRef::xsd("string") {
        return Err(context.structural(
            node,
            format!("restriction of {base}, only xsd:string enumerations are supported"),
        ));
    }

    let Some(parent) = node.parent_element().filter(|p| is_xsd(*p, "simpleType")) else {
        return Err(context.structural(node, "restriction outside of a simpleType"));
    };
    if element_children(parent).count() != 1 {
        return Err(context.structural(parent, "restriction must be the only child of simpleType"));
    }
    Ok(())
}

fn validate_complex_content(context: &MappingContext, node: Node) -> Result<(), GeneratorError> {
    if !parent_is(node, "complexType") {
        return Err(context.structural(node, "complexContent outside of a complexType"));
    }
    Ok(())
}

fn validate_complex_type(context: &MappingContext, node: Node) -> Result<(), GeneratorError> {
    if matches!(node.attribute("mixed"), Some("true") | Some("1")) {
        return Err(context.structural(node, "mixed content is not supported"));
    }

    let children = element_children(node).collect::<Vec<_>>();
    let content = match children.as_slice() {
        // an empty complexType is a marker type
        [] => return Ok(()),
        [content] => *content,
        _ => {
            return Err(context.structural(
                node,
                format!(
                    "complexType has {} structural children, expected one",
                    children.len()
                ),
            ))
        }
    };

    if is_xsd(content, "complexContent") {
        let extension = single_child(context, content, "extension")?;
        let sequence = single_child(context, extension, "sequence")?;
        all_children(context, sequence, "element")
    } else if is_xsd(content, "simpleContent") {
        let extension = single_child(context, content, "extension")?;
        let base = context.type_ref(extension, "base")?;
        if base.namespace != Namespace::Xsd {
            return Err(context.structural(
                extension,
                format!("simpleContent must extend a built-in type, found {base}"),
            ));
        }
        if element_children(extension).next().is_none() {
            return Err(context.structural(extension, "simpleContent extension without attributes"));
        }
        all_children(context, extension, "attribute")
    } else if is_xsd(content, "sequence") {
        all_children(context, content, "element")
    } else {
        Err(context.structural(
            content,
            format!("unknown complexType content <{}>", content.tag_name().name()),
        ))
    }
}

fn single_child<'a, 'input>(
    context: &MappingContext,
    node: Node<'a, 'input>,
    name: &str,
) -> Result<Node<'a, 'input>, GeneratorError> {
    match element_children(node).collect::<Vec<_>>().as_slice() {
        [child] if is_xsd(*child, name) => Ok(*child),
        _ => Err(context.structural(
            node,
            format!(
                "<{}> must contain exactly one <{name}>",
                node.tag_name().name()
            ),
        )),
    }
}

fn all_children(context: &MappingContext, node: Node, name: &str) -> Result<(), GeneratorError> {
    match element_children(node).find(|child| !is_xsd(*child, name)) {
        Some(child) => Err(context.structural(
            child,
            format!(
                "<{}> may only contain <{name}>, found <{}>",
                node.tag_name().name(),
                child.tag_name().name()
            ),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xsd::loader::FileLoader;

    fn validate(body: &str) -> Result<(), GeneratorError> {
        let text = format!(
            r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"
                xmlns:vim25="urn:vim25" targetNamespace="urn:vim25">{body}</xsd:schema>"#
        );
        let loader = FileLoader::new(".");
        let context = MappingContext::new(&loader, "test.xsd", "urn:vim25", false);
        let doc = roxmltree::Document::parse(&text).unwrap();
        validate_assumptions(&context, doc.root_element())
    }

    fn violation_path(result: Result<(), GeneratorError>) -> String {
        match result {
            Err(GeneratorError::StructuralAssumptionViolation { path, .. }) => path,
            other => panic!("expected a structural violation, got {other:?}"),
        }
    }

    #[test]
    fn accepts_supported_shapes() {
        validate(
            r#"
            <xsd:simpleType name="PowerState">
                <xsd:restriction base="xsd:string">
                    <xsd:enumeration value="poweredOn"/>
                    <xsd:enumeration value=""/>
                </xsd:restriction>
            </xsd:simpleType>
            <xsd:complexType name="Marker"/>
            <xsd:complexType name="Base">
                <xsd:sequence><xsd:element name="key" type="xsd:string"/></xsd:sequence>
            </xsd:complexType>
            <xsd:complexType name="Derived">
                <xsd:complexContent>
                    <xsd:extension base="vim25:Base">
                        <xsd:sequence><xsd:element name="x" type="xsd:int"/></xsd:sequence>
                    </xsd:extension>
                </xsd:complexContent>
            </xsd:complexType>
            <xsd:complexType name="Ref">
                <xsd:simpleContent>
                    <xsd:extension base="xsd:string">
                        <xsd:attribute name="type" type="xsd:string"/>
                    </xsd:extension>
                </xsd:simpleContent>
            </xsd:complexType>
            "#,
        )
        .unwrap();
    }

    #[test]
    fn rejects_complex_type_with_two_children() {
        let path = violation_path(validate(
            r#"
            <xsd:complexType name="Both">
                <xsd:sequence/>
                <xsd:complexContent>
                    <xsd:extension base="vim25:Base"><xsd:sequence/></xsd:extension>
                </xsd:complexContent>
            </xsd:complexType>
            "#,
        ));
        assert_eq!(path, r#"/schema/complexType[@name="Both"]"#);
    }

    #[test]
    fn rejects_non_string_restriction() {
        let result = validate(
            r#"
            <xsd:simpleType name="Small">
                <xsd:restriction base="xsd:int"><xsd:enumeration value="1"/></xsd:restriction>
            </xsd:simpleType>
            "#,
        );
        assert!(matches!(
            result,
            Err(GeneratorError::StructuralAssumptionViolation { .. })
        ));
    }

    #[test]
    fn rejects_choice_content() {
        let path = violation_path(validate(
            r#"
            <xsd:complexType name="Either">
                <xsd:choice><xsd:element name="a" type="xsd:int"/></xsd:choice>
            </xsd:complexType>
            "#,
        ));
        assert_eq!(path, r#"/schema/complexType[@name="Either"]/choice"#);
    }

    #[test]
    fn rejects_extension_without_sequence() {
        let path = violation_path(validate(
            r#"
            <xsd:complexType name="Derived">
                <xsd:complexContent><xsd:extension base="vim25:Base"/></xsd:complexContent>
            </xsd:complexType>
            "#,
        ));
        assert!(path.ends_with("complexContent/extension"));
    }

    #[test]
    fn rejects_mixed_content() {
        assert!(validate(r#"<xsd:complexType name="Text" mixed="true"/>"#).is_err());
    }

    #[test]
    fn rejects_simple_content_without_attributes() {
        assert!(validate(
            r#"
            <xsd:complexType name="Bare">
                <xsd:simpleContent><xsd:extension base="xsd:string"/></xsd:simpleContent>
            </xsd:complexType>
            "#
        )
        .is_err());
    }
}
