use std::fmt::Write as _;

use crate::{
    error::GeneratorError,
    resolver::Resolution,
    xsd::{
        AttributeDeclaration, ComplexTypeDefinition, ContentType, DeclarationVisitor,
        ElementContent, ElementDeclaration, FieldDeclaration, Occurs, SimpleTypeDefinition,
    },
};

use super::{
    naming,
    type_mapper::{chardata_type, map_type, MappedType},
};

/// Writes Go declarations and their registry entries. Enumerations and everything else go to
/// separate buffers, which become `enum.go` and `types.go`.
pub(super) struct GoEmitter<'r> {
    resolution: &'r Resolution,
    pub(super) enums: String,
    pub(super) types: String,
}

impl<'r> GoEmitter<'r> {
    pub(super) fn new(resolution: &'r Resolution) -> Self {
        Self {
            resolution,
            enums: String::new(),
            types: String::new(),
        }
    }

    fn write_struct(&mut self, complex_type: &ComplexTypeDefinition) -> Result<(), GeneratorError> {
        let mut body = String::new();
        match &complex_type.content {
            None => {}
            Some(ContentType::Sequence(fields)) => {
                self.write_fields(&mut body, fields)?;
            }
            Some(ContentType::ComplexContent { base, fields }) => {
                // embedding the base type first is how Go spells single inheritance
                let _ = writeln!(body, "\t{}", base.local_name);
                if !fields.is_empty() {
                    body.push('\n');
                }
                self.write_fields(&mut body, fields)?;
            }
            Some(ContentType::SimpleContent { base, attributes }) => {
                for attribute in attributes {
                    self.write_attribute(&mut body, attribute)?;
                }
                let value_type = chardata_type(base)?;
                let _ = writeln!(body, "\tValue {value_type} `xml:\",chardata\"`");
            }
        }

        let _ = write!(
            self.types,
            "type {} struct {{\n{body}}}\n\n",
            complex_type.name
        );
        write_registry(&mut self.types, &complex_type.name, &complex_type.name);
        Ok(())
    }

    fn write_fields(
        &self,
        out: &mut String,
        fields: &[FieldDeclaration],
    ) -> Result<(), GeneratorError> {
        for field in fields {
            let mapped = map_type(&field.type_ref, field.occurs, self.resolution)?;
            let tag = tag(&field.name, &mapped, None);
            let _ = writeln!(
                out,
                "\t{} {} `xml:\"{tag}\"`",
                naming::field_name(&field.name),
                mapped.expr
            );
        }
        Ok(())
    }

    fn write_attribute(
        &self,
        out: &mut String,
        attribute: &AttributeDeclaration,
    ) -> Result<(), GeneratorError> {
        let mapped = map_type(&attribute.type_ref, attribute.occurs, self.resolution)?;
        let tag = tag(&attribute.name, &mapped, Some("attr"));
        let _ = writeln!(
            out,
            "\t{} {} `xml:\"{tag}\"`",
            naming::field_name(&attribute.name),
            mapped.expr
        );
        Ok(())
    }
}

/// `name[,omitempty][,typeattr]`, with `suffix` appended last.
fn tag(name: &str, mapped: &MappedType, suffix: Option<&str>) -> String {
    let mut tag = name.to_string();
    if mapped.omit_empty {
        tag.push_str(",omitempty");
    }
    if mapped.type_attr && suffix.is_none() {
        tag.push_str(",typeattr");
    }
    if let Some(suffix) = suffix {
        tag.push(',');
        tag.push_str(suffix);
    }
    tag
}

/// Registers `go_type` under `name` so the decoder can find it from an `xsi:type` value.
pub(super) fn write_registry(out: &mut String, name: &str, go_type: &str) {
    let _ = write!(
        out,
        "func init() {{\n\tt[\"{name}\"] = reflect.TypeOf((*{go_type})(nil)).Elem()\n}}\n\n"
    );
}

impl DeclarationVisitor for GoEmitter<'_> {
    type Output = Result<(), GeneratorError>;

    fn visit_element(&mut self, element: &ElementDeclaration) -> Self::Output {
        match &element.content {
            ElementContent::Named(type_ref) => {
                // top-level elements occur exactly once
                let mapped = map_type(type_ref, Occurs::REQUIRED, self.resolution)?;
                let _ = write!(self.types, "type {} {}\n\n", element.name, mapped.expr);
                write_registry(&mut self.types, &element.name, &element.name);
                Ok(())
            }
            ElementContent::Inline(complex_type) => self.write_struct(complex_type),
        }
    }

    fn visit_simple_type(&mut self, simple_type: &SimpleTypeDefinition) -> Self::Output {
        let name = &simple_type.name;
        let _ = write!(self.enums, "type {name} string\n\nconst (\n");
        for value in &simple_type.values {
            let _ = writeln!(
                self.enums,
                "\t{} = {name}({})",
                value.identifier(),
                naming::go_string(&value.value)
            );
        }
        self.enums.push_str(")\n\n");
        write_registry(&mut self.enums, name, name);
        Ok(())
    }

    fn visit_complex_type(&mut self, complex_type: &ComplexTypeDefinition) -> Self::Output {
        self.write_struct(complex_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver;
    use crate::xsd::{EnumValue, TypeDeclaration, TypeRef};

    fn emit(declarations: &[TypeDeclaration]) -> (String, String) {
        let resolution = resolver::resolve(declarations).unwrap();
        let mut emitter = GoEmitter::new(&resolution);
        for declaration in declarations {
            declaration.accept(&mut emitter).unwrap();
        }
        (emitter.enums, emitter.types)
    }

    #[test]
    fn enumeration_constants_and_registry() {
        let values = ["poweredOff", "poweredOn", ""]
            .into_iter()
            .map(|value| EnumValue {
                type_name: "VirtualMachinePowerState".into(),
                value: value.into(),
            })
            .collect();
        let (enums, types) = emit(&[TypeDeclaration::SimpleType(SimpleTypeDefinition {
            name: "VirtualMachinePowerState".into(),
            values,
        })]);
        assert!(types.is_empty());
        assert_eq!(
            enums,
            concat!(
                "type VirtualMachinePowerState string\n\n",
                "const (\n",
                "\tVirtualMachinePowerStatePoweredOff = VirtualMachinePowerState(\"poweredOff\")\n",
                "\tVirtualMachinePowerStatePoweredOn = VirtualMachinePowerState(\"poweredOn\")\n",
                "\tVirtualMachinePowerStateNull = VirtualMachinePowerState(\"\")\n",
                ")\n\n",
                "func init() {\n",
                "\tt[\"VirtualMachinePowerState\"] = reflect.TypeOf((*VirtualMachinePowerState)(nil)).Elem()\n",
                "}\n\n",
            )
        );
    }

    #[test]
    fn simple_content_has_attribute_then_chardata() {
        let (_, types) = emit(&[TypeDeclaration::ComplexType(ComplexTypeDefinition {
            name: "ManagedObjectReference".into(),
            content: Some(ContentType::SimpleContent {
                base: TypeRef::xsd("string"),
                attributes: vec![AttributeDeclaration {
                    name: "type".into(),
                    type_ref: TypeRef::xsd("string"),
                    occurs: Occurs::REQUIRED,
                }],
            }),
        })]);
        assert!(types.starts_with(concat!(
            "type ManagedObjectReference struct {\n",
            "\tType string `xml:\"type,attr\"`\n",
            "\tValue string `xml:\",chardata\"`\n",
            "}\n\n",
        )));
    }

    #[test]
    fn simple_content_value_uses_go_type() {
        let (_, types) = emit(&[TypeDeclaration::ComplexType(ComplexTypeDefinition {
            name: "KeyAnyValue".into(),
            content: Some(ContentType::SimpleContent {
                base: TypeRef::xsd("boolean"),
                attributes: vec![AttributeDeclaration {
                    name: "key".into(),
                    type_ref: TypeRef::xsd("string"),
                    occurs: Occurs::REQUIRED,
                }],
            }),
        })]);
        assert!(types.contains("\tValue bool `xml:\",chardata\"`\n"));
    }

    #[test]
    fn enumeration_value_is_a_quoted_literal() {
        let (enums, _) = emit(&[TypeDeclaration::SimpleType(SimpleTypeDefinition {
            name: "Quoted".into(),
            values: vec![EnumValue {
                type_name: "Quoted".into(),
                value: r#"a"b"#.into(),
            }],
        })]);
        assert!(enums.contains(r#"QuotedA"b = Quoted("a\"b")"#));
    }

    #[test]
    fn fields_keep_document_order_and_tags() {
        let fields = vec![
            FieldDeclaration {
                name: "_this".into(),
                type_ref: TypeRef::service("ManagedObjectReference"),
                occurs: Occurs::REQUIRED,
            },
            FieldDeclaration {
                name: "specSet".into(),
                type_ref: TypeRef::service("PropertyFilterSpec"),
                occurs: Occurs::REPEATED,
            },
            FieldDeclaration {
                name: "value".into(),
                type_ref: TypeRef::xsd("anyType"),
                occurs: Occurs::OPTIONAL,
            },
            FieldDeclaration {
                name: "connected".into(),
                type_ref: TypeRef::xsd("boolean"),
                occurs: Occurs::OPTIONAL,
            },
        ];
        let (_, types) = emit(&[TypeDeclaration::ComplexType(ComplexTypeDefinition {
            name: "RetrievePropertiesRequestType".into(),
            content: Some(ContentType::Sequence(fields)),
        })]);
        assert!(types.starts_with(concat!(
            "type RetrievePropertiesRequestType struct {\n",
            "\tThis ManagedObjectReference `xml:\"_this\"`\n",
            "\tSpecSet []PropertyFilterSpec `xml:\"specSet\"`\n",
            "\tValue AnyType `xml:\"value,omitempty,typeattr\"`\n",
            "\tConnected *bool `xml:\"connected\"`\n",
            "}\n\n",
        )));
    }

    #[test]
    fn empty_complex_type_is_an_empty_struct() {
        let (_, types) = emit(&[TypeDeclaration::ComplexType(ComplexTypeDefinition {
            name: "Marker".into(),
            content: None,
        })]);
        assert!(types.starts_with("type Marker struct {\n}\n\n"));
        assert!(types.contains("t[\"Marker\"]"));
    }

    #[test]
    fn typed_element_is_an_alias() {
        let (_, types) = emit(&[TypeDeclaration::Element(ElementDeclaration {
            name: "RetrieveServiceContent".into(),
            content: ElementContent::Named(TypeRef::service("RetrieveServiceContentRequestType")),
        })]);
        assert!(types.starts_with(
            "type RetrieveServiceContent RetrieveServiceContentRequestType\n\n"
        ));
        assert!(types.contains("t[\"RetrieveServiceContent\"]"));
    }

    #[test]
    fn unknown_primitive_aborts_emission() {
        let declarations = [TypeDeclaration::ComplexType(ComplexTypeDefinition {
            name: "Span".into(),
            content: Some(ContentType::Sequence(vec![FieldDeclaration {
                name: "length".into(),
                type_ref: TypeRef::xsd("duration"),
                occurs: Occurs::REQUIRED,
            }])),
        })];
        let resolution = resolver::resolve(&declarations).unwrap();
        let mut emitter = GoEmitter::new(&resolution);
        assert!(matches!(
            declarations[0].accept(&mut emitter),
            Err(GeneratorError::UnknownPrimitiveType(_))
        ));
    }
}
