use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    error::GeneratorError,
    resolver::Resolution,
    xsd::{Namespace, Occurs, TypeRef},
};

/// How a built-in XML Schema type is written in Go.
#[derive(Copy, Clone, Debug)]
struct Primitive {
    go_type: &'static str,
    /// Optional single values become pointers, since the zero value is a legal value
    nilable: bool,
    /// The value's concrete type travels in `xsi:type`
    dynamic: bool,
}

const fn plain(go_type: &'static str) -> Primitive {
    Primitive {
        go_type,
        nilable: false,
        dynamic: false,
    }
}

lazy_static! {
    static ref PRIMITIVES: HashMap<&'static str, Primitive> = HashMap::from([
        ("string", plain("string")),
        ("int", plain("int")),
        ("byte", plain("byte")),
        ("long", plain("int64")),
        ("short", plain("int16")),
        ("double", plain("float64")),
        ("float", plain("float32")),
        ("base64Binary", plain("[]byte")),
        ("anyURI", plain("url.URL")),
        (
            "boolean",
            Primitive {
                go_type: "bool",
                nilable: true,
                dynamic: false,
            }
        ),
        (
            "dateTime",
            Primitive {
                go_type: "time.Time",
                nilable: true,
                dynamic: false,
            }
        ),
        (
            "anyType",
            Primitive {
                go_type: "AnyType",
                nilable: false,
                dynamic: true,
            }
        ),
    ]);
}

/// A field's Go type plus the tag options it needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappedType {
    pub expr: String,
    /// `,omitempty`
    pub omit_empty: bool,
    /// `,typeattr`: the decoder must read the concrete type from `xsi:type`
    pub type_attr: bool,
}

/// Go type of the character data of a simple-content type extending the built-in `base`.
pub fn chardata_type(base: &TypeRef) -> Result<&'static str, GeneratorError> {
    PRIMITIVES
        .get(base.local_name.as_str())
        .filter(|_| base.namespace == Namespace::Xsd)
        .map(|primitive| primitive.go_type)
        .ok_or_else(|| GeneratorError::UnknownPrimitiveType(base.local_name.clone()))
}

/// Maps a field type under its occurrence constraints. `resolution` must come from a finished
/// inheritance pass over the whole schema.
pub fn map_type(
    type_ref: &TypeRef,
    occurs: Occurs,
    resolution: &Resolution,
) -> Result<MappedType, GeneratorError> {
    let mut prefix = String::new();
    if occurs.repeated {
        prefix.push_str("[]");
    }
    let single_optional = !occurs.repeated && occurs.optional;
    let mut omit_empty = occurs.optional;

    let (go_type, type_attr) = match type_ref.namespace {
        Namespace::Xsd => {
            let primitive = PRIMITIVES
                .get(type_ref.local_name.as_str())
                .ok_or_else(|| GeneratorError::UnknownPrimitiveType(type_ref.local_name.clone()))?;
            if primitive.nilable && single_optional {
                // the pointer already says "absent"
                prefix.push('*');
                omit_empty = false;
            }
            (primitive.go_type, primitive.dynamic)
        }
        Namespace::Service => {
            let name = type_ref.local_name.as_str();
            if resolution.is_base(name) {
                prefix.push_str("Base");
                (name, true)
            } else {
                if single_optional && !resolution.is_enum(name) {
                    prefix.push('*');
                }
                (name, false)
            }
        }
    };

    Ok(MappedType {
        expr: format!("{prefix}{go_type}"),
        omit_empty,
        type_attr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver;
    use crate::xsd::{
        ComplexTypeDefinition, ContentType, SimpleTypeDefinition, TypeDeclaration,
    };

    const OPTIONAL_REPEATED: Occurs = Occurs {
        repeated: true,
        optional: true,
    };

    fn resolution() -> Resolution {
        let declarations = [
            TypeDeclaration::ComplexType(ComplexTypeDefinition {
                name: "Base".into(),
                content: None,
            }),
            TypeDeclaration::ComplexType(ComplexTypeDefinition {
                name: "Derived".into(),
                content: Some(ContentType::ComplexContent {
                    base: TypeRef::service("Base"),
                    fields: vec![],
                }),
            }),
            TypeDeclaration::SimpleType(SimpleTypeDefinition {
                name: "PowerState".into(),
                values: vec![],
            }),
        ];
        resolver::resolve(&declarations).unwrap()
    }

    fn map(type_ref: TypeRef, occurs: Occurs) -> MappedType {
        map_type(&type_ref, occurs, &resolution()).unwrap()
    }

    #[test]
    fn repeated_is_always_a_slice() {
        for occurs in [Occurs::REPEATED, OPTIONAL_REPEATED] {
            assert_eq!(map(TypeRef::xsd("string"), occurs).expr, "[]string");
            assert_eq!(map(TypeRef::xsd("boolean"), occurs).expr, "[]bool");
            assert_eq!(map(TypeRef::xsd("dateTime"), occurs).expr, "[]time.Time");
            assert_eq!(map(TypeRef::service("Derived"), occurs).expr, "[]Derived");
            assert_eq!(map(TypeRef::service("Base"), occurs).expr, "[]BaseBase");
        }
        assert!(map(TypeRef::xsd("boolean"), OPTIONAL_REPEATED).omit_empty);
        assert!(!map(TypeRef::xsd("boolean"), Occurs::REPEATED).omit_empty);
    }

    #[test]
    fn optional_boolean_and_time_become_pointers_without_omitempty() {
        for (xsd, go) in [("boolean", "*bool"), ("dateTime", "*time.Time")] {
            let mapped = map(TypeRef::xsd(xsd), Occurs::OPTIONAL);
            assert_eq!(mapped.expr, go);
            assert!(!mapped.omit_empty);
            assert!(!mapped.type_attr);
        }
    }

    #[test]
    fn other_optional_primitives_get_omitempty_only() {
        for (xsd, go) in [
            ("string", "string"),
            ("int", "int"),
            ("long", "int64"),
            ("short", "int16"),
            ("byte", "byte"),
            ("double", "float64"),
            ("float", "float32"),
            ("base64Binary", "[]byte"),
            ("anyURI", "url.URL"),
        ] {
            let mapped = map(TypeRef::xsd(xsd), Occurs::OPTIONAL);
            assert_eq!(mapped.expr, go);
            assert!(mapped.omit_empty);
        }
    }

    #[test]
    fn required_fields_have_no_options() {
        let mapped = map(TypeRef::xsd("boolean"), Occurs::REQUIRED);
        assert_eq!(
            mapped,
            MappedType {
                expr: "bool".into(),
                omit_empty: false,
                type_attr: false,
            }
        );
    }

    #[test]
    fn any_type_needs_type_attribute() {
        let mapped = map(TypeRef::xsd("anyType"), Occurs::OPTIONAL);
        assert_eq!(mapped.expr, "AnyType");
        assert!(mapped.type_attr);
        assert!(mapped.omit_empty);
    }

    #[test]
    fn base_types_use_the_interface() {
        let mapped = map(TypeRef::service("Base"), Occurs::OPTIONAL);
        assert_eq!(mapped.expr, "BaseBase");
        assert!(mapped.type_attr);
        assert!(mapped.omit_empty);
    }

    #[test]
    fn optional_service_types_are_pointers_except_enums() {
        assert_eq!(map(TypeRef::service("Derived"), Occurs::OPTIONAL).expr, "*Derived");
        assert_eq!(map(TypeRef::service("Derived"), Occurs::REQUIRED).expr, "Derived");
        assert_eq!(map(TypeRef::service("PowerState"), Occurs::OPTIONAL).expr, "PowerState");
        assert!(!map(TypeRef::service("Derived"), Occurs::OPTIONAL).type_attr);
    }

    #[test]
    fn chardata_uses_go_primitive_names() {
        assert_eq!(chardata_type(&TypeRef::xsd("string")).unwrap(), "string");
        assert_eq!(chardata_type(&TypeRef::xsd("boolean")).unwrap(), "bool");
        assert_eq!(chardata_type(&TypeRef::xsd("base64Binary")).unwrap(), "[]byte");
        assert!(matches!(
            chardata_type(&TypeRef::xsd("duration")),
            Err(GeneratorError::UnknownPrimitiveType(_))
        ));
    }

    #[test]
    fn unknown_primitive_fails() {
        let result = map_type(&TypeRef::xsd("duration"), Occurs::REQUIRED, &resolution());
        assert!(matches!(
            result,
            Err(GeneratorError::UnknownPrimitiveType(ref name)) if name == "duration"
        ));
    }
}
