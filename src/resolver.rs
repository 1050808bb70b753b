//! The inheritance pass.
//!
//! Before any code is emitted, every declaration is visited once by an [`InheritanceResolver`]
//! to learn which types are extended by others (polymorphism bases), which are enumerations and
//! which are referenced as field types. [`InheritanceResolver::finish`] closes the pass and
//! yields the read-only [`Resolution`] the emitters consult.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    error::GeneratorError,
    xsd::{
        ComplexTypeDefinition, ContentType, DeclarationVisitor, ElementContent,
        ElementDeclaration, FieldDeclaration, Namespace, SimpleTypeDefinition, TypeDeclaration,
    },
};

/// What the pass knows about one complex type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeInfo {
    pub parent: Option<String>,
    pub children: Vec<String>,
    /// Whether a complexType with this name was seen, as opposed to only being named as a base
    pub defined: bool,
}

impl TypeInfo {
    pub fn is_base(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Write phase of the inheritance pass.
#[derive(Debug, Default)]
pub struct InheritanceResolver {
    types: BTreeMap<String, TypeInfo>,
    refs: BTreeSet<String>,
    enums: BTreeSet<String>,
}

impl InheritanceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `name`, creating it on first use.
    pub fn register(&mut self, name: &str) -> &mut TypeInfo {
        self.types.entry(name.to_string()).or_default()
    }

    /// Marks `name` as used as a field or element type.
    pub fn reference(&mut self, name: &str) {
        self.refs.insert(name.to_string());
    }

    pub fn mark_enum(&mut self, name: &str) {
        self.enums.insert(name.to_string());
    }

    pub fn is_base(&self, name: &str) -> bool {
        self.types.get(name).is_some_and(TypeInfo::is_base)
    }

    /// Records that `child` extends `parent`. Repeating the same edge is a no-op.
    pub fn extend(&mut self, child: &str, parent: &str) -> Result<(), GeneratorError> {
        let entry = self.register(child);
        match entry.parent.clone() {
            Some(existing) if existing != parent => {
                return Err(GeneratorError::MultipleInheritance {
                    name: child.to_string(),
                    first: existing,
                    second: parent.to_string(),
                })
            }
            Some(_) => {}
            None => entry.parent = Some(parent.to_string()),
        }

        let parent = self.register(parent);
        if !parent.children.iter().any(|c| c == child) {
            parent.children.push(child.to_string());
        }
        Ok(())
    }

    fn reference_fields(&mut self, fields: &[FieldDeclaration]) {
        for field in fields {
            if field.type_ref.namespace == Namespace::Service {
                self.reference(&field.type_ref.local_name);
            }
        }
    }

    /// Ends the write phase.
    pub fn finish(self) -> Resolution {
        let bases = self.types.values().filter(|t| t.is_base()).count();
        tracing::info!(
            types = self.types.len(),
            bases,
            enums = self.enums.len(),
            "resolved type graph"
        );
        Resolution {
            types: self.types,
            refs: self.refs,
            enums: self.enums,
        }
    }
}

impl DeclarationVisitor for InheritanceResolver {
    type Output = Result<(), GeneratorError>;

    fn visit_element(&mut self, element: &ElementDeclaration) -> Self::Output {
        match &element.content {
            ElementContent::Named(type_ref) => {
                if type_ref.namespace == Namespace::Service {
                    self.reference(&type_ref.local_name);
                }
                Ok(())
            }
            ElementContent::Inline(complex_type) => self.visit_complex_type(complex_type),
        }
    }

    fn visit_simple_type(&mut self, simple_type: &SimpleTypeDefinition) -> Self::Output {
        self.mark_enum(&simple_type.name);
        Ok(())
    }

    fn visit_complex_type(&mut self, complex_type: &ComplexTypeDefinition) -> Self::Output {
        self.register(&complex_type.name).defined = true;
        match &complex_type.content {
            None | Some(ContentType::SimpleContent { .. }) => Ok(()),
            Some(ContentType::Sequence(fields)) => {
                self.reference_fields(fields);
                Ok(())
            }
            Some(ContentType::ComplexContent { base, fields }) => {
                self.reference_fields(fields);
                self.extend(&complex_type.name, &base.local_name)
            }
        }
    }
}

/// Runs the inheritance pass over `declarations` to completion.
pub fn resolve<'a>(
    declarations: impl IntoIterator<Item = &'a TypeDeclaration>,
) -> Result<Resolution, GeneratorError> {
    let mut resolver = InheritanceResolver::new();
    for declaration in declarations {
        declaration.accept(&mut resolver)?;
    }
    Ok(resolver.finish())
}

/// The completed type graph. Read-only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    types: BTreeMap<String, TypeInfo>,
    refs: BTreeSet<String>,
    enums: BTreeSet<String>,
}

impl Resolution {
    /// True iff at least one type extends `name`. Being referenced as a field type is not enough.
    pub fn is_base(&self, name: &str) -> bool {
        self.types.get(name).is_some_and(TypeInfo::is_base)
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    pub fn is_referenced(&self, name: &str) -> bool {
        self.refs.contains(name)
    }

    pub fn type_info(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    /// Every polymorphism base, in name order.
    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.types
            .iter()
            .filter(|(_, info)| info.is_base())
            .map(|(name, _)| name.as_str())
    }
}
