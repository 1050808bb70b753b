use super::{
    complex_type_def::ComplexTypeDefinition, element_decl::ElementDeclaration,
    simple_type_def::SimpleTypeDefinition,
};

/// One top-level construct of a schema.
#[derive(Clone, Debug)]
pub enum TypeDeclaration {
    Element(ElementDeclaration),
    SimpleType(SimpleTypeDefinition),
    ComplexType(ComplexTypeDefinition),
}

impl TypeDeclaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Element(element) => &element.name,
            Self::SimpleType(simple_type) => &simple_type.name,
            Self::ComplexType(complex_type) => &complex_type.name,
        }
    }

    pub fn accept<V: DeclarationVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Element(element) => visitor.visit_element(element),
            Self::SimpleType(simple_type) => visitor.visit_simple_type(simple_type),
            Self::ComplexType(complex_type) => visitor.visit_complex_type(complex_type),
        }
    }
}

/// A pass over the declarations of a schema.
pub trait DeclarationVisitor {
    type Output;

    fn visit_element(&mut self, element: &ElementDeclaration) -> Self::Output;

    fn visit_simple_type(&mut self, simple_type: &SimpleTypeDefinition) -> Self::Output;

    fn visit_complex_type(&mut self, complex_type: &ComplexTypeDefinition) -> Self::Output;
}
