use std::collections::HashSet;

use roxmltree::Node;

use crate::error::GeneratorError;

use super::{loader::SchemaLoader, node_path, Occurs, QName, TypeRef};

/// State shared by every document ingested during one run.
pub(crate) struct MappingContext<'l> {
    loader: &'l dyn SchemaLoader,
    service_namespace: String,
    allow_dtd: bool,
    loaded: HashSet<String>,
    document: String,
}

impl<'l> MappingContext<'l> {
    pub(crate) fn new(
        loader: &'l dyn SchemaLoader,
        document: impl Into<String>,
        service_namespace: impl Into<String>,
        allow_dtd: bool,
    ) -> Self {
        let document = document.into();
        let mut loaded = HashSet::new();
        loaded.insert(document.clone());
        Self {
            loader,
            service_namespace: service_namespace.into(),
            allow_dtd,
            loaded,
            document,
        }
    }

    pub(crate) fn document(&self) -> &str {
        &self.document
    }

    pub(crate) fn service_namespace(&self) -> &str {
        &self.service_namespace
    }

    pub(crate) fn parse<'i>(
        &self,
        location: &str,
        text: &'i str,
    ) -> Result<roxmltree::Document<'i>, GeneratorError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: self.allow_dtd,
            ..roxmltree::ParsingOptions::default()
        };
        roxmltree::Document::parse_with_options(text, options).map_err(|source| {
            GeneratorError::Xml {
                location: location.to_string(),
                source,
            }
        })
    }

    /// Loads an included document. Returns `None` if it was already ingested in this run.
    pub(crate) fn load_include(&mut self, location: &str) -> Result<Option<String>, GeneratorError> {
        if !self.loaded.insert(location.to_string()) {
            tracing::warn!(location, "schema already included, skipping");
            return Ok(None);
        }
        tracing::debug!(location, from = %self.document, "loading included schema");
        Ok(Some(self.loader.load(location)?))
    }

    /// Runs `f` with `location` as the current document for error reporting.
    pub(crate) fn in_document<T>(&mut self, location: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = std::mem::replace(&mut self.document, location.to_string());
        let result = f(self);
        self.document = previous;
        result
    }

    pub(crate) fn structural(&self, node: Node, message: impl Into<String>) -> GeneratorError {
        GeneratorError::structural(self.document.as_str(), node_path(node), message)
    }

    pub(crate) fn malformed(
        &self,
        node: Node,
        reference: &str,
        message: impl Into<String>,
    ) -> GeneratorError {
        GeneratorError::MalformedReference {
            document: self.document.clone(),
            path: node_path(node),
            reference: reference.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn required_attribute<'a>(
        &self,
        node: Node<'a, '_>,
        attribute: &str,
    ) -> Result<&'a str, GeneratorError> {
        node.attribute(attribute).ok_or_else(|| {
            self.structural(
                node,
                format!("<{}> without a {attribute} attribute", node.tag_name().name()),
            )
        })
    }

    pub(crate) fn name(&self, node: Node) -> Result<String, GeneratorError> {
        self.required_attribute(node, "name").map(str::to_string)
    }

    /// Resolves a `prefix:local` attribute value and classifies its namespace.
    pub(crate) fn qualified_name(&self, node: Node, lexical: &str) -> Result<QName, GeneratorError> {
        QName::parse(lexical, node).map_err(|message| self.malformed(node, lexical, message))
    }

    pub(crate) fn type_ref(&self, node: Node, attribute: &str) -> Result<TypeRef, GeneratorError> {
        let lexical = self.required_attribute(node, attribute)?;
        let name = self.qualified_name(node, lexical)?;
        TypeRef::classify(name, &self.service_namespace)
            .map_err(|message| self.malformed(node, lexical, message))
    }

    pub(crate) fn occurs(&self, node: Node) -> Result<Occurs, GeneratorError> {
        Occurs::from_node(node).map_err(|(attribute, value)| {
            self.structural(node, format!("unsupported {attribute}={value:?}"))
        })
    }
}
