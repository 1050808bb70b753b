mod operation;

pub use operation::Operation;

use std::collections::HashMap;

use roxmltree::Node;

use crate::{
    config::GeneratorConfig,
    error::GeneratorError,
    xsd::{element_children, is_xsd, loader::SchemaLoader, MappingContext, Schema, TypeDeclaration},
};

pub const WSDL_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/";

pub(crate) fn is_wsdl(node: Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(WSDL_NAMESPACE)
        && node.tag_name().name() == name
}

/// A loaded service description: its schemas (with includes) and its bound operations.
#[derive(Clone, Debug)]
pub struct Wsdl {
    pub location: String,
    /// Namespace URI of the service's types and messages
    pub service_namespace: String,
    pub schemas: Vec<Schema>,
    pub operations: Vec<Operation>,
}

impl Wsdl {
    /// Parses the WSDL text read from `location`. Included schemas are fetched with `loader`.
    pub fn parse(
        text: &str,
        location: &str,
        loader: &dyn SchemaLoader,
        config: &GeneratorConfig,
    ) -> Result<Self, GeneratorError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: config.allow_dtd,
            ..roxmltree::ParsingOptions::default()
        };
        let document = roxmltree::Document::parse_with_options(text, options).map_err(|source| {
            GeneratorError::Xml {
                location: location.to_string(),
                source,
            }
        })?;
        let root = document.root_element();

        let service_namespace = match (&config.service_namespace, root.attribute("targetNamespace"))
        {
            (Some(namespace), _) => namespace.clone(),
            (None, Some(namespace)) => namespace.to_string(),
            (None, None) => {
                return Err(GeneratorError::structural(
                    location,
                    "/",
                    "no targetNamespace on the WSDL and no service namespace configured",
                ))
            }
        };
        let mut context =
            MappingContext::new(loader, location, service_namespace.as_str(), config.allow_dtd);

        if !is_wsdl(root, "definitions") {
            return Err(context.structural(root, "expected a WSDL <definitions> element"));
        }

        let schemas = root
            .descendants()
            .filter(|n| is_wsdl(*n, "types"))
            .flat_map(element_children)
            .filter(|n| is_xsd(*n, Schema::TAG_NAME))
            .map(|schema| Schema::map_from_xml(&mut context, schema))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(
            location,
            schemas = schemas.len(),
            "loaded schemas"
        );

        let messages = root
            .descendants()
            .filter(|n| is_wsdl(*n, "message"))
            .map(|n| Ok((context.name(n)?, n)))
            .collect::<Result<Vec<_>, GeneratorError>>()?;
        let messages = messages
            .iter()
            .map(|(name, node)| (name.as_str(), *node))
            .collect::<HashMap<_, _>>();

        let operations = root
            .descendants()
            .filter(|n| is_wsdl(*n, "portType"))
            .flat_map(element_children)
            .filter(|n| is_wsdl(*n, Operation::TAG_NAME))
            .map(|operation| Operation::bind(&context, operation, &messages))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(operations = operations.len(), "bound operations");

        Ok(Self {
            location: location.to_string(),
            service_namespace,
            schemas,
            operations,
        })
    }

    /// Every declaration of every schema, includes first.
    pub fn types(&self) -> Vec<&TypeDeclaration> {
        self.schemas.iter().flat_map(Schema::types).collect()
    }

    /// The declarations both passes work on: sorted by name, one per name, and only those
    /// whose name does not start with a lowercase letter.
    pub fn declarations(&self) -> Vec<&TypeDeclaration> {
        let mut types = self.types();
        // stable, so the first declaration of a duplicated name wins
        types.sort_by(|a, b| a.name().cmp(b.name()));
        types.dedup_by(|later, first| {
            let duplicate = later.name() == first.name();
            if duplicate {
                tracing::warn!(name = later.name(), "duplicate declaration dropped");
            }
            duplicate
        });
        types.retain(|t| !t.name().starts_with(char::is_lowercase));
        types
    }

    /// Operations in name order.
    pub fn sorted_operations(&self) -> Vec<&Operation> {
        let mut operations = self.operations.iter().collect::<Vec<_>>();
        operations.sort_by(|a, b| a.name.cmp(&b.name));
        operations
    }
}
