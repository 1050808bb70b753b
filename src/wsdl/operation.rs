use std::collections::HashMap;

use roxmltree::Node;

use crate::{
    error::GeneratorError,
    xsd::{element_children, MappingContext},
};

use super::is_wsdl;

/// A `portType` operation with its request and response body elements resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    pub name: String,
    /// Local name of the request body element
    pub input: String,
    /// Local name of the response body element
    pub output: String,
}

impl Operation {
    pub const TAG_NAME: &'static str = "operation";

    /// Follows `input`/`output` → `message` → `part` → `element` for `operation`.
    pub(crate) fn bind(
        context: &MappingContext,
        operation: Node,
        messages: &HashMap<&str, Node>,
    ) -> Result<Self, GeneratorError> {
        let name = context.name(operation)?;
        let input = Self::find_element_for(context, &name, operation, "input", messages)?;
        let output = Self::find_element_for(context, &name, operation, "output", messages)?;
        tracing::debug!(operation = %name, %input, %output, "bound operation");
        Ok(Self {
            name,
            input,
            output,
        })
    }

    fn find_element_for(
        context: &MappingContext,
        name: &str,
        operation: Node,
        direction: &str,
        messages: &HashMap<&str, Node>,
    ) -> Result<String, GeneratorError> {
        let io = element_children(operation)
            .find(|n| is_wsdl(*n, direction))
            .ok_or_else(|| GeneratorError::unresolved(name, format!("no {direction} message")))?;
        let message_ref = io.attribute("message").ok_or_else(|| {
            GeneratorError::unresolved(name, format!("{direction} has no message attribute"))
        })?;
        let message_name = Self::service_local_name(context, name, io, message_ref)?;

        let message = messages.get(message_name.as_str()).ok_or_else(|| {
            GeneratorError::unresolved(name, format!("message {message_name:?} not found"))
        })?;

        let parts = element_children(*message)
            .filter(|n| is_wsdl(*n, "part"))
            .collect::<Vec<_>>();
        let part = match parts.as_slice() {
            [part] => *part,
            [] => {
                return Err(GeneratorError::unresolved(
                    name,
                    format!("message {message_name:?} has no part"),
                ))
            }
            _ => {
                return Err(GeneratorError::unresolved(
                    name,
                    format!(
                        "message {message_name:?} has {} parts, expected one",
                        parts.len()
                    ),
                ))
            }
        };

        let element = part.attribute("element").ok_or_else(|| {
            GeneratorError::unresolved(
                name,
                format!("part of message {message_name:?} has no element attribute"),
            )
        })?;
        Self::service_local_name(context, name, part, element)
    }

    /// Strips the service namespace from a qualified reference.
    fn service_local_name(
        context: &MappingContext,
        name: &str,
        node: Node,
        lexical: &str,
    ) -> Result<String, GeneratorError> {
        let qname = context.qualified_name(node, lexical)?;
        if qname.namespace_name != context.service_namespace() {
            return Err(GeneratorError::unresolved(
                name,
                format!(
                    "{lexical:?} is in namespace {:?}, expected {:?}",
                    qname.namespace_name,
                    context.service_namespace()
                ),
            ));
        }
        Ok(qname.local_name)
    }
}
