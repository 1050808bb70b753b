use std::fmt;

use roxmltree::Node;

pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// A `prefix:local` attribute value with its prefix resolved against the in-scope namespace
/// declarations of the node carrying it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace_name: String,
    pub local_name: String,
}

impl QName {
    /// Parses `lexical` in the namespace context of `context`. Unprefixed names are rejected:
    /// every reference in this schema family is qualified.
    pub fn parse(lexical: &str, context: Node) -> Result<Self, String> {
        let (prefix, local_name) = lexical
            .split_once(':')
            .ok_or_else(|| "expected the form prefix:localname".to_string())?;
        if prefix.is_empty() || local_name.is_empty() || local_name.contains(':') {
            return Err("expected the form prefix:localname".into());
        }
        let namespace_name = context
            .lookup_namespace_uri(Some(prefix))
            .ok_or_else(|| format!("prefix {prefix:?} is not bound to a namespace"))?;
        Ok(Self {
            namespace_name: namespace_name.to_string(),
            local_name: local_name.to_string(),
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// `http://www.w3.org/2001/XMLSchema`, the built-in primitives
    Xsd,
    /// The namespace of the service's own types and messages
    Service,
}

/// A type reference classified at ingestion time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub namespace: Namespace,
    pub local_name: String,
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace {
            Namespace::Xsd => write!(f, "xsd:{}", self.local_name),
            Namespace::Service => write!(f, "{}", self.local_name),
        }
    }
}

impl TypeRef {
    pub fn xsd(local_name: impl Into<String>) -> Self {
        Self {
            namespace: Namespace::Xsd,
            local_name: local_name.into(),
        }
    }

    pub fn service(local_name: impl Into<String>) -> Self {
        Self {
            namespace: Namespace::Service,
            local_name: local_name.into(),
        }
    }

    pub fn classify(name: QName, service_namespace: &str) -> Result<Self, String> {
        let namespace = if name.namespace_name == XS_NAMESPACE {
            Namespace::Xsd
        } else if name.namespace_name == service_namespace {
            Namespace::Service
        } else {
            return Err(format!(
                "namespace {:?} is neither XML Schema nor the service namespace {:?}",
                name.namespace_name, service_namespace
            ));
        };
        Ok(Self {
            namespace,
            local_name: name.local_name,
        })
    }
}

/// The two occurrence constraints this schema family uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Occurs {
    /// `maxOccurs="unbounded"`
    pub repeated: bool,
    /// `minOccurs="0"`
    pub optional: bool,
}

impl Occurs {
    pub const REQUIRED: Occurs = Occurs {
        repeated: false,
        optional: false,
    };

    pub const OPTIONAL: Occurs = Occurs {
        repeated: false,
        optional: true,
    };

    pub const REPEATED: Occurs = Occurs {
        repeated: true,
        optional: false,
    };

    /// Reads `minOccurs`/`maxOccurs`. Any value other than the two supported ones is returned
    /// as `Err((attribute, value))`.
    pub fn from_node<'a>(node: Node<'a, '_>) -> Result<Self, (&'static str, &'a str)> {
        let optional = match node.attribute("minOccurs") {
            None => false,
            Some("0") => true,
            Some(other) => return Err(("minOccurs", other)),
        };
        let repeated = match node.attribute("maxOccurs") {
            None => false,
            Some("unbounded") => true,
            Some(other) => return Err(("maxOccurs", other)),
        };
        Ok(Self { repeated, optional })
    }
}
