use thiserror::Error;

use crate::xsd::loader::LoadError;

/// Every way a generator run can fail. All of them abort the run.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The schema uses a construct outside the subset this generator understands.
    #[error("{document}: {path}: structural assumption violated: {message}")]
    StructuralAssumptionViolation {
        document: String,
        path: String,
        message: String,
    },

    #[error("no mapping rule for built-in type xsd:{0}")]
    UnknownPrimitiveType(String),

    #[error("operation {operation:?}: {message}")]
    UnresolvedMessage { operation: String, message: String },

    /// A `prefix:local` reference that does not parse or points outside the known namespaces.
    #[error("{document}: {path}: malformed reference {reference:?}: {message}")]
    MalformedReference {
        document: String,
        path: String,
        reference: String,
        message: String,
    },

    #[error("type {name:?} cannot extend both {first:?} and {second:?}")]
    MultipleInheritance {
        name: String,
        first: String,
        second: String,
    },

    #[error("failed to parse XML document {location}")]
    Xml {
        location: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to write {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    pub(crate) fn structural(
        document: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::StructuralAssumptionViolation {
            document: document.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn unresolved(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnresolvedMessage {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
