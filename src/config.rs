/// Settings for one generator run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Namespace URI of the service's types and messages. Defaults to the WSDL's
    /// `targetNamespace`.
    pub service_namespace: Option<String>,
    /// Go package of the generated types
    pub types_package: String,
    /// Go package of the generated call stubs
    pub methods_package: String,
    /// Allow a DTD in the input documents
    pub allow_dtd: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            service_namespace: None,
            types_package: "types".into(),
            methods_package: "methods".into(),
            allow_dtd: false,
        }
    }
}
