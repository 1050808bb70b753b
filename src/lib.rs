//! Generates Go SOAP bindings from a WSDL file: one Go type per XML Schema declaration, an
//! interface per polymorphism base, a type registry for the decoder and one call stub per
//! operation.
//!
//! A run has three phases. The WSDL and its included schemas are read into a [`wsdl::Wsdl`];
//! the inheritance pass ([`resolver::resolve`]) runs over every declaration; only then are the
//! output files emitted ([`generator::generate`]).

pub mod config;
pub mod error;
pub mod generator;
pub mod resolver;
pub mod wsdl;
pub mod xsd;

pub use config::GeneratorConfig;
pub use error::GeneratorError;
pub use generator::{GeneratedFile, GeneratedFiles};

use xsd::loader::{self, SchemaLoader};

/// Runs the generator on WSDL `text` read from `location`. Included schemas are fetched through
/// `loader`. Nothing is written; see [`GeneratedFiles::write_to`].
pub fn generate_from_str(
    text: &str,
    location: &str,
    loader: &dyn SchemaLoader,
    config: &GeneratorConfig,
) -> Result<GeneratedFiles, GeneratorError> {
    let wsdl = wsdl::Wsdl::parse(text, location, loader, config)?;

    let declarations = wsdl.declarations();
    tracing::info!(declarations = declarations.len(), "collected declarations");
    let resolution = resolver::resolve(declarations.iter().copied())?;

    let operations = wsdl.sorted_operations();
    let files = generator::generate(
        &declarations,
        &operations,
        &resolution,
        config,
        &wsdl.service_namespace,
    )?;
    tracing::info!(files = files.files.len(), "generated output");
    Ok(files)
}

/// Like [`generate_from_str`] for a file path or `http(s)://` URL. Relative includes resolve
/// against the input's location.
pub fn generate_from_input(
    input: &str,
    config: &GeneratorConfig,
) -> Result<GeneratedFiles, GeneratorError> {
    let text = loader::read_input(input)?;
    let loader = loader::loader_for(input)?;
    generate_from_str(&text, input, loader.as_ref(), config)
}
