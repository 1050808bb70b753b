pub mod interfaces;
pub mod methods;
pub mod naming;
pub mod type_mapper;
pub mod types;

use std::path::{Path, PathBuf};

use crate::{
    config::GeneratorConfig, error::GeneratorError, resolver::Resolution, wsdl::Operation,
    xsd::TypeDeclaration,
};

use interfaces::generate_interfaces;
use methods::generate_methods;
use types::GoEmitter;

pub const ENUM_FILE: &str = "types/enum.go";
pub const TYPES_FILE: &str = "types/types.go";
pub const INTERFACES_FILE: &str = "types/if.go";
pub const METHODS_FILE: &str = "methods/methods.go";

fn header(package: &str) -> String {
    format!("// Code generated by wsdl-generator. DO NOT EDIT.\n\npackage {package}\n\n")
}

/// One output file, relative to the output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    fn new(path: &str, package: &str, body: &str) -> Self {
        Self {
            path: PathBuf::from(path),
            contents: header(package) + body,
        }
    }
}

/// The complete output of a run, held in memory until [`GeneratedFiles::write_to`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub files: Vec<GeneratedFile>,
}

impl GeneratedFiles {
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        let path = path.as_ref();
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.contents.as_str())
    }

    /// Writes every file below `dir`, creating directories as needed.
    pub fn write_to(&self, dir: &Path) -> Result<(), GeneratorError> {
        for file in &self.files {
            let path = dir.join(&file.path);
            let io_error = |source| GeneratorError::Io {
                path: path.display().to_string(),
                source,
            };
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
            std::fs::write(&path, &file.contents).map_err(io_error)?;
            tracing::debug!(path = %path.display(), bytes = file.contents.len(), "wrote file");
        }
        tracing::info!(files = self.files.len(), dir = %dir.display(), "wrote output");
        Ok(())
    }
}

/// Emits every output file. `resolution` must have been computed over the same `declarations`.
pub fn generate(
    declarations: &[&TypeDeclaration],
    operations: &[&Operation],
    resolution: &Resolution,
    config: &GeneratorConfig,
    service_namespace: &str,
) -> Result<GeneratedFiles, GeneratorError> {
    let mut emitter = GoEmitter::new(resolution);
    for declaration in declarations {
        declaration.accept(&mut emitter)?;
    }
    let interfaces = generate_interfaces(resolution);
    let methods = generate_methods(operations, config, service_namespace);

    let types_package = config.types_package.as_str();
    Ok(GeneratedFiles {
        files: vec![
            GeneratedFile::new(ENUM_FILE, types_package, &emitter.enums),
            GeneratedFile::new(TYPES_FILE, types_package, &emitter.types),
            GeneratedFile::new(INTERFACES_FILE, types_package, &interfaces),
            GeneratedFile::new(METHODS_FILE, &config.methods_package, &methods),
        ],
    })
}
