use std::path::PathBuf;

use clap::Parser;

use wsdl_generator::GeneratorConfig;

#[derive(Parser)]
#[clap(version, about)]
pub struct Cli {
    #[clap(value_parser, help = "The WSDL file or URL")]
    pub input: String,

    #[clap(long, short, value_parser, help = "Directory the Go packages are written to")]
    pub output: PathBuf,

    #[clap(long, help = "Allow a XML Document Type Definition (DTD) to occur")]
    pub allow_dtd: bool,

    #[clap(
        long,
        value_parser,
        help = "Namespace URI of the service types [default: the WSDL targetNamespace]"
    )]
    pub namespace: Option<String>,

    #[clap(long, default_value = "types", value_parser, help = "Go package of the types")]
    pub types_package: String,

    #[clap(long, default_value = "methods", value_parser, help = "Go package of the call stubs")]
    pub methods_package: String,
}

impl Cli {
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            service_namespace: self.namespace.clone(),
            types_package: self.types_package.clone(),
            methods_package: self.methods_package.clone(),
            allow_dtd: self.allow_dtd,
        }
    }
}
