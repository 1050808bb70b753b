use std::fmt::Write as _;

use crate::{config::GeneratorConfig, wsdl::Operation};

use super::naming;

pub const SOAP_ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Envelope body type, fault accessor and call stub for each operation, in the given order.
pub fn generate_methods(
    operations: &[&Operation],
    config: &GeneratorConfig,
    service_namespace: &str,
) -> String {
    let mut out = String::new();
    for operation in operations {
        write_operation(&mut out, operation, &config.types_package, service_namespace);
    }
    out
}

fn write_operation(out: &mut String, operation: &Operation, types: &str, namespace: &str) {
    let name = &operation.name;
    let body = naming::body_type(name);
    let input = &operation.input;
    let output = &operation.output;

    let _ = write!(
        out,
        "type {body} struct {{\n\
         \tReq *{types}.{input} `xml:\"{namespace} {input},omitempty\"`\n\
         \tRes *{types}.{output} `xml:\"{namespace} {output},omitempty\"`\n\
         \tFault_ *soap.Fault `xml:\"{SOAP_ENVELOPE_NAMESPACE} Fault,omitempty\"`\n\
         }}\n\n"
    );
    let _ = write!(
        out,
        "func (b *{body}) Fault() *soap.Fault {{ return b.Fault_ }}\n\n"
    );
    let _ = write!(
        out,
        "func {name}(ctx context.Context, r soap.RoundTripper, req *{types}.{input}) (*{types}.{output}, error) {{\n\
         \tvar reqBody, resBody {body}\n\n\
         \treqBody.Req = req\n\n\
         \tif err := r.RoundTrip(ctx, &reqBody, &resBody); err != nil {{\n\
         \t\treturn nil, err\n\
         \t}}\n\n\
         \treturn resBody.Res, nil\n\
         }}\n\n"
    );
}
