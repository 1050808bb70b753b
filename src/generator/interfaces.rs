use std::fmt::Write as _;

use crate::resolver::Resolution;

use super::{naming, types::write_registry};

/// Interface wiring for every polymorphism base: a getter on the base itself, which every
/// embedding type inherits, and the `Base<Name>` interface that getter satisfies.
pub fn generate_interfaces(resolution: &Resolution) -> String {
    let mut out = String::new();
    for base in resolution.bases() {
        let getter = naming::getter(base);
        let interface = naming::base_interface(base);
        if resolution.type_info(base).is_some_and(|info| !info.defined) {
            tracing::warn!(base, "base type is extended but never defined");
        }
        tracing::debug!(base, %interface, "emitting interface");

        let _ = write!(
            out,
            "func (b *{base}) {getter}() *{base} {{ return b }}\n\n\
             type {interface} interface {{\n\t{getter}() *{base}\n}}\n\n"
        );
        write_registry(&mut out, &interface, base);
    }
    out
}
