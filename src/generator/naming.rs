use std::fmt::Write as _;

/// Upper-cases the first character and leaves the rest untouched, so `poweredOn` becomes
/// `PoweredOn` and `HTTPS` stays `HTTPS`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Exported Go field name for a schema element or attribute: one leading underscore is dropped
/// (`_this` becomes `This`).
pub fn field_name(name: &str) -> String {
    capitalize(name.strip_prefix('_').unwrap_or(name))
}

/// Go constant for one enumeration value. The empty value maps to `<Type>Null`.
pub fn enum_constant(type_name: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{type_name}Null")
    } else {
        format!("{type_name}{}", capitalize(value))
    }
}

/// A double-quoted Go string literal holding `value`.
pub fn go_string(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(literal, "\\u{:04x}", c as u32);
            }
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Accessor every derived type inherits from its polymorphism base.
pub fn getter(type_name: &str) -> String {
    format!("Get{type_name}")
}

/// Interface satisfied by a base and everything extending it.
pub fn base_interface(type_name: &str) -> String {
    format!("Base{type_name}")
}

/// Envelope body type of an operation.
pub fn body_type(operation: &str) -> String {
    format!("{operation}Body")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_only_touches_first_char() {
        assert_eq!(capitalize("poweredOn"), "PoweredOn");
        assert_eq!(capitalize("HTTPS"), "HTTPS");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn field_name_strips_one_underscore() {
        assert_eq!(field_name("_this"), "This");
        assert_eq!(field_name("returnval"), "Returnval");
        assert_eq!(field_name("__x"), "_x");
    }

    #[test]
    fn enum_constants() {
        assert_eq!(
            enum_constant("VirtualMachinePowerState", "poweredOn"),
            "VirtualMachinePowerStatePoweredOn"
        );
        assert_eq!(
            enum_constant("VirtualMachinePowerState", ""),
            "VirtualMachinePowerStateNull"
        );
    }

    #[test]
    fn go_string_escapes_quotes_and_controls() {
        assert_eq!(go_string("poweredOn"), r#""poweredOn""#);
        assert_eq!(go_string(""), r#""""#);
        assert_eq!(go_string(r#"a"b"#), r#""a\"b""#);
        assert_eq!(go_string(r"C:\vm"), r#""C:\\vm""#);
        assert_eq!(go_string("a\nb\tc"), r#""a\nb\tc""#);
        assert_eq!(go_string("\u{1}"), r#""\u0001""#);
        assert_eq!(go_string("é"), "\"é\"");
    }

    #[test]
    fn enum_constant_is_deterministic() {
        let values = ["", "a", "suspended", "VMFS", "nfs41"];
        for value in values {
            assert_eq!(
                enum_constant("HostFileSystemVolumeFileSystemType", value),
                enum_constant("HostFileSystemVolumeFileSystemType", value)
            );
            let constant = enum_constant("T", value);
            assert!(constant.starts_with('T'));
            assert!(constant[1..].starts_with(char::is_uppercase));
        }
    }
}
