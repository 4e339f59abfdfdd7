//! Java type names that the console treats as built in.

const BUILTIN_CLASSES: &[(&str, &str)] = &[
    ("BigDecimal", "java.math.BigDecimal"),
    ("Boolean", "java.lang.Boolean"),
    ("Byte", "java.lang.Byte"),
    ("Date", "java.sql.Date"),
    ("Double", "java.lang.Double"),
    ("Float", "java.lang.Float"),
    ("Integer", "java.lang.Integer"),
    ("Long", "java.lang.Long"),
    ("Short", "java.lang.Short"),
    ("String", "java.lang.String"),
    ("Time", "java.sql.Time"),
    ("Timestamp", "java.sql.Timestamp"),
    ("UUID", "java.util.UUID"),
];

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "double", "float", "int", "long", "short",
];

/// True for wrapper/primitive/well-known value types given by short or
/// fully qualified name. Blank names are never built in.
pub fn is_java_builtin_class(cls: &str) -> bool {
    let cls = cls.trim();
    if cls.is_empty() {
        return false;
    }
    PRIMITIVES.contains(&cls)
        || BUILTIN_CLASSES
            .iter()
            .any(|(short, full)| *short == cls || *full == cls)
}

/// Expands a built-in short name to its fully qualified form. Other names
/// are returned as given.
pub fn full_class_name(cls: &str) -> &str {
    BUILTIN_CLASSES
        .iter()
        .find(|(short, _)| *short == cls)
        .map(|(_, full)| *full)
        .unwrap_or(cls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_short_full_and_primitive_names() {
        assert!(is_java_builtin_class("Integer"));
        assert!(is_java_builtin_class("java.util.UUID"));
        assert!(is_java_builtin_class("long"));
        assert!(!is_java_builtin_class("com.example.PersonKey"));
        assert!(!is_java_builtin_class("  "));
    }

    #[test]
    fn expands_only_builtin_short_names() {
        assert_eq!(full_class_name("Timestamp"), "java.sql.Timestamp");
        assert_eq!(full_class_name("com.example.Person"), "com.example.Person");
        assert_eq!(full_class_name("int"), "int");
    }
}
