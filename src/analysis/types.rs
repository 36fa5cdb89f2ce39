// Type annotation resolution
//
// Turns a syntactic annotation shape into a normalized descriptor string.
// Resolution is total: shapes with no usable structure fall back to a
// sentinel instead of failing.

use crate::parser::TypeAnnotation;

/// Sentinel for subscripts outside the recognized container set
pub const COMPLEX_TYPE: &str = "ComplexType";

/// Sentinel for annotation shapes with no recognizable structure
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Containers whose single inner type is kept in the descriptor
pub const CONTAINER_TYPES: [&str; 3] = ["List", "Optional", "Dict"];

/// Resolve an annotation into its descriptor string
///
/// Bare and dotted names resolve to the (trailing) name verbatim. A
/// recognized single-argument container resolves to `Outer[Inner]` with the
/// inner shape resolved recursively.
pub fn resolve(annotation: &TypeAnnotation) -> String {
    match annotation {
        TypeAnnotation::Name(id) => id.clone(),
        TypeAnnotation::Qualified(attr) => attr.clone(),
        TypeAnnotation::Subscript { value, slice } => {
            if let TypeAnnotation::Name(container) = value.as_ref() {
                if CONTAINER_TYPES.contains(&container.as_str()) {
                    match slice.as_ref() {
                        TypeAnnotation::Name(id) => {
                            return format!("{}[{}]", container, id);
                        }
                        TypeAnnotation::Subscript { .. } => {
                            return format!("{}[{}]", container, resolve(slice));
                        }
                        TypeAnnotation::Qualified(attr) => {
                            return format!("{}[{}]", container, attr);
                        }
                        TypeAnnotation::Other => {}
                    }
                }
            }
            COMPLEX_TYPE.to_string()
        }
        TypeAnnotation::Other => UNKNOWN_TYPE.to_string(),
    }
}

/// The inner text of a generic descriptor: between the first `[` and the
/// last `]`
pub fn generic_inner(descriptor: &str) -> Option<&str> {
    let open = descriptor.find('[')?;
    let close = descriptor.rfind(']')?;
    if open < close {
        Some(&descriptor[open + 1..close])
    } else {
        None
    }
}

/// Normalize a descriptor for cross-class comparison
///
/// Container wrappers are stripped so only the core referenced type matters
/// for the naming audit; `List[Foo]` and `Optional[Foo]` both compare as
/// `Foo`. Non-generic descriptors pass through unchanged.
pub fn normalize(descriptor: &str) -> &str {
    generic_inner(descriptor).unwrap_or(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TypeAnnotation as T;

    #[test]
    fn test_resolve_bare_name() {
        assert_eq!(resolve(&T::name("int")), "int");
        assert_eq!(resolve(&T::name("User")), "User");
    }

    #[test]
    fn test_resolve_qualified_name() {
        assert_eq!(resolve(&T::qualified("BaseModel")), "BaseModel");
    }

    #[test]
    fn test_resolve_recognized_containers() {
        for container in CONTAINER_TYPES {
            let annotation = T::subscript(T::name(container), T::name("User"));
            assert_eq!(resolve(&annotation), format!("{}[User]", container));
        }
    }

    #[test]
    fn test_resolve_container_with_qualified_inner() {
        let annotation = T::subscript(T::name("Optional"), T::qualified("Profile"));
        assert_eq!(resolve(&annotation), "Optional[Profile]");
    }

    #[test]
    fn test_resolve_nested_container() {
        let annotation = T::subscript(
            T::name("Optional"),
            T::subscript(T::name("List"), T::name("str")),
        );
        assert_eq!(resolve(&annotation), "Optional[List[str]]");
    }

    #[test]
    fn test_resolve_unrecognized_container() {
        let annotation = T::subscript(T::name("Set"), T::name("str"));
        assert_eq!(resolve(&annotation), COMPLEX_TYPE);
    }

    #[test]
    fn test_resolve_qualified_container_is_complex() {
        // typing.List[int]: the outer shape is dotted, not a bare name
        let annotation = T::subscript(T::qualified("List"), T::name("int"));
        assert_eq!(resolve(&annotation), COMPLEX_TYPE);
    }

    #[test]
    fn test_resolve_multi_argument_subscript_is_complex() {
        let annotation = T::subscript(T::name("Dict"), T::Other);
        assert_eq!(resolve(&annotation), COMPLEX_TYPE);
    }

    #[test]
    fn test_resolve_other_is_unknown() {
        assert_eq!(resolve(&T::Other), UNKNOWN_TYPE);
    }

    #[test]
    fn test_generic_inner() {
        assert_eq!(generic_inner("List[User]"), Some("User"));
        assert_eq!(generic_inner("Optional[List[str]]"), Some("List[str]"));
        assert_eq!(generic_inner("int"), None);
    }

    #[test]
    fn test_normalize_strips_wrapper() {
        assert_eq!(normalize("List[User]"), "User");
        assert_eq!(normalize("Optional[User]"), "User");
        assert_eq!(normalize("Dict[User]"), "User");
    }

    #[test]
    fn test_normalize_keeps_inner_generic_whole() {
        assert_eq!(normalize("Optional[List[str]]"), "List[str]");
    }

    #[test]
    fn test_normalize_idempotent_on_plain_types() {
        for descriptor in ["int", "str", "User", COMPLEX_TYPE, UNKNOWN_TYPE] {
            assert_eq!(normalize(descriptor), descriptor);
            assert_eq!(normalize(normalize(descriptor)), normalize(descriptor));
        }
    }
}
