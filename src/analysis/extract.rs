// Per-file model extraction
//
// Pulls the data-model view out of one parsed module: class attribute lists,
// base-model flags and nested references. Nested detection is scoped to the
// file's own top-level classes; a field typed as a class defined in another
// file is not treated as nested.

use crate::analysis::types;
use crate::parser::ModuleAst;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// One attribute of a model class
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldRecord {
    /// Attribute name, unique within its class
    pub name: String,
    /// Resolved type descriptor
    pub type_name: String,
    /// Whether the type references another class from the same file
    pub nested: bool,
}

impl FieldRecord {
    pub fn new(name: &str, type_name: &str, nested: bool) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            nested,
        }
    }
}

/// One extracted model class
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassRecord {
    /// Class name
    pub name: String,
    /// Attributes in declaration order
    pub fields: Vec<FieldRecord>,
    /// Whether a direct base resolves to the base-model marker
    pub is_base: bool,
}

/// A directed containment edge: `class.field` holds or contains `target`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NestedReference {
    pub class: String,
    pub field: String,
    pub target: String,
}

/// Everything extracted from one file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileModels {
    /// Source file the classes came from
    pub path: PathBuf,
    /// Classes in declaration order
    pub classes: Vec<ClassRecord>,
    /// Containment edges between classes of this file
    pub nested: Vec<NestedReference>,
}

/// Extract the model view of one parsed module
///
/// `base_model` is the marker base-class name; a class whose direct base's
/// bare or trailing name equals it is flagged as a data-model schema.
pub fn extract(module: &ModuleAst, base_model: &str) -> FileModels {
    // Full top-level class list first, so in-file forward references resolve
    let local_names: HashSet<&str> = module.classes.iter().map(|c| c.name.as_str()).collect();

    let mut classes = Vec::new();
    let mut nested = Vec::new();

    for class in &module.classes {
        let is_base = class
            .bases
            .iter()
            .filter_map(|b| b.trailing_name())
            .any(|name| name == base_model);

        let mut fields = Vec::new();
        for field in &class.fields {
            let descriptor = types::resolve(&field.annotation);
            let candidate = types::generic_inner(&descriptor).unwrap_or(&descriptor);
            let is_nested = local_names.contains(candidate);

            if is_nested {
                nested.push(NestedReference {
                    class: class.name.clone(),
                    field: field.name.clone(),
                    target: candidate.to_string(),
                });
            }

            fields.push(FieldRecord::new(&field.name, &descriptor, is_nested));
        }

        classes.push(ClassRecord {
            name: class.name.clone(),
            fields,
            is_base,
        });
    }

    FileModels {
        path: module.path.clone(),
        classes,
        nested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ClassDef, FieldDef, TypeAnnotation as T};

    fn module_with(classes: Vec<ClassDef>) -> ModuleAst {
        let mut module = ModuleAst::new(PathBuf::from("models.py"));
        module.classes = classes;
        module
    }

    fn class(name: &str, fields: Vec<FieldDef>) -> ClassDef {
        let mut def = ClassDef::new(name, 1);
        def.fields = fields;
        def
    }

    #[test]
    fn test_plain_fields() {
        let module = module_with(vec![class(
            "User",
            vec![
                FieldDef::new("name", T::name("str"), 2),
                FieldDef::new("age", T::name("int"), 3),
            ],
        )]);

        let models = extract(&module, "BaseModel");
        assert_eq!(models.classes.len(), 1);
        let user = &models.classes[0];
        assert_eq!(user.fields[0], FieldRecord::new("name", "str", false));
        assert_eq!(user.fields[1], FieldRecord::new("age", "int", false));
        assert!(models.nested.is_empty());
    }

    #[test]
    fn test_field_order_preserved() {
        let module = module_with(vec![class(
            "User",
            vec![
                FieldDef::new("c", T::name("str"), 2),
                FieldDef::new("a", T::name("str"), 3),
                FieldDef::new("b", T::name("str"), 4),
            ],
        )]);

        let models = extract(&module, "BaseModel");
        let names: Vec<&str> = models.classes[0]
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_direct_nested_reference() {
        let module = module_with(vec![
            class("Profile", vec![FieldDef::new("bio", T::name("str"), 2)]),
            class("User", vec![FieldDef::new("profile", T::name("Profile"), 5)]),
        ]);

        let models = extract(&module, "BaseModel");
        assert_eq!(
            models.nested,
            vec![NestedReference {
                class: "User".to_string(),
                field: "profile".to_string(),
                target: "Profile".to_string(),
            }]
        );
        assert!(models.classes[1].fields[0].nested);
    }

    #[test]
    fn test_nested_inside_container() {
        let module = module_with(vec![
            class("User", vec![FieldDef::new(
                "profile",
                T::subscript(T::name("Optional"), T::name("Profile")),
                2,
            )]),
            class("Profile", vec![]),
        ]);

        let models = extract(&module, "BaseModel");
        assert_eq!(models.nested.len(), 1);
        assert_eq!(models.nested[0].target, "Profile");
        let field = &models.classes[0].fields[0];
        assert_eq!(field.type_name, "Optional[Profile]");
        assert!(field.nested);
    }

    #[test]
    fn test_forward_reference_within_file() {
        // User appears before Profile; the class list is collected first
        let module = module_with(vec![
            class("User", vec![FieldDef::new(
                "profiles",
                T::subscript(T::name("List"), T::name("Profile")),
                2,
            )]),
            class("Profile", vec![]),
        ]);

        let models = extract(&module, "BaseModel");
        assert_eq!(models.nested.len(), 1);
    }

    #[test]
    fn test_container_of_unknown_class_not_nested() {
        let module = module_with(vec![class(
            "User",
            vec![FieldDef::new(
                "tags",
                T::subscript(T::name("List"), T::name("str")),
                2,
            )],
        )]);

        let models = extract(&module, "BaseModel");
        assert!(models.nested.is_empty());
        let field = &models.classes[0].fields[0];
        assert_eq!(field.type_name, "List[str]");
        assert!(!field.nested);
    }

    #[test]
    fn test_base_model_flag_bare_and_qualified() {
        let mut direct = ClassDef::new("User", 1);
        direct.bases.push(T::name("BaseModel"));
        let mut dotted = ClassDef::new("Order", 5);
        dotted.bases.push(T::qualified("BaseModel"));
        let mut plain = ClassDef::new("Helper", 9);
        plain.bases.push(T::name("object"));

        let module = module_with(vec![direct, dotted, plain]);
        let models = extract(&module, "BaseModel");

        assert!(models.classes[0].is_base);
        assert!(models.classes[1].is_base);
        assert!(!models.classes[2].is_base);
    }

    #[test]
    fn test_custom_base_marker() {
        let mut def = ClassDef::new("User", 1);
        def.bases.push(T::name("Schema"));
        let module = module_with(vec![def]);

        let models = extract(&module, "Schema");
        assert!(models.classes[0].is_base);
    }

    #[test]
    fn test_unresolvable_annotation_uses_sentinel() {
        let module = module_with(vec![class(
            "User",
            vec![FieldDef::new("blob", T::Other, 2)],
        )]);

        let models = extract(&module, "BaseModel");
        assert_eq!(models.classes[0].fields[0].type_name, "Unknown");
    }
}
