// Structural types for parsed Python modules
//
// These types capture only what the model audit needs: top-level classes
// with their annotated fields and bases, plus top-level functions. They are
// serializable for debugging output.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The top-level structure of one parsed source file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleAst {
    /// File path the module was parsed from
    pub path: PathBuf,
    /// Top-level class definitions, in declaration order
    pub classes: Vec<ClassDef>,
    /// Top-level standalone functions, in declaration order
    pub functions: Vec<FunctionDef>,
}

impl ModuleAst {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            classes: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Check if the module defines anything of interest
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty()
    }
}

/// A top-level class definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassDef {
    /// Class name
    pub name: String,
    /// Direct base classes, as annotation shapes
    pub bases: Vec<TypeAnnotation>,
    /// Type-annotated fields in the class body, in declaration order
    pub fields: Vec<FieldDef>,
    /// Method names defined in the class body
    pub methods: Vec<String>,
    /// Starting line number
    pub line: usize,
}

impl ClassDef {
    pub fn new(name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            bases: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            line,
        }
    }

    /// Bare base-class names, used for same-file inheritance edges
    pub fn bare_bases(&self) -> impl Iterator<Item = &str> {
        self.bases.iter().filter_map(TypeAnnotation::bare_name)
    }
}

/// A type-annotated class field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// The annotation as written
    pub annotation: TypeAnnotation,
    /// Line number
    pub line: usize,
}

impl FieldDef {
    pub fn new(name: &str, annotation: TypeAnnotation, line: usize) -> Self {
        Self {
            name: name.to_string(),
            annotation,
            line,
        }
    }
}

/// A top-level standalone function
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionDef {
    /// Function name
    pub name: String,
    /// Line number
    pub line: usize,
}

impl FunctionDef {
    pub fn new(name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            line,
        }
    }
}

/// A type annotation, reduced to the shapes the resolver distinguishes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TypeAnnotation {
    /// A bare name: `int`, `str`, `User`
    Name(String),
    /// A dotted reference, keeping only the trailing attribute: `pydantic.BaseModel` -> `BaseModel`
    Qualified(String),
    /// A subscripted container: `List[User]`, `Dict[str, int]`
    Subscript {
        value: Box<TypeAnnotation>,
        slice: Box<TypeAnnotation>,
    },
    /// Anything else: unions, strings, tuples, call expressions
    Other,
}

impl TypeAnnotation {
    pub fn name(id: &str) -> Self {
        TypeAnnotation::Name(id.to_string())
    }

    pub fn qualified(attr: &str) -> Self {
        TypeAnnotation::Qualified(attr.to_string())
    }

    pub fn subscript(value: TypeAnnotation, slice: TypeAnnotation) -> Self {
        TypeAnnotation::Subscript {
            value: Box::new(value),
            slice: Box::new(slice),
        }
    }

    /// The bare name, if this is a plain `Name` annotation
    pub fn bare_name(&self) -> Option<&str> {
        match self {
            TypeAnnotation::Name(id) => Some(id),
            _ => None,
        }
    }

    /// The trailing name for both bare and dotted shapes
    pub fn trailing_name(&self) -> Option<&str> {
        match self {
            TypeAnnotation::Name(id) => Some(id),
            TypeAnnotation::Qualified(attr) => Some(attr),
            _ => None,
        }
    }
}
