// Python parser using tree-sitter
//
// Walks one file's top-level statements only: class definitions with their
// bases, annotated fields and method names, plus standalone functions.
// Nested scopes are never entered.

use crate::error::{Error, Result};
use crate::parser::ast::*;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};

/// Parser for Python source files
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new Python parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_python::language();
        parser
            .set_language(&language)
            .map_err(|e| Error::Parser(format!("Failed to set Python language: {}", e)))?;
        Ok(Self { parser })
    }

    /// Parse a Python file
    pub fn parse_file(&mut self, path: &Path) -> Result<ModuleAst> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
        })?;

        self.parse_source(&source, path.to_path_buf())
    }

    /// Parse Python source code
    ///
    /// A file with syntax errors is rejected whole; there is no partial
    /// extraction from a malformed module.
    pub fn parse_source(&mut self, source: &str, path: PathBuf) -> Result<ModuleAst> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::parser("Failed to parse source"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(Error::parse(path, "invalid Python syntax"));
        }

        let mut module = ModuleAst::new(path);

        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            match child.kind() {
                "class_definition" => {
                    if let Some(class) = parse_class(&child, source.as_bytes()) {
                        module.classes.push(class);
                    }
                }
                "function_definition" => {
                    if let Some(func) = parse_function(&child, source.as_bytes()) {
                        module.functions.push(func);
                    }
                }
                "decorated_definition" => {
                    // Route on the wrapped definition; decorators themselves are irrelevant here
                    let mut inner_cursor = child.walk();
                    for inner in child.children(&mut inner_cursor) {
                        match inner.kind() {
                            "class_definition" => {
                                if let Some(class) = parse_class(&inner, source.as_bytes()) {
                                    module.classes.push(class);
                                }
                            }
                            "function_definition" => {
                                if let Some(func) = parse_function(&inner, source.as_bytes()) {
                                    module.functions.push(func);
                                }
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(module)
    }
}

/// Parse a class definition
fn parse_class(node: &Node, source: &[u8]) -> Option<ClassDef> {
    let line = node.start_position().row + 1;
    let mut name = String::new();
    let mut bases = Vec::new();
    let mut fields = Vec::new();
    let mut methods = Vec::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                if name.is_empty() {
                    name = child.utf8_text(source).ok()?.to_string();
                }
            }
            "argument_list" => {
                bases = parse_bases(&child, source);
            }
            "block" => {
                parse_class_body(&child, source, &mut fields, &mut methods);
            }
            _ => {}
        }
    }

    if name.is_empty() {
        return None;
    }

    Some(ClassDef {
        name,
        bases,
        fields,
        methods,
        line,
    })
}

/// Parse direct base classes from the argument list
fn parse_bases(node: &Node, source: &[u8]) -> Vec<TypeAnnotation> {
    let mut bases = Vec::new();
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                if let Ok(text) = child.utf8_text(source) {
                    bases.push(TypeAnnotation::name(text));
                }
            }
            "attribute" => {
                if let Some(attr) = attribute_trailing_name(&child, source) {
                    bases.push(TypeAnnotation::qualified(&attr));
                }
            }
            "subscript" | "generic_type" | "call" | "string" => {
                // Generic[T], metaclass calls and friends: present but shapeless
                bases.push(TypeAnnotation::Other);
            }
            _ => {}
        }
    }

    bases
}

/// Collect annotated fields and method names from a class body
fn parse_class_body(
    node: &Node,
    source: &[u8],
    fields: &mut Vec<FieldDef>,
    methods: &mut Vec<String>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "expression_statement" => {
                if let Some(field) = parse_annotated_field(&child, source) {
                    fields.push(field);
                }
            }
            "function_definition" => {
                if let Some(name) = function_name(&child, source) {
                    methods.push(name);
                }
            }
            "decorated_definition" => {
                let mut inner_cursor = child.walk();
                for inner in child.children(&mut inner_cursor) {
                    if inner.kind() == "function_definition" {
                        if let Some(name) = function_name(&inner, source) {
                            methods.push(name);
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

/// Parse a type-annotated field assignment
///
/// Only `name: Type` and `name: Type = default` count; a plain `name = value`
/// carries no annotation and is ignored.
fn parse_annotated_field(node: &Node, source: &[u8]) -> Option<FieldDef> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "assignment" {
            let line = child.start_position().row + 1;
            let target = child.child_by_field_name("left")?;
            if target.kind() != "identifier" {
                return None;
            }
            let type_node = child.child_by_field_name("type")?;
            let name = target.utf8_text(source).ok()?;
            let annotation = parse_annotation(&type_node, source);
            return Some(FieldDef::new(name, annotation, line));
        }
    }
    None
}

/// Parse an annotation expression into its tagged shape
fn parse_annotation(node: &Node, source: &[u8]) -> TypeAnnotation {
    match node.kind() {
        // The grammar wraps annotation expressions in a `type` node
        "type" => match node.named_child(0) {
            Some(inner) => parse_annotation(&inner, source),
            None => TypeAnnotation::Other,
        },
        "identifier" => match node.utf8_text(source) {
            Ok(text) => TypeAnnotation::name(text),
            Err(_) => TypeAnnotation::Other,
        },
        "attribute" => match attribute_trailing_name(node, source) {
            Some(attr) => TypeAnnotation::qualified(&attr),
            None => TypeAnnotation::Other,
        },
        "subscript" => {
            let value = match node.child_by_field_name("value") {
                Some(v) => parse_annotation(&v, source),
                None => TypeAnnotation::Other,
            };
            let mut cursor = node.walk();
            let args: Vec<Node> = node
                .children_by_field_name("subscript", &mut cursor)
                .collect();
            let slice = single_argument(&args, source);
            TypeAnnotation::subscript(value, slice)
        }
        // In annotation position the grammar produces `generic_type` instead
        // of `subscript`
        "generic_type" => {
            let mut value = TypeAnnotation::Other;
            let mut args = Vec::new();
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "identifier" => value = parse_annotation(&child, source),
                    "attribute" => value = parse_annotation(&child, source),
                    "type_parameter" => {
                        let mut param_cursor = child.walk();
                        for param in child.named_children(&mut param_cursor) {
                            if param.kind() == "type" {
                                args.push(param);
                            }
                        }
                    }
                    _ => {}
                }
            }
            let slice = single_argument(&args, source);
            TypeAnnotation::subscript(value, slice)
        }
        _ => TypeAnnotation::Other,
    }
}

/// Reduce a subscript argument list to one slice shape
///
/// Multi-argument subscripts like `Dict[str, int]` have no single inner type;
/// they surface as an `Other` slice and resolve to the complex sentinel.
fn single_argument(args: &[Node], source: &[u8]) -> TypeAnnotation {
    match args {
        [only] => parse_annotation(only, source),
        _ => TypeAnnotation::Other,
    }
}

/// The trailing attribute name of a dotted reference
fn attribute_trailing_name(node: &Node, source: &[u8]) -> Option<String> {
    let attr = node.child_by_field_name("attribute")?;
    attr.utf8_text(source).ok().map(|s| s.to_string())
}

/// Parse a standalone function definition
fn parse_function(node: &Node, source: &[u8]) -> Option<FunctionDef> {
    let line = node.start_position().row + 1;
    let name = function_name(node, source)?;
    Some(FunctionDef::new(&name, line))
}

/// The name of a function_definition node
fn function_name(node: &Node, source: &[u8]) -> Option<String> {
    let name = node.child_by_field_name("name")?;
    name.utf8_text(source).ok().map(|s| s.to_string())
}
