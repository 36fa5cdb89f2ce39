//! Source parsing: tree-sitter front end and structural module types

pub mod ast;
pub mod python;

pub use ast::*;
pub use python::PythonParser;
