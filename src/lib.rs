//! Core library for the Freesia templating engine: dotted path expressions with
//! scope-chain fallback, `#{...}` placeholder substitution, and change
//! observation over context nodes.

pub mod diagnostics;
pub mod expression;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;
pub mod template;
pub mod value;

pub use diagnostics::{Diagnostic, DiagnosticKind, FreesiaError, SourceSpan};
pub use expression::{Expression, parse};
pub use object::{Callback, Object, ObjectRef};
pub use parser::parse_value;
pub use repl::Repl;
pub use template::replace_values;
pub use value::{Value, ValueKind};
