use std::{fs, rc::Rc};

use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, FreesiaError, Result},
    expression::Expression,
    object::Object,
    parser::parse_value,
    template::replace_values,
    value::Value,
};

/// Interactive session: plain lines render as templates against the current
/// context; `:load`, `:get`, `:set`, and `:watch` drive the engine directly.
pub struct Repl {
    context: Value,
}

impl Repl {
    pub fn new() -> Self {
        Self {
            context: Value::object(Object::new()),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new().map_err(|err| {
            FreesiaError::from(std::io::Error::new(std::io::ErrorKind::Other, err))
        })?;
        loop {
            match editor.readline(">> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed == ":quit" || trimmed == ":exit" {
                        break;
                    }
                    if trimmed.is_empty() {
                        continue;
                    }
                    editor.add_history_entry(trimmed).ok();
                    match self.dispatch(trimmed) {
                        Ok(()) => {}
                        Err(FreesiaError::Diagnostic(diag)) => {
                            eprintln!("{:?}: {}", diag.kind, diag.message);
                        }
                        Err(other) => eprintln!("error: {other}"),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    return Err(FreesiaError::from(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        err,
                    )));
                }
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, line: &str) -> Result<()> {
        if let Some(path) = line.strip_prefix(":load ") {
            let source = fs::read_to_string(path.trim())?;
            self.context = parse_value(&source)?;
            println!("context loaded");
        } else if let Some(path) = line.strip_prefix(":get ") {
            match dotted_path(path.trim())?.get_value(&self.context) {
                Some(value) => println!("{value}"),
                None => println!("absent"),
            }
        } else if let Some(rest) = line.strip_prefix(":set ") {
            let (path, literal) = rest.trim().split_once(' ').ok_or_else(|| {
                Diagnostic::new(DiagnosticKind::Parser, "usage: :set <path> <value>")
            })?;
            let value = parse_value(literal.trim())?;
            dotted_path(path)?.set_value(&self.context, value)?;
        } else if let Some(path) = line.strip_prefix(":watch ") {
            let path = path.trim().to_string();
            let expression = dotted_path(&path)?;
            let label = path.clone();
            expression.observe_value(
                &self.context,
                Rc::new(move || println!("{label} changed")),
            )?;
            println!("watching {path}");
        } else {
            println!("{}", replace_values(&self.context, line));
        }
        Ok(())
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

fn dotted_path(path: &str) -> Result<Expression> {
    Expression::new(path.split('.').map(str::to_string).collect())
}
