//! Path expressions: parsing `#{a.b.c}` placeholders and resolving the dotted
//! segments against a context with scope-chain fallback.

use std::{fmt, rc::Rc};

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, Result},
    object::{Callback, Object, ObjectRef, Watcher},
    value::{Value, ValueKind},
};

/// Parses a placeholder into an [`Expression`].
///
/// The first `#{` in the text opens the expression and the last `}` closes it,
/// so surrounding text is ignored and a stray `}` before the opening marker is
/// rejected. The body between the markers is split on `.` into path segments.
pub fn parse(expression: &str) -> Result<Expression> {
    let start = expression.find("#{");
    let end = expression.rfind('}');
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => {
            return Err(Diagnostic::new(
                DiagnosticKind::Parser,
                "expression must be delimited by `#{` and `}`",
            )
            .into());
        }
    };
    let segments = expression[start + 2..end]
        .split('.')
        .map(str::to_string)
        .collect();
    Expression::new(segments)
}

/// An ordered, non-empty sequence of path segment names. Immutable once built.
#[derive(Debug, Clone)]
pub struct Expression {
    segments: Vec<String>,
}

impl Expression {
    pub fn new(segments: Vec<String>) -> Result<Self> {
        if segments.is_empty() {
            return Err(Diagnostic::new(
                DiagnosticKind::Construction,
                "expression path must contain at least one segment",
            )
            .into());
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    fn last_segment(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Resolves the whole path against `context`, returning `None` when any
    /// segment cannot be reached through the node or its parent chain.
    ///
    /// A segment missing on the current node escapes to the parent node and is
    /// retried there at the same position; only a found segment advances the
    /// walk. Resolving a unit value yields `None` even at the end of the path.
    pub fn get_value(&self, context: &Value) -> Option<Value> {
        self.resolve(context, 0, self.segments.len())
    }

    fn resolve(&self, node: &Value, index: usize, last: usize) -> Option<Value> {
        if matches!(&*node.0, ValueKind::Unit) {
            return None;
        }
        if index == last {
            return Some(node.clone());
        }
        let segment = &self.segments[index];
        match &*node.0 {
            ValueKind::Object(object) => {
                let (field, parent) = {
                    let data = object.borrow();
                    (data.field(segment), data.parent())
                };
                if let Some(value) = field {
                    self.resolve(&value, index + 1, last)
                } else if let Some(parent) = parent {
                    self.resolve(&Value::object(parent), index, last)
                } else {
                    None
                }
            }
            // Scalars own no fields and have no parent to escape to.
            _ => None,
        }
    }

    /// Locates the node that owns (or should own) the final segment.
    ///
    /// All segments but the last resolve as a read; from the resulting object
    /// the parent chain is followed until a node already owning the final
    /// segment is found. When none is, the original object is the base, so
    /// writes to never-before-seen fields land on the immediate node.
    pub fn get_base(&self, context: &Value) -> Option<ObjectRef> {
        let last = self.segments.len();
        let resolved = self.resolve(context, 0, last - 1)?;
        let object = resolved.as_object()?;
        let segment = self.last_segment();
        let mut cursor = Rc::clone(&object);
        loop {
            let (owns, parent) = {
                let data = cursor.borrow();
                (data.has_field(segment), data.parent())
            };
            if owns {
                return Some(cursor);
            }
            match parent {
                Some(next) => cursor = next,
                None => return Some(object),
            }
        }
    }

    /// Assigns `value` to the final segment on the resolved base.
    ///
    /// A missing base is a silent no-op; the context is left untouched. The
    /// error channel is only used when a watcher triggered by this assignment
    /// fails to re-arm.
    pub fn set_value(&self, context: &Value, value: Value) -> Result<()> {
        let Some(base) = self.get_base(context) else {
            return Ok(());
        };
        Object::assign(&base, self.last_segment(), value)
    }

    /// Installs `callback` to run on every future assignment to the resolved
    /// property, which must already exist on the base.
    ///
    /// Each trigger re-arms the observation through a fresh base resolution, so
    /// the registration tracks the structure current at that moment. Replacing
    /// an intermediate node wholesale neither unregisters the old watcher nor
    /// observes the new structure; that reconciliation is out of scope.
    pub fn observe_value(&self, context: &Value, callback: Callback) -> Result<()> {
        let segment = self.last_segment();
        let base = self
            .get_base(context)
            .ok_or_else(|| property_not_found(segment))?;
        if !base.borrow().has_field(segment) {
            return Err(property_not_found(segment).into());
        }
        Object::watch(
            &base,
            segment,
            Watcher {
                expression: self.clone(),
                context: context.clone(),
                callback,
            },
        );
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

fn property_not_found(segment: &str) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::Property,
        format!("property `{segment}` not found"),
    )
}
