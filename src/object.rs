//! Context nodes: named fields, an optional parent link for scope-chain lookup,
//! and per-field watcher lists. The engine never owns the node graph and does not
//! guard against cyclic parent chains; callers must avoid creating them.

use std::{cell::RefCell, rc::Rc};

use indexmap::IndexMap;

use crate::{diagnostics::Result, expression::Expression, value::Value};

pub type ObjectRef = Rc<RefCell<Object>>;

/// Callback invoked when an observed property is assigned.
pub type Callback = Rc<dyn Fn()>;

/// A registered observation: the expression and context needed to re-arm it,
/// plus the callback to invoke. One entry fires for exactly one assignment.
pub struct Watcher {
    pub expression: Expression,
    pub context: Value,
    pub callback: Callback,
}

#[derive(Default)]
pub struct Object {
    parent: Option<ObjectRef>,
    fields: IndexMap<String, Value>,
    watchers: IndexMap<String, Vec<Watcher>>,
}

impl Object {
    pub fn new() -> ObjectRef {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn with_parent(parent: ObjectRef) -> ObjectRef {
        Rc::new(RefCell::new(Self {
            parent: Some(parent),
            ..Self::default()
        }))
    }

    /// Inserts a field without notifying watchers. Construction-time use.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn parent(&self) -> Option<ObjectRef> {
        self.parent.clone()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Structural equality over fields and parent chains. Watcher state never
    /// participates.
    pub fn same_shape(&self, other: &Object) -> bool {
        if self.fields.len() != other.fields.len() {
            return false;
        }
        let fields_equal = self
            .fields
            .iter()
            .all(|(key, value)| other.fields.get(key).map(|rhs| value == rhs).unwrap_or(false));
        if !fields_equal {
            return false;
        }
        match (&self.parent, &other.parent) {
            (None, None) => true,
            (Some(a), Some(b)) => a.borrow().same_shape(&b.borrow()),
            _ => false,
        }
    }

    /// Assigns a field and fires any watchers registered for it.
    ///
    /// The new value is applied before any callback runs, so callbacks observe
    /// the assignment as already complete. Watchers are single-shot: each one is
    /// removed, its callback invoked, and the observation re-armed through a
    /// fresh base resolution, in registration order. Errors surface only from a
    /// re-arm whose base resolution no longer reaches the property.
    pub fn assign(object: &ObjectRef, name: &str, value: Value) -> Result<()> {
        let triggered = {
            let mut data = object.borrow_mut();
            data.fields.insert(name.to_string(), value);
            data.watchers.shift_remove(name).unwrap_or_default()
        };
        for watcher in triggered {
            (watcher.callback)();
            watcher
                .expression
                .observe_value(&watcher.context, Rc::clone(&watcher.callback))?;
        }
        Ok(())
    }

    pub fn watch(object: &ObjectRef, name: &str, watcher: Watcher) {
        object
            .borrow_mut()
            .watchers
            .entry(name.to_string())
            .or_default()
            .push(watcher);
    }
}
