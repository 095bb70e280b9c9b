use std::{fmt, rc::Rc};

use crate::object::ObjectRef;

/// A runtime value in a template context. Cloning is cheap; object values share
/// their underlying node, so mutations are visible through every clone.
#[derive(Clone)]
pub struct Value(pub Rc<ValueKind>);

impl Value {
    pub fn new(kind: ValueKind) -> Self {
        Self(Rc::new(kind))
    }

    pub fn unit() -> Self {
        Self::new(ValueKind::Unit)
    }

    pub fn bool(value: bool) -> Self {
        Self::new(ValueKind::Bool(value))
    }

    pub fn int(value: i64) -> Self {
        Self::new(ValueKind::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Self::new(ValueKind::Float(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ValueKind::String(value.into()))
    }

    pub fn array(values: Vec<Value>) -> Self {
        Self::new(ValueKind::Array(values))
    }

    pub fn object(object: ObjectRef) -> Self {
        Self::new(ValueKind::Object(object))
    }

    pub fn type_name(&self) -> &'static str {
        match &*self.0 {
            ValueKind::Unit => "Unit",
            ValueKind::Bool(_) => "Bool",
            ValueKind::Int(_) => "Int",
            ValueKind::Float(_) => "Float",
            ValueKind::String(_) => "String",
            ValueKind::Array(_) => "Array",
            ValueKind::Object(_) => "Object",
        }
    }

    pub fn as_object(&self) -> Option<ObjectRef> {
        match &*self.0 {
            ValueKind::Object(object) => Some(Rc::clone(object)),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            ValueKind::Unit => write!(f, "Unit"),
            ValueKind::Bool(b) => write!(f, "{b}"),
            ValueKind::Int(n) => write!(f, "{n}"),
            ValueKind::Float(n) => write!(f, "{n}"),
            ValueKind::String(s) => write!(f, "\"{s}\""),
            ValueKind::Array(values) => f.debug_list().entries(values.iter()).finish(),
            ValueKind::Object(object) => f.debug_map().entries(object.borrow().entries()).finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            ValueKind::Unit => write!(f, "unit"),
            ValueKind::Bool(b) => write!(f, "{b}"),
            ValueKind::Int(n) => write!(f, "{n}"),
            ValueKind::Float(n) => write!(f, "{n}"),
            ValueKind::String(s) => write!(f, "{s}"),
            ValueKind::Array(values) => {
                write!(f, "[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            ValueKind::Object(object) => {
                // The parent link is a relation, not a field; it never renders.
                write!(f, "{{")?;
                for (idx, (key, value)) in object.borrow().entries().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (&*self.0, &*other.0) {
            (ValueKind::Unit, ValueKind::Unit) => true,
            (ValueKind::Bool(a), ValueKind::Bool(b)) => a == b,
            (ValueKind::Int(a), ValueKind::Int(b)) => a == b,
            (ValueKind::Float(a), ValueKind::Float(b)) => a == b,
            (ValueKind::String(a), ValueKind::String(b)) => a == b,
            (ValueKind::Array(a), ValueKind::Array(b)) => a == b,
            (ValueKind::Object(a), ValueKind::Object(b)) => a.borrow().same_shape(&b.borrow()),
            _ => false,
        }
    }
}

#[derive(Clone)]
pub enum ValueKind {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(ObjectRef),
}
