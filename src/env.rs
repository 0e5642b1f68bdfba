// ABOUTME: Environment frames holding ordered symbol bindings with parent chains

use crate::error::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// One named slot in a frame.
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: String,
    pub value: Value,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} = {}]", self.name, self.value)
    }
}

/// One link in the environment chain. Bindings are an ordered list: a later
/// binding for the same name shadows the earlier one, and lookup scans
/// newest first before ascending to the parent.
#[derive(Debug)]
pub struct Frame {
    parent: Option<Rc<Frame>>,
    bindings: RefCell<Vec<Binding>>,
}

impl Frame {
    /// Creates the root frame with no parent.
    pub fn root() -> Rc<Self> {
        Rc::new(Frame {
            parent: None,
            bindings: RefCell::new(Vec::new()),
        })
    }

    /// Creates a child frame.
    pub fn with_parent(parent: Rc<Frame>) -> Rc<Self> {
        Rc::new(Frame {
            parent: Some(parent),
            bindings: RefCell::new(Vec::new()),
        })
    }

    /// Adds a binding to THIS frame. Never walks the parent chain.
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().push(Binding { name, value });
    }

    /// Looks a symbol up in this frame and its parents.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.borrow().iter().rev().find(|b| b.name == name) {
            return Some(binding.value.clone());
        }
        if let Some(ref parent) = self.parent {
            return parent.lookup(name);
        }
        None
    }

    /// Rewrites the nearest enclosing binding in place (set!). Creating a
    /// binding implicitly is not permitted.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), EvalError> {
        if let Some(binding) = self
            .bindings
            .borrow_mut()
            .iter_mut()
            .rev()
            .find(|b| b.name == name)
        {
            binding.value = value;
            return Ok(());
        }
        if let Some(ref parent) = self.parent {
            return parent.assign(name, value);
        }
        Err(EvalError::UnboundSymbol(name.to_string()))
    }
}
