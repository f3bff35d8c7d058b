//! Single-threaded shared cells exposed to presentation layers.
//!
//! The drag controllers publish the current selection and the draggable
//! handle registry through [`Shared`]. A presentation layer keeps a clone and
//! polls [`Shared::version`] to learn when to redraw.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Inner<T> {
    value: RefCell<T>,
    version: Cell<u64>,
}

/// Cloneable handle to a value shared between the view and its observers.
pub struct Shared<T>(Rc<Inner<T>>);

impl<T> Shared<T> {
    /// Wrap `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self(Rc::new(Inner {
            value: RefCell::new(value),
            version: Cell::new(0),
        }))
    }

    /// Read through a closure.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.value.borrow())
    }

    /// Mutate through a closure and bump the version.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.0.value.borrow_mut());
        self.0.version.set(self.0.version.get() + 1);
        out
    }

    /// Replace the value, returning the previous one.
    pub fn replace(&self, value: T) -> T {
        self.update(|v| std::mem::replace(v, value))
    }

    /// Number of writes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.0.version.get()
    }

    /// Whether both handles point at the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Clone> Shared<T> {
    /// Clone the current value out.
    #[must_use]
    pub fn get(&self) -> T {
        self.0.value.borrow().clone()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shared")
            .field("value", &self.0.value.borrow())
            .field("version", &self.0.version.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_writes() {
        let a = Shared::new(vec![1, 2]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        b.update(|v| v.push(3));
        assert_eq!(a.get(), vec![1, 2, 3]);
        assert_eq!(a.version(), 1);
    }

    #[test]
    fn replace_returns_previous() {
        let sel: Shared<Option<u32>> = Shared::default();
        assert_eq!(sel.replace(Some(4)), None);
        assert_eq!(sel.with(|s| *s), Some(4));
        assert_eq!(sel.version(), 1);
    }
}
