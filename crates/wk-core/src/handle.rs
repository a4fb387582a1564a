//! Shared bindings between widgets and client-owned data
//!
//! A widget never owns the point, vector or matrix it manipulates. The owner
//! creates a [`Handle`], keeps a clone for itself, and hands another clone to
//! the widget. Shared ownership keeps the data alive for as long as any
//! widget is bound to it.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Shared reference to client data that widgets read and mutate
pub struct Handle<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Handle<T> {
    /// Wrap a value in a new handle
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Replace the bound value
    pub fn set(&self, value: T) {
        *self.inner.lock() = value;
    }

    /// Mutate the bound value in place and return the closure's result
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Whether both handles refer to the same storage
    pub fn is_same(&self, other: &Handle<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Copy> Handle<T> {
    /// Copy the bound value out
    pub fn get(&self) -> T {
        *self.inner.lock()
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Handle<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&*self.inner.lock()).finish()
    }
}
