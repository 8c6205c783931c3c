//! Persistent variable environments.
//!
//! An `Environment` is an immutable cons list of `name -> value` frames.
//! `extend` puts one frame in front and leaves the receiver untouched, so an
//! environment captured by a caller stays valid however many times it is
//! extended afterwards. Frames are shared through `Arc`; cloning is O(1).
//!
//! # Shadowing
//!
//! Lookup walks newest-first, so a frame hides every older frame with the
//! same name.

use std::fmt;
use std::sync::Arc;

use tern_ir::Name;

pub struct Environment<T> {
    head: Option<Arc<Frame<T>>>,
}

struct Frame<T> {
    name: Name,
    value: T,
    next: Option<Arc<Frame<T>>>,
}

impl<T> Environment<T> {
    /// The empty environment.
    pub fn new() -> Self {
        Environment { head: None }
    }

    /// Build by extending the empty environment with each binding in order.
    /// A later binding shadows an earlier one with the same name.
    pub fn from_bindings<N, I>(bindings: I) -> Self
    where
        N: Into<Name>,
        I: IntoIterator<Item = (N, T)>,
    {
        bindings
            .into_iter()
            .fold(Self::new(), |env, (name, value)| env.extend(name, value))
    }

    /// A new environment with one more binding in front of `self`.
    #[must_use]
    pub fn extend(&self, name: impl Into<Name>, value: T) -> Self {
        Environment {
            head: Some(Arc::new(Frame {
                name: name.into(),
                value,
                next: self.head.clone(),
            })),
        }
    }

    /// The newest binding for `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.iter()
            .find_map(|(bound, value)| (bound.as_str() == name).then_some(value))
    }

    /// Number of frames, shadowed ones included.
    pub fn depth(&self) -> usize {
        self.iter().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Bindings newest-first, shadowed ones included.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl<T> Default for Environment<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Environment<T> {
    fn clone(&self) -> Self {
        Environment {
            head: self.head.clone(),
        }
    }
}

/// Releases uniquely owned frames in a loop; dropping a long chain
/// recursively would overflow the stack.
impl<T> Drop for Environment<T> {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(frame) = next {
            match Arc::try_unwrap(frame) {
                Ok(mut frame) => next = frame.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Environment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Frame<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a Name, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.next?;
        self.next = frame.next.as_deref();
        Some((&frame.name, &frame.value))
    }
}

impl<'a, T> IntoIterator for &'a Environment<T> {
    type Item = (&'a Name, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
