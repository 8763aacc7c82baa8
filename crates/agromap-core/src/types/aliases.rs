//! Type aliases for commonly used complex types.
//!
//! The editor runs on a single UI thread, so host-side shared state is
//! `Rc<RefCell<T>>` rather than a lock.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agromap_core::types::*;
//!
//! let events: SharedVec<String> = shared(Vec::new());
//! events.borrow_mut().push("changed".to_string());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Use when a host and a listener both need to see the same mutable state
/// (e.g. a form model updated from editor callbacks).
pub type Shared<T> = Rc<RefCell<T>>;

/// A shared vector for single-threaded collection management.
pub type SharedVec<T> = Rc<RefCell<Vec<T>>>;

/// Create a new `Shared<T>` from a value.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
