//! Route handlers, one module per resource.
//!
//! Handlers only translate between HTTP and `crate::core`; every rule lives in
//! the core functions they call.

pub mod agents;
pub mod catalog;
pub mod elements;
pub mod lists;
pub mod records;
pub mod roster;
pub mod semester;
pub mod users;
