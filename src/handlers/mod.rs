//! # Handler abstractions.
//!
//! This module provides the action-related types:
//! - [`Handler`] — trait for implementing async reactions to events
//! - [`HandlerFn`] — function-based handler implementation
//! - [`HandlerRef`] — shared reference to a handler (`Arc<dyn Handler>`)

mod handler;
mod handler_fn;

pub use handler::{Handler, HandlerRef};
pub use handler_fn::HandlerFn;
