//! Scoped logger binding
//!
//! [`bind_logger`] makes a logger the ambient logger of the current thread
//! until the returned [`ContextGuard`] is dropped. Bindings nest; the
//! innermost one wins.
//!
//! # Example
//!
//! ```
//! use rec_logger::prelude::*;
//! use rec_logger::core::{bind_logger, context_logger};
//! use std::sync::Arc;
//!
//! let memory = MemoryAppender::new();
//! let request_logger = Arc::new(
//!     Logger::with_config(Arc::new(memory.clone()), Config::default())
//!         .unwrap()
//!         .with(&[Field::string("request_id", "r-1")]),
//! );
//!
//! {
//!     let _guard = bind_logger(Arc::clone(&request_logger));
//!     context_logger().info("handled", &[]);
//! }
//! assert!(memory.lines()[0].contains("\"request_id\":\"r-1\""));
//! ```

use super::logger::{default_logger, Logger};
use super::severity::Severity;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::panic::Location;
use std::sync::Arc;

thread_local! {
    static BOUND_LOGGERS: RefCell<Vec<Arc<Logger>>> = const { RefCell::new(Vec::new()) };
}

/// RAII guard for a scoped logger binding
///
/// Unbinds on drop. Not `Send`: a binding belongs to the thread that made it.
pub struct ContextGuard {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        BOUND_LOGGERS.with(|stack| stack.borrow_mut().truncate(self.depth));
    }
}

/// Bind `logger` to the current thread until the guard is dropped
#[must_use = "the binding ends when the guard is dropped"]
pub fn bind_logger(logger: Arc<Logger>) -> ContextGuard {
    let depth = BOUND_LOGGERS.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.push(logger);
        stack.len() - 1
    });

    ContextGuard {
        depth,
        _not_send: PhantomData,
    }
}

/// Innermost logger bound to the current thread, if any
pub fn try_context_logger() -> Option<Arc<Logger>> {
    BOUND_LOGGERS.with(|stack| stack.borrow().last().cloned())
}

/// Innermost logger bound to the current thread
///
/// Without a binding, an ERROR record is written through the default logger
/// and the default logger is returned.
#[track_caller]
pub fn context_logger() -> Arc<Logger> {
    if let Some(logger) = try_context_logger() {
        return logger;
    }

    let logger = default_logger();
    logger.log_at(
        Some(Location::caller()),
        Severity::ERROR,
        "rec_logger::context_logger: no logger is bound to the current context, using the default logger",
        &[],
        &[],
    );
    logger
}
