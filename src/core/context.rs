//! Per-execution-context bound fields
//!
//! Fields bound here are merged into every record emitted from the same
//! logical execution context until they are cleared. By default a context is
//! a thread. With the `tokio-context` feature, [`ContextBinder::scope`] gives a
//! future its own field set so tasks sharing a worker thread stay isolated.

use super::log_context::{FieldValue, Fields};
use std::cell::RefCell;

thread_local! {
    static THREAD_FIELDS: RefCell<Fields> = RefCell::new(Fields::new());
}

#[cfg(feature = "tokio-context")]
tokio::task_local! {
    static TASK_FIELDS: RefCell<Fields>;
}

#[cfg(feature = "tokio-context")]
fn in_task_scope() -> bool {
    TASK_FIELDS.try_with(|_| ()).is_ok()
}

#[cfg(feature = "tokio-context")]
fn with_fields<R: Default>(f: impl FnOnce(&mut Fields) -> R) -> R {
    if in_task_scope() {
        return TASK_FIELDS.with(|fields| f(&mut fields.borrow_mut()));
    }
    with_thread_fields(f)
}

#[cfg(not(feature = "tokio-context"))]
fn with_fields<R: Default>(f: impl FnOnce(&mut Fields) -> R) -> R {
    with_thread_fields(f)
}

/// Thread-local access; once the thread's storage is torn down the context is empty
fn with_thread_fields<R: Default>(f: impl FnOnce(&mut Fields) -> R) -> R {
    THREAD_FIELDS
        .try_with(|fields| f(&mut fields.borrow_mut()))
        .unwrap_or_default()
}

/// Accessor for the current context's bound fields
///
/// # Example
///
/// ```
/// use structured_logs::{ContextBinder, Fields};
///
/// ContextBinder::bind(Fields::new().with("request_id", "req-123").with("user_id", 456));
/// assert_eq!(ContextBinder::snapshot().len(), 2);
///
/// ContextBinder::clear();
/// assert!(ContextBinder::snapshot().is_empty());
/// ```
pub struct ContextBinder;

impl ContextBinder {
    /// Merge `fields` into the current context, overwriting existing keys
    pub fn bind(fields: Fields) {
        with_fields(|current| current.extend(&fields));
    }

    /// Bind a single field
    pub fn bind_field<K, V>(key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        with_fields(|current| current.insert(key, value));
    }

    /// Remove the given keys from the current context
    pub fn unbind<'a>(keys: impl IntoIterator<Item = &'a str>) {
        with_fields(|current| {
            for key in keys {
                current.remove(key);
            }
        });
    }

    /// Empty the current context
    pub fn clear() {
        with_fields(|current| current.clear());
    }

    /// Copy of the fields bound in the current context
    pub fn snapshot() -> Fields {
        with_fields(|current| current.clone())
    }

    /// Bind `fields` until the returned guard is dropped
    ///
    /// On drop, keys that were bound before are restored to their previous
    /// values and new keys are removed.
    #[must_use = "fields are unbound as soon as the guard is dropped"]
    pub fn bound(fields: Fields) -> ContextGuard {
        let previous = with_fields(|current| {
            let previous: Vec<(String, Option<FieldValue>)> = fields
                .keys()
                .map(|key| (key.to_string(), current.get(key).cloned()))
                .collect();
            current.extend(&fields);
            previous
        });
        ContextGuard { previous }
    }

    /// Run `future` with its own field set, seeded from the caller's context
    #[cfg(feature = "tokio-context")]
    pub async fn scope<F>(future: F) -> F::Output
    where
        F: std::future::Future,
    {
        let seed = Self::snapshot();
        TASK_FIELDS.scope(RefCell::new(seed), future).await
    }
}

/// RAII guard returned by [`ContextBinder::bound`]
pub struct ContextGuard {
    previous: Vec<(String, Option<FieldValue>)>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = std::mem::take(&mut self.previous);
        with_fields(|current| {
            for (key, value) in previous {
                match value {
                    Some(value) => current.insert(key, value),
                    None => {
                        current.remove(&key);
                    }
                }
            }
        });
    }
}
