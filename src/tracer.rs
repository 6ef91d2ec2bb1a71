//! Event emission shared by every decorator.
//!
//! Each wrapper owns a [`Tracer`]. Emitting an event logs it through `tracing` at
//! the event's level and then hands it to the optional trace callback, which is
//! how tests and embedding code observe individual records.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::decorator_event::{DecoratorEvent, EventLevel};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives every `DecoratorEvent` the owning wrapper emits. It must be
/// thread-safe because wrappers can be shared between threads.
pub type TraceCallback = dyn Fn(&DecoratorEvent) + Send + Sync + 'static;

#[derive(Clone, Default)]
pub struct Tracer {
    callback: Option<Arc<TraceCallback>>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: impl Fn(&DecoratorEvent) + Send + Sync + 'static) -> Self {
        Self {
            callback: Some(Arc::new(callback)),
        }
    }

    /// Share one callback between several wrappers.
    pub fn with_shared(callback: Arc<TraceCallback>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Log `event` and forward it to the callback, if any.
    ///
    /// # Panics
    ///
    /// If the callback itself panics, the panic propagates to the caller of the
    /// wrapped function.
    pub fn emit(&self, event: DecoratorEvent) {
        match event.level() {
            EventLevel::Debug => tracing::debug!("{event}"),
            EventLevel::Info => tracing::info!("{event}"),
            EventLevel::Warn => tracing::warn!("{event}"),
            EventLevel::Error => tracing::error!("{event}"),
        }

        if let Some(callback) = self.callback.as_ref() {
            callback(&event);
        }
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Last path segment of `F`'s type name.
///
/// For `fn` items this is the function's own name (`double` for
/// `my_crate::double`, `identity` for `my_crate::identity<u8>`); closures come
/// out as `{{closure}}`, even inside generic functions.
pub(crate) fn callable_name<F: ?Sized>() -> String {
    let base = strip_trailing_generics(std::any::type_name::<F>());
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// `a::b<T<U>>` -> `a::b`; generics earlier in the path are left alone.
fn strip_trailing_generics(path: &str) -> &str {
    if !path.ends_with('>') {
        return path;
    }
    let mut depth = 0usize;
    for (i, c) in path.char_indices().rev() {
        match c {
            '>' => depth += 1,
            '<' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return &path[..i];
                }
            }
            _ => {}
        }
    }
    path
}

/// Text of a panic payload from `panic!` with a literal or a formatted message.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}

/// Renders an error with its `source()` chain, outermost first.
pub(crate) fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn double(i: i64) -> i64 {
        i * 2
    }

    fn name_of<F>(_: &F) -> String {
        callable_name::<F>()
    }

    #[test]
    fn test_callable_name_of_fn_item() {
        assert_eq!(name_of(&double), "double");
    }

    #[test]
    fn test_callable_name_of_closure() {
        let closure = |i: i64| i + 3;
        assert_eq!(name_of(&closure), "{{closure}}");
    }

    fn identity<T>(t: T) -> T {
        t
    }

    fn adder<T>(_: T) -> impl Fn(i64) -> i64 {
        |i| i + 1
    }

    #[test]
    fn test_callable_name_with_generics() {
        assert_eq!(name_of(&identity::<Vec<Option<u8>>>), "identity");
        assert_eq!(name_of(&adder(0u64)), "{{closure}}");
        assert_eq!(
            strip_trailing_generics("a::busy<u64>::{{closure}}"),
            "a::busy<u64>::{{closure}}"
        );
        assert_eq!(strip_trailing_generics("a::b<c::D<u8>>"), "a::b");
    }

    #[test]
    fn test_panic_message() {
        let literal = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(&*literal), "boom");

        let formatted = std::panic::catch_unwind(|| panic!("boom {}", 2)).unwrap_err();
        assert_eq!(panic_message(&*formatted), "boom 2");
    }

    #[test]
    fn test_emit_forwards_to_callback() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        let tracer = Tracer::with_callback(move |e| {
            events_clone.lock().unwrap().push(e.to_string());
        });

        tracer.emit(DecoratorEvent::Calling {
            name: "double".into(),
        });

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0], "--> Calling double");
    }

    #[test]
    fn test_shared_callback_sees_every_tracer() {
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        let callback: Arc<TraceCallback> = Arc::new(move |_: &DecoratorEvent| {
            *count_clone.lock().unwrap() += 1;
        });

        let first = Tracer::with_shared(callback.clone());
        let second = Tracer::with_shared(callback);
        first.emit(DecoratorEvent::Calling { name: "a".into() });
        second.emit(DecoratorEvent::Calling { name: "b".into() });

        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[test]
    fn test_emit_without_callback() {
        let tracer = Tracer::new();
        assert!(!tracer.has_callback());
        tracer.emit(DecoratorEvent::Calling { name: "f".into() });
    }

    #[test]
    fn test_error_chain_includes_sources() {
        #[derive(Debug, thiserror::Error)]
        #[error("outer")]
        struct Outer(#[source] std::io::Error);

        let err = Outer(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"));
        assert_eq!(error_chain(&err), "outer: disk gone");
    }
}
