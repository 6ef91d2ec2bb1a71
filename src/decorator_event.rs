/// Events emitted by the decorators while wrapping a call.
///
/// Every event is logged through `tracing` and, when one is attached, passed to
/// the trace callback set with `with_trace`. The `Clone` derive allows callbacks
/// to store or forward events.
///
/// # Examples
///
/// ```rust
/// use call_decorators::DecoratorEvent;
///
/// let event = DecoratorEvent::Calling { name: "double".into() };
/// assert_eq!(event.to_string(), "--> Calling double");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DecoratorEvent {
    /// A logged callable is about to run.
    Calling { name: String },

    /// A logged callable returned successfully.
    Returning {
        name: String,
        /// `Debug` rendering of the returned value
        value: String,
    },

    /// A logged callable returned an error, which is passed on unchanged.
    Failed { name: String, error: String },

    /// A locked callable is waiting for its lock.
    Waiting { name: String, lock_id: usize },

    /// The lock is held and the callable is about to run.
    Acquired { name: String, lock_id: usize },

    /// The lock was released after the call.
    Released { name: String, lock_id: usize },

    /// A callable was added to a category collection.
    Registered { category: String, name: String },

    /// A recoverable failure while running the callable was replaced by the default.
    ExecutionRecovered { name: String, error: String },

    /// A recoverable failure while converting the result was replaced by the default.
    ConversionRecovered {
        name: String,
        from: &'static str,
        to: &'static str,
        error: String,
    },
}

/// Severity an event is logged at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl DecoratorEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            DecoratorEvent::Registered { .. } => EventLevel::Debug,
            DecoratorEvent::Calling { .. }
            | DecoratorEvent::Returning { .. }
            | DecoratorEvent::Waiting { .. }
            | DecoratorEvent::Acquired { .. }
            | DecoratorEvent::Released { .. } => EventLevel::Info,
            DecoratorEvent::ExecutionRecovered { .. }
            | DecoratorEvent::ConversionRecovered { .. } => EventLevel::Warn,
            DecoratorEvent::Failed { .. } => EventLevel::Error,
        }
    }
}

impl std::fmt::Display for DecoratorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecoratorEvent::Calling { name } => write!(f, "--> Calling {name}"),
            DecoratorEvent::Returning { name, value } => {
                write!(f, "<-- {name} returning {value}")
            }
            DecoratorEvent::Failed { name, error } => {
                write!(f, "<!- ERROR occurred calling {name}: {error}")
            }
            DecoratorEvent::Waiting { name, lock_id } => {
                write!(f, "--> {name} waiting for lock {lock_id:#x}")
            }
            DecoratorEvent::Acquired { name, lock_id } => {
                write!(f, "Calling {name} holding lock {lock_id:#x}")
            }
            DecoratorEvent::Released { name, lock_id } => {
                write!(f, "<-- {name} released lock {lock_id:#x}")
            }
            DecoratorEvent::Registered { category, name } => {
                write!(f, "registered {name} in {category}")
            }
            DecoratorEvent::ExecutionRecovered { name, error } => {
                write!(f, "Caught error executing {name}: {error}")
            }
            DecoratorEvent::ConversionRecovered {
                name,
                from,
                to,
                error,
            } => {
                write!(f, "Caught error converting {from} to {to} in {name}: {error}")
            }
        }
    }
}
