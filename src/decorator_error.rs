use std::fmt;

/// Raised when a decorator factory is built without a required option.
///
/// Factories check their configuration when they are built, so a missing
/// option never surfaces at call time.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("You must specify a lock")]
    MissingLock,
    #[error("You must specify a target type")]
    MissingTargetType,
    #[error("Failed to install log subscriber: {0}")]
    Subscriber(String),
}

/// Closed set of failure categories a wrapped callable can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    InvalidValue,
    WrongType,
    Runtime,
    Arithmetic,
    Lookup,
    Io,
}

impl FailureKind {
    pub const ALL: [FailureKind; 6] = [
        FailureKind::InvalidValue,
        FailureKind::WrongType,
        FailureKind::Runtime,
        FailureKind::Arithmetic,
        FailureKind::Lookup,
        FailureKind::Io,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::InvalidValue => "InvalidValue",
            FailureKind::WrongType => "WrongType",
            FailureKind::Runtime => "Runtime",
            FailureKind::Arithmetic => "Arithmetic",
            FailureKind::Lookup => "Lookup",
            FailureKind::Io => "Io",
        };
        f.write_str(name)
    }
}

/// A categorized failure returned by a wrapped callable or by a coercion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidValue, message)
    }

    pub fn wrong_type(message: impl Into<String>) -> Self {
        Self::new(FailureKind::WrongType, message)
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Runtime, message)
    }

    pub fn arithmetic(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Arithmetic, message)
    }
}

/// The failure kinds a coercing wrapper suppresses.
///
/// Membership is checked per kind; anything outside the set propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recoverable(u8);

impl Recoverable {
    /// Every kind is recoverable.
    pub fn all() -> Self {
        FailureKind::ALL.into_iter().collect()
    }

    pub fn none() -> Self {
        Self(0)
    }

    pub fn only(kinds: &[FailureKind]) -> Self {
        kinds.iter().copied().collect()
    }

    pub fn with(self, kind: FailureKind) -> Self {
        Self(self.0 | kind.bit())
    }

    pub fn contains(&self, kind: FailureKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_recoverable(&self, failure: &Failure) -> bool {
        self.contains(failure.kind)
    }
}

impl Default for Recoverable {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<FailureKind> for Recoverable {
    fn from_iter<I: IntoIterator<Item = FailureKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Recoverable::with)
    }
}
