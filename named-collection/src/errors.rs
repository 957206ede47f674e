use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for collection operations.
///
/// Every fallible operation on a [`crate::collection::Collection`] reports exactly
/// one of these kinds, so callers can match on the category of failure instead of
/// parsing messages.
///
/// # Examples
///
/// ```rust
/// use named_collection::errors::{CollectionError, CollectionResult, ErrorKind};
///
/// fn example() -> CollectionResult<()> {
///     Err(CollectionError::new("Duplicate keys not allowed: a", ErrorKind::DuplicateKey))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::DuplicateKey);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// Construction or transform arguments do not have the required shape
    MalformedArguments,
    /// A non-null key appears more than once
    DuplicateKey,
    /// The index expression cannot be used for the requested operation
    UnsupportedIndexType,
    /// A position does not denote an existing slot
    OutOfBounds,
    /// The operation is not supported for the given index (e.g. path assignment)
    UnsupportedOperation,
    /// Attribute-style access found no slot with the requested key
    AttributeNotFound,
    /// Internal bookkeeping is inconsistent (usually indicates a bug)
    InvariantViolation,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MalformedArguments => write!(f, "Malformed arguments"),
            ErrorKind::DuplicateKey => write!(f, "Duplicate key"),
            ErrorKind::UnsupportedIndexType => write!(f, "Unsupported index type"),
            ErrorKind::OutOfBounds => write!(f, "Index out of bounds"),
            ErrorKind::UnsupportedOperation => write!(f, "Unsupported operation"),
            ErrorKind::AttributeNotFound => write!(f, "Attribute not found"),
            ErrorKind::InvariantViolation => write!(f, "Invariant violation"),
        }
    }
}

/// Error type of the crate.
///
/// `CollectionError` carries a message, its [ErrorKind], an optional cause and the
/// backtrace captured at construction.
///
/// ```rust
/// use named_collection::errors::{CollectionError, ErrorKind};
///
/// let cause = CollectionError::new("Index out of bounds: 7", ErrorKind::OutOfBounds);
/// let err = CollectionError::new_with_cause("Update failed", ErrorKind::OutOfBounds, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct CollectionError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<CollectionError>>,
    backtrace: Arc<Backtrace>,
}

impl CollectionError {
    /// Creates a new `CollectionError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        CollectionError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `CollectionError` which keeps `cause` in its error chain.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: CollectionError) -> Self {
        CollectionError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&CollectionError> {
        self.cause.as_deref()
    }
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for CollectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

impl From<std::num::TryFromIntError> for CollectionError {
    fn from(err: std::num::TryFromIntError) -> Self {
        CollectionError::new(
            &format!("Position does not fit the collection: {}", err),
            ErrorKind::OutOfBounds,
        )
    }
}

/// Logs `message` at error level and returns it as a [CollectionError] of `kind`.
pub(crate) fn fail<T>(message: String, kind: ErrorKind) -> CollectionResult<T> {
    log::error!("{}", message);
    Err(CollectionError::new(&message, kind))
}
