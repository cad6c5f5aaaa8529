use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Structural mutation attempted on an instance whose contract forbids it.
    ///
    /// `state` names the mutability state of the receiver (`"immutable"`,
    /// `"read-only"`).
    pub fn immutable_mutation(operation: &'static str, state: &'static str) -> Error {
        Error(ErrorKind::ImmutableMutation { operation, state }.into())
    }

    pub fn concurrent_modification(expected: u64, found: u64) -> Error {
        Error(ErrorKind::ConcurrentModification { expected, found }.into())
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Error {
        Error(ErrorKind::IndexOutOfRange { index, len }.into())
    }

    pub fn empty_sequence(operation: &'static str) -> Error {
        Error(ErrorKind::EmptySequence { operation }.into())
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn no_such_element(context: impl Into<String>) -> Error {
        Error(
            ErrorKind::NoSuchElement {
                context: context.into(),
            }
            .into(),
        )
    }

    /// Returns `true` if this error reports a stale view, iterator or cursor.
    pub fn is_concurrent_modification(&self) -> bool {
        matches!(self.kind(), ErrorKind::ConcurrentModification { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("cannot {operation}: the sequence is {state}")]
    ImmutableMutation {
        operation: &'static str,
        state: &'static str,
    },

    #[error("concurrent modification: view expected generation {expected}, store is at {found}")]
    ConcurrentModification { expected: u64, found: u64 },

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{operation} called on an empty sequence")]
    EmptySequence { operation: &'static str },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("no such element: {context}")]
    NoSuchElement { context: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = Error::index_out_of_range(7, 3);
        assert_eq!(e.to_string(), "index 7 out of range for length 3");

        let e = Error::immutable_mutation("add", "immutable");
        assert_eq!(e.to_string(), "cannot add: the sequence is immutable");

        let e = Error::concurrent_modification(4, 5);
        assert!(e.is_concurrent_modification());
        assert!(matches!(
            e.into_kind(),
            ErrorKind::ConcurrentModification {
                expected: 4,
                found: 5
            }
        ));
    }
}
