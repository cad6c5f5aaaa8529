pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

/// Checks that `$index < $len`, returning `IndexOutOfRange` from the enclosing
/// function otherwise.
#[macro_export]
macro_rules! verify_index {
    ($index:expr, $len:expr) => {{
        $crate::result::verify_index($index, $len)?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[inline]
pub fn verify_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        index_out_of_range(index, len)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
pub fn index_out_of_range(index: usize, len: usize) -> Result<()> {
    Err(crate::error::ErrorKind::IndexOutOfRange { index, len }.into())
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    fn checked(from: usize, to: usize, len: usize) -> crate::Result<usize> {
        verify_arg!(from, from <= to);
        verify_index!(to, len + 1);
        Ok(to - from)
    }

    #[test]
    fn test_verify_macros() {
        assert_eq!(checked(1, 3, 5).unwrap(), 2);
        let err = checked(3, 1, 5).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidArgument { name, message } => {
                assert_eq!(name, "from");
                assert_eq!(message, "from <= to");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(matches!(
            checked(1, 9, 5).unwrap_err().kind(),
            ErrorKind::IndexOutOfRange { index: 9, len: 6 }
        ));
    }
}
