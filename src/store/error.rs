use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// Input failed validation; holds every message found
    #[error("invalid input: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("email already registered: {0}")]
    DuplicateEmail(String),
}

impl StoreError {
    /// Validation messages, if this is an input error
    pub fn messages(&self) -> Option<&[String]> {
        match self {
            StoreError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::UserNotFound(_) | StoreError::ProductNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display_joins_messages() {
        let err = StoreError::Invalid(vec!["a: bad".to_string(), "b: worse".to_string()]);
        assert_eq!(err.to_string(), "invalid input: a: bad; b: worse");
        assert_eq!(err.messages().unwrap().len(), 2);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found() {
        assert!(StoreError::UserNotFound("u1".to_string()).is_not_found());
        assert!(StoreError::ProductNotFound("p1".to_string()).is_not_found());
        assert!(!StoreError::DuplicateEmail("a@b".to_string()).is_not_found());
    }
}
