//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself. Entity-level failures travel boxed inside
//! [`FrameworkError::EntityError`] so clients can downcast them back to the entity's own type.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's typed error, if this is one.
    ///
    /// Returns the original error unchanged when the boxed value is of another type or when the
    /// failure came from the plumbing.
    pub fn into_entity_error<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("shelf empty")]
    struct ShelfEmpty;

    #[test]
    fn test_entity_error_downcasts_to_original_type() {
        let err = FrameworkError::EntityError(Box::new(ShelfEmpty));
        assert_eq!(err.into_entity_error::<ShelfEmpty>().unwrap(), ShelfEmpty);
    }

    #[test]
    fn test_plumbing_errors_are_returned_unchanged() {
        let err = FrameworkError::ActorClosed;
        assert!(matches!(
            err.into_entity_error::<ShelfEmpty>(),
            Err(FrameworkError::ActorClosed)
        ));
    }

    #[test]
    fn test_foreign_entity_error_is_kept_boxed() {
        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        match err.into_entity_error::<ShelfEmpty>() {
            Err(FrameworkError::EntityError(inner)) => assert_eq!(inner.to_string(), "disk"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
