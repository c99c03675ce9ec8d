//! # Framework Errors
//!
//! Errors produced by the actor plumbing itself. Domain failures raised inside an
//! entity hook travel back to the caller boxed in [`FrameworkError::EntityError`];
//! typed clients recover them with [`FrameworkError::into_entity_error`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    /// Every id the actor can assign has been used.
    #[error("Id space exhausted")]
    IdSpaceExhausted,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the concrete entity error of type `E`.
    ///
    /// Returns `Err(self)` unchanged when this is a transport error or when the
    /// boxed entity error is of a different type.
    pub fn into_entity_error<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }

    /// True when the actor could not be reached or did not answer.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FrameworkError::ActorClosed | FrameworkError::ActorDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of stock")]
    struct OutOfStock;

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct Other;

    #[test]
    fn recovers_matching_entity_error() {
        let err = FrameworkError::EntityError(Box::new(OutOfStock));
        assert_eq!(err.into_entity_error::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn keeps_mismatched_entity_error_boxed() {
        let err = FrameworkError::EntityError(Box::new(Other));
        let back = err.into_entity_error::<OutOfStock>().unwrap_err();
        assert_eq!(back.to_string(), "Entity error: other");
    }

    #[test]
    fn transport_errors_pass_through() {
        let err = FrameworkError::ActorClosed;
        assert!(err.is_unavailable());
        assert!(matches!(
            err.into_entity_error::<OutOfStock>(),
            Err(FrameworkError::ActorClosed)
        ));
    }
}
