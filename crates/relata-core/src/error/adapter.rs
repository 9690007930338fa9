use super::Error;

/// Error raised by a storage adapter.
#[derive(Debug)]
pub(super) struct AdapterError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for AdapterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a storage adapter failure.
    ///
    /// Adapters wrap their backend-specific errors with this so they travel
    /// through the resolvers unchanged.
    pub fn adapter(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Adapter(AdapterError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is an adapter error.
    pub fn is_adapter(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Adapter(_))
    }
}
