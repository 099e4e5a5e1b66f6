/// Errors produced by the booking core services.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// The date string could not be parsed as a calendar day.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The end date precedes the start date.
    #[error("Invalid date range: end date must not be before start date")]
    InvalidRange,

    /// The location exists but has no screen record, so capacity is
    /// undefined. Distinct from a validation error so callers can render
    /// a "this venue isn't bookable" message.
    #[error("Screen settings not found for location")]
    ScreenNotConfigured,

    /// Failure inside the campaign store. Propagated uncaught by the
    /// core; the calling layer turns it into a generic failure response.
    #[error("Store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// Wraps a store-level failure.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }
}
