//! Widget error types

/// Errors raised by widget state transitions.
///
/// Degenerate geometry (a ray parallel to the drag plane, a zero-length
/// rotation axis) is not an error: those cases leave the bound data
/// unchanged and are only traced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WidgetError {
    /// The widget has no binding for the requested operation
    #[error("{0} is not bound to any data")]
    Unbound(&'static str),
    /// A drag arrived while the widget was idle
    #[error("{0} received a drag without a preceding down")]
    NotDragging(&'static str),
    /// The press landed outside every pickable part
    #[error("Mouse press did not land on the widget")]
    Missed,
    /// Non-positive arcball radius
    #[error("Arcball radius must be positive, got {0}")]
    InvalidRadius(f32),
    /// Non-positive arcball scale
    #[error("Arcball scale must be positive, got {0}")]
    InvalidScale(f32),
}

/// Result alias for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;
