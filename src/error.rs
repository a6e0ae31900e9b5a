use thiserror::Error;

/// A selector value outside the domain the dashboard can render.
///
/// Selections are rejected rather than clamped; the message is shown in
/// place of each chart that depends on the offending control.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("unknown launch site '{site}'")]
    InvalidSite { site: String },

    #[error("invalid payload range [{low}, {high}]: expected 0 <= low <= high")]
    InvalidRange { low: f64, high: f64 },
}
