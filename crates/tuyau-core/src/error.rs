use std::fmt;

/// Errors raised by the calculator. The only failure mode is an input that
/// violates one of its physical constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidParameter {
        /// Name of the offending field, e.g. `holes[1].position`.
        field: String,
        /// Human-readable description of the violated constraint.
        constraint: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Error::InvalidParameter {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            Error::InvalidParameter { field, .. } => field,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter { field, constraint } => {
                write!(f, "invalid parameter `{field}`: {constraint}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Fail unless `value` is finite and strictly positive.
pub(crate) fn ensure_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::invalid(field, format!("must be > 0, got {value}")));
    }
    Ok(())
}

/// Fail unless `value` is finite and within `[min, max]`.
pub(crate) fn ensure_within(field: &str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(Error::invalid(
            field,
            format!("must be within [{min}, {max}], got {value}"),
        ));
    }
    Ok(())
}
