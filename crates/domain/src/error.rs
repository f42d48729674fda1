use thiserror::Error;

/// Errors raised at the validated boundary of the domain API.
///
/// The raw math functions never return these; they are produced by the
/// `try_*` helpers and by value-object validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A numeric parameter is outside its admissible domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as seen by the caller.
        name: &'static str,
        /// Human readable constraint that was violated.
        reason: String,
    },
    /// The lower tick is not strictly below the upper tick.
    #[error("invalid tick range: lower {lower} must be below upper {upper}")]
    InvalidTickRange {
        /// Lower tick bound.
        lower: i32,
        /// Upper tick bound.
        upper: i32,
    },
    /// A liquidity magnitude could not be parsed.
    #[error("invalid liquidity `{0}`: expected a non-negative integer")]
    InvalidLiquidity(String),
}

impl DomainError {
    /// Shorthand for [`DomainError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Fails unless `value` is finite and strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::invalid(
            name,
            format!("must be a finite number greater than zero, got {value}"),
        ))
    }
}

/// Fails unless `lower < upper`.
pub fn ensure_tick_range(lower: i32, upper: i32) -> Result<(), DomainError> {
    if lower < upper {
        Ok(())
    } else {
        Err(DomainError::InvalidTickRange { lower, upper })
    }
}
