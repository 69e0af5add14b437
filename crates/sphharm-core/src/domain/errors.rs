pub type HarmonicResult<T> = Result<T, HarmonicError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    InputValidationError,
    InternalError,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::InternalError => "InternalError",
        }
    }

    /// Callers can retry input validation failures with corrected inputs;
    /// internal failures indicate a defect in the summation itself.
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::InputValidationError)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HarmonicError {
    #[error("degree {degree} is too large: coefficient storage exceeds the index space (max degree {max_degree})")]
    DegreeTooLarge { degree: usize, max_degree: usize },
    #[error(
        "coefficient vectors have the wrong size for degree {degree}: expected {expected}, got cosine={cosine}, sine={sine}"
    )]
    CoefficientSizeMismatch {
        degree: usize,
        expected: usize,
        cosine: usize,
        sine: usize,
    },
    #[error("triangular index counter finished with residual {residual}, expected 0")]
    IndexCounterMismatch { residual: usize },
    #[error("triangular index counter exhausted early at degree {degree}, order {order}")]
    IndexCounterUnderflow { degree: usize, order: usize },
}

impl HarmonicError {
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::DegreeTooLarge { .. } | Self::CoefficientSizeMismatch { .. } => {
                ErrorCategory::InputValidationError
            }
            Self::IndexCounterMismatch { .. } | Self::IndexCounterUnderflow { .. } => {
                ErrorCategory::InternalError
            }
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::DegreeTooLarge { .. } => "INPUT.DEGREE_TOO_LARGE",
            Self::CoefficientSizeMismatch { .. } => "INPUT.COEFFICIENT_SIZE",
            Self::IndexCounterMismatch { .. } => "INTERNAL.INDEX_RESIDUAL",
            Self::IndexCounterUnderflow { .. } => "INTERNAL.INDEX_UNDERFLOW",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        self.category().is_recoverable()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.is_recoverable() {
            "ERROR"
        } else {
            "FATAL"
        };
        format!("{}: [{}] {}", severity, self.code(), self)
    }
}
