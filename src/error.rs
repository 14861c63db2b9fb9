use thiserror::Error;

use crate::data::VintageId;

/// Every way a decomposition run can fail.
///
/// All variants are fatal at the point they are raised: the computation is a
/// deterministic batch transform over static historical tables, so there is
/// nothing to retry.
#[derive(Debug, Clone, Error)]
pub enum DecompError {
    /// A raw classification code has no crosswalk entry and is not on a drop list.
    #[error("Unmapped code '{code}' in vintage {vintage}.")]
    UnmappedCode { vintage: VintageId, code: String },

    /// `I - Omega` cannot be inverted for the given year.
    #[error("Singular input-output system for {year}: {reason}")]
    SingularIoMatrix { year: i32, reason: String },

    /// An accounting identity exceeded its tolerance.
    #[error("Identity '{identity}' violated in {year}: residual {residual:.3e}.")]
    IdentityViolation {
        identity: &'static str,
        year: i32,
        residual: f64,
    },

    /// A subperiod's base year has no usable observations at all.
    #[error("Base year {base_year} has no observations with a defined Tornqvist share.")]
    MissingBaseYear { base_year: i32 },

    /// Reallocation terms were requested for a year without smoothed Domar weights.
    #[error("No Domar weights available for {year}.")]
    MissingDomarWeights { year: i32 },

    /// A vintage supplies the same year more than once.
    #[error("Vintage {vintage} supplies {year} more than once.")]
    VintageCollision { year: i32, vintage: VintageId },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DecompError {
    /// Process exit code for front-ends: 2 = input/config, 3 = coverage, 4 = computation.
    pub fn exit_code(&self) -> u8 {
        match self {
            DecompError::UnmappedCode { .. }
            | DecompError::InvalidInput(_)
            | DecompError::Config(_) => 2,
            DecompError::MissingBaseYear { .. }
            | DecompError::MissingDomarWeights { .. }
            | DecompError::VintageCollision { .. } => 3,
            DecompError::SingularIoMatrix { .. } | DecompError::IdentityViolation { .. } => 4,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        DecompError::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, DecompError>;
