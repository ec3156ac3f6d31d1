pub mod digits;
pub mod distribution;
pub mod empirical;
pub mod error;
pub mod goodness_of_fit;
pub mod types;

#[cfg(feature = "sampling")]
pub mod sampling;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use digits::lead_digit;
pub use distribution::Benford;
pub use empirical::{build_distribution, build_distribution_from_strings, EmpiricalDistribution};
pub use error::BenfordError;
pub use goodness_of_fit::{chi_square, cho_gaines, leemis, GoodnessOfFit, Significance};
pub use types::*;

#[cfg(feature = "sampling")]
pub use sampling::SharedSampler;

/// Standard result type for all benford operations
pub type BenfordResult<T> = Result<T, BenfordError>;
