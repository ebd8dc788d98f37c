//! Error types for the refinement engine.

use crate::odds::Tier;

/// Errors that can occur while computing refinement expectations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RefineError {
    /// The recipe has an unsupported number of breath ingredients.
    #[error("invalid recipe: expected 3 or 1 breath ingredients, found {cardinality}")]
    InvalidRecipe {
        /// Number of breath ingredients the recipe declares.
        cardinality: usize,
    },

    /// An ingredient used by the recipe has no entry in the price table.
    #[error("no price for ingredient '{0}'")]
    MissingPrice(String),

    /// A unit price is negative or not a finite number.
    #[error("invalid price for ingredient '{name}': {price}")]
    InvalidPrice {
        /// Ingredient name.
        name: String,
        /// The rejected unit price.
        price: f64,
    },

    /// A breath count lies outside the range covered by the tier's table.
    #[error("breath count {breath_count} out of range for {tier}")]
    InvalidArgument {
        /// The requested breath count.
        breath_count: usize,
        /// The tier whose table was consulted.
        tier: Tier,
    },

    /// A probability table does not have the expected shape or mass.
    #[error("malformed probability table: {0}")]
    MalformedTable(String),

    /// The engine configuration is out of range.
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for refinement operations.
pub type RefineResult<T> = Result<T, RefineError>;
