pub mod engine;
pub mod types;
pub mod validation;

pub use engine::calculate_ranking;
pub use types::{NormalizedCriteria, Product, ScoredResult, Weights, WEIGHT_SUM_TOLERANCE};
pub use validation::{
    rank_guard, validate_balanced, validate_product, validate_user, validate_weights, RankError,
};
