use serde::{Deserialize, Serialize};

/// Tolerance used when checking that weights add up to 100.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// A candidate product to rank.
///
/// `profit` and `sales` are benefit criteria (higher is better), `cost` is a
/// cost criterion (lower is better).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub profit: f64,
    pub sales: f64,
    pub cost: f64,
    /// Owning user, if any. Ranking ignores ownership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Relative importance of each criterion, as percentages.
///
/// Example YAML:
/// ```yaml
/// weights:
///   profit: 40
///   sales: 40
///   cost: 20
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    pub profit: f64,
    pub sales: f64,
    pub cost: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            profit: 40.0,
            sales: 40.0,
            cost: 20.0,
        }
    }
}

impl Weights {
    pub fn new(profit: f64, sales: f64, cost: f64) -> Self {
        Self {
            profit,
            sales,
            cost,
        }
    }

    /// Sum of the three weights
    pub fn total(&self) -> f64 {
        self.profit + self.sales + self.cost
    }

    /// True when the weights add up to 100 (within tolerance)
    pub fn is_balanced(&self) -> bool {
        (self.total() - 100.0).abs() < WEIGHT_SUM_TOLERANCE
    }
}

/// Normalized value of each criterion for one product, in `[0, 1]` for
/// in-contract inputs.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct NormalizedCriteria {
    pub profit: f64,
    pub sales: f64,
    pub cost: f64,
}

/// A product with its computed score and 1-based rank.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredResult<'a> {
    pub product: &'a Product,
    pub score: f64,
    pub rank: usize,
    pub normalized: NormalizedCriteria,
}
