use super::types::{NormalizedCriteria, Product, ScoredResult, Weights};

/// Reference values taken over the whole candidate set.
#[derive(Debug, Clone, Copy)]
struct Reference {
    profit_max: f64,
    sales_max: f64,
    cost_min: f64,
}

impl Reference {
    fn from_products(products: &[Product]) -> Option<Self> {
        let first = products.first()?;
        let seed = Reference {
            profit_max: first.profit,
            sales_max: first.sales,
            cost_min: first.cost,
        };
        Some(products.iter().skip(1).fold(seed, |acc, p| Reference {
            profit_max: acc.profit_max.max(p.profit),
            sales_max: acc.sales_max.max(p.sales),
            cost_min: acc.cost_min.min(p.cost),
        }))
    }

    fn normalize(&self, product: &Product) -> NormalizedCriteria {
        let profit = if self.profit_max == 0.0 {
            0.0
        } else {
            product.profit / self.profit_max
        };
        let sales = if self.sales_max == 0.0 {
            0.0
        } else {
            product.sales / self.sales_max
        };
        // A zero own cost, or a zero best cost anywhere in the set, both count
        // as fully favorable.
        let cost = if product.cost == 0.0 || self.cost_min == 0.0 {
            1.0
        } else {
            self.cost_min / product.cost
        };
        NormalizedCriteria {
            profit,
            sales,
            cost,
        }
    }
}

/// Rank products with Simple Additive Weighting.
///
/// Profit and sales are benefit criteria normalized against the set maximum,
/// cost is a cost criterion normalized as `min / value`. Each weight is
/// divided by 100 as-is; weights that do not add up to 100 scale every score
/// uniformly.
///
/// Results are sorted by score descending with a stable sort, so products
/// with equal scores keep their input order. Ranks run `1..=n`.
///
/// Inputs are expected to be finite and non-negative. Anything else is outside
/// the contract; the function still returns without panicking.
pub fn calculate_ranking<'a>(
    products: &'a [Product],
    weights: &Weights,
) -> Vec<ScoredResult<'a>> {
    let Some(reference) = Reference::from_products(products) else {
        return Vec::new();
    };

    let profit_factor = weights.profit / 100.0;
    let sales_factor = weights.sales / 100.0;
    let cost_factor = weights.cost / 100.0;

    let mut scored: Vec<ScoredResult<'a>> = products
        .iter()
        .map(|product| {
            let normalized = reference.normalize(product);
            let score = normalized.profit * profit_factor
                + normalized.sales * sales_factor
                + normalized.cost * cost_factor;
            ScoredResult {
                product,
                score,
                rank: 0,
                normalized,
            }
        })
        .collect();

    // sort_by is stable: exact ties stay in input order. total_cmp keeps the
    // comparator a total order even for NaN scores.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    for (index, result) in scored.iter_mut().enumerate() {
        result.rank = index + 1;
    }

    scored
}
