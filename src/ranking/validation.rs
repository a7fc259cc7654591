use thiserror::Error;

use super::types::Weights;

/// Minimum length of a product or user name, after trimming.
pub const MIN_NAME_LEN: usize = 3;

fn check_name(errors: &mut Vec<String>, field: &str, name: &str) {
    if name.trim().chars().count() < MIN_NAME_LEN {
        errors.push(format!(
            "{}: must be at least {} characters",
            field, MIN_NAME_LEN
        ));
    }
}

/// Validate product input before it is stored.
/// Returns all validation errors at once (not just the first).
pub fn validate_product(
    name: &str,
    profit: f64,
    sales: f64,
    cost: f64,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_name(&mut errors, "product.name", name);

    for (field, value) in [("profit", profit), ("sales", sales), ("cost", cost)] {
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("product.{}: must be a positive number, got {}", field, value));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate weight values. Each weight must be a finite, non-negative number.
///
/// Does not check the sum; see [`Weights::is_balanced`] and [`validate_balanced`].
pub fn validate_weights(weights: &Weights) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("profit", weights.profit),
        ("sales", weights.sales),
        ("cost", weights.cost),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!("weights.{}: must be a non-negative number, got {}", field, value));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate weights and additionally require them to add up to 100.
pub fn validate_balanced(weights: &Weights) -> Result<(), Vec<String>> {
    let mut errors = validate_weights(weights).err().unwrap_or_default();

    if errors.is_empty() && !weights.is_balanced() {
        errors.push(format!(
            "weights: must add up to 100, got {}",
            format_total(weights.total())
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate user input before it is stored.
pub fn validate_user(name: &str, email: &str) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_name(&mut errors, "user.name", name);
    if !email.contains('@') {
        errors.push(format!("user.email: invalid address '{}'", email.trim()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Reasons a ranking request is refused
#[derive(Debug, Error, PartialEq)]
pub enum RankError {
    #[error("cannot rank: {}", .0.join("; "))]
    UnbalancedWeights(Vec<String>),
}

impl RankError {
    pub fn messages(&self) -> &[String] {
        match self {
            RankError::UnbalancedWeights(errors) => errors,
        }
    }
}

/// Gate in front of [`calculate_ranking`](super::calculate_ranking).
///
/// An empty product list always passes (there is nothing to rank, whatever the
/// weights). Otherwise the weights must be valid and add up to 100.
pub fn rank_guard(weights: &Weights, product_count: usize) -> Result<(), RankError> {
    if product_count == 0 {
        return Ok(());
    }
    validate_balanced(weights).map_err(RankError::UnbalancedWeights)
}

/// Format a weight total with up to two decimals ("100", "99.5", "33.33")
pub fn format_total(total: f64) -> String {
    let formatted = format!("{:.2}", total);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
