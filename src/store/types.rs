use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StoreError;
use crate::ranking::{validate_product, validate_user, validate_weights, Product, Weights};

pub const STORE_VERSION: u32 = 1;
const DEFAULT_ROLE: &str = "member";

/// Persisted state: users, their products and the shared weight configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreState {
    pub version: u32,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    pub weights: Weights,
    pub weights_updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    #[serde(flatten)]
    pub product: Product,
    pub created_at: DateTime<Utc>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new(Weights::default())
    }
}

impl StoreState {
    /// Create an empty store seeded with the given weights
    pub fn new(weights: Weights) -> Self {
        Self {
            version: STORE_VERSION,
            users: Vec::new(),
            products: Vec::new(),
            weights,
            weights_updated_at: Utc::now(),
        }
    }

    // Users

    /// Register a new user. Name and role are trimmed, email and role lowercased.
    pub fn add_user(
        &mut self,
        name: &str,
        email: &str,
        role: Option<&str>,
    ) -> Result<&User, StoreError> {
        validate_user(name, email).map_err(StoreError::Invalid)?;

        let email = email.trim().to_lowercase();
        if self.users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail(email));
        }

        let role = role
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());

        let id = Uuid::new_v4().to_string();
        self.users.push(User {
            id: id.clone(),
            name: name.trim().to_string(),
            email,
            role,
            created_at: Utc::now(),
        });
        self.users.last().ok_or(StoreError::UserNotFound(id))
    }

    /// All users, oldest first
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Remove a user together with every product they own.
    /// Returns the number of products removed.
    pub fn remove_user(&mut self, id: &str) -> Result<usize, StoreError> {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        if self.users.len() == before {
            return Err(StoreError::UserNotFound(id.to_string()));
        }

        let products_before = self.products.len();
        self.products
            .retain(|r| r.product.user_id.as_deref() != Some(id));
        Ok(products_before - self.products.len())
    }

    // Products

    /// Add a product after validating its fields and owner.
    pub fn add_product(
        &mut self,
        name: &str,
        profit: f64,
        sales: f64,
        cost: f64,
        owner: Option<&str>,
    ) -> Result<&Product, StoreError> {
        validate_product(name, profit, sales, cost).map_err(StoreError::Invalid)?;

        let owner = owner.map(str::trim).filter(|o| !o.is_empty());
        if let Some(owner) = owner {
            if self.user(owner).is_none() {
                return Err(StoreError::UserNotFound(owner.to_string()));
            }
        }

        let id = Uuid::new_v4().to_string();
        self.products.push(ProductRecord {
            product: Product {
                id: id.clone(),
                name: name.trim().to_string(),
                profit,
                sales,
                cost,
                user_id: owner.map(str::to_string),
            },
            created_at: Utc::now(),
        });
        self.products
            .last()
            .map(|r| &r.product)
            .ok_or(StoreError::ProductNotFound(id))
    }

    /// Products in creation order, optionally only those owned by `owner`.
    pub fn products(&self, owner: Option<&str>) -> Vec<Product> {
        self.products
            .iter()
            .filter(|r| match owner {
                Some(owner) => r.product.user_id.as_deref() == Some(owner),
                None => true,
            })
            .map(|r| r.product.clone())
            .collect()
    }

    /// Remove a product. When `owner` is given the product must belong to them.
    pub fn remove_product(
        &mut self,
        id: &str,
        owner: Option<&str>,
    ) -> Result<Product, StoreError> {
        let position = self
            .products
            .iter()
            .position(|r| {
                r.product.id == id
                    && owner.map_or(true, |o| r.product.user_id.as_deref() == Some(o))
            })
            .ok_or_else(|| StoreError::ProductNotFound(id.to_string()))?;
        Ok(self.products.remove(position).product)
    }

    // Weights

    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Replace the weights. Values must be non-negative; the sum is not checked.
    pub fn set_weights(&mut self, weights: Weights) -> Result<Weights, StoreError> {
        validate_weights(&weights).map_err(StoreError::Invalid)?;
        self.weights = weights;
        self.weights_updated_at = Utc::now();
        Ok(weights)
    }

    pub fn reset_weights(&mut self, default: Weights) -> Weights {
        self.weights = default;
        self.weights_updated_at = Utc::now();
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_user() -> (StoreState, String) {
        let mut state = StoreState::default();
        let id = state
            .add_user("Siti Aminah", "Siti@Example.com ", None)
            .unwrap()
            .id
            .clone();
        (state, id)
    }

    #[test]
    fn test_new_state() {
        let state = StoreState::default();
        assert_eq!(state.version, STORE_VERSION);
        assert!(state.users().is_empty());
        assert!(state.products(None).is_empty());
        assert_eq!(state.weights(), Weights::default());
    }

    #[test]
    fn test_add_user_normalizes() {
        let mut state = StoreState::default();
        let user = state.add_user("  Budi  ", "BUDI@shop.id", Some(" Admin ")).unwrap();
        assert_eq!(user.name, "Budi");
        assert_eq!(user.email, "budi@shop.id");
        assert_eq!(user.role, "admin");
    }

    #[test]
    fn test_add_user_default_role() {
        let (state, _) = state_with_user();
        assert_eq!(state.users()[0].role, "member");
        assert_eq!(state.users()[0].email, "siti@example.com");
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (mut state, _) = state_with_user();
        let err = state.add_user("Siti Lain", "siti@example.com", None).unwrap_err();
        assert_eq!(err, StoreError::DuplicateEmail("siti@example.com".to_string()));
        assert_eq!(state.users().len(), 1);
    }

    #[test]
    fn test_invalid_user_rejected() {
        let mut state = StoreState::default();
        let err = state.add_user("x", "nope", None).unwrap_err();
        assert_eq!(err.messages().unwrap().len(), 2);
        assert!(state.users().is_empty());
    }

    #[test]
    fn test_add_product_with_owner() {
        let (mut state, user_id) = state_with_user();
        let product = state
            .add_product(" Kopi Susu ", 100.0, 50.0, 20.0, Some(user_id.as_str()))
            .unwrap();
        assert_eq!(product.name, "Kopi Susu");
        assert_eq!(product.user_id.as_deref(), Some(user_id.as_str()));
        assert!(!product.id.is_empty());
    }

    #[test]
    fn test_add_returns_newest_entry() {
        let (mut state, _) = state_with_user();
        let second = state
            .add_user("Budi Santoso", "budi@example.com", None)
            .unwrap()
            .clone();
        assert_eq!(state.users().len(), 2);
        assert_eq!(state.users()[1], second);
        assert_eq!(second.name, "Budi Santoso");

        state.add_product("Kopi Susu", 1.0, 1.0, 1.0, None).unwrap();
        let latest = state
            .add_product("Teh Tarik", 2.0, 2.0, 2.0, None)
            .unwrap()
            .clone();
        assert_eq!(latest.name, "Teh Tarik");
        assert_eq!(state.products(None).last(), Some(&latest));
    }

    #[test]
    fn test_add_product_unknown_owner() {
        let mut state = StoreState::default();
        let err = state
            .add_product("Kopi Susu", 1.0, 1.0, 1.0, Some("ghost"))
            .unwrap_err();
        assert_eq!(err, StoreError::UserNotFound("ghost".to_string()));
        assert!(state.products(None).is_empty());
    }

    #[test]
    fn test_add_product_invalid_values() {
        let mut state = StoreState::default();
        let err = state.add_product("Kopi", 0.0, 1.0, -1.0, None).unwrap_err();
        assert_eq!(err.messages().unwrap().len(), 2);
    }

    #[test]
    fn test_products_filtered_by_owner_in_creation_order() {
        let (mut state, user_id) = state_with_user();
        state.add_product("Alpha", 1.0, 1.0, 1.0, Some(user_id.as_str())).unwrap();
        state.add_product("Beta", 2.0, 2.0, 2.0, None).unwrap();
        state.add_product("Gamma", 3.0, 3.0, 3.0, Some(user_id.as_str())).unwrap();

        let all: Vec<String> = state.products(None).into_iter().map(|p| p.name).collect();
        assert_eq!(all, vec!["Alpha", "Beta", "Gamma"]);

        let owned: Vec<String> = state
            .products(Some(user_id.as_str()))
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(owned, vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn test_remove_product_checks_owner() {
        let (mut state, user_id) = state_with_user();
        let id = state.add_product("Alpha", 1.0, 1.0, 1.0, None).unwrap().id.clone();

        let err = state.remove_product(&id, Some(user_id.as_str())).unwrap_err();
        assert_eq!(err, StoreError::ProductNotFound(id.clone()));

        let removed = state.remove_product(&id, None).unwrap();
        assert_eq!(removed.name, "Alpha");
        assert!(state.products(None).is_empty());
    }

    #[test]
    fn test_remove_missing_product() {
        let mut state = StoreState::default();
        assert!(state.remove_product("nope", None).unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_user_cascades_products() {
        let (mut state, user_id) = state_with_user();
        state.add_product("Alpha", 1.0, 1.0, 1.0, Some(user_id.as_str())).unwrap();
        state.add_product("Beta", 1.0, 1.0, 1.0, None).unwrap();

        let removed = state.remove_user(&user_id).unwrap();
        assert_eq!(removed, 1);
        assert!(state.users().is_empty());
        assert_eq!(state.products(None).len(), 1);
    }

    #[test]
    fn test_remove_missing_user() {
        let mut state = StoreState::default();
        let err = state.remove_user("ghost").unwrap_err();
        assert_eq!(err, StoreError::UserNotFound("ghost".to_string()));
    }

    #[test]
    fn test_set_weights_allows_unbalanced() {
        let mut state = StoreState::default();
        let weights = Weights::new(10.0, 10.0, 10.0);
        assert_eq!(state.set_weights(weights).unwrap(), weights);
        assert_eq!(state.weights(), weights);
    }

    #[test]
    fn test_set_weights_rejects_negative() {
        let mut state = StoreState::default();
        let err = state.set_weights(Weights::new(-1.0, 50.0, 51.0)).unwrap_err();
        assert!(err.messages().unwrap()[0].contains("weights.profit"));
        assert_eq!(state.weights(), Weights::default());
    }

    #[test]
    fn test_reset_weights() {
        let mut state = StoreState::new(Weights::new(10.0, 10.0, 80.0));
        state.reset_weights(Weights::default());
        assert_eq!(state.weights(), Weights::default());
    }

    #[test]
    fn test_json_layout_flattens_records() {
        let mut state = StoreState::default();
        state.add_product("Alpha", 1.0, 2.0, 3.0, None).unwrap();
        let value = serde_json::to_value(&state).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["weights"]["profit"], 40.0);
        assert!(value["weights_updated_at"].is_string());
        assert_eq!(value["products"][0]["name"], "Alpha");
        assert!(value["products"][0]["created_at"].is_string());
    }
}
