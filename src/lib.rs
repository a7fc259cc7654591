//! Rank products by Simple Additive Weighting (SAW).
//!
//! The [`ranking`] module holds the scoring engine and input validation; the
//! rest of the crate is the command-line application around it: a JSON
//! [`store`] of users, products and weights, YAML [`config`], and terminal
//! [`output`].

pub mod config;
pub mod logging;
pub mod output;
pub mod ranking;
pub mod store;
