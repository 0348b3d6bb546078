//! Player accounts and their rating tiers.

mod models;

pub use models::{Account, Tier};
