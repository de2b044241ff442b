//! Brands domain module.
//!
//! This crate contains the brand record and its creation rules, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod brand;

pub use brand::{Brand, BrandId, NAME_MAX_LENGTH, NewBrand, brand_schema};
