//! Infrastructure layer: brand persistence backends.

pub mod store;

pub use store::{
    BrandFilter, BrandSeeding, BrandStore, InMemoryBrandStore, PostgresBrandStore, StoreError,
};
