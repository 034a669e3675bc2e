//! Data layer: core types, loading, caching and column resolution.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → ListingTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  cache    │  one Arc<ListingTable> per path
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  columns  │  resolve x/y axes against the table's columns
//!   └──────────┘
//! ```

pub mod cache;
pub mod columns;
pub mod loader;
pub mod model;
