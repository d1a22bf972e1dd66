//! Data layer: probe records, loading, and cleaning.
//!
//! Architecture:
//! ```text
//!  .json / .csv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<ProbeRecord>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  drop records without a depth
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ ProbeList  │  Vec<Probe>, each sorted by depth
//!   └───────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
