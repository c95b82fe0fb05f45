//! Integration tests for the finrisk engines
//!
//! Tests are organized by topic:
//! - `scenarios` - Worked examples with hand-checked figures
//! - `determinism` - Seeding, reproducibility and parallel equivalence
//! - `properties` - Invariants checked over generated inputs
