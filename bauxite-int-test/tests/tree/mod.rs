//! R-tree integration test module.
//!
//! These tests drive the index through its public API only and check
//! results against linear-scan references.

mod bulk_load_test;
mod churn_test;
mod randomized_test;
mod scenario_test;
