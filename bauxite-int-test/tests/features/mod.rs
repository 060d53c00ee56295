//! Feature extraction integration test module.
//!
//! These tests run image features end to end into the index.

mod retrieval_test;
