//! Property-based tests for risk scoring.
