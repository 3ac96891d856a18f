//! Access-control and integrity rules applied before any store mutation.
//!
//! - `access`: who may view and who may change a survey.
//! - `answers`: whether a submitted response fits the survey it targets.

pub mod access;
pub mod answers;
