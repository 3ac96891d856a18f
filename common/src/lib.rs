//! Data types shared between the survey backend and its clients.
//!
//! - `model`: the persisted documents (surveys, responses) and paging envelopes.
//! - `requests`: the bodies and query strings accepted by the HTTP API.

pub mod model;
pub mod requests;
