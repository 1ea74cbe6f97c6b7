//! GitFolio Data Model
//!
//! Plain records describing a code-hosting profile as fetched from the remote API.

mod models;

pub use models::*;
