//! Search step
//!
//! Sends the configured query to the search provider and reduces the
//! response to an ordered list of result URLs.

mod client;
mod models;

pub use client::{SearchProvider, TavilyClient};
pub use models::*;
