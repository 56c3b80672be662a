//! HTTP networking module
//!
//! Provides the JSON-over-HTTP client shared by the search and email steps.

mod client;

pub use client::{HttpClient, HttpResponse};
