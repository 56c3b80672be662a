//! Digest body rendering with Tera

use crate::search::SearchResultSet;
use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "digest.html";

/// Values available to the digest template
#[derive(Debug, Serialize)]
struct DigestContext<'a> {
    query: &'a str,
    count: usize,
    urls: &'a [String],
    answer: Option<&'a str>,
}

/// Renders the HTML body of the digest email
pub struct DigestTemplate {
    tera: Tera,
}

impl DigestTemplate {
    /// Create a renderer. With `escape_html` off the query and URLs are
    /// inserted verbatim.
    pub fn new(escape_html: bool) -> Result<Self> {
        let mut tera = Tera::default();
        if escape_html {
            tera.autoescape_on(vec![".html"]);
        } else {
            tera.autoescape_on(vec![]);
        }
        tera.add_raw_template(TEMPLATE_NAME, include_str!("../../templates/digest.html"))?;

        Ok(Self { tera })
    }

    /// Render the digest for a query and its results
    pub fn render(&self, query: &str, results: &SearchResultSet) -> Result<String> {
        let ctx = Context::from_serialize(DigestContext {
            query,
            count: results.len(),
            urls: &results.urls,
            answer: results.answer.as_deref(),
        })?;
        Ok(self.tera.render(TEMPLATE_NAME, &ctx)?)
    }
}
