use reqwest::{Client, ClientBuilder};
use scraper::{Html, Node, Selector};
use ego_tree::NodeRef;
use std::time::Duration;
use once_cell::sync::Lazy;
use crate::error::Result;

/// Browser-like identification; some sites reject requests without it.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Tags whose content carries no human-readable page text.
const STRIP_TAGS: &[&str] = &["script", "style", "meta", "link", "header", "footer", "nav"];

const NO_TITLE_PLACEHOLDER: &str = "No title found";

// Create a static selector to avoid recompiling it each time
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

/// Title and visible text of a fetched document.
#[derive(Debug)]
pub struct Page {
    pub title: String,
    pub text: String,
}

/// Fetches pages and reduces them to plain text. Holds only a preconfigured
/// client; no state survives between calls.
pub struct WebScraper {
    client: Client,
}

impl WebScraper {
    pub fn new() -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        WebScraper { client }
    }

    /// Single GET, no retry. Any transport failure or non-success status is a
    /// `FetchError` attributed to the target site.
    pub async fn fetch(&self, url: &str) -> Result<Page> {
        tracing::info!("Fetching HTML for URL: {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;

        let page = extract_page(&html);
        tracing::info!("Extracted {} chars of text", page.text.len());
        Ok(page)
    }
}

impl Default for WebScraper {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses the markup and returns the document title plus all visible text
/// nodes in document order, trimmed and joined by single spaces. Content
/// inside the stripped tags is discarded entirely.
pub fn extract_page(html: &str) -> Page {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE_PLACEHOLDER.to_string());

    let mut parts = Vec::new();
    collect_text(document.tree.root(), &mut parts);

    Page {
        title,
        text: parts.join(" "),
    }
}

fn collect_text(node: NodeRef<'_, Node>, parts: &mut Vec<String>) {
    match node.value() {
        Node::Element(el) if STRIP_TAGS.contains(&el.name()) => return,
        Node::Text(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
        _ => {}
    }

    for child in node.children() {
        collect_text(child, parts);
    }
}
