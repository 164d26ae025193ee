pub mod condition;
pub mod links;
pub mod sections;

use scraper::ElementRef;
use thiserror::Error;

/// Page shape the crawl cannot continue past.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing {0}")]
    MissingElement(&'static str),
    #[error("anchor without href in {0}")]
    MissingHref(&'static str),
}

/// Concatenated text of an element and its descendants, trimmed.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
