use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use super::element_text;
use super::sections::{self, Section};
use crate::store::ConditionRecord;
use crate::text::normalize;

static MAIN_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.main").unwrap());
static HEADER_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("header").unwrap());
static H1_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static CONTENT_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.content").unwrap());
static H2_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoMainContainer,
    NoContentContainer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Record(ConditionRecord),
    Skip(SkipReason),
}

/// Pull title and known body sections out of a condition page.
///
/// The page needs both `div.main` (title lives in its `header h1`) and
/// `div.content` (body sections). A missing title is not a skip.
pub fn extract_condition(document: &Html) -> Extraction {
    let Some(main) = document.select(&MAIN_SEL).next() else {
        warn!("page has no main container");
        return Extraction::Skip(SkipReason::NoMainContainer);
    };

    let title = main
        .select(&HEADER_SEL)
        .next()
        .and_then(|header| header.select(&H1_SEL).next())
        .map(element_text)
        .unwrap_or_default();

    let Some(content) = document.select(&CONTENT_SEL).next() else {
        warn!(title = %title, "page has no content container");
        return Extraction::Skip(SkipReason::NoContentContainer);
    };

    let text = sections::assign(&collect_sections(content));

    Extraction::Record(ConditionRecord {
        title: normalize(&title),
        overview: normalize(&text.overview),
        symptoms: normalize(&text.symptoms),
        risk_factors: normalize(&text.risk_factors),
    })
}

/// Every `h2` under `content`, in document order, with its sibling run.
pub fn collect_sections(content: ElementRef<'_>) -> Vec<Section> {
    content
        .select(&H2_SEL)
        .map(|heading| Section {
            heading: element_text(heading),
            paragraphs: sibling_run(heading).map(element_text).collect(),
        })
        .collect()
}

fn sibling_run(heading: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| !matches!(el.value().name(), "h2" | "h3"))
}

// ── Tests ──
