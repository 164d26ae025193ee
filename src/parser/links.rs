use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{element_text, ParseError};

static ALPHABET_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.cmp-alphabet-facet--inner").unwrap());
static LETTER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.cmp-alphabet-facet--letter").unwrap());
static RESULTS_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.cmp-azresults.cmp-azresults-from-model").unwrap());
static UL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul").unwrap());
static LI_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());
static A_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// A page to visit next and the index letter it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub url: String,
    pub category: String,
}

/// Letter-page links from the index. Hrefs are site-relative and get
/// `base_url` prepended as-is.
pub fn letter_links(document: &Html, base_url: &str) -> Result<Vec<LinkRef>, ParseError> {
    let list = document
        .select(&ALPHABET_SEL)
        .next()
        .ok_or(ParseError::MissingElement("alphabet list"))?;

    let mut links = Vec::new();
    for item in list.select(&LETTER_SEL) {
        let Some(anchor) = first_anchor(item) else {
            continue;
        };
        let href = href_of(anchor, "alphabet list")?;
        links.push(LinkRef {
            url: format!("{}{}", base_url, href),
            category: element_text(anchor),
        });
    }
    Ok(links)
}

/// Condition-page links from a letter page, used as-is.
///
/// Every `ul` under the results container is walked with all of its `li`
/// descendants, so items in nested lists come back once per enclosing list.
pub fn condition_links(document: &Html, category: &str) -> Result<Vec<LinkRef>, ParseError> {
    let results = document
        .select(&RESULTS_SEL)
        .next()
        .ok_or(ParseError::MissingElement("results container"))?;

    let mut links = Vec::new();
    for list in results.select(&UL_SEL) {
        for item in list.select(&LI_SEL) {
            let Some(anchor) = first_anchor(item) else {
                continue;
            };
            links.push(LinkRef {
                url: href_of(anchor, "results list")?.to_string(),
                category: category.to_string(),
            });
        }
    }
    Ok(links)
}

fn first_anchor(item: ElementRef<'_>) -> Option<ElementRef<'_>> {
    item.select(&A_SEL).next()
}

fn href_of<'a>(anchor: ElementRef<'a>, context: &'static str) -> Result<&'a str, ParseError> {
    anchor
        .value()
        .attr("href")
        .ok_or(ParseError::MissingHref(context))
}

// ── Tests ──
