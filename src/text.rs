use std::sync::LazyLock;

use regex::Regex;

static LINE_BREAKS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n\t]+").unwrap());
static MULTI_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());
static ENLARGE_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Enlarge image.*?Close").unwrap());
static PRODUCTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Products & Services.*$").unwrap());

/// Clean scraped text: one space between words, no edge commas, and no
/// image-caption or product boilerplate.
///
/// Noise removal runs until no marker is left and whitespace is collapsed again
/// afterwards, so `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = collapse_ws(text);
    loop {
        let stripped = {
            let no_images = ENLARGE_IMAGE_RE.replace_all(&out, "");
            let no_products = PRODUCTS_RE.replace(&no_images, "");
            collapse_ws(&no_products)
        };
        if stripped == out {
            break;
        }
        out = stripped;
    }

    out.trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

fn collapse_ws(text: &str) -> String {
    let spaced = LINE_BREAKS_RE.replace_all(text, " ");
    let collapsed = MULTI_SPACE_RE.replace_all(&spaced, " ");
    collapsed.into_owned()
}

// ── Tests ──
