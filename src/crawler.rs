use std::ops::ControlFlow;

use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;
use thiserror::Error;
use tracing::{info, warn};

use crate::fetcher::{fetch_page, Fetch, FetchError};
use crate::parser::condition::{extract_condition, Extraction};
use crate::parser::links::{condition_links, letter_links, LinkRef};
use crate::parser::ParseError;
use crate::settings::Settings;
use crate::store::{ResultCollection, StoreError};

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("index page {url} returned HTTP {status}")]
    Index { url: String, status: u16 },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("unexpected page structure at {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: ParseError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Counters for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    pub letters: usize,
    pub letters_skipped: usize,
    pub conditions: usize,
    pub conditions_skipped: usize,
    pub missing_structure: usize,
    pub records: usize,
}

/// Index → letter pages → condition pages, one request at a time.
///
/// The output file is rewritten with the whole collection after every record,
/// so an aborted run keeps everything extracted before the failure.
pub struct Crawler<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    settings: &'a Settings,
    results: ResultCollection,
    stats: CrawlStats,
}

impl<'a, F: Fetch + ?Sized> Crawler<'a, F> {
    pub fn new(fetcher: &'a F, settings: &'a Settings) -> Self {
        Crawler {
            fetcher,
            settings,
            results: ResultCollection::new(),
            stats: CrawlStats::default(),
        }
    }

    pub fn results(&self) -> &ResultCollection {
        &self.results
    }

    pub fn run(&mut self) -> Result<CrawlStats, CrawlError> {
        let letters = self.index()?;
        info!("Found {} letter pages", letters.len());

        for letter in &letters {
            if self.limit_reached() || self.letter(letter)?.is_break() {
                info!("Condition page limit reached");
                break;
            }
        }

        if self.results.is_empty() {
            warn!("No condition pages produced a record");
        }
        info!(
            records = self.stats.records,
            skipped = self.stats.conditions_skipped + self.stats.missing_structure,
            "Crawl finished"
        );
        Ok(self.stats.clone())
    }

    /// Single attempt; any failure here ends the run.
    fn index(&self) -> Result<Vec<LinkRef>, CrawlError> {
        let url = self.settings.index_url();
        info!("Fetching index: {}", url);
        let response = self.fetcher.get(&url)?;
        if !response.is_ok() {
            return Err(CrawlError::Index {
                url,
                status: response.status,
            });
        }
        let document = Html::parse_document(&response.body);
        letter_links(&document, &self.settings.base_url)
            .map_err(|source| CrawlError::Parse { url, source })
    }

    fn letter(&mut self, letter: &LinkRef) -> Result<ControlFlow<()>, CrawlError> {
        self.stats.letters += 1;
        let Some(body) = fetch_page(self.fetcher, &letter.url)? else {
            warn!(letter = %letter.category, "skipping letter page {}", letter.url);
            self.stats.letters_skipped += 1;
            return Ok(ControlFlow::Continue(()));
        };

        let conditions = {
            let document = Html::parse_document(&body);
            condition_links(&document, &letter.category).map_err(|source| CrawlError::Parse {
                url: letter.url.clone(),
                source,
            })?
        };
        info!(letter = %letter.category, "Found {} condition pages", conditions.len());

        let pb = ProgressBar::new(conditions.len() as u64);
        pb.set_style(progress_style());
        pb.set_message(letter.category.clone());

        for condition in &conditions {
            if self.limit_reached() {
                pb.finish_and_clear();
                return Ok(ControlFlow::Break(()));
            }
            self.condition(condition)?;
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(ControlFlow::Continue(()))
    }

    fn condition(&mut self, link: &LinkRef) -> Result<(), CrawlError> {
        self.stats.conditions += 1;
        let Some(body) = fetch_page(self.fetcher, &link.url)? else {
            self.stats.conditions_skipped += 1;
            return Ok(());
        };

        let extraction = extract_condition(&Html::parse_document(&body));
        let record = match extraction {
            Extraction::Record(record) => record,
            Extraction::Skip(reason) => {
                warn!(url = %link.url, ?reason, "skipping condition page");
                self.stats.missing_structure += 1;
                return Ok(());
            }
        };

        info!(letter = %link.category, "Extracted: {}", record.title);
        self.results.push(record);
        self.results
            .save(&self.settings.output, self.settings.layout)?;
        self.stats.records = self.results.len();
        Ok(())
    }

    fn limit_reached(&self) -> bool {
        self.settings
            .limit
            .is_some_and(|limit| self.stats.conditions >= limit)
    }
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{elapsed_precise}] {bar:40} {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

// ── Tests ──
