use crate::config::{END_PAGE, OUTPUT_FILE, PAGE_DELAY, START_PAGE};
use crate::locator::{DataRegionLocator, NthContainer, Region};
use crate::models::{AuctionRecord, RecordSet};
use crate::parser::RowExtractor;
use crate::scraper::{AuctionQuery, PageSource};
use crate::utils;
use crate::verbose_println;
use anyhow::Result;
use scraper::{Html, Selector};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ScrapingOptions {
    pub query: AuctionQuery,
    pub start_page: u32,
    pub end_page: u32,
    pub output_file: String,
    /// Pause after every processed page.
    pub delay: Duration,
}

impl Default for ScrapingOptions {
    fn default() -> Self {
        Self {
            query: AuctionQuery::default(),
            start_page: START_PAGE,
            end_page: END_PAGE,
            output_file: OUTPUT_FILE.to_string(),
            delay: PAGE_DELAY,
        }
    }
}

/// Why pagination ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    RangeExhausted,
    EmptyPage { page: u32 },
    MissingRegion { page: u32 },
    FetchFailed { page: u32 },
}

pub struct ScrapingResult {
    pub records: RecordSet,
    /// Every `<tr>` seen inside the data regions, kept or not.
    pub rows_seen: usize,
    pub last_page: Option<u32>,
    pub stop: StopReason,
}

/// What a single listing page contributed.
pub enum PageScan {
    Rows {
        rows_seen: usize,
        records: Vec<AuctionRecord>,
    },
    Missing(String),
}

pub fn scan_page(body: &str, locator: &dyn DataRegionLocator, extractor: &RowExtractor) -> Result<PageScan> {
    let document = Html::parse_document(body);
    let region = match locator.locate(&document) {
        Region::Found(region) => region,
        Region::Missing(notice) => return Ok(PageScan::Missing(notice)),
    };

    let row_selector = Selector::parse("tr")
        .map_err(|e| anyhow::anyhow!("Failed to parse row selector: {:?}", e))?;

    let mut rows_seen = 0;
    let mut records = Vec::new();
    for row in region.select(&row_selector) {
        rows_seen += 1;
        let record = extractor.extract_row(row);
        if record.is_meaningful() {
            records.push(record);
        } else if !record.is_empty() {
            verbose_println!("Skipping row without level or bid: {:?}", record);
        }
    }

    Ok(PageScan::Rows { rows_seen, records })
}

pub fn run_scraper_with_options<S: PageSource>(
    source: &S,
    options: &ScrapingOptions,
) -> Result<ScrapingResult> {
    let locator = NthContainer::auction_table()?;
    run_scraper_with_locator(source, &locator, options)
}

pub fn run_scraper_with_locator<S: PageSource>(
    source: &S,
    locator: &dyn DataRegionLocator,
    options: &ScrapingOptions,
) -> Result<ScrapingResult> {
    let extractor = RowExtractor::new()?;

    let mut result = ScrapingResult {
        records: RecordSet::new(),
        rows_seen: 0,
        last_page: None,
        stop: StopReason::RangeExhausted,
    };

    for page in options.start_page..=options.end_page {
        result.last_page = Some(page);
        println!("Scraping page {}...", page);

        let url = options.query.page_url(page);
        let body = match source.fetch_page(&url) {
            Ok(Some(body)) => body,
            Ok(None) => {
                println!("Page {} returned empty content. Stopping.", page);
                result.stop = StopReason::EmptyPage { page };
                break;
            }
            Err(e) => {
                eprintln!("Error fetching page {}: {:#}. Stopping pagination.", page, e);
                result.stop = StopReason::FetchFailed { page };
                break;
            }
        };

        match scan_page(&body, locator, &extractor)? {
            PageScan::Rows { rows_seen, records } => {
                verbose_println!(
                    "Page {}: {} rows, {} with auction data",
                    page,
                    rows_seen,
                    records.len()
                );
                result.rows_seen += rows_seen;
                result.records.extend(records);
            }
            PageScan::Missing(notice) => {
                println!("{} on page {}. Stopping.", notice, page);
                result.stop = StopReason::MissingRegion { page };
                break;
            }
        }

        if !options.delay.is_zero() {
            std::thread::sleep(options.delay);
        }
    }

    Ok(result)
}

/// Writes the collected records and prints the closing report.
///
/// Returns `None` without touching the output file when no row qualified.
pub fn export_results(options: &ScrapingOptions, result: &ScrapingResult) -> Result<Option<usize>> {
    verbose_println!("Pagination ended: {:?}", result.stop);

    if result.records.is_empty() {
        println!("Nenhuma linha de dados significativa foi extraída para escrita.");
        return Ok(None);
    }

    let written = utils::save_records_to_csv(&result.records, &options.output_file)?;
    print!("{}", Summary::new(options, result, written));
    Ok(Some(written))
}

/// Closing report printed after the CSV was written.
pub struct Summary<'a> {
    pub start_page: u32,
    pub last_page: u32,
    pub rows_seen: usize,
    pub rows_written: usize,
    pub output_file: &'a str,
}

impl<'a> Summary<'a> {
    pub fn new(options: &'a ScrapingOptions, result: &ScrapingResult, rows_written: usize) -> Self {
        Self {
            start_page: options.start_page,
            last_page: result.last_page.unwrap_or(options.start_page),
            rows_seen: result.rows_seen,
            rows_written,
            output_file: &options.output_file,
        }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(40);
        writeln!(f, "{}", rule)?;
        writeln!(f, "✅ **PAGINATED SCRAPING COMPLETE.**")?;
        writeln!(f, "   Páginas raspadas: {} a {}.", self.start_page, self.last_page)?;
        writeln!(f, "   Total de linhas <tr> encontradas: {}", self.rows_seen)?;
        writeln!(f, "   Linhas únicas escritas no CSV: {}", self.rows_written)?;
        writeln!(f, "   Arquivo de Saída: {}", self.output_file)?;
        writeln!(f, "{}", rule)
    }
}
