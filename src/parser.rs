use crate::config::{RuleSpec, EXTRACTION_RULES};
use crate::models::{AuctionRecord, Field};
use anyhow::{Context, Result};
use regex::Regex;
use scraper::{ElementRef, Selector};

/// Pulls one field out of the flattened text of an auction row.
pub struct ExtractionRule {
    field: Field,
    pattern: Regex,
    boundary: Option<Regex>,
}

impl ExtractionRule {
    /// Rule whose value is capture group 1 of `pattern`.
    pub fn captured(field: Field, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid pattern for {}", field))?;
        Ok(Self {
            field,
            pattern,
            boundary: None,
        })
    }

    /// Rule whose value starts after `label` and stops right before the
    /// first of `stop_before`. A label with no boundary after it is a miss.
    pub fn bounded(field: Field, label: &str, stop_before: &[&str]) -> Result<Self> {
        let pattern = Regex::new(label)
            .with_context(|| format!("Invalid label pattern for {}", field))?;
        let alternatives = stop_before
            .iter()
            .map(|marker| format!("(?:{})", marker))
            .collect::<Vec<_>>()
            .join("|");
        let boundary = Regex::new(&alternatives)
            .with_context(|| format!("Invalid boundary markers for {}", field))?;
        Ok(Self {
            field,
            pattern,
            boundary: Some(boundary),
        })
    }

    pub fn from_spec(spec: &RuleSpec) -> Result<Self> {
        if spec.stop_before.is_empty() {
            Self::captured(spec.field, spec.pattern)
        } else {
            Self::bounded(spec.field, spec.pattern, spec.stop_before)
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn apply(&self, text: &str) -> Option<String> {
        let raw = match &self.boundary {
            None => self.pattern.captures(text)?.get(1)?.as_str(),
            Some(boundary) => self.pattern.find_iter(text).find_map(|label| {
                let rest = &text[label.end()..];
                boundary.find(rest).map(|stop| &rest[..stop.start()])
            })?,
        };

        let value = raw.trim();
        if self.field.is_date() {
            calendar_date(value)
        } else {
            Some(value.to_string())
        }
    }
}

/// Keeps month, day and year of a timestamp like
/// "January 5, 2024, 10:00:00" and drops the commas.
pub fn calendar_date(text: &str) -> Option<String> {
    let parts: Vec<&str> = text.split_whitespace().take(3).collect();
    if parts.len() < 3 {
        return None;
    }
    Some(parts.join(" ").replace(',', ""))
}

pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turns table rows into auction records.
pub struct RowExtractor {
    rules: Vec<ExtractionRule>,
    cell_selector: Selector,
}

impl RowExtractor {
    pub fn new() -> Result<Self> {
        let rules = EXTRACTION_RULES
            .iter()
            .map(ExtractionRule::from_spec)
            .collect::<Result<Vec<_>>>()?;
        Self::with_rules(rules)
    }

    pub fn with_rules(rules: Vec<ExtractionRule>) -> Result<Self> {
        let cell_selector = Selector::parse("th, td")
            .map_err(|e| anyhow::anyhow!("Failed to parse cell selector: {:?}", e))?;
        Ok(Self {
            rules,
            cell_selector,
        })
    }

    /// Text of every cell in the row, in order, on a single line.
    pub fn row_text(&self, row: ElementRef) -> String {
        let joined = row
            .select(&self.cell_selector)
            .map(|cell| {
                cell.text()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join(" ");
        normalize_whitespace(&joined)
    }

    pub fn extract_row(&self, row: ElementRef) -> AuctionRecord {
        self.extract_text(&self.row_text(row))
    }

    pub fn extract_text(&self, text: &str) -> AuctionRecord {
        let mut record = AuctionRecord::default();
        for rule in &self.rules {
            record.set(rule.field(), rule.apply(text));
        }
        record
    }
}
