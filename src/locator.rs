use crate::config::{CONTAINER_CLASS, CONTAINER_INDEX};
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};

/// Outcome of looking for the data table on a listing page.
pub enum Region<'a> {
    Found(ElementRef<'a>),
    /// Nothing usable on the page; carries a notice for the console.
    Missing(String),
}

/// Finds the part of a listing page that holds the auction rows.
pub trait DataRegionLocator {
    fn locate<'a>(&self, document: &'a Html) -> Region<'a>;
}

/// Picks the n-th element carrying a given class, in document order.
pub struct NthContainer {
    class_name: String,
    index: usize,
    selector: Selector,
}

impl NthContainer {
    pub fn new(class_name: &str, index: usize) -> Result<Self> {
        let selector = Selector::parse(&format!("div.{}", class_name))
            .map_err(|e| anyhow::anyhow!("Failed to parse container selector: {:?}", e))?;
        Ok(Self {
            class_name: class_name.to_string(),
            index,
            selector,
        })
    }

    /// The auction table is the second `InnerTableContainer`; the first
    /// one holds the search form.
    pub fn auction_table() -> Result<Self> {
        Self::new(CONTAINER_CLASS, CONTAINER_INDEX)
    }
}

impl DataRegionLocator for NthContainer {
    fn locate<'a>(&self, document: &'a Html) -> Region<'a> {
        match document.select(&self.selector).nth(self.index) {
            Some(container) => Region::Found(container),
            None => Region::Missing(format!(
                "Fewer than {} {} divs found",
                count_word(self.index + 1),
                self.class_name
            )),
        }
    }
}

fn count_word(n: usize) -> String {
    match n {
        1 => "one".to_string(),
        2 => "two".to_string(),
        3 => "three".to_string(),
        _ => n.to_string(),
    }
}
