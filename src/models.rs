use crate::config::SENTINEL;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// One column of the auction export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Level,
    Vocation,
    World,
    MinimumBid,
    WinningBid,
    MagicLevel,
    AuctionStart,
    AuctionEnd,
}

impl Field {
    /// All fields in CSV column order.
    pub const ALL: [Field; 8] = [
        Field::Level,
        Field::Vocation,
        Field::World,
        Field::MinimumBid,
        Field::WinningBid,
        Field::MagicLevel,
        Field::AuctionStart,
        Field::AuctionEnd,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Field::Level => "Level",
            Field::Vocation => "Vocation",
            Field::World => "World",
            Field::MinimumBid => "Minimum Bid",
            Field::WinningBid => "Winning Bid",
            Field::MagicLevel => "Magic Level",
            Field::AuctionStart => "Auction Start Date",
            Field::AuctionEnd => "Auction End Date",
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Field::AuctionStart | Field::AuctionEnd)
    }

    pub fn headers() -> [&'static str; 8] {
        Field::ALL.map(|field| field.header())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// A single past auction as read from one table row.
///
/// Fields the row did not contain are `None`; they only turn into the
/// sentinel string when the record is written out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct AuctionRecord {
    #[serde(serialize_with = "or_sentinel")]
    pub level: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub vocation: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub world: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub minimum_bid: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub winning_bid: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub magic_level: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub auction_start: Option<String>,
    #[serde(serialize_with = "or_sentinel")]
    pub auction_end: Option<String>,
}

impl AuctionRecord {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// Header rows and decorative rows carry neither a level nor a bid.
    pub fn is_meaningful(&self) -> bool {
        self.level.is_some() || self.minimum_bid.is_some()
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_none())
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Level => &self.level,
            Field::Vocation => &self.vocation,
            Field::World => &self.world,
            Field::MinimumBid => &self.minimum_bid,
            Field::WinningBid => &self.winning_bid,
            Field::MagicLevel => &self.magic_level,
            Field::AuctionStart => &self.auction_start,
            Field::AuctionEnd => &self.auction_end,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Level => &mut self.level,
            Field::Vocation => &mut self.vocation,
            Field::World => &mut self.world,
            Field::MinimumBid => &mut self.minimum_bid,
            Field::WinningBid => &mut self.winning_bid,
            Field::MagicLevel => &mut self.magic_level,
            Field::AuctionStart => &mut self.auction_start,
            Field::AuctionEnd => &mut self.auction_end,
        }
    }
}

fn or_sentinel<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or(SENTINEL))
}

/// Unique records across all pages. Two records are the same auction only
/// when every field matches.
pub type RecordSet = HashSet<AuctionRecord>;
