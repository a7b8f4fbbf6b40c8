use crate::models::Field;
use std::time::Duration;

pub const BASE_SCHEME: &str = "https";
pub const BASE_HOST: &str = "www.tibia.com";
pub const BASE_PATH: &str = "/charactertrade/";
pub const BASE_QUERY: &str = "subtopic=pastcharactertrades";

/// Query filters sent with every listing request, in URL order.
/// `filter_profession` 0 means every vocation.
pub const FILTER_PARAMS: &[(&str, &str)] = &[
    ("filter_profession", "0"),
    ("filter_levelrangefrom", "0"),
    ("filter_levelrangeto", "0"),
    ("filter_world", ""),
    ("filter_worldpvptype", "9"),
    ("filter_worldbattleyestate", "1"),
    ("filter_skillid", "1"),
    ("filter_skillrangefrom", "1"),
    ("filter_skillrangeto", "100"),
    ("order_column", "101"),
    ("order_direction", "1"),
];

pub const PAGE_PARAM: &str = "currentpage";

pub const START_PAGE: u32 = 1;
pub const END_PAGE: u32 = 50;
pub const OUTPUT_FILE: &str = "tibia_auction_data_final.csv";
pub const PAGE_DELAY: Duration = Duration::from_secs(1);

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Class of the layout containers; the auction table sits in the second one.
pub const CONTAINER_CLASS: &str = "InnerTableContainer";
pub const CONTAINER_INDEX: usize = 1;

/// Written in place of a field that could not be extracted.
pub const SENTINEL: &str = "N/A";

/// Pattern for one field of an auction row.
///
/// With an empty `stop_before`, capture group 1 of `pattern` is the value.
/// Otherwise `pattern` matches the label only and the value is everything up
/// to the first of the `stop_before` markers.
pub struct RuleSpec {
    pub field: Field,
    pub pattern: &'static str,
    pub stop_before: &'static [&'static str],
}

pub const EXTRACTION_RULES: [RuleSpec; 8] = [
    RuleSpec {
        field: Field::Level,
        pattern: r"Level:\s*(\d+)",
        stop_before: &[],
    },
    RuleSpec {
        field: Field::Vocation,
        pattern: r"Vocation:\s*(.+?)\s*\|",
        stop_before: &[],
    },
    RuleSpec {
        field: Field::World,
        pattern: r"World:\s*",
        stop_before: &["Auction Start:"],
    },
    RuleSpec {
        field: Field::MinimumBid,
        pattern: r"Minimum Bid:\s*([\d,]+)",
        stop_before: &[],
    },
    RuleSpec {
        field: Field::WinningBid,
        pattern: r"Winning Bid:\s*([\d,]+)",
        stop_before: &[],
    },
    RuleSpec {
        field: Field::MagicLevel,
        pattern: r"(\d+)\s*Magic Level",
        stop_before: &[],
    },
    RuleSpec {
        field: Field::AuctionStart,
        pattern: r"Auction Start:",
        stop_before: &["CEST", "Auction End:"],
    },
    // The bid label may be prefixed by a word such as "Winning".
    RuleSpec {
        field: Field::AuctionEnd,
        pattern: r"Auction End:",
        stop_before: &["CEST", r"(?:\w+\s*)?Minimum Bid:"],
    },
];
