use anyhow::Result;
use auctionfinder::common_scraper::{export_results, run_scraper_with_options, ScrapingOptions};
use auctionfinder::config::{END_PAGE, OUTPUT_FILE, PAGE_DELAY, START_PAGE};
use auctionfinder::scraper::HttpPageSource;
use auctionfinder::verbose;
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Auctionfinder - Past character auction scraper")]
struct Args {
    /// Path to output CSV file
    #[arg(short, long, default_value = OUTPUT_FILE)]
    output: String,

    /// First listing page to scrape
    #[arg(long, default_value_t = START_PAGE, value_parser = clap::value_parser!(u32).range(1..))]
    start_page: u32,

    /// Last listing page to scrape
    #[arg(long, default_value_t = END_PAGE, value_parser = clap::value_parser!(u32).range(1..))]
    end_page: u32,

    /// Seconds to wait between pages
    #[arg(long, default_value_t = PAGE_DELAY.as_secs())]
    delay_secs: u64,

    /// Print request URLs and per-row details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    verbose::set_verbose(args.verbose);

    let options = ScrapingOptions {
        start_page: args.start_page,
        end_page: args.end_page,
        output_file: args.output,
        delay: Duration::from_secs(args.delay_secs),
        ..Default::default()
    };

    let source = HttpPageSource::new()?;
    let result = run_scraper_with_options(&source, &options)?;

    if let Err(e) = export_results(&options, &result) {
        eprintln!("Erro ao escrever no arquivo {}: {:#}", options.output_file, e);
    }

    Ok(())
}
