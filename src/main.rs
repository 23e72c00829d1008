use bilibili_rank_spider::browser::BrowserSession;
use bilibili_rank_spider::config::{Config, DEFAULT_CONFIG_FILE};
use bilibili_rank_spider::export::SaveOutcome;
use bilibili_rank_spider::models::CATEGORIES;
use bilibili_rank_spider::spider::{self, PROMPT};
use bilibili_rank_spider::{logging, SpiderError};
use clap::Parser;
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Scrape the Bilibili popular ranking pages into an xlsx workbook
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Skip the prompt: 0 = video, 1 = film, 2 = all, 3 = quit
    #[arg(short, long)]
    choice: Option<String>,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory for the output workbook (overrides the config file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Show the browser window, with images
    #[arg(long)]
    headed: bool,

    /// Print the category registry and exit
    #[arg(long)]
    list_categories: bool,
}

fn prompt_choice() -> io::Result<String> {
    print!("{}", PROMPT);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list_categories {
        for c in CATEGORIES {
            println!("{},{},{}", c.key, c.name, c.group);
        }
        return ExitCode::SUCCESS;
    }

    logging::init();

    let mut cfg = Config::load_from(&cli.config);
    if let Some(dir) = cli.output_dir {
        cfg.output.dir = dir;
    }
    if cli.headed {
        cfg.browser.debug_mode();
    }

    let input = match cli.choice {
        Some(choice) => choice,
        None => match prompt_choice() {
            Ok(line) => line,
            Err(e) => {
                error!("Could not read selection: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    match spider::run_choice(&cfg, &input, BrowserSession::open) {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(summary)) => {
            let total: usize = summary.fetched.iter().map(|(_, n)| n).sum();
            match summary.outcome {
                SaveOutcome::Saved(path) => {
                    info!("{} rows from {} categories -> {}", total, summary.fetched.len(), path.display())
                }
                SaveOutcome::NoData => info!("{} categories fetched, none had rows", summary.fetched.len()),
            }
            ExitCode::SUCCESS
        }
        Err(SpiderError::InvalidSelection(input)) => {
            error!("Invalid type: {:?}", input);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Err: {}", e);
            ExitCode::FAILURE
        }
    }
}
