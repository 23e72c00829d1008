use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

/// Initialise logging from `log4rs.yml`, or a plain console logger at `info`
/// when that file is missing or unusable.
pub fn init() {
    let path = Path::new(LOG_CONFIG_FILE);
    if path.exists() {
        match log4rs::init_file(path, Default::default()) {
            Ok(()) => return,
            Err(e) => eprintln!("Could not load {}: {}; logging to console", LOG_CONFIG_FILE, e),
        }
    }

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {m}{n}")))
        .build();

    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info));

    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Logger already initialised: {}", e);
            }
        }
        Err(e) => eprintln!("Invalid console logging config: {}", e),
    }
}
