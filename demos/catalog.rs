//! Runs the walkthroughs of the [reactive_patterns] catalog, printing the lines each pattern produces.
//!
//! Examples:
//! ```nocompile
//!     cargo run --example catalog -- observer
//!     cargo run --example catalog -- all --config my_data.ron --verbose
//!     cargo run --example catalog -- --dump-config > my_data.ron
//! ```

use reactive_patterns::{
    catalog::{self, Pattern},
    config::CatalogConfig,
    PatternResult,
};
use std::path::PathBuf;
use structopt::StructOpt;
use strum::VariantNames;
use log::{LevelFilter, debug};


#[derive(Debug, StructOpt)]
#[structopt(name = "catalog", about = "Walkthroughs of classic design patterns, with configurable sample data")]
struct CommandLineOptions {

    /// Which walkthrough to run
    #[structopt(default_value = "all", possible_values = Pattern::VARIANTS)]
    pattern: Pattern,

    /// `.ron` file with the sample data to use instead of the built-in one
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Prints the effective sample data, as a `.ron` config file, instead of running any walkthrough
    #[structopt(long)]
    dump_config: bool,

    /// Also outputs DEBUG logs -- attaches, detaches & state changes
    #[structopt(short, long)]
    verbose: bool,
}


fn main() -> PatternResult<()> {
    let options = CommandLineOptions::from_args();

    simple_logger::SimpleLogger::new()
        .with_level(if options.verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .init()
        .unwrap_or_else(|_| eprintln!("--> LOGGER WAS ALREADY STARTED"));

    let config = match &options.config {
        Some(config_file) => CatalogConfig::load(config_file)?,
        None => CatalogConfig::default(),
    };
    debug!("Catalog: running '{}' with {:?}", options.pattern, config);

    if options.dump_config {
        println!("{}", config.to_ron_string()?);
        return Ok(())
    }

    for line in catalog::run(options.pattern, &config)? {
        println!("{}", line);
    }
    Ok(())
}
