use data_extract::cli::{handle_extract, CliArgs};
use data_extract::util::logging::{config_from_env, init_logging, parse_level};
use data_extract::VERSION;

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("data-extract v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    std::process::exit(handle_extract(&args));
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config = config_from_env();

    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }

    init_logging(config);
}
