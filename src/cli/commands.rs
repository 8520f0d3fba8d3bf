use clap::{Parser, ValueEnum};

/// Extract data from JSON and XML files
#[derive(Parser, Debug)]
#[command(
    name = "data-extract",
    about = "Extract data from JSON and XML files",
    version,
    long_about = "data-extract selects a parser from each path's suffix (json or xml), \
                  parses the whole file and prints the resulting document. Paths with \
                  any other suffix are reported and skipped.\n\n\
                  Examples:\n  \
                  data-extract data/movies.json\n  \
                  data-extract data/person.xml --query './/person[lastName=\"Liar\"]'\n  \
                  data-extract data/movies.json --json-pointer /0/title\n  \
                  data-extract --format json data/movies.json data/person.xml"
)]
pub struct CliArgs {
    #[arg(value_name = "PATH", required = true, help = "Files to extract")]
    pub paths: Vec<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_name = "PATH",
        help = "Print only XML elements matching this element path"
    )]
    pub query: Option<String>,

    #[arg(
        long,
        value_name = "POINTER",
        help = "Print only the JSON value at this pointer (e.g. /0/title)"
    )]
    pub json_pointer: Option<String>,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
