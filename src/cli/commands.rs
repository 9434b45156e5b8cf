use std::path::PathBuf;

use clap::Parser;

use crate::sink::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "treescan",
    version,
    about = "Record every file and folder under a directory into a hierarchical catalog",
    after_help = "The catalog is a SQLite database (default: .treescan/catalog.db in the current \
                  directory; override with --db or TREESCAN_DB). Each run appends a fresh set of \
                  rows to table file_system_entry. The .treescan directory and the catalog \
                  files are never recorded themselves. Use --print to list entries instead of storing them."
)]
pub struct Cli {
    /// Root directory to scan. The root itself is not recorded.
    pub path: PathBuf,

    /// Print one line per entry to stdout instead of writing the catalog
    #[arg(long)]
    pub print: bool,

    /// Line format for --print (default from config, else text)
    #[arg(long, value_enum, requires = "print")]
    pub format: Option<OutputFormat>,

    /// Catalog database file
    #[arg(long, value_name = "FILE", conflicts_with = "print")]
    pub db: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn single_positional_path() {
        let cli = Cli::try_parse_from(["treescan", "/data"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("/data"));
        assert!(!cli.print);
        assert!(cli.format.is_none());
        assert!(cli.db.is_none());
    }

    #[test]
    fn path_is_required() {
        assert!(Cli::try_parse_from(["treescan"]).is_err());
    }

    #[test]
    fn print_with_format() {
        let cli = Cli::try_parse_from(["treescan", "--print", "--format", "jsonl", "."]).unwrap();
        assert!(cli.print);
        assert_eq!(cli.format, Some(OutputFormat::Jsonl));
    }

    #[test]
    fn format_requires_print() {
        assert!(Cli::try_parse_from(["treescan", "--format", "text", "."]).is_err());
    }

    #[test]
    fn db_conflicts_with_print() {
        assert!(Cli::try_parse_from(["treescan", "--print", "--db", "x.db", "."]).is_err());
    }
}
