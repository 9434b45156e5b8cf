use clap::Parser;

use treescan::cli::commands::Cli;
use treescan::cli::output::{self, ScanSummary};
use treescan::config::{Config, DB_ENV_VAR};
use treescan::db::Database;
use treescan::error::{Result, ScanError};
use treescan::scanner::Scanner;
use treescan::sink::ConsoleSink;

fn main() {
    // Logs go to stderr; stdout carries entry lines and the JSON summary.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cwd()?;
    let scanner = Scanner::new(&cli.path).with_symlinks(config.settings.scan.symlinks);

    if cli.print {
        cmd_print(&cli, &config, scanner)
    } else {
        cmd_store(&cli, &config, scanner)
    }
}

fn cmd_print(cli: &Cli, config: &Config, scanner: Scanner) -> Result<()> {
    let scanner = scanner.with_excluded(config.own_files(None));
    let format = cli.format.unwrap_or(config.settings.output.format);
    let stdout = std::io::stdout().lock();
    let mut sink = ConsoleSink::new(std::io::BufWriter::new(stdout), format);
    scanner.scan(&mut sink)?;
    sink.into_inner()?;
    Ok(())
}

fn cmd_store(cli: &Cli, config: &Config, scanner: Scanner) -> Result<()> {
    let db_path = config.database_path(cli.db.as_deref(), std::env::var_os(DB_ENV_VAR));
    let scanner = scanner.with_excluded(config.own_files(Some(&db_path)));
    if db_path == config.default_db_path {
        config.ensure_state_dir()?;
    }

    let mut db = Database::open(&db_path)?;
    let stats = scanner.scan(&mut db)?;

    let root = std::path::absolute(scanner.root()).map_err(|e| ScanError::access(scanner.root(), e))?;
    let summary = ScanSummary::new(&root, &db_path, stats);
    println!("{}", output::format_json(&summary));
    Ok(())
}
