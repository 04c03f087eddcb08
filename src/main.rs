use anyhow::{bail, Result};
use std::path::PathBuf;

use socialens::catalog::{Report, ReportKind};
use socialens::config::Config;
use socialens::db::Database;
use socialens::render::{self, ExportFormat};

struct CliArgs {
    config_path: Option<PathBuf>,
    format: Option<String>,
    output: Option<PathBuf>,
    show_sql: bool,
    limit: Option<usize>,
    command: Vec<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = CliArgs {
        config_path: None,
        format: None,
        output: None,
        show_sql: false,
        limit: None,
        command: Vec::new(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("socialens {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    parsed.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--format" | "-f" => {
                if i + 1 < args.len() {
                    parsed.format = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Error: --format requires an argument");
                    std::process::exit(1);
                }
            }
            "--output" | "-o" => {
                if i + 1 < args.len() {
                    parsed.output = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Error: --output requires a path argument");
                    std::process::exit(1);
                }
            }
            "--limit" | "-n" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse() {
                        Ok(n) => parsed.limit = Some(n),
                        Err(_) => {
                            eprintln!("Error: --limit requires a number");
                            std::process::exit(1);
                        }
                    }
                    i += 1;
                } else {
                    eprintln!("Error: --limit requires a number");
                    std::process::exit(1);
                }
            }
            "--sql" => {
                parsed.show_sql = true;
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
            _ => {
                parsed.command.push(args[i].clone());
            }
        }
        i += 1;
    }

    parsed
}

fn print_help() {
    println!(
        r#"socialens - analytical report explorer for a photo-sharing network database

USAGE:
    socialens [OPTIONS] <COMMAND>

COMMANDS:
    reports             List the report catalog
    run <KEY>           Run a catalog report by key
    raw <SQL>           Run a free-text SQL statement
    tables              List database tables
    show <TABLE>        Dump a table's contents

OPTIONS:
    --config, -c PATH   Path to config file
    --format, -f FMT    Output format for --output: csv, json, html
    --output, -o PATH   Write the result to a file instead of stdout
    --sql               Print the report's SQL statement alongside the result
    --limit, -n N       Row cap for `show` (default from config)
    --version, -V       Show version
    --help, -h          Show this help message

ENVIRONMENT:
    SOCIALENS_LOG       Log level (trace, debug, info, warn, error)

Config file location: $XDG_CONFIG_HOME/socialens/config.toml"#
    );
}

/// --format wins; otherwise the output file's extension, then the
/// configured default.
fn resolve_format(args: &CliArgs, config: &Config, output: &PathBuf) -> Result<ExportFormat> {
    if let Some(ref name) = args.format {
        return ExportFormat::from_str(name)
            .ok_or_else(|| anyhow::anyhow!("unknown format: {} (csv, json, html)", name));
    }
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    Ok(ExportFormat::from_str(ext)
        .or_else(|| ExportFormat::from_str(&config.display.format))
        .unwrap_or(ExportFormat::Csv))
}

fn emit(args: &CliArgs, config: &Config, rowset: &socialens::Rowset) -> Result<()> {
    match &args.output {
        Some(path) => {
            let format = resolve_format(args, config, path)?;
            render::write_rowset(rowset, path, format)?;
            println!(
                "Wrote {} row{} to {} ({})",
                rowset.len(),
                if rowset.len() == 1 { "" } else { "s" },
                path.display(),
                format.name()
            );
        }
        None => print!("{}", render::format_table(rowset)),
    }
    Ok(())
}

fn list_reports() {
    for (kind, heading) in [
        (ReportKind::User, "User reports:"),
        (ReportKind::Photo, "Photo reports:"),
    ] {
        println!("{}", heading);
        for report in Report::ALL.iter().filter(|r| r.kind() == kind) {
            println!("    {:<30}{}", report.key(), report.title());
        }
        println!();
    }
}

fn main() -> Result<()> {
    let args = parse_args();

    let _ = socialens::logging::init(Some(Config::config_dir().join("logs")));

    // `reports` needs no database at all
    if args.command.first().map(String::as_str) == Some("reports") {
        list_reports();
        return Ok(());
    }

    let config = match args.config_path {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let db = Database::open(&config.database)?;
    db.initialize()?;

    match args.command.first().map(String::as_str) {
        Some("run") => {
            let Some(key) = args.command.get(1) else {
                bail!("run requires a report key (see `socialens reports`)");
            };
            let report = Report::from_key(key)?;
            println!("{}", report.title());
            if args.show_sql {
                println!("{}", report.sql(db.dialect()).trim());
                println!();
            }
            let rowset = db.run_report(report)?;
            emit(&args, &config, &rowset)?;
        }
        Some("raw") => {
            if args.command.len() < 2 {
                bail!("raw requires a SQL statement");
            }
            let sql = args.command[1..].join(" ");
            let rowset = db.run_sql(&sql)?;
            emit(&args, &config, &rowset)?;
        }
        Some("tables") => {
            for table in db.list_tables()? {
                println!("{}", table);
            }
        }
        Some("show") => {
            let Some(table) = args.command.get(1) else {
                bail!("show requires a table name (see `socialens tables`)");
            };
            let limit = args.limit.unwrap_or(config.display.table_row_cap);
            let rowset = db.table_contents(table, limit)?;
            emit(&args, &config, &rowset)?;
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_help();
            std::process::exit(1);
        }
        None => {
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}
