//! docintel CLI - query saved document analysis results

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use docintel::persist::to_json_string;
use docintel::{JsonFormat, PageFilter, ResultStore, Table};

#[derive(Parser)]
#[command(name = "docintel")]
#[command(version)]
#[command(about = "Query saved document analysis results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PageArgs {
    /// Saved analysis result (JSON)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Page number (all pages if not specified)
    #[arg(short, long)]
    page: Option<u32>,

    /// Print JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the raw text content
    Text {
        /// Saved analysis result (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print recognized words
    Words {
        #[command(flatten)]
        page: PageArgs,

        /// Minimum word confidence (0.0-1.0)
        #[arg(long, env = "DOCINTEL_MIN_CONFIDENCE", default_value_t = 0.0)]
        min_confidence: f64,
    },

    /// Print text lines
    Lines {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Print selection mark states
    Marks {
        #[command(flatten)]
        page: PageArgs,

        /// Minimum mark confidence (0.0-1.0)
        #[arg(long, env = "DOCINTEL_MIN_CONFIDENCE", default_value_t = 0.0)]
        min_confidence: f64,
    },

    /// Print tables
    Tables {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Print key-value pairs
    #[command(alias = "kv")]
    Pairs {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Print the values of specific keys
    Fields {
        /// Saved analysis result (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Key names to look up (exact match)
        #[arg(value_name = "KEY", required = true)]
        names: Vec<String>,

        /// Minimum value confidence (0.0-1.0)
        #[arg(long, env = "DOCINTEL_MIN_CONFIDENCE", default_value_t = 0.0)]
        min_confidence: f64,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Show result information
    Info {
        /// Saved analysis result (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Rewrite a saved result as pretty or compact JSON
    Json {
        /// Saved analysis result (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Text { input, output } => cmd_text(&input, output.as_deref()),
        Commands::Words {
            page,
            min_confidence,
        } => cmd_words(&page, min_confidence),
        Commands::Lines { page } => cmd_lines(&page),
        Commands::Marks {
            page,
            min_confidence,
        } => cmd_marks(&page, min_confidence),
        Commands::Tables { page } => cmd_tables(&page),
        Commands::Pairs { page } => cmd_pairs(&page),
        Commands::Fields {
            input,
            names,
            min_confidence,
            json,
        } => cmd_fields(&input, &names, min_confidence, json),
        Commands::Info { input } => cmd_info(&input),
        Commands::Json {
            input,
            output,
            compact,
        } => cmd_json(&input, &output, compact),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

impl PageArgs {
    fn filter(&self) -> PageFilter {
        PageFilter::from(self.page)
    }

    fn load(&self) -> Result<ResultStore, docintel::Error> {
        load(&self.input)
    }
}

fn load(input: &Path) -> Result<ResultStore, docintel::Error> {
    log::debug!("Loading analysis result from {}", input.display());
    let store = docintel::load_file(input)?;
    log::debug!("Loaded result with {} page(s)", store.max_page_count()?);
    Ok(store)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", to_json_string(value, JsonFormat::Pretty)?);
    Ok(())
}

fn cmd_text(input: &Path, output: Option<&Path>) -> CmdResult {
    let store = load(input)?;
    let text = store.raw_text()?;

    if let Some(path) = output {
        fs::write(path, text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_words(args: &PageArgs, min_confidence: f64) -> CmdResult {
    let words = args.load()?.words(args.filter(), min_confidence)?;
    if args.json {
        return print_json(&words);
    }
    for word in words {
        println!("{}", word);
    }
    Ok(())
}

fn cmd_lines(args: &PageArgs) -> CmdResult {
    let lines = args.load()?.lines(args.filter())?;
    if args.json {
        return print_json(&lines);
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_marks(args: &PageArgs, min_confidence: f64) -> CmdResult {
    let marks = args.load()?.selection_marks(args.filter(), min_confidence)?;
    if args.json {
        return print_json(&marks);
    }
    for (i, selected) in marks.iter().enumerate() {
        let state = if *selected {
            "[x]".green()
        } else {
            "[ ]".dimmed()
        };
        println!("{} {}", state, i + 1);
    }
    Ok(())
}

fn cmd_tables(args: &PageArgs) -> CmdResult {
    let tables = args.load()?.tables(args.filter())?;
    if args.json {
        return print_json(&tables);
    }
    for (i, table) in tables.iter().enumerate() {
        print_table(i + 1, table);
    }
    Ok(())
}

fn print_table(number: usize, table: &Table) {
    println!(
        "{} {} ({}x{})",
        "Table".cyan().bold(),
        number,
        table.row_count,
        table.column_count
    );
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", table.plain_text());
    println!();
}

fn cmd_pairs(args: &PageArgs) -> CmdResult {
    let pairs = args.load()?.key_value_pairs(args.filter())?;
    if args.json {
        return print_json(&pairs);
    }
    for (key, value) in pairs.iter() {
        println!("{}: {}", key.bold(), value);
    }
    Ok(())
}

fn cmd_fields(input: &Path, names: &[String], min_confidence: f64, json: bool) -> CmdResult {
    let store = load(input)?;
    let fields = store.specific_fields(names, min_confidence)?;
    if json {
        return print_json(&fields);
    }
    for name in names {
        match fields.get(name) {
            Some(value) => println!("{}: {}", name.bold(), value),
            None => println!("{}: {}", name.bold(), "(not found)".dimmed()),
        }
    }
    Ok(())
}

fn cmd_info(input: &Path) -> CmdResult {
    let store = load(input)?;
    let info = store.info()?;

    println!("{}", "Result Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {:?}", "Shape".bold(), info.shape);
    if let Some(ref model_id) = info.model_id {
        println!("{}: {}", "Model".bold(), model_id);
    }
    if let Some(ref api_version) = info.api_version {
        println!("{}: {}", "API version".bold(), api_version);
    }
    if let Some(ref created) = info.created {
        println!("{}: {}", "Created".bold(), created);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Pages".bold(), info.max_page_count);
    println!("{}: {}", "Tables".bold(), info.table_count);
    println!("{}: {}", "Key-value pairs".bold(), info.key_value_pair_count);

    Ok(())
}

fn cmd_json(input: &Path, output: &Path, compact: bool) -> CmdResult {
    let store = load(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    store.save(output, format)?;
    println!("{} {}", "Saved to".green(), output.display());

    Ok(())
}
