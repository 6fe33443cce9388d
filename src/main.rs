use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use rox::ast_printer::Ast;
use rox::diagnostic::Diagnostic;
use rox::error::{LoxError, Stage};
use rox::output::StdoutOutput;
use rox::parser::{Parser, ParserConfig};
use rox::scanner::{scan, scan_all};
use rox::session::Session;
use rox::stmt::Stmt;

const EXIT_DATA_ERR: i32 = 65;
const EXIT_SOFTWARE: i32 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Tree-walking interpreter for a small scripting language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the token stream as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parses a file and prints each expression statement's AST
    Parse { filename: PathBuf },

    /// Runs a file as a program
    Run { filename: PathBuf },

    /// Starts an interactive prompt
    Repl,
}

/// Reads the contents of a file into a String.
fn read_file(filename: &PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let bytes = reader
        .read_to_string(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record.module_path().unwrap_or("<unnamed>");
            let module = module.strip_prefix("rox::").unwrap_or(module);

            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");

    Ok(())
}

fn report(source: &str, errors: &[LoxError]) {
    for error in errors {
        debug!("Reporting: {:?}", error);

        eprintln!("{}", Diagnostic::new(source, error));
    }
}

fn exit_code(errors: &[LoxError]) -> i32 {
    match errors.first().map(LoxError::stage) {
        Some(Stage::Runtime) => EXIT_SOFTWARE,
        _ => EXIT_DATA_ERR,
    }
}

fn tokenize(source: &str, json: bool) -> Result<i32> {
    if json {
        let (tokens, errors) = scan_all(source);
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        report(source, &errors);

        return Ok(if errors.is_empty() { 0 } else { EXIT_DATA_ERR });
    }

    let mut tokenized = true;

    for result in scan(source) {
        match result {
            Ok(token) => println!("{}", token),
            Err(e) => {
                tokenized = false;
                report(source, &[e]);
            }
        }
    }

    Ok(if tokenized { 0 } else { EXIT_DATA_ERR })
}

fn parse(source: &str) -> i32 {
    let (tokens, errors) = scan_all(source);

    if !errors.is_empty() {
        report(source, &errors);
        return EXIT_DATA_ERR;
    }

    let printer = Ast;

    for stmt in Parser::new(tokens) {
        match stmt {
            Ok(Stmt::Expression(expr) | Stmt::Print(expr)) => println!("{}", printer.print(&expr)),
            Ok(other) => println!("{:?}", other),
            Err(e) => {
                report(source, &[e]);
                return EXIT_DATA_ERR;
            }
        }
    }

    0
}

fn run(source: &str) -> i32 {
    let mut session = Session::new(Box::new(StdoutOutput), ParserConfig::default());

    match session.run(source) {
        Ok(()) => {
            info!("Program executed successfully");
            0
        }
        Err(errors) => {
            report(source, &errors);
            exit_code(&errors)
        }
    }
}

fn repl() -> Result<()> {
    let mut session = Session::new(Box::new(StdoutOutput), ParserConfig::repl());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line: String = line.context("Failed to read from stdin")?;

        if let Err(errors) = session.run(&line) {
            report(&line, &errors);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let code = match &args.commands {
        Commands::Tokenize { filename, json } => tokenize(&read_file(filename)?, *json)?,
        Commands::Parse { filename } => parse(&read_file(filename)?),
        Commands::Run { filename } => run(&read_file(filename)?),
        Commands::Repl => {
            repl()?;
            0
        }
    };

    if code != 0 {
        debug!("Exiting with code {}", code);
        std::process::exit(code);
    }

    Ok(())
}

