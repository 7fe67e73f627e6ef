mod cli;

use std::fmt::Display;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use grammarian::generator::{self, DEFAULT_MAX_DEPTH};
use grammarian::report::{self, Outcome};
use grammarian::{loader, preprocess, ChartParser, Grammar};
use tracing::Level;

use cli::Cli;

const SENTENCE_GRAMMAR: &str = include_str!("../example_data/sentences.cfg");

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn report_errors<E: Display>(errors: impl IntoIterator<Item = E>) -> ExitCode {
    for error in errors {
        eprintln!("{}", error);
    }
    ExitCode::FAILURE
}

fn load_grammar(cli: &Cli) -> Result<Grammar, ExitCode> {
    let loaded = match &cli.grammar {
        Some(path) => loader::load_file(path),
        None => loader::load_str(SENTENCE_GRAMMAR),
    };
    let grammar = loaded.map_err(|errors| report_errors(errors))?;

    match &cli.start {
        Some(start) => grammar.with_start(start).map_err(|error| report_errors([error])),
        None => Ok(grammar),
    }
}

fn read_sentence(cli: &Cli) -> std::io::Result<String> {
    if let Some(path) = &cli.file {
        return std::fs::read_to_string(path);
    }

    print!("Sentence: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn generate(grammar: &Grammar, amount: u32) -> ExitCode {
    let mut rng = rand::thread_rng();
    for _ in 0..amount {
        match generator::generate(grammar, &mut rng, DEFAULT_MAX_DEPTH) {
            Ok(words) => println!("{}", words.join(" ")),
            Err(error) => return report_errors([error]),
        }
    }
    ExitCode::SUCCESS
}

fn parse(grammar: &Grammar, cli: &Cli) -> ExitCode {
    let sentence = match read_sentence(cli) {
        Ok(sentence) => sentence,
        Err(error) => return report_errors([error]),
    };
    let words = preprocess(&sentence);

    let parser = ChartParser::new(grammar);
    match report::write_parses(&parser, &words, &mut std::io::stdout().lock()) {
        Ok(Outcome::Uncovered) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => report_errors([error]),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let grammar = match load_grammar(&cli) {
        Ok(grammar) => grammar,
        Err(code) => return code,
    };

    match cli.generate {
        Some(amount) => generate(&grammar, amount),
        None => parse(&grammar, &cli),
    }
}
