use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(version, about = "Parse sentences with a context-free grammar and list their noun phrase chunks")]
pub struct Cli {
    /// File containing the sentence (default: prompt for one)
    pub file: Option<PathBuf>,

    /// File containing the grammar (default: the built-in sentence grammar)
    #[arg(short, long, value_name = "FILE")]
    pub grammar: Option<PathBuf>,

    /// Start symbol (default: first in the grammar)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Generate this many random sentences instead of parsing
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub generate: Option<u32>,

    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8
}
