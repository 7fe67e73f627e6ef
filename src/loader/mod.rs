/*
    This module loads grammars from rule text
*/

mod lexer;
mod verifier;

use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error_handling::*;
use crate::grammar::*;
use itertools::Itertools;
use lexer::*;
use tracing::debug;
use verifier::verify_rules;

#[derive(Debug, thiserror::Error)]
pub enum LoadErrorType {
    // A line which should contain a rule does not
    #[error("Expected `->` after nonterminal")]
    MissingArrow,
    // A rule has multiple arrows
    #[error("Unexpected `->` encountered")]
    UnexpectedArrow,
    // The user starts a rule line with something other than a nonterminal
    #[error("Tried to define something other than a nonterminal")]
    MissingNonterminal,
    // There is an unclosed quote
    #[error("Unmatched quotes")]
    UnmatchedQuote,
    // Something that is not part of any symbol, e.g. a lone `-`
    #[error("Unexpected character `{0}`")]
    UnexpectedCharacter(char),
    // An alternative with no symbols, e.g. `A -> B |`
    #[error("Empty alternative (epsilon rules are not supported)")]
    EmptyAlternative,
    // A terminal written as `""`
    #[error("Empty terminal")]
    EmptyTerminal,
    // An undefined nonterminal was used
    #[error("Could not find definition for `{0}`")]
    UndefinedNonterminal(String),
    // The requested start symbol has no rules
    #[error("Start symbol `{0}` is not defined")]
    UndefinedStartSymbol(String),
    // There are no rules at all, so there is no start symbol
    #[error("Grammar has no rules")]
    EmptyGrammar,
    // Somehow a full rewrite was parsed as a base alternative
    // This is a problem with the loader, not the grammar
    #[error("Rewrite was not fully split (this is a problem with the loader, not the grammar)")]
    UnsplitRewrite,
    // A blank line got too deep into the loader
    // This is a problem with the loader, not the grammar
    #[error("Blank line encountered in rule parser (this is a problem with the loader, not the grammar)")]
    UnexpectedBlankLine,
    // There was an issue with reading a file
    #[error("File error: {0}")]
    FileError(std::io::Error),
}

impl ErrorType for LoadErrorType {}

impl PartialEq for LoadErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LoadErrorType::FileError(a), LoadErrorType::FileError(b)) => a.kind() == b.kind(),
            (LoadErrorType::UnexpectedCharacter(a), LoadErrorType::UnexpectedCharacter(b)) => a == b,
            (LoadErrorType::UndefinedNonterminal(a), LoadErrorType::UndefinedNonterminal(b)) => a == b,
            (LoadErrorType::UndefinedStartSymbol(a), LoadErrorType::UndefinedStartSymbol(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

pub type LoadError = Error<LoadErrorType>;
pub type LoadErrors = Errors<LoadErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> LoadError {
    LoadError {
        location: Location {
            file,
            line: 0
        },
        error: LoadErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, LoadErrorType>;
pub type LineResult<T> = std::result::Result<T, LoadError>;
pub type FileResult<T> = std::result::Result<T, LoadErrors>;

// One declaration line, before the lines for the same symbol are merged
#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    rewrite: Rewrite,
    location: Location
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    if tokens.is_empty() {
        return Err(LoadErrorType::EmptyAlternative);
    }

    tokens.iter().map(|t| match t {
        Token::Arrow => Err(LoadErrorType::UnexpectedArrow),
        Token::Or => Err(LoadErrorType::UnsplitRewrite),
        Token::Nonterminal(s) => Ok(Symbol::Nonterminal(s.clone())),
        Token::Terminal(s) => Ok(Symbol::Terminal(s.clone()))
    }).collect()
}

fn parse_rewrite(tokens: &[Token]) -> Result<Rewrite> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let symbol = match tokens.first() {
        Some(Token::Nonterminal(s)) => Ok(s.clone()),
        Some(_) => Err(LoadErrorType::MissingNonterminal),
        None => Err(LoadErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Arrow) {
        return Err(LoadErrorType::MissingArrow)
    }

    let rewrite = parse_rewrite(&tokens[2..])?;

    Ok(Rule {
        symbol,
        rewrite,
        location
    })
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line, location.clone()))
        .map_err(|error| LoadError { location, error })
}

fn is_rule_line(line: &String) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with('#')
}

// Keeps the rule lines, numbered from 1
fn rule_lines<I>(lines: I) -> impl Iterator<Item = (usize, LineResult<String>)>
where
    I: Iterator<Item = LineResult<String>>
{
    lines
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

fn grammar_from_rules(rule_list: Vec<Rule>, file: &Path) -> FileResult<Grammar> {
    let start_symbol = match rule_list.first() {
        Some(rule) => rule.symbol.clone(),
        None => return Err(vec![LoadError {
            location: Location {
                file: file.to_path_buf(),
                line: 0
            },
            error: LoadErrorType::EmptyGrammar
        }]),
    };

    verify_rules(&rule_list)?;

    let productions = rule_list.into_iter()
        .flat_map(|rule| {
            let symbol = rule.symbol;
            rule.rewrite.into_iter().map(move |rhs| Production::new(symbol.clone(), rhs))
        })
        .collect_vec();

    let grammar = Grammar::from_verified(start_symbol, productions);
    debug!(
        productions = grammar.productions().len(),
        nonterminals = grammar.nonterminals().count(),
        start = grammar.start_symbol(),
        "loaded grammar"
    );
    Ok(grammar)
}

fn load_lines<I>(lines: I, file: &Path) -> FileResult<Grammar>
where
    I: Iterator<Item = LineResult<String>>
{
    let parsed_lines = rule_lines(lines).map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: file.to_path_buf(),
            line: num
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }

    grammar_from_rules(rules, file)
}

/// Loads a grammar from rule text. Errors carry line numbers but no file.
pub fn load_str(text: &str) -> FileResult<Grammar> {
    load_lines(text.lines().map(|line| Ok(line.to_string())), Path::new(""))
}

/// Loads a grammar from a rule file, reporting every malformed line.
pub fn load_file(path: &Path) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.to_path_buf())])?;
    let lines = std::io::BufReader::new(file)
        .lines()
        .map(|line| line.map_err(|e| io_error(e, path.to_path_buf())));

    load_lines(lines, path)
}
