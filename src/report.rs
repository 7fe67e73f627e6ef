/*
    This module writes the parses of a sentence the way the command line shows them
*/

use std::io::{self, Write};

use itertools::Itertools;

use crate::chart::{ChartParser, ParseError};
use crate::chunk::np_chunk_text;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    // Some words have no terminal in the grammar, nothing was parsed
    Uncovered,
    Unparsed,
    Parsed(usize),
}

/// Writes every parse tree of `words` followed by its noun phrase chunks.
///
/// Words the grammar has no terminal for are listed instead of parsing.
pub fn write_parses<S: AsRef<str>>(
    parser: &ChartParser,
    words: &[S],
    out: &mut impl Write,
) -> Result<Outcome, ReportError> {
    let uncovered = parser.grammar().uncovered(words);
    if !uncovered.is_empty() {
        let listed = uncovered.iter().map(|word| format!("{:?}", word)).join(", ");
        writeln!(out, "Grammar does not cover some of the input words: {}", listed)?;
        return Ok(Outcome::Uncovered);
    }

    let trees = parser.parse(words)?;
    if trees.is_empty() {
        writeln!(out, "Could not parse sentence.")?;
        return Ok(Outcome::Unparsed);
    }

    for tree in &trees {
        writeln!(out, "{:#}", tree)?;
        writeln!(out)?;
        writeln!(out, "Noun Phrase Chunks")?;
        for chunk in np_chunk_text(tree) {
            writeln!(out, "{}", chunk)?;
        }
        writeln!(out)?;
    }
    Ok(Outcome::Parsed(trees.len()))
}

#[cfg(test)]
mod tests {
    use crate::grammar::Grammar;
    use crate::tokenizer::preprocess;

    use super::*;

    fn sentences() -> Grammar {
        Grammar::load(include_str!("../example_data/sentences.cfg")).unwrap()
    }

    fn render(grammar: &Grammar, sentence: &str) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = write_parses(&ChartParser::new(grammar), &preprocess(sentence), &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parsed_sentence_with_chunks() {
        let grammar = sentences();
        let (outcome, text) = render(&grammar, include_str!("../example_data/sentences/1.txt"));

        assert_eq!(outcome, Outcome::Parsed(1));
        assert_eq!(text, "\
(S
  (NP
    (N holmes))
  (VP
    (V sat)))

Noun Phrase Chunks
holmes

");
    }

    #[test]
    fn chunk_words_are_joined() {
        let grammar = sentences();
        let (_, text) = render(&grammar, "Holmes lit a pipe.");

        assert!(text.contains("Noun Phrase Chunks\nholmes\npipe\n"));
    }

    #[test]
    fn unparsable_sentence() {
        let grammar = sentences();
        let (outcome, text) = render(&grammar, "Sat holmes.");

        assert_eq!(outcome, Outcome::Unparsed);
        assert_eq!(text, "Could not parse sentence.\n");
    }

    #[test]
    fn uncovered_words_are_listed() {
        let grammar = sentences();
        let (outcome, text) = render(&grammar, "Holmes sat on the sofa, the SOFA!");

        assert_eq!(outcome, Outcome::Uncovered);
        assert_eq!(text, "Grammar does not cover some of the input words: \"sofa\"\n");
    }

    #[test]
    fn empty_sentence_does_not_parse() {
        let grammar = sentences();
        let (outcome, text) = render(&grammar, "...");

        assert_eq!(outcome, Outcome::Unparsed);
        assert_eq!(text, "Could not parse sentence.\n");
    }
}
