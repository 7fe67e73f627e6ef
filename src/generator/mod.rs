/*
    This module generates sentences
*/

use std::collections::HashMap;

use itertools::Itertools;
use rand::prelude::*;

use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum GenerateErrorType {
    // An undefined nonterminal was used
    #[error("No definition for nonterminal `{0}`")]
    UndefinedNonterminal(String),
    // Every alternative of the nonterminal recurses forever
    #[error("Nonterminal `{0}` cannot derive any sentence")]
    Unproductive(String),
}

impl ErrorType for GenerateErrorType {}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<Vec<String>, GenerateError>;

// Deep enough for a few nested phrases
pub const DEFAULT_MAX_DEPTH: usize = 8;

// Height of the shortest tree each nonterminal can derive. Nonterminals that
// can't derive any finite tree are missing.
type Heights<'g> = HashMap<&'g str, usize>;

fn min_heights(grammar: &Grammar) -> Heights<'_> {
    let mut heights = Heights::new();

    loop {
        let mut changed = false;
        for production in grammar.productions() {
            let Some(height) = alternative_height(&production.rhs, &heights) else {
                continue;
            };
            let known = heights.entry(production.lhs.as_str()).or_insert(usize::MAX);
            if height < *known {
                *known = height;
                changed = true;
            }
        }
        if !changed {
            return heights;
        }
    }
}

fn alternative_height(alternative: &Alternative, heights: &Heights) -> Option<usize> {
    alternative.iter()
        .map(|symbol| match symbol {
            Symbol::Terminal(_) => Some(0),
            Symbol::Nonterminal(name) => heights.get(name.as_str()).copied(),
        })
        .fold_options(0, usize::max)
        .map(|tallest| tallest + 1)
}

struct Generator<'g, 'r, R: Rng + ?Sized> {
    grammar: &'g Grammar,
    heights: Heights<'g>,
    rng: &'r mut R,
    max_depth: usize,
}

impl<'g, 'r, R: Rng + ?Sized> Generator<'g, 'r, R> {
    fn error(nonterminal: &str, error: fn(String) -> GenerateErrorType) -> GenerateError {
        GenerateError {
            location: Location::default(),
            error: error(nonterminal.to_string())
        }
    }

    fn generate_nonterminal(&mut self, nonterminal: &str, depth: usize, words: &mut Vec<String>) -> Result<(), GenerateError> {
        if !self.grammar.is_defined(nonterminal) {
            return Err(Self::error(nonterminal, GenerateErrorType::UndefinedNonterminal));
        }

        // Only alternatives that can finish, paired with how tall they are
        let grammar = self.grammar;
        let productive = grammar.rules_for(nonterminal)
            .filter_map(|production| {
                alternative_height(&production.rhs, &self.heights).map(|height| (production, height))
            })
            .collect_vec();

        // Past the depth budget, head for the words as fast as possible
        let chosen = if depth < self.max_depth {
            productive.choose(&mut *self.rng)
        } else {
            productive.iter().min_by_key(|(_, height)| *height)
        };
        let (production, _) = chosen
            .ok_or_else(|| Self::error(nonterminal, GenerateErrorType::Unproductive))?;

        for symbol in &production.rhs {
            self.generate_symbol(symbol, depth, words)?;
        }
        Ok(())
    }

    fn generate_symbol(&mut self, symbol: &Symbol, depth: usize, words: &mut Vec<String>) -> Result<(), GenerateError> {
        match symbol {
            Symbol::Nonterminal(t) => self.generate_nonterminal(t, depth + 1, words),
            Symbol::Terminal(t) => {
                words.push(t.clone());
                Ok(())
            }
        }
    }
}

/// Generates a random sentence of the grammar from its start symbol.
pub fn generate<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R, max_depth: usize) -> GenResult {
    generate_with_override(grammar, grammar.start_symbol(), rng, max_depth)
}

// Generates a sentence in the given grammar starting with the given symbol
pub fn generate_with_override<R: Rng + ?Sized>(grammar: &Grammar, start: &str, rng: &mut R, max_depth: usize) -> GenResult {
    let mut generator = Generator {
        grammar,
        heights: min_heights(grammar),
        rng,
        max_depth,
    };

    let mut words = Vec::new();
    generator.generate_nonterminal(start, 0, &mut words)?;
    Ok(words)
}
