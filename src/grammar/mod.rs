/*
    This module is for storing and querying grammars
*/

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::str::FromStr;

use itertools::Itertools;

use crate::error_handling::Location;
use crate::loader::{self, LoadError, LoadErrorType, LoadErrors};

// The base unit in a grammar rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(s) | Symbol::Nonterminal(s) => s,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(word) => write!(f, "\"{}\"", word),
            Symbol::Nonterminal(name) => write!(f, "{}", name),
        }
    }
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

/// A single alternative of a rule, `lhs -> rhs`. The right-hand side is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub lhs: String,
    pub rhs: Alternative,
}

impl Production {
    pub fn new(lhs: impl Into<String>, rhs: Alternative) -> Self {
        Production { lhs: lhs.into(), rhs }
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs.iter().join(" "))
    }
}

/// An immutable context-free grammar.
///
/// Productions keep their declaration order, which fixes the order in which
/// ambiguous parses are enumerated. A grammar is only ever built by the
/// loader, so every nonterminal it references is defined.
#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    start_symbol: String,
    productions: Vec<Production>,
    by_lhs: HashMap<String, Vec<usize>>,
    lexicon: HashSet<String>,
}

impl Grammar {
    /// Parses rule text of the form `LHS -> RHS1 | RHS2 ...`.
    pub fn load(text: &str) -> Result<Grammar, LoadErrors> {
        loader::load_str(text)
    }

    // Callers must have verified the productions already
    pub(crate) fn from_verified(start_symbol: String, productions: Vec<Production>) -> Self {
        let mut by_lhs = HashMap::<String, Vec<usize>>::new();
        for (id, production) in productions.iter().enumerate() {
            by_lhs.entry(production.lhs.clone()).or_default().push(id);
        }

        let lexicon = productions.iter()
            .flat_map(|production| production.rhs.iter())
            .filter(|symbol| symbol.is_terminal())
            .map(|symbol| symbol.name().to_string())
            .collect();

        Grammar {
            start_symbol,
            productions,
            by_lhs,
            lexicon,
        }
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    /// Returns a copy of this grammar rooted at another nonterminal.
    pub fn with_start(&self, start: &str) -> Result<Grammar, LoadError> {
        if !self.is_defined(start) {
            return Err(LoadError {
                location: Location::default(),
                error: LoadErrorType::UndefinedStartSymbol(start.to_string())
            });
        }

        let mut grammar = self.clone();
        grammar.start_symbol = start.to_string();
        Ok(grammar)
    }

    /// The productions for `lhs` in declaration order, empty if undefined.
    pub fn rules_for<'g>(&'g self, lhs: &str) -> impl Iterator<Item = &'g Production> + 'g {
        self.rule_ids(lhs).iter().map(move |&id| &self.productions[id])
    }

    pub(crate) fn rule_ids(&self, lhs: &str) -> &[usize] {
        self.by_lhs.get(lhs).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn production(&self, id: usize) -> &Production {
        &self.productions[id]
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Nonterminals in order of first declaration.
    pub fn nonterminals(&self) -> impl Iterator<Item = &str> + '_ {
        self.productions.iter().map(|production| production.lhs.as_str()).unique()
    }

    pub fn is_defined(&self, nonterminal: &str) -> bool {
        self.by_lhs.contains_key(nonterminal)
    }

    /// Whether some production has `word` as a terminal.
    pub fn covers(&self, word: &str) -> bool {
        self.lexicon.contains(word)
    }

    /// The tokens no terminal in the grammar can match, without duplicates.
    pub fn uncovered<'t, S: AsRef<str>>(&self, tokens: &'t [S]) -> Vec<&'t str> {
        tokens.iter()
            .map(|token| token.as_ref())
            .filter(|word| !self.covers(word))
            .unique()
            .collect()
    }
}

impl FromStr for Grammar {
    type Err = LoadErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grammar::load(s)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grammar with {} productions (start state = {})", self.productions.len(), self.start_symbol)?;
        for production in &self.productions {
            writeln!(f, "    {}", production)?;
        }
        Ok(())
    }
}
