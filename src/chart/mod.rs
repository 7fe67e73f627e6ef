/*
    This module is a memoizing chart parser

    Recognition fills a table of every (nonterminal, start, end) span that can
    derive tokens[start..end], shortest spans first. Rules with a single
    right-hand-side symbol keep a span unchanged, so each span is closed under
    those rules before moving on.

    Tree building walks down from the start symbol. The ways a span splits
    among a rule's symbols are computed once per span and cached, then every
    combination of child trees is materialized. Highly ambiguous grammars give
    exponentially many trees and nothing here bounds them.
*/

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::grammar::{Grammar, Symbol};
use crate::tree::Tree;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    // Tokens come from a tokenizer which never produces empty words
    #[error("Token {index} is an empty string")]
    InvalidInput { index: usize },
}

// A nonterminal over tokens[start..end]
type Span<'g> = (&'g str, usize, usize);

/// One way a span can be derived: the rule used and where each of its
/// symbols starts. `bounds` has one more entry than the rule has symbols,
/// symbol `k` covering `bounds[k]..bounds[k + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub rule: usize,
    pub bounds: Vec<usize>,
}

pub struct Chart<'g, 't> {
    grammar: &'g Grammar,
    tokens: Vec<&'t str>,
    derivable: HashSet<Span<'g>>,
    derivations: HashMap<Span<'g>, Rc<[Derivation]>>,
}

impl<'g, 't> Chart<'g, 't> {
    pub fn new<S: AsRef<str>>(grammar: &'g Grammar, tokens: &'t [S]) -> Result<Self, ParseError> {
        let tokens = tokens.iter()
            .enumerate()
            .map(|(index, token)| match token.as_ref() {
                "" => Err(ParseError::InvalidInput { index }),
                word => Ok(word),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut chart = Chart {
            grammar,
            tokens,
            derivable: HashSet::new(),
            derivations: HashMap::new(),
        };
        chart.recognize();

        debug!(
            tokens = chart.tokens.len(),
            spans = chart.derivable.len(),
            accepted = chart.accepts(),
            "built chart"
        );
        Ok(chart)
    }

    fn recognize(&mut self) {
        let grammar = self.grammar;
        let n = self.tokens.len();

        for len in 1..=n {
            for start in 0..=n - len {
                let end = start + len;
                // Repeat until no unary rule adds anything to this span
                loop {
                    let mut changed = false;
                    for production in grammar.productions() {
                        let span = (production.lhs.as_str(), start, end);
                        if !self.derivable.contains(&span) && self.fits(&production.rhs, start, end) {
                            trace!(nonterminal = span.0, start, end, "derivable span");
                            self.derivable.insert(span);
                            changed = true;
                        }
                    }
                    if !changed {
                        break;
                    }
                }
            }
        }
    }

    fn matches(&self, symbol: &'g Symbol, start: usize, end: usize) -> bool {
        match symbol {
            Symbol::Terminal(word) => end == start + 1 && self.tokens[start] == word.as_str(),
            Symbol::Nonterminal(name) => self.derivable.contains(&(name.as_str(), start, end)),
        }
    }

    // Whether the symbols can split start..end into non-empty pieces
    fn fits(&self, rhs: &'g [Symbol], start: usize, end: usize) -> bool {
        if end - start < rhs.len() {
            return false;
        }

        match rhs {
            [] => false,
            [last] => self.matches(last, start, end),
            [first, rest @ ..] => (start + 1..=end - rest.len())
                .any(|mid| self.matches(first, start, mid) && self.fits(rest, mid, end)),
        }
    }

    // Every split of start..end among the symbols, leftmost boundary first
    fn partitions(&self, rhs: &'g [Symbol], start: usize, end: usize) -> Vec<Vec<usize>> {
        let mut found = Vec::new();
        self.collect_partitions(rhs, start, end, &mut vec![start], &mut found);
        found
    }

    fn collect_partitions(&self, rhs: &'g [Symbol], start: usize, end: usize, bounds: &mut Vec<usize>, found: &mut Vec<Vec<usize>>) {
        if end - start < rhs.len() {
            return;
        }

        match rhs {
            [] => {}
            [last] => {
                if self.matches(last, start, end) {
                    let mut complete = bounds.clone();
                    complete.push(end);
                    found.push(complete);
                }
            }
            [first, rest @ ..] => {
                for mid in start + 1..=end - rest.len() {
                    if self.matches(first, start, mid) {
                        bounds.push(mid);
                        self.collect_partitions(rest, mid, end, bounds, found);
                        bounds.pop();
                    }
                }
            }
        }
    }

    // The grammar's own copy of a nonterminal name, so it can key the chart
    fn interned(&self, nonterminal: &str) -> Option<&'g str> {
        let grammar = self.grammar;
        grammar.rule_ids(nonterminal)
            .first()
            .map(|&id| grammar.production(id).lhs.as_str())
    }

    pub fn is_derivable(&self, nonterminal: &str, start: usize, end: usize) -> bool {
        self.interned(nonterminal)
            .is_some_and(|name| self.derivable.contains(&(name, start, end)))
    }

    /// Whether the start symbol derives the whole input.
    pub fn accepts(&self) -> bool {
        let n = self.tokens.len();
        n > 0 && self.is_derivable(self.grammar.start_symbol(), 0, n)
    }

    /// The ways `nonterminal` derives `tokens[start..end]`, in rule
    /// declaration order and then leftmost boundary first. Empty when the
    /// span is not derivable.
    pub fn derivations(&mut self, nonterminal: &str, start: usize, end: usize) -> Rc<[Derivation]> {
        match self.interned(nonterminal) {
            Some(name) => self.span_derivations((name, start, end)),
            None => Rc::from(Vec::new()),
        }
    }

    fn span_derivations(&mut self, span: Span<'g>) -> Rc<[Derivation]> {
        if let Some(found) = self.derivations.get(&span) {
            return Rc::clone(found);
        }

        let grammar = self.grammar;
        let (nonterminal, start, end) = span;
        let mut found = Vec::new();
        if self.derivable.contains(&span) {
            for &rule in grammar.rule_ids(nonterminal) {
                let rhs = &grammar.production(rule).rhs;
                found.extend(self.partitions(rhs, start, end)
                    .into_iter()
                    .map(|bounds| Derivation { rule, bounds }));
            }
        }

        let found: Rc<[Derivation]> = found.into();
        self.derivations.insert(span, Rc::clone(&found));
        found
    }

    /// Every parse tree of the whole input under the start symbol.
    pub fn trees(&mut self) -> Vec<Tree> {
        let n = self.tokens.len();
        if n == 0 {
            return Vec::new();
        }

        let start = self.grammar.start_symbol();
        let trees = match self.interned(start) {
            Some(name) => self.expand((name, 0, n), &mut Vec::new()),
            None => Vec::new(),
        };
        debug!(trees = trees.len(), "enumerated parse trees");
        trees
    }

    // A span already on the path would only lead to infinitely deep trees
    // through unary cycles like A -> B, B -> A, so it yields nothing there.
    fn expand(&mut self, span: Span<'g>, path: &mut Vec<Span<'g>>) -> Vec<Tree> {
        if path.contains(&span) {
            return Vec::new();
        }

        let grammar = self.grammar;
        let (nonterminal, _, _) = span;
        let derivations = self.span_derivations(span);
        let mut trees = Vec::new();

        path.push(span);
        'derivations: for derivation in derivations.iter() {
            let rhs = &grammar.production(derivation.rule).rhs;
            let pieces = derivation.bounds.iter().copied().tuple_windows();

            let mut children = Vec::with_capacity(rhs.len());
            for (symbol, (from, to)) in rhs.iter().zip(pieces) {
                let options = match symbol {
                    Symbol::Terminal(word) => vec![Tree::leaf(word.as_str())],
                    Symbol::Nonterminal(name) => self.expand((name.as_str(), from, to), path),
                };
                if options.is_empty() {
                    continue 'derivations;
                }
                children.push(options);
            }

            trees.extend(children.iter()
                .map(|options| options.iter().cloned())
                .multi_cartesian_product()
                .map(|kids| Tree::branch(nonterminal, kids)));
        }
        path.pop();

        trees
    }
}

/// Parses with one grammar, building a fresh chart for every input.
#[derive(Debug, Clone, Copy)]
pub struct ChartParser<'g> {
    grammar: &'g Grammar,
}

impl<'g> ChartParser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        ChartParser { grammar }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn chart<'t, S: AsRef<str>>(&self, tokens: &'t [S]) -> Result<Chart<'g, 't>, ParseError> {
        Chart::new(self.grammar, tokens)
    }

    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<Tree>, ParseError> {
        Ok(self.chart(tokens)?.trees())
    }
}

/// Every parse tree of `tokens` under the grammar's start symbol.
///
/// An empty result means the sentence is not in the language. That includes
/// sentences with words the grammar has no terminal for.
pub fn parse<S: AsRef<str>>(tokens: &[S], grammar: &Grammar) -> Result<Vec<Tree>, ParseError> {
    ChartParser::new(grammar).parse(tokens)
}
