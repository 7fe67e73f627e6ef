use std::collections::HashSet;

use itertools::Itertools;

use crate::grammar::Symbol::Nonterminal;
use super::LoadErrorType::UndefinedNonterminal;
use super::{Alternative, FileResult, LoadError, LoadErrors, Rule};

fn get_alternative_undefined_symbols<'r>(alternative: &'r Alternative, defined: &'r HashSet<&'r str>) -> impl Iterator<Item = &'r String> + 'r {
    // Filter out everything but nonterminals and unwrap the text from the
    // nonterminals. Then filter out all the defined nonterminals.
    alternative.iter()
        .filter_map(|symbol| match symbol {
            Nonterminal(symbol) => Some(symbol),
            _ => None
        })
        .filter(move |symbol| !defined.contains(symbol.as_str()))
}

fn get_rule_undefined_symbols(rule: &Rule, defined: &HashSet<&str>) -> LoadErrors {
    // Each undefined nonterminal is reported once per line, in the order it
    // first appears
    rule.rewrite.iter()
        .flat_map(|alternative| get_alternative_undefined_symbols(alternative, defined))
        .unique()
        .map(|symbol_text| LoadError {
            location: rule.location.to_owned(),
            error: UndefinedNonterminal(symbol_text.to_owned())
        })
        .collect()
}

fn get_undefined_symbols(rules: &[Rule]) -> LoadErrors {
    let defined = rules.iter().map(|rule| rule.symbol.as_str()).collect::<HashSet<_>>();

    rules.iter()
        .flat_map(|rule| get_rule_undefined_symbols(rule, &defined))
        .collect()
}

pub fn verify_rules(rules: &[Rule]) -> FileResult<()> {
    let errors = get_undefined_symbols(rules);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
