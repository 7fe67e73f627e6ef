//! Context-free grammar parsing with noun phrase chunking.
//!
//! A [`Grammar`] is loaded once from rule text such as
//!
//! ```text
//! S -> NP VP
//! NP -> N | Det N
//! VP -> V | V NP
//! Det -> "the" | "a"
//! N -> "holmes" | "pipe"
//! V -> "lit"
//! ```
//!
//! and then shared by any number of parses. [`parse`] returns every tree the
//! grammar allows for a sentence, and [`np_chunks`] picks the noun phrase
//! chunks out of each tree.
//!
//! ```
//! use grammarian::{np_chunk_text, parse, Grammar};
//!
//! let grammar = Grammar::load("S -> NP VP\nNP -> \"she\"\nVP -> \"smiled\"").unwrap();
//! let trees = parse(&["she", "smiled"], &grammar).unwrap();
//!
//! assert_eq!(trees.len(), 1);
//! assert_eq!(trees[0].to_string(), "(S (NP she) (VP smiled))");
//! assert_eq!(np_chunk_text(&trees[0]), vec!["she"]);
//! ```

pub mod chart;
pub mod chunk;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod loader;
pub mod report;
pub mod tokenizer;
pub mod tree;

pub use crate::chart::{parse, Chart, ChartParser, Derivation, ParseError};
pub use crate::chunk::{chunks, np_chunk_text, np_chunks};
pub use crate::grammar::{Grammar, Production, Symbol};
pub use crate::loader::{load_file, load_str, LoadError, LoadErrorType, LoadErrors};
pub use crate::tokenizer::preprocess;
pub use crate::tree::Tree;
