/*
    This module pulls noun phrase chunks out of parse trees
*/

use itertools::Itertools;

use crate::tree::Tree;

pub const NOUN_PHRASE: &str = "NP";

// A chunk spans at most one layer of nodes between itself and the words
pub const MAX_CHUNK_HEIGHT: usize = 3;

/// Every subtree labelled `label` that is at most [`MAX_CHUNK_HEIGHT`] tall,
/// in pre-order. Each node is judged on its own, so a chunk can sit inside
/// another one.
pub fn chunks<'t>(tree: &'t Tree, label: &str) -> Vec<&'t Tree> {
    tree.subtrees(|subtree| subtree.height() <= MAX_CHUNK_HEIGHT)
        .filter(|subtree| !subtree.is_leaf() && subtree.name() == label)
        .collect()
}

/// The noun phrase chunks of a sentence tree.
pub fn np_chunks(tree: &Tree) -> Vec<&Tree> {
    chunks(tree, NOUN_PHRASE)
}

/// The words of each noun phrase chunk, joined by spaces.
pub fn np_chunk_text(tree: &Tree) -> Vec<String> {
    np_chunks(tree)
        .into_iter()
        .map(|chunk| chunk.flatten().into_iter().join(" "))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::chart::parse;
    use crate::grammar::Grammar;

    use super::*;

    fn branch(label: &str, children: Vec<Tree>) -> Tree {
        Tree::branch(label, children)
    }

    fn leaf(word: &str) -> Tree {
        Tree::leaf(word)
    }

    #[test]
    fn single_word_noun_phrase() {
        let tree = branch("S", vec![
            branch("NP", vec![leaf("she")]),
            branch("VP", vec![leaf("smiled")])
        ]);

        assert_eq!(np_chunks(&tree), vec![&branch("NP", vec![leaf("she")])]);
    }

    #[test]
    fn tall_noun_phrases_are_skipped() {
        // (S (NP (N holmes)) (VP (V lit) (NP (Det a) (NP (N pipe)))))
        let tree = branch("S", vec![
            branch("NP", vec![branch("N", vec![leaf("holmes")])]),
            branch("VP", vec![
                branch("V", vec![leaf("lit")]),
                branch("NP", vec![
                    branch("Det", vec![leaf("a")]),
                    branch("NP", vec![branch("N", vec![leaf("pipe")])])
                ])
            ])
        ]);

        assert_eq!(np_chunk_text(&tree), vec!["holmes", "pipe"]);
    }

    #[test]
    fn nested_chunks_are_both_kept() {
        // Height 3 outer NP whose child is itself a height 2 NP
        let inner = branch("NP", vec![leaf("day")]);
        let tree = branch("NP", vec![branch("Det", vec![leaf("the")]), inner.clone()]);

        assert_eq!(np_chunks(&tree), vec![&tree, &inner]);
    }

    #[test]
    fn other_labels() {
        let tree = branch("S", vec![
            branch("NP", vec![leaf("we")]),
            branch("VP", vec![branch("V", vec![leaf("arrived")])])
        ]);

        assert_eq!(chunks(&tree, "VP"), vec![&tree.children()[1]]);
        assert!(chunks(&tree, "PP").is_empty());
        assert!(chunks(&leaf("NP"), NOUN_PHRASE).is_empty());
    }

    #[test]
    fn chunks_of_parsed_sentence() {
        let grammar = Grammar::load(include_str!("../../example_data/sentences.cfg")).unwrap();
        let trees = parse(&["my", "companion", "smiled", "an", "enigmatical", "smile"], &grammar).unwrap();

        assert!(!trees.is_empty());
        for tree in &trees {
            for chunk in np_chunks(tree) {
                assert_eq!(chunk.name(), NOUN_PHRASE);
                assert!(chunk.height() <= MAX_CHUNK_HEIGHT);
            }
        }
        assert!(np_chunk_text(&trees[0]).contains(&"an enigmatical smile".to_string()));
    }
}
