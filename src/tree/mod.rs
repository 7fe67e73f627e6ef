/*
    This module holds the parse trees the chart parser produces
*/

use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::{Production, Symbol};

/// A parse tree. Leaves hold the matched word, branches the nonterminal that
/// was expanded and one child per right-hand-side symbol of the rule used.
///
/// Trees own all of their nodes, so trees from the same parse share nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tree {
    Leaf(String),
    Branch(String, Vec<Tree>),
}

impl Tree {
    pub fn leaf(word: impl Into<String>) -> Self {
        Tree::Leaf(word.into())
    }

    pub fn branch(label: impl Into<String>, children: Vec<Tree>) -> Self {
        Tree::Branch(label.into(), children)
    }

    pub fn label(&self) -> Symbol {
        match self {
            Tree::Leaf(word) => Symbol::Terminal(word.clone()),
            Tree::Branch(label, _) => Symbol::Nonterminal(label.clone()),
        }
    }

    /// The label without its kind: the word for leaves, the nonterminal for
    /// branches.
    pub fn name(&self) -> &str {
        match self {
            Tree::Leaf(word) | Tree::Branch(word, _) => word,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf(_))
    }

    pub fn children(&self) -> &[Tree] {
        match self {
            Tree::Leaf(_) => &[],
            Tree::Branch(_, children) => children,
        }
    }

    /// 1 for a leaf, otherwise one more than the tallest child.
    pub fn height(&self) -> usize {
        match self {
            Tree::Leaf(_) => 1,
            Tree::Branch(_, children) => 1 + children.iter().map(Tree::height).max().unwrap_or(0),
        }
    }

    /// The words at the leaves, left to right.
    pub fn flatten(&self) -> Vec<&str> {
        self.subtrees(Tree::is_leaf).map(Tree::name).collect()
    }

    /// Every node, this one included, that satisfies `predicate`, in
    /// pre-order. The predicate never stops the walk from descending.
    pub fn subtrees<P>(&self, predicate: P) -> Subtrees<'_, P>
    where
        P: FnMut(&Tree) -> bool,
    {
        Subtrees {
            stack: vec![self],
            predicate,
        }
    }

    /// Each word with the label of the node directly above it.
    pub fn pos(&self) -> Vec<(&str, &str)> {
        let mut tagged = Vec::new();
        self.collect_pos(&mut tagged);
        tagged
    }

    fn collect_pos<'t>(&'t self, tagged: &mut Vec<(&'t str, &'t str)>) {
        if let Tree::Branch(label, children) = self {
            for child in children {
                match child {
                    Tree::Leaf(word) => tagged.push((word.as_str(), label.as_str())),
                    Tree::Branch(..) => child.collect_pos(tagged),
                }
            }
        }
    }

    /// The rule applied at every branch, in pre-order.
    pub fn productions(&self) -> Vec<Production> {
        self.subtrees(|tree| !tree.is_leaf())
            .map(|tree| Production::new(tree.name(), tree.children().iter().map(Tree::label).collect()))
            .collect()
    }

    fn write_indented(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        match self {
            Tree::Leaf(word) => write!(f, "{}", word),
            Tree::Branch(label, children) if children.iter().all(Tree::is_leaf) => {
                write!(f, "({} {})", label, children.iter().map(Tree::name).join(" "))
            }
            Tree::Branch(label, children) => {
                write!(f, "({}", label)?;
                for child in children {
                    write!(f, "\n{:width$}", "", width = (depth + 1) * 2)?;
                    child.write_indented(f, depth + 1)?;
                }
                write!(f, ")")
            }
        }
    }
}

// `{}` prints the tree on one line, `{:#}` breaks it over several lines
impl Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            return self.write_indented(f, 0);
        }

        match self {
            Tree::Leaf(word) => write!(f, "{}", word),
            Tree::Branch(label, children) => {
                write!(f, "({}", label)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Pre-order iterator returned by [`Tree::subtrees`].
pub struct Subtrees<'t, P> {
    stack: Vec<&'t Tree>,
    predicate: P,
}

impl<'t, P> Iterator for Subtrees<'t, P>
where
    P: FnMut(&Tree) -> bool,
{
    type Item = &'t Tree;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(tree) = self.stack.pop() {
            self.stack.extend(tree.children().iter().rev());
            if (self.predicate)(tree) {
                return Some(tree);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(label: &str, children: Vec<Tree>) -> Tree {
        Tree::branch(label, children)
    }

    fn leaf(word: &str) -> Tree {
        Tree::leaf(word)
    }

    // (S (NP (Det the) (N door)) (VP (V came) (NP (N home))))
    fn sample() -> Tree {
        branch("S", vec![
            branch("NP", vec![
                branch("Det", vec![leaf("the")]),
                branch("N", vec![leaf("door")])
            ]),
            branch("VP", vec![
                branch("V", vec![leaf("came")]),
                branch("NP", vec![branch("N", vec![leaf("home")])])
            ])
        ])
    }

    #[test]
    fn labels_and_children() {
        let tree = sample();

        assert_eq!(tree.label(), Symbol::Nonterminal("S".to_string()));
        assert_eq!(tree.children().len(), 2);
        assert_eq!(leaf("door").label(), Symbol::Terminal("door".to_string()));
        assert!(leaf("door").children().is_empty());
    }

    #[test]
    fn heights() {
        let tree = sample();

        assert_eq!(leaf("home").height(), 1);
        assert_eq!(branch("N", vec![leaf("home")]).height(), 2);
        assert_eq!(tree.children()[0].height(), 3);
        assert_eq!(tree.height(), 5);
    }

    #[test]
    fn flatten_reproduces_words() {
        assert_eq!(sample().flatten(), vec!["the", "door", "came", "home"]);
        assert_eq!(leaf("home").flatten(), vec!["home"]);
    }

    #[test]
    fn subtrees_visit_in_preorder() {
        let tree = sample();
        let labels = tree.subtrees(|_| true).map(Tree::name).collect::<Vec<_>>();

        assert_eq!(labels, vec![
            "S", "NP", "Det", "the", "N", "door", "VP", "V", "came", "NP", "N", "home"
        ]);
    }

    #[test]
    fn subtrees_predicate_does_not_prune() {
        let tree = sample();
        let nps = tree.subtrees(|t| t.name() == "NP").map(ToString::to_string).collect::<Vec<_>>();
        let nouns = tree.subtrees(|t| t.name() == "N").count();

        assert_eq!(nps, vec!["(NP (Det the) (N door))", "(NP (N home))"]);
        assert_eq!(nouns, 2);
    }

    #[test]
    fn pos_tags() {
        assert_eq!(sample().pos(), vec![
            ("the", "Det"),
            ("door", "N"),
            ("came", "V"),
            ("home", "N")
        ]);
    }

    #[test]
    fn productions_used() {
        let rules = branch("NP", vec![branch("N", vec![leaf("home")])]).productions();

        assert_eq!(rules, vec![
            Production::new("NP", vec![Symbol::Nonterminal("N".to_string())]),
            Production::new("N", vec![Symbol::Terminal("home".to_string())]),
        ]);
    }

    #[test]
    fn display() {
        let tree = sample();

        assert_eq!(tree.to_string(), "(S (NP (Det the) (N door)) (VP (V came) (NP (N home))))");
        assert_eq!(format!("{:#}", tree), "\
(S
  (NP
    (Det the)
    (N door))
  (VP
    (V came)
    (NP
      (N home))))");
    }
}
