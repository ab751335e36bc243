//! Explicit game trees for exercising the engines on hand-computed values.

use crate::Position;
use mancala_core::Side;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Node {
    children: Vec<usize>,
    value: f64,
    terminal: bool,
}

/// Arena of nodes; node 0 is the root.
#[derive(Debug, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    enumerations: Cell<usize>,
}

impl Tree {
    fn push(&mut self, value: f64) -> usize {
        self.nodes.push(Node {
            value,
            ..Node::default()
        });
        self.nodes.len() - 1
    }

    fn into_root(self) -> TreePosition {
        TreePosition {
            tree: Rc::new(self),
            node: 0,
        }
    }

    /// A root with no moves that is not flagged terminal.
    pub fn leaf(value: f64) -> TreePosition {
        let mut tree = Tree::default();
        tree.push(value);
        tree.into_root()
    }

    /// A root whose children are leaves with the given values.
    pub fn flat(values: &[f64]) -> TreePosition {
        let mut tree = Tree::default();
        let root = tree.push(0.0);
        for &value in values {
            let leaf = tree.push(value);
            tree.nodes[root].children.push(leaf);
        }
        tree.into_root()
    }

    /// A two-ply tree: one inner node per row, one leaf per value.
    pub fn uniform(rows: &[&[f64]]) -> TreePosition {
        let mut tree = Tree::default();
        let root = tree.push(0.0);
        for row in rows {
            let inner = tree.push(0.0);
            tree.nodes[root].children.push(inner);
            for &value in row.iter() {
                let leaf = tree.push(value);
                tree.nodes[inner].children.push(leaf);
            }
        }
        tree.into_root()
    }
}

/// A node of a shared [`Tree`]; moves are child node ids.
#[derive(Debug, Clone)]
pub struct TreePosition {
    tree: Rc<Tree>,
    node: usize,
}

impl TreePosition {
    fn root_mut(&mut self) -> &mut Node {
        let tree = Rc::get_mut(&mut self.tree).expect("tree is still being built");
        &mut tree.nodes[self.node]
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.root_mut().value = value;
        self
    }

    pub fn terminal(mut self) -> Self {
        self.root_mut().terminal = true;
        self
    }

    /// Static value of this node.
    pub fn value(&self) -> f64 {
        self.tree.nodes[self.node].value
    }

    /// The move leading to this node's `index`-th child.
    pub fn child(&self, index: usize) -> usize {
        self.tree.nodes[self.node].children[index]
    }

    /// How many times any node of the tree had its moves enumerated.
    pub fn enumerations(&self) -> usize {
        self.tree.enumerations.get()
    }
}

impl Position for TreePosition {
    type Move = usize;

    fn legal_moves(&self, _side: Side) -> Vec<usize> {
        self.tree.enumerations.set(self.tree.enumerations.get() + 1);
        self.tree.nodes[self.node].children.clone()
    }

    fn is_terminal(&self) -> bool {
        self.tree.nodes[self.node].terminal
    }

    fn has_won(&self, _side: Side) -> bool {
        false
    }

    fn apply_move(&self, _side: Side, mv: usize) -> Self {
        debug_assert!(self.tree.nodes[self.node].children.contains(&mv));
        TreePosition {
            tree: Rc::clone(&self.tree),
            node: mv,
        }
    }
}
