use crate::envelope::{Boundable, Envelope};

/// A node in the dynamic tree.
///
/// Per the design notes: a single `is_leaf`-equivalent flag per node suffices
/// (see [`NodeChildren`]) — children don't need a per-entry leaf/internal tag,
/// since every child of a given node is uniformly a payload or uniformly a
/// subtree.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub bounds: Envelope,
    pub height: usize,
    pub children: NodeChildren<T>,
}

/// The children of a [`Node`]: either the leaf payloads themselves, or
/// further subtrees.
#[derive(Debug, Clone)]
pub enum NodeChildren<T> {
    Leaves(Vec<Boundable<T>>),
    Nodes(Vec<Node<T>>),
}

/// Anything with an envelope — leaf entries and nodes alike — so the split
/// and bulk-load code can stay generic over which kind of child it's
/// handling.
pub trait Bounded {
    fn bounds(&self) -> Envelope;
}

impl<T> Bounded for Boundable<T> {
    fn bounds(&self) -> Envelope {
        self.bounds
    }
}

impl<T> Bounded for Node<T> {
    fn bounds(&self) -> Envelope {
        self.bounds
    }
}

pub fn union_bounds<X: Bounded>(items: &[X]) -> Envelope {
    items
        .iter()
        .fold(Envelope::empty(), |acc, x| acc.union(&x.bounds()))
}

impl<T> Node<T> {
    pub fn empty_leaf() -> Self {
        Node {
            bounds: Envelope::empty(),
            height: 1,
            children: NodeChildren::Leaves(Vec::new()),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.children, NodeChildren::Leaves(_))
    }

    pub fn len(&self) -> usize {
        match &self.children {
            NodeChildren::Leaves(v) => v.len(),
            NodeChildren::Nodes(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
