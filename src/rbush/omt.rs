//! OMT (Overlap-Minimizing Top-down) bulk load (§4.6): recursively
//! partitions a batch of items into roughly square tiles using quickselect,
//! without ever fully sorting the batch.

use super::node::{union_bounds, Node, NodeChildren};
use crate::envelope::Boundable;
use crate::quickselect::quickselect;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use tracing::debug;

enum OmtShape {
    Leaf(Vec<usize>),
    Internal {
        height: usize,
        children: Vec<OmtShape>,
    },
}

/// Builds a balanced subtree from `items` via OMT packing and returns its
/// root node. Callers are responsible for merging the result into an
/// existing tree (see `RBush::load`).
pub fn build_subtree<T>(items: Vec<Boundable<T>>, max_entries: usize) -> Node<T> {
    let n = items.len();
    if n == 0 {
        return Node::empty_leaf();
    }
    let mut order: Vec<usize> = (0..n).collect();
    let shape = build_shape(&items, &mut order, 0, n - 1, 0, max_entries);

    let mut slots: Vec<Option<Boundable<T>>> = items.into_iter().map(Some).collect();
    materialize(&mut slots, shape)
}

fn build_shape<T>(
    items: &[Boundable<T>],
    order: &mut [usize],
    left: usize,
    right: usize,
    height: usize,
    max_entries: usize,
) -> OmtShape {
    let n = right - left + 1;

    if n <= max_entries {
        return OmtShape::Leaf(order[left..=right].to_vec());
    }

    let (height, m) = if height == 0 {
        let h = ((n as f64).ln() / (max_entries as f64).ln()).ceil().max(1.0) as usize;
        let m = (n as f64 / (max_entries as f64).powi((h - 1) as i32))
            .ceil()
            .max(1.0) as usize;
        debug!(
            "omt: outermost call picked height={}, top-level branching m={} for n={}",
            h, m, n
        );
        (h, m)
    } else {
        (height, max_entries)
    };

    let n2 = ((n as f64) / (m as f64)).ceil().max(1.0) as usize;
    let n1 = (n2 * ((m as f64).sqrt()).ceil() as usize).max(1);

    multi_select(items, order, left, right, n1, Axis::X);

    let mut children = Vec::new();
    let mut i = left;
    loop {
        let right2 = (i + n1 - 1).min(right);
        multi_select(items, order, i, right2, n2, Axis::Y);

        let mut j = i;
        loop {
            let right3 = (j + n2 - 1).min(right2);
            children.push(build_shape(items, order, j, right3, height - 1, max_entries));
            if right3 >= right2 {
                break;
            }
            j += n2;
        }

        if right2 >= right {
            break;
        }
        i += n1;
    }

    OmtShape::Internal { height, children }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Recursively quickselects `order[left..=right]` into contiguous groups of
/// size `n`, ordered by `axis`, without fully sorting the range.
fn multi_select<T>(items: &[Boundable<T>], order: &mut [usize], left: usize, right: usize, n: usize, axis: Axis) {
    let key = |idx: usize| -> f64 {
        match axis {
            Axis::X => items[idx].bounds.min_x,
            Axis::Y => items[idx].bounds.min_y,
        }
    };
    let cmp =
        |a: &usize, b: &usize| -> Ordering { OrderedFloat(key(*a)).cmp(&OrderedFloat(key(*b))) };

    let mut stack = vec![(left, right)];
    while let Some((l, r)) = stack.pop() {
        if r - l <= n {
            continue;
        }
        let mid = l + (((r - l) as f64) / (n as f64) / 2.0).ceil() as usize * n;
        quickselect(order, mid, l, r, &cmp);
        stack.push((l, mid));
        stack.push((mid, r));
    }
}

fn materialize<T>(slots: &mut [Option<Boundable<T>>], shape: OmtShape) -> Node<T> {
    match shape {
        OmtShape::Leaf(indices) => {
            let leaves: Vec<Boundable<T>> = indices
                .into_iter()
                .map(|i| slots[i].take().expect("each index is consumed exactly once"))
                .collect();
            let bounds = union_bounds(&leaves);
            Node {
                bounds,
                height: 1,
                children: NodeChildren::Leaves(leaves),
            }
        }
        OmtShape::Internal { height, children } => {
            let mut nodes = Vec::with_capacity(children.len());
            for c in children {
                nodes.push(materialize(slots, c));
            }
            let bounds = union_bounds(&nodes);
            Node {
                bounds,
                height,
                children: NodeChildren::Nodes(nodes),
            }
        }
    }
}
