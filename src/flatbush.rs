//! ## Flatbush — a static, Hilbert-packed R-tree
//!
//! Built once from a known number of rectangles: `insert` every item, then
//! `build`. The packed layout sits in flat parallel arrays rather than a
//! pointer-linked node graph, so a built Flatbush fits cache lines far better
//! than [`crate::rbush::RBush`] for read-heavy, static workloads (§4.8).

use crate::envelope::Envelope;
use crate::error::RBushError;
use tracing::{debug, info};

const DEFAULT_NODE_SIZE: usize = 16;
const MIN_NODE_SIZE: usize = 2;
const MAX_NODE_SIZE: usize = 65535;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Filling,
    Built,
}

/// A static R-tree over a fixed number of rectangles, packed by Hilbert
/// curve order. Construct with [`Flatbush::new`], `insert` exactly
/// `num_items` entries, then call `build` (or simply `query`, which builds
/// implicitly).
#[derive(Debug)]
pub struct Flatbush<T> {
    num_items: usize,
    node_size: usize,
    level_bounds: Vec<usize>,
    boxes: Vec<Envelope>,
    indices: Vec<usize>,
    items: Vec<Option<T>>,
    bounds: Envelope,
    state: State,
}

impl<T> Flatbush<T> {
    /// Creates a Flatbush declared to hold exactly `num_items` rectangles,
    /// using the default node size of 16.
    pub fn new(num_items: usize) -> Result<Self, RBushError> {
        Self::with_node_size(num_items, DEFAULT_NODE_SIZE)
    }

    /// Creates a Flatbush with an explicit node size, clamped to `[2, 65535]`.
    ///
    /// # Errors
    ///
    /// Returns [`RBushError::InvalidItemCount`] if `num_items == 0`.
    pub fn with_node_size(num_items: usize, node_size: usize) -> Result<Self, RBushError> {
        if num_items == 0 {
            return Err(RBushError::InvalidItemCount { num_items });
        }
        let node_size = node_size.clamp(MIN_NODE_SIZE, MAX_NODE_SIZE);

        // Do-while by construction: every tree, even a single item, gets at
        // least one level above the leaves (a root entry spanning them all).
        let mut n = num_items;
        let mut total = n;
        let mut level_bounds = vec![total];
        loop {
            n = (n + node_size - 1) / node_size;
            total += n;
            level_bounds.push(total);
            if n == 1 {
                break;
            }
        }

        info!(
            "creating Flatbush for {} items, node_size={}, total capacity={}",
            num_items, node_size, total
        );

        Ok(Flatbush {
            num_items,
            node_size,
            level_bounds,
            boxes: Vec::with_capacity(total),
            indices: Vec::with_capacity(total),
            items: Vec::with_capacity(num_items),
            bounds: Envelope::empty(),
            state: State::Filling,
        })
    }

    /// Declared item capacity.
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Current item count (O(1): just the length of the filled prefix).
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends one `(envelope, item)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`RBushError::CapacityExceeded`] if already holding
    /// `num_items` entries, regardless of build state.
    pub fn insert(&mut self, bounds: Envelope, item: T) -> Result<(), RBushError> {
        if self.items.len() >= self.num_items {
            return Err(RBushError::CapacityExceeded {
                num_items: self.num_items,
            });
        }
        debug!("flatbush insert #{}: {:?}", self.items.len(), bounds);
        let index = self.items.len();
        self.boxes.push(bounds);
        self.indices.push(index);
        self.items.push(Some(item));
        self.bounds.expand_to_include(&bounds);
        Ok(())
    }

    /// Packs all inserted items into the flat Hilbert-sorted layout.
    ///
    /// Idempotent once built. Implicitly called by `query` if not yet built.
    ///
    /// # Errors
    ///
    /// Returns [`RBushError::BuildIncomplete`] if fewer than `num_items`
    /// entries have been inserted.
    pub fn build(&mut self) -> Result<(), RBushError> {
        if self.state == State::Built {
            return Ok(());
        }
        if self.items.len() != self.num_items {
            return Err(RBushError::BuildIncomplete {
                inserted: self.items.len(),
                expected: self.num_items,
            });
        }

        info!("building Flatbush over {} items", self.num_items);

        let hilbert_values: Vec<u32> = self
            .boxes
            .iter()
            .map(|b| hilbert_value_of(b, &self.bounds))
            .collect();

        let mut order: Vec<usize> = (0..self.num_items).collect();
        order.sort_by_key(|&i| hilbert_values[i]);

        let sorted_boxes: Vec<Envelope> = order.iter().map(|&i| self.boxes[i]).collect();
        let sorted_indices: Vec<usize> = order.iter().map(|&i| self.indices[i]).collect();
        let mut sorted_items: Vec<Option<T>> = Vec::with_capacity(self.num_items);
        for &i in &order {
            sorted_items.push(self.items[i].take());
        }
        self.boxes = sorted_boxes;
        self.indices = sorted_indices;
        self.items = sorted_items;

        let mut pos = 0;
        for level in 0..self.level_bounds.len() - 1 {
            let level_end = self.level_bounds[level];
            while pos < level_end {
                let node_start = pos;
                let node_end = (pos + self.node_size).min(level_end);
                let mut node_bounds = Envelope::empty();
                for i in node_start..node_end {
                    node_bounds.expand_to_include(&self.boxes[i]);
                }
                self.boxes.push(node_bounds);
                self.indices.push(node_start);
                pos = node_end;
            }
        }

        debug!(
            "flatbush build complete: {} total entries across {} levels",
            self.boxes.len(),
            self.level_bounds.len()
        );
        self.state = State::Built;
        Ok(())
    }

    /// Always returns `false`: Flatbush has no removal. Present to satisfy
    /// the common external interface shape both indexes share.
    pub fn remove(&mut self, _bounds: &Envelope, _item: &T) -> bool {
        false
    }

    /// All payloads whose envelope intersects `search`, building implicitly
    /// if needed.
    pub fn query(&mut self, search: &Envelope) -> Vec<&T> {
        let mut result = Vec::new();
        self.query_visitor(search, |item| result.push(item));
        result
    }

    /// Streaming variant of [`Flatbush::query`]: `visit` is called exactly
    /// once per matching payload, in Hilbert-packed traversal order.
    pub fn query_visitor<'a, F: FnMut(&'a T)>(&'a mut self, search: &Envelope, mut visit: F) {
        if self.state != State::Built {
            // `build` only errors when the caller under-filled the declared
            // capacity; an implicit build at query time can't recover from
            // that, so the query simply sees nothing yet.
            if self.build().is_err() {
                return;
            }
        }
        self.query_visitor_built(search, &mut visit);
    }

    fn query_visitor_built<'a, F: FnMut(&'a T)>(&'a self, search: &Envelope, visit: &mut F) {
        if self.boxes.is_empty() || search.is_empty() || !search.intersects(&self.bounds) {
            return;
        }
        let top_level = self.level_bounds.len() - 1;
        // The top level always has exactly one entry (the root), which sits
        // at the end of the array, right after the level below it ends.
        let mut stack = vec![(self.level_bounds[top_level - 1], top_level)];

        while let Some((node_index, level)) = stack.pop() {
            let level_bound = self.level_bounds[level];
            let end = (node_index + self.node_size).min(level_bound);

            for pos in node_index..end {
                if !search.intersects(&self.boxes[pos]) {
                    continue;
                }
                if pos < self.num_items {
                    if let Some(item) = &self.items[pos] {
                        visit(item);
                    }
                } else {
                    stack.push((self.indices[pos], level - 1));
                }
            }
        }
    }
}

/// Maps an envelope's centre into 16-bit-per-axis coordinates relative to
/// `world` and computes its Hilbert curve value. Uses the unambiguous
/// `(centre - min) / extent` mapping on both axes (§4.8's note on the
/// original's asymmetric `x`-halving is not reproduced here).
fn hilbert_value_of(b: &Envelope, world: &Envelope) -> u32 {
    const HILBERT_MAX: f64 = 65535.0;
    let (cx, cy) = b.centre();

    let x = if world.width() > 0.0 {
        ((HILBERT_MAX * (cx - world.min_x) / world.width()).floor() as u32).min(65535)
    } else {
        0
    };
    let y = if world.height() > 0.0 {
        ((HILBERT_MAX * (cy - world.min_y) / world.height()).floor() as u32).min(65535)
    } else {
        0
    };

    hilbert_xy_to_index(x, y)
}

/// 16-bit (x, y) to Hilbert curve distance, following the classic
/// rotate-and-accumulate construction: at each bit level, fold the quadrant
/// into the running distance, then rotate/reflect the remaining coordinate
/// space so the next bit is evaluated in the child curve's own frame.
fn hilbert_xy_to_index(mut x: u32, mut y: u32) -> u32 {
    let mut rx;
    let mut ry;
    let mut d: u32 = 0;
    let mut s: u32 = 1 << 15;
    while s > 0 {
        rx = if (x & s) > 0 { 1 } else { 0 };
        ry = if (y & s) > 0 { 1 } else { 0 };
        d = d.wrapping_add(s.wrapping_mul(s).wrapping_mul((3 * rx) ^ ry));

        if ry == 0 {
            if rx == 1 {
                x = s.wrapping_sub(1).wrapping_sub(x);
                y = s.wrapping_sub(1).wrapping_sub(y);
            }
            std::mem::swap(&mut x, &mut y);
        }
        s >>= 1;
    }
    d
}
