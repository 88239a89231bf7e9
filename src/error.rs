//! ## Errors
//!
//! Custom errors used internally by the crate's two indexes.

use std::error::Error;
use std::fmt;

/// Errors specific to invalid operations or parameters on either index.
#[derive(Debug)]
pub enum RBushError {
    /// Occurs when an invalid capacity is provided to an RBush constructor.
    InvalidCapacity {
        /// The capacity value that was provided.
        capacity: usize,
    },
    /// Occurs when a Flatbush is constructed with a zero item count.
    InvalidItemCount {
        /// The item count that was provided.
        num_items: usize,
    },
    /// Occurs when `insert` is called on a Flatbush that already holds
    /// `num_items` entries.
    CapacityExceeded {
        /// The declared item count.
        num_items: usize,
    },
    /// Occurs when `build` is called before all declared items were inserted.
    BuildIncomplete {
        /// How many items were actually inserted.
        inserted: usize,
        /// How many items the Flatbush was constructed to hold.
        expected: usize,
    },
}

impl fmt::Display for RBushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RBushError::InvalidCapacity { capacity } => {
                write!(
                    f,
                    "Invalid capacity: {capacity}. Capacity must be at least 2."
                )
            }
            RBushError::InvalidItemCount { num_items } => {
                write!(
                    f,
                    "Invalid item count: {num_items}. Flatbush requires numItems > 0."
                )
            }
            RBushError::CapacityExceeded { num_items } => {
                write!(
                    f,
                    "Flatbush already holds its declared {num_items} items; insert() has no room left"
                )
            }
            RBushError::BuildIncomplete { inserted, expected } => {
                write!(
                    f,
                    "Flatbush::build() called with only {inserted} of {expected} declared items inserted"
                )
            }
        }
    }
}

impl Error for RBushError {}
