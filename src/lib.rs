//! Two 2-D spatial indexes over axis-aligned rectangles:
//!
//! - [`rbush`]: a dynamic R-tree with incremental insert, delete, and
//!   OMT bulk-load.
//! - [`flatbush`]: a static, Hilbert-packed R-tree built once from a known
//!   item count.
//!
//! Both share the [`envelope::Envelope`]/[`envelope::Boundable`] data model
//! and the [`error::RBushError`] error type.

pub mod envelope;
pub mod error;
pub mod flatbush;
mod logging;
pub mod quickselect;
pub mod rbush;

pub use envelope::{Boundable, Envelope};
pub use error::RBushError;
pub use flatbush::Flatbush;
pub use rbush::RBush;
