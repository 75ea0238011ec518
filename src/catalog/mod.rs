//! Tool catalog wiring.
//!
//! Types here describe the manifest's tool entries once they have been placed
//! (name and type known). `Catalog` is what the generators consume; the
//! validator works on the raw manifest instead so it can report every defect.

pub mod index;
pub mod kind;
pub mod model;

pub use index::Catalog;
pub use kind::{ALL_TOOL_TYPES, ToolType, valid_type_names};
pub use model::{CATEGORY_FIELDS, SkippedTool, TOOL_FIELDS, ToolRecord};
