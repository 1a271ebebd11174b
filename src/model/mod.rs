//! Model types for analysis result content.
//!
//! This module holds two layers: the serde wire types that decode sections
//! of a service result on demand, and the typed views the query layer hands
//! back to callers.

mod fields;
mod info;
mod table;
pub(crate) mod wire;

pub use fields::FieldMap;
pub use info::ResultInfo;
pub use table::{Table, TableCell};
