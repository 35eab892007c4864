//! Tool-facing operations over the registrar command layer.
//!
//! This crate provides the operation catalogue (tool name, input schema and
//! remote command for every supported operation), the conversion of host
//! arguments into [`registrar::CommandRequest`]s, text replies, and the
//! read-only account resources.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Operations sequence argument validation and a
//! call through the [`registrar::CommandInvoker`] port. They contain no
//! transport details and no envelope rules of their own.

pub mod catalog;
pub mod errors;
pub mod reply;
pub mod resources;

pub use catalog::{Access, Catalog, Operation, Param, ParamKind, OPERATIONS};
pub use errors::ArgumentError;
pub use reply::{call, ToolReply};
pub use resources::Resource;

#[cfg(test)]
pub(crate) mod testing;
