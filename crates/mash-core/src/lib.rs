//! mash Core - Shared functionality for the mash launcher
//!
//! Everything here is independent of the terminal: loading the catalog,
//! deciding what is visible, grouping it, tracking the selection, and
//! handing the chosen command over to the platform shell.

pub mod catalog;
pub mod color;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod format;
pub mod selection;
pub mod tree;

pub use catalog::{Catalog, CatalogItem, ParsedCatalog};
pub use config::{ConfigResolver, ResolvedCatalog};
pub use error::{Error, Result};
pub use filter::FilterSpec;
pub use selection::{Input, Mode, SelectionController};
pub use tree::TreeNode;
