//! Comps catalog handling.
//!
//! - `parser`: push-style markup parser
//! - `state`: the category/group state machine the parser drives
//! - `alias`: legacy group names mapped onto comps ids
//! - `resolver`: group name to package names across many catalogs

mod alias;
mod parser;
mod resolver;
mod state;

pub use alias::{resolve_alias, AliasTarget};
pub use parser::{parse_markup, MarkupError, MarkupHandler};
pub use resolver::{resolve_group_to_packages, CatalogDocument, GroupResolver};
pub use state::{CatalogState, ParseContext, QueryMode};
