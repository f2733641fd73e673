//! Knowledge-base tables and entity-type reconciliation
//!
//! The tables are built once at start-up and passed explicitly to the code
//! that reads them; nothing here holds global state.

pub mod alias;
pub mod banned;
pub mod domain;
pub mod reconcile;

pub use alias::*;
pub use banned::*;
pub use domain::*;
pub use reconcile::*;

use crate::error::Result;
use std::path::Path;

/// Read-only lookup tables shared by the entity-linking helpers
#[derive(Clone, Debug)]
pub struct KnowledgeTables {
    /// Domain to role to type identifier mapping
    pub domain_types: DomainTypeMapping,

    /// Phrases and patterns never accepted as entity aliases
    pub banned: BannedPhrases,
}

impl KnowledgeTables {
    /// Built-in tables
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            domain_types: DomainTypeMapping::builtin(),
            banned: BannedPhrases::builtin()?,
        })
    }

    /// Built-in banned phrases with a domain mapping loaded from JSON
    pub fn with_domain_types_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            domain_types: DomainTypeMapping::from_json_file(path)?,
            banned: BannedPhrases::builtin()?,
        })
    }
}
