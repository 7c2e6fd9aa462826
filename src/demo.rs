//! Bundled demo family, used when no data source is configured.

use crate::member::{FamilyMember, members_from_json};
use crate::pedigree::Pedigree;
use anyhow::Result;

const BUILTIN_DEMO_JSON: &str = include_str!("../assets/demo_members.json");

/// The bundled four-generation demo family, raw.
pub fn demo_members() -> Result<Vec<FamilyMember>> {
    Ok(members_from_json(BUILTIN_DEMO_JSON)?)
}

/// The bundled demo family, normalized.
pub fn demo_pedigree() -> Result<Pedigree> {
    Ok(Pedigree::new_from_records(demo_members()?)?)
}
