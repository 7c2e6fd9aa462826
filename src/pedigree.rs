//! Normalized member snapshot.
//!
//! Raw rows reference their father by external string ref (`father_uid`),
//! so imports can arrive in any order and in partial batches. Building a
//! [`Pedigree`] resolves those refs to integer ids in two passes (collect
//! the ref map, then link) and indexes the result. The data is treated as
//! a possibly malformed forest: dangling refs become roots, cycles are
//! kept as-is for the traversal layers to cope with.

use crate::error::ZupuError;
use crate::member::{FamilyMember, MemberId};
use std::collections::HashMap;
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct Pedigree {
    members: Vec<FamilyMember>,
    id_index: HashMap<MemberId, usize>,
    children: HashMap<MemberId, Vec<MemberId>>,
}

impl Pedigree {
    /// Normalizes and indexes a full record fetch. Record order is
    /// preserved; it is the tie-breaker for sibling layout and search.
    pub fn new_from_records(mut records: Vec<FamilyMember>) -> Result<Self, ZupuError> {
        for member in &records {
            member.validate()?;
        }

        // Pass 1: uid -> id. Duplicates overwrite last-wins so partial
        // re-imports do not fail the whole batch.
        let mut uid_to_id: HashMap<&str, MemberId> = HashMap::new();
        for member in &records {
            if let Some(uid) = member.uid_key() {
                uid_to_id.insert(uid, member.id);
            }
        }

        // Pass 2: resolve father links. A ref with no match is dropped to
        // null and the member becomes a synthetic root.
        let resolved: Vec<Option<MemberId>> = records
            .iter()
            .map(|member| match member.father_uid_key() {
                Some(father_uid) => {
                    let father_id = uid_to_id.get(father_uid).copied();
                    if father_id.is_none() {
                        debug!(
                            member_id = member.id,
                            father_uid, "Dangling father ref, member becomes a root"
                        );
                    }
                    father_id
                }
                None => None,
            })
            .collect();
        for (member, father_id) in records.iter_mut().zip(resolved) {
            member.father_id = father_id;
        }

        let mut ret = Self {
            members: records,
            id_index: HashMap::new(),
            children: HashMap::new(),
        };
        for (pos, member) in ret.members.iter().enumerate() {
            if ret.id_index.insert(member.id, pos).is_some() {
                return Err(ZupuError::Validation(format!(
                    "Duplicate member id {}",
                    member.id
                )));
            }
        }
        for member in &ret.members {
            if let Some(father_id) = member.father_id {
                ret.children.entry(father_id).or_default().push(member.id);
            }
        }
        Ok(ret)
    }

    pub fn new_from_json(text: &str) -> Result<Self, ZupuError> {
        Self::new_from_records(crate::member::members_from_json(text)?)
    }

    #[inline(always)]
    pub fn members(&self) -> &[FamilyMember] {
        &self.members
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, id: MemberId) -> Option<&FamilyMember> {
        self.id_index.get(&id).map(|&pos| &self.members[pos])
    }

    #[inline(always)]
    pub fn contains(&self, id: MemberId) -> bool {
        self.id_index.contains_key(&id)
    }

    /// Children in record order. Members without children yield an empty
    /// slice, including ids not present at all.
    #[inline(always)]
    pub fn children_of(&self, id: MemberId) -> &[MemberId] {
        self.children
            .get(&id)
            .map(|children| children.as_slice())
            .unwrap_or(&[])
    }

    #[inline(always)]
    pub fn has_children(&self, id: MemberId) -> bool {
        !self.children_of(id).is_empty()
    }

    /// Members without a resolved father, in record order.
    pub fn roots(&self) -> Vec<&FamilyMember> {
        self.members
            .iter()
            .filter(|member| member.father_id.is_none())
            .collect()
    }

    /// Case-insensitive substring search over names; first match in
    /// record order. Blank queries match nothing.
    pub fn find_by_name(&self, query: &str) -> Option<&FamilyMember> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.members
            .iter()
            .find(|member| member.name.to_lowercase().contains(&query))
    }

    /// Oldest generation on record, with unrecorded generations counting
    /// as 0. Used as the zero point of the per-generation color ramp.
    pub fn min_generation(&self) -> Option<i32> {
        self.members
            .iter()
            .map(|member| member.generation_key())
            .min()
    }

    /// Generations below the oldest recorded one, for color shading.
    pub fn generation_offset(&self, member: &FamilyMember) -> u32 {
        let min = self.min_generation().unwrap_or(0);
        (member.generation_key() - min).max(0) as u32
    }
}
