//! Collapsed-subtree bookkeeping and the visible-set filter.
//!
//! [`CollapseState`] is plain session state owned by the caller; every
//! filter pass takes it together with the pedigree snapshot and derives
//! the visible view from scratch. Hiding follows the directed father ->
//! child relation only. The undirected adjacency used for path finding
//! answers a different question and is built separately in `tour`.

use crate::layout::ParentEdge;
use crate::member::MemberId;
use crate::pedigree::Pedigree;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CollapseState {
    collapsed: HashSet<MemberId>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn is_collapsed(&self, id: MemberId) -> bool {
        self.collapsed.contains(&id)
    }

    #[inline(always)]
    pub fn collapsed_ids(&self) -> &HashSet<MemberId> {
        &self.collapsed
    }

    /// Collapses the subtree under `id`. Collapsing a childless member or
    /// an already-collapsed one changes nothing.
    pub fn collapse(&mut self, pedigree: &Pedigree, id: MemberId) -> bool {
        if !pedigree.has_children(id) {
            return false;
        }
        self.collapsed.insert(id)
    }

    pub fn expand(&mut self, id: MemberId) -> bool {
        self.collapsed.remove(&id)
    }

    /// Click behavior: expand when collapsed, otherwise collapse. Returns
    /// whether `id` is collapsed afterwards.
    pub fn toggle(&mut self, pedigree: &Pedigree, id: MemberId) -> bool {
        if self.is_collapsed(id) {
            self.expand(id);
            false
        } else {
            self.collapse(pedigree, id)
        }
    }

    pub fn clear(&mut self) {
        self.collapsed.clear();
    }
}

/// The node/edge subset that survives the collapse filter.
#[derive(Clone, Debug, Default, Serialize)]
pub struct VisibleTree {
    visible: Vec<MemberId>,
    edges: Vec<ParentEdge>,
    #[serde(skip)]
    visible_set: HashSet<MemberId>,
}

impl VisibleTree {
    pub fn new_from_pedigree(pedigree: &Pedigree, collapse: &CollapseState) -> Self {
        let mut hidden: HashSet<MemberId> = HashSet::new();
        for &root in collapse.collapsed_ids() {
            // Walk down from the collapsed member; it stays visible itself,
            // even if a data cycle leads back to it.
            let mut seen: HashSet<MemberId> = HashSet::new();
            seen.insert(root);
            let mut queue: VecDeque<MemberId> =
                pedigree.children_of(root).iter().copied().collect();
            while let Some(id) = queue.pop_front() {
                if !seen.insert(id) {
                    continue;
                }
                hidden.insert(id);
                queue.extend(pedigree.children_of(id).iter().copied());
            }
        }

        let visible: Vec<MemberId> = pedigree
            .members()
            .iter()
            .map(|member| member.id)
            .filter(|id| !hidden.contains(id))
            .collect();
        let visible_set: HashSet<MemberId> = visible.iter().copied().collect();
        let edges = pedigree
            .members()
            .iter()
            .filter_map(|member| {
                member.father_id.map(|father_id| ParentEdge {
                    from: father_id,
                    to: member.id,
                })
            })
            .filter(|edge| visible_set.contains(&edge.from) && visible_set.contains(&edge.to))
            .collect();

        Self {
            visible,
            edges,
            visible_set,
        }
    }

    /// Visible member ids in record order.
    #[inline(always)]
    pub fn visible_ids(&self) -> &[MemberId] {
        &self.visible
    }

    #[inline(always)]
    pub fn edges(&self) -> &[ParentEdge] {
        &self.edges
    }

    #[inline(always)]
    pub fn contains(&self, id: MemberId) -> bool {
        self.visible_set.contains(&id)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}
