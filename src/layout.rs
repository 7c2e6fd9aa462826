//! Generation-row layout.
//!
//! Members are bucketed by their stored generation (one bucket per value,
//! unrecorded = 0), each bucket becomes one horizontal row centered on
//! x = 0, and one edge is emitted per resolved father link. There is no
//! tree recursion: row placement trusts the stored generation, which
//! keeps the pass O(n log n) and indifferent to orphans, multiple roots,
//! cycles, and generations that disagree with the parent's.

use crate::chinese_num::to_chinese_num;
use crate::member::{FamilyMember, MemberId};
use crate::pedigree::Pedigree;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParameters {
    pub node_width: f32,
    pub node_height: f32,
    pub horizontal_gap: f32,
    pub vertical_gap: f32,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 100.0,
            horizontal_gap: 60.0,
            vertical_gap: 120.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub x: f32,
    pub y: f32,
}

/// Father -> child link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentEdge {
    pub from: MemberId,
    pub to: MemberId,
}

/// Row marker rendered down the side of the chart, one per generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationBand {
    pub generation: i32,
    pub label: String,
    pub y: f32,
}

#[serde_as]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TreeLayout {
    #[serde_as(as = "Vec<(_, _)>")]
    positions: HashMap<MemberId, NodePosition>,
    edges: Vec<ParentEdge>,
    bands: Vec<GenerationBand>,
}

impl TreeLayout {
    pub fn new_from_pedigree(pedigree: &Pedigree) -> Self {
        Self::new_from_pedigree_with_parameters(pedigree, &LayoutParameters::default())
    }

    pub fn new_from_pedigree_with_parameters(
        pedigree: &Pedigree,
        parameters: &LayoutParameters,
    ) -> Self {
        let mut ret = Self::default();

        let mut buckets: HashMap<i32, Vec<&FamilyMember>> = HashMap::new();
        for member in pedigree.members() {
            buckets
                .entry(member.generation_key())
                .or_default()
                .push(member);
        }

        let generations: Vec<i32> = buckets.keys().copied().sorted().collect();
        for (bucket_index, generation) in generations.into_iter().enumerate() {
            let mut row = buckets.remove(&generation).unwrap_or_default();
            // Stable, so members sharing a sibling_order keep record order.
            row.sort_by_key(|member| member.sibling_order_key());

            let y = bucket_index as f32 * (parameters.node_height + parameters.vertical_gap);
            let count = row.len() as f32;
            let total_width =
                count * parameters.node_width + (count - 1.0) * parameters.horizontal_gap;
            let start_x = -total_width / 2.0;
            for (i, member) in row.iter().enumerate() {
                let x = start_x + i as f32 * (parameters.node_width + parameters.horizontal_gap);
                ret.positions.insert(member.id, NodePosition { x, y });
            }

            ret.bands.push(GenerationBand {
                generation,
                label: Self::band_label(generation, &row),
                y,
            });
        }

        for member in pedigree.members() {
            if let Some(father_id) = member.father_id {
                ret.edges.push(ParentEdge {
                    from: father_id,
                    to: member.id,
                });
            }
        }

        ret
    }

    /// Bucket 0 collects members with no recorded generation; when nobody
    /// in it explicitly recorded generation 0, it is labeled unknown.
    fn band_label(generation: i32, row: &[&FamilyMember]) -> String {
        if generation == 0 && row.iter().all(|member| member.generation.is_none()) {
            "未知".to_string()
        } else {
            format!("第{}世", to_chinese_num(generation))
        }
    }

    #[inline(always)]
    pub fn positions(&self) -> &HashMap<MemberId, NodePosition> {
        &self.positions
    }

    #[inline(always)]
    pub fn position_of(&self, id: MemberId) -> Option<NodePosition> {
        self.positions.get(&id).copied()
    }

    #[inline(always)]
    pub fn edges(&self) -> &[ParentEdge] {
        &self.edges
    }

    #[inline(always)]
    pub fn bands(&self) -> &[GenerationBand] {
        &self.bands
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Min/max corner of all node anchor points, None for an empty layout.
    pub fn bounds(&self) -> Option<(NodePosition, NodePosition)> {
        let mut positions = self.positions.values();
        let first = positions.next().copied()?;
        Some(positions.fold((first, first), |(min, max), p| {
            (
                NodePosition {
                    x: min.x.min(p.x),
                    y: min.y.min(p.y),
                },
                NodePosition {
                    x: max.x.max(p.x),
                    y: max.y.max(p.y),
                },
            )
        }))
    }
}
