//! Shortest relation paths and the guided tour that walks them.
//!
//! The path search treats father links as undirected so any two members
//! connected through a chain of recorded relations can be joined, cousins
//! through their shared ancestor included. This adjacency is rebuilt here
//! on every call and is deliberately separate from the directed walk that
//! the collapse filter performs.

use crate::member::MemberId;
use crate::pedigree::Pedigree;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Minimum-hop path from `start_id` to `end_id`, both endpoints included.
/// `None` when either id is unknown or the two members share no recorded
/// relation chain. Ties between equal-length paths follow record order.
pub fn find_shortest_path(
    pedigree: &Pedigree,
    start_id: MemberId,
    end_id: MemberId,
) -> Option<Vec<MemberId>> {
    if start_id == end_id {
        return pedigree.contains(start_id).then(|| vec![start_id]);
    }

    let mut adjacency: HashMap<MemberId, Vec<MemberId>> = HashMap::new();
    for member in pedigree.members() {
        adjacency.entry(member.id).or_default();
        if let Some(father_id) = member.father_id {
            adjacency.entry(member.id).or_default().push(father_id);
            adjacency.entry(father_id).or_default().push(member.id);
        }
    }

    let mut queue: VecDeque<MemberId> = VecDeque::new();
    let mut visited: HashSet<MemberId> = HashSet::new();
    let mut predecessor: HashMap<MemberId, MemberId> = HashMap::new();
    queue.push_back(start_id);
    visited.insert(start_id);

    while let Some(current) = queue.pop_front() {
        if current == end_id {
            let mut path = vec![current];
            let mut trace = current;
            while let Some(&previous) = predecessor.get(&trace) {
                path.push(previous);
                trace = previous;
            }
            path.reverse();
            return Some(path);
        }
        let neighbors = adjacency
            .get(&current)
            .map(|n| n.as_slice())
            .unwrap_or(&[]);
        for &neighbor in neighbors {
            if visited.insert(neighbor) {
                predecessor.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    None
}

/// Stepwise navigation state for one computed path. The 3D view advances
/// it on a timer; pausing is a flag for the caller's scheduler, `advance`
/// itself always moves.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Tour {
    path: Vec<MemberId>,
    step: usize,
    paused: bool,
}

impl Tour {
    pub fn new_from_path(path: Vec<MemberId>) -> Self {
        Self {
            path,
            step: 0,
            paused: false,
        }
    }

    /// Tour along the shortest path between two members, if one exists.
    pub fn new_between(pedigree: &Pedigree, start_id: MemberId, end_id: MemberId) -> Option<Self> {
        find_shortest_path(pedigree, start_id, end_id).map(Self::new_from_path)
    }

    #[inline(always)]
    pub fn path(&self) -> &[MemberId] {
        &self.path
    }

    #[inline(always)]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline(always)]
    pub fn total_steps(&self) -> usize {
        self.path.len()
    }

    #[inline(always)]
    pub fn current_id(&self) -> Option<MemberId> {
        self.path.get(self.step).copied()
    }

    /// The station after the current one, shown as "up next" in the HUD.
    #[inline(always)]
    pub fn next_id(&self) -> Option<MemberId> {
        self.path.get(self.step + 1).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.step + 1 >= self.path.len()
    }

    /// Moves one station forward. Returns false at the end of the path.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.step += 1;
        true
    }

    pub fn progress_percent(&self) -> f32 {
        let total = self.path.len();
        let span = total.saturating_sub(1).max(1);
        ((self.step as f32 / span as f32) * 100.0).min(100.0)
    }

    #[inline(always)]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::FamilyMember;

    fn member(id: MemberId, father_uid: Option<&str>) -> FamilyMember {
        FamilyMember {
            id,
            uid: Some(format!("U{id}")),
            father_uid: father_uid.map(|u| u.to_string()),
            father_id: None,
            generation: None,
            name: format!("成员{id}"),
            gender: None,
            sibling_order: None,
            official_position: None,
            is_alive: true,
            spouse: None,
            bio: None,
            birth_date: None,
            death_date: None,
            residence_place: None,
        }
    }

    // Two lineages: 1 -> {2 -> 4, 3 -> 5} and 6 -> 7.
    fn fixture() -> Pedigree {
        Pedigree::new_from_records(vec![
            member(1, None),
            member(2, Some("U1")),
            member(3, Some("U1")),
            member(4, Some("U2")),
            member(5, Some("U3")),
            member(6, None),
            member(7, Some("U6")),
        ])
        .unwrap()
    }

    #[test]
    fn test_same_start_and_end() {
        let pedigree = fixture();
        assert_eq!(find_shortest_path(&pedigree, 4, 4), Some(vec![4]));
        assert_eq!(find_shortest_path(&pedigree, 999, 999), None);
    }

    #[test]
    fn test_siblings_connect_through_father() {
        let pedigree = fixture();
        assert_eq!(find_shortest_path(&pedigree, 2, 3), Some(vec![2, 1, 3]));
    }

    #[test]
    fn test_cousins_connect_through_shared_ancestor() {
        let pedigree = fixture();
        assert_eq!(
            find_shortest_path(&pedigree, 4, 5),
            Some(vec![4, 2, 1, 3, 5])
        );
    }

    #[test]
    fn test_direct_line_is_walked_upwards() {
        let pedigree = fixture();
        assert_eq!(find_shortest_path(&pedigree, 4, 1), Some(vec![4, 2, 1]));
        assert_eq!(find_shortest_path(&pedigree, 1, 4), Some(vec![1, 2, 4]));
    }

    #[test]
    fn test_disjoint_lineages_have_no_path() {
        let pedigree = fixture();
        assert_eq!(find_shortest_path(&pedigree, 4, 7), None);
        assert_eq!(find_shortest_path(&pedigree, 1, 6), None);
    }

    #[test]
    fn test_unknown_ids_have_no_path() {
        let pedigree = fixture();
        assert_eq!(find_shortest_path(&pedigree, 1, 999), None);
        assert_eq!(find_shortest_path(&pedigree, 999, 1), None);
    }

    #[test]
    fn test_empty_pedigree() {
        let pedigree = Pedigree::new_from_records(vec![]).unwrap();
        assert_eq!(find_shortest_path(&pedigree, 1, 2), None);
        assert_eq!(find_shortest_path(&pedigree, 1, 1), None);
    }

    #[test]
    fn test_tour_steps_and_progress() {
        let pedigree = fixture();
        let mut tour = Tour::new_between(&pedigree, 2, 3).unwrap();
        assert_eq!(tour.path(), &[2, 1, 3]);
        assert_eq!(tour.current_id(), Some(2));
        assert_eq!(tour.next_id(), Some(1));
        assert_eq!(tour.progress_percent(), 0.0);

        assert!(tour.advance());
        assert_eq!(tour.current_id(), Some(1));
        assert_eq!(tour.progress_percent(), 50.0);

        assert!(tour.advance());
        assert_eq!(tour.current_id(), Some(3));
        assert_eq!(tour.next_id(), None);
        assert_eq!(tour.progress_percent(), 100.0);
        assert!(tour.is_finished());
        assert!(!tour.advance());
        assert_eq!(tour.current_id(), Some(3));
    }

    #[test]
    fn test_single_stop_tour() {
        let pedigree = fixture();
        let tour = Tour::new_between(&pedigree, 6, 6).unwrap();
        assert_eq!(tour.total_steps(), 1);
        assert!(tour.is_finished());
        assert_eq!(tour.progress_percent(), 0.0);
    }

    #[test]
    fn test_no_tour_without_path() {
        let pedigree = fixture();
        assert!(Tour::new_between(&pedigree, 4, 7).is_none());
    }

    #[test]
    fn test_pause_is_a_flag_only() {
        let mut tour = Tour::new_from_path(vec![1, 2]);
        tour.pause();
        assert!(tour.is_paused());
        assert!(tour.advance());
        tour.resume();
        assert!(!tour.is_paused());
    }
}
