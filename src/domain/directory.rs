use std::collections::HashMap;

use super::models::{Club, ClubId};
use crate::errors::{EngineError, EngineResult};

/// Read-only index over a club hierarchy snapshot.
///
/// The national root of every club (its top-level ancestor) is resolved once
/// when the directory is built, so national peer checks are plain lookups.
#[derive(Debug, Clone)]
pub struct ClubDirectory {
    clubs: HashMap<ClubId, Club>,
    children: HashMap<ClubId, Vec<ClubId>>,
    national_roots: HashMap<ClubId, ClubId>,
}

impl ClubDirectory {
    pub fn new(clubs: Vec<Club>) -> EngineResult<Self> {
        let clubs: HashMap<ClubId, Club> = clubs.into_iter().map(|c| (c.id, c)).collect();
        let children = build_children(&clubs)?;
        let national_roots = resolve_national_roots(&clubs)?;

        Ok(Self {
            clubs,
            children,
            national_roots,
        })
    }

    pub fn get(&self, id: ClubId) -> EngineResult<&Club> {
        self.clubs.get(&id).ok_or(EngineError::UnknownClub(id))
    }

    pub fn clubs(&self) -> impl Iterator<Item = &Club> {
        self.clubs.values()
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }

    pub fn parent(&self, id: ClubId) -> EngineResult<Option<&Club>> {
        match self.get(id)?.parent_id {
            Some(parent_id) => self.get(parent_id).map(Some),
            None => Ok(None),
        }
    }

    pub fn children(&self, id: ClubId) -> &[ClubId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn national_root(&self, id: ClubId) -> EngineResult<ClubId> {
        self.national_roots
            .get(&id)
            .copied()
            .ok_or(EngineError::UnknownClub(id))
    }

    /// Whether two clubs sit under the same top-level national ancestor
    pub fn is_national_peer(&self, club: ClubId, other: ClubId) -> bool {
        match (self.national_roots.get(&club), self.national_roots.get(&other)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn national_peer_set(&self, id: ClubId) -> EngineResult<Vec<ClubId>> {
        let root = self.national_root(id)?;
        let mut peers: Vec<ClubId> = self
            .national_roots
            .iter()
            .filter(|(_, r)| **r == root)
            .map(|(club, _)| *club)
            .collect();
        peers.sort_unstable();
        Ok(peers)
    }
}

fn build_children(clubs: &HashMap<ClubId, Club>) -> EngineResult<HashMap<ClubId, Vec<ClubId>>> {
    let mut children: HashMap<ClubId, Vec<ClubId>> = HashMap::new();
    for club in clubs.values() {
        if let Some(parent_id) = club.parent_id {
            if !clubs.contains_key(&parent_id) {
                return Err(EngineError::UnknownClub(parent_id));
            }
            children.entry(parent_id).or_default().push(club.id);
        }
    }
    for ids in children.values_mut() {
        ids.sort_unstable();
    }
    Ok(children)
}

fn resolve_national_roots(clubs: &HashMap<ClubId, Club>) -> EngineResult<HashMap<ClubId, ClubId>> {
    let mut roots = HashMap::with_capacity(clubs.len());
    for club in clubs.values() {
        let root = walk_to_root(clubs, club)?;
        roots.insert(club.id, root);
    }
    Ok(roots)
}

fn walk_to_root(clubs: &HashMap<ClubId, Club>, club: &Club) -> EngineResult<ClubId> {
    let mut current = club;
    // A chain longer than the club count can only come from a cycle
    for _ in 0..=clubs.len() {
        match current.parent_id {
            None => return Ok(current.id),
            Some(parent_id) => {
                current = clubs
                    .get(&parent_id)
                    .ok_or(EngineError::UnknownClub(parent_id))?;
            }
        }
    }
    Err(EngineError::CyclicHierarchy(club.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club(id: ClubId, parent_id: Option<ClubId>) -> Club {
        Club {
            id,
            name: format!("Club {id}"),
            acronym: format!("C{id}"),
            coordinate: None,
            parent_id,
            timezone: "UTC".to_string(),
            site_url: None,
        }
    }

    fn two_nations() -> ClubDirectory {
        // 1: nation A -> 2: region -> 3, 4: clubs; 10: nation B -> 11: club
        ClubDirectory::new(vec![
            club(1, None),
            club(2, Some(1)),
            club(3, Some(2)),
            club(4, Some(2)),
            club(10, None),
            club(11, Some(10)),
        ])
        .unwrap()
    }

    #[test]
    fn test_national_roots() {
        let directory = two_nations();
        assert_eq!(directory.national_root(4).unwrap(), 1);
        assert_eq!(directory.national_root(1).unwrap(), 1);
        assert_eq!(directory.national_root(11).unwrap(), 10);
    }

    #[test]
    fn test_national_peers() {
        let directory = two_nations();
        assert!(directory.is_national_peer(3, 4));
        assert!(directory.is_national_peer(3, 1));
        assert!(!directory.is_national_peer(3, 11));
        assert!(!directory.is_national_peer(3, 99));
        assert_eq!(directory.national_peer_set(3).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_parent_and_children() {
        let directory = two_nations();
        assert_eq!(directory.children(2), &[3, 4]);
        assert!(directory.children(3).is_empty());
        assert_eq!(directory.parent(3).unwrap().map(|c| c.id), Some(2));
        assert!(directory.parent(1).unwrap().is_none());
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let result = ClubDirectory::new(vec![club(1, Some(5))]);
        assert_eq!(result.unwrap_err(), EngineError::UnknownClub(5));
    }

    #[test]
    fn test_cycle_is_rejected() {
        let result = ClubDirectory::new(vec![club(1, Some(2)), club(2, Some(1))]);
        assert!(matches!(result, Err(EngineError::CyclicHierarchy(_))));
    }
}
