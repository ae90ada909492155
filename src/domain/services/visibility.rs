//! World-scoped visibility gate
//!
//! Decides, for one world and one viewer, which content rows are visible and
//! whether any mutation is allowed. The owner sees and may change everything
//! in their world. Everyone else sees only rows flagged public and may change
//! nothing. Rows are never redacted: a row is either returned whole or absent.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ContentKind, World, WorldContent};
use crate::domain::value_objects::{Viewer, WorldId};

/// A viewer's relationship to one world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    Owner,
    Guest,
}

impl ViewerRole {
    /// `Owner` iff the viewer is authenticated and is the world's owner
    pub fn of(viewer: &Viewer, world: &World) -> Self {
        match viewer.user_id() {
            Some(user_id) if world.is_owned_by(user_id) => ViewerRole::Owner,
            _ => ViewerRole::Guest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("{viewer} is not the owner of world {world_id}")]
    NotOwner { world_id: WorldId, viewer: Viewer },
    #[error("{kind} row {row_id} does not belong to world {world_id}")]
    ForeignRow {
        kind: ContentKind,
        row_id: String,
        world_id: WorldId,
    },
    #[error("baseline {kind} are shared by every world and cannot be changed")]
    SharedRow { kind: ContentKind },
}

/// The evaluated gate for one (world, viewer) pair.
///
/// Built fresh on every world selection or viewer change; holds no row data.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldAccess {
    world: World,
    viewer: Viewer,
    role: ViewerRole,
}

impl WorldAccess {
    /// Evaluate access for `viewer` to `world`.
    ///
    /// Returns `None` when the viewer may not open the world at all, which is
    /// the case for a private world and anyone but its owner.
    pub fn evaluate(world: World, viewer: Viewer) -> Option<Self> {
        let role = ViewerRole::of(&viewer, &world);
        if role == ViewerRole::Guest && !world.is_public {
            return None;
        }
        Some(Self {
            world,
            viewer,
            role,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_id(&self) -> WorldId {
        self.world.id
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer
    }

    pub fn role(&self) -> ViewerRole {
        self.role
    }

    pub fn is_owner(&self) -> bool {
        self.role == ViewerRole::Owner
    }

    /// Whether create/update/delete are permitted at all
    pub fn can_mutate(&self) -> bool {
        self.is_owner()
    }

    /// Whether a single row is visible to this viewer
    pub fn can_see<T: WorldContent>(&self, row: &T) -> bool {
        match row.world_id() {
            Some(world_id) if world_id == self.world.id => self.is_owner() || row.is_public(),
            Some(_) => false,
            // Baseline rows are shared by every world
            None => row.is_public(),
        }
    }

    /// Keep only the rows this viewer may see, preserving order
    pub fn visible<T: WorldContent>(&self, rows: impl IntoIterator<Item = T>) -> Vec<T> {
        rows.into_iter().filter(|row| self.can_see(row)).collect()
    }

    pub fn authorize_mutation(&self) -> Result<(), AccessDenied> {
        if self.can_mutate() {
            Ok(())
        } else {
            Err(AccessDenied::NotOwner {
                world_id: self.world.id,
                viewer: self.viewer,
            })
        }
    }

    /// Check that an existing row may be changed through this world
    pub fn authorize_row_mutation<T: WorldContent>(&self, row: &T) -> Result<(), AccessDenied> {
        self.authorize_mutation()?;
        match row.world_id() {
            Some(world_id) if world_id == self.world.id => Ok(()),
            Some(_) => Err(AccessDenied::ForeignRow {
                kind: T::KIND,
                row_id: row.id().to_string(),
                world_id: self.world.id,
            }),
            None => Err(AccessDenied::SharedRow { kind: T::KIND }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{baseline_rules, DmNote, LoreEntry, NoteCategory, RuleEntry};
    use crate::domain::value_objects::UserId;

    fn world_owned_by(owner: UserId, is_public: bool) -> World {
        World::new(owner, "Faerun").public(is_public)
    }

    #[test]
    fn test_role_derivation() {
        let owner = UserId::new();
        let world = world_owned_by(owner, true);

        assert_eq!(
            ViewerRole::of(&Viewer::Authenticated(owner), &world),
            ViewerRole::Owner
        );
        assert_eq!(
            ViewerRole::of(&Viewer::Authenticated(UserId::new()), &world),
            ViewerRole::Guest
        );
        assert_eq!(ViewerRole::of(&Viewer::Anonymous, &world), ViewerRole::Guest);
    }

    #[test]
    fn test_private_world_is_closed_to_guests() {
        let owner = UserId::new();
        let world = world_owned_by(owner, false);

        assert!(WorldAccess::evaluate(world.clone(), Viewer::Anonymous).is_none());
        assert!(WorldAccess::evaluate(world.clone(), Viewer::Authenticated(UserId::new())).is_none());
        assert!(WorldAccess::evaluate(world, Viewer::Authenticated(owner)).is_some());
    }

    #[test]
    fn test_owner_sees_everything_guest_sees_public_only() {
        let owner = UserId::new();
        let world = world_owned_by(owner, true);
        let l1 = LoreEntry::new(world.id, "The Sundering").public(false);
        let l2 = LoreEntry::new(world.id, "Founding of Waterdeep").public(true);
        let rows = vec![l1.clone(), l2.clone()];

        let owner_access = WorldAccess::evaluate(world.clone(), Viewer::Authenticated(owner)).unwrap();
        assert_eq!(owner_access.visible(rows.clone()), vec![l1, l2.clone()]);

        let guest_access = WorldAccess::evaluate(world, Viewer::Anonymous).unwrap();
        assert_eq!(guest_access.visible(rows), vec![l2]);
    }

    #[test]
    fn test_visible_set_matches_definition() {
        let owner = UserId::new();
        let world = world_owned_by(owner, true);
        let rows: Vec<DmNote> = (0..8)
            .map(|i| DmNote::new(world.id, format!("Note {}", i), NoteCategory::Plot).public(i % 3 == 0))
            .collect();

        for viewer in [Viewer::Anonymous, Viewer::Authenticated(UserId::new()), Viewer::Authenticated(owner)] {
            let access = WorldAccess::evaluate(world.clone(), viewer).unwrap();
            let expected: Vec<DmNote> = rows
                .iter()
                .filter(|r| access.is_owner() || r.is_public)
                .cloned()
                .collect();
            assert_eq!(access.visible(rows.clone()), expected);
        }
    }

    #[test]
    fn test_gate_is_idempotent() {
        let world = world_owned_by(UserId::new(), true);
        let rows = vec![
            LoreEntry::new(world.id, "A").public(true),
            LoreEntry::new(world.id, "B").public(false),
        ];
        let access = WorldAccess::evaluate(world, Viewer::Anonymous).unwrap();

        let first = access.visible(rows.clone());
        let second = access.visible(rows);
        assert_eq!(first, second);
        assert_eq!(access.visible(first.clone()), first);
    }

    #[test]
    fn test_flag_changes_move_exactly_one_row() {
        let world = world_owned_by(UserId::new(), true);
        let mut rows = vec![
            LoreEntry::new(world.id, "A").public(true),
            LoreEntry::new(world.id, "B").public(false),
            LoreEntry::new(world.id, "C").public(false),
        ];
        let access = WorldAccess::evaluate(world, Viewer::Anonymous).unwrap();
        let before = access.visible(rows.clone());

        rows[1].set_public(true);
        let promoted = access.visible(rows.clone());
        assert_eq!(promoted.len(), before.len() + 1);
        assert!(promoted.contains(&rows[1]));
        assert!(before.iter().all(|r| promoted.contains(r)));

        rows[0].set_public(false);
        let demoted = access.visible(rows.clone());
        assert_eq!(demoted.len(), promoted.len() - 1);
        assert!(!demoted.iter().any(|r| r.id == rows[0].id));
    }

    #[test]
    fn test_rows_from_other_worlds_are_never_visible() {
        let owner = UserId::new();
        let world = world_owned_by(owner, true);
        let other = world_owned_by(owner, true);
        let stray = LoreEntry::new(other.id, "Elsewhere").public(true);

        let access = WorldAccess::evaluate(world, Viewer::Authenticated(owner)).unwrap();
        assert!(!access.can_see(&stray));
        assert!(matches!(
            access.authorize_row_mutation(&stray),
            Err(AccessDenied::ForeignRow { .. })
        ));
    }

    #[test]
    fn test_baseline_rules_are_visible_but_immutable() {
        let owner = UserId::new();
        let world = world_owned_by(owner, true);
        let baseline = baseline_rules();
        let house = RuleEntry::new(world.id, "Flanking", "Combat").public(false);
        let mut rows = baseline.clone();
        rows.push(house.clone());

        let guest = WorldAccess::evaluate(world.clone(), Viewer::Anonymous).unwrap();
        assert_eq!(guest.visible(rows.clone()), baseline);

        let owner_access = WorldAccess::evaluate(world, Viewer::Authenticated(owner)).unwrap();
        assert_eq!(owner_access.visible(rows).len(), baseline.len() + 1);
        assert!(owner_access.authorize_row_mutation(&house).is_ok());
        assert_eq!(
            owner_access.authorize_row_mutation(&baseline[0]),
            Err(AccessDenied::SharedRow {
                kind: ContentKind::Rules
            })
        );
    }

    #[test]
    fn test_guests_may_never_mutate() {
        let world = world_owned_by(UserId::new(), true);
        let row = LoreEntry::new(world.id, "A").public(true);

        for viewer in [Viewer::Anonymous, Viewer::Authenticated(UserId::new())] {
            let access = WorldAccess::evaluate(world.clone(), viewer).unwrap();
            assert!(!access.can_mutate());
            assert!(matches!(
                access.authorize_mutation(),
                Err(AccessDenied::NotOwner { .. })
            ));
            assert!(access.authorize_row_mutation(&row).is_err());
        }
    }
}
