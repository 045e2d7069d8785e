//! Rooms of the mansion and the tree that holds them

use super::{owned_text, Direction};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};

/// A room of the mansion
///
/// Each room owns its children outright, so the tree is acyclic by
/// construction and is torn down from the root when dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    name: String,
    /// `None` means the room holds nothing; `Some("")` is an (odd) clue.
    clue: Option<String>,
    left: Option<Box<Room>>,
    right: Option<Box<Room>>,
}

impl Room {
    /// Create a leaf room
    pub fn create(name: &str, clue: Option<&str>) -> Result<Self> {
        if name.is_empty() {
            return Err(GameError::EmptyRoomName.into());
        }
        let name = owned_text(name, "room name")?;
        let clue = match clue {
            Some(text) => Some(owned_text(text, "room clue")?),
            None => None,
        };

        Ok(Self {
            name,
            clue,
            left: None,
            right: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    /// Hang `child` to the left, returning whatever was there before
    pub fn attach_left(&mut self, child: Room) -> Option<Room> {
        self.left.replace(Box::new(child)).map(|old| *old)
    }

    /// Hang `child` to the right, returning whatever was there before
    pub fn attach_right(&mut self, child: Room) -> Option<Room> {
        self.right.replace(Box::new(child)).map(|old| *old)
    }

    pub fn with_left(mut self, child: Room) -> Self {
        self.attach_left(child);
        self
    }

    pub fn with_right(mut self, child: Room) -> Self {
        self.attach_right(child);
        self
    }

    /// The neighbouring room in `direction`, if a passage exists
    pub fn descend(&self, direction: Direction) -> Option<&Room> {
        match direction {
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// The whole mansion, rooted at its entrance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTree {
    root: Room,
}

impl RoomTree {
    pub fn new(root: Room) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Room {
        &self.root
    }

    /// Follow `path` from the entrance. `None` if any step has no passage.
    pub fn resolve(&self, path: &[Direction]) -> Option<&Room> {
        path.iter()
            .try_fold(&self.root, |room, direction| room.descend(*direction))
    }

    /// Every room, entrance first, each parent before its children
    pub fn rooms(&self) -> Rooms<'_> {
        Rooms {
            stack: vec![&self.root],
        }
    }

    pub fn len(&self) -> usize {
        self.rooms().count()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Pre-order walk over a [`RoomTree`]
pub struct Rooms<'a> {
    stack: Vec<&'a Room>,
}

impl<'a> Iterator for Rooms<'a> {
    type Item = &'a Room;

    fn next(&mut self) -> Option<Self::Item> {
        let room = self.stack.pop()?;
        if let Some(right) = room.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = room.left.as_deref() {
            self.stack.push(left);
        }
        Some(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str) -> Room {
        Room::create(name, None).unwrap()
    }

    fn small_tree() -> RoomTree {
        RoomTree::new(
            room("Hall")
                .with_left(room("Sala").with_left(room("Cozinha")))
                .with_right(room("Biblioteca")),
        )
    }

    #[test]
    fn new_room_is_a_leaf() {
        let r = Room::create("Despensa", Some("")).unwrap();
        assert!(r.is_leaf());
        assert_eq!(r.clue(), Some(""));
        assert_eq!(room("Varanda").clue(), None);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Room::create("", None).unwrap_err();
        assert_eq!(err.downcast_ref::<GameError>(), Some(&GameError::EmptyRoomName));
    }

    #[test]
    fn attach_replaces_existing_child() {
        let mut hall = room("Hall");
        assert!(hall.attach_left(room("Sala")).is_none());
        let old = hall.attach_left(room("Cozinha")).unwrap();
        assert_eq!(old.name(), "Sala");
        assert_eq!(hall.descend(Direction::Left).unwrap().name(), "Cozinha");
        assert!(hall.descend(Direction::Right).is_none());
        assert!(!hall.is_leaf());
    }

    #[test]
    fn resolve_follows_directions() {
        let tree = small_tree();
        assert_eq!(tree.resolve(&[]).unwrap().name(), "Hall");
        let path = [Direction::Left, Direction::Left];
        assert_eq!(tree.resolve(&path).unwrap().name(), "Cozinha");
        assert!(tree.resolve(&[Direction::Right, Direction::Left]).is_none());
    }

    #[test]
    fn rooms_walks_parents_before_children() {
        let tree = small_tree();
        let names: Vec<&str> = tree.rooms().map(Room::name).collect();
        assert_eq!(names, vec!["Hall", "Sala", "Cozinha", "Biblioteca"]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn descend_stays_inside_the_tree() {
        let tree = small_tree();
        let members: Vec<*const Room> = tree.rooms().map(|r| r as *const Room).collect();
        for r in tree.rooms() {
            for direction in [Direction::Left, Direction::Right] {
                if let Some(child) = r.descend(direction) {
                    assert!(members.contains(&(child as *const Room)));
                }
            }
        }
    }
}
