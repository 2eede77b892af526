//! Entities and the units they own.

use std::fmt;

use snake_core::{Direction, UnitKind, Vector2i};

/// Atomic occupant of a single grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    kind: UnitKind,
    position: Vector2i,
    tags: Vec<String>,
}

impl Unit {
    fn new(kind: UnitKind, position: Vector2i) -> Self {
        Self {
            kind,
            position,
            tags: Vec::new(),
        }
    }

    /// Category of the unit.
    #[must_use]
    pub const fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Cell currently occupied by the unit.
    #[must_use]
    pub const fn position(&self) -> Vector2i {
        self.position
    }

    /// Tags attached to the unit in insertion order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Reports whether the unit carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    /// Direction encoded by the unit's tail tag, if it carries one.
    #[must_use]
    pub fn tail_direction(&self) -> Option<Direction> {
        self.tags
            .iter()
            .find_map(|tag| Direction::from_tail_tag(tag))
    }

    pub(crate) fn set_position(&mut self, position: Vector2i) {
        self.position = position;
    }

    pub(crate) fn add_tag(&mut self, tag: &str) {
        self.tags.push(tag.to_owned());
    }

    pub(crate) fn remove_tail_tags(&mut self) {
        self.tags
            .retain(|tag| Direction::from_tail_tag(tag).is_none());
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if !self.tags.is_empty() {
            write!(f, " ({})", self.tags.join(", "))?;
        }
        Ok(())
    }
}

/// Ordered collection of units that share a purpose.
///
/// An entity becomes registered once handed to [`crate::Grid::add_entity`];
/// from then on it is mutated only through the grid, which removes it as soon
/// as its last unit is destroyed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entity {
    units: Vec<Unit>,
}

impl Entity {
    /// Creates an entity holding one unit of `kind` per provided position.
    #[must_use]
    pub fn new(kind: UnitKind, positions: impl IntoIterator<Item = Vector2i>) -> Self {
        Self {
            units: positions
                .into_iter()
                .map(|position| Unit::new(kind, position))
                .collect(),
        }
    }

    /// Units owned by the entity in order.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Iterator over the owned units.
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    /// Number of owned units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Reports whether the entity owns no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub(crate) fn create_unit(&mut self, kind: UnitKind, position: Vector2i, tags: &[&str]) -> usize {
        let mut unit = Unit::new(kind, position);
        for tag in tags {
            unit.add_tag(tag);
        }
        self.units.push(unit);
        self.units.len() - 1
    }

    pub(crate) fn units_mut(&mut self) -> &mut Vec<Unit> {
        &mut self.units
    }

    pub(crate) fn unit_mut(&mut self, index: usize) -> Option<&mut Unit> {
        self.units.get_mut(index)
    }

    pub(crate) fn remove_unit(&mut self, index: usize) -> Option<Unit> {
        (index < self.units.len()).then(|| self.units.remove(index))
    }

    /// Moves the unit at `from` so that it ends up at index `to`.
    pub(crate) fn relocate_unit(&mut self, from: usize, to: usize) {
        if from == to || from >= self.units.len() {
            return;
        }
        let unit = self.units.remove(from);
        self.units.insert(to.min(self.units.len()), unit);
    }
}

impl<'a> IntoIterator for &'a Entity {
    type Item = &'a Unit;
    type IntoIter = std::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
