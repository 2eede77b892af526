//! Toroidal occupancy index over registered entities.

use snake_core::{Direction, EntityId, Event, Vector2i};
use tracing::debug;

use crate::{Entity, Unit, WorldError};

/// Read-only grid surface consumed by rendering and steering.
pub trait GridQuery {
    /// Number of columns.
    fn width(&self) -> i32;

    /// Number of rows.
    fn height(&self) -> i32;

    /// Unit occupying `position`, if any.
    fn lookup(&self, position: Vector2i) -> Result<Option<&Unit>, WorldError>;

    /// Cell reached by stepping from `point` along `direction`, wrapping at the edges.
    fn next_position(&self, direction: Vector2i, point: Vector2i) -> Result<Vector2i, WorldError>;

    /// The four wrap-aware neighbours of `point` in [`Direction::ALL`] order.
    fn near_positions(&self, point: Vector2i) -> Result<[Vector2i; 4], WorldError> {
        let mut neighbours = [point; 4];
        for (slot, direction) in neighbours.iter_mut().zip(Direction::ALL) {
            *slot = self.next_position(direction.vector(), point)?;
        }
        Ok(neighbours)
    }

    /// Reports whether `point` lies inside the grid.
    fn contains(&self, point: Vector2i) -> bool {
        (0..self.width()).contains(&point.x()) && (0..self.height()).contains(&point.y())
    }
}

/// Fixed-size wraparound rectangle indexing the units of its entities.
#[derive(Clone, Debug)]
pub struct Grid {
    width: i32,
    height: i32,
    entities: Vec<(EntityId, Entity)>,
    next_entity: u32,
}

impl Grid {
    /// Creates an empty grid, rejecting non-positive dimensions.
    pub fn new(width: i32, height: i32) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            entities: Vec::new(),
            next_entity: 0,
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Registers `entity` and returns the identifier allocated to it.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = EntityId::new(self.next_entity);
        self.next_entity = self.next_entity.wrapping_add(1);
        self.entities.push((id, entity));
        id
    }

    /// Registered entity with the provided identifier.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, entity)| entity)
    }

    /// Iterator over registered entities in registration order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    /// Iterator over every unit of every registered entity.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.entities.iter().flat_map(|(_, entity)| entity.iter())
    }

    /// Unit occupying `position`, if any.
    pub fn lookup(&self, position: Vector2i) -> Result<Option<&Unit>, WorldError> {
        Ok(self
            .locate(position)?
            .and_then(|(id, index)| self.entity(id)?.units().get(index)))
    }

    /// Cell reached by stepping from `point` along `direction`, wrapping at the edges.
    pub fn next_position(&self, direction: Vector2i, point: Vector2i) -> Result<Vector2i, WorldError> {
        check_direction(direction)?;
        self.check_point(point)?;

        let position = point + direction;
        Ok(Vector2i::new(
            position.x().rem_euclid(self.width),
            position.y().rem_euclid(self.height),
        ))
    }

    /// Destroys the unit at `position`, removing its entity once it is empty.
    pub fn destroy_unit_at(
        &mut self,
        position: Vector2i,
        out: &mut Vec<Event>,
    ) -> Result<Option<Unit>, WorldError> {
        match self.locate(position)? {
            Some((id, index)) => self.destroy_unit(id, index, out).map(Some),
            None => Ok(None),
        }
    }

    /// Removes every unit of the entity and deregisters it.
    pub fn clear_entity(&mut self, id: EntityId, out: &mut Vec<Event>) -> Result<Entity, WorldError> {
        let slot = self
            .entities
            .iter()
            .position(|(candidate, _)| *candidate == id)
            .ok_or(WorldError::MissingEntity(id))?;
        let (_, entity) = self.entities.remove(slot);
        debug!(entity = id.get(), units = entity.len(), "entity cleared");
        out.push(Event::EntityCleared { entity: id });
        Ok(entity)
    }

    /// Identifier and unit index of the occupant of `position`.
    pub(crate) fn locate(&self, position: Vector2i) -> Result<Option<(EntityId, usize)>, WorldError> {
        self.check_point(position)?;
        Ok(self.entities.iter().find_map(|(id, entity)| {
            entity
                .iter()
                .position(|unit| unit.position() == position)
                .map(|index| (*id, index))
        }))
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, WorldError> {
        self.entities
            .iter_mut()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, entity)| entity)
            .ok_or(WorldError::MissingEntity(id))
    }

    pub(crate) fn unit(&self, id: EntityId, index: usize) -> Result<&Unit, WorldError> {
        self.entity(id)
            .ok_or(WorldError::MissingEntity(id))?
            .units()
            .get(index)
            .ok_or(WorldError::MissingUnit { entity: id, index })
    }

    pub(crate) fn unit_mut(&mut self, id: EntityId, index: usize) -> Result<&mut Unit, WorldError> {
        self.entity_mut(id)?
            .unit_mut(index)
            .ok_or(WorldError::MissingUnit { entity: id, index })
    }

    /// Destroys one unit; an entity left without units is deregistered.
    pub(crate) fn destroy_unit(
        &mut self,
        id: EntityId,
        index: usize,
        out: &mut Vec<Event>,
    ) -> Result<Unit, WorldError> {
        let entity = self.entity_mut(id)?;
        let unit = entity
            .remove_unit(index)
            .ok_or(WorldError::MissingUnit { entity: id, index })?;
        if entity.is_empty() {
            let _ = self.clear_entity(id, out)?;
        }
        Ok(unit)
    }

    pub(crate) fn check_point(&self, point: Vector2i) -> Result<(), WorldError> {
        if GridQuery::contains(self, point) {
            Ok(())
        } else {
            Err(WorldError::OutOfBounds {
                point,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl GridQuery for Grid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn lookup(&self, position: Vector2i) -> Result<Option<&Unit>, WorldError> {
        Grid::lookup(self, position)
    }

    fn next_position(&self, direction: Vector2i, point: Vector2i) -> Result<Vector2i, WorldError> {
        Grid::next_position(self, direction, point)
    }
}

fn check_direction(direction: Vector2i) -> Result<(), WorldError> {
    if direction == Vector2i::ZERO {
        return Err(WorldError::ZeroDirection);
    }
    let magnitude = direction.abs();
    if magnitude.x() > 1 || magnitude.y() > 1 {
        return Err(WorldError::DirectionOutOfRange(direction));
    }
    Ok(())
}
