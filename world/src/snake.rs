//! Movement, growth and collision rules for the snake.

use snake_core::{
    Direction, EntityId, Event, UnitKind, Vector2i, CRASH_TAG, HEAD_TAG, MIN_GROWTH,
};
use tracing::{debug, warn};

use crate::{Entity, Grid, Unit, WorldError};

/// Body index directly behind the head.
const BODY_INDEX: usize = 1;

/// Handle to the snake entity registered with a [`Grid`].
///
/// Body units are stored head-first and tail-last. The handle keeps only the
/// growth limits; every operation reads and mutates the body through the grid
/// that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snake {
    entity: EntityId,
    initial_growth: usize,
    final_growth: Option<usize>,
}

impl Snake {
    /// Registers a straight snake whose head sits at `position` and whose body
    /// extends downward (wrapping at the bottom edge). Every cell of the body
    /// must be free.
    pub fn spawn(
        grid: &mut Grid,
        position: Vector2i,
        initial_growth: usize,
        final_growth: Option<usize>,
    ) -> Result<Self, WorldError> {
        if initial_growth < MIN_GROWTH {
            return Err(WorldError::GrowthTooSmall {
                requested: initial_growth,
            });
        }
        if let Some(final_growth) = final_growth {
            if final_growth <= initial_growth {
                return Err(WorldError::FinalGrowthTooSmall {
                    initial: initial_growth,
                    final_growth,
                });
            }
        }

        let mut cells = Vec::with_capacity(initial_growth);
        let mut cursor = position;
        for _ in 0..initial_growth {
            if cells.contains(&cursor) || grid.lookup(cursor)?.is_some() {
                return Err(WorldError::SpawnBlocked(cursor));
            }
            cells.push(cursor);
            cursor = grid.next_position(Vector2i::DOWN, cursor)?;
        }

        let mut body = Entity::default();
        for (index, cell) in cells.into_iter().enumerate() {
            let tags: &[&str] = if index == 0 { &[HEAD_TAG] } else { &[] };
            let _ = body.create_unit(UnitKind::Snake, cell, tags);
        }
        define_tail(body.units_mut());

        let entity = grid.add_entity(body);
        debug!(entity = entity.get(), initial_growth, ?final_growth, "snake spawned");
        Ok(Self {
            entity,
            initial_growth,
            final_growth,
        })
    }

    /// Identifier of the snake's entity within its grid.
    #[must_use]
    pub const fn entity(&self) -> EntityId {
        self.entity
    }

    /// Length the snake was spawned with.
    #[must_use]
    pub const fn initial_growth(&self) -> usize {
        self.initial_growth
    }

    /// Length at which the snake is satisfied, if any.
    #[must_use]
    pub const fn final_growth(&self) -> Option<usize> {
        self.final_growth
    }

    /// Current length, i.e. the number of body units.
    #[must_use]
    pub fn growth(&self, grid: &Grid) -> usize {
        grid.entity(self.entity).map_or(0, Entity::len)
    }

    /// Units gained since spawning.
    #[must_use]
    pub fn score(&self, grid: &Grid) -> usize {
        self.growth(grid).saturating_sub(self.initial_growth)
    }

    /// Leading unit of the body.
    #[must_use]
    pub fn head<'g>(&self, grid: &'g Grid) -> Option<&'g Unit> {
        grid.entity(self.entity)?.units().first()
    }

    /// Steps the head one cell along `direction`, eating, crashing or moving
    /// freely depending on the destination's occupant.
    pub fn step(
        &self,
        grid: &mut Grid,
        direction: Vector2i,
        out: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        let head = self
            .head(grid)
            .ok_or(WorldError::MissingEntity(self.entity))?
            .position();
        let target = grid.next_position(direction, head)?;
        if grid.locate(target)?.is_some() {
            self.move_onto(grid, target, out)
        } else {
            self.move_to(grid, target)
        }
    }

    /// Moves onto the occupied cell `target`: food is eaten, anything else is
    /// crashed into.
    pub fn move_onto(
        &self,
        grid: &mut Grid,
        target: Vector2i,
        out: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        let (owner, index) = grid
            .locate(target)?
            .ok_or(WorldError::EmptyTarget(target))?;
        if grid.unit(owner, index)?.kind() == UnitKind::Food {
            self.eat(grid, owner, index, out)
        } else {
            self.crash_into(grid, owner, index, out)
        }
    }

    /// Moves the head to the free cell `position`, pulling the tail unit in
    /// directly behind the head.
    pub fn move_to(&self, grid: &mut Grid, position: Vector2i) -> Result<(), WorldError> {
        grid.check_point(position)?;
        let units = grid.entity_mut(self.entity)?.units_mut();
        if units.len() < MIN_GROWTH {
            return Err(WorldError::GrowthTooSmall {
                requested: units.len(),
            });
        }

        let head_position = units[0].position();
        let Some(mut tail) = units.pop() else {
            return Err(WorldError::MissingEntity(self.entity));
        };
        tail.remove_tail_tags();
        tail.set_position(head_position);
        units.insert(BODY_INDEX, tail);
        units[0].set_position(position);

        define_tail(units);
        Ok(())
    }

    fn eat(
        &self,
        grid: &mut Grid,
        food_owner: EntityId,
        food_index: usize,
        out: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        let food_position = grid.unit(food_owner, food_index)?.position();

        let body = grid.entity_mut(self.entity)?;
        let head_position = body
            .units()
            .first()
            .ok_or(WorldError::MissingEntity(self.entity))?
            .position();
        let grown = body.create_unit(UnitKind::Snake, head_position, &[]);
        body.relocate_unit(grown, BODY_INDEX);
        body.units_mut()[0].set_position(food_position);

        let _ = grid.destroy_unit(food_owner, food_index, out)?;

        let growth = self.growth(grid);
        let satisfied = self.final_growth == Some(growth);
        debug!(growth, satisfied, "snake ate food");
        out.push(Event::AteFood { satisfied });
        Ok(())
    }

    fn crash_into(
        &self,
        grid: &mut Grid,
        owner: EntityId,
        index: usize,
        out: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        let unit = grid.unit_mut(owner, index)?;
        unit.add_tag(CRASH_TAG);
        let at = unit.position();
        debug!(?at, victim = %unit, "snake crashed");
        out.push(Event::Crashed { at });
        Ok(())
    }
}

/// Tags the last body unit with the direction it points away from the unit ahead.
fn define_tail(units: &mut [Unit]) {
    let [.., ahead, tail] = units else {
        return;
    };
    let (tail_position, ahead_position) = (tail.position(), ahead.position());

    let direction = if tail_position.x() == ahead_position.x() {
        if tail_position.y() < ahead_position.y() {
            Direction::Up
        } else {
            Direction::Down
        }
    } else if tail_position.y() == ahead_position.y() {
        if tail_position.x() < ahead_position.x() {
            Direction::Left
        } else {
            Direction::Right
        }
    } else {
        warn!(tail = ?tail_position, ahead = ?ahead_position, "tail is detached from the body");
        return;
    };

    // Neighbours farther than one cell apart sit on opposite edges of the grid.
    let direction = if tail_position.distance_squared(ahead_position) > 1 {
        direction.opposite()
    } else {
        direction
    };
    tail.add_tag(direction.tail_tag());
}
