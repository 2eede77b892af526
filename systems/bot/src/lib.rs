#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first bot that steers the snake toward the nearest food.

use std::collections::{HashMap, VecDeque};

use snake_core::{Direction, UnitKind, Vector2i};
use snake_world::{GridQuery, WorldError};
use tracing::debug;

/// Stateful steering that follows a cached route until it is exhausted or
/// invalidated.
#[derive(Clone, Debug, Default)]
pub struct Bot {
    route: VecDeque<Vector2i>,
    last_head: Option<Vector2i>,
}

impl Bot {
    /// Creates a bot with no planned route.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses the direction to take from `head`.
    ///
    /// Returns `None` while the head has not moved since the previous call,
    /// or when no food is reachable.
    pub fn steer<G>(&mut self, grid: &G, head: Vector2i) -> Result<Option<Direction>, WorldError>
    where
        G: GridQuery + ?Sized,
    {
        if self.last_head == Some(head) {
            return Ok(None);
        }
        self.last_head = Some(head);

        if let Some(&next) = self.route.front() {
            let adjacent = grid.near_positions(head)?.contains(&next);
            if !adjacent || !is_passable(grid, next)? {
                self.route.clear();
            }
        }
        if self.route.is_empty() {
            match route_to_food(grid, head)? {
                Some(route) => self.route.extend(route),
                None => {
                    debug!(?head, "no reachable food");
                    return Ok(None);
                }
            }
        }

        let Some(target) = self.route.pop_front() else {
            return Ok(None);
        };
        step_direction(grid, head, target)
    }
}

/// Shortest wrap-aware path from `from` to the nearest food, excluding
/// `from` itself. Only free and food cells are traversed.
pub fn route_to_food<G>(grid: &G, from: Vector2i) -> Result<Option<Vec<Vector2i>>, WorldError>
where
    G: GridQuery + ?Sized,
{
    let mut parents: HashMap<Vector2i, Vector2i> = HashMap::new();
    let mut queue = VecDeque::from([from]);

    while let Some(cell) = queue.pop_front() {
        for neighbour in grid.near_positions(cell)? {
            if neighbour == from || parents.contains_key(&neighbour) {
                continue;
            }
            match grid.lookup(neighbour)?.map(|unit| unit.kind()) {
                Some(UnitKind::Food) => {
                    let _ = parents.insert(neighbour, cell);
                    return Ok(Some(backtrack(&parents, from, neighbour)));
                }
                Some(_) => {}
                None => {
                    let _ = parents.insert(neighbour, cell);
                    queue.push_back(neighbour);
                }
            }
        }
    }
    Ok(None)
}

fn backtrack(parents: &HashMap<Vector2i, Vector2i>, from: Vector2i, goal: Vector2i) -> Vec<Vector2i> {
    let mut path = vec![goal];
    let mut cursor = goal;
    while let Some(&parent) = parents.get(&cursor) {
        if parent == from {
            break;
        }
        path.push(parent);
        cursor = parent;
    }
    path.reverse();
    path
}

fn is_passable<G>(grid: &G, cell: Vector2i) -> Result<bool, WorldError>
where
    G: GridQuery + ?Sized,
{
    Ok(grid
        .lookup(cell)?
        .map_or(true, |unit| unit.kind() == UnitKind::Food))
}

fn step_direction<G>(
    grid: &G,
    head: Vector2i,
    target: Vector2i,
) -> Result<Option<Direction>, WorldError>
where
    G: GridQuery + ?Sized,
{
    let neighbours = grid.near_positions(head)?;
    Ok(Direction::ALL
        .into_iter()
        .zip(neighbours)
        .find_map(|(direction, cell)| (cell == target).then_some(direction)))
}
