//! Name-based lookup of layouts.

use std::fmt;

use snake_core::DEFAULT_INITIAL_GROWTH;

use crate::{
    Corners, Cross, Dispersion, Enclosure, ObstaclePlacement, PlacementChain, PlacementError,
    Quads, RandomLayout, Room, Separator, Walls, XMark,
};

/// Separates layout names inside a chain expression such as `enclosure:cross`.
pub const CHAIN_SEPARATOR: char = ':';

type Factory = Box<dyn Fn() -> Box<dyn ObstaclePlacement> + Send + Sync>;

/// Table mapping layout names to factories.
pub struct Registry {
    entries: Vec<(String, Factory)>,
}

impl Registry {
    /// Creates a registry with no layouts.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a registry holding every built-in layout, with the scatter
    /// reserving room for a snake of the default initial growth.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_initial_growth(DEFAULT_INITIAL_GROWTH)
    }

    /// Creates a registry holding every built-in layout, with the scatter
    /// reserving room for a snake of `initial_growth` units.
    #[must_use]
    pub fn with_initial_growth(initial_growth: usize) -> Self {
        let mut registry = Self::empty();
        registry.register("enclosure", || Box::new(Enclosure));
        registry.register("corners", || Box::new(Corners));
        registry.register("cross", || Box::new(Cross));
        registry.register("quads", || Box::new(Quads));
        registry.register("xmark", || Box::new(XMark));

        registry.register("room1", || Box::new(Room::new(true, false)));
        registry.register("room2", || Box::new(Room::new(true, true)));
        registry.register("room3", || Box::new(Room::new(false, true)));
        registry.register("walls1", || Box::new(Walls::new(true, false)));
        registry.register("walls2", || Box::new(Walls::new(true, true)));
        registry.register("walls3", || Box::new(Walls::new(false, true)));
        registry.register("separator1", || Box::new(Separator::new(true, false)));
        registry.register("separator2", || Box::new(Separator::new(true, true)));
        registry.register("separator3", || Box::new(Separator::new(false, true)));

        registry.register("dispersion", move || Box::new(Dispersion::new(initial_growth)));
        registry.register("random", || Box::new(RandomLayout::default()));
        registry
    }

    /// Registers `factory` under `name`, replacing any previous registration.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn ObstaclePlacement> + Send + Sync + 'static,
    {
        let name = name.into();
        self.entries.retain(|(existing, _)| *existing != name);
        self.entries.push((name, Box::new(factory)));
    }

    /// Builds the layout registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn ObstaclePlacement>, PlacementError> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, factory)| factory())
            .ok_or_else(|| PlacementError::UnknownName(name.to_owned()))
    }

    /// Builds a chain from names joined by [`CHAIN_SEPARATOR`].
    pub fn resolve_chain(&self, expression: &str) -> Result<PlacementChain, PlacementError> {
        let mut chain = PlacementChain::new();
        for name in expression
            .split(CHAIN_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            chain.push(self.resolve(name)?);
        }
        if chain.is_empty() {
            return Err(PlacementError::EmptyChain);
        }
        Ok(chain)
    }

    /// Registered names in alphabetical order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.entries.iter().map(|(name, _)| name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}
