// Collectible items and the player's scoreboard

use log::info;
use std::collections::HashMap;

/// Kinds of collectible placed in a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectibleKind {
    Coin,
    Gem,
    Flag,
    Star,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 4] = [Self::Coin, Self::Gem, Self::Flag, Self::Star];

    /// Points awarded for picking one up
    pub fn points(self) -> u32 {
        match self {
            Self::Coin => 10,
            Self::Gem => 25,
            Self::Flag => 50,
            Self::Star => 100,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Coin => "coin",
            Self::Gem => "gem",
            Self::Flag => "flag",
            Self::Star => "star",
        }
    }
}

/// Score and the collectibles still left in the level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    remaining: HashMap<CollectibleKind, u32>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a scoreboard from the items placed in a level
    pub fn from_items(items: impl IntoIterator<Item = CollectibleKind>) -> Self {
        let mut board = Self::new();
        for kind in items {
            *board.remaining.entry(kind).or_insert(0) += 1;
        }
        board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of `kind` items still in the level
    pub fn remaining(&self, kind: CollectibleKind) -> u32 {
        self.remaining.get(&kind).copied().unwrap_or(0)
    }

    /// Check if every item has been picked up
    pub fn all_collected(&self) -> bool {
        self.remaining.values().all(|count| *count == 0)
    }

    /// Count one item of `kind` as picked up
    pub fn collect(&mut self, kind: CollectibleKind) {
        self.score += kind.points();
        if let Some(count) = self.remaining.get_mut(&kind) {
            *count = count.saturating_sub(1);
        }
    }

    /// Award points not tied to a collectible (defeated enemies)
    pub fn add_points(&mut self, points: u32) {
        self.score += points;
    }
}

/// Collectibles the player is touching, and a way to take them out of the world
pub trait CollectibleSource {
    type Id: Copy;

    /// Items overlapping the player right now
    fn overlapping(&self) -> Vec<(Self::Id, CollectibleKind)>;

    /// Remove an item from the world; false if it was already gone
    fn remove(&mut self, id: Self::Id) -> bool;
}

/// Score every overlapping item exactly once.
///
/// An item only counts if this call is the one that removed it, so an item
/// still reported on a later tick can never be scored twice.
pub fn resolve_collectibles<S: CollectibleSource + ?Sized>(
    scoreboard: &mut Scoreboard,
    source: &mut S,
) -> Vec<CollectibleKind> {
    let mut collected = Vec::new();
    for (id, kind) in source.overlapping() {
        if source.remove(id) {
            scoreboard.collect(kind);
            info!(
                "Picked up {} (+{}, score {})",
                kind.name(),
                kind.points(),
                scoreboard.score()
            );
            collected.push(kind);
        }
    }
    collected
}
