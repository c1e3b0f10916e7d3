// Character texture tables
//
// The renderer owns the actual images; characters only choose handles out of
// a table built once per character type.

use super::config::{ConfigError, MovementConfig};
use super::state::Facing;

/// Opaque handle to a texture owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// The same image drawn facing right and facing left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacingPair {
    pub right: TextureHandle,
    pub left: TextureHandle,
}

impl FacingPair {
    pub fn new(right: TextureHandle, left: TextureHandle) -> Self {
        Self { right, left }
    }

    /// Pick the texture for a facing
    pub fn get(&self, facing: Facing) -> TextureHandle {
        match facing {
            Facing::Right => self.right,
            Facing::Left => self.left,
        }
    }
}

/// Every texture a character can show
#[derive(Debug, Clone, PartialEq)]
pub struct TextureTable {
    idle: FacingPair,
    jump: Option<FacingPair>,
    fall: Option<FacingPair>,
    walk: Vec<FacingPair>,
    /// Climbing is seen from behind, so there is one texture per frame
    climb: Vec<TextureHandle>,
}

impl TextureTable {
    /// Build a table, checking it covers every frame `config` will ask for
    pub fn new(
        config: &MovementConfig,
        idle: FacingPair,
        jump: Option<FacingPair>,
        fall: Option<FacingPair>,
        walk: Vec<FacingPair>,
        climb: Vec<TextureHandle>,
    ) -> Result<Self, ConfigError> {
        if walk.len() != config.walk_frame_count {
            return Err(ConfigError::TextureCountMismatch {
                name: "walk",
                expected: config.walk_frame_count,
                actual: walk.len(),
            });
        }
        // Characters that never climb may leave the climb set empty
        if !climb.is_empty() && climb.len() != config.climb_frame_count {
            return Err(ConfigError::TextureCountMismatch {
                name: "climb",
                expected: config.climb_frame_count,
                actual: climb.len(),
            });
        }

        Ok(Self {
            idle,
            jump,
            fall,
            walk,
            climb,
        })
    }

    /// Full player table with handles numbered in load order:
    /// idle, jump, fall, walk frames (right/left pairs), then climb frames.
    pub fn sequential(config: &MovementConfig) -> Result<Self, ConfigError> {
        let mut next = 0u32;
        let mut pair = || {
            let pair = FacingPair::new(TextureHandle(next), TextureHandle(next + 1));
            next += 2;
            pair
        };

        let idle = pair();
        let jump = pair();
        let fall = pair();
        let walk = (0..config.walk_frame_count).map(|_| pair()).collect();
        let climb = (0..config.climb_frame_count)
            .map(|i| TextureHandle(next + i as u32))
            .collect();

        Self::new(config, idle, Some(jump), Some(fall), walk, climb)
    }

    /// Idle and walk art only, numbered from `first`
    pub fn walker(config: &MovementConfig, first: u32) -> Result<Self, ConfigError> {
        let idle = FacingPair::new(TextureHandle(first), TextureHandle(first + 1));
        let walk = (0..config.walk_frame_count as u32)
            .map(|i| {
                let base = first + 2 + i * 2;
                FacingPair::new(TextureHandle(base), TextureHandle(base + 1))
            })
            .collect();

        Self::new(config, idle, None, None, walk, Vec::new())
    }

    pub fn idle(&self, facing: Facing) -> TextureHandle {
        self.idle.get(facing)
    }

    pub fn jump(&self, facing: Facing) -> Option<TextureHandle> {
        self.jump.map(|pair| pair.get(facing))
    }

    pub fn fall(&self, facing: Facing) -> Option<TextureHandle> {
        self.fall.map(|pair| pair.get(facing))
    }

    pub fn walk(&self, frame: usize, facing: Facing) -> Option<TextureHandle> {
        self.walk.get(frame).map(|pair| pair.get(facing))
    }

    pub fn climb(&self, frame: usize) -> Option<TextureHandle> {
        self.climb.get(frame).copied()
    }

    /// Check if the table has climbing art
    pub fn can_climb(&self) -> bool {
        !self.climb.is_empty()
    }
}
