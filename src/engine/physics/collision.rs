use rapier2d::prelude::*;

/// A contact normal (seen from a character) pointing at least this much
/// downward means the character is standing on the other collider
pub const GROUND_NORMAL_THRESHOLD: Real = 0.5;

/// Collision groups for filtering what objects can collide with each other
///
/// Ladders and collectibles are sensors: they only report overlap with the
/// player and never push anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Player character
    Player = 0b0000_0001,

    /// Static platforms and walls
    Wall = 0b0000_0010,

    /// Pushable boxes and other loose items
    DynamicItem = 0b0000_0100,

    /// Ladder volumes (sensors)
    Ladder = 0b0000_1000,

    /// Coins, gems, flags, stars (sensors)
    Collectible = 0b0001_0000,

    /// Enemies
    Enemy = 0b0010_0000,

    /// Platforms that move along a path
    MovingPlatform = 0b0100_0000,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // The player touches everything
            CollisionGroups::Player => Self::mask(&[
                CollisionGroups::Wall,
                CollisionGroups::DynamicItem,
                CollisionGroups::Ladder,
                CollisionGroups::Collectible,
                CollisionGroups::Enemy,
                CollisionGroups::MovingPlatform,
            ]),

            CollisionGroups::Wall => Self::mask(&[
                CollisionGroups::Player,
                CollisionGroups::DynamicItem,
                CollisionGroups::Enemy,
            ]),

            CollisionGroups::DynamicItem => Self::mask(&[
                CollisionGroups::Player,
                CollisionGroups::Wall,
                CollisionGroups::DynamicItem,
                CollisionGroups::Enemy,
                CollisionGroups::MovingPlatform,
            ]),

            // Sensors only care about the player
            CollisionGroups::Ladder | CollisionGroups::Collectible => {
                Self::mask(&[CollisionGroups::Player])
            }

            CollisionGroups::Enemy => Self::mask(&[
                CollisionGroups::Player,
                CollisionGroups::Wall,
                CollisionGroups::DynamicItem,
                CollisionGroups::MovingPlatform,
            ]),

            CollisionGroups::MovingPlatform => Self::mask(&[
                CollisionGroups::Player,
                CollisionGroups::DynamicItem,
                CollisionGroups::Enemy,
            ]),
        };

        InteractionGroups::new(memberships, filter)
    }

    fn mask(groups: &[CollisionGroups]) -> Group {
        let bits = groups.iter().fold(0u32, |bits, group| bits | *group as u32);
        Group::from_bits_truncate(bits)
    }
}

/// Check if a contact normal, oriented away from a character, points at the floor
pub fn is_ground_normal(normal_from_character: &Vector<Real>) -> bool {
    normal_from_character.y < -GROUND_NORMAL_THRESHOLD
}
