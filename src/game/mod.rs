// Game logic: characters, items, platforms and the level that ties them together

pub mod characters;
pub mod items;
pub mod level;
pub mod platforms;
