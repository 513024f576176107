//! NPC data the resolver needs from the host

/// Age bracket of an NPC
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NpcAge {
    #[default]
    Adult,
    Teen,
    Child,
}

impl NpcAge {
    /// Map the game's numeric age code (0 adult, 1 teen, 2 child)
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => NpcAge::Teen,
            2 => NpcAge::Child,
            _ => NpcAge::Adult,
        }
    }
}

/// The gift giver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Npc {
    pub name: String,
    pub age: NpcAge,
    /// Horizontal tile position, part of the per-day gift seed
    pub tile_x: i32,
}

impl Npc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: NpcAge::Adult,
            tile_x: 0,
        }
    }

    pub fn with_age(mut self, age: NpcAge) -> Self {
        self.age = age;
        self
    }

    pub fn at_tile(mut self, tile_x: i32) -> Self {
        self.tile_x = tile_x;
        self
    }
}
