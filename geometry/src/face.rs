/// Index used by the host for "no face".
pub const NO_FACE: u8 = 6;

/// The six axis-aligned faces of a cube, in the host's index order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    /// `-y`
    Down = 0,
    /// `+y`
    Up = 1,
    /// `-z`
    North = 2,
    /// `+z`
    South = 3,
    /// `-x`
    West = 4,
    /// `+x`
    East = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Down,
        Face::Up,
        Face::North,
        Face::South,
        Face::West,
        Face::East,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The index of `face`, [`NO_FACE`] for `None`.
    pub fn index_of(face: Option<Face>) -> u8 {
        face.map_or(NO_FACE, Face::index)
    }

    /// The unit lattice offset pointing out of this face.
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Face::Down => (0, -1, 0),
            Face::Up => (0, 1, 0),
            Face::North => (0, 0, -1),
            Face::South => (0, 0, 1),
            Face::West => (-1, 0, 0),
            Face::East => (1, 0, 0),
        }
    }

    /// The face for an exact unit offset along a single axis.
    pub fn from_offset(dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|face| face.offset() == (dx, dy, dz))
    }

    pub const fn opposite(self) -> Self {
        match self {
            Face::Down => Face::Up,
            Face::Up => Face::Down,
            Face::North => Face::South,
            Face::South => Face::North,
            Face::West => Face::East,
            Face::East => Face::West,
        }
    }
}
