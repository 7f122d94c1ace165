//! The six faces of a unit voxel cube.

/// One of the six cardinal directions a voxel face can point.
///
/// The `repr(u8)` discriminant doubles as the bit index inside [`super::VisibleFaces`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    /// +Y direction.
    Top = 0,
    /// −Y direction.
    Bottom = 1,
    /// +Z direction.
    Front = 2,
    /// −Z direction.
    Back = 3,
    /// −X direction.
    Left = 4,
    /// +X direction.
    Right = 5,
}

impl Face {
    /// All six faces in order.
    pub const ALL: [Face; 6] = [
        Self::Top,
        Self::Bottom,
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
    ];

    /// Returns `(layer_axis, u_axis, v_axis)`.
    ///
    /// `layer_axis` is perpendicular to the face; `u_axis` and `v_axis` span
    /// it. Each value is 0=X, 1=Y, 2=Z.
    pub fn axes(self) -> (usize, usize, usize) {
        match self {
            Self::Left | Self::Right => (0, 2, 1),
            Self::Top | Self::Bottom => (1, 0, 2),
            Self::Front | Self::Back => (2, 0, 1),
        }
    }

    /// Returns the unit normal as `[f32; 3]` for this face.
    pub fn normal(self) -> [f32; 3] {
        match self {
            Self::Top => [0.0, 1.0, 0.0],
            Self::Bottom => [0.0, -1.0, 0.0],
            Self::Front => [0.0, 0.0, 1.0],
            Self::Back => [0.0, 0.0, -1.0],
            Self::Left => [-1.0, 0.0, 0.0],
            Self::Right => [1.0, 0.0, 0.0],
        }
    }

    /// Returns the neighbor coordinate across this face.
    pub fn offset(self, x: i32, y: i32, z: i32) -> (i32, i32, i32) {
        match self {
            Self::Top => (x, y + 1, z),
            Self::Bottom => (x, y - 1, z),
            Self::Front => (x, y, z + 1),
            Self::Back => (x, y, z - 1),
            Self::Left => (x - 1, y, z),
            Self::Right => (x + 1, y, z),
        }
    }

    /// Returns the opposite face.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Front => Self::Back,
            Self::Back => Self::Front,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// `true` for faces pointing down an axis; they sit on the near side of
    /// the voxel.
    pub fn is_negative(self) -> bool {
        matches!(self, Self::Bottom | Self::Back | Self::Left)
    }

    /// `true` when corners laid out in `(u, v)` order over [`Face::axes`] wind
    /// clockwise seen from outside, so the triangle indices must be flipped.
    pub fn flips_winding(self) -> bool {
        let (layer, u, v) = self.axes();
        // u x v points along +layer when (u, v, layer) is a cyclic order of (X, Y, Z).
        let u_cross_v_positive = (u + 1) % 3 == v;
        let outward_positive = self.normal()[layer] > 0.0;
        u_cross_v_positive != outward_positive
    }
}
