//! Geometric value types carried by commands and held by selection stores.

use strum::{Display, EnumString};

/// Integer block position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos {
    /// East-west coordinate.
    pub x: i32,
    /// Height.
    pub y: i32,
    /// North-south coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Creates a block position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Integer column position, used by polygon vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColumnPos {
    /// East-west coordinate.
    pub x: i32,
    /// North-south coordinate.
    pub z: i32,
}

impl ColumnPos {
    /// Creates a column position.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Decimal triple used for ellipsoid centres and radii.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Creates a vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Horizontal cylinder radii.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Radii2 {
    /// Radius along X.
    pub x: f64,
    /// Radius along Z.
    pub z: f64,
}

impl Radii2 {
    /// Creates a radius pair.
    #[must_use]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

/// Region shapes a selection can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RegionShape {
    /// Axis-aligned box spanned by two corners.
    Cuboid,
    /// Extruded polygon.
    #[strum(serialize = "polygon2d")]
    Polygon2d,
    /// Ellipsoid around a centre.
    Ellipsoid,
    /// Vertical cylinder around a centre.
    Cylinder,
}

/// Corner addressed by a cuboid point write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CuboidCorner {
    /// Point id 0.
    First,
    /// Point id 1.
    Second,
}

impl CuboidCorner {
    /// Maps a wire point id to a corner.
    #[must_use]
    pub const fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }
}
