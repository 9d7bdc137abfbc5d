//! Selection storage seam and the in-memory reference model.
//!
//! [`SelectionStore`] is the only way commands mutate geometry. Each method is
//! a single infallible write; commands validate before calling any of them,
//! which keeps every command all-or-nothing. Writes addressing a shape other
//! than the active one replace the active region with an empty region of the
//! addressed shape first.
//!
//! [`Selection`] implements the trait for embedders that do not bring their
//! own model and for tests.

use std::collections::BTreeMap;

use crate::geometry::{BlockPos, ColumnPos, CuboidCorner, Radii2, RegionShape, Vec3};

/// Upper bound on polygon vertex ids when the store does not choose one.
pub const DEFAULT_MAX_POLYGON_VERTICES: usize = 1024;

/// Vertices a polygon needs before it encloses an area.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Mutable geometric model updated by [`Command::apply`](crate::Command::apply).
///
/// Implementations must make every method idempotent: repeating a call with
/// the same arguments leaves the store as it was after the first call.
pub trait SelectionStore {
    /// Exclusive upper bound for polygon vertex ids.
    fn max_polygon_vertices(&self) -> usize {
        DEFAULT_MAX_POLYGON_VERTICES
    }

    /// Drops the active region.
    fn clear(&mut self);

    /// Replaces the active region with an empty region of `shape`.
    fn select_shape(&mut self, shape: RegionShape);

    /// Sets one corner of the active cuboid.
    fn set_cuboid_corner(&mut self, corner: CuboidCorner, position: BlockPos);

    /// Sets vertex `index` of the active polygon.
    fn set_polygon_vertex(&mut self, index: usize, position: ColumnPos);

    /// Sets the height bounds of the active polygon.
    fn set_polygon_bounds(&mut self, min_y: i32, max_y: i32);

    /// Sets the centre of the active ellipsoid.
    fn set_ellipsoid_center(&mut self, center: Vec3);

    /// Sets the radii of the active ellipsoid.
    fn set_ellipsoid_radii(&mut self, radii: Vec3);

    /// Sets the centre and radii of the active cylinder.
    fn set_cylinder(&mut self, center: BlockPos, radii: Radii2);
}

/// Cuboid spanned by up to two corners.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cuboid {
    first: Option<BlockPos>,
    second: Option<BlockPos>,
}

impl Cuboid {
    /// Corner set by point id 0.
    #[must_use]
    pub const fn first(&self) -> Option<BlockPos> {
        self.first
    }

    /// Corner set by point id 1.
    #[must_use]
    pub const fn second(&self) -> Option<BlockPos> {
        self.second
    }
}

/// Polygon with vertices keyed by id and optional height bounds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    vertices: BTreeMap<usize, ColumnPos>,
    bounds: Option<(i32, i32)>,
}

impl Polygon {
    /// Vertex with the given id, if set.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<ColumnPos> {
        self.vertices.get(&index).copied()
    }

    /// Vertices in ascending id order.
    pub fn vertices(&self) -> impl Iterator<Item = (usize, ColumnPos)> + '_ {
        self.vertices.iter().map(|(index, position)| (*index, *position))
    }

    /// Number of vertices set.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Height bounds as `(min, max)`, if set.
    #[must_use]
    pub const fn bounds(&self) -> Option<(i32, i32)> {
        self.bounds
    }
}

/// Ellipsoid with optional centre and radii.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ellipsoid {
    center: Option<Vec3>,
    radii: Option<Vec3>,
}

impl Ellipsoid {
    /// Centre, if set.
    #[must_use]
    pub const fn center(&self) -> Option<Vec3> {
        self.center
    }

    /// Radii, if set.
    #[must_use]
    pub const fn radii(&self) -> Option<Vec3> {
        self.radii
    }
}

/// Cylinder with optional centre and radii.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cylinder {
    center: Option<BlockPos>,
    radii: Option<Radii2>,
}

impl Cylinder {
    /// Centre, if set.
    #[must_use]
    pub const fn center(&self) -> Option<BlockPos> {
        self.center
    }

    /// Radii, if set.
    #[must_use]
    pub const fn radii(&self) -> Option<Radii2> {
        self.radii
    }
}

/// The active region of a [`Selection`].
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    /// Cuboid region.
    Cuboid(Cuboid),
    /// Polygon region.
    Polygon(Polygon),
    /// Ellipsoid region.
    Ellipsoid(Ellipsoid),
    /// Cylinder region.
    Cylinder(Cylinder),
}

impl Region {
    /// Creates an empty region of `shape`.
    #[must_use]
    pub fn empty(shape: RegionShape) -> Self {
        match shape {
            RegionShape::Cuboid => Self::Cuboid(Cuboid::default()),
            RegionShape::Polygon2d => Self::Polygon(Polygon::default()),
            RegionShape::Ellipsoid => Self::Ellipsoid(Ellipsoid::default()),
            RegionShape::Cylinder => Self::Cylinder(Cylinder::default()),
        }
    }

    /// Shape of the region.
    #[must_use]
    pub const fn shape(&self) -> RegionShape {
        match self {
            Self::Cuboid(_) => RegionShape::Cuboid,
            Self::Polygon(_) => RegionShape::Polygon2d,
            Self::Ellipsoid(_) => RegionShape::Ellipsoid,
            Self::Cylinder(_) => RegionShape::Cylinder,
        }
    }

    /// Returns `true` once the region has enough points to describe a volume.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Cuboid(cuboid) => cuboid.first.is_some() && cuboid.second.is_some(),
            Self::Polygon(polygon) => polygon.vertices.len() >= MIN_POLYGON_VERTICES,
            Self::Ellipsoid(ellipsoid) => ellipsoid.center.is_some() && ellipsoid.radii.is_some(),
            Self::Cylinder(cylinder) => cylinder.center.is_some() && cylinder.radii.is_some(),
        }
    }
}

/// In-memory selection holding at most one active region.
///
/// # Example
///
/// ```
/// use cuibus_protocol::{ColumnPos, Selection, SelectionStore};
///
/// let mut selection = Selection::new();
/// selection.set_polygon_vertex(0, ColumnPos::new(120, -64));
/// let polygon = selection.polygon().expect("polygon is active");
/// assert_eq!(polygon.vertex(0), Some(ColumnPos::new(120, -64)));
/// assert!(!selection.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    region: Option<Region>,
    max_polygon_vertices: usize,
}

impl Selection {
    /// Creates an empty selection with the default polygon vertex limit.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_polygon_vertices(DEFAULT_MAX_POLYGON_VERTICES)
    }

    /// Creates an empty selection with a custom polygon vertex limit.
    #[must_use]
    pub const fn with_max_polygon_vertices(max_polygon_vertices: usize) -> Self {
        Self {
            region: None,
            max_polygon_vertices,
        }
    }

    /// The active region, if any.
    #[must_use]
    pub const fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// Shape of the active region, if any.
    #[must_use]
    pub fn shape(&self) -> Option<RegionShape> {
        self.region.as_ref().map(Region::shape)
    }

    /// Returns `true` when a region is active and complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.region.as_ref().is_some_and(Region::is_complete)
    }

    /// The active cuboid, if the active region is one.
    #[must_use]
    pub const fn cuboid(&self) -> Option<&Cuboid> {
        match &self.region {
            Some(Region::Cuboid(cuboid)) => Some(cuboid),
            _ => None,
        }
    }

    /// The active polygon, if the active region is one.
    #[must_use]
    pub const fn polygon(&self) -> Option<&Polygon> {
        match &self.region {
            Some(Region::Polygon(polygon)) => Some(polygon),
            _ => None,
        }
    }

    /// The active ellipsoid, if the active region is one.
    #[must_use]
    pub const fn ellipsoid(&self) -> Option<&Ellipsoid> {
        match &self.region {
            Some(Region::Ellipsoid(ellipsoid)) => Some(ellipsoid),
            _ => None,
        }
    }

    /// The active cylinder, if the active region is one.
    #[must_use]
    pub const fn cylinder(&self) -> Option<&Cylinder> {
        match &self.region {
            Some(Region::Cylinder(cylinder)) => Some(cylinder),
            _ => None,
        }
    }

    /// Returns the active region, replacing it first if its shape differs.
    fn region_mut(&mut self, shape: RegionShape) -> &mut Region {
        if self.shape() != Some(shape) {
            self.region = None;
        }
        self.region.get_or_insert_with(|| Region::empty(shape))
    }

    fn cuboid_mut(&mut self) -> Option<&mut Cuboid> {
        match self.region_mut(RegionShape::Cuboid) {
            Region::Cuboid(cuboid) => Some(cuboid),
            _ => None,
        }
    }

    fn polygon_mut(&mut self) -> Option<&mut Polygon> {
        match self.region_mut(RegionShape::Polygon2d) {
            Region::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    fn ellipsoid_mut(&mut self) -> Option<&mut Ellipsoid> {
        match self.region_mut(RegionShape::Ellipsoid) {
            Region::Ellipsoid(ellipsoid) => Some(ellipsoid),
            _ => None,
        }
    }

    fn cylinder_mut(&mut self) -> Option<&mut Cylinder> {
        match self.region_mut(RegionShape::Cylinder) {
            Region::Cylinder(cylinder) => Some(cylinder),
            _ => None,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore for Selection {
    fn max_polygon_vertices(&self) -> usize {
        self.max_polygon_vertices
    }

    fn clear(&mut self) {
        self.region = None;
    }

    fn select_shape(&mut self, shape: RegionShape) {
        self.region = Some(Region::empty(shape));
    }

    fn set_cuboid_corner(&mut self, corner: CuboidCorner, position: BlockPos) {
        if let Some(cuboid) = self.cuboid_mut() {
            match corner {
                CuboidCorner::First => cuboid.first = Some(position),
                CuboidCorner::Second => cuboid.second = Some(position),
            }
        }
    }

    fn set_polygon_vertex(&mut self, index: usize, position: ColumnPos) {
        if let Some(polygon) = self.polygon_mut() {
            polygon.vertices.insert(index, position);
        }
    }

    fn set_polygon_bounds(&mut self, min_y: i32, max_y: i32) {
        if let Some(polygon) = self.polygon_mut() {
            polygon.bounds = Some((min_y, max_y));
        }
    }

    fn set_ellipsoid_center(&mut self, center: Vec3) {
        if let Some(ellipsoid) = self.ellipsoid_mut() {
            ellipsoid.center = Some(center);
        }
    }

    fn set_ellipsoid_radii(&mut self, radii: Vec3) {
        if let Some(ellipsoid) = self.ellipsoid_mut() {
            ellipsoid.radii = Some(radii);
        }
    }

    fn set_cylinder(&mut self, center: BlockPos, radii: Radii2) {
        if let Some(cylinder) = self.cylinder_mut() {
            cylinder.center = Some(center);
            cylinder.radii = Some(radii);
        }
    }
}
