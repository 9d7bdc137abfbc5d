//! Typed CUI commands and their effect on a selection store.
//!
//! Every variant validates all of its fields before issuing the first store
//! write, so a failing command leaves the store exactly as it found it.

use crate::error::ApplyError;
use crate::geometry::{BlockPos, ColumnPos, CuboidCorner, Radii2, RegionShape, Vec3};
use crate::kind::CommandKind;
use crate::store::SelectionStore;

/// Colour scheme announced by the sender, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colors {
    /// Grid line colour.
    pub grid: String,
    /// Edge line colour.
    pub edge: String,
    /// First point colour.
    pub first_point: String,
    /// Second point colour.
    pub second_point: String,
}

/// A decoded, validated CUI message.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `v|version`
    Version {
        /// Protocol version announced by the sender.
        version: i32,
    },
    /// `s|shape`
    RegionShape {
        /// Shape of the new region.
        shape: RegionShape,
    },
    /// `clear`
    SelectionClear,
    /// `p|id|x|y|z|size`
    Point3D {
        /// Corner id.
        id: i32,
        /// Corner position.
        position: BlockPos,
        /// Region volume reported by the sender; informational only.
        region_size: i32,
    },
    /// `p2|id|x|z|size`
    Point2D {
        /// Vertex id.
        id: i32,
        /// Vertex position.
        position: ColumnPos,
        /// Region area reported by the sender; informational only.
        region_size: i32,
    },
    /// `mm|min|max`
    RegionPolygon {
        /// Lowest layer.
        min_y: i32,
        /// Highest layer.
        max_y: i32,
    },
    /// `e|id|x|y|z`
    RegionEllipsoid {
        /// 0 for the centre, 1 for the radii.
        id: i32,
        /// Centre or radii, depending on `id`.
        value: Vec3,
    },
    /// `cyl|x|y|z|rx|rz`
    RegionCylinder {
        /// Base centre.
        center: BlockPos,
        /// Horizontal radii.
        radii: Radii2,
    },
    /// `col|grid|edge|first|second`
    ColorSet(Colors),
    /// `grid|spacing`
    GridSpacing {
        /// Spacing between grid lines.
        spacing: f64,
    },
}

const ELLIPSOID_CENTER: i32 = 0;
const ELLIPSOID_RADII: i32 = 1;

impl Command {
    /// Kind of this command.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Version { .. } => CommandKind::Version,
            Self::RegionShape { .. } => CommandKind::RegionShape,
            Self::SelectionClear => CommandKind::SelectionClear,
            Self::Point3D { .. } => CommandKind::Point3D,
            Self::Point2D { .. } => CommandKind::Point2D,
            Self::RegionPolygon { .. } => CommandKind::RegionPolygon,
            Self::RegionEllipsoid { .. } => CommandKind::RegionEllipsoid,
            Self::RegionCylinder { .. } => CommandKind::RegionCylinder,
            Self::ColorSet(_) => CommandKind::ColorSet,
            Self::GridSpacing { .. } => CommandKind::GridSpacing,
        }
    }

    /// Applies the command to `store`.
    ///
    /// Informational commands succeed without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] when a field is outside the range the store
    /// accepts. The store is not modified in that case.
    pub fn apply<S>(&self, store: &mut S) -> Result<(), ApplyError>
    where
        S: SelectionStore + ?Sized,
    {
        match self {
            Self::Version { .. } | Self::ColorSet(_) | Self::GridSpacing { .. } => {}
            Self::RegionShape { shape } => store.select_shape(*shape),
            Self::SelectionClear => store.clear(),
            Self::Point3D { id, position, .. } => {
                let corner = CuboidCorner::from_id(*id).ok_or_else(|| {
                    ApplyError::out_of_range(CommandKind::Point3D, "id", id, "0 or 1")
                })?;
                store.set_cuboid_corner(corner, *position);
            }
            Self::Point2D { id, position, .. } => {
                let index = vertex_index(*id, store.max_polygon_vertices())?;
                store.set_polygon_vertex(index, *position);
            }
            Self::RegionPolygon { min_y, max_y } => {
                if min_y > max_y {
                    return Err(ApplyError::InvertedBounds {
                        min: *min_y,
                        max: *max_y,
                    });
                }
                store.set_polygon_bounds(*min_y, *max_y);
            }
            Self::RegionEllipsoid { id, value } => match *id {
                ELLIPSOID_CENTER => store.set_ellipsoid_center(*value),
                ELLIPSOID_RADII => {
                    let radii = [
                        ("radius x", value.x),
                        ("radius y", value.y),
                        ("radius z", value.z),
                    ];
                    for (field, radius) in radii {
                        ensure_radius(CommandKind::RegionEllipsoid, field, radius)?;
                    }
                    store.set_ellipsoid_radii(*value);
                }
                other => {
                    return Err(ApplyError::out_of_range(
                        CommandKind::RegionEllipsoid,
                        "id",
                        other,
                        "0 or 1",
                    ));
                }
            },
            Self::RegionCylinder { center, radii } => {
                ensure_radius(CommandKind::RegionCylinder, "radius x", radii.x)?;
                ensure_radius(CommandKind::RegionCylinder, "radius z", radii.z)?;
                store.set_cylinder(*center, *radii);
            }
        }
        Ok(())
    }
}

fn vertex_index(id: i32, max_vertices: usize) -> Result<usize, ApplyError> {
    usize::try_from(id)
        .ok()
        .filter(|index| *index < max_vertices)
        .ok_or_else(|| {
            ApplyError::out_of_range(
                CommandKind::Point2D,
                "id",
                id,
                format!("0..{max_vertices}"),
            )
        })
}

fn ensure_radius(kind: CommandKind, field: &'static str, radius: f64) -> Result<(), ApplyError> {
    if radius >= 0.0 {
        Ok(())
    } else {
        Err(ApplyError::out_of_range(kind, field, radius, "non-negative"))
    }
}

#[cfg(test)]
mod tests;
