//! The closed set of CUI command kinds and their field layouts.

use std::fmt;

use strum::{Display, EnumString};

/// Type of a positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Strict base-10 `i32`.
    Integer,
    /// Finite `f64`.
    Decimal,
    /// Non-empty free text.
    Text,
    /// Region shape name.
    Shape,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Text => "string",
            Self::Shape => "region shape",
        })
    }
}

use self::FieldType::{Decimal, Integer, Shape, Text};

/// Command discriminators understood by the decoder.
///
/// The string form of each kind is its wire discriminator; parsing ignores
/// ASCII case.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum CommandKind {
    /// Protocol version announcement.
    #[strum(serialize = "v")]
    Version,
    /// Starts a new, empty region of the named shape.
    #[strum(serialize = "s")]
    RegionShape,
    /// Clears the active selection.
    #[strum(serialize = "clear")]
    SelectionClear,
    /// Cuboid corner write.
    #[strum(serialize = "p")]
    Point3D,
    /// Polygon vertex write.
    #[strum(serialize = "p2")]
    Point2D,
    /// Polygon height bounds.
    #[strum(serialize = "mm")]
    RegionPolygon,
    /// Ellipsoid centre or radii.
    #[strum(serialize = "e")]
    RegionEllipsoid,
    /// Cylinder centre and radii.
    #[strum(serialize = "cyl")]
    RegionCylinder,
    /// Colour scheme for downstream renderers.
    #[strum(serialize = "col")]
    ColorSet,
    /// Grid spacing for downstream renderers.
    #[strum(serialize = "grid")]
    GridSpacing,
}

impl CommandKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Version,
        Self::RegionShape,
        Self::SelectionClear,
        Self::Point3D,
        Self::Point2D,
        Self::RegionPolygon,
        Self::RegionEllipsoid,
        Self::RegionCylinder,
        Self::ColorSet,
        Self::GridSpacing,
    ];

    /// Declared argument types, in wire order.
    #[must_use]
    pub const fn fields(self) -> &'static [FieldType] {
        match self {
            Self::Version => &[Integer],
            Self::RegionShape => &[Shape],
            Self::SelectionClear => &[],
            Self::Point3D => &[Integer, Integer, Integer, Integer, Integer],
            Self::Point2D => &[Integer, Integer, Integer, Integer],
            Self::RegionPolygon => &[Integer, Integer],
            Self::RegionEllipsoid => &[Integer, Decimal, Decimal, Decimal],
            Self::RegionCylinder => &[Integer, Integer, Integer, Decimal, Decimal],
            Self::ColorSet => &[Text, Text, Text, Text],
            Self::GridSpacing => &[Decimal],
        }
    }

    /// Number of arguments a message of this kind must carry.
    #[must_use]
    pub const fn arity(self) -> usize {
        self.fields().len()
    }
}
