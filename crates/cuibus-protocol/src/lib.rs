//! Wire protocol for CUI selection messages.
//!
//! Messages are single lines of pipe-delimited tokens. The [`Decoder`] turns a
//! line into a typed [`Command`], and [`Command::apply`] writes it into a
//! [`SelectionStore`]. Both steps are synchronous and free of shared state so
//! callers may run them on whichever thread received the line.

pub mod command;
pub mod decoder;
pub mod error;
pub mod geometry;
pub mod kind;
pub mod store;

pub use command::{Colors, Command};
pub use decoder::{DELIMITER, Decoder, RawMessage, decode, strip_terminator};
pub use error::{ApplyError, DecodeError};
pub use geometry::{BlockPos, ColumnPos, CuboidCorner, Radii2, RegionShape, Vec3};
pub use kind::{CommandKind, FieldType};
pub use store::{
    Cuboid, Cylinder, DEFAULT_MAX_POLYGON_VERTICES, Ellipsoid, MIN_POLYGON_VERTICES, Polygon,
    Region, Selection, SelectionStore,
};
