//! Line decoder for the pipe-delimited CUI protocol.
//!
//! A line such as `p2|0|120|-64|4` is split on [`DELIMITER`] into a
//! discriminator (`p2`) and positional arguments. The discriminator selects a
//! [`CommandKind`], the argument count is checked against the kind's arity,
//! and each argument is converted to its declared [`FieldType`]. Decoding is
//! pure: it never touches a store or a registry.

use std::str::FromStr;

use crate::command::{Colors, Command};
use crate::error::DecodeError;
use crate::geometry::{BlockPos, ColumnPos, Radii2, RegionShape, Vec3};
use crate::kind::{CommandKind, FieldType};

/// Token separator on the wire.
pub const DELIMITER: char = '|';

/// One wire line split into discriminator and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage<'a> {
    discriminator: &'a str,
    arguments: Vec<&'a str>,
}

impl<'a> RawMessage<'a> {
    /// Splits `line` on the delimiter after removing its line terminator.
    #[must_use]
    pub fn split(line: &'a str) -> Self {
        let mut tokens = strip_terminator(line).split(DELIMITER);
        let discriminator = tokens.next().unwrap_or_default();
        Self {
            discriminator,
            arguments: tokens.collect(),
        }
    }

    /// The first token.
    #[must_use]
    pub const fn discriminator(&self) -> &'a str {
        self.discriminator
    }

    /// Tokens after the discriminator.
    #[must_use]
    pub fn arguments(&self) -> &[&'a str] {
        &self.arguments
    }
}

/// Removes one trailing line terminator (`\r\n`, `\n` or `\r`) from `line`.
///
/// Anything before the terminator, including further `\r` or `\n`
/// characters, is kept.
#[must_use]
pub fn strip_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix(['\n', '\r']))
        .unwrap_or(line)
}

/// Decodes raw CUI lines into [`Command`]s.
///
/// # Example
///
/// ```
/// use cuibus_protocol::{ColumnPos, Command, Decoder};
///
/// let command = Decoder::new().decode("p2|0|120|-64|4").expect("valid line");
/// assert_eq!(
///     command,
///     Command::Point2D {
///         id: 0,
///         position: ColumnPos::new(120, -64),
///         region_size: 4,
///     }
/// );
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Decoder;

impl Decoder {
    /// Creates a decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decodes one line.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownCommand`] for discriminators outside the
    /// protocol, [`DecodeError::Arity`] for a wrong argument count, and
    /// [`DecodeError::FieldParse`] for the first argument that fails
    /// conversion.
    pub fn decode(&self, raw: &str) -> Result<Command, DecodeError> {
        let message = RawMessage::split(raw);
        let kind = CommandKind::from_str(message.discriminator())
            .map_err(|_| DecodeError::unknown_command(message.discriminator()))?;

        let arguments = message.arguments();
        if arguments.len() != kind.arity() {
            return Err(DecodeError::arity(kind, kind.arity(), arguments.len()));
        }

        let mut fields = Fields::new(kind, arguments);
        let command = match kind {
            CommandKind::Version => Command::Version {
                version: fields.integer()?,
            },
            CommandKind::RegionShape => Command::RegionShape {
                shape: fields.shape()?,
            },
            CommandKind::SelectionClear => Command::SelectionClear,
            CommandKind::Point3D => Command::Point3D {
                id: fields.integer()?,
                position: BlockPos::new(fields.integer()?, fields.integer()?, fields.integer()?),
                region_size: fields.integer()?,
            },
            CommandKind::Point2D => Command::Point2D {
                id: fields.integer()?,
                position: ColumnPos::new(fields.integer()?, fields.integer()?),
                region_size: fields.integer()?,
            },
            CommandKind::RegionPolygon => Command::RegionPolygon {
                min_y: fields.integer()?,
                max_y: fields.integer()?,
            },
            CommandKind::RegionEllipsoid => Command::RegionEllipsoid {
                id: fields.integer()?,
                value: Vec3::new(fields.decimal()?, fields.decimal()?, fields.decimal()?),
            },
            CommandKind::RegionCylinder => Command::RegionCylinder {
                center: BlockPos::new(fields.integer()?, fields.integer()?, fields.integer()?),
                radii: Radii2::new(fields.decimal()?, fields.decimal()?),
            },
            CommandKind::ColorSet => Command::ColorSet(Colors {
                grid: fields.text()?,
                edge: fields.text()?,
                first_point: fields.text()?,
                second_point: fields.text()?,
            }),
            CommandKind::GridSpacing => Command::GridSpacing {
                spacing: fields.decimal()?,
            },
        };
        Ok(command)
    }
}

/// Decodes one line with a default [`Decoder`].
///
/// # Errors
///
/// See [`Decoder::decode`].
pub fn decode(raw: &str) -> Result<Command, DecodeError> {
    Decoder::new().decode(raw)
}

/// Sequential reader over the arguments of one message.
struct Fields<'m, 'a> {
    kind: CommandKind,
    tokens: &'m [&'a str],
    next: usize,
}

impl<'m, 'a> Fields<'m, 'a> {
    const fn new(kind: CommandKind, tokens: &'m [&'a str]) -> Self {
        Self {
            kind,
            tokens,
            next: 0,
        }
    }

    fn take(&mut self) -> Result<(usize, &'a str), DecodeError> {
        let index = self.next;
        let token = self
            .tokens
            .get(index)
            .copied()
            .ok_or_else(|| DecodeError::arity(self.kind, self.kind.arity(), self.tokens.len()))?;
        self.next += 1;
        Ok((index, token))
    }

    fn reject(&self, index: usize, expected: FieldType, token: &str) -> DecodeError {
        DecodeError::field_parse(self.kind, index, expected, token)
    }

    fn integer(&mut self) -> Result<i32, DecodeError> {
        let (index, token) = self.take()?;
        token
            .parse::<i32>()
            .map_err(|_| self.reject(index, FieldType::Integer, token))
    }

    fn decimal(&mut self) -> Result<f64, DecodeError> {
        let (index, token) = self.take()?;
        token
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| self.reject(index, FieldType::Decimal, token))
    }

    fn text(&mut self) -> Result<String, DecodeError> {
        let (index, token) = self.take()?;
        if token.is_empty() {
            return Err(self.reject(index, FieldType::Text, token));
        }
        Ok(token.to_owned())
    }

    fn shape(&mut self) -> Result<RegionShape, DecodeError> {
        let (index, token) = self.take()?;
        RegionShape::from_str(token).map_err(|_| self.reject(index, FieldType::Shape, token))
    }
}
