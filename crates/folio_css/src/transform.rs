//! CSS transforms on embedding frames.
//!
//! Only the scale part of a frame's transform matters for selection geometry.
//! [`scale_factors_from_transform`] is the one entry point callers use; the
//! parser behind it can grow new transform functions without touching them.

use core::f32::consts::{PI, TAU};
use cssparser::{ParseError, ParseErrorKind, Parser, ParserInput, Token};
use serde::{Deserialize, Serialize};

/// 2D affine transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Matrix values [a, b, c, d, e, f] for:
    /// | a  c  e |
    /// | b  d  f |
    /// | 0  0  1 |
    pub matrix: [f32; 6],
}

impl Transform2D {
    /// Identity transform.
    pub const fn identity() -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Scale.
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            matrix: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Rotation by `angle` radians, clockwise in screen space.
    pub fn rotate(angle: f32) -> Self {
        let cos = angle.cos();
        let sin = angle.sin();
        Self {
            matrix: [cos, sin, -sin, cos, 0.0, 0.0],
        }
    }

    /// Skew by `x` and `y` radians along the respective axes.
    pub fn skew(x: f32, y: f32) -> Self {
        Self {
            matrix: [1.0, y.tan(), x.tan(), 1.0, 0.0, 0.0],
        }
    }

    /// Translation.
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    /// Custom matrix, argument order as in CSS `matrix()`.
    pub const fn matrix(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self {
            matrix: [a, b, c, d, e, f],
        }
    }

    /// `self * other`: applies `other` first, then `self`, which is the
    /// order of a CSS transform list read left to right.
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        let [a1, b1, c1, d1, e1, f1] = self.matrix;
        let [a2, b2, c2, d2, e2, f2] = other.matrix;
        Self {
            matrix: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * e2 + c1 * f2 + e1,
                b1 * e2 + d1 * f2 + f1,
            ],
        }
    }

    /// Horizontal and vertical scale, read straight off the `a` and `d`
    /// entries the way a computed `matrix()` reports them. Rotation and skew
    /// are not decomposed out.
    pub fn scale_factors(&self) -> ScaleFactors {
        let [a, _, _, d, _, _] = self.matrix;
        if a.is_finite() && d.is_finite() {
            ScaleFactors { sx: a, sy: d }
        } else {
            ScaleFactors::IDENTITY
        }
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

/// Horizontal and vertical scale of an embedding surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub sx: f32,
    pub sy: f32,
}

impl ScaleFactors {
    pub const IDENTITY: Self = Self { sx: 1.0, sy: 1.0 };

    pub const fn new(sx: f32, sy: f32) -> Self {
        Self { sx, sy }
    }
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Why a transform value could not be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformError {
    /// Tokens did not form a transform list.
    Syntax,
    /// A transform function this parser does not understand.
    UnsupportedFunction,
    /// Wrong number of arguments for a known function.
    ArgumentCount,
}

/// Parse a computed or authored `transform` value.
///
/// Accepts `none` and a whitespace-separated list of the 2D transform
/// functions (`matrix`, `translate*`, `scale*`, `rotate`, `skew*`) plus
/// `matrix3d`, `translate3d`, `scale3d` and `rotateZ` projected onto the 2D
/// plane. The list composes left to right.
///
/// Translation offsets other than `px` need the element's layout to resolve
/// and are taken as zero; they never change the scale.
///
/// # Errors
/// Returns a [`TransformError`] describing the first problem found.
pub fn parse_transform(value: &str) -> Result<Transform2D, TransformError> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    if parser
        .try_parse(|candidate| candidate.expect_ident_matching("none"))
        .is_ok()
    {
        return parser
            .expect_exhausted()
            .map(|()| Transform2D::identity())
            .map_err(|_| TransformError::Syntax);
    }

    let mut transform = Transform2D::identity();
    let mut seen_function = false;
    while !parser.is_exhausted() {
        let name = parser
            .expect_function()
            .map_err(|_| TransformError::Syntax)?
            .to_ascii_lowercase();
        let function = parser
            .parse_nested_block(|block| parse_function(&name, block))
            .map_err(|err: ParseError<'_, TransformError>| match err.kind {
                ParseErrorKind::Custom(kind) => kind,
                ParseErrorKind::Basic(_) => TransformError::Syntax,
            })?;
        transform = transform.then(&function);
        seen_function = true;
    }
    if seen_function {
        Ok(transform)
    } else {
        Err(TransformError::Syntax)
    }
}

fn parse_function<'i>(
    name: &str,
    block: &mut Parser<'i, '_>,
) -> Result<Transform2D, ParseError<'i, TransformError>> {
    match name {
        "matrix" => {
            let values = parse_numbers(block)?;
            let [a, b, c, d, e, f] =
                <[f32; 6]>::try_from(values.as_slice()).map_err(|_| argument_count(block))?;
            Ok(Transform2D::matrix(a, b, c, d, e, f))
        }
        "matrix3d" => {
            let values = parse_numbers(block)?;
            let matrix = <[f32; 16]>::try_from(values.as_slice()).map_err(|_| argument_count(block))?;
            // Column-major 4x4; keep the x/y rows of the first, second and
            // fourth columns.
            Ok(Transform2D::matrix(
                matrix[0], matrix[1], matrix[4], matrix[5], matrix[12], matrix[13],
            ))
        }
        "translate" => match parse_lengths(block)?.as_slice() {
            [tx] => Ok(Transform2D::translate(*tx, 0.0)),
            [tx, ty] => Ok(Transform2D::translate(*tx, *ty)),
            _ => Err(argument_count(block)),
        },
        "translatex" => match parse_lengths(block)?.as_slice() {
            [tx] => Ok(Transform2D::translate(*tx, 0.0)),
            _ => Err(argument_count(block)),
        },
        "translatey" => match parse_lengths(block)?.as_slice() {
            [ty] => Ok(Transform2D::translate(0.0, *ty)),
            _ => Err(argument_count(block)),
        },
        "translate3d" => match parse_lengths(block)?.as_slice() {
            [tx, ty, _] => Ok(Transform2D::translate(*tx, *ty)),
            _ => Err(argument_count(block)),
        },
        "scale" => match parse_numbers(block)?.as_slice() {
            [uniform] => Ok(Transform2D::scale(*uniform, *uniform)),
            [sx, sy] => Ok(Transform2D::scale(*sx, *sy)),
            _ => Err(argument_count(block)),
        },
        "scalex" => match parse_numbers(block)?.as_slice() {
            [sx] => Ok(Transform2D::scale(*sx, 1.0)),
            _ => Err(argument_count(block)),
        },
        "scaley" => match parse_numbers(block)?.as_slice() {
            [sy] => Ok(Transform2D::scale(1.0, *sy)),
            _ => Err(argument_count(block)),
        },
        "scale3d" => match parse_numbers(block)?.as_slice() {
            [sx, sy, _] => Ok(Transform2D::scale(*sx, *sy)),
            _ => Err(argument_count(block)),
        },
        "rotate" | "rotatez" => match parse_angles(block)?.as_slice() {
            [angle] => Ok(Transform2D::rotate(*angle)),
            _ => Err(argument_count(block)),
        },
        "skew" => match parse_angles(block)?.as_slice() {
            [ax] => Ok(Transform2D::skew(*ax, 0.0)),
            [ax, ay] => Ok(Transform2D::skew(*ax, *ay)),
            _ => Err(argument_count(block)),
        },
        "skewx" => match parse_angles(block)?.as_slice() {
            [ax] => Ok(Transform2D::skew(*ax, 0.0)),
            _ => Err(argument_count(block)),
        },
        "skewy" => match parse_angles(block)?.as_slice() {
            [ay] => Ok(Transform2D::skew(0.0, *ay)),
            _ => Err(argument_count(block)),
        },
        _ => Err(block.new_custom_error(TransformError::UnsupportedFunction)),
    }
}

fn argument_count<'i>(block: &Parser<'i, '_>) -> ParseError<'i, TransformError> {
    block.new_custom_error(TransformError::ArgumentCount)
}

/// Comma-separated `<number>` arguments.
fn parse_numbers<'i>(block: &mut Parser<'i, '_>) -> Result<Vec<f32>, ParseError<'i, TransformError>> {
    block.parse_comma_separated(|arg| arg.expect_number().map_err(Into::into))
}

/// Comma-separated `<length-percentage>` arguments, as pixel offsets.
fn parse_lengths<'i>(block: &mut Parser<'i, '_>) -> Result<Vec<f32>, ParseError<'i, TransformError>> {
    block.parse_comma_separated(|arg| {
        let offset = match *arg.next()? {
            Token::Dimension {
                value, ref unit, ..
            } if unit.eq_ignore_ascii_case("px") => Some(value),
            Token::Dimension { .. } | Token::Percentage { .. } => Some(0.0),
            Token::Number {
                int_value: Some(0), ..
            } => Some(0.0),
            _ => None,
        };
        offset.ok_or_else(|| arg.new_custom_error(TransformError::Syntax))
    })
}

/// Comma-separated `<angle>` arguments, in radians.
fn parse_angles<'i>(block: &mut Parser<'i, '_>) -> Result<Vec<f32>, ParseError<'i, TransformError>> {
    block.parse_comma_separated(|arg| {
        let radians = match *arg.next()? {
            Token::Dimension {
                value, ref unit, ..
            } => angle_to_radians(value, unit),
            Token::Number {
                int_value: Some(0), ..
            } => Some(0.0),
            _ => None,
        };
        radians.ok_or_else(|| arg.new_custom_error(TransformError::Syntax))
    })
}

fn angle_to_radians(value: f32, unit: &str) -> Option<f32> {
    match unit.to_ascii_lowercase().as_str() {
        "deg" => Some(value.to_radians()),
        "rad" => Some(value),
        "grad" => Some(value * PI / 200.0),
        "turn" => Some(value * TAU),
        _ => None,
    }
}

/// Scale factors of a transform value, identity when it cannot be parsed.
pub fn scale_factors_from_transform(value: &str) -> ScaleFactors {
    match parse_transform(value) {
        Ok(transform) => transform.scale_factors(),
        Err(err) => {
            log::debug!(
                target: "folio_css",
                "ignoring unreadable transform {value:?} ({err:?}), using identity scale"
            );
            ScaleFactors::IDENTITY
        }
    }
}
