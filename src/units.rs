//! Length helpers: `px`, `%`, `em`, `rem`, `vw`, `vh` and `min`/`max`/`calc`.
//!
//! The browser target receives CSS text; the native target receives plain
//! numbers computed against a [`Viewport`].

use std::fmt;

use crate::config::Target;
use crate::style::value::{Literal, StyleValue};
use crate::theme::Breakpoint;

/// Base font size one `em` stands for on native, before font scaling.
const BASE_FONT_SIZE: f64 = 16.0;

/// A length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Px,
    /// Percentage of the parent dimension.
    Percent,
    Em,
    Rem,
    /// Percentage of the viewport width.
    Vw,
    /// Percentage of the viewport height.
    Vh,
}

impl Unit {
    fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Percent => "%",
            Unit::Em => "em",
            Unit::Rem => "rem",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
        }
    }
}

/// Arithmetic operator of a `calc` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div => a / b,
        }
    }
}

/// The window a native length is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// User font scale; `em` and `rem` are multiplied by it.
    pub font_scale: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            font_scale: 1.0,
        }
    }

    /// Set the font scale (builder).
    pub fn with_font_scale(mut self, font_scale: f32) -> Self {
        self.font_scale = font_scale;
        self
    }

    /// The breakpoint tier active at this width.
    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::from_width(self.width)
    }
}

/// A length, e.g. `10px`, `50%`, `min(10px, 5vw)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Length {
    Value { value: f64, unit: Unit },
    Min(Vec<Length>),
    Max(Vec<Length>),
    Calc(Box<Length>, Op, Box<Length>),
}

impl Length {
    pub fn px(value: f64) -> Self {
        Self::Value { value, unit: Unit::Px }
    }

    pub fn percent(value: f64) -> Self {
        Self::Value {
            value,
            unit: Unit::Percent,
        }
    }

    pub fn em(value: f64) -> Self {
        Self::Value { value, unit: Unit::Em }
    }

    pub fn rem(value: f64) -> Self {
        Self::Value {
            value,
            unit: Unit::Rem,
        }
    }

    pub fn vw(value: f64) -> Self {
        Self::Value { value, unit: Unit::Vw }
    }

    pub fn vh(value: f64) -> Self {
        Self::Value { value, unit: Unit::Vh }
    }

    /// The smallest of `values`.
    pub fn min(values: impl IntoIterator<Item = Length>) -> Self {
        Self::Min(values.into_iter().collect())
    }

    /// The largest of `values`.
    pub fn max(values: impl IntoIterator<Item = Length>) -> Self {
        Self::Max(values.into_iter().collect())
    }

    pub fn calc(first: Length, op: Op, second: Length) -> Self {
        Self::Calc(Box::new(first), op, Box::new(second))
    }

    /// The number of native pixels, or `None` when it depends on the parent
    /// (percentages).
    pub fn to_native(&self, viewport: &Viewport) -> Option<f64> {
        self.pixels(Some(viewport))
    }

    /// Native pixels; `vw` and `vh` need a viewport.
    fn pixels(&self, viewport: Option<&Viewport>) -> Option<f64> {
        match self {
            Length::Value { value, unit } => match unit {
                Unit::Px => Some(*value),
                Unit::Percent => None,
                Unit::Em | Unit::Rem => {
                    let scale = viewport.map_or(1.0, |viewport| f64::from(viewport.font_scale));
                    Some(scale * BASE_FONT_SIZE * value)
                }
                Unit::Vw => viewport.map(|viewport| value * f64::from(viewport.width) / 100.0),
                Unit::Vh => viewport.map(|viewport| value * f64::from(viewport.height) / 100.0),
            },
            Length::Min(values) => fold(values, viewport, f64::min),
            Length::Max(values) => fold(values, viewport, f64::max),
            Length::Calc(first, op, second) => {
                Some(op.apply(first.pixels(viewport)?, second.pixels(viewport)?))
            }
        }
    }

    /// The value a `target` consumes.
    ///
    /// Browser: CSS text. Native: a number, or CSS text when the length
    /// cannot be computed up front.
    pub fn resolve(&self, target: Target, viewport: &Viewport) -> Literal {
        self.literal(target, Some(viewport))
    }

    /// [`resolve`](Self::resolve) with an optional viewport. Without one,
    /// native `vw` and `vh` lengths stay CSS text.
    pub fn literal(&self, target: Target, viewport: Option<&Viewport>) -> Literal {
        let pixels = match target {
            Target::Browser => None,
            Target::Native => self.pixels(viewport),
        };
        match pixels {
            Some(pixels) => Literal::Number(pixels),
            None => Literal::Text(self.to_string()),
        }
    }
}

fn fold(values: &[Length], viewport: Option<&Viewport>, pick: fn(f64, f64) -> f64) -> Option<f64> {
    let mut out: Option<f64> = None;
    for value in values {
        let native = value.pixels(viewport)?;
        out = Some(out.map_or(native, |current| pick(current, native)));
    }
    out
}

fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        write!(f, "{}", value as i64)
    } else {
        write!(f, "{value}")
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, values: &[Length]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Value { value, unit } => {
                write_number(f, *value)?;
                f.write_str(unit.suffix())
            }
            Length::Min(values) => write_list(f, "min", values),
            Length::Max(values) => write_list(f, "max", values),
            Length::Calc(first, op, second) => write!(f, "calc({first} {} {second})", op.symbol()),
        }
    }
}

impl From<Length> for StyleValue {
    fn from(length: Length) -> Self {
        StyleValue::Length(length)
    }
}
