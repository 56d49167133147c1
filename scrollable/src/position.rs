use std::str::FromStr;

use crate::primitives::clamp_position;
use crate::{Axis, AxisSelection, Error, Result};

/// A position keyword. Each keyword implies the axis it applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Keyword {
    Top,
    Bottom,
    Left,
    Right,
}

impl Keyword {
    pub fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Y,
            Self::Left | Self::Right => Axis::X,
        }
    }

    pub fn coordinate(self) -> Coordinate {
        match self {
            Self::Top | Self::Left => Coordinate::Start,
            Self::Bottom | Self::Right => Coordinate::End,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// A destination on a single axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Coordinate {
    /// Absolute offset in pixels.
    Absolute(f64),
    /// Percentage (0..=100) of the scrollable extent.
    Percent(f64),
    /// Delta applied to the offset the axis has when the task is resolved.
    Relative(f64),
    /// Offset 0.
    Start,
    /// The maximum scrollable extent.
    End,
}

impl Coordinate {
    /// Resolves to an absolute offset, clamped to `[0, max_extent]`.
    pub fn resolve(self, current: f64, max_extent: f64) -> f64 {
        let raw = match self {
            Self::Absolute(v) => v,
            Self::Percent(p) => max_extent * p / 100.0,
            Self::Relative(d) => current + d,
            Self::Start => 0.0,
            Self::End => max_extent,
        };
        clamp_position(raw, max_extent)
    }

    pub(crate) fn validate(self) -> Result<Self> {
        match self {
            Self::Absolute(v) | Self::Percent(v) | Self::Relative(v) if !v.is_finite() => {
                Err(Error::NonFinite(v))
            }
            _ => Ok(self),
        }
    }

    /// Parses a coordinate for a known axis, accepting the keywords of that axis.
    pub fn parse_for_axis(s: &str, axis: Axis) -> Result<Self> {
        match Keyword::parse(s.trim()) {
            Some(k) if k.axis() == axis => Ok(k.coordinate()),
            Some(k) => Err(Error::AxisMismatch {
                keyword: k.axis(),
                axis: axis.into(),
            }),
            None => s.parse(),
        }
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidPosition(s.to_string());

        if let Some(rest) = s.strip_prefix("+=") {
            return parse_px(rest).map(Self::Relative).ok_or_else(invalid);
        }
        if let Some(rest) = s.strip_prefix("-=") {
            return parse_px(rest).map(|d| Self::Relative(-d)).ok_or_else(invalid);
        }
        if let Some(rest) = s.strip_suffix('%') {
            let p: f64 = rest.trim().parse().map_err(|_| invalid())?;
            return Self::Percent(p).validate();
        }
        parse_px(s).map(Self::Absolute).ok_or_else(invalid)
    }
}

fn parse_px(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s).trim();
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A user-supplied scroll destination.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// Applied to every axis the call is allowed to touch.
    Coordinate(Coordinate),
    /// Applied to the keyword's own axis only.
    Keyword(Keyword),
    /// Independent destinations per axis; `None` leaves an axis alone.
    Axes {
        x: Option<Coordinate>,
        y: Option<Coordinate>,
    },
}

impl Position {
    pub fn xy(x: impl Into<Coordinate>, y: impl Into<Coordinate>) -> Self {
        Self::Axes {
            x: Some(x.into()),
            y: Some(y.into()),
        }
    }

    pub fn x(x: impl Into<Coordinate>) -> Self {
        Self::Axes {
            x: Some(x.into()),
            y: None,
        }
    }

    pub fn y(y: impl Into<Coordinate>) -> Self {
        Self::Axes {
            x: None,
            y: Some(y.into()),
        }
    }

    /// Parses a two-axis position from optional per-axis strings.
    pub fn parse_axes(x: Option<&str>, y: Option<&str>) -> Result<Self> {
        Ok(Self::Axes {
            x: x.map(|s| Coordinate::parse_for_axis(s, Axis::X)).transpose()?,
            y: y.map(|s| Coordinate::parse_for_axis(s, Axis::Y)).transpose()?,
        })
    }

    /// The axes this position addresses by itself, if it addresses specific ones.
    pub fn implied_axes(&self) -> Option<AxisSelection> {
        match self {
            Self::Coordinate(_) => None,
            Self::Keyword(k) => Some(k.axis().into()),
            Self::Axes { x, y } => AxisSelection::from_axes(x.is_some(), y.is_some()),
        }
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match Keyword::parse(s.trim()) {
            Some(k) => Ok(Self::Keyword(k)),
            None => s.parse().map(Self::Coordinate),
        }
    }
}

impl From<f64> for Coordinate {
    fn from(v: f64) -> Self {
        Self::Absolute(v)
    }
}

impl From<i32> for Coordinate {
    fn from(v: i32) -> Self {
        Self::Absolute(f64::from(v))
    }
}

impl From<u32> for Coordinate {
    fn from(v: u32) -> Self {
        Self::Absolute(f64::from(v))
    }
}

impl From<Keyword> for Coordinate {
    fn from(k: Keyword) -> Self {
        k.coordinate()
    }
}

impl From<f64> for Position {
    fn from(v: f64) -> Self {
        Self::Coordinate(v.into())
    }
}

impl From<i32> for Position {
    fn from(v: i32) -> Self {
        Self::Coordinate(v.into())
    }
}

impl From<u32> for Position {
    fn from(v: u32) -> Self {
        Self::Coordinate(v.into())
    }
}

impl From<Coordinate> for Position {
    fn from(c: Coordinate) -> Self {
        Self::Coordinate(c)
    }
}

impl From<Keyword> for Position {
    fn from(k: Keyword) -> Self {
        Self::Keyword(k)
    }
}

impl TryFrom<&str> for Position {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl TryFrom<String> for Position {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A validated, axis-restricted destination.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTarget {
    pub x: Option<Coordinate>,
    pub y: Option<Coordinate>,
}

impl ScrollTarget {
    pub fn get(&self, axis: Axis) -> Option<Coordinate> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}
