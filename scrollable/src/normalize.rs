use std::str::FromStr;

use crate::{
    Axis, AxisSelection, Coordinate, ElementId, ElementKind, Error, Position, QueueName, Result,
    ScrollHost, ScrollOptions, ScrollTarget,
};

/// Maps a container reference to the node that owns scrolling for it.
///
/// - `Document`, `DocumentElement` and `Body` map to their window.
/// - A `Frame` maps to its content window.
/// - `None` and unknown handles stay `None`, which every operation treats as a no-op.
pub fn normalize_container<H: ScrollHost + ?Sized>(
    host: &H,
    container: Option<ElementId>,
) -> Option<ElementId> {
    let container = container?;
    match host.kind(container)? {
        ElementKind::Document | ElementKind::DocumentElement | ElementKind::Body => {
            host.owner_window(container)
        }
        ElementKind::Frame => host.content_window(container),
        ElementKind::Window | ElementKind::Element => Some(container),
    }
}

/// Parses an axis name. A missing or empty name selects both axes.
pub fn normalize_axis_name(name: Option<&str>) -> Result<AxisSelection> {
    let Some(name) = name else {
        return Ok(AxisSelection::Both);
    };
    match name.trim().to_ascii_lowercase().as_str() {
        "" | "both" | "xy" | "yx" | "hv" | "vh" => Ok(AxisSelection::Both),
        "x" | "h" | "horizontal" => Ok(AxisSelection::X),
        "y" | "v" | "vertical" => Ok(AxisSelection::Y),
        _ => Err(Error::InvalidAxis(name.to_string())),
    }
}

impl FromStr for AxisSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        normalize_axis_name(Some(s))
    }
}

/// Folds the engine's default queue name into [`QueueName::Default`] and rejects empty
/// names.
pub fn normalize_queue(queue: &QueueName) -> Result<QueueName> {
    match queue {
        QueueName::Named(name) if name.is_empty() => Err(Error::InvalidQueueName(name.clone())),
        QueueName::Named(name) if name == QueueName::DEFAULT_NAME => Ok(QueueName::Default),
        other => Ok(other.clone()),
    }
}

/// Returns a copy of `options` with every default filled in.
///
/// The axis is the explicit one if set, else the axes `position` addresses, else both.
pub fn normalize_options(options: &ScrollOptions, position: &Position) -> Result<ScrollOptions> {
    let mut out = options.clone();
    out.queue = normalize_queue(&options.queue)?;
    out.axis = Some(
        options
            .axis
            .or_else(|| position.implied_axes())
            .unwrap_or_default(),
    );
    Ok(out)
}

/// Validates `position` and restricts it to the selected axes.
pub fn normalize_position(position: &Position, axis: AxisSelection) -> Result<ScrollTarget> {
    let pick = |a: Axis, c: Option<Coordinate>| -> Result<Option<Coordinate>> {
        match c {
            Some(c) if axis.contains(a) => c.validate().map(Some),
            _ => Ok(None),
        }
    };

    match *position {
        Position::Coordinate(c) => Ok(ScrollTarget {
            x: pick(Axis::X, Some(c))?,
            y: pick(Axis::Y, Some(c))?,
        }),
        Position::Keyword(k) => {
            if !axis.contains(k.axis()) {
                return Err(Error::AxisMismatch {
                    keyword: k.axis(),
                    axis,
                });
            }
            let mut target = ScrollTarget::default();
            match k.axis() {
                Axis::X => target.x = Some(k.coordinate()),
                Axis::Y => target.y = Some(k.coordinate()),
            }
            Ok(target)
        }
        Position::Axes { x, y } => Ok(ScrollTarget {
            x: pick(Axis::X, x)?,
            y: pick(Axis::Y, y)?,
        }),
    }
}
