/// An opaque handle to a host-owned node (window, document, element, frame).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u64);

/// What a host node is, as far as scrolling is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    Window,
    Document,
    DocumentElement,
    Body,
    /// An embedded frame; its scrolling is owned by its content window.
    Frame,
    Element,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];
}

/// The axes a call is allowed to touch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisSelection {
    X,
    Y,
    #[default]
    Both,
}

impl AxisSelection {
    pub fn contains(self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (Self::Both, _) | (Self::X, Axis::X) | (Self::Y, Axis::Y)
        )
    }

    pub fn from_axes(x: bool, y: bool) -> Option<Self> {
        match (x, y) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::X),
            (false, true) => Some(Self::Y),
            (false, false) => None,
        }
    }
}

impl From<Axis> for AxisSelection {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::X,
            Axis::Y => Self::Y,
        }
    }
}

/// Which of the two root candidates owns the scroll offset of a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollRoot {
    DocumentElement,
    Body,
}

/// Lifecycle of a scheduled scroll animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskState {
    Queued,
    Running,
    /// Reached its target.
    Done,
    /// Stopped while running. `fail` and `always` fired.
    Aborted,
    /// Removed from its queue before it ever ran. No callback fired.
    Discarded,
}

/// The concrete element(s) that actually get animated for a container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Surface {
    elements: Vec<ElementId>,
}

impl Surface {
    pub fn new(elements: Vec<ElementId>) -> Self {
        Self { elements }
    }

    pub fn single(element: ElementId) -> Self {
        Self {
            elements: vec![element],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.elements.contains(&element)
    }
}
