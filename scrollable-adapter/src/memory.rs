use std::collections::BTreeMap;

use scrollable::{Axis, ElementId, ElementKind, Offset, ScrollHost, ScrollRoot};

/// Width/height of a viewport or of scrollable content.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

/// The nodes created for one window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowHandles {
    pub window: ElementId,
    pub document: ElementId,
    pub document_element: ElementId,
    pub body: ElementId,
}

#[derive(Clone, Debug)]
struct Node {
    kind: ElementKind,
    /// Owner window for document nodes, content window for frames.
    window: Option<ElementId>,
    viewport: Size,
    content: Size,
    offset: Offset,
}

#[derive(Clone, Copy, Debug)]
struct WindowInfo {
    handles: WindowHandles,
    quirks: bool,
}

/// An in-memory document tree implementing [`ScrollHost`].
///
/// It mimics the browser behavior the scroller has to cope with:
/// - window scrolling is owned by either `documentElement` or `body` (the "engine root"),
///   and by `body` in quirks mode;
/// - writes to the other candidate are ignored, and it reads back 0;
/// - offsets are clamped to the scrollable range on write;
/// - frames scroll through their content window.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    engine_root: ScrollRoot,
    sandboxing: bool,
    nodes: BTreeMap<ElementId, Node>,
    windows: BTreeMap<ElementId, WindowInfo>,
    next_id: u64,
    probes_created: u32,
    writes: u64,
}

impl MemoryHost {
    pub fn new(engine_root: ScrollRoot) -> Self {
        Self {
            engine_root,
            sandboxing: true,
            nodes: BTreeMap::new(),
            windows: BTreeMap::new(),
            next_id: 1,
            probes_created: 0,
            writes: 0,
        }
    }

    /// Makes `create_probe_window` fail, like a host without off-screen documents.
    pub fn without_sandbox(mut self) -> Self {
        self.sandboxing = false;
        self
    }

    pub fn engine_root(&self) -> ScrollRoot {
        self.engine_root
    }

    /// How many probe windows were created so far.
    pub fn probes_created(&self) -> u32 {
        self.probes_created
    }

    /// Number of scroll offset writes received, including ignored ones.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    fn alloc(&mut self, node: Node) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    /// Adds a top-level window showing a document of size `content`.
    pub fn add_window(&mut self, viewport: Size, content: Size) -> WindowHandles {
        let window = self.alloc(Node {
            kind: ElementKind::Window,
            window: None,
            viewport,
            content,
            offset: Offset::default(),
        });
        let doc_node = |kind| Node {
            kind,
            window: Some(window),
            viewport,
            content,
            offset: Offset::default(),
        };
        let (document, document_element, body) = (
            doc_node(ElementKind::Document),
            doc_node(ElementKind::DocumentElement),
            doc_node(ElementKind::Body),
        );
        let handles = WindowHandles {
            window,
            document: self.alloc(document),
            document_element: self.alloc(document_element),
            body: self.alloc(body),
        };
        self.windows.insert(
            window,
            WindowInfo {
                handles,
                quirks: false,
            },
        );
        handles
    }

    /// Adds a frame element of size `viewport` whose content window shows `content`.
    pub fn add_frame(&mut self, viewport: Size, content: Size) -> (ElementId, WindowHandles) {
        let handles = self.add_window(viewport, content);
        let frame = self.alloc(Node {
            kind: ElementKind::Frame,
            window: Some(handles.window),
            viewport,
            content: viewport,
            offset: Offset::default(),
        });
        (frame, handles)
    }

    /// Adds a plain scrollable element.
    pub fn add_element(&mut self, viewport: Size, content: Size) -> ElementId {
        self.alloc(Node {
            kind: ElementKind::Element,
            window: None,
            viewport,
            content,
            offset: Offset::default(),
        })
    }

    /// Detaches a node. Removing a window removes its document nodes too.
    pub fn remove(&mut self, element: ElementId) {
        if let Some(info) = self.windows.remove(&element) {
            let h = info.handles;
            for id in [h.document, h.document_element, h.body] {
                self.nodes.remove(&id);
            }
        }
        self.nodes.remove(&element);
    }

    pub fn set_quirks_mode(&mut self, window: ElementId, quirks: bool) {
        if let Some(info) = self.windows.get_mut(&window) {
            info.quirks = quirks;
        }
    }

    pub fn set_content_size(&mut self, element: ElementId, content: Size) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.content = content;
        }
    }

    /// The effective scroll offset of `element` (for document nodes: of their window).
    pub fn offset(&self, element: ElementId) -> Offset {
        Offset::new(
            self.scroll_offset(element, Axis::X),
            self.scroll_offset(element, Axis::Y),
        )
    }

    fn scroll_root_of(&self, window: ElementId) -> Option<ElementId> {
        let info = self.windows.get(&window)?;
        let root = if info.quirks {
            ScrollRoot::Body
        } else {
            self.engine_root
        };
        Some(match root {
            ScrollRoot::DocumentElement => info.handles.document_element,
            ScrollRoot::Body => info.handles.body,
        })
    }

    fn max_offset(node: &Node, axis: Axis) -> f64 {
        (node.content.get(axis) - node.viewport.get(axis)).max(0.0)
    }

    fn write(&mut self, element: ElementId, axis: Axis, value: f64) {
        if let Some(node) = self.nodes.get_mut(&element) {
            let clamped = value.clamp(0.0, Self::max_offset(node, axis));
            node.offset.set(axis, clamped);
        }
    }
}

impl ScrollHost for MemoryHost {
    fn kind(&self, element: ElementId) -> Option<ElementKind> {
        self.nodes.get(&element).map(|n| n.kind)
    }

    fn owner_window(&self, element: ElementId) -> Option<ElementId> {
        let node = self.nodes.get(&element)?;
        match node.kind {
            ElementKind::Document | ElementKind::DocumentElement | ElementKind::Body => node.window,
            _ => None,
        }
    }

    fn content_window(&self, frame: ElementId) -> Option<ElementId> {
        let node = self.nodes.get(&frame)?;
        (node.kind == ElementKind::Frame)
            .then_some(node.window)
            .flatten()
    }

    fn document_element(&self, window: ElementId) -> Option<ElementId> {
        self.windows.get(&window).map(|w| w.handles.document_element)
    }

    fn body(&self, window: ElementId) -> Option<ElementId> {
        self.windows.get(&window).map(|w| w.handles.body)
    }

    fn is_quirks_mode(&self, window: ElementId) -> bool {
        self.windows.get(&window).is_some_and(|w| w.quirks)
    }

    fn scroll_offset(&self, element: ElementId, axis: Axis) -> f64 {
        let Some(node) = self.nodes.get(&element) else {
            return 0.0;
        };
        match node.kind {
            ElementKind::Window | ElementKind::Element => node.offset.get(axis),
            ElementKind::DocumentElement | ElementKind::Body => {
                let Some(window) = node.window else {
                    return 0.0;
                };
                if self.scroll_root_of(window) == Some(element) {
                    self.nodes.get(&window).map_or(0.0, |w| w.offset.get(axis))
                } else {
                    0.0
                }
            }
            ElementKind::Document | ElementKind::Frame => 0.0,
        }
    }

    fn set_scroll_offset(&mut self, element: ElementId, axis: Axis, offset: f64) {
        self.writes += 1;
        let Some(node) = self.nodes.get(&element) else {
            return;
        };
        match node.kind {
            ElementKind::Window | ElementKind::Element => self.write(element, axis, offset),
            ElementKind::DocumentElement | ElementKind::Body => {
                if let Some(window) = node.window {
                    if self.scroll_root_of(window) == Some(element) {
                        self.write(window, axis, offset);
                    }
                }
            }
            ElementKind::Document | ElementKind::Frame => {}
        }
    }

    fn content_extent(&self, element: ElementId, axis: Axis) -> f64 {
        self.nodes.get(&element).map_or(0.0, |n| n.content.get(axis))
    }

    fn viewport_extent(&self, element: ElementId, axis: Axis) -> f64 {
        self.nodes.get(&element).map_or(0.0, |n| n.viewport.get(axis))
    }

    fn create_probe_window(&mut self) -> Option<ElementId> {
        if !self.sandboxing {
            return None;
        }
        self.probes_created += 1;
        let handles = self.add_window(Size::new(100.0, 100.0), Size::new(100.0, 1000.0));
        Some(handles.window)
    }

    fn destroy_probe_window(&mut self, window: ElementId) {
        self.remove(window);
    }
}
