use crate::primitives::enqueue_animation;
use crate::queue::{QueueItem, QueueKey, QueueRegistry, Task};
use crate::*;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const WINDOW: ElementId = ElementId(1);
const HTML: ElementId = ElementId(2);
const BODY: ElementId = ElementId(3);
const DOCUMENT: ElementId = ElementId(4);
const PANEL: ElementId = ElementId(10);
const PROBE: ElementId = ElementId(100);
const PROBE_HTML: ElementId = ElementId(101);
const PROBE_BODY: ElementId = ElementId(102);

/// One window (800x600 over a 2000x3000 document) and one 100x100 panel with 1100px of
/// vertical content.
struct TestHost {
    root: ScrollRoot,
    quirks: bool,
    offsets: BTreeMap<(ElementId, Axis), f64>,
    probes_created: u32,
    probe_open: bool,
}

impl TestHost {
    fn new(root: ScrollRoot) -> Self {
        Self {
            root,
            quirks: false,
            offsets: BTreeMap::new(),
            probes_created: 0,
            probe_open: false,
        }
    }

    fn window_of(&self, el: ElementId) -> Option<ElementId> {
        match el {
            HTML | BODY | DOCUMENT => Some(WINDOW),
            PROBE_HTML | PROBE_BODY if self.probe_open => Some(PROBE),
            _ => None,
        }
    }

    fn owns_scrolling(&self, el: ElementId) -> bool {
        let root = if self.quirks && self.window_of(el) == Some(WINDOW) {
            ScrollRoot::Body
        } else {
            self.root
        };
        match root {
            ScrollRoot::DocumentElement => matches!(el, HTML | PROBE_HTML),
            ScrollRoot::Body => matches!(el, BODY | PROBE_BODY),
        }
    }
}

impl ScrollHost for TestHost {
    fn kind(&self, el: ElementId) -> Option<ElementKind> {
        match el {
            WINDOW => Some(ElementKind::Window),
            HTML => Some(ElementKind::DocumentElement),
            BODY => Some(ElementKind::Body),
            DOCUMENT => Some(ElementKind::Document),
            PANEL => Some(ElementKind::Element),
            PROBE if self.probe_open => Some(ElementKind::Window),
            PROBE_HTML if self.probe_open => Some(ElementKind::DocumentElement),
            PROBE_BODY if self.probe_open => Some(ElementKind::Body),
            _ => None,
        }
    }

    fn owner_window(&self, el: ElementId) -> Option<ElementId> {
        self.window_of(el)
    }

    fn content_window(&self, _frame: ElementId) -> Option<ElementId> {
        None
    }

    fn document_element(&self, window: ElementId) -> Option<ElementId> {
        match window {
            WINDOW => Some(HTML),
            PROBE if self.probe_open => Some(PROBE_HTML),
            _ => None,
        }
    }

    fn body(&self, window: ElementId) -> Option<ElementId> {
        match window {
            WINDOW => Some(BODY),
            PROBE if self.probe_open => Some(PROBE_BODY),
            _ => None,
        }
    }

    fn is_quirks_mode(&self, window: ElementId) -> bool {
        window == WINDOW && self.quirks
    }

    fn scroll_offset(&self, el: ElementId, axis: Axis) -> f64 {
        match self.window_of(el) {
            Some(w) if el != DOCUMENT => {
                if self.owns_scrolling(el) {
                    self.offsets.get(&(w, axis)).copied().unwrap_or(0.0)
                } else {
                    0.0
                }
            }
            _ => self.offsets.get(&(el, axis)).copied().unwrap_or(0.0),
        }
    }

    fn set_scroll_offset(&mut self, el: ElementId, axis: Axis, offset: f64) {
        match self.window_of(el) {
            Some(w) if el != DOCUMENT => {
                if self.owns_scrolling(el) {
                    self.offsets.insert((w, axis), offset);
                }
            }
            _ => {
                self.offsets.insert((el, axis), offset);
            }
        }
    }

    fn content_extent(&self, el: ElementId, axis: Axis) -> f64 {
        match (el, axis) {
            (WINDOW, Axis::X) => 2000.0,
            (WINDOW, Axis::Y) => 3000.0,
            (PANEL, Axis::X) => 100.0,
            (PANEL, Axis::Y) => 1100.0,
            (PROBE, _) => 1000.0,
            _ => 0.0,
        }
    }

    fn viewport_extent(&self, el: ElementId, axis: Axis) -> f64 {
        match (el, axis) {
            (WINDOW, Axis::X) => 800.0,
            (WINDOW, Axis::Y) => 600.0,
            (PANEL, _) | (PROBE, _) => 100.0,
            _ => 0.0,
        }
    }

    fn create_probe_window(&mut self) -> Option<ElementId> {
        self.probes_created += 1;
        self.probe_open = true;
        Some(PROBE)
    }

    fn destroy_probe_window(&mut self, window: ElementId) {
        assert_eq!(window, PROBE);
        self.probe_open = false;
        self.offsets.retain(|(el, _), _| *el != PROBE);
    }
}

#[derive(Default)]
struct Counts([AtomicUsize; 7]);

impl Counts {
    fn get(&self, kind: CallbackKind) -> usize {
        let i = CallbackKind::ALL.iter().position(|&k| k == kind).unwrap();
        self.0[i].load(Ordering::SeqCst)
    }

    fn total(&self) -> usize {
        CallbackKind::ALL.iter().map(|&k| self.get(k)).sum()
    }
}

fn counting_callbacks() -> (Arc<Counts>, Callbacks) {
    let counts = Arc::new(Counts::default());
    let mut callbacks = Callbacks::default();
    for (i, kind) in CallbackKind::ALL.into_iter().enumerate() {
        let counts = Arc::clone(&counts);
        callbacks.set(
            kind,
            Some(Arc::new(move |_: &AnimationEvent| {
                counts.0[i].fetch_add(1, Ordering::SeqCst);
            })),
        );
    }
    (counts, callbacks)
}

fn run_until_idle<H: ScrollHost, R: TargetResolver>(
    s: &mut Scroller<H, R>,
    mut now_ms: u64,
) -> u64 {
    for _ in 0..10_000 {
        now_ms += 16;
        if !s.tick(now_ms) {
            return now_ms;
        }
    }
    panic!("scroller never settled");
}

#[test]
fn clamp_is_idempotent() {
    let positions = [-500.0, -0.5, 0.0, 1.0, 99.9, 100.0, 250.0, 1e9];
    let extents = [-10.0, 0.0, 1.0, 100.0, 1000.0];
    for &p in &positions {
        for &e in &extents {
            let once = clamp_position(p, e);
            assert_eq!(clamp_position(once, e), once, "p={p} e={e}");
            assert!(once >= 0.0);
            assert!(once <= e.max(0.0));
        }
    }
}

#[test]
fn max_scroll_floors_at_zero() {
    let host = TestHost::new(ScrollRoot::DocumentElement);
    assert_eq!(max_scroll(&host, PANEL, Axis::Y), 1000.0);
    assert_eq!(max_scroll(&host, PANEL, Axis::X), 0.0);
    assert_eq!(max_scroll(&host, WINDOW, Axis::X), 1200.0);
    assert_eq!(max_scroll(&host, WINDOW, Axis::Y), 2400.0);
}

#[test]
fn coordinate_parsing() {
    assert_eq!("120".parse::<Coordinate>(), Ok(Coordinate::Absolute(120.0)));
    assert_eq!(" 120px ".parse::<Coordinate>(), Ok(Coordinate::Absolute(120.0)));
    assert_eq!("50%".parse::<Coordinate>(), Ok(Coordinate::Percent(50.0)));
    assert_eq!("+=40".parse::<Coordinate>(), Ok(Coordinate::Relative(40.0)));
    assert_eq!("-=40px".parse::<Coordinate>(), Ok(Coordinate::Relative(-40.0)));

    for bad in ["", "abc", "+=", "+=10%", "12em", "inf"] {
        assert!(bad.parse::<Coordinate>().is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn position_parsing_and_implied_axes() {
    assert_eq!("bottom".parse::<Position>(), Ok(Position::Keyword(Keyword::Bottom)));
    assert_eq!(
        Position::Keyword(Keyword::Left).implied_axes(),
        Some(AxisSelection::X)
    );
    assert_eq!(Position::from(10).implied_axes(), None);
    assert_eq!(Position::y(10).implied_axes(), Some(AxisSelection::Y));

    let p = Position::parse_axes(Some("right"), Some("+=5")).unwrap();
    assert_eq!(
        p,
        Position::Axes {
            x: Some(Coordinate::End),
            y: Some(Coordinate::Relative(5.0)),
        }
    );
    assert_eq!(
        Position::parse_axes(Some("top"), None),
        Err(Error::AxisMismatch {
            keyword: Axis::Y,
            axis: AxisSelection::X,
        })
    );
}

#[test]
fn coordinate_resolution_clamps() {
    assert_eq!(Coordinate::Absolute(-5.0).resolve(10.0, 100.0), 0.0);
    assert_eq!(Coordinate::Absolute(500.0).resolve(10.0, 100.0), 100.0);
    assert_eq!(Coordinate::Percent(25.0).resolve(10.0, 400.0), 100.0);
    assert_eq!(Coordinate::Relative(-30.0).resolve(10.0, 100.0), 0.0);
    assert_eq!(Coordinate::Relative(30.0).resolve(10.0, 100.0), 40.0);
    assert_eq!(Coordinate::End.resolve(10.0, 100.0), 100.0);
    assert_eq!(Coordinate::Start.resolve(10.0, 100.0), 0.0);
}

#[test]
fn axis_names() {
    assert_eq!(normalize_axis_name(None), Ok(AxisSelection::Both));
    assert_eq!(normalize_axis_name(Some("")), Ok(AxisSelection::Both));
    assert_eq!(normalize_axis_name(Some("vh")), Ok(AxisSelection::Both));
    assert_eq!(normalize_axis_name(Some("x")), Ok(AxisSelection::X));
    assert_eq!(normalize_axis_name(Some("Horizontal")), Ok(AxisSelection::X));
    assert_eq!(normalize_axis_name(Some("vertical")), Ok(AxisSelection::Y));
    assert_eq!(
        normalize_axis_name(Some("z")),
        Err(Error::InvalidAxis("z".into()))
    );
    assert_eq!("y".parse::<AxisSelection>(), Ok(AxisSelection::Y));
}

#[test]
fn normalize_options_fills_defaults_without_touching_input() {
    let input = ScrollOptions::new().with_queue(QueueName::named("fx"));
    let out = normalize_options(&input, &Position::from(10)).unwrap();
    assert_eq!(out.queue, QueueName::Default);
    assert_eq!(out.axis, Some(AxisSelection::Both));
    assert!(!out.append);
    assert_eq!(input.queue, QueueName::named("fx"));
    assert_eq!(input.axis, None);

    let out = normalize_options(&ScrollOptions::new(), &Position::Keyword(Keyword::Right)).unwrap();
    assert_eq!(out.axis, Some(AxisSelection::X));

    let out = normalize_options(
        &ScrollOptions::new().with_axis(Axis::Y),
        &Position::xy(1, 2),
    )
    .unwrap();
    assert_eq!(out.axis, Some(AxisSelection::Y));

    let empty = ScrollOptions::new().with_queue(QueueName::named(""));
    assert_eq!(
        normalize_options(&empty, &Position::from(1)).unwrap_err(),
        Error::InvalidQueueName("".into())
    );
}

#[test]
fn normalize_position_restricts_axes() {
    let t = normalize_position(&Position::from(10), AxisSelection::Y).unwrap();
    assert_eq!(t.x, None);
    assert_eq!(t.y, Some(Coordinate::Absolute(10.0)));

    let t = normalize_position(&Position::xy(1, 2), AxisSelection::X).unwrap();
    assert_eq!(t.x, Some(Coordinate::Absolute(1.0)));
    assert_eq!(t.y, None);

    assert!(matches!(
        normalize_position(&Position::Keyword(Keyword::Top), AxisSelection::X),
        Err(Error::AxisMismatch { .. })
    ));
    assert!(matches!(
        normalize_position(&Position::from(f64::NAN), AxisSelection::Both),
        Err(Error::NonFinite(_))
    ));
}

#[test]
fn normalize_container_maps_document_nodes_to_window() {
    let host = TestHost::new(ScrollRoot::DocumentElement);
    for el in [WINDOW, HTML, BODY, DOCUMENT] {
        assert_eq!(normalize_container(&host, Some(el)), Some(WINDOW));
    }
    assert_eq!(normalize_container(&host, Some(PANEL)), Some(PANEL));
    assert_eq!(normalize_container(&host, Some(ElementId(999))), None);
    assert_eq!(normalize_container(&host, None), None);
}

#[test]
fn extract_callbacks_leaves_input_untouched() {
    let (_, callbacks) = counting_callbacks();
    let options = ScrollOptions::new()
        .with_duration_ms(50)
        .with_callbacks(callbacks);
    let (extracted, rest) = extract_callbacks(&options);
    assert!(!extracted.is_empty());
    assert!(extracted.done.is_some());
    assert!(rest.callbacks.is_empty());
    assert_eq!(rest.duration_ms, Some(50));
    assert!(!options.callbacks.is_empty());

    let (none, _) = extract_callbacks(&ScrollOptions::new());
    assert!(none.is_empty());
}

#[test]
fn bound_callbacks_report_the_logical_container() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let callbacks = Callbacks::default().with(CallbackKind::Step, {
        let seen = Arc::clone(&seen);
        move |e: &AnimationEvent| seen.lock().unwrap().push((e.context, e.element))
    });
    let bound = bind_callback_context(&callbacks, WINDOW);
    assert!(bound.start.is_none());

    let event = AnimationEvent {
        context: HTML,
        element: HTML,
        axis: Some(Axis::Y),
        position: Offset::default(),
        progress: 0.5,
        remaining_ms: 10,
    };
    (bound.step.as_ref().unwrap())(&event);
    (callbacks.step.as_ref().unwrap())(&event);
    assert_eq!(*seen.lock().unwrap(), [(WINDOW, HTML), (HTML, HTML)]);
}

fn dummy_task(id: u64) -> Task {
    Task::new(
        id,
        PANEL,
        vec![(Axis::Y, 10.0)],
        Vec::new(),
        100,
        Easing::Linear,
    )
}

#[test]
fn custom_queue_insert_is_repaired_with_a_sentinel() {
    let mut queues = QueueRegistry::default();
    let key = QueueKey::new(PANEL, QueueName::named("panel"));

    assert!(enqueue_animation(
        &mut queues,
        &key,
        QueueItem::Animation(dummy_task(0))
    ));
    let queue = queues.get(&key).unwrap();
    assert_eq!(queue.pending.len(), 2);
    assert!(matches!(queue.pending[1], QueueItem::Sentinel));
    assert_eq!(queue.len(), 1);

    // A second item in a queue that already has unstarted work does not advance it.
    assert!(!enqueue_animation(
        &mut queues,
        &key,
        QueueItem::Animation(dummy_task(1))
    ));
    assert_eq!(queues.get(&key).unwrap().len(), 2);
}

#[test]
fn default_queue_advances_only_when_idle() {
    let mut queues = QueueRegistry::default();
    let key = QueueKey::new(PANEL, QueueName::Default);
    assert!(enqueue_animation(
        &mut queues,
        &key,
        QueueItem::Animation(dummy_task(0))
    ));
    assert_eq!(queues.get(&key).unwrap().pending.len(), 1);

    let task = queues.get_mut(&key).unwrap().pending.pop_front();
    let Some(QueueItem::Animation(task)) = task else {
        panic!("expected an animation");
    };
    queues.get_mut(&key).unwrap().running = Some(task);
    assert!(!enqueue_animation(
        &mut queues,
        &key,
        QueueItem::Animation(dummy_task(1))
    ));
}

#[test]
fn detect_once_probes_a_single_time() {
    let mut s = Scroller::new(TestHost::new(ScrollRoot::Body));
    assert_eq!(s.scrollable(WINDOW), Surface::single(BODY));
    assert_eq!(s.scrollable(HTML), Surface::single(BODY));
    assert_eq!(s.scrollable(PANEL), Surface::single(PANEL));
    assert_eq!(s.host().probes_created, 1);
    assert_eq!(s.context().detection().probes(), 1);
    assert_eq!(s.context().detection().scroll_root(), Some(ScrollRoot::Body));
    assert!(!s.host().probe_open);

    let mut s = Scroller::new(TestHost::new(ScrollRoot::DocumentElement));
    assert_eq!(s.scrollable(DOCUMENT), Surface::single(HTML));
    assert_eq!(s.scrollable(ElementId(999)), Surface::default());
    assert_eq!(s.scrollable(None), Surface::default());
}

#[test]
fn quirks_mode_bypasses_detection() {
    let mut host = TestHost::new(ScrollRoot::DocumentElement);
    host.quirks = true;
    let mut s = Scroller::new(host);
    assert_eq!(s.scrollable(WINDOW), Surface::single(BODY));
    assert_eq!(s.host().probes_created, 0);
    assert_eq!(s.context().detection().scroll_root(), None);
}

#[test]
fn dual_animate_reports_once_per_event() {
    let mut s = Scroller::with_resolver(TestHost::new(ScrollRoot::Body), DualAnimate);
    assert_eq!(s.scrollable(WINDOW), Surface::new(vec![HTML, BODY]));

    let contexts = Arc::new(Mutex::new(Vec::new()));
    let (counts, mut callbacks) = counting_callbacks();
    let step = callbacks.step.take().unwrap();
    callbacks.step = Some(Arc::new({
        let contexts = Arc::clone(&contexts);
        move |e: &AnimationEvent| {
            contexts.lock().unwrap().push((e.context, e.element));
            step(e);
        }
    }));

    s.scroll_to(
        WINDOW,
        Position::y(300),
        &ScrollOptions::new()
            .with_duration_ms(100)
            .with_callbacks(callbacks),
    )
    .unwrap();
    run_until_idle(&mut s, 0);

    assert_eq!(s.host().scroll_offset(WINDOW, Axis::Y), 300.0);
    assert_eq!(counts.get(CallbackKind::Start), 1);
    assert_eq!(counts.get(CallbackKind::Done), 1);
    assert_eq!(counts.get(CallbackKind::Complete), 1);
    assert_eq!(counts.get(CallbackKind::Always), 1);
    assert_eq!(counts.get(CallbackKind::Fail), 0);
    assert!(counts.get(CallbackKind::Step) >= 1);
    assert_eq!(counts.get(CallbackKind::Step), counts.get(CallbackKind::Progress));
    assert!(contexts
        .lock()
        .unwrap()
        .iter()
        .all(|&(context, element)| context == WINDOW && element == HTML));
    assert_eq!(s.host().probes_created, 0);
}

#[test]
fn element_scroll_reaches_target_and_reports_done() {
    let mut s = Scroller::new(TestHost::new(ScrollRoot::DocumentElement));
    let (counts, callbacks) = counting_callbacks();
    s.scroll_to(
        PANEL,
        "bottom".parse::<Position>().unwrap(),
        &ScrollOptions::new()
            .with_duration_ms(200)
            .with_easing(Easing::Linear)
            .with_callbacks(callbacks),
    )
    .unwrap();
    assert!(s.is_scrolling(PANEL));
    assert_eq!(s.queue_len(PANEL, &QueueName::Default), 1);

    s.tick(100);
    assert_eq!(s.host().scroll_offset(PANEL, Axis::Y), 500.0);

    s.tick(200);
    assert_eq!(s.host().scroll_offset(PANEL, Axis::Y), 1000.0);
    assert!(!s.is_scrolling(PANEL));
    assert_eq!(counts.get(CallbackKind::Done), 1);
    assert_eq!(counts.get(CallbackKind::Always), 1);
    assert_eq!(counts.get(CallbackKind::Step), 2);
}

#[test]
fn scroll_to_current_offset_is_a_no_op() {
    let mut s = Scroller::new(TestHost::new(ScrollRoot::DocumentElement));
    s.host_mut().set_scroll_offset(PANEL, Axis::Y, 40.0);
    let (counts, callbacks) = counting_callbacks();
    let options = ScrollOptions::new().with_callbacks(callbacks);

    s.scroll_to(PANEL, Position::y(40), &options).unwrap();
    s.scroll_to(PANEL, Position::y("+=0".parse::<Coordinate>().unwrap()), &options)
        .unwrap();
    assert!(!s.is_animating());
    s.tick(1000);
    assert_eq!(counts.total(), 0);
    assert_eq!(s.host().scroll_offset(PANEL, Axis::Y), 40.0);
}

#[test]
fn invalid_input_is_rejected_before_anything_happens() {
    let mut s = Scroller::new(TestHost::new(ScrollRoot::DocumentElement));
    let err = s
        .scroll_to(PANEL, f64::INFINITY, &ScrollOptions::new())
        .unwrap_err();
    assert_eq!(err, Error::NonFinite(f64::INFINITY));
    assert!(!s.is_animating());

    assert!(
        s.stop_scroll(PANEL, &ScrollOptions::new().with_queue(QueueName::named("")))
            .is_err()
    );
    // No container: nothing to do, but not an error.
    assert!(s.scroll_to(None, 10, &ScrollOptions::new()).is_ok());
}

#[test]
fn scroll_range_reports_both_axes() {
    let s = Scroller::new(TestHost::new(ScrollRoot::DocumentElement));
    assert_eq!(
        s.scroll_range(BODY),
        ScrollRange {
            horizontal: 1200.0,
            vertical: 2400.0,
        }
    );
    assert_eq!(s.scroll_range_on(PANEL, Axis::Y), 1000.0);
    assert_eq!(s.scroll_range(None), ScrollRange::default());
}

#[test]
fn tween_samples_endpoints() {
    for easing in [
        Easing::Linear,
        Easing::Swing,
        Easing::SmoothStep,
        Easing::EaseInOutCubic,
    ] {
        let t = Tween::new(10.0, 110.0, 50, 100, easing);
        assert_eq!(t.sample(50), 10.0);
        assert_eq!(t.sample(150), 110.0);
        assert_eq!(t.sample(500), 110.0);
        assert!(t.is_done(150));
        assert!(!t.is_done(149));
        assert_eq!(t.remaining_ms(100), 50);
    }
    assert_eq!(Tween::new(0.0, 1.0, 0, 0, Easing::Linear).duration_ms, 1);
}
