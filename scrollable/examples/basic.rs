// Example: a single scrollable list driven by a hand-written host and a manual clock.
use scrollable::{
    Axis, CallbackKind, Coordinate, ElementId, ElementKind, Easing, Position, ScrollHost,
    ScrollOptions, Scroller,
};

const LIST: ElementId = ElementId(1);

/// A 300px tall list with 12_000px of content.
#[derive(Default)]
struct ListHost {
    offset_y: f64,
}

impl ScrollHost for ListHost {
    fn kind(&self, element: ElementId) -> Option<ElementKind> {
        (element == LIST).then_some(ElementKind::Element)
    }

    fn owner_window(&self, _element: ElementId) -> Option<ElementId> {
        None
    }

    fn content_window(&self, _frame: ElementId) -> Option<ElementId> {
        None
    }

    fn document_element(&self, _window: ElementId) -> Option<ElementId> {
        None
    }

    fn body(&self, _window: ElementId) -> Option<ElementId> {
        None
    }

    fn scroll_offset(&self, _element: ElementId, axis: Axis) -> f64 {
        match axis {
            Axis::X => 0.0,
            Axis::Y => self.offset_y,
        }
    }

    fn set_scroll_offset(&mut self, _element: ElementId, axis: Axis, offset: f64) {
        if axis == Axis::Y {
            self.offset_y = offset;
        }
    }

    fn content_extent(&self, _element: ElementId, axis: Axis) -> f64 {
        match axis {
            Axis::X => 400.0,
            Axis::Y => 12_000.0,
        }
    }

    fn viewport_extent(&self, _element: ElementId, axis: Axis) -> f64 {
        match axis {
            Axis::X => 400.0,
            Axis::Y => 300.0,
        }
    }
}

fn main() -> scrollable::Result<()> {
    let mut s = Scroller::new(ListHost::default());
    println!("scroll_range={:?}", s.scroll_range(LIST));

    let opts = ScrollOptions::new()
        .with_duration_ms(200)
        .with_easing(Easing::EaseInOutCubic)
        .with_callback(CallbackKind::Done, |e| {
            println!("done at y={}", e.position.y);
        });
    s.scroll_to(LIST, Position::y(Coordinate::Percent(25.0)), &opts)?;
    s.scroll_to(LIST, "+=1000".parse::<Position>()?, &opts.clone().with_append(true))?;

    let mut now_ms = 0u64;
    while s.is_animating() {
        now_ms += 16;
        s.tick(now_ms);
        if now_ms.is_multiple_of(64) {
            println!("t={now_ms} y={:.1}", s.host().offset_y);
        }
    }
    Ok(())
}
