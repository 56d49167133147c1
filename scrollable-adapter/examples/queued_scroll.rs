// Example: queued window scrolling against the in-memory host.
//
// An adapter would:
// - call scroll_to / stop_scroll in response to commands ("back to top", anchors)
// - call tick(now_ms) in a frame loop / timer (here: FrameDriver)
// - let the host apply offsets to the real scroll container
use scrollable::{Keyword, Position, QueueName, ScrollOptions, ScrollRoot, Scroller};
use scrollable_adapter::{CallbackLog, FrameDriver, MemoryHost, Size};

fn main() -> scrollable::Result<()> {
    let mut host = MemoryHost::new(ScrollRoot::Body);
    let page = host.add_window(Size::new(1280.0, 720.0), Size::new(1280.0, 8000.0));
    let mut s = Scroller::new(host);
    let log = CallbackLog::new();
    let mut clock = FrameDriver::new(16);

    let opts = ScrollOptions::new()
        .with_duration_ms(300)
        .with_callbacks(log.callbacks());
    s.scroll_to(page.window, Position::y(2400), &opts)?;
    s.scroll_to(page.document, Keyword::Bottom, &opts.clone().with_append(true))?;
    println!(
        "queued={} scroll_root={:?}",
        s.queue_len(page.window, &QueueName::Default),
        s.context().detection().scroll_root()
    );

    while clock.frame(&mut s) {
        if clock.now_ms().is_multiple_of(80) {
            println!("t={} y={:.1}", clock.now_ms(), s.host().offset(page.window).y);
        }
    }
    println!("done: y={} events={}", s.host().offset(page.window).y, log.total());

    // Interrupt a scroll halfway and leave the page where it is.
    s.scroll_to(page.window, Keyword::Top, &opts)?;
    clock.run_for(&mut s, 150);
    s.stop_scroll(page.body, &ScrollOptions::new())?;
    println!("stopped at y={:.1} kinds={:?}", s.host().offset(page.window).y, log.kinds());
    Ok(())
}
