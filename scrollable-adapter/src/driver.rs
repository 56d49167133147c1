use scrollable::{ScrollHost, Scroller, TargetResolver};

/// A fixed-rate clock that ticks a [`Scroller`] the way a frame loop would.
///
/// Useful for headless adapters (tests, servers rendering snapshots) that have no real
/// animation timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameDriver {
    now_ms: u64,
    frame_ms: u64,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(16)
    }
}

impl FrameDriver {
    /// A driver starting at `t = 0`. `frame_ms` is clamped to at least 1.
    pub fn new(frame_ms: u64) -> Self {
        Self {
            now_ms: 0,
            frame_ms: frame_ms.max(1),
        }
    }

    /// Moves the clock to `now_ms` without ticking.
    pub fn at(mut self, now_ms: u64) -> Self {
        self.now_ms = now_ms;
        self
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    /// Advances one frame and ticks. Returns whether anything is still animating.
    pub fn frame<H: ScrollHost, R: TargetResolver>(
        &mut self,
        scroller: &mut Scroller<H, R>,
    ) -> bool {
        self.now_ms += self.frame_ms;
        scroller.tick(self.now_ms)
    }

    /// Ticks frame by frame for `duration_ms`. The last tick lands exactly on the end time.
    pub fn run_for<H: ScrollHost, R: TargetResolver>(
        &mut self,
        scroller: &mut Scroller<H, R>,
        duration_ms: u64,
    ) -> bool {
        let end = self.now_ms + duration_ms;
        let mut animating = scroller.is_animating();
        while self.now_ms < end {
            self.now_ms = (self.now_ms + self.frame_ms).min(end);
            animating = scroller.tick(self.now_ms);
        }
        animating
    }

    /// Ticks until nothing animates, for at most `max_frames` frames.
    ///
    /// Returns the time the last animation finished at, or `None` if it was still running
    /// after `max_frames`.
    pub fn run_until_idle<H: ScrollHost, R: TargetResolver>(
        &mut self,
        scroller: &mut Scroller<H, R>,
        max_frames: usize,
    ) -> Option<u64> {
        if !scroller.is_animating() {
            return Some(self.now_ms);
        }
        for _ in 0..max_frames {
            if !self.frame(scroller) {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    target: "scrollable_adapter",
                    now_ms = self.now_ms,
                    "scroller idle"
                );
                return Some(self.now_ms);
            }
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(
            target: "scrollable_adapter",
            max_frames,
            "scroller still animating after frame budget"
        );
        None
    }
}
