use crate::normalize::{
    normalize_container, normalize_options, normalize_position, normalize_queue,
};
use crate::primitives::{enqueue_animation, extract_callbacks, max_scroll};
use crate::queue::{ProxyTask, QueueItem, QueueKey, QueueRegistry, Task};
use crate::{
    Axis, Callbacks, DetectOnce, DetectionCache, ElementId, Position, QueueName, Result,
    ScrollHost, ScrollOptions, ScrollRange, ScrollTarget, ScrollerConfig, Surface,
    TargetResolver, TaskState,
};

/// Everything a scroller keeps between calls: the animation queues and the resolver's
/// detection cache.
#[derive(Debug, Default)]
pub struct ScrollContext {
    queues: QueueRegistry,
    detection: DetectionCache,
}

impl ScrollContext {
    pub fn detection(&self) -> &DetectionCache {
        &self.detection
    }
}

/// A headless scroll animation manager.
///
/// This type does not run timers. Adapters drive it by calling:
/// - `scroll_to` / `stop_scroll` when the application asks for movement
/// - `tick(now_ms)` each frame/timer tick
///
/// Offsets are read and written through the owned [`ScrollHost`]. The [`TargetResolver`]
/// type parameter decides which element(s) a window scroll actually animates.
#[derive(Debug)]
pub struct Scroller<H, R = DetectOnce> {
    host: H,
    resolver: R,
    context: ScrollContext,
    config: ScrollerConfig,
    now_ms: u64,
    next_task_id: u64,
}

impl<H: ScrollHost> Scroller<H, DetectOnce> {
    pub fn new(host: H) -> Self {
        Self::with_resolver(host, DetectOnce)
    }
}

impl<H: ScrollHost, R: TargetResolver> Scroller<H, R> {
    pub fn with_resolver(host: H, resolver: R) -> Self {
        Self {
            host,
            resolver,
            context: ScrollContext::default(),
            config: ScrollerConfig::default(),
            now_ms: 0,
            next_task_id: 0,
        }
    }

    pub fn with_config(mut self, config: ScrollerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ScrollerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ScrollerConfig) {
        self.config = config;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn context(&self) -> &ScrollContext {
        &self.context
    }

    /// The time of the last `tick`. New animations start at this time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_animating(&self) -> bool {
        self.context.queues.is_animating()
    }

    /// Whether any queue of `container` has running or pending work.
    pub fn is_scrolling(&self, container: impl Into<Option<ElementId>>) -> bool {
        normalize_container(&self.host, container.into())
            .is_some_and(|c| self.context.queues.is_container_busy(c))
    }

    /// Number of running plus queued animations in one queue of `container`.
    pub fn queue_len(&self, container: impl Into<Option<ElementId>>, queue: &QueueName) -> usize {
        let Some(container) = normalize_container(&self.host, container.into()) else {
            return 0;
        };
        let Ok(queue) = normalize_queue(queue) else {
            return 0;
        };
        if queue == QueueName::Unqueued {
            return self
                .context
                .queues
                .unqueued
                .iter()
                .filter(|t| t.container == container)
                .count();
        }
        self.context
            .queues
            .get(&QueueKey::new(container, queue))
            .map_or(0, |q| q.len())
    }

    /// The element(s) a scroll of `container` animates.
    pub fn scrollable(&mut self, container: impl Into<Option<ElementId>>) -> Surface {
        let Some(container) = normalize_container(&self.host, container.into()) else {
            return Surface::default();
        };
        self.resolver
            .resolve_target(&mut self.context.detection, &mut self.host, container)
    }

    pub fn scroll_range(&self, container: impl Into<Option<ElementId>>) -> ScrollRange {
        let Some(container) = normalize_container(&self.host, container.into()) else {
            return ScrollRange::default();
        };
        ScrollRange {
            horizontal: max_scroll(&self.host, container, Axis::X),
            vertical: max_scroll(&self.host, container, Axis::Y),
        }
    }

    pub fn scroll_range_on(&self, container: impl Into<Option<ElementId>>, axis: Axis) -> f64 {
        normalize_container(&self.host, container.into())
            .map_or(0.0, |c| max_scroll(&self.host, c, axis))
    }

    /// Schedules a scroll of `container` to `position`.
    ///
    /// - Without `append`, anything running or queued in the same queue is stopped first.
    /// - With `append` and a busy queue, the call is queued as a proxy and resolved only when
    ///   it reaches the head, so relative positions build on the predecessor's result.
    /// - Otherwise the position is resolved now.
    ///
    /// Returns an error only for invalid input. Outcomes are reported through the callbacks.
    pub fn scroll_to(
        &mut self,
        container: impl Into<Option<ElementId>>,
        position: impl Into<Position>,
        options: &ScrollOptions,
    ) -> Result<()> {
        let position = position.into();
        let (callbacks, options) = extract_callbacks(&normalize_options(options, &position)?);
        let target = normalize_position(&position, options.axis.unwrap_or_default())?;

        let Some(container) = normalize_container(&self.host, container.into()) else {
            strace!("scroll_to without a container; ignoring");
            return Ok(());
        };
        if target.is_empty() {
            return Ok(());
        }

        if options.queue == QueueName::Unqueued {
            if !options.append {
                self.stop_queue(container, &QueueName::Unqueued, false);
            }
            if let Some(mut task) = self.build_task(container, &target, &options, &callbacks) {
                task.start(&self.host, self.now_ms);
                self.context.queues.unqueued.push(task);
            }
            return Ok(());
        }

        let key = QueueKey::new(container, options.queue.clone());
        if options.append && !self.context.queues.is_idle(&key) {
            sdebug!(
                container = container.0,
                "queue busy; deferring position resolution"
            );
            let proxy = QueueItem::Proxy(ProxyTask {
                target,
                options,
                callbacks,
            });
            if enqueue_animation(&mut self.context.queues, &key, proxy) {
                self.dequeue(&key);
            }
            return Ok(());
        }

        if !options.append {
            self.stop_queue(container, &key.queue, false);
        }
        if let Some(task) = self.build_task(container, &target, &options, &callbacks) {
            if enqueue_animation(&mut self.context.queues, &key, QueueItem::Animation(task)) {
                self.dequeue(&key);
            }
        }
        Ok(())
    }

    /// Stops the running animation of `container`'s queue and discards everything queued
    /// behind it.
    ///
    /// The running animation is frozen in place (`fail` + `always`), or finished at its
    /// target when `jump_to_target_position` is set. Discarded items fire nothing.
    ///
    /// A container the host no longer knows can still be stopped by the handle it was
    /// scrolled with; its running animation always fails.
    pub fn stop_scroll(
        &mut self,
        container: impl Into<Option<ElementId>>,
        options: &ScrollOptions,
    ) -> Result<()> {
        let queue = normalize_queue(&options.queue)?;
        let raw = container.into();
        let Some(container) = normalize_container(&self.host, raw) else {
            if let Some(raw) = raw.filter(|&c| self.context.queues.is_container_busy(c)) {
                sdebug!(container = raw.0, "stopping scrolls of a detached container");
                self.stop_queue(raw, &queue, false);
            }
            return Ok(());
        };
        let surface =
            self.resolver
                .resolve_target(&mut self.context.detection, &mut self.host, container);
        if surface.is_empty() {
            return Ok(());
        }
        self.stop_queue(container, &queue, options.jump_to_target_position);
        Ok(())
    }

    /// Advances every running animation to `now_ms`, completes finished ones and starts
    /// their successors.
    ///
    /// Animations of containers the host no longer knows are aborted instead of stepped.
    ///
    /// Returns whether anything is still animating.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.now_ms = self.now_ms.max(now_ms);
        let now_ms = self.now_ms;
        self.abort_detached();

        for key in self.context.queues.keys() {
            let Some(mut task) = self.context.queues.take_running(&key) else {
                continue;
            };
            if task.step(&mut self.host, now_ms) {
                task.finish();
                self.dequeue(&key);
            } else if let Some(queue) = self.context.queues.get_mut(&key) {
                queue.running = Some(task);
            }
        }

        let tasks = std::mem::take(&mut self.context.queues.unqueued);
        let mut still_running = Vec::with_capacity(tasks.len());
        for mut task in tasks {
            if task.step(&mut self.host, now_ms) {
                task.finish();
            } else {
                still_running.push(task);
            }
        }
        self.context.queues.unqueued = still_running;

        self.is_animating()
    }

    /// Resolves `target` against the container's current state.
    ///
    /// Returns `None` when there is nothing to animate: the container already sits on the
    /// target, or it has no animatable surface.
    fn build_task(
        &mut self,
        container: ElementId,
        target: &ScrollTarget,
        options: &ScrollOptions,
        callbacks: &Callbacks,
    ) -> Option<Task> {
        let mut targets = Vec::with_capacity(2);
        let mut moves = false;
        for axis in Axis::ALL {
            let Some(coordinate) = target.get(axis) else {
                continue;
            };
            let current = self.host.scroll_offset(container, axis);
            let to = coordinate.resolve(current, max_scroll(&self.host, container, axis));
            moves |= to != current;
            targets.push((axis, to));
        }
        if !moves {
            strace!(container = container.0, "already at target; nothing to do");
            return None;
        }

        let tracks = self.resolver.animate(
            &mut self.context.detection,
            &mut self.host,
            container,
            callbacks,
        );
        if tracks.is_empty() {
            return None;
        }

        let id = self.next_task_id;
        self.next_task_id += 1;
        Some(Task::new(
            id,
            container,
            targets,
            tracks,
            options
                .duration_ms
                .unwrap_or(self.config.default_duration_ms),
            options.easing.unwrap_or(self.config.default_easing),
        ))
    }

    /// Starts the next item of an idle queue, resolving proxies in place.
    fn dequeue(&mut self, key: &QueueKey) {
        loop {
            let Some(queue) = self.context.queues.get_mut(key) else {
                return;
            };
            if queue.running.is_some() {
                return;
            }
            let Some(item) = queue.pending.pop_front() else {
                self.context.queues.remove_if_idle(key);
                return;
            };

            let mut task = match item {
                QueueItem::Sentinel => continue,
                QueueItem::Animation(task) => task,
                QueueItem::Proxy(proxy) => {
                    strace!(container = key.container.0, "resolving deferred scroll");
                    match self.build_task(
                        key.container,
                        &proxy.target,
                        &proxy.options,
                        &proxy.callbacks,
                    ) {
                        Some(task) => task,
                        None => continue,
                    }
                }
            };

            debug_assert_eq!(task.state, TaskState::Queued);
            task.start(&self.host, self.now_ms);
            if let Some(queue) = self.context.queues.get_mut(key) {
                queue.running = Some(task);
            }
            return;
        }
    }

    /// Aborts everything scheduled on containers the host no longer knows.
    fn abort_detached(&mut self) {
        let mut detached: Vec<(ElementId, QueueName)> = self
            .context
            .queues
            .keys()
            .into_iter()
            .filter(|k| self.host.kind(k.container).is_none())
            .map(|k| (k.container, k.queue))
            .collect();
        for task in &self.context.queues.unqueued {
            let key = (task.container, QueueName::Unqueued);
            if self.host.kind(task.container).is_none() && !detached.contains(&key) {
                detached.push(key);
            }
        }
        for (container, queue) in detached {
            swarn!(container = container.0, "container detached mid-scroll; aborting");
            self.stop_queue(container, &queue, false);
        }
    }

    fn stop_queue(&mut self, container: ElementId, queue: &QueueName, jump: bool) {
        let mut stopped = Vec::new();
        if *queue == QueueName::Unqueued {
            let (mine, others): (Vec<Task>, Vec<Task>) =
                std::mem::take(&mut self.context.queues.unqueued)
                    .into_iter()
                    .partition(|t| t.container == container);
            self.context.queues.unqueued = others;
            stopped = mine;
        } else if let Some(q) = self
            .context
            .queues
            .remove(&QueueKey::new(container, queue.clone()))
        {
            for item in q.pending {
                item.discard();
            }
            stopped.extend(q.running);
        }

        for mut task in stopped {
            if jump {
                task.jump_to_end(&mut self.host);
            } else {
                task.abort(&self.host, self.now_ms);
            }
        }
    }
}
