use crate::driver::{Delay, MatrixDriver};
use crate::renderer::{buffer_to_heights_into, FrameRenderer};
use crate::startup::run_fill_animation;
use sysmatrix_core::geometry::HISTORY_LEN;
use sysmatrix_core::{MatrixGeometry, MetricBuffer, MetricType, SystemStats};
use tracing::{debug, info};

/// What a render call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// A frame was sent to the driver.
    Drawn,
    /// Startup has not finished; the driver was not touched.
    NotReady,
    /// No column heights were supplied; the driver was not touched.
    NoData,
}

/// Static parameters of a [`SystemDisplay`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySettings {
    pub geometry: MatrixGeometry,
    /// Samples retained per metric.
    pub history_len: usize,
    /// Value every buffer is pre-filled with so the first frame is not empty.
    pub baseline: f32,
    pub grayscale_bits: u8,
    /// Pause after clearing the hardware, before the animation.
    pub settle_ms: u64,
    pub frame_delay_ms: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            geometry: MatrixGeometry::default(),
            history_len: HISTORY_LEN,
            baseline: 5.0,
            grayscale_bits: 3,
            settle_ms: 100,
            frame_delay_ms: 100,
        }
    }
}

/// Per-metric history plus the rendering pipeline for one matrix.
///
/// Nothing reaches the driver until [`init`](Self::init) has run the startup
/// sequence.
pub struct SystemDisplay<D, T> {
    driver: D,
    delay: T,
    settings: DisplaySettings,
    metrics: [MetricBuffer; MetricType::COUNT],
    renderer: FrameRenderer,
    heights: Vec<u8>,
    ready: bool,
}

impl<D: MatrixDriver, T: Delay> SystemDisplay<D, T> {
    /// Allocate buffers and the frame. Does not touch the hardware.
    pub fn new(driver: D, delay: T, settings: DisplaySettings) -> Self {
        let capacity = settings.history_len.max(usize::from(settings.geometry.width));
        Self {
            driver,
            delay,
            metrics: std::array::from_fn(|_| MetricBuffer::new(capacity)),
            renderer: FrameRenderer::new(settings.geometry),
            heights: vec![0; usize::from(settings.geometry.width)],
            settings,
            ready: false,
        }
    }

    /// Seed history, bring the hardware up, play the startup animation and
    /// only then mark the display ready.
    pub fn init(&mut self) {
        let width = self.settings.geometry.width;
        for buffer in &mut self.metrics {
            buffer.init();
            for _ in 0..width {
                buffer.push(self.settings.baseline);
            }
        }

        self.ready = false;

        self.driver.begin();
        self.driver.set_grayscale_bits(self.settings.grayscale_bits);
        self.driver.clear();
        self.delay.delay_ms(self.settings.settle_ms);

        let frames = run_fill_animation(
            &mut self.renderer,
            &mut self.driver,
            &mut self.delay,
            self.settings.frame_delay_ms,
        );

        self.ready = true;
        info!(frames, "matrix ready");
    }

    /// Append a sample to one metric's history.
    pub fn push_sample(&mut self, metric: MetricType, value: f32) {
        self.metrics[metric.index()].push(value);
    }

    /// Append by raw metric index; unknown indices are ignored and return `false`.
    pub fn push_sample_index(&mut self, index: usize, value: f32) -> bool {
        match MetricType::from_index(index) {
            Some(metric) => {
                self.push_sample(metric, value);
                true
            }
            None => {
                debug!(index, "ignoring sample for unknown metric");
                false
            }
        }
    }

    /// Clip and store the global brightness; returns the applied level.
    pub fn set_brightness(&mut self, level: u16) -> u8 {
        let applied = self.renderer.set_brightness(level);
        debug!(requested = level, applied, "brightness set");
        applied
    }

    /// Draw one bar per column onto the matrix.
    pub fn draw_bar_graph(&mut self, heights: &[u8]) -> DrawOutcome {
        if !self.ready {
            debug!("draw skipped: matrix not ready");
            return DrawOutcome::NotReady;
        }
        if heights.is_empty() {
            debug!("draw skipped: no column heights");
            return DrawOutcome::NoData;
        }
        let frame = self.renderer.draw_bar_graph(heights);
        self.driver.draw(frame);
        DrawOutcome::Drawn
    }

    /// Graph one metric's recent history across the full width.
    pub fn render_metric(&mut self, metric: MetricType) -> DrawOutcome {
        if !self.ready {
            debug!("render skipped: matrix not ready");
            return DrawOutcome::NotReady;
        }
        let mut heights = std::mem::take(&mut self.heights);
        buffer_to_heights_into(
            &self.metrics[metric.index()],
            self.settings.geometry.height,
            &mut heights,
        );
        let outcome = self.draw_bar_graph(&heights);
        self.heights = heights;
        outcome
    }

    /// Record the selected metric from a stats snapshot and redraw it.
    ///
    /// The other metrics' histories are left untouched.
    pub fn apply_stats(&mut self, stats: &SystemStats, selected: MetricType) -> DrawOutcome {
        self.push_sample(selected, stats.get(selected));
        self.render_metric(selected)
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn brightness(&self) -> u8 {
        self.renderer.brightness()
    }

    pub fn buffer(&self, metric: MetricType) -> &MetricBuffer {
        &self.metrics[metric.index()]
    }

    pub fn geometry(&self) -> MatrixGeometry {
        self.settings.geometry
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::NoDelay;
    use crate::frame::Frame;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Begin,
        Grayscale(u8),
        Clear,
        Draw(Frame),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn draws(&self) -> Vec<&Frame> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Draw(f) => Some(f),
                    _ => None,
                })
                .collect()
        }
    }

    impl MatrixDriver for Recorder {
        fn begin(&mut self) {
            self.calls.push(Call::Begin);
        }
        fn set_grayscale_bits(&mut self, bits: u8) {
            self.calls.push(Call::Grayscale(bits));
        }
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }
        fn draw(&mut self, frame: &Frame) {
            self.calls.push(Call::Draw(frame.clone()));
        }
    }

    fn display() -> SystemDisplay<Recorder, NoDelay> {
        SystemDisplay::new(Recorder::default(), NoDelay, DisplaySettings::default())
    }

    #[test]
    fn new_display_touches_nothing() {
        let d = display();
        assert!(!d.is_ready());
        assert!(d.driver().calls.is_empty());
        assert_eq!(d.brightness(), 7);
    }

    #[test]
    fn draw_before_ready_never_reaches_driver() {
        let mut d = display();
        assert_eq!(d.draw_bar_graph(&[8; 13]), DrawOutcome::NotReady);
        assert_eq!(d.render_metric(MetricType::Cpu), DrawOutcome::NotReady);
        assert!(d.driver().draws().is_empty());
    }

    #[test]
    fn init_brings_up_hardware_then_animates() {
        let mut d = display();
        d.init();

        let calls = &d.driver().calls;
        assert_eq!(calls[0], Call::Begin);
        assert_eq!(calls[1], Call::Grayscale(3));
        assert_eq!(calls[2], Call::Clear);
        assert_eq!(calls.len(), 3 + 13);
        assert!(d.is_ready());
        assert_eq!(d.driver().draws().last().map(|f| f.lit_count()), Some(104));
    }

    #[test]
    fn init_seeds_baseline_history() {
        let mut d = display();
        d.push_sample(MetricType::Disk, 90.0);
        d.init();

        for metric in MetricType::ALL {
            let buf = d.buffer(metric);
            assert_eq!(buf.len(), 13);
            assert!(buf.iter_recent().all(|v| v == 5.0));
        }
        // 5% of 8 rows rounds to zero
        assert_eq!(d.render_metric(MetricType::Cpu), DrawOutcome::Drawn);
        assert_eq!(d.driver().draws().last().map(|f| f.lit_count()), Some(0));
    }

    #[test]
    fn empty_heights_is_a_no_op() {
        let mut d = display();
        d.init();
        let before = d.driver().calls.len();
        assert_eq!(d.draw_bar_graph(&[]), DrawOutcome::NoData);
        assert_eq!(d.driver().calls.len(), before);
    }

    #[test]
    fn render_shows_newest_sample_on_the_right() {
        let mut d = display();
        d.init();
        d.push_sample(MetricType::Cpu, 100.0);

        assert_eq!(d.render_metric(MetricType::Cpu), DrawOutcome::Drawn);
        let frame = d.driver().draws().last().copied().cloned().unwrap();
        assert!((0..8).all(|y| frame.get(12, y) == Some(7)));
        assert_eq!(frame.lit_count(), 8);
    }

    #[test]
    fn apply_stats_only_pushes_selected_metric() {
        let mut d = display();
        d.init();
        let stats = SystemStats { cpu: 10.0, memory: 60.0, disk: 80.0, network_rx: 0.0 };

        assert_eq!(d.apply_stats(&stats, MetricType::Memory), DrawOutcome::Drawn);
        assert_eq!(d.buffer(MetricType::Memory).get_recent(0), 60.0);
        assert_eq!(d.buffer(MetricType::Cpu).get_recent(0), 5.0);
        assert_eq!(d.buffer(MetricType::Disk).get_recent(0), 5.0);
    }

    #[test]
    fn brightness_applies_to_later_frames_only() {
        let mut d = display();
        d.init();
        d.push_sample(MetricType::Cpu, 100.0);
        d.render_metric(MetricType::Cpu);

        assert_eq!(d.set_brightness(999), 7);
        assert_eq!(d.set_brightness(2), 2);
        d.render_metric(MetricType::Cpu);

        let draws = d.driver().draws();
        let (old, new) = (draws[draws.len() - 2], draws[draws.len() - 1]);
        assert_eq!(old.get(12, 7), Some(7));
        assert_eq!(new.get(12, 7), Some(2));
    }

    #[test]
    fn unknown_metric_index_is_ignored() {
        let mut d = display();
        assert!(d.push_sample_index(1, 33.0));
        assert!(!d.push_sample_index(7, 33.0));
        assert_eq!(d.buffer(MetricType::Memory).get_recent(0), 33.0);
    }
}
