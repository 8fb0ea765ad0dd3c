/// Fixed-capacity ring of samples for one metric.
///
/// Once full, every push overwrites the oldest sample. Reads are indexed from
/// the newest sample backwards.
#[derive(Debug, Clone)]
pub struct MetricBuffer {
    values: Box<[f32]>,
    /// Next slot to write.
    write_pos: usize,
    /// Valid samples, saturating at capacity.
    count: usize,
}

impl MetricBuffer {
    /// Create a zero-filled, empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            values: vec![0.0; capacity.max(1)].into_boxed_slice(),
            write_pos: 0,
            count: 0,
        }
    }

    /// Zero every slot and forget all samples.
    pub fn init(&mut self) {
        self.values.fill(0.0);
        self.write_pos = 0;
        self.count = 0;
    }

    /// Append a sample, evicting the oldest if at capacity.
    ///
    /// Values are not range-checked; out-of-range percentages are clipped by
    /// the height mapper at render time.
    pub fn push(&mut self, value: f32) {
        self.values[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % self.values.len();
        if self.count < self.values.len() {
            self.count += 1;
        }
    }

    /// Sample `recent_index` steps before the newest (0 = newest).
    ///
    /// Returns 0.0 when empty. Indices past the retained history clamp to the
    /// oldest sample, so a short history repeats its first value instead of
    /// dropping to zero.
    pub fn get_recent(&self, recent_index: usize) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        self.values[self.slot(recent_index.min(self.count - 1))]
    }

    /// Like [`get_recent`](Self::get_recent) but `None` past the retained history.
    pub fn get_recent_strict(&self, recent_index: usize) -> Option<f32> {
        (recent_index < self.count).then(|| self.values[self.slot(recent_index)])
    }

    /// Retained samples from newest to oldest.
    pub fn iter_recent(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.count).map(move |i| self.values[self.slot(i)])
    }

    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.values.len()
    }

    // Caller guarantees recent_index < capacity.
    fn slot(&self, recent_index: usize) -> usize {
        let cap = self.values.len();
        let newest = (self.write_pos + cap - 1) % cap;
        (newest + cap - recent_index) % cap
    }
}
