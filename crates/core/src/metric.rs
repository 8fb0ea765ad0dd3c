use serde::{Deserialize, Serialize};

/// The three utilisation series the matrix can graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    #[default]
    Cpu,
    Memory,
    Disk,
}

impl MetricType {
    pub const COUNT: usize = 3;

    pub const ALL: [MetricType; Self::COUNT] = [Self::Cpu, Self::Memory, Self::Disk];

    /// Map a raw index (0 = CPU, 1 = memory, 2 = disk).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Cpu => 0,
            Self::Memory => 1,
            Self::Disk => 2,
        }
    }

    /// The next metric in display rotation order, wrapping at the end.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Memory => "Memory",
            Self::Disk => "Disk",
        }
    }
}

/// A point-in-time set of utilisation percentages (0.0 – 100.0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SystemStats {
    pub cpu: f32,
    pub memory: f32,
    pub disk: f32,
    /// Always 0.0; kept so the wire format stays stable.
    pub network_rx: f32,
}

impl SystemStats {
    #[must_use]
    pub fn get(&self, metric: MetricType) -> f32 {
        match metric {
            MetricType::Cpu => self.cpu,
            MetricType::Memory => self.memory,
            MetricType::Disk => self.disk,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_known_metrics() {
        for metric in MetricType::ALL {
            assert_eq!(MetricType::from_index(metric.index()), Some(metric));
        }
        assert_eq!(MetricType::from_index(3), None);
    }

    #[test]
    fn rotation_wraps_back_to_cpu() {
        assert_eq!(MetricType::Cpu.next(), MetricType::Memory);
        assert_eq!(MetricType::Memory.next(), MetricType::Disk);
        assert_eq!(MetricType::Disk.next(), MetricType::Cpu);
    }

    #[test]
    fn stats_lookup_by_metric() {
        let stats = SystemStats { cpu: 1.0, memory: 2.0, disk: 3.0, network_rx: 0.0 };
        assert_eq!(stats.get(MetricType::Memory), 2.0);
        assert_eq!(stats.get(MetricType::Disk), 3.0);
    }
}
