use super::metrics::{self, ProcessStatRecord};
use super::platform;
use super::source::ProcSource;

/// Elapsed time and CPU share of one process, derived from a single stat record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProcessTiming {
    pub elapsed_seconds: u64,
    pub cpu_utilization: f32,
}

/// Derived metrics over a live [`ProcSource`].
///
/// Every call re-reads the records it needs. Quantities that are combined
/// into one ratio are always taken from one read of their record.
#[derive(Clone, Debug)]
pub struct Collector {
    source: ProcSource,
    ticks_per_second: u64,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        Self::with_source(ProcSource::default(), platform::clock_ticks_per_second())
    }

    pub fn with_source(source: ProcSource, ticks_per_second: u64) -> Self {
        Collector {
            source,
            ticks_per_second,
        }
    }

    pub fn source(&self) -> &ProcSource {
        &self.source
    }

    pub fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }

    pub fn global_active_ticks(&self) -> u64 {
        self.source.cpu_sample().active_ticks()
    }

    pub fn global_idle_ticks(&self) -> u64 {
        self.source.cpu_sample().idle_ticks()
    }

    pub fn global_total_ticks(&self) -> u64 {
        self.source.cpu_sample().total_ticks()
    }

    /// Active share of all CPU ticks since boot.
    pub fn cpu_utilization(&self) -> f32 {
        self.source.cpu_sample().utilization()
    }

    pub fn memory_utilization(&self) -> f32 {
        self.source.memory_totals().utilization()
    }

    pub fn process_active_ticks(&self, pid: u32) -> u64 {
        self.source.process_stat(pid).active_ticks()
    }

    pub fn process_elapsed_seconds(&self, pid: u32) -> u64 {
        self.timing(&self.source.process_stat(pid)).elapsed_seconds
    }

    pub fn process_cpu_utilization(&self, pid: u32) -> f32 {
        self.timing(&self.source.process_stat(pid)).cpu_utilization
    }

    /// Combines an already-read stat record with a fresh uptime read.
    pub fn timing(&self, stat: &ProcessStatRecord) -> ProcessTiming {
        let uptime = self.source.uptime_seconds();
        let elapsed_seconds =
            metrics::elapsed_seconds(uptime, stat.start_ticks(), self.ticks_per_second);
        ProcessTiming {
            elapsed_seconds,
            cpu_utilization: metrics::process_cpu_utilization(
                stat.active_ticks(),
                self.ticks_per_second,
                elapsed_seconds,
            ),
        }
    }
}
