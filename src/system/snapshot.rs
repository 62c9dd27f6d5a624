use serde::Serialize;

use super::collector::Collector;
use super::process::ProcessSnapshot;

/// Host-level view: identity fixed at construction, everything else read on demand.
pub struct SystemSnapshot {
    collector: Collector,
    kernel: String,
    operating_system: String,
    processes: Vec<ProcessSnapshot>,
}

/// Serializable result of one full sampling pass.
#[derive(Clone, Debug, Serialize)]
pub struct SystemReport {
    pub operating_system: String,
    pub kernel: String,
    pub uptime_seconds: u64,
    pub cpu_utilization: f32,
    pub memory_utilization: f32,
    pub total_processes: u64,
    pub running_processes: u64,
    pub processes: Vec<ProcessSnapshot>,
}

impl Default for SystemSnapshot {
    fn default() -> Self {
        Self::new(Collector::new())
    }
}

impl SystemSnapshot {
    pub fn new(collector: Collector) -> Self {
        let source = collector.source();
        let kernel = source.kernel_version();
        let operating_system = source.os_pretty_name();
        SystemSnapshot {
            collector,
            kernel,
            operating_system,
            processes: Vec::new(),
        }
    }

    pub fn collector(&self) -> &Collector {
        &self.collector
    }

    /// Re-enumerates and re-samples every process, busiest first.
    ///
    /// Processes that exit during the pass are left out. The previous list is
    /// replaced only once the new one is complete.
    pub fn processes(&mut self) -> &[ProcessSnapshot] {
        #[cfg(feature = "trace")]
        let _processes_span = tracing::debug_span!("snapshot.processes").entered();

        let pids = self.collector.source().pids();
        let mut fresh = Vec::with_capacity(pids.len());
        for pid in pids {
            match ProcessSnapshot::capture(&self.collector, pid) {
                Ok(process) => fresh.push(process),
                Err(_err) => {
                    #[cfg(feature = "trace")]
                    tracing::debug!(pid, error = %_err, "skipping process");
                }
            }
        }
        // Stable, so equal utilizations stay in enumeration order.
        fresh.sort_by(|a, b| b.cmp_by_cpu(a));

        self.processes = fresh;
        &self.processes
    }

    pub fn kernel(&self) -> &str {
        &self.kernel
    }

    pub fn operating_system(&self) -> &str {
        &self.operating_system
    }

    pub fn cpu_utilization(&self) -> f32 {
        self.collector.cpu_utilization()
    }

    pub fn memory_utilization(&self) -> f32 {
        self.collector.memory_utilization()
    }

    /// Seconds since boot.
    pub fn uptime(&self) -> u64 {
        self.collector.source().uptime_seconds()
    }

    pub fn total_processes(&self) -> u64 {
        self.collector.source().total_processes()
    }

    pub fn running_processes(&self) -> u64 {
        self.collector.source().running_processes()
    }

    /// Runs one pass and materializes it.
    pub fn report(&mut self) -> SystemReport {
        let processes = self.processes().to_vec();
        SystemReport {
            operating_system: self.operating_system.clone(),
            kernel: self.kernel.clone(),
            uptime_seconds: self.uptime(),
            cpu_utilization: self.cpu_utilization(),
            memory_utilization: self.memory_utilization(),
            total_processes: self.total_processes(),
            running_processes: self.running_processes(),
            processes,
        }
    }
}
