use std::cmp::Ordering;

use serde::Serialize;

use super::collector::Collector;
use super::error::SampleError;

/// One process as it looked when it was captured. Fields never change afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessSnapshot {
    pid: u32,
    command: String,
    user: String,
    ram: String,
    uptime: u64,
    cpu_utilization: f32,
}

impl ProcessSnapshot {
    /// Samples `pid` through `collector`.
    ///
    /// Fails when the stat, status or cmdline record cannot be read, which
    /// means the process exited after it was enumerated. Readable records
    /// with missing fields (no `VmSize`, empty cmdline) still produce a row.
    pub fn capture(collector: &Collector, pid: u32) -> Result<Self, SampleError> {
        #[cfg(feature = "trace")]
        let _capture_span = tracing::trace_span!("process.capture", pid).entered();

        let source = collector.source();
        let stat = source.process_stat(pid);
        if stat.is_empty() {
            return Err(SampleError::Vanished { pid });
        }
        let timing = collector.timing(&stat);

        let status = source
            .try_process_status(pid)
            .ok_or(SampleError::Vanished { pid })?;
        let command = source
            .try_command(pid)
            .ok_or(SampleError::Vanished { pid })?;
        Ok(ProcessSnapshot {
            pid,
            command,
            user: source.user_name(&status.uid),
            ram: status.ram_mb(),
            uptime: timing.elapsed_seconds,
            cpu_utilization: timing.cpu_utilization,
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Virtual memory size in MB, as decimal text.
    pub fn ram(&self) -> &str {
        &self.ram
    }

    /// Seconds since the process started.
    pub fn uptime(&self) -> u64 {
        self.uptime
    }

    pub fn cpu_utilization(&self) -> f32 {
        self.cpu_utilization
    }

    /// Ascending order by CPU utilization.
    pub fn cmp_by_cpu(&self, other: &Self) -> Ordering {
        self.cpu_utilization.total_cmp(&other.cpu_utilization)
    }

    #[cfg(test)]
    pub(crate) fn synthetic(pid: u32, cpu_utilization: f32) -> Self {
        ProcessSnapshot {
            pid,
            command: format!("proc_{pid}"),
            user: "tester".to_string(),
            ram: "0".to_string(),
            uptime: 0,
            cpu_utilization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_ordering_is_ascending() {
        let low = ProcessSnapshot::synthetic(1, 0.1);
        let high = ProcessSnapshot::synthetic(2, 0.9);
        assert_eq!(low.cmp_by_cpu(&high), Ordering::Less);
        assert_eq!(high.cmp_by_cpu(&low), Ordering::Greater);
        assert_eq!(low.cmp_by_cpu(&low.clone()), Ordering::Equal);
    }

    #[test]
    fn descending_sort_keeps_ties_in_input_order() {
        let mut procs = vec![
            ProcessSnapshot::synthetic(5, 0.2),
            ProcessSnapshot::synthetic(3, 0.5),
            ProcessSnapshot::synthetic(9, 0.2),
            ProcessSnapshot::synthetic(1, 0.0),
        ];
        procs.sort_by(|a, b| b.cmp_by_cpu(a));
        let pids: Vec<u32> = procs.iter().map(ProcessSnapshot::pid).collect();
        assert_eq!(pids, vec![3, 5, 9, 1]);
    }
}
