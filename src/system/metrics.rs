//! Typed kernel records and the arithmetic derived from them.
//!
//! Nothing in here touches the filesystem: every value is computed from a
//! record that was read once by the procfs readers, so paired
//! quantities (active vs idle ticks, run time vs start time) always come
//! from the same read.

// 0-indexed positions inside a per-process stat record.
const STAT_COMM: usize = 1;
const STAT_STATE: usize = 2;
const STAT_UTIME: usize = 13;
const STAT_STIME: usize = 14;
const STAT_CUTIME: usize = 15;
const STAT_CSTIME: usize = 16;
const STAT_STARTTIME: usize = 21;

/// Aggregate CPU counters from the first `cpu` line of `/proc/stat`, in clock ticks since boot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl CpuSample {
    /// Builds a sample from positional counters; absent trailing counters are zero.
    pub fn from_counters(counters: &[u64]) -> Self {
        let at = |index: usize| counters.get(index).copied().unwrap_or(0);
        CpuSample {
            user: at(0),
            nice: at(1),
            system: at(2),
            idle: at(3),
            iowait: at(4),
            irq: at(5),
            softirq: at(6),
            steal: at(7),
            guest: at(8),
            guest_nice: at(9),
        }
    }

    pub fn active_ticks(&self) -> u64 {
        saturating_sum(&[
            self.user,
            self.nice,
            self.system,
            self.irq,
            self.softirq,
            self.steal,
        ])
    }

    pub fn idle_ticks(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }

    pub fn total_ticks(&self) -> u64 {
        self.active_ticks().saturating_add(self.idle_ticks())
    }

    /// Share of ticks spent active since boot.
    pub fn utilization(&self) -> f32 {
        ratio(self.active_ticks(), self.total_ticks())
    }

    /// Share of ticks spent active between `previous` and this sample.
    ///
    /// Counters that went backwards (a previous sample from before a counter
    /// reset) contribute nothing rather than wrapping.
    pub fn utilization_since(&self, previous: &CpuSample) -> f32 {
        let active = self.active_ticks().saturating_sub(previous.active_ticks());
        let idle = self.idle_ticks().saturating_sub(previous.idle_ticks());
        ratio(active, active.saturating_add(idle))
    }
}

/// `MemTotal` / `MemFree` from `/proc/meminfo`, in kB.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryTotals {
    pub total_kb: u64,
    pub free_kb: u64,
}

impl MemoryTotals {
    /// `(total - free) / total`, or 0.0 when the total is unknown.
    pub fn utilization(&self) -> f32 {
        ratio(self.total_kb.saturating_sub(self.free_kb), self.total_kb)
    }
}

/// Whitespace tokens of one `/proc/<pid>/stat` line.
///
/// Records can be short (a process racing to exit, or a malformed line):
/// every accessor reads a missing or non-numeric field as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessStatRecord {
    tokens: Vec<String>,
}

impl ProcessStatRecord {
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        ProcessStatRecord { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Raw token at a 0-indexed position.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Numeric token at a 0-indexed position, 0 when absent or unparsable.
    pub fn counter(&self, index: usize) -> u64 {
        self.field(index)
            .and_then(|token| token.parse().ok())
            .unwrap_or(0)
    }

    /// Executable name without the surrounding parentheses.
    pub fn comm(&self) -> &str {
        self.field(STAT_COMM)
            .map(|token| {
                token
                    .strip_prefix('(')
                    .and_then(|t| t.strip_suffix(')'))
                    .unwrap_or(token)
            })
            .unwrap_or("")
    }

    pub fn state(&self) -> Option<char> {
        self.field(STAT_STATE).and_then(|token| token.chars().next())
    }

    pub fn utime(&self) -> u64 {
        self.counter(STAT_UTIME)
    }

    pub fn stime(&self) -> u64 {
        self.counter(STAT_STIME)
    }

    pub fn cutime(&self) -> u64 {
        self.counter(STAT_CUTIME)
    }

    pub fn cstime(&self) -> u64 {
        self.counter(STAT_CSTIME)
    }

    /// Ticks after boot at which the process started.
    pub fn start_ticks(&self) -> u64 {
        self.counter(STAT_STARTTIME)
    }

    /// Own plus waited-for children's user and kernel ticks.
    pub fn active_ticks(&self) -> u64 {
        saturating_sum(&[self.utime(), self.stime(), self.cutime(), self.cstime()])
    }
}

/// Seconds a process has been alive, given system uptime and its start tick.
///
/// A process that appears to have started after the uptime was sampled
/// reads as 0 seconds old.
pub fn elapsed_seconds(uptime_seconds: u64, start_ticks: u64, ticks_per_second: u64) -> u64 {
    let started_at = start_ticks.checked_div(ticks_per_second).unwrap_or(0);
    uptime_seconds.saturating_sub(started_at)
}

/// CPU seconds consumed per second alive. 0.0 for processes with no elapsed time.
pub fn process_cpu_utilization(active_ticks: u64, ticks_per_second: u64, elapsed_seconds: u64) -> f32 {
    if ticks_per_second == 0 || elapsed_seconds == 0 {
        return 0.0;
    }
    let cpu_seconds = active_ticks as f64 / ticks_per_second as f64;
    (cpu_seconds / elapsed_seconds as f64) as f32
}

// Counters come from kernel text; a garbage field must not overflow.
fn saturating_sum(values: &[u64]) -> u64 {
    values.iter().fold(0, |acc, v| acc.saturating_add(*v))
}

fn ratio(part: u64, whole: u64) -> f32 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64) as f32
}
