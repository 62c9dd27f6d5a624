//! Readers for the kernel-exposed text records under procfs.
//!
//! Each reader opens one record, parses it and drops the handle before
//! returning. Missing files, permission errors and vanished processes all
//! collapse to a documented default (empty string, zero, empty record); the
//! caller decides what an empty result means.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ProcfsConfig;
use crate::system::metrics::{CpuSample, MemoryTotals, ProcessStatRecord};

/// kB per "MB" in the RAM column. Decimal on purpose, matching `ps`-style tools.
const KB_PER_MB: u64 = 1000;

/// Fields of `/proc/<pid>/status` used by the inspector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessStatus {
    pub vm_size_kb: u64,
    pub uid: String,
}

impl ProcessStatus {
    /// Virtual memory size in MB as decimal text, "0" when unknown.
    pub fn ram_mb(&self) -> String {
        (self.vm_size_kb / KB_PER_MB).to_string()
    }
}

/// Locations of the records the inspector reads.
#[derive(Clone, Debug)]
pub struct ProcSource {
    proc_root: PathBuf,
    os_release: PathBuf,
    passwd: PathBuf,
}

impl Default for ProcSource {
    fn default() -> Self {
        Self::from_config(&ProcfsConfig::default())
    }
}

impl ProcSource {
    pub fn new(
        proc_root: impl Into<PathBuf>,
        os_release: impl Into<PathBuf>,
        passwd: impl Into<PathBuf>,
    ) -> Self {
        ProcSource {
            proc_root: proc_root.into(),
            os_release: os_release.into(),
            passwd: passwd.into(),
        }
    }

    pub fn from_config(config: &ProcfsConfig) -> Self {
        Self::new(&config.proc_root, &config.os_release, &config.passwd)
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    pub fn os_pretty_name(&self) -> String {
        read_record(&self.os_release)
            .map(|content| parse_os_pretty_name(&content))
            .unwrap_or_default()
    }

    pub fn kernel_version(&self) -> String {
        read_record(&self.proc_root.join("version"))
            .map(|content| parse_kernel_version(&content))
            .unwrap_or_default()
    }

    /// Numeric directory names under the process root, in directory order.
    pub fn pids(&self) -> Vec<u32> {
        let Ok(entries) = fs::read_dir(&self.proc_root) else {
            return Vec::new();
        };
        entries
            .flatten()
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|entry| parse_pid(&entry.file_name().to_string_lossy()))
            .collect()
    }

    pub fn cpu_sample(&self) -> CpuSample {
        self.global_stat()
            .map(|content| parse_cpu_sample(&content))
            .unwrap_or_default()
    }

    pub fn memory_totals(&self) -> MemoryTotals {
        read_record(&self.proc_root.join("meminfo"))
            .map(|content| parse_meminfo(&content))
            .unwrap_or_default()
    }

    pub fn uptime_seconds(&self) -> u64 {
        read_record(&self.proc_root.join("uptime"))
            .map(|content| parse_uptime_seconds(&content))
            .unwrap_or(0)
    }

    /// `processes` line of `/proc/stat`: forks since boot.
    pub fn total_processes(&self) -> u64 {
        self.global_stat()
            .map(|content| parse_stat_counter(&content, "processes"))
            .unwrap_or(0)
    }

    pub fn running_processes(&self) -> u64 {
        self.global_stat()
            .map(|content| parse_stat_counter(&content, "procs_running"))
            .unwrap_or(0)
    }

    pub fn process_stat(&self, pid: u32) -> ProcessStatRecord {
        read_record(&self.pid_path(pid, "stat"))
            .map(|content| parse_process_stat(&content))
            .unwrap_or_default()
    }

    /// First line of the command-line record, NUL separators left in place.
    pub fn command(&self, pid: u32) -> String {
        self.try_command(pid).unwrap_or_default()
    }

    /// Like [`ProcSource::command`], but `None` when the record is unreadable.
    /// A readable empty record (kernel threads) is `Some("")`.
    pub fn try_command(&self, pid: u32) -> Option<String> {
        read_record(&self.pid_path(pid, "cmdline"))
            .map(|content| content.lines().next().unwrap_or_default().to_string())
    }

    pub fn process_status(&self, pid: u32) -> ProcessStatus {
        self.try_process_status(pid).unwrap_or_default()
    }

    /// `None` when the status record is unreadable.
    pub fn try_process_status(&self, pid: u32) -> Option<ProcessStatus> {
        read_record(&self.pid_path(pid, "status")).map(|content| parse_status(&content))
    }

    pub fn ram_mb(&self, pid: u32) -> String {
        self.process_status(pid).ram_mb()
    }

    pub fn uid(&self, pid: u32) -> String {
        self.process_status(pid).uid
    }

    /// Login name owning `uid`, empty when the user database has no match.
    pub fn user_name(&self, uid: &str) -> String {
        read_record(&self.passwd)
            .map(|content| parse_user_name(&content, uid))
            .unwrap_or_default()
    }

    fn global_stat(&self) -> Option<String> {
        read_record(&self.proc_root.join("stat"))
    }

    fn pid_path(&self, pid: u32, record: &str) -> PathBuf {
        self.proc_root.join(pid.to_string()).join(record)
    }
}

fn read_record(path: &Path) -> Option<String> {
    // Lossy: cmdline and comm are arbitrary bytes.
    fs::read(path)
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

fn parse_pid(name: &str) -> Option<u32> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// `PRETTY_NAME` from an os-release record, unquoted, underscores read as spaces.
pub fn parse_os_pretty_name(content: &str) -> String {
    content
        .lines()
        .find_map(|line| line.trim().strip_prefix("PRETTY_NAME="))
        .map(|value| {
            value
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .replace('_', " ")
        })
        .unwrap_or_default()
}

/// Third token of the first line of `/proc/version` ("Linux version <release> ...").
pub fn parse_kernel_version(content: &str) -> String {
    content
        .lines()
        .next()
        .unwrap_or_default()
        .split_whitespace()
        .nth(2)
        .unwrap_or_default()
        .to_string()
}

pub fn parse_cpu_sample(content: &str) -> CpuSample {
    let Some(line) = content
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
    else {
        return CpuSample::default();
    };
    let counters: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .take(10)
        .map(|token| token.parse().unwrap_or(0))
        .collect();
    CpuSample::from_counters(&counters)
}

pub fn parse_meminfo(content: &str) -> MemoryTotals {
    let mut totals = MemoryTotals::default();
    for line in content.lines() {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let value = value.parse().unwrap_or(0);
        match key.trim_end_matches(':') {
            "MemTotal" => totals.total_kb = value,
            "MemFree" => totals.free_kb = value,
            _ => {}
        }
    }
    totals
}

/// Whole seconds since boot; the fractional part is dropped.
pub fn parse_uptime_seconds(content: &str) -> u64 {
    content
        .split_whitespace()
        .next()
        .and_then(|token| token.split('.').next())
        .and_then(|whole| whole.parse().ok())
        .unwrap_or(0)
}

/// Value of a `key value` line of `/proc/stat`, 0 when the key is absent.
pub fn parse_stat_counter(content: &str, key: &str) -> u64 {
    content
        .lines()
        .find_map(|line| {
            let mut parts = line.split_whitespace();
            if parts.next() == Some(key) {
                parts.next()
            } else {
                None
            }
        })
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Tokenizes a `/proc/<pid>/stat` line.
///
/// The parenthesised command name may contain spaces, so it is kept as a
/// single token by splitting at the last `)`; every later field keeps its
/// documented position.
pub fn parse_process_stat(content: &str) -> ProcessStatRecord {
    let line = content.lines().next().unwrap_or_default();
    let (Some(open), Some(close)) = (line.find('('), line.rfind(')')) else {
        return ProcessStatRecord::from_tokens(line.split_whitespace().map(str::to_string).collect());
    };
    if close < open {
        return ProcessStatRecord::from_tokens(line.split_whitespace().map(str::to_string).collect());
    }

    let mut tokens: Vec<String> = line[..open].split_whitespace().map(str::to_string).collect();
    tokens.push(line[open..=close].to_string());
    tokens.extend(line[close + 1..].split_whitespace().map(str::to_string));
    ProcessStatRecord::from_tokens(tokens)
}

pub fn parse_status(content: &str) -> ProcessStatus {
    let mut status = ProcessStatus::default();
    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let first = value.split_whitespace().next().unwrap_or_default();
        match key.trim() {
            "VmSize" => status.vm_size_kb = first.parse().unwrap_or(0),
            "Uid" => status.uid = first.to_string(),
            _ => {}
        }
    }
    status
}

/// First field of the first passwd entry whose third field equals `uid`.
pub fn parse_user_name(content: &str, uid: &str) -> String {
    if uid.is_empty() {
        return String::new();
    }
    content
        .lines()
        .find_map(|line| {
            let fields: Vec<&str> = line.split(':').collect();
            match fields.as_slice() {
                [name, _, entry_uid, ..] if *entry_uid == uid => Some(name.to_string()),
                _ => None,
            }
        })
        .unwrap_or_default()
}
