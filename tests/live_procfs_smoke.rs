use std::path::Path;

use procglance::system::collector::Collector;
use procglance::system::process::ProcessSnapshot;
use procglance::system::snapshot::SystemSnapshot;
use sysinfo::System;

fn procfs_available() -> bool {
    Path::new("/proc/self/stat").exists()
}

#[test]
fn own_process_is_enumerated_and_sampled() {
    if !procfs_available() {
        return;
    }
    let collector = Collector::new();
    let pid = std::process::id();
    assert!(collector.source().pids().contains(&pid));

    let me = ProcessSnapshot::capture(&collector, pid).expect("sample own process");
    assert_eq!(me.pid(), pid);
    assert!(me.cpu_utilization() >= 0.0);
    assert!(me.uptime() <= collector.source().uptime_seconds());
    assert!(!me.command().is_empty());
}

#[test]
fn host_totals_match_sysinfo() {
    if !procfs_available() {
        return;
    }
    let collector = Collector::new();
    let mut sys = System::new();
    sys.refresh_memory();

    let totals = collector.source().memory_totals();
    assert_eq!(totals.total_kb * 1024, sys.total_memory());
    let utilization = collector.memory_utilization();
    assert!((0.0..=1.0).contains(&utilization));

    assert!(!collector.source().kernel_version().is_empty());

    let ours = collector.source().uptime_seconds();
    let theirs = System::uptime();
    assert!(ours.abs_diff(theirs) <= 2, "uptime {ours} vs sysinfo {theirs}");
}

#[test]
fn full_pass_on_host() {
    if !procfs_available() {
        return;
    }
    let mut system = SystemSnapshot::default();
    let processes = system.processes();
    assert!(!processes.is_empty());
    assert!(
        processes
            .windows(2)
            .all(|pair| pair[0].cpu_utilization() >= pair[1].cpu_utilization())
    );
    assert!(system.total_processes() >= system.running_processes());
    assert!(system.collector().global_total_ticks() > 0);
}
