use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use procglance::config::{self, Config, OutputFormat, load_config, load_config_from_path};
use procglance::format::{display_command, format_elapsed, format_percent, truncate_to_width};
use procglance::system::collector::Collector;
use procglance::system::snapshot::{SystemReport, SystemSnapshot};
use procglance::system::source::ProcSource;

#[derive(Parser)]
#[command(
    name = "procglance",
    about = "One-shot view of CPU, memory and the busiest processes"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root of the process filesystem
    #[arg(long)]
    proc_root: Option<PathBuf>,

    /// Number of processes to print, 0 for all
    #[arg(long)]
    limit: Option<usize>,

    /// Print the snapshot as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log sampling spans to stderr (requires the `trace` feature).
    #[arg(long, default_value_t = false)]
    trace: bool,

    /// Log sampling spans as JSON lines (requires the `trace` feature).
    #[arg(long, default_value_t = false)]
    trace_json: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if cli.trace || cli.trace_json {
        init_tracing(cli.trace_json)?;
    }
    let config = load_config_for_cli(&cli);

    let collector = Collector::with_source(
        ProcSource::from_config(&config.procfs),
        procglance::system::platform::clock_ticks_per_second(),
    );
    let mut system = SystemSnapshot::new(collector);
    let report = system.report();

    match config.general.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print!("{}", render_table(&report, &config.general)),
    }
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref root) = cli.proc_root {
        config.procfs.proc_root = root.clone();
    }
    if let Some(limit) = cli.limit {
        config.general.max_processes = limit;
    }
    if cli.json {
        config.general.output = OutputFormat::Json;
    }

    config
}

fn render_table(report: &SystemReport, general: &config::GeneralConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("OS:        {}\n", report.operating_system));
    out.push_str(&format!("Kernel:    {}\n", report.kernel));
    out.push_str(&format!("Uptime:    {}\n", format_elapsed(report.uptime_seconds)));
    out.push_str(&format!("CPU:       {}\n", format_percent(report.cpu_utilization)));
    out.push_str(&format!("Memory:    {}\n", format_percent(report.memory_utilization)));
    out.push_str(&format!(
        "Processes: {} total, {} running\n\n",
        report.total_processes, report.running_processes
    ));

    out.push_str(&format!(
        "{:>7}  {:<10} {:>6} {:>8} {:>10}  COMMAND\n",
        "PID", "USER", "CPU%", "RAM[MB]", "TIME+"
    ));
    let limit = match general.max_processes {
        0 => usize::MAX,
        n => n,
    };
    for process in report.processes.iter().take(limit) {
        out.push_str(&format!(
            "{:>7}  {:<10} {:>6.1} {:>8} {:>10}  {}\n",
            process.pid(),
            truncate_to_width(process.user(), 10),
            process.cpu_utilization() * 100.0,
            process.ram(),
            format_elapsed(process.uptime()),
            display_command(process.command(), general.command_width),
        ));
    }
    out
}

fn init_tracing(json: bool) -> Result<()> {
    #[cfg(not(feature = "trace"))]
    {
        let _ = json;
        Err(eyre!(
            "--trace requires the `trace` feature; run with `cargo run --features trace -- --trace`"
        ))
    }

    #[cfg(feature = "trace")]
    {
        procglance::trace::init_tracing(json)
    }
}
