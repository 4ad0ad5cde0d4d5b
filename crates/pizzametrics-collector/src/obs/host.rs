//! Host CPU and memory sampling.
//!
//! Each call reads the operating system afresh; nothing is cached between
//! ticks. The arithmetic lives in free functions so it can be checked
//! without a real host.

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

/// Source of host usage percentages, sampled once per tick.
pub trait HostProbe: Send + Sync {
    /// 1-minute load average over logical cores, as a percentage.
    fn cpu_usage_percent(&self) -> f64;
    /// Used over total memory, as a percentage.
    fn memory_usage_percent(&self) -> f64;
}

/// Reads the live host through `sysinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl HostProbe for SystemProbe {
    fn cpu_usage_percent(&self) -> f64 {
        let sys = System::new_with_specifics(RefreshKind::new().with_cpu(CpuRefreshKind::new()));
        cpu_percent(System::load_average().one, sys.cpus().len())
    }

    fn memory_usage_percent(&self) -> f64 {
        let sys = System::new_with_specifics(
            RefreshKind::new().with_memory(MemoryRefreshKind::new().with_ram()),
        );
        memory_percent(sys.total_memory(), sys.available_memory())
    }
}

/// Round to two decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// `load_one / cores`, scaled to a percentage. Zero cores reads as idle.
pub fn cpu_percent(load_one: f64, cores: usize) -> f64 {
    if cores == 0 {
        return 0.0;
    }
    round2(load_one / cores as f64 * 100.0)
}

/// `(total - free) / total`, scaled to a percentage. Zero total reads as
/// empty.
pub fn memory_percent(total: u64, free: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let used = total.saturating_sub(free);
    round2(used as f64 / total as f64 * 100.0)
}
