/// Clock-tick rate assumed when the platform cannot report one (USER_HZ on most Linux builds).
pub const DEFAULT_CLOCK_TICKS: u64 = 100;

pub trait PlatformExtensions {
    /// Clock ticks per second used by the kernel's tick-based counters.
    fn clock_ticks_per_second() -> u64;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod other;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use other as platform_impl;

pub fn clock_ticks_per_second() -> u64 {
    platform_impl::Platform::clock_ticks_per_second()
}
