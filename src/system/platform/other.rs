use super::{DEFAULT_CLOCK_TICKS, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn clock_ticks_per_second() -> u64 {
        // No procfs here; every reader falls back to defaults anyway.
        DEFAULT_CLOCK_TICKS
    }
}
