use super::{DEFAULT_CLOCK_TICKS, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn clock_ticks_per_second() -> u64 {
        // SAFETY: sysconf has no preconditions and only reads configuration.
        let hz = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
        if hz > 0 {
            hz as u64
        } else {
            DEFAULT_CLOCK_TICKS
        }
    }
}
