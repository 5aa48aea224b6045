//! This is an internal module that contains utility functionality used by other modules.

use cfg_if::cfg_if;

/// Number of polls a bounded wait makes before reporting the peripheral as unresponsive.
/// A stop drains at most one PWM period: ~0.26s at the slowest prescaler and the
/// largest countertop.
pub const MAX_ITERS: u32 = 10_000_000;

/// Nominal rate of the PWM peripheral clock before prescaling, in Hz. All cycle
/// counts handed to the driver are in units of this clock.
pub const CYCLES_PER_SEC: u64 = 16_000_000;

cfg_if! {
    if #[cfg(bare_metal_arm)] {
        /// Spin hint used by bounded waits.
        #[inline(always)]
        pub(crate) fn relax() {
            cortex_m::asm::nop();
        }
    } else {
        /// Spin hint used by bounded waits.
        #[inline(always)]
        pub(crate) fn relax() {
            core::hint::spin_loop();
        }
    }
}

/// Convert a duration in nanoseconds to peripheral clock cycles, truncating.
/// Returns `None` if the result doesn't fit in a `u32`.
pub fn nanos_to_cycles(nanos: u32, cycles_per_sec: u64) -> Option<u32> {
    let cycles = u64::from(nanos).checked_mul(cycles_per_sec)? / 1_000_000_000;
    u32::try_from(cycles).ok()
}

/// Scale `duty` out of `max_duty` onto a period of `period_cycles`.
pub(crate) fn scale_duty(period_cycles: u32, duty: u16, max_duty: u16) -> u32 {
    if max_duty == 0 {
        return 0;
    }
    // `duty <= max_duty` is checked by callers, so this can't exceed `period_cycles`.
    (u64::from(period_cycles) * u64::from(duty) / u64::from(max_duty)) as u32
}
