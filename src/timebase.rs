//! The timing base shared by all channels: one period and prescaler for the whole
//! peripheral. A channel may only change it while no other channel is being driven
//! by the timer.

use crate::{
    config::CounterMode,
    error::{Error, Result},
    sequence::Sequence,
    traits::PwmTimer,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeBase {
    /// Period in peripheral clock cycles, before prescaling. 0 until a channel first
    /// needs timer drive.
    pub period_cycles: u32,
    /// Right shift applied to the period (to get the countertop) and to pulse
    /// lengths (to get compare values).
    pub prescaler: u8,
}

/// Find the smallest prescaler that brings `period_cycles` within `max_countertop`.
/// Returns the prescaler, and the countertop it gives.
pub fn find_prescaler(period_cycles: u32, max_prescaler: u8, max_countertop: u16) -> Option<(u8, u16)> {
    (0..=max_prescaler).find_map(|prescaler| {
        let countertop = period_cycles.checked_shr(u32::from(prescaler)).unwrap_or(0);
        if countertop <= u32::from(max_countertop) {
            Some((prescaler, countertop as u16))
        } else {
            None
        }
    })
}

impl TimeBase {
    /// Make the timing base match `period_cycles` on behalf of `channel`,
    /// reprogramming the timer if needed.
    ///
    /// A period equal to the current one always succeeds. A different one fails with
    /// `IncompatiblePeriod` if any other channel needs the timer, and with
    /// `PeriodTooLong` if no prescaler fits. On failure nothing is changed.
    pub fn check_and_set<T: PwmTimer>(
        &mut self,
        channel: usize,
        period_cycles: u32,
        sequence: &Sequence,
        mode: CounterMode,
        timer: &mut T,
    ) -> Result<()> {
        if period_cycles == self.period_cycles {
            return Ok(());
        }

        // Changing the period would distort the output of a channel that's already
        // being generated.
        if sequence.any_other_channel_needs_pwm(channel) {
            error!(
                "Incompatible period {=u32}; {=u32} in use",
                period_cycles,
                self.period_cycles
            );
            return Err(Error::IncompatiblePeriod);
        }

        let Some((prescaler, countertop)) =
            find_prescaler(period_cycles, T::MAX_PRESCALER, T::MAX_COUNTERTOP)
        else {
            error!("Prescaler for period_cycles {=u32} not found", period_cycles);
            return Err(Error::PeriodTooLong);
        };

        self.period_cycles = period_cycles;
        self.prescaler = prescaler;
        timer.configure(prescaler, mode, countertop);

        Ok(())
    }
}
