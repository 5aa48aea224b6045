// Traits for the platform services the driver sits on. Board support code
// implements these over the actual peripheral registers and pin controller.

use crate::{
    config::{CounterMode, PwmConfig},
    error::Result,
};

/// Register-level access to one PWM peripheral instance.
pub trait PwmTimer {
    /// Largest value the prescaler register accepts.
    const MAX_PRESCALER: u8 = 7;
    /// Largest value the countertop register accepts.
    const MAX_COUNTERTOP: u16 = 0x7FFF;

    /// Enable the peripheral and apply `config`. Returns `Error::InitFailed` (or a
    /// more specific error) if the instance can't be claimed.
    fn init(&mut self, config: &PwmConfig) -> Result<()>;

    /// Stop and disable the peripheral, releasing it.
    fn deinit(&mut self);

    /// Set prescaler, counter mode and countertop. May be called while running.
    fn configure(&mut self, prescaler: u8, mode: CounterMode, countertop: u16);

    /// Load `values` into the compare registers and play the sequence
    /// `playback_count` times. Output continues with the last loaded values after
    /// playback ends, until the next playback or a stop.
    fn simple_playback(&mut self, values: &[u16], playback_count: u16);

    /// Request a stop at the end of the current PWM period. With `wait`, block
    /// until it takes effect. Returns whether the peripheral is stopped on return.
    fn stop(&mut self, wait: bool) -> bool;

    /// Whether a previously requested stop has completed. The peripheral ignores
    /// playback requests until it has.
    fn is_stopped(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Pin configuration states a board defines for the peripheral's pins.
pub enum PinCtrlState {
    /// Pins routed to the peripheral, for normal operation.
    Default,
    /// Pins in their low-power configuration.
    Sleep,
}

/// Applies pin configuration states.
pub trait PinCtrl {
    type Error;

    fn apply_state(&mut self, state: PinCtrlState) -> core::result::Result<(), Self::Error>;
}

/// For boards whose pins are configured once at startup, outside the driver.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPinCtrl;

impl PinCtrl for NoPinCtrl {
    type Error = core::convert::Infallible;

    fn apply_state(&mut self, _state: PinCtrlState) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}
