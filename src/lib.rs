//! Channel multiplexing for a PWM peripheral whose channels share a single timer,
//! as on the nRF52 series: one prescaler and countertop for all four channels, with
//! per-channel compare values played back from a RAM sequence.
//!
//! Channels are set independently with `Pwm::set_cycles()`. The driver resolves a
//! common timing base, holds 0% and 100% channels with their GPIO level instead of
//! the timer, and stops and restarts the timer without glitching channels that
//! aren't changing.
//!
//! Register access, pin control and the output pins themselves are supplied by the
//! board, through the traits in `traits`, and Embedded-HAL's digital traits.
//!
//! Example:
//! ```ignore
//! let mut pwm = Pwm::new(
//!     regs,
//!     NoPinCtrl,
//!     [
//!         ChannelConfig::new(led_pin, false),
//!         ChannelConfig::unused(),
//!         ChannelConfig::unused(),
//!         ChannelConfig::unused(),
//!     ],
//!     PwmConfig::default(),
//! );
//! pwm.init()?;
//! // 1kHz, 25% duty, at the 16MHz peripheral clock.
//! pwm.set_cycles(0, 16_000, 4_000, Polarity::Normal)?;
//! ```

#![cfg_attr(not(test), no_std)]

// Must come first, so the logging macros are in scope for the modules below.
#[macro_use]
mod macros;

pub mod channel;
pub mod config;
pub mod error;
pub mod pwm;
pub mod seq_value;
pub mod sequence;
pub mod timebase;
pub mod traits;
pub mod util;

/// Number of output channels on the peripheral.
pub const CHANNEL_COUNT: usize = 4;

pub use crate::{
    channel::PwmChannel,
    config::{BaseClock, ChannelConfig, CounterMode, LoadMode, Polarity, PwmConfig, StepMode},
    error::{Error, Result},
    pwm::{PlaybackState, PmAction, Pwm},
    seq_value::SeqValue,
    sequence::Sequence,
    timebase::TimeBase,
    traits::{NoPinCtrl, PinCtrl, PinCtrlState, PwmTimer},
};
