//! Static configuration for a PWM instance: the settings the peripheral is
//! initialized with, and which output pin (if any) each channel drives.

use crate::CHANNEL_COUNT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// Peripheral clock after the prescaler. The discriminant is the prescaler value
/// written to hardware.
pub enum BaseClock {
    /// 16 MHz
    Div1 = 0,
    /// 8 MHz
    Div2 = 1,
    /// 4 MHz
    Div4 = 2,
    /// 2 MHz
    Div8 = 3,
    /// 1 MHz
    Div16 = 4,
    /// 500 kHz
    Div32 = 5,
    /// 250 kHz
    Div64 = 6,
    /// 125 kHz
    Div128 = 7,
}

impl BaseClock {
    /// Clock rate, in Hz.
    pub fn hz(&self) -> u32 {
        16_000_000 >> (*self as u8)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// Selects operating mode of the wave counter.
pub enum CounterMode {
    /// Up counter, edge-aligned PWM duty cycle
    Up = 0,
    /// Up and down counter, center-aligned PWM duty cycle. Periods and pulses
    /// take twice as many clock cycles as in `Up` mode.
    UpAndDown = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// How a sequence is read from RAM and spread to the compare registers.
pub enum LoadMode {
    /// One value for all four channels.
    Common = 0,
    /// One value per pair of channels.
    Grouped = 1,
    /// One value per channel.
    Individual = 2,
    /// Three channel values plus the countertop.
    Waveform = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// Source for advancing the active sequence.
pub enum StepMode {
    /// Advance every `REFRESH + 1` periods.
    Auto = 0,
    /// Advance on the `NEXTSTEP` task.
    Triggered = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Output polarity requested for a channel.
pub enum Polarity {
    /// Active level is high.
    Normal,
    /// Active level is low.
    Inverted,
}

impl Polarity {
    pub fn is_inverted(&self) -> bool {
        matches!(self, Self::Inverted)
    }
}

impl From<bool> for Polarity {
    /// `true` means inverted.
    fn from(inverted: bool) -> Self {
        if inverted { Self::Inverted } else { Self::Normal }
    }
}

#[derive(Clone, Debug)]
/// Settings the peripheral is initialized with. The base clock and countertop
/// only hold until the first channel needs timer drive; after that the prescaler
/// and countertop are whatever the requested period resolved to.
pub struct PwmConfig {
    /// Defaults to 1 MHz.
    pub base_clock: BaseClock,
    /// Defaults to `Up`.
    pub count_mode: CounterMode,
    /// Initial countertop. Defaults to 1000.
    pub top_value: u16,
    /// Defaults to `Individual`; the driver maintains one compare word per channel.
    pub load_mode: LoadMode,
    /// Defaults to `Triggered`.
    pub step_mode: StepMode,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            base_clock: BaseClock::Div16,
            count_mode: CounterMode::Up,
            top_value: 1_000,
            load_mode: LoadMode::Individual,
            step_mode: StepMode::Triggered,
        }
    }
}

impl PwmConfig {
    /// Default settings, with the counter in up-and-down (center-aligned) mode.
    pub fn center_aligned() -> Self {
        Self {
            count_mode: CounterMode::UpAndDown,
            ..Default::default()
        }
    }
}

/// Per-channel board configuration.
pub struct ChannelConfig<P> {
    /// Output pin routed to this channel, if any.
    pub pin: Option<P>,
    /// Initial polarity, used for channels without a pin. Channels with a pin take
    /// their polarity from the pin's output level at init.
    pub inverted: bool,
}

impl<P> ChannelConfig<P> {
    pub fn new(pin: P, inverted: bool) -> Self {
        Self {
            pin: Some(pin),
            inverted,
        }
    }

    /// A channel with no output pin.
    pub fn unused() -> Self {
        Self {
            pin: None,
            inverted: false,
        }
    }
}

/// Convenience for boards that leave every channel unrouted.
pub fn unused_channels<P>() -> [ChannelConfig<P>; CHANNEL_COUNT] {
    core::array::from_fn(|_| ChannelConfig::unused())
}
