//! Support for a PWM peripheral whose four channels share one timer. Channels are
//! set independently, and the driver works out the timing base, which channels
//! the timer has to drive, and when the timer can be stopped.
//!
//! A channel at 0% or 100% duty is held by its GPIO output level instead of the
//! timer; once no channel needs the timer, it's stopped. Only channels that are
//! actually generating pulses constrain the period the others can request.

use embedded_hal::digital::{PinState, StatefulOutputPin};

use crate::{
    CHANNEL_COUNT,
    channel::PwmChannel,
    config::{ChannelConfig, CounterMode, Polarity, PwmConfig},
    error::{Error, Result},
    seq_value::SeqValue,
    sequence::Sequence,
    timebase::TimeBase,
    traits::{NoPinCtrl, PinCtrl, PinCtrlState, PwmTimer},
    util::{CYCLES_PER_SEC, nanos_to_cycles},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// The timer's playback state, as far as the driver knows.
pub enum PlaybackState {
    /// Not generating pulses.
    Stopped,
    /// A stop was requested, and may not have taken effect yet. The peripheral
    /// ignores new playback until it has.
    StopPending,
    /// Playing back the sequence.
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Power management requests.
pub enum PmAction {
    Suspend,
    Resume,
    TurnOff,
    TurnOn,
}

/// One PWM peripheral instance, its output pins, and the state shared by its
/// channels.
pub struct Pwm<T, P, C = NoPinCtrl> {
    timer: T,
    pinctrl: C,
    pins: [Option<P>; CHANNEL_COUNT],
    config: PwmConfig,
    /// Polarities from the board configuration, for channels without a pin.
    configured_inverted: [bool; CHANNEL_COUNT],
    /// Polarities found at the last init.
    initially_inverted: [bool; CHANNEL_COUNT],
    timebase: TimeBase,
    sequence: Sequence,
    state: PlaybackState,
}

impl<T, P, C> Pwm<T, P, C>
where
    T: PwmTimer,
    P: StatefulOutputPin,
    C: PinCtrl,
{
    /// Take ownership of the peripheral and pins. This doesn't touch hardware; call
    /// `init()` before setting channels.
    pub fn new(timer: T, pinctrl: C, channels: [ChannelConfig<P>; CHANNEL_COUNT], config: PwmConfig) -> Self {
        let configured_inverted = core::array::from_fn(|i| channels[i].inverted);
        let pins = channels.map(|ch| ch.pin);

        Self {
            timer,
            pinctrl,
            pins,
            config,
            configured_inverted,
            initially_inverted: configured_inverted,
            timebase: TimeBase::default(),
            sequence: Sequence::all_inactive(configured_inverted),
            state: PlaybackState::Stopped,
        }
    }

    /// Apply the default pin state, seed every channel as constantly inactive, and
    /// initialize the peripheral.
    ///
    /// A channel whose pin is already driven high is taken to be inverted, so that
    /// its idle level doesn't change. Channels without a pin use the polarity from
    /// their `ChannelConfig`.
    pub fn init(&mut self) -> Result<()> {
        self.apply_pin_state(PinCtrlState::Default)?;

        for (i, pin) in self.pins.iter_mut().enumerate() {
            self.initially_inverted[i] = match pin {
                Some(pin) => pin.is_set_high().map_err(|_| Error::Pin)?,
                None => self.configured_inverted[i],
            };
        }

        self.sequence = Sequence::all_inactive(self.initially_inverted);

        if let Err(e) = self.timer.init(&self.config) {
            error!("Failed to initialize PWM peripheral");
            return Err(e);
        }
        self.state = PlaybackState::Stopped;

        Ok(())
    }

    /// Release the peripheral and forget all channel and timing state.
    pub fn uninit(&mut self) {
        self.timer.deinit();

        self.sequence = Sequence::default();
        self.timebase = TimeBase::default();
        self.initially_inverted = [false; CHANNEL_COUNT];
        self.state = PlaybackState::Stopped;
    }

    /// Handle a power management transition. Errors are passed on as-is; nothing
    /// is retried.
    pub fn pm_action(&mut self, action: PmAction) -> Result<()> {
        match action {
            PmAction::Resume => {
                self.apply_pin_state(PinCtrlState::Default)?;
                self.init()
            }
            PmAction::Suspend => {
                self.uninit();
                self.apply_pin_state(PinCtrlState::Sleep)
            }
            PmAction::TurnOff | PmAction::TurnOn => {
                warn!("Unsupported PM action: {}", action);
                Err(Error::NotSupported)
            }
        }
    }

    pub fn suspend(&mut self) -> Result<()> {
        self.pm_action(PmAction::Suspend)
    }

    pub fn resume(&mut self) -> Result<()> {
        self.pm_action(PmAction::Resume)
    }

    /// Set a channel's period and pulse length, in peripheral clock cycles (see
    /// `cycles_per_sec()`).
    ///
    /// A zero pulse holds the output inactive, and a pulse of at least the period
    /// holds it active; neither needs the timer, nor constrains the period. Any
    /// other pulse needs the timer, and fails with `IncompatiblePeriod` if another
    /// channel is being generated with a different period. On error, nothing is
    /// changed.
    ///
    /// A timer-driven pulse is prescaled to its compare value with a right shift.
    /// That can truncate a very short pulse to 0, or round a pulse just under the
    /// period up to the 100% sentinel. Such a channel is still played back, but its
    /// pin level isn't set, and it no longer counts as needing the timer.
    pub fn set_cycles(
        &mut self,
        channel: u32,
        period_cycles: u32,
        pulse_cycles: u32,
        polarity: Polarity,
    ) -> Result<()> {
        let ch = channel as usize;
        if ch >= CHANNEL_COUNT {
            error!("Invalid channel: {=u32}", channel);
            return Err(Error::InvalidChannel);
        }

        // In up-and-down mode each timer tick is counted twice per period.
        let (period_cycles, pulse_cycles) = match self.config.count_mode {
            CounterMode::Up => (period_cycles, pulse_cycles),
            CounterMode::UpAndDown => (period_cycles / 2, pulse_cycles / 2),
        };

        let inverted = polarity.is_inverted();
        let needs_pwm = pulse_cycles != 0 && pulse_cycles < period_cycles;
        let playback = needs_pwm || self.sequence.any_other_channel_needs_pwm(ch);

        // The peripheral ignores playback until a pending stop completes. Wait for
        // it before committing anything, so a timeout leaves the channel as it was.
        if playback && self.state == PlaybackState::StopPending {
            if let Err(e) = self.wait_stopped() {
                error!("PWM peripheral didn't stop");
                return Err(e);
            }
            self.state = PlaybackState::Stopped;
        }

        let compare = if pulse_cycles == 0 {
            SeqValue::INACTIVE_COMPARE
        } else if !needs_pwm {
            SeqValue::ACTIVE_COMPARE
        } else {
            self.timebase.check_and_set(
                ch,
                period_cycles,
                &self.sequence,
                self.config.count_mode,
                &mut self.timer,
            )?;
            (pulse_cycles >> self.timebase.prescaler) as u16
        };

        // A constant output is held by the pin once the timer stops driving it, so
        // set the pin level to match.
        if !needs_pwm {
            if let Some(pin) = self.pins[ch].as_mut() {
                let level = (pulse_cycles != 0) ^ inverted;
                pin.set_state(PinState::from(level)).map_err(|_| Error::Pin)?;
            }
        }

        self.sequence.set(ch, SeqValue::new(compare, inverted));

        debug!(
            "channel {=u32}, pulse {=u32}, period {=u32}, prescaler: {=u8}",
            channel,
            pulse_cycles,
            period_cycles,
            self.timebase.prescaler
        );

        if playback {
            self.timer.simple_playback(self.sequence.raw(), 1);
            self.state = PlaybackState::Running;
        } else if self.timer.stop(false) {
            self.state = PlaybackState::Stopped;
        } else {
            // Completed by the wait above, on the next update that plays back.
            self.state = PlaybackState::StopPending;
        }

        Ok(())
    }

    /// Like `set_cycles`, with durations in nanoseconds.
    pub fn set_nanos(&mut self, channel: u32, period_ns: u32, pulse_ns: u32, polarity: Polarity) -> Result<()> {
        let cycles_per_sec = self.cycles_per_sec();

        let (Some(period_cycles), Some(pulse_cycles)) = (
            nanos_to_cycles(period_ns, cycles_per_sec),
            nanos_to_cycles(pulse_ns, cycles_per_sec),
        ) else {
            warn!("Period {=u32} ns out of range", period_ns);
            return Err(Error::NotSupported);
        };

        self.set_cycles(channel, period_cycles, pulse_cycles, polarity)
    }

    /// A handle to one channel, with a fixed period, that implements Embedded-HAL's
    /// `SetDutyCycle`.
    pub fn channel(&mut self, channel: u32, period_cycles: u32, polarity: Polarity) -> Result<PwmChannel<'_, T, P, C>> {
        if channel as usize >= CHANNEL_COUNT {
            return Err(Error::InvalidChannel);
        }
        Ok(PwmChannel::new(self, channel, period_cycles, polarity))
    }

    /// Clock rate the cycle counts passed to `set_cycles` are measured in. This
    /// doesn't depend on the prescaler currently in use; pulse and period are
    /// prescaled inside `set_cycles`.
    pub fn cycles_per_sec(&self) -> u64 {
        CYCLES_PER_SEC
    }

    pub fn timebase(&self) -> TimeBase {
        self.timebase
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.state
    }

    /// Polarity each channel was seeded with at the last `init()`.
    pub fn initially_inverted(&self) -> [bool; CHANNEL_COUNT] {
        self.initially_inverted
    }

    pub fn config(&self) -> &PwmConfig {
        &self.config
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Release the peripheral, pin controller and pins. Doesn't deinitialize
    /// anything.
    pub fn free(self) -> (T, C, [Option<P>; CHANNEL_COUNT]) {
        (self.timer, self.pinctrl, self.pins)
    }

    fn wait_stopped(&self) -> Result<()> {
        bounded_loop!(!self.timer.is_stopped(), Error::HardwareTimeout);
        Ok(())
    }

    fn apply_pin_state(&mut self, state: PinCtrlState) -> Result<()> {
        self.pinctrl.apply_state(state).map_err(|_| {
            error!("Failed to apply pin state {}", state);
            Error::PinCtrl
        })
    }
}
