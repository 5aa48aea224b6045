//! A single channel of a `Pwm`, with a fixed period, exposed through Embedded-HAL's
//! `SetDutyCycle`.

use embedded_hal::{
    digital::StatefulOutputPin,
    pwm::{ErrorType, SetDutyCycle},
};

use crate::{
    config::Polarity,
    error::Error,
    pwm::Pwm,
    traits::{PinCtrl, PwmTimer},
    util::scale_duty,
};

/// Borrows the `Pwm` it came from; see `Pwm::channel()`.
pub struct PwmChannel<'a, T, P, C> {
    pwm: &'a mut Pwm<T, P, C>,
    channel: u32,
    period_cycles: u32,
    polarity: Polarity,
}

impl<'a, T, P, C> PwmChannel<'a, T, P, C>
where
    T: PwmTimer,
    P: StatefulOutputPin,
    C: PinCtrl,
{
    pub(crate) fn new(pwm: &'a mut Pwm<T, P, C>, channel: u32, period_cycles: u32, polarity: Polarity) -> Self {
        Self {
            pwm,
            channel,
            period_cycles,
            polarity,
        }
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }

    pub fn period_cycles(&self) -> u32 {
        self.period_cycles
    }

    /// Takes effect on the next duty cycle update.
    pub fn set_period_cycles(&mut self, period_cycles: u32) {
        self.period_cycles = period_cycles;
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Takes effect on the next duty cycle update.
    pub fn set_polarity(&mut self, polarity: Polarity) {
        self.polarity = polarity;
    }
}

impl<T, P, C> ErrorType for PwmChannel<'_, T, P, C> {
    type Error = Error;
}

impl<T, P, C> SetDutyCycle for PwmChannel<'_, T, P, C>
where
    T: PwmTimer,
    P: StatefulOutputPin,
    C: PinCtrl,
{
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let pulse_cycles = scale_duty(self.period_cycles, duty, u16::MAX);
        self.pwm
            .set_cycles(self.channel, self.period_cycles, pulse_cycles, self.polarity)
    }
}
