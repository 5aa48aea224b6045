//! The playback sequence: one compare word per channel, in the order the
//! peripheral loads them in `Individual` load mode. Also answers which channels
//! currently need the timer.

use crate::{CHANNEL_COUNT, seq_value::SeqValue};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sequence {
    values: [u16; CHANNEL_COUNT],
}

impl Sequence {
    /// Every channel constantly inactive, with the given polarities.
    pub fn all_inactive(inverted: [bool; CHANNEL_COUNT]) -> Self {
        Self {
            values: inverted.map(|inv| SeqValue::inactive(inv).raw()),
        }
    }

    /// Panics if `channel >= CHANNEL_COUNT`.
    pub fn get(&self, channel: usize) -> SeqValue {
        SeqValue::from_raw(self.values[channel])
    }

    /// Panics if `channel >= CHANNEL_COUNT`.
    pub fn set(&mut self, channel: usize, value: SeqValue) {
        self.values[channel] = value.raw();
    }

    /// Words as handed to the peripheral for playback.
    pub fn raw(&self) -> &[u16; CHANNEL_COUNT] {
        &self.values
    }

    pub fn channel_needs_pwm(&self, channel: usize) -> bool {
        self.get(channel).needs_pwm()
    }

    /// Whether a channel other than `channel` is driven by the timer. Such a
    /// channel pins the timing base, and keeps the timer running.
    pub fn any_other_channel_needs_pwm(&self, channel: usize) -> bool {
        (0..CHANNEL_COUNT).any(|i| i != channel && self.channel_needs_pwm(i))
    }

    pub fn any_channel_needs_pwm(&self) -> bool {
        (0..CHANNEL_COUNT).any(|i| self.channel_needs_pwm(i))
    }
}
