//! Encoding of a channel's compare word, as the peripheral reads it from the
//! playback sequence: a 15-bit compare value in bits 0..=14, and the output
//! polarity in bit 15.
//!
//! Bit 15 set means the channel is *not* inverted: the output starts each period
//! at its active level and falls on the compare match. Cleared, it's the other
//! way around. A pin idling high is therefore read back as inverted at init.

/// Bit 15: set for normal polarity, clear for inverted.
pub const POLARITY_MASK: u16 = 1 << 15;
/// Bits 0..=14.
pub const COMPARE_MASK: u16 = 0x7FFF;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// One channel's entry in the playback sequence.
pub struct SeqValue(u16);

impl SeqValue {
    /// Compare value that keeps the output at its inactive level.
    pub const INACTIVE_COMPARE: u16 = 0;
    /// Compare value that keeps the output at its active level. It's always at
    /// least the countertop, so the compare never matches.
    pub const ACTIVE_COMPARE: u16 = COMPARE_MASK;

    /// Encode a compare value and polarity. Compare values past 15 bits saturate to
    /// `ACTIVE_COMPARE`.
    pub const fn new(compare: u16, inverted: bool) -> Self {
        let compare = if compare > COMPARE_MASK {
            COMPARE_MASK
        } else {
            compare
        };
        let polarity = if inverted { 0 } else { POLARITY_MASK };
        Self(compare | polarity)
    }

    /// Constant inactive output.
    pub const fn inactive(inverted: bool) -> Self {
        Self::new(Self::INACTIVE_COMPARE, inverted)
    }

    /// Constant active output.
    pub const fn active(inverted: bool) -> Self {
        Self::new(Self::ACTIVE_COMPARE, inverted)
    }

    /// Wrap a word as read from a sequence buffer.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// The word written to the sequence buffer.
    pub const fn raw(&self) -> u16 {
        self.0
    }

    pub const fn compare(&self) -> u16 {
        self.0 & COMPARE_MASK
    }

    pub const fn is_inverted(&self) -> bool {
        self.0 & POLARITY_MASK == 0
    }

    /// Decode into the compare value and inversion flag.
    pub const fn decode(&self) -> (u16, bool) {
        (self.compare(), self.is_inverted())
    }

    /// Whether this output has to be generated by the timer, as opposed to being
    /// held at a constant level.
    pub const fn needs_pwm(&self) -> bool {
        let compare = self.compare();
        compare != Self::INACTIVE_COMPARE && compare != Self::ACTIVE_COMPARE
    }
}

impl From<SeqValue> for u16 {
    fn from(value: SeqValue) -> Self {
        value.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_bit() {
        assert_eq!(SeqValue::new(500, false).raw(), 0x8000 | 500);
        assert_eq!(SeqValue::new(500, true).raw(), 500);
        assert_eq!(SeqValue::inactive(false).raw(), 0x8000);
        assert_eq!(SeqValue::inactive(true).raw(), 0);
        assert_eq!(SeqValue::active(false).raw(), 0xFFFF);
        assert_eq!(SeqValue::active(true).raw(), 0x7FFF);
    }

    #[test]
    fn decodes_what_was_encoded() {
        for compare in [0, 1, 2, 500, 0x4000, 0x7FFE, 0x7FFF] {
            for inverted in [false, true] {
                assert_eq!(SeqValue::new(compare, inverted).decode(), (compare, inverted));
            }
        }
    }

    #[test]
    fn oversized_compare_saturates() {
        assert_eq!(SeqValue::new(0x8000, false), SeqValue::active(false));
        assert_eq!(SeqValue::new(u16::MAX, true), SeqValue::active(true));
    }

    #[test]
    fn only_sentinels_are_static() {
        for inverted in [false, true] {
            assert!(!SeqValue::inactive(inverted).needs_pwm());
            assert!(!SeqValue::active(inverted).needs_pwm());
            assert!(SeqValue::new(1, inverted).needs_pwm());
            assert!(SeqValue::new(0x7FFE, inverted).needs_pwm());
        }
        // The polarity bit alone doesn't make a channel need the timer.
        assert!(!SeqValue::from_raw(POLARITY_MASK).needs_pwm());
        assert!(!SeqValue::default().needs_pwm());
    }
}
