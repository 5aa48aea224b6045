//! Common error definitions.

use core::fmt;

/// Alias for Result<T, Error>.
pub type Result<T> = core::result::Result<T, Error>;

/// Collection of all errors that can occur.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The channel index is outside `0..CHANNEL_COUNT`.
    InvalidChannel,
    /// The requested period differs from the one currently set, and another channel
    /// is being driven by the timer with that period.
    IncompatiblePeriod,
    /// No prescaler brings the requested period into countertop range.
    PeriodTooLong,
    /// The PWM peripheral failed to initialize.
    InitFailed,
    /// A pin control state (default or sleep) couldn't be applied.
    PinCtrl,
    /// Reading or writing a channel's output pin failed.
    Pin,
    /// Occurs when the peripheral doesn't confirm it stopped in time.
    ///
    /// This is returned when a bounded loop exceeds its allotted iteration count.
    HardwareTimeout,
    /// The operation, or a value it was given, isn't supported.
    NotSupported,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChannel => write!(f, "invalid channel"),
            Self::IncompatiblePeriod => write!(f, "period incompatible with an active channel"),
            Self::PeriodTooLong => write!(f, "no prescaler fits the period"),
            Self::InitFailed => write!(f, "peripheral initialization failed"),
            Self::PinCtrl => write!(f, "pin control state not applied"),
            Self::Pin => write!(f, "output pin access failed"),
            Self::HardwareTimeout => write!(f, "peripheral did not stop in time"),
            Self::NotSupported => write!(f, "not supported"),
        }
    }
}

impl core::error::Error for Error {}

mod embedded_hal_impl {
    use embedded_hal::pwm::{Error as PwmEhError, ErrorKind as PwmErrorKind};

    use super::Error;

    impl PwmEhError for Error {
        fn kind(&self) -> PwmErrorKind {
            // Embedded-HAL doesn't define any PWM error kinds beyond `Other`.
            PwmErrorKind::Other
        }
    }
}
