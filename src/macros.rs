//! Internal logging macros. With the `defmt` feature these forward to the `defmt`
//! macros of the same name; without it, arguments are borrowed and discarded so
//! call sites compile identically in both configurations.

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(not(feature = "defmt"))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(not(feature = "defmt"))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::error!($s $(, $x)*);
            #[cfg(not(feature = "defmt"))]
            let _ = ($( & $x ),*);
        }
    };
}

/// Poll `$cond` until it is false, giving up after `MAX_ITERS` polls.
///
/// Example: `bounded_loop!(!self.timer.is_stopped(), Error::HardwareTimeout);`
macro_rules! bounded_loop {
    ($cond:expr, $err:expr $(,)?) => {{
        let mut i = 0;
        while $cond {
            i += 1;
            if i >= $crate::util::MAX_ITERS {
                return Err($err);
            }
            $crate::util::relax();
        }
    }};
}
