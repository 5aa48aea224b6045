//! Test doubles for the platform services the driver uses. Each double shares its
//! state through an `Rc`, so tests can inspect it while the driver owns the double.

#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin, StatefulOutputPin};
use shared_pwm::{
    ChannelConfig, CounterMode, Error, PinCtrl, PinCtrlState, Pwm, PwmConfig, PwmTimer,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Init,
    Deinit,
    Configure {
        prescaler: u8,
        mode: CounterMode,
        countertop: u16,
    },
    /// `stop_in_progress` is true if the hardware would have ignored this request.
    Playback {
        values: Vec<u16>,
        count: u16,
        stop_in_progress: bool,
    },
    Stop {
        wait: bool,
    },
}

#[derive(Debug, Default)]
pub struct TimerState {
    pub calls: Vec<Call>,
    pub running: bool,
    pub stop_in_progress: bool,
    /// `is_stopped()` polls that report false after a stop request, before it
    /// completes.
    pub stop_latency: u32,
    pub polls_left: u32,
    pub is_stopped_polls: u32,
    pub never_stops: bool,
    pub fail_init: bool,
}

impl TimerState {
    pub fn playbacks(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Playback { .. }))
            .collect()
    }

    pub fn configures(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Configure { .. }))
            .collect()
    }

    pub fn stops(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Stop { .. }))
            .count()
    }
}

pub struct MockTimer {
    pub state: Rc<RefCell<TimerState>>,
}

impl PwmTimer for MockTimer {
    fn init(&mut self, _config: &PwmConfig) -> shared_pwm::Result<()> {
        let mut s = self.state.borrow_mut();
        if s.fail_init {
            return Err(Error::InitFailed);
        }
        s.calls.push(Call::Init);
        Ok(())
    }

    fn deinit(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Deinit);
        s.running = false;
        s.stop_in_progress = false;
    }

    fn configure(&mut self, prescaler: u8, mode: CounterMode, countertop: u16) {
        self.state.borrow_mut().calls.push(Call::Configure {
            prescaler,
            mode,
            countertop,
        });
    }

    fn simple_playback(&mut self, values: &[u16], playback_count: u16) {
        let mut s = self.state.borrow_mut();
        let stop_in_progress = s.stop_in_progress;
        s.calls.push(Call::Playback {
            values: values.to_vec(),
            count: playback_count,
            stop_in_progress,
        });
        if !stop_in_progress {
            s.running = true;
        }
    }

    fn stop(&mut self, wait: bool) -> bool {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Stop { wait });
        if s.running {
            s.running = false;
            s.stop_in_progress = true;
            s.polls_left = s.stop_latency;
        }
        if wait && !s.never_stops {
            s.stop_in_progress = false;
        }
        !s.stop_in_progress
    }

    fn is_stopped(&self) -> bool {
        let mut s = self.state.borrow_mut();
        s.is_stopped_polls += 1;
        if !s.stop_in_progress {
            return !s.running;
        }
        if s.never_stops {
            return false;
        }
        if s.polls_left == 0 {
            s.stop_in_progress = false;
            true
        } else {
            s.polls_left -= 1;
            false
        }
    }
}

#[derive(Debug)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// An output pin; `level` is the driven output level.
pub struct MockPin {
    pub level: Rc<Cell<bool>>,
    pub faulty: Rc<Cell<bool>>,
}

impl ErrorType for MockPin {
    type Error = PinFault;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.faulty.get() {
            return Err(PinFault);
        }
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.faulty.get() {
            return Err(PinFault);
        }
        self.level.set(true);
        Ok(())
    }
}

impl StatefulOutputPin for MockPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        if self.faulty.get() {
            return Err(PinFault);
        }
        Ok(self.level.get())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.is_set_high().map(|high| !high)
    }
}

#[derive(Default)]
pub struct PinCtrlLog {
    pub applied: Vec<PinCtrlState>,
    pub fail_on: Option<PinCtrlState>,
}

pub struct MockPinCtrl {
    pub state: Rc<RefCell<PinCtrlLog>>,
}

impl PinCtrl for MockPinCtrl {
    type Error = ();

    fn apply_state(&mut self, state: PinCtrlState) -> Result<(), Self::Error> {
        let mut s = self.state.borrow_mut();
        if s.fail_on == Some(state) {
            return Err(());
        }
        s.applied.push(state);
        Ok(())
    }
}

pub type TestPwm = Pwm<MockTimer, MockPin, MockPinCtrl>;

/// Handles on the doubles owned by a `TestPwm`.
pub struct Rig {
    pub timer: Rc<RefCell<TimerState>>,
    pub pinctrl: Rc<RefCell<PinCtrlLog>>,
    /// Output level of each channel's pin; `None` for unrouted channels.
    pub pins: [Option<Rc<Cell<bool>>>; 4],
    pub pin_faulty: Rc<Cell<bool>>,
}

impl Rig {
    pub fn pin(&self, channel: usize) -> bool {
        self.pins[channel].as_ref().expect("channel has a pin").get()
    }

    pub fn clear_calls(&self) {
        self.timer.borrow_mut().calls.clear();
    }
}

/// Build a driver whose channels have pins with the given initial output levels,
/// without initializing it.
pub fn build(config: PwmConfig, pin_levels: [Option<bool>; 4], inverted: [bool; 4]) -> (TestPwm, Rig) {
    let timer = Rc::new(RefCell::new(TimerState::default()));
    let pinctrl = Rc::new(RefCell::new(PinCtrlLog::default()));
    let pin_faulty = Rc::new(Cell::new(false));

    let pins: [Option<Rc<Cell<bool>>>; 4] = pin_levels.map(|l| l.map(|l| Rc::new(Cell::new(l))));

    let channels: [ChannelConfig<MockPin>; 4] = std::array::from_fn(|i| ChannelConfig {
        pin: pins[i].as_ref().map(|level| MockPin {
            level: level.clone(),
            faulty: pin_faulty.clone(),
        }),
        inverted: inverted[i],
    });

    let pwm = Pwm::new(
        MockTimer {
            state: timer.clone(),
        },
        MockPinCtrl {
            state: pinctrl.clone(),
        },
        channels,
        config,
    );

    (
        pwm,
        Rig {
            timer,
            pinctrl,
            pins,
            pin_faulty,
        },
    )
}

/// An initialized driver with a low pin on every channel, in `Up` mode.
pub fn setup() -> (TestPwm, Rig) {
    let (mut pwm, rig) = build(PwmConfig::default(), [Some(false); 4], [false; 4]);
    pwm.init().unwrap();
    rig.clear_calls();
    (pwm, rig)
}
