use super::register::calibration::{Calibration, CALIBRATION, CALIBRATION_LEN};
use super::register::config::{FilterCoefficient, Spi3Wire, StandbyTime, CONFIG, FILTER, SPI3W_EN, T_SB};
use super::register::ctrl_meas::{Oversampling, PowerMode, CTRL_MEAS, MODE, OSRS_P, OSRS_T};
use super::register::data::{self, MeasurementKind};
use super::register::id::ID;
use super::register::reset::{POWER_UP_DELAY_MS, RESET, RESET_MAGIC};
use super::register::status::STATUS;
use super::{Notify, Response};
use crate::error::Error;
use crate::traits::bus::{IoError, RegisterBus};
use crate::traits::timer::OneShotTimer;
use crate::traits::Token;
use core::convert::TryFrom;
use heapless::Vec;

/// A register field changed by read-modify-write.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum Setting {
    TemperatureOversampling(Oversampling),
    PressureOversampling(Oversampling),
    PowerMode(PowerMode),
    Filter(FilterCoefficient),
    StandbyTime(StandbyTime),
    Spi3Wire(Spi3Wire),
}

impl Setting {
    pub(crate) fn register(&self) -> u8 {
        match self {
            Setting::TemperatureOversampling(_)
            | Setting::PressureOversampling(_)
            | Setting::PowerMode(_) => CTRL_MEAS,
            Setting::Filter(_) | Setting::StandbyTime(_) | Setting::Spi3Wire(_) => CONFIG,
        }
    }

    /// `reg` with the setting's field replaced.
    pub(crate) fn apply(&self, reg: u8) -> u8 {
        match *self {
            Setting::TemperatureOversampling(os) => OSRS_T.insert(reg, os.into()),
            Setting::PressureOversampling(os) => OSRS_P.insert(reg, os.into()),
            Setting::PowerMode(mode) => MODE.insert(reg, mode.into()),
            Setting::Filter(filter) => FILTER.insert(reg, filter.into()),
            Setting::StandbyTime(t_sb) => T_SB.insert(reg, t_sb.into()),
            Setting::Spi3Wire(mode) => SPI3W_EN.insert(reg, mode.into()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum ReadStep {
    ChipId,
    Calibration,
    /// ctrl_meas, before switching to forced mode
    CtrlMeas { kind: MeasurementKind, wait_ms: u32 },
    Measurement { kind: MeasurementKind },
    Update(Setting),
    Status,
}

impl ReadStep {
    pub(crate) fn address(&self) -> u8 {
        match self {
            ReadStep::ChipId => ID,
            ReadStep::Calibration => CALIBRATION,
            ReadStep::CtrlMeas { .. } => CTRL_MEAS,
            ReadStep::Measurement { kind } => kind.start(),
            ReadStep::Update(setting) => setting.register(),
            ReadStep::Status => STATUS,
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            ReadStep::Calibration => CALIBRATION_LEN,
            ReadStep::Measurement { kind } => kind.len(),
            _ => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum WriteStep {
    Reset,
    ForcedMode {
        value: u8,
        kind: MeasurementKind,
        wait_ms: u32,
    },
    Update {
        address: u8,
        value: u8,
    },
}

impl WriteStep {
    pub(crate) fn address(&self) -> u8 {
        match self {
            WriteStep::Reset => RESET,
            WriteStep::ForcedMode { .. } => CTRL_MEAS,
            WriteStep::Update { address, .. } => *address,
        }
    }

    pub(crate) fn value(&self) -> u8 {
        match self {
            WriteStep::Reset => RESET_MAGIC,
            WriteStep::ForcedMode { value, .. } | WriteStep::Update { value, .. } => *value,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum TimerStep {
    PowerUp,
    Conversion { kind: MeasurementKind },
}

/// What the sequencer does next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Read(ReadStep),
    Write(WriteStep),
    Wait { step: TimerStep, duration_ms: u32 },
    Finish(Result<Response, Error>),
}

/// Result of one step, as reported by the integration layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Completion<'d> {
    /// Bytes read by [`RegisterBus::read_registers`].
    Read(Result<&'d [u8], IoError>),
    /// Outcome of [`RegisterBus::write_register`].
    Write(Result<(), IoError>),
    /// The timer started by [`OneShotTimer::start`] fired.
    TimerExpired,
}

pub(crate) struct Pending<'a, S> {
    step: S,
    token: Token,
    notify: Option<&'a dyn Notify>,
}

pub(crate) enum State<'a> {
    Idle,
    AwaitingRead(Pending<'a, ReadStep>),
    AwaitingWrite(Pending<'a, WriteStep>),
    AwaitingTimer(Pending<'a, TimerStep>),
}

/// Runs one command at a time as a chain of asynchronous steps.
pub(crate) struct Sequencer<'a, B, T>
where
    B: RegisterBus,
    T: OneShotTimer,
{
    bus: B,
    timer: T,
    state: State<'a>,
    token: Token,
    scratch: Vec<u8, CALIBRATION_LEN>,
}

impl<'a, B, T> Sequencer<'a, B, T>
where
    B: RegisterBus,
    T: OneShotTimer,
{
    pub(crate) fn new(bus: B, timer: T) -> Self {
        Self {
            bus,
            timer,
            state: State::Idle,
            token: Token::new(0),
            scratch: Vec::new(),
        }
    }

    pub(crate) fn is_busy(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    /// Start a sequence with its first step, unless another one is in flight.
    pub(crate) fn begin(
        &mut self,
        first: Action,
        notify: Option<&'a dyn Notify>,
    ) -> Result<(), Error> {
        if self.is_busy() {
            debug!("rejecting command, sequence in flight");
            return Err(Error::Busy);
        }
        self.scratch.clear();
        self.run(first, notify);
        Ok(())
    }

    /// Advance the sequence with the completion of the step identified by `token`.
    ///
    /// A completion that does not belong to the outstanding step is rejected and leaves the
    /// sequence untouched.
    pub(crate) fn complete(
        &mut self,
        token: Token,
        completion: Completion<'_>,
        calibration: &mut Option<Calibration>,
    ) -> Result<(), Error> {
        let state = core::mem::replace(&mut self.state, State::Idle);
        let (next, notify) = match (state, completion) {
            (State::AwaitingRead(pending), Completion::Read(result)) if pending.token == token => {
                trace!("read {:?} complete", pending.step);
                (
                    self.on_read(pending.step, result, calibration),
                    pending.notify,
                )
            }
            (State::AwaitingWrite(pending), Completion::Write(result))
                if pending.token == token =>
            {
                trace!("write {:?} complete", pending.step);
                (on_write(pending.step, result), pending.notify)
            }
            (State::AwaitingTimer(pending), Completion::TimerExpired) if pending.token == token => {
                trace!("timer {:?} expired", pending.step);
                (on_timer(pending.step), pending.notify)
            }
            (state, _) => {
                warn!("rejecting completion for token {}", token.value());
                self.state = state;
                return Err(Error::Driver);
            }
        };
        self.run(next, notify);
        Ok(())
    }

    fn run(&mut self, action: Action, notify: Option<&'a dyn Notify>) {
        match action {
            Action::Read(step) => {
                let token = self.issue();
                trace!("read {} bytes at 0x{:x}", step.len(), step.address());
                self.state = State::AwaitingRead(Pending {
                    step,
                    token,
                    notify,
                });
                self.bus.read_registers(step.address(), step.len(), token);
            }
            Action::Write(step) => {
                let token = self.issue();
                trace!("write 0x{:x} to 0x{:x}", step.value(), step.address());
                self.state = State::AwaitingWrite(Pending {
                    step,
                    token,
                    notify,
                });
                self.bus.write_register(step.address(), step.value(), token);
            }
            Action::Wait { step, duration_ms } => {
                let token = self.issue();
                trace!("wait {} ms", duration_ms);
                self.state = State::AwaitingTimer(Pending {
                    step,
                    token,
                    notify,
                });
                self.timer.start(duration_ms, token);
            }
            Action::Finish(outcome) => {
                self.state = State::Idle;
                if let Err(e) = &outcome {
                    warn!("sequence aborted: {:?}", e);
                }
                if let Some(notify) = notify {
                    notify.notify(outcome);
                }
            }
        }
    }

    fn issue(&mut self) -> Token {
        self.token = self.token.next();
        self.token
    }

    fn on_read(
        &mut self,
        step: ReadStep,
        result: Result<&[u8], IoError>,
        calibration: &mut Option<Calibration>,
    ) -> Action {
        let bytes = match result {
            Ok(bytes) => bytes,
            Err(IoError) => return Action::Finish(Err(Error::Io)),
        };
        if bytes.len() != step.len() {
            warn!("read {} bytes, expected {}", bytes.len(), step.len());
            return Action::Finish(Err(Error::Io));
        }
        self.scratch.clear();
        if self.scratch.extend_from_slice(bytes).is_err() {
            return Action::Finish(Err(Error::Io));
        }

        match (step, self.scratch.as_slice()) {
            (ReadStep::ChipId, [id]) => Action::Finish(Ok(Response::ChipId(*id))),
            (ReadStep::Calibration, block) => match <[u8; CALIBRATION_LEN]>::try_from(block) {
                Ok(block) => {
                    let parsed = Calibration::from(block);
                    debug!("calibration: {:?}", parsed);
                    calibration.replace(parsed);
                    Action::Finish(Ok(Response::Done))
                }
                Err(_) => Action::Finish(Err(Error::Driver)),
            },
            (ReadStep::CtrlMeas { kind, wait_ms }, [reg]) => Action::Write(WriteStep::ForcedMode {
                value: MODE.insert(*reg, PowerMode::Forced.into()),
                kind,
                wait_ms,
            }),
            (ReadStep::Measurement { kind }, bytes) => {
                match (calibration.as_ref(), data::split(kind, bytes)) {
                    (Some(calibration), Some((adc_t, adc_p))) => Action::Finish(Ok(
                        Response::Measurement(calibration.compensate(adc_t, adc_p)),
                    )),
                    _ => Action::Finish(Err(Error::Driver)),
                }
            }
            (ReadStep::Update(setting), [reg]) => Action::Write(WriteStep::Update {
                address: setting.register(),
                value: setting.apply(*reg),
            }),
            (ReadStep::Status, [reg]) => Action::Finish(Ok(Response::Status((*reg).into()))),
            _ => Action::Finish(Err(Error::Driver)),
        }
    }
}

fn on_write(step: WriteStep, result: Result<(), IoError>) -> Action {
    if result.is_err() {
        return Action::Finish(Err(Error::Io));
    }
    match step {
        WriteStep::Reset => Action::Wait {
            step: TimerStep::PowerUp,
            duration_ms: POWER_UP_DELAY_MS,
        },
        WriteStep::ForcedMode { kind, wait_ms, .. } => Action::Wait {
            step: TimerStep::Conversion { kind },
            duration_ms: wait_ms,
        },
        WriteStep::Update { .. } => Action::Finish(Ok(Response::Done)),
    }
}

fn on_timer(step: TimerStep) -> Action {
    match step {
        TimerStep::PowerUp => Action::Finish(Ok(Response::Done)),
        TimerStep::Conversion { kind } => Action::Read(ReadStep::Measurement { kind }),
    }
}
