pub mod register;
mod sequencer;

use crate::domain::Measurement;
use crate::error::Error;
use crate::storage::InstanceStorage;
use crate::traits::bus::{IoError, RegisterBus};
use crate::traits::timer::OneShotTimer;
use crate::traits::Token;
use sequencer::{Action, ReadStep, Sequencer, Setting, WriteStep};

pub use register::calibration::{Calibration, PressureCalibration, TemperatureCalibration};
pub use register::config::{FilterCoefficient, Spi3Wire, StandbyTime};
pub use register::ctrl_meas::{
    max_measurement_time_us, measurement_time_ms, Oversampling, PowerMode,
};
pub use register::data::MeasurementKind;
pub use register::id::CHIP_ID;
pub use register::status::Status;
pub use sequencer::Completion;

/// Value delivered with a successful command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    ChipId(u8),
    Measurement(Measurement),
    Status(Status),
    /// The command has no value to deliver.
    Done,
}

/// Receives the outcome of a command, exactly once, after its last step.
///
/// The driver is idle again by the time `notify` runs. The notification is delivered from within
/// [`Bmp280::complete`], so a new command cannot be issued from inside it; the integration layer
/// issues it once `complete` has returned.
pub trait Notify {
    fn notify(&self, outcome: Result<Response, Error>);
}

impl<F> Notify for F
where
    F: Fn(Result<Response, Error>),
{
    fn notify(&self, outcome: Result<Response, Error>) {
        self(outcome)
    }
}

/// A BMP280 bound to its register bus and timer.
///
/// Each command checks its arguments and preconditions, then issues its first step and returns.
/// At most one command is in flight; further commands return [`Error::Busy`] without touching the
/// bus until the outstanding one has notified its outcome. There is no timeout: a step that is
/// never completed keeps the instance busy.
pub struct Bmp280<'a, B, T>
where
    B: RegisterBus,
    T: OneShotTimer,
{
    sequencer: Sequencer<'a, B, T>,
    calibration: Option<Calibration>,
}

impl<'a, B, T> Bmp280<'a, B, T>
where
    B: RegisterBus,
    T: OneShotTimer,
{
    pub fn new(bus: B, timer: T) -> Self {
        Self {
            sequencer: Sequencer::new(bus, timer),
            calibration: None,
        }
    }

    /// Place a new instance into `storage`.
    pub fn create<'s, S>(storage: S, bus: B, timer: T) -> Result<&'s mut Self, Error>
    where
        S: InstanceStorage<'s, Self>,
    {
        match storage.acquire(Self::new(bus, timer)) {
            Some(sensor) => Ok(sensor),
            None => {
                warn!("no storage available for bmp280 instance");
                Err(Error::NoMemory)
            }
        }
    }

    /// Read the chip identifier, delivered as [`Response::ChipId`].
    pub fn read_identifier(&mut self, notify: Option<&'a dyn Notify>) -> Result<(), Error> {
        debug!("read identifier");
        self.sequencer.begin(Action::Read(ReadStep::ChipId), notify)
    }

    /// Soft-reset the sensor and wait for it to come back up.
    pub fn reset_with_delay(&mut self, notify: Option<&'a dyn Notify>) -> Result<(), Error> {
        debug!("reset");
        self.sequencer.begin(Action::Write(WriteStep::Reset), notify)
    }

    /// Read the factory calibration. Required before any measurement.
    pub fn init_calibration(&mut self, notify: Option<&'a dyn Notify>) -> Result<(), Error> {
        debug!("read calibration");
        self.sequencer.begin(Action::Read(ReadStep::Calibration), notify)
    }

    /// Trigger one forced-mode conversion, wait `wait_ms` and read back the compensated result as
    /// [`Response::Measurement`].
    ///
    /// `wait_ms` has to cover the conversion time of the configured oversampling, see
    /// [`measurement_time_ms`].
    pub fn read_measurement_forced(
        &mut self,
        kind: MeasurementKind,
        wait_ms: u32,
        notify: Option<&'a dyn Notify>,
    ) -> Result<(), Error> {
        if wait_ms == 0 {
            return Err(Error::InvalidArgument);
        }
        if self.calibration.is_none() {
            debug!("measurement requested before calibration");
            return Err(Error::InvalidUsage);
        }
        debug!("forced measurement {:?}, wait {} ms", kind, wait_ms);
        self.sequencer
            .begin(Action::Read(ReadStep::CtrlMeas { kind, wait_ms }), notify)
    }

    pub fn set_temperature_oversampling(
        &mut self,
        oversampling: Oversampling,
        notify: Option<&'a dyn Notify>,
    ) -> Result<(), Error> {
        self.update(Setting::TemperatureOversampling(oversampling), notify)
    }

    pub fn set_pressure_oversampling(
        &mut self,
        oversampling: Oversampling,
        notify: Option<&'a dyn Notify>,
    ) -> Result<(), Error> {
        self.update(Setting::PressureOversampling(oversampling), notify)
    }

    pub fn set_filter_coefficient(
        &mut self,
        filter: FilterCoefficient,
        notify: Option<&'a dyn Notify>,
    ) -> Result<(), Error> {
        self.update(Setting::Filter(filter), notify)
    }

    /// Enable or disable the 3-wire SPI interface.
    pub fn set_spi_3_wire(
        &mut self,
        mode: Spi3Wire,
        notify: Option<&'a dyn Notify>,
    ) -> Result<(), Error> {
        self.update(Setting::Spi3Wire(mode), notify)
    }

    pub fn set_power_mode(
        &mut self,
        mode: PowerMode,
        notify: Option<&'a dyn Notify>,
    ) -> Result<(), Error> {
        self.update(Setting::PowerMode(mode), notify)
    }

    /// Standby period between conversions in normal mode.
    pub fn set_standby_time(
        &mut self,
        standby: StandbyTime,
        notify: Option<&'a dyn Notify>,
    ) -> Result<(), Error> {
        self.update(Setting::StandbyTime(standby), notify)
    }

    /// Read the status register, delivered as [`Response::Status`].
    pub fn read_status(&mut self, notify: Option<&'a dyn Notify>) -> Result<(), Error> {
        debug!("read status");
        self.sequencer.begin(Action::Read(ReadStep::Status), notify)
    }

    fn update(&mut self, setting: Setting, notify: Option<&'a dyn Notify>) -> Result<(), Error> {
        debug!("update {:?}", setting);
        self.sequencer
            .begin(Action::Read(ReadStep::Update(setting)), notify)
    }

    /// Report the completion of the step that was issued with `token`.
    ///
    /// Returns [`Error::Driver`] if no step with this token and kind is outstanding, in which case
    /// nothing changes.
    pub fn complete(&mut self, token: Token, completion: Completion<'_>) -> Result<(), Error> {
        self.sequencer
            .complete(token, completion, &mut self.calibration)
    }

    pub fn read_complete(
        &mut self,
        token: Token,
        result: Result<&[u8], IoError>,
    ) -> Result<(), Error> {
        self.complete(token, Completion::Read(result))
    }

    pub fn write_complete(&mut self, token: Token, result: Result<(), IoError>) -> Result<(), Error> {
        self.complete(token, Completion::Write(result))
    }

    pub fn timer_expired(&mut self, token: Token) -> Result<(), Error> {
        self.complete(token, Completion::TimerExpired)
    }

    pub fn is_busy(&self) -> bool {
        self.sequencer.is_busy()
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_some()
    }

    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }
}
