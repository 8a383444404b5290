#![macro_use]
#![cfg_attr(not(any(test, feature = "std")), no_std)]
//! A non-blocking driver core for the Bosch BMP280 pressure and temperature sensor.
//!
//! The driver never blocks and never owns the bus. Each public command is a short chain of
//! register reads, register writes and timer waits. The driver issues one step through the
//! injected [`RegisterBus`](traits::bus::RegisterBus) or [`OneShotTimer`](traits::timer::OneShotTimer),
//! returns, and continues only when the integration layer reports the step finished through
//! [`Bmp280::complete`](drivers::sensors::bmp280::Bmp280::complete).
//!
//! # Execution context
//!
//! Completions must be reported from the same execution context that issues commands. The driver
//! performs no locking. An interrupt handler that finishes a transfer has to defer the report into
//! the thread or task that owns the driver.
//!
//! Failed steps are not retried and in-flight commands cannot be cancelled. A collaborator that
//! never reports completion leaves the instance busy.
//!
//! # Example
//!
//! ```ignore
//! use bmp280_async::drivers::sensors::bmp280::*;
//!
//! let on_calibrated = |outcome: Result<Response, Error>| {
//!     log::info!("calibration: {:?}", outcome);
//! };
//! let mut sensor = Bmp280::new(bus, timer);
//! sensor.init_calibration(Some(&on_calibrated))?;
//!
//! // later, from the bus interrupt deferred into the main loop:
//! sensor.read_complete(token, Ok(&buf[..len]))?;
//! ```

pub(crate) mod fmt;

pub mod domain;
pub mod drivers;
pub mod error;
pub mod storage;
pub mod traits;

pub use drivers::sensors::bmp280::{Bmp280, Notify, Response};
pub use error::Error;
