#![allow(dead_code)]

use bmp280_async::drivers::sensors::bmp280::{Bmp280, Notify, Response};
use bmp280_async::traits::bus::RegisterBus;
use bmp280_async::traits::timer::OneShotTimer;
use bmp280_async::traits::Token;
use bmp280_async::Error;
use std::cell::RefCell;
use std::rc::Rc;

/// Calibration block of the reference device.
pub const CALIBRATION: [u8; 24] = [
    0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B, 0x8C, 0x00,
    0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Read { start: u8, len: usize },
    Write { address: u8, value: u8 },
    Timer { duration_ms: u32 },
}

#[derive(Default)]
pub struct Transactions {
    pub calls: Vec<Call>,
    pub last: Option<Token>,
}

/// Shared record of everything the driver asked for, in order.
#[derive(Clone, Default)]
pub struct Recording(Rc<RefCell<Transactions>>);

impl Recording {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn count(&self) -> usize {
        self.0.borrow().calls.len()
    }

    pub fn last_call(&self) -> Option<Call> {
        self.0.borrow().calls.last().copied()
    }

    /// Token of the most recently issued step.
    pub fn token(&self) -> Token {
        self.0.borrow().last.expect("no step issued")
    }

    fn record(&self, call: Call, token: Token) {
        let mut t = self.0.borrow_mut();
        t.calls.push(call);
        t.last.replace(token);
    }
}

pub struct MockBus(Recording);

impl RegisterBus for MockBus {
    fn read_registers(&mut self, start: u8, len: usize, token: Token) {
        self.0.record(Call::Read { start, len }, token);
    }

    fn write_register(&mut self, address: u8, value: u8, token: Token) {
        self.0.record(Call::Write { address, value }, token);
    }
}

pub struct MockTimer(Recording);

impl OneShotTimer for MockTimer {
    fn start(&mut self, duration_ms: u32, token: Token) {
        self.0.record(Call::Timer { duration_ms }, token);
    }
}

pub type TestSensor<'a> = Bmp280<'a, MockBus, MockTimer>;

pub fn setup<'a>() -> (TestSensor<'a>, Recording) {
    let _ = env_logger::builder().is_test(true).try_init();
    let recording = Recording::default();
    let sensor = Bmp280::new(MockBus(recording.clone()), MockTimer(recording.clone()));
    (sensor, recording)
}

pub fn mocks() -> (MockBus, MockTimer, Recording) {
    let recording = Recording::default();
    (
        MockBus(recording.clone()),
        MockTimer(recording.clone()),
        recording,
    )
}

/// Collects every delivered outcome.
#[derive(Default)]
pub struct Outcomes(RefCell<Vec<Result<Response, Error>>>);

impl Outcomes {
    pub fn all(&self) -> Vec<Result<Response, Error>> {
        self.0.borrow().clone()
    }

    pub fn last(&self) -> Option<Result<Response, Error>> {
        self.0.borrow().last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }
}

impl Notify for Outcomes {
    fn notify(&self, outcome: Result<Response, Error>) {
        log::info!("outcome: {:?}", outcome);
        self.0.borrow_mut().push(outcome);
    }
}

pub fn calibrate(sensor: &mut TestSensor<'_>, recording: &Recording) {
    sensor.init_calibration(None).unwrap();
    sensor
        .read_complete(recording.token(), Ok(&CALIBRATION))
        .unwrap();
    assert!(sensor.is_calibrated());
}
