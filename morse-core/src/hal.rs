//! Hardware Abstraction Layer for the keyed output line and timing

use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Trait for key output control
pub trait KeyOutput {
    type Error;

    /// Drive the line to its active state
    fn key_down(&mut self) -> Result<(), Self::Error>;

    /// Drive the line to its inactive state
    fn key_up(&mut self) -> Result<(), Self::Error>;
}

impl<T: KeyOutput + ?Sized> KeyOutput for &mut T {
    type Error = T::Error;

    fn key_down(&mut self) -> Result<(), Self::Error> {
        T::key_down(self)
    }

    fn key_up(&mut self) -> Result<(), Self::Error> {
        T::key_up(self)
    }
}

/// Trait for blocking the caller for a number of milliseconds.
///
/// Implementations may oversleep but must not return early.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay_ms(&mut self, ms: u32) {
        T::delay_ms(self, ms)
    }
}

/// Generic implementation for embedded-hal compatible output pins
pub struct EmbeddedHalKeyOutput<P> {
    pin: P,
    inverted: bool,
}

impl<P> EmbeddedHalKeyOutput<P>
where
    P: OutputPin,
{
    /// Wrap a pin; `inverted` drives it low for key down (active-low LEDs, open drain keying)
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted }
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }

    fn set_state(&mut self, state: bool) -> Result<(), HalError> {
        let output_state = if self.inverted { !state } else { state };
        if output_state {
            self.pin.set_high().map_err(|_| HalError::GpioError)
        } else {
            self.pin.set_low().map_err(|_| HalError::GpioError)
        }
    }
}

impl<P> KeyOutput for EmbeddedHalKeyOutput<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn key_down(&mut self) -> Result<(), Self::Error> {
        self.set_state(true)
    }

    fn key_up(&mut self) -> Result<(), Self::Error> {
        self.set_state(false)
    }
}

/// Output driven by a pair of plain functions or closures
pub struct FnKeyOutput<On, Off> {
    on: On,
    off: Off,
}

impl<On, Off> FnKeyOutput<On, Off>
where
    On: FnMut(),
    Off: FnMut(),
{
    pub fn new(on: On, off: Off) -> Self {
        Self { on, off }
    }
}

impl<On, Off> KeyOutput for FnKeyOutput<On, Off>
where
    On: FnMut(),
    Off: FnMut(),
{
    type Error = Infallible;

    fn key_down(&mut self) -> Result<(), Self::Error> {
        (self.on)();
        Ok(())
    }

    fn key_up(&mut self) -> Result<(), Self::Error> {
        (self.off)();
        Ok(())
    }
}

/// Output that goes nowhere
#[derive(Copy, Clone, Debug, Default)]
pub struct NoOpKeyOutput;

impl KeyOutput for NoOpKeyOutput {
    type Error = Infallible;

    fn key_down(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn key_up(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Delay backed by any embedded-hal `DelayNs` provider
pub struct EmbeddedHalDelay<D> {
    delay: D,
}

impl<D: DelayNs> EmbeddedHalDelay<D> {
    pub fn new(delay: D) -> Self {
        Self { delay }
    }

    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> Delay for EmbeddedHalDelay<D> {
    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

/// Delay driven by a plain function or closure
pub struct FnDelay<F> {
    f: F,
}

impl<F: FnMut(u32)> FnDelay<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: FnMut(u32)> Delay for FnDelay<F> {
    fn delay_ms(&mut self, ms: u32) {
        (self.f)(ms)
    }
}

/// Delay that returns immediately
#[derive(Copy, Clone, Debug, Default)]
pub struct NoOpDelay;

impl Delay for NoOpDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

/// Thread sleep delay for hosted targets
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64));
    }
}

/// Scheduler-blocking delay on the embassy time driver.
///
/// Resolution is limited to the driver tick rate.
#[cfg(feature = "embassy-time")]
#[derive(Copy, Clone, Debug, Default)]
pub struct EmbassyDelay;

#[cfg(feature = "embassy-time")]
impl Delay for EmbassyDelay {
    fn delay_ms(&mut self, ms: u32) {
        embassy_time::block_for(embassy_time::Duration::from_millis(ms as u64));
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use core::cell::RefCell;
    use heapless::Vec;

    /// Capacity of an [`EventLog`]
    pub const LOG_CAPACITY: usize = 1024;

    /// Something the writer did to its capabilities
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum Event {
        KeyDown,
        KeyUp,
        Delay(u32),
    }

    /// Shared recording of output and delay calls, in call order
    #[derive(Default)]
    pub struct EventLog {
        events: RefCell<Vec<Event, LOG_CAPACITY>>,
    }

    impl EventLog {
        pub fn new() -> Self {
            Self::default()
        }

        /// Output handle that records into this log
        pub fn output(&self) -> MockKeyOutput<'_> {
            MockKeyOutput { log: self }
        }

        /// Delay handle that records into this log
        pub fn delay(&self) -> MockDelay<'_> {
            MockDelay { log: self }
        }

        pub fn record(&self, event: Event) {
            self.events
                .borrow_mut()
                .push(event)
                .expect("event log full");
        }

        /// Copy of everything recorded so far
        pub fn events(&self) -> Vec<Event, LOG_CAPACITY> {
            self.events.borrow().clone()
        }

        pub fn clear(&self) {
            self.events.borrow_mut().clear();
        }

        /// Sum of all recorded delays in milliseconds
        pub fn total_delay_ms(&self) -> u32 {
            self.events
                .borrow()
                .iter()
                .map(|event| match event {
                    Event::Delay(ms) => *ms,
                    _ => 0,
                })
                .sum()
        }

        /// Number of key-down events
        pub fn pulse_count(&self) -> usize {
            self.events
                .borrow()
                .iter()
                .filter(|event| **event == Event::KeyDown)
                .count()
        }
    }

    pub struct MockKeyOutput<'a> {
        log: &'a EventLog,
    }

    impl KeyOutput for MockKeyOutput<'_> {
        type Error = Infallible;

        fn key_down(&mut self) -> Result<(), Self::Error> {
            self.log.record(Event::KeyDown);
            Ok(())
        }

        fn key_up(&mut self) -> Result<(), Self::Error> {
            self.log.record(Event::KeyUp);
            Ok(())
        }
    }

    pub struct MockDelay<'a> {
        log: &'a EventLog,
    }

    impl Delay for MockDelay<'_> {
        fn delay_ms(&mut self, ms: u32) {
            self.log.record(Event::Delay(ms));
        }
    }

    /// Output whose every operation fails, for error propagation tests
    #[derive(Default)]
    pub struct FailingKeyOutput {
        pub attempts: u32,
    }

    impl KeyOutput for FailingKeyOutput {
        type Error = HalError;

        fn key_down(&mut self) -> Result<(), Self::Error> {
            self.attempts += 1;
            Err(HalError::GpioError)
        }

        fn key_up(&mut self) -> Result<(), Self::Error> {
            self.attempts += 1;
            Err(HalError::GpioError)
        }
    }
}
