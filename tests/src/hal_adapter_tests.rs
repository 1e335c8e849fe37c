//! embedded-hal adapter tests with mock pins and delays

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::pin::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
use morse_core::mock::{Event, EventLog};
use morse_core::{
    EmbeddedHalDelay, EmbeddedHalKeyOutput, HalError, FnDelay, FnKeyOutput, KeyOutput, MorseConfig,
    MorseWriter, NoOpKeyOutput,
};
use std::cell::RefCell;
use tokio_test::assert_ok;

fn dot_transactions(active: PinState, idle: PinState) -> [PinTransaction; 2] {
    [PinTransaction::set(active), PinTransaction::set(idle)]
}

#[test]
fn test_pin_output_keys_letter_e() {
    // E: key down, key up, then the letter gap drives it low again
    let expectations = [
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::Low),
    ];
    let mut pin = PinMock::new(&expectations);

    let output = EmbeddedHalKeyOutput::new(pin.clone(), false);
    let delay = EmbeddedHalDelay::new(NoopDelay::new());
    let mut writer = MorseWriter::new(output, delay, MorseConfig::default());

    assert_ok!(writer.write_character('E'));

    pin.done();
}

#[test]
fn test_inverted_pin_output() {
    let mut expectations = Vec::new();
    expectations.extend(dot_transactions(PinState::Low, PinState::High));
    expectations.extend(dot_transactions(PinState::Low, PinState::High));
    let mut pin = PinMock::new(&expectations);

    let mut output = EmbeddedHalKeyOutput::new(pin.clone(), true);
    assert_ok!(output.key_down());
    assert_ok!(output.key_up());

    let mut writer = MorseWriter::new(output, EmbeddedHalDelay::new(NoopDelay::new()), MorseConfig::default());
    assert_ok!(writer.write_dot());

    drop(writer);
    pin.done();
}

#[test]
fn test_function_capabilities() {
    let log = EventLog::new();
    let calls = RefCell::new(Vec::new());

    let output = FnKeyOutput::new(
        || calls.borrow_mut().push("on"),
        || calls.borrow_mut().push("off"),
    );
    let mut delay_log = log.delay();
    let delay = FnDelay::new(|ms| morse_core::Delay::delay_ms(&mut delay_log, ms));
    let mut writer = MorseWriter::new(output, delay, MorseConfig::from_wpm(12).unwrap());

    assert_ok!(writer.write_character('T'));
    drop(writer);

    assert_eq!(*calls.borrow(), vec!["on", "off", "off"]);
    assert_eq!(
        log.events().as_slice(),
        &[Event::Delay(300), Event::Delay(100), Event::Delay(300)]
    );
}

#[test]
fn test_writer_by_reference() {
    let log = EventLog::new();
    let mut output = log.output();
    let mut delay = log.delay();

    {
        let mut writer = MorseWriter::new(&mut output, &mut delay, MorseConfig::new(10).unwrap());
        assert_ok!(writer.write_sos());
    }

    // Capabilities are still usable after the borrowed writer is gone
    assert_ok!(output.key_down());
    assert_eq!(log.pulse_count(), 10);
}

#[test]
fn test_noop_output_with_real_sleep() {
    let start = std::time::Instant::now();
    let mut writer = MorseWriter::new(NoOpKeyOutput, morse_core::StdDelay, MorseConfig::new(2).unwrap());

    assert_ok!(writer.write_string("E"));

    // 1 on + 1 off + 3 letter gap, never less
    assert!(start.elapsed() >= std::time::Duration::from_millis(10));
}

/// Output pin whose driver always reports a fault
#[derive(Default)]
struct FaultyPin {
    writes: u32,
}

impl ErrorType for FaultyPin {
    type Error = ErrorKind;
}

impl OutputPin for FaultyPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.writes += 1;
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.writes += 1;
        Err(ErrorKind::Other)
    }
}

#[test]
fn test_pin_fault_maps_to_gpio_error() {
    let output = EmbeddedHalKeyOutput::new(FaultyPin::default(), false);
    let mut writer = MorseWriter::new(output, EmbeddedHalDelay::new(NoopDelay::new()), MorseConfig::default());

    assert_eq!(writer.write_string("EE"), Err(HalError::GpioError));
    assert_eq!(writer.write_letter_gap(), Err(HalError::GpioError));

    // Each call stops at its first failed write
    let (output, _) = writer.release();
    assert_eq!(output.release().writes, 2);
}
