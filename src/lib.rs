//! This crate provides a platform agnostic no_std driver for the VEML6046 RGBIR color sensor.
//! The driver is compatible with the [`embedded-hal`](https://crates.io/crates/embedded-hal) traits.
//!
//! The datasheet of the sensor can be found [here](https://www.vishay.com/docs/80327/veml6046x00.pdf).
//!
//! ## Supported features
//! * Reading the raw red, green, blue and IR channel counts in one transaction
//! * Configurable integration time, gain and photodiode size
//! * Auto and active force (triggered) measurement mode
//! * Green channel interrupt enable, persistence and thresholds
//! * Reading the interrupt flags
//! * Enabling and disabling the calibration and the sensor itself
//!
//! ## Unsupported features
//! * Converting the raw values into lux or color temperature
//! * Async
//!
//! ## Usage
//!
//! ### Creating a driver instance and reading the channels
//!
//! ```rust
//! use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
//! use veml6046::{VEML6046, VEML6046_ADDR};
//!
//! # let expectations = [
//! #     I2cTransaction::write(VEML6046_ADDR, vec![]),
//! #     I2cTransaction::write_read(VEML6046_ADDR, vec![0x18], vec![0x01, 0x00]),
//! #     I2cTransaction::write_read(VEML6046_ADDR, vec![0x00], vec![0x01, 0x80]),
//! #     I2cTransaction::write(VEML6046_ADDR, vec![0x00, 0x00, 0x00]),
//! #     I2cTransaction::write_read(VEML6046_ADDR, vec![0x01], vec![0x00]),
//! #     I2cTransaction::write(VEML6046_ADDR, vec![0x01, 0x01]),
//! #     I2cTransaction::write_read(VEML6046_ADDR, vec![0x10], vec![0; 8]),
//! # ];
//! # let i2c = I2cMock::new(&expectations);
//! // Checks the device id, powers the sensor up and enables the calibration
//! let mut sensor = VEML6046::new(i2c).unwrap();
//!
//! let data = sensor.read_data().unwrap();
//! println!("R: {} G: {} B: {} IR: {}", data.red, data.green, data.blue, data.ir);
//!
//! // Hand the bus back
//! let mut i2c = sensor.destroy();
//! # i2c.done();
//! ```
//!
//! ### Triggered measurement
//!
//! ```rust,ignore
//! use veml6046::{Gain, IntegrationTime, VEML6046};
//!
//! let mut sensor = VEML6046::new(i2c).unwrap();
//! sensor.set_integration_time(IntegrationTime::Ms100).unwrap();
//! sensor.set_gain(Gain::X2).unwrap();
//!
//! // In active force mode the sensor only measures when triggered
//! sensor.set_rgb_mode_forced(true).unwrap();
//! sensor.trigger_measurement().unwrap();
//!
//! // The trigger bit is cleared by the sensor once the measurement is done
//! while sensor.is_triggered().unwrap() {}
//!
//! let data = sensor.read_data().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]

pub mod register;

use embedded_hal::blocking::i2c::{Write, WriteRead};
use register::Field;

/// Default I2C address for the VEML6046 sensor.
pub const VEML6046_ADDR: u8 = 0x29;

/// Value of the device id register.
pub const VEML6046_DEVICE_ID: u16 = 0x0001;

/// Represents an I2C-connected VEML6046 sensor.
#[derive(Debug)]
pub struct VEML6046<I2C> {
    /// I2C Interface for communcating with the sensor.
    i2c: I2C,

    /// The 7-bit bus address of the sensor.
    address: u8,
}

impl<I2C, E> VEML6046<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    /// Creates a connection with a VEML6046 sensor at the default address.
    ///
    /// See [`VEML6046::new_with_address`].
    pub fn new(i2c: I2C) -> Result<Self> {
        Self::new_with_address(i2c, VEML6046_ADDR)
    }

    /// Creates a connection with a VEML6046 sensor via I2C.
    ///
    /// This method checks that the sensor answers on `address` and reports the
    /// expected device id, then powers it up and enables the RGB calibration.
    /// The sensor is only returned if all of these steps succeed.
    pub fn new_with_address(mut i2c: I2C, address: u8) -> Result<Self> {
        if i2c.write(address, &[]).is_err() {
            return Err(VEML6046Error::InitI2CError);
        }

        let mut sensor = Self { i2c, address };

        let id = sensor.read_id()?;
        log::debug!("Read device id: 0x{:04X}", id);
        if id != VEML6046_DEVICE_ID {
            return Err(VEML6046Error::IdentityMismatch(id));
        }

        sensor.enable()?;
        sensor.set_rgb_calibration(true)?;

        Ok(sensor)
    }

    /// Destroys the driver and returns the I2C bus.
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// The bus address the sensor is talked to on.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Reads the device id of the sensor.
    pub fn read_id(&mut self) -> Result<u16> {
        self.read_field(register::DEVICE_ID)
    }

    /// Set the integration time of the sensor.
    pub fn set_integration_time(&mut self, integration_time: IntegrationTime) -> Result<()> {
        self.write_field(
            register::INTEGRATION_TIME,
            integration_time.into_reg_value() as u16,
        )
    }

    /// Read the integration time of the sensor.
    pub fn read_integration_time(&mut self) -> Result<IntegrationTime> {
        let it = self.read_field(register::INTEGRATION_TIME)?;
        IntegrationTime::try_from(it as u8)
    }

    /// Select active force mode (`true`) or auto mode (`false`).
    pub fn set_rgb_mode_forced(&mut self, forced: bool) -> Result<()> {
        self.write_field(register::FORCED_MODE, forced as u16)
    }

    /// Whether the sensor is in active force mode.
    pub fn read_rgb_mode_forced(&mut self) -> Result<bool> {
        Ok(self.read_field(register::FORCED_MODE)? == 1)
    }

    /// Start a single measurement in active force mode.
    pub fn trigger_measurement(&mut self) -> Result<()> {
        self.write_field(register::TRIGGER, 1)
    }

    /// Whether a triggered measurement is still in progress.
    pub fn is_triggered(&mut self) -> Result<bool> {
        Ok(self.read_field(register::TRIGGER)? == 1)
    }

    /// Enable or disable the green channel threshold interrupt.
    pub fn set_green_interrupt_enabled(&mut self, enabled: bool) -> Result<()> {
        self.write_field(register::GREEN_INTERRUPT_ENABLE, enabled as u16)
    }

    /// Whether the green channel threshold interrupt is enabled.
    pub fn read_green_interrupt_enabled(&mut self) -> Result<bool> {
        Ok(self.read_field(register::GREEN_INTERRUPT_ENABLE)? == 1)
    }

    /// Power the sensor up by clearing both RGB_ON bits.
    pub fn enable(&mut self) -> Result<()> {
        self.write_field(register::POWER, 0b00)
    }

    /// Put the sensor into shutdown by setting both RGB_ON bits.
    pub fn disable(&mut self) -> Result<()> {
        self.write_field(register::POWER, 0b11)
    }

    /// Whether the sensor is powered up.
    pub fn is_enabled(&mut self) -> Result<bool> {
        Ok(self.read_field(register::POWER)? == 0)
    }

    /// Use half of the photodiode (`true`) or the full photodiode (`false`).
    pub fn set_photodiode_half_size(&mut self, half_size: bool) -> Result<()> {
        self.write_field(register::PHOTODIODE_HALF_SIZE, half_size as u16)
    }

    /// Whether only half of the photodiode is used.
    pub fn read_photodiode_half_size(&mut self) -> Result<bool> {
        Ok(self.read_field(register::PHOTODIODE_HALF_SIZE)? == 1)
    }

    /// Set the gain of the sensor.
    pub fn set_gain(&mut self, gain: Gain) -> Result<()> {
        self.write_field(register::GAIN, gain.into_reg_value() as u16)
    }

    /// Read the gain of the sensor.
    pub fn read_gain(&mut self) -> Result<Gain> {
        let gain = self.read_field(register::GAIN)?;
        Gain::try_from(gain as u8)
    }

    /// Set how many consecutive out-of-threshold samples raise the interrupt.
    pub fn set_interrupt_persistence(&mut self, persistence: Persistence) -> Result<()> {
        self.write_field(register::PERSISTENCE, persistence.into_reg_value() as u16)
    }

    /// Read the interrupt persistence of the sensor.
    pub fn read_interrupt_persistence(&mut self) -> Result<Persistence> {
        let pers = self.read_field(register::PERSISTENCE)?;
        Persistence::try_from(pers as u8)
    }

    /// Enable or disable the RGB calibration.
    pub fn set_rgb_calibration(&mut self, enabled: bool) -> Result<()> {
        self.write_field(register::CALIBRATION, enabled as u16)
    }

    /// Whether the RGB calibration is enabled.
    pub fn read_rgb_calibration(&mut self) -> Result<bool> {
        Ok(self.read_field(register::CALIBRATION)? == 1)
    }

    /// Set the green channel high threshold in raw counts.
    pub fn set_green_threshold_high(&mut self, threshold: u16) -> Result<()> {
        self.write_field(register::GREEN_THRESHOLD_HIGH, threshold)
    }

    /// Read the green channel high threshold in raw counts.
    pub fn read_green_threshold_high(&mut self) -> Result<u16> {
        self.read_field(register::GREEN_THRESHOLD_HIGH)
    }

    /// Set the green channel low threshold in raw counts.
    pub fn set_green_threshold_low(&mut self, threshold: u16) -> Result<()> {
        self.write_field(register::GREEN_THRESHOLD_LOW, threshold)
    }

    /// Read the green channel low threshold in raw counts.
    pub fn read_green_threshold_low(&mut self) -> Result<u16> {
        self.read_field(register::GREEN_THRESHOLD_LOW)
    }

    /// Read the raw interrupt flag register.
    pub fn read_interrupt_flags(&mut self) -> Result<u8> {
        Ok(self.read_field(register::INTERRUPT_FLAGS)? as u8)
    }

    /// Read all 8 data registers with the channel values in one i2c write-then-read operation
    pub fn read_data(&mut self) -> Result<RgbIr> {
        let mut read_data = [0; 8];

        self.i2c
            .write_read(
                self.address,
                &[register::Register::RedData as u8],
                &mut read_data,
            )
            .map_err(|_| VEML6046Error::ReadI2CError)?;

        log::debug!("Read raw values: {:?}", read_data);

        Ok(RgbIr {
            red: u16::from_le_bytes([read_data[0], read_data[1]]),
            green: u16::from_le_bytes([read_data[2], read_data[3]]),
            blue: u16::from_le_bytes([read_data[4], read_data[5]]),
            ir: u16::from_le_bytes([read_data[6], read_data[7]]),
        })
    }

    /// Read the channel values into `out` in the order red, green, blue, IR.
    ///
    /// `out` must have room for at least four values, otherwise
    /// [`VEML6046Error::InvalidArgument`] is returned without touching the bus.
    pub fn read_data_into(&mut self, out: &mut [u16]) -> Result<()> {
        if out.len() < 4 {
            return Err(VEML6046Error::InvalidArgument);
        }

        let data = self.read_data()?;
        out[..4].copy_from_slice(&[data.red, data.green, data.blue, data.ir]);

        Ok(())
    }

    /// Reads the register(s) holding `field` and returns the field value
    fn read_field(&mut self, field: Field) -> Result<u16> {
        let register_value = self.read_register(field)?;
        Ok(field.extract(register_value))
    }

    /// Writes a new value into `field`, leaving the other bits of its register(s) untouched
    fn write_field(&mut self, field: Field, value: u16) -> Result<()> {
        // Sibling fields share the register, so the current value has to be read back first
        let current = if field.is_full_width() {
            0
        } else {
            self.read_register(field)?
        };
        let register_value = field.insert(current, value);

        log::trace!(
            "Writing 0x{:04X} to register 0x{:02X}",
            register_value,
            field.register as u8
        );

        let bytes = field.encode(register_value);
        let write_data = [field.register as u8, bytes[0], bytes[1]];

        self.i2c
            .write(self.address, &write_data[..field.size + 1])
            .map_err(|_| VEML6046Error::WriteI2CError)?;

        Ok(())
    }

    fn read_register(&mut self, field: Field) -> Result<u16> {
        let mut read_data = [0; 2];

        self.i2c
            .write_read(
                self.address,
                &[field.register as u8],
                &mut read_data[..field.size],
            )
            .map_err(|_| VEML6046Error::ReadI2CError)?;

        Ok(field.decode(&read_data))
    }
}

/// Shorthand for all functions returning an error in this module.
type Result<T> = core::result::Result<T, VEML6046Error>;

/// Represents any error that may happen during communication.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum VEML6046Error {
    /// The sensor did not acknowledge its address.
    InitI2CError,
    /// The device id register did not hold the VEML6046 id (the value read is attached).
    IdentityMismatch(u16),
    /// An error occurred while reading from the sensor.
    ReadI2CError,
    /// An error occurred while writing to the sensor.
    WriteI2CError,
    /// A value outside of the supported range was passed or read.
    InvalidArgument,
}

/// One reading of all four channels in raw counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RgbIr {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub ir: u16,
}

/// The integration time of the VEML6046 sensor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum IntegrationTime {
    Ms3_125 = 0x0,
    Ms6_25 = 0x1,
    Ms12_5 = 0x2,
    Ms25 = 0x3,
    Ms50 = 0x4,
    Ms100 = 0x5,
    Ms200 = 0x6,
    Ms400 = 0x7,
}

impl IntegrationTime {
    /// Converts IntegrationTime value into the corresponding register value
    pub fn into_reg_value(self) -> u8 {
        self as u8
    }

    /// The integration time in milliseconds.
    pub fn as_ms(self) -> f32 {
        // 3.125 ms doubled for every step
        3.125 * (1u16 << self.into_reg_value()) as f32
    }
}

impl TryFrom<u8> for IntegrationTime {
    type Error = VEML6046Error;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0x0 => IntegrationTime::Ms3_125,
            0x1 => IntegrationTime::Ms6_25,
            0x2 => IntegrationTime::Ms12_5,
            0x3 => IntegrationTime::Ms25,
            0x4 => IntegrationTime::Ms50,
            0x5 => IntegrationTime::Ms100,
            0x6 => IntegrationTime::Ms200,
            0x7 => IntegrationTime::Ms400,
            _ => return Err(VEML6046Error::InvalidArgument),
        })
    }
}

/// The gain of the VEML6046 sensor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Gain {
    X1 = 0x0,
    X2 = 0x1,
    X0_66 = 0x2,
    X0_5 = 0x3,
}

impl From<Gain> for f32 {
    fn from(gain: Gain) -> Self {
        match gain {
            Gain::X1 => 1.0,
            Gain::X2 => 2.0,
            Gain::X0_66 => 0.66,
            Gain::X0_5 => 0.5,
        }
    }
}

impl Gain {
    /// Converts Gain value into the corresponding register value
    pub fn into_reg_value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Gain {
    type Error = VEML6046Error;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0x0 => Gain::X1,
            0x1 => Gain::X2,
            0x2 => Gain::X0_66,
            0x3 => Gain::X0_5,
            _ => return Err(VEML6046Error::InvalidArgument),
        })
    }
}

/// Number of consecutive samples outside the thresholds before the interrupt fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Persistence {
    Samples1 = 0x0,
    Samples2 = 0x1,
    Samples4 = 0x2,
    Samples8 = 0x3,
}

impl Persistence {
    /// Converts Persistence value into the corresponding register value
    pub fn into_reg_value(self) -> u8 {
        self as u8
    }

    /// Number of samples this setting stands for.
    pub fn samples(self) -> u8 {
        1 << self.into_reg_value()
    }
}

impl TryFrom<u8> for Persistence {
    type Error = VEML6046Error;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0x0 => Persistence::Samples1,
            0x1 => Persistence::Samples2,
            0x2 => Persistence::Samples4,
            0x3 => Persistence::Samples8,
            _ => return Err(VEML6046Error::InvalidArgument),
        })
    }
}
