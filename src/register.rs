//! Register map
//!
//! All registers of the VEML6046 and the location of every logical setting
//! inside them.

/// Registers of the VEML6046 sensor accessed by the driver.
///
/// 2-byte registers are named after their first (low) address, the sensor
/// increments the address for the second byte.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Register {
    /// RGB configuration register 0
    RgbConf0 = 0x00,

    /// RGB configuration register 1
    RgbConf1 = 0x01,

    /// Green high threshold (0x04 low byte, 0x05 high byte)
    GreenThresholdHigh = 0x04,

    /// Green low threshold (0x06 low byte, 0x07 high byte)
    GreenThresholdLow = 0x06,

    /// Start of the red, green, blue and IR data (0x10 to 0x17)
    RedData = 0x10,

    /// Device ID (0x18 low byte, 0x19 high byte)
    Id = 0x18,

    /// Interrupt flags
    InterruptFlag = 0x1A,
}

/// Order of the bytes of a 2-byte register on the wire.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum ByteOrder {
    LittleEndian,
    BigEndian,
}

/// Location of a logical setting: a bit range inside a 1- or 2-byte register.
///
/// Fields only exist as the `const` table below; an entry that does not fit
/// its register fails to compile.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Field {
    /// First register of the field.
    pub(crate) register: Register,
    /// Number of register bytes holding the field (1 or 2).
    pub(crate) size: usize,
    /// Byte order used to assemble 2-byte registers.
    order: ByteOrder,
    /// Bit offset of the lowest field bit.
    offset: u8,
    /// Number of bits of the field.
    width: u8,
}

impl Field {
    const fn new(register: Register, size: usize, order: ByteOrder, width: u8, offset: u8) -> Self {
        assert!(size == 1 || size == 2, "registers are 1 or 2 bytes wide");
        assert!(width > 0, "empty field");
        assert!(
            offset as usize + width as usize <= size * 8,
            "field exceeds its register"
        );

        Self {
            register,
            size,
            order,
            offset,
            width,
        }
    }

    const fn byte(register: Register, width: u8, offset: u8) -> Self {
        Self::new(register, 1, ByteOrder::LittleEndian, width, offset)
    }

    const fn word(register: Register, order: ByteOrder, width: u8, offset: u8) -> Self {
        Self::new(register, 2, order, width, offset)
    }

    /// Bits of the register value occupied by this field.
    pub(crate) const fn mask(&self) -> u16 {
        (u16::MAX >> (16 - self.width)) << self.offset
    }

    /// Whether the field spans every bit of its register(s).
    pub(crate) const fn is_full_width(&self) -> bool {
        self.offset == 0 && self.width as usize == self.size * 8
    }

    /// Shift and mask the field out of a register value.
    pub(crate) fn extract(&self, register_value: u16) -> u16 {
        (register_value & self.mask()) >> self.offset
    }

    /// Replace the field bits of `register_value` with `value`, leaving all other bits untouched.
    /// Bits of `value` beyond the field width are dropped.
    pub(crate) fn insert(&self, register_value: u16, value: u16) -> u16 {
        (register_value & !self.mask()) | ((value << self.offset) & self.mask())
    }

    /// Assemble the register value from the raw bytes read from the sensor.
    pub(crate) fn decode(&self, bytes: &[u8]) -> u16 {
        match (self.size, self.order) {
            (1, _) => bytes[0] as u16,
            (_, ByteOrder::LittleEndian) => u16::from_le_bytes([bytes[0], bytes[1]]),
            (_, ByteOrder::BigEndian) => u16::from_be_bytes([bytes[0], bytes[1]]),
        }
    }

    /// Split a register value into the raw bytes to be written to the sensor.
    pub(crate) fn encode(&self, register_value: u16) -> [u8; 2] {
        match (self.size, self.order) {
            (1, _) => [register_value as u8, 0],
            (_, ByteOrder::LittleEndian) => register_value.to_le_bytes(),
            (_, ByteOrder::BigEndian) => register_value.to_be_bytes(),
        }
    }
}

/// RGB_IT: integration time
pub(crate) const INTEGRATION_TIME: Field = Field::byte(Register::RgbConf0, 3, 4);
/// RGB_MODE: 0 = auto, 1 = active force
pub(crate) const FORCED_MODE: Field = Field::byte(Register::RgbConf0, 1, 3);
/// RGB_TRIG: start a measurement in active force mode, cleared by the sensor
pub(crate) const TRIGGER: Field = Field::byte(Register::RgbConf0, 1, 2);
/// G_INT: green channel interrupt enable
pub(crate) const GREEN_INTERRUPT_ENABLE: Field = Field::byte(Register::RgbConf0, 1, 1);
/// RGB_ON_1 (bit 7 of RGB_CONF_1) and RGB_ON_0 (bit 0 of RGB_CONF_0)
pub(crate) const POWER: Field = Field::word(Register::RgbConf0, ByteOrder::BigEndian, 2, 7);
/// PDDIV: 1 = 1/2 photodiode, 0 = 2/2 photodiode
pub(crate) const PHOTODIODE_HALF_SIZE: Field = Field::byte(Register::RgbConf1, 1, 6);
/// RGB_GAIN
pub(crate) const GAIN: Field = Field::byte(Register::RgbConf1, 2, 3);
/// RGB_PERS: interrupt persistence
pub(crate) const PERSISTENCE: Field = Field::byte(Register::RgbConf1, 2, 1);
/// RGB_CAL: calibration enable
pub(crate) const CALIBRATION: Field = Field::byte(Register::RgbConf1, 1, 0);
pub(crate) const GREEN_THRESHOLD_HIGH: Field =
    Field::word(Register::GreenThresholdHigh, ByteOrder::LittleEndian, 16, 0);
pub(crate) const GREEN_THRESHOLD_LOW: Field =
    Field::word(Register::GreenThresholdLow, ByteOrder::LittleEndian, 16, 0);
pub(crate) const DEVICE_ID: Field = Field::word(Register::Id, ByteOrder::LittleEndian, 16, 0);
pub(crate) const INTERRUPT_FLAGS: Field = Field::byte(Register::InterruptFlag, 8, 0);
