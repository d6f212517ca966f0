// This example demonstrates how to use the VEML6046 sensor with a Raspberry Pi.
// It is so far untested, but should be a good reference for any kind of embedded system.

use embedded_hal::blocking::delay::DelayMs;
use linux_embedded_hal as hal;
use veml6046::{Gain, IntegrationTime, VEML6046};

fn main() {
    let i2c = hal::I2cdev::new("/dev/i2c-1").unwrap();
    let mut delay = hal::Delay;

    // Create a new VEML6046 instance, this checks the device id and powers the sensor up
    let mut veml6046 = VEML6046::new(i2c).unwrap();

    match veml6046.set_integration_time(IntegrationTime::Ms100) {
        Ok(_) => log::info!("Integration time set to {} ms", IntegrationTime::Ms100.as_ms()),
        Err(e) => log::error!("Error setting integration time: {:?}", e),
    }

    match veml6046.set_gain(Gain::X1) {
        Ok(_) => log::info!("Gain set to x{}", f32::from(Gain::X1)),
        Err(e) => log::error!("Error setting gain: {:?}", e),
    }

    // Do one triggered measurement in active force mode
    if let Err(e) = veml6046
        .set_rgb_mode_forced(true)
        .and_then(|_| veml6046.trigger_measurement())
    {
        log::error!("Error triggering measurement: {:?}", e);
    }

    while let Ok(true) = veml6046.is_triggered() {
        delay.delay_ms(10u32);
    }

    match veml6046.read_data() {
        Ok(data) => log::info!(
            "Triggered measurement - R: {} G: {} B: {} IR: {}",
            data.red,
            data.green,
            data.blue,
            data.ir
        ),
        Err(e) => log::error!("Error reading sensor: {:?}", e),
    }

    // Back to auto mode, read the channels once a second for 5 minutes
    if let Err(e) = veml6046.set_rgb_mode_forced(false) {
        log::error!("Error switching to auto mode: {:?}", e);
    }

    for _ in 0..300 {
        match veml6046.read_data() {
            Ok(data) => log::info!(
                "R: {} G: {} B: {} IR: {}",
                data.red,
                data.green,
                data.blue,
                data.ir
            ),
            Err(e) => log::error!("Error reading sensor: {:?}", e),
        }
        delay.delay_ms(1000u32);
    }

    // Put the sensor into shutdown and release the bus
    match veml6046.disable() {
        Ok(_) => log::info!("Sensor disabled"),
        Err(e) => log::error!("Error disabling sensor: {:?}", e),
    }
    let _i2c = veml6046.destroy();
}
