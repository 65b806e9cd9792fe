//! Transport — serial port open and platform reconfiguration.

use std::time::Duration;

use tokio_serial::{SerialPort, SerialPortBuilderExt, SerialStream};
use tracing::{debug, warn};

/// Open the serial device at the requested baud rate.
///
/// Runs the platform pre-open hook first and discards whatever input
/// accumulated before we attached, so the sync search starts on live bytes.
pub fn open(device: &str, baud: u32) -> Result<SerialStream, tokio_serial::Error> {
    pre_open_hook(device, baud);

    let port = tokio_serial::new(device, baud)
        .flow_control(tokio_serial::FlowControl::None)
        .timeout(Duration::from_millis(100))
        .open_native_async()?;

    if let Err(err) = port.clear(tokio_serial::ClearBuffer::Input) {
        warn!(%err, "could not flush serial input buffer");
    }

    Ok(port)
}

/// Some Linux serial drivers latch the previous session's line speed; setting
/// it out of band before the open keeps device and host agreed. Failure here
/// is not fatal: the open sets the speed again.
fn pre_open_hook(device: &str, baud: u32) {
    if !cfg!(target_os = "linux") {
        return;
    }

    match std::process::Command::new("stty")
        .args(["-F", device, "speed", &baud.to_string()])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
    {
        Ok(status) if status.success() => debug!(device, baud, "stty pre-open hook applied"),
        Ok(status) => warn!(device, %status, "stty pre-open hook failed"),
        Err(err) => warn!(device, %err, "could not run stty pre-open hook"),
    }
}
