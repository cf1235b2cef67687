use core::time::Duration;

/// Period of the UI tick which drains pending checklist updates
pub const UI_TICK_PERIOD: Duration = Duration::from_millis(100);

/// How long the UI tick waits on the shutdown signal before draining
pub const SHUTDOWN_POLL: Duration = Duration::from_millis(1);

/// Upper bound on how long the main process waits for the UI to exit
pub const CLOSE_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Vehicle heartbeats older than this raise the heartbeat error flag
pub const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(5);

/// Number of checklist updates the UI side buffers between ticks
pub const STATE_CHANNEL_CAPACITY: usize = 256;

/// Default MAVLink address the station listens on
pub const DEFAULT_CONNECTION: &str = "udpin:0.0.0.0:14550";

/// Default title of the checklist window
pub const DEFAULT_TITLE: &str = "Instructor Station";

/// Argument which makes the binary run as the checklist UI process
pub const UI_ROLE_FLAG: &str = "--ui";

/// Environment variable pointing to an optional TOML config file
pub const CONFIG_ENV: &str = "INSTRUCTOR_CONFIG";

/// Required margin between signal and noise on both radio ends [dB]
pub const RADIO_MARGIN_DB: u16 = 6;

/// Accepted avionics rail voltage [mV]
pub const AVIONICS_VCC_MV: core::ops::RangeInclusive<u16> = 4600..=5300;

/// Accepted servo rail voltage [mV]
pub const SERVO_VCC_MV: core::ops::RangeInclusive<u16> = 4900..=6500;

/// Compass and GPS heading must agree within this many degrees
pub const HEADING_TOLERANCE_DEG: f32 = 10.0;

/// Differences above this are treated as agreeing across north [deg]
pub const HEADING_WRAP_DEG: f32 = 355.0;

/// Minimum relative altitude before cruise [m]
pub const CRUISE_ALTITUDE_M: f32 = 30.0;

/// Minimum air or ground speed before cruise [m/s]
pub const CRUISE_SPEED_MPS: f32 = 10.0;
