//! Decoder-independent model of the telemetry messages the station
//! reacts to. Each variant carries a subset of the MAVLink fields.

#[cfg(feature = "mavlink")]
pub mod decode;
pub mod flight_mode;
pub mod last_seen;

pub use last_seen::LastSeen;

/// `MAV_TYPE_GCS`, heartbeats from ground stations are not vehicle state.
pub const MAV_TYPE_GCS: u8 = 6;

/// `MAV_AUTOPILOT_ARDUPILOTMEGA`
pub const MAV_AUTOPILOT_ARDUPILOTMEGA: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Heartbeat,
    GpsRaw,
    GpsRawInt,
    Radio,
    RadioStatus,
    HwStatus,
    PowerStatus,
    VfrHud,
    GlobalPositionInt,
    SysStatus,
    MissionCount,
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Heartbeat {
    pub custom_mode: u32,
    pub mav_type: u8,
    pub autopilot: u8,
    pub base_mode: u8,
    pub system_status: u8,
    pub mavlink_version: u8,
}

/// Legacy (MAVLink 0.9) GPS report, heading in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GpsRaw {
    pub fix_type: u8,
    pub hdg: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GpsRawInt {
    pub fix_type: u8,
    /// Course over ground [cdeg], `u16::MAX` when unknown
    pub cog: u16,
    pub satellites_visible: u8,
}

impl GpsRawInt {
    /// Course over ground in degrees, if known.
    pub fn course_deg(&self) -> Option<f32> {
        (self.cog != u16::MAX).then(|| self.cog as f32 / 100.0)
    }
}

/// Link quality of a telemetry radio pair, shared by RADIO and RADIO_STATUS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RadioLink {
    pub rssi: u8,
    pub remrssi: u8,
    pub noise: u8,
    pub remnoise: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HwStatus {
    /// Board voltage [mV]
    pub vcc: u16,
    pub i2c_err: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerStatus {
    /// Board voltage [mV]
    pub vcc: u16,
    /// Servo rail voltage [mV]
    pub vservo: u16,
    pub flags: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VfrHud {
    pub airspeed: f32,
    pub groundspeed: f32,
    pub alt: f32,
    pub climb: f32,
    /// Compass heading [deg]
    pub heading: i16,
    pub throttle: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlobalPositionInt {
    pub lat: i32,
    pub lon: i32,
    pub alt: i32,
    /// Altitude above home [mm]
    pub relative_alt: i32,
    pub hdg: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SysStatus {
    pub sensors_present: u32,
    pub sensors_enabled: u32,
    pub sensors_health: u32,
    pub load: u16,
    pub voltage_battery: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MissionCount {
    pub count: u16,
}

/// A decoded telemetry message, tagged by its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Telemetry {
    Heartbeat(Heartbeat),
    GpsRaw(GpsRaw),
    GpsRawInt(GpsRawInt),
    Radio(RadioLink),
    RadioStatus(RadioLink),
    HwStatus(HwStatus),
    PowerStatus(PowerStatus),
    VfrHud(VfrHud),
    GlobalPositionInt(GlobalPositionInt),
    SysStatus(SysStatus),
    MissionCount(MissionCount),
    /// Any other message, identified by its MAVLink message id
    Other(u32),
}

impl Telemetry {
    pub fn kind(&self) -> MessageKind {
        match self {
            Telemetry::Heartbeat(_) => MessageKind::Heartbeat,
            Telemetry::GpsRaw(_) => MessageKind::GpsRaw,
            Telemetry::GpsRawInt(_) => MessageKind::GpsRawInt,
            Telemetry::Radio(_) => MessageKind::Radio,
            Telemetry::RadioStatus(_) => MessageKind::RadioStatus,
            Telemetry::HwStatus(_) => MessageKind::HwStatus,
            Telemetry::PowerStatus(_) => MessageKind::PowerStatus,
            Telemetry::VfrHud(_) => MessageKind::VfrHud,
            Telemetry::GlobalPositionInt(_) => MessageKind::GlobalPositionInt,
            Telemetry::SysStatus(_) => MessageKind::SysStatus,
            Telemetry::MissionCount(_) => MessageKind::MissionCount,
            Telemetry::Other(id) => MessageKind::Other(*id),
        }
    }
}
