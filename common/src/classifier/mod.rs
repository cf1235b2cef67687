//! Rules turning telemetry into checklist states. Every rule looks at a
//! single message plus the ambient status, and yields at most one item.

use crate::consts::{
    AVIONICS_VCC_MV, CRUISE_ALTITUDE_M, CRUISE_SPEED_MPS, HEADING_TOLERANCE_DEG, HEADING_WRAP_DEG,
    RADIO_MARGIN_DB, SERVO_VCC_MV,
};
use crate::host::HostStatus;
use crate::telemetry::{RadioLink, Telemetry};
use crate::types::checklist::ChecklistItem;
use crate::types::status::{ProtocolVersion, SensorFlags};

pub const PIXHAWK_BOOTED: &str = "Pixhawk Booted";
pub const FLIGHT_MODE_MANUAL: &str = "Flight mode MANUAL";
pub const GNSS_FIX: &str = "GNSS FIX";
pub const RADIO_MARGIN_OK: &str = "Radio Links > 6db margin";
pub const RADIO_MARGIN_LOW: &str = "Radio links > 6db margin";
pub const AVIONICS_POWER: &str = "Avionics Power";
pub const SERVO_POWER: &str = "Servo Power";
pub const WAYPOINTS_LOADED: &str = "Waypoints Loaded";
pub const COMPASS_ACTIVE: &str = "Compass active";
pub const ALTITUDE_OK: &str = "Altitude > 30 m";
pub const AIRSPEED_OK: &str = "Airspeed > 10 m/s";
pub const IMU_CHECK: &str = "IMU Check";

pub type Rule = fn(&Telemetry, &HostStatus) -> Option<ChecklistItem>;

/// All rules, in the order their updates are emitted.
pub const RULES: &[Rule] = &[
    controller_booted,
    manual_mode,
    gnss_fix,
    radio_margin,
    avionics_power,
    servo_power,
    waypoints_loaded,
    compass_active,
    cruise_altitude,
    cruise_speed,
    imu_check,
];

/// Run every rule against `msg`.
pub fn classify(msg: &Telemetry, status: &HostStatus) -> Vec<ChecklistItem> {
    RULES.iter().filter_map(|rule| rule(msg, status)).collect()
}

fn controller_booted(msg: &Telemetry, status: &HostStatus) -> Option<ChecklistItem> {
    let Telemetry::Heartbeat(_) = msg else {
        return None;
    };
    Some(ChecklistItem::new(PIXHAWK_BOOTED, !status.heartbeat_error))
}

/// Evaluated for every message, not only heartbeats.
fn manual_mode(_: &Telemetry, status: &HostStatus) -> Option<ChecklistItem> {
    Some(ChecklistItem::new(FLIGHT_MODE_MANUAL, status.flight_mode == "MANUAL"))
}

/// Whether `fix_type` counts as a usable fix for the given protocol.
pub fn has_gnss_fix(fix_type: u8, protocol: ProtocolVersion) -> bool {
    match protocol {
        ProtocolVersion::V1_0 => fix_type == 2,
        ProtocolVersion::Legacy => fix_type >= 3,
    }
}

fn gnss_fix(msg: &Telemetry, status: &HostStatus) -> Option<ChecklistItem> {
    let fix_type = match msg {
        Telemetry::GpsRaw(gps) => gps.fix_type,
        Telemetry::GpsRawInt(gps) => gps.fix_type,
        _ => return None,
    };
    Some(ChecklistItem::new(GNSS_FIX, has_gnss_fix(fix_type, status.protocol)))
}

fn radio_margin(msg: &Telemetry, _: &HostStatus) -> Option<ChecklistItem> {
    let (Telemetry::Radio(link) | Telemetry::RadioStatus(link)) = msg else {
        return None;
    };

    // Both branches report 0, only the label casing tells them apart.
    let label = if low_margin(link) {
        RADIO_MARGIN_LOW
    } else {
        RADIO_MARGIN_OK
    };
    Some(ChecklistItem::new(label, false))
}

fn low_margin(link: &RadioLink) -> bool {
    let margin = |signal: u8, noise: u8| (signal as u16) < noise as u16 + RADIO_MARGIN_DB;
    margin(link.rssi, link.noise) || margin(link.remrssi, link.remnoise)
}

fn avionics_power(msg: &Telemetry, _: &HostStatus) -> Option<ChecklistItem> {
    let Telemetry::HwStatus(hw) = msg else {
        return None;
    };
    Some(ChecklistItem::new(AVIONICS_POWER, AVIONICS_VCC_MV.contains(&hw.vcc)))
}

fn servo_power(msg: &Telemetry, _: &HostStatus) -> Option<ChecklistItem> {
    let Telemetry::PowerStatus(power) = msg else {
        return None;
    };
    Some(ChecklistItem::new(SERVO_POWER, SERVO_VCC_MV.contains(&power.vservo)))
}

fn waypoints_loaded(msg: &Telemetry, status: &HostStatus) -> Option<ChecklistItem> {
    let Telemetry::Heartbeat(_) = msg else {
        return None;
    };
    Some(ChecklistItem::new(WAYPOINTS_LOADED, status.waypoint_count > 0))
}

/// Compass and GPS agree when their headings differ by less than the
/// tolerance, in either direction around north.
pub fn headings_agree(delta_deg: f32) -> bool {
    let delta = delta_deg.abs();
    delta < HEADING_TOLERANCE_DEG || delta > HEADING_WRAP_DEG
}

fn compass_active(msg: &Telemetry, status: &HostStatus) -> Option<ChecklistItem> {
    let gps_heading = match msg {
        Telemetry::GpsRaw(gps) => gps.hdg,
        Telemetry::GpsRawInt(gps) => gps.course_deg()?,
        _ => return None,
    };
    let compass_heading = status.last_seen.vfr_heading()?;

    Some(ChecklistItem::new(
        COMPASS_ACTIVE,
        headings_agree(gps_heading - compass_heading),
    ))
}

fn cruise_altitude(msg: &Telemetry, status: &HostStatus) -> Option<ChecklistItem> {
    let Telemetry::VfrHud(_) = msg else {
        return None;
    };
    let rel_alt = status.last_seen.relative_alt_mm() as f32 * 1.0e-3;
    Some(ChecklistItem::new(ALTITUDE_OK, rel_alt > CRUISE_ALTITUDE_M))
}

fn cruise_speed(msg: &Telemetry, _: &HostStatus) -> Option<ChecklistItem> {
    let Telemetry::VfrHud(hud) = msg else {
        return None;
    };
    let fast = hud.airspeed > CRUISE_SPEED_MPS || hud.groundspeed > CRUISE_SPEED_MPS;
    Some(ChecklistItem::new(AIRSPEED_OK, fast))
}

/// Note the polarity: a present and healthy INS yields an unchecked item.
pub fn imu_state(enabled: u32, health: u32) -> bool {
    let present = SensorFlags::from_bits_retain(enabled).contains(SensorFlags::INS);
    let healthy = SensorFlags::from_bits_retain(health).contains(SensorFlags::INS);
    !present || !healthy
}

fn imu_check(msg: &Telemetry, _: &HostStatus) -> Option<ChecklistItem> {
    let Telemetry::SysStatus(sys) = msg else {
        return None;
    };
    Some(ChecklistItem::new(
        IMU_CHECK,
        imu_state(sys.sensors_enabled, sys.sensors_health),
    ))
}
