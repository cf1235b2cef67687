use super::{Heartbeat, MAV_AUTOPILOT_ARDUPILOTMEGA};

/// Vehicle families with distinct ArduPilot mode numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Firmware {
    Plane,
    Copter,
    Rover,
}

impl Firmware {
    /// Map a `MAV_TYPE` onto the firmware that flies it.
    pub fn from_mav_type(mav_type: u8) -> Option<Self> {
        match mav_type {
            // Fixed wing, VTOL variants
            1 | 19..=25 => Some(Firmware::Plane),
            // Coaxial, helicopter, quad, hexa, octo, tri, dodeca, deca
            2..=4 | 13..=15 | 29 | 35 => Some(Firmware::Copter),
            // Ground rover, surface boat
            10 | 11 => Some(Firmware::Rover),
            _ => None,
        }
    }

    fn mode_name(&self, custom_mode: u32) -> Option<&'static str> {
        let table: &[(u32, &str)] = match self {
            Firmware::Plane => PLANE_MODES,
            Firmware::Copter => COPTER_MODES,
            Firmware::Rover => ROVER_MODES,
        };

        table
            .iter()
            .find(|(number, _)| *number == custom_mode)
            .map(|(_, name)| *name)
    }
}

/// Name of the flight mode announced by a heartbeat, e.g. `MANUAL`.
pub fn mode_string(heartbeat: &Heartbeat) -> String {
    if heartbeat.autopilot != MAV_AUTOPILOT_ARDUPILOTMEGA {
        return format!("Mode(0x{:02x})", heartbeat.base_mode);
    }

    Firmware::from_mav_type(heartbeat.mav_type)
        .and_then(|fw| fw.mode_name(heartbeat.custom_mode))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Mode({})", heartbeat.custom_mode))
}

const PLANE_MODES: &[(u32, &str)] = &[
    (0, "MANUAL"),
    (1, "CIRCLE"),
    (2, "STABILIZE"),
    (3, "TRAINING"),
    (4, "ACRO"),
    (5, "FBWA"),
    (6, "FBWB"),
    (7, "CRUISE"),
    (8, "AUTOTUNE"),
    (10, "AUTO"),
    (11, "RTL"),
    (12, "LOITER"),
    (13, "TAKEOFF"),
    (14, "AVOID_ADSB"),
    (15, "GUIDED"),
    (16, "INITIALISING"),
    (17, "QSTABILIZE"),
    (18, "QHOVER"),
    (19, "QLOITER"),
    (20, "QLAND"),
    (21, "QRTL"),
    (22, "QAUTOTUNE"),
    (23, "QACRO"),
    (24, "THERMAL"),
];

const COPTER_MODES: &[(u32, &str)] = &[
    (0, "STABILIZE"),
    (1, "ACRO"),
    (2, "ALT_HOLD"),
    (3, "AUTO"),
    (4, "GUIDED"),
    (5, "LOITER"),
    (6, "RTL"),
    (7, "CIRCLE"),
    (9, "LAND"),
    (11, "DRIFT"),
    (13, "SPORT"),
    (14, "FLIP"),
    (15, "AUTOTUNE"),
    (16, "POSHOLD"),
    (17, "BRAKE"),
    (18, "THROW"),
    (19, "AVOID_ADSB"),
    (20, "GUIDED_NOGPS"),
    (21, "SMART_RTL"),
    (22, "FLOWHOLD"),
    (23, "FOLLOW"),
    (24, "ZIGZAG"),
    (25, "SYSTEMID"),
    (26, "AUTOROTATE"),
    (27, "AUTO_RTL"),
];

const ROVER_MODES: &[(u32, &str)] = &[
    (0, "MANUAL"),
    (1, "ACRO"),
    (3, "STEERING"),
    (4, "HOLD"),
    (5, "LOITER"),
    (6, "FOLLOW"),
    (7, "SIMPLE"),
    (10, "AUTO"),
    (11, "RTL"),
    (12, "SMART_RTL"),
    (15, "GUIDED"),
    (16, "INITIALISING"),
];
