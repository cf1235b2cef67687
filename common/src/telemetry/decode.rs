//! Conversion of messages decoded by the `mavlink` crate into the
//! telemetry model.

use mavlink::ardupilotmega::MavMessage;
use mavlink::Message;

use super::{
    GlobalPositionInt, GpsRawInt, Heartbeat, HwStatus, MissionCount, PowerStatus, RadioLink,
    SysStatus, Telemetry, VfrHud,
};

impl From<&MavMessage> for Telemetry {
    fn from(msg: &MavMessage) -> Self {
        match msg {
            MavMessage::HEARTBEAT(data) => Telemetry::Heartbeat(Heartbeat {
                custom_mode: data.custom_mode,
                mav_type: data.mavtype as u8,
                autopilot: data.autopilot as u8,
                base_mode: data.base_mode.bits(),
                system_status: data.system_status as u8,
                mavlink_version: data.mavlink_version,
            }),
            MavMessage::GPS_RAW_INT(data) => Telemetry::GpsRawInt(GpsRawInt {
                fix_type: data.fix_type as u8,
                cog: data.cog,
                satellites_visible: data.satellites_visible,
            }),
            MavMessage::RADIO(data) => Telemetry::Radio(RadioLink {
                rssi: data.rssi,
                remrssi: data.remrssi,
                noise: data.noise,
                remnoise: data.remnoise,
            }),
            MavMessage::RADIO_STATUS(data) => Telemetry::RadioStatus(RadioLink {
                rssi: data.rssi,
                remrssi: data.remrssi,
                noise: data.noise,
                remnoise: data.remnoise,
            }),
            MavMessage::HWSTATUS(data) => Telemetry::HwStatus(HwStatus {
                vcc: data.Vcc,
                i2c_err: data.I2Cerr,
            }),
            MavMessage::POWER_STATUS(data) => Telemetry::PowerStatus(PowerStatus {
                vcc: data.Vcc,
                vservo: data.Vservo,
                flags: data.flags.bits(),
            }),
            MavMessage::VFR_HUD(data) => Telemetry::VfrHud(VfrHud {
                airspeed: data.airspeed,
                groundspeed: data.groundspeed,
                alt: data.alt,
                climb: data.climb,
                heading: data.heading,
                throttle: data.throttle,
            }),
            MavMessage::GLOBAL_POSITION_INT(data) => {
                Telemetry::GlobalPositionInt(GlobalPositionInt {
                    lat: data.lat,
                    lon: data.lon,
                    alt: data.alt,
                    relative_alt: data.relative_alt,
                    hdg: data.hdg,
                })
            }
            MavMessage::SYS_STATUS(data) => Telemetry::SysStatus(SysStatus {
                sensors_present: data.onboard_control_sensors_present.bits(),
                sensors_enabled: data.onboard_control_sensors_enabled.bits(),
                sensors_health: data.onboard_control_sensors_health.bits(),
                load: data.load,
                voltage_battery: data.voltage_battery,
            }),
            MavMessage::MISSION_COUNT(data) => {
                Telemetry::MissionCount(MissionCount { count: data.count })
            }
            other => Telemetry::Other(other.message_id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use mavlink::ardupilotmega::{self as apm, MavMessage};

    use super::*;

    #[test]
    fn test_decode_vfr_hud() {
        let msg = MavMessage::VFR_HUD(apm::VFR_HUD_DATA {
            airspeed: 12.5,
            groundspeed: 11.0,
            alt: 100.0,
            climb: 0.5,
            heading: 270,
            throttle: 55,
        });

        let Telemetry::VfrHud(hud) = Telemetry::from(&msg) else {
            panic!("VFR_HUD decoded as something else");
        };
        assert_eq!(270, hud.heading);
        assert_eq!(12.5, hud.airspeed);
    }

    #[test]
    fn test_decode_unhandled_keeps_id() {
        let msg = MavMessage::SYSTEM_TIME(apm::SYSTEM_TIME_DATA::default());
        assert_eq!(Telemetry::Other(2), Telemetry::from(&msg));
    }
}
