/// MAVLink protocol generation spoken by the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtocolVersion {
    /// MAVLink 0.9, announced by a heartbeat `mavlink_version` below 3
    Legacy,
    /// MAVLink 1.0 and later
    #[default]
    V1_0,
}

impl ProtocolVersion {
    pub fn from_heartbeat(mavlink_version: u8) -> Self {
        if mavlink_version >= 3 {
            Self::V1_0
        } else {
            Self::Legacy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorFlags(u32);

bitflags::bitflags! {
    /// Subset of the `MAV_SYS_STATUS_SENSOR` bitmask reported in the
    /// present, enabled and health fields of SYS_STATUS.
    impl SensorFlags: u32 {

        /// **Bit 0** - 3D gyroscope
        const GYRO_3D = 1 << 0;

        /// **Bit 1** - 3D accelerometer
        const ACCEL_3D = 1 << 1;

        /// **Bit 2** - 3D magnetometer
        const MAG_3D = 1 << 2;

        /// **Bit 3** - Absolute pressure
        const ABSOLUTE_PRESSURE = 1 << 3;

        /// **Bit 4** - Differential pressure (airspeed)
        const DIFFERENTIAL_PRESSURE = 1 << 4;

        /// **Bit 5** - GPS
        const GPS = 1 << 5;

        /// **Bit 21** - Attitude and heading reference system
        const AHRS = 1 << 21;

        /// The inertial sensors, both gyroscope and accelerometer.
        const INS = Self::GYRO_3D.bits() | Self::ACCEL_3D.bits();

        // Keep unknown bits when converting from the raw field
        const _ = !0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ins_is_gyro_and_accel() {
        assert_eq!(0x03, SensorFlags::INS.bits());
    }

    #[test]
    fn test_ins_needs_all_bits() {
        let only_gyro = SensorFlags::from_bits_retain(0x01);
        assert!(!only_gyro.contains(SensorFlags::INS));

        let full = SensorFlags::from_bits_retain(0xFFFF_FFFF);
        assert!(full.contains(SensorFlags::INS));
    }

    #[test]
    fn test_protocol_from_heartbeat() {
        assert_eq!(ProtocolVersion::Legacy, ProtocolVersion::from_heartbeat(2));
        assert_eq!(ProtocolVersion::V1_0, ProtocolVersion::from_heartbeat(3));
    }
}
