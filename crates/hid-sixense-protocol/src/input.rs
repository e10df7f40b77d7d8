//! Motion report parsing for Sixense controllers

use super::{
    HYDRA_REPORT_SIZE, REPORT_HEADER_SIZE, SENSOR_COUNT, SENSOR_REPORT_SIZE, SixenseError,
    SixenseResult,
};
use openmotion_hid_common::{HidCommonResult, ReportBuilder, ReportParser};

/// State of one handheld sensor as carried in a motion report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorReport {
    pub sensor: u8,
    pub counter: u8,
    pub position: [i16; 3],
    /// W, X, Y, Z in raw integer units.
    pub quaternion: [i16; 4],
    pub buttons: u8,
    pub axis: [i16; 2],
    pub trigger: u8,
}

impl SensorReport {
    fn read(parser: &mut ReportParser<'_>) -> HidCommonResult<Self> {
        Ok(Self {
            sensor: parser.read_u8()?,
            counter: parser.read_u8()?,
            position: parser.read_i16_array()?,
            quaternion: parser.read_i16_array()?,
            buttons: parser.read_u8()?,
            axis: parser.read_i16_array()?,
            trigger: parser.read_u8()?,
        })
    }

    fn write(&self, builder: &mut ReportBuilder) {
        builder
            .write_u8(self.sensor)
            .write_u8(self.counter)
            .write_i16_slice(&self.position)
            .write_i16_slice(&self.quaternion)
            .write_u8(self.buttons)
            .write_i16_slice(&self.axis)
            .write_u8(self.trigger);
    }

    pub fn is_pressed(&self, mask: u8) -> bool {
        self.buttons & mask != 0
    }
}

/// One complete report from the motion interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HydraReport {
    pub reserved: [u8; REPORT_HEADER_SIZE],
    pub sensors: [SensorReport; SENSOR_COUNT],
    pub checksum: u16,
}

impl HydraReport {
    /// Decode a report. `data` must be exactly [`HYDRA_REPORT_SIZE`] bytes;
    /// short and oversized buffers are both rejected.
    pub fn parse(data: &[u8]) -> SixenseResult<Self> {
        if data.len() != HYDRA_REPORT_SIZE {
            return Err(SixenseError::InvalidReportSize {
                expected: HYDRA_REPORT_SIZE,
                actual: data.len(),
            });
        }

        let mut parser = ReportParser::new(data);

        let reserved = parser.read_array()?;
        let left = SensorReport::read(&mut parser)?;
        let right = SensorReport::read(&mut parser)?;
        let checksum = parser.read_u16_le()?;

        Ok(Self {
            reserved,
            sensors: [left, right],
            checksum,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut builder = ReportBuilder::with_capacity(HYDRA_REPORT_SIZE);
        builder.write_bytes(&self.reserved);
        for sensor in &self.sensors {
            sensor.write(&mut builder);
        }
        builder.write_u16_le(self.checksum);
        builder.into_inner()
    }

    pub fn sensor(&self, index: usize) -> Option<&SensorReport> {
        self.sensors.get(index)
    }
}

/// Byte offset of sensor block `index` within a report.
pub const fn sensor_offset(index: usize) -> usize {
    REPORT_HEADER_SIZE + index * SENSOR_REPORT_SIZE
}
