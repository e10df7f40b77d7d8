//! HID report parsing utilities
//!
//! Reports are decoded field by field from explicit offsets. Nothing here
//! relies on in-memory struct layout matching the wire layout.

use crate::{HidCommonError, HidCommonResult};

/// Little-endian cursor over a borrowed report buffer.
pub struct ReportParser<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ReportParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            buffer: data,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    fn take<const N: usize>(&mut self) -> HidCommonResult<[u8; N]> {
        let end = self.position.saturating_add(N);
        let bytes = self
            .buffer
            .get(self.position..end)
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or_else(|| {
                HidCommonError::InvalidReport(format!(
                    "Unexpected end of data at offset {} (need {} bytes, {} left)",
                    self.position,
                    N,
                    self.remaining()
                ))
            })?;
        self.position = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> HidCommonResult<u8> {
        let [value] = self.take::<1>()?;
        Ok(value)
    }

    pub fn read_i8(&mut self) -> HidCommonResult<i8> {
        Ok(i8::from_le_bytes(self.take::<1>()?))
    }

    pub fn read_u16_le(&mut self) -> HidCommonResult<u16> {
        Ok(u16::from_le_bytes(self.take::<2>()?))
    }

    pub fn read_i16_le(&mut self) -> HidCommonResult<i16> {
        Ok(i16::from_le_bytes(self.take::<2>()?))
    }

    /// Reads `N` consecutive little-endian `i16` values.
    pub fn read_i16_array<const N: usize>(&mut self) -> HidCommonResult<[i16; N]> {
        let mut values = [0i16; N];
        for value in &mut values {
            *value = self.read_i16_le()?;
        }
        Ok(values)
    }

    pub fn read_array<const N: usize>(&mut self) -> HidCommonResult<[u8; N]> {
        self.take::<N>()
    }

    pub fn skip(&mut self, count: usize) {
        self.position = self.position.saturating_add(count).min(self.buffer.len());
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    pub fn slice(&self) -> &'a [u8] {
        self.buffer
    }
}

pub struct ReportBuilder {
    buffer: Vec<u8>,
}

impl ReportBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    pub fn write_u16_le(&mut self, value: u16) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn write_i16_le(&mut self, value: i16) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn write_i16_slice(&mut self, values: &[i16]) -> &mut Self {
        for value in values {
            self.write_i16_le(*value);
        }
        self
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(data);
        self
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}
