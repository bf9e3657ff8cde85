//! Vibration pattern table and waveform code resolution.
//!
//! The Rival 700's tactile alert engine selects a waveform by a 7-bit code
//! carried in the last byte of the haptic Set_Report payload. Seventeen
//! named waveforms are known; any other code in 0-127 can be requested as a
//! decimal literal.

use crate::error::{Error, Result};

/// Named tactile waveforms supported by the Rival 700.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum VibrationPattern {
    Strong,
    Soft,
    Sharp,
    Ping,
    Bump,
    Double,
    QuickDouble,
    QuickDoubleSoft,
    QuickTriple,
    Buzz,
    LongBuzz,
    Ring,
    LongButLight,
    LightBuzz,
    Tick,
    Pulse,
    StrongPulse,
}

impl VibrationPattern {
    /// All named patterns, in table order.
    pub const ALL: &'static [VibrationPattern] = &[
        VibrationPattern::Strong,
        VibrationPattern::Soft,
        VibrationPattern::Sharp,
        VibrationPattern::Ping,
        VibrationPattern::Bump,
        VibrationPattern::Double,
        VibrationPattern::QuickDouble,
        VibrationPattern::QuickDoubleSoft,
        VibrationPattern::QuickTriple,
        VibrationPattern::Buzz,
        VibrationPattern::LongBuzz,
        VibrationPattern::Ring,
        VibrationPattern::LongButLight,
        VibrationPattern::LightBuzz,
        VibrationPattern::Tick,
        VibrationPattern::Pulse,
        VibrationPattern::StrongPulse,
    ];

    /// Waveform selector byte sent to the device.
    pub fn code(&self) -> u8 {
        match self {
            Self::Strong => 0b000001,
            Self::Soft => 0b000010,
            Self::Sharp => 0b000100,
            Self::Ping => 0b001000,
            Self::Bump => 0b000111,
            Self::Double => 0b001010,
            Self::QuickDouble => 0b011011,
            Self::QuickDoubleSoft => 0b100000,
            Self::QuickTriple => 0b001100,
            Self::Buzz => 0b101111,
            Self::LongBuzz => 0b001111,
            Self::Ring => 0b010000,
            Self::LongButLight => 0b111111,
            Self::LightBuzz => 0b110011,
            Self::Tick => 0b011000,
            Self::Pulse => 0b110101,
            Self::StrongPulse => 0b110100,
        }
    }

    /// Canonical pattern name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Soft => "Soft",
            Self::Sharp => "Sharp",
            Self::Ping => "Ping",
            Self::Bump => "Bump",
            Self::Double => "Double",
            Self::QuickDouble => "QuickDouble",
            Self::QuickDoubleSoft => "QuickDoubleSoft",
            Self::QuickTriple => "QuickTriple",
            Self::Buzz => "Buzz",
            Self::LongBuzz => "LongBuzz",
            Self::Ring => "Ring",
            Self::LongButLight => "LongButLight",
            Self::LightBuzz => "LightBuzz",
            Self::Tick => "Tick",
            Self::Pulse => "Pulse",
            Self::StrongPulse => "StrongPulse",
        }
    }

    /// Look up a pattern by its canonical name. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }
}

impl std::fmt::Display for VibrationPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolve a pattern token to a waveform code.
///
/// Named patterns take precedence; anything else is parsed as a base-10
/// integer and masked to the low 7 bits, which is all the firmware reads.
/// Negative literals mask through two's complement, so every resolved code
/// lands in 0..=127.
pub fn resolve_code(token: &str) -> Result<u8> {
    if let Some(pattern) = VibrationPattern::from_name(token) {
        return Ok(pattern.code());
    }

    match token.parse::<i64>() {
        Ok(n) => Ok((n & 0x7F) as u8),
        Err(_) => Err(Error::InvalidPattern(token.to_string())),
    }
}
