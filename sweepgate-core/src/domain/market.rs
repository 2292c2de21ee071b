//! Market vocabulary shared by snapshots, gates and the journal.
//!
//! All labels are externally computed and tagged; nothing here derives
//! indicator values. Each enum serializes to the label used by the journal
//! and the snapshot files, and parses case-insensitively from the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A label that does not name any variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} label: '{label}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
}

impl ParseLabelError {
    fn new(kind: &'static str, label: &str) -> Self {
        Self {
            kind,
            label: label.to_string(),
        }
    }
}

/// Desired trade direction (also the direction of a structural shift).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::Short => "SHORT",
        }
    }

    /// Bias label a lower timeframe must show to support this direction.
    pub fn aligned_bias(&self) -> Bias {
        match self {
            Self::Long => Bias::Bull,
            Self::Short => Bias::Bear,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LONG" => Ok(Self::Long),
            "SHORT" => Ok(Self::Short),
            _ => Err(ParseLabelError::new("direction", s)),
        }
    }
}

/// Where price sits relative to VWAP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VwapSide {
    Above,
    Below,
    #[default]
    Touching,
}

impl VwapSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Above => "ABOVE",
            Self::Below => "BELOW",
            Self::Touching => "TOUCHING",
        }
    }
}

impl fmt::Display for VwapSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VwapSide {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ABOVE" => Ok(Self::Above),
            "BELOW" => Ok(Self::Below),
            "TOUCHING" => Ok(Self::Touching),
            _ => Err(ParseLabelError::new("vwap side", s)),
        }
    }
}

/// Direction VWAP itself is sloping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VwapSlope {
    Up,
    Down,
    #[default]
    Flat,
}

impl VwapSlope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Flat => "FLAT",
        }
    }

    pub fn is_trending(&self) -> bool {
        !matches!(self, Self::Flat)
    }
}

impl fmt::Display for VwapSlope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VwapSlope {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UP" => Ok(Self::Up),
            "DOWN" => Ok(Self::Down),
            "FLAT" => Ok(Self::Flat),
            _ => Err(ParseLabelError::new("vwap slope", s)),
        }
    }
}

/// Structural bias on one timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Bull,
    Bear,
    #[default]
    Neutral,
}

impl Bias {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bull => "BULL",
            Self::Bear => "BEAR",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bias {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BULL" => Ok(Self::Bull),
            "BEAR" => Ok(Self::Bear),
            "NEUTRAL" => Ok(Self::Neutral),
            _ => Err(ParseLabelError::new("bias", s)),
        }
    }
}

/// Trading session the snapshot was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Session {
    Asia,
    London,
    #[default]
    #[serde(rename = "NY")]
    Ny,
}

impl Session {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asia => "Asia",
            Self::London => "London",
            Self::Ny => "NY",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Session {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASIA" => Ok(Self::Asia),
            "LONDON" => Ok(Self::London),
            "NY" => Ok(Self::Ny),
            _ => Err(ParseLabelError::new("session", s)),
        }
    }
}

/// Reference level whose liquidity was swept.
///
/// Labels outside the catalogue deserialize as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepType {
    #[serde(rename = "London_Low")]
    LondonLow,
    #[serde(rename = "London_High")]
    LondonHigh,
    #[serde(rename = "Asia_Low")]
    AsiaLow,
    #[serde(rename = "Asia_High")]
    AsiaHigh,
    #[serde(rename = "PDL")]
    PriorDayLow,
    #[serde(rename = "PDH")]
    PriorDayHigh,
    #[serde(rename = "Midnight_Low")]
    MidnightLow,
    #[serde(rename = "Midnight_High")]
    MidnightHigh,
    #[serde(rename = "Settlement_Low")]
    SettlementLow,
    #[serde(rename = "Settlement_High")]
    SettlementHigh,
    #[serde(other)]
    Other,
}

impl SweepType {
    pub const ALL: [SweepType; 11] = [
        Self::LondonLow,
        Self::LondonHigh,
        Self::AsiaLow,
        Self::AsiaHigh,
        Self::PriorDayLow,
        Self::PriorDayHigh,
        Self::MidnightLow,
        Self::MidnightHigh,
        Self::SettlementLow,
        Self::SettlementHigh,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LondonLow => "London_Low",
            Self::LondonHigh => "London_High",
            Self::AsiaLow => "Asia_Low",
            Self::AsiaHigh => "Asia_High",
            Self::PriorDayLow => "PDL",
            Self::PriorDayHigh => "PDH",
            Self::MidnightLow => "Midnight_Low",
            Self::MidnightHigh => "Midnight_High",
            Self::SettlementLow => "Settlement_Low",
            Self::SettlementHigh => "Settlement_High",
            Self::Other => "Other",
        }
    }

    /// Prior-session, prior-day, midnight or settlement low.
    pub fn is_reference_low(&self) -> bool {
        matches!(
            self,
            Self::LondonLow | Self::PriorDayLow | Self::MidnightLow | Self::SettlementLow
        )
    }

    /// Prior-session, prior-day, midnight or settlement high.
    pub fn is_reference_high(&self) -> bool {
        matches!(
            self,
            Self::LondonHigh | Self::PriorDayHigh | Self::MidnightHigh | Self::SettlementHigh
        )
    }

    pub fn is_asia_extreme(&self) -> bool {
        matches!(self, Self::AsiaLow | Self::AsiaHigh)
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SweepType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .unwrap_or(Self::Other))
    }
}
