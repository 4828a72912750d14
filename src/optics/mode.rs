use std::fmt;
use std::str::FromStr;

use crate::foundation::error::HypnoticError;

/// Geometry of the illusion pattern.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum OpticMode {
    /// Single-armed spiral with a fine radial density.
    #[default]
    Spiral1,
    /// Stepped, tightly wound spiral.
    Spiral2,
    /// Parabolic bands opening along the vertical axis.
    Parabola,
    /// Horizontal bands that depend on the row only.
    HorizontalStripe,
}

impl OpticMode {
    /// Every mode, in declaration order.
    pub const ALL: [OpticMode; 4] = [
        OpticMode::Spiral1,
        OpticMode::Spiral2,
        OpticMode::Parabola,
        OpticMode::HorizontalStripe,
    ];

    /// Canonical property identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spiral1 => "spiral1",
            Self::Spiral2 => "spiral2",
            Self::Parabola => "parabola",
            Self::HorizontalStripe => "horizontalStripe",
        }
    }
}

impl fmt::Display for OpticMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpticMode {
    type Err = HypnoticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "spiral1" => Ok(Self::Spiral1),
            "spiral2" => Ok(Self::Spiral2),
            "parabola" => Ok(Self::Parabola),
            "horizontalstripe" => Ok(Self::HorizontalStripe),
            _ => Err(HypnoticError::validation(format!(
                "unknown optic mode '{}'",
                s.trim()
            ))),
        }
    }
}

impl TryFrom<String> for OpticMode {
    type Error = HypnoticError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OpticMode> for String {
    fn from(mode: OpticMode) -> Self {
        mode.as_str().to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/optics/mode.rs"]
mod tests;
