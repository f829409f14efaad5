use crossterm::style::Color;

use crate::Coords;

/// The four collectible kinds. Colors follow the classic arcade palette.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    SpeedBoost,
    SlowDown,
    ScoreMultiplier,
    Invincibility,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::SlowDown,
        PowerUpKind::ScoreMultiplier,
        PowerUpKind::Invincibility,
    ];

    pub fn color(self) -> Color {
        match self {
            PowerUpKind::SpeedBoost => Color::Rgb { r: 255, g: 255, b: 0 },
            PowerUpKind::SlowDown => Color::Rgb { r: 128, g: 0, b: 128 },
            PowerUpKind::ScoreMultiplier => Color::Rgb { r: 255, g: 165, b: 0 },
            PowerUpKind::Invincibility => Color::Rgb { r: 0, g: 255, b: 255 },
        }
    }

    /// Every kind currently lasts five seconds once collected.
    pub fn duration_ms(self) -> u64 {
        5_000
    }
}

/// A collectible instance sitting on the board. Distinct from the effect a
/// collection produces: the instance slot may refill while an earlier
/// effect is still running.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Coords,
}

/// The timed effect resulting from a collection. At most one is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub expires_at_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_a_distinct_color() {
        for (i, a) in PowerUpKind::ALL.iter().enumerate() {
            for b in PowerUpKind::ALL[i + 1..].iter() {
                assert_ne!(a.color(), b.color());
            }
        }
    }
}
