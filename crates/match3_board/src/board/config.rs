use serde::{Deserialize, Serialize};

use super::easing::Easing;
use super::error::ConfigError;
use super::generator::DEFAULT_FILL_RETRY_CAP;

/// Largest supported board side.
pub const MAX_BOARD_SIDE: u32 = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    /// Number of distinct match values.
    pub palette_size: u8,
    /// Seconds for a swap, or a swap back.
    pub move_duration: f32,
    pub easing: Easing,
    /// Rerolls allowed per cell while filling. `None` never gives up.
    pub fill_retry_cap: Option<u32>,
    pub collapse_multiplier: f32,
    /// Seconds per row fallen during a collapse, before the multiplier.
    pub collapse_time_per_row: f32,
    /// Seconds matched cells stay highlighted before they clear.
    pub clear_delay: f32,
    /// Rows above its target a refilled piece starts from.
    pub refill_drop_offset: u32,
    pub refill_move_time: f32,
    /// Re-match passes allowed in one resolution before the board is
    /// shuffled and accepted. `None` disables the cap.
    pub max_cascade_passes: Option<u32>,
    /// Clear matches among collapsed pieces before refilling.
    pub chain_before_refill: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            palette_size: 5,
            move_duration: 0.2,
            easing: Easing::default(),
            fill_retry_cap: Some(DEFAULT_FILL_RETRY_CAP),
            collapse_multiplier: 1.0,
            collapse_time_per_row: 0.1,
            clear_delay: 0.2,
            refill_drop_offset: 10,
            refill_move_time: 0.1,
            max_cascade_passes: Some(50),
            chain_before_refill: false,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        let side = self.width.max(self.height);
        if side > MAX_BOARD_SIDE {
            return Err(ConfigError::TooLarge {
                side,
                max: MAX_BOARD_SIDE,
            });
        }
        if self.palette_size == 0 {
            return Err(ConfigError::EmptyPalette);
        }
        for (name, value) in [
            ("move_duration", self.move_duration),
            ("collapse_multiplier", self.collapse_multiplier),
            ("collapse_time_per_row", self.collapse_time_per_row),
            ("clear_delay", self.clear_delay),
            ("refill_move_time", self.refill_move_time),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }
        if self.max_cascade_passes == Some(0) {
            return Err(ConfigError::ZeroCascadeCap);
        }
        Ok(())
    }

    /// Seconds a piece takes to fall `rows` rows.
    pub fn collapse_duration(&self, rows: u32) -> f32 {
        self.collapse_time_per_row * rows as f32 * self.collapse_multiplier
    }

    /// A configuration whose moves take no time, for headless runs.
    pub fn instant(self) -> Self {
        Self {
            move_duration: 0.0,
            collapse_time_per_row: 0.0,
            clear_delay: 0.0,
            refill_move_time: 0.0,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(BoardConfig::default().validate(), Ok(()), "defaults validate");
    }

    #[test]
    fn rejects_degenerate_boards() {
        let zero = BoardConfig {
            width: 0,
            ..BoardConfig::default()
        };
        assert!(
            matches!(zero.validate(), Err(ConfigError::ZeroDimension { .. })),
            "zero width"
        );

        let huge = BoardConfig {
            height: MAX_BOARD_SIDE + 1,
            ..BoardConfig::default()
        };
        assert!(
            matches!(huge.validate(), Err(ConfigError::TooLarge { .. })),
            "height above the maximum"
        );

        let no_palette = BoardConfig {
            palette_size: 0,
            ..BoardConfig::default()
        };
        assert_eq!(no_palette.validate(), Err(ConfigError::EmptyPalette), "empty palette");
    }

    #[test]
    fn rejects_negative_durations() {
        let config = BoardConfig {
            clear_delay: -0.5,
            ..BoardConfig::default()
        };
        assert!(
            matches!(
                config.validate(),
                Err(ConfigError::InvalidDuration { name: "clear_delay", .. })
            ),
            "negative delay"
        );
    }

    #[test]
    fn collapse_duration_scales_with_rows() {
        let config = BoardConfig {
            collapse_multiplier: 2.0,
            ..BoardConfig::default()
        };
        assert!(
            (config.collapse_duration(3) - 0.6).abs() < 1e-5,
            "0.1 s per row, doubled"
        );
    }
}
