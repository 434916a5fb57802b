use core::f32::consts::PI;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Interpolation curve applied to piece moves.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseOut,
    EaseIn,
    SmoothStep,
    #[default]
    SmootherStep,
}

impl Easing {
    /// Maps linear progress `t` to eased progress. `t` is clamped to `0..=1`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => (t * PI * 0.5).sin(),
            Self::EaseIn => 1.0 - (t * PI * 0.5).cos(),
            Self::SmoothStep => t * t * 2.0f32.mul_add(-t, 3.0),
            Self::SmootherStep => t * t * t * t.mul_add(t.mul_add(6.0, -15.0), 10.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_curve_starts_at_zero_and_ends_at_one() {
        for easing in Easing::iter() {
            assert!(easing.apply(0.0).abs() < 1e-5, "{easing} starts at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{easing} ends at 1");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in Easing::iter() {
            let samples = (0..=20).map(|i| easing.apply(i as f32 / 20.0)).collect::<Vec<_>>();
            assert!(
                samples.windows(2).all(|pair| pair.first() <= pair.last()),
                "{easing} never moves backwards"
            );
        }
    }

    #[test]
    fn progress_outside_unit_range_is_clamped() {
        assert!((Easing::Linear.apply(3.0) - 1.0).abs() < f32::EPSILON, "clamped above");
        assert!(Easing::SmoothStep.apply(-1.0).abs() < f32::EPSILON, "clamped below");
    }

    #[test]
    fn names_parse_back() {
        assert_eq!("ease-out".parse::<Easing>(), Ok(Easing::EaseOut), "kebab-case names");
        assert_eq!(Easing::SmootherStep.to_string(), "smoother-step", "display matches");
    }
}
