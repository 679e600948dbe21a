//! Easing curves named after the tweening library's vocabulary
//!
//! Maps input [0, 1] to output with the same shapes the page's tweening
//! library uses, so a CSS-transition fallback and the library agree on how
//! a given animation feels.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Easing curve used for tweened effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EasingType {
    /// Constant speed
    Linear,
    /// Quadratic ease-in-out
    Power1InOut,
    /// Cubic ease-out
    Power2Out,
    /// Cubic ease-in-out
    Power2InOut,
    /// Decaying sine overshoot
    ElasticOut { amplitude: f64, period: f64 },
}

impl EasingType {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value, clamped to [0, 1]
    ///
    /// # Returns
    /// Eased value; exactly 0 at t=0 and exactly 1 at t=1. Elastic curves
    /// overshoot 1 in between.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            EasingType::Linear => t,
            EasingType::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv / 2.0
                }
            }
            EasingType::Power2Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            EasingType::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            EasingType::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }

    /// Closest CSS `transition-timing-function` for the curve
    pub fn css_timing(&self) -> &'static str {
        match self {
            EasingType::Linear => "linear",
            EasingType::Power1InOut => "cubic-bezier(0.455, 0.03, 0.515, 0.955)",
            EasingType::Power2Out => "cubic-bezier(0.215, 0.61, 0.355, 1)",
            EasingType::Power2InOut => "cubic-bezier(0.645, 0.045, 0.355, 1)",
            // CSS has no elastic curve; back-out is the nearest overshoot
            EasingType::ElasticOut { .. } => "cubic-bezier(0.34, 1.56, 0.64, 1)",
        }
    }
}

/// f(t) = 1 + a·2^(-10t)·sin((t - s)·2π/p), s = p/2π·asin(1/a)
fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    let amplitude = amplitude.max(1.0);
    let period = if period > 0.0 { period } else { 0.3 };
    let shift = period / (2.0 * PI) * (1.0 / amplitude).asin();
    1.0 + amplitude * 2.0_f64.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / period).sin()
}

impl fmt::Display for EasingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EasingType::Linear => f.write_str("linear"),
            EasingType::Power1InOut => f.write_str("power1.inOut"),
            EasingType::Power2Out => f.write_str("power2.out"),
            EasingType::Power2InOut => f.write_str("power2.inOut"),
            EasingType::ElasticOut { amplitude, period } => {
                write!(f, "elastic.out({}, {})", amplitude, period)
            }
        }
    }
}

impl FromStr for EasingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "linear" | "none" => return Ok(EasingType::Linear),
            "power1.inout" => return Ok(EasingType::Power1InOut),
            "power2.out" => return Ok(EasingType::Power2Out),
            "power2.inout" => return Ok(EasingType::Power2InOut),
            "elastic.out" => {
                return Ok(EasingType::ElasticOut {
                    amplitude: 1.0,
                    period: 0.3,
                })
            }
            _ => {}
        }

        let args = name
            .strip_prefix("elastic.out(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| format!("unknown easing: {}", s))?;
        let mut parts = args.split(',').map(|p| p.trim().parse::<f64>());
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(amplitude)), Some(Ok(period)), None) => {
                Ok(EasingType::ElasticOut { amplitude, period })
            }
            (Some(Ok(amplitude)), None, None) => Ok(EasingType::ElasticOut {
                amplitude,
                period: 0.3,
            }),
            _ => Err(format!("invalid elastic.out arguments: {}", s)),
        }
    }
}

impl TryFrom<String> for EasingType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EasingType> for String {
    fn from(value: EasingType) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 5] = [
        EasingType::Linear,
        EasingType::Power1InOut,
        EasingType::Power2Out,
        EasingType::Power2InOut,
        EasingType::ElasticOut {
            amplitude: 1.0,
            period: 0.5,
        },
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert!((easing.apply(0.0) - 0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in [
            EasingType::Linear,
            EasingType::Power1InOut,
            EasingType::Power2Out,
            EasingType::Power2InOut,
        ] {
            let mut prev = 0.0;
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_elastic_overshoots() {
        let easing: EasingType = "elastic.out(1, 0.5)".parse().unwrap();
        let peak = (1..100)
            .map(|i| easing.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("power2.out".parse::<EasingType>().unwrap(), EasingType::Power2Out);
        assert_eq!("Power2.InOut".parse::<EasingType>().unwrap(), EasingType::Power2InOut);
        assert_eq!(
            "elastic.out".parse::<EasingType>().unwrap(),
            EasingType::ElasticOut {
                amplitude: 1.0,
                period: 0.3
            }
        );
        assert!("elastic.out(1, x)".parse::<EasingType>().is_err());
        assert!("bounce".parse::<EasingType>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for easing in ALL {
            assert_eq!(easing.to_string().parse::<EasingType>().unwrap(), easing);
        }
        assert_eq!(ALL[4].to_string(), "elastic.out(1, 0.5)");
    }
}
