//! Market snapshot, the immutable input of one evaluation.

use serde::{Deserialize, Serialize};

use super::market::{Bias, Direction, Session, SweepType, VwapSide, VwapSlope};
use crate::profiles::defaults::FALLBACK_MODEL;

/// Indicator state and model-selection context for one evaluation.
///
/// `adx_sma3` / `adx_sma6` are smoothed series computed upstream; the engine
/// only ever takes their difference (see [`MarketSnapshot::adx_slope`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketSnapshot {
    pub price: f64,
    pub vwap_side: VwapSide,
    pub vwap_slope: VwapSlope,

    pub adx_now: f64,
    pub adx_sma3: f64,
    pub adx_sma6: f64,
    /// Below this ADX the setup is flagged unsafe regardless of gates. 0 disables it.
    #[serde(alias = "adx_kill")]
    pub adx_kill_floor: f64,

    pub session: Session,
    /// Confirmed structural shift, `None` when no shift has printed.
    pub structural_shift: Option<Direction>,
    pub htf_bias: Bias,
    pub mid_bias: Bias,
    pub low_bias: Bias,

    /// Requested profile key; may be overridden by the model selector.
    pub liquidity_model: String,
    pub sweep_type: Option<SweepType>,
    pub bars_since_sweep: u32,

    /// Caller's hint only; the profile's flag decides the VWAP gate.
    pub require_vwap_flip: bool,
    pub micro_confirmation: bool,
    /// Bar closed through VWAP; consulted only by close-confirm profiles.
    pub close_confirmed: bool,

    /// Caller floor, combined with the profile's via max. 0 leaves the profile in charge.
    pub adx_min: f64,
    pub adx_slope_min: f64,
}

impl MarketSnapshot {
    /// ADX slope proxy: SMA3 minus SMA6.
    pub fn adx_slope(&self) -> f64 {
        self.adx_sma3 - self.adx_sma6
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl Default for MarketSnapshot {
    fn default() -> Self {
        Self {
            price: 0.0,
            vwap_side: VwapSide::Touching,
            vwap_slope: VwapSlope::Flat,
            adx_now: 0.0,
            adx_sma3: 0.0,
            adx_sma6: 0.0,
            adx_kill_floor: 20.0,
            session: Session::Ny,
            structural_shift: None,
            htf_bias: Bias::Neutral,
            mid_bias: Bias::Neutral,
            low_bias: Bias::Neutral,
            liquidity_model: FALLBACK_MODEL.to_string(),
            sweep_type: None,
            bars_since_sweep: 5,
            require_vwap_flip: true,
            micro_confirmation: true,
            close_confirmed: false,
            adx_min: 0.0,
            adx_slope_min: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_is_sma3_minus_sma6() {
        let snap = MarketSnapshot {
            adx_sma3: 30.5,
            adx_sma6: 28.8,
            ..Default::default()
        };
        assert!((snap.adx_slope() - 1.7).abs() < 1e-9);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let snap = MarketSnapshot::from_toml(
            r#"
price = 25107.0
vwap_side = "ABOVE"
vwap_slope = "UP"
adx_now = 31.0
structural_shift = "LONG"
sweep_type = "Asia_Low"
adx_kill = 18.0
"#,
        )
        .unwrap();
        assert_eq!(snap.vwap_side, VwapSide::Above);
        assert_eq!(snap.structural_shift, Some(Direction::Long));
        assert_eq!(snap.sweep_type, Some(SweepType::AsiaLow));
        assert_eq!(snap.adx_kill_floor, 18.0);
        assert_eq!(snap.session, Session::Ny);
        assert_eq!(snap.bars_since_sweep, 5);
        assert_eq!(snap.liquidity_model, FALLBACK_MODEL);
        assert_eq!(snap.adx_min, 0.0);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = MarketSnapshot::from_toml("micro_confirmation_present = false").unwrap_err();
        assert!(err.to_string().contains("micro_confirmation_present"));
        assert!(MarketSnapshot::from_toml("adx_kill = 18.0\nadx_kill_floor_x = 1.0").is_err());
    }

    #[test]
    fn bad_label_is_a_parse_error() {
        assert!(MarketSnapshot::from_toml("vwap_side = \"SIDEWAYS\"").is_err());
    }
}
