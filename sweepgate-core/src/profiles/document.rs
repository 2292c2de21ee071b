//! Persisted profile document: whole-store dump and field-wise merge.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{BiasMode, Profile, VwapRelation};

use super::ProfileError;

/// Partial profile as it may appear in a saved document. Absent fields keep
/// their current value; unrecognized fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfilePatch {
    bias_mode: Option<BiasMode>,
    adx_min: Option<f64>,
    post_sweep_delay: Option<u32>,
    require_vwap_flip: Option<bool>,
    expected_vwap: Option<VwapRelation>,
    close_confirm: Option<bool>,
    grade_weights: Option<WeightsPatch>,
    notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WeightsPatch {
    sweep: Option<u32>,
    mss: Option<u32>,
    vwap: Option<u32>,
    adx: Option<u32>,
    bias: Option<u32>,
}

impl ProfilePatch {
    fn apply(self, p: &mut Profile) {
        if let Some(v) = self.bias_mode {
            p.bias_mode = v;
        }
        if let Some(v) = self.adx_min {
            p.adx_min = v;
        }
        if let Some(v) = self.post_sweep_delay {
            p.post_sweep_delay_bars = v;
        }
        if let Some(v) = self.require_vwap_flip {
            p.require_vwap_flip = v;
        }
        if let Some(v) = self.expected_vwap {
            p.expected_vwap_relation = v;
        }
        if let Some(v) = self.close_confirm {
            p.close_confirm = v;
        }
        if let Some(w) = self.grade_weights {
            let gw = &mut p.grade_weights;
            gw.sweep = w.sweep.unwrap_or(gw.sweep);
            gw.structural_shift = w.mss.unwrap_or(gw.structural_shift);
            gw.vwap = w.vwap.unwrap_or(gw.vwap);
            gw.adx = w.adx.unwrap_or(gw.adx);
            gw.bias = w.bias.unwrap_or(gw.bias);
        }
        if let Some(v) = self.notes {
            p.notes = v;
        }
    }
}

pub(super) fn to_document<'a>(profiles: impl Iterator<Item = (&'a str, &'a Profile)>) -> Value {
    let mut map = Map::new();
    for (name, profile) in profiles {
        // Profile holds only plain numbers, bools, strings and unit enums.
        let value = serde_json::to_value(profile).unwrap_or(Value::Null);
        map.insert(name.to_string(), value);
    }
    Value::Object(map)
}

/// Merge `doc` into `profiles`, returning the merged archetype names.
///
/// `profiles` is expected to be a staging copy: on error it may be partially
/// updated and must be discarded.
pub(super) fn merge_document(
    profiles: &mut BTreeMap<String, Profile>,
    doc: &Value,
) -> Result<Vec<String>, ProfileError> {
    let Value::Object(entries) = doc else {
        return Err(ProfileError::ConfigFormat(
            "top-level value must be an object keyed by archetype".into(),
        ));
    };

    let mut merged = Vec::new();
    for (name, value) in entries {
        let Some(profile) = profiles.get_mut(name) else {
            continue;
        };
        if !value.is_object() {
            warn!(model = %name, "profile entry is not an object, skipped");
            continue;
        }
        let patch: ProfilePatch = serde_json::from_value(value.clone())
            .map_err(|e| ProfileError::ConfigFormat(format!("{name}: {e}")))?;
        patch.apply(profile);
        merged.push(name.clone());
    }
    Ok(merged)
}
