//! Outbound request payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mode::MODE_CUSTOM;
use crate::registry::Registry;
use crate::resolve::{resolve_visible, ResolveContext};
use crate::tier::{FeatureSet, Tier};
use crate::value::{is_truthy, ValueMap};

/// Body sent to the generation backend, keyed by API field name.
pub type Payload = BTreeMap<String, Value>;

/// Tier used to decide which fields belong in a payload.
///
/// Tier gating already happened when the form was rendered; the formatter
/// only decides which entered values apply to the mode.
pub const PAYLOAD_TIER: Tier = Tier::Standard;

/// Mode-specific fix-ups applied after the generic pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchRule {
    /// In the custom mode the backend still requires `description`; copy the
    /// lyrics into it when nothing else provided one.
    LyricsAsDescription,
}

/// Every patch rule, in application order.
pub const PATCH_RULES: &[PatchRule] = &[PatchRule::LyricsAsDescription];

impl PatchRule {
    /// Applies the rule to a payload built from `values` in `mode`.
    pub fn apply(&self, values: &ValueMap, mode: &str, payload: &mut Payload) {
        match self {
            PatchRule::LyricsAsDescription => {
                if mode != MODE_CUSTOM || payload.contains_key("description") {
                    return;
                }
                if let Some(lyrics) = values.get("lyrics").filter(|v| is_truthy(v)) {
                    payload.insert("description".to_string(), lyrics.clone());
                }
            }
        }
    }
}

/// Transforms a value map into the backend request body for `mode`.
///
/// Only parameters visible in `mode` (at [`PAYLOAD_TIER`], with no feature
/// flags) contribute. Absent and null values are skipped. Each value is
/// emitted under the parameter's API key. [`PATCH_RULES`] run last.
pub fn format_payload(registry: &Registry, values: &ValueMap, mode: &str) -> Payload {
    let features = FeatureSet::new();
    let ctx = ResolveContext::new(mode, PAYLOAD_TIER, values, &features);

    let mut payload = Payload::new();
    for param in resolve_visible(registry, &ctx) {
        match values.get(&param.id) {
            None | Some(Value::Null) => {}
            Some(value) => {
                payload.insert(param.payload_key().to_string(), value.clone());
            }
        }
    }

    for rule in PATCH_RULES {
        rule.apply(values, mode, &mut payload);
    }

    tracing::debug!(mode, fields = payload.len(), "payload formatted");
    payload
}

/// Envelope the backend wraps every response in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wraps a successful result.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wraps a failure message.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Converts to a Result, using a generic message when the backend gave none.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .error
                .unwrap_or_else(|| "request failed".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::mode::{MODE_INSPIRATION, MODE_INSTRUMENTAL};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn builtin() -> Registry {
        Registry::builtin(&Catalog::builtin())
    }

    fn values(pairs: &[(&str, Value)]) -> ValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_lyrics_copied_to_description() {
        let payload = format_payload(
            &builtin(),
            &values(&[("lyrics", json!("la la la"))]),
            MODE_CUSTOM,
        );
        assert_eq!(payload.get("lyrics"), Some(&json!("la la la")));
        assert_eq!(payload.get("description"), Some(&json!("la la la")));
    }

    #[test]
    fn test_lyrics_not_copied_outside_custom() {
        let payload = format_payload(
            &builtin(),
            &values(&[("lyrics", json!("la la la"))]),
            MODE_INSPIRATION,
        );
        assert!(payload.is_empty());
    }

    #[test]
    fn test_empty_lyrics_not_copied() {
        let payload = format_payload(&builtin(), &values(&[("lyrics", json!(""))]), MODE_CUSTOM);
        assert_eq!(payload.get("lyrics"), Some(&json!("")));
        assert!(!payload.contains_key("description"));
    }

    #[test]
    fn test_api_keys_applied() {
        let payload = format_payload(
            &builtin(),
            &values(&[
                ("musicName", json!("Night Drive")),
                ("musicStyle", json!("electronic")),
                ("musicDescription", json!("neon synthwave at 2am")),
            ]),
            MODE_INSPIRATION,
        );
        assert_eq!(
            payload,
            values(&[
                ("name", json!("Night Drive")),
                ("style", json!("electronic")),
                ("description", json!("neon synthwave at 2am")),
            ])
        );
    }

    #[test]
    fn test_hidden_and_null_values_dropped() {
        let payload = format_payload(
            &builtin(),
            &values(&[
                ("vocalType", Value::Null),
                ("secondaryInstruments", json!(["strings"])),
                ("complexity", json!("complex")),
                ("hasDrums", json!(false)),
                ("notARegisteredField", json!(1)),
            ]),
            MODE_INSTRUMENTAL,
        );
        // Premium-only and instrumental-hidden fields are dropped; standard-tier fields stay.
        assert_eq!(payload, values(&[("complexity", json!("complex"))]));
    }

    #[test]
    fn test_api_response_into_result() {
        let ok: ApiResponse<Value> = serde_json::from_value(json!({
            "success": true,
            "data": {"id": "trk_1"}
        }))
        .unwrap();
        assert_eq!(ok.into_result(), Ok(Some(json!({"id": "trk_1"}))));

        let failed: ApiResponse<Value> =
            serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(failed.into_result(), Err("request failed".to_string()));

        assert_eq!(
            ApiResponse::<Value>::err("quota exceeded").into_result(),
            Err("quota exceeded".to_string())
        );
    }

    #[test]
    fn test_api_response_ok_wire_shape() {
        let response = ApiResponse::ok(json!({"taskId": "t-9"}));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": true, "data": {"taskId": "t-9"}})
        );
        assert_eq!(response.into_result(), Ok(Some(json!({"taskId": "t-9"}))));
    }
}
