use serde::Serialize;
use serde_json::{Map, Value};

use crate::matcher_client::MatcherError;

const REJECTED_FALLBACK: &str = "Matching service could not analyze the resume";

/// Successful relay response.
///
/// `matches` and `analysis` are forwarded exactly as the matching service sent
/// them. Unrecognised top-level fields survive in `extra`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub matches: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResponse {
    /// Normalizes a 2xx body from the matching service into the relay envelope.
    ///
    /// - object: `matches` defaults to `[]`, `success: false` becomes an error
    /// - array: taken as the match list
    /// - anything else: unexpected shape
    pub fn from_matcher_body(body: Value) -> Result<Self, MatcherError> {
        match body {
            Value::Array(matches) => Ok(Self {
                success: true,
                message: None,
                matches,
                analysis: None,
                extra: Map::new(),
            }),
            Value::Object(map) => Self::from_object(map),
            other => Err(MatcherError::UnexpectedShape(format!(
                "expected a JSON object or list, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn from_object(mut map: Map<String, Value>) -> Result<Self, MatcherError> {
        if map.get("success") == Some(&Value::Bool(false)) {
            let reason = ["message", "error"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .unwrap_or(REJECTED_FALLBACK);
            return Err(MatcherError::Rejected(reason.to_string()));
        }
        map.remove("success");

        let matches = match map.remove("matches") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(list)) => list,
            Some(other) => {
                return Err(MatcherError::UnexpectedShape(format!(
                    "`matches` must be a list, got {}",
                    json_kind(&other)
                )))
            }
        };

        // An explicit null is forwarded as null; only an absent key is omitted.
        let analysis = map.remove("analysis");

        // A non-string message stays in `extra` untouched.
        let message = match map.remove("message") {
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                map.insert("message".to_string(), other);
                None
            }
            None => None,
        };

        Ok(Self {
            success: true,
            message,
            matches,
            analysis,
            extra: map,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(body: Value) -> Value {
        serde_json::to_value(AnalysisResponse::from_matcher_body(body).unwrap()).unwrap()
    }

    #[test]
    fn test_matches_forwarded_unchanged() {
        let out = normalize(json!({"matches": [{"company": "Acme", "score": 0.87}]}));
        assert_eq!(
            out,
            json!({"success": true, "matches": [{"company": "Acme", "score": 0.87}]})
        );
    }

    #[test]
    fn test_missing_matches_defaults_to_empty_list() {
        assert_eq!(normalize(json!({})), json!({"success": true, "matches": []}));
        assert_eq!(
            normalize(json!({"matches": null})),
            json!({"success": true, "matches": []})
        );
    }

    #[test]
    fn test_match_order_and_rich_fields_preserved() {
        let matches = json!([
            {"company": "Zeta Bio", "score": 0.41, "description": "**Strong** lab background"},
            {"company": "Acme", "score": 0.93, "reasonsForMatch": ["Rust", "Series A"], "region": "EU"}
        ]);
        let out = normalize(json!({ "matches": matches.clone() }));
        assert_eq!(out["matches"], matches);
    }

    #[test]
    fn test_analysis_and_extra_fields_pass_through() {
        let analysis = json!({
            "summary": "Clinical data scientist",
            "industries": ["healthcare"],
            "modalities": ["imaging"],
            "companyStages": ["seed"],
            "keySkills": ["python"]
        });
        let out = normalize(json!({
            "success": true,
            "message": "Analyzed",
            "analysis": analysis.clone(),
            "runId": "abc-123"
        }));
        assert_eq!(out["analysis"], analysis);
        assert_eq!(out["message"], "Analyzed");
        assert_eq!(out["runId"], "abc-123");
        assert_eq!(out["matches"], json!([]));
    }

    #[test]
    fn test_explicit_null_analysis_is_kept() {
        let out = normalize(json!({"analysis": null}));
        assert!(out.as_object().unwrap().contains_key("analysis"));
        assert_eq!(out["analysis"], Value::Null);
        assert_eq!(out["matches"], json!([]));
    }

    #[test]
    fn test_absent_analysis_is_omitted() {
        let out = normalize(json!({"matches": []}));
        assert!(!out.as_object().unwrap().contains_key("analysis"));
    }

    #[test]
    fn test_top_level_array_is_match_list() {
        let out = normalize(json!([{"company": "Acme", "score": 0.5}]));
        assert_eq!(out["matches"], json!([{"company": "Acme", "score": 0.5}]));
        assert_eq!(out["success"], true);
    }

    #[test]
    fn test_explicit_failure_surfaces_service_message() {
        let err = AnalysisResponse::from_matcher_body(json!({"success": false, "message": "Unreadable PDF"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Unreadable PDF");
    }

    #[test]
    fn test_explicit_failure_without_message_uses_fallback() {
        let err = AnalysisResponse::from_matcher_body(json!({"success": false})).unwrap_err();
        assert_eq!(err.to_string(), REJECTED_FALLBACK);
    }

    #[test]
    fn test_non_list_matches_is_rejected() {
        let err = AnalysisResponse::from_matcher_body(json!({"matches": "Acme"})).unwrap_err();
        assert!(matches!(err, MatcherError::UnexpectedShape(_)));
    }

    #[test]
    fn test_scalar_body_is_rejected() {
        let err = AnalysisResponse::from_matcher_body(json!("done")).unwrap_err();
        assert!(err.to_string().contains("a string"));
    }
}
