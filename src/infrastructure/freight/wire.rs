//! # Vendor Wire Types
//!
//! Deserialization targets for the JSON payloads the freight vendor returns
//! from `getShippingMethod` and `getCalculateFee`.
//!
//! The vendor's payloads drift between deployments: fee amounts arrive as
//! strings or numbers under three different key names, `data` is sometimes
//! an array and sometimes a single object, and failure details live in
//! either `message` or a nested `Error` block. These types absorb all of
//! that so the service layer sees one shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level reply of every vendor service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceReply {
    /// Outcome marker. `Success` means the operation produced data.
    #[serde(default)]
    pub ask: String,

    /// Human-readable note, usually present on failures.
    #[serde(default)]
    pub message: Option<String>,

    /// Payload records. Array, single object, or absent.
    #[serde(default)]
    pub data: Value,

    /// Structured failure details some deployments attach.
    #[serde(default, rename = "Error")]
    pub error: Option<ErrorDetail>,
}

impl ServiceReply {
    /// Returns `true` when the vendor marked the call successful.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.ask == "Success"
    }

    /// Returns the payload records when `data` is an array.
    #[must_use]
    pub fn records(&self) -> &[Value] {
        self.data.as_array().map_or(&[], Vec::as_slice)
    }

    /// Returns the first payload record.
    ///
    /// `data` is normally an array, but some deployments return a single
    /// object for single-record operations.
    #[must_use]
    pub fn first_record(&self) -> Option<&Value> {
        match &self.data {
            Value::Array(items) => items.first(),
            Value::Object(_) => Some(&self.data),
            _ => None,
        }
    }

    /// Returns the best available human-readable failure reason.
    #[must_use]
    pub fn failure_reason(&self) -> String {
        if let Some(detail) = &self.error {
            if let Some(message) = &detail.message {
                if !message.is_empty() {
                    return message.clone();
                }
            }
        }
        if let Some(message) = &self.message {
            if !message.is_empty() {
                return message.clone();
            }
        }
        format!("service replied with status '{}'", self.ask)
    }
}

/// Structured failure block some deployments return.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    /// Vendor error code. String or number depending on deployment.
    #[serde(default, rename = "errCode")]
    pub code: Option<Value>,

    /// Vendor error message.
    #[serde(default, rename = "errMessage")]
    pub message: Option<String>,
}

/// One channel entry from `getShippingMethod`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelRecord {
    /// Vendor channel code.
    #[serde(default)]
    pub code: Option<String>,

    /// Display name, missing on some deployments.
    #[serde(default)]
    pub name: Option<String>,
}

/// One fee entry from `getCalculateFee`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeRecord {
    /// Total under its newest key name.
    #[serde(default, rename = "totalAmount", deserialize_with = "lenient_decimal")]
    pub total_amount: Option<Decimal>,

    /// Total under its mid-era key name.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub fee: Option<Decimal>,

    /// Total under its oldest key name.
    #[serde(default, rename = "totalFee", deserialize_with = "lenient_decimal")]
    pub total_fee: Option<Decimal>,

    /// Processing surcharge included in the total.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub processing_fee: Option<Decimal>,

    /// Delivery estimate in working days, e.g. `7-12`.
    #[serde(default)]
    pub aging: Option<String>,

    /// Billing currency.
    #[serde(default)]
    pub currency: Option<String>,

    /// Channel code echoed back by the tariff engine.
    #[serde(default)]
    pub sm_code: Option<String>,

    /// Channel display name from the tariff engine.
    #[serde(default)]
    pub sm_name_cn: Option<String>,
}

impl FeeRecord {
    /// Returns the quoted total under whichever key the deployment used.
    ///
    /// Key precedence is newest first: `totalAmount`, then `fee`, then
    /// `totalFee`.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.total_amount.or(self.fee).or(self.total_fee)
    }
}

/// Decodes a decimal that may arrive as a JSON number, a numeric string,
/// or garbage. Anything unparseable becomes `None` rather than failing the
/// whole record.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(value_to_decimal))
}

fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(text.trim()),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str_exact(text)
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    mod reply {
        use super::*;

        #[test]
        fn success_marker_is_exact() {
            let reply: ServiceReply =
                serde_json::from_value(json!({"ask": "Success", "data": []})).unwrap();
            assert!(reply.is_success());

            let reply: ServiceReply =
                serde_json::from_value(json!({"ask": "Failure", "message": "nope"})).unwrap();
            assert!(!reply.is_success());
        }

        #[test]
        fn missing_ask_is_not_success() {
            let reply: ServiceReply = serde_json::from_value(json!({"data": []})).unwrap();
            assert!(!reply.is_success());
        }

        #[test]
        fn first_record_handles_array_and_object() {
            let array: ServiceReply =
                serde_json::from_value(json!({"ask": "Success", "data": [{"fee": 1}, {"fee": 2}]}))
                    .unwrap();
            assert_eq!(array.first_record().unwrap()["fee"], json!(1));

            let object: ServiceReply =
                serde_json::from_value(json!({"ask": "Success", "data": {"fee": 3}})).unwrap();
            assert_eq!(object.first_record().unwrap()["fee"], json!(3));

            let absent: ServiceReply = serde_json::from_value(json!({"ask": "Success"})).unwrap();
            assert!(absent.first_record().is_none());
        }

        #[test]
        fn failure_reason_prefers_error_block() {
            let reply: ServiceReply = serde_json::from_value(json!({
                "ask": "Failure",
                "message": "generic",
                "Error": {"errCode": 1001, "errMessage": "postcode not served"}
            }))
            .unwrap();
            assert_eq!(reply.failure_reason(), "postcode not served");
        }

        #[test]
        fn failure_reason_falls_back_to_message_then_ask() {
            let with_message: ServiceReply =
                serde_json::from_value(json!({"ask": "Failure", "message": "generic"})).unwrap();
            assert_eq!(with_message.failure_reason(), "generic");

            let bare: ServiceReply = serde_json::from_value(json!({"ask": "Failure"})).unwrap();
            assert!(bare.failure_reason().contains("Failure"));
        }

        #[test]
        fn numeric_error_code_does_not_break_parsing() {
            let reply: ServiceReply = serde_json::from_value(json!({
                "ask": "Failure",
                "Error": {"errCode": 1001, "errMessage": "bad token"}
            }))
            .unwrap();
            assert!(reply.error.is_some());
        }
    }

    mod fee_record {
        use super::*;

        #[test]
        fn total_prefers_newest_key() {
            let record: FeeRecord = serde_json::from_value(json!({
                "totalAmount": "78.50",
                "fee": "1.00",
                "totalFee": "2.00"
            }))
            .unwrap();
            assert_eq!(record.total(), Some(dec!(78.50)));
        }

        #[test]
        fn total_falls_back_through_older_keys() {
            let mid: FeeRecord = serde_json::from_value(json!({"fee": "65.30"})).unwrap();
            assert_eq!(mid.total(), Some(dec!(65.30)));

            let old: FeeRecord = serde_json::from_value(json!({"totalFee": 42})).unwrap();
            assert_eq!(old.total(), Some(dec!(42)));
        }

        #[test]
        fn accepts_string_and_number_amounts() {
            let stringy: FeeRecord =
                serde_json::from_value(json!({"totalAmount": " 65.30 "})).unwrap();
            assert_eq!(stringy.total(), Some(dec!(65.30)));

            let numeric: FeeRecord = serde_json::from_value(json!({"totalAmount": 65.3})).unwrap();
            assert_eq!(numeric.total(), Some(dec!(65.3)));
        }

        #[test]
        fn garbage_amounts_become_none() {
            let record: FeeRecord = serde_json::from_value(json!({
                "totalAmount": "",
                "fee": "n/a",
                "processing_fee": null
            }))
            .unwrap();
            assert_eq!(record.total(), None);
            assert_eq!(record.processing_fee, None);
        }

        #[test]
        fn breakdown_fields_ride_along() {
            let record: FeeRecord = serde_json::from_value(json!({
                "fee": "65.30",
                "processing_fee": "5.30",
                "aging": "7-12",
                "sm_code": "E-USPS",
                "sm_name_cn": "USPS Economy"
            }))
            .unwrap();
            assert_eq!(record.processing_fee, Some(dec!(5.30)));
            assert_eq!(record.aging.as_deref(), Some("7-12"));
            assert_eq!(record.sm_name_cn.as_deref(), Some("USPS Economy"));
        }
    }
}
