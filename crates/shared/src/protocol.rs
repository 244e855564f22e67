use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{json_kind, ProtocolError};

pub const PROCESS_PATH: &str = "/api/process";
pub const BENCHMARK_PATH: &str = "/api/benchmark";

const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub digits: Vec<i64>,
}

/// The `result` field of a successful process response.
///
/// The engine answers with the little-endian digit vector of the
/// squared input; anything else is kept verbatim until a schema exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessOutput {
    Digits(Vec<u64>),
    Other(Value),
}

impl ProcessOutput {
    pub fn from_value(value: Value) -> Self {
        if let Value::Array(items) = &value {
            let digits: Option<Vec<u64>> = items.iter().map(Value::as_u64).collect();
            if let Some(digits) = digits {
                return ProcessOutput::Digits(digits);
            }
        }
        ProcessOutput::Other(value)
    }

    pub fn to_value(&self) -> Value {
        match self {
            ProcessOutput::Digits(digits) => {
                Value::Array(digits.iter().map(|digit| Value::from(*digit)).collect())
            }
            ProcessOutput::Other(value) => value.clone(),
        }
    }

    /// Compact JSON text, exactly as the server sent it modulo whitespace.
    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }
}

/// Validates a decoded 2xx process response body.
///
/// Fails closed: a body without a usable `result`, or one that reports a
/// non-success `status`, is rejected instead of reaching the view.
pub fn parse_process_response(body: Value) -> Result<ProcessOutput, ProtocolError> {
    let Value::Object(mut fields) = body else {
        return Err(ProtocolError::NotAnObject {
            found: json_kind(&body),
        });
    };

    match fields.get("status") {
        None => {}
        Some(Value::String(status)) if status == SUCCESS_STATUS => {}
        Some(Value::String(status)) => {
            return Err(ProtocolError::UnsuccessfulStatus {
                status: status.clone(),
            })
        }
        Some(other) => {
            return Err(ProtocolError::UnsuccessfulStatus {
                status: other.to_string(),
            })
        }
    }

    match fields.remove("result") {
        None => Err(ProtocolError::MissingResult),
        Some(Value::Null) => Err(ProtocolError::NullResult),
        Some(result) => Ok(ProcessOutput::from_value(result)),
    }
}

/// One benchmark sample at a given input size. Timings are seconds per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkRecord {
    pub digits: u64,
    pub vedic: f64,
    pub numpy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_ops: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vedic_ops: Option<u64>,
}

impl BenchmarkRecord {
    pub fn new(digits: u64, vedic: f64, numpy: f64) -> Self {
        Self {
            digits,
            vedic,
            numpy,
            standard_ops: None,
            vedic_ops: None,
        }
    }

    pub fn timing(&self, engine: crate::domain::Engine) -> f64 {
        match engine {
            crate::domain::Engine::Vedic => self.vedic,
            crate::domain::Engine::Numpy => self.numpy,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn digit_results_become_typed_digits() {
        let output = parse_process_response(json!({"status": "success", "result": [4, 4, 1]}))
            .expect("valid body");
        assert_eq!(output, ProcessOutput::Digits(vec![4, 4, 1]));
        assert_eq!(output.to_json_string(), "[4,4,1]");
    }

    #[test]
    fn other_results_are_kept_verbatim() {
        let output =
            parse_process_response(json!({"result": {"mean": 1.5, "tags": ["a"]}})).expect("body");
        assert_eq!(
            output,
            ProcessOutput::Other(json!({"mean": 1.5, "tags": ["a"]}))
        );
        assert_eq!(output.to_json_string(), r#"{"mean":1.5,"tags":["a"]}"#);
    }

    #[test]
    fn mixed_arrays_are_not_digits() {
        let output = ProcessOutput::from_value(json!([1, -2, 3]));
        assert_eq!(output, ProcessOutput::Other(json!([1, -2, 3])));
    }

    #[test]
    fn rejects_bodies_without_result() {
        assert_eq!(
            parse_process_response(json!({"status": "success"})),
            Err(ProtocolError::MissingResult)
        );
        assert_eq!(
            parse_process_response(json!({"result": null})),
            Err(ProtocolError::NullResult)
        );
        assert_eq!(
            parse_process_response(json!([1, 2])),
            Err(ProtocolError::NotAnObject { found: "array" })
        );
    }

    #[test]
    fn rejects_error_status_even_on_success_code() {
        assert_eq!(
            parse_process_response(json!({"status": "error", "result": [1]})),
            Err(ProtocolError::UnsuccessfulStatus {
                status: "error".to_string()
            })
        );
    }

    #[test]
    fn benchmark_record_reads_reference_backend_fields() {
        let record: BenchmarkRecord = serde_json::from_value(json!({
            "digits": 10,
            "vedic": 0.00012,
            "numpy": 0.00003,
            "standardOps": 100,
            "vedicOps": 50
        }))
        .expect("record");
        assert_eq!(record.digits, 10);
        assert_eq!(record.standard_ops, Some(100));
        assert_eq!(record.vedic_ops, Some(50));

        let minimal: BenchmarkRecord =
            serde_json::from_value(json!({"digits": 5, "vedic": 1.0, "numpy": 2.0}))
                .expect("minimal record");
        assert_eq!(minimal, BenchmarkRecord::new(5, 1.0, 2.0));
    }
}
