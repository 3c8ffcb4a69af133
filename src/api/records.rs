//! # Records API
//!
//! Consultation history and structured medical records.
//!
//! ## Endpoints
//!
//! - `GET /history/recent` - Latest consultation (object or `null`)
//! - `GET /history/all` - All consultations
//! - `POST /history/create` - Save a question/answer pair
//! - `GET /medical-records` - Structured medical records
//! - `GET /medical-records/{id}` - One medical record

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::api::client::{ApiClient, ApiError, ApiRequest};
use crate::api::decode::{self, describe, JsonObject};

const RECORD_NOT_FOUND: &str = "Medical record not found";

/// Identifier of a medical record; the backend accepts numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Accept an identifier taken from untyped JSON.
    ///
    /// Only integers and strings are identifiers; `null`, booleans,
    /// fractional numbers, arrays and objects are rejected.
    pub fn from_json(value: &Value) -> Result<Self, ApiError> {
        let id = match value {
            Value::Number(n) => n.as_i64().map(RecordId::Number).ok_or_else(|| {
                ApiError::validation(format!("Invalid medical record id: {}", n))
            })?,
            Value::String(s) => RecordId::Text(s.clone()),
            other => {
                return Err(ApiError::validation(format!(
                    "Invalid medical record id: expected a string or number, got {}",
                    describe(other)
                )))
            }
        };
        id.validate()?;
        Ok(id)
    }

    /// Parse command-line input: all digits is a number, anything else text.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(trimmed.to_string()),
        }
    }

    /// Empty identifiers and zero are never valid.
    pub fn validate(&self) -> Result<(), ApiError> {
        match self {
            RecordId::Number(0) => Err(ApiError::validation("Invalid medical record id: 0")),
            RecordId::Text(s) if s.trim().is_empty() => {
                Err(ApiError::validation("Invalid medical record id: empty"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

#[derive(Debug, Serialize)]
struct NewConsultation<'a> {
    question: &'a str,
    answer: &'a str,
}

impl ApiClient {
    /// Most recent consultation, or `None` when there is none.
    pub async fn get_recent_medical_record(&self) -> Result<Option<JsonObject>, ApiError> {
        let body = self.execute(ApiRequest::get("/history/recent")).await?;
        decode::object_or_null(body, "recent record")
    }

    pub async fn get_all_medical_records(&self) -> Result<Vec<Value>, ApiError> {
        let body = self.execute(ApiRequest::get("/history/all")).await?;
        decode::array(body, "consultation history")
    }

    /// Persist a question/answer pair to the consultation history.
    pub async fn create_medical_record(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<Value, ApiError> {
        let request =
            ApiRequest::post("/history/create").json(&NewConsultation { question, answer })?;
        self.execute(request).await
    }

    pub async fn get_medical_records(&self) -> Result<Vec<Value>, ApiError> {
        let body = self.execute(ApiRequest::get("/medical-records")).await?;
        decode::array(body, "medical records")
    }

    /// Fetch one medical record. The identifier is validated before any request.
    pub async fn get_medical_record_detail(
        &self,
        id: impl Into<RecordId>,
    ) -> Result<JsonObject, ApiError> {
        let id = id.into();
        id.validate()?;

        let request = ApiRequest::get("/medical-records")
            .segment(id.to_string())
            .not_found(RECORD_NOT_FOUND);
        let body = self.execute(request).await?;
        decode::object(body, "medical record")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::{ErrorKind, DEFAULT_BASE_URL};
    use crate::api::testing::client_with_token;
    use crate::api::transport::RequestBody;
    use serde_json::json;

    #[test]
    fn test_record_id_from_json_rejects_non_primitives() {
        for bad in [json!(null), json!(true), json!(1.5), json!([1]), json!({"id": 1})] {
            let err = RecordId::from_json(&bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }

    #[test]
    fn test_record_id_from_json_accepts_primitives() {
        assert_eq!(RecordId::from_json(&json!(12)).unwrap(), RecordId::Number(12));
        assert_eq!(
            RecordId::from_json(&json!("mr-12")).unwrap(),
            RecordId::Text("mr-12".to_string())
        );
        assert!(RecordId::from_json(&json!("")).is_err());
        assert!(RecordId::from_json(&json!(0)).is_err());
    }

    #[test]
    fn test_record_id_parse() {
        assert_eq!(RecordId::parse(" 42 "), RecordId::Number(42));
        assert_eq!(RecordId::parse("abc"), RecordId::Text("abc".to_string()));
    }

    #[tokio::test]
    async fn test_recent_record_null_passes_through() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond_raw(200, "null");
        assert!(client.get_recent_medical_record().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recent_record_object() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond(200, json!({"id": 3, "question": "q", "answer": "a"}));
        let record = client.get_recent_medical_record().await.unwrap().unwrap();
        assert_eq!(record["id"], 3);
    }

    #[tokio::test]
    async fn test_recent_record_rejects_array_and_primitives() {
        for body in ["[]", "42", "\"text\"", "true"] {
            let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
            transport.respond_raw(200, body);
            let err = client.get_recent_medical_record().await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedResponse, "body: {}", body);
        }
    }

    #[tokio::test]
    async fn test_list_endpoints_reject_non_arrays() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");

        transport.respond(200, json!({"records": []}));
        assert_eq!(
            client.get_all_medical_records().await.unwrap_err().kind(),
            ErrorKind::MalformedResponse
        );

        transport.respond_raw(200, "null");
        assert_eq!(
            client.get_medical_records().await.unwrap_err().kind(),
            ErrorKind::MalformedResponse
        );

        transport.respond(200, json!([{"id": 1}, {"id": 2}]));
        assert_eq!(client.get_medical_records().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_detail_validation_happens_before_request() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");

        for bad in ["", "   "] {
            let err = client.get_medical_record_detail(bad).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        let err = client.get_medical_record_detail(0i64).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_detail_fetches_by_id() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond(200, json!({"id": 7, "diagnosis": "flu"}));

        let record = client.get_medical_record_detail(7i64).await.unwrap();
        assert_eq!(record["diagnosis"], "flu");
        assert_eq!(
            transport.last_request().unwrap().url.path(),
            "/api/medical-records/7"
        );
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond(404, json!({"error_code": 404, "message": "Record 9 not found"}));

        match client.get_medical_record_detail(9i64).await {
            Err(ApiError::NotFound { message }) => assert_eq!(message, "Record 9 not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_detail_rejects_non_object_body() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond_raw(200, "null");
        let err = client.get_medical_record_detail(7i64).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn test_create_record_body() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond(200, json!({"id": 11}));

        let created = client.create_medical_record("q", "a").await.unwrap();
        assert_eq!(created["id"], 11);
        assert_eq!(
            transport.last_request().unwrap().body,
            RequestBody::Json(json!({"question": "q", "answer": "a"}))
        );
    }
}
