//! # Chat API
//!
//! Consultation endpoints backed by the medical LLM service.
//!
//! ## Endpoints
//!
//! - `POST /chat/medical` - Ask a question, get an answer
//! - `POST /chat/medical/upload` - Ask with attached files (multipart)
//! - `GET /chat/history` - Conversation history
//! - `POST /chat/new` - Start a new conversation
//! - `POST /chat/medical/record` - Turn the conversation into a medical record

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::attachment::Attachment;
use crate::api::client::{ApiClient, ApiError, ApiRequest};
use crate::api::decode::{self, JsonObject};
use crate::api::transport::FormPart;

const NO_RECORD_HISTORY: &str = "Not enough consultation history to generate a medical record";

#[derive(Debug, Serialize)]
struct MedicalQuery<'a> {
    question: &'a str,
}

/// One question/answer exchange from the consultation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistoryEntry {
    pub question: String,
    pub answer: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl ApiClient {
    /// Ask a medical question and return the answer text.
    pub async fn send_medical_query(&self, question: &str) -> Result<String, ApiError> {
        let request = ApiRequest::post("/chat/medical").json(&MedicalQuery { question })?;
        let body = self.execute(request).await?;
        decode::string(decode::field(body, "answer", "chat reply")?, "answer")
    }

    /// Ask a medical question with supporting files (images, reports).
    ///
    /// Files are sent as repeated `files` parts after the `question` part.
    pub async fn send_medical_query_with_files(
        &self,
        question: &str,
        files: Vec<Attachment>,
    ) -> Result<String, ApiError> {
        let mut parts = Vec::with_capacity(files.len() + 1);
        parts.push(FormPart::text("question", question));
        parts.extend(files.into_iter().map(|f| FormPart::file("files", f)));

        let body = self
            .execute(ApiRequest::post("/chat/medical/upload").multipart(parts))
            .await?;
        decode::string(decode::field(body, "answer", "chat reply")?, "answer")
    }

    pub async fn get_medical_chat_history(&self) -> Result<Vec<ChatHistoryEntry>, ApiError> {
        let body = self.execute(ApiRequest::get("/chat/history")).await?;
        let entries = decode::array(body, "chat history")?;
        decode::typed(Value::Array(entries), "chat history")
    }

    pub async fn start_new_medical_chat(&self) -> Result<Value, ApiError> {
        self.execute(ApiRequest::post("/chat/new")).await
    }

    /// Generate a structured medical record from the current conversation.
    ///
    /// Fails with [`ApiError::NotFound`] when there is not enough history yet.
    pub async fn generate_medical_record(&self) -> Result<JsonObject, ApiError> {
        let request = ApiRequest::post("/chat/medical/record").not_found(NO_RECORD_HISTORY);
        let body = self.execute(request).await?;
        decode::object(decode::field(body, "record", "record reply")?, "record")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::{ErrorKind, DEFAULT_BASE_URL};
    use crate::api::testing::client_with_token;
    use crate::api::transport::RequestBody;
    use crate::session::SessionStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_send_medical_query_returns_answer() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond(200, json!({"answer": "Drink fluids and rest."}));

        let answer = client.send_medical_query("I have a cold").await.unwrap();
        assert_eq!(answer, "Drink fluids and rest.");
        assert_eq!(
            transport.last_request().unwrap().body,
            RequestBody::Json(json!({"question": "I have a cold"}))
        );
    }

    #[tokio::test]
    async fn test_send_medical_query_without_answer_is_malformed() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond(200, json!({"reply": "?"}));

        let err = client.send_medical_query("q").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn test_send_medical_query_with_files_parts() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond(200, json!({"answer": "Looks benign."}));

        let files = vec![
            Attachment::from_bytes("a.jpg", vec![1]),
            Attachment::from_bytes("b.pdf", vec![2]),
        ];
        let answer = client
            .send_medical_query_with_files("What is this?", files)
            .await
            .unwrap();
        assert_eq!(answer, "Looks benign.");

        let request = transport.last_request().unwrap();
        assert_eq!(request.url.path(), "/api/chat/medical/upload");
        match request.body {
            RequestBody::Multipart(parts) => {
                let names: Vec<&str> = parts.iter().map(|p| p.name()).collect();
                assert_eq!(names, vec!["question", "files", "files"]);
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_chat_history_parses_entries() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond(
            200,
            json!([
                {"question": "q1", "answer": "a1", "createdAt": "2025-01-02T10:00:00"},
                {"question": "q2", "answer": "a2", "createdAt": "2025-01-02T10:05:00"}
            ]),
        );

        let history = client.get_medical_chat_history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].answer, "a2");
        assert_eq!(history[0].created_at.as_deref(), Some("2025-01-02T10:00:00"));
    }

    #[tokio::test]
    async fn test_chat_history_rejects_non_array() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond(200, json!({"history": []}));

        let err = client.get_medical_chat_history().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn test_generate_record_returns_record() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond(
            200,
            json!({"record": {"chief_complaint": "cough", "diagnosis": "bronchitis"}}),
        );

        let record = client.generate_medical_record().await.unwrap();
        assert_eq!(record["diagnosis"], "bronchitis");
    }

    #[tokio::test]
    async fn test_generate_record_not_found_uses_server_message() {
        let (client, transport, store) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond(404, json!({"message": "No conversation yet"}));

        match client.generate_medical_record().await {
            Err(ApiError::NotFound { message }) => assert_eq!(message, "No conversation yet"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(store.token().is_some());
    }

    #[tokio::test]
    async fn test_generate_record_not_found_default_message() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond_raw(404, "");

        match client.generate_medical_record().await {
            Err(ApiError::NotFound { message }) => assert_eq!(message, NO_RECORD_HISTORY),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_start_new_chat() {
        let (client, transport, _) = client_with_token(DEFAULT_BASE_URL, "abc");
        transport.respond(200, json!({"message": "new conversation started"}));

        let body = client.start_new_medical_chat().await.unwrap();
        assert_eq!(body["message"], "new conversation started");
        assert_eq!(transport.last_request().unwrap().body, RequestBody::Empty);
    }
}
