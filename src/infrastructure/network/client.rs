use crate::domain::error::LingoError;
use crate::domain::model::SOURCE_LANGUAGE;
use crate::domain::traits::TranslationBackend;
use crate::infrastructure::config::ProviderConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

// MyMemory API response structures
#[derive(Deserialize, Debug)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    data: Option<ResponseData>,
    // Numeric in normal operation, a quoted string on some error paths.
    #[serde(rename = "responseStatus")]
    status: Option<serde_json::Value>,
    #[serde(rename = "responseDetails")]
    details: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// MyMemory translation client
///
/// Performs exactly one bounded-timeout GET per request and never retries;
/// pacing and failure recovery live upstream in the queue and façade.
pub struct MyMemoryClient {
    client: Client,
    config: ProviderConfig,
}

impl MyMemoryClient {
    pub fn new(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl TranslationBackend for MyMemoryClient {
    async fn fetch_translation(&self, text: &str, language: &str) -> Result<String, LingoError> {
        let langpair = format!("{}|{}", SOURCE_LANGUAGE, language);

        let mut params = vec![("q", text.to_string()), ("langpair", langpair)];
        if let Some(email) = &self.config.contact_email {
            params.push(("de", email.clone()));
        }

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<MyMemoryResponse>()
            .await?;

        if let Some(status) = response.status.as_ref().and_then(status_code) {
            if status != 200 {
                let details = response.details.unwrap_or_default();
                return Err(LingoError::Provider(format!(
                    "MyMemory status {}: {}",
                    status, details
                )));
            }
        }

        response
            .data
            .and_then(|d| d.translated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| LingoError::Provider("response missing translated text".to_string()))
    }
}

// The API reports status as either a JSON number or a quoted string.
fn status_code(value: &serde_json::Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_successful_response() {
        let body = r#"{
            "responseData": {"translatedText": "Hola mundo", "match": 0.98},
            "responseStatus": 200,
            "responseDetails": ""
        }"#;
        let parsed: MyMemoryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(status_code(parsed.status.as_ref().unwrap()), Some(200));
        assert_eq!(
            parsed.data.unwrap().translated_text.as_deref(),
            Some("Hola mundo")
        );
    }

    #[test]
    fn parses_string_status_as_failure_code() {
        let body = r#"{
            "responseData": {"translatedText": "MYMEMORY WARNING: YOU USED ALL AVAILABLE FREE TRANSLATIONS"},
            "responseStatus": "403",
            "responseDetails": "Daily quota exceeded"
        }"#;
        let parsed: MyMemoryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(status_code(parsed.status.as_ref().unwrap()), Some(403));
        assert_eq!(parsed.details.as_deref(), Some("Daily quota exceeded"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let parsed: MyMemoryResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.data.is_none());
        assert!(parsed.status.is_none());

        let parsed: MyMemoryResponse =
            serde_json::from_str(r#"{"responseData": {}}"#).unwrap();
        assert!(parsed.data.unwrap().translated_text.is_none());
    }
}
