use crate::conversation::{Role, Turn};
use crate::core::error::GuideError;
use crate::gateway::client::ApiClient;
use crate::gateway::gemini::types::{
    Content, GenerateRequest, GenerateResponse, Part, SystemInstruction,
};

#[derive(Clone)]
pub struct GeminiClient {
    pub model: String,
    client: ApiClient,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        let mut client = ApiClient::new(base_url);

        // Gemini authenticates via query param, not a bearer header
        client.add_query_param("key", api_key);

        Self { model, client }
    }

    pub async fn generate_content(
        &self,
        instruction: &str,
        turns: &[Turn],
    ) -> Result<String, GuideError> {
        let payload = build_payload(instruction, turns);
        let response = self
            .client
            .post(
                &format!("v1beta/models/{}:generateContent", self.model),
                &payload,
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GuideError::Api(format!(
                "Generation endpoint returned {}",
                status
            )));
        }

        let body = response.text().await?;
        extract_text(&body)
    }
}

fn build_payload(instruction: &str, turns: &[Turn]) -> GenerateRequest {
    let contents = turns
        .iter()
        .map(|turn| Content {
            role: match turn.role {
                Role::User => "user",
                Role::Model => "model",
            }
            .to_string(),
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        })
        .collect();

    GenerateRequest {
        contents,
        system_instruction: Some(SystemInstruction {
            parts: vec![Part {
                text: instruction.to_string(),
            }],
        }),
    }
}

// A candidate with no text part still counts as a (blank) reply; a response
// with no candidate at all does not.
fn extract_text(body: &str) -> Result<String, GuideError> {
    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        GuideError::Serialization(format!("Failed to parse generation response: {}", e))
    })?;

    let candidate = parsed
        .candidates
        .first()
        .ok_or_else(|| GuideError::Api("No candidate in generation response".to_string()))?;

    Ok(candidate
        .content
        .parts
        .first()
        .map(|part| part.text.clone())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_maps_roles_to_the_wire_names() {
        let turns = vec![
            Turn::model("welcome"),
            Turn::user("hi"),
            Turn::user("best food?"),
        ];
        let payload = build_payload("be the guide", &turns);

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["contents"][0]["role"], "model");
        assert_eq!(value["contents"][1]["role"], "user");
        assert_eq!(value["contents"][2]["parts"][0]["text"], "best food?");
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "be the guide"
        );
    }

    #[test]
    fn extract_text_reads_the_first_candidate_part() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Take the Yangtze cableway."}],"role":"model"}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Take the Yangtze cableway.");
    }

    #[test]
    fn candidate_without_parts_is_a_blank_reply() {
        let body = r#"{"candidates":[{"content":{"parts":[]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "");
    }

    #[test]
    fn missing_candidates_is_an_api_error() {
        let body = r#"{"candidates":[]}"#;
        assert!(matches!(
            extract_text(body).unwrap_err(),
            GuideError::Api(_)
        ));
    }

    #[test]
    fn unparseable_body_is_a_serialization_error() {
        assert!(matches!(
            extract_text("<html>quota exceeded</html>").unwrap_err(),
            GuideError::Serialization(_)
        ));
    }
}
