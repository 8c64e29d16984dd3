//! Chat-completion client for the AI eligibility test and interview.
//!
//! Completion is a structured tool call, not a sentinel string in prose: the
//! model signals the end of an interview by calling
//! `submit_interview_result` with a score and pass/fail flag, and scores the
//! eligibility test through `submit_eligibility_score`. Output that carries
//! neither a tool call nor text is an error, never a silent "not complete".

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::config::APP_CONFIG;
use crate::entities::sea_orm_active_enums::TrackEnum;
use crate::tracks::track_info;

const INTERVIEW_RESULT_TOOL: &str = "submit_interview_result";
const ELIGIBILITY_SCORE_TOOL: &str = "submit_eligibility_score";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, PartialEq)]
pub enum InterviewOutcome {
    InProgress { reply: String },
    Complete { score: i32, passed: bool },
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct InterviewResultArgs {
    score: i32,
    passed: bool,
}

#[derive(Debug, Deserialize)]
struct EligibilityScoreArgs {
    score: i32,
}

pub struct InterviewService {
    client: reqwest::Client,
}

impl InterviewService {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// One turn of the track-specific interview. The caller sends the whole
    /// conversation so far; the exchange itself is stateless on our side.
    pub async fn interview_turn(
        &self,
        track: &TrackEnum,
        history: &[ChatMessage],
    ) -> Result<InterviewOutcome> {
        let info = track_info(track);

        let mut messages = vec![json!({
            "role": "system",
            "content": info.interview_prompt,
        })];
        for message in history {
            messages.push(json!({
                "role": message.role,
                "content": message.content,
            }));
        }

        let body = json!({
            "model": APP_CONFIG.ai_model,
            "messages": messages,
            "tools": [{
                "type": "function",
                "function": {
                    "name": INTERVIEW_RESULT_TOOL,
                    "description": "Submit the final interview result once the interview is over",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "score": { "type": "integer", "minimum": 0, "maximum": 100 },
                            "passed": { "type": "boolean" }
                        },
                        "required": ["score", "passed"]
                    }
                }
            }],
            "tool_choice": "auto",
        });

        let response = self.chat_completion(&body).await?;
        parse_interview_outcome(&response)
    }

    /// Scores a finished eligibility test in one stateless request. The
    /// model is forced to answer through the scoring tool.
    pub async fn score_eligibility(&self, track: &TrackEnum, answers: &str) -> Result<i32> {
        let info = track_info(track);

        let body = json!({
            "model": APP_CONFIG.ai_model,
            "messages": [
                {
                    "role": "system",
                    "content": format!(
                        "You grade eligibility tests for the {} internship track. \
                         Score the candidate's answers out of 100 and submit the score \
                         through the submit_eligibility_score function.",
                        info.name
                    ),
                },
                { "role": "user", "content": answers },
            ],
            "tools": [{
                "type": "function",
                "function": {
                    "name": ELIGIBILITY_SCORE_TOOL,
                    "description": "Submit the eligibility test score",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "score": { "type": "integer", "minimum": 0, "maximum": 100 }
                        },
                        "required": ["score"]
                    }
                }
            }],
            "tool_choice": { "type": "function", "function": { "name": ELIGIBILITY_SCORE_TOOL } },
        });

        let response = self.chat_completion(&body).await?;
        parse_eligibility_score(&response)
    }

    async fn chat_completion(&self, body: &serde_json::Value) -> Result<ChatCompletionResponse> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", APP_CONFIG.ai_api_base))
            .bearer_auth(&APP_CONFIG.ai_api_key)
            .json(body)
            .send()
            .await
            .context("Chat completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            bail!("Chat completion API returned {}: {}", status, text);
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .context("Failed to decode chat completion response")
    }
}

impl Default for InterviewService {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_interview_outcome(response: &ChatCompletionResponse) -> Result<InterviewOutcome> {
    let message = &response
        .choices
        .first()
        .context("Chat completion response has no choices")?
        .message;

    if let Some(call) = message
        .tool_calls
        .iter()
        .find(|c| c.function.name == INTERVIEW_RESULT_TOOL)
    {
        let args: InterviewResultArgs = serde_json::from_str(&call.function.arguments)
            .context("Malformed interview result arguments")?;
        return Ok(InterviewOutcome::Complete {
            score: args.score,
            passed: args.passed,
        });
    }

    match &message.content {
        Some(content) if !content.is_empty() => Ok(InterviewOutcome::InProgress {
            reply: content.clone(),
        }),
        _ => bail!("Chat completion returned neither a tool call nor a reply"),
    }
}

fn parse_eligibility_score(response: &ChatCompletionResponse) -> Result<i32> {
    let message = &response
        .choices
        .first()
        .context("Chat completion response has no choices")?
        .message;

    let call = message
        .tool_calls
        .iter()
        .find(|c| c.function.name == ELIGIBILITY_SCORE_TOOL)
        .context("Model did not return a structured eligibility score")?;

    let args: EligibilityScoreArgs = serde_json::from_str(&call.function.arguments)
        .context("Malformed eligibility score arguments")?;
    Ok(args.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_json(value: serde_json::Value) -> ChatCompletionResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn tool_call_completes_the_interview() {
        let response = response_json(json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "submit_interview_result",
                            "arguments": "{\"score\": 82, \"passed\": true}"
                        }
                    }]
                }
            }]
        }));

        let outcome = parse_interview_outcome(&response).unwrap();
        assert_eq!(
            outcome,
            InterviewOutcome::Complete {
                score: 82,
                passed: true
            }
        );
    }

    #[test]
    fn plain_reply_keeps_the_interview_in_progress() {
        let response = response_json(json!({
            "choices": [{
                "message": {
                    "content": "Tell me about the difference between let and const.",
                    "tool_calls": []
                }
            }]
        }));

        let outcome = parse_interview_outcome(&response).unwrap();
        match outcome {
            InterviewOutcome::InProgress { reply } => {
                assert!(reply.contains("let and const"));
            }
            other => panic!("Expected InProgress, got {:?}", other),
        }
    }

    #[test]
    fn malformed_tool_arguments_are_an_error_not_a_silent_no_op() {
        let response = response_json(json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "submit_interview_result",
                            "arguments": "INTERVIEW_COMPLETE: 82/100 - PASS"
                        }
                    }]
                }
            }]
        }));

        assert!(parse_interview_outcome(&response).is_err());
    }

    #[test]
    fn empty_message_is_an_error() {
        let response = response_json(json!({
            "choices": [{
                "message": { "content": null, "tool_calls": [] }
            }]
        }));

        assert!(parse_interview_outcome(&response).is_err());
    }

    #[test]
    fn eligibility_score_is_read_from_the_forced_tool_call() {
        let response = response_json(json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "submit_eligibility_score",
                            "arguments": "{\"score\": 64}"
                        }
                    }]
                }
            }]
        }));

        assert_eq!(parse_eligibility_score(&response).unwrap(), 64);
    }

    #[test]
    fn eligibility_score_without_tool_call_is_an_error() {
        let response = response_json(json!({
            "choices": [{
                "message": { "content": "Looks like a 64 to me.", "tool_calls": [] }
            }]
        }));

        assert!(parse_eligibility_score(&response).is_err());
    }
}
