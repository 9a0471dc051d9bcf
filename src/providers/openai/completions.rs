//! OpenAI chat completions
//!
//! Request and response payloads for `POST /v1/chat/completions` together
//! with their field tables.

use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::providers::{EndpointKind, UpstreamRequest};
use crate::proxy::Endpoint;
use crate::schema::{Documented, FieldSpec, TypeDesc};

const PARTICIPANT_NAME_DOC: &str = "An optional name for the participant. Provides the model information to differentiate between participants of the same role.";

pub fn endpoint() -> Endpoint {
    Endpoint::new(
        "Chat Completions",
        Method::POST,
        "/v1/chat/completions",
        EndpointKind::OpenAiChatCompletions,
    )
    .with_description(
        "Given a list of messages comprising a conversation, the model will return a response.",
    )
    .with_category("Chat")
    .with_docs_url("https://platform.openai.com/docs/api-reference/chat/create")
}

/// System prompt message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SystemMessage {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Documented for SystemMessage {
    const NAME: &'static str = "SystemMessage";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("content", TypeDesc::Str).doc("The contents of the system message."),
            FieldSpec::new("role", TypeDesc::Literal(&["system"]))
                .doc("The role of the messages author, in this case system.")
                .default_value("system"),
            FieldSpec::new("name", TypeDesc::optional(TypeDesc::Str))
                .doc(PARTICIPANT_NAME_DOC)
                .default_null(),
        ]
    }
}

/// Message written by the end user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UserMessage {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Documented for UserMessage {
    const NAME: &'static str = "UserMessage";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("content", TypeDesc::Str).doc("The contents of the user message."),
            FieldSpec::new("role", TypeDesc::Literal(&["user"]))
                .doc("The role of the messages author, in this case user.")
                .default_value("user"),
            FieldSpec::new("name", TypeDesc::optional(TypeDesc::Str))
                .doc(PARTICIPANT_NAME_DOC)
                .default_null(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

impl Documented for FunctionCall {
    const NAME: &'static str = "Function";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("name", TypeDesc::Str).doc("The name of the function to call."),
            FieldSpec::new("arguments", TypeDesc::Str).doc(
                "The arguments to call the function with, as generated by the model in JSON format. Note that the model does not always generate valid JSON, and may hallucinate parameters not defined by your function schema. Validate the arguments in your code before calling your function.",
            ),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionCall,
}

impl Documented for ToolCall {
    const NAME: &'static str = "ToolCall";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("id", TypeDesc::Str).doc("The ID of the tool call."),
            FieldSpec::new("type", TypeDesc::Str)
                .doc("The type of the tool. Currently, only function is supported."),
            FieldSpec::new("function", TypeDesc::object::<FunctionCall>())
                .doc("The function that the model called."),
        ]
    }
}

/// Earlier assistant turn replayed as context
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AssistantMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refusal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Documented for AssistantMessage {
    const NAME: &'static str = "AssistantMessage";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("content", TypeDesc::optional(TypeDesc::Str))
                .doc("The contents of the assistant message. Required unless tool_calls or function_call is specified.")
                .default_null(),
            FieldSpec::new("refusal", TypeDesc::optional(TypeDesc::Str))
                .doc("The refusal message by the assistant.")
                .default_null(),
            FieldSpec::new("role", TypeDesc::Literal(&["assistant"]))
                .doc("The role of the messages author, in this case assistant.")
                .default_value("assistant"),
            FieldSpec::new("name", TypeDesc::optional(TypeDesc::Str))
                .doc(PARTICIPANT_NAME_DOC)
                .default_null(),
            FieldSpec::new(
                "tool_calls",
                TypeDesc::optional(TypeDesc::list(TypeDesc::object::<ToolCall>())),
            )
            .doc("The tool calls generated by the model, such as function calls.")
            .default_null(),
        ]
    }
}

/// Conversation message, discriminated by `role`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    System(SystemMessage),
    User(UserMessage),
    Assistant(AssistantMessage),
}

/// Up to four stop sequences, as a single string or a list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StopSequence {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTier {
    Auto,
    Default,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompletionsRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<HashMap<String, i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_logprobs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_tier: Option<ServiceTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<StopSequence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl UpstreamRequest for CompletionsRequest {
    fn validate(&self) -> AppResult<()> {
        if self.stream == Some(true) {
            return Err(AppError::BadRequest(
                "Streaming responses are not supported".to_string(),
            ));
        }
        Ok(())
    }
}

impl Documented for CompletionsRequest {
    const NAME: &'static str = "CompletionsRequest";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new(
                "messages",
                TypeDesc::list(TypeDesc::Union(vec![
                    TypeDesc::object::<SystemMessage>(),
                    TypeDesc::object::<UserMessage>(),
                    TypeDesc::object::<AssistantMessage>(),
                ])),
            )
            .doc("A list of messages comprising the conversation so far."),
            FieldSpec::new(
                "model",
                TypeDesc::Literal(&["gpt-4o", "gpt-4o-mini", "gpt-4", "gpt-3.5-turbo"]),
            )
            .doc("ID of the model to use."),
            FieldSpec::new("frequency_penalty", TypeDesc::optional(TypeDesc::Float))
                .doc("Number between -2.0 and 2.0. Positive values penalize new tokens based on their existing frequency in the text so far, decreasing the model's likelihood to repeat the same line verbatim.")
                .default_value(0),
            FieldSpec::new(
                "logit_bias",
                TypeDesc::optional(TypeDesc::map(TypeDesc::Str, TypeDesc::Int)),
            )
            .doc("Modify the likelihood of specified tokens appearing in the completion.\nAccepts a JSON object that maps tokens (specified by their token ID in the tokenizer) to an associated bias value from -100 to 100. Mathematically, the bias is added to the logits generated by the model prior to sampling. The exact effect will vary per model, but values between -1 and 1 should decrease or increase likelihood of selection; values like -100 or 100 should result in a ban or exclusive selection of the relevant token.")
            .default_null(),
            FieldSpec::new("logprobs", TypeDesc::optional(TypeDesc::Bool))
                .doc("Whether to return log probabilities of the output tokens or not. If true, returns the log probabilities of each output token returned in the `content` of `message`.")
                .default_value(false),
            FieldSpec::new("top_logprobs", TypeDesc::optional(TypeDesc::Int))
                .doc("An integer between 0 and 20 specifying the number of most likely tokens to return at each token position, each with an associated log probability. `logprobs` must be set to `true` if this parameter is used.")
                .default_null(),
            FieldSpec::new("max_tokens", TypeDesc::optional(TypeDesc::Int))
                .doc("The maximum number of [tokens](https://platform.openai.com/tokenizer) that can be generated in the chat completion. The total length of input tokens and generated tokens is limited by the model's context length.")
                .default_null(),
            FieldSpec::new("n", TypeDesc::optional(TypeDesc::Int))
                .doc("How many chat completion choices to generate for each input message. Note that you will be charged based on the number of generated tokens across all of the choices. Keep `n` as `1` to minimize costs.")
                .default_value(1),
            FieldSpec::new("presence_penalty", TypeDesc::optional(TypeDesc::Float))
                .doc("Number between -2.0 and 2.0. Positive values penalize new tokens based on whether they appear in the text so far, increasing the model's likelihood to talk about new topics.")
                .default_value(0),
            FieldSpec::new("response_format", TypeDesc::optional(TypeDesc::Any))
                .doc("[DISABLED: \"Structured response formats are not proxied yet\"]")
                .default_null(),
            FieldSpec::new("seed", TypeDesc::optional(TypeDesc::Int))
                .doc("[BETA] This feature is in Beta. If specified, our system will make a best effort to sample deterministically, such that repeated requests with the same seed and parameters should return the same result. Determinism is not guaranteed, and you should refer to the system_fingerprint response parameter to monitor changes in the backend.")
                .default_null(),
            FieldSpec::new(
                "service_tier",
                TypeDesc::optional(TypeDesc::Literal(&["auto", "default"])),
            )
            .doc("Specifies the latency tier to use for processing the request. This parameter is relevant for customers subscribed to the scale tier service:\n\n- If set to 'auto', the system will utilize scale tier credits until they are exhausted.\n- If set to 'default', the request will be processed using the default service tier with a lower uptime SLA and no latency guarentee.\n- When not set, the default behavior is 'auto'.\nWhen this parameter is set, the response body will include the service_tier utilized.")
            .default_null(),
            FieldSpec::new(
                "stop",
                TypeDesc::optional(TypeDesc::Union(vec![
                    TypeDesc::Str,
                    TypeDesc::list(TypeDesc::Str),
                ])),
            )
            .doc("Up to 4 sequences where the API will stop generating further tokens.")
            .default_null(),
            FieldSpec::new("stream", TypeDesc::optional(TypeDesc::Bool))
                .doc("[DISABLED: \"Streaming responses are not proxied yet\"] If set, partial message deltas will be sent, like in ChatGPT. Tokens will be sent as data-only server-sent events as they become available, with the stream terminated by a `data: [DONE]` message.")
                .default_value(false),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Usage {
    pub completion_tokens: u64,
    pub prompt_tokens: u64,
    pub total_tokens: u64,
}

impl Documented for Usage {
    const NAME: &'static str = "Usage";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("completion_tokens", TypeDesc::Int)
                .doc("Number of tokens in the generated completion."),
            FieldSpec::new("prompt_tokens", TypeDesc::Int).doc("Number of tokens in the prompt."),
            FieldSpec::new("total_tokens", TypeDesc::Int)
                .doc("Total number of tokens used in the request (prompt + completion)."),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    pub role: String,
    #[serde(default)]
    pub refusal: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Documented for ResponseMessage {
    const NAME: &'static str = "Message";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("content", TypeDesc::optional(TypeDesc::Str))
                .doc("The contents of the message. Null when the model only called tools.")
                .default_null(),
            FieldSpec::new("role", TypeDesc::Str).doc("The role of the author of this message."),
            FieldSpec::new("refusal", TypeDesc::optional(TypeDesc::Str))
                .doc("The refusal message generated by the model.")
                .default_null(),
            FieldSpec::new(
                "tool_calls",
                TypeDesc::optional(TypeDesc::list(TypeDesc::object::<ToolCall>())),
            )
            .doc("The tool calls generated by the model, such as function calls.")
            .default_null(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    pub finish_reason: String,
    pub index: u32,
    pub message: ResponseMessage,
    #[serde(default)]
    pub logprobs: Option<Value>,
}

impl Documented for Choice {
    const NAME: &'static str = "Choice";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new(
                "finish_reason",
                TypeDesc::Literal(&["stop", "length", "content_filter", "tool_calls", "function_call"]),
            )
            .doc("The reason the model stopped generating tokens. This will be `stop` if the model hit a natural stop point or a provided stop sequence, `length` if the maximum number of tokens specified in the request was reached, `content_filter` if content was omitted due to a flag from our content filters, `tool_calls` if the model called a tool, or `function_call` (deprecated) if the model called a function."),
            FieldSpec::new("index", TypeDesc::Int)
                .doc("The index of the choice in the list of choices."),
            FieldSpec::new("message", TypeDesc::object::<ResponseMessage>())
                .doc("A chat completion message generated by the model."),
            FieldSpec::new(
                "logprobs",
                TypeDesc::optional(TypeDesc::map(TypeDesc::Str, TypeDesc::Any)),
            )
            .doc("Log probability information for the choice.")
            .default_null(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionResponse {
    pub id: String,
    pub choices: Vec<Choice>,
    pub created: i64,
    pub model: String,
    pub object: String,
    pub usage: Usage,
    #[serde(default)]
    pub service_tier: Option<String>,
    #[serde(default)]
    pub system_fingerprint: Option<String>,
}

impl Documented for CompletionResponse {
    const NAME: &'static str = "CompletionResponse";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("id", TypeDesc::Str)
                .doc("A unique identifier for the chat completion."),
            FieldSpec::new("choices", TypeDesc::list(TypeDesc::object::<Choice>()))
                .doc("A list of chat completion choices. Can be more than one if n is greater than 1."),
            FieldSpec::new("created", TypeDesc::Int)
                .doc("The Unix timestamp (in seconds) of when the chat completion was created."),
            FieldSpec::new("model", TypeDesc::Str)
                .doc("The model used for the chat completion."),
            FieldSpec::new("object", TypeDesc::Str)
                .doc("The object type, which is always `chat.completion`."),
            FieldSpec::new("usage", TypeDesc::object::<Usage>())
                .doc("Usage statistics for the completion request."),
            FieldSpec::new(
                "service_tier",
                TypeDesc::optional(TypeDesc::Literal(&["auto", "default"])),
            )
            .doc("The service tier used for processing the request. This field is only included if the service_tier parameter is specified in the request.")
            .default_null(),
            FieldSpec::new("system_fingerprint", TypeDesc::optional(TypeDesc::Str))
                .doc("This fingerprint represents the backend configuration that the model runs with.\n\nCan be used in conjunction with the `seed` request parameter to understand when backend changes have been made that might impact determinism.")
                .default_null(),
        ]
    }
}
