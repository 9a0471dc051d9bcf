//! EdenAI chat (`POST /v2/text/chat`)

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::providers::{EndpointKind, UpstreamRequest};
use crate::proxy::Endpoint;
use crate::schema::{Documented, FieldSpec, TypeDesc};

pub fn endpoint() -> Endpoint {
    Endpoint::new("Chat", Method::POST, "/v2/text/chat", EndpointKind::EdenAiChat)
        .with_description(
            "The Chat API is a specialized programming interface designed to allow users to interact with natural language processing models like GPT-3, and GPT-4. These models can be used to generate human-like responses to various inputs and queries.",
        )
        .with_category("Chat")
        .with_docs_url("https://docs.edenai.co/reference/text_chat_create")
        .with_examples("edenai/chat.json")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl Documented for ToolCall {
    const NAME: &'static str = "ToolCall";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("id", TypeDesc::Str),
            FieldSpec::new("name", TypeDesc::Str),
            FieldSpec::new("arguments", TypeDesc::Str),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub parameters: String,
}

impl Documented for Tool {
    const NAME: &'static str = "Tool";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("name", TypeDesc::Str),
            FieldSpec::new("description", TypeDesc::Str),
            FieldSpec::new("parameters", TypeDesc::Str).doc(
                "The tool's parameters are specified using a JSON Schema object. Detailed format documentation is available in the JSON Schema reference.\n\nMake sure to well describe each parameter for best results.",
            ),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ToolResult {
    pub id: String,
    pub result: String,
}

impl Documented for ToolResult {
    const NAME: &'static str = "ToolResult";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("id", TypeDesc::Str)
                .doc("the id of the tool_call used to generate result"),
            FieldSpec::new("result", TypeDesc::Str).doc("the result of your function"),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PreviousHistory {
    pub role: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Documented for PreviousHistory {
    const NAME: &'static str = "PreviousHistory";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("role", TypeDesc::Str),
            FieldSpec::new("message", TypeDesc::Str),
            FieldSpec::new("tools", TypeDesc::optional(TypeDesc::list(TypeDesc::object::<Tool>())))
                .default_null(),
            FieldSpec::new(
                "tool_calls",
                TypeDesc::optional(TypeDesc::list(TypeDesc::object::<ToolCall>())),
            )
            .default_null(),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    #[default]
    Auto,
    Required,
    None,
}

fn default_true() -> bool {
    true
}

fn default_max_tokens() -> u32 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatRequest {
    pub providers: String,
    pub fallback_providers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_as_dict: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_as_list: Option<bool>,
    #[serde(default = "default_true")]
    pub show_base_64: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_original_response: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chatbot_global_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_history: Option<Vec<PreviousHistory>>,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub tool_choice: ToolChoice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_results: Option<Vec<ToolResult>>,
}

impl UpstreamRequest for ChatRequest {}

impl Documented for ChatRequest {
    const NAME: &'static str = "ChatRequest";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("providers", TypeDesc::Str).doc(
                "It can be one (ex: 'amazon' or 'google') or multiple provider(s) (ex: 'amazon,microsoft,google') that the data will be redirected to in order to get the processed results. Providers can also be invoked with specific models (ex: providers: 'amazon/model1, amazon/model2, google/model3')",
            ),
            FieldSpec::new("fallback_providers", TypeDesc::list(TypeDesc::Str)).doc(
                "Providers in this list will be used as fallback if the call to provider in providers parameter fails. To use this feature, you must input only one provider in the `providers` parameter. but you can put up to 5 fallbacks. They will be tried in the same order they are input, and it will stop to the first provider who doesn't fail. Doesn't work with async subfeatures.",
            ),
            FieldSpec::new("response_as_dict", TypeDesc::optional(TypeDesc::Bool))
                .doc("Optional : When set to true (default), the response is an object of responses with providers names as keys :\n\n`{\"google\" : { \"status\": \"success\", ... }, }`\n\nWhen set to false the response structure is a list of response objects :\n\n`[{\"status\": \"success\", \"provider\": \"google\" ... }, ]`.")
                .default_value(true),
            FieldSpec::new("attributes_as_list", TypeDesc::optional(TypeDesc::Bool))
                .doc("Optional : When set to false (default) the structure of the extracted items is list of objects having different attributes :\n\n`{'items': [{\"attribute_1\": \"x1\",\"attribute_2\": \"y2\"}, ... ]}`\n\nWhen it is set to true, the response contains an object with each attribute as a list :\n\n`{ \"attribute_1\": [\"x1\",\"x2\", ...], \"attribute_2\": [y1, y2, ...]}`")
                .default_value(false),
            FieldSpec::new("show_base_64", TypeDesc::Bool).default_value(true),
            FieldSpec::new("show_original_response", TypeDesc::optional(TypeDesc::Bool))
                .doc("Optional : Shows the original response of the provider.\n\nWhen set to true, a new attribute original_response will appear in the response object.")
                .default_value(false),
            FieldSpec::new("text", TypeDesc::optional(TypeDesc::Str))
                .doc("Start your conversation here...")
                .default_null(),
            FieldSpec::new("chatbot_global_action", TypeDesc::optional(TypeDesc::Str))
                .doc("A system message that helps set the behavior of the assistant. For example, 'You are a helpful assistant'.")
                .default_null(),
            FieldSpec::new(
                "previous_history",
                TypeDesc::optional(TypeDesc::list(TypeDesc::object::<PreviousHistory>())),
            )
            .doc("A list containing all the previous conversations between the user and the chatbot AI. Each item in the list should be a dictionary with two keys: 'role' and 'message'. The 'role' key specifies the role of the speaker and can have the values 'user' or 'assistant'. The 'message' key contains the text of the conversation from the respective role.")
            .default_null(),
            FieldSpec::new("temperature", TypeDesc::Float)
                .doc("Higher values mean the model will take more risks and value 0 (argmax sampling) works better for scenarios with a well-defined answer.")
                .default_value(0),
            FieldSpec::new("max_tokens", TypeDesc::Int)
                .doc("The maximum number of tokens to generate in the completion. The token count of your prompt plus max_tokens cannot exceed the model's context length.")
                .default_value(1000),
            FieldSpec::new("tool_choice", TypeDesc::Literal(&["auto", "required", "none"]))
                .default_value("auto"),
            FieldSpec::new(
                "available_tools",
                TypeDesc::optional(TypeDesc::list(TypeDesc::object::<Tool>())),
            )
            .doc("A list of tools the model may generate the right arguments for.")
            .default_null(),
            FieldSpec::new(
                "tool_results",
                TypeDesc::optional(TypeDesc::list(TypeDesc::object::<ToolResult>())),
            )
            .doc("List of results obtained from applying the tool_call arguments to your own tool.")
            .default_null(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub message: String,
}

impl Documented for ChatMessage {
    const NAME: &'static str = "Message";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("role", TypeDesc::Str),
            FieldSpec::new("message", TypeDesc::Str),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub generated_text: String,
    pub message: Vec<ChatMessage>,
    pub cost: f64,
}

impl Documented for ChatResponse {
    const NAME: &'static str = "ChatResponse";

    fn schema() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("generated_text", TypeDesc::Str),
            FieldSpec::new("message", TypeDesc::list(TypeDesc::object::<ChatMessage>())),
            FieldSpec::new("cost", TypeDesc::Float),
        ]
    }
}
