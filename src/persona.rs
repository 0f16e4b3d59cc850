//! Prompt and greeting templates derived from a persona's role and expertise.

use crate::types::Visibility;

const PLATFORM_CONTEXT: &str = "I'm an AI twin created on the AI Cloning Platform";

const PRIVATE_CLOSING: &str = " Since I'm configured as a private model, I'll personalize my responses to you. Would you mind sharing a bit about yourself so I can assist you better?";
const PUBLIC_CLOSING: &str = " How can I help you today?";

/// Persona used by the relay when a request carries no metadata.
pub const DEFAULT_ROLE: &str = "assistant";
pub const DEFAULT_TEXT_SAMPLE: &str = "general knowledge";

/// Role tag that selects the greeting template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PersonaRole {
    Chatbot,
    Assistant,
    Teacher,
    Coach,
    Other(String),
}

impl PersonaRole {
    pub fn parse(role: &str) -> Self {
        match role.to_lowercase().as_str() {
            "chatbot" => Self::Chatbot,
            "assistant" => Self::Assistant,
            "teacher" => Self::Teacher,
            "coach" => Self::Coach,
            _ => Self::Other(role.to_string()),
        }
    }
}

/// First assistant message shown in a fresh chat. Never sent to the relay.
pub fn welcome_message(role: &str, text_sample: &str, visibility: Visibility) -> String {
    let expertise = format!("with expertise in \"{text_sample}\"");

    let mut greeting = match PersonaRole::parse(role) {
        PersonaRole::Chatbot => format!("Hello! {PLATFORM_CONTEXT} as a {role} {expertise}."),
        PersonaRole::Assistant => {
            format!("Hi there! {PLATFORM_CONTEXT} as your personal {role} {expertise}.")
        }
        PersonaRole::Teacher => format!("Welcome! {PLATFORM_CONTEXT} as a {role} {expertise}."),
        PersonaRole::Coach => format!("Hey there! {PLATFORM_CONTEXT} as your {role} {expertise}."),
        PersonaRole::Other(raw) => {
            format!("Hello! {PLATFORM_CONTEXT} with the role of \"{raw}\" {expertise}.")
        }
    };

    greeting.push_str(match visibility {
        Visibility::Private => PRIVATE_CLOSING,
        Visibility::Public => PUBLIC_CLOSING,
    });
    greeting
}

/// System message that heads the client's wire log.
pub fn client_system_prompt(role: &str, text_sample: &str) -> String {
    format!(
        "You are an AI twin created on the AI Cloning Platform with the role of {role} and expertise in \"{text_sample}\"."
    )
}

/// System message the relay prepends to every provider call.
///
/// Lines after the first carry a four-space indent.
pub fn relay_system_prompt(role: &str, text_sample: &str) -> String {
    format!(
        r#"You are an AI with the role of {role}.
    You have expertise in "{text_sample}" and should incorporate this knowledge into your responses.
    Always respond in a style and with knowledge consistent with your role as {role} and your expertise in {text_sample}.
    If relevant, you may reference concepts, techniques, or terminologies related to {text_sample} in your responses.
    Your tone should match what would be expected from someone in the role of {role}."#
    )
}
