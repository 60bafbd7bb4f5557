//! Prompt construction for translation requests

use serde::{Deserialize, Serialize};

use crate::core::models::TranslationRequest;
use crate::core::transport::ChatMessage;

/// Persona used as the system message for [`PromptStyle::Combined`]
pub const DEFAULT_PERSONA: &str = "You are a professional translator.";

/// System instruction template for [`PromptStyle::Split`]
pub const DEFAULT_SPLIT_INSTRUCTION: &str = "You are an expert translator. Your task is to translate text from {source_language} to {target_language}. You must return the translated text, without any conversational filler. After the translation, only indicate a list of the spans in the translated text that you were not sure about, no explanations.";

/// How the translation instruction is laid out across chat roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStyle {
    /// Persona as system message, instruction and quoted text in one user message
    Combined,
    /// Instruction (with language names) as system message, raw text as user message
    Split,
}

impl PromptStyle {
    pub fn default_system_prompt(&self) -> &'static str {
        match self {
            PromptStyle::Combined => DEFAULT_PERSONA,
            PromptStyle::Split => DEFAULT_SPLIT_INSTRUCTION,
        }
    }
}

/// Single-message instruction embedding both languages and the quoted text
pub fn combined_instruction(request: &TranslationRequest) -> String {
    format!(
        "Translate the following {} text to {}: \"{}\"",
        request.source_language, request.target_language, request.text
    )
}

/// Fill `{source_language}` / `{target_language}` in a system template
pub fn render_template(template: &str, request: &TranslationRequest) -> String {
    template
        .replace("{source_language}", &request.source_language)
        .replace("{target_language}", &request.target_language)
}

/// Build the chat messages for a request
pub fn build_messages(
    style: PromptStyle,
    system_prompt: &str,
    request: &TranslationRequest,
) -> Vec<ChatMessage> {
    match style {
        PromptStyle::Combined => {
            let mut messages = Vec::with_capacity(2);
            if !system_prompt.trim().is_empty() {
                messages.push(ChatMessage::system(system_prompt));
            }
            messages.push(ChatMessage::user(combined_instruction(request)));
            messages
        }
        PromptStyle::Split => {
            let mut messages = Vec::with_capacity(2);
            if !system_prompt.trim().is_empty() {
                messages.push(ChatMessage::system(render_template(system_prompt, request)));
            }
            messages.push(ChatMessage::user(request.text.clone()));
            messages
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::Role;

    fn request() -> TranslationRequest {
        TranslationRequest::new("The cat sat on the mat.", "English", "French")
    }

    #[test]
    fn test_combined_prompt() {
        let messages = build_messages(PromptStyle::Combined, DEFAULT_PERSONA, &request());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, DEFAULT_PERSONA);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(
            messages[1].content,
            "Translate the following English text to French: \"The cat sat on the mat.\""
        );
    }

    #[test]
    fn test_combined_prompt_without_persona() {
        let messages = build_messages(PromptStyle::Combined, "  ", &request());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
    }

    #[test]
    fn test_split_prompt_without_instruction() {
        let messages = build_messages(PromptStyle::Split, "", &request());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "The cat sat on the mat.");
    }

    #[test]
    fn test_split_prompt() {
        let req = TranslationRequest::new("What is your name, sir?", "English", "Quechua");
        let messages = build_messages(PromptStyle::Split, DEFAULT_SPLIT_INSTRUCTION, &req);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0]
            .content
            .contains("translate text from English to Quechua"));
        assert!(!messages[0].content.contains('{'));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "What is your name, sir?");
    }

    #[test]
    fn test_languages_are_free_form() {
        let req = TranslationRequest::new("hola", "castellano rioplatense", "Klingon");
        let rendered = render_template("{source_language} -> {target_language}", &req);
        assert_eq!(rendered, "castellano rioplatense -> Klingon");
    }
}
