//! Supportive reply generation.
//!
//! The responder assembles a prompt (system prompt, built-in topic knowledge,
//! recent conversation, user profile) and hands it to a [`TextGenerator`].
//! When generation fails the user still gets a fixed supportive reply.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::detection::MoodState;
use crate::error::GenerationError;

/// Most knowledge snippets included in one prompt.
const MAX_CONTEXTS: usize = 3;

/// Most conversation turns included in one prompt.
const MAX_HISTORY_TURNS: usize = 5;

const THERAPEUTIC_PROMPT: &str = "You are a compassionate mental health support assistant. Provide empathetic, evidence-based guidance.

Guidelines:
1. Always respond with empathy and validation
2. Use therapeutic communication techniques
3. Encourage professional help when appropriate
4. Never diagnose or prescribe medication
5. Detect crisis situations and provide immediate resources
6. Maintain a warm, non-judgmental tone
7. Use active listening and reflection
8. Provide practical coping strategies

Remember: You are a support tool, not a replacement for professional therapy.";

const CRISIS_PROMPT: &str = "CRISIS INTERVENTION MODE

Express immediate concern and care. Provide crisis resources:
- National Suicide Prevention Lifeline: 988
- Crisis Text Line: Text HOME to 741741
- Emergency Services: 911

Stay calm, supportive, and focus on safety.";

const RESPONSE_INSTRUCTIONS: &str = "Provide a therapeutic, empathetic response that acknowledges the user's feelings and offers support. Format the response in Markdown: bold for important points, bullet lists for techniques, numbered lists for steps, blockquotes for reminders.";

/// Reply used when the generator is unavailable.
pub const FALLBACK_REPLY: &str = "I'm here to support you. Could you tell me more about what you're experiencing?";

/// Built-in topic knowledge, matched by topic name in the user's message.
const KNOWLEDGE_BASE: &[(&str, &str)] = &[
    ("anxiety", "Deep breathing exercises can help manage anxiety. Try the 4-7-8 technique: Inhale for 4 counts, hold for 7 counts, exhale for 8 counts."),
    ("depression", "Behavioral activation is effective for depression. Start small: schedule one pleasant activity daily, even if you don't feel like it."),
    ("mindfulness", "Mindfulness meditation reduces stress. Sit comfortably, focus on your breath, observe thoughts without judgment."),
    ("cbt", "Cognitive restructuring helps challenge negative thoughts. Ask: Is this thought based on facts? What evidence supports it?"),
    ("grounding", "The 5-4-3-2-1 grounding technique: 5 things you see, 4 things you touch, 3 things you hear, 2 things you smell, 1 thing you taste."),
    ("sleep", "Good sleep hygiene: consistent sleep schedule, avoid screens before bed, keep bedroom cool and dark, limit caffeine."),
    ("crisis", "If you're in crisis, reach out immediately: Call 988 (Suicide & Crisis Lifeline), Text HOME to 741741, or call 911."),
];

/// Capability that completes a prompt with free text.
pub trait TextGenerator: Send + Sync {
    /// Generates text for the prompt.
    fn generate_text(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Returns the name of this generator for logging.
    fn name(&self) -> &'static str;
}

/// Who said a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        })
    }
}

/// One earlier message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// What the responder may know about the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfileSummary {
    pub current_mood: Option<MoodState>,
    pub primary_concerns: Vec<String>,
}

/// Input for one reply.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SupportRequest {
    pub message: String,
    /// Earlier turns, oldest first.
    pub history: Vec<ConversationTurn>,
    /// Use the crisis system prompt.
    pub is_crisis: bool,
    pub profile: Option<UserProfileSummary>,
}

impl SupportRequest {
    /// A request with no history or profile.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Knowledge included in a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeSnippet {
    pub topic: String,
    pub content: String,
}

/// A generated (or fallback) reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportReply {
    pub response: String,
    pub contexts_used: Vec<KnowledgeSnippet>,
    pub is_crisis_response: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Builds prompts and produces supportive replies.
#[derive(Clone)]
pub struct SupportResponder {
    generator: Arc<dyn TextGenerator>,
}

impl fmt::Debug for SupportResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupportResponder")
            .field("generator", &self.generator.name())
            .finish()
    }
}

impl SupportResponder {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Produces a reply. Falls back to [`FALLBACK_REPLY`] on generator failure.
    pub fn respond(&self, request: &SupportRequest) -> SupportReply {
        let contexts = retrieve_context(&request.message);
        let prompt = build_prompt(request, &contexts);

        let result = self
            .generator
            .generate_text(&prompt)
            .and_then(|text| {
                if text.trim().is_empty() {
                    Err(GenerationError::Empty)
                } else {
                    Ok(text)
                }
            });

        match result {
            Ok(response) => SupportReply {
                response,
                contexts_used: contexts,
                is_crisis_response: request.is_crisis,
                error: None,
            },
            Err(e) => {
                tracing::error!(generator = self.generator.name(), "Failed to generate response: {}", e);
                SupportReply {
                    response: FALLBACK_REPLY.to_string(),
                    contexts_used: Vec::new(),
                    is_crisis_response: request.is_crisis,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Knowledge snippets whose topic appears in the message.
pub fn retrieve_context(message: &str) -> Vec<KnowledgeSnippet> {
    let message = message.to_lowercase();
    KNOWLEDGE_BASE
        .iter()
        .filter(|(topic, _)| message.contains(topic))
        .take(MAX_CONTEXTS)
        .map(|(topic, content)| KnowledgeSnippet {
            topic: topic.to_string(),
            content: content.to_string(),
        })
        .collect()
}

/// Assembles the full prompt for a request.
pub fn build_prompt(request: &SupportRequest, contexts: &[KnowledgeSnippet]) -> String {
    let system_prompt = if request.is_crisis {
        CRISIS_PROMPT
    } else {
        THERAPEUTIC_PROMPT
    };

    let mut sections = vec![system_prompt.to_string()];

    if !contexts.is_empty() {
        let knowledge: Vec<String> = contexts
            .iter()
            .map(|c| format!("[{}] {}", c.topic, c.content))
            .collect();
        sections.push(format!("Relevant Knowledge:\n{}", knowledge.join("\n\n")));
    }

    if let Some(profile) = &request.profile {
        let mood = profile
            .current_mood
            .map_or("unknown", |m| m.as_str());
        sections.push(format!(
            "User Profile:\n- Current Mood: {}\n- Primary Concerns: {}",
            mood,
            profile.primary_concerns.join(", ")
        ));
    }

    if !request.history.is_empty() {
        let start = request.history.len().saturating_sub(MAX_HISTORY_TURNS);
        let turns: Vec<String> = request.history[start..]
            .iter()
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect();
        sections.push(format!("Recent Conversation:\n{}", turns.join("\n")));
    }

    sections.push(format!("User: {}", request.message));
    sections.push(RESPONSE_INSTRUCTIONS.to_string());
    sections.join("\n\n")
}
