use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A component the engine chose to render inline, by registry name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInvocation {
    pub name: String,
    pub props: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub component: Option<ComponentInvocation>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            text: text.into(),
            component: None,
        }
    }

    pub fn assistant(text: impl Into<String>, component: Option<ComponentInvocation>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            text: text.into(),
            component,
        }
    }
}

/// Two states, one irreversible transition: the brief card is shown until the
/// first message goes out and never again within this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Brief,
    Viewing,
}

#[derive(Debug, Default)]
pub struct DesignThread {
    messages: Vec<ChatMessage>,
    in_flight: bool,
}

impl DesignThread {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn begin_send(&mut self, text: impl Into<String>) -> ChatMessage {
        let message = ChatMessage::user(text);
        self.messages.push(message.clone());
        self.in_flight = true;
        message
    }

    pub fn complete(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.in_flight = false;
    }

    /// A failed round-trip appends nothing; the transcript keeps its
    /// last-known state.
    pub fn fail(&mut self) {
        self.in_flight = false;
    }

    /// The canvas shows the most recent assistant message that carries a
    /// component, so the scan runs newest-first.
    pub fn latest_component(&self) -> Option<(&ChatMessage, &ComponentInvocation)> {
        self.messages
            .iter()
            .rev()
            .filter(|m| m.role == Role::Assistant)
            .find_map(|m| m.component.as_ref().map(|c| (m, c)))
    }
}

/// Posted back from the worker thread after an engine round-trip.
#[derive(Debug)]
pub enum ThreadEvent {
    Completed(ChatMessage),
    Failed(String),
}

pub struct QuickPrompt {
    pub label: &'static str,
    pub text: &'static str,
}

pub const QUICK_PROMPTS: &[QuickPrompt] = &[
    QuickPrompt {
        label: "Luxury bedroom",
        text: "Design a luxury master bedroom with warm walnut tones and brass accents.",
    },
    QuickPrompt {
        label: "Budget refresh",
        text: "Refresh my living room on a $2,000 budget and show the cost breakdown.",
    },
    QuickPrompt {
        label: "Minimalist studio",
        text: "Plan a minimalist studio apartment with a neutral palette.",
    },
    QuickPrompt {
        label: "Color palette",
        text: "Suggest a calming color palette for a coastal bedroom.",
    },
    QuickPrompt {
        label: "Shop the look",
        text: "List furniture I could buy for a mid-century living room under $3,500.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invocation(name: &str) -> ComponentInvocation {
        ComponentInvocation {
            name: name.to_string(),
            props: json!({}),
        }
    }

    #[test]
    fn latest_component_prefers_most_recent_not_first() {
        let mut thread = DesignThread::default();
        thread.begin_send("make me a room");
        thread.complete(ChatMessage::assistant("first", Some(invocation("luxury_room"))));
        thread.begin_send("cheaper please");
        thread.complete(ChatMessage::assistant("second", Some(invocation("budget_room"))));
        thread.begin_send("thanks");
        thread.complete(ChatMessage::assistant("plain text reply", None));

        let (_, component) = thread.latest_component().unwrap();
        assert_eq!(component.name, "budget_room");
    }

    #[test]
    fn latest_component_ignores_user_messages() {
        let mut thread = DesignThread::default();
        thread.begin_send("hello");
        assert!(thread.latest_component().is_none());
    }

    #[test]
    fn failed_round_trip_appends_nothing() {
        let mut thread = DesignThread::default();
        thread.begin_send("hello");
        assert!(thread.is_in_flight());
        thread.fail();
        assert!(!thread.is_in_flight());
        assert_eq!(thread.messages().len(), 1);
    }

    #[test]
    fn quick_prompts_submit_their_literal_text() {
        let mut thread = DesignThread::default();
        let prompt = &QUICK_PROMPTS[1];
        let sent = thread.begin_send(prompt.text);
        assert_eq!(sent.text, prompt.text);
        assert_eq!(thread.messages()[0].text, prompt.text);
    }
}
