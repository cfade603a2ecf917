use async_trait::async_trait;
use parley_types::SelectedTopic;

use crate::reply::{ReplyContext, ReplyError, ReplyGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Why,
    Summary,
    Source,
    Greeting,
    Open,
}

// First matching rule wins
const RULES: &[(Intent, &[&str])] = &[
    (Intent::Why, &["pourquoi", "why", "comment", "how"]),
    (Intent::Summary, &["résumé", "résume", "resume", "summary", "summarize", "tldr"]),
    (Intent::Source, &["source", "lien", "link", "url"]),
    (Intent::Greeting, &["bonjour", "salut", "coucou", "hello", "hi", "hey"]),
];

fn detect_intent(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| words.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Open)
}

/// Keyword-driven replies about the selected news item
#[derive(Debug, Default, Clone)]
pub struct KeywordReplyGenerator;

impl KeywordReplyGenerator {
    pub fn new() -> Self {
        Self
    }

    fn reply_about(intent: Intent, text: &str, topic: &SelectedTopic) -> String {
        let title = &topic.title;
        match intent {
            Intent::Why => match &topic.description {
                Some(description) => format!(
                    "Bonne question sur « {} ». Voici ce que dit l'article : {}",
                    title, description
                ),
                None => format!(
                    "Bonne question sur « {} ». L'article ne donne pas plus de détails, mais je peux vous indiquer sa source.",
                    title
                ),
            },
            Intent::Summary => format!(
                "En bref, « {} » : {}",
                title,
                topic
                    .description
                    .as_deref()
                    .unwrap_or("aucun résumé n'est disponible pour cet article.")
            ),
            Intent::Source => match &topic.url {
                Some(url) => format!("Vous pouvez lire « {} » ici : {}", title, url),
                None => format!("Je n'ai pas de lien pour « {} ».", title),
            },
            Intent::Greeting => format!(
                "Bonjour ! Nous parlons de « {} ». Que souhaitez-vous savoir ?",
                title
            ),
            Intent::Open => format!(
                "🤖 À propos de « {} », vous avez demandé : \"{}\". Demandez-moi un résumé, le pourquoi ou la source.",
                title, text
            ),
        }
    }
}

#[async_trait]
impl ReplyGenerator for KeywordReplyGenerator {
    async fn generate(&self, context: &ReplyContext) -> Result<String, ReplyError> {
        let intent = detect_intent(&context.text);

        match (&context.topic, intent) {
            (Some(topic), intent) => Ok(Self::reply_about(intent, &context.text, topic)),
            (None, Intent::Greeting) => {
                Ok("Bonjour ! Sélectionnez un article pour commencer.".to_string())
            }
            (None, _) => Err(ReplyError::TopicRequired),
        }
    }
}
