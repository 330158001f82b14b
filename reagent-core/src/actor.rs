//! # Reasoning Actor
//!
//! The source of next-turn text given the transcript so far. The loop treats
//! it as an opaque awaitable call, which keeps model inference out of the
//! core: production wires in a chat-completion provider, tests and demos use
//! a scripted sequence.

use crate::error::{Error, Result};
use crate::provider::{transcript_messages, CompletionRequest, LlmProvider, UsageTracker};
use crate::transcript::Transcript;

/// Produces the next turn of the conversation.
///
/// The actor call is the loop's suspension point; implementations may block
/// on network I/O. Failures here are transport failures and are the only
/// errors the loop propagates to its caller.
#[allow(async_fn_in_trait)]
pub trait ReasoningActor {
    async fn next_turn(&mut self, transcript: &Transcript) -> Result<String>;
}

// ============================================================================
// Provider-backed actor
// ============================================================================

/// Adapts an [`LlmProvider`] into a reasoning actor.
///
/// Converts the transcript into wire messages on every call and accumulates
/// token usage across the run.
pub struct ProviderActor<P: LlmProvider> {
    provider: P,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    usage: UsageTracker,
}

impl<P: LlmProvider> ProviderActor<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            model: None,
            temperature: None,
            max_tokens: None,
            usage: UsageTracker::new(),
        }
    }

    /// Override the provider's default model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap completion length
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Token usage accumulated so far
    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    /// The wrapped provider
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: LlmProvider> ReasoningActor for ProviderActor<P> {
    async fn next_turn(&mut self, transcript: &Transcript) -> Result<String> {
        let mut request = CompletionRequest::new(transcript_messages(transcript));
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| Error::from(e).with_operation("actor::next_turn"))?;

        self.usage.track(&response.model, &response.usage);

        response.content.ok_or_else(|| {
            Error::inference_failed("provider returned empty response")
                .with_operation("actor::next_turn")
                .with_context("model", response.model)
        })
    }
}

// ============================================================================
// Scripted actor
// ============================================================================

/// Replays a canned sequence of turns.
///
/// Used by tests, the offline demo, and anywhere a deterministic next-turn
/// source is wanted. After the script is exhausted it keeps yielding a
/// terminal final-answer line so the loop always converges.
pub struct ScriptedActor {
    responses: Vec<String>,
    cursor: usize,
}

impl ScriptedActor {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            cursor: 0,
        }
    }

    /// Build a script from string literals
    pub fn from_turns(turns: &[&str]) -> Self {
        Self::new(turns.iter().map(|t| t.to_string()).collect())
    }

    /// Number of scripted turns already consumed
    pub fn calls_made(&self) -> usize {
        self.cursor
    }

    /// Number of scripted turns left before the exhaustion fallback
    pub fn remaining(&self) -> usize {
        self.responses.len().saturating_sub(self.cursor)
    }
}

impl ReasoningActor for ScriptedActor {
    async fn next_turn(&mut self, _transcript: &Transcript) -> Result<String> {
        let text = match self.responses.get(self.cursor) {
            Some(text) => text.clone(),
            None => "Final Answer: Maximum steps reached without finding solution.".to_string(),
        };
        self.cursor += 1;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_actor_sequence() {
        let mut actor = ScriptedActor::from_turns(&["first turn", "second turn"]);
        let transcript = Transcript::new();

        let first = tokio_test::block_on(actor.next_turn(&transcript)).unwrap();
        assert_eq!(first, "first turn");
        assert_eq!(actor.calls_made(), 1);
        assert_eq!(actor.remaining(), 1);

        let second = tokio_test::block_on(actor.next_turn(&transcript)).unwrap();
        assert_eq!(second, "second turn");
        assert_eq!(actor.remaining(), 0);
    }

    #[test]
    fn test_scripted_actor_exhaustion_fallback() {
        let mut actor = ScriptedActor::from_turns(&[]);
        let transcript = Transcript::new();

        let text = tokio_test::block_on(actor.next_turn(&transcript)).unwrap();
        assert!(text.starts_with("Final Answer:"));
    }
}
