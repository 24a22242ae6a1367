//! Ordered provider fallback.

use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use provider_core::{Prompt, Provider, ProviderFailure, ProviderReply, ProviderResult};
use tracing::{debug, info, warn};

use crate::error::OrchestratorError;
use crate::outcome::{AttemptFailure, ProviderSpec, ReplyOutcome};

/// Text sent when every provider fails.
pub const DEFAULT_FALLBACK_TEXT: &str = "抱歉，AI 回覆失敗！";

struct ProviderEntry {
    spec: ProviderSpec,
    provider: Arc<dyn Provider>,
}

/// Asks providers in priority order until one succeeds.
///
/// Providers are tried strictly one at a time. The first success wins and
/// no later provider is contacted. Each attempt is bounded by its
/// provider's timeout, and a provider that panics counts as a transport
/// failure. When every provider fails the outcome carries the fallback
/// text, so [`ask`](Self::ask) never errors.
///
/// Holds no per-request state and can be shared across concurrent requests.
pub struct ReplyOrchestrator {
    entries: Vec<ProviderEntry>,
    fallback_text: String,
    tag_replies: bool,
}

impl ReplyOrchestrator {
    /// Create a builder.
    pub fn builder() -> ReplyOrchestratorBuilder {
        ReplyOrchestratorBuilder::default()
    }

    /// Configured providers in fallback order.
    pub fn specs(&self) -> impl Iterator<Item = &ProviderSpec> {
        self.entries.iter().map(|entry| &entry.spec)
    }

    /// Text used when every provider fails.
    pub fn fallback_text(&self) -> &str {
        &self.fallback_text
    }

    /// Get a reply for `prompt`.
    pub async fn ask(&self, prompt: &Prompt) -> ReplyOutcome {
        let mut attempted = Vec::with_capacity(self.entries.len());
        let mut failures = Vec::new();

        for entry in &self.entries {
            let id = &entry.spec.id;
            attempted.push(id.clone());
            debug!("Asking provider {} (priority {})", id, entry.spec.priority);

            match attempt(entry, prompt).await {
                Ok(reply) => {
                    info!(
                        "Provider {} answered after {} failure(s)",
                        id,
                        failures.len()
                    );
                    return ReplyOutcome {
                        text: self.render(id, reply.text),
                        answered_by: Some(id.clone()),
                        attempted,
                        failures,
                    };
                }
                Err(failure) => {
                    warn!("Provider {} failed: {}", id, failure);
                    failures.push(AttemptFailure {
                        provider_id: id.clone(),
                        failure,
                    });
                }
            }
        }

        warn!(
            "All {} provider(s) failed, sending fallback text",
            self.entries.len()
        );
        ReplyOutcome {
            text: self.fallback_text.clone(),
            answered_by: None,
            attempted,
            failures,
        }
    }

    fn render(&self, id: &str, text: String) -> String {
        if self.tag_replies {
            format!("[{}] {}", id, text)
        } else {
            text
        }
    }
}

/// One bounded, panic-isolated attempt.
async fn attempt(entry: &ProviderEntry, prompt: &Prompt) -> ProviderResult {
    let budget = entry.spec.timeout;
    let call = AssertUnwindSafe(entry.provider.ask(prompt, budget)).catch_unwind();

    let reply = match tokio::time::timeout(budget, call).await {
        Ok(Ok(result)) => result?,
        Ok(Err(panic)) => {
            return Err(ProviderFailure::transport(format!(
                "provider panicked: {}",
                panic_message(panic.as_ref())
            )))
        }
        Err(_) => {
            return Err(ProviderFailure::timeout(format!(
                "no reply within {:?}",
                budget
            )))
        }
    };

    // Re-check so a provider that hands back blank text cannot win.
    ProviderReply::new(&entry.spec.id, reply.text)
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

/// Builder for [`ReplyOrchestrator`].
///
/// Providers are tried in the order they are added.
pub struct ReplyOrchestratorBuilder {
    providers: Vec<(Arc<dyn Provider>, Option<Duration>)>,
    fallback_text: String,
    tag_replies: bool,
}

impl Default for ReplyOrchestratorBuilder {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
            tag_replies: false,
        }
    }
}

impl ReplyOrchestratorBuilder {
    /// Append a provider using its own default timeout.
    pub fn provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.providers.push((provider, None));
        self
    }

    /// Append a provider with an explicit timeout.
    pub fn provider_with_timeout(mut self, provider: Arc<dyn Provider>, timeout: Duration) -> Self {
        self.providers.push((provider, Some(timeout)));
        self
    }

    /// Set the text sent when every provider fails.
    pub fn fallback_text(mut self, text: impl Into<String>) -> Self {
        self.fallback_text = text.into();
        self
    }

    /// Prefix successful replies with `[provider-id]`.
    pub fn tag_replies(mut self, enabled: bool) -> Self {
        self.tag_replies = enabled;
        self
    }

    /// Build the orchestrator.
    ///
    /// Fails when no provider is configured, a timeout is zero, two
    /// providers share an id, or the fallback text is blank.
    pub fn build(self) -> Result<ReplyOrchestrator, OrchestratorError> {
        if self.providers.is_empty() {
            return Err(OrchestratorError::Configuration(
                "at least one provider is required".to_string(),
            ));
        }
        if self.fallback_text.trim().is_empty() {
            return Err(OrchestratorError::Configuration(
                "fallback text must not be blank".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(self.providers.len());

        for (index, (provider, timeout)) in self.providers.into_iter().enumerate() {
            let id = provider.id().to_string();
            if !seen.insert(id.clone()) {
                return Err(OrchestratorError::Configuration(format!(
                    "duplicate provider id: {}",
                    id
                )));
            }

            let timeout = timeout.unwrap_or_else(|| provider.default_timeout());
            if timeout.is_zero() {
                return Err(OrchestratorError::Configuration(format!(
                    "provider {} has a zero timeout",
                    id
                )));
            }

            let spec = ProviderSpec {
                endpoint: provider.endpoint().to_string(),
                id,
                timeout,
                priority: index + 1,
            };
            info!(
                "Registered provider {} at priority {} (timeout {:?})",
                spec.id, spec.priority, spec.timeout
            );
            entries.push(ProviderEntry { spec, provider });
        }

        Ok(ReplyOrchestrator {
            entries,
            fallback_text: self.fallback_text,
            tag_replies: self.tag_replies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_provider::{
        DelayedProvider, EchoProvider, FailureKind, PanickingProvider, ScriptedProvider,
    };

    fn prompt(text: &str) -> Prompt {
        Prompt::new(text).unwrap()
    }

    #[tokio::test]
    async fn test_first_success_stops_the_scan() {
        let p1 = Arc::new(ScriptedProvider::replying("p1", "from p1"));
        let p2 = Arc::new(ScriptedProvider::replying("p2", "from p2"));
        let orchestrator = ReplyOrchestrator::builder()
            .provider(p1.clone())
            .provider(p2.clone())
            .build()
            .unwrap();

        let outcome = orchestrator.ask(&prompt("hi")).await;

        assert_eq!(outcome.text, "from p1");
        assert_eq!(outcome.answered_by.as_deref(), Some("p1"));
        assert_eq!(outcome.attempted, vec!["p1"]);
        assert!(outcome.failures.is_empty());
        assert_eq!(p1.calls(), 1);
        assert_eq!(p2.calls(), 0);
    }

    #[tokio::test]
    async fn test_falls_through_in_priority_order() {
        let p1 = Arc::new(ScriptedProvider::failing(
            "p1",
            FailureKind::HttpError { status: 503 },
        ));
        let p2 = Arc::new(ScriptedProvider::failing("p2", FailureKind::MalformedResponse));
        let p3 = Arc::new(ScriptedProvider::replying("p3", "third time"));
        let p4 = Arc::new(ScriptedProvider::replying("p4", "never"));
        let orchestrator = ReplyOrchestrator::builder()
            .provider(p1.clone())
            .provider(p2.clone())
            .provider(p3.clone())
            .provider(p4.clone())
            .build()
            .unwrap();

        let outcome = orchestrator.ask(&prompt("hi")).await;

        assert_eq!(outcome.text, "third time");
        assert_eq!(outcome.answered_by_label(), "p3");
        assert_eq!(outcome.attempted, vec!["p1", "p2", "p3"]);
        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(outcome.failures[0].provider_id, "p1");
        assert_eq!(
            outcome.failures[0].failure.kind,
            FailureKind::HttpError { status: 503 }
        );
        assert_eq!(outcome.failures[1].failure.kind, FailureKind::MalformedResponse);
        assert_eq!(p4.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_fail_returns_fallback() {
        let p1 = Arc::new(ScriptedProvider::failing("p1", FailureKind::Transport));
        let p2 = Arc::new(ScriptedProvider::failing("p2", FailureKind::EmptyContent));
        let orchestrator = ReplyOrchestrator::builder()
            .provider(p1.clone())
            .provider(p2.clone())
            .fallback_text("都壞了")
            .build()
            .unwrap();

        let outcome = orchestrator.ask(&prompt("hi")).await;

        assert_eq!(outcome.text, "都壞了");
        assert!(outcome.is_fallback());
        assert_eq!(outcome.attempted, vec!["p1", "p2"]);
        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(p1.calls(), 1);
        assert_eq!(p2.calls(), 1);
    }

    #[tokio::test]
    async fn test_single_failing_provider() {
        let orchestrator = ReplyOrchestrator::builder()
            .provider(Arc::new(ScriptedProvider::failing("only", FailureKind::Transport)))
            .build()
            .unwrap();

        let outcome = orchestrator.ask(&prompt("hi")).await;

        assert_eq!(outcome.text, DEFAULT_FALLBACK_TEXT);
        assert_eq!(outcome.answered_by, None);
        assert_eq!(outcome.attempted, vec!["only"]);
        assert_eq!(outcome.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_same_prompt_same_outcome() {
        let orchestrator = ReplyOrchestrator::builder()
            .provider(Arc::new(ScriptedProvider::failing("p1", FailureKind::Transport)))
            .provider(Arc::new(EchoProvider::new("echo")))
            .build()
            .unwrap();

        let first = orchestrator.ask(&prompt("同一句話")).await;
        let second = orchestrator.ask(&prompt("同一句話")).await;

        assert_eq!(first, second);
        assert_eq!(first.answered_by.as_deref(), Some("echo"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out_and_next_answers() {
        let slow = Arc::new(DelayedProvider::with_secs(
            ScriptedProvider::replying("slow", "too late"),
            30,
        ));
        let fast = Arc::new(ScriptedProvider::replying("fast", "星期三"));
        let orchestrator = ReplyOrchestrator::builder()
            .provider_with_timeout(slow.clone(), Duration::from_secs(2))
            .provider(fast)
            .build()
            .unwrap();

        let outcome = orchestrator.ask(&prompt("今天星期幾？")).await;

        assert_eq!(outcome.text, "星期三");
        assert_eq!(outcome.attempted, vec!["slow", "fast"]);
        assert_eq!(outcome.failures[0].failure.kind, FailureKind::Timeout);
    }

    #[tokio::test]
    async fn test_panicking_provider_is_transport_failure() {
        let orchestrator = ReplyOrchestrator::builder()
            .provider(Arc::new(PanickingProvider::new("boom")))
            .provider(Arc::new(ScriptedProvider::replying("steady", "ok")))
            .build()
            .unwrap();

        let outcome = orchestrator.ask(&prompt("hi")).await;

        assert_eq!(outcome.text, "ok");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].provider_id, "boom");
        assert_eq!(outcome.failures[0].failure.kind, FailureKind::Transport);
        assert!(outcome.failures[0].failure.detail.contains("panicked"));
    }

    #[tokio::test]
    async fn test_timeout_budget_is_passed_to_provider() {
        let scripted = Arc::new(
            ScriptedProvider::replying("p1", "ok").with_default_timeout(Duration::from_millis(750)),
        );
        let orchestrator = ReplyOrchestrator::builder()
            .provider(scripted.clone())
            .build()
            .unwrap();

        orchestrator.ask(&prompt("hi")).await;

        assert_eq!(scripted.last_timeout(), Some(Duration::from_millis(750)));
        let spec = orchestrator.specs().next().unwrap();
        assert_eq!(spec.timeout, Duration::from_millis(750));
        assert_eq!(spec.priority, 1);
    }

    #[test]
    fn test_priorities_follow_list_position() {
        let orchestrator = ReplyOrchestrator::builder()
            .provider(Arc::new(EchoProvider::new("primary")))
            .provider(Arc::new(EchoProvider::new("backup")))
            .build()
            .unwrap();

        let ranked: Vec<_> = orchestrator
            .specs()
            .map(|spec| (spec.id.as_str(), spec.priority))
            .collect();
        assert_eq!(ranked, vec![("primary", 1), ("backup", 2)]);
    }

    #[tokio::test]
    async fn test_tagged_replies() {
        let orchestrator = ReplyOrchestrator::builder()
            .provider(Arc::new(ScriptedProvider::replying("gemini", "星期三")))
            .tag_replies(true)
            .build()
            .unwrap();

        let outcome = orchestrator.ask(&prompt("hi")).await;
        assert_eq!(outcome.text, "[gemini] 星期三");
    }

    #[tokio::test]
    async fn test_fallback_is_never_tagged() {
        let orchestrator = ReplyOrchestrator::builder()
            .provider(Arc::new(ScriptedProvider::failing("p1", FailureKind::Timeout)))
            .tag_replies(true)
            .build()
            .unwrap();

        let outcome = orchestrator.ask(&prompt("hi")).await;
        assert_eq!(outcome.text, DEFAULT_FALLBACK_TEXT);
    }

    #[test]
    fn test_build_rejects_bad_configuration() {
        assert!(matches!(
            ReplyOrchestrator::builder().build(),
            Err(OrchestratorError::Configuration(_))
        ));

        let duplicate = ReplyOrchestrator::builder()
            .provider(Arc::new(EchoProvider::new("same")))
            .provider(Arc::new(EchoProvider::new("same")))
            .build();
        assert!(matches!(duplicate, Err(OrchestratorError::Configuration(_))));

        let zero = ReplyOrchestrator::builder()
            .provider_with_timeout(Arc::new(EchoProvider::new("p1")), Duration::ZERO)
            .build();
        assert!(matches!(zero, Err(OrchestratorError::Configuration(_))));

        let blank = ReplyOrchestrator::builder()
            .provider(Arc::new(EchoProvider::new("p1")))
            .fallback_text("  ")
            .build();
        assert!(matches!(blank, Err(OrchestratorError::Configuration(_))));
    }
}
