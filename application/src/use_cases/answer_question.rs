//! Answer Question use case.
//!
//! [`AnswerPipeline`] turns a [`Question`] into an [`Answer`]:
//!
//! ```text
//! Received -> Gated -> Invoking -> Coercing -> Finalized
//!               |          |           |
//!               +----------+-----------+--> Fallback
//! ```
//!
//! - Out-of-domain questions get the fixed redirect without a model call.
//! - Failed calls and blank replies get the fixed apology.
//! - Only finalized exchanges are written to conversation history, so
//!   apologies never leak into later prompts.
//!
//! The pipeline never returns an error: every path ends in an [`Answer`].

use crate::config::{FallbackResponses, PipelineConfig};
use crate::ports::answer_logger::{AnswerEvent, AnswerLogger, NoAnswerLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::invoke_llm::{LlmInvoker, SlidingWindowLimiter};
use sma_domain::util::preview;
use sma_domain::{
    Answer, AnswerOrigin, CoercionPolicy, ConversationContext, ConversationTurn,
    Question, ResponseCoercer, SystemPrompt, TopicGuard,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Request states, used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Gated,
    Invoking,
    Coercing,
    Finalized,
    Fallback,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Received => "received",
            PipelineStage::Gated => "gated",
            PipelineStage::Invoking => "invoking",
            PipelineStage::Coercing => "coercing",
            PipelineStage::Finalized => "finalized",
            PipelineStage::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Orchestrates topic gating, model invocation, coercion and history.
///
/// Cheap to share: wrap in an `Arc` and call [`answer`](Self::answer) from
/// any number of tasks.
pub struct AnswerPipeline {
    guard: TopicGuard,
    coercer: ResponseCoercer,
    invoker: LlmInvoker,
    context: Arc<ConversationContext>,
    system_prompt: SystemPrompt,
    responses: FallbackResponses,
    answer_logger: Arc<dyn AnswerLogger>,
}

impl AnswerPipeline {
    pub fn new(
        invoker: LlmInvoker,
        context: Arc<ConversationContext>,
        system_prompt: SystemPrompt,
    ) -> Self {
        Self {
            guard: TopicGuard::default(),
            coercer: ResponseCoercer::default(),
            invoker,
            context,
            system_prompt,
            responses: FallbackResponses::default(),
            answer_logger: Arc::new(NoAnswerLogger),
        }
    }

    /// Build a pipeline, its invoker and history from one configuration.
    pub fn from_config(
        gateway: Arc<dyn LlmGateway>,
        system_prompt: SystemPrompt,
        config: &PipelineConfig,
    ) -> Self {
        let limiter = Arc::new(SlidingWindowLimiter::new(
            config.invoker.rate_limit_calls,
            config.invoker.rate_limit_window,
            config.invoker.rate_limit_max_wait,
        ));
        let invoker = LlmInvoker::new(gateway, limiter, &config.invoker);
        let context = Arc::new(ConversationContext::new(config.history));
        Self::new(invoker, context, system_prompt)
            .with_coercion_policy(config.coercion)
            .with_responses(config.responses.clone())
    }

    pub fn with_topic_guard(mut self, guard: TopicGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_coercion_policy(mut self, policy: CoercionPolicy) -> Self {
        self.coercer = ResponseCoercer::new(policy);
        self
    }

    pub fn with_responses(mut self, responses: FallbackResponses) -> Self {
        self.responses = responses;
        self
    }

    /// Create with an answer logger.
    pub fn with_answer_logger(mut self, logger: Arc<dyn AnswerLogger>) -> Self {
        self.answer_logger = logger;
        self
    }

    pub fn context(&self) -> &Arc<ConversationContext> {
        &self.context
    }

    /// Validate raw boundary input, then answer it.
    ///
    /// Input that fails validation gets the fallback answer; callers that
    /// want to reject it with an error should build the [`Question`] first.
    pub async fn answer_text(&self, text: &str, conversation_id: Option<&str>) -> Answer {
        let started = Instant::now();
        match Question::parse(text, conversation_id) {
            Ok(question) => self.answer(&question).await,
            Err(e) => {
                warn!("Rejected invalid question: {}", e);
                self.fallback(text, started, &e.to_string())
            }
        }
    }

    /// Answer a validated question. Never fails.
    pub async fn answer(&self, question: &Question) -> Answer {
        let started = Instant::now();
        let text = question.content();
        debug!("[{}] {}", PipelineStage::Received, preview(text, 100));

        let topic = self.guard.classify(text);
        if !topic.in_domain {
            info!("Out-of-domain question redirected: {}", preview(text, 100));
            return self.redirect(text, started);
        }
        debug!(
            "[{}] in domain (matched {:?})",
            PipelineStage::Gated,
            topic.matched
        );

        let history = match question.conversation_id() {
            Some(id) => self.context.recent(id, self.invoker.history_turns()),
            None => Vec::new(),
        };

        debug!("[{}] {} prior turns", PipelineStage::Invoking, history.len());
        let raw = match self
            .invoker
            .invoke(text, &self.system_prompt, &history)
            .await
        {
            Ok(raw) => raw,
            Err(e) => return self.fallback(text, started, &e.to_string()),
        };

        debug!("[{}] {} bytes", PipelineStage::Coercing, raw.len());
        let Some((answer_text, confidence, extraction)) = self.coercer.coerce(&raw).into_parts()
        else {
            return self.fallback(text, started, "model returned no usable content");
        };

        let answer = Answer::new(
            answer_text,
            confidence,
            started.elapsed(),
            AnswerOrigin::Model(extraction),
        );

        if let Some(id) = question.conversation_id() {
            self.context.append_exchange(
                id,
                ConversationTurn::user(text),
                ConversationTurn::assistant(answer.text()),
            );
        }

        info!(
            "[{}] confidence {} ({}, {:?}) in {} ms",
            PipelineStage::Finalized,
            answer.confidence(),
            answer.confidence_level(),
            extraction,
            answer.response_time_ms()
        );
        self.log_answer("answer", text, &answer, None);
        answer
    }

    fn redirect(&self, question: &str, started: Instant) -> Answer {
        let answer = Answer::new(
            self.responses.redirect_text.clone(),
            self.responses.redirect_confidence,
            started.elapsed(),
            AnswerOrigin::Redirect,
        );
        self.log_answer("redirect", question, &answer, None);
        answer
    }

    fn fallback(&self, question: &str, started: Instant, reason: &str) -> Answer {
        warn!("[{}] {}", PipelineStage::Fallback, reason);
        let answer = Answer::new(
            self.responses.fallback_text.clone(),
            self.responses.fallback_confidence,
            started.elapsed(),
            AnswerOrigin::Fallback,
        );
        self.log_answer("fallback", question, &answer, Some(reason));
        answer
    }

    fn log_answer(
        &self,
        event_type: &'static str,
        question: &str,
        answer: &Answer,
        reason: Option<&str>,
    ) {
        self.answer_logger.log(AnswerEvent::new(
            event_type,
            serde_json::json!({
                "question": question,
                "answer": answer.text(),
                "confidence": answer.confidence().value(),
                "confidence_level": answer.confidence_level().as_str(),
                "origin": answer.origin().as_str(),
                "response_time_ms": answer.response_time_ms(),
                "reason": reason,
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvokerParams;
    use crate::config::fallback_responses::{FALLBACK_TEXT, REDIRECT_TEXT};
    use crate::ports::llm_gateway::{CompletionRequest, GatewayError};
    use async_trait::async_trait;
    use sma_domain::{ConfidenceLevel, ConversationId, Extraction, Vocabulary};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct MockGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        calls: AtomicUsize,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockGateway {
        fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn replying(text: &str) -> Self {
            Self::new(vec![Ok(text.to_string())])
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(GatewayError::InvalidRequest("no more replies".to_string()))
                })
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(&'static str, serde_json::Value)>>,
    }

    impl AnswerLogger for RecordingLogger {
        fn log(&self, event: AnswerEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    fn pipeline(gateway: Arc<MockGateway>) -> AnswerPipeline {
        let params = InvokerParams::default()
            .with_backoff(Duration::from_millis(10), Duration::from_millis(20));
        let config = PipelineConfig {
            invoker: params,
            ..PipelineConfig::default()
        };
        AnswerPipeline::from_config(gateway, SystemPrompt::default(), &config)
    }

    fn question(text: &str, conversation: Option<&str>) -> Question {
        Question::parse(text, conversation).unwrap()
    }

    // ==================== Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_trusted_answer() {
        let gateway = Arc::new(MockGateway::replying(
            r#"{"answer":"It is a genetic disorder.","confidence":0.95}"#,
        ));
        let answer = pipeline(gateway.clone())
            .answer(&question("What is SMA?", None))
            .await;

        assert_eq!(answer.text(), "It is a genetic disorder.");
        assert_eq!(answer.confidence().value(), 0.95);
        assert_eq!(answer.confidence_level(), ConfidenceLevel::VeryHigh);
        assert_eq!(answer.origin(), AnswerOrigin::Model(Extraction::Trusted));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_domain_never_invokes_model() {
        let gateway = Arc::new(MockGateway::replying(r#"{"answer":"sunny","confidence":1.0}"#));
        let answer = pipeline(gateway.clone())
            .answer(&question("What's the weather?", Some("c1")))
            .await;

        assert_eq!(gateway.calls(), 0);
        assert_eq!(answer.confidence().value(), 0.0);
        assert_eq!(answer.text(), REDIRECT_TEXT);
        assert_eq!(answer.origin(), AnswerOrigin::Redirect);
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_failure_falls_back_without_history() {
        let gateway = Arc::new(MockGateway::new(vec![Err(GatewayError::QuotaExceeded(
            "daily quota".to_string(),
        ))]));
        let pipeline = pipeline(gateway.clone());
        let answer = pipeline
            .answer(&question("What is SMA?", Some("c1")))
            .await;

        assert_eq!(answer.confidence().value(), 0.0);
        assert_eq!(answer.text(), FALLBACK_TEXT);
        assert_eq!(answer.origin(), AnswerOrigin::Fallback);
        assert_eq!(gateway.calls(), 1);
        assert!(pipeline.context().get(&ConversationId::parse("c1").unwrap()).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_fall_back_without_history() {
        let gateway = Arc::new(MockGateway::new(vec![
            Err(GatewayError::Timeout),
            Err(GatewayError::Timeout),
            Err(GatewayError::Timeout),
        ]));
        let pipeline = pipeline(gateway.clone());
        let answer = pipeline
            .answer(&question("How is SMA treated?", Some("c1")))
            .await;

        assert_eq!(gateway.calls(), 3);
        assert_eq!(answer.confidence().value(), 0.0);
        assert_eq!(answer.text(), FALLBACK_TEXT);
        assert!(pipeline.context().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_reply_falls_back() {
        let gateway = Arc::new(MockGateway::replying("   \n"));
        let pipeline = pipeline(gateway.clone());
        let answer = pipeline
            .answer(&question("What is SMA?", Some("c1")))
            .await;

        assert_eq!(answer.text(), FALLBACK_TEXT);
        assert_eq!(answer.confidence().value(), 0.0);
        assert!(pipeline.context().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unstructured_reply_discounted() {
        let gateway = Arc::new(MockGateway::replying(
            "SMA is caused by loss of the SMN1 gene.",
        ));
        let answer = pipeline(gateway).answer(&question("What causes SMA?", None)).await;

        assert_eq!(answer.text(), "SMA is caused by loss of the SMN1 gene.");
        assert_eq!(answer.confidence().value(), 0.6);
        assert_eq!(answer.confidence_level(), ConfidenceLevel::Medium);
    }

    #[tokio::test(start_paused = true)]
    async fn test_suspect_reply_discounted() {
        let gateway = Arc::new(MockGateway::replying(r#"{"answer":"X","confidence":5}"#));
        let answer = pipeline(gateway).answer(&question("What is SMA?", None)).await;
        assert_eq!(answer.text(), "X");
        assert_eq!(answer.confidence().value(), 0.7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_appends_exchange_and_feeds_next_call() {
        let gateway = Arc::new(MockGateway::new(vec![
            Ok(r#"{"answer":"SMA is a genetic disorder.","confidence":0.9}"#.to_string()),
            Ok(r#"{"answer":"Nusinersen is one option.","confidence":0.85}"#.to_string()),
        ]));
        let pipeline = pipeline(gateway.clone());

        pipeline
            .answer(&question("What is SMA?", Some("chat-7")))
            .await;
        let id = ConversationId::parse("chat-7").unwrap();
        let turns = pipeline.context().get(&id);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text, "What is SMA?");
        assert_eq!(turns[1].text, "SMA is a genetic disorder.");

        pipeline
            .answer(&question("Which SMA treatment exists?", Some("chat-7")))
            .await;
        let requests = gateway.requests.lock().unwrap();
        assert!(requests[0].history.is_empty());
        let prior: Vec<&str> = requests[1].history.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(prior, ["What is SMA?", "SMA is a genetic disorder."]);
        assert_eq!(pipeline.context().get(&id).len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_recent_exchanges_reach_model() {
        let gateway = Arc::new(MockGateway::replying(r#"{"answer":"ok","confidence":0.9}"#));
        let config = PipelineConfig {
            invoker: InvokerParams::default().with_history_exchanges(1),
            ..PipelineConfig::default()
        };
        let pipeline =
            AnswerPipeline::from_config(gateway.clone(), SystemPrompt::default(), &config);
        let id = ConversationId::parse("long-chat").unwrap();
        for n in 1..=3 {
            pipeline.context().append_exchange(
                &id,
                ConversationTurn::user(format!("question {n} about SMA")),
                ConversationTurn::assistant(format!("answer {n}")),
            );
        }

        pipeline
            .answer(&question("And SMA type 3?", Some("long-chat")))
            .await;

        let requests = gateway.requests.lock().unwrap();
        let prior: Vec<&str> = requests[0].history.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(prior, ["question 3 about SMA", "answer 3"]);
        assert_eq!(pipeline.context().get(&id).len(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_topic_guard() {
        let gateway = Arc::new(MockGateway::replying(
            r#"{"answer":"ALS info","confidence":0.9}"#,
        ));
        let pipeline = pipeline(gateway.clone()).with_topic_guard(TopicGuard::with_vocabulary(
            Vocabulary::new(["als"], ["lou gehrig"], ["symptom"]),
        ));

        let redirected = pipeline.answer(&question("What is SMA?", None)).await;
        assert_eq!(redirected.origin(), AnswerOrigin::Redirect);
        assert_eq!(gateway.calls(), 0);

        let answered = pipeline.answer(&question("What is ALS?", None)).await;
        assert_eq!(answered.text(), "ALS info");
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_text_rejects_invalid_input_without_call() {
        let gateway = Arc::new(MockGateway::replying("unused"));
        let pipeline = pipeline(gateway.clone());

        let answer = pipeline.answer_text("   ", None).await;
        assert_eq!(answer.origin(), AnswerOrigin::Fallback);
        let answer = pipeline.answer_text("What is SMA?", Some("bad id")).await;
        assert_eq!(answer.origin(), AnswerOrigin::Fallback);
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_logged_for_every_path() {
        let gateway = Arc::new(MockGateway::new(vec![
            Ok(r#"{"answer":"ok","confidence":0.8}"#.to_string()),
            Err(GatewayError::InvalidRequest("bad".to_string())),
        ]));
        let logger = Arc::new(RecordingLogger::default());
        let pipeline = pipeline(gateway).with_answer_logger(logger.clone());

        pipeline.answer(&question("What is SMA?", None)).await;
        pipeline.answer(&question("Tell me a joke", None)).await;
        pipeline.answer(&question("Is SMA inherited?", None)).await;

        let events = logger.events.lock().unwrap();
        let kinds: Vec<&str> = events.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, ["answer", "redirect", "fallback"]);
        assert_eq!(events[0].1["origin"], "model_trusted");
        assert_eq!(events[0].1["confidence"], 0.8);
        assert!(events[2].1["reason"].as_str().unwrap().contains("bad"));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(PipelineStage::Received.to_string(), "received");
        assert_eq!(PipelineStage::Fallback.to_string(), "fallback");
    }
}
