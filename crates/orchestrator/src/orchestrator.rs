//! Main orchestrator that turns inbound messages into replies.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use gemini_brain::GeminiBrain;
use mapbox_tools::MapboxClient;
use relay_core::{
    hash_prompt, with_deadline, ConversationState, ConversationTurn, GenerationOptions,
    InboundMessage, MappingProvider, OutboundReply, ProviderError, RouteProfile, TextGenerator,
};
use tracing::{debug, error, info, trace, warn};

use crate::error::OrchestratorError;
use crate::formatting::format_duration_reply;
use crate::intent::{Intent, IntentRules};
use crate::prompt::{build_general_prompt, load_system_prompt, DEFAULT_SYSTEM_PROMPT, FALLBACK_REPLY};
use crate::resolver::{RouteResolver, DEFAULT_CALL_TIMEOUT};

/// Tunables for turn handling.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    /// Number of recent turns included in general prompts.
    pub transcript_turns: usize,
    /// Bound on each external call.
    pub call_timeout: Duration,
    /// Travel profile for directions.
    pub profile: RouteProfile,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            transcript_turns: relay_core::DEFAULT_TRANSCRIPT_TURNS,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            profile: RouteProfile::Driving,
        }
    }
}

impl OrchestratorConfig {
    /// Create from environment variables.
    ///
    /// Environment variables:
    /// - `WAYPOINT_TRANSCRIPT_TURNS` - Transcript window (default: 10)
    /// - `WAYPOINT_CALL_TIMEOUT_SECS` - Per-call bound in seconds (default: 30)
    /// - `WAYPOINT_ROUTE_PROFILE` - `driving`, `driving-traffic`, `walking`, or `cycling`
    pub fn from_env() -> Result<Self, OrchestratorError> {
        let defaults = Self::default();

        let transcript_turns = match env::var("WAYPOINT_TRANSCRIPT_TURNS") {
            Ok(value) => parse_positive("WAYPOINT_TRANSCRIPT_TURNS", &value)?,
            Err(_) => defaults.transcript_turns,
        };

        let call_timeout = match env::var("WAYPOINT_CALL_TIMEOUT_SECS") {
            Ok(value) => Duration::from_secs(parse_positive("WAYPOINT_CALL_TIMEOUT_SECS", &value)?),
            Err(_) => defaults.call_timeout,
        };

        let profile = match env::var("WAYPOINT_ROUTE_PROFILE") {
            Ok(value) => value
                .parse()
                .map_err(|reason| OrchestratorError::InvalidConfig {
                    name: "WAYPOINT_ROUTE_PROFILE".to_string(),
                    reason,
                })?,
            Err(_) => defaults.profile,
        };

        Ok(Self {
            transcript_turns,
            call_timeout,
            profile,
        })
    }
}

fn parse_positive<T>(name: &str, value: &str) -> Result<T, OrchestratorError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(OrchestratorError::InvalidConfig {
            name: name.to_string(),
            reason: format!("expected a positive integer, got {:?}", value),
        }),
    }
}

/// Turn orchestrator.
///
/// For each inbound message the orchestrator:
/// - Records the user turn
/// - Classifies the intent against the current state
/// - Resolves a route, answers from the cached route, or asks the model
/// - Records the assistant turn and returns the reply
///
/// Every failure becomes reply text; nothing propagates to the transport.
pub struct Orchestrator {
    rules: IntentRules,
    resolver: RouteResolver,
    generator: Arc<dyn TextGenerator>,
    state: Arc<ConversationState>,
    preamble: String,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create an orchestrator with default rules, preamble and config.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        mapping: Arc<dyn MappingProvider>,
        state: Arc<ConversationState>,
    ) -> Self {
        let config = OrchestratorConfig::default();
        let resolver = RouteResolver::new(generator.clone(), mapping)
            .with_profile(config.profile)
            .with_call_timeout(config.call_timeout);

        Self {
            rules: IntentRules::default(),
            resolver,
            generator,
            state,
            preamble: DEFAULT_SYSTEM_PROMPT.to_string(),
            config,
        }
    }

    /// Create an orchestrator from environment variables.
    ///
    /// The generation credential is required here; the mapping credential
    /// is only checked when the first route is resolved.
    pub fn from_env(state: Arc<ConversationState>) -> Result<Self, OrchestratorError> {
        let generator = GeminiBrain::from_env()?;
        let mapping = MapboxClient::from_env().map_err(ProviderError::from)?;
        let config = OrchestratorConfig::from_env()?;

        let preamble = load_system_prompt();
        info!(
            "System prompt loaded (hash: {}, {} chars)",
            hash_prompt(&preamble, false),
            preamble.len()
        );

        let orchestrator = Self::new(Arc::new(generator), Arc::new(mapping), state)
            .with_rules(IntentRules::from_env())
            .with_preamble(preamble)
            .with_config(config);

        info!(
            "Orchestrator ready (keywords: {:?}, transcript: {} turns, timeout: {:?}, profile: {})",
            orchestrator.rules.travel_keywords(),
            orchestrator.config.transcript_turns,
            orchestrator.config.call_timeout,
            orchestrator.config.profile
        );

        Ok(orchestrator)
    }

    /// Replace the intent rules.
    pub fn with_rules(mut self, rules: IntentRules) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the system preamble used for general turns.
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    /// Replace the config, applying the call bound and profile to route resolution.
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.resolver = self
            .resolver
            .with_profile(config.profile)
            .with_call_timeout(config.call_timeout);
        self.config = config;
        self
    }

    /// Shared conversation state.
    pub fn state(&self) -> &Arc<ConversationState> {
        &self.state
    }

    /// Mapping provider used for route resolution.
    pub fn mapping(&self) -> &Arc<dyn MappingProvider> {
        self.resolver.mapping()
    }

    /// Current config.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Handle one turn on its own task.
    ///
    /// The turn keeps running if the caller goes away. A panic inside the
    /// turn is turned into an error reply, which is also recorded.
    pub async fn spawn_turn(self: Arc<Self>, inbound: InboundMessage) -> OutboundReply {
        let state = self.state.clone();
        let handle = tokio::spawn(async move { self.handle_turn(inbound).await });

        match handle.await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Turn task failed: {}", e);
                let text = format!("Sorry, I encountered an error: {}", e);
                state.append_turn(ConversationTurn::assistant(&text)).await;
                OutboundReply::assistant(text)
            }
        }
    }

    /// Handle one turn.
    pub async fn handle_turn(&self, inbound: InboundMessage) -> OutboundReply {
        let text = inbound.text;
        self.state.append_turn(ConversationTurn::user(&text)).await;

        let has_last_route = self.state.has_last_route().await;
        let intent = self.rules.classify(&text, has_last_route);
        info!(intent = ?intent, chars = text.len(), "Handling turn");

        let reply = match intent {
            Intent::RouteRequest => self.handle_route_request(&text).await,
            Intent::DurationFollowup => self.handle_duration_followup(&text).await,
            Intent::General => self.handle_general(&text).await,
        };

        self.state
            .append_turn(ConversationTurn::assistant(&reply))
            .await;

        OutboundReply::assistant(reply)
    }

    async fn handle_route_request(&self, text: &str) -> String {
        match self.resolver.resolve(text).await {
            Ok(resolved) => {
                info!("Route resolved: {}", resolved.summary.hint());
                self.state
                    .set_last_route(resolved.summary, resolved.raw_directions)
                    .await;
                resolved.reply
            }
            Err(e) => {
                warn!("Route resolution failed: {}", e);
                e.to_string()
            }
        }
    }

    async fn handle_duration_followup(&self, text: &str) -> String {
        match self.state.last_route().await {
            Some(route) => {
                debug!("Answering follow-up from last route");
                format_duration_reply(&route)
            }
            None => self.handle_general(text).await,
        }
    }

    async fn handle_general(&self, text: &str) -> String {
        let transcript = self
            .state
            .recent_transcript(self.config.transcript_turns)
            .await;
        let last_route = self.state.last_route().await;
        let prompt = build_general_prompt(&self.preamble, &transcript, last_route.as_ref(), text);
        trace!("General prompt: {}", prompt);

        let result = with_deadline(
            self.generator.name(),
            self.config.call_timeout,
            self.generator
                .generate(&prompt, &GenerationOptions::conversational()),
        )
        .await;

        match result {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => {
                warn!("{} returned an empty reply", self.generator.name());
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                warn!("Generation failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
