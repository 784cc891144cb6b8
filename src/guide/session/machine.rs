//! Session state machine driving the guided flow.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::guide::conversation::turn::Turn;
use crate::guide::core::errors::{AssistantError, AssistantResult};
use crate::guide::corpus::index::CorpusIndex;
use crate::guide::engine::context::AssistantContext;
use crate::guide::generation::content::ContentGenerator;
use crate::guide::generation::synthesizer::{Answer, AnswerSynthesizer};
use crate::guide::session::event::SessionEvent;
use crate::guide::session::snapshot::{SOS_MESSAGE, SessionSnapshot, render_snapshot};
use crate::guide::session::state::{SessionState, Stage};

/// What a dispatched event produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// The session is now in this stage.
    Moved(Stage),
    /// A chat message was answered.
    Answered(Answer),
    /// A message to display without changing stage.
    Alert(&'static str),
}

/// Applies events to a [`SessionState`] and runs the generation they require.
pub struct SessionMachine {
    index: Arc<CorpusIndex>,
    synthesizer: AnswerSynthesizer,
    content: ContentGenerator,
}

impl SessionMachine {
    /// Build a machine over the shared services of `context`.
    #[must_use]
    pub fn new(context: &AssistantContext) -> Self {
        Self {
            index: context.index(),
            synthesizer: AnswerSynthesizer::new(
                context.embedder(),
                context.generator(),
                context.config().retrieval.top_k,
                context.config().prompt.max_chars,
            ),
            content: ContentGenerator::new(context.generator()),
        }
    }

    /// Apply one event to `state`.
    ///
    /// Navigation is atomic: a rejected event leaves `state` untouched. A
    /// failed chat turn keeps the user's message in the transcript and
    /// changes nothing else.
    ///
    /// # Errors
    /// Returns `InvalidTransition` for events the current stage does not
    /// accept, or the provider error of a failed chat turn.
    pub async fn dispatch(
        &self,
        state: &mut SessionState,
        event: SessionEvent,
    ) -> AssistantResult<DispatchOutcome> {
        debug!("Dispatching {} in stage {}", event.name(), state.stage);
        match event {
            SessionEvent::SubmitMessage(text) => self.submit(state, text).await,
            SessionEvent::Sos => sos(state),
            navigation => {
                let next = transition(state, &navigation)?;
                info!("Session moved {} -> {}", state.stage, next.stage);
                *state = next;
                Ok(DispatchOutcome::Moved(state.stage))
            }
        }
    }

    /// Produce the snapshot for `state`, generating program content on the
    /// first render after confirmation.
    ///
    /// # Errors
    /// Returns the content generation error; the next render retries.
    pub async fn render(&self, state: &mut SessionState) -> AssistantResult<SessionSnapshot> {
        if state.stage == Stage::ProgramDelivery && state.content.is_none() {
            let category = state.category.ok_or_else(|| {
                AssistantError::InvalidCategory("no category selected".to_string())
            })?;
            let content = self.content.generate(category, &state.topic).await?;
            state.content = Some(content);
        }
        Ok(render_snapshot(state))
    }

    async fn submit(
        &self,
        state: &mut SessionState,
        text: String,
    ) -> AssistantResult<DispatchOutcome> {
        if !state.stage.is_conversational() || text.trim().is_empty() {
            return Err(invalid(state.stage, "submit_message"));
        }

        let user_turn = Turn::user(text);
        let result = self
            .synthesizer
            .answer(&user_turn.text, &state.transcript, &self.index)
            .await;
        state.transcript.append(user_turn);

        match result {
            Ok(answer) => {
                state
                    .transcript
                    .append(Turn::assistant(answer.text.clone(), answer.sources.clone()));
                Ok(DispatchOutcome::Answered(answer))
            }
            Err(err) => {
                warn!("Chat turn failed: {err}");
                Err(err)
            }
        }
    }
}

/// Pure navigation step: the state after `event`, or why it is rejected.
///
/// # Errors
/// Returns `InvalidTransition` when `event` is not accepted in the current stage.
pub fn transition(state: &SessionState, event: &SessionEvent) -> AssistantResult<SessionState> {
    let mut next = state.clone();
    match (state.stage, event) {
        (_, SessionEvent::ReturnToMenu) => next.reset(),
        (Stage::InitialSelection, SessionEvent::SelectCategory(category)) => {
            next.category = Some(*category);
            if category.is_guided() {
                next.stage = Stage::TopicSelection;
            } else {
                next.stage = Stage::Chat;
                next.topic.clear();
            }
        }
        (Stage::TopicSelection, SessionEvent::SelectTopic(topic)) if !topic.trim().is_empty() => {
            next.topic = topic.trim().to_string();
            next.stage = Stage::Confirmation;
        }
        (Stage::TopicSelection, SessionEvent::GoBack) => {
            next.category = None;
            next.topic.clear();
            next.stage = Stage::InitialSelection;
        }
        (Stage::Confirmation, SessionEvent::Confirm) => {
            next.content = None;
            next.stage = Stage::ProgramDelivery;
        }
        (Stage::Confirmation, SessionEvent::GoBack) => {
            next.stage = Stage::TopicSelection;
        }
        (stage, other) => return Err(invalid(stage, other.name())),
    }
    Ok(next)
}

fn sos(state: &SessionState) -> AssistantResult<DispatchOutcome> {
    if state.sos_available() {
        info!("SOS requested");
        Ok(DispatchOutcome::Alert(SOS_MESSAGE))
    } else {
        Err(invalid(state.stage, "sos"))
    }
}

const fn invalid(stage: Stage, event: &'static str) -> AssistantError {
    AssistantError::InvalidTransition { stage, event }
}
