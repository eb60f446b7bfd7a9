//! Dialogue router — turns one utterance into a reply and charts.
//!
//! Each turn runs in four steps:
//! 1. interpret the text (intent + float ids), unless a float number is pending
//! 2. plan an [`Action`] from the intent, ids and session (no side effects)
//! 3. make sure every float the action needs is loaded (fetch, then commit)
//! 4. render charts and compose the reply
//!
//! Errors from any step become the reply for that turn.

use std::sync::Arc;

use serde::Serialize;

use ac_argo_data::DatasetFetcher;
use ac_charts::{Chart, ChartRenderer, FloatSet};
use ac_nlp::{IntentEngine, Interpretation};
use ac_protocol::{ChatMessage, FloatId, Intent, Variable};

use crate::error::{TurnError, TurnResult};
use crate::replies;
use crate::session::{DialogueState, Session};

/// What a turn should do once its data is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Answer with text only.
    Reply(String),
    /// Ask for a float number and wait for it.
    AskFloatId,
    Profile { float_id: FloatId, variable: Variable },
    Trajectory { float_id: FloatId },
    Info { float_id: FloatId },
    Compare { float_ids: Vec<FloatId> },
}

impl Action {
    /// Floats that must be loaded before rendering, in first-use order.
    pub fn required_floats(&self) -> Vec<FloatId> {
        match self {
            Self::Profile { float_id, .. }
            | Self::Trajectory { float_id }
            | Self::Info { float_id } => vec![*float_id],
            Self::Compare { float_ids } => {
                let mut ids = Vec::with_capacity(float_ids.len());
                for id in float_ids {
                    if !ids.contains(id) {
                        ids.push(*id);
                    }
                }
                ids
            }
            Self::Reply(_) | Self::AskFloatId => Vec::new(),
        }
    }
}

/// A chart with a stable key (used as the output file name).
#[derive(Debug, Clone, Serialize)]
pub struct NamedChart {
    pub key: String,
    pub chart: Chart,
}

impl NamedChart {
    pub fn new(key: impl Into<String>, chart: Chart) -> Self {
        Self {
            key: key.into(),
            chart,
        }
    }
}

/// Result of one turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply: String,
    pub charts: Vec<NamedChart>,
    /// None when the input was consumed as a pending float number.
    pub interpretation: Option<Interpretation>,
}

impl TurnOutcome {
    fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            charts: Vec::new(),
            interpretation: None,
        }
    }
}

/// Target float for single-float intents: first id in the text, else the
/// only loaded float.
pub fn resolve_target(float_ids: &[FloatId], session: &Session) -> Option<FloatId> {
    float_ids.first().copied().or_else(|| session.sole_float())
}

/// Decide what to do for `intent`. Pure: reads the session, never mutates it.
pub fn plan(intent: Intent, float_ids: &[FloatId], session: &Session) -> TurnResult<Action> {
    if let Some(text) = replies::fixed(intent) {
        return Ok(Action::Reply(text.to_string()));
    }

    match intent {
        Intent::ListFloats => Ok(Action::Reply(replies::loaded_floats(&session.loaded_ids()))),
        Intent::AskFloat => Ok(Action::AskFloatId),
        Intent::CompareFloats => {
            let float_ids = if float_ids.len() >= 2 {
                float_ids.to_vec()
            } else {
                session.loaded_ids()
            };
            if float_ids.len() < 2 {
                return Ok(Action::Reply(replies::COMPARE_NEEDS_TWO.to_string()));
            }
            Ok(Action::Compare { float_ids })
        }
        Intent::Temperature
        | Intent::Salinity
        | Intent::Pressure
        | Intent::Trajectory
        | Intent::FloatInfo => {
            let float_id =
                resolve_target(float_ids, session).ok_or(TurnError::AmbiguousTarget(intent))?;
            Ok(match intent.variable() {
                Some(variable) => Action::Profile { float_id, variable },
                None if intent == Intent::Trajectory => Action::Trajectory { float_id },
                None => Action::Info { float_id },
            })
        }
        // Fixed-reply intents returned above.
        _ => Ok(Action::Reply(replies::UNKNOWN.to_string())),
    }
}

/// Routes turns for any number of sessions; holds no per-session state.
pub struct DialogueRouter {
    engine: Box<dyn IntentEngine>,
    pub(crate) fetcher: Arc<dyn DatasetFetcher>,
    pub(crate) renderer: Arc<dyn ChartRenderer>,
}

impl DialogueRouter {
    pub fn new(
        engine: Box<dyn IntentEngine>,
        fetcher: Arc<dyn DatasetFetcher>,
        renderer: Arc<dyn ChartRenderer>,
    ) -> Self {
        Self {
            engine,
            fetcher,
            renderer,
        }
    }

    /// Router with the standard rule engine and figure renderer.
    pub fn with_fetcher(fetcher: Arc<dyn DatasetFetcher>) -> Self {
        Self::new(
            Box::new(ac_nlp::default_engine()),
            fetcher,
            Arc::new(ac_charts::FigureRenderer),
        )
    }

    /// Interpret `text` without touching any session.
    pub fn interpret(&self, text: &str) -> Interpretation {
        ac_nlp::interpret(self.engine.as_ref(), text)
    }

    /// Process one user utterance against `session`.
    ///
    /// Never fails: every error becomes the reply. Both the utterance and the
    /// reply are appended to the transcript.
    pub async fn handle_turn(&self, session: &mut Session, text: &str) -> TurnOutcome {
        session.record(ChatMessage::user(text));

        let outcome = match session.state() {
            DialogueState::AwaitingIdentifier => self.handle_pending_float(session, text).await,
            DialogueState::Idle => {
                let interpretation = self.interpret(text);
                let mut outcome = self.handle_intent(session, &interpretation).await;
                outcome.interpretation = Some(interpretation);
                outcome
            }
        };

        session.record(ChatMessage::assistant(outcome.reply.as_str()));
        outcome
    }

    /// The user was asked for a float number; `text` should be exactly that.
    async fn handle_pending_float(&self, session: &mut Session, text: &str) -> TurnOutcome {
        let result = async {
            let float_id: FloatId = text
                .parse()
                .map_err(|_| TurnError::Parse(text.to_string()))?;
            self.ensure_loaded(session, &[float_id]).await?;
            Ok::<_, TurnError>(float_id)
        }
        .await;

        match result {
            Ok(float_id) => {
                session.set_state(DialogueState::Idle);
                TurnOutcome::text(replies::float_loaded(float_id))
            }
            Err(err) => {
                tracing::info!(session_id = %session.id(), error = %err, "still awaiting float number");
                TurnOutcome::text(replies::for_error(&err))
            }
        }
    }

    async fn handle_intent(&self, session: &mut Session, interp: &Interpretation) -> TurnOutcome {
        let result = async {
            let action = plan(interp.intent, &interp.float_ids, session)?;
            self.ensure_loaded(session, &action.required_floats()).await?;
            Ok::<_, TurnError>(action)
        }
        .await;

        match result {
            Ok(action) => {
                tracing::info!(
                    session_id = %session.id(),
                    intent = %interp.intent,
                    ids = ?interp.float_ids,
                    ?action,
                    "turn planned"
                );
                self.execute(session, action)
            }
            Err(err) => {
                tracing::info!(
                    session_id = %session.id(),
                    intent = %interp.intent,
                    error = %err,
                    "turn recovered from error"
                );
                TurnOutcome::text(replies::for_error(&err))
            }
        }
    }

    /// Fetch every id that is not loaded yet. Nothing is stored unless all
    /// fetches succeed.
    pub(crate) async fn ensure_loaded(
        &self,
        session: &mut Session,
        float_ids: &[FloatId],
    ) -> TurnResult<()> {
        let mut fetched = Vec::new();
        for &float_id in float_ids {
            if session.is_loaded(float_id) {
                continue;
            }
            match self.fetcher.fetch(float_id).await {
                Ok(dataset) => fetched.push((float_id, dataset)),
                Err(source) => {
                    tracing::warn!(
                        session_id = %session.id(),
                        float_id = %float_id,
                        error = %source,
                        "float fetch failed"
                    );
                    return Err(TurnError::Fetch { float_id, source });
                }
            }
        }

        for (float_id, dataset) in fetched {
            tracing::info!(session_id = %session.id(), float_id = %float_id, "float loaded");
            session.insert_float(float_id, dataset);
        }
        Ok(())
    }

    /// Render and compose the reply. All required floats are loaded.
    fn execute(&self, session: &mut Session, action: Action) -> TurnOutcome {
        match action {
            Action::Reply(text) => TurnOutcome::text(text),
            Action::AskFloatId => {
                session.set_state(DialogueState::AwaitingIdentifier);
                TurnOutcome::text(replies::ASK_FLOAT)
            }
            Action::Profile { float_id, variable } => {
                let Some(subset) = subset(session, &[float_id]) else {
                    return TurnOutcome::text(replies::fetch_failed(float_id));
                };
                let chart = self.renderer.render_profile(&subset, variable);
                TurnOutcome {
                    reply: replies::profile_displayed(variable, float_id),
                    charts: vec![NamedChart::new(
                        format!("profile-{float_id}-{}", variable.code()),
                        chart,
                    )],
                    interpretation: None,
                }
            }
            Action::Trajectory { float_id } => {
                let Some(subset) = subset(session, &[float_id]) else {
                    return TurnOutcome::text(replies::fetch_failed(float_id));
                };
                let chart = self.renderer.render_trajectory(&subset);
                TurnOutcome {
                    reply: replies::trajectory_displayed(float_id),
                    charts: vec![NamedChart::new(format!("traj-{float_id}"), chart)],
                    interpretation: None,
                }
            }
            Action::Info { float_id } => match session.dataset(float_id) {
                Some(dataset) => TurnOutcome::text(replies::float_info(float_id, dataset)),
                None => TurnOutcome::text(replies::fetch_failed(float_id)),
            },
            Action::Compare { float_ids } => {
                let suffix = join_key(&float_ids);
                let charts = self
                    .renderer
                    .render_comparison(session.floats(), &float_ids)
                    .into_iter()
                    .map(|(variable, chart)| {
                        NamedChart::new(format!("compare-{}-{suffix}", variable.code()), chart)
                    })
                    .collect();
                TurnOutcome {
                    reply: replies::comparing(&float_ids),
                    charts,
                    interpretation: None,
                }
            }
        }
    }
}

/// Datasets for `ids` only, or None if any is missing.
pub(crate) fn subset(session: &Session, ids: &[FloatId]) -> Option<FloatSet> {
    ids.iter()
        .map(|id| session.dataset(*id).map(|ds| (*id, ds.clone())))
        .collect()
}

pub(crate) fn join_key(ids: &[FloatId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("-")
}
