//! Sidebar controls: explicit float loading and chart views that bypass the
//! classifier. None of these touch the transcript.

use ac_argo_data::FetchError;
use ac_protocol::{FloatId, Variable};

use crate::router::{DialogueRouter, NamedChart, join_key, subset};
use crate::session::Session;

/// Result of a sidebar add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added(FloatId),
    AlreadyLoaded(FloatId),
}

impl DialogueRouter {
    /// Load `float_id` into the session unless it is already there.
    pub async fn add_float(
        &self,
        session: &mut Session,
        float_id: FloatId,
    ) -> Result<AddOutcome, FetchError> {
        if session.is_loaded(float_id) {
            return Ok(AddOutcome::AlreadyLoaded(float_id));
        }
        let dataset = self.fetcher.fetch(float_id).await?;
        tracing::info!(session_id = %session.id(), float_id = %float_id, "float added from sidebar");
        session.insert_float(float_id, dataset);
        Ok(AddOutcome::Added(float_id))
    }

    /// Charts for a selection of loaded floats.
    ///
    /// One float gets its three profiles; several get comparison charts.
    /// Ids that are not loaded are skipped.
    pub fn view_selection(&self, session: &Session, float_ids: &[FloatId]) -> Vec<NamedChart> {
        let mut selected: Vec<FloatId> = Vec::with_capacity(float_ids.len());
        for id in float_ids {
            if session.is_loaded(*id) && !selected.contains(id) {
                selected.push(*id);
            }
        }

        match selected.as_slice() {
            [] => Vec::new(),
            [float_id] => {
                let Some(datasets) = subset(session, &[*float_id]) else {
                    return Vec::new();
                };
                Variable::ALL
                    .iter()
                    .map(|&variable| {
                        NamedChart::new(
                            format!("profile-{float_id}-{}", variable.code()),
                            self.renderer.render_profile(&datasets, variable),
                        )
                    })
                    .collect()
            }
            many => {
                let suffix = join_key(many);
                self.renderer
                    .render_comparison(session.floats(), many)
                    .into_iter()
                    .map(|(variable, chart)| {
                        NamedChart::new(
                            format!("sidebar-compare-{}-{suffix}", variable.code()),
                            chart,
                        )
                    })
                    .collect()
            }
        }
    }

    /// Latest positions of every loaded float, or None when nothing is loaded.
    pub fn positions_map(&self, session: &Session) -> Option<NamedChart> {
        if session.floats().is_empty() {
            return None;
        }
        Some(NamedChart::new(
            "map-latest",
            self.renderer.render_map(session.floats()),
        ))
    }
}
