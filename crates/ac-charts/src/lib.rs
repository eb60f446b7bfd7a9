//! Chart rendering for ArgoChat.
//!
//! Charts are plain serializable figure descriptions ([`Chart`]); turning
//! them into pixels is left to whatever consumes the JSON.

pub mod figure;
pub mod geo;
pub mod profile;

use std::collections::BTreeMap;
use std::sync::Arc;

use ac_protocol::{Dataset, FloatId, Variable};

pub use figure::{Chart, ChartKind, MapView, Marker, Trace, TraceMode};

/// Datasets keyed by float id, iterated in id order.
pub type FloatSet = BTreeMap<FloatId, Arc<Dataset>>;

/// Trait for chart backends.
pub trait ChartRenderer: Send + Sync {
    /// One variable's profile, one trace per float.
    fn render_profile(&self, datasets: &FloatSet, variable: Variable) -> Chart;

    /// One chart per variable comparing `ids` (in the given order).
    fn render_comparison(&self, datasets: &FloatSet, ids: &[FloatId]) -> Vec<(Variable, Chart)>;

    /// Full tracks with the latest fix highlighted.
    fn render_trajectory(&self, datasets: &FloatSet) -> Chart;

    /// Latest position of every float.
    fn render_map(&self, datasets: &FloatSet) -> Chart;
}

/// Default renderer producing [`Chart`] figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct FigureRenderer;

impl ChartRenderer for FigureRenderer {
    fn render_profile(&self, datasets: &FloatSet, variable: Variable) -> Chart {
        profile::profile_chart(datasets.values().map(Arc::as_ref), variable)
    }

    fn render_comparison(&self, datasets: &FloatSet, ids: &[FloatId]) -> Vec<(Variable, Chart)> {
        profile::comparison_charts(datasets, ids)
    }

    fn render_trajectory(&self, datasets: &FloatSet) -> Chart {
        geo::trajectory_chart(datasets.values().map(Arc::as_ref))
    }

    fn render_map(&self, datasets: &FloatSet) -> Chart {
        geo::positions_chart(datasets.values().map(Arc::as_ref))
    }
}
