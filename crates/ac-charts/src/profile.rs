//! Vertical profile charts.
//!
//! Temperature and salinity are plotted against pressure. Pressure itself is
//! plotted against sample index.

use ac_protocol::{Dataset, FloatId, Variable};

use crate::FloatSet;
use crate::figure::{Chart, ChartKind, Trace, TraceMode};

fn x_title(variable: Variable) -> &'static str {
    match variable {
        Variable::Temperature | Variable::Salinity => "Pressure (dbar)",
        Variable::Pressure => "Sample Index",
    }
}

/// Line trace of `variable` for one float. Samples missing either
/// coordinate are skipped.
pub fn profile_trace(dataset: &Dataset, variable: Variable) -> Trace {
    let mut trace = Trace::new(format!("Float {}", dataset.float_id()), TraceMode::Lines);
    let values = dataset.column(variable);
    match variable {
        Variable::Pressure => {
            for (i, v) in values.iter().enumerate() {
                if let Some(v) = v {
                    trace.push(i as f64, *v);
                }
            }
        }
        Variable::Temperature | Variable::Salinity => {
            let pressure = dataset.column(Variable::Pressure);
            for (p, v) in pressure.iter().zip(values) {
                if let (Some(p), Some(v)) = (p, v) {
                    trace.push(*p, *v);
                }
            }
        }
    }
    trace
}

fn chart(kind: ChartKind, title: String, variable: Variable, traces: Vec<Trace>) -> Chart {
    Chart {
        kind,
        title,
        x_title: Some(x_title(variable).into()),
        y_title: Some(variable.label().into()),
        traces,
        map_view: None,
    }
}

/// Profile of `variable` across the given datasets.
pub fn profile_chart<'a>(datasets: impl IntoIterator<Item = &'a Dataset>, variable: Variable) -> Chart {
    let traces = datasets
        .into_iter()
        .map(|ds| profile_trace(ds, variable))
        .collect();
    chart(
        ChartKind::Profile,
        format!("{} profile", variable.title()),
        variable,
        traces,
    )
}

/// Temperature, salinity and pressure charts over `ids`, in `ids` order.
/// Ids without a dataset are skipped.
pub fn comparison_charts(datasets: &FloatSet, ids: &[FloatId]) -> Vec<(Variable, Chart)> {
    Variable::ALL
        .into_iter()
        .map(|variable| {
            let traces = ids
                .iter()
                .filter_map(|id| {
                    let ds = datasets.get(id);
                    if ds.is_none() {
                        tracing::warn!(float_id = %id, "comparison requested for unloaded float");
                    }
                    ds
                })
                .map(|ds| profile_trace(ds, variable))
                .collect();
            let c = chart(
                ChartKind::Comparison,
                format!("{} comparison", variable.title()),
                variable,
                traces,
            );
            (variable, c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_protocol::Sample;
    use std::sync::Arc;

    fn ds(id: u32, rows: &[(Option<f64>, Option<f64>)]) -> Dataset {
        Dataset::from_samples(
            FloatId(id),
            rows.iter().map(|&(pres, temp)| Sample {
                pressure: pres,
                temperature: temp,
                salinity: temp.map(|t| t + 10.0),
                ..Sample::default()
            }),
        )
    }

    #[test]
    fn temperature_against_pressure() {
        let d = ds(2903893, &[(Some(5.0), Some(28.0)), (Some(100.0), Some(20.0))]);
        let c = profile_chart([&d], Variable::Temperature);
        assert_eq!(c.kind, ChartKind::Profile);
        assert_eq!(c.x_title.as_deref(), Some("Pressure (dbar)"));
        assert_eq!(c.y_title.as_deref(), Some("Temperature (°C)"));
        let t = c.trace("Float 2903893").unwrap();
        assert_eq!(t.x, vec![5.0, 100.0]);
        assert_eq!(t.y, vec![28.0, 20.0]);
    }

    #[test]
    fn pressure_against_sample_index() {
        let d = ds(1, &[(Some(5.0), None), (None, None), (Some(50.0), None)]);
        let c = profile_chart([&d], Variable::Pressure);
        assert_eq!(c.x_title.as_deref(), Some("Sample Index"));
        let t = &c.traces[0];
        assert_eq!(t.x, vec![0.0, 2.0]);
        assert_eq!(t.y, vec![5.0, 50.0]);
    }

    #[test]
    fn missing_values_skipped() {
        let d = ds(1, &[(Some(5.0), None), (None, Some(3.0)), (Some(9.0), Some(4.0))]);
        let t = profile_trace(&d, Variable::Salinity);
        assert_eq!(t.x, vec![9.0]);
        assert_eq!(t.y, vec![14.0]);
    }

    #[test]
    fn comparison_keeps_requested_order() {
        let mut set = FloatSet::new();
        set.insert(FloatId(1), Arc::new(ds(1, &[(Some(1.0), Some(1.0))])));
        set.insert(FloatId(2), Arc::new(ds(2, &[(Some(1.0), Some(2.0))])));

        let charts = comparison_charts(&set, &[FloatId(2), FloatId(1), FloatId(3)]);
        let vars: Vec<_> = charts.iter().map(|(v, _)| *v).collect();
        assert_eq!(vars, Variable::ALL.to_vec());
        for (_, c) in &charts {
            assert_eq!(c.kind, ChartKind::Comparison);
            let names: Vec<_> = c.traces.iter().map(|t| t.name.as_str()).collect();
            assert_eq!(names, vec!["Float 2", "Float 1"]);
        }
    }
}
