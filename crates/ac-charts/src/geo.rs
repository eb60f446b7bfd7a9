//! Map charts: full trajectories and latest positions.

use ac_protocol::Dataset;

use crate::figure::{Chart, ChartKind, MapView, Trace, TraceMode};

/// Zoom used when there is nothing to fit.
const WORLD_ZOOM: u8 = 2;

/// Wrap a longitude into [-180, 180) so tracks don't span the dateline.
pub fn normalize_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Zoom level for a single-float view covering `span` degrees.
pub fn zoom_for_span(span: f64) -> u8 {
    if span < 0.5 {
        6
    } else if span < 1.0 {
        5
    } else if span < 5.0 {
        4
    } else {
        3
    }
}

/// Bounding box of every point on the chart, or None if there are none.
fn bounds(traces: &[Trace]) -> Option<MapView> {
    let mut points = traces.iter().flat_map(|t| t.x.iter().zip(&t.y));
    let (&lon0, &lat0) = points.next()?;
    let (mut west, mut east, mut south, mut north) = (lon0, lon0, lat0, lat0);
    for (&lon, &lat) in points {
        west = west.min(lon);
        east = east.max(lon);
        south = south.min(lat);
        north = north.max(lat);
    }
    Some(MapView::Bounds {
        west,
        east,
        south,
        north,
    })
}

/// Tracks plus a red "latest" marker per float.
///
/// One float with data: centered on its latest fix, zoomed by track span.
/// Several: fit to all points. None: world view.
pub fn trajectory_chart<'a>(datasets: impl IntoIterator<Item = &'a Dataset>) -> Chart {
    let mut traces = Vec::new();
    let mut floats_with_data = 0usize;

    for ds in datasets {
        let mut track = Trace::new(format!("Track {}", ds.float_id()), TraceMode::LinesMarkers)
            .with_marker(6, None);
        for (lat, lon) in ds.positions() {
            track.push(normalize_longitude(lon), lat);
        }
        let (Some(&lon), Some(&lat)) = (track.x.last(), track.y.last()) else {
            continue;
        };
        let mut latest = Trace::new(format!("Latest {}", ds.float_id()), TraceMode::Markers)
            .with_marker(12, Some("red"));
        latest.push(lon, lat);
        traces.push(track);
        traces.push(latest);
        floats_with_data += 1;
    }

    let map_view = match bounds(&traces) {
        Some(MapView::Bounds {
            west,
            east,
            south,
            north,
        }) if floats_with_data == 1 => {
            let span = (north - south).max(1e-6).max((east - west).max(1e-6));
            let latest = &traces[traces.len() - 1];
            MapView::Centered {
                lat: latest.y[0],
                lon: latest.x[0],
                zoom: zoom_for_span(span),
            }
        }
        Some(view) => view,
        None => MapView::World { zoom: WORLD_ZOOM },
    };

    Chart {
        kind: ChartKind::Trajectory,
        title: "Float trajectories".into(),
        x_title: None,
        y_title: None,
        traces,
        map_view: Some(map_view),
    }
}

/// Latest position of each float, fitted to the known positions.
pub fn positions_chart<'a>(datasets: impl IntoIterator<Item = &'a Dataset>) -> Chart {
    let traces: Vec<Trace> = datasets
        .into_iter()
        .map(|ds| {
            let mut t = Trace::new(format!("Float {}", ds.float_id()), TraceMode::Markers)
                .with_marker(10, None);
            if let (Some(lat), Some(lon)) = (ds.latest_latitude(), ds.latest_longitude()) {
                t.push(lon, lat);
            }
            t
        })
        .collect();

    let map_view = bounds(&traces).unwrap_or(MapView::World { zoom: WORLD_ZOOM });
    Chart {
        kind: ChartKind::PositionsMap,
        title: "Latest float positions".into(),
        x_title: None,
        y_title: None,
        traces,
        map_view: Some(map_view),
    }
}
