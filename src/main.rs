//! sopgraph - builds the starting scene and reports what it cooks to

use log::{error, info, warn};
use serde::Serialize;
use sopgraph::{Session, Settings};

/// Printable digest of a cooked geometry
#[derive(Debug, Serialize)]
struct GeometrySummary {
    node: Option<usize>,
    points: usize,
    triangles: usize,
    bounds: Option<([f32; 3], [f32; 3])>,
}

fn main() {
    let (settings, load_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::default(), Some(err)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_filter.as_str()),
    )
    .init();

    if let Some(err) = load_error {
        warn!("{}; using default settings", err);
    }

    let mut session = Session::new(settings);
    if let Err(err) = session.build_default_graph() {
        error!("Failed to build the default graph: {}", err);
        std::process::exit(1);
    }

    for id in session.graph().all_node_ids() {
        if let Some(node) = session.graph().get(id) {
            info!("Node {} '{}' ({})", id, node.name(), node.type_tag());
        }
    }
    for connection in session.graph().connections() {
        info!(
            "Wire {} -> {}[{}]",
            connection.source, connection.destination, connection.slot
        );
    }

    let geometry = session.display_geometry();
    let summary = GeometrySummary {
        node: session.display(),
        points: geometry.point_count(),
        triangles: geometry.triangle_count(),
        bounds: geometry
            .bounds()
            .map(|(min, max)| (min.to_array(), max.to_array())),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => info!("Display geometry:\n{}", json),
        Err(err) => warn!("Failed to serialize geometry summary: {}", err),
    }

    let stats = session.cooker().statistics();
    info!(
        "Cache: {} entries, {} cooks, {} hits, {} misses",
        stats.total_entries, stats.cooks, stats.cache_hits, stats.cache_misses
    );
}
