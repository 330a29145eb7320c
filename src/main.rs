//! Sketchbook entry point
//!
//! Headless runner: steps every sketch against its own mesh canvas and
//! prints a JSON summary.
//!
//! Usage: `sketchbook [settings.json] [ticks]`

use serde::Serialize;

use sketchbook::renderer::MeshCanvas;
use sketchbook::sim::TickReport;
use sketchbook::{Settings, SketchKind};

const DEFAULT_TICKS: u64 = 600;

#[derive(Debug, Serialize)]
struct RunSummary {
    sketch: &'static str,
    ticks: u64,
    population: usize,
    spawned: usize,
    evicted: usize,
    peak_population: usize,
    last_frame_vertices: usize,
}

fn run(kind: SketchKind, settings: &Settings, ticks: u64) -> RunSummary {
    let mut sim = kind.build(settings);
    let mut canvas = MeshCanvas::new(settings.canvas);
    let mut totals = TickReport::default();
    let mut peak = sim.population();

    for _ in 0..ticks {
        canvas.begin_frame();
        let report = sim.tick(&mut canvas);
        totals.spawned += report.spawned;
        totals.evicted += report.evicted;
        peak = peak.max(report.population);
    }

    log::info!(
        "{}: {} ticks, {} live, {} vertices in last frame",
        kind.as_str(),
        sim.ticks(),
        sim.population(),
        canvas.vertices().len()
    );

    RunSummary {
        sketch: kind.as_str(),
        ticks: sim.ticks(),
        population: sim.population(),
        spawned: totals.spawned,
        evicted: totals.evicted,
        peak_population: peak,
        last_frame_vertices: canvas.vertices().len(),
    }
}

/// Keep the summaries of sketches that finished, logging any that panicked
fn collect_finished<T>(
    results: impl IntoIterator<Item = (SketchKind, std::thread::Result<T>)>,
) -> Vec<T> {
    results
        .into_iter()
        .filter_map(|(kind, result)| match result {
            Ok(summary) => Some(summary),
            Err(_) => {
                log::error!("Sketch {} panicked; dropping its summary", kind.as_str());
                None
            }
        })
        .collect()
}

fn main() {
    env_logger::init();
    log::info!("Sketchbook (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::warn!("{}; using default settings", e);
            Settings::default()
        }),
        None => Settings::default(),
    };
    let ticks = args
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    // Sketches share nothing, so each gets its own thread and canvas
    let summaries: Vec<RunSummary> = std::thread::scope(|scope| {
        let handles: Vec<_> = SketchKind::ALL
            .into_iter()
            .map(|kind| {
                let settings = &settings;
                scope.spawn(move || run(kind, settings, ticks))
            })
            .collect();
        collect_finished(
            handles
                .into_iter()
                .zip(SketchKind::ALL)
                .map(|(h, kind)| (kind, h.join())),
        )
    });

    match serde_json::to_string_pretty(&summaries) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode summary: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panicked_sketch_is_skipped() {
        let results: Vec<(SketchKind, std::thread::Result<u32>)> = vec![
            (SketchKind::ALL[0], Ok(1)),
            (SketchKind::ALL[1], Err(Box::new("boom") as Box<dyn std::any::Any + Send>)),
            (SketchKind::ALL[2], Ok(3)),
        ];
        assert_eq!(collect_finished(results), vec![1, 3]);
    }
}
