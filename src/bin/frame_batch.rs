use map_frame::config::{load_config, BatchConfig, SheetConfig};
use map_frame::io::write_json_file;
use map_frame::{
    BatchReport, FrameError, FrameResolver, Georeferencer, GroundControlPoint, Quadrilateral,
};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let resolver = FrameResolver::new(config.params.clone());

    // Sheets are independent; the resolver holds no per-image state.
    let outcomes: Vec<SheetOutcome> = config
        .sheets
        .par_iter()
        .map(|sheet| process_sheet(&resolver, &config, sheet))
        .collect();

    let mut report = BatchReport::default();
    for outcome in &outcomes {
        report.record(outcome.name.clone(), &outcome.status);
        if let (Some(dir), Some(gcps)) = (&config.output.gcp_dir, &outcome.gcps) {
            let stem = Path::new(&outcome.name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| outcome.name.clone());
            write_json_file(&dir.join(format!("{stem}_gcp.json")), gcps)?;
        }
    }

    print_text_summary(&outcomes, &report);

    let summary = BatchSummary {
        report: &report,
        sheets: outcomes.iter().map(SheetSummary::from).collect(),
    };
    if let Some(path) = &config.output.json_out {
        write_json_file(path, &summary)?;
        println!("JSON report written to {}", path.display());
    } else {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
        println!("{json}");
    }
    Ok(())
}

struct SheetOutcome {
    name: String,
    corners: Option<Quadrilateral>,
    fallback: bool,
    gcps: Option<Vec<GroundControlPoint>>,
    status: Result<(), FrameError>,
}

fn process_sheet(resolver: &FrameResolver, config: &BatchConfig, sheet: &SheetConfig) -> SheetOutcome {
    let size = sheet.size();
    let (corners, fallback, status) = match resolver.resolve(&sheet.lines, size) {
        Ok(detection) => (Some(detection.quad), false, Ok(())),
        Err(err) if config.fallback_to_image_bounds => {
            log::warn!("{}: {err}; using image bounds", sheet.name);
            (Some(Quadrilateral::from_image_bounds(size)), true, Ok(()))
        }
        Err(err) => (None, false, Err(err)),
    };

    let mut outcome = SheetOutcome {
        name: sheet.name.clone(),
        corners,
        fallback,
        gcps: None,
        status,
    };
    if let (Some(quad), Some(coords)) = (&outcome.corners, &sheet.coordinates) {
        match Georeferencer::fit(quad, coords) {
            Ok(geo) => outcome.gcps = Some(geo.gcps()),
            Err(err) => outcome.status = Err(err),
        }
    }
    outcome
}

fn print_text_summary(outcomes: &[SheetOutcome], report: &BatchReport) {
    for (i, o) in outcomes.iter().enumerate() {
        match (&o.status, &o.corners) {
            (Ok(()), Some(q)) => println!(
                "{}/{}: {} -> {:?}{}",
                i + 1,
                outcomes.len(),
                o.name,
                q.to_array(),
                if o.fallback { " (image bounds)" } else { "" }
            ),
            (Err(err), _) => println!("{}/{}: {} -> {}", i + 1, outcomes.len(), o.name, err),
            (Ok(()), None) => println!("{}/{}: {} -> no corners", i + 1, outcomes.len(), o.name),
        }
    }
    println!(
        "processed={} succeeded={} failed={}",
        report.processed,
        report.success_count(),
        report.failure_count()
    );
}

fn usage() -> String {
    "Usage: frame_batch <config.json>".to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchSummary<'a> {
    report: &'a BatchReport,
    sheets: Vec<SheetSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SheetSummary {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    corners: Option<Quadrilateral>,
    fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    gcps: Option<Vec<GroundControlPoint>>,
}

impl From<&SheetOutcome> for SheetSummary {
    fn from(o: &SheetOutcome) -> Self {
        Self {
            name: o.name.clone(),
            corners: o.corners,
            fallback: o.fallback,
            gcps: o.gcps.clone(),
        }
    }
}
