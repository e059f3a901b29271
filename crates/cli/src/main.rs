mod provenance;
mod store;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use polars::prelude::*;
use serde_json::json;
use siting::api::{optimize_with_demand, synthesize_demand, CandidateSet, PlacementCfg};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use provenance::Payload;
use store::Store;

#[derive(Parser)]
#[command(name = "siting")]
#[command(about = "Place new facilities inside a region to cover weighted demand")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Place facilities in a region and write them as JSON
    Optimize {
        #[command(flatten)]
        source: SourceArgs,
        /// Number of new facilities to place
        #[arg(long)]
        count: usize,
        #[command(flatten)]
        params: ParamArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the synthesized demand set of a region as CSV
    Demand {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        params: ParamArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args)]
struct SourceArgs {
    /// Store directory holding regions/ and facilities.csv
    #[arg(long)]
    store: PathBuf,
    /// Region name (regions/<name>.json)
    #[arg(long)]
    region: String,
}

#[derive(Args)]
struct ParamArgs {
    #[arg(long, default_value_t = PlacementCfg::default().sigma_km)]
    sigma_km: f64,
    #[arg(long, default_value_t = PlacementCfg::default().coverage_radius_km)]
    coverage_radius_km: f64,
    #[arg(long, default_value_t = PlacementCfg::default().min_spacing_km)]
    min_spacing_km: f64,
    #[arg(long, default_value_t = PlacementCfg::default().refinement_step_deg)]
    step_deg: f64,
    #[arg(long, default_value_t = PlacementCfg::default().max_refine_iterations)]
    max_refine_iterations: usize,
    #[arg(long, default_value_t = PlacementCfg::default().samples_per_record)]
    samples_per_record: usize,
    #[arg(long, default_value_t = PlacementCfg::default().seed)]
    seed: u64,
    /// Also scan a RES×RES grid over the boundary box
    #[arg(long, value_name = "RES")]
    grid: Option<usize>,
}

impl ParamArgs {
    fn to_cfg(&self) -> PlacementCfg {
        PlacementCfg {
            sigma_km: self.sigma_km,
            coverage_radius_km: self.coverage_radius_km,
            min_spacing_km: self.min_spacing_km,
            refinement_step_deg: self.step_deg,
            max_refine_iterations: self.max_refine_iterations,
            samples_per_record: self.samples_per_record,
            seed: self.seed,
            candidates: match self.grid {
                Some(resolution) => CandidateSet::Grid { resolution },
                None => CandidateSet::DemandPoints,
            },
        }
    }
}

fn cfg_json(cfg: &PlacementCfg) -> serde_json::Value {
    let grid = match cfg.candidates {
        CandidateSet::Grid { resolution } => Some(resolution),
        CandidateSet::DemandPoints => None,
    };
    json!({
        "sigma_km": cfg.sigma_km,
        "coverage_radius_km": cfg.coverage_radius_km,
        "min_spacing_km": cfg.min_spacing_km,
        "refinement_step_deg": cfg.refinement_step_deg,
        "max_refine_iterations": cfg.max_refine_iterations,
        "samples_per_record": cfg.samples_per_record,
        "seed": cfg.seed,
        "grid": grid
    })
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Optimize {
            source,
            count,
            params,
            out,
        } => optimize(source, count, params.to_cfg(), out),
        Action::Demand {
            source,
            params,
            out,
        } => demand(source, params.to_cfg(), out),
        Action::Report => report(),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

fn optimize(source: SourceArgs, count: usize, cfg: PlacementCfg, out: PathBuf) -> Result<()> {
    tracing::info!(region = %source.region, count, out = %out.display(), "optimize");
    cfg.validate()?;
    let store = Store::open(&source.store)?;
    let region = store.load_region(&source.region)?;
    let existing = store.load_existing_facilities()?;

    let demand = synthesize_demand(&region, &cfg.demand_cfg());
    let outcome = optimize_with_demand(&region, &demand, &existing, count, &cfg)
        .with_context(|| format!("placing {count} facilities in '{}'", region.name))?;
    if outcome.fallback_rounds > 0 {
        tracing::warn!(
            fallback_rounds = outcome.fallback_rounds,
            "some facilities were placed at the region center"
        );
    }

    let placements: Vec<_> = outcome
        .placed
        .iter()
        .enumerate()
        .map(|(i, f)| json!({"rank": i + 1, "lon": f.location.x, "lat": f.location.y}))
        .collect();
    let doc = json!({
        "region": region.name,
        "centroid": [region.centroid.x, region.centroid.y],
        "facility_count": count,
        "existing_facilities": existing.len(),
        "demand_points": outcome.demand_points,
        "fallback_rounds": outcome.fallback_rounds,
        "placements": placements
    });
    ensure_parent(&out)?;
    std::fs::write(&out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = Payload::new(json!({
        "region": region.name,
        "facility_count": count,
        "cfg": cfg_json(&cfg)
    }))
    .with_inputs([
        store.region_path(&source.region).to_string_lossy().into_owned(),
        store.facilities_path().to_string_lossy().into_owned(),
    ]);
    provenance::write_sidecar(&out, payload)?;
    for (i, f) in outcome.placed.iter().enumerate() {
        println!("{}\t{:.6}\t{:.6}", i + 1, f.location.x, f.location.y);
    }
    Ok(())
}

fn demand(source: SourceArgs, cfg: PlacementCfg, out: PathBuf) -> Result<()> {
    tracing::info!(region = %source.region, out = %out.display(), "demand");
    cfg.validate()?;
    let store = Store::open(&source.store)?;
    let region = store.load_region(&source.region)?;
    let points = synthesize_demand(&region, &cfg.demand_cfg());

    let mut df = df!(
        "lon" => points.iter().map(|p| p.location.x).collect::<Vec<f64>>(),
        "lat" => points.iter().map(|p| p.location.y).collect::<Vec<f64>>(),
        "raw_share" => points.iter().map(|p| p.raw_share).collect::<Vec<f64>>(),
        "weighted_share" => points.iter().map(|p| p.weighted_share).collect::<Vec<f64>>(),
        "distance_km" => points.iter().map(|p| p.distance_from_center).collect::<Vec<f64>>()
    )?;
    tracing::info!(rows = df.height(), cols = df.width(), "demand_frame_shape");

    ensure_parent(&out)?;
    let mut file =
        std::fs::File::create(&out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = Payload::new(json!({
        "region": region.name,
        "cfg": cfg_json(&cfg)
    }))
    .with_inputs([store.region_path(&source.region).to_string_lossy().into_owned()]);
    provenance::write_sidecar(&out, payload)?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = provenance::document(
        &Payload::new(json!({"defaults": cfg_json(&PlacementCfg::default())})),
        &[],
    );
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_with_region(dir: &Path) {
        std::fs::create_dir_all(dir.join("regions")).unwrap();
        std::fs::write(
            dir.join("regions/town.json"),
            r#"{
                "name": "town",
                "centroid": [0.05, 0.05],
                "boundary": [[0,0],[0,0.1],[0.1,0.1],[0.1,0]],
                "demand": [{"polygon": [[0,0],[0,0.1],[0.1,0.1],[0.1,0]], "count": 800}]
            }"#,
        )
        .unwrap();
        std::fs::write(dir.join("facilities.csv"), "label,lon,lat\nOld School,0.02,0.02\n").unwrap();
    }

    #[test]
    fn param_flags_override_defaults() {
        let cmd = Cmd::try_parse_from([
            "siting", "optimize", "--store", "s", "--region", "r", "--count", "2",
            "--sigma-km", "5", "--grid", "21", "--out", "o.json",
        ])
        .unwrap();
        let Action::Optimize { params, count, .. } = cmd.action else {
            panic!("expected optimize");
        };
        assert_eq!(count, 2);
        let cfg = params.to_cfg();
        assert_eq!(cfg.sigma_km, 5.0);
        assert_eq!(cfg.candidates, CandidateSet::Grid { resolution: 21 });
        assert_eq!(cfg.min_spacing_km, PlacementCfg::default().min_spacing_km);
    }

    #[test]
    fn optimize_writes_result_and_sidecar() {
        let dir = tempdir().unwrap();
        store_with_region(dir.path());
        let out = dir.path().join("out/sites.json");
        let source = SourceArgs {
            store: dir.path().to_path_buf(),
            region: "town".into(),
        };
        let cfg = PlacementCfg {
            samples_per_record: 40,
            ..PlacementCfg::default()
        };
        optimize(source, 2, cfg, out.clone()).unwrap();
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["placements"].as_array().unwrap().len(), 2);
        assert_eq!(doc["existing_facilities"], 1);
        assert!(dir.path().join("out/sites.provenance.json").exists());
    }

    #[test]
    fn oversized_sample_budget_is_an_error() {
        let dir = tempdir().unwrap();
        store_with_region(dir.path());
        let out = dir.path().join("sites.json");
        let source = SourceArgs {
            store: dir.path().to_path_buf(),
            region: "town".into(),
        };
        let cfg = PlacementCfg {
            samples_per_record: usize::MAX / 4,
            ..PlacementCfg::default()
        };
        let err = optimize(source, 1, cfg, out.clone()).unwrap_err();
        assert!(err.to_string().contains("samples_per_record"), "{err}");
        assert!(!out.exists());
    }

    #[test]
    fn demand_writes_csv() {
        let dir = tempdir().unwrap();
        store_with_region(dir.path());
        let out = dir.path().join("demand.csv");
        let source = SourceArgs {
            store: dir.path().to_path_buf(),
            region: "town".into(),
        };
        let cfg = PlacementCfg {
            samples_per_record: 10,
            ..PlacementCfg::default()
        };
        demand(source, cfg, out.clone()).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "lon,lat,raw_share,weighted_share,distance_km"
        );
        assert_eq!(lines.count(), 10);
    }
}
