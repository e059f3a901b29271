//! File-backed region store.
//!
//! Layout under the store root:
//! - `regions/<name>.json`: boundary, optional centroid, demand records.
//! - `facilities.csv`: existing facilities, columns `label,lon,lat`.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde::Deserialize;
use siting::geom::Polygon;
use siting::{lonlat, Coordinate, DemandRecord, ExistingFacility, Region};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct RegionFile {
    name: String,
    #[serde(default)]
    centroid: Option<[f64; 2]>,
    boundary: Vec<[f64; 2]>,
    #[serde(default)]
    demand: Vec<DemandFile>,
}

#[derive(Debug, Deserialize)]
struct DemandFile {
    polygon: Vec<[f64; 2]>,
    count: u64,
}

fn to_coords(ring: &[[f64; 2]]) -> Vec<Coordinate> {
    ring.iter().map(|&[lon, lat]| lonlat(lon, lat)).collect()
}

pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            bail!("store directory {} does not exist", root.display());
        }
        Ok(Self { root })
    }

    pub fn region_path(&self, name: &str) -> PathBuf {
        self.root.join("regions").join(format!("{name}.json"))
    }

    pub fn facilities_path(&self) -> PathBuf {
        self.root.join("facilities.csv")
    }

    /// Load a region by name; a missing file is a "region not found" error.
    pub fn load_region(&self, name: &str) -> Result<Region> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            bail!("invalid region name '{name}'");
        }
        let path = self.region_path(name);
        if !path.is_file() {
            bail!("region not found: '{name}' (expected {})", path.display());
        }
        let text =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let file: RegionFile = serde_json::from_str(&text)
            .with_context(|| format!("parsing region file {}", path.display()))?;

        let boundary = Polygon::new(to_coords(&file.boundary))
            .with_context(|| format!("boundary of region '{}'", file.name))?;
        let centroid = match file.centroid {
            Some([lon, lat]) => lonlat(lon, lat),
            None => boundary
                .area_centroid()
                .with_context(|| format!("centroid of region '{}'", file.name))?,
        };
        // Degenerate demand polygons are tolerated: they simply yield no samples.
        let demand_records = file
            .demand
            .iter()
            .map(|d| DemandRecord {
                polygon: Polygon::from_unchecked(to_coords(&d.polygon)),
                total_count: d.count,
            })
            .collect::<Vec<_>>();
        tracing::info!(
            region = %file.name,
            boundary_vertices = boundary.len(),
            records = demand_records.len(),
            "loaded region"
        );
        Ok(Region {
            name: file.name,
            centroid,
            boundary,
            demand_records,
        })
    }

    /// Existing facilities from `facilities.csv`; none if the file is absent.
    pub fn load_existing_facilities(&self) -> Result<Vec<ExistingFacility>> {
        let path = self.facilities_path();
        if !path.is_file() {
            tracing::info!(path = %path.display(), "no facilities file; assuming none");
            return Ok(Vec::new());
        }
        let df = LazyCsvReader::new(&path)
            .with_has_header(true)
            .finish()
            .and_then(|lf| lf.collect())
            .with_context(|| format!("reading {}", path.display()))?;
        let labels = df.column("label")?.cast(&DataType::String)?;
        let lons = df.column("lon")?.cast(&DataType::Float64)?;
        let lats = df.column("lat")?.cast(&DataType::Float64)?;

        let mut out = Vec::with_capacity(df.height());
        for (row, ((label, lon), lat)) in labels
            .str()?
            .into_iter()
            .zip(lons.f64()?.into_iter())
            .zip(lats.f64()?.into_iter())
            .enumerate()
        {
            let (Some(lon), Some(lat)) = (lon, lat) else {
                bail!("{}: row {} has a missing coordinate", path.display(), row + 1);
            };
            out.push(ExistingFacility {
                location: lonlat(lon, lat),
                label: label.unwrap_or_default().to_string(),
            });
        }
        tracing::info!(count = out.len(), "loaded existing facilities");
        Ok(out)
    }
}
