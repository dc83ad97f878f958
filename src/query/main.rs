//! Command-line boundary lookup.
//!
//! Resolves the given criteria and prints GeoJSON, a list of names, or the
//! plotting extent of the combined boundaries.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cnbounds::export::resolved_to_json;
use cnbounds::{AdminLevel, BoundaryIndex, Criteria, IndexConfig, MapPolygon};

#[derive(Parser, Debug)]
#[command(name = "boundary")]
#[command(about = "Resolve administrative boundaries")]
struct Args {
    /// TOML config naming the database and geojson directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory containing index.db and geojson.min/
    #[arg(long, conflicts_with = "config")]
    data_dir: Option<PathBuf>,

    /// Country name (full official name)
    #[arg(long)]
    country: Option<String>,

    /// Do not restrict by country
    #[arg(long, conflicts_with = "country")]
    any_country: bool,

    /// Province name, e.g. 河北省
    #[arg(long)]
    province: Option<String>,

    /// City name, e.g. 石家庄市
    #[arg(long)]
    city: Option<String>,

    /// District or county name
    #[arg(long)]
    district: Option<String>,

    /// Level: 国, 省, 市 or 区县
    #[arg(long)]
    level: Option<String>,

    /// Data source, e.g. 高德
    #[arg(long)]
    source: Option<String>,

    /// Accept every data source
    #[arg(long, conflicts_with = "source")]
    any_source: bool,

    /// Only return the first match
    #[arg(long)]
    first: bool,

    /// Strip metadata from the output
    #[arg(long)]
    only_geometry: bool,

    /// Print the names at this level instead of geometries
    #[arg(long, conflicts_with = "extent")]
    names: Option<String>,

    /// Print left, right, lower, upper of the union of all matches
    #[arg(long, num_args = 0..=1, default_missing_value = "2.0")]
    extent: Option<f64>,
}

impl Args {
    fn index_config(&self) -> Result<IndexConfig> {
        match (&self.config, &self.data_dir) {
            (Some(path), _) => IndexConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            (None, Some(dir)) => Ok(IndexConfig::from_data_dir(dir)),
            (None, None) => bail!("either --config or --data-dir is required"),
        }
    }

    fn criteria(&self, config: &IndexConfig) -> Criteria {
        let mut criteria = Criteria::from_defaults(&config.defaults);
        if let Some(country) = &self.country {
            criteria = criteria.country(country);
        }
        if self.any_country {
            criteria = criteria.any_country();
        }
        if let Some(source) = &self.source {
            criteria = criteria.source(source);
        }
        if self.any_source {
            criteria = criteria.any_source();
        }
        criteria.province = self.province.clone();
        criteria.city = self.city.clone();
        criteria.district = self.district.clone();
        criteria.level = self.level.clone();
        if self.first {
            criteria = criteria.first();
        }
        if self.only_geometry {
            criteria = criteria.only_geometry();
        }
        criteria
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = args.index_config()?;
    let criteria = args.criteria(&config);

    info!("Opening boundary index at {}", config.database.display());
    let index = BoundaryIndex::open(&config).context("Failed to open boundary index")?;

    if let Some(token) = &args.names {
        let level: AdminLevel = token.parse()?;
        for name in index.names_of(level, &criteria)? {
            println!("{name}");
        }
        return Ok(());
    }

    let resolved = index.resolve(&criteria)?;

    if let Some(buffer) = args.extent {
        let combined = resolved
            .into_geometries()
            .into_iter()
            .filter_map(|g| g.into_polygon())
            .fold(MapPolygon::empty(), |acc, p| acc.union(&p));
        let Some(extent) = combined.extent(buffer) else {
            bail!("matched boundaries have no area");
        };
        info!("Extent of {} polygons, {} degree buffer", combined.len(), buffer);
        let (left, right, lower, upper) = extent.to_tuple();
        println!("{left} {right} {lower} {upper}");
        return Ok(());
    }

    let output = resolved_to_json(&resolved).context("Failed to serialize boundaries")?;
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}
