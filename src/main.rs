mod bbox;
mod cache_key;
mod data;
mod errors;
mod etl;
mod report;
mod validation;

#[cfg(test)]
mod test_support;

use std::fs::{create_dir_all, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use serde::Deserialize;
use structured_logger::json::new_writer;
use structured_logger::Builder;

use crate::bbox::BBox;
use crate::cache_key::CacheKey;
use crate::data::osm::OsmId;
use crate::errors::Result;
use crate::etl::issue_report::{self, IssueReportEtl};
use crate::etl::validate_restrictions::ValidateRestrictionsEtl;
use crate::etl::Etl;
use crate::report::{ReportFilter, StatusFilter};
use crate::validation::ValidationEngine;

#[derive(Parser)]
#[command(name = "restriction_validator")]
#[command(about = "Validates OSM turn restriction relations and reports errors and warnings")]
struct Cli {
    /// JSON config file describing the input dump and the report to build
    #[arg(short, long, default_value = "config/validator.json")]
    config: PathBuf,

    /// Drop the cached validation result before running
    #[arg(short, long)]
    refresh: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UserConfig {
    /// Overpass JSON dump to validate.
    pub data_path: PathBuf,
    pub dest_path: PathBuf,
    #[serde(default)]
    pub bbox: Option<BBox>,
    /// Names the cached result when no bbox is given.
    #[serde(default)]
    pub cache_key: Option<String>,
    #[serde(default)]
    pub relation_id: Option<OsmId>,
    #[serde(default)]
    pub status: Option<StatusFilter>,
    #[serde(default)]
    pub restriction_type: Option<String>,
    #[serde(default = "default_max_bbox_area")]
    pub max_bbox_area: f64,
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_bbox_area() -> f64 {
    bbox::DEFAULT_MAX_AREA
}

fn default_cache_ttl_seconds() -> u64 {
    300
}

fn default_log_level() -> String {
    "info".to_string()
}

impl UserConfig {
    pub fn cache_key(&self) -> CacheKey {
        if let Some(id) = self.relation_id {
            return CacheKey::Custom(format!("relation_{id}"));
        }
        match (&self.cache_key, self.bbox) {
            (Some(name), _) => CacheKey::Custom(name.clone()),
            (None, Some(bbox)) => CacheKey::BBox(bbox),
            (None, None) => CacheKey::Custom(self.data_path.display().to_string()),
        }
    }

    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            status: self.status,
            restriction_type: self.restriction_type.clone(),
        }
    }

    pub fn check(&self) -> Result<()> {
        if let Some(bbox) = &self.bbox {
            bbox.check(self.max_bbox_area)?;
        }
        Ok(())
    }
}

fn load_user_config(path: &Path) -> Result<UserConfig> {
    let file = File::open(path)?;
    let config: UserConfig = serde_json::from_reader(BufReader::new(file))?;
    config.check()?;
    Ok(config)
}

fn create_output_dir(config: &UserConfig) -> Result<PathBuf> {
    let output_dir = config.dest_path.clone();
    create_dir_all(&output_dir)?;
    Ok(output_dir)
}

fn setup_logging(level: &str) {
    Builder::with_level(level)
        .with_target_writer("*", new_writer(io::stdout()))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let user_config = load_user_config(&cli.config)?;
    setup_logging(&user_config.log_level);

    let output_dir = create_output_dir(&user_config)?;
    let engine = ValidationEngine::new();
    info!(rules = engine.rule_codes().len(); "Validation engine ready");

    let mut validate = ValidateRestrictionsEtl::new(&user_config, &engine);
    if cli.refresh {
        validate.clean(&output_dir)?;
    }
    validate.process(&output_dir)?;

    let mut report_etl = IssueReportEtl::new(&user_config);
    report_etl.process(&output_dir)?;

    let report_path = issue_report::output_path(&output_dir);
    info!(report = report_path.display().to_string().as_str(); "Report written");

    Ok(())
}
