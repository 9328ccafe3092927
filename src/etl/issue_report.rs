use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use log::info;

use crate::{
    errors::{Error, Result},
    report::Report,
    UserConfig,
};

use super::{
    remove_if_exists,
    validate_restrictions::{self, ValidatedBatch},
    Etl,
};

pub const ETL_NAME: &str = "issue_report";
pub const OUTPUT_FILE_NAME: &str = "report.json";

pub fn output_path(dir: &Path) -> PathBuf {
    dir.join(OUTPUT_FILE_NAME)
}

/// Filters the cached validation batch down to what the caller asked for and writes it with
/// summary counts. Always regenerated, the filters are cheap compared to validation.
pub struct IssueReportEtl<'a> {
    config: &'a UserConfig,
}

impl<'a> IssueReportEtl<'a> {
    pub fn new(config: &'a UserConfig) -> IssueReportEtl<'a> {
        IssueReportEtl { config }
    }
}

impl Etl for IssueReportEtl<'_> {
    type Input = ValidatedBatch;
    type Output = Report;

    fn etl_name(&self) -> &str {
        ETL_NAME
    }

    fn is_cached(&self, _dir: &Path) -> Result<bool> {
        Ok(false)
    }

    fn clean(&self, dir: &Path) -> Result<()> {
        remove_if_exists(&output_path(dir))
    }

    fn extract(&mut self, dir: &Path) -> Result<Self::Input> {
        let input_path = dir.join(validate_restrictions::output_file_name(self.config));
        let file = File::open(input_path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn transform(&mut self, input: Self::Input) -> Result<Self::Output> {
        let mut restrictions = input.restrictions;
        if let Some(id) = self.config.relation_id {
            restrictions.retain(|restriction| restriction.id == id);
            if restrictions.is_empty() {
                return Err(Error::not_found(format!("Restriction {id} not found")));
            }
        }

        let report = Report::new(
            restrictions,
            &self.config.filter(),
            self.config.bbox,
            input.osm_timestamp,
        );
        info!(
            etl_name = ETL_NAME,
            total = report.meta.total,
            errors = report.meta.errors,
            warnings = report.meta.warnings,
            ok = report.meta.ok;
            "Built report"
        );
        Ok(report)
    }

    fn load(&mut self, dir: &Path, output: Self::Output) -> Result<()> {
        let file = File::create(output_path(dir))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &output)?;
        Ok(())
    }
}
