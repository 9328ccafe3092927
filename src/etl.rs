pub mod issue_report;
pub mod validate_restrictions;

use std::{fs, path::Path};

use log::{error, info};

use crate::errors::Result;

/// One stage of the pipeline. Each stage reads its input, transforms it and writes an artifact
/// into the output directory, where later stages (or later runs) pick it up.
pub trait Etl {
    type Input;
    type Output;

    fn etl_name(&self) -> &str;

    fn is_cached(&self, dir: &Path) -> Result<bool>;
    fn clean(&self, dir: &Path) -> Result<()>;

    fn extract(&mut self, dir: &Path) -> Result<Self::Input>;
    fn transform(&mut self, input: Self::Input) -> Result<Self::Output>;
    fn load(&mut self, dir: &Path, output: Self::Output) -> Result<()>;

    /// Runs the stage unless a usable artifact is already in `dir`.
    fn process(&mut self, dir: &Path) -> Result<()> {
        let name = self.etl_name().to_string();
        info!(etl_name = name.as_str(); "Starting ETL process");
        if self.is_cached(dir)? {
            info!(etl_name = name.as_str(); "Using cached value");
        } else {
            info!(etl_name = name.as_str(); "Extracting");
            let input = logged(&name, "Extraction", self.extract(dir))?;

            info!(etl_name = name.as_str(); "Transforming");
            let output = logged(&name, "Transformation", self.transform(input))?;

            info!(etl_name = name.as_str(); "Loading");
            logged(&name, "Loading", self.load(dir, output))?;
        }
        info!(etl_name = name.as_str(); "Process finished");
        Ok(())
    }
}

fn logged<T>(etl_name: &str, phase: &str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        error!(
            etl_name = etl_name,
            phase = phase,
            kind = format!("{:?}", err.kind).as_str(),
            err = err.message.as_str();
            "Phase failed with error"
        );
    }
    result
}

/// Removes a stage artifact if it exists.
pub(crate) fn remove_if_exists(path: &Path) -> Result<()> {
    if path.try_exists()? {
        fs::remove_file(path)?;
    }
    Ok(())
}
