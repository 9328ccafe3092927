use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    time::Duration,
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    data::{osm::OverpassResponse, validated::ValidatedRestriction},
    errors::Result,
    validation::ValidationEngine,
    UserConfig,
};

use super::{remove_if_exists, Etl};

pub const ETL_NAME: &str = "validate_restrictions";

/// Validation output for one fetch, as stored in the result cache.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ValidatedBatch {
    pub restrictions: Vec<ValidatedRestriction>,
    pub osm_timestamp: Option<String>,
}

/// Cache artifact for a request. The dump path is part of the key, so pointing the config at a
/// new dump never serves results validated from the old one.
pub fn output_file_name(config: &UserConfig) -> String {
    let source = config.data_path.to_string_lossy();
    format!("restrictions-{}.json", config.cache_key().digest(&source))
}

/// Reads an Overpass dump, validates it and caches the result under the request's cache key.
/// A cached result is reused until it is older than `cache_ttl_seconds`.
pub struct ValidateRestrictionsEtl<'a> {
    config: &'a UserConfig,
    engine: &'a ValidationEngine,
}

impl<'a> ValidateRestrictionsEtl<'a> {
    pub fn new(config: &'a UserConfig, engine: &'a ValidationEngine) -> ValidateRestrictionsEtl<'a> {
        ValidateRestrictionsEtl { config, engine }
    }

    fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(output_file_name(self.config))
    }
}

impl Etl for ValidateRestrictionsEtl<'_> {
    type Input = OverpassResponse;
    type Output = ValidatedBatch;

    fn etl_name(&self) -> &str {
        ETL_NAME
    }

    fn is_cached(&self, dir: &Path) -> Result<bool> {
        let path = self.output_path(dir);
        if !path.try_exists()? {
            return Ok(false);
        }
        let age = fs::metadata(&path)?.modified()?.elapsed().unwrap_or_default();
        Ok(age < Duration::from_secs(self.config.cache_ttl_seconds))
    }

    fn clean(&self, dir: &Path) -> Result<()> {
        remove_if_exists(&self.output_path(dir))
    }

    fn extract(&mut self, _dir: &Path) -> Result<Self::Input> {
        let file = File::open(&self.config.data_path)?;
        let response: OverpassResponse = serde_json::from_reader(BufReader::new(file))?;
        info!(
            etl_name = ETL_NAME,
            elements = response.elements.len();
            "Read Overpass data"
        );
        Ok(response)
    }

    fn transform(&mut self, input: Self::Input) -> Result<Self::Output> {
        let restrictions = match self.config.relation_id {
            Some(id) => self.engine.validate_one(&input.elements, id).into_iter().collect(),
            None => self.engine.validate(&input.elements),
        };
        Ok(ValidatedBatch {
            restrictions,
            osm_timestamp: input.timestamp().map(str::to_string),
        })
    }

    fn load(&mut self, dir: &Path, output: Self::Output) -> Result<()> {
        let file = File::create(self.output_path(dir))?;
        serde_json::to_writer(BufWriter::new(file), &output)?;
        Ok(())
    }
}
