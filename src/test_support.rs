use std::{fs, path::Path};

use crate::UserConfig;

/// Config reading `data` from a file inside `dir` and writing artifacts next to it.
pub fn config_for(dir: &Path, data: &str) -> UserConfig {
    let data_path = dir.join("overpass.json");
    fs::write(&data_path, data).unwrap();
    UserConfig {
        data_path,
        dest_path: dir.to_path_buf(),
        bbox: Some("13.3,52.5,13.4,52.52".parse().unwrap()),
        cache_key: None,
        relation_id: None,
        status: None,
        restriction_type: None,
        max_bbox_area: crate::bbox::DEFAULT_MAX_AREA,
        cache_ttl_seconds: 300,
        log_level: "info".to_string(),
    }
}
