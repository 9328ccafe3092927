use serde::{Deserialize, Serialize};

use crate::{
    bbox::BBox,
    data::validated::{Status, ValidatedRestriction},
};

/// Which statuses a report keeps. `Issues` keeps warnings and errors.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Ok,
    Warning,
    Error,
    Issues,
}

impl StatusFilter {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::Ok => status == Status::Ok,
            StatusFilter::Warning => status == Status::Warning,
            StatusFilter::Error => status == Status::Error,
            StatusFilter::Issues => status != Status::Ok,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub status: Option<StatusFilter>,
    pub restriction_type: Option<String>,
}

impl ReportFilter {
    pub fn matches(&self, restriction: &ValidatedRestriction) -> bool {
        let status_ok = self
            .status
            .map_or(true, |filter| filter.matches(restriction.status()));
        let type_ok = self.restriction_type.as_ref().map_or(true, |wanted| {
            restriction.restriction_type.as_deref() == Some(wanted.as_str())
        });
        status_ok && type_ok
    }

    pub fn apply(&self, restrictions: Vec<ValidatedRestriction>) -> Vec<ValidatedRestriction> {
        restrictions.into_iter().filter(|r| self.matches(r)).collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReportMeta {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub ok: usize,
    pub bbox: Option<BBox>,
    pub osm_timestamp: Option<String>,
}

impl ReportMeta {
    pub fn summarize(
        restrictions: &[ValidatedRestriction],
        bbox: Option<BBox>,
        osm_timestamp: Option<String>,
    ) -> ReportMeta {
        let count = |status: Status| restrictions.iter().filter(|r| r.status() == status).count();
        ReportMeta {
            total: restrictions.len(),
            errors: count(Status::Error),
            warnings: count(Status::Warning),
            ok: count(Status::Ok),
            bbox,
            osm_timestamp,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub restrictions: Vec<ValidatedRestriction>,
    pub meta: ReportMeta,
}

impl Report {
    pub fn new(
        restrictions: Vec<ValidatedRestriction>,
        filter: &ReportFilter,
        bbox: Option<BBox>,
        osm_timestamp: Option<String>,
    ) -> Report {
        let restrictions = filter.apply(restrictions);
        let meta = ReportMeta::summarize(&restrictions, bbox, osm_timestamp);
        Report { restrictions, meta }
    }
}
