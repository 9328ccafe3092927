//! The fixed catalog of checks run against every turn restriction.
//!
//! A rule looks at one relation and the lookup tables of the fetch it came from. Rules never
//! fail: data a rule needs but cannot find is itself reported as an issue.

pub mod member_rules;
pub mod type_rules;
pub mod warning_rules;

use crate::data::{osm::Relation, validated::Issue, ElementGraph};

use self::member_rules::{MISSING_FROM_MEMBER, MISSING_TO_MEMBER, MISSING_VIA_MEMBER};
use self::type_rules::{INVALID_FROM_TYPE, INVALID_TO_TYPE, INVALID_VIA_TYPE, MissingRestrictionTag};
use self::warning_rules::{NonexistentMember, OnewayInconsistency};

pub trait Rule: Send + Sync {
    /// Stable identifier of the issue this rule reports.
    fn code(&self) -> &'static str;

    fn check(&self, relation: &Relation, graph: &ElementGraph) -> Vec<Issue>;
}

/// Every rule in the order its issues are reported.
pub static ALL_RULES: &[&dyn Rule] = &[
    &MISSING_FROM_MEMBER,
    &MISSING_TO_MEMBER,
    &MISSING_VIA_MEMBER,
    &INVALID_FROM_TYPE,
    &INVALID_TO_TYPE,
    &INVALID_VIA_TYPE,
    &MissingRestrictionTag,
    &NonexistentMember,
    &OnewayInconsistency,
];
