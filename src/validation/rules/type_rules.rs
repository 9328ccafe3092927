use crate::{
    data::{
        osm::{MemberKind, Relation},
        validated::Issue,
        ElementGraph,
    },
    validation::{restriction_type, RESTRICTION_TYPES},
};

use super::Rule;

/// Reports every member with the given role whose kind is not one of `allowed`.
pub struct InvalidMemberType {
    role: &'static str,
    code: &'static str,
    allowed: &'static [MemberKind],
    expected: &'static str,
}

pub const INVALID_FROM_TYPE: InvalidMemberType = InvalidMemberType {
    role: "from",
    code: "invalid_from_type",
    allowed: &[MemberKind::Way],
    expected: "a way",
};

pub const INVALID_TO_TYPE: InvalidMemberType = InvalidMemberType {
    role: "to",
    code: "invalid_to_type",
    allowed: &[MemberKind::Way],
    expected: "a way",
};

pub const INVALID_VIA_TYPE: InvalidMemberType = InvalidMemberType {
    role: "via",
    code: "invalid_via_type",
    allowed: &[MemberKind::Node, MemberKind::Way],
    expected: "a node or way",
};

impl Rule for InvalidMemberType {
    fn code(&self) -> &'static str {
        self.code
    }

    fn check(&self, relation: &Relation, _graph: &ElementGraph) -> Vec<Issue> {
        relation
            .members_with_role(self.role)
            .filter(|member| !self.allowed.contains(&member.kind))
            .map(|member| {
                Issue::error(
                    self.code,
                    format!(
                        "\"{}\" member must be {}, got {}",
                        self.role,
                        self.expected,
                        member.kind.as_str()
                    ),
                )
            })
            .collect()
    }
}

/// Checks the restriction tag: an error when it is absent or empty, a warning when its value is
/// not a known restriction. Never both.
pub struct MissingRestrictionTag;

impl Rule for MissingRestrictionTag {
    fn code(&self) -> &'static str {
        "missing_restriction_tag"
    }

    fn check(&self, relation: &Relation, _graph: &ElementGraph) -> Vec<Issue> {
        match restriction_type(&relation.tags) {
            None | Some("") => vec![Issue::error(self.code(), "restriction tag is missing")],
            Some(value) if !RESTRICTION_TYPES.contains(&value) => vec![Issue::warning(
                "unrecognized_restriction_type",
                format!("unrecognized restriction type: \"{value}\""),
            )],
            Some(_) => vec![],
        }
    }
}
