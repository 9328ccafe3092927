use crate::data::{osm::Relation, validated::Issue, ElementGraph};

use super::Rule;

/// Reports a relation that has no member with the given role.
pub struct MissingMember {
    role: &'static str,
    code: &'static str,
}

pub const MISSING_FROM_MEMBER: MissingMember = MissingMember {
    role: "from",
    code: "missing_from_member",
};

pub const MISSING_TO_MEMBER: MissingMember = MissingMember {
    role: "to",
    code: "missing_to_member",
};

pub const MISSING_VIA_MEMBER: MissingMember = MissingMember {
    role: "via",
    code: "missing_via_member",
};

impl Rule for MissingMember {
    fn code(&self) -> &'static str {
        self.code
    }

    fn check(&self, relation: &Relation, _graph: &ElementGraph) -> Vec<Issue> {
        if relation.has_role(self.role) {
            return vec![];
        }
        vec![Issue::error(
            self.code,
            format!("\"{}\" member is missing", self.role),
        )]
    }
}
