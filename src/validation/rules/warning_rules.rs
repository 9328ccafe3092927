use crate::{
    data::{osm::Relation, validated::Issue, ElementGraph},
    validation::restriction_type,
};

use super::Rule;

/// Members pointing at elements that were not part of the fetch.
pub struct NonexistentMember;

impl Rule for NonexistentMember {
    fn code(&self) -> &'static str {
        "nonexistent_member"
    }

    fn check(&self, relation: &Relation, graph: &ElementGraph) -> Vec<Issue> {
        relation
            .members
            .iter()
            .filter(|member| member.reference != 0 && !graph.contains(member.reference))
            .map(|member| {
                let role = member.role.as_deref().unwrap_or("unknown");
                Issue::warning(
                    self.code(),
                    format!("member {role} (id={}) not found in data", member.reference),
                )
            })
            .collect()
    }
}

/// Flags access restrictions whose "to" way is tagged `oneway=-1`.
///
/// Only no_entry and no_exit trigger it, and the engine drops those before the rules run, so
/// in practice it stays silent for turn restrictions.
pub struct OnewayInconsistency;

const ONEWAY_SENSITIVE_TYPES: [&str; 2] = ["no_entry", "no_exit"];

impl Rule for OnewayInconsistency {
    fn code(&self) -> &'static str {
        "oneway_inconsistency"
    }

    fn check(&self, relation: &Relation, graph: &ElementGraph) -> Vec<Issue> {
        let Some(restriction) = restriction_type(&relation.tags).filter(|value| !value.is_empty()) else {
            return vec![];
        };
        if !ONEWAY_SENSITIVE_TYPES.contains(&restriction) {
            return vec![];
        }

        relation
            .members_with_role("to")
            .filter(|member| member.reference != 0)
            .filter_map(|member| graph.elements.get(&member.reference))
            .filter(|element| element.tags().get("oneway").map(String::as_str) == Some("-1"))
            .map(|_| {
                Issue::warning(
                    self.code(),
                    "restriction on way with oneway=-1 may be redundant",
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::osm::{Element, Member, MemberKind, Tags, Way};

    fn relation(restriction: &str, members: Vec<Member>) -> Relation {
        let mut tags = Tags::new();
        tags.insert("type".into(), "restriction".into());
        tags.insert("restriction".into(), restriction.into());
        Relation { id: 5, members, tags }
    }

    fn member(reference: i64, role: &str) -> Member {
        Member::new(MemberKind::Way, reference, role)
    }

    fn reverse_oneway(id: i64) -> Element {
        let mut tags = Tags::new();
        tags.insert("oneway".into(), "-1".into());
        Element::Way(Way { id, nodes: vec![], tags })
    }

    #[test]
    fn reports_each_unresolved_reference() {
        let elements = vec![reverse_oneway(1)];
        let graph = ElementGraph::build(&elements);
        let relation = relation(
            "no_left_turn",
            vec![
                member(1, "from"),
                member(2, "to"),
                member(3, ""),
                Member { kind: MemberKind::Way, reference: 4, role: None },
                member(0, "via"),
            ],
        );

        let issues = NonexistentMember.check(&relation, &graph);
        let messages: Vec<&str> = issues.iter().map(|issue| issue.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "member to (id=2) not found in data",
                "member  (id=3) not found in data",
                "member unknown (id=4) not found in data",
            ]
        );
    }

    #[test]
    fn oneway_silent_for_turn_restrictions() {
        let elements = vec![reverse_oneway(2)];
        let graph = ElementGraph::build(&elements);
        let relation = relation("no_left_turn", vec![member(2, "to")]);
        assert!(OnewayInconsistency.check(&relation, &graph).is_empty());
    }

    #[test]
    fn oneway_fires_for_access_restrictions() {
        let elements = vec![reverse_oneway(2), reverse_oneway(4)];
        let graph = ElementGraph::build(&elements);
        let relation = relation("no_entry", vec![member(2, "to"), member(4, "from"), member(9, "to")]);

        let issues = OnewayInconsistency.check(&relation, &graph);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "oneway_inconsistency");
    }
}
