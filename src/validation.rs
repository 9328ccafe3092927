//! Validation of turn-restriction relations.
//!
//! The engine indexes one fetch of map elements, drops relations that are not turn
//! restrictions, runs every rule of the catalog against the rest and derives a display
//! location for each. It holds no state between calls and can be shared across threads.

pub mod location;
pub mod rules;

use log::{debug, info};

use crate::data::{
    osm::{Element, OsmId, Relation, Tags},
    validated::{Issue, Status, ValidatedRestriction},
    ElementGraph,
};

use self::location::derive_location;
use self::rules::{Rule, ALL_RULES};

/// Prohibitory and mandatory turn restrictions.
pub const TURN_RESTRICTION_TYPES: [&str; 8] = [
    "no_left_turn",
    "no_right_turn",
    "no_straight_on",
    "no_u_turn",
    "only_left_turn",
    "only_right_turn",
    "only_straight_on",
    "only_u_turn",
];

/// Values accepted by the restriction tag check. Access restrictions are included here even
/// though the engine never lets them reach the rules.
pub const RESTRICTION_TYPES: [&str; 10] = [
    "no_left_turn",
    "no_right_turn",
    "no_straight_on",
    "no_u_turn",
    "only_left_turn",
    "only_right_turn",
    "only_straight_on",
    "only_u_turn",
    "no_entry",
    "no_exit",
];

/// Value of the first tag keyed `restriction` or `restriction:*`, in tag order.
pub fn restriction_type(tags: &Tags) -> Option<&str> {
    tags.iter()
        .find(|(key, _)| *key == "restriction" || key.starts_with("restriction:"))
        .map(|(_, value)| value.as_str())
}

/// Whether a relation is excluded before validation: it carries a non-empty restriction value
/// that is not a turn restriction (no_entry, no_exit, ...).
pub fn is_filtered_out(relation: &Relation) -> bool {
    match restriction_type(&relation.tags) {
        Some(value) if !value.is_empty() => !TURN_RESTRICTION_TYPES.contains(&value),
        _ => false,
    }
}

pub struct ValidationEngine {
    rules: Vec<&'static dyn Rule>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationEngine {
    pub fn new() -> ValidationEngine {
        Self::with_rules(ALL_RULES.to_vec())
    }

    pub fn with_rules(rules: Vec<&'static dyn Rule>) -> ValidationEngine {
        ValidationEngine { rules }
    }

    pub fn rule_codes(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.code()).collect()
    }

    /// Validates every turn restriction in `elements`, in the order the relations appear.
    pub fn validate(&self, elements: &[Element]) -> Vec<ValidatedRestriction> {
        let graph = ElementGraph::build(elements);
        let mut validated = Vec::with_capacity(graph.relations.len());
        let mut skipped = 0usize;

        for relation in &graph.relations {
            if is_filtered_out(relation) {
                debug!(relation_id = relation.id; "Skipping relation that is not a turn restriction");
                skipped += 1;
                continue;
            }
            validated.push(self.validate_relation(relation, &graph));
        }

        info!(
            elements = elements.len(),
            relations = graph.relations.len(),
            validated = validated.len(),
            skipped = skipped;
            "Validated restrictions"
        );
        validated
    }

    /// Validates the single relation `id`, if it is present and is a turn restriction.
    pub fn validate_one(&self, elements: &[Element], id: OsmId) -> Option<ValidatedRestriction> {
        let graph = ElementGraph::build(elements);
        let relation = graph.relations.iter().find(|relation| relation.id == id)?;
        if is_filtered_out(relation) {
            return None;
        }
        Some(self.validate_relation(relation, &graph))
    }

    fn validate_relation(&self, relation: &Relation, graph: &ElementGraph) -> ValidatedRestriction {
        let issues: Vec<Issue> = self
            .rules
            .iter()
            .flat_map(|rule| rule.check(relation, graph))
            .collect();
        let location = derive_location(&relation.members, graph);

        let validated = ValidatedRestriction::new(
            relation.id,
            restriction_type(&relation.tags).map(str::to_string),
            relation.members.clone(),
            relation.tags.clone(),
            issues,
            location,
        );
        if validated.status() != Status::Ok {
            debug!(
                relation_id = validated.id,
                status = validated.status().as_str(),
                issues = validated.issues().len();
                "Restriction has issues"
            );
        }
        validated
    }
}
