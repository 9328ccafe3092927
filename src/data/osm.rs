use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type OsmId = i64;

/// Tags keep the order they arrived in, "first matching key" lookups depend on it.
pub type Tags = IndexMap<String, String>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node(Node),
    Way(Way),
    Relation(Relation),
}

impl Element {
    pub fn id(&self) -> OsmId {
        match self {
            Element::Node(node) => node.id,
            Element::Way(way) => way.id,
            Element::Relation(relation) => relation.id,
        }
    }

    pub fn tags(&self) -> &Tags {
        match self {
            Element::Node(node) => &node.tags,
            Element::Way(way) => &way.tags,
            Element::Relation(relation) => &relation.tags,
        }
    }

    pub fn as_way(&self) -> Option<&Way> {
        match self {
            Element::Way(way) => Some(way),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Node {
    pub id: OsmId,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub tags: Tags,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Way {
    pub id: OsmId,
    #[serde(default)]
    pub nodes: Vec<OsmId>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub tags: Tags,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Relation {
    pub id: OsmId,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub tags: Tags,
}

impl Relation {
    pub fn members_with_role<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a Member> + 'a {
        self.members.iter().filter(move |member| member.role() == role)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.members_with_role(role).next().is_some()
    }
}

/// Kind of the element a member points at. A missing or unrecognised `"type"` becomes
/// `Unknown` so the relation is still validated and reported.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Node,
    Way,
    Relation,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Node => "node",
            MemberKind::Way => "way",
            MemberKind::Relation => "relation",
            MemberKind::Unknown => "None",
        }
    }
}

/// A weak reference from a relation to another element. The referenced element may be
/// missing from the fetched data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Member {
    #[serde(rename = "type", default)]
    pub kind: MemberKind,
    #[serde(rename = "ref", default)]
    pub reference: OsmId,
    /// `None` when the record has no role at all, as opposed to an empty one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Member {
    pub fn new(kind: MemberKind, reference: OsmId, role: &str) -> Member {
        Member {
            kind,
            reference,
            role: Some(role.to_string()),
        }
    }

    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Osm3s {
    #[serde(default)]
    pub timestamp_osm_base: Option<String>,
}

/// Raw payload returned by the Overpass API.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct OverpassResponse {
    #[serde(default)]
    pub osm3s: Option<Osm3s>,
    pub elements: Vec<Element>,
}

impl OverpassResponse {
    pub fn timestamp(&self) -> Option<&str> {
        self.osm3s.as_ref()?.timestamp_osm_base.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_overpass_payload() {
        let raw = r#"{
            "version": 0.6,
            "osm3s": {"timestamp_osm_base": "2024-05-01T10:00:00Z", "copyright": "ODbL"},
            "elements": [
                {"type": "relation", "id": 123,
                 "members": [{"type": "way", "ref": 1, "role": "from"},
                             {"type": "node", "ref": 3, "role": "via"}],
                 "tags": {"type": "restriction", "restriction": "no_left_turn"}},
                {"type": "way", "id": 1, "nodes": [3, 4], "tags": {"oneway": "-1"}},
                {"type": "node", "id": 3, "lat": 52.5, "lon": 13.4}
            ]
        }"#;

        let response: OverpassResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.timestamp(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(response.elements.len(), 3);

        let Element::Relation(relation) = &response.elements[0] else {
            panic!("expected a relation");
        };
        assert_eq!(relation.members[0].kind, MemberKind::Way);
        assert_eq!(relation.members[1].reference, 3);
        assert!(relation.has_role("via"));
        assert!(!relation.has_role("to"));
        let keys: Vec<&str> = relation.tags.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["type", "restriction"]);

        assert_eq!(response.elements[1].as_way().map(|way| way.nodes.clone()), Some(vec![3, 4]));
        assert_eq!(
            response.elements[2],
            Element::Node(Node { id: 3, lat: Some(52.5), lon: Some(13.4), tags: Tags::new() })
        );
    }

    #[test]
    fn missing_discriminator_is_rejected() {
        let raw = r#"{"elements": [{"id": 1, "lat": 1.0, "lon": 2.0}]}"#;
        assert!(serde_json::from_str::<OverpassResponse>(raw).is_err());
    }

    #[test]
    fn unknown_discriminator_is_rejected() {
        let raw = r#"{"elements": [{"type": "area", "id": 1}]}"#;
        assert!(serde_json::from_str::<OverpassResponse>(raw).is_err());
    }

    #[test]
    fn member_defaults() {
        let member: Member = serde_json::from_str(r#"{"type": "way"}"#).unwrap();
        assert_eq!(member.reference, 0);
        assert_eq!(member.role, None);
        assert_eq!(member.role(), "");

        let member: Member = serde_json::from_str(r#"{"type": "way", "role": ""}"#).unwrap();
        assert_eq!(member.role, Some(String::new()));
    }

    #[test]
    fn tolerates_missing_or_unknown_member_kind() {
        let raw = r#"{"elements": [
            {"type": "relation", "id": 1,
             "members": [{"ref": 5, "role": "from"}, {"type": "area", "ref": 6, "role": "to"}]},
            {"type": "relation", "id": 2, "members": []}
        ]}"#;

        let response: OverpassResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.elements.len(), 2);
        let Element::Relation(relation) = &response.elements[0] else {
            panic!("expected a relation");
        };
        assert_eq!(relation.members[0].kind, MemberKind::Unknown);
        assert_eq!(relation.members[1].kind, MemberKind::Unknown);
        assert_eq!(relation.members[1].reference, 6);
    }
}
