use std::collections::HashMap;

use self::osm::{Element, Node, OsmId, Relation, Way};

pub mod osm;
pub mod validated;

/// Lookup tables over one fetch of map data. Nothing is validated here, missing or duplicated
/// ids are left for the rules to report.
#[derive(Debug, Default, Clone)]
pub struct ElementGraph<'a> {
    pub elements: HashMap<OsmId, &'a Element>,
    pub relations: Vec<&'a Relation>,
    pub nodes: HashMap<OsmId, &'a Node>,
}

impl<'a> ElementGraph<'a> {
    pub fn build(elements: &'a [Element]) -> ElementGraph<'a> {
        let mut graph = ElementGraph {
            elements: HashMap::with_capacity(elements.len()),
            relations: Vec::new(),
            nodes: HashMap::new(),
        };

        for element in elements {
            graph.elements.insert(element.id(), element);
            match element {
                Element::Relation(relation) => graph.relations.push(relation),
                Element::Node(node) => {
                    graph.nodes.insert(node.id, node);
                }
                Element::Way(_) => (),
            }
        }

        graph
    }

    pub fn contains(&self, id: OsmId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn way(&self, id: OsmId) -> Option<&'a Way> {
        self.elements.get(&id).and_then(|element| element.as_way())
    }

    pub fn node(&self, id: OsmId) -> Option<&'a Node> {
        self.nodes.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::osm::{Member, MemberKind, Tags};

    fn node(id: OsmId, lat: f64) -> Element {
        Element::Node(Node { id, lat: Some(lat), lon: Some(0.0), tags: Tags::new() })
    }

    fn relation(id: OsmId) -> Element {
        Element::Relation(Relation {
            id,
            members: vec![Member::new(MemberKind::Way, 1, "from")],
            tags: Tags::new(),
        })
    }

    #[test]
    fn indexes_by_kind_and_keeps_relation_order() {
        let elements = vec![
            relation(20),
            node(3, 1.0),
            Element::Way(Way { id: 1, nodes: vec![3], tags: Tags::new() }),
            relation(10),
        ];
        let graph = ElementGraph::build(&elements);

        assert_eq!(graph.elements.len(), 4);
        assert_eq!(graph.relations.iter().map(|r| r.id).collect::<Vec<_>>(), vec![20, 10]);
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.way(1).is_some());
        assert!(graph.way(3).is_none());
        assert!(graph.node(1).is_none());
        assert!(graph.contains(10));
        assert!(!graph.contains(99));
    }

    #[test]
    fn duplicate_ids_last_write_wins() {
        let elements = vec![node(3, 1.0), node(3, 2.0)];
        let graph = ElementGraph::build(&elements);

        assert_eq!(graph.elements.len(), 1);
        assert_eq!(graph.node(3).and_then(|n| n.lat), Some(2.0));
    }

    #[test]
    fn empty_input() {
        let graph = ElementGraph::build(&[]);
        assert!(graph.elements.is_empty());
        assert!(graph.relations.is_empty());
    }
}
