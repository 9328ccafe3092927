use crate::data::{
    osm::{Member, MemberKind, Node, OsmId},
    validated::Coordinates,
    ElementGraph,
};

/// Best-effort display position of a restriction.
///
/// Tries, in order: the first "via" member as a node, the first node of the first "via"
/// member as a way, then the last node of the first resolvable "from" way.
pub fn derive_location(members: &[Member], graph: &ElementGraph) -> Option<Coordinates> {
    via_location(members, graph).or_else(|| from_location(members, graph))
}

fn via_location(members: &[Member], graph: &ElementGraph) -> Option<Coordinates> {
    let via = members.iter().find(|member| member.role() == "via")?;
    match via.kind {
        MemberKind::Node => node_coordinates(graph, via.reference),
        MemberKind::Way => {
            let way = graph.way(via.reference)?;
            node_coordinates(graph, *way.nodes.first()?)
        }
        MemberKind::Relation | MemberKind::Unknown => None,
    }
}

fn from_location(members: &[Member], graph: &ElementGraph) -> Option<Coordinates> {
    let way = members
        .iter()
        .filter(|member| member.role() == "from")
        .find_map(|member| graph.way(member.reference))?;
    node_coordinates(graph, *way.nodes.last()?)
}

fn node_coordinates(graph: &ElementGraph, id: OsmId) -> Option<Coordinates> {
    match graph.node(id)? {
        Node { lat: Some(lat), lon: Some(lon), .. } => Some(Coordinates { lat: *lat, lon: *lon }),
        _ => None,
    }
}
