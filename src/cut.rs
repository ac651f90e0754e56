use pathfinding::directed::bfs::bfs_reach;
use pathfinding::directed::edmonds_karp::edmonds_karp_sparse;
use pathfinding::undirected::connected_components::connected_components as group_components;
use petgraph::graph::NodeIndex;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info};

use crate::error::GraphError;
use crate::wires::WireGraph;

type Wire = ((NodeIndex, NodeIndex), i64);

/// A minimum edge cut and the two sides it separates.
///
/// `edges` are oriented from the source side to the sink side and sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cut {
    pub value: i64,
    pub source_side: BTreeSet<String>,
    pub sink_side: BTreeSet<String>,
    pub edges: Vec<(String, String)>,
}

impl Cut {
    pub fn product(&self) -> usize {
        self.source_side.len() * self.sink_side.len()
    }
}

struct Flow {
    value: i64,
    source_side: HashSet<NodeIndex>,
}

// each wire is usable in both directions
fn arcs(wires: &WireGraph) -> Vec<Wire> {
    wires
        .edges()
        .flat_map(|(a, b, capacity)| [((a, b), capacity), ((b, a), capacity)])
        .collect()
}

fn max_flow(
    wires: &WireGraph,
    nodes: &[NodeIndex],
    arcs: &[Wire],
    source: NodeIndex,
    sink: NodeIndex,
) -> Flow {
    let flows = edmonds_karp_sparse(nodes, &source, &sink, arcs.iter().copied());
    let mut residual: HashMap<(NodeIndex, NodeIndex), i64> = arcs.iter().copied().collect();
    for ((a, b), flow) in flows.0 {
        *residual.entry((a, b)).or_default() -= flow;
        *residual.entry((b, a)).or_default() += flow;
    }
    // nodes still reachable from the source once the flow saturates the cut
    let source_side = bfs_reach(source, |&a| {
        wires
            .neighbors(a)
            .filter(|&b| residual.get(&(a, b)).is_some_and(|&r| r > 0))
            .collect::<Vec<_>>()
    })
    .collect();
    Flow {
        value: flows.1,
        source_side,
    }
}

fn into_cut(wires: &WireGraph, flow: Flow) -> Cut {
    let mut source_side = BTreeSet::new();
    let mut sink_side = BTreeSet::new();
    for node in wires.nodes() {
        let name = wires.name(node).to_owned();
        if flow.source_side.contains(&node) {
            source_side.insert(name);
        } else {
            sink_side.insert(name);
        }
    }
    let mut edges: Vec<(String, String)> = wires
        .edges()
        .filter_map(|(a, b, _)| {
            match (flow.source_side.contains(&a), flow.source_side.contains(&b)) {
                (true, false) => Some((a, b)),
                (false, true) => Some((b, a)),
                _ => None,
            }
        })
        .map(|(a, b)| (wires.name(a).to_owned(), wires.name(b).to_owned()))
        .collect();
    edges.sort();
    Cut {
        value: flow.value,
        source_side,
        sink_side,
        edges,
    }
}

/// Minimum cut separating `source` from `sink`.
///
/// The source side is the smallest one any minimum cut can give: the nodes still reachable from
/// `source` in the residual graph of a maximum flow.
pub fn minimum_cut(wires: &WireGraph, source: &str, sink: &str) -> Result<Cut, GraphError> {
    let s = wires
        .node_index(source)
        .ok_or_else(|| GraphError::UnknownNode(source.to_owned()))?;
    let t = wires
        .node_index(sink)
        .ok_or_else(|| GraphError::UnknownNode(sink.to_owned()))?;
    if s == t {
        return Err(GraphError::SameTerminal(source.to_owned()));
    }
    let nodes: Vec<NodeIndex> = wires.nodes().collect();
    let flow = max_flow(wires, &nodes, &arcs(wires), s, t);
    debug!(source, sink, value = flow.value, "terminal cut");
    Ok(into_cut(wires, flow))
}

/// Fewest wires whose removal disconnects the graph, with no terminals fixed.
///
/// Any global cut separates the minimum-degree node from some other node, so the answer is the
/// smallest cut between that node and each of the others. A disconnected graph gives an empty cut.
pub fn minimum_edge_cut(wires: &WireGraph) -> Result<Cut, GraphError> {
    let nodes: Vec<NodeIndex> = wires.nodes().collect();
    if nodes.len() < 2 {
        return Err(GraphError::TooSmall(nodes.len()));
    }
    let Some(&start) = nodes.iter().min_by_key(|&&n| (wires.degree(n), n)) else {
        return Err(GraphError::TooSmall(0));
    };
    let arcs = arcs(wires);
    let mut best: Option<Flow> = None;
    for &target in &nodes {
        if target == start {
            continue;
        }
        let flow = max_flow(wires, &nodes, &arcs, start, target);
        if best.as_ref().map_or(true, |b| flow.value < b.value) {
            let disconnected = flow.value == 0;
            best = Some(flow);
            if disconnected {
                break;
            }
        }
    }
    let flow = best.ok_or(GraphError::TooSmall(nodes.len()))?;
    debug!(
        start = wires.name(start),
        value = flow.value,
        "global minimum edge cut"
    );
    Ok(into_cut(wires, flow))
}

/// Components largest first, ties broken by their sorted names.
pub fn connected_components(wires: &WireGraph) -> Vec<BTreeSet<String>> {
    let nodes: Vec<NodeIndex> = wires.nodes().collect();
    let mut components: Vec<BTreeSet<String>> =
        group_components(&nodes, |&n| wires.neighbors(n).collect::<Vec<_>>())
            .into_iter()
            .map(|group| group.into_iter().map(|n| wires.name(n).to_owned()).collect())
            .collect();
    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    components
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub cut: Cut,
    pub components: Vec<BTreeSet<String>>,
}

impl Partition {
    pub fn sizes(&self) -> Vec<usize> {
        self.components.iter().map(BTreeSet::len).collect()
    }
    pub fn product(&self) -> Result<usize, GraphError> {
        match self.sizes().as_slice() {
            [a, b] => Ok(a * b),
            other => Err(GraphError::ComponentCount(other.len())),
        }
    }
}

/// Removes the global minimum edge cut from `wires` and groups what is left.
pub fn split(mut wires: WireGraph) -> Result<Partition, GraphError> {
    let cut = minimum_edge_cut(&wires)?;
    for (a, b) in &cut.edges {
        wires.remove_edge(a, b);
    }
    let components = connected_components(&wires);
    info!(
        cut = cut.value,
        components = components.len(),
        "split on global minimum cut"
    );
    Ok(Partition { cut, components })
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    const SAMPLE: &str = "jqt: rhn xhk nvd
rsh: frs pzl lsr
xhk: hfx
cmg: qnr nvd lhk bvb
rhn: xhk bvb hfx
bvb: xhk hfx
pzl: lsr hfx nvd
qnr: nvd
ntq: jqt hfx bvb xhk
nvd: lhk
lsr: lhk
rzs: qnr cmg lsr rsh
frs: qnr lhk lsr";

    const TRIANGLES: &str = "a: b c\nb: c\nc: d\nd: e f\ne: f";

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn unordered(edges: &[(String, String)]) -> BTreeSet<BTreeSet<String>> {
        edges
            .iter()
            .map(|(a, b)| names(&[a.as_str(), b.as_str()]))
            .collect()
    }

    #[test]
    fn test_triangles_cut_at_bridge() {
        let wires = WireGraph::parse(TRIANGLES).unwrap();
        let cut = minimum_cut(&wires, "a", "f").unwrap();
        assert_eq!(cut.value, 1);
        assert_eq!(cut.source_side, names(&["a", "b", "c"]));
        assert_eq!(cut.sink_side, names(&["d", "e", "f"]));
        assert_eq!(cut.edges, [("c".to_string(), "d".to_string())]);
        assert_eq!(cut.product(), 9);
    }

    #[test]
    fn test_terminal_cut_on_sample() {
        let wires = WireGraph::parse(SAMPLE).unwrap();
        let cut = minimum_cut(&wires, "xhk", "lhk").unwrap();
        assert_eq!(cut.value, 3);
        assert_eq!(
            cut.source_side,
            names(&["bvb", "hfx", "jqt", "ntq", "rhn", "xhk"])
        );
        assert_eq!(cut.sink_side.len(), 9);
        assert_eq!(cut.product(), 54);
        assert_eq!(
            cut.edges,
            [
                ("bvb".to_string(), "cmg".to_string()),
                ("hfx".to_string(), "pzl".to_string()),
                ("jqt".to_string(), "nvd".to_string()),
            ]
        );
    }

    #[test]
    fn test_terminal_errors() {
        let wires = WireGraph::parse(TRIANGLES).unwrap();
        assert_eq!(
            minimum_cut(&wires, "a", "zsj"),
            Err(GraphError::UnknownNode("zsj".to_owned()))
        );
        assert_eq!(
            minimum_cut(&wires, "b", "b"),
            Err(GraphError::SameTerminal("b".to_owned()))
        );
    }

    #[test]
    fn test_global_cut_on_sample() {
        let wires = WireGraph::parse(SAMPLE).unwrap();
        let cut = minimum_edge_cut(&wires).unwrap();
        assert_eq!(cut.value, 3);
        assert_eq!(
            unordered(&cut.edges),
            [["bvb", "cmg"], ["hfx", "pzl"], ["jqt", "nvd"]]
                .iter()
                .map(|pair| names(pair))
                .collect::<BTreeSet<_>>()
        );
        let partition = split(wires).unwrap();
        assert_eq!(partition.sizes(), [9, 6]);
        assert_eq!(partition.product(), Ok(54));
    }

    #[test]
    fn test_split_increases_component_count() {
        let wires = WireGraph::parse(TRIANGLES).unwrap();
        assert_eq!(connected_components(&wires).len(), 1);
        let partition = split(wires).unwrap();
        assert_eq!(
            partition.components,
            [names(&["a", "b", "c"]), names(&["d", "e", "f"])]
        );
    }

    #[test]
    fn test_disconnected_graph_has_empty_cut() {
        let wires = WireGraph::parse("a: b\nc: d").unwrap();
        let partition = split(wires).unwrap();
        assert_eq!(partition.cut.value, 0);
        assert!(partition.cut.edges.is_empty());
        assert_eq!(partition.product(), Ok(4));
    }

    #[test]
    fn test_more_than_two_components() {
        let wires = WireGraph::parse("a: b\nc: d\ne: f").unwrap();
        let partition = split(wires).unwrap();
        assert_eq!(partition.product(), Err(GraphError::ComponentCount(3)));
    }

    #[test]
    fn test_single_node_cannot_be_cut() {
        let wires = WireGraph::parse("a: a").unwrap();
        assert_eq!(minimum_edge_cut(&wires), Err(GraphError::TooSmall(1)));
    }

    fn generate_clusters(seed: u64) -> (WireGraph, usize, usize, usize) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let left = rng.gen_range(5..10);
        let right = rng.gen_range(5..10);
        let bridges = rng.gen_range(1..=3);
        let mut wires = WireGraph::new();
        for (prefix, size) in [("l", left), ("r", right)] {
            for i in 0..size {
                for j in i + 1..size {
                    wires.add_edge(&format!("{prefix}{i}"), &format!("{prefix}{j}"));
                }
            }
        }
        let offset = rng.gen_range(0..right);
        for i in 0..bridges {
            wires.add_edge(&format!("l{i}"), &format!("r{}", (offset + i) % right));
        }
        (wires, left, right, bridges)
    }

    #[test]
    fn test_random_clusters_split_at_bridges() {
        for seed in 0..20 {
            let (wires, left, right, bridges) = generate_clusters(seed);
            let terminal = minimum_cut(&wires, "l0", "r0").unwrap();
            assert_eq!(terminal.value, bridges as i64);
            assert_eq!(terminal.product(), left * right);

            let partition = split(wires).unwrap();
            assert_eq!(partition.cut.value, bridges as i64);
            assert_eq!(partition.cut.edges.len(), bridges);
            let mut sizes = partition.sizes();
            sizes.sort();
            assert_eq!(sizes, [left.min(right), left.max(right)]);
            assert_eq!(partition.product(), Ok(left * right));
        }
    }
}
