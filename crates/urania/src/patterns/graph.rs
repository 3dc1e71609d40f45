//! Aspect graph: nodes are points, edges are accepted aspects.

use crate::aspects::{Aspect, AspectKind};
use crate::points::Point;

/// Indexed adjacency over a sorted aspect list. Every edge stores the index
/// of its aspect in that list, so detected patterns can cite it.
#[derive(Debug, Clone)]
pub struct AspectGraph<'a> {
    aspects: &'a [Aspect],
    nodes: Vec<Point>,
    adjacency: Vec<Vec<Option<usize>>>,
}

impl<'a> AspectGraph<'a> {
    /// `nodes` may be given in any order; they are kept in point order.
    pub fn new(nodes: &[Point], aspects: &'a [Aspect]) -> Self {
        let mut nodes = nodes.to_vec();
        nodes.sort();
        nodes.dedup();
        let n = nodes.len();
        let mut adjacency = vec![vec![None; n]; n];
        for (index, aspect) in aspects.iter().enumerate() {
            let (Ok(i), Ok(j)) = (nodes.binary_search(&aspect.a), nodes.binary_search(&aspect.b))
            else {
                log::debug!(
                    "Aspect {}-{} references a point outside the graph",
                    aspect.a,
                    aspect.b
                );
                continue;
            };
            adjacency[i][j] = Some(index);
            adjacency[j][i] = Some(index);
        }
        Self {
            aspects,
            nodes,
            adjacency,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, i: usize) -> Point {
        self.nodes[i]
    }

    pub fn index_of(&self, point: Point) -> Option<usize> {
        self.nodes.binary_search(&point).ok()
    }

    pub fn aspects(&self) -> &'a [Aspect] {
        self.aspects
    }

    /// Aspect index of the edge between nodes `i` and `j`.
    pub fn edge(&self, i: usize, j: usize) -> Option<usize> {
        self.adjacency[i][j]
    }

    /// Aspect index of the edge if it has the given kind.
    pub fn edge_of(&self, i: usize, j: usize, kind: AspectKind) -> Option<usize> {
        self.edge(i, j)
            .filter(|&index| self.aspects[index].kind == kind)
    }

    pub fn has(&self, i: usize, j: usize, kind: AspectKind) -> bool {
        self.edge_of(i, j, kind).is_some()
    }

    /// Edges of one kind as node-index pairs `(i, j)` with `i < j`.
    pub fn edges_of(&self, kind: AspectKind) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for i in 0..self.len() {
            for j in (i + 1)..self.len() {
                if self.has(i, j, kind) {
                    edges.push((i, j));
                }
            }
        }
        edges
    }

    /// Aspect indices of every `kind` edge among `members`, sorted.
    pub fn edges_among(&self, members: &[usize], kind: AspectKind) -> Vec<usize> {
        let mut cited = Vec::new();
        for (pos, &i) in members.iter().enumerate() {
            for &j in &members[pos + 1..] {
                if let Some(index) = self.edge_of(i, j, kind) {
                    cited.push(index);
                }
            }
        }
        cited.sort_unstable();
        cited
    }

    /// Maximal cliques along edges of `kind`, each sorted, in lexicographic order.
    pub fn maximal_cliques(&self, kind: AspectKind) -> Vec<Vec<usize>> {
        let mut cliques = Vec::new();
        let candidates: Vec<usize> = (0..self.len()).collect();
        self.bron_kerbosch(kind, &mut Vec::new(), candidates, Vec::new(), &mut cliques);
        for clique in cliques.iter_mut() {
            clique.sort_unstable();
        }
        cliques.sort();
        cliques
    }

    fn bron_kerbosch(
        &self,
        kind: AspectKind,
        current: &mut Vec<usize>,
        candidates: Vec<usize>,
        excluded: Vec<usize>,
        out: &mut Vec<Vec<usize>>,
    ) {
        if candidates.is_empty() {
            if excluded.is_empty() {
                out.push(current.clone());
            }
            return;
        }
        // Pivot on the vertex with the most neighbours among the candidates
        let pivot = candidates
            .iter()
            .chain(excluded.iter())
            .copied()
            .max_by_key(|&u| candidates.iter().filter(|&&v| self.has(u, v, kind)).count())
            .unwrap_or(candidates[0]);

        let mut candidates = candidates;
        let mut excluded = excluded;
        let branch: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&v| !self.has(pivot, v, kind))
            .collect();
        for v in branch {
            let next_candidates = candidates
                .iter()
                .copied()
                .filter(|&u| self.has(v, u, kind))
                .collect();
            let next_excluded = excluded
                .iter()
                .copied()
                .filter(|&u| self.has(v, u, kind))
                .collect();
            current.push(v);
            self.bron_kerbosch(kind, current, next_candidates, next_excluded, out);
            current.pop();
            candidates.retain(|&u| u != v);
            excluded.push(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aspect(a: Point, b: Point, kind: AspectKind) -> Aspect {
        Aspect {
            a,
            b,
            kind,
            exact_angle: 0.0,
            separation: 0.0,
            orb: 0.0,
            max_orb: 8.0,
            score: 1.0,
            applying: None,
            exact: true,
            structural: false,
        }
    }

    #[test]
    fn test_edges_keep_aspect_index() {
        let aspects = vec![
            aspect(Point::Sun, Point::Moon, AspectKind::Trine),
            aspect(Point::Moon, Point::Mars, AspectKind::Square),
        ];
        let graph = AspectGraph::new(&[Point::Mars, Point::Sun, Point::Moon], &aspects);
        let sun = graph.index_of(Point::Sun).unwrap();
        let moon = graph.index_of(Point::Moon).unwrap();
        let mars = graph.index_of(Point::Mars).unwrap();
        assert_eq!(graph.edge(moon, sun), Some(0));
        assert_eq!(graph.edge_of(moon, mars, AspectKind::Square), Some(1));
        assert!(!graph.has(sun, mars, AspectKind::Square));
    }

    #[test]
    fn test_maximal_cliques() {
        use AspectKind::Conjunction as C;
        // Sun-Moon-Mercury triangle plus a Mercury-Venus edge
        let aspects = vec![
            aspect(Point::Sun, Point::Moon, C),
            aspect(Point::Sun, Point::Mercury, C),
            aspect(Point::Moon, Point::Mercury, C),
            aspect(Point::Mercury, Point::Venus, C),
        ];
        let nodes = [Point::Sun, Point::Moon, Point::Mercury, Point::Venus];
        let graph = AspectGraph::new(&nodes, &aspects);
        let cliques = graph.maximal_cliques(C);
        assert_eq!(cliques, vec![vec![0, 1, 2], vec![2, 3]]);
    }
}
