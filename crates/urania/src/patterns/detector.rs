use crate::aspects::AspectKind;
use crate::houses::PointHouse;
use crate::patterns::graph::AspectGraph;
use crate::points::Point;
use crate::zodiac::{Sign, SystemPlacements, ZodiacSystem};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    ConjunctionCluster,
    GrandTrine,
    TSquare,
    GrandCross,
    Yod,
    Kite,
    SignStellium,
    HouseStellium,
}

/// A multi-point configuration justified by existing aspects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectPattern {
    pub kind: PatternKind,
    pub participants: Vec<Point>,
    /// Indices into the chart's sorted aspect list
    pub aspects: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<ZodiacSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<Sign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
}

impl AspectPattern {
    fn new(kind: PatternKind, participants: Vec<Point>, aspects: Vec<usize>) -> Self {
        Self {
            kind,
            participants,
            aspects,
            system: None,
            sign: None,
            house: None,
        }
    }
}

/// Queries an [`AspectGraph`] for named configurations.
pub struct PatternDetector<'g, 'a> {
    graph: &'g AspectGraph<'a>,
    min_stellium: usize,
}

impl<'g, 'a> PatternDetector<'g, 'a> {
    pub fn new(graph: &'g AspectGraph<'a>, min_stellium: usize) -> Self {
        Self {
            graph,
            min_stellium: min_stellium.max(3),
        }
    }

    /// Every aspect configuration, grouped by kind.
    pub fn detect(&self) -> Vec<AspectPattern> {
        let mut patterns = Vec::new();
        patterns.extend(self.conjunction_clusters());
        patterns.extend(self.grand_trines());
        patterns.extend(self.t_squares());
        patterns.extend(self.grand_crosses());
        patterns.extend(self.yods());
        patterns.extend(self.kites());
        log::debug!("Detected {} aspect patterns", patterns.len());
        patterns
    }

    fn points(&self, members: &[usize]) -> Vec<Point> {
        members.iter().map(|&i| self.graph.node(i)).collect()
    }

    fn cite(&self, edges: &[Option<usize>]) -> Option<Vec<usize>> {
        let mut cited: Vec<usize> = edges.iter().copied().collect::<Option<Vec<_>>>()?;
        cited.sort_unstable();
        Some(cited)
    }

    pub fn conjunction_clusters(&self) -> Vec<AspectPattern> {
        self.graph
            .maximal_cliques(AspectKind::Conjunction)
            .into_iter()
            .filter(|clique| clique.len() >= 3)
            .map(|clique| {
                AspectPattern::new(
                    PatternKind::ConjunctionCluster,
                    self.points(&clique),
                    self.graph.edges_among(&clique, AspectKind::Conjunction),
                )
            })
            .collect()
    }

    fn trine_triangles(&self) -> Vec<([usize; 3], Vec<usize>)> {
        let g = self.graph;
        let mut found = Vec::new();
        for (i, j) in g.edges_of(AspectKind::Trine) {
            for k in (j + 1)..g.len() {
                let edges = [
                    g.edge_of(i, j, AspectKind::Trine),
                    g.edge_of(i, k, AspectKind::Trine),
                    g.edge_of(j, k, AspectKind::Trine),
                ];
                if let Some(cited) = self.cite(&edges) {
                    found.push(([i, j, k], cited));
                }
            }
        }
        found
    }

    pub fn grand_trines(&self) -> Vec<AspectPattern> {
        self.trine_triangles()
            .into_iter()
            .map(|(members, cited)| {
                AspectPattern::new(PatternKind::GrandTrine, self.points(&members), cited)
            })
            .collect()
    }

    /// Opposition ends first, apex last.
    pub fn t_squares(&self) -> Vec<AspectPattern> {
        let g = self.graph;
        let mut patterns = Vec::new();
        for (i, j) in g.edges_of(AspectKind::Opposition) {
            for k in 0..g.len() {
                if k == i || k == j {
                    continue;
                }
                let edges = [
                    g.edge_of(i, j, AspectKind::Opposition),
                    g.edge_of(i, k, AspectKind::Square),
                    g.edge_of(j, k, AspectKind::Square),
                ];
                if let Some(cited) = self.cite(&edges) {
                    patterns.push(AspectPattern::new(
                        PatternKind::TSquare,
                        self.points(&[i, j, k]),
                        cited,
                    ));
                }
            }
        }
        patterns
    }

    pub fn grand_crosses(&self) -> Vec<AspectPattern> {
        let g = self.graph;
        let oppositions = g.edges_of(AspectKind::Opposition);
        let mut patterns = Vec::new();
        for (n, &(i, j)) in oppositions.iter().enumerate() {
            for &(k, l) in &oppositions[n + 1..] {
                if k == i || k == j || l == i || l == j {
                    continue;
                }
                let edges = [
                    g.edge_of(i, j, AspectKind::Opposition),
                    g.edge_of(k, l, AspectKind::Opposition),
                    g.edge_of(i, k, AspectKind::Square),
                    g.edge_of(i, l, AspectKind::Square),
                    g.edge_of(j, k, AspectKind::Square),
                    g.edge_of(j, l, AspectKind::Square),
                ];
                if let Some(cited) = self.cite(&edges) {
                    patterns.push(AspectPattern::new(
                        PatternKind::GrandCross,
                        self.points(&[i, j, k, l]),
                        cited,
                    ));
                }
            }
        }
        patterns
    }

    /// Sextile base first, apex last.
    pub fn yods(&self) -> Vec<AspectPattern> {
        let g = self.graph;
        let mut patterns = Vec::new();
        for (i, j) in g.edges_of(AspectKind::Sextile) {
            for k in 0..g.len() {
                if k == i || k == j {
                    continue;
                }
                let edges = [
                    g.edge_of(i, j, AspectKind::Sextile),
                    g.edge_of(i, k, AspectKind::Quincunx),
                    g.edge_of(j, k, AspectKind::Quincunx),
                ];
                if let Some(cited) = self.cite(&edges) {
                    patterns.push(AspectPattern::new(
                        PatternKind::Yod,
                        self.points(&[i, j, k]),
                        cited,
                    ));
                }
            }
        }
        patterns
    }

    /// Grand trine vertices first, then the point opposite one of them.
    pub fn kites(&self) -> Vec<AspectPattern> {
        let g = self.graph;
        let mut patterns = Vec::new();
        for (triangle, trine_edges) in self.trine_triangles() {
            for w in 0..g.len() {
                if triangle.contains(&w) {
                    continue;
                }
                for (pos, &vertex) in triangle.iter().enumerate() {
                    let others: Vec<usize> = triangle
                        .iter()
                        .enumerate()
                        .filter(|(p, _)| *p != pos)
                        .map(|(_, &v)| v)
                        .collect();
                    let edges = [
                        g.edge_of(w, vertex, AspectKind::Opposition),
                        g.edge_of(w, others[0], AspectKind::Sextile),
                        g.edge_of(w, others[1], AspectKind::Sextile),
                    ];
                    if let Some(extra) = self.cite(&edges) {
                        let mut cited = trine_edges.clone();
                        cited.extend(extra);
                        cited.sort_unstable();
                        let mut members = triangle.to_vec();
                        members.push(w);
                        patterns.push(AspectPattern::new(
                            PatternKind::Kite,
                            self.points(&members),
                            cited,
                        ));
                    }
                }
            }
        }
        patterns
    }

    /// Bodies sharing a sign under one table. Angles never count.
    pub fn sign_stelliums(&self, placements: &SystemPlacements) -> Vec<AspectPattern> {
        let mut groups: BTreeMap<usize, (Sign, Vec<Point>)> = BTreeMap::new();
        for p in placements.placements.iter().filter(|p| !p.point.is_angle()) {
            groups
                .entry(p.sign_index)
                .or_insert_with(|| (p.sign, Vec::new()))
                .1
                .push(p.point);
        }
        groups
            .into_values()
            .filter(|(_, members)| members.len() >= self.min_stellium)
            .map(|(sign, members)| {
                let mut pattern = self.stellium(PatternKind::SignStellium, members);
                pattern.system = Some(placements.system);
                pattern.sign = Some(sign);
                pattern
            })
            .collect()
    }

    /// Bodies sharing a house.
    pub fn house_stelliums(&self, point_houses: &[PointHouse]) -> Vec<AspectPattern> {
        let mut groups: BTreeMap<u8, Vec<Point>> = BTreeMap::new();
        for h in point_houses.iter().filter(|h| !h.point.is_angle()) {
            groups.entry(h.house).or_default().push(h.point);
        }
        groups
            .into_iter()
            .filter(|(_, members)| members.len() >= self.min_stellium)
            .map(|(house, members)| {
                let mut pattern = self.stellium(PatternKind::HouseStellium, members);
                pattern.house = Some(house);
                pattern
            })
            .collect()
    }

    /// Stelliums cite whichever conjunctions exist among their members.
    fn stellium(&self, kind: PatternKind, mut members: Vec<Point>) -> AspectPattern {
        members.sort();
        let indices: Vec<usize> = members
            .iter()
            .filter_map(|p| self.graph.index_of(*p))
            .collect();
        let cited = self.graph.edges_among(&indices, AspectKind::Conjunction);
        AspectPattern::new(kind, members, cited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::Aspect;

    fn aspect(a: Point, b: Point, kind: AspectKind) -> Aspect {
        Aspect {
            a,
            b,
            kind,
            exact_angle: 0.0,
            separation: 0.0,
            orb: 1.0,
            max_orb: 8.0,
            score: 10.0,
            applying: Some(true),
            exact: false,
            structural: false,
        }
    }

    const NODES: [Point; 6] = [
        Point::Sun,
        Point::Moon,
        Point::Mercury,
        Point::Venus,
        Point::Mars,
        Point::Jupiter,
    ];

    #[test]
    fn test_t_square_cites_three_aspects() {
        let aspects = vec![
            aspect(Point::Sun, Point::Moon, AspectKind::Opposition),
            aspect(Point::Sun, Point::Mars, AspectKind::Square),
            aspect(Point::Moon, Point::Mars, AspectKind::Square),
        ];
        let graph = AspectGraph::new(&NODES, &aspects);
        let patterns = PatternDetector::new(&graph, 3).t_squares();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].participants, vec![Point::Sun, Point::Moon, Point::Mars]);
        assert_eq!(patterns[0].aspects, vec![0, 1, 2]);
    }

    #[test]
    fn test_missing_edge_blocks_pattern() {
        let aspects = vec![
            aspect(Point::Sun, Point::Moon, AspectKind::Trine),
            aspect(Point::Sun, Point::Mars, AspectKind::Trine),
            aspect(Point::Moon, Point::Mars, AspectKind::Sextile),
        ];
        let graph = AspectGraph::new(&NODES, &aspects);
        assert!(PatternDetector::new(&graph, 3).grand_trines().is_empty());
    }

    #[test]
    fn test_kite() {
        let aspects = vec![
            aspect(Point::Sun, Point::Moon, AspectKind::Trine),
            aspect(Point::Sun, Point::Mars, AspectKind::Trine),
            aspect(Point::Moon, Point::Mars, AspectKind::Trine),
            aspect(Point::Sun, Point::Jupiter, AspectKind::Opposition),
            aspect(Point::Moon, Point::Jupiter, AspectKind::Sextile),
            aspect(Point::Mars, Point::Jupiter, AspectKind::Sextile),
        ];
        let graph = AspectGraph::new(&NODES, &aspects);
        let detector = PatternDetector::new(&graph, 3);
        let kites = detector.kites();
        assert_eq!(kites.len(), 1);
        assert_eq!(
            kites[0].participants,
            vec![Point::Sun, Point::Moon, Point::Mars, Point::Jupiter]
        );
        assert_eq!(kites[0].aspects, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(detector.grand_trines().len(), 1);
    }

    #[test]
    fn test_yod_apex_last() {
        let aspects = vec![
            aspect(Point::Moon, Point::Venus, AspectKind::Sextile),
            aspect(Point::Moon, Point::Sun, AspectKind::Quincunx),
            aspect(Point::Venus, Point::Sun, AspectKind::Quincunx),
        ];
        let graph = AspectGraph::new(&NODES, &aspects);
        let yods = PatternDetector::new(&graph, 3).yods();
        assert_eq!(yods.len(), 1);
        assert_eq!(yods[0].participants, vec![Point::Moon, Point::Venus, Point::Sun]);
    }
}
