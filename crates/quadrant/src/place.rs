use crate::geom::{self, Point};
use crate::rings::RingTable;
use crate::tool::{Category, Tool};
use std::f64::consts::FRAC_PI_2;
use strum::IntoEnumIterator;

/// One quarter turn; every placement lands inside it.
pub const QUADRANT_SWEEP: f64 = FRAC_PI_2;
/// Dots stay inside the middle 30%..70% band of their ring's span so they
/// never collide with ring edges or labels.
pub const RADIAL_BAND_START: f64 = 0.3;
pub const RADIAL_BAND_WIDTH: f64 = 0.4;
/// Angular jitter is bounded to 30% of one step, which keeps neighboring
/// base angles from ever crossing.
pub const ANGLE_JITTER: f64 = 0.3;

const ANGLE_SALT: u32 = 0x9e37_79b9;
const FRAC_MODULUS: u32 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    /// Radians from the left edge of the quadrant.
    pub angle: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTool {
    pub tool: Tool,
    pub position: Placement,
}

/// FNV-1a over the tool id. Stands in for randomness: the same id always
/// lands on the same spot, so repeated layout passes are pixel-identical.
pub fn id_hash(id: &str) -> u32 {
    id.bytes()
        .fold(0x811c_9dc5u32, |h, b| (h ^ b as u32).wrapping_mul(0x0100_0193))
}

fn radius_frac(hash: u32) -> f64 {
    (hash % FRAC_MODULUS) as f64 / FRAC_MODULUS as f64
}

fn angle_frac(hash: u32) -> f64 {
    ((hash ^ ANGLE_SALT) % FRAC_MODULUS) as f64 / FRAC_MODULUS as f64 - 0.5
}

/// Places every tool with a recognized category inside its category's ring.
///
/// Tools partition by category in input order. A partition of n tools splits
/// the quarter turn into n+1 equal steps, the i-th tool (1-indexed) taking
/// base angle i*step, so there is always a step of clearance to both quadrant
/// edges. Hash-derived jitter then nudges radius and angle. Output is ordered
/// ring by ring, input order within each ring. Total over well-formed input;
/// tools without a recognized category are skipped.
pub fn assign_positions(tools: &[Tool], rings: &RingTable, center: Point) -> Vec<PlacedTool> {
    let mut placed = Vec::with_capacity(tools.len());

    for category in Category::iter() {
        let group: Vec<&Tool> = tools
            .iter()
            .filter(|t| t.category == Some(category))
            .collect();
        if group.is_empty() {
            continue;
        }

        let bounds = rings.bounds(category);
        let step = QUADRANT_SWEEP / (group.len() + 1) as f64;

        for (i, tool) in group.into_iter().enumerate() {
            let hash = id_hash(tool.id.as_ref());
            let radius = bounds.inner
                + bounds.span() * (RADIAL_BAND_START + RADIAL_BAND_WIDTH * radius_frac(hash));
            let angle = (i + 1) as f64 * step + angle_frac(hash) * step * ANGLE_JITTER;
            let Point { x, y } = geom::point_at(center, radius, angle);

            placed.push(PlacedTool {
                tool: tool.clone(),
                position: Placement {
                    x,
                    y,
                    angle,
                    radius,
                },
            });
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(id: &str, category: Option<Category>) -> Tool {
        Tool {
            id: crate::tool::ToolId::new(id),
            title: id.to_uppercase(),
            description: format!("{} description", id),
            url: format!("https://example.com/{}", id),
            category,
            team_position: Some("in use".into()),
            ai_position: None,
            reviewer: None,
        }
    }

    fn scenario_rings() -> RingTable {
        RingTable::from_radii([25.0, 45.0, 70.0, 95.0]).unwrap()
    }

    fn center() -> Point {
        Point::new(100.0, 100.0)
    }

    fn deg(rad: f64) -> f64 {
        rad.to_degrees()
    }

    #[test]
    fn test_determinism() {
        let tools: Vec<Tool> = ["ripgrep", "bacon", "just", "mold", "sccache"]
            .iter()
            .enumerate()
            .map(|(i, id)| tool(id, Category::from_index(i % 4)))
            .collect();

        let first = assign_positions(&tools, &scenario_rings(), center());
        let second = assign_positions(&tools, &scenario_rings(), center());
        assert_eq!(first, second);
    }

    #[test]
    fn test_radial_containment() {
        let tools: Vec<Tool> = (0..24)
            .map(|i| tool(&format!("tool-{}", i), Category::from_index(i % 4)))
            .collect();

        let rings = scenario_rings();
        for p in assign_positions(&tools, &rings, center()) {
            let bounds = rings.bounds(p.tool.category.unwrap());
            let lo = bounds.inner + 0.3 * bounds.span();
            let hi = bounds.inner + 0.7 * bounds.span();
            assert!(
                p.position.radius >= lo && p.position.radius <= hi,
                "radius {} outside [{}, {}]",
                p.position.radius,
                lo,
                hi
            );
        }
    }

    #[test]
    fn test_angular_order_never_inverts() {
        let tools: Vec<Tool> = (0..9)
            .map(|i| tool(&format!("crowded-{}", i), Some(Category::Evaluate)))
            .collect();

        let placed = assign_positions(&tools, &scenario_rings(), center());
        for pair in placed.windows(2) {
            assert!(
                pair[0].position.angle < pair[1].position.angle,
                "jitter inverted neighbors {} and {}",
                pair[0].tool.id,
                pair[1].tool.id
            );
        }
    }

    #[test]
    fn test_completeness_and_field_preservation() {
        let tools = vec![
            tool("a", Some(Category::Adopt)),
            tool("b", None), // unrecognized category was dropped at parse time
            tool("c", Some(Category::Aware)),
        ];

        let placed = assign_positions(&tools, &scenario_rings(), center());
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].tool, tools[0]);
        assert_eq!(placed[1].tool, tools[2]);
    }

    #[test]
    fn test_output_ordered_ring_by_ring() {
        let tools = vec![
            tool("outer", Some(Category::Aware)),
            tool("inner", Some(Category::Adopt)),
            tool("outer-2", Some(Category::Aware)),
        ];

        let placed = assign_positions(&tools, &scenario_rings(), center());
        let ids: Vec<&str> = placed.iter().map(|p| p.tool.id.as_str()).collect();
        assert_eq!(ids, vec!["inner", "outer", "outer-2"]);
    }

    #[test]
    fn test_quadrant_only_placement() {
        let tools: Vec<Tool> = (0..16)
            .map(|i| tool(&format!("q-{}", i), Category::from_index(i % 4)))
            .collect();

        let c = center();
        for p in assign_positions(&tools, &scenario_rings(), c) {
            assert!(p.position.x <= c.x && p.position.y <= c.y);
        }
    }

    #[test]
    fn test_three_trial_tools_scenario() {
        let tools = vec![
            tool("a", Some(Category::Trial)),
            tool("b", Some(Category::Trial)),
            tool("c", Some(Category::Trial)),
        ];

        let placed = assign_positions(&tools, &scenario_rings(), center());
        assert_eq!(placed.len(), 3);

        for (i, p) in placed.iter().enumerate() {
            assert!(p.position.radius >= 31.0 && p.position.radius <= 38.0);
            let base = 22.5 * (i + 1) as f64;
            assert!(
                (deg(p.position.angle) - base).abs() <= 6.75,
                "angle {} too far from base {}",
                deg(p.position.angle),
                base
            );
            assert!(p.position.x < 100.0 && p.position.y < 100.0);
        }
    }

    #[test]
    fn test_empty_input() {
        let placed = assign_positions(&[], &scenario_rings(), center());
        assert!(placed.is_empty());
    }

    #[test]
    fn test_single_adopt_tool_sits_on_the_midline() {
        let tools = vec![tool("solo", Some(Category::Adopt))];
        let placed = assign_positions(&tools, &scenario_rings(), center());

        assert_eq!(placed.len(), 1);
        let p = &placed[0].position;
        assert!((deg(p.angle) - 45.0).abs() <= 6.75);
        assert!(p.radius >= 7.5 && p.radius <= 17.5);
    }

    #[test]
    fn test_empty_category_does_not_shift_others() {
        // the trial ring's steps depend only on the trial partition size
        let with_gap = vec![
            tool("t1", Some(Category::Trial)),
            tool("t2", Some(Category::Trial)),
        ];
        let without_gap = vec![
            tool("a1", Some(Category::Adopt)),
            tool("t1", Some(Category::Trial)),
            tool("t2", Some(Category::Trial)),
        ];

        let rings = scenario_rings();
        let lone = assign_positions(&with_gap, &rings, center());
        let mixed = assign_positions(&without_gap, &rings, center());

        assert_eq!(lone[0].position, mixed[1].position);
        assert_eq!(lone[1].position, mixed[2].position);
    }

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(id_hash("ripgrep"), id_hash("ripgrep"));
        assert_ne!(id_hash("ripgrep"), id_hash("ripgrep2"));
        assert!(radius_frac(id_hash("anything")) < 1.0);
        let f = angle_frac(id_hash("anything"));
        assert!((-0.5..0.5).contains(&f));
    }
}
