use crate::geom::{self, Point, Sector};
use crate::place::assign_positions;
use crate::rings::{Extent, RingTable};
use crate::tool::Tool;

pub const MARGIN: f64 = 28.0;
pub const DOT_RADIUS: f64 = 6.0;

const RING_FILLS: [&str; 4] = ["#dcfce7", "#dbeafe", "#fef9c3", "#fee2e2"];
const RING_EDGE: &str = "#9ca3af";
const LABEL_COLOR: &str = "#374151";
const DOT_FILL: &str = "#1f2937";
const TITLE_COLOR: &str = "#6b7280";

#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    /// Edge length of the square document.
    pub size: f64,
    pub extent: Extent,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            size: 720.0,
            extent: Extent::Bounded,
        }
    }
}

/// Renders the whole radar as a standalone SVG document: one filled sector and
/// arc outline per ring, ring labels at their anchors, one dot per placed tool.
pub fn render_chart(tools: &[Tool], unit_rings: &RingTable, opts: &ChartOptions) -> String {
    let available = opts.size - 2.0 * MARGIN;
    let rings = unit_rings.scaled(available / unit_rings.outer_radius());
    let center = Point::new(opts.size - MARGIN, opts.size - MARGIN);
    let placed = assign_positions(tools, &rings, center);

    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}" style="background:white">"#,
        s = opts.size,
    ));
    out.push('\n');

    for (i, (category, bounds)) in rings.iter().enumerate() {
        let open_outer = i == 3 && opts.extent == Extent::Open;

        let sector = Sector::from_bounds(center, bounds);
        out.push_str(&format!(
            r##"<path d="{}" fill="{}" opacity="0.8"/>"##,
            sector.svg_path(),
            RING_FILLS[i],
        ));
        out.push('\n');

        // the open variant leaves the last ring without an outer edge
        if !open_outer {
            out.push_str(&format!(
                r##"<path d="{}" fill="none" stroke="{}" stroke-width="1.5"/>"##,
                geom::arc_path(center, bounds.outer),
                RING_EDGE,
            ));
            out.push('\n');
        }

        let anchor = geom::label_anchor(center, bounds, open_outer, available);
        out.push_str(&format!(
            r##"<text x="{:.3}" y="{:.3}" text-anchor="middle" font-size="13" font-weight="600" fill="{}">{}</text>"##,
            anchor.x,
            anchor.y,
            LABEL_COLOR,
            category.label(),
        ));
        out.push('\n');
    }

    for p in &placed {
        out.push_str(&format!(
            r##"<circle cx="{:.3}" cy="{:.3}" r="{}" fill="{}"/>"##,
            p.position.x, p.position.y, DOT_RADIUS, DOT_FILL,
        ));
        out.push('\n');
        out.push_str(&format!(
            r##"<text x="{:.3}" y="{:.3}" text-anchor="middle" font-size="10" fill="{}">{}</text>"##,
            p.position.x,
            p.position.y + DOT_RADIUS + 10.0,
            TITLE_COLOR,
            escape(&p.tool.title),
        ));
        out.push('\n');
    }

    out.push_str("</svg>\n");
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
