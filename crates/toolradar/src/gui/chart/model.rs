use crate::gui::chart::{CHART_PAD, PANEL_WIDTH, PHOTO_SIZE};
use gdk_pixbuf::Pixbuf;
use quadrant::geom::Point;
use quadrant::place::{PlacedTool, assign_positions};
use quadrant::rings::{Extent, RingTable};
use quadrant::tool::{Tool, ToolId};
use std::collections::HashMap;

pub struct State {
    pub tools: Vec<Tool>,
    unit_rings: RingTable,
    pub extent: Extent,
    pub dot_radius: f64,

    pub rings: RingTable,
    pub center: Point,
    pub available: f64,
    pub width: f64,
    pub height: f64,

    pub dots: Vec<PlacedTool>,
    pub photos: HashMap<ToolId, Pixbuf>,
    pub hover_index: Option<usize>,
    pub selected_index: Option<usize>,
}

impl State {
    pub fn new(tools: Vec<Tool>, unit_rings: RingTable, extent: Extent, dot_radius: f64) -> Self {
        let mut state = Self {
            tools: Vec::new(),
            rings: unit_rings.clone(),
            unit_rings,
            extent,
            dot_radius,
            center: Point::default(),
            available: 1.0,
            width: 0.0,
            height: 0.0,
            dots: Vec::new(),
            photos: HashMap::new(),
            hover_index: None,
            selected_index: None,
        };
        state.set_tools(tools);
        state
    }

    pub fn set_tools(&mut self, tools: Vec<Tool>) {
        self.photos = tools
            .iter()
            .filter_map(|t| t.reviewer.as_ref().map(|r| (t.id.clone(), r.photo.clone())))
            .filter_map(|(id, path)| Self::load_photo(&path).map(|p| (id, p)))
            .collect();
        self.tools = tools;
        self.hover_index = None;
        self.selected_index = None;
        self.replace();
    }

    fn load_photo(path: &str) -> Option<Pixbuf> {
        (!path.is_empty())
            .then(|| Pixbuf::from_file_at_scale(path, PHOTO_SIZE, PHOTO_SIZE, true).ok())?
    }

    pub fn set_chart_config(&mut self, unit_rings: RingTable, extent: Extent, dot_radius: f64) {
        self.unit_rings = unit_rings;
        self.extent = extent;
        self.dot_radius = dot_radius;
        self.refresh(self.width, self.height);
    }

    /// Rebuilds the scaled ring table for the current drawing-area size and
    /// re-runs placement. Selection survives a resize (tool order is stable);
    /// hover does not, since every dot moves.
    pub fn refresh(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;

        let chart_width = (width - PANEL_WIDTH).max(1.0);
        let side = chart_width.min(height);
        self.available = (side - 2.0 * CHART_PAD).max(1.0);
        self.center = Point::new(chart_width - CHART_PAD, height - CHART_PAD);
        self.rings = self
            .unit_rings
            .scaled(self.available / self.unit_rings.outer_radius());
        self.replace();
    }

    fn replace(&mut self) {
        self.dots = assign_positions(&self.tools, &self.rings, self.center);
        self.hover_index = None;
    }

    pub fn update_cursor(&mut self, cursor: Point) -> bool {
        let new_idx = self.find_nearest_dot(cursor);
        let changed = self.hover_index != new_idx;
        self.hover_index = new_idx;
        changed
    }

    fn hit_radius(&self) -> f64 {
        self.dot_radius * 2.0
    }

    fn find_nearest_dot(&self, cursor: Point) -> Option<usize> {
        self.dots
            .iter()
            .enumerate()
            .map(|(i, d)| (i, cursor.distance(Point::new(d.position.x, d.position.y))))
            .filter(|(_, dist)| *dist <= self.hit_radius())
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Primary click: a hovered dot becomes the selection, empty space
    /// clears it. Reports whether a redraw is needed.
    pub fn select_hovered(&mut self) -> bool {
        let changed = self.selected_index != self.hover_index;
        self.selected_index = self.hover_index;
        changed
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selected_index.is_some();
        self.selected_index = None;
        changed
    }

    pub fn hovered(&self) -> Option<&PlacedTool> {
        self.hover_index.and_then(|i| self.dots.get(i))
    }

    /// The tool the details panel shows: the selection wins over a hover.
    pub fn detailed(&self) -> Option<&PlacedTool> {
        self.selected_index
            .and_then(|i| self.dots.get(i))
            .or_else(|| self.hovered())
    }

    pub fn photo_for(&self, id: &ToolId) -> Option<&Pixbuf> {
        self.photos.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadrant::tool::Category;

    fn tool(id: &str, category: Category) -> Tool {
        Tool {
            id: ToolId::new(id),
            title: id.to_string(),
            description: String::new(),
            url: String::new(),
            category: Some(category),
            team_position: None,
            ai_position: None,
            reviewer: None,
        }
    }

    fn state() -> State {
        let tools = vec![
            tool("a", Category::Adopt),
            tool("b", Category::Trial),
            tool("c", Category::Aware),
        ];
        let mut s = State::new(tools, RingTable::default(), Extent::Bounded, 7.0);
        s.refresh(960.0, 640.0);
        s
    }

    #[test]
    fn test_refresh_places_every_tool() {
        let s = state();
        assert_eq!(s.dots.len(), 3);
        for d in &s.dots {
            assert!(d.position.x <= s.center.x && d.position.y <= s.center.y);
        }
    }

    #[test]
    fn test_cursor_on_dot_hovers_it() {
        let mut s = state();
        let target = Point::new(s.dots[1].position.x, s.dots[1].position.y);

        assert!(s.update_cursor(target));
        assert_eq!(s.hover_index, Some(1));
        // same spot again: no redraw needed
        assert!(!s.update_cursor(target));
    }

    #[test]
    fn test_cursor_far_from_dots_clears_hover() {
        let mut s = state();
        let target = Point::new(s.dots[0].position.x, s.dots[0].position.y);
        s.update_cursor(target);

        assert!(s.update_cursor(Point::new(s.center.x, 0.0)));
        assert_eq!(s.hover_index, None);
    }

    #[test]
    fn test_selection_survives_resize_but_not_reload() {
        let mut s = state();
        s.update_cursor(Point::new(s.dots[0].position.x, s.dots[0].position.y));
        assert!(s.select_hovered());
        assert_eq!(s.selected_index, Some(0));

        s.refresh(800.0, 500.0);
        assert_eq!(s.selected_index, Some(0));

        s.set_tools(vec![tool("z", Category::Adopt)]);
        assert_eq!(s.selected_index, None);
    }

    #[test]
    fn test_detailed_prefers_selection_over_hover() {
        let mut s = state();
        s.update_cursor(Point::new(s.dots[0].position.x, s.dots[0].position.y));
        s.select_hovered();
        s.update_cursor(Point::new(s.dots[2].position.x, s.dots[2].position.y));

        assert_eq!(s.detailed().unwrap().tool.id.as_ref(), "a");
        s.clear_selection();
        assert_eq!(s.detailed().unwrap().tool.id.as_ref(), "c");
    }

    #[test]
    fn test_placement_is_stable_for_same_size() {
        let mut s = state();
        let before = s.dots.clone();
        s.refresh(960.0, 640.0);
        assert_eq!(before, s.dots);
    }
}
