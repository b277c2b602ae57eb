use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Explicit color configuration handed to the chart painter; resolved from
/// the GTK theme where possible, with fixed fallbacks per ring.
pub struct ThemeColors {
    /// Ring fills in category order, innermost first.
    pub rings: [Srgba<f64>; 4],
    pub grid: Srgba<f64>,
    pub dot: Srgba<f64>,
    pub hovered: Srgba<f64>,
    pub selected: Srgba<f64>,
    pub label: Srgba<f64>,
    pub text: Srgba<f64>,
    pub panel: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::fallback();
        Self {
            grid: Self::lookup_color(context, "borders", fallback.grid, Some(0.8)),
            dot: Self::lookup_color(context, "theme_fg_color", fallback.dot, Some(0.9)),
            hovered: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                fallback.hovered,
                Some(0.95),
            ),
            selected: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                fallback.selected,
                None,
            ),
            label: Self::lookup_color(context, "theme_fg_color", fallback.label, Some(0.55)),
            text: Self::lookup_color(context, "theme_fg_color", fallback.text, None),
            panel: Self::lookup_color(context, "theme_bg_color", fallback.panel, Some(0.95)),
            ..fallback
        }
    }

    /// Theme-independent defaults, also used when painting off-screen
    /// snapshots where no style context exists.
    pub fn fallback() -> Self {
        Self {
            rings: [
                Srgba::new(0.53, 0.80, 0.56, 0.45),
                Srgba::new(0.45, 0.62, 0.85, 0.40),
                Srgba::new(0.90, 0.78, 0.38, 0.35),
                Srgba::new(0.88, 0.48, 0.42, 0.30),
            ],
            grid: Srgba::new(0.45, 0.45, 0.45, 0.8),
            dot: Srgba::new(0.15, 0.15, 0.18, 0.9),
            hovered: Srgba::new(0.4, 0.4, 0.8, 0.95),
            selected: Srgba::new(0.3, 0.3, 0.75, 1.0),
            label: Srgba::new(0.25, 0.25, 0.25, 0.55),
            text: Srgba::new(0.1, 0.1, 0.1, 1.0),
            panel: Srgba::new(0.96, 0.96, 0.96, 0.95),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.toolradar-window, .toolradar-drawing-area {
    background-color: #fafafa;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
