use super::model::State;
use super::{
    HOVER_GROW, LABEL_FONT_SIZE, LINE_HEIGHT, PANEL_FONT_SIZE, PANEL_PAD, PANEL_TITLE_FONT_SIZE,
    PANEL_WIDTH, TITLE_FONT_SIZE,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk4::prelude::*;
use palette::Srgba;
use quadrant::geom::{self, Sector};
use quadrant::place::PlacedTool;
use quadrant::rings::Extent;
use std::f64::consts::PI;

pub fn draw(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    draw_rings(cr, state, colors)?;
    draw_dots(cr, state, colors)?;
    draw_panel(cr, state, colors)?;
    Ok(())
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn draw_rings(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let center = state.center;

    for (i, (category, bounds)) in state.rings.iter().enumerate() {
        let open_outer = i == 3 && state.extent == Extent::Open;

        set_color(cr, colors.rings[i]);
        trace_sector(cr, &Sector::from_bounds(center, bounds));
        cr.fill()?;

        // the open variant leaves the last ring without an outer edge
        if !open_outer {
            set_color(cr, colors.grid);
            cr.set_line_width(1.5);
            cr.arc(center.x, center.y, bounds.outer, PI, 1.5 * PI);
            cr.stroke()?;
        }

        let anchor = geom::label_anchor(center, bounds, open_outer, state.available);
        set_color(cr, colors.label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE);
        draw_text_centered(cr, anchor.x, anchor.y, category.label())?;
    }
    Ok(())
}

/// Cairo rendition of the same quarter-annulus the SVG path helper describes:
/// outer arc swept top-to-left, inner arc returning when the ring has one.
fn trace_sector(cr: &Context, sector: &Sector) {
    let (cx, cy) = (sector.center.x, sector.center.y);
    if sector.inner <= 0.0 {
        cr.move_to(cx, cy);
        cr.line_to(cx, cy - sector.outer);
        cr.arc_negative(cx, cy, sector.outer, 1.5 * PI, PI);
        cr.close_path();
    } else {
        cr.move_to(cx, cy - sector.outer);
        cr.arc_negative(cx, cy, sector.outer, 1.5 * PI, PI);
        cr.line_to(cx - sector.inner, cy);
        cr.arc(cx, cy, sector.inner, PI, 1.5 * PI);
        cr.close_path();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DotState {
    Selected,
    Hovered,
    Idle,
}

impl DotState {
    fn resolve(index: usize, state: &State) -> Self {
        if state.selected_index == Some(index) {
            Self::Selected
        } else if state.hover_index == Some(index) {
            Self::Hovered
        } else {
            Self::Idle
        }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Selected => colors.selected,
            Self::Hovered => colors.hovered,
            Self::Idle => colors.dot,
        }
    }
}

fn draw_dots(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    for (i, dot) in state.dots.iter().enumerate() {
        let dot_state = DotState::resolve(i, state);
        let radius = match dot_state {
            DotState::Idle => state.dot_radius,
            _ => state.dot_radius + HOVER_GROW,
        };

        set_color(cr, dot_state.color(colors));
        cr.arc(dot.position.x, dot.position.y, radius, 0.0, 2.0 * PI);
        cr.fill()?;

        // only the active dot carries its title; everything else lives in the panel
        if dot_state != DotState::Idle {
            set_color(cr, colors.text);
            cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
            cr.set_font_size(TITLE_FONT_SIZE);
            draw_text_centered(
                cr,
                dot.position.x,
                dot.position.y + radius + TITLE_FONT_SIZE,
                &dot.tool.title,
            )?;
        }
    }
    Ok(())
}

fn draw_panel(cr: &Context, state: &State, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let x0 = state.width - PANEL_WIDTH;

    set_color(cr, colors.panel);
    cr.rectangle(x0, 0.0, PANEL_WIDTH, state.height);
    cr.fill()?;

    let left = x0 + PANEL_PAD;
    let text_width = PANEL_WIDTH - 2.0 * PANEL_PAD;
    let mut y = PANEL_PAD + PANEL_TITLE_FONT_SIZE;

    let Some(placed) = state.detailed() else {
        set_color(cr, colors.label);
        cr.select_font_face("Sans", cairo::FontSlant::Italic, cairo::FontWeight::Normal);
        cr.set_font_size(PANEL_FONT_SIZE);
        cr.move_to(left, y);
        cr.show_text("Hover a tool for details,")?;
        cr.move_to(left, y + LINE_HEIGHT);
        cr.show_text("click to pin it.")?;
        return Ok(());
    };

    y = draw_panel_header(cr, colors, placed, left, y)?;
    y = draw_panel_body(cr, colors, placed, left, text_width, y)?;
    draw_panel_reviewer(cr, state, colors, placed, left, text_width, y)?;
    Ok(())
}

fn draw_panel_header(
    cr: &Context,
    colors: &ThemeColors,
    placed: &PlacedTool,
    left: f64,
    mut y: f64,
) -> Result<f64, cairo::Error> {
    set_color(cr, colors.text);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(PANEL_TITLE_FONT_SIZE);
    cr.move_to(left, y);
    cr.show_text(&placed.tool.title)?;
    y += LINE_HEIGHT;

    if let Some(category) = placed.tool.category {
        let mut swatch = colors.rings[category.as_index()];
        swatch.alpha = 1.0;
        set_color(cr, swatch);
        cr.arc(left + 4.0, y - 4.0, 4.0, 0.0, 2.0 * PI);
        cr.fill()?;

        set_color(cr, colors.label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(PANEL_FONT_SIZE);
        cr.move_to(left + 14.0, y);
        cr.show_text(category.label())?;
        y += LINE_HEIGHT;
    }

    if !placed.tool.url.is_empty() {
        set_color(cr, colors.selected);
        cr.set_font_size(PANEL_FONT_SIZE);
        cr.move_to(left, y);
        cr.show_text(&placed.tool.url)?;
        y += LINE_HEIGHT;
    }

    Ok(y + LINE_HEIGHT / 2.0)
}

fn draw_panel_body(
    cr: &Context,
    colors: &ThemeColors,
    placed: &PlacedTool,
    left: f64,
    text_width: f64,
    mut y: f64,
) -> Result<f64, cairo::Error> {
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(PANEL_FONT_SIZE);

    set_color(cr, colors.text);
    y = draw_wrapped(cr, &placed.tool.description, left, y, text_width)?;
    y += LINE_HEIGHT / 2.0;

    for (heading, body) in [
        ("Team position", &placed.tool.team_position),
        ("AI position", &placed.tool.ai_position),
    ] {
        if let Some(body) = body {
            set_color(cr, colors.label);
            cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
            cr.move_to(left, y);
            cr.show_text(heading)?;
            y += LINE_HEIGHT;

            set_color(cr, colors.text);
            cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
            y = draw_wrapped(cr, body, left, y, text_width)?;
            y += LINE_HEIGHT / 2.0;
        }
    }
    Ok(y)
}

fn draw_panel_reviewer(
    cr: &Context,
    state: &State,
    colors: &ThemeColors,
    placed: &PlacedTool,
    left: f64,
    text_width: f64,
    mut y: f64,
) -> Result<(), cairo::Error> {
    let Some(reviewer) = &placed.tool.reviewer else {
        return Ok(());
    };

    set_color(cr, colors.label);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(PANEL_FONT_SIZE);
    cr.move_to(left, y);
    cr.show_text("Reviewed by")?;
    y += LINE_HEIGHT;

    if let Some(pixbuf) = state.photo_for(&placed.tool.id) {
        cr.save()?;
        cr.set_source_pixbuf(pixbuf, left, y);
        cr.paint()?;
        cr.restore()?;
        y += pixbuf.height() as f64 + LINE_HEIGHT / 2.0;
    }

    set_color(cr, colors.text);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    draw_wrapped(cr, &reviewer.name, left, y, text_width)?;
    Ok(())
}

fn draw_text_centered(cr: &Context, x: f64, y: f64, text: &str) -> Result<(), cairo::Error> {
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(x - ext.width() / 2.0, y + ext.height() / 2.0);
        cr.show_text(text)?;
    }
    Ok(())
}

/// Greedy word wrap against measured text widths; returns the y cursor after
/// the last line.
fn draw_wrapped(
    cr: &Context,
    text: &str,
    x: f64,
    mut y: f64,
    max_width: f64,
) -> Result<f64, cairo::Error> {
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };
        let width = cr.text_extents(&candidate).map(|e| e.width()).unwrap_or(0.0);
        if width > max_width && !line.is_empty() {
            cr.move_to(x, y);
            cr.show_text(&line)?;
            y += LINE_HEIGHT;
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        cr.move_to(x, y);
        cr.show_text(&line)?;
        y += LINE_HEIGHT;
    }
    Ok(y)
}
