use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::chart::{self, State};
use crate::gui::theme::{self, ThemeColors};
use cairo::{Context, Format, ImageSurface};
use gtk::prelude::*;
use gtk4 as gtk;
use quadrant::geom::Point;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub config: Config,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    CursorMove(Point),
    Click(u32),
    Resize(i32, i32),
    ClearSelection,
    Snapshot,
    ConfigReload,
    DatasetReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::DatasetReload => AppMsg::DatasetReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (State, Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Tool Radar"),
            set_default_width: 960,
            set_default_height: 640,
            add_css_class: "toolradar-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::ClearSelection);
                        return glib::Propagation::Stop;
                    }
                    if key == gtk::gdk::Key::s {
                        sender.input(AppMsg::Snapshot);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "toolradar-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::CursorMove(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 0, // Listen to all buttons
                    connect_released[sender] => move |gesture, _, _, _| {
                        sender.input(AppMsg::Click(gesture.current_button()));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, app_config, rx) = init;

        theme::load_css();

        let state = Rc::new(RefCell::new(state));

        let model = AppModel {
            state: state.clone(),
            config: app_config,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = chart::draw(cr, &state_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::CursorMove(point) => {
                if self.state.borrow_mut().update_cursor(point) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Click(btn) => match btn {
                1 => {
                    if self.state.borrow_mut().select_hovered() {
                        self.drawing_area.queue_draw();
                    }
                }
                3 => {
                    let state = self.state.borrow();
                    if let Some(placed) = state.detailed() {
                        open_url(&placed.tool.url);
                    }
                }
                _ => {}
            },
            AppMsg::Resize(width, height) => {
                self.state.borrow_mut().refresh(width as f64, height as f64);
                self.drawing_area.queue_draw();
            }
            AppMsg::ClearSelection => {
                if self.state.borrow_mut().clear_selection() {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Snapshot => {
                let path = match config::snapshot_path() {
                    Ok(p) => p,
                    Err(e) => {
                        log::error!("No snapshot path: {}", e);
                        return;
                    }
                };
                match write_snapshot(&path, &self.state.borrow()) {
                    Ok(()) => log::info!("Wrote snapshot to {}", path.display()),
                    Err(e) => log::error!("Snapshot failed: {}", e),
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.state.borrow_mut().set_chart_config(
                        new_config.ring_table(),
                        new_config.extent,
                        new_config.dot_radius,
                    );
                    self.config = new_config;
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::DatasetReload => {
                let tools = config::load_tools(&self.config);
                self.state.borrow_mut().set_tools(tools);
                self.drawing_area.queue_draw();
                log::info!("Dataset reloaded");
            }
        }
    }
}

fn open_url(url: &str) {
    if url.is_empty() {
        return;
    }
    if let Err(e) = std::process::Command::new("xdg-open").arg(url).spawn() {
        log::error!("Failed to open '{}': {}", url, e);
    }
}

#[derive(Debug, Error)]
enum SnapshotError {
    #[error(transparent)]
    Cairo(#[from] cairo::Error),
    #[error(transparent)]
    Png(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Off-screen render of the current chart, written as a PNG. Uses the
/// fallback palette since no style context applies off screen.
fn write_snapshot(path: &Path, state: &State) -> Result<(), SnapshotError> {
    let (width, height) = (state.width as i32, state.height as i32);
    if width <= 0 || height <= 0 {
        return Ok(());
    }

    let surface = ImageSurface::create(Format::ARgb32, width, height)?;
    let cr = Context::new(&surface)?;
    cr.set_source_rgb(1.0, 1.0, 1.0);
    cr.paint()?;
    chart::draw(&cr, state, &ThemeColors::fallback())?;
    drop(cr);

    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    Ok(())
}
