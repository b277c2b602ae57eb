use relm4::prelude::*;
use toolradar::config;
use toolradar::gui::app::AppModel;
use toolradar::gui::chart::State;
use toolradar::sys::runtime;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let tools = config::load_tools(&config);
    let state = State::new(tools, config.ring_table(), config.extent, config.dot_radius);

    let (tx, rx) = async_channel::bounded(32);

    match config::dataset_path(&config) {
        Ok(path) => runtime::start_background_services(tx.clone(), path),
        Err(e) => log::error!("File watching disabled: {}", e),
    }

    let app = RelmApp::new("org.toolradar.toolradar");

    app.run::<AppModel>((state, config, rx));
}
