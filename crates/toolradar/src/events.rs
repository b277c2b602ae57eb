#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigReload,
    DatasetReload,
}
