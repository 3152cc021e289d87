use crate::{config::ViewerConfig, viewer::Viewer};

mod config;
mod repaint;
mod viewer;

fn main() -> iced::Result {
    let (config, config_error) = ViewerConfig::load_or_default(ViewerConfig::FILE_NAME);
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .init();
    if let Some(e) = config_error {
        log::error!(
            "Unable to read {}, using defaults: {}",
            ViewerConfig::FILE_NAME,
            e
        );
    }

    let window_size = iced::Size::new(config.window.width as f32, config.window.height as f32);
    iced::application(move || Viewer::new(&config), Viewer::update, Viewer::view)
        .subscription(Viewer::subscription)
        .window_size(window_size)
        .run()
}
