use carebook::app::App;
use carebook::controller::Controller;
use carebook::storage::settings::load_settings;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("carebook=info")),
        )
        .init();

    let settings = load_settings();
    tracing::info!("Starting Carebook against {}", settings.base_url);

    let controller = match Controller::from_settings(settings) {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    dioxus::LaunchBuilder::new().with_context(controller).launch(App);
}
