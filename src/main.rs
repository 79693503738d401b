use tracing::{error, info};

use rehabsearch::infrastructure::bootstrap::build_state;
use rehabsearch::infrastructure::config::Settings;
use rehabsearch::interfaces::http::start_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            error!(error = %err, "Failed to load settings");
            std::process::exit(1);
        }
    };

    let state = match build_state(&settings) {
        Ok(state) => state,
        Err(err) => {
            error!(error = %err, "Failed to initialize application");
            std::process::exit(1);
        }
    };

    let server = start_server(state, settings.port)?;
    info!(port = settings.port, "Rehabilitation research assistant listening");

    server.await
}
