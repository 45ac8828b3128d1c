use dashboard::{config::DashboardConfig, start_web_server, WebState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    env_logger::init();

    // request traces
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("could not install the tracing subscriber.");

    // configuration
    let config = DashboardConfig::from_env().expect("invalid configuration in env.");
    let client = config.client().expect("invalid configuration in env.");

    // web server
    let web_future = start_web_server(
        WebState {
            client,
            viewer_url: config.osrm_viewer_url.as_str().into(),
        },
        config.bind_address,
        &config.static_dir,
    );

    if let Err(why) = web_future.await {
        log::error!("web server stopped: {}", why);
    }
}
