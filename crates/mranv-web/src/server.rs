//! Single-application host
//!
//! Runs both plugin halves through their lifecycle, mounts the dashboard and
//! assembles the HTTP router. [`RunningApp::shutdown`] reverses the sequence.

use crate::api_client::{ApiClient, GiphyClient};
use crate::plugin::{MranvPlugin, PluginInitializerContext};
use crate::routes::build_routes;
use crate::state::AppState;
use axum::Router;
use mranv_api::{MranvServerPlugin, ServerCoreSetup};
use mranv_core::{
    APP_BASE_PATH, AppMountParams, AppUnmount, Config, CoreSetup, CoreStart, MountTarget,
    PLUGIN_ID, Plugin, Result, StartServices,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

/// Build the production collaborators from configuration
///
/// The timestamp client calls back into this server's own timestamp route.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built.
pub fn default_services(config: &Config) -> Result<StartServices> {
    Ok(StartServices {
        showcase: Arc::new(GiphyClient::new(config.giphy.clone())?),
        timestamp: Arc::new(ApiClient::new(
            config.server.base_url(),
            config.server.request_timeout(),
        )?),
    })
}

/// A started host with the dashboard mounted
#[derive(Debug)]
pub struct RunningApp {
    /// Router serving the dashboard, the timestamp route and health checks
    pub router: Router,
    /// Greeting exposed by the public plugin's setup capability
    pub greeting: String,
    /// Where the dashboard is attached
    pub target: MountTarget,
    unmount: AppUnmount,
    plugin: MranvPlugin,
    server_plugin: MranvServerPlugin,
}

impl RunningApp {
    /// Unmount the dashboard and stop both plugins
    #[instrument(skip(self))]
    pub async fn shutdown(mut self) {
        self.unmount.unmount().await;
        self.plugin.stop();
        self.server_plugin.stop();
        info!("Host stopped");
    }
}

/// Run the plugin lifecycle and mount the dashboard
///
/// # Errors
///
/// Returns an error if either plugin fails to set up or the mount fails.
#[instrument(skip_all)]
pub async fn start(config: &Config, services: StartServices) -> Result<RunningApp> {
    // Server half
    let mut server_core = ServerCoreSetup::default();
    let mut server_plugin = MranvServerPlugin::new();
    server_plugin.setup(&mut server_core)?;
    server_plugin.start(&());

    // Public half
    let mut core = CoreSetup::default();
    let mut plugin = MranvPlugin::new(PluginInitializerContext {
        config: config.dashboard.clone(),
        services,
    });
    let setup = plugin.setup(&mut core)?;
    plugin.start(&CoreStart::default());

    let target = MountTarget::new();
    let unmount = core
        .application
        .mount(
            PLUGIN_ID,
            AppMountParams {
                app_base_path: APP_BASE_PATH.to_string(),
                target: target.clone(),
            },
        )
        .await?;

    let state = Arc::new(AppState::new(target.clone(), &config.dashboard));
    let router = build_routes()
        .with_state(state)
        .merge(server_core.http.into_router())
        .merge(mranv_api::routes::health_routes())
        .fallback(mranv_api::routes::not_found_handler)
        .layer(TraceLayer::new_for_http());

    let greeting = setup.greeting();
    info!(%greeting, "Host started");

    Ok(RunningApp {
        router,
        greeting,
        target,
        unmount,
        plugin,
        server_plugin,
    })
}
