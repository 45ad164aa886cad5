//! Server plugin lifecycle

use crate::routes;
use axum::Router;
use mranv_core::{Plugin, Result};
use tracing::{debug, info};

/// Host HTTP service handed to server plugins during setup
#[derive(Debug, Default)]
pub struct HttpServiceSetup {
    router: Router,
}

impl HttpServiceSetup {
    /// Merge plugin routes into the host router
    pub fn register(&mut self, routes: Router) {
        let router = std::mem::take(&mut self.router);
        self.router = router.merge(routes);
    }

    /// Finish setup and hand back the combined router
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Services the host offers server plugins during setup
#[derive(Debug, Default)]
pub struct ServerCoreSetup {
    /// HTTP service
    pub http: HttpServiceSetup,
}

/// Server-side half of the plugin
#[derive(Debug, Default)]
pub struct MranvServerPlugin {
    _private: (),
}

impl MranvServerPlugin {
    /// Create the plugin
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for MranvServerPlugin {
    type CoreSetup = ServerCoreSetup;
    type CoreStart = ();
    type Setup = ();
    type Start = ();

    fn setup(&mut self, core: &mut ServerCoreSetup) -> Result<()> {
        debug!("mranv: Setup");
        core.http.register(routes::plugin_routes());
        info!(path = routes::EXAMPLE_PATH, "Registered timestamp route");
        Ok(())
    }

    fn start(&mut self, _core: &()) {
        debug!("mranv: Started");
    }

    fn stop(&mut self) {
        debug!("mranv: Stopped");
    }
}
