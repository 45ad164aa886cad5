//! Public plugin lifecycle

use futures::FutureExt;
use mranv_core::{
    AppMountParams, AppRegistration, AppUnmount, CoreSetup, CoreStart, DashboardConfig,
    DashboardShell, PLUGIN_ID, PLUGIN_NAME, Plugin, Result, StartServices,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// What the host hands the plugin when constructing it
#[derive(Debug, Clone)]
pub struct PluginInitializerContext {
    /// Dashboard configuration
    pub config: DashboardConfig,
    /// External collaborators available once mounted
    pub services: StartServices,
}

/// Capability returned from setup
#[derive(Debug, Clone, Copy, Default)]
pub struct MranvPluginSetup;

impl MranvPluginSetup {
    /// Greeting other plugins can show
    pub fn greeting(&self) -> String {
        format!("Hello from {PLUGIN_NAME}!")
    }
}

/// Capability returned from start
#[derive(Debug, Clone, Copy, Default)]
pub struct MranvPluginStart;

/// Public-side half of the plugin
#[derive(Debug)]
pub struct MranvPlugin {
    context: PluginInitializerContext,
}

impl MranvPlugin {
    /// Create the plugin
    pub const fn new(context: PluginInitializerContext) -> Self {
        Self { context }
    }
}

impl Plugin for MranvPlugin {
    type CoreSetup = CoreSetup;
    type CoreStart = CoreStart;
    type Setup = MranvPluginSetup;
    type Start = MranvPluginStart;

    #[instrument(skip_all)]
    fn setup(&mut self, core: &mut CoreSetup) -> Result<MranvPluginSetup> {
        let context = self.context.clone();
        core.application.register(AppRegistration {
            id: PLUGIN_ID.to_string(),
            title: PLUGIN_NAME.to_string(),
            mount: Arc::new(move |params: AppMountParams| {
                let context = context.clone();
                async move { render_app(context.config, context.services, params) }.boxed()
            }),
        })?;
        Ok(MranvPluginSetup)
    }

    fn start(&mut self, core: &CoreStart) -> MranvPluginStart {
        debug!(started_at = %core.started_at, "mranv: Started");
        MranvPluginStart
    }
}

/// Mount a dashboard into the host-provided target
///
/// The returned handle detaches the shell from the target and unmounts it.
///
/// # Errors
///
/// Returns [`mranv_core::Error::MountTargetOccupied`] if the target already
/// holds a dashboard.
pub fn render_app(
    config: DashboardConfig,
    services: StartServices,
    params: AppMountParams,
) -> Result<AppUnmount> {
    let shell = DashboardShell::mount(config, services);
    params.target.attach(Arc::clone(&shell))?;
    info!(base_path = %params.app_base_path, "Application mounted");

    let target = params.target;
    Ok(AppUnmount::new(move || {
        async move {
            target.detach();
            shell.unmount().await;
        }
        .boxed()
    }))
}
