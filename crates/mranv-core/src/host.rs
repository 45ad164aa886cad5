//! The slice of the host platform the plugin is written against
//!
//! Only what the plugin touches lives here: an application registry, the
//! parameters handed to a mount callback, the unmount handle a mount returns
//! and the three-phase plugin lifecycle.

use crate::error::{Error, Result};
use crate::shell::DashboardShell;
use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Slot a mounted dashboard is rendered into
///
/// Holds at most one live shell. Clones share the same slot.
#[derive(Clone, Default)]
pub struct MountTarget(Arc<ArcSwapOption<DashboardShell>>);

impl MountTarget {
    /// Create an empty target
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `shell` into the target
    ///
    /// # Errors
    ///
    /// Returns [`Error::MountTargetOccupied`] if another shell is attached.
    pub fn attach(&self, shell: Arc<DashboardShell>) -> Result<()> {
        let previous = self.0.compare_and_swap(&None::<Arc<DashboardShell>>, Some(shell));
        if previous.is_some() {
            return Err(Error::MountTargetOccupied);
        }
        Ok(())
    }

    /// Take the shell out of the target
    pub fn detach(&self) -> Option<Arc<DashboardShell>> {
        self.0.swap(None)
    }

    /// Shell currently attached
    pub fn current(&self) -> Option<Arc<DashboardShell>> {
        self.0.load_full()
    }

    /// Whether a shell is attached
    pub fn is_mounted(&self) -> bool {
        self.0.load().is_some()
    }
}

impl fmt::Debug for MountTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountTarget")
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

/// Parameters the host passes to a mount callback
#[derive(Debug, Clone)]
pub struct AppMountParams {
    /// Path the application is served under
    pub app_base_path: String,
    /// Where to render
    pub target: MountTarget,
}

/// Mount callback stored in an [`AppRegistration`]
pub type MountFn = Arc<dyn Fn(AppMountParams) -> BoxFuture<'static, Result<AppUnmount>> + Send + Sync>;

/// Application entry registered during plugin setup
#[derive(Clone)]
pub struct AppRegistration {
    /// Application identifier
    pub id: String,
    /// Navigation title
    pub title: String,
    /// Called when the user navigates to the application
    pub mount: MountFn,
}

impl fmt::Debug for AppRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppRegistration")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Handle returned by a mount, consumed to tear the application down
pub struct AppUnmount(Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>);

impl AppUnmount {
    /// Wrap a teardown closure
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() -> BoxFuture<'static, ()> + Send + 'static,
    {
        Self(Box::new(teardown))
    }

    /// Run the teardown
    pub async fn unmount(self) {
        (self.0)().await;
    }
}

impl fmt::Debug for AppUnmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppUnmount")
    }
}

/// Applications registered with the host
#[derive(Debug, Clone, Default)]
pub struct ApplicationRegistry {
    apps: BTreeMap<String, AppRegistration>,
}

impl ApplicationRegistry {
    /// Register an application
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyRegistered`] if the id is taken.
    pub fn register(&mut self, app: AppRegistration) -> Result<()> {
        if self.apps.contains_key(&app.id) {
            return Err(Error::AlreadyRegistered { app_id: app.id });
        }
        tracing::debug!(app_id = %app.id, title = %app.title, "Registered application");
        self.apps.insert(app.id.clone(), app);
        Ok(())
    }

    /// Look up a registration
    pub fn get(&self, id: &str) -> Option<&AppRegistration> {
        self.apps.get(id)
    }

    /// Registered ids in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }

    /// Mount the application `id`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRegistered`] for an unknown id, or whatever the
    /// mount callback fails with.
    pub async fn mount(&self, id: &str, params: AppMountParams) -> Result<AppUnmount> {
        let app = self.get(id).ok_or_else(|| Error::NotRegistered {
            app_id: id.to_string(),
        })?;
        (app.mount)(params).await
    }
}

/// Services available during the setup phase
#[derive(Debug, Default)]
pub struct CoreSetup {
    /// Application registry
    pub application: ApplicationRegistry,
}

/// Services available during the start phase
#[derive(Debug, Clone)]
pub struct CoreStart {
    /// When the host entered the start phase
    pub started_at: DateTime<Utc>,
}

impl Default for CoreStart {
    fn default() -> Self {
        Self {
            started_at: Utc::now(),
        }
    }
}

/// Three-phase plugin lifecycle
pub trait Plugin {
    /// Host services handed to `setup`
    type CoreSetup;
    /// Host services handed to `start`
    type CoreStart;
    /// Capability returned from `setup`
    type Setup;
    /// Capability returned from `start`
    type Start;

    /// Register with the host
    ///
    /// # Errors
    ///
    /// Returns an error if registration with the host fails.
    fn setup(&mut self, core: &mut Self::CoreSetup) -> Result<Self::Setup>;

    /// Called once every plugin has been set up
    fn start(&mut self, core: &Self::CoreStart) -> Self::Start;

    /// Called on host shutdown
    fn stop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DashboardConfig;
    use crate::shell::StartServices;
    use crate::sources::{ShowcaseSource, TimestampSource};
    use crate::types::{Showcase, TimestampResponse};
    use async_trait::async_trait;
    use futures::FutureExt;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Fixed;

    #[async_trait]
    impl ShowcaseSource for Fixed {
        async fn fetch_showcase(&self) -> Result<Showcase> {
            Ok(Showcase::default())
        }
    }

    #[async_trait]
    impl TimestampSource for Fixed {
        async fn fetch_timestamp(&self) -> Result<TimestampResponse> {
            Ok(TimestampResponse::at(Utc::now()))
        }
    }

    fn shell() -> Arc<DashboardShell> {
        let config = DashboardConfig {
            refresh_on_mount: false,
            ..DashboardConfig::default()
        };
        DashboardShell::mount(
            config,
            StartServices {
                showcase: Arc::new(Fixed),
                timestamp: Arc::new(Fixed),
            },
        )
    }

    fn noop_app(id: &str) -> AppRegistration {
        AppRegistration {
            id: id.to_string(),
            title: id.to_string(),
            mount: Arc::new(|_params: AppMountParams| {
                async { Ok::<_, Error>(AppUnmount::new(|| async {}.boxed())) }.boxed()
            }),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_target_holds_one_shell() {
        let target = MountTarget::new();
        assert!(!target.is_mounted());

        let first = shell();
        target.attach(Arc::clone(&first)).unwrap();
        assert!(target.is_mounted());

        let second = shell();
        assert!(matches!(
            target.attach(Arc::clone(&second)),
            Err(Error::MountTargetOccupied)
        ));

        let detached = target.detach().unwrap();
        assert!(Arc::ptr_eq(&detached, &first));
        assert!(!target.is_mounted());

        target.attach(Arc::clone(&second)).unwrap();
        assert!(Arc::ptr_eq(&target.current().unwrap(), &second));

        first.unmount().await;
        second.unmount().await;
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut registry = ApplicationRegistry::default();
        registry.register(noop_app("mranv")).unwrap();
        registry.register(noop_app("other")).unwrap();

        let err = registry.register(noop_app("mranv")).unwrap_err();
        assert!(matches!(err, Error::AlreadyRegistered { ref app_id } if app_id == "mranv"));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["mranv", "other"]);
    }

    #[tokio::test]
    async fn test_registry_mount_unknown_app() {
        let registry = ApplicationRegistry::default();
        let params = AppMountParams {
            app_base_path: "/app/missing".to_string(),
            target: MountTarget::new(),
        };

        let err = registry.mount("missing", params).await.unwrap_err();
        assert!(matches!(err, Error::NotRegistered { .. }));
    }

    #[tokio::test]
    async fn test_app_unmount_runs_teardown() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let unmount = AppUnmount::new(move || {
            async move {
                flag.store(true, Ordering::SeqCst);
            }
            .boxed()
        });

        unmount.unmount().await;
        assert!(ran.load(Ordering::SeqCst));
    }
}
