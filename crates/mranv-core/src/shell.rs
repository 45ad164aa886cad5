//! Dashboard shell
//!
//! A [`DashboardShell`] is one mounted session of the dashboard. Mounting seeds
//! the telemetry, starts the periodic tick and (optionally) a showcase refresh.
//! Every background task is spawned on the shell's [`TaskTracker`] and watches
//! its [`CancellationToken`], so [`DashboardShell::unmount`] can stop them all
//! and wait for them before returning.
//!
//! State lives behind a single `parking_lot::RwLock`. Each mutation is a short
//! critical section that never spans an `.await`, and each one re-checks the
//! cancellation token while holding the write lock: once unmount has taken the
//! lock and cancelled, no later mutation can land.

use crate::config::DashboardConfig;
use crate::sources::{ShowcaseSource, TimestampSource};
use crate::telemetry::{self, TelemetryGenerator, TelemetryState};
use crate::types::{Showcase, ToastColor, ToastNotice};
use crate::views::{self, NavItem, Projection, ViewKey};
use chrono::{DateTime, Utc};
use metrics::counter;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, instrument, warn};

/// Toast shown when the showcase refresh succeeds
pub const REFRESH_SUCCESS_TITLE: &str = "New dog GIF loaded!";

/// Body of the toast shown when the showcase refresh fails
pub const REFRESH_FAILURE_TEXT: &str = "Failed to fetch dog GIF";

/// Toast shown when the timestamp call succeeds
pub const TIMESTAMP_SUCCESS_TITLE: &str = "Data updated";

/// Body of the toast shown when the timestamp call fails
pub const TIMESTAMP_FAILURE_TEXT: &str = "Failed to fetch timestamp";

const ERROR_TITLE: &str = "Error";

/// External collaborators a mounted shell may call
#[derive(Clone)]
pub struct StartServices {
    /// Source for the manual refresh action
    pub showcase: Arc<dyn ShowcaseSource>,
    /// Client for the timestamp endpoint
    pub timestamp: Arc<dyn TimestampSource>,
}

impl fmt::Debug for StartServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartServices").finish_non_exhaustive()
    }
}

/// State of the manual refresh action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshState {
    /// A refresh is in flight
    pub loading: bool,
    /// Current showcase item
    pub showcase: Showcase,
    /// Message of the most recent failure, cleared on success
    pub last_error: Option<String>,
}

/// Everything a mounted session owns
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Simulated component telemetry
    pub telemetry: TelemetryState,
    /// Toast tray, oldest first
    pub toasts: Vec<ToastNotice>,
    /// Active view
    pub selected: ViewKey,
    /// Manual refresh state
    pub refresh: RefreshState,
    /// Time returned by the last successful timestamp call
    pub last_timestamp: Option<String>,
    next_toast_id: u64,
}

impl DashboardState {
    /// Fresh state for a session mounted at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            telemetry: TelemetryState::seeded(now),
            toasts: Vec::new(),
            selected: ViewKey::default(),
            refresh: RefreshState::default(),
            last_timestamp: None,
            next_toast_id: 1,
        }
    }

    fn push_toast(&mut self, build: impl FnOnce(u64) -> ToastNotice) -> u64 {
        let id = self.next_toast_id;
        self.next_toast_id += 1;
        self.toasts.push(build(id));
        id
    }
}

/// Result of the manual refresh action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new showcase item is displayed
    Refreshed(Showcase),
    /// The fetch failed and an error toast was raised
    Failed(String),
    /// Another refresh was already in flight; nothing was done
    AlreadyPending,
    /// The shell was unmounted before the refresh could complete
    Unmounted,
}

/// Whether a background refresh was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshRequest {
    /// The loading flag is set and the fetch runs in the background
    Started,
    /// Another refresh was already in flight; nothing was done
    AlreadyPending,
    /// The shell is unmounted
    Unmounted,
}

/// Result of the "Get data" action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampOutcome {
    /// The server time was stored
    Updated(String),
    /// The call failed and an error toast was raised
    Failed(String),
    /// The shell was unmounted before the call could complete
    Unmounted,
}

/// Everything needed to render a mounted, ready dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyView {
    /// Side navigation
    pub navigation: Vec<NavItem>,
    /// Active view
    pub selected: ViewKey,
    /// Projection of the active view
    pub projection: Projection,
    /// Toast tray
    pub toasts: Vec<ToastNotice>,
    /// Whether a refresh is in flight
    pub refreshing: bool,
    /// Current showcase item
    pub showcase: Showcase,
    /// Last fetched server time
    pub last_timestamp: Option<String>,
}

/// What the shell currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ShellView {
    /// Inside the loading grace period after mount
    Loading,
    /// Dashboard content
    Ready(Box<ReadyView>),
}

/// Wall-clock time derived from the runtime clock
///
/// Anchoring to a tokio [`Instant`] makes timestamps follow paused time in tests.
#[derive(Debug, Clone, Copy)]
struct SessionClock {
    wall_origin: DateTime<Utc>,
    origin: Instant,
}

impl SessionClock {
    fn start() -> Self {
        Self {
            wall_origin: Utc::now(),
            origin: Instant::now(),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.origin.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.wall_origin + elapsed
    }
}

#[derive(Clone)]
struct ShellContext {
    config: Arc<DashboardConfig>,
    services: StartServices,
    state: Arc<RwLock<DashboardState>>,
    clock: SessionClock,
    cancel: CancellationToken,
    tasks: TaskTracker,
}

impl ShellContext {
    /// Apply `f` unless the shell has been unmounted
    fn mutate<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> Option<R> {
        let mut state = self.state.write();
        if self.cancel.is_cancelled() {
            return None;
        }
        Some(f(&mut state))
    }

    fn notify(&self, build: impl FnOnce(u64) -> ToastNotice) -> Option<u64> {
        let id = self.mutate(|state| state.push_toast(build))?;
        counter!("mranv_toasts_total").increment(1);
        self.schedule_toast_removal(id);
        Some(id)
    }

    fn schedule_toast_removal(&self, id: u64) {
        let ctx = self.clone();
        let lifetime = self.config.toast_lifetime();
        self.tasks.spawn(async move {
            tokio::select! {
                biased;
                () = ctx.cancel.cancelled() => {}
                () = tokio::time::sleep(lifetime) => {
                    ctx.mutate(|state| state.toasts.retain(|toast| toast.id != id));
                }
            }
        });
    }

    fn spawn_ticker(&self, mut generator: TelemetryGenerator) {
        let ctx = self.clone();
        let period = self.config.tick_interval();
        self.tasks.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    () = ctx.cancel.cancelled() => {
                        debug!("Telemetry ticker stopped");
                        break;
                    }
                    _ = ticker.tick() => ctx.on_tick(&mut generator),
                }
            }
        });
    }

    fn on_tick(&self, generator: &mut TelemetryGenerator) {
        let now = self.clock.now();
        let alert = self.mutate(|state| {
            let report = generator.tick(&mut state.telemetry, now);
            report
                .alert
                .map(|name| state.push_toast(|id| telemetry::event_toast(id, &name)))
        });
        counter!("mranv_ticks_total").increment(1);

        if let Some(Some(id)) = alert {
            counter!("mranv_toasts_total").increment(1);
            self.schedule_toast_removal(id);
        }
    }

    /// Set the loading flag unless a refresh already holds it
    fn claim_refresh(&self) -> RefreshRequest {
        let claimed = self.mutate(|state| {
            if state.refresh.loading {
                false
            } else {
                state.refresh.loading = true;
                true
            }
        });
        match claimed {
            None => RefreshRequest::Unmounted,
            Some(false) => {
                debug!("Refresh already in flight");
                RefreshRequest::AlreadyPending
            }
            Some(true) => RefreshRequest::Started,
        }
    }

    async fn run_refresh(&self) -> RefreshOutcome {
        match self.claim_refresh() {
            RefreshRequest::Started => self.complete_refresh().await,
            RefreshRequest::AlreadyPending => RefreshOutcome::AlreadyPending,
            RefreshRequest::Unmounted => RefreshOutcome::Unmounted,
        }
    }

    /// Fetch and store a showcase item; the loading flag must already be held
    async fn complete_refresh(&self) -> RefreshOutcome {
        let result = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return RefreshOutcome::Unmounted,
            result = self.services.showcase.fetch_showcase() => result,
        };

        match result {
            Ok(showcase) => {
                let stored = self.mutate(|state| {
                    state.refresh.loading = false;
                    state.refresh.last_error = None;
                    state.refresh.showcase = showcase.clone();
                });
                if stored.is_none() {
                    return RefreshOutcome::Unmounted;
                }
                counter!("mranv_refresh_total", "outcome" => "success").increment(1);
                info!(id = %showcase.id, "Showcase refreshed");
                self.notify(|id| ToastNotice::new(id, REFRESH_SUCCESS_TITLE, ToastColor::Success));
                RefreshOutcome::Refreshed(showcase)
            }
            Err(e) => {
                let message = e.to_string();
                let stored = self.mutate(|state| {
                    state.refresh.loading = false;
                    state.refresh.last_error = Some(message.clone());
                });
                if stored.is_none() {
                    return RefreshOutcome::Unmounted;
                }
                counter!("mranv_refresh_total", "outcome" => "failure").increment(1);
                warn!(error = %e, "Showcase refresh failed");
                self.notify(|id| {
                    ToastNotice::new(id, ERROR_TITLE, ToastColor::Danger)
                        .with_text(REFRESH_FAILURE_TEXT)
                });
                RefreshOutcome::Failed(message)
            }
        }
    }

    async fn run_fetch_timestamp(&self) -> TimestampOutcome {
        if self.cancel.is_cancelled() {
            return TimestampOutcome::Unmounted;
        }

        let result = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return TimestampOutcome::Unmounted,
            result = self.services.timestamp.fetch_timestamp() => result,
        };

        match result {
            Ok(response) => {
                let time = response.time;
                if self
                    .mutate(|state| state.last_timestamp = Some(time.clone()))
                    .is_none()
                {
                    return TimestampOutcome::Unmounted;
                }
                debug!(%time, "Timestamp updated");
                self.notify(|id| ToastNotice::new(id, TIMESTAMP_SUCCESS_TITLE, ToastColor::Success));
                TimestampOutcome::Updated(time)
            }
            Err(e) => {
                warn!(error = %e, "Timestamp request failed");
                let raised = self.notify(|id| {
                    ToastNotice::new(id, ERROR_TITLE, ToastColor::Danger)
                        .with_text(TIMESTAMP_FAILURE_TEXT)
                });
                if raised.is_none() {
                    return TimestampOutcome::Unmounted;
                }
                TimestampOutcome::Failed(e.to_string())
            }
        }
    }
}

/// One mounted dashboard session
pub struct DashboardShell {
    ctx: ShellContext,
}

impl DashboardShell {
    /// Mount a new session and start its background tasks
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip_all, fields(tick_ms = config.tick_interval_ms))]
    pub fn mount(config: DashboardConfig, services: StartServices) -> Arc<Self> {
        let clock = SessionClock::start();
        let generator = TelemetryGenerator::new(config.seed, config.toast_probability);
        let refresh_on_mount = config.refresh_on_mount;

        let ctx = ShellContext {
            config: Arc::new(config),
            services,
            state: Arc::new(RwLock::new(DashboardState::new(clock.now()))),
            clock,
            cancel: CancellationToken::new(),
            tasks: TaskTracker::new(),
        };

        ctx.spawn_ticker(generator);

        if refresh_on_mount {
            let refresher = ctx.clone();
            ctx.tasks.spawn(async move {
                refresher.run_refresh().await;
            });
        }

        counter!("mranv_mounts_total").increment(1);
        info!("Dashboard mounted");
        Arc::new(Self { ctx })
    }

    /// Stop every background task and wait for them to finish
    ///
    /// Idempotent. Once this returns the state never changes again.
    #[instrument(skip(self))]
    pub async fn unmount(&self) {
        {
            let _state = self.ctx.state.write();
            self.ctx.cancel.cancel();
        }
        self.ctx.tasks.close();
        self.ctx.tasks.wait().await;
        info!("Dashboard unmounted");
    }

    /// Whether the shell is still live
    pub fn is_mounted(&self) -> bool {
        !self.ctx.cancel.is_cancelled()
    }

    /// Whether the loading grace period is still running
    pub fn is_loading(&self) -> bool {
        self.ctx.clock.origin.elapsed() < self.ctx.config.loading_grace()
    }

    /// Select a view by navigation key
    ///
    /// Unknown keys select the overview. Returns the view now active.
    pub fn select(&self, key: &str) -> ViewKey {
        let view = ViewKey::from_key(key);
        if self.ctx.mutate(|state| state.selected = view).is_some() {
            debug!(view = %view, "View selected");
        }
        view
    }

    /// Currently selected view
    pub fn selected_view(&self) -> ViewKey {
        self.ctx.state.read().selected
    }

    /// Project a view without changing the selection
    pub fn project(&self, key: &str) -> Projection {
        views::project(ViewKey::from_key(key), &self.ctx.state.read().telemetry)
    }

    /// Render the current view
    pub fn render(&self) -> ShellView {
        if self.is_loading() {
            return ShellView::Loading;
        }

        let state = self.ctx.state.read();
        ShellView::Ready(Box::new(ReadyView {
            navigation: views::navigation(state.selected),
            selected: state.selected,
            projection: views::project(state.selected, &state.telemetry),
            toasts: state.toasts.clone(),
            refreshing: state.refresh.loading,
            showcase: state.refresh.showcase.clone(),
            last_timestamp: state.last_timestamp.clone(),
        }))
    }

    /// Fetch a new showcase item
    ///
    /// Single-flight: while a refresh is pending, further calls return
    /// [`RefreshOutcome::AlreadyPending`] without raising a toast. The work
    /// runs on the shell's task tracker so unmount waits for it.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ctx = self.ctx.clone();
        match self.ctx.tasks.spawn(async move { ctx.run_refresh().await }).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Refresh task aborted");
                RefreshOutcome::Unmounted
            }
        }
    }

    /// Start a refresh in the background and return without waiting for it
    ///
    /// The loading flag is set before this returns, so the next render shows
    /// the in-flight state. Single-flight like [`Self::refresh`], and unmount
    /// waits for the fetch.
    pub fn spawn_refresh(&self) -> RefreshRequest {
        let request = self.ctx.claim_refresh();
        if request == RefreshRequest::Started {
            let ctx = self.ctx.clone();
            self.ctx.tasks.spawn(async move {
                let outcome = ctx.complete_refresh().await;
                debug!(?outcome, "Background refresh finished");
            });
        }
        request
    }

    /// Ask the server for its time and store it
    pub async fn fetch_timestamp(&self) -> TimestampOutcome {
        let ctx = self.ctx.clone();
        match self
            .ctx
            .tasks
            .spawn(async move { ctx.run_fetch_timestamp().await })
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Timestamp task aborted");
                TimestampOutcome::Unmounted
            }
        }
    }

    /// Toast tray, oldest first
    pub fn toasts(&self) -> Vec<ToastNotice> {
        self.ctx.state.read().toasts.clone()
    }

    /// Remove a toast before its lifetime ends
    ///
    /// Returns whether a toast was removed.
    pub fn dismiss_toast(&self, id: u64) -> bool {
        self.ctx
            .mutate(|state| {
                let before = state.toasts.len();
                state.toasts.retain(|toast| toast.id != id);
                state.toasts.len() != before
            })
            .unwrap_or(false)
    }

    /// Copy of the full session state
    pub fn snapshot(&self) -> DashboardState {
        self.ctx.state.read().clone()
    }
}

impl Drop for DashboardShell {
    fn drop(&mut self) {
        self.ctx.cancel.cancel();
        self.ctx.tasks.close();
    }
}

impl fmt::Debug for DashboardShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardShell")
            .field("mounted", &self.is_mounted())
            .field("tasks", &self.ctx.tasks.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::types::TimestampResponse;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct StubSource {
        fail: bool,
        delay: Duration,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ShowcaseSource for StubSource {
        async fn fetch_showcase(&self) -> Result<Showcase> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(Error::fetch("random GIF", "HTTP 500"));
            }
            Ok(Showcase::from_id(format!("gif-{n}")))
        }
    }

    #[async_trait]
    impl TimestampSource for StubSource {
        async fn fetch_timestamp(&self) -> Result<TimestampResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(Error::fetch("timestamp", "connection refused"));
            }
            Ok(TimestampResponse {
                time: "2024-06-01T12:00:00.000Z".to_string(),
            })
        }
    }

    fn quiet_config() -> DashboardConfig {
        DashboardConfig {
            seed: Some(7),
            toast_probability: 0.0,
            refresh_on_mount: false,
            ..DashboardConfig::default()
        }
    }

    fn mount_with(config: DashboardConfig, source: Arc<StubSource>) -> Arc<DashboardShell> {
        DashboardShell::mount(
            config,
            StartServices {
                showcase: source.clone(),
                timestamp: source,
            },
        )
    }

    fn titles(shell: &DashboardShell) -> Vec<String> {
        shell.toasts().into_iter().map(|t| t.title).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_grace_period() {
        let shell = mount_with(quiet_config(), Arc::default());

        assert!(shell.is_loading());
        assert_eq!(shell.render(), ShellView::Loading);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(!shell.is_loading());
        let ShellView::Ready(view) = shell.render() else {
            panic!("expected ready view");
        };
        assert_eq!(view.selected, ViewKey::Overview);
        assert_eq!(view.navigation.len(), 3);
        assert_eq!(view.showcase, Showcase::default());
        assert!(view.last_timestamp.is_none());

        shell.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_after_interval() {
        let shell = mount_with(quiet_config(), Arc::default());
        let before = shell.snapshot();

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert_eq!(shell.snapshot().telemetry, before.telemetry);

        tokio::time::sleep(Duration::from_millis(2)).await;
        let after = shell.snapshot();
        assert_eq!(after.telemetry.scan_progress, 2);

        for (old, new) in before
            .telemetry
            .components
            .iter()
            .zip(&after.telemetry.components)
        {
            assert!(new.last_update > old.last_update);
            assert!(new.detections >= old.detections);
            assert!(new.detections - old.detections <= 2);
        }

        shell.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_mutation_after_unmount() {
        let config = DashboardConfig {
            toast_probability: 1.0,
            ..quiet_config()
        };
        let shell = mount_with(config, Arc::default());
        tokio::time::sleep(Duration::from_millis(3100)).await;

        shell.unmount().await;
        assert!(!shell.is_mounted());
        let frozen = shell.snapshot();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(shell.snapshot(), frozen);

        assert_eq!(shell.select("analytics"), ViewKey::Analytics);
        assert_eq!(shell.selected_view(), ViewKey::Overview);
        assert_eq!(shell.refresh().await, RefreshOutcome::Unmounted);
        assert_eq!(shell.fetch_timestamp().await, TimestampOutcome::Unmounted);
        assert_eq!(shell.snapshot(), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_toast_expires() {
        let config = DashboardConfig {
            toast_probability: 1.0,
            ..quiet_config()
        };
        let shell = mount_with(config, Arc::default());

        tokio::time::sleep(Duration::from_millis(3001)).await;
        let toasts = shell.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].color, ToastColor::Warning);
        assert!(toasts[0].title.ends_with("new security event detected"));

        // Second tick at 6000 ms adds one toast, the first expires at the same instant.
        tokio::time::sleep(Duration::from_millis(2998)).await;
        assert_eq!(shell.toasts().len(), 1);
        tokio::time::sleep(Duration::from_millis(10)).await;
        let ids: Vec<u64> = shell.toasts().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);

        shell.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_and_project() {
        let shell = mount_with(quiet_config(), Arc::default());

        assert_eq!(shell.select("components"), ViewKey::Components);
        assert_eq!(shell.selected_view(), ViewKey::Components);
        assert_eq!(shell.select("nonsense"), ViewKey::Overview);
        assert_eq!(shell.project("nonsense"), shell.project("overview"));
        assert_eq!(shell.project("analytics").key(), ViewKey::Analytics);

        shell.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_success() {
        let source = Arc::new(StubSource::default());
        let shell = mount_with(quiet_config(), Arc::clone(&source));

        let outcome = shell.refresh().await;
        assert_eq!(outcome, RefreshOutcome::Refreshed(Showcase::from_id("gif-0")));

        let state = shell.snapshot();
        assert!(!state.refresh.loading);
        assert_eq!(state.refresh.showcase.id, "gif-0");
        assert_eq!(titles(&shell), vec![REFRESH_SUCCESS_TITLE]);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        assert!(shell.toasts().is_empty());

        shell.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_failure_keeps_showcase() {
        let source = Arc::new(StubSource {
            fail: true,
            ..StubSource::default()
        });
        let shell = mount_with(quiet_config(), source);

        let outcome = shell.refresh().await;
        assert!(matches!(outcome, RefreshOutcome::Failed(ref m) if m.contains("HTTP 500")));

        let state = shell.snapshot();
        assert!(!state.refresh.loading);
        assert_eq!(state.refresh.showcase, Showcase::default());
        assert!(state.refresh.last_error.is_some());

        let toasts = shell.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Error");
        assert_eq!(toasts[0].text.as_deref(), Some(REFRESH_FAILURE_TEXT));
        assert_eq!(toasts[0].color, ToastColor::Danger);

        shell.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_refresh_is_single_flight() {
        let source = Arc::new(StubSource {
            delay: Duration::from_millis(200),
            ..StubSource::default()
        });
        let shell = mount_with(quiet_config(), Arc::clone(&source));

        let (a, b) = tokio::join!(shell.refresh(), shell.refresh());
        let outcomes = [a, b];

        assert_eq!(
            outcomes
                .iter()
                .filter(|o| matches!(o, RefreshOutcome::Refreshed(_)))
                .count(),
            1
        );
        assert!(outcomes.contains(&RefreshOutcome::AlreadyPending));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(titles(&shell), vec![REFRESH_SUCCESS_TITLE]);

        shell.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_refresh_returns_before_fetch() {
        let source = Arc::new(StubSource {
            delay: Duration::from_secs(8),
            ..StubSource::default()
        });
        let shell = mount_with(quiet_config(), Arc::clone(&source));

        assert_eq!(shell.spawn_refresh(), RefreshRequest::Started);
        assert!(shell.snapshot().refresh.loading);

        assert_eq!(shell.spawn_refresh(), RefreshRequest::AlreadyPending);
        assert_eq!(shell.refresh().await, RefreshOutcome::AlreadyPending);

        tokio::time::sleep(Duration::from_millis(8010)).await;
        let state = shell.snapshot();
        assert!(!state.refresh.loading);
        assert_eq!(state.refresh.showcase.id, "gif-0");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(titles(&shell), vec![REFRESH_SUCCESS_TITLE]);

        shell.unmount().await;
        assert_eq!(shell.spawn_refresh(), RefreshRequest::Unmounted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_waits_for_spawned_refresh() {
        let source = Arc::new(StubSource {
            delay: Duration::from_secs(60),
            ..StubSource::default()
        });
        let shell = mount_with(quiet_config(), source);

        assert_eq!(shell.spawn_refresh(), RefreshRequest::Started);
        tokio::time::sleep(Duration::from_millis(10)).await;

        shell.unmount().await;
        assert!(shell.toasts().is_empty());
        assert_eq!(shell.snapshot().refresh.showcase, Showcase::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_on_mount() {
        let source = Arc::new(StubSource::default());
        let config = DashboardConfig {
            refresh_on_mount: true,
            ..quiet_config()
        };
        let shell = mount_with(config, Arc::clone(&source));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(shell.snapshot().refresh.showcase.id, "gif-0");

        shell.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_cancels_pending_refresh() {
        let source = Arc::new(StubSource {
            delay: Duration::from_secs(60),
            ..StubSource::default()
        });
        let shell = mount_with(quiet_config(), source);

        let pending = {
            let shell = Arc::clone(&shell);
            tokio::spawn(async move { shell.refresh().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(shell.snapshot().refresh.loading);

        shell.unmount().await;
        assert_eq!(pending.await.unwrap(), RefreshOutcome::Unmounted);
        assert!(shell.toasts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_timestamp() {
        let shell = mount_with(quiet_config(), Arc::default());

        assert_eq!(
            shell.fetch_timestamp().await,
            TimestampOutcome::Updated("2024-06-01T12:00:00.000Z".to_string())
        );
        assert_eq!(
            shell.snapshot().last_timestamp.as_deref(),
            Some("2024-06-01T12:00:00.000Z")
        );
        assert_eq!(titles(&shell), vec![TIMESTAMP_SUCCESS_TITLE]);

        shell.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_timestamp_failure() {
        let source = Arc::new(StubSource {
            fail: true,
            ..StubSource::default()
        });
        let shell = mount_with(quiet_config(), source);

        assert!(matches!(
            shell.fetch_timestamp().await,
            TimestampOutcome::Failed(_)
        ));
        assert!(shell.snapshot().last_timestamp.is_none());
        let toasts = shell.toasts();
        assert_eq!(toasts[0].text.as_deref(), Some(TIMESTAMP_FAILURE_TEXT));

        shell.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_toast() {
        let shell = mount_with(quiet_config(), Arc::default());
        shell.fetch_timestamp().await;
        let id = shell.toasts()[0].id;

        assert!(shell.dismiss_toast(id));
        assert!(!shell.dismiss_toast(id));
        assert!(shell.toasts().is_empty());

        shell.unmount().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_tasks() {
        let shell = mount_with(quiet_config(), Arc::default());
        let tracker = shell.ctx.tasks.clone();
        drop(shell);

        tokio::time::timeout(Duration::from_secs(1), tracker.wait())
            .await
            .unwrap();
    }
}
