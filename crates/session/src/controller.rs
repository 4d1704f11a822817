use std::cell::RefCell;
use std::fmt;
use std::future::IntoFuture;
use std::rc::Rc;

use foundation::geo::LatLng;
use foundation::time::Time;
use layers::{Layer, MarkerStyle, OverlayLayer};
use runtime::clock::Clock;
use runtime::event_bus::EventBus;
use runtime::single_flight::SharedTask;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::LocationError;
use crate::event::AppEvent;
use crate::follow::{FollowController, FollowDecision};
use crate::intro::{IntroPhase, IntroWhisper};
use crate::lens::Lens;
use crate::overlay_loader::{OverlayLoader, OverlaySource};
use crate::position::{PositionTracker, UserPosition};
use crate::speak::{SpeakGate, Speech};
use crate::status::StatusDisplay;
use crate::view::MapView;

/// Actions overlay load the host must await before calling
/// [`Session::overlay_ready`]. [`SessionHandle::dispatch`] does both.
#[must_use = "the overlay is only attached once the load is awaited"]
pub struct PendingOverlay {
    task: SharedTask<Rc<OverlayLayer>>,
}

impl fmt::Debug for PendingOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingOverlay").finish_non_exhaustive()
    }
}

impl IntoFuture for PendingOverlay {
    type Output = Rc<OverlayLayer>;
    type IntoFuture = SharedTask<Rc<OverlayLayer>>;

    fn into_future(self) -> Self::IntoFuture {
        self.task
    }
}

/// All state of one map session, from startup to teardown.
///
/// Every input arrives through [`Session::dispatch`] on the host's single
/// event thread. The only suspension point is the actions overlay load,
/// which is handed back to the host as a [`PendingOverlay`].
pub struct Session<M: MapView, S: StatusDisplay> {
    config: SessionConfig,
    map: M,
    status: S,
    clock: Rc<dyn Clock>,
    tracker: PositionTracker,
    follow: FollowController,
    gate: SpeakGate,
    intro: IntroWhisper,
    lens: Lens,
    loader: OverlayLoader,
    menu_open: bool,
    location_error_shown: bool,
    started_at: Option<Time>,
    bus: EventBus,
}

impl<M: MapView, S: StatusDisplay> Session<M, S> {
    pub fn new(
        config: SessionConfig,
        map: M,
        status: S,
        clock: Rc<dyn Clock>,
        source: Rc<dyn OverlaySource>,
    ) -> Self {
        Self {
            follow: FollowController::new(config.follow_grace_s, config.follow_min_zoom),
            gate: SpeakGate::new(config.speak_zoom),
            intro: IntroWhisper::new(config.intro_visible_s, config.intro_fade_s),
            loader: OverlayLoader::new(source, config.actions_url.clone()),
            config,
            map,
            status,
            clock,
            tracker: PositionTracker::new(),
            lens: Lens::default(),
            menu_open: false,
            location_error_shown: false,
            started_at: None,
            bus: EventBus::new(),
        }
    }

    /// Put the view on the default location and start silent.
    pub fn start(&mut self, location_available: bool) {
        let now = self.clock.now();
        self.started_at = Some(now);
        let home = &self.config.default_view;
        self.map.set_view(home.center(), home.zoom, false);
        self.status.hide();
        info!(lens = %self.lens, "session started");
        if !location_available {
            self.bus.emit(now, "position_error", "unsupported");
            self.on_location_error(LocationError::Unsupported);
        }
    }

    pub fn dispatch(&mut self, event: AppEvent) -> Option<PendingOverlay> {
        self.bus
            .emit(self.clock.now(), event.kind(), format!("{event:?}"));
        match event {
            AppEvent::PositionUpdated(coord) => self.on_position(coord),
            AppEvent::PositionFailed(err) => self.on_location_error(err),
            AppEvent::GestureStarted => self.on_gesture_start(),
            AppEvent::ViewSettled => {
                self.maybe_speak(false);
            }
            AppEvent::LensSelected(lens) => {
                self.menu_open = false;
                return self.select_lens(lens);
            }
            AppEvent::RecenterRequested => self.recenter(),
            AppEvent::MenuToggled => {
                self.toggle_menu();
            }
        }
        None
    }

    pub fn on_position(&mut self, coord: LatLng) {
        let now = self.clock.now();
        if let Some(moved_m) = self.tracker.update(coord, now) {
            debug!(moved_m, "position update");
        }
        self.map.place_user_marker(coord, &MarkerStyle::USER);

        let zoom = self.map.view().zoom;
        match self.follow.on_position(&self.tracker, zoom, now) {
            FollowDecision::Recenter(r) => self.map.set_view(r.center, r.zoom, r.animate),
            other => debug!(?other, "soft follow skipped"),
        }

        self.maybe_speak(false);
    }

    /// Feed errors are logged every time but shown once per session.
    pub fn on_location_error(&mut self, err: LocationError) {
        warn!(error = %err, "location unavailable");
        if self.location_error_shown {
            return;
        }
        self.location_error_shown = true;
        self.status.show(err.user_message());
    }

    pub fn on_gesture_start(&mut self) {
        let now = self.clock.now();
        self.follow.on_gesture(&mut self.tracker, now);
        debug!("manual gesture, follow paused");
    }

    /// Explicit recenter: resume following and jump to the last fix.
    pub fn recenter(&mut self) {
        let zoom = self.map.view().zoom;
        match self.follow.recenter(&self.tracker, zoom) {
            Some(r) => self.map.set_view(r.center, r.zoom, r.animate),
            None => debug!("recenter requested before any fix"),
        }
        self.maybe_speak(false);
    }

    /// Switch lens. The actions overlay is detached first in every case and
    /// re-attached only once its data is available.
    pub fn select_lens(&mut self, lens: Lens) -> Option<PendingOverlay> {
        info!(%lens, "lens selected");
        self.lens = lens;

        let id = self.loader.layer_id();
        if self.map.has_overlay(id) {
            self.map.detach_overlay(id);
        }

        if !lens.shows_actions() {
            self.maybe_speak(true);
            return None;
        }

        if let Some(overlay) = self.loader.loaded() {
            self.overlay_ready(overlay);
            return None;
        }
        Some(PendingOverlay {
            task: self.loader.ensure_loaded(),
        })
    }

    /// Attach a finished overlay load. Ignored when the user has left the
    /// actions lens in the meantime. Returns whether the overlay is shown.
    pub fn overlay_ready(&mut self, overlay: Rc<OverlayLayer>) -> bool {
        if !self.lens.shows_actions() {
            debug!(lens = %self.lens, "actions overlay ready after lens change");
            return false;
        }
        if !self.map.has_overlay(overlay.id()) {
            self.map.attach_overlay(&overlay);
            debug!(layer = %overlay.id(), features = overlay.feature_count(), "overlay attached");
        }
        self.maybe_speak(true);
        true
    }

    pub fn maybe_speak(&mut self, force: bool) -> Speech {
        let zoom = self.map.view().zoom;
        let speech = self.gate.evaluate(zoom, self.lens, force);
        debug!(zoom, lens = %self.lens, force, ?speech, "speak gate");
        speech.apply_to(&mut self.status);
        speech
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn lens(&self) -> Lens {
        self.lens
    }

    pub fn is_following(&self) -> bool {
        self.follow.is_following()
    }

    pub fn last_position(&self) -> Option<UserPosition> {
        self.tracker.latest()
    }

    pub fn intro_phase(&self) -> IntroPhase {
        match self.started_at {
            Some(t0) => self.intro.phase(self.clock.now().since(t0)),
            None => IntroPhase::Visible,
        }
    }

    pub fn intro(&self) -> IntroWhisper {
        self.intro
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }
}

/// Shared, single-threaded handle to a [`Session`] for event callbacks.
pub struct SessionHandle<M: MapView, S: StatusDisplay> {
    inner: Rc<RefCell<Session<M, S>>>,
}

impl<M: MapView, S: StatusDisplay> Clone for SessionHandle<M, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<M: MapView, S: StatusDisplay> SessionHandle<M, S> {
    pub fn new(session: Session<M, S>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(session)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Session<M, S>) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// Handle the synchronous part of `event` now. A returned load goes to
    /// [`SessionHandle::complete`].
    pub fn dispatch_sync(&self, event: AppEvent) -> Option<PendingOverlay> {
        self.inner.borrow_mut().dispatch(event)
    }

    /// Await an overlay load and hand it to the session. No borrow is held
    /// across the await.
    pub async fn complete(&self, pending: PendingOverlay) -> bool {
        let overlay = pending.await;
        self.inner.borrow_mut().overlay_ready(overlay)
    }

    /// Dispatch an event and, for the actions lens, finish the overlay load.
    pub async fn dispatch(&self, event: AppEvent) {
        if let Some(pending) = self.dispatch_sync(event) {
            self.complete(pending).await;
        }
    }
}
