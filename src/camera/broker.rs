use crate::camera::{CameraUpdate, LocationTracker};
use crate::config::{CameraConfig, MapConfig};
use crate::geometry::Point;
use crate::location::{Location, LocationSource};
use crate::survey::{CameraPositionStore, Survey, SurveyRepository};
use futures::Stream;
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

static GLOBAL: OnceLock<Arc<CameraUpdateBroker>> = OnceLock::new();

/// Explicit requests retained for a subscriber whose merge task falls behind
const EXPLICIT_BUFFER: usize = 64;

/// Merges camera update requests into one stream per map surface
///
/// Three origins feed every subscriber:
/// - explicit requests (`request_pan_and_zoom_in`), coalesced to the latest
///   pending request when the subscriber is slow
/// - location fixes, the first one zooming in, later ones panning
/// - active survey changes, restoring the survey's saved camera position
///   or panning to the fallback point
pub struct CameraUpdateBroker {
    /// Explicit requests, fanned out to every subscriber
    explicit_tx: broadcast::Sender<CameraUpdate>,

    locations: Arc<LocationSource>,
    surveys: Arc<SurveyRepository>,

    camera_config: CameraConfig,
    subscriber_buffer: usize,
}

impl CameraUpdateBroker {
    pub fn new(
        locations: Arc<LocationSource>,
        surveys: Arc<SurveyRepository>,
        config: &MapConfig,
    ) -> Self {
        let (explicit_tx, _) = broadcast::channel(EXPLICIT_BUFFER);

        Self {
            explicit_tx,
            locations,
            surveys,
            camera_config: config.camera.clone(),
            subscriber_buffer: config.broker.subscriber_buffer.max(1),
        }
    }

    /// Process-wide broker over the process-wide location source and survey
    /// repository, configured from the environment on first use
    pub fn global() -> Arc<CameraUpdateBroker> {
        GLOBAL
            .get_or_init(|| {
                let config = MapConfig::from_env();
                let locations = Arc::new(LocationSource::new(config.broker.location_buffer));
                let surveys = Arc::new(SurveyRepository::new());
                info!("Camera update broker initialized");
                Arc::new(CameraUpdateBroker::new(locations, surveys, &config))
            })
            .clone()
    }

    pub fn locations(&self) -> &Arc<LocationSource> {
        &self.locations
    }

    pub fn surveys(&self) -> &Arc<SurveyRepository> {
        &self.surveys
    }

    /// Ask every map surface to pan and zoom in to `position`
    pub fn request_pan_and_zoom_in(&self, position: Point) {
        debug!(target = %position, "Pan and zoom requested");
        // No subscribers is fine
        let _ = self.explicit_tx.send(CameraUpdate::pan_and_zoom_in(position));
    }

    /// Number of live subscriber streams
    pub fn subscriber_count(&self) -> usize {
        self.explicit_tx.receiver_count()
    }

    /// Subscribe to the merged camera update stream.
    ///
    /// Must be called within a tokio runtime. The stream first yields the
    /// update for the current survey state, then every update from any
    /// source in arrival order. Dropping the stream stops its merge task.
    pub fn subscribe(&self) -> CameraUpdateStream {
        let (update_tx, update_rx) = mpsc::channel(self.subscriber_buffer);

        let explicit_rx = self.explicit_tx.subscribe();
        let location_rx = self.locations.subscribe();
        // Subscribe to changes before reading the current survey so none is missed
        let survey_rx = self.surveys.subscribe_survey_changes();
        let current_survey = self.surveys.active_survey();

        let task = tokio::spawn(run_merge(
            update_tx,
            MergeSources {
                explicit_rx,
                location_rx,
                survey_rx,
            },
            current_survey,
            Arc::clone(&self.surveys),
            self.camera_config.clone(),
        ));

        info!(subscribers = self.subscriber_count(), "Camera update subscriber added");

        CameraUpdateStream {
            inner: ReceiverStream::new(update_rx),
            task,
        }
    }
}

/// Camera update for a newly active survey (or the lack of one)
pub(crate) fn survey_camera_update(
    survey: Option<&Survey>,
    store: &dyn CameraPositionStore,
    config: &CameraConfig,
) -> CameraUpdate {
    survey
        .and_then(|s| store.last_camera_position(&s.id))
        .map(|position| CameraUpdate::pan_and_zoom(position, config.default_zoom_level))
        .unwrap_or_else(|| CameraUpdate::pan(config.fallback_point()))
}

struct MergeSources {
    explicit_rx: broadcast::Receiver<CameraUpdate>,
    location_rx: broadcast::Receiver<Location>,
    survey_rx: broadcast::Receiver<Option<Survey>>,
}

/// An update waiting for room in the subscriber's buffer
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Pending {
    Explicit(CameraUpdate),
    Derived(CameraUpdate),
}

impl Pending {
    fn update(&self) -> CameraUpdate {
        match self {
            Pending::Explicit(update) | Pending::Derived(update) => *update,
        }
    }

    fn is_explicit(&self) -> bool {
        matches!(self, Pending::Explicit(_))
    }
}

/// Hand `pending` to the subscriber, queueing it when the buffer is full.
///
/// The queue is only non-empty while the subscriber's buffer is full, so an
/// explicit request replacing an older queued one only happens under
/// backpressure. Derived updates are never replaced. Returns false once the
/// subscriber is gone.
pub(crate) fn forward(
    update_tx: &mpsc::Sender<CameraUpdate>,
    outbound: &mut VecDeque<Pending>,
    pending: Pending,
) -> bool {
    if outbound.is_empty() {
        match update_tx.try_send(pending.update()) {
            Ok(()) => return true,
            Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Closed(_)) => return false,
        }
    } else if pending.is_explicit() {
        outbound.retain(|p| !p.is_explicit());
    }
    outbound.push_back(pending);
    true
}

/// Per-subscriber merge loop
///
/// Delivers serially into `update_tx`. Sources are drained as they arrive;
/// updates that don't fit the subscriber's buffer wait in `outbound` in
/// arrival order.
async fn run_merge(
    update_tx: mpsc::Sender<CameraUpdate>,
    sources: MergeSources,
    current_survey: Option<Survey>,
    store: Arc<SurveyRepository>,
    config: CameraConfig,
) {
    let MergeSources {
        mut explicit_rx,
        mut location_rx,
        mut survey_rx,
    } = sources;

    let mut tracker = LocationTracker::new();
    let mut outbound: VecDeque<Pending> = VecDeque::new();
    let mut explicit_open = true;
    let mut locations_open = true;
    let mut surveys_open = true;

    let initial = survey_camera_update(current_survey.as_ref(), &*store, &config);
    if !forward(&update_tx, &mut outbound, Pending::Derived(initial)) {
        return;
    }

    loop {
        let pending = tokio::select! {
            permit = update_tx.reserve(), if !outbound.is_empty() => {
                let Ok(permit) = permit else { break };
                if let Some(next) = outbound.pop_front() {
                    permit.send(next.update());
                }
                continue;
            }

            result = explicit_rx.recv(), if explicit_open => {
                match result {
                    Ok(update) => Pending::Explicit(update),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped = skipped, "Camera subscriber lagged, skipped explicit requests");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        explicit_open = false;
                        continue;
                    }
                }
            }

            result = location_rx.recv(), if locations_open => {
                match result {
                    Ok(location) => Pending::Derived(tracker.next(location.to_point())),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped = skipped, "Camera subscriber lagged, skipped location updates");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        locations_open = false;
                        continue;
                    }
                }
            }

            result = survey_rx.recv(), if surveys_open => {
                match result {
                    Ok(survey) => Pending::Derived(survey_camera_update(survey.as_ref(), &*store, &config)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped = skipped, "Camera subscriber lagged, skipped survey changes");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        surveys_open = false;
                        continue;
                    }
                }
            }

            _ = update_tx.closed() => break,

            else => break,
        };

        if !forward(&update_tx, &mut outbound, pending) {
            break;
        }
    }

    debug!(queued = outbound.len(), "Camera update subscriber closed");
}

/// Merged camera updates for one subscriber
pub struct CameraUpdateStream {
    inner: ReceiverStream<CameraUpdate>,
    task: JoinHandle<()>,
}

impl Stream for CameraUpdateStream {
    type Item = CameraUpdate;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl Drop for CameraUpdateStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}
