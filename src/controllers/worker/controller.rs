use log::{debug, error, info};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::time::{Duration, Instant};

use crate::controllers::worker::data::frame_data::FrameData;
use crate::controllers::worker::events::render_event::RenderEvent;
use crate::controllers::worker::ports::presenter_port::RenderPresenterPort;
use crate::controllers::worker::worker::Worker;
use crate::core::actions::async_task::{AsyncTask, TaskOutcome};
use crate::core::actions::cancellation::CancellationFlag;
use crate::core::actions::render_task::{FractalRenderTask, SplitPolicy};
use crate::core::data::circle_area::CircleArea;
use crate::core::data::fractal_image::FractalImage;
use crate::core::data::rect_area::RectArea;
use crate::core::fractals::evaluator::FractalEvaluator;

/// Handle returned by [`WorkerController::add_listener`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// The three inputs of a render; a task is only built once all are present.
///
/// `image` only fixes the size. Every task renders into its own blank copy, so a
/// cancelled task that is still finishing a row never writes into its successor.
#[derive(Debug, Default, Clone)]
struct TaskDefinition {
    image: Option<FractalImage>,
    evaluator: Option<Arc<FractalEvaluator>>,
    area: Option<RectArea>,
}

impl TaskDefinition {
    fn build(&self, policy: SplitPolicy) -> Option<FractalRenderTask> {
        match (&self.image, &self.evaluator, &self.area) {
            (Some(image), Some(evaluator), Some(area)) => Some(FractalRenderTask::new(
                image.blank_copy(),
                Arc::clone(evaluator),
                area.clone(),
                policy,
            )),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct CurrentTask {
    generation: u64,
    cancel: CancellationFlag,
}

#[derive(Debug, Default)]
struct ControllerState {
    definition: TaskDefinition,
    generation: u64,
    current: Option<CurrentTask>,
    last_completed_generation: u64,
    last_frame: Option<FrameData>,
}

struct Shared {
    worker: Worker,
    policy: SplitPolicy,
    state: Mutex<ControllerState>,
    idle: Condvar,
    listeners: RwLock<Vec<(ListenerId, Arc<dyn RenderPresenterPort>)>>,
    next_listener_id: AtomicU64,
    delivery: Mutex<()>,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn listener_snapshot(&self) -> Vec<Arc<dyn RenderPresenterPort>> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    fn notify(&self, event: &RenderEvent) {
        for listener in self.listener_snapshot() {
            listener.present(event.clone());
        }
    }

    /// Delivers a finished task's frame. The task stays current until its listeners
    /// have been told, so [`WorkerController::wait_idle`] also waits for delivery.
    ///
    /// Deliveries run one at a time. A frame superseded while it is being delivered
    /// stops before the next listener, and its successor waits for the lock, so the
    /// last frame any listener sees is always the newest one.
    fn complete(
        &self,
        generation: u64,
        outcome: &TaskOutcome<FractalImage>,
        started: Instant,
    ) {
        let _delivery = self.delivery.lock().unwrap_or_else(PoisonError::into_inner);

        let Some(frame) = self.accept(generation, outcome, started) else {
            return;
        };

        info!(
            "render {} finished in {:?} ({}x{})",
            generation,
            frame.render_duration,
            frame.pixel_buffer.width(),
            frame.pixel_buffer.height()
        );

        let event = RenderEvent::Frame(frame);
        for listener in self.listener_snapshot() {
            if !Self::is_current(&self.lock_state(), generation) {
                debug!("render {} superseded during delivery", generation);
                break;
            }
            listener.present(event.clone());
        }

        self.finish(generation);
    }

    fn accept(
        &self,
        generation: u64,
        outcome: &TaskOutcome<FractalImage>,
        started: Instant,
    ) -> Option<FrameData> {
        let mut state = self.lock_state();

        if !Self::is_current(&state, generation) {
            debug!("dropping result of superseded render {}", generation);
            return None;
        }

        let frame = match outcome {
            TaskOutcome::Completed(image) => match image.snapshot() {
                Ok(buffer) => Some(FrameData {
                    generation,
                    pixel_buffer: Arc::new(buffer),
                    render_duration: started.elapsed(),
                }),
                Err(err) => {
                    error!("cannot copy out render {}: {}", generation, err);
                    None
                }
            },
            TaskOutcome::Cancelled => {
                debug!("render {} cancelled", generation);
                None
            }
        };

        match &frame {
            Some(frame) => {
                state.last_completed_generation = generation;
                state.last_frame = Some(frame.clone());
            }
            None => {
                state.current = None;
                self.idle.notify_all();
            }
        }

        frame
    }

    fn finish(&self, generation: u64) {
        let mut state = self.lock_state();

        if Self::is_current(&state, generation) {
            state.current = None;
        }

        self.idle.notify_all();
    }

    fn is_current(state: &ControllerState, generation: u64) -> bool {
        state
            .current
            .as_ref()
            .is_some_and(|current| current.generation == generation)
    }
}

/// Owns the single current render and replaces it whenever an input changes.
///
/// Every `update_*` call runs as one critical section: cancel the current task,
/// swap in the new input, then submit a fresh task if image, evaluator and area
/// are all known. Each submitted task gets the next generation number; results
/// from any task that is no longer current are dropped, so listeners only ever
/// see frames for the latest accepted inputs.
pub struct WorkerController {
    shared: Arc<Shared>,
}

impl WorkerController {
    #[must_use]
    pub fn new(worker: Worker, policy: SplitPolicy) -> Self {
        Self {
            shared: Arc::new(Shared {
                worker,
                policy,
                state: Mutex::new(ControllerState::default()),
                idle: Condvar::new(),
                listeners: RwLock::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
                delivery: Mutex::new(()),
            }),
        }
    }

    pub fn add_listener(&self, listener: Arc<dyn RenderPresenterPort>) -> ListenerId {
        let id = ListenerId(self.shared.next_listener_id.fetch_add(1, Ordering::Relaxed));

        self.shared
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));

        id
    }

    /// Returns whether the listener was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .shared
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();

        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Generation of the submitted task, or `None` if inputs are still missing.
    pub fn update_image(&self, image: FractalImage) -> Option<u64> {
        self.update(|definition| definition.image = Some(image))
    }

    pub fn update_evaluator(&self, evaluator: Arc<FractalEvaluator>) -> Option<u64> {
        self.update(|definition| definition.evaluator = Some(evaluator))
    }

    pub fn update_area(&self, area: RectArea) -> Option<u64> {
        self.update(|definition| definition.area = Some(area))
    }

    /// Replaces image and area together, so a resize submits one task instead of two.
    pub fn update_view(&self, image: FractalImage, area: RectArea) -> Option<u64> {
        self.update(|definition| {
            definition.image = Some(image);
            definition.area = Some(area);
        })
    }

    /// Replaces every input at once, e.g. a new evaluator that also changes the
    /// pixel scale.
    pub fn update_render(
        &self,
        evaluator: Arc<FractalEvaluator>,
        image: FractalImage,
        area: RectArea,
    ) -> Option<u64> {
        self.update(|definition| {
            definition.evaluator = Some(evaluator);
            definition.image = Some(image);
            definition.area = Some(area);
        })
    }

    /// Tells listeners the view moved, without touching the render.
    pub fn publish_area(&self, area: CircleArea) {
        self.shared.notify(&RenderEvent::AreaChanged(area));
    }

    #[must_use]
    pub fn current_generation(&self) -> Option<u64> {
        self.shared
            .lock_state()
            .current
            .as_ref()
            .map(|current| current.generation)
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared.lock_state().last_completed_generation
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<FrameData> {
        self.shared.lock_state().last_frame.clone()
    }

    /// Blocks until no render is in flight; false if `timeout` ran out first.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let state = self.shared.lock_state();
        let (state, result) = self
            .shared
            .idle
            .wait_timeout_while(state, timeout, |state| state.current.is_some())
            .unwrap_or_else(PoisonError::into_inner);

        drop(state);
        !result.timed_out()
    }

    /// Cancels the current render; later updates still start new ones.
    pub fn shutdown(&self) {
        let mut state = self.shared.lock_state();

        if let Some(current) = state.current.take() {
            debug!("cancelling render {} on shutdown", current.generation);
            current.cancel.cancel();
        }

        self.shared.idle.notify_all();
    }

    fn update(&self, apply: impl FnOnce(&mut TaskDefinition)) -> Option<u64> {
        let mut state = self.shared.lock_state();

        if let Some(previous) = state.current.take() {
            debug!("cancelling render {}", previous.generation);
            previous.cancel.cancel();
        }

        apply(&mut state.definition);

        let Some(task) = state.definition.build(self.shared.policy) else {
            debug!("render inputs incomplete, nothing submitted");
            self.shared.idle.notify_all();
            return None;
        };

        state.generation += 1;
        let generation = state.generation;
        let rect = task.view().rect();

        let mut task = AsyncTask::new(task);
        let started = Instant::now();
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);

        task.add_listener(move |outcome: &TaskOutcome<FractalImage>| {
            if let Some(shared) = shared.upgrade() {
                shared.complete(generation, outcome, started);
            }
        });

        state.current = Some(CurrentTask {
            generation,
            cancel: task.cancel_handle(),
        });

        info!(
            "submitting render {} ({}x{})",
            generation,
            rect.width(),
            rect.height()
        );
        self.shared.worker.execute(task);

        Some(generation)
    }
}

impl Drop for WorkerController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
