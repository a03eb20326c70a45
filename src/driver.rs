//! The per-frame control loop: acquire → detect → gesture step → render → display → quit check.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::annotation::StrokeStyle;
use crate::camera::FrameSource;
use crate::config::UiConfig;
use crate::dispatch::Dispatcher;
use crate::gesture::GestureClassifier;
use crate::output::FrameSink;
use crate::overlay::draw_overlays;
use crate::pipeline::HandPipeline;
use crate::presenter::Presenter;
use crate::session::SessionState;

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub frames: u64,
    pub dropped_frames: u64,
    pub detector_errors: u64,
    pub gestures_fired: u64,
}

pub struct FrameLoop<C, H, P, S>
where
    C: FrameSource,
    H: HandPipeline,
    P: Presenter,
    S: FrameSink,
{
    camera: C,
    pipeline: H,
    dispatcher: Dispatcher<P>,
    sink: S,
    classifier: GestureClassifier,
    style: StrokeStyle,
    ui: UiConfig,
    state: SessionState,
    stats: LoopStats,
}

impl<C, H, P, S> FrameLoop<C, H, P, S>
where
    C: FrameSource,
    H: HandPipeline,
    P: Presenter,
    S: FrameSink,
{
    pub fn new(
        camera: C,
        pipeline: H,
        presenter: P,
        sink: S,
        classifier: GestureClassifier,
        cooldown_frames: u32,
    ) -> Self {
        Self {
            camera,
            pipeline,
            dispatcher: Dispatcher::new(presenter),
            sink,
            classifier,
            style: StrokeStyle::default(),
            ui: UiConfig::default(),
            state: SessionState::new(cooldown_frames),
            stats: LoopStats::default(),
        }
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_ui(mut self, ui: UiConfig) -> Self {
        self.ui = ui;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn presenter(&self) -> &P {
        self.dispatcher.presenter()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run until the sink reports a quit. Only display failures end the loop early.
    pub fn run(&mut self) -> Result<LoopStats> {
        info!("Frame loop started ({})", self.pipeline.name());
        loop {
            if !self.run_once()? {
                break;
            }
        }
        info!(
            "Frame loop stopped after {} frames ({} dropped, {} gestures)",
            self.stats.frames, self.stats.dropped_frames, self.stats.gestures_fired
        );
        Ok(self.stats)
    }

    /// One iteration. Returns `false` once quit was requested.
    pub fn run_once(&mut self) -> Result<bool> {
        // 1. Acquire; a bad frame is skipped.
        let mut frame = match self.camera.capture() {
            Ok(f) => f,
            Err(e) => {
                self.stats.dropped_frames += 1;
                debug!("frame skipped: {:#}", e);
                self.sink.idle();
                return Ok(!self.sink.quit_requested());
            }
        };
        self.stats.frames += 1;

        // 2. Detect; an inference error counts as "no hand" for this frame.
        let hand = match self.pipeline.process(&frame) {
            Ok(h) => h,
            Err(e) => {
                self.stats.detector_errors += 1;
                warn!("hand detection failed: {:#}", e);
                None
            }
        };

        // 3-5. Classify, debounce, dispatch, capture ink, tick.
        let report = self
            .state
            .step(hand.as_ref(), &self.classifier, &mut self.dispatcher);
        if report.action.is_some() {
            self.stats.gestures_fired += 1;
        }

        // 6. Render and show.
        self.state.annotations.render(&mut frame, &self.style);
        draw_overlays(
            &mut frame,
            &self.ui,
            self.classifier.threshold_y(),
            &self.state,
            hand.as_ref(),
        );
        self.sink.present(&frame)?;

        // 7. Quit?
        Ok(!self.sink.quit_requested())
    }
}
