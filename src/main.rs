use clap::Parser;
use colored::*;

use hand_slides::annotation::StrokeStyle;
use hand_slides::args::Args;
use hand_slides::camera::{self, CameraSource};
use hand_slides::config::AppConfig;
use hand_slides::detector::HandLandmarkPipeline;
use hand_slides::driver::FrameLoop;
use hand_slides::gesture::GestureClassifier;
use hand_slides::output::WindowOutput;
use hand_slides::pipeline::HandPipeline;
use hand_slides::presenter::{self, CommandPresenter, LogPresenter, Presenter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if args.list {
        return camera::list_cameras();
    }

    // 0. Load Config
    let mut config = AppConfig::load(&args.config)?;
    args.apply(&mut config);

    let classifier = GestureClassifier::from_bindings(config.gestures.threshold_y, &config.gestures.bindings)?;
    if classifier.draw_pattern().is_none() {
        println!("{}", "No toggle_draw binding configured: annotation is disabled.".yellow());
    }

    // 1. Setup Camera
    let camera = CameraSource::new(&config.camera)?;

    // 2. Setup Inference
    let pipeline = HandLandmarkPipeline::new(&config.detector)?;
    println!("Active Pipeline: {}", pipeline.name());

    // 3. Setup Presentation
    let presenter: Box<dyn Presenter> = if args.dry_run {
        Box::new(LogPresenter::default())
    } else {
        Box::new(CommandPresenter::from_config(&config.presentation)?)
    };
    println!("Presenter: {}", presenter.name());
    let _slideshow = presenter::launch_slideshow(&config.presentation)?;

    // 4. Setup Output
    let window = WindowOutput::new(
        &config.ui.window_title,
        camera.width() as usize,
        camera.height() as usize,
        config.ui.quit_key,
    )?;

    println!("{}", "Starting Pipeline...".green());
    println!(
        "Raise your hand above the green line. Open hand: next | Thumb: previous | Three fingers: draw mode | [{}] quit",
        config.ui.quit_key
    );

    let style = StrokeStyle::from_config(&config.annotation);
    let mut frame_loop = FrameLoop::new(
        camera,
        pipeline,
        presenter,
        window,
        classifier,
        config.gestures.cooldown_frames,
    )
    .with_style(style)
    .with_ui(config.ui.clone());

    // 5. Loop
    let stats = frame_loop.run()?;
    println!(
        "Stopped after {} frames, {} gestures.",
        stats.frames, stats.gestures_fired
    );

    Ok(())
}
