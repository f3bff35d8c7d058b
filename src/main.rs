//! Command-line driver for the twin-annotate scripted session.

use std::io::Write;
use std::path::Path;

use glam::Vec3;
use serde::Serialize;
use twin_annotate::camera::Viewport;
use twin_annotate::drag::PlaneParamsList;
use twin_annotate::input::{InputEvent, MouseButton};
use twin_annotate::options::Options;
use twin_annotate::scene::SceneRepository;
use twin_annotate::view::AverageDimensions;
use twin_annotate::{AnnotateError, TwinView};

/// Summary written to stdout after the scripted session.
#[derive(Serialize)]
struct Report {
    planes: PlaneParamsList,
    averages: Option<AverageDimensions>,
    holes_on_first_section: usize,
    nodes: Vec<String>,
}

fn cursor(view: &TwinView, point: Vec3) -> InputEvent {
    let (x, y) = view.project_to_screen(point);
    InputEvent::CursorMoved {
        x: x as f32,
        y: y as f32,
    }
}

fn button(pressed: bool) -> InputEvent {
    InputEvent::MouseButton {
        button: MouseButton::Left,
        pressed,
    }
}

/// Press on `from`, move in `steps` increments to `to`, release.
fn replay_drag(view: &mut TwinView, from: Vec3, to: Vec3, steps: u32) {
    let _ = view.handle_input(&cursor(view, from));
    let _ = view.handle_input(&button(true));
    for i in 1..=steps {
        let p = from.lerp(to, i as f32 / steps as f32);
        let _ = view.handle_input(&cursor(view, p));
    }
    if let Some(end) = view.handle_input(&button(false)) {
        log::info!("released {:?} at {}", end.node, end.position);
    }
}

fn run(options: Options) -> Result<Report, AnnotateError> {
    let mut view = TwinView::new(options, Viewport::new(1280.0, 720.0));

    let p1 = Vec3::new(0.0, -0.6, -0.8);
    let p2 = Vec3::new(0.0, 0.4, 0.6);
    let page = view.add_section(p1, p2)?;
    let _ = view.add_hole(Vec3::new(0.0, 0.0, 0.0), 175)?;
    let hole = Vec3::new(0.0, -1.5, 0.3);
    let _ = view.add_hole(hole, 110)?;
    let ranging =
        view.add_ranging(Vec3::new(0.0, -0.6, 0.0), Vec3::new(0.0, 0.4, 0.0))?;

    view.frame_annotations();

    replay_drag(&mut view, hole, Vec3::new(0.0, -0.3, 0.3), 6);
    replay_drag(&mut view, p2, Vec3::new(0.0, 0.9, 0.6), 8);
    let _ = view.remove_ranging(ranging);

    let scene = view.scene();
    let nodes = scene
        .descendants(None)
        .into_iter()
        .filter_map(|id| scene.node(id).map(|n| n.name.clone()))
        .collect();
    let report = Report {
        planes: view.planes().get(),
        averages: view.average_dimensions(),
        holes_on_first_section: view.holes_in_section(page).len(),
        nodes,
    };
    view.teardown();
    Ok(report)
}

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let report = match run(options) {
        Ok(report) => report,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let written = serde_json::to_string_pretty(&report)
        .map_err(std::io::Error::from)
        .and_then(|json| writeln!(std::io::stdout().lock(), "{json}"));
    if let Err(e) = written {
        log::error!("failed to write report: {e}");
        std::process::exit(1);
    }
}
