use glam::{Affine3A, Vec3};

use toy_rp::headless::{HeadlessContext, HostCall, SceneObject};
use toy_rp::{Camera, CameraOutcome, Extent, PipelineAsset};

/// Headless Frame Example
///
/// Renders two frames through the recording host and prints the host calls
/// of the second one. Run with `RUST_LOG=trace` to see the stage log.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut host = HeadlessContext::new();
    host.set_gizmos(true);
    host.add_object(SceneObject::opaque("floor", Vec3::new(0.0, -1.0, -6.0), 4.0));
    host.add_object(SceneObject::opaque("cube", Vec3::new(0.0, 0.5, -4.0), 0.9));
    host.add_object(SceneObject::opaque("glass", Vec3::new(1.0, 0.5, -3.0), 0.5).with_queue(3000));
    host.add_object(SceneObject::opaque("behind", Vec3::new(0.0, 0.0, 20.0), 1.0));

    let asset = match std::env::args().nth(1) {
        Some(path) => PipelineAsset::load(path)?,
        None => PipelineAsset::default(),
    };
    let mut pipeline = asset.create_pipeline(&mut host, Extent::new(1280, 720))?;

    let mut main_camera = Camera::new_perspective(60.0, 16.0 / 9.0, 0.1, 100.0).with_name("Main Camera");
    main_camera.update_view(&Affine3A::from_translation(Vec3::new(0.0, 1.0, 2.0)));
    let mut disabled = Camera::new_perspective(60.0, 16.0 / 9.0, 0.1, 100.0).with_name("Disabled");
    disabled.enabled = false;
    let cameras = [main_camera, disabled];

    pipeline.render(&mut host, &cameras)?;
    pipeline.resize(&mut host, Extent::new(1920, 1080))?;
    host.clear_calls();

    let report = pipeline.render(&mut host, &cameras)?;
    for (camera, outcome) in cameras.iter().zip(report.outcomes()) {
        match outcome {
            CameraOutcome::Rendered => println!("{}: rendered", camera.name),
            CameraOutcome::Skipped { stage } => println!("{}: skipped at {stage}", camera.name),
        }
    }

    for call in host.calls() {
        match call {
            HostCall::ExecuteCommandBuffer { name, commands } => {
                println!("execute '{name}' ({} commands)", commands.len());
                for command in commands {
                    println!("    {command:?}");
                }
            }
            other => println!("{other:?}"),
        }
    }

    pipeline.dispose(&mut host);
    println!("live textures after dispose: {}", host.live_textures());
    Ok(())
}
