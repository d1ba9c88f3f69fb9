use crate::renderer::Renderer;
use lumen_scene::DemoScene;

/// Decides, before each frame, whether the loop should end.
pub trait StopCondition {
    /// `frames` is the number of frames completed so far.
    fn should_stop(&mut self, frames: u64) -> bool;
}

/// Never stops. The loop runs until its host goes away.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl StopCondition for Never {
    fn should_stop(&mut self, _frames: u64) -> bool {
        false
    }
}

/// Stops once the given number of frames has been rendered.
#[derive(Debug, Clone, Copy)]
pub struct AfterFrames(pub u64);

impl StopCondition for AfterFrames {
    fn should_stop(&mut self, frames: u64) -> bool {
        frames >= self.0
    }
}

/// Adapts a closure into a stop condition.
pub struct StopWhen<F>(pub F);

impl<F: FnMut(u64) -> bool> StopCondition for StopWhen<F> {
    fn should_stop(&mut self, frames: u64) -> bool {
        (self.0)(frames)
    }
}

/// Per-frame animation and render driver.
///
/// Hosts with their own frame callback (a window's redraw event) call `tick`
/// once per callback; headless hosts call `run`.
#[derive(Debug, Default)]
pub struct FrameLoop {
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance the animation one step and render the result.
    ///
    /// The step is fixed per call, not scaled by elapsed time. Whatever the
    /// renderer returns is handed back untouched.
    pub fn tick<R: Renderer>(&mut self, demo: &mut DemoScene, renderer: &R) -> R::Output {
        demo.advance();
        self.frames += 1;
        tracing::trace!(frame = self.frames, "frame");
        renderer.render(&demo.scene, &demo.camera)
    }

    /// Tick repeatedly until `stop` fires. Returns the last frame's output,
    /// or `None` if `stop` fired before the first frame.
    pub fn run<R, S>(
        &mut self,
        demo: &mut DemoScene,
        renderer: &R,
        mut stop: S,
    ) -> Option<R::Output>
    where
        R: Renderer,
        S: StopCondition,
    {
        let mut last = None;
        while !stop.should_stop(self.frames) {
            last = Some(self.tick(demo, renderer));
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DebugTextRenderer;
    use lumen_common::Viewport;
    use lumen_scene::{PerspectiveCamera, Scene};
    use std::cell::Cell;

    /// Counts render calls and remembers the camera aspect it was given.
    #[derive(Default)]
    struct CountingRenderer {
        calls: Cell<u64>,
        last_aspect: Cell<f32>,
    }

    impl Renderer for CountingRenderer {
        type Output = u64;

        fn render(&self, _scene: &Scene, camera: &PerspectiveCamera) -> u64 {
            self.calls.set(self.calls.get() + 1);
            self.last_aspect.set(camera.aspect);
            self.calls.get()
        }
    }

    fn demo() -> DemoScene {
        lumen_scene::demo::build(Viewport::new(1280, 720)).unwrap()
    }

    #[test]
    fn rotation_is_step_times_frames() {
        let mut demo = demo();
        let mut frame_loop = FrameLoop::new();
        let n = 250;
        frame_loop.run(&mut demo, &CountingRenderer::default(), AfterFrames(n));

        assert_eq!(frame_loop.frames(), n);
        // f32 accumulation of 0.01 drifts slightly from the exact product.
        let expected = lumen_scene::ROTATION_STEP * n as f32;
        for id in demo.rotating() {
            let r = demo.scene.node(id).unwrap().transform.rotation;
            assert!((r.x - expected).abs() < 1e-3, "x={}", r.x);
            assert!((r.y - expected).abs() < 1e-3, "y={}", r.y);
        }
    }

    #[test]
    fn shapes_rotate_in_lockstep() {
        let mut demo = demo();
        let mut frame_loop = FrameLoop::new();
        frame_loop.run(&mut demo, &CountingRenderer::default(), AfterFrames(37));
        let rotations: Vec<_> = demo
            .rotating()
            .iter()
            .map(|&id| demo.scene.node(id).unwrap().transform.rotation)
            .collect();
        assert_eq!(rotations[0], rotations[1]);
        assert_eq!(rotations[1], rotations[2]);
    }

    #[test]
    fn one_render_per_tick() {
        let mut demo = demo();
        let renderer = CountingRenderer::default();
        let mut frame_loop = FrameLoop::new();
        assert_eq!(frame_loop.tick(&mut demo, &renderer), 1);
        assert_eq!(frame_loop.tick(&mut demo, &renderer), 2);
        let last = frame_loop.run(&mut demo, &renderer, AfterFrames(10));
        assert_eq!(last, Some(10));
        assert_eq!(renderer.calls.get(), 10);
    }

    #[test]
    fn camera_aspect_unchanged_across_frames() {
        let mut demo = demo();
        let renderer = CountingRenderer::default();
        let mut frame_loop = FrameLoop::new();
        frame_loop.run(&mut demo, &renderer, AfterFrames(5));
        assert_eq!(renderer.last_aspect.get(), 1280.0 / 720.0);

        frame_loop.run(&mut demo, &renderer, AfterFrames(500));
        assert_eq!(renderer.calls.get(), 500);
        assert_eq!(renderer.last_aspect.get(), 1280.0 / 720.0);
        assert_eq!(demo.viewport, Viewport::new(1280, 720));
    }

    #[test]
    fn loop_only_ends_when_told() {
        let mut demo = demo();
        let mut checks = 0u64;
        let mut frame_loop = FrameLoop::new();
        let stop = StopWhen(|frames| {
            checks += 1;
            frames == 10_000
        });
        frame_loop.run(&mut demo, &CountingRenderer::default(), stop);
        assert_eq!(frame_loop.frames(), 10_000);
        // One check before every frame plus the final one.
        assert_eq!(checks, 10_001);
    }

    #[test]
    fn never_has_no_exit() {
        let mut never = Never;
        for frames in [0, 1, 1_000_000, u64::MAX] {
            assert!(!never.should_stop(frames));
        }
    }

    #[test]
    fn stop_before_first_frame_renders_nothing() {
        let mut demo = demo();
        let renderer = DebugTextRenderer::new();
        let out = FrameLoop::new().run(&mut demo, &renderer, AfterFrames(0));
        assert!(out.is_none());
    }
}
