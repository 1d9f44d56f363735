// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod assets;
pub mod config;
pub mod error;
pub mod landing;
pub mod render;
pub mod session;
pub mod spin;
pub mod text;

// External crate imports
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

pub use assets::WheelImage;
pub use config::{Color, ConfigFile, WheelConfig};
pub use error::WheelError;
pub use landing::{resolve_slice, LandingResolver, SLICE_COUNT};
pub use render::{Canvas, Layout, Rect};
pub use session::{SpinResult, WheelSession};
pub use spin::{SpinController, SpinRequest, SpinState, TickOutcome};

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Commands accepted while the wheel window is open.
#[derive(Debug, Clone, PartialEq)]
pub enum WheelCommand {
    /// Same as pressing the spin button.
    Spin,
    /// Start a spin at a fixed speed in radians/frame.
    SpinWithSpeed(f64),
    /// Stop the frame loop and close the window.
    Stop,
}

/// Main wheel struct - the primary public interface
pub struct Wheel {
    config: WheelConfig,
    image: Option<WheelImage>,
    font: Option<Font<'static>>,
}

impl std::fmt::Debug for Wheel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wheel")
            .field("config", &self.config)
            .field("image", &self.image)
            .field("font_loaded", &self.font.is_some())
            .finish()
    }
}

impl Wheel {
    /// Loads assets up front. Missing assets are logged and the matching
    /// surface is simply left undrawn.
    pub fn new(config: WheelConfig) -> Self {
        let image = match WheelImage::load(&config.image_path) {
            Ok(image) => {
                log::info!(
                    "loaded wheel face {} ({}x{})",
                    config.image_path.display(),
                    image.width,
                    image.height
                );
                Some(image)
            }
            Err(err) => {
                log::error!("wheel face unavailable: {err}");
                None
            }
        };
        let font = match assets::resolve_font(config.font_path.as_deref()) {
            Ok(font) => Some(font),
            Err(err) => {
                log::error!("result text disabled: {err}");
                None
            }
        };
        Self::with_assets(config, image, font)
    }

    pub fn with_assets(
        config: WheelConfig,
        image: Option<WheelImage>,
        font: Option<Font<'static>>,
    ) -> Self {
        Self {
            config,
            image,
            font,
        }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Surface layout derived from the wheel face size.
    pub fn layout(&self) -> Layout {
        let (width, height) = self
            .image
            .as_ref()
            .map(|image| (image.width, image.height))
            .unwrap_or((
                self.config.fallback_wheel_size,
                self.config.fallback_wheel_size,
            ));
        Layout::new(width, height, &self.config)
    }

    pub fn show(&self) -> Result<(), WheelError> {
        self.run_window(None)
    }

    pub fn show_with_commands(&self, receiver: Receiver<WheelCommand>) -> Result<(), WheelError> {
        self.run_window(Some(receiver))
    }

    fn run_window(&self, receiver: Option<Receiver<WheelCommand>>) -> Result<(), WheelError> {
        let layout = self.layout();

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                layout.width as f64,
                layout.height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();

        // The frame buffer stays at layout size; pixels scales it to the surface.
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(layout.width as u32, layout.height as u32, surface_texture)?;

        let mut session = WheelSession::new(&self.config);
        session.start();

        let mut rng = rand::rng();
        let mut cursor: Option<(f64, f64)> = None;

        let target_fps = self.config.max_framerate.max(1.0);
        let frame_duration = Duration::from_secs_f64(1.0 / target_fps);
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        session.stop();
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            log::warn!("surface resize failed: {err}");
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = pixels
                            .window_pos_to_pixel((position.x as f32, position.y as f32))
                            .ok()
                            .map(|(x, y)| (x as f64, y as f64));
                    }
                    WindowEvent::CursorLeft { .. } => cursor = None,
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => {
                        if cursor.is_some_and(|(x, y)| layout.button.contains(x, y)) {
                            session.request_spin(&mut rng);
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state == ElementState::Pressed && !event.repeat {
                            if let Key::Named(NamedKey::Space | NamedKey::Enter) = event.logical_key
                            {
                                session.request_spin(&mut rng);
                            }
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            while let Ok(command) = receiver.try_recv() {
                                match command {
                                    WheelCommand::Spin => {
                                        session.request_spin(&mut rng);
                                    }
                                    WheelCommand::SpinWithSpeed(speed) => {
                                        session.request_spin_with_speed(speed);
                                    }
                                    WheelCommand::Stop => {
                                        log::info!("stop requested, closing wheel");
                                        session.stop();
                                        window_target.exit();
                                        return;
                                    }
                                }
                            }
                        }

                        session.tick();

                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, layout.width, layout.height);
                        render::render_frame(
                            &mut canvas,
                            &layout,
                            &session,
                            &self.config,
                            self.image.as_ref(),
                            self.font.as_ref(),
                        );
                        if let Err(err) = pixels.render() {
                            log::error!("render failed: {err}");
                            session.stop();
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if session.is_running() && last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

impl std::str::FromStr for WheelCommand {
    type Err = String;

    /// Parses `spin`, `stop`, or a bare speed in radians/frame.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "spin" | "" => Ok(WheelCommand::Spin),
            "stop" | "quit" => Ok(WheelCommand::Stop),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|speed| speed.is_finite() && *speed > 0.0)
                .map(WheelCommand::SpinWithSpeed)
                .ok_or_else(|| format!("unrecognised command {line:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stdin_commands() {
        assert_eq!("spin".parse(), Ok(WheelCommand::Spin));
        assert_eq!("  SPIN \n".parse(), Ok(WheelCommand::Spin));
        assert_eq!("".parse(), Ok(WheelCommand::Spin));
        assert_eq!("stop".parse(), Ok(WheelCommand::Stop));
        assert_eq!("0.42".parse(), Ok(WheelCommand::SpinWithSpeed(0.42)));
        assert!("-1".parse::<WheelCommand>().is_err());
        assert!("faster".parse::<WheelCommand>().is_err());
    }

    #[test]
    fn layout_falls_back_without_a_face() {
        let config = WheelConfig::builder().fallback_wheel_size(320).build();
        let wheel = Wheel::with_assets(config, None, None);
        let layout = wheel.layout();
        assert_eq!(layout.wheel.width, 320);
        assert_eq!(layout.wheel.height, 320);
    }

    #[test]
    fn layout_follows_the_face_size() {
        let image = WheelImage::from_rgba(500, 480, vec![0; 500 * 480 * 4]);
        let wheel = Wheel::with_assets(WheelConfig::default(), Some(image), None);
        let layout = wheel.layout();
        assert_eq!(layout.width, 500);
        assert_eq!(layout.wheel, Rect::new(0, 0, 500, 480));
        assert_eq!(layout.result.y, 480);
    }
}
