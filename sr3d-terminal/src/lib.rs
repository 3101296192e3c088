/// Terminal preview for the software rendering pipeline
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::{debug, warn};
use nalgebra::{Point3, Vector3};
use sr3d_core::transform::{compose, rotate};
use sr3d_core::{
    Camera, Light, Lighting, Material, Mesh, RenderOptions, Scene, SceneConfig, Shader, Texture,
};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::{CanvasPrinter, ColorMode};

/// Model orientation as yaw (about world Y) and pitch (about world X), in radians
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub fn turn(&mut self, dyaw: f32, dpitch: f32) {
        self.yaw += dyaw;
        self.pitch += dpitch;
    }

    /// Model matrix turning the mesh about `pivot`: pitch first, then yaw
    pub fn matrix(&self, pivot: &Point3<f32>) -> sr3d_core::Result<nalgebra::Matrix4<f32>> {
        let yaw = rotate(&Vector3::y(), self.yaw, pivot)?;
        let pitch = rotate(&Vector3::x(), self.pitch, pivot)?;
        Ok(compose(&yaw, &pitch))
    }
}

/// Default camera, lights and material for the preview
pub fn default_scene(width: usize, height: usize) -> SceneConfig {
    let mut camera = Camera::new(width, height);
    camera.eye = Point3::new(0.0, 1.0, 4.0);
    camera.focal = 1.2;

    SceneConfig {
        camera,
        lighting: Lighting {
            lights: vec![
                Light::new(Point3::new(3.0, 4.0, 5.0), Vector3::new(1.0, 0.95, 0.9)),
                Light::new(Point3::new(-4.0, -2.0, 2.0), Vector3::new(0.15, 0.2, 0.35)),
            ],
            ambient: Vector3::repeat(0.25),
        },
        material: Material::uniform(0.3, 0.8, 0.5, 24.0),
        shader: Shader::Phong,
        options: RenderOptions {
            cull_behind_camera: true,
        },
    }
}

/// Main application struct for the terminal preview
pub struct TerminalApp {
    mesh: Mesh,
    texture: Texture,
    orientation: Orientation,
    config: SceneConfig,
    printer: CanvasPrinter,
    spinning: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, texture: Texture) -> Result<Self> {
        let (columns, rows) = terminal::size().context("failed to query terminal size")?;
        let printer = CanvasPrinter::new(columns as usize, rows as usize);
        let (width, height) = printer.frame_size();

        Ok(Self {
            mesh,
            texture,
            orientation: Orientation {
                yaw: 0.6,
                pitch: 0.4,
            },
            config: default_scene(width, height),
            printer,
            spinning: true,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            if self.spinning {
                self.orientation.turn(0.02, 0.005);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Resize(columns, rows) => {
                self.printer.resize(columns as usize, rows as usize);
                self.resize_frame();
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('w') | KeyCode::Up => self.orientation.turn(0.0, -0.1),
            KeyCode::Char('s') | KeyCode::Down => self.orientation.turn(0.0, 0.1),
            KeyCode::Char('a') | KeyCode::Left => self.orientation.turn(-0.1, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.orientation.turn(0.1, 0.0),
            KeyCode::Char(' ') => self.spinning = !self.spinning,
            KeyCode::Char('m') => {
                self.printer.set_mode(self.printer.mode().toggled());
                self.resize_frame();
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.config.shader = Shader::ALL[index];
                debug!("switched to {} shading", self.config.shader);
            }
            _ => {}
        }
    }

    fn resize_frame(&mut self) {
        let (width, height) = self.printer.frame_size();
        let shader = self.config.shader;
        self.config = default_scene(width, height);
        self.config.shader = shader;
    }

    fn render(&mut self) -> Result<()> {
        let model = self.orientation.matrix(&Point3::origin())?;
        let mesh = self.mesh.transformed(&model);

        let scene = Scene {
            mesh: &mesh,
            texture: Some(&self.texture),
            camera: &self.config.camera,
            lighting: &self.config.lighting,
            material: &self.config.material,
        };
        let canvas = match sr3d_core::render(&scene, self.config.shader, &self.config.options) {
            Ok(canvas) => canvas,
            Err(err) => {
                // A tiny terminal or a degenerate pose; keep the app alive
                warn!("frame skipped: {err}");
                return Ok(());
            }
        };

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.printer.draw(&canvas, &mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "SR3D | {} | FPS: {:.1} | 1-4=Shader WASD/Arrows=Rotate Space=Spin M=Mode Q=Quit",
                self.config.shader, self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// A two-tone checkerboard texture
pub fn checker_texture(size: usize, cells: usize) -> sr3d_core::Result<Texture> {
    let cell = (size / cells.max(1)).max(1);
    Texture::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Vector3::new(0.95, 0.92, 0.85)
        } else {
            Vector3::new(0.55, 0.25, 0.15)
        }
    })
}
