/// Terminal front end for meshlite: input, textures, rasterizer and the frame loop
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use meshlite_core::{ControlFlow, Controls, Scene};

pub mod clock;
pub mod config;
pub mod demo;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod texture;

pub use clock::{FrameClock, FramePacer, FrameTime};
pub use config::AppConfig;
pub use input::TerminalInput;
pub use logging::{init_logging, LoggingConfig};
pub use renderer::SoftwareRenderer;

/// Owns the renderer and the scene and runs the frame loop
pub struct TerminalApp {
    renderer: SoftwareRenderer,
    scene: Scene<SoftwareRenderer>,
    controls: Controls,
    input: TerminalInput,
    clock: FrameClock,
    pacer: FramePacer,
    cell_size: (f32, f32),
    running: bool,
}

impl TerminalApp {
    pub fn new(renderer: SoftwareRenderer, scene: Scene<SoftwareRenderer>, config: &AppConfig) -> Self {
        Self {
            renderer,
            scene,
            controls: Controls::new(config.camera_speed, config.light_speed),
            input: TerminalInput::new(),
            clock: FrameClock::new(),
            pacer: FramePacer::new(config.target_fps),
            cell_size: config.cell_size,
            running: true,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        let result = self.enter(enhanced).and_then(|()| self.main_loop());

        // Restore the terminal even when the loop failed
        if enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );
        terminal::disable_raw_mode()?;
        log::info!("terminal restored");

        result
    }

    fn enter(&mut self, enhanced: bool) -> io::Result<()> {
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;
        if enhanced {
            // Release events let held keys work the way they do in a window
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!(
            "entered terminal at {}x{} cells (key release events: {})",
            self.renderer.width(),
            self.renderer.height(),
            enhanced
        );
        Ok(())
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.clock.reset();

        while self.running {
            let frame_start = Instant::now();
            let frame = self.clock.tick();

            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?);
            }

            if self.controls.apply(&self.input, &mut self.scene, frame.dt) == ControlFlow::Exit {
                log::info!("exit requested after {} frames", frame.frame_index);
                self.running = false;
            }
            self.input.end_frame();

            self.render()?;
            self.pacer.finish_frame(frame_start);
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.input.handle_key(key),
            Event::Mouse(mouse) => {
                if let Some((column, row)) = self.input.handle_mouse(mouse) {
                    let (cell_w, cell_h) = self.cell_size;
                    self.controls.cursor_moved(
                        &self.input,
                        column * cell_w,
                        row * cell_h,
                        &mut self.scene.camera,
                    );
                }
            }
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, height as usize);
            }
            Event::FocusLost => self.input.clear(),
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.scene.draw_frame(&mut self.renderer);

        let mut stdout = stdout();
        self.renderer.present(&mut stdout)?;

        let mode = if self.controls.camera_mode(&self.input) {
            "camera"
        } else {
            "light"
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "meshlite | FPS: {:.1} | mode: {} | WASDQE=move RMB/Tab=camera Esc=quit",
                self.pacer.fps(),
                mode
            )),
            ResetColor
        )?;

        stdout.flush()
    }
}
