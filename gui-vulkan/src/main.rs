mod overlay;
mod renderer;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use life::{Button, Config, Controller, CursorKind, Event, Key, Pointer};
use overlay::{draw_label, draw_text, push_frame, push_rect, to_ndc, to_ndc_y, Rect};
use renderer::{CellInstance, Renderer, Vertex};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key as WinitKey, NamedKey};
use winit::window::{CursorIcon, Window, WindowAttributes, WindowId};

const UI_HEIGHT: f32 = 90.0;
const GRID_MARGIN: f32 = 16.0;
const BORDER_WIDTH: f32 = 6.0;
const CELL_GAP: f32 = 1.0;
const BUTTON_WIDTH: f32 = 180.0;
const BUTTON_HEIGHT: f32 = 44.0;
const BUTTON_PADDING: f32 = 24.0;
const BUTTON_VERTICAL_OFFSET: f32 = 12.0;
const TEXT_SCALE_HEADING: f32 = 6.0;
const TEXT_SCALE_BUTTON: f32 = 4.0;
const TEXT_SCALE_STATUS: f32 = 3.0;
const LONG_PRESS: Duration = Duration::from_millis(500);

const ALIVE_COLOR: [f32; 3] = [0.95, 0.95, 0.95];
const DEAD_COLOR: [f32; 3] = [0.02, 0.02, 0.03];
const PAUSED_COLOR: [f32; 3] = [0.85, 0.1, 0.1];

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Randomize,
    Clear,
}

impl Command {
    const ALL: [Command; 2] = [Command::Randomize, Command::Clear];

    fn label(self) -> &'static str {
        match self {
            Command::Randomize => "Randomize",
            Command::Clear => "Clear",
        }
    }

    fn event(self) -> Event {
        match self {
            Command::Randomize => Event::Randomize,
            Command::Clear => Event::Clear,
        }
    }
}

/// A touch held on one cell; long enough and it counts as a context-menu gesture.
#[derive(Copy, Clone, Debug)]
struct LongPress {
    started: Instant,
    cell: (usize, usize),
    fired: bool,
}

struct GameOfLifeApp {
    life: Controller,
    window_size: PhysicalSize<u32>,
    cursor_position: Option<[f32; 2]>,
    hovered: Option<(usize, usize)>,
    long_press: Option<LongPress>,
    /// Button under the pointer when the press started; a release only clicks this one.
    pressed_command: Option<Command>,
    instances: Vec<CellInstance>,
    ui_vertices: Vec<Vertex>,
}

impl GameOfLifeApp {
    fn new(life: Controller, window_size: PhysicalSize<u32>) -> Self {
        let cell_count = life.view().grid.size().pow(2);
        Self {
            life,
            window_size,
            cursor_position: None,
            hovered: None,
            long_press: None,
            pressed_command: None,
            instances: Vec::with_capacity(cell_count),
            ui_vertices: Vec::with_capacity(2048),
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.window_size = size;
    }

    fn cursor(&self) -> CursorKind {
        self.life.view().cursor
    }

    fn update(&mut self, now: Instant) -> life::Result<()> {
        if let Some(press) = self.long_press.as_mut() {
            if !press.fired && now.saturating_duration_since(press.started) >= LONG_PRESS {
                press.fired = true;
                self.life.handle(Event::ContextMenu { touch: true })?;
            }
        }
        self.life.poll(now)?;
        Ok(())
    }

    fn key(&mut self, key: Key) -> life::Result<()> {
        self.life.handle(Event::Key(key))?;
        Ok(())
    }

    fn pointer_moved(&mut self, position: [f32; 2]) -> life::Result<()> {
        self.cursor_position = Some(position);
        let cell = self.cell_at(position);
        if cell == self.hovered {
            return Ok(());
        }
        self.hovered = cell;
        if self.long_press.is_some_and(|press| Some(press.cell) != cell) {
            self.long_press = None;
        }
        if let Some((row, col)) = cell {
            self.life.handle(Event::PointerEnter { row, col })?;
        }
        Ok(())
    }

    fn pointer_pressed(&mut self, pointer: Pointer, position: [f32; 2]) -> life::Result<()> {
        self.pointer_moved(position)?;
        if matches!(pointer, Pointer::Touch | Pointer::Mouse(Button::Primary)) {
            self.pressed_command = self.command_at(position);
        }
        let Some((row, col)) = self.cell_at(position) else {
            return Ok(());
        };
        if pointer == Pointer::Touch {
            self.long_press = Some(LongPress {
                started: Instant::now(),
                cell: (row, col),
                fired: false,
            });
        }
        self.life.handle(Event::PointerDown { row, col, pointer })?;
        Ok(())
    }

    fn pointer_released(&mut self, pointer: Pointer, position: [f32; 2]) -> life::Result<()> {
        self.long_press = None;
        self.life.handle(Event::PointerUp { pointer })?;
        if !matches!(pointer, Pointer::Touch | Pointer::Mouse(Button::Primary)) {
            return Ok(());
        }
        if let Some(command) = self.pressed_command.take() {
            if self.command_at(position) == Some(command) {
                self.life.handle(command.event())?;
            }
        }
        Ok(())
    }

    fn pointer_left(&mut self) -> life::Result<()> {
        self.cursor_position = None;
        self.hovered = None;
        self.long_press = None;
        self.pressed_command = None;
        self.life.handle(Event::PointerLeave)?;
        Ok(())
    }

    fn grid_rect(&self) -> Rect {
        let width = self.window_size.width.max(1) as f32;
        let height = self.window_size.height.max(1) as f32;
        let usable_height = (height - UI_HEIGHT).max(1.0);
        let side = (width.min(usable_height) - 2.0 * (GRID_MARGIN + BORDER_WIDTH)).max(1.0);
        let min = [(width - side) * 0.5, UI_HEIGHT + (usable_height - side) * 0.5];
        Rect {
            min,
            max: [min[0] + side, min[1] + side],
        }
    }

    fn cell_at(&self, position: [f32; 2]) -> Option<(usize, usize)> {
        let grid = self.grid_rect();
        if !grid.contains(position) {
            return None;
        }
        let size = self.life.view().grid.size();
        let cell_size = grid.width() / size as f32;
        let row = (((position[1] - grid.min[1]) / cell_size) as usize).min(size - 1);
        let col = (((position[0] - grid.min[0]) / cell_size) as usize).min(size - 1);
        Some((row, col))
    }

    fn button_rect(&self, command: Command) -> Rect {
        let width = self.window_size.width.max(1) as f32;
        let slot = Command::ALL.iter().rev().position(|c| *c == command).unwrap_or(0) as f32;
        let right = width - BUTTON_PADDING - slot * (BUTTON_WIDTH + BUTTON_PADDING);
        Rect {
            min: [right - BUTTON_WIDTH, BUTTON_PADDING + BUTTON_VERTICAL_OFFSET],
            max: [right, BUTTON_PADDING + BUTTON_VERTICAL_OFFSET + BUTTON_HEIGHT],
        }
    }

    fn command_at(&self, position: [f32; 2]) -> Option<Command> {
        Command::ALL.into_iter().find(|command| self.button_rect(*command).contains(position))
    }

    fn build_frame(&mut self) -> (&[CellInstance], &[Vertex]) {
        self.instances.clear();
        self.ui_vertices.clear();

        let width = self.window_size.width.max(1) as f32;
        let height = self.window_size.height.max(1) as f32;
        let window = [width, height];
        let grid = self.grid_rect();
        let view = self.life.view();
        let cell_size = grid.width() / view.grid.size() as f32;

        for (row_index, row) in view.grid.rows().enumerate() {
            for (col_index, cell) in row.iter().enumerate() {
                let x = grid.min[0] + col_index as f32 * cell_size;
                let y = grid.min[1] + row_index as f32 * cell_size;
                let gap = if cell_size > 4.0 * CELL_GAP { CELL_GAP } else { 0.0 };
                let min = [to_ndc(x, width), to_ndc_y(y, height)];
                let max = [to_ndc(x + cell_size - gap, width), to_ndc_y(y + cell_size - gap, height)];
                let color = if cell.is_alive() { ALIVE_COLOR } else { DEAD_COLOR };
                self.instances.push(CellInstance { min, max, color, _pad: 0.0 });
            }
        }

        if view.paused {
            push_frame(&mut self.ui_vertices, grid.expand(BORDER_WIDTH), BORDER_WIDTH, PAUSED_COLOR, window);
        }

        let header_line = Rect {
            min: [0.0, UI_HEIGHT - 4.0],
            max: [width, UI_HEIGHT],
        };
        push_rect(&mut self.ui_vertices, header_line, [0.15, 0.15, 0.2], window);

        draw_text(
            &mut self.ui_vertices,
            "Game of Life",
            [BUTTON_PADDING, BUTTON_PADDING],
            TEXT_SCALE_HEADING,
            [0.9, 0.9, 0.95],
            window,
        );
        if view.paused {
            draw_text(
                &mut self.ui_vertices,
                "Paused",
                [BUTTON_PADDING, BUTTON_PADDING + 8.0 * TEXT_SCALE_HEADING + 4.0],
                TEXT_SCALE_STATUS,
                PAUSED_COLOR,
                window,
            );
        }

        for command in Command::ALL {
            let rect = self.button_rect(command);
            let hovered = self.cursor_position.is_some_and(|pos| rect.contains(pos));
            let color = if hovered { [0.35, 0.45, 0.75] } else { [0.25, 0.33, 0.55] };
            push_rect(&mut self.ui_vertices, rect, color, window);
            draw_label(&mut self.ui_vertices, command.label(), rect, TEXT_SCALE_BUTTON, [0.95, 0.95, 0.98], window);
        }

        (&self.instances, &self.ui_vertices)
    }
}

fn to_key(event: &KeyEvent) -> Key {
    match &event.logical_key {
        WinitKey::Named(NamedKey::Space) => Key::Space,
        WinitKey::Named(NamedKey::Backspace) => Key::Backspace,
        WinitKey::Named(NamedKey::Delete) => Key::Delete,
        WinitKey::Character(text) => text.chars().next().map_or(Key::Other, Key::Char),
        _ => Key::Other,
    }
}

fn to_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Primary,
        MouseButton::Right => Button::Secondary,
        MouseButton::Middle => Button::Auxiliary,
        MouseButton::Back => Button::Other(3),
        MouseButton::Forward => Button::Other(4),
        MouseButton::Other(code) => Button::Other(code),
    }
}

fn cursor_icon(cursor: CursorKind) -> CursorIcon {
    match cursor {
        CursorKind::Pointer => CursorIcon::Pointer,
        CursorKind::Crosshair => CursorIcon::Crosshair,
        CursorKind::Cell => CursorIcon::Cell,
    }
}

struct VulkanApp {
    config: Config,
    window_attrs: WindowAttributes,
    window: Option<Arc<Window>>,
    window_id: Option<WindowId>,
    renderer: Option<Renderer>,
    app: Option<GameOfLifeApp>,
    last_cursor: [f32; 2],
    shown_cursor: Option<CursorKind>,
    frame_count: u32,
    last_fps_log: Instant,
}

impl VulkanApp {
    fn new(config: Config) -> Self {
        let attrs = Window::default_attributes()
            .with_title("Game of Life - Vulkan")
            .with_inner_size(PhysicalSize::new(720, 820));
        Self {
            config,
            window_attrs: attrs,
            window: None,
            window_id: None,
            renderer: None,
            app: None,
            last_cursor: [0.0, 0.0],
            shown_cursor: None,
            frame_count: 0,
            last_fps_log: Instant::now(),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = event_loop
            .create_window(self.window_attrs.clone())
            .map_err(|err| anyhow!("create window: {err}"))?;
        let window = Arc::new(window);
        let cell_count = self.config.grid_size.pow(2);
        let renderer = pollster::block_on(Renderer::new(window.clone(), cell_count))?;
        let app = GameOfLifeApp::new(Controller::new(self.config), renderer.size);
        window.request_redraw();

        self.window_id = Some(window.id());
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.app = Some(app);
        Ok(())
    }

    fn handle_input(&mut self, event: &WindowEvent) -> life::Result<()> {
        let Some(app) = self.app.as_mut() else {
            return Ok(());
        };
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.last_cursor = [position.x as f32, position.y as f32];
                app.pointer_moved(self.last_cursor)?;
            }
            WindowEvent::CursorLeft { .. } => app.pointer_left()?,
            WindowEvent::MouseInput { state, button, .. } => {
                let pointer = Pointer::Mouse(to_button(*button));
                match state {
                    ElementState::Pressed => app.pointer_pressed(pointer, self.last_cursor)?,
                    ElementState::Released => app.pointer_released(pointer, self.last_cursor)?,
                }
            }
            WindowEvent::Touch(Touch { phase, location, .. }) => {
                let position = [location.x as f32, location.y as f32];
                match phase {
                    TouchPhase::Started => app.pointer_pressed(Pointer::Touch, position)?,
                    TouchPhase::Moved => app.pointer_moved(position)?,
                    TouchPhase::Ended | TouchPhase::Cancelled => app.pointer_released(Pointer::Touch, position)?,
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                app.key(to_key(event))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn sync_cursor(&mut self) {
        let (Some(window), Some(app)) = (&self.window, &self.app) else {
            return;
        };
        let cursor = app.cursor();
        if self.shown_cursor != Some(cursor) {
            window.set_cursor(cursor_icon(cursor));
            self.shown_cursor = Some(cursor);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(app)) = (self.renderer.as_mut(), self.app.as_mut()) else {
            return;
        };
        if let Err(err) = app.update(Instant::now()) {
            log::error!("simulation stopped: {err}");
            event_loop.exit();
            return;
        }
        let (instances, ui_vertices) = app.build_frame();
        match renderer.render(instances, ui_vertices) {
            Ok(()) => {
                self.frame_count += 1;
                let elapsed = self.last_fps_log.elapsed();
                if elapsed >= Duration::from_secs(1) {
                    let fps = self.frame_count as f64 / elapsed.as_secs_f64();
                    log::info!("fps: {:.1}", fps);
                    self.frame_count = 0;
                    self.last_fps_log = Instant::now();
                }
            }
            Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size),
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(err) => log::warn!("dropped frame: {err}"),
        }
    }
}

impl ApplicationHandler<()> for VulkanApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            log::error!("failed to start: {err:#}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if Some(window_id) != self.window_id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
                if let Some(app) = self.app.as_mut() {
                    app.resize(size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            event => {
                if let Err(err) = self.handle_input(&event) {
                    log::error!("simulation stopped: {err}");
                    event_loop.exit();
                }
                self.sync_cursor();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::Poll);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let mut app = VulkanApp::new(Config::default());
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use life::Brush;

    fn app() -> GameOfLifeApp {
        let mut life = Controller::with_seed(Config::default(), 9);
        life.handle(Event::Clear).unwrap();
        GameOfLifeApp::new(life, PhysicalSize::new(720, 820))
    }

    fn center_of(app: &GameOfLifeApp, row: usize, col: usize) -> [f32; 2] {
        let grid = app.grid_rect();
        let cell = grid.width() / 15.0;
        [
            grid.min[0] + (col as f32 + 0.5) * cell,
            grid.min[1] + (row as f32 + 0.5) * cell,
        ]
    }

    #[test]
    fn test_grid_is_square_below_ui() {
        let app = app();
        let grid = app.grid_rect();
        assert_eq!(grid.width(), grid.height());
        assert!(grid.min[1] >= UI_HEIGHT);
        for command in Command::ALL {
            assert!(app.button_rect(command).max[1] < UI_HEIGHT);
        }
    }

    #[test]
    fn test_cell_at() {
        let app = app();
        assert_eq!(app.cell_at(center_of(&app, 0, 0)), Some((0, 0)));
        assert_eq!(app.cell_at(center_of(&app, 14, 3)), Some((14, 3)));
        assert_eq!(app.cell_at([1.0, 1.0]), None);
    }

    #[test]
    fn test_buttons_do_not_overlap() {
        let app = app();
        let randomize = app.button_rect(Command::Randomize);
        let clear = app.button_rect(Command::Clear);
        assert!(randomize.max[0] < clear.min[0]);
        let middle = |rect: Rect| [(rect.min[0] + rect.max[0]) * 0.5, (rect.min[1] + rect.max[1]) * 0.5];
        assert_eq!(app.command_at(middle(randomize)), Some(Command::Randomize));
        assert_eq!(app.command_at(middle(clear)), Some(Command::Clear));
    }

    #[test]
    fn test_drag_paints_row() {
        let mut app = app();
        let left = Pointer::Mouse(Button::Primary);
        app.pointer_pressed(left, center_of(&app, 2, 2)).unwrap();
        app.pointer_moved(center_of(&app, 2, 3)).unwrap();
        app.pointer_moved(center_of(&app, 2, 4)).unwrap();
        assert_eq!(app.cursor(), CursorKind::Crosshair);
        app.pointer_released(left, center_of(&app, 2, 4)).unwrap();
        assert_eq!(app.life.view().brush, Brush::None);
        assert_eq!(app.life.view().grid.population(), 3);
    }

    #[test]
    fn test_clear_button() {
        let mut app = app();
        app.life.handle(Event::Randomize).unwrap();
        let clear = app.button_rect(Command::Clear);
        let left = Pointer::Mouse(Button::Primary);
        app.pointer_pressed(left, clear.min).unwrap();
        app.pointer_released(left, clear.min).unwrap();
        assert_eq!(app.life.view().grid.population(), 0);
    }

    #[test]
    fn test_stroke_ending_on_button_does_not_click() {
        let mut app = app();
        let left = Pointer::Mouse(Button::Primary);
        app.pointer_pressed(left, center_of(&app, 0, 0)).unwrap();
        let clear = app.button_rect(Command::Clear);
        app.pointer_moved(clear.min).unwrap();
        app.pointer_released(left, clear.min).unwrap();
        assert_eq!(app.life.view().grid.population(), 1);
    }

    #[test]
    fn test_press_on_one_button_release_on_another() {
        let mut app = app();
        let left = Pointer::Mouse(Button::Primary);
        app.pointer_pressed(left, app.button_rect(Command::Randomize).min).unwrap();
        app.pointer_released(left, app.button_rect(Command::Clear).min).unwrap();
        assert_eq!(app.life.view().grid.population(), 0);
    }

    #[test]
    fn test_long_press_toggles_pause() {
        let mut app = app();
        let start = Instant::now();
        app.pointer_pressed(Pointer::Touch, center_of(&app, 5, 5)).unwrap();
        app.update(start + LONG_PRESS * 2).unwrap();
        assert!(app.life.view().paused);
        // Holding longer does not toggle again.
        app.update(start + LONG_PRESS * 4).unwrap();
        assert!(app.life.view().paused);
        app.pointer_released(Pointer::Touch, center_of(&app, 5, 5)).unwrap();
        assert_eq!(app.life.view().grid.population(), 1);
    }

    #[test]
    fn test_frame_has_every_cell() {
        let mut app = app();
        app.life.handle(Event::TogglePause).unwrap();
        let (instances, ui_vertices) = app.build_frame();
        assert_eq!(instances.len(), 225);
        assert!(!ui_vertices.is_empty());
    }

    #[test]
    fn test_input_mapping() {
        assert_eq!(to_button(MouseButton::Right), Button::Secondary);
        assert_eq!(to_button(MouseButton::Other(9)), Button::Other(9));
        assert_eq!(cursor_icon(CursorKind::Cell), CursorIcon::Cell);
    }
}
