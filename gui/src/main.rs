use anyhow::anyhow;
use eframe::egui;
use eframe::egui::{Pos2, Rect, Ui};
use eframe::run_native;
use life::{Button, Config, Controller, CursorKind, Event, Key, Pointer};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

const CELL_SIZE: f32 = 32.0;
const BORDER_WIDTH: f32 = 6.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::default();
    // Shared between the ticker thread and the UI; the lock keeps events strictly ordered
    let shared_life = Arc::new(Mutex::new(Controller::new(config)));

    run_native(
        "Game of Life GUI",
        eframe::NativeOptions::default(),
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let life = Arc::clone(&shared_life);
            let interval = config.tick_interval();

            // Ticks keep firing while paused or painting; the controller drops them
            thread::spawn(move || loop {
                thread::sleep(interval);
                let ticked = lock(&life).tick();
                match ticked {
                    Ok(true) => ctx.request_repaint(),
                    Ok(false) => {}
                    Err(err) => {
                        log::error!("simulation stopped: {err}");
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        break;
                    }
                }
            });

            Ok(Box::new(GuiOfLife::new(cc, shared_life)))
        }),
    )
    .map_err(|err| anyhow!("failed to run gui: {err}"))
}

fn lock(life: &Mutex<Controller>) -> MutexGuard<'_, Controller> {
    life.lock().unwrap_or_else(PoisonError::into_inner)
}

struct GuiOfLife {
    life: Arc<Mutex<Controller>>,
    /// Cell under the pointer, used to turn pointer motion into enter events.
    hovered: Option<(usize, usize)>,
}

impl GuiOfLife {
    fn new(_cc: &eframe::CreationContext<'_>, life: Arc<Mutex<Controller>>) -> Self {
        Self { life, hovered: None }
    }

    fn apply(&self, ctx: &egui::Context, events: &[Event]) {
        let mut life = lock(&self.life);
        for event in events {
            if let Err(err) = life.handle(*event) {
                log::error!("simulation stopped: {err}");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }
    }

    /// Translate this frame's raw input into controller events, in arrival order.
    fn collect_events(&mut self, ctx: &egui::Context, cells: Rect, size: usize) -> Vec<Event> {
        let (raw_events, touching) = ctx.input(|i| (i.events.clone(), i.any_touches()));
        let pointer = |button| {
            if touching {
                Pointer::Touch
            } else {
                Pointer::Mouse(to_button(button))
            }
        };

        let mut events = Vec::new();
        for raw in raw_events {
            match raw {
                egui::Event::PointerMoved(pos) => {
                    let cell = cell_at(cells, pos, size);
                    if cell != self.hovered {
                        if let Some((row, col)) = cell {
                            events.push(Event::PointerEnter { row, col });
                        }
                        self.hovered = cell;
                    }
                }
                egui::Event::PointerButton { pos, button, pressed: true, .. } => {
                    if let Some((row, col)) = cell_at(cells, pos, size) {
                        self.hovered = Some((row, col));
                        events.push(Event::PointerDown { row, col, pointer: pointer(button) });
                    }
                }
                egui::Event::PointerButton { button, pressed: false, .. } => {
                    events.push(Event::PointerUp { pointer: pointer(button) });
                }
                egui::Event::PointerGone => {
                    self.hovered = None;
                    events.push(Event::PointerLeave);
                }
                egui::Event::Key { key, pressed: true, .. } => {
                    events.push(Event::Key(to_key(key)));
                }
                _ => {}
            }
        }
        events
    }

    fn create_grid(&mut self, ui: &mut Ui) {
        let size = lock(&self.life).view().grid.size();
        let side = CELL_SIZE * size as f32 + 2.0 * BORDER_WIDTH;

        // Calculate the grid starting point
        let (rect, response) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::click_and_drag());
        let cells = rect.shrink(BORDER_WIDTH);

        let mut events = self.collect_events(ui.ctx(), cells, size);
        if response.long_touched() {
            events.push(Event::ContextMenu { touch: true });
        }
        self.apply(ui.ctx(), &events);

        let life = lock(&self.life);
        let view = life.view();
        let painter = ui.painter();

        if view.paused {
            painter.rect_stroke(
                rect.shrink(BORDER_WIDTH / 2.0),
                0.0,
                egui::Stroke::new(BORDER_WIDTH, egui::Color32::RED),
            );
        }

        // Draw each cell at its calculated position
        for (row_index, row) in view.grid.rows().enumerate() {
            for (col_index, cell) in row.iter().enumerate() {
                let pos = cells.min + egui::vec2(col_index as f32 * CELL_SIZE, row_index as f32 * CELL_SIZE);
                let color = if cell.is_alive() {
                    egui::Color32::WHITE
                } else {
                    egui::Color32::from_gray(16)
                };
                painter.rect_filled(Rect::from_min_size(pos, egui::vec2(CELL_SIZE, CELL_SIZE)), 0.0, color);
            }
        }

        if response.hovered() || view.brush.is_active() {
            ui.ctx().set_cursor_icon(cursor_icon(view.cursor));
        }
    }
}

impl eframe::App for GuiOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Game of Life");
            ui.horizontal(|ui| {
                let paused = lock(&self.life).view().paused;
                let mut commands = Vec::new();
                if ui.button(if paused { "Resume" } else { "Pause" }).clicked() {
                    commands.push(Event::TogglePause);
                }
                if ui.button("Randomize").clicked() {
                    commands.push(Event::Randomize);
                }
                if ui.button("Clear").clicked() {
                    commands.push(Event::Clear);
                }
                self.apply(ctx, &commands);
                ui.label("space: pause · r: randomize · c: clear · left/right drag: paint");
            });

            self.create_grid(ui);
        });
    }
}

/// Cell under `pos`, if it lies on the board.
fn cell_at(cells: Rect, pos: Pos2, size: usize) -> Option<(usize, usize)> {
    if !cells.contains(pos) {
        return None;
    }
    let offset = pos - cells.min;
    let row = ((offset.y / CELL_SIZE) as usize).min(size - 1);
    let col = ((offset.x / CELL_SIZE) as usize).min(size - 1);
    Some((row, col))
}

fn to_button(button: egui::PointerButton) -> Button {
    match button {
        egui::PointerButton::Primary => Button::Primary,
        egui::PointerButton::Secondary => Button::Secondary,
        egui::PointerButton::Middle => Button::Auxiliary,
        egui::PointerButton::Extra1 => Button::Other(3),
        egui::PointerButton::Extra2 => Button::Other(4),
    }
}

fn to_key(key: egui::Key) -> Key {
    match key {
        egui::Key::Space => Key::Space,
        egui::Key::Backspace => Key::Backspace,
        egui::Key::Delete => Key::Delete,
        egui::Key::C => Key::Char('c'),
        egui::Key::R => Key::Char('r'),
        _ => Key::Other,
    }
}

fn cursor_icon(cursor: CursorKind) -> egui::CursorIcon {
    match cursor {
        CursorKind::Pointer => egui::CursorIcon::PointingHand,
        CursorKind::Crosshair => egui::CursorIcon::Crosshair,
        CursorKind::Cell => egui::CursorIcon::Cell,
    }
}
