//! Event-driven controller: loading spinner, then info panel plus map.

use crate::lookup::{self, GeoLookupClient, LocationRecord, LookupError};
use crate::style;
use crate::terminal::{BoxStyle, Terminal};
use crate::worldmap;
use crossterm::event::{Event as TermEvent, KeyCode, KeyModifiers};
use std::io;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

const SPINNER_FRAMES: [char; 8] = ['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];
const TICK_INTERVAL: Duration = Duration::from_millis(100);
const QUIT_HINT: &str = "Press q to quit.";
const PANEL_TITLE: &str = " IP VISUALIZER ";
const LABEL_WIDTH: usize = 12;

/// Everything the event loop consumes arrives through one channel.
pub enum Event {
    Tick,
    LookupSucceeded(LocationRecord),
    LookupFailed(LookupError),
    KeyPressed(KeyCode, KeyModifiers),
}

/// Follow-up work requested by a state transition
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    ScheduleTick,
}

#[derive(Clone)]
pub struct AppConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

/// Controller state. Mutated only from the event loop thread.
pub struct App {
    loading: bool,
    record: Option<LocationRecord>,
    error: Option<LookupError>,
    spinner_frame: usize,
    quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            loading: true,
            record: None,
            error: None,
            spinner_frame: 0,
            quit: false,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Apply one event. Ticks only advance the spinner (and re-arm) while
    /// still loading, so the timer dies with the loading state.
    pub fn handle(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Tick => {
                if self.loading {
                    self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
                    return Some(Command::ScheduleTick);
                }
                None
            }
            Event::LookupSucceeded(record) => {
                self.record = Some(record);
                self.loading = false;
                None
            }
            Event::LookupFailed(err) => {
                self.error = Some(err);
                self.loading = false;
                None
            }
            Event::KeyPressed(code, modifiers) => {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    _ => {}
                }
                None
            }
        }
    }

    /// Compose a frame from the current state. Error wins over loading,
    /// loading over the record; a blank frame is unreachable in practice.
    fn draw(&self, term: &mut Terminal) {
        if let Some(err) = &self.error {
            term.set_str(1, 1, &error_line(err), None, false);
            term.set_str(1, 3, QUIT_HINT, Some(style::SUBTLE), false);
        } else if self.loading {
            term.set_str(1, 1, &loading_line(self.spinner_frame), None, false);
            term.set_str(1, 3, QUIT_HINT, Some(style::SUBTLE), false);
        } else if let Some(record) = &self.record {
            let (panel_w, panel_h) = draw_info_panel(term, 0, 0, record);
            let (_, map_h) = worldmap::draw(term, panel_w as i32, 0, record.lat, record.lon);
            let hint_y = panel_h.max(map_h) as i32 + 1;
            term.set_str(0, hint_y, QUIT_HINT, Some(style::SUBTLE), false);
        }
    }
}

fn error_line(err: &LookupError) -> String {
    format!("Error: {err}")
}

fn loading_line(spinner_frame: usize) -> String {
    let glyph = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    format!("{glyph} Scanning network for IP details...")
}

fn info_rows(record: &LocationRecord) -> Vec<(&'static str, String)> {
    vec![
        ("IP Address:", record.query.clone()),
        ("ISP:", record.isp.clone()),
        ("Location:", format!("{}, {}", record.city, record.country)),
        ("Region:", record.region_name.clone()),
        ("Timezone:", record.timezone.clone()),
        ("AS:", record.autonomous_system.clone()),
        ("Coords:", format!("{}, {}", record.lat, record.lon)),
    ]
}

/// Draw the bordered key/value panel; returns its (width, height).
fn draw_info_panel(term: &mut Terminal, x0: i32, y0: i32, record: &LocationRecord) -> (usize, usize) {
    let rows = info_rows(record);

    let inner_w = rows
        .iter()
        .map(|(label, value)| LABEL_WIDTH.max(label.chars().count() + 1) + value.chars().count())
        .max()
        .unwrap_or(0)
        .max(PANEL_TITLE.chars().count());

    // title + blank line + rows, wrapped in 1-row/2-col padding and a border
    let w = inner_w + 6;
    let h = rows.len() + 2 + 4;

    term.draw_box(x0, y0, w, h, BoxStyle::Plain, style::BORDER);

    let cx = x0 + 3;
    let mut cy = y0 + 2;

    term.set_str_bg(cx, cy, PANEL_TITLE, style::TITLE_FG, style::TITLE_BG, true);
    cy += 2;

    for (label, value) in &rows {
        term.set_str(
            cx,
            cy,
            &format!("{label:<width$}", width = LABEL_WIDTH),
            Some(style::LABEL),
            true,
        );
        term.set_str(cx + LABEL_WIDTH as i32, cy, value, None, false);
        cy += 1;
    }

    (w, h)
}

/// One-shot timer: fires a single tick after the interval. Re-arming is
/// the controller's decision, so at most one tick is ever pending.
fn schedule_tick(tx: Sender<Event>) {
    thread::spawn(move || {
        thread::sleep(TICK_INTERVAL);
        let _ = tx.send(Event::Tick);
    });
}

/// Forward terminal key events into the app channel. Parked in a blocking
/// read; abandoned at process exit.
fn spawn_input(tx: Sender<Event>) {
    thread::spawn(move || loop {
        match crossterm::event::read() {
            Ok(TermEvent::Key(key)) => {
                if tx.send(Event::KeyPressed(key.code, key.modifiers)).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    });
}

pub fn run(config: AppConfig) -> io::Result<()> {
    let mut term = Terminal::new(true)?;

    let (tx, rx) = mpsc::channel();
    lookup::spawn(GeoLookupClient::new(config.endpoint, config.timeout), tx.clone());
    spawn_input(tx.clone());
    schedule_tick(tx.clone());

    let mut app = App::new();
    app.draw(&mut term);
    term.present()?;

    while !app.quit_requested() {
        let Ok(event) = rx.recv() else {
            break;
        };

        if app.handle(event) == Some(Command::ScheduleTick) {
            schedule_tick(tx.clone());
        }

        term.clear();
        app.draw(&mut term);
        term.present()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn sample_record() -> LocationRecord {
        serde_json::from_str(
            r#"{
                "query": "93.184.216.34",
                "status": "success",
                "country": "United Kingdom",
                "countryCode": "GB",
                "region": "ENG",
                "regionName": "England",
                "city": "London",
                "zip": "EC1A",
                "lat": 51.5,
                "lon": -0.12,
                "timezone": "Europe/London",
                "isp": "Example ISP",
                "org": "Example Org",
                "as": "AS15133 Example"
            }"#,
        )
        .unwrap()
    }

    fn timeout_error() -> LookupError {
        LookupError::Read(io::Error::new(io::ErrorKind::TimedOut, "connection timed out"))
    }

    fn decode_error() -> LookupError {
        serde_json::from_str::<LocationRecord>("<html>")
            .map_err(LookupError::from)
            .unwrap_err()
    }

    #[test]
    fn tick_while_loading_advances_spinner_and_reschedules() {
        let mut app = App::new();
        assert_eq!(app.handle(Event::Tick), Some(Command::ScheduleTick));
        assert_eq!(app.spinner_frame, 1);
    }

    #[test]
    fn spinner_frame_wraps_modulo_eight() {
        let mut app = App::new();
        for _ in 0..20 {
            app.handle(Event::Tick);
            assert!(app.spinner_frame < SPINNER_FRAMES.len());
        }
        assert_eq!(app.spinner_frame, 20 % SPINNER_FRAMES.len());
    }

    #[test]
    fn success_freezes_into_ready_state() {
        let mut app = App::new();
        app.handle(Event::LookupSucceeded(sample_record()));
        assert!(!app.loading);
        assert!(app.record.is_some());
        assert!(app.error.is_none());
    }

    #[test]
    fn ticks_after_terminal_event_are_noops() {
        let mut app = App::new();
        app.handle(Event::LookupSucceeded(sample_record()));

        let frame = app.spinner_frame;
        assert_eq!(app.handle(Event::Tick), None);
        assert_eq!(app.spinner_frame, frame);

        let mut failed = App::new();
        failed.handle(Event::LookupFailed(timeout_error()));
        assert_eq!(failed.handle(Event::Tick), None);
    }

    #[test]
    fn transport_and_decode_failures_classify_identically() {
        for err in [timeout_error(), decode_error()] {
            let mut app = App::new();
            app.handle(Event::LookupFailed(err));
            assert!(!app.loading);
            assert!(app.record.is_none());
            assert!(app.error.is_some());
        }
    }

    #[test]
    fn error_view_contains_error_prefix() {
        let mut app = App::new();
        app.handle(Event::LookupFailed(timeout_error()));
        let line = error_line(app.error.as_ref().unwrap());
        assert!(line.starts_with("Error:"));
        assert!(line.contains("connection timed out"));
    }

    #[test]
    fn loading_view_cycles_spinner_glyphs() {
        assert!(loading_line(0).contains('⣾'));
        assert!(loading_line(7).contains('⣷'));
        assert!(loading_line(8).contains('⣾'));
        assert!(loading_line(3).contains("Scanning network for IP details"));
    }

    #[test]
    fn quit_key_works_while_still_loading() {
        let mut app = App::new();
        assert!(app.loading);
        app.handle(Event::KeyPressed(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.quit_requested());
        // No ready or error view was ever produced
        assert!(app.record.is_none());
        assert!(app.error.is_none());
    }

    #[test]
    fn ctrl_c_quits_from_any_state() {
        let mut app = App::new();
        app.handle(Event::LookupSucceeded(sample_record()));
        app.handle(Event::KeyPressed(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.quit_requested());
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut app = App::new();
        app.handle(Event::KeyPressed(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!app.quit_requested());
        assert!(app.loading);
    }

    #[test]
    fn info_rows_keep_full_coordinate_precision() {
        let rows = info_rows(&sample_record());
        let coords = &rows.last().unwrap().1;
        assert_eq!(coords, "51.5, -0.12");

        let location = &rows[2].1;
        assert_eq!(location, "London, United Kingdom");
    }
}
