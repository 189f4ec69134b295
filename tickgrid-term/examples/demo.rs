use std::fs::File;
use std::time::Duration;

use simplelog::{Config, LevelFilter, WriteLogger};
use tickgrid::{CheckTable, Key, Rect};
use tickgrid_term::{convert_event, InputEvent, Terminal};

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("tickgrid-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let table = CheckTable::new(0, 3);
    for row in 0..5 {
        table.add_row((0..3).map(|col| format!("Item {row}-{col}")), false);
    }
    table.set_header_labels((0..table.column_count()).map(|col| format!("Column {col}")));
    table.set_sorting_enabled(true);

    let mut term = Terminal::new()?;

    loop {
        term.render(|buf| {
            let area = Rect::from_size(buf.width(), buf.height());
            table.render(buf, area);
        })?;
        table.clear_dirty();

        let raw_events = term.poll(Some(Duration::from_millis(250)))?;
        for raw in &raw_events {
            let Some(event) = convert_event(raw) else {
                continue;
            };
            match event {
                InputEvent::Key {
                    key: Key::Char('q'),
                    modifiers,
                } if modifiers.none() => {
                    return Ok(());
                }
                InputEvent::Key { key, modifiers } => {
                    table.handle_key(key, modifiers);
                }
                InputEvent::MousePress {
                    x,
                    y,
                    button,
                    modifiers,
                } => {
                    table.handle_mouse_press(x, y, button, modifiers);
                }
                InputEvent::MouseRelease { x, y, button } => {
                    table.handle_mouse_release(x, y, button);
                }
                InputEvent::MouseMove { x, y } => {
                    table.handle_mouse_move(x, y);
                }
                InputEvent::Scroll { delta } => {
                    table.handle_scroll(delta);
                }
                InputEvent::Resize { .. } => {}
            }
        }

        for event in table.take_events() {
            log::debug!("[demo] {event:?}");
        }
    }
}
