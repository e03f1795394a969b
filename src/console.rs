use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent, KeyModifiers},
    execute, queue, terminal,
};
use lifeboard::{Board, CellPos, Window};
use log::warn;
use std::io::{self, Write};

pub enum ConsoleCommand {
    Exit,
    TogglePause,
    Step,
    Handled,
}

/// Draws a board into the terminal, one character per cell
pub struct ConsoleRender {
    origin: CellPos,
    report: String,
}
impl ConsoleRender {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self {
            origin: CellPos::zero(),
            report: String::new(),
        })
    }

    pub fn render<B: Board>(&self, board: &B) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        // keep the last line for the report
        let view_rows = rows.saturating_sub(1);
        let window = Window::new(
            self.origin.row,
            self.origin.col,
            cols as usize,
            view_rows as usize,
        );
        let bitmap = board.bitmap(window);

        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for (row, line) in bitmap.to_string().lines().enumerate() {
            // the bitmap is padded to whole bytes, which may overhang the terminal
            let line: String = line.chars().take(cols as usize).collect();
            queue!(stdout, cursor::MoveTo(0, row as u16))?;
            stdout.write_all(line.as_bytes())?;
        }

        // write footer
        queue!(stdout, cursor::MoveTo(0, view_rows))?;
        stdout.write_all(self.report.as_bytes())?;

        stdout.flush()
    }

    pub fn poll_events(&mut self) -> io::Result<Option<ConsoleCommand>> {
        // make sure event is preset for us to take
        if !event::poll(std::time::Duration::from_secs(0))? {
            return Ok(None);
        }

        let event::Event::Key(key) = event::read()? else {
            return Ok(Some(ConsoleCommand::Handled));
        };
        let command = match key {
            // CTRL+C
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => ConsoleCommand::Exit,
            KeyEvent {
                code: KeyCode::Char(' '),
                ..
            } => ConsoleCommand::TogglePause,
            KeyEvent {
                code: KeyCode::Char('n'),
                ..
            } => ConsoleCommand::Step,
            // arrows to move the window
            KeyEvent { code, .. } => {
                match code {
                    KeyCode::Up => self.origin.row = self.origin.row.saturating_sub(1),
                    KeyCode::Down => self.origin.row = self.origin.row.saturating_add(1),
                    KeyCode::Left => self.origin.col = self.origin.col.saturating_sub(1),
                    KeyCode::Right => self.origin.col = self.origin.col.saturating_add(1),
                    _ => {}
                }
                ConsoleCommand::Handled
            }
        };
        Ok(Some(command))
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            warn!("failed to disable raw mode: {}", err);
        }
        if let Err(err) = execute!(io::stdout(), cursor::Show) {
            warn!("failed to show the cursor: {}", err);
        }
    }
}
