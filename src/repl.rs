//! Interactive prompt with line editing and in-session history.
//!
//! The editor runs the terminal in raw mode only while a line is being
//! composed; evaluation output and diagnostics are printed with the
//! terminal restored, so they wrap and pipe like ordinary stdout/stderr.

use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};

use bmath::output::DisplayOptions;
use bmath::parser::parse::Context;

const PROMPT: &str = "expr> ";

/// Run the read-eval-print loop until EOF, `exit`, or `quit`.
pub fn run(ctx: &mut Context, options: &DisplayOptions) -> io::Result<()> {
    let mut history: Vec<String> = Vec::new();

    loop {
        let Some(line) = read_line(&history)? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        history.push(input.to_string());
        crate::evaluate(ctx, input, options, false);
        io::stdout().flush()?;
    }

    Ok(())
}

/// Read one line in raw mode. Returns `None` on Ctrl-D at an empty line.
fn read_line(history: &[String]) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    print!("{}", PROMPT);
    stdout.flush()?;

    terminal::enable_raw_mode()?;
    let result = edit_line(&mut stdout, history);
    terminal::disable_raw_mode()?;
    println!();

    result
}

fn edit_line(stdout: &mut io::Stdout, history: &[String]) -> io::Result<Option<String>> {
    let mut buffer: Vec<char> = Vec::new();
    let mut cursor = 0;
    // one past the last entry means "editing a fresh line"
    let mut history_index = history.len();
    let mut stash = String::new();

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter => return Ok(Some(buffer.iter().collect())),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                write!(stdout, "^C\r\n")?;
                buffer.clear();
                cursor = 0;
                history_index = history.len();
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if buffer.is_empty() {
                    return Ok(None);
                }
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.insert(cursor, ch);
                cursor += 1;
            }
            KeyCode::Backspace => {
                if cursor > 0 {
                    cursor -= 1;
                    buffer.remove(cursor);
                }
            }
            KeyCode::Delete => {
                if cursor < buffer.len() {
                    buffer.remove(cursor);
                }
            }
            KeyCode::Left => cursor = cursor.saturating_sub(1),
            KeyCode::Right => {
                if cursor < buffer.len() {
                    cursor += 1;
                }
            }
            KeyCode::Home => cursor = 0,
            KeyCode::End => cursor = buffer.len(),
            KeyCode::Up => {
                if history_index > 0 {
                    if history_index == history.len() {
                        stash = buffer.iter().collect();
                    }
                    history_index -= 1;
                    buffer = history[history_index].chars().collect();
                    cursor = buffer.len();
                }
            }
            KeyCode::Down => {
                if history_index < history.len() {
                    history_index += 1;
                    buffer = if history_index == history.len() {
                        stash.chars().collect()
                    } else {
                        history[history_index].chars().collect()
                    };
                    cursor = buffer.len();
                }
            }
            _ => {}
        }

        redraw(stdout, &buffer, cursor)?;
    }
}

fn redraw(stdout: &mut io::Stdout, buffer: &[char], cursor: usize) -> io::Result<()> {
    execute!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    let line: String = buffer.iter().collect();
    write!(stdout, "{}{}", PROMPT, line)?;
    execute!(stdout, MoveToColumn((PROMPT.len() + cursor) as u16))?;
    stdout.flush()
}
