use log::debug;
use mancala_agents::{AgentError, MoveInput};
use mancala_core::{MancalaBoard, Pit, Side};
use std::cell::RefCell;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::rc::Rc;

/// The terminal console, handed to every human player of a game.
pub type SharedConsole = Rc<RefCell<ConsoleInput<StdinLock<'static>, Stdout>>>;

/// Reads human moves from a line-oriented console.
///
/// Only prompts; the caller draws the board.
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl ConsoleInput<StdinLock<'static>, Stdout> {
    /// Locks stdin for the rest of the program, so build it once per process
    /// and clone the handle for each human.
    pub fn shared_stdio() -> SharedConsole {
        Rc::new(RefCell::new(ConsoleInput::new(io::stdin().lock(), io::stdout())))
    }
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        ConsoleInput { reader, writer }
    }

    fn prompt(&mut self, board: &MancalaBoard, side: Side) -> io::Result<()> {
        let choices: Vec<String> = board
            .legal_moves(side)
            .iter()
            .map(ToString::to_string)
            .collect();
        write!(
            self.writer,
            "{}, choose a pit ({}) or 'quit': ",
            side,
            choices.join(", ")
        )?;
        self.writer.flush()
    }
}

impl<R: BufRead, W: Write> MoveInput for ConsoleInput<R, W> {
    fn read_move(&mut self, board: &MancalaBoard, side: Side) -> Result<Pit, AgentError> {
        loop {
            self.prompt(board, side)?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(AgentError::Resigned(side));
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
                return Err(AgentError::Resigned(side));
            }

            match line.parse::<Pit>() {
                Ok(pit) if board.is_legal(side, pit) => return Ok(pit),
                Ok(pit) => writeln!(self.writer, "Pit {} is empty, pick another.", pit)?,
                Err(err) => {
                    debug!("rejected console input {:?}", line);
                    writeln!(self.writer, "{}", err)?;
                }
            }
        }
    }
}
