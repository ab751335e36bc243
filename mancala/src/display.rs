use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    ExecutableCommand,
};
use mancala_core::{MancalaBoard, Pit, Side};
use std::io::{self, Write};

const PLAYER_ONE_COLOR: Color = Color::Cyan;
const PLAYER_TWO_COLOR: Color = Color::Yellow;

fn side_color(side: Side) -> Color {
    match side {
        Side::One => PLAYER_ONE_COLOR,
        Side::Two => PLAYER_TWO_COLOR,
    }
}

fn pit_labels<W: Write + ?Sized>(out: &mut W, pits: &[Pit]) -> io::Result<()> {
    out.execute(Print("      "))?;
    for pit in pits {
        out.execute(Print(format!(" {:>2}  ", pit.number())))?;
    }
    out.execute(Print("\n"))?;
    Ok(())
}

fn pit_row<W: Write + ?Sized>(
    out: &mut W,
    board: &MancalaBoard,
    side: Side,
    pits: &[Pit],
) -> io::Result<()> {
    out.execute(Print("      "))?;
    out.execute(SetForegroundColor(side_color(side)))?;
    for &pit in pits {
        out.execute(Print(format!("[{:>2}] ", board.stones(side, pit))))?;
    }
    out.execute(ResetColor)?;
    out.execute(Print("\n"))?;
    Ok(())
}

/// Draws the board with player 2's row on top, right to left, so that
/// sowing runs counter-clockwise. Player 2's store sits on the left,
/// player 1's on the right.
pub fn render_board<W: Write + ?Sized>(board: &MancalaBoard, out: &mut W) -> io::Result<()> {
    let top: Vec<Pit> = Pit::all().rev().collect();
    let bottom: Vec<Pit> = Pit::all().collect();

    pit_labels(out, &top)?;
    pit_row(out, board, Side::Two, &top)?;

    out.execute(SetForegroundColor(PLAYER_TWO_COLOR))?;
    out.execute(Print(format!(" [{:>2}]", board.store(Side::Two))))?;
    out.execute(ResetColor)?;
    out.execute(Print(" ".repeat(5 * top.len() + 1)))?;
    out.execute(SetForegroundColor(PLAYER_ONE_COLOR))?;
    out.execute(Print(format!("[{:>2}]\n", board.store(Side::One))))?;
    out.execute(ResetColor)?;

    pit_row(out, board, Side::One, &bottom)?;
    pit_labels(out, &bottom)?;
    out.flush()
}
