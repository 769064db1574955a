use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect_four::{Cell, GameState};

// player colours, in turn order
const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::White,
];

fn player_color(state: &GameState, cell: Cell) -> Color {
    match cell {
        Cell::Owned(token) => state
            .players()
            .iter()
            .position(|player| player.token() == token)
            .map_or(Color::White, |index| PALETTE[index % PALETTE.len()]),
        Cell::Empty => Color::DarkBlue,
    }
}

/// Draws the board with coloured tokens, top row first
pub fn display(state: &GameState) -> Result<()> {
    let mut stdout = stdout();
    let board = state.board();

    let cols: String = (1..=board.width()).map(|x| (x % 10).to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    for row in (1..=board.height()).rev() {
        for column in 1..=board.width() {
            let cell = board.get(column, row)?;
            let glyph = cell.token().map_or('O', |token| token.glyph());
            stdout.queue(PrintStyledContent(
                style(glyph)
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(player_color(state, cell)),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    for player in state.players() {
        stdout.queue(PrintStyledContent(
            style(format!("{}\n", player))
                .with(player_color(state, Cell::Owned(player.token()))),
        ))?;
    }
    stdout.flush()?;
    Ok(())
}
