use anyhow::Context;
use std::io::{BufRead, Write};
use sweeper_core::{Board, FlagOutcome, GameError, Outcome, RevealOutcome};

use crate::command::{Command, HELP};
use crate::render::render_board;

/// Runs the command loop until the game ends, the player quits, or the input runs out.
pub fn play(board: &mut Board, input: impl BufRead, mut output: impl Write) -> anyhow::Result<Outcome> {
    writeln!(output, "{}", render_board(board))?;

    for line in input.lines() {
        let line = line.context("Could not read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err:#}")?;
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        let redraw = match command {
            Command::Reveal(coords) => match board.reveal(coords) {
                Ok(RevealOutcome::NoChange) => {
                    writeln!(output, "Nothing to reveal there")?;
                    false
                }
                Ok(outcome) => outcome.has_update(),
                Err(err) => report_move_error(&mut output, err)?,
            },
            Command::Flag(coords) => match board.toggle_flag(coords) {
                Ok(FlagOutcome::Rejected) => {
                    writeln!(output, "Cannot flag that cell")?;
                    false
                }
                Ok(outcome) => outcome.has_update(),
                Err(err) => report_move_error(&mut output, err)?,
            },
            Command::Help => {
                writeln!(output, "{HELP}")?;
                false
            }
            Command::Quit => break,
        };

        if redraw {
            writeln!(output, "{}", render_board(board))?;
        }

        match board.outcome() {
            Outcome::InProgress => {}
            Outcome::Won => {
                writeln!(output, "All clear, you win!")?;
                break;
            }
            Outcome::Lost => {
                writeln!(output, "You hit a mine! Game over.")?;
                break;
            }
        }
    }

    Ok(board.outcome())
}

fn report_move_error(output: &mut impl Write, err: GameError) -> anyhow::Result<bool> {
    log::warn!("rejected move: {}", err);
    writeln!(output, "{err}")?;
    Ok(false)
}
