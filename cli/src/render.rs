use sweeper_core::{Board, CellState, Coord2};

/// Character shown for a cell. Once the game is over hidden mines and wrong flags are shown as well.
fn cell_char(board: &Board, coords: Coord2, state: CellState) -> char {
    let layout = board.revealed_layout();
    let has_mine = layout.is_some_and(|layout| layout.contains_mine(coords));

    match state {
        CellState::Hidden if has_mine => '*',
        CellState::Hidden => '#',
        CellState::Flagged if layout.is_some() && !has_mine => 'x',
        CellState::Flagged => 'F',
        CellState::Revealed(0) => '.',
        CellState::Revealed(count) => char::from(b'0' + count),
        CellState::RevealedMine => 'X',
    }
}

/// Draws the board with row and column numbers, followed by a status line.
pub fn render_board(board: &Board) -> String {
    let (rows, cols) = board.size();
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..cols {
        out.push_str(&format!("{col:>4}"));
    }
    out.push('\n');

    for row in 0..rows {
        out.push_str(&format!("{row:>3}"));
        for col in 0..cols {
            let coords = (row, col);
            // coordinates come from the board's own size
            let state = board.cell_state(coords).unwrap_or(CellState::Hidden);
            out.push_str(&format!("{:>4}", cell_char(board, coords, state)));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "flags left: {}, outcome: {:?}",
        board.remaining_flags(),
        board.outcome()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::MineLayout;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    fn grid_lines(rendered: &str) -> Vec<String> {
        rendered
            .lines()
            .skip(1)
            .filter(|line| !line.starts_with("flags"))
            .map(|line| line.split_whitespace().skip(1).collect())
            .collect()
    }

    #[test]
    fn hides_mines_during_play() {
        let mut board = board((2, 3), &[(0, 0), (1, 2)]);
        board.reveal((0, 1)).unwrap();
        board.toggle_flag((0, 0)).unwrap();

        let rendered = render_board(&board);

        assert_eq!(grid_lines(&rendered), ["F2#", "###"]);
        assert!(rendered.ends_with("flags left: 1, outcome: InProgress"));
    }

    #[test]
    fn shows_mines_and_wrong_flags_after_loss() {
        let mut board = board((2, 3), &[(0, 0), (1, 2)]);
        board.toggle_flag((1, 0)).unwrap();
        board.reveal((1, 2)).unwrap();

        let rendered = render_board(&board);

        assert_eq!(grid_lines(&rendered), ["*##", "x#X"]);
        assert!(rendered.ends_with("outcome: Lost"));
    }

    #[test]
    fn zero_cells_render_as_dots_and_win_shows_mines() {
        let mut board = board((1, 4), &[(0, 3)]);
        board.reveal((0, 0)).unwrap();

        assert_eq!(grid_lines(&render_board(&board)), ["..1*"]);
    }
}
