use arena_core::{color_name, piece_glyph, BoardModel, GameBoard, Square};
use std::fmt::Write;

/// Text diagram of the board, White at the bottom.
pub fn render_board<B: BoardModel>(board: &B) -> String {
    let mut out = String::new();
    out.push_str("\n  a b c d e f g h\n");
    out.push_str("  ---------------\n");

    for rank in (0..8u32).rev() {
        let _ = write!(out, "{} ", rank + 1);
        for file in 0..8u32 {
            match board.piece_at(Square::new(rank * 8 + file)) {
                Some(piece) => {
                    let _ = write!(out, "{} ", piece_glyph(piece));
                }
                None => out.push_str(". "),
            }
        }
        let _ = writeln!(out, "| {}", rank + 1);
    }

    out.push_str("  ---------------\n");
    out.push_str("  a b c d e f g h\n");
    out
}

/// Diagram plus side to move and move number.
pub fn render_game(board: &GameBoard) -> String {
    let mut out = render_board(board);
    let _ = writeln!(
        out,
        "\n{} to move | Move {}",
        color_name(board.turn()),
        board.fullmove_number()
    );
    if board.is_check() && !board.is_terminal() {
        out.push_str("Check!\n");
    }
    out
}
