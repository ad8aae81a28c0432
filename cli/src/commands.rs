use tictactoe_engine::log;
use tictactoe_engine::tictactoe::{
    Board, Mark, MoveScore, MoveSelectionError, best_score, score_moves, select_move,
};

pub fn best_move(board: &Board, bot_mark: Mark) -> Result<usize, MoveSelectionError> {
    let index = select_move(board, bot_mark)?;
    log!("Best move for {} on {} is {}", bot_mark, board.to_compact_string(), index);
    println!("{}", index);
    Ok(index)
}

pub fn analyze(board: &Board, bot_mark: Mark) -> Result<(), MoveSelectionError> {
    print!("{}", analysis_report(board, bot_mark)?);
    Ok(())
}

fn analysis_report(board: &Board, bot_mark: Mark) -> Result<String, MoveSelectionError> {
    let scores = score_moves(board, bot_mark)?;
    let chosen = best_score(&scores).ok_or(MoveSelectionError::NoLegalMove)?;
    Ok(render_analysis(board, bot_mark, &scores, chosen.index))
}

fn describe(score: i32) -> String {
    match score {
        0 => "draw".to_string(),
        s if s > 0 => format!("win in {}", 10 - s + 1),
        s => format!("loss in {}", s + 10 + 1),
    }
}

fn render_analysis(board: &Board, bot_mark: Mark, scores: &[MoveScore], chosen: usize) -> String {
    let mut out = format!("{}\n{} to move\n", board, bot_mark);
    for MoveScore { index, score } in scores {
        let marker = if *index == chosen { "  <- best" } else { "" };
        out.push_str(&format!(
            "cell {}: {:>3} ({}){}\n",
            index,
            score,
            describe(*score),
            marker
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_counts_plies_including_the_move() {
        assert_eq!(describe(10), "win in 1");
        assert_eq!(describe(8), "win in 3");
        assert_eq!(describe(0), "draw");
        assert_eq!(describe(-9), "loss in 2");
    }

    #[test]
    fn test_analysis_marks_chosen_move() {
        let board: Board = "oo.xx....".parse().unwrap();
        let scores = score_moves(&board, Mark::O).unwrap();
        let chosen = select_move(&board, Mark::O).unwrap();
        let report = render_analysis(&board, Mark::O, &scores, chosen);

        assert!(report.contains("O to move"));
        assert!(report.contains("cell 2:  10 (win in 1)  <- best"));
        assert_eq!(report.matches("<- best").count(), 1);
        assert_eq!(report.matches("cell ").count(), scores.len());
    }

    #[test]
    fn test_analysis_best_agrees_with_select_move() {
        for text in ["....x....", "x...o...x", "ox..ox.x.", "xx..o...."] {
            let board: Board = text.parse().unwrap();
            let chosen = select_move(&board, Mark::O).unwrap();
            let report = analysis_report(&board, Mark::O).unwrap();
            let best_line = report.lines().find(|line| line.ends_with("<- best")).unwrap();
            assert!(best_line.starts_with(&format!("cell {}:", chosen)), "{}", report);
        }
    }

    #[test]
    fn test_analysis_rejects_full_board() {
        let board: Board = "xoxxoooxx".parse().unwrap();
        assert_eq!(analysis_report(&board, Mark::O), Err(MoveSelectionError::NoLegalMove));
    }

    #[test]
    fn test_best_move_rejects_finished_board() {
        let board: Board = "xxxoo....".parse().unwrap();
        assert_eq!(
            best_move(&board, Mark::O),
            Err(MoveSelectionError::GameAlreadyWon(Mark::X))
        );
    }
}
