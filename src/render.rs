//! Text rendering of placements and run progress.
//!
//! Pure string builders; callers decide where the text goes.

use crate::ea::{GenerationSnapshot, Genotype};
use std::fmt::Write;

/// Draws `genotype` as a chess board.
///
/// Columns are numbered across the top, rows down the left side; `x` marks a
/// queen and `-` an empty square. Labels widen by one character for boards
/// larger than 9.
///
/// ```
/// use u_nqueens::ea::Genotype;
/// use u_nqueens::render::board;
///
/// let g = Genotype::from_genes(vec![2, 4, 1, 3]).unwrap();
/// let text = board(&g);
/// assert!(text.contains("1 | -  -  x  - |"));
/// assert!(text.contains("2 | x  -  -  - |"));
/// ```
pub fn board(genotype: &Genotype) -> String {
    let genes = genotype.genes();
    let n = genes.len();
    let wide = n > 9;
    let pad = if wide { " " } else { "" };
    let rule = format!("{pad}   _{}\n", vec!["__"; n].join("_"));

    let mut out = String::from("\n");
    out.push_str(pad);
    out.push_str("    ");
    for col in 1..=n {
        let sep = if wide && col >= 10 { " " } else { "  " };
        let _ = write!(out, "{col}{sep}");
    }
    out.push('\n');
    out.push_str(&rule);

    for row in 1..=n {
        if wide && row < 10 {
            let _ = write!(out, " {row} |");
        } else {
            let _ = write!(out, "{row} |");
        }
        for &queen in genes {
            out.push_str(if queen == row { " x " } else { " - " });
        }
        out.push_str("|\n");
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

/// Multi-line progress block for one generation.
pub fn status(snapshot: &GenerationSnapshot<'_>, max_evaluations: usize) -> String {
    let n = snapshot.best.genotype().len();
    format!(
        "Running EA on {n}-Queens problem\n\
         Generation: {}\tEvals: {}/{}\n\
         Population statistics: mean = {:.3}\tvariance = {:.3}\n\n\
         Current best solution (fitness = {}):\n{}",
        snapshot.generation,
        snapshot.evaluations,
        max_evaluations,
        snapshot.mean_fitness,
        snapshot.variance_fitness,
        snapshot.best_fitness,
        board(snapshot.best.genotype()),
    )
}
