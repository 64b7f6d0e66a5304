// Accuracy evaluation against gold annotations.
//
// Gold files carry the quotation spans a human marked in the same token
// stream, as a JSON array of [start, end] pairs (inclusive indices). A
// tagged span counts as correct only when it reproduces a gold span
// exactly.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use iqtibas_lib::QuranMatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalReport {
    pub correct: usize,
    pub not_found: usize,
    pub false_positive: usize,
}

impl EvalReport {
    pub fn precision(&self) -> f64 {
        let tagged = self.correct + self.false_positive;
        if tagged == 0 {
            return 0.0;
        }
        self.correct as f64 / tagged as f64
    }

    pub fn recall(&self) -> f64 {
        let gold = self.correct + self.not_found;
        if gold == 0 {
            return 0.0;
        }
        self.correct as f64 / gold as f64
    }
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "correct        = {}", self.correct)?;
        writeln!(f, "not found      = {}", self.not_found)?;
        writeln!(f, "false positive = {}", self.false_positive)?;
        write!(
            f,
            "precision = {:.3}  recall = {:.3}",
            self.precision(),
            self.recall()
        )
    }
}

/// Compare tagged spans against gold spans as sets.
pub fn evaluate(gold: &[(usize, usize)], tagged: &[(usize, usize)]) -> EvalReport {
    let gold: HashSet<(usize, usize)> = gold.iter().copied().collect();
    let tagged: HashSet<(usize, usize)> = tagged.iter().copied().collect();

    EvalReport {
        correct: gold.intersection(&tagged).count(),
        not_found: gold.difference(&tagged).count(),
        false_positive: tagged.difference(&gold).count(),
    }
}

/// Read a gold file and evaluate the given matches against it.
pub fn evaluate_file(
    path: &Path,
    matches: &[QuranMatch],
) -> Result<EvalReport, Box<dyn std::error::Error>> {
    let gold: Vec<(usize, usize)> = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    let tagged: Vec<(usize, usize)> = matches
        .iter()
        .map(|m| (m.input_start, m.input_end))
        .collect();
    Ok(evaluate(&gold, &tagged))
}
