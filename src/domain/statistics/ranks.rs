//! Midrank assignment for the rank-based tests.

/// Ranks of a pooled sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// 1-based rank of each value, in input order. Ties share their average rank.
    pub ranks: Vec<f64>,
    /// Sizes of tied blocks (only blocks larger than one).
    pub tie_blocks: Vec<usize>,
}

impl Ranking {
    /// Σ(T³ - T) over all tied blocks.
    pub fn tie_sum(&self) -> f64 {
        self.tie_blocks
            .iter()
            .map(|&t| {
                let t = t as f64;
                t.powi(3) - t
            })
            .sum()
    }
}

/// Assigns 1-based midranks.
pub fn midranks(values: &[f64]) -> Ranking {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut tie_blocks = Vec::new();

    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }

        // positions i..j hold ranks i+1..=j
        let average = (i + 1 + j) as f64 / 2.0;
        for &index in &order[i..j] {
            ranks[index] = average;
        }
        if j - i > 1 {
            tie_blocks.push(j - i);
        }

        i = j;
    }

    Ranking { ranks, tie_blocks }
}
