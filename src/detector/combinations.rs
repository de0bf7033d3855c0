// Lexicographic k-combinations of 0..n

/// Iterator over all `k`-element subsets of `0..n` in lexicographic order
///
/// # Example
/// ```
/// use cribador::detector::Combinations;
///
/// let all: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
/// assert_eq!(all[0], vec![0, 1]);
/// assert_eq!(all[5], vec![2, 3]);
/// assert_eq!(all.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    state: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            state: (0..k).collect(),
            done: k > n,
        }
    }

    /// Binomial coefficient `C(n, k)`
    pub fn binomial(n: usize, k: usize) -> usize {
        if k > n {
            return 0;
        }
        let k = k.min(n - k);
        (0..k).fold(1usize, |acc, i| acc * (n - i) / (i + 1))
    }

    /// Advance `state` to the next combination, or mark the iterator done
    fn advance(&mut self) {
        let k = self.state.len();
        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.state[i] < self.n - k + i {
                self.state[i] += 1;
                for j in i + 1..k {
                    self.state[j] = self.state[j - 1] + 1;
                }
                return;
            }
        }
        self.done = true;
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.state.clone();
        self.advance();
        Some(current)
    }
}
