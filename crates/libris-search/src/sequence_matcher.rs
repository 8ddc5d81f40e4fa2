//! Ratcliff/Obershelp sequence similarity, compatible with Python's
//! `difflib.SequenceMatcher` (no junk predicate, autojunk enabled).
//!
//! Sequences are compared per `char`. The second sequence is indexed once, so
//! one matcher can score many first sequences against the same query via
//! [`SequenceMatcher::set_seq1`].

use std::collections::HashMap;

/// Length at which the autojunk popularity heuristic kicks in.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A run of equal elements: `a[a_start..a_start+size] == b[b_start..b_start+size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// Positions of each element of `b`, popular elements removed.
    b2j: HashMap<char, Vec<usize>>,
    /// Element counts of `b`, built lazily for `quick_ratio`.
    full_b_count: Option<HashMap<char, usize>>,
    matching_blocks: Option<Vec<Match>>,
}

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();
        let b2j = index_b(&b);
        Self {
            a: a.chars().collect(),
            b,
            b2j,
            full_b_count: None,
            matching_blocks: None,
        }
    }

    /// Replace the first sequence, keeping the index of the second.
    pub fn set_seq1(&mut self, a: &str) {
        self.a = a.chars().collect();
        self.matching_blocks = None;
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among equally long blocks, the one starting earliest in `a` wins, and
    /// of those the one starting earliest in `b`.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);

        // j2len[j] = length of the longest match ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = j
                        .checked_sub(1)
                        .and_then(|pj| j2len.get(&pj).copied())
                        .unwrap_or(0);
                    let k = prev + 1;
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Popular elements are missing from b2j; extend over equal neighbours.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        Match {
            a_start: best_i,
            b_start: best_j,
            size: best_size,
        }
    }

    /// Non-overlapping matching blocks in increasing order, adjacent blocks
    /// merged, terminated by a zero-size sentinel at `(len(a), len(b))`.
    pub fn matching_blocks(&mut self) -> &[Match] {
        if self.matching_blocks.is_none() {
            self.matching_blocks = Some(self.compute_matching_blocks());
        }
        self.matching_blocks.as_deref().unwrap_or_default()
    }

    fn compute_matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a_start && blo < m.b_start {
                queue.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.size < ahi && m.b_start + m.size < bhi {
                queue.push((m.a_start + m.size, ahi, m.b_start + m.size, bhi));
            }
        }
        blocks.sort_by_key(|m| (m.a_start, m.b_start, m.size));

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for m in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.size == m.a_start
                        && last.b_start + last.size == m.b_start =>
                {
                    last.size += m.size;
                }
                _ => merged.push(m),
            }
        }
        merged.push(Match {
            a_start: la,
            b_start: lb,
            size: 0,
        });
        merged
    }

    /// `2·M / T` where `M` is the number of matched elements and `T` the
    /// total length of both sequences. Two empty sequences score 1.0.
    pub fn ratio(&mut self) -> f64 {
        let total = self.a.len() + self.b.len();
        let matches: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        calculate_ratio(matches, total)
    }

    /// Upper bound on [`ratio`](Self::ratio) from element multiset overlap.
    pub fn quick_ratio(&mut self) -> f64 {
        let b = &self.b;
        let full = self.full_b_count.get_or_insert_with(|| {
            let mut counts = HashMap::new();
            for &c in b {
                *counts.entry(c).or_insert(0usize) += 1;
            }
            counts
        });

        let mut avail: HashMap<char, isize> = HashMap::new();
        let mut matches = 0usize;
        for c in &self.a {
            let remaining = avail
                .entry(*c)
                .or_insert_with(|| full.get(c).copied().unwrap_or(0) as isize);
            *remaining -= 1;
            if *remaining >= 0 {
                matches += 1;
            }
        }
        calculate_ratio(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on [`ratio`](Self::ratio) from lengths alone.
    pub fn real_quick_ratio(&self) -> f64 {
        let (la, lb) = (self.a.len(), self.b.len());
        calculate_ratio(la.min(lb), la + lb)
    }
}

fn calculate_ratio(matches: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / total as f64
}

/// Index `b` by element. For sequences of 200+ elements, elements occurring
/// more than `len/100 + 1` times are treated as noise and dropped.
fn index_b(b: &[char]) -> HashMap<char, Vec<usize>> {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (i, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(i);
    }
    if b.len() >= AUTOJUNK_MIN_LEN {
        let threshold = b.len() / 100 + 1;
        b2j.retain(|_, positions| positions.len() <= threshold);
    }
    b2j
}
