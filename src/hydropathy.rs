//! Hydropathy-weighted distinctness (ASH score) and a simple antigenicity metric
//!
//! Residues fall into three groups: hydrophobic (-0.5), neutral (0.0) and
//! hydrophilic (+0.5). Two differing residues cost the absolute difference of
//! their weights, or 0.25 when they share a group. A gap against a residue
//! costs 2.0. Higher totals mean the two windows are more chemically distinct.

/// Symbol used for alignment gaps
pub const GAP: u8 = b'-';

/// Cost of a residue aligned to a gap
pub const GAP_COST: f64 = 2.0;

/// Cost of two different residues from the same group
pub const SAME_GROUP_COST: f64 = 0.25;

const HYDROPHOBIC: f64 = -0.5;
const NEUTRAL: f64 = 0.0;
const HYDROPHILIC: f64 = 0.5;

/// Residues counted by [`antigenicity`]
pub const HYDROPHILES: &[u8] = b"DERK";

/// Hydropathy weight of a residue. Unknown symbols are treated as neutral.
pub fn weight(residue: u8) -> f64 {
    match residue.to_ascii_uppercase() {
        b'L' | b'A' | b'F' | b'Y' | b'W' | b'I' | b'V' => HYDROPHOBIC,
        b'D' | b'E' | b'R' | b'K' => HYDROPHILIC,
        _ => NEUTRAL,
    }
}

/// Cost of aligning `a` against `b`
pub fn residue_distance(a: u8, b: u8) -> f64 {
    if a == b {
        return 0.0;
    }
    if a == GAP || b == GAP {
        return GAP_COST;
    }
    let diff = (weight(a) - weight(b)).abs();
    if diff == 0.0 {
        SAME_GROUP_COST
    } else {
        diff
    }
}

/// Sum of residue distances over two aligned windows
pub fn ash_score(window_a: &[u8], window_b: &[u8]) -> f64 {
    window_a
        .iter()
        .zip(window_b)
        .map(|(&a, &b)| residue_distance(a, b))
        .sum()
}

/// Fraction of hydrophilic residues, rounded to two decimals
pub fn antigenicity(window: &[u8]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let hits = window
        .iter()
        .filter(|r| HYDROPHILES.contains(&r.to_ascii_uppercase()))
        .count();
    round_ratio(hits, window.len())
}

/// Round `hits / len` to two decimals the way the `f64` quotient itself would
/// round: an exact tie goes to the even hundredth, while a quotient that only
/// looks like a tie rounds toward the side its binary value lies on.
fn round_ratio(hits: usize, len: usize) -> f64 {
    let twice = hits * 200;
    let hundredths = if twice % len == 0 && (twice / len) % 2 == 1 {
        let lower = hits * 100 / len;
        let (h, n) = (hits as f64, len as f64);
        // sign of (h / n) * n - h, computed with a single rounding
        let error = (h / n).mul_add(n, -h);
        if error > 0.0 || (error == 0.0 && lower % 2 == 1) {
            lower + 1
        } else {
            lower
        }
    } else {
        (twice + len) / (2 * len)
    };
    hundredths as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residue_distance() {
        assert_eq!(residue_distance(b'A', b'-'), 2.0);
        assert_eq!(residue_distance(b'-', b'-'), 0.0);
        assert_eq!(residue_distance(b'D', b'E'), 0.25);
        assert_eq!(residue_distance(b'D', b'D'), 0.0);
        assert_eq!(residue_distance(b'L', b'Y'), 0.25);
        assert_eq!(residue_distance(b'D', b'Y'), 1.0);
        assert_eq!(residue_distance(b'D', b'H'), 0.5);
        assert_eq!(residue_distance(b'L', b'H'), 0.5);
        assert_eq!(residue_distance(b'T', b'H'), 0.25);
    }

    #[test]
    fn test_ash_score() {
        assert_eq!(ash_score(b"DD", b"LL"), 2.0);
        assert_eq!(ash_score(b"DD", b"HH"), 1.0);
        assert_eq!(ash_score(b"LL", b"HH"), 1.0);
        assert_eq!(ash_score(b"PEPTIDE", b"PEPTYDE"), 0.25);
        assert_eq!(ash_score(b"PEPT-DE", b"PEPTYDE"), 2.0);
        assert_eq!(ash_score(b"PEPT-DE", b"PEPT-DE"), 0.0);
    }

    #[test]
    fn test_antigenicity() {
        assert_eq!(antigenicity(b"DDDDD"), 1.0);
        assert_eq!(antigenicity(b"DDGD"), 0.75);
        assert_eq!(antigenicity(b"LLLLL"), 0.0);
        assert_eq!(antigenicity(b"LLLG"), 0.0);
        assert_eq!(antigenicity(b"KAA"), 0.33);
        assert_eq!(antigenicity(b""), 0.0);
    }

    #[test]
    fn test_antigenicity_ties() {
        // exact halves go to the even hundredth
        assert_eq!(antigenicity(b"DAAAAAAA"), 0.12);
        assert_eq!(antigenicity(b"DDDDDAAA"), 0.62);
        assert_eq!(antigenicity(b"DDDAAAAA"), 0.38);
        // 1/40 is stored slightly above 0.025, 3/40 slightly below 0.075
        let mut window = [b'A'; 40];
        window[0] = b'K';
        assert_eq!(antigenicity(&window), 0.03);
        window[1] = b'K';
        window[2] = b'K';
        assert_eq!(antigenicity(&window), 0.07);
    }
}
