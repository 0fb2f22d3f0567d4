//! Evolutionary operators over permutations.
//!
//! The operator vocabulary a generative oracle is expected to command:
//! order-based crossover and small perturbative mutations, all closed over
//! valid permutations of `0..n`.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains" (OX)
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the TSP" (PMX)

use crate::problem::Assignment;
use rand::Rng;

/// Permutation crossover operators producing a single child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    /// Order Crossover (OX): keeps a segment of the first parent and fills
    /// the rest in the order values appear in the second parent.
    Order,

    /// Partially Mapped Crossover (PMX): keeps a segment of the first parent
    /// and places the second parent's values through the mapping chain.
    PartiallyMapped,
}

impl Crossover {
    /// Picks an operator uniformly at random.
    pub fn choose<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Crossover::Order
        } else {
            Crossover::PartiallyMapped
        }
    }

    /// Recombines two parents into one child.
    ///
    /// # Panics
    /// Panics if the parents have different lengths or are empty.
    pub fn apply<R: Rng>(&self, parent1: &[usize], parent2: &[usize], rng: &mut R) -> Assignment {
        let n = parent1.len();
        assert_eq!(n, parent2.len(), "parents must have equal length");
        assert!(n > 0, "parents must not be empty");

        if n == 1 {
            return parent1.to_vec();
        }

        let (start, end) = random_segment(n, rng);
        match self {
            Crossover::Order => order_child(parent1, parent2, start, end),
            Crossover::PartiallyMapped => pmx_child(parent1, parent2, start, end),
        }
    }
}

/// Keep `parent1[start..=end]`, fill the remaining positions with the unused
/// values in the order they occur in `parent2`, wrapping after the segment.
fn order_child(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Assignment {
    let n = parent1.len();
    let mut child = vec![usize::MAX; n];
    let mut taken = vec![false; n];

    for i in start..=end {
        child[i] = parent1[i];
        taken[parent1[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let value = parent2[(end + 1 + offset) % n];
        if !taken[value] {
            child[pos] = value;
            pos = (pos + 1) % n;
        }
    }

    child
}

/// Keep `parent1[start..=end]`; values from `parent2`'s segment that are not
/// already placed follow the PMX mapping chain to a free position; everything
/// else copies from `parent2`.
fn pmx_child(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Assignment {
    let n = parent1.len();
    let sentinel = usize::MAX;
    let mut child = vec![sentinel; n];
    let mut placed = vec![false; n];

    for i in start..=end {
        child[i] = parent1[i];
        placed[parent1[i]] = true;
    }

    for i in start..=end {
        let value = parent2[i];
        if placed[value] {
            continue;
        }
        let mut pos = i;
        loop {
            let mapped = parent1[pos];
            let target = parent2
                .iter()
                .position(|&v| v == mapped)
                .expect("valid permutation: every value of parent1 occurs in parent2");
            if target < start || target > end {
                child[target] = value;
                placed[value] = true;
                break;
            }
            pos = target;
        }
    }

    for i in 0..n {
        if child[i] == sentinel {
            child[i] = parent2[i];
        }
    }

    child
}

/// Perturbative permutation mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Exchange two random positions.
    Swap,

    /// Remove one element and reinsert it at a random position.
    Insert,

    /// Reverse a random segment (a 2-opt move).
    Invert,
}

impl Mutation {
    /// Picks an operator uniformly at random.
    pub fn choose<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..3) {
            0 => Mutation::Swap,
            1 => Mutation::Insert,
            _ => Mutation::Invert,
        }
    }

    /// Mutates `assignment` in place. A no-op below two elements.
    pub fn apply<R: Rng>(&self, assignment: &mut Assignment, rng: &mut R) {
        let n = assignment.len();
        if n < 2 {
            return;
        }
        match self {
            Mutation::Swap => {
                let i = rng.random_range(0..n);
                let j = rng.random_range(0..n);
                assignment.swap(i, j);
            }
            Mutation::Insert => {
                let from = rng.random_range(0..n);
                let value = assignment.remove(from);
                let to = rng.random_range(0..n);
                assignment.insert(to, value);
            }
            Mutation::Invert => {
                let (start, end) = random_segment(n, rng);
                assignment[start..=end].reverse();
            }
        }
    }
}

/// Picks a random segment `[start, end]` with `start <= end < n`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::is_valid_assignment;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_order_crossover_stays_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        let p1: Vec<usize> = (0..8).collect();
        let p2 = vec![3, 7, 5, 1, 6, 0, 2, 4];

        for _ in 0..100 {
            let child = Crossover::Order.apply(&p1, &p2, &mut rng);
            assert!(is_valid_assignment(&child, 8), "invalid OX child: {child:?}");
        }
    }

    #[test]
    fn test_pmx_crossover_stays_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        let p1: Vec<usize> = (0..8).collect();
        let p2 = vec![3, 7, 5, 1, 6, 0, 2, 4];

        for _ in 0..100 {
            let child = Crossover::PartiallyMapped.apply(&p1, &p2, &mut rng);
            assert!(is_valid_assignment(&child, 8), "invalid PMX child: {child:?}");
        }
    }

    #[test]
    fn test_pmx_identical_parents_reproduce() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = vec![4, 2, 0, 1, 3];
        let child = Crossover::PartiallyMapped.apply(&p, &p, &mut rng);
        assert_eq!(child, p);
    }

    #[test]
    fn test_crossover_single_element() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(Crossover::Order.apply(&[0], &[0], &mut rng), vec![0]);
        assert_eq!(Crossover::PartiallyMapped.apply(&[0], &[0], &mut rng), vec![0]);
    }

    #[test]
    fn test_mutations_stay_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        for mutation in [Mutation::Swap, Mutation::Insert, Mutation::Invert] {
            for _ in 0..100 {
                let mut perm: Vec<usize> = (0..10).collect();
                mutation.apply(&mut perm, &mut rng);
                assert!(
                    is_valid_assignment(&perm, 10),
                    "{mutation:?} broke the permutation: {perm:?}"
                );
            }
        }
    }

    #[test]
    fn test_mutation_single_element_is_noop() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut perm = vec![0];
        Mutation::Insert.apply(&mut perm, &mut rng);
        assert_eq!(perm, vec![0]);
    }

    #[test]
    fn test_invert_changes_permutation_eventually() {
        let mut rng = StdRng::seed_from_u64(42);
        let original: Vec<usize> = (0..5).collect();
        let mut changed = false;
        for _ in 0..100 {
            let mut perm = original.clone();
            Mutation::Invert.apply(&mut perm, &mut rng);
            if perm != original {
                changed = true;
                break;
            }
        }
        assert!(changed);
    }

    #[test]
    fn test_crossover_then_mutation_pipeline() {
        let mut rng = StdRng::seed_from_u64(42);
        let p1: Vec<usize> = (0..20).collect();
        let mut p2: Vec<usize> = (0..20).collect();
        p2.reverse();

        for _ in 0..50 {
            let mut child = Crossover::choose(&mut rng).apply(&p1, &p2, &mut rng);
            Mutation::choose(&mut rng).apply(&mut child, &mut rng);
            assert!(is_valid_assignment(&child, 20));
        }
    }

    #[test]
    fn test_random_segment_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let (start, end) = random_segment(10, &mut rng);
            assert!(start <= end);
            assert!(end < 10);
        }
    }
}
