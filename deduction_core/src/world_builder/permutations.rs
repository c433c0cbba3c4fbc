//! Positional permutations.

/// Every ordering of `items`, treating each entry as distinct by position.
///
/// Orderings come out in lexicographic order of the original indices, so the
/// identity ordering is first. Repeated values are not de-duplicated.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    let mut orderings = Vec::new();

    loop {
        orderings.push(indices.iter().map(|&i| items[i].clone()).collect());
        if !next_permutation(&mut indices) {
            return orderings;
        }
    }
}

/// Advance to the next lexicographic permutation. Returns false after the last.
fn next_permutation(indices: &mut [usize]) -> bool {
    let n = indices.len();
    if n < 2 {
        return false;
    }

    let Some(pivot) = (0..n - 1).rev().find(|&i| indices[i] < indices[i + 1]) else {
        return false;
    };
    let Some(successor) = (pivot + 1..n).rev().find(|&j| indices[j] > indices[pivot]) else {
        return false;
    };
    indices.swap(pivot, successor);
    indices[pivot + 1..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_order() {
        let perms = permutations(&['a', 'b', 'c']);
        assert_eq!(
            perms,
            vec![
                vec!['a', 'b', 'c'],
                vec!['a', 'c', 'b'],
                vec!['b', 'a', 'c'],
                vec!['b', 'c', 'a'],
                vec!['c', 'a', 'b'],
                vec!['c', 'b', 'a'],
            ]
        );
    }

    #[test]
    fn test_factorial_count_with_repeats() {
        assert_eq!(permutations(&[1, 1, 2, 3]).len(), 24);
        assert_eq!(permutations(&[7; 5]).len(), 120);
    }

    #[test]
    fn test_trivial_inputs() {
        assert_eq!(permutations::<u8>(&[]), vec![Vec::<u8>::new()]);
        assert_eq!(permutations(&[9]), vec![vec![9]]);
    }
}
