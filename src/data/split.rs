use rand::Rng;
use rand::seq::SliceRandom;

use crate::data::example::Example;
use crate::error::{NetError, Result};

/// Shuffles `examples` and returns `(train, test)`, where the test set is the
/// first `floor(len * test_fraction)` shuffled examples.
pub fn shuffle_split<R: Rng + ?Sized>(
    mut examples: Vec<Example>,
    test_fraction: f64,
    rng: &mut R,
) -> Result<(Vec<Example>, Vec<Example>)> {
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(NetError::configuration(format!(
            "test fraction must lie in [0, 1), got {test_fraction}"
        )));
    }
    examples.shuffle(rng);
    let test_len = (examples.len() as f64 * test_fraction) as usize;
    let train = examples.split_off(test_len);
    Ok((train, examples))
}

/// Draws a class-balanced subset of `len / divisor` examples with at most
/// `(len / divisor) / num_classes` per class.
///
/// The subset can come out smaller when some class has too few examples.
pub fn balanced_subset<R: Rng + ?Sized>(
    examples: &[Example],
    divisor: usize,
    num_classes: usize,
    rng: &mut R,
) -> Result<Vec<Example>> {
    if divisor == 0 || num_classes == 0 {
        return Err(NetError::configuration("divisor and class count must be at least 1"));
    }
    let wanted = examples.len() / divisor;
    let per_class = wanted / num_classes;

    let mut order: Vec<usize> = (0..examples.len()).collect();
    order.shuffle(rng);

    let mut counts = vec![0usize; num_classes];
    let mut subset = Vec::with_capacity(wanted);
    for idx in order {
        if subset.len() == wanted {
            break;
        }
        let example = &examples[idx];
        if example.label >= num_classes {
            return Err(NetError::dimension_mismatch(num_classes, example.label + 1));
        }
        if counts[example.label] < per_class {
            counts[example.label] += 1;
            subset.push(example.clone());
        }
    }
    Ok(subset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn labelled(n: usize, classes: usize) -> Vec<Example> {
        (0..n).map(|i| Example::new(vec![i as f64], i % classes)).collect()
    }

    #[test]
    fn test_shuffle_split_sizes() {
        let mut rng = StdRng::seed_from_u64(9);
        let (train, test) = shuffle_split(labelled(10, 2), 0.4, &mut rng).unwrap();
        assert_eq!(test.len(), 4);
        assert_eq!(train.len(), 6);

        let mut seen: Vec<f64> = train.iter().chain(&test).map(|e| e.features[0]).collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(seen, (0..10).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_split_is_seeded() {
        let a = shuffle_split(labelled(20, 4), 0.5, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = shuffle_split(labelled(20, 4), 0.5, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_split_rejects_bad_fraction() {
        let mut rng = StdRng::seed_from_u64(9);
        assert!(shuffle_split(labelled(4, 2), 1.0, &mut rng).is_err());
    }

    #[test]
    fn test_balanced_subset() {
        let mut rng = StdRng::seed_from_u64(4);
        let subset = balanced_subset(&labelled(100, 10), 4, 10, &mut rng).unwrap();
        // 25 wanted, 2 per class
        assert_eq!(subset.len(), 20);
        for class in 0..10 {
            assert_eq!(subset.iter().filter(|e| e.label == class).count(), 2);
        }
    }
}
