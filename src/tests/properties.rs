use crate::dictionary::{DictEntry, EncodingDictionary};
use crate::matcher::{find_all, naive_find_all, rabin_karp_find_all, Strategy};
use crate::repeats::find_repeats;
use crate::rolling::HashParams;
use ahash::AHashMap as HashMap;
use proptest::prelude::*;

/// Exact frequency of every substring of `length`.
fn window_counts(text: &[u8], length: usize) -> HashMap<&[u8], usize> {
    let mut counts = HashMap::default();
    for window in text.windows(length) {
        *counts.entry(window).or_insert(0) += 1;
    }
    counts
}

/// Small alphabet so that random patterns actually occur.
fn small_alphabet_text(max_len: usize) -> impl proptest::strategy::Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c']), 0..max_len)
}

fn small_prime() -> impl proptest::strategy::Strategy<Value = u64> {
    prop::sample::select(vec![2u64, 3, 5, 7, 11, 101, 211, 307])
}

/// Keys `<a>` through `<l>` mapped to `P1` through `P12`.
fn round_trip_dictionary() -> EncodingDictionary {
    EncodingDictionary::from_entries(
        (b'a'..=b'l')
            .enumerate()
            .map(|(i, c)| DictEntry {
                key: vec![b'<', c, b'>'],
                token: format!("P{}", i + 1),
            })
            .collect(),
    )
}

/// Every dictionary key plus a few filler bytes.
fn round_trip_segments() -> Vec<Vec<u8>> {
    let mut segments: Vec<Vec<u8>> = round_trip_dictionary()
        .entries()
        .iter()
        .map(|e| e.key.clone())
        .collect();
    segments.extend([b"x".to_vec(), b"y".to_vec(), b" ".to_vec()]);
    segments
}

proptest! {
    /// Property 1: Strategy agreement
    /// Naive and Rabin-Karp report identical offsets for any modulus.
    #[test]
    fn prop_strategies_agree(
        text in small_alphabet_text(64),
        pattern in prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c']), 1..6),
        prime in small_prime(),
    ) {
        let params = HashParams::with_modulus(prime).unwrap();
        prop_assert_eq!(
            naive_find_all(&text, &pattern),
            rabin_karp_find_all(&text, &pattern, params)
        );
    }

    /// Property 2: Reported offsets are exact, in range and strictly increasing.
    #[test]
    fn prop_offsets_are_exact(
        text in small_alphabet_text(64),
        pattern in prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c']), 1..4),
        prime in small_prime(),
    ) {
        let strategy = Strategy::rabin_karp(prime).unwrap();
        let offsets = find_all(&text, &pattern, &strategy).unwrap();

        for &o in &offsets {
            prop_assert!(o + pattern.len() <= text.len());
            prop_assert_eq!(&text[o..o + pattern.len()], &pattern[..]);
        }
        prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    /// Property 3: A pattern longer than the text never matches.
    #[test]
    fn prop_long_pattern_no_match(text: Vec<u8>, extra in 1usize..8) {
        let pattern = vec![b'x'; text.len() + extra];
        prop_assert!(find_all(&text, &pattern, &Strategy::Naive).unwrap().is_empty());
        prop_assert!(find_all(&text, &pattern, &Strategy::default()).unwrap().is_empty());
    }

    /// Property 4: Naive repeats are exactly the substrings with true count > 1.
    #[test]
    fn prop_naive_repeats_exact(text in small_alphabet_text(24), min_length in 1usize..4) {
        let repeats = find_repeats(&text, min_length, &Strategy::Naive).unwrap();

        for (substring, count) in &repeats {
            let truth = window_counts(&text, substring.len());
            prop_assert_eq!(truth.get(substring).copied(), Some(count));
            prop_assert!(count > 1);
        }

        for length in min_length..=text.len() / 2 {
            for (substring, count) in window_counts(&text, length) {
                if count > 1 {
                    prop_assert_eq!(repeats.count(substring), Some(count));
                }
            }
        }
    }

    /// Property 5: The anchored rolling filter only reports true repeats, and
    /// reports every true repeat hashing like the first window at its length.
    #[test]
    fn prop_anchored_repeats(
        text in small_alphabet_text(24),
        min_length in 1usize..4,
        prime in small_prime(),
    ) {
        let params = HashParams::with_modulus(prime).unwrap();
        let repeats = find_repeats(&text, min_length, &Strategy::RabinKarp(params)).unwrap();

        for (substring, count) in &repeats {
            let truth = window_counts(&text, substring.len());
            prop_assert_eq!(truth.get(substring).copied(), Some(count));
            prop_assert!(count > 1);
        }

        for length in min_length..=text.len() / 2 {
            let anchor = params.hash(&text[..length]);
            for (substring, count) in window_counts(&text, length) {
                if count > 1 && params.hash(substring) == anchor {
                    prop_assert_eq!(repeats.count(substring), Some(count));
                }
            }
        }
    }

    /// Property 6: Compression round trip
    /// Twelve non-overlapping keys, tokens `P1..P12`, and filler bytes that are
    /// neither digits nor token bytes, so no token can run into a longer one.
    #[test]
    fn prop_compress_round_trip(
        segments in prop::collection::vec(prop::sample::select(round_trip_segments()), 0..32),
    ) {
        let text: Vec<u8> = segments.concat();
        let dictionary = round_trip_dictionary();

        let compressed = dictionary.compress(&text);
        for entry in dictionary.entries() {
            prop_assert!(naive_find_all(&compressed, &entry.key).is_empty());
        }
        prop_assert_eq!(dictionary.decompress(&compressed), text);
    }
}

/// Bolero fuzz test: Strategies agree on arbitrary bytes
#[cfg(test)]
#[test]
fn fuzz_strategies_agree() {
    bolero::check!()
        .with_type::<(Vec<u8>, Vec<u8>)>()
        .for_each(|(text, pattern)| {
            if pattern.is_empty() {
                assert!(find_all(text, pattern, &Strategy::Naive).is_err());
                return;
            }
            let naive = find_all(text, pattern, &Strategy::Naive).unwrap();
            let rk = find_all(text, pattern, &Strategy::default()).unwrap();
            assert_eq!(naive, rk);
        });
}

/// Bolero fuzz test: Repeat scanning never panics and never reports false repeats
#[cfg(test)]
#[test]
fn fuzz_repeats_no_panic() {
    bolero::check!().with_type::<Vec<u8>>().for_each(|input| {
        // The scan is cubic; keep inputs short.
        let text = &input[..input.len().min(48)];

        for strategy in [Strategy::Naive, Strategy::default()] {
            let repeats = find_repeats(text, 2, &strategy).unwrap();
            for (substring, count) in &repeats {
                assert!(count > 1);
                assert_eq!(naive_find_all(text, substring).len(), count);
            }
        }
    });
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::matcher::Strategy;

    #[test]
    fn test_periodic_text_single_match() {
        let text = b"ABABABACABABABABACABABABACABABABAC";
        let pattern = b"ABABABACABABABABAC";
        for strategy in [
            Strategy::Naive,
            Strategy::default(),
            Strategy::rabin_karp(211).unwrap(),
            Strategy::rabin_karp(307).unwrap(),
        ] {
            assert_eq!(find_all(text, pattern, &strategy).unwrap(), vec![0]);
        }
    }

    #[test]
    fn test_adversarial_collisions_never_match() {
        // Under modulus 3 every window of a long text collides with the pattern
        // hash a third of the time; none of them may be reported.
        let params = HashParams::with_modulus(3).unwrap();
        let pattern = b"zz";
        let text: Vec<u8> = (0u8..=255).collect();
        let pattern_hash = params.hash(pattern);

        let colliding = text
            .windows(2)
            .filter(|w| params.hash(w) == pattern_hash)
            .count();
        assert!(colliding > 0);
        assert_eq!(rabin_karp_find_all(&text, pattern, params), Vec::<usize>::new());
    }

    #[test]
    fn test_example_sentence_repeats() {
        let reps = 6;
        let text = "THIS IS A SIMPLE EXAMPLE ".repeat(reps);

        let naive = find_repeats(text.as_bytes(), 3, &Strategy::Naive).unwrap();
        assert_eq!(naive.count(b"EXAMPLE"), Some(reps));

        // The anchored filter sees "EXAMPLE" only if it hashes like "THIS IS".
        let params = HashParams::default();
        let rk = find_repeats(text.as_bytes(), 3, &Strategy::RabinKarp(params)).unwrap();
        let anchor = params.hash(&text.as_bytes()[..7]);
        let expected = (params.hash(b"EXAMPLE") == anchor).then_some(reps);
        assert_eq!(rk.count(b"EXAMPLE"), expected);
    }

    #[test]
    fn test_rabin_karp_repeats_subset_of_naive() {
        let text = "THIS IS A SIMPLE EXAMPLE ".repeat(4);
        let naive = find_repeats(text.as_bytes(), 3, &Strategy::Naive).unwrap();
        let rk = find_repeats(text.as_bytes(), 3, &Strategy::default()).unwrap();

        assert!(!rk.is_empty());
        for (substring, count) in &rk {
            assert_eq!(naive.count(substring), Some(count));
        }
    }
}
