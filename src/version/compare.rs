//! Ordering over dotted release numbers such as `1.21.3` or `1.22rc1`
//!
//! Each dot-separated segment is a run of digits followed by an optional
//! suffix. Digits compare numerically; with equal digits a segment without a
//! suffix is newer than one with a suffix (`11` > `11beta1`), otherwise
//! suffixes compare as strings. When one version is a prefix of the other,
//! the shorter one sorts first (`1.1` < `1.1.1`).

use std::cmp::Ordering;

/// Compare two release numbers
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut xs = a.split('.');
    let mut ys = b.split('.');

    loop {
        match (xs.next(), ys.next()) {
            (Some(x), Some(y)) => match compare_segments(x, y) {
                Ordering::Equal => continue,
                other => return other,
            },
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

/// Sort release numbers from oldest to newest
pub fn sort_ascending<S: AsRef<str>>(versions: &mut [S]) {
    versions.sort_by(|a, b| compare_versions(a.as_ref(), b.as_ref()));
}

/// The largest of the given release numbers
pub fn max_version<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions
        .into_iter()
        .max_by(|a, b| compare_versions(a, b))
}

fn compare_segments(x: &str, y: &str) -> Ordering {
    let (x_digits, x_suffix) = split_segment(x);
    let (y_digits, y_suffix) = split_segment(y);

    compare_digit_runs(x_digits, y_digits).then_with(|| {
        match (x_suffix.is_empty(), y_suffix.is_empty()) {
            (true, true) => Ordering::Equal,
            // A plain release is newer than its prereleases
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => x_suffix.cmp(y_suffix),
        }
    })
}

fn split_segment(segment: &str) -> (&str, &str) {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    segment.split_at(end)
}

/// Numeric comparison of digit strings of any length
fn compare_digit_runs(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

/// The numeric part of a release (`1.22rc1` -> `[1, 22]`), for range checks
pub(crate) fn release_floor(version: &str) -> String {
    version
        .split('.')
        .map(|segment| {
            let (digits, _) = split_segment(segment);
            if digits.is_empty() {
                "0"
            } else {
                digits
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SORTED: [&str; 10] = [
        "1",
        "1.1",
        "1.1.1",
        "1.5",
        "1.10",
        "1.11beta1",
        "1.11beta2",
        "1.11rc1",
        "1.11.2",
        "1.11.11",
    ];

    /// xorshift, so the shuffles are reproducible without extra crates
    struct Shuffler(u64);

    impl Shuffler {
        fn next(&mut self, bound: usize) -> usize {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            (self.0 % bound as u64) as usize
        }
    }

    #[test]
    fn sort_is_canonical_for_any_permutation() {
        let mut rng = Shuffler(0x9e37_79b9_7f4a_7c15);
        for _ in 0..200 {
            let mut versions: Vec<&str> = SORTED.to_vec();
            for _ in 0..32 {
                let (i, j) = (rng.next(versions.len()), rng.next(versions.len()));
                versions.swap(i, j);
            }
            let shuffled = versions.clone();
            sort_ascending(&mut versions);
            assert_eq!(versions, SORTED, "shuffled input: {shuffled:?}");
        }
    }

    #[test]
    fn prerelease_sorts_before_release() {
        assert_eq!(compare_versions("1.11beta1", "1.11"), Ordering::Less);
        assert_eq!(compare_versions("1.11", "1.11rc2"), Ordering::Greater);
        assert_eq!(compare_versions("1.11beta2", "1.11rc1"), Ordering::Less);
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        assert_eq!(compare_versions("1", "1.1"), Ordering::Less);
        assert_eq!(compare_versions("1.1.1", "1.1"), Ordering::Greater);
        assert_eq!(compare_versions("1.21", "1.21"), Ordering::Equal);
    }

    #[test]
    fn segments_compare_numerically() {
        assert_eq!(compare_versions("1.1.1", "1.5"), Ordering::Less);
        assert_eq!(compare_versions("1.9", "1.10"), Ordering::Less);
        assert_eq!(compare_versions("1.010", "1.9"), Ordering::Greater);
        assert_eq!(
            compare_versions("1.99999999999999999999999", "1.100000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn max_picks_newest() {
        let tags = ["1.21.1", "1.21rc2", "1.21.10", "1.21.9"];
        assert_eq!(max_version(tags.iter().copied()), Some("1.21.10"));
        assert_eq!(max_version(std::iter::empty()), None);
    }

    #[test]
    fn release_floor_drops_suffixes() {
        assert_eq!(release_floor("1.22rc1"), "1.22");
        assert_eq!(release_floor("1.21.3"), "1.21.3");
        assert_eq!(release_floor("1.x"), "1.0");
    }
}
