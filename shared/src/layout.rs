use std::ops::Range;

/// Cards per row once the machine carries a full load.
pub const FULL_ROW_CARDS: usize = 5;

/// Splits `count` products across the two marquee rows.
///
/// With ten or more products each row shows five; smaller loads put the
/// larger half on top. Empty rows are left out.
#[must_use]
pub fn split_rows(count: usize) -> Vec<Range<usize>> {
    let (first, second) = if count >= 2 * FULL_ROW_CARDS {
        (FULL_ROW_CARDS, FULL_ROW_CARDS)
    } else {
        let mid = (count + 1) / 2;
        (mid, count - mid)
    };

    [0..first, first..first + second]
        .into_iter()
        .filter(|range| !range.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(split_rows(0).is_empty());
    }

    #[test]
    fn test_single_product_gets_one_row() {
        assert_eq!(split_rows(1), vec![0..1]);
    }

    #[test]
    fn test_odd_count_favours_top_row() {
        assert_eq!(split_rows(7), vec![0..4, 4..7]);
    }

    #[test]
    fn test_full_machine_caps_rows() {
        assert_eq!(split_rows(10), vec![0..5, 5..10]);
        assert_eq!(split_rows(14), vec![0..5, 5..10]);
    }

    #[test]
    fn test_rows_never_overlap() {
        for count in 0..25 {
            let rows = split_rows(count);
            assert!(rows.len() <= 2);
            for pair in rows.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
            let shown: usize = rows.iter().map(ExactSizeIterator::len).sum();
            assert_eq!(shown, count.min(2 * FULL_ROW_CARDS));
        }
    }
}
