mod basic;
mod proptest_partition;

use crate::dict::ReadingDict;

pub(super) fn make_dict(pairs: &[(&str, &str)]) -> ReadingDict {
    ReadingDict::from_entries(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string())),
    )
}
