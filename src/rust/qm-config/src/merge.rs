// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Folding of single-key descriptor fragments into one mapping.
use std::hash::Hash;

use indexmap::IndexMap;

use crate::Result;

/// The single-key mapping `{key: attributes}` a descriptor renders to.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment<K, A> {
    pub key: K,
    pub attributes: A,
}

impl<K, A> Fragment<K, A> {
    pub fn new(key: K, attributes: A) -> Self {
        Fragment { key, attributes }
    }
}

/// A descriptor that knows how to render itself into a named fragment.
///
/// Rendering is a pure projection of the descriptor: calling it repeatedly on an
/// unchanged descriptor yields equal fragments.
pub trait Render {
    type Key: Eq + Hash + Clone;
    type Attributes;

    fn render(&self) -> Result<Fragment<Self::Key, Self::Attributes>>;
}

/// Merge the fragments of `descriptors` into one mapping, left to right.
///
/// When two descriptors render the same key the later one overwrites the value
/// of the earlier one, while the key keeps the position of its first occurrence.
/// The first failing render aborts the merge.
pub fn merge<'a, D, I>(descriptors: I) -> Result<IndexMap<D::Key, D::Attributes>>
where
    D: Render + 'a,
    I: IntoIterator<Item = &'a D>,
{
    let mut merged = IndexMap::new();
    for descriptor in descriptors {
        let Fragment { key, attributes } = descriptor.render()?;
        merged.insert(key, attributes);
    }
    Ok(merged)
}

/// Like [`merge`], but an absent sequence yields an empty mapping.
pub fn merge_optional<D: Render>(
    descriptors: Option<&[D]>,
) -> Result<IndexMap<D::Key, D::Attributes>> {
    merge(descriptors.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    struct Probe {
        key: u8,
        value: i32,
    }

    impl Render for Probe {
        type Key = u8;
        type Attributes = i32;

        fn render(&self) -> Result<Fragment<u8, i32>> {
            if self.value < 0 {
                return Err(Error::InvalidPortIndex(self.value.into()));
            }
            Ok(Fragment::new(self.key, self.value))
        }
    }

    #[test]
    fn test_merge_empty_and_absent() {
        let empty: Vec<Probe> = vec![];
        assert!(merge(&empty).unwrap().is_empty());
        assert!(merge_optional::<Probe>(None).unwrap().is_empty());
    }

    #[test]
    fn test_merge_last_write_wins() {
        let probes = vec![
            Probe { key: 1, value: 10 },
            Probe { key: 2, value: 20 },
            Probe { key: 1, value: 11 },
        ];
        let merged = merge_optional(Some(probes.as_slice())).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[&1u8], 11);
        assert_eq!(merged[&2u8], 20);
        // Overwritten key keeps its first position.
        assert_eq!(merged.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_merge_fails_as_a_whole() {
        let probes = vec![Probe { key: 1, value: 10 }, Probe { key: 2, value: -1 }];
        assert!(matches!(merge(&probes), Err(Error::InvalidPortIndex(-1))));
    }

    proptest! {
        #[test]
        fn prop_merge_is_union_with_last_value(
            entries in proptest::collection::vec((0u8..8, 0i32..1000), 1..32)
        ) {
            let probes: Vec<Probe> = entries
                .iter()
                .map(|&(key, value)| Probe { key, value })
                .collect();
            let merged = merge(&probes).unwrap();

            let mut keys: Vec<u8> = entries.iter().map(|(k, _)| *k).collect();
            keys.sort_unstable();
            keys.dedup();
            let mut merged_keys: Vec<u8> = merged.keys().copied().collect();
            merged_keys.sort_unstable();
            prop_assert_eq!(merged_keys, keys);

            for (key, value) in &merged {
                let last = entries.iter().rev().find(|(k, _)| k == key).map(|(_, v)| *v);
                prop_assert_eq!(Some(*value), last);
            }
        }
    }
}
