//! GSUB lookup builders

use std::{collections::BTreeMap, convert::TryFrom};

use types::GlyphId16;

use super::{CoverageTable, Ligature, LigatureSet, LigatureSubstFormat1, SingleSubst};

/// A builder for [`SingleSubst`] subtables.
#[derive(Clone, Debug, Default)]
pub struct SingleSubBuilder {
    items: BTreeMap<GlyphId16, GlyphId16>,
}

impl SingleSubBuilder {
    /// Add this replacement to the builder.
    ///
    /// If there is an existing substitution for the provided target, it will
    /// be overwritten.
    pub fn insert(&mut self, target: GlyphId16, replacement: GlyphId16) {
        self.items.insert(target, replacement);
    }

    /// Returns `true` if this pair can be added without replacing an
    /// existing substitution.
    pub fn can_add(&self, target: GlyphId16, replacement: GlyphId16) -> bool {
        // only false if target exists with a different replacement
        !matches!(self.items.get(&target), Some(x) if *x != replacement)
    }

    /// Returns `true` if there are no substitutions in this builder.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate all the substitution pairs in this builder.
    pub fn iter(&self) -> impl Iterator<Item = (GlyphId16, GlyphId16)> + '_ {
        self.items.iter().map(|(target, alt)| (*target, *alt))
    }

    /// Build the subtable, or `None` if there are no substitutions.
    ///
    /// Format 1 is used if every target is the same distance from its
    /// replacement, and that distance fits in an `i16`.
    pub fn build(self) -> Option<SingleSubst> {
        if self.items.is_empty() {
            return None;
        }
        // if all pairs are equidistant and within the i16 range, find the
        // common delta
        let delta = self
            .items
            .iter()
            .map(|(k, v)| v.to_u16() as i32 - k.to_u16() as i32)
            .reduce(|acc, val| if acc == val { acc } else { i32::MAX })
            .and_then(|delta| i16::try_from(delta).ok());

        let coverage: CoverageTable = self.items.keys().copied().collect();
        log::debug!(
            "building single substitution for {} glyphs, delta {delta:?}",
            coverage.len()
        );
        Some(match delta {
            Some(delta) => SingleSubst::format_1(coverage, delta),
            None => SingleSubst::format_2(coverage, self.items.into_values().collect()),
        })
    }
}

/// A builder for [`LigatureSubstFormat1`] subtables.
#[derive(Clone, Debug, Default)]
pub struct LigatureSubBuilder {
    items: BTreeMap<GlyphId16, Vec<(Vec<GlyphId16>, GlyphId16)>>,
}

impl LigatureSubBuilder {
    /// Add a new ligature substitution rule to the builder.
    ///
    /// An empty target sequence is ignored.
    pub fn insert(&mut self, target: &[GlyphId16], replacement: GlyphId16) {
        let Some((first, rest)) = target.split_first() else {
            log::warn!("ignoring ligature {replacement} with no components");
            return;
        };
        let entry = self.items.entry(*first).or_default();
        // skip duplicates
        if !entry
            .iter()
            .any(|existing| existing.0 == rest && existing.1 == replacement)
        {
            entry.push((rest.to_owned(), replacement))
        }
    }

    /// Check if this target sequence already has a replacement in this lookup.
    pub fn can_add(&self, target: &[GlyphId16], replacement: GlyphId16) -> bool {
        let Some((first, rest)) = target.split_first() else {
            return false;
        };
        match self.items.get(first) {
            Some(ligs) => !ligs
                .iter()
                .any(|(seq, target)| seq == rest && *target != replacement),
            None => true,
        }
    }

    /// Returns `true` if there are no rules in this builder.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the current rules in the builder.
    ///
    /// The result is a tuple where the first item is the target glyph and the
    /// second item is a tuple of (components, replacement).
    pub fn iter(&self) -> impl Iterator<Item = (&GlyphId16, &Vec<(Vec<GlyphId16>, GlyphId16)>)> {
        self.items.iter()
    }

    /// Build the subtable.
    ///
    /// Within each ligature set, longer sequences come first; sequences of
    /// equal length keep the order they were inserted in.
    pub fn build(self) -> LigatureSubstFormat1 {
        let coverage: CoverageTable = self.items.keys().copied().collect();
        let lig_sets = self
            .items
            .into_values()
            .map(|mut ligs| {
                // we want to sort longer items first, but otherwise preserve
                // the order provided by the user.
                ligs.sort_by_key(|(lig, _)| std::cmp::Reverse(lig.len()));
                ligs.into_iter()
                    .map(|(components, replacement)| Ligature::new(replacement, components))
                    .collect::<LigatureSet>()
            })
            .collect();
        LigatureSubstFormat1::new(coverage, lig_sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BuildTable;

    fn gids<const N: usize>(raw: [u16; N]) -> Vec<GlyphId16> {
        raw.into_iter().map(GlyphId16::new).collect()
    }

    #[test]
    fn single_sub_common_delta() {
        let mut builder = SingleSubBuilder::default();
        for (target, replacement) in [(10, 15), (11, 16), (40, 45)] {
            builder.insert(GlyphId16::new(target), GlyphId16::new(replacement));
        }
        let Some(SingleSubst::Format1(table)) = builder.build() else {
            panic!("expected format 1");
        };
        assert_eq!(table.delta_glyph_id(), 5);
        assert_eq!(table.coverage().unwrap().glyphs(), gids([10, 11, 40]));
    }

    #[test]
    fn single_sub_mixed_deltas() {
        let mut builder = SingleSubBuilder::default();
        builder.insert(GlyphId16::new(10), GlyphId16::new(15));
        builder.insert(GlyphId16::new(5), GlyphId16::new(1));
        assert!(builder.can_add(GlyphId16::new(5), GlyphId16::new(1)));
        assert!(!builder.can_add(GlyphId16::new(5), GlyphId16::new(2)));
        let Some(SingleSubst::Format2(table)) = builder.build() else {
            panic!("expected format 2");
        };
        // ordered by target
        assert_eq!(table.substitute_for(0), Some(GlyphId16::new(1)));
        assert_eq!(table.substitute_for(1), Some(GlyphId16::new(15)));
    }

    #[test]
    fn single_sub_delta_out_of_range() {
        let mut builder = SingleSubBuilder::default();
        builder.insert(GlyphId16::new(0), GlyphId16::new(40_000));
        assert!(matches!(builder.build(), Some(SingleSubst::Format2(_))));
        assert!(SingleSubBuilder::default().build().is_none());
    }

    #[test]
    fn ligature_order() {
        let mut builder = LigatureSubBuilder::default();
        builder.insert(&gids([5, 6]), GlyphId16::new(101));
        builder.insert(&gids([5, 6, 7]), GlyphId16::new(100));
        builder.insert(&gids([5, 8]), GlyphId16::new(102));
        // duplicate
        builder.insert(&gids([5, 6]), GlyphId16::new(101));
        builder.insert(&[], GlyphId16::new(1));
        assert!(!builder.can_add(&gids([5, 8]), GlyphId16::new(103)));
        assert!(builder.can_add(&gids([9]), GlyphId16::new(103)));

        let table = builder.build();
        let set = table.ligature_set_for(GlyphId16::new(5)).unwrap();
        let order = set
            .iter()
            .map(|lig| lig.unwrap().ligature_glyph().to_u16())
            .collect::<Vec<_>>();
        assert_eq!(order, [100, 101, 102]);
        // header, coverage, then a set holding three ligatures
        assert_eq!(table.build().unwrap().len(), 8 + 6 + 28);
    }
}
