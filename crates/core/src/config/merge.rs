//! Settings layer merging
//!
//! Layers are applied in load order: global resources first, the document
//! override last. Every field except `aliases` is replaced wholesale by a
//! later layer that sets it; `aliases` maps are unioned with the later
//! layer winning on conflicting keys.

use super::KeywordConfigLayer;
use tracing::trace;

impl KeywordConfigLayer {
    /// Apply another layer on top of this one
    pub fn apply(&mut self, other: KeywordConfigLayer) {
        macro_rules! overwrite {
            ($($field:ident),+ $(,)?) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field;
                    }
                )+
            };
        }

        overwrite!(
            place,
            definition,
            delete,
            cleanup,
            new_place,
            new_place_fallback,
            snippets,
            search,
        );

        if let Some(aliases) = other.aliases {
            trace!("Merging {} alias entries", aliases.len());
            self.aliases.get_or_insert_with(Default::default).extend(aliases);
        }
    }
}

/// Fold layers into one, first layer lowest priority
pub fn merge_layers<I>(layers: I) -> KeywordConfigLayer
where
    I: IntoIterator<Item = KeywordConfigLayer>,
{
    layers
        .into_iter()
        .fold(KeywordConfigLayer::default(), |mut merged, layer| {
            merged.apply(layer);
            merged
        })
}
