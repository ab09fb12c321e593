use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use engine_logging::engine_debug;

use crate::item::{sort_newest_first, CatalogItem};
use crate::rules::{Classification, ClassificationRules, UNKNOWN_EPISODE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FilterMode {
    #[default]
    All,
    Classic,
    Special,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Classic, FilterMode::Special];

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "Alle",
            FilterMode::Classic => "Klassiker",
            FilterMode::Special => "Specials",
        }
    }
}

/// Classified, deduplicated catalog of one series.
///
/// `master` holds classics, specials and others, newest release first. It is
/// the only input of the filter step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogView {
    classics: Vec<CatalogItem>,
    specials: Vec<CatalogItem>,
    others: Vec<CatalogItem>,
    master: Vec<CatalogItem>,
}

impl CatalogView {
    pub fn build(raw: &[CatalogItem], rules: &ClassificationRules) -> Self {
        let unique = dedupe_by_id(raw);

        let mut numbered: BTreeMap<u32, CatalogItem> = BTreeMap::new();
        let mut unnumbered = Vec::new();
        let mut specials = Vec::new();
        let mut others = Vec::new();

        for item in unique {
            match rules.classify(&item.title) {
                Classification::Classic {
                    episode: UNKNOWN_EPISODE,
                } => unnumbered.push(item),
                Classification::Classic { episode } => match numbered.entry(episode) {
                    Entry::Vacant(slot) => {
                        slot.insert(item);
                    }
                    Entry::Occupied(mut slot) => {
                        if prefers(rules, &item, slot.get()) {
                            engine_debug!(
                                "Episode {} resolved to id={} over id={}",
                                episode,
                                item.id,
                                slot.get().id
                            );
                            slot.insert(item);
                        }
                    }
                },
                Classification::Special => specials.push(item),
                Classification::Other => others.push(item),
            }
        }

        let mut classics: Vec<CatalogItem> = numbered.into_values().collect();
        classics.extend(unnumbered);
        let specials = dedupe_by_title(specials);
        let others = dedupe_by_title(others);

        let mut master = Vec::with_capacity(classics.len() + specials.len() + others.len());
        master.extend(classics.iter().cloned());
        master.extend(specials.iter().cloned());
        master.extend(others.iter().cloned());
        sort_newest_first(&mut master);

        engine_debug!(
            "Catalog built from {} raw items: classics={} specials={} others={}",
            raw.len(),
            classics.len(),
            specials.len(),
            others.len()
        );

        Self {
            classics,
            specials,
            others,
            master,
        }
    }

    /// Classics, ascending by episode number.
    pub fn classics(&self) -> &[CatalogItem] {
        &self.classics
    }

    pub fn specials(&self) -> &[CatalogItem] {
        &self.specials
    }

    pub fn others(&self) -> &[CatalogItem] {
        &self.others
    }

    pub fn master(&self) -> &[CatalogItem] {
        &self.master
    }

    pub fn len(&self) -> usize {
        self.master.len()
    }

    pub fn is_empty(&self) -> bool {
        self.master.is_empty()
    }

    pub fn filtered(&self, mode: FilterMode, rules: &ClassificationRules) -> Vec<CatalogItem> {
        apply_filter(&self.master, mode, rules)
    }
}

/// Derives a filter view from an already reconciled master list.
pub fn apply_filter(
    master: &[CatalogItem],
    mode: FilterMode,
    rules: &ClassificationRules,
) -> Vec<CatalogItem> {
    match mode {
        FilterMode::All => master.to_vec(),
        FilterMode::Classic => {
            let mut classics: Vec<CatalogItem> = master
                .iter()
                .filter(|item| rules.is_classic(&item.title))
                .cloned()
                .collect();
            classics.sort_by_cached_key(|item| rules.episode_sort_key(&item.title));
            classics
        }
        FilterMode::Special => master
            .iter()
            .filter(|item| !rules.is_classic(&item.title))
            .cloned()
            .collect(),
    }
}

/// Full pipeline with the standard rules: raw fetch result in, display list out.
pub fn reconcile(raw: &[CatalogItem], mode: FilterMode) -> Vec<CatalogItem> {
    reconcile_with(raw, mode, ClassificationRules::standard())
}

pub fn reconcile_with(
    raw: &[CatalogItem],
    mode: FilterMode,
    rules: &ClassificationRules,
) -> Vec<CatalogItem> {
    CatalogView::build(raw, rules).filtered(mode, rules)
}

/// First-seen wins.
pub fn dedupe_by_id(items: &[CatalogItem]) -> Vec<CatalogItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(item.id))
        .cloned()
        .collect()
}

fn dedupe_by_title(items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.title.clone()))
        .collect()
}

// A later candidate only wins by carrying the canonical genre the incumbent lacks.
fn prefers(rules: &ClassificationRules, candidate: &CatalogItem, incumbent: &CatalogItem) -> bool {
    let genre = rules.canonical_genre();
    candidate.genre_is(genre) && !incumbent.genre_is(genre)
}
