use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use hoerspiel_core::{reconcile, CatalogItem, ClassificationRules, FilterMode};
use proptest::prelude::*;

fn arb_title() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..40).prop_map(|n| format!("Benjamin Blümchen Folge {n}")),
        (0u32..40).prop_map(|n| format!("folge {n}: Remaster")),
        (0u32..40).prop_map(|n| format!("Folge {n}: Benjamin ist krank")),
        (0u32..10).prop_map(|n| format!("Benjamin Minis {n}")),
        (0u32..10).prop_map(|n| format!("Gute-Nacht-Geschichten Folge {n}")),
        (0u32..10).prop_map(|n| format!("Die Lieder-Box {n}")),
        (0u32..10).prop_map(|n| format!("Zufallsfund {n}")),
    ]
}

fn arb_item() -> impl Strategy<Value = CatalogItem> {
    (
        0u64..60,
        arb_title(),
        prop::sample::select(vec!["Hörspiele", "Pop", "Kinder"]),
        1970i32..2025,
        1u32..13,
    )
        .prop_map(|(id, title, genre, year, month)| CatalogItem {
            id,
            title,
            artist: "Benjamin Blümchen".to_string(),
            artwork_ref: None,
            detail_ref: None,
            release_date: Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap(),
            genre: Some(genre.to_string()),
        })
}

proptest! {
    #[test]
    fn classic_view_has_one_item_per_episode(raw in prop::collection::vec(arb_item(), 0..80)) {
        let rules = ClassificationRules::standard();
        let classics = reconcile(&raw, FilterMode::Classic);
        let mut seen = HashSet::new();
        for item in &classics {
            let episode = rules.episode_number(&item.title);
            prop_assert!(episode.is_some());
            prop_assert!(seen.insert(episode), "duplicate episode {:?}", episode);
        }
    }

    #[test]
    fn classic_view_is_non_decreasing(raw in prop::collection::vec(arb_item(), 0..80)) {
        let rules = ClassificationRules::standard();
        let keys: Vec<u32> = reconcile(&raw, FilterMode::Classic)
            .iter()
            .map(|item| rules.episode_sort_key(&item.title))
            .collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn all_view_is_idempotent(raw in prop::collection::vec(arb_item(), 0..80)) {
        let once = reconcile(&raw, FilterMode::All);
        let twice = reconcile(&once, FilterMode::All);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn all_view_has_unique_ids(raw in prop::collection::vec(arb_item(), 0..80)) {
        let all = reconcile(&raw, FilterMode::All);
        let unique: HashSet<u64> = all.iter().map(|item| item.id).collect();
        prop_assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn classic_and_special_views_partition_all(raw in prop::collection::vec(arb_item(), 0..80)) {
        let all = reconcile(&raw, FilterMode::All);
        let classic = reconcile(&raw, FilterMode::Classic);
        let special = reconcile(&raw, FilterMode::Special);
        prop_assert_eq!(classic.len() + special.len(), all.len());
    }
}
