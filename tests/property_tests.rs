//! Property-based tests for the branch store.
//!
//! These tests use proptest to verify invariants hold across randomly
//! generated entities and operation sequences.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use tempfile::TempDir;

use git_ass::core::metadata::{BranchEntity, BranchStore, BranchUpdate, MetadataFile};

/// Strategy for branch names, with and without a path separator.
fn branch_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}",
        "[a-z]{1,6}/[a-z0-9-]{1,8}",
    ]
}

/// Strategy for an optional field update: unchanged, cleared or set.
fn field_update() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[a-z]{1,4}".prop_map(Some),
    ]
}

fn update_for(name: String) -> impl Strategy<Value = BranchUpdate> {
    (field_update(), field_update(), field_update()).prop_map(move |(alias, description, base)| {
        BranchUpdate {
            name: name.clone(),
            alias,
            description,
            base,
        }
    })
}

fn any_update() -> impl Strategy<Value = BranchUpdate> {
    branch_name().prop_flat_map(update_for)
}

#[derive(Debug, Clone)]
enum Op {
    Add(BranchUpdate),
    Remove(String),
    ClearBase(String),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any_update().prop_map(Op::Add),
        1 => branch_name().prop_map(Op::Remove),
        1 => branch_name().prop_map(Op::ClearBase),
    ]
}

fn apply(store: &mut BranchStore, op: Op) {
    match op {
        Op::Add(update) => {
            store.add(update, true).unwrap();
        }
        Op::Remove(name) => {
            store.remove(&name);
        }
        Op::ClearBase(name) => {
            store.clear_base(&name);
        }
    }
}

/// Expected value of one field after applying an update.
fn merged_field(old: &Option<String>, update: &Option<String>) -> Option<String> {
    match update {
        None => old.clone(),
        Some(v) if v.is_empty() => None,
        Some(v) => Some(v.clone()),
    }
}

proptest! {
    #[test]
    fn merge_touches_only_given_fields(first in any_update(), second in any_update()) {
        let second = BranchUpdate { name: first.name.clone(), ..second };
        let entity = BranchEntity::from_update(first);
        let merged = entity.merged(&second);

        prop_assert_eq!(&merged.name, &entity.name);
        prop_assert_eq!(merged.alias, merged_field(&entity.alias, &second.alias));
        prop_assert_eq!(merged.description, merged_field(&entity.description, &second.description));
        prop_assert_eq!(merged.base, merged_field(&entity.base, &second.base));
    }

    #[test]
    fn merge_with_empty_update_is_identity(update in any_update()) {
        let entity = BranchEntity::from_update(update);
        let unchanged = entity.merged(&BranchUpdate::new(entity.name.clone()));
        prop_assert_eq!(unchanged, entity);
    }

    #[test]
    fn alias_index_mirrors_alias_fields(ops in prop::collection::vec(op(), 0..40)) {
        let mut store = BranchStore::new();
        for op in ops {
            apply(&mut store, op);
        }

        let expected: BTreeMap<String, String> = store
            .iter()
            .filter_map(|e| e.alias.clone().map(|a| (a, e.name.clone())))
            .collect();
        let aliases: BTreeSet<&str> = store.aliases().collect();

        prop_assert_eq!(aliases.len(), expected.len());
        for (alias, name) in &expected {
            prop_assert_eq!(store.resolve_alias(alias), Some(name.as_str()));
        }
        // Each alias is held by exactly one entity.
        let holders = store.iter().filter(|e| e.alias.is_some()).count();
        prop_assert_eq!(holders, expected.len());
    }

    #[test]
    fn find_prefers_name_over_alias(ops in prop::collection::vec(op(), 0..30)) {
        let mut store = BranchStore::new();
        for op in ops {
            apply(&mut store, op);
        }
        for entity in store.iter() {
            prop_assert_eq!(&store.find(&entity.name).unwrap().name, &entity.name);
        }
    }

    #[test]
    fn persist_then_load_keeps_order_and_fields(ops in prop::collection::vec(op(), 0..30)) {
        let mut store = BranchStore::new();
        for op in ops {
            apply(&mut store, op);
        }

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let mut file = MetadataFile::open(&path).unwrap();
        file.persist("/repo", &store).unwrap();

        let loaded = MetadataFile::open(&path).unwrap().load("/repo").unwrap();
        let before: Vec<&BranchEntity> = store.iter().collect();
        let after: Vec<&BranchEntity> = loaded.iter().collect();
        prop_assert_eq!(before, after);
    }
}
