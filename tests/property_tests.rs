//! Property-Based Tests for kspackages
//!
//! These tests verify:
//! - parse(serialize(s)) == s for generated selections
//! - Serialization does not depend on insertion order
//! - Setter-accepted names always read back as the same entries
//! - Requirement ledger merge invariants
//! - Enum string round-trips

use proptest::prelude::*;

use kspackages::{
    Entry, HandlerType, Languages, MultilibPolicy, PackagesSection, RequirementLedger, Selection,
    parse, serialize,
};

// =============================================================================
// Strategies
// =============================================================================

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.+-]{0,12}"
}

/// Names that may start with or contain any line prefix character
fn raw_name_strategy() -> impl Strategy<Value = String> {
    "[@^#%-]{0,2}[a-z0-9@^#%:/-]{0,6}"
}

fn entry_strategy() -> impl Strategy<Value = Entry> {
    prop_oneof![
        name_strategy().prop_map(Entry::Package),
        name_strategy().prop_map(Entry::Group),
        (
            name_strategy(),
            "[0-9][0-9.]{0,4}",
            proptest::option::of("[a-z]{1,8}")
        )
            .prop_map(|(name, stream, profile)| Entry::module(name, stream, profile.as_deref())),
    ]
}

fn languages_strategy() -> impl Strategy<Value = Languages> {
    prop_oneof![
        Just(Languages::Unset),
        Just(Languages::Empty),
        "[a-z]{2}(_[A-Z]{2})?(,[a-z]{2}){0,3}".prop_map(Languages::List),
    ]
}

prop_compose! {
    fn selection_strategy()(
        entries in proptest::collection::vec(entry_strategy(), 0..12),
        excluded_packages in proptest::collection::vec(name_strategy(), 0..4),
        excluded_groups in proptest::collection::vec(name_strategy(), 0..4),
        environment in proptest::option::of(name_strategy()),
        core in any::<bool>(),
        multilib in any::<bool>(),
        languages in languages_strategy(),
        ignored in any::<bool>(),
        docs in any::<bool>(),
        weakdeps in any::<bool>(),
        timeout in proptest::option::of(1u32..3600),
        retries in proptest::option::of(0u32..20),
    ) -> Selection {
        let mut selection = Selection::new();
        for entry in entries {
            selection.include(entry);
        }
        for name in excluded_packages {
            selection.exclude_package(name);
        }
        for name in excluded_groups {
            selection.exclude_group(name);
        }
        selection.set_environment(environment);
        selection.set_core_group_enabled(core);
        selection.set_multilib_policy(if multilib { MultilibPolicy::All } else { MultilibPolicy::Best });
        selection.set_languages(languages);
        selection.set_missing_ignored(ignored);
        selection.set_docs_excluded(docs);
        selection.set_weakdeps_excluded(weakdeps);
        selection.set_timeout(timeout);
        selection.set_retries(retries);
        selection
    }
}

// =============================================================================
// Packages Section Properties
// =============================================================================

proptest! {
    /// Selection: serialize → parse round-trip is identity
    #[test]
    fn selection_roundtrip(selection in selection_strategy()) {
        let text = serialize(&selection);
        let parsed = parse(&text).expect("canonical text should parse");
        prop_assert_eq!(parsed, selection);
    }

    /// Whatever the list setters accept renders to text that parses back to it
    #[test]
    fn setter_state_roundtrip(
        groups in proptest::collection::vec(raw_name_strategy(), 0..4),
        packages in proptest::collection::vec(raw_name_strategy(), 0..4),
        excluded_groups in proptest::collection::vec(raw_name_strategy(), 0..4),
        excluded_packages in proptest::collection::vec(raw_name_strategy(), 0..4),
        environment in raw_name_strategy(),
    ) {
        let mut section = PackagesSection::new();
        let _ = section.set_groups(&groups);
        let _ = section.set_packages(&packages);
        let _ = section.set_excluded_groups(&excluded_groups);
        let _ = section.set_excluded_packages(&excluded_packages);
        let _ = section.set_environment(&environment);

        let text = section.generate_kickstart();
        let parsed = parse(&text);
        prop_assert!(parsed.is_ok(), "{:?}\n{}", parsed, text);
        prop_assert_eq!(&parsed.unwrap(), section.selection());
    }

    /// Serialization is independent of insertion order
    #[test]
    fn serialize_ignores_insertion_order(entries in proptest::collection::vec(entry_strategy(), 0..12)) {
        let mut forward = Selection::new();
        for entry in entries.iter().cloned() {
            forward.include(entry);
        }
        let mut backward = Selection::new();
        for entry in entries.iter().rev().cloned() {
            backward.include(entry);
        }
        prop_assert_eq!(serialize(&forward), serialize(&backward));
    }

    /// Adding an entry twice keeps a single copy
    #[test]
    fn include_is_idempotent(entry in entry_strategy()) {
        let mut selection = Selection::new();
        selection.include(entry.clone());
        selection.include(entry);
        prop_assert_eq!(selection.included().count(), 1);
    }

    /// Canonical output always contains the separating blank line and terminator
    #[test]
    fn canonical_layout_frame(selection in selection_strategy()) {
        let text = serialize(&selection);
        prop_assert!(text.starts_with("%packages"));
        prop_assert!(text.ends_with("%end\n"));
        prop_assert!(text.lines().any(|line| line.is_empty()));
    }
}

// =============================================================================
// Requirement Ledger Properties
// =============================================================================

proptest! {
    /// Strength is the OR of every request; reasons are unique
    #[test]
    fn ledger_merge_invariants(
        calls in proptest::collection::vec(("[a-c]", "[r-t]", any::<bool>()), 1..20)
    ) {
        let mut ledger = RequirementLedger::new();
        for (id, reason, strong) in &calls {
            ledger.add([id.as_str()], reason, *strong);
        }

        for requirement in ledger.list_packages() {
            let expected_strong = calls
                .iter()
                .any(|(id, _, strong)| *id == requirement.id && *strong);
            prop_assert_eq!(requirement.strong, expected_strong);

            let mut unique = requirement.reasons.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), requirement.reasons.len());
        }

        let mut ids: Vec<_> = ledger.list_packages().into_iter().map(|r| r.id).collect();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), count);
    }
}

// =============================================================================
// Enum Property Tests
// =============================================================================

fn handler_strategy() -> impl Strategy<Value = HandlerType> {
    prop_oneof![
        Just(HandlerType::Dnf),
        Just(HandlerType::LiveOs),
        Just(HandlerType::LiveImage),
    ]
}

proptest! {
    /// HandlerType: to_string → parse round-trip is identity
    #[test]
    fn handler_type_roundtrip(handler in handler_strategy()) {
        let s = handler.to_string();
        let parsed: HandlerType = s.parse().expect("Should parse");
        prop_assert_eq!(handler, parsed);
    }

    /// MultilibPolicy: to_string → parse round-trip is identity
    #[test]
    fn multilib_policy_roundtrip(multilib in any::<bool>()) {
        let policy = if multilib { MultilibPolicy::All } else { MultilibPolicy::Best };
        let parsed: MultilibPolicy = policy.to_string().parse().expect("Should parse");
        prop_assert_eq!(policy, parsed);
    }
}
