use std::cell::RefCell;
use std::rc::Rc;

use game_engine::{GameConfig, PlayerCharacter, Property, PropertyChanged, DEFAULT_WEAPONS};
use proptest::prelude::*;
use regex::Regex;
use rstest::{fixture, rstest};
use serde::Deserialize;

#[fixture]
fn sut() -> PlayerCharacter {
    PlayerCharacter::new()
}

fn named(first: &str, last: &str) -> PlayerCharacter {
    let mut player = PlayerCharacter::new();
    player.set_first_name(first);
    player.set_last_name(last);
    player
}

#[rstest]
fn is_inexperienced_when_new(sut: PlayerCharacter) {
    assert!(sut.is_noob());
}

#[rstest]
fn starts_with_default_health(sut: PlayerCharacter) {
    assert_eq!(100, sut.health());
    assert_ne!(0, sut.health());
}

#[rstest]
fn has_no_nickname_by_default(sut: PlayerCharacter) {
    assert_eq!(None, sut.nickname());
    assert_eq!(0, sut.subscriber_count());
}

#[test]
fn calculates_full_name() {
    let sut = named("Sarah", "Smith");
    let full_name = sut.full_name();

    assert_eq!("Sarah Smith", full_name);
    assert!(full_name.starts_with("Sarah"));
    assert!(full_name.ends_with("Smith"));
    assert!(full_name.contains("ah Sm"));
}

#[test]
fn full_name_matches_title_case_pattern() {
    let pattern = Regex::new(r"^[A-Z][a-z]+ [A-Z][a-z]+$").unwrap();
    assert!(pattern.is_match(&named("Sarah", "Smith").full_name()));
}

#[test]
fn full_name_preserves_case() {
    let full_name = named("SARAH", "SMITH").full_name();
    assert_eq!("SARAH SMITH", full_name);
    assert!(full_name.eq_ignore_ascii_case("Sarah Smith"));
}

#[rstest]
fn full_name_ends_with_last_name_when_first_unset(mut sut: PlayerCharacter) {
    sut.set_last_name("Smith");
    assert_eq!(" Smith", sut.full_name());
}

#[rstest]
fn has_all_expected_weapons(sut: PlayerCharacter) {
    assert_eq!(DEFAULT_WEAPONS.as_slice(), sut.weapons());
}

#[rstest]
fn weapon_checks(sut: PlayerCharacter) {
    let weapons = sut.weapons();
    assert!(weapons.iter().any(|w| w == "Long Bow"));
    assert!(!weapons.iter().any(|w| w == "Staff Of Wonder"));
    assert!(weapons.iter().any(|w| w.contains("Sword")));
    assert!(weapons.iter().all(|w| !w.trim().is_empty()));
}

#[rstest]
fn increases_health_after_sleeping(mut sut: PlayerCharacter) {
    sut.sleep();
    assert!((101..=200).contains(&sut.health()), "health {}", sut.health());
}

#[rstest]
fn raises_slept_event_once_per_sleep(mut sut: PlayerCharacter) {
    let slept = Rc::new(RefCell::new(0));
    let id = {
        let slept = Rc::clone(&slept);
        sut.on_player_slept(move |_| *slept.borrow_mut() += 1)
    };

    sut.sleep();
    assert_eq!(1, *slept.borrow());
    sut.sleep();
    assert_eq!(2, *slept.borrow());

    assert!(sut.unsubscribe_player_slept(id));
    sut.sleep();
    assert_eq!(2, *slept.borrow());
}

#[rstest]
fn raises_health_changed_on_damage(mut sut: PlayerCharacter) {
    let seen: Rc<RefCell<Vec<PropertyChanged>>> = Rc::default();
    let id = {
        let seen = Rc::clone(&seen);
        sut.on_property_changed(move |event| seen.borrow_mut().push(*event))
    };

    sut.take_damage(10);

    assert_eq!(90, sut.health());
    assert_eq!(
        vec![PropertyChanged {
            property: Property::Health
        }],
        *seen.borrow()
    );
    assert_eq!("Health", seen.borrow()[0].property.as_str());
    assert!(sut.unsubscribe_property_changed(id));
}

#[rstest]
fn notifies_even_when_health_is_already_zero(mut sut: PlayerCharacter) {
    sut.take_damage(100);
    let hits = Rc::new(RefCell::new(0));
    {
        let hits = Rc::clone(&hits);
        sut.on_property_changed(move |_| *hits.borrow_mut() += 1);
    }
    sut.take_damage(5);
    assert_eq!(0, sut.health());
    assert_eq!(1, *hits.borrow());
}

#[rstest]
#[case(0, 100)]
#[case(10, 90)]
#[case(55, 45)]
#[case(100, 0)]
#[case(150, 0)]
#[case(u32::MAX, 0)]
fn take_damage(mut sut: PlayerCharacter, #[case] damage: u32, #[case] expected_health: u32) {
    sut.take_damage(damage);
    assert_eq!(expected_health, sut.health());
}

#[derive(Deserialize)]
struct HealthDamageCase {
    damage: u32,
    expected_health: u32,
}

#[test]
fn take_damage_from_external_data() {
    let raw = include_str!("data/health_damage.json");
    let cases: Vec<HealthDamageCase> = serde_json::from_str(raw).unwrap();
    assert!(!cases.is_empty());
    for case in cases {
        let mut sut = PlayerCharacter::new();
        sut.take_damage(case.damage);
        assert_eq!(case.expected_health, sut.health(), "damage {}", case.damage);
    }
}

#[rstest]
fn stops_being_a_noob_after_enough_damage(mut sut: PlayerCharacter) {
    sut.take_damage(60);
    assert!(sut.is_noob());
    sut.sleep();
    sut.take_damage(40);
    assert!(!sut.is_noob());
}

#[test]
fn configured_character_uses_settings() {
    let config: GameConfig = "[player]\nstarting_health = 40\nmax_health = 50\n\n[sleep]\nmin_bonus = 30\nmax_bonus = 30\n"
        .parse()
        .unwrap();
    let mut sut = PlayerCharacter::with_config(config).unwrap();
    assert_eq!(40, sut.health());
    assert_eq!(10, sut.sleep());
    assert_eq!(50, sut.health());
}

#[test]
fn same_seed_sleeps_identically() {
    let run = |seed: u64| {
        let mut config = GameConfig::default();
        config.sleep.seed = seed;
        config.player.max_health = u32::MAX;
        let mut player = PlayerCharacter::with_config(config).unwrap();
        (0..5).map(|_| player.sleep()).collect::<Vec<_>>()
    };
    assert_eq!(run(42), run(42));
}

proptest! {
    #[test]
    fn prop_full_name_joins_with_single_space(first in "[A-Za-z]{0,12}", last in "[A-Za-z]{0,12}") {
        let sut = named(&first, &last);
        prop_assert_eq!(format!("{first} {last}"), sut.full_name());
    }

    #[test]
    fn prop_health_never_exceeds_ceiling(sleeps in 0usize..30, hits in prop::collection::vec(0u32..80, 0..10)) {
        let mut sut = PlayerCharacter::new();
        for damage in hits {
            sut.take_damage(damage);
            prop_assert!(sut.health() <= sut.max_health());
        }
        for _ in 0..sleeps {
            sut.sleep();
            prop_assert!(sut.health() <= sut.max_health());
        }
    }
}
