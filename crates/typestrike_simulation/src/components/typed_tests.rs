//! Tests for TypedTarget state machine.

#[cfg(test)]
mod tests {
    use super::super::typed::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn target(word: &str) -> TypedTarget {
        TypedTarget::new(TargetId(1), word)
    }

    fn assert_invariants(t: &TypedTarget) {
        assert!(t.hit_index() <= t.typed_index(), "hit {} > typed {}", t.hit_index(), t.typed_index());
        assert!(t.typed_index() <= t.word_len(), "typed {} > len {}", t.typed_index(), t.word_len());
    }

    #[test]
    fn test_new_target() {
        let t = target("cat");
        assert_eq!(t.word(), "cat");
        assert_eq!(t.word_len(), 3);
        assert_eq!(t.displayed_word(), "cat");
        assert_eq!(t.next_letter(), Some('c'));
        assert_eq!(t.pending_damage(), 0);
        assert!(!t.is_destroyed());
    }

    #[test]
    fn test_cat_scenario_type_and_land() {
        // Каждая буква сразу долетает с уроном 1
        let mut t = target("cat");
        let mut displayed = Vec::new();
        let mut kills = 0;

        for letter in ['c', 'a', 't'] {
            assert_eq!(t.on_letter_typed(letter, || 1), LetterOutcome::Fired { damage: 1 });
            match t.apply_damage(1) {
                DamageOutcome::Killed => kills += 1,
                DamageOutcome::Hit { .. } => {}
                other => panic!("unexpected outcome {:?}", other),
            }
            displayed.push(t.displayed_word().to_string());
            assert_invariants(&t);
        }

        assert_eq!(displayed, vec!["at", "t", ""]);
        assert_eq!(kills, 1);
        assert!(t.is_destroyed());
        assert_eq!(t.hit_index(), 3);
    }

    #[test]
    fn test_pending_damage_outlives_index_resync() {
        let mut t = target("dog");

        t.on_letter_typed('d', || 1);
        t.on_letter_typed('o', || 1);

        // Один из двух снарядов долетел: индексы сравнялись, второй ещё летит
        t.apply_damage(1);
        assert_eq!(t.typed_index(), t.hit_index());
        assert_eq!(t.pending_damage(), 1);

        // Повторный набор 'o' добавляет ещё один снаряд к летящему
        assert_eq!(t.on_letter_typed('o', || 1), LetterOutcome::Fired { damage: 1 });
        assert_eq!(t.pending_damage(), 2);

        // Долетает старый снаряд за 'o'
        assert_eq!(t.apply_damage(1), DamageOutcome::Hit { remaining: 1 });
        assert_eq!(t.pending_damage(), 1);
        assert_eq!(t.displayed_word(), "g");
    }

    #[test]
    fn test_dog_scenario_pending_accumulates() {
        let mut t = target("dog");

        t.on_letter_typed('d', || 1);
        t.on_letter_typed('o', || 1);
        assert_eq!(t.pending_damage(), 2);
        assert_eq!(t.typed_index(), 2);

        // Первый снаряд долетел → typed_index синхронизируется с hit_index
        assert_eq!(t.apply_damage(1), DamageOutcome::Hit { remaining: 2 });
        assert_eq!(t.hit_index(), 1);
        assert_eq!(t.typed_index(), 1);
        assert_eq!(t.pending_damage(), 1);
        assert_eq!(t.displayed_word(), "og");

        // После resync ожидается снова 'o'
        assert_eq!(t.next_letter(), Some('o'));
        assert_eq!(t.on_letter_typed('g', || 1), LetterOutcome::Mismatch);
        assert_eq!(t.on_letter_typed('o', || 1), LetterOutcome::Fired { damage: 1 });
        assert_eq!(t.pending_damage(), 2);
    }

    #[test]
    fn test_wrong_letter_changes_nothing() {
        let mut t = target("cat");
        t.on_letter_typed('c', || 1);
        let before = t.clone();

        let mut launched = false;
        assert_eq!(
            t.on_letter_typed('x', || {
                launched = true;
                1
            }),
            LetterOutcome::Mismatch
        );

        assert!(!launched, "launcher must not be called on mismatch");
        assert_eq!(t, before);
    }

    #[test]
    fn test_refused_launch_wastes_keystroke() {
        let mut t = target("cat");
        assert_eq!(t.on_letter_typed('c', || 0), LetterOutcome::Refused);
        assert_eq!(t.typed_index(), 0);
        assert_eq!(t.pending_damage(), 0);
    }

    #[test]
    fn test_typing_past_end_is_closed() {
        let mut t = target("ox");
        t.on_letter_typed('o', || 1);
        t.on_letter_typed('x', || 1);
        assert_eq!(t.typed_index(), 2);
        assert_eq!(t.next_letter(), None);
        assert_eq!(t.on_letter_typed('x', || 1), LetterOutcome::Closed);
        assert_eq!(t.pending_damage(), 2);
    }

    #[test]
    fn test_damage_without_pending_is_dropped() {
        let mut t = target("cat");
        assert_eq!(t.apply_damage(1), DamageOutcome::NothingPending);
        assert_eq!(t.hit_index(), 0);
        assert!(!t.is_destroyed());

        // Даже огромный урон без pending ничего не делает
        assert_eq!(t.apply_damage(100), DamageOutcome::NothingPending);
        assert_eq!(t.displayed_word(), "cat");
    }

    #[test]
    fn test_overkill_is_clamped() {
        let mut t = target("cat");
        t.on_letter_typed('c', || 1);

        // amount > остатка слова и > pending
        assert_eq!(t.apply_damage(10), DamageOutcome::Killed);
        assert_eq!(t.hit_index(), 3);
        assert_eq!(t.typed_index(), 3);
        assert_eq!(t.pending_damage(), 0, "pending_damage clamped to zero");
        assert_eq!(t.displayed_word(), "");
    }

    #[test]
    fn test_pending_never_negative_with_partial_hits() {
        let mut t = target("zombie");
        t.on_letter_typed('z', || 1);

        // Попадание на 3 при pending = 1
        assert_eq!(t.apply_damage(3), DamageOutcome::Hit { remaining: 3 });
        assert_eq!(t.pending_damage(), 0);
        assert_eq!(t.displayed_word(), "bie");

        // Следующее попадание без нового выстрела отбрасывается
        assert_eq!(t.apply_damage(1), DamageOutcome::NothingPending);
        assert_eq!(t.hit_index(), 3);
    }

    #[test]
    fn test_destroyed_ignores_everything() {
        let mut t = target("cat");
        t.on_letter_typed('c', || 1);
        assert!(t.destroy());

        assert_eq!(t.on_letter_typed('a', || 1), LetterOutcome::Closed);
        assert_eq!(t.apply_damage(1), DamageOutcome::Ignored);
        assert_eq!(t.next_letter(), None);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut t = target("cat");
        assert!(t.destroy());
        let after_first = t.clone();

        assert!(!t.destroy());
        assert_eq!(t, after_first);
    }

    #[test]
    fn test_multi_damage_projectiles() {
        // Launcher с уроном 2 за выстрел
        let mut t = target("cat");
        assert_eq!(t.on_letter_typed('c', || 2), LetterOutcome::Fired { damage: 2 });
        assert_eq!(t.typed_index(), 1);
        assert_eq!(t.pending_damage(), 2);

        assert_eq!(t.apply_damage(2), DamageOutcome::Hit { remaining: 1 });
        assert_eq!(t.displayed_word(), "t");
        assert_eq!(t.next_letter(), Some('t'));
    }

    #[test]
    fn test_debug_summary() {
        let mut t = target("cat");
        t.on_letter_typed('c', || 1);

        let summary = t.debug_summary();
        assert!(summary.contains("Word: \"cat\""));
        assert!(summary.contains("Display: \"cat\""));
        assert!(summary.contains("Typed: 1/3"));
        assert!(summary.contains("Hit: 0"));
        assert!(summary.contains("PendingDmg: 1"));
    }

    #[test]
    fn test_non_ascii_word() {
        let mut t = target("ёж");
        assert_eq!(t.word_len(), 2);
        t.on_letter_typed('ё', || 1);
        t.apply_damage(1);
        assert_eq!(t.displayed_word(), "ж");
    }

    /// Случайные последовательности нажатий/попаданий не ломают инварианты
    #[test]
    fn test_random_sequences_keep_invariants() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let alphabet = ['c', 'a', 't', 'x'];

        for _ in 0..500 {
            let mut t = target("cattac");
            let mut kills = 0;

            for _ in 0..40 {
                if rng.gen_bool(0.6) {
                    let letter = alphabet[rng.gen_range(0..alphabet.len())];
                    let damage = rng.gen_range(0..3);
                    t.on_letter_typed(letter, || damage);
                } else if t.apply_damage(rng.gen_range(0..4)) == DamageOutcome::Killed {
                    kills += 1;
                }

                assert_invariants(&t);
                assert_eq!(t.is_destroyed(), t.hit_index() == t.word_len());
            }

            assert!(kills <= 1, "destruction must fire at most once");
        }
    }
}
