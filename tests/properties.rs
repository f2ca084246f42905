//! Property tests for letter accounting, scoring and generation.

use proptest::prelude::*;

use code_unscramble::{
    oracle::{Lexicon, Unavailable},
    puzzle::{ledger::replay, LedgerAudit, PuzzleGenerator},
    DeterministicRng, EngineConfig, LetterPool, MemoryStore, PlayerId, PuzzleEngine, PuzzleStore,
};

fn letters() -> impl Strategy<Value = String> {
    "[a-f]{0,16}"
}

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-f]{2,5}", 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Spent letters plus remaining letters always equal the original pool.
    #[test]
    fn prop_letters_are_conserved(original in letters(), attempts in words()) {
        let mut pool = LetterPool::from_letters(&original);
        let mut spent = LetterPool::new();

        for word in &attempts {
            if pool.subtract_word(word).is_ok() {
                spent.merge(&LetterPool::from_letters(word));
            }
        }

        spent.merge(&pool);
        prop_assert_eq!(spent, LetterPool::from_letters(&original));
    }

    /// A failed subtraction leaves the pool untouched.
    #[test]
    fn prop_failed_subtraction_is_pure(original in letters(), word in "[a-f]{1,8}") {
        let mut pool = LetterPool::from_letters(&original);
        let before = pool.clone();

        let affordable = pool.can_afford(&word);
        prop_assert_eq!(&pool, &before);

        match pool.subtract_word(&word) {
            Ok(()) => {
                prop_assert!(affordable);
                prop_assert_eq!(pool.len() + word.len(), before.len());
            }
            Err(_) => {
                prop_assert!(!affordable);
                prop_assert_eq!(pool, before);
            }
        }
    }

    /// Replaying accepted words reproduces the sequential result.
    #[test]
    fn prop_replay_matches_sequential(original in letters(), attempts in words()) {
        let mut pool = LetterPool::from_letters(&original);
        let accepted: Vec<&str> = attempts
            .iter()
            .map(String::as_str)
            .filter(|w| pool.subtract_word(w).is_ok())
            .collect();

        let replayed = replay(&original, accepted.iter().copied()).unwrap();
        prop_assert_eq!(replayed, pool);
    }

    /// A generated pool is exactly the letters of its source words.
    #[test]
    fn prop_generation_shape(
        seed in any::<u64>(),
        count in 1usize..6,
        candidates in prop::option::of(prop::collection::vec("[a-zA-Z0-9']{1,8}", 0..20)),
    ) {
        let generator = PuzzleGenerator::default();
        let puzzle = generator.generate(candidates, count, &mut DeterministicRng::new(seed));

        prop_assert_eq!(puzzle.source_words.len(), count);
        prop_assert!(puzzle.source_words.iter().all(|w| (3..=5).contains(&w.len())));

        let joined: String = puzzle.source_words.concat();
        prop_assert_eq!(LetterPool::from_letters(&puzzle.letters), LetterPool::from_letters(&joined));
        prop_assert!(puzzle.letters.chars().all(|c| c.is_ascii_lowercase()));
    }

    /// Same seed and candidates, same puzzle.
    #[test]
    fn prop_generation_is_deterministic(seed in any::<u64>(), count in 1usize..5) {
        let generator = PuzzleGenerator::default();
        let a = generator.generate(None, count, &mut DeterministicRng::new(seed));
        let b = generator.generate(None, count, &mut DeterministicRng::new(seed));
        prop_assert_eq!(a, b);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Through the engine: total score is the sum of accepted word lengths,
    /// no word is accepted twice, and the ledger audit stays consistent.
    #[test]
    fn prop_engine_scores_add_up(original in "[a-f]{2,16}", attempts in words()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let player = PlayerId::new([3; 16]);
            let engine = PuzzleEngine::new(
                MemoryStore::new(),
                Unavailable,
                Lexicon::from_words(&attempts),
                EngineConfig::default().with_seed(1),
            );
            engine.store().register_player(player).await;
            let puzzle = engine.store().insert_puzzle(player, original.clone()).await.unwrap();

            let mut expected = 0;
            let mut seen = Vec::new();
            for word in &attempts {
                let result = engine.submit_word(player, puzzle.id, word).await.unwrap();
                if result.accepted {
                    assert!(!seen.contains(word));
                    assert_eq!(result.score, Some(word.len() as u32));
                    expected += word.len() as u32;
                    seen.push(word.clone());
                }
            }

            let summary = engine.finalize_score(player, puzzle.id).await.unwrap();
            assert_eq!(summary.total_score, expected);
            assert_eq!(summary.words_found, seen);
            assert!(matches!(
                engine.audit(player, puzzle.id).await.unwrap(),
                LedgerAudit::Consistent { .. }
            ));
        });
    }
}
