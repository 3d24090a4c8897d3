// SPDX-License-Identifier: GPL-3.0-or-later

//! Ordering tests for the download decision comparer.

#[cfg(test)]
mod ranking_tests {
    use chrono::Duration;
    use gamarr_config::{
        DecisionConfig, DelayProfileConfig, ProperDownloadTypes, ProtocolPreference,
    };
    use gamarr_domain::{
        CustomFormat, DownloadProtocol, Game, IndexerFlag, ParsedGameInfo, ProfileFormatItem,
        Quality, QualityModel, ReleaseContentType, ReleaseInfo, RemoteGame, Revision,
    };
    use proptest::prelude::*;

    use crate::decision_maker::{DownloadDecision, DownloadRejection};
    use crate::prioritization::{
        similarity_bucket, DownloadDecisionComparer, AGE_SIMILARITY_RATIO, SWARM_SIMILARITY_RATIO,
    };
    use crate::specifications::{DownloadRejectionReason, RejectionType, SpecificationPriority};
    use crate::test_support::*;

    const MB: u64 = 1024 * 1024;

    fn uplay() -> QualityModel {
        QualityModel::new(Quality::Uplay)
    }

    fn uplay_revision(version: u32, real: u32) -> QualityModel {
        QualityModel::with_revision(Quality::Uplay, Revision::new(version, real, false))
    }

    fn candidate(
        game: &Game,
        title: &str,
        quality: QualityModel,
        protocol: DownloadProtocol,
        age_minutes: i64,
        size_mb: u64,
    ) -> RemoteGame {
        let mut release = ReleaseInfo::new(
            title,
            protocol,
            fixed_now() - Duration::minutes(age_minutes),
        );
        release.size_bytes = size_mb * MB;
        RemoteGame::new(
            release,
            Some(ParsedGameInfo::new("Disco Elysium", quality)),
            Some(game.clone()),
            Vec::new(),
        )
    }

    fn usenet(game: &Game, title: &str, quality: QualityModel) -> RemoteGame {
        candidate(game, title, quality, DownloadProtocol::Usenet, 60, 1000)
    }

    fn torrent(game: &Game, title: &str, seeders: Option<u32>, peers: Option<u32>) -> RemoteGame {
        let mut remote = candidate(game, title, uplay(), DownloadProtocol::Torrent, 60, 1000);
        remote.release.seeders = seeders;
        remote.release.peers = peers;
        remote
    }

    fn with_formats(game: &Game, mut remote: RemoteGame, formats: &[&CustomFormat]) -> RemoteGame {
        remote.custom_formats = formats.iter().map(|format| (*format).clone()).collect();
        remote.custom_format_score = game
            .quality_profile
            .calculate_custom_format_score(&remote.custom_formats);
        remote
    }

    fn scored_game() -> (Game, CustomFormat, CustomFormat) {
        let english = CustomFormat::new("My Format 1");
        let french = CustomFormat::new("My Format 2");
        let mut game = game();
        game.quality_profile.format_items = vec![
            ProfileFormatItem {
                format: english.id,
                score: 10,
            },
            ProfileFormatItem {
                format: french.id,
                score: 20,
            },
        ];
        (game, english, french)
    }

    fn sized_game(mb_per_minute: f64, runtime_minutes: u32) -> Game {
        let mut game = game();
        game.quality_profile.preferred_size_mb_per_minute = Some(mb_per_minute);
        game.runtime_minutes = runtime_minutes;
        game
    }

    fn torrent_preferred() -> DecisionConfig {
        DecisionConfig {
            delay_profiles: vec![DelayProfileConfig {
                preferred_protocol: ProtocolPreference::Torrent,
                ..DelayProfileConfig::default()
            }],
            ..DecisionConfig::default()
        }
    }

    fn with_propers(propers: ProperDownloadTypes) -> DecisionConfig {
        DecisionConfig {
            download_propers_and_repacks: propers,
            ..DecisionConfig::default()
        }
    }

    fn ranked(config: &DecisionConfig, candidates: Vec<RemoteGame>) -> Vec<String> {
        DownloadDecisionComparer::new(config, fixed_now())
            .prioritize(
                candidates
                    .into_iter()
                    .map(DownloadDecision::approved)
                    .collect(),
            )
            .into_iter()
            .map(|decision| decision.remote_game.release.title)
            .collect()
    }

    fn best(config: &DecisionConfig, candidates: Vec<RemoteGame>) -> String {
        ranked(config, candidates)
            .into_iter()
            .next()
            .expect("at least one candidate should be ranked")
    }

    // ========================================================================
    // Revision and quality
    // ========================================================================

    #[test]
    fn reals_rank_before_non_reals() {
        let game = game();
        let winner = best(
            &DecisionConfig::default(),
            vec![
                usenet(&game, "plain", uplay_revision(1, 0)),
                usenet(&game, "real", uplay_revision(1, 1)),
            ],
        );
        assert_eq!(winner, "real");
    }

    #[test]
    fn propers_rank_before_non_propers() {
        let game = game();
        let winner = best(
            &DecisionConfig::default(),
            vec![
                usenet(&game, "v1", uplay_revision(1, 0)),
                usenet(&game, "v2", uplay_revision(2, 0)),
            ],
        );
        assert_eq!(winner, "v2");
    }

    #[test]
    fn higher_quality_ranks_before_lower() {
        let game = game();
        let winner = best(
            &DecisionConfig::default(),
            vec![
                usenet(&game, "scene", QualityModel::new(Quality::Scene)),
                usenet(&game, "uplay", uplay()),
            ],
        );
        assert_eq!(winner, "uplay");
    }

    // ========================================================================
    // Custom format score and propers preference
    // ========================================================================

    #[test]
    fn better_custom_format_wins() {
        let (game, english, french) = scored_game();
        let first = with_formats(&game, usenet(&game, "english", uplay()), &[&english]);
        let second = with_formats(&game, usenet(&game, "french", uplay()), &[&french]);

        assert_eq!(best(&DecisionConfig::default(), vec![first, second]), "french");
    }

    #[test]
    fn two_custom_formats_beat_one() {
        let (game, english, french) = scored_game();
        let single = with_formats(&game, usenet(&game, "single", uplay()), &[&french]);
        let both = with_formats(&game, usenet(&game, "both", uplay()), &[&english, &french]);

        assert_eq!(best(&DecisionConfig::default(), vec![single, both]), "both");
    }

    #[test]
    fn proper_beats_score_when_propers_are_preferred() {
        for propers in [
            ProperDownloadTypes::PreferAndUpgrade,
            ProperDownloadTypes::DoNotUpgrade,
        ] {
            let (game, _, french) = scored_game();
            let scored = with_formats(
                &game,
                usenet(&game, "scored", uplay_revision(1, 0)),
                &[&french],
            );
            let proper = usenet(&game, "proper", uplay_revision(2, 0));

            assert_eq!(best(&with_propers(propers), vec![scored, proper]), "proper");
        }
    }

    #[test]
    fn score_beats_proper_when_propers_are_not_preferred() {
        let (game, _, french) = scored_game();
        let scored = with_formats(
            &game,
            usenet(&game, "scored", uplay_revision(1, 0)),
            &[&french],
        );
        let proper = usenet(&game, "proper", uplay_revision(2, 0));

        assert_eq!(
            best(
                &with_propers(ProperDownloadTypes::DoNotPrefer),
                vec![proper, scored]
            ),
            "scored"
        );
    }

    #[test]
    fn score_beats_real_when_propers_are_not_preferred() {
        let (game, _, french) = scored_game();
        let scored = with_formats(
            &game,
            usenet(&game, "scored", uplay_revision(1, 0)),
            &[&french],
        );
        let real = usenet(&game, "real", uplay_revision(1, 1));

        assert_eq!(
            best(
                &with_propers(ProperDownloadTypes::DoNotPrefer),
                vec![real, scored]
            ),
            "scored"
        );
    }

    #[test]
    fn deferred_revision_breaks_ties_when_propers_are_not_preferred() {
        let game = game();
        let winner = best(
            &with_propers(ProperDownloadTypes::DoNotPrefer),
            vec![
                usenet(&game, "v1", uplay_revision(1, 0)),
                usenet(&game, "v2", uplay_revision(2, 0)),
            ],
        );
        assert_eq!(winner, "v2");
    }

    // ========================================================================
    // Content completeness
    // ========================================================================

    fn with_content(mut remote: RemoteGame, content_type: ReleaseContentType) -> RemoteGame {
        if let Some(parsed) = remote.parsed.as_mut() {
            parsed.content_type = content_type;
        }
        remote
    }

    #[test]
    fn all_dlc_bundle_beats_base_game() {
        let game = game();
        let base = with_content(usenet(&game, "base", uplay()), ReleaseContentType::BaseGame);
        let bundle = with_content(
            usenet(&game, "bundle", uplay()),
            ReleaseContentType::BaseGameWithAllDlc,
        );

        assert_eq!(best(&DecisionConfig::default(), vec![base, bundle]), "bundle");
    }

    #[test]
    fn all_dlc_bundle_beats_unknown_content() {
        let game = game();
        let unknown = usenet(&game, "unknown", uplay());
        let bundle = with_content(
            usenet(&game, "bundle", uplay()),
            ReleaseContentType::BaseGameWithAllDlc,
        );

        assert_eq!(
            best(&DecisionConfig::default(), vec![unknown, bundle]),
            "bundle"
        );
    }

    #[test]
    fn all_dlc_bundle_does_not_beat_higher_quality() {
        let game = game();
        let bundle = with_content(
            usenet(&game, "bundle", uplay()),
            ReleaseContentType::BaseGameWithAllDlc,
        );
        let retail = with_content(
            usenet(&game, "retail", QualityModel::new(Quality::Retail)),
            ReleaseContentType::BaseGame,
        );

        assert_eq!(best(&DecisionConfig::default(), vec![bundle, retail]), "retail");
    }

    // ========================================================================
    // Age and size
    // ========================================================================

    #[test]
    fn youngest_release_ranks_first() {
        let game = game();
        let winner = best(
            &DecisionConfig::default(),
            vec![
                candidate(&game, "old", uplay(), DownloadProtocol::Usenet, 1440, 1000),
                candidate(&game, "young", uplay(), DownloadProtocol::Usenet, 60, 1000),
            ],
        );
        assert_eq!(winner, "young");
    }

    #[test]
    fn similar_ages_fall_through_to_larger_size_bucket() {
        let game = game();
        let winner = best(
            &DecisionConfig::default(),
            vec![
                candidate(&game, "younger", uplay(), DownloadProtocol::Usenet, 600, 1200),
                candidate(&game, "larger", uplay(), DownloadProtocol::Usenet, 620, 1400),
            ],
        );
        assert_eq!(winner, "larger");
    }

    #[test]
    fn ages_outside_similarity_band_prefer_younger() {
        let game = game();
        let winner = best(
            &DecisionConfig::default(),
            vec![
                candidate(&game, "larger", uplay(), DownloadProtocol::Usenet, 660, 1400),
                candidate(&game, "younger", uplay(), DownloadProtocol::Usenet, 600, 1200),
            ],
        );
        assert_eq!(winner, "younger");
    }

    #[test]
    fn sizes_within_one_bucket_keep_input_order() {
        let game = game();
        let order = ranked(
            &DecisionConfig::default(),
            vec![
                candidate(&game, "first", uplay(), DownloadProtocol::Usenet, 600, 1210),
                candidate(&game, "second", uplay(), DownloadProtocol::Usenet, 620, 1390),
            ],
        );
        assert_eq!(order, vec!["first", "second"]);
    }

    // ========================================================================
    // Preferred size
    // ========================================================================

    #[test]
    fn closest_to_preferred_size_wins_when_both_over() {
        let game = sized_game(10.0, 100);
        let winner = best(
            &DecisionConfig::default(),
            vec![
                candidate(&game, "far", uplay(), DownloadProtocol::Usenet, 60, 1400),
                candidate(&game, "near", uplay(), DownloadProtocol::Usenet, 60, 1100),
            ],
        );
        assert_eq!(winner, "near");
    }

    #[test]
    fn closest_to_preferred_size_wins_when_both_under() {
        let game = sized_game(10.0, 100);
        let winner = best(
            &DecisionConfig::default(),
            vec![
                candidate(&game, "far", uplay(), DownloadProtocol::Usenet, 60, 600),
                candidate(&game, "near", uplay(), DownloadProtocol::Usenet, 60, 900),
            ],
        );
        assert_eq!(winner, "near");
    }

    #[test]
    fn closest_to_preferred_size_wins_when_target_is_between() {
        let game = sized_game(10.0, 100);
        let winner = best(
            &DecisionConfig::default(),
            vec![
                candidate(&game, "over", uplay(), DownloadProtocol::Usenet, 60, 1150),
                candidate(&game, "under", uplay(), DownloadProtocol::Usenet, 60, 900),
            ],
        );
        assert_eq!(winner, "under");
    }

    #[test]
    fn preferred_size_distances_within_tolerance_keep_input_order() {
        let game = sized_game(10.0, 100);
        let config = DecisionConfig::default();

        // 5% of a 1000 MiB target is 50 MiB.
        let tied = ranked(
            &config,
            vec![
                candidate(&game, "first", uplay(), DownloadProtocol::Usenet, 60, 1030),
                candidate(&game, "second", uplay(), DownloadProtocol::Usenet, 60, 990),
            ],
        );
        assert_eq!(tied, vec!["first", "second"]);

        let split = ranked(
            &config,
            vec![
                candidate(&game, "first", uplay(), DownloadProtocol::Usenet, 60, 1060),
                candidate(&game, "second", uplay(), DownloadProtocol::Usenet, 60, 1030),
            ],
        );
        assert_eq!(split, vec!["second", "first"]);
    }

    #[test]
    fn zero_runtime_falls_back_to_largest() {
        let game = sized_game(10.0, 0);
        let winner = best(
            &DecisionConfig::default(),
            vec![
                candidate(&game, "near", uplay(), DownloadProtocol::Usenet, 60, 1100),
                candidate(&game, "largest", uplay(), DownloadProtocol::Usenet, 60, 1400),
            ],
        );
        assert_eq!(winner, "largest");
    }

    // ========================================================================
    // Protocol and swarm
    // ========================================================================

    #[test]
    fn usenet_ranks_above_torrent_when_usenet_is_preferred() {
        let game = game();
        let winner = best(
            &DecisionConfig::default(),
            vec![
                torrent(&game, "torrent", Some(100), Some(100)),
                usenet(&game, "usenet", uplay()),
            ],
        );
        assert_eq!(winner, "usenet");
    }

    #[test]
    fn torrent_ranks_above_usenet_when_torrent_is_preferred() {
        let game = game();
        let winner = best(
            &torrent_preferred(),
            vec![
                usenet(&game, "usenet", uplay()),
                torrent(&game, "torrent", Some(1), Some(1)),
            ],
        );
        assert_eq!(winner, "torrent");
    }

    #[test]
    fn more_seeders_wins() {
        let game = game();
        let winner = best(
            &torrent_preferred(),
            vec![
                torrent(&game, "few", Some(10), Some(10)),
                torrent(&game, "many", Some(100), Some(10)),
            ],
        );
        assert_eq!(winner, "many");
    }

    #[test]
    fn more_peers_wins_given_equal_seeders() {
        let game = game();
        let winner = best(
            &torrent_preferred(),
            vec![
                torrent(&game, "ten", Some(10), Some(10)),
                torrent(&game, "hundred", Some(10), Some(100)),
            ],
        );
        assert_eq!(winner, "hundred");
    }

    #[test]
    fn more_peers_wins_without_seeders() {
        let game = game();
        let winner = best(
            &torrent_preferred(),
            vec![
                torrent(&game, "ten", None, Some(10)),
                torrent(&game, "hundred", None, Some(100)),
            ],
        );
        assert_eq!(winner, "hundred");
    }

    #[test]
    fn similar_peer_counts_keep_input_order() {
        let game = game();
        let tied = ranked(
            &torrent_preferred(),
            vec![
                torrent(&game, "first", Some(10), Some(100)),
                torrent(&game, "second", Some(10), Some(105)),
            ],
        );
        assert_eq!(tied, vec!["first", "second"]);

        let split = ranked(
            &torrent_preferred(),
            vec![
                torrent(&game, "first", Some(10), Some(100)),
                torrent(&game, "second", Some(10), Some(110)),
            ],
        );
        assert_eq!(split, vec!["second", "first"]);
    }

    // ========================================================================
    // Indexer priority and flags
    // ========================================================================

    fn with_priority(mut remote: RemoteGame, priority: i32) -> RemoteGame {
        remote.release.indexer_priority = priority;
        remote
    }

    fn with_flags(mut remote: RemoteGame, flags: &[IndexerFlag]) -> RemoteGame {
        remote.release.indexer_flags = flags.to_vec();
        remote
    }

    #[test]
    fn lower_indexer_priority_wins() {
        let game = game();
        let order = ranked(
            &DecisionConfig::default(),
            vec![
                with_priority(usenet(&game, "p25", uplay()), 25),
                with_priority(usenet(&game, "p50", uplay()), 50),
                with_priority(usenet(&game, "p1", uplay()), 1),
                with_priority(usenet(&game, "p10", uplay()), 10),
            ],
        );
        assert_eq!(order, vec!["p1", "p10", "p25", "p50"]);
    }

    #[test]
    fn indexer_priority_is_not_preferred_over_quality() {
        let game = game();
        let winner = best(
            &DecisionConfig::default(),
            vec![
                with_priority(usenet(&game, "scene", QualityModel::new(Quality::Scene)), 1),
                with_priority(usenet(&game, "uplay", uplay()), 50),
            ],
        );
        assert_eq!(winner, "uplay");
    }

    #[test]
    fn indexer_flags_rank_only_when_preferred() {
        let game = game();
        let candidates = || {
            vec![
                with_flags(usenet(&game, "half", uplay()), &[IndexerFlag::Halfleech]),
                with_flags(usenet(&game, "free", uplay()), &[IndexerFlag::Freeleech]),
            ]
        };

        let preferred = DecisionConfig {
            prefer_indexer_flags: true,
            ..DecisionConfig::default()
        };
        assert_eq!(best(&preferred, candidates()), "free");
        assert_eq!(best(&DecisionConfig::default(), candidates()), "half");
    }

    // ========================================================================
    // Grouping, comparison and buckets
    // ========================================================================

    #[test]
    fn prioritize_groups_by_game_and_appends_rejections() {
        let first_game = game();
        let second_game = game();
        let rejection = DownloadRejection {
            reason: DownloadRejectionReason::Blocklisted,
            message: "Release is blocklisted".into(),
            rejection_type: RejectionType::Permanent,
            priority: SpecificationPriority::Database,
            specification: Some("Blocklist"),
        };

        let decisions = vec![
            DownloadDecision::approved(usenet(
                &first_game,
                "a-scene",
                QualityModel::new(Quality::Scene),
            )),
            DownloadDecision::rejected(usenet(&second_game, "b-blocked", uplay()), rejection),
            DownloadDecision::approved(usenet(&second_game, "b-uplay", uplay())),
            DownloadDecision::approved(usenet(&first_game, "a-uplay", uplay())),
            DownloadDecision::approved(usenet(
                &second_game,
                "b-scene",
                QualityModel::new(Quality::Scene),
            )),
        ];

        let order: Vec<String> = DownloadDecisionComparer::new(&DecisionConfig::default(), fixed_now())
            .prioritize(decisions)
            .into_iter()
            .map(|decision| decision.remote_game.release.title)
            .collect();

        assert_eq!(
            order,
            vec!["a-uplay", "a-scene", "b-uplay", "b-scene", "b-blocked"]
        );
    }

    #[test]
    fn compare_reports_greater_for_preferred_release() {
        let game = game();
        let comparer = DownloadDecisionComparer::new(&DecisionConfig::default(), fixed_now());
        let better = usenet(&game, "uplay", uplay());
        let worse = usenet(&game, "scene", QualityModel::new(Quality::Scene));

        assert_eq!(comparer.compare(&better, &worse), std::cmp::Ordering::Greater);
        assert_eq!(comparer.compare(&worse, &better), std::cmp::Ordering::Less);
        assert_eq!(comparer.compare(&better, &better), std::cmp::Ordering::Equal);
    }

    #[test]
    fn similarity_bucket_boundaries() {
        assert_eq!(similarity_bucket(0.0, SWARM_SIMILARITY_RATIO), 0);
        assert_eq!(similarity_bucket(-5.0, SWARM_SIMILARITY_RATIO), 0);
        assert_eq!(
            similarity_bucket(100.0, SWARM_SIMILARITY_RATIO),
            similarity_bucket(105.0, SWARM_SIMILARITY_RATIO)
        );
        assert!(
            similarity_bucket(110.0, SWARM_SIMILARITY_RATIO)
                > similarity_bucket(100.0, SWARM_SIMILARITY_RATIO)
        );
        assert_eq!(
            similarity_bucket(600.0, AGE_SIMILARITY_RATIO),
            similarity_bucket(620.0, AGE_SIMILARITY_RATIO)
        );
        assert!(
            similarity_bucket(660.0, AGE_SIMILARITY_RATIO)
                > similarity_bucket(620.0, AGE_SIMILARITY_RATIO)
        );
    }

    #[test]
    fn similarity_ratio_is_a_bucket_width() {
        // 5% apart, yet on either side of a boundary.
        assert!(
            similarity_bucket(21.0, SWARM_SIMILARITY_RATIO)
                > similarity_bucket(20.0, SWARM_SIMILARITY_RATIO)
        );
        assert_eq!(
            similarity_bucket(21.0, SWARM_SIMILARITY_RATIO),
            similarity_bucket(22.0, SWARM_SIMILARITY_RATIO)
        );

        // Shared buckets never span more than one ratio step.
        for low in 1..500u32 {
            for high in low..(low + 60) {
                let (low, high) = (f64::from(low), f64::from(high));
                if similarity_bucket(low, SWARM_SIMILARITY_RATIO)
                    == similarity_bucket(high, SWARM_SIMILARITY_RATIO)
                {
                    assert!((1.0 + high) / (1.0 + low) < 1.0 + SWARM_SIMILARITY_RATIO);
                }
            }
        }
    }

    // ========================================================================
    // Properties
    // ========================================================================

    #[derive(Debug, Clone)]
    struct Shape {
        quality: usize,
        age_minutes: i64,
        size_mb: u64,
        torrent: bool,
        seeders: u32,
        peers: u32,
        priority: i32,
    }

    fn arb_shape() -> impl Strategy<Value = Shape> {
        (
            0usize..Quality::ALL.len(),
            0i64..2_000,
            0u64..3_000,
            any::<bool>(),
            0u32..200,
            0u32..200,
            0i32..50,
        )
            .prop_map(
                |(quality, age_minutes, size_mb, torrent, seeders, peers, priority)| Shape {
                    quality,
                    age_minutes,
                    size_mb,
                    torrent,
                    seeders,
                    peers,
                    priority,
                },
            )
    }

    fn build(game: &Game, shapes: &[Shape]) -> Vec<RemoteGame> {
        shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| {
                let protocol = if shape.torrent {
                    DownloadProtocol::Torrent
                } else {
                    DownloadProtocol::Usenet
                };
                let mut remote = candidate(
                    game,
                    &format!("r{index}"),
                    QualityModel::new(Quality::ALL[shape.quality]),
                    protocol,
                    shape.age_minutes,
                    shape.size_mb,
                );
                if shape.torrent {
                    remote.release.seeders = Some(shape.seeders);
                    remote.release.peers = Some(shape.peers);
                }
                remote.release.indexer_priority = shape.priority;
                remote
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_prioritize_is_idempotent(shapes in prop::collection::vec(arb_shape(), 0..10)) {
            let game = game();
            let comparer = DownloadDecisionComparer::new(&DecisionConfig::default(), fixed_now());
            let once = comparer.prioritize(
                build(&game, &shapes).into_iter().map(DownloadDecision::approved).collect(),
            );
            let once_titles: Vec<String> =
                once.iter().map(|d| d.remote_game.release.title.clone()).collect();
            let twice_titles: Vec<String> = comparer
                .prioritize(once)
                .into_iter()
                .map(|d| d.remote_game.release.title)
                .collect();

            prop_assert_eq!(once_titles, twice_titles);
        }

        #[test]
        fn prop_permutation_preserves_key_order_and_ties(
            shapes in prop::collection::vec(arb_shape(), 0..10),
        ) {
            let game = game();
            let comparer = DownloadDecisionComparer::new(&DecisionConfig::default(), fixed_now());
            let forward = build(&game, &shapes);
            let mut reversed = forward.clone();
            reversed.reverse();

            let rank = |input: Vec<RemoteGame>| -> Vec<RemoteGame> {
                comparer
                    .prioritize(input.into_iter().map(DownloadDecision::approved).collect())
                    .into_iter()
                    .map(|d| d.remote_game)
                    .collect()
            };
            let input_index = |input: &[RemoteGame], title: &str| {
                input.iter().position(|r| r.release.title == title)
            };

            let from_forward = rank(forward.clone());
            let from_reversed = rank(reversed.clone());

            let forward_keys: Vec<_> = from_forward.iter().map(|r| comparer.rank_key(r)).collect();
            let reversed_keys: Vec<_> = from_reversed.iter().map(|r| comparer.rank_key(r)).collect();
            prop_assert_eq!(forward_keys, reversed_keys);

            for (output, input) in [(&from_forward, &forward), (&from_reversed, &reversed)] {
                for pair in output.windows(2) {
                    if comparer.rank_key(&pair[0]) == comparer.rank_key(&pair[1]) {
                        prop_assert!(
                            input_index(input.as_slice(), &pair[0].release.title)
                                < input_index(input.as_slice(), &pair[1].release.title)
                        );
                    }
                }
            }
        }
    }
}
