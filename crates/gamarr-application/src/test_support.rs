// SPDX-License-Identifier: GPL-3.0-or-later
//! Builders shared by the unit test suites.

use chrono::{DateTime, Duration, TimeZone, Utc};
use gamarr_domain::{
    DownloadProtocol, Game, GameFile, GameHistory, HistoryEventType, ParsedGameInfo, Quality,
    QualityModel, QualityProfile, ReleaseInfo, RemoteGame, Revision,
};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("fixed timestamp should be valid")
}

/// Every quality allowed, cutoff on Retail.
pub fn standard_profile() -> QualityProfile {
    let mut profile = QualityProfile::new("Standard");
    profile.cutoff = Quality::Retail;
    profile
}

pub fn game() -> Game {
    Game::new("Disco Elysium", standard_profile())
}

pub fn game_with_file(quality: QualityModel) -> Game {
    let mut game = game();
    game.game_file = Some(GameFile::new(quality));
    game
}

pub fn release(title: &str, protocol: DownloadProtocol, age_hours: i64) -> ReleaseInfo {
    ReleaseInfo::new(title, protocol, fixed_now() - Duration::hours(age_hours))
}

pub fn parsed(quality: Quality) -> ParsedGameInfo {
    ParsedGameInfo::new("Disco Elysium", QualityModel::new(quality))
}

pub fn parsed_revision(quality: Quality, version: u32, is_repack: bool) -> ParsedGameInfo {
    ParsedGameInfo::new(
        "Disco Elysium",
        QualityModel::with_revision(quality, Revision::new(version, 0, is_repack)),
    )
}

/// A usenet release of `quality` mapped onto `game`, published a day ago.
pub fn remote(game: &Game, quality: Quality) -> RemoteGame {
    RemoteGame::new(
        release("Disco.Elysium-GROUP", DownloadProtocol::Usenet, 24),
        Some(parsed(quality)),
        Some(game.clone()),
        Vec::new(),
    )
}

pub fn grabbed(game: &Game, quality: Quality, hours_ago: i64) -> GameHistory {
    GameHistory {
        game_id: game.id,
        event_type: HistoryEventType::Grabbed,
        source_title: "Disco.Elysium-OLD".into(),
        quality: QualityModel::new(quality),
        custom_formats: Vec::new(),
        game_version: None,
        download_id: None,
        date: fixed_now() - Duration::hours(hours_ago),
    }
}
