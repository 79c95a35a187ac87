use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::player::{DRAFTABLE_POSITIONS, FREE_AGENT_OWNER};
use crate::database::models::{Player, PlayerStats, Standing, Week};
use crate::database::query_builder::{Direction, QueryBuilder};

/// Week used whenever the schedule cannot answer
pub const DEFAULT_WEEK: i64 = 1;

const STANDINGS_QUERY: &str = r#"
    SELECT
        CAST(s.Team_ID AS TEXT) AS id,
        COALESCE(u.team_name, u.username) AS team_name,
        u.team AS team_field,
        COALESCE(s.Division, 'A') AS division,
        CAST(COALESCE(s.Wins, 0) AS INTEGER) AS wins,
        CAST(COALESCE(s.Losses, 0) AS INTEGER) AS losses,
        CAST(COALESCE(s.Ties, 0) AS INTEGER) AS ties,
        CAST(COALESCE(s.PF, 0.0) AS REAL) AS points_for,
        CAST(COALESCE(s.PA, 0.0) AS REAL) AS points_against,
        CAST(COALESCE(s.Wins, 0) AS INTEGER) AS rank
    FROM Standings s
    LEFT JOIN user u ON CAST(s.Team_ID AS TEXT) = u.team
    ORDER BY wins DESC, points_for DESC
"#;

const PLAYER_STATS_QUERY: &str = r#"
    SELECT
        CAST(week AS INTEGER) AS week,
        CAST(COALESCE(passing_yards, 0) AS INTEGER) AS passing_yards,
        CAST(COALESCE(passing_tds, 0) AS INTEGER) AS passing_tds,
        CAST(COALESCE(rushing_yards, 0) AS INTEGER) AS rushing_yards,
        CAST(COALESCE(rushing_tds, 0) AS INTEGER) AS rushing_tds,
        CAST(COALESCE(receptions, 0) AS INTEGER) AS receptions,
        CAST(COALESCE(receiving_yards, 0) AS INTEGER) AS receiving_yards,
        CAST(COALESCE(receiving_tds, 0) AS INTEGER) AS receiving_tds,
        CAST(COALESCE(fantasy_points, 0.0) AS REAL) AS fantasy_points
    FROM player_stats
    WHERE player_id = ? AND week = ?
"#;

/// Where the current week came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekSource {
    /// No `Weeks` table at all
    MissingTable,
    /// Resolved against the schedule (including pre/post season clamping)
    Schedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeek {
    pub current_week: i64,
    #[serde(skip)]
    pub source: WeekSource,
}

/// Optional filters for the free-agent pool
#[derive(Debug, Clone, Default)]
pub struct PlayerFilter {
    pub position: Option<String>,
    pub team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatsReport {
    pub player: Player,
    pub stats: PlayerStats,
}

/// Read-side queries over standings, the schedule and players
#[derive(Clone)]
pub struct LeagueService {
    pool: SqlitePool,
}

impl LeagueService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Wins descending, then points-for descending
    pub async fn standings(&self) -> Result<Vec<Standing>, DatabaseError> {
        let standings = sqlx::query_as::<_, Standing>(STANDINGS_QUERY)
            .fetch_all(&self.pool)
            .await?;
        Ok(standings)
    }

    pub async fn current_week(&self, today: NaiveDate) -> Result<CurrentWeek, DatabaseError> {
        if !DatabaseManager::table_exists(&self.pool, "Weeks").await? {
            return Ok(CurrentWeek {
                current_week: DEFAULT_WEEK,
                source: WeekSource::MissingTable,
            });
        }

        let weeks = sqlx::query_as::<_, Week>(
            r#"SELECT CAST(week AS INTEGER) AS week, CAST(start AS TEXT) AS start, CAST("end" AS TEXT) AS "end" FROM Weeks ORDER BY week"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(CurrentWeek {
            current_week: resolve_current_week(&weeks, today),
            source: WeekSource::Schedule,
        })
    }

    /// Free agents in draftable positions
    pub async fn available_players(&self, filter: &PlayerFilter) -> Result<Vec<Player>, DatabaseError> {
        QueryBuilder::<Player>::new("Players")?
            .where_eq("owner_ID", FREE_AGENT_OWNER)
            .where_in("position", DRAFTABLE_POSITIONS.iter().copied())
            .where_eq_opt("position", filter.position.as_deref())
            .where_eq_opt("team_name", filter.team.as_deref())
            .order_by("player_name", Direction::Asc)
            .select_all(&self.pool)
            .await
    }

    pub async fn find_player(&self, player_id: &str) -> Result<Option<Player>, DatabaseError> {
        QueryBuilder::<Player>::new("Players")?
            .where_eq("player_ID", player_id)
            .select_optional(&self.pool)
            .await
    }

    /// A week with no recorded stats reports zeroes
    pub async fn player_stats(&self, player_id: &str, week: i64) -> Result<PlayerStatsReport, DatabaseError> {
        let player = self
            .find_player(player_id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Player '{}' not found", player_id)))?;

        let stats = sqlx::query_as::<_, PlayerStats>(PLAYER_STATS_QUERY)
            .bind(player_id)
            .bind(week)
            .fetch_optional(&self.pool)
            .await?
            .unwrap_or(PlayerStats {
                week,
                ..PlayerStats::default()
            });

        Ok(PlayerStatsReport { player, stats })
    }
}

/// Pick the week whose range holds `today`. Before the first week resolves
/// to week 1, after the last week to the last week, and an empty schedule
/// to week 1. `weeks` must be ordered by week number.
pub fn resolve_current_week(weeks: &[Week], today: NaiveDate) -> i64 {
    if let Some(week) = weeks.iter().find(|w| w.contains(today)) {
        return week.week;
    }

    let (Some(first), Some(last)) = (weeks.first(), weeks.last()) else {
        return DEFAULT_WEEK;
    };

    let day = today.format("%Y-%m-%d").to_string();
    if day.as_str() < first.start.as_str() {
        DEFAULT_WEEK
    } else if day.as_str() > last.end.as_str() {
        last.week
    } else {
        // Gap between two weeks
        DEFAULT_WEEK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn week(n: i64, start: &str, end: &str) -> Week {
        Week {
            week: n,
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn schedule() -> Vec<Week> {
        vec![
            week(1, "2025-09-04", "2025-09-10"),
            week(2, "2025-09-11", "2025-09-17"),
            week(3, "2025-09-18", "2025-09-24"),
        ]
    }

    #[test]
    fn resolves_week_inside_range() {
        assert_eq!(resolve_current_week(&schedule(), date("2025-09-04")), 1);
        assert_eq!(resolve_current_week(&schedule(), date("2025-09-17")), 2);
        assert_eq!(resolve_current_week(&schedule(), date("2025-09-20")), 3);
    }

    #[test]
    fn clamps_outside_the_season() {
        assert_eq!(resolve_current_week(&schedule(), date("2025-08-01")), 1);
        assert_eq!(resolve_current_week(&schedule(), date("2026-01-15")), 3);
        assert_eq!(resolve_current_week(&[], date("2025-09-20")), 1);
    }

    #[tokio::test]
    async fn missing_weeks_table_defaults_to_week_one() {
        let pool = testing::pool_with_tables(&["user"]).await;
        let current = LeagueService::new(pool).current_week(date("2025-09-20")).await.unwrap();
        assert_eq!(current.current_week, 1);
        assert_eq!(current.source, WeekSource::MissingTable);
    }

    #[tokio::test]
    async fn current_week_reads_schedule() {
        let pool = testing::seeded_league().await;
        let current = LeagueService::new(pool).current_week(date("2025-09-12")).await.unwrap();
        assert_eq!(current.current_week, 2);
        assert_eq!(current.source, WeekSource::Schedule);
    }

    #[tokio::test]
    async fn standings_order_by_wins_then_points_for() {
        let pool = testing::seeded_league().await;
        let standings = LeagueService::new(pool).standings().await.unwrap();

        let ids: Vec<&str> = standings.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3", "4"]);
        assert_eq!(standings[0].team_name.as_deref(), Some("Gridiron Gang"));
        // Team 4 has no owner row and no division
        assert_eq!(standings[3].team_name, None);
        assert_eq!(standings[3].division, "A");
        for s in &standings {
            assert_eq!(s.rank, s.wins);
        }
    }

    #[tokio::test]
    async fn available_players_are_draftable_free_agents() {
        let service = LeagueService::new(testing::seeded_league().await);

        let all = service.available_players(&PlayerFilter::default()).await.unwrap();
        assert!(all.iter().all(|p| p.is_free_agent()));
        assert!(all.iter().all(|p| DRAFTABLE_POSITIONS.contains(&p.position.as_str())));
        assert_eq!(all.len(), 3);

        let qbs = service
            .available_players(&PlayerFilter {
                position: Some("QB".to_string()),
                team: None,
            })
            .await
            .unwrap();
        assert_eq!(qbs.len(), 1);
        assert_eq!(qbs[0].name, "Free Agent QB");
    }

    #[tokio::test]
    async fn player_stats_default_to_zero_for_quiet_weeks() {
        let service = LeagueService::new(testing::seeded_league().await);

        let report = service.player_stats("p1", 1).await.unwrap();
        assert_eq!(report.stats.passing_yards, 310);

        let quiet = service.player_stats("p1", 9).await.unwrap();
        assert_eq!(quiet.stats, PlayerStats { week: 9, ..PlayerStats::default() });

        assert!(matches!(service.player_stats("missing", 1).await, Err(DatabaseError::NotFound(_))));
    }
}
