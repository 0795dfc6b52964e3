#[derive(Debug, Clone)]
pub struct RankingSettings {
    /// Base scores are rounded to this many decimals before bucketing.
    pub score_decimals: u32,
    /// Sub-score step for players separated out of a base-score bucket.
    pub bucket_increment: f64,
    /// Sub-score step for players separated inside a nested group pass.
    pub nested_increment: f64,
    /// Maximum recursion depth for 3+-player group resolution.
    pub group_recursion_ceiling: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            score_decimals: 3,
            bucket_increment: 0.0001,
            nested_increment: 0.00001,
            group_recursion_ceiling: 4,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub ranking: RankingSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn database_path() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| "chess_club.db".to_string())
}
