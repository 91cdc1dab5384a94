use std::fmt;

/// Display name of the current user's row
pub const YOU: &str = "You";

pub const SCORING_RULES: [&str; 4] = [
    "Daily mood tracking (+5 points)",
    "Chat sessions (+3 points)",
    "Maintaining streaks (+2 bonus points/day)",
    "Completing wellness activities (+10 points)",
];

pub const PRIVACY_NOTICE: &str = "Only anonymized wellness metrics are shared. Your personal conversations and specific mood details remain completely private.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingPeriod {
    #[default]
    Weekly,
    Monthly,
    All,
}

impl RankingPeriod {
    pub const ALL: [RankingPeriod; 3] = [
        RankingPeriod::Weekly,
        RankingPeriod::Monthly,
        RankingPeriod::All,
    ];

    pub fn next(self) -> Self {
        match self {
            RankingPeriod::Weekly => RankingPeriod::Monthly,
            RankingPeriod::Monthly => RankingPeriod::All,
            RankingPeriod::All => RankingPeriod::Weekly,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            RankingPeriod::Weekly => RankingPeriod::All,
            RankingPeriod::Monthly => RankingPeriod::Weekly,
            RankingPeriod::All => RankingPeriod::Monthly,
        }
    }
}

impl fmt::Display for RankingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RankingPeriod::Weekly => "Weekly",
            RankingPeriod::Monthly => "Monthly",
            RankingPeriod::All => "All",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub username: &'static str,
    pub score: u32,
    pub streak: u32,
    pub entries: u32,
    pub rank: u32,
}

impl LeaderboardEntry {
    pub fn is_you(&self) -> bool {
        self.username == YOU
    }
}

const DEMO_ENTRIES: [LeaderboardEntry; 8] = [
    LeaderboardEntry { username: "WellnessWarrior", score: 95, streak: 14, entries: 28, rank: 1 },
    LeaderboardEntry { username: "MindfulMaven", score: 89, streak: 10, entries: 25, rank: 2 },
    LeaderboardEntry { username: "SereneSeeker", score: 87, streak: 8, entries: 24, rank: 3 },
    LeaderboardEntry { username: YOU, score: 78, streak: 7, entries: 12, rank: 4 },
    LeaderboardEntry { username: "CalmCrusader", score: 76, streak: 5, entries: 20, rank: 5 },
    LeaderboardEntry { username: "PeacefulPioneer", score: 74, streak: 12, entries: 18, rank: 6 },
    LeaderboardEntry { username: "HappyHunter", score: 72, streak: 3, entries: 16, rank: 7 },
    LeaderboardEntry { username: "ZenZealot", score: 70, streak: 9, entries: 15, rank: 8 },
];

/// Static community table; the same rows back every period tab
#[derive(Debug, Clone)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    period: RankingPeriod,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(DEMO_ENTRIES.to_vec())
    }
}

impl Leaderboard {
    pub fn new(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by_key(|e| e.rank);
        Self {
            entries,
            period: RankingPeriod::default(),
        }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn period(&self) -> RankingPeriod {
        self.period
    }

    pub fn next_period(&mut self) {
        self.period = self.period.next();
    }

    pub fn prev_period(&mut self) {
        self.period = self.period.prev();
    }

    pub fn you(&self) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.is_you())
    }
}

/// Medal for the top three ranks
pub fn medal(rank: u32) -> Option<&'static str> {
    match rank {
        1 => Some("🥇"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}
