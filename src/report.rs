use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Everything the digest shows for one flagged fixture.
#[derive(Debug, Clone)]
pub struct BetSuggestion {
    /// `Home vs Away`.
    pub fixture_label: String,
    /// Raw kickoff timestamp; formatted for humans at digest time.
    pub kickoff: String,
    pub eg_home: f64,
    pub eg_away: f64,
    /// Ordered recommendation lines; empty means the fixture is not listed.
    pub notes: Vec<String>,
}

/// Per-competition slice of the digest, in processing order.
#[derive(Debug, Clone)]
pub struct LeagueSection {
    pub league_label: String,
    pub suggestions: Vec<BetSuggestion>,
}

/// Assembles the Telegram digest. Returns `None` when no fixture anywhere
/// produced a suggestion; the caller then skips delivery entirely.
pub fn build_digest(
    sections: &[LeagueSection],
    lookahead_days: u32,
    today: NaiveDate,
) -> Option<String> {
    let total: usize = sections
        .iter()
        .flat_map(|s| &s.suggestions)
        .filter(|s| !s.notes.is_empty())
        .count();
    if total == 0 {
        return None;
    }

    let until = today + chrono::Duration::days(lookahead_days as i64);
    let mut lines = vec![format!(
        "📊 *ANALYSIS FOR THE NEXT {lookahead_days} DAYS* (until {})",
        until.format("%d/%m")
    )];

    for section in sections {
        let flagged: Vec<&BetSuggestion> = section
            .suggestions
            .iter()
            .filter(|s| !s.notes.is_empty())
            .collect();
        if flagged.is_empty() {
            continue;
        }

        lines.push(String::new());
        lines.push(format!("--- 🏆 {} ---", section.league_label));
        for s in flagged {
            lines.push(format!(
                "⚽️ *{}* ({})",
                s.fixture_label,
                format_kickoff(&s.kickoff)
            ));
            lines.push(format!(
                "EG Home: {:.2} | EG Away: {:.2}",
                s.eg_home, s.eg_away
            ));
            for note in &s.notes {
                lines.push(format!("  - {note}"));
            }
            lines.push(String::new());
        }
    }

    lines.push(format!("✅ *{total} value analyses found!*"));
    lines.push("Remember: bet responsibly.".to_string());
    Some(lines.join("\n"))
}

/// Human kickoff time. Provider timestamps are RFC 3339; a few fallbacks
/// cover feeds that drop the offset, and anything unparseable passes through
/// untouched rather than vanishing.
pub fn format_kickoff(raw: &str) -> String {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return "TBD".to_string();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(cleaned) {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned, fmt) {
            return dt.format("%d/%m/%Y %H:%M").to_string();
        }
    }
    cleaned.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(label: &str, notes: &[&str]) -> BetSuggestion {
        BetSuggestion {
            fixture_label: label.to_string(),
            kickoff: "2024-08-17T14:00:00+00:00".to_string(),
            eg_home: 1.8,
            eg_away: 0.9,
            notes: notes.iter().map(|n| n.to_string()).collect(),
        }
    }

    #[test]
    fn empty_sections_produce_no_digest() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 10).unwrap();
        assert!(build_digest(&[], 15, today).is_none());

        let silent = LeagueSection {
            league_label: "Premier League".to_string(),
            suggestions: vec![suggestion("A vs B", &[])],
        };
        assert!(build_digest(&[silent], 15, today).is_none());
    }

    #[test]
    fn digest_lists_leagues_fixtures_and_counts() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 10).unwrap();
        let sections = vec![
            LeagueSection {
                league_label: "Premier League".to_string(),
                suggestions: vec![
                    suggestion("Arsenal vs Chelsea", &["🎯 High probability: Over"]),
                    suggestion("Quiet vs Match", &[]),
                ],
            },
            LeagueSection {
                league_label: "La Liga".to_string(),
                suggestions: vec![suggestion(
                    "Betis vs Girona",
                    &["⭐ Value: Under", "🎯 High probability: Under"],
                )],
            },
        ];

        let digest = build_digest(&sections, 15, today).unwrap();
        assert!(digest.contains("NEXT 15 DAYS"));
        assert!(digest.contains("(until 25/08)"));
        assert!(digest.contains("--- 🏆 Premier League ---"));
        assert!(digest.contains("--- 🏆 La Liga ---"));
        assert!(digest.contains("*Arsenal vs Chelsea* (17/08/2024 14:00)"));
        assert!(digest.contains("EG Home: 1.80 | EG Away: 0.90"));
        assert!(digest.contains("✅ *2 value analyses found!*"));
        assert!(!digest.contains("Quiet vs Match"));
    }

    #[test]
    fn kickoff_formatting_handles_variants() {
        assert_eq!(
            format_kickoff("2024-08-17T14:00:00+00:00"),
            "17/08/2024 14:00"
        );
        assert_eq!(format_kickoff("2024-08-17T14:00:00Z"), "17/08/2024 14:00");
        assert_eq!(format_kickoff("2024-08-17 14:00"), "17/08/2024 14:00");
        assert_eq!(format_kickoff(""), "TBD");
        assert_eq!(format_kickoff("soon"), "soon");
    }
}
