use crate::error::ModelError;
use crate::strength::{LeagueAverages, TeamStrength};

/// Expected goals for one side of a fixture: league base rate scaled by the
/// attacking side's attack and the defending side's defense, per venue.
///
/// `eg_home = avg_goals_home · home.attack_home · away.defense_away`
/// `eg_away = avg_goals_away · away.attack_away · home.defense_home`
///
/// The products must come out strictly positive because they feed the Poisson
/// rate parameter; a degenerate league (zero averages) is reported instead of
/// propagated.
pub fn expected_goals(
    averages: &LeagueAverages,
    home: &TeamStrength,
    away: &TeamStrength,
) -> Result<(f64, f64), ModelError> {
    let eg_home = averages.avg_goals_home * home.attack_home * away.defense_away;
    let eg_away = averages.avg_goals_away * away.attack_away * home.defense_home;

    if !(eg_home > 0.0) {
        return Err(ModelError::NonPositiveRate(eg_home));
    }
    if !(eg_away > 0.0) {
        return Err(ModelError::NonPositiveRate(eg_away));
    }
    Ok((eg_home, eg_away))
}
