//! CSV export of the bracket for offline admin work.

use crate::models::{TeamEntryId, Tournament};

/// Render every match as one CSV row, ordered by round then match number.
pub fn bracket_to_csv(tournament: &Tournament) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        wtr.write_record([
            "round",
            "match",
            "team_a",
            "team_b",
            "score_a",
            "score_b",
            "penalties_a",
            "penalties_b",
            "winner",
            "phase",
        ])?;

        let mut ordered: Vec<_> = tournament.matches.iter().collect();
        ordered.sort_by_key(|m| (m.round, m.match_number));

        let name = |id: Option<TeamEntryId>| -> String {
            id.and_then(|id| tournament.team_name(id))
                .unwrap_or("-")
                .to_string()
        };
        let num = |v: Option<u32>| v.map(|v| v.to_string()).unwrap_or_default();

        for m in ordered {
            wtr.write_record([
                m.round.to_string(),
                m.match_number.to_string(),
                name(m.team_a),
                name(m.team_b),
                num(m.score_a),
                num(m.score_b),
                num(m.penalties_a),
                num(m.penalties_b),
                name(m.winner_team_id),
                m.phase().as_str().to_string(),
            ])?;
        }
        wtr.flush()?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
