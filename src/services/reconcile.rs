use crate::model::outcome::{FetchOutcome, MovieFields};
use crate::model::table::Table;
use crate::services::normalize;

/// Merges a resolved lookup into row `idx` (0-based). Remote values win on
/// the enrichable fields when they clean to something non-empty; an
/// explicitly supplied year is never overwritten. A logical miss only
/// annotates an empty rating cell.
pub fn merge(table: &mut Table, idx: usize, outcome: &FetchOutcome, had_explicit_year: bool) {
    match outcome {
        FetchOutcome::Found(fields) => apply_fields(table, idx, fields, had_explicit_year),
        FetchOutcome::NotFound(reason) => {
            set_diagnostic(table, idx, &format!("NOT FOUND: {reason}"));
        }
    }

    stamp_row_number(table, idx);
}

/// Row-level record of an exhausted fetch. The batch moves on; this row
/// keeps its place in the output with the failure visible in its rating.
pub fn record_error(table: &mut Table, idx: usize, err: &str) {
    set_diagnostic(table, idx, &format!("ERROR: {err}"));
    stamp_row_number(table, idx);
}

fn apply_fields(table: &mut Table, idx: usize, fields: &MovieFields, had_explicit_year: bool) {
    if !had_explicit_year {
        overwrite_if_value(table, idx, "Year", &fields.year);
    }
    overwrite_if_value(table, idx, "Genre", &fields.genre);
    overwrite_if_value(table, idx, "imdbRating", &fields.imdb_rating);
    overwrite_if_value(table, idx, "Actors (Main)", &fields.actors);
    overwrite_if_value(table, idx, "BoxOffice", &fields.box_office);
}

fn overwrite_if_value(table: &mut Table, idx: usize, column: &str, remote: &str) {
    let cleaned = normalize::clean(remote);
    if !cleaned.is_empty() {
        table.set(idx, column, cleaned);
    }
}

// A failure note never clobbers a previously earned rating.
fn set_diagnostic(table: &mut Table, idx: usize, message: &str) {
    if table.get(idx, "imdbRating").is_empty() {
        table.set(idx, "imdbRating", message);
    }
}

fn stamp_row_number(table: &mut Table, idx: usize) {
    table.set(idx, "Row", (idx + 1).to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::Table;

    fn one_row_table() -> Table {
        let mut t = Table::new(vec!["Title".into()], vec![vec!["Inception".into()]]);
        t.ensure_required_columns();
        t
    }

    fn found(year: &str, genre: &str, rating: &str) -> FetchOutcome {
        FetchOutcome::Found(MovieFields {
            year: year.into(),
            genre: genre.into(),
            imdb_rating: rating.into(),
            actors: "Leonardo DiCaprio".into(),
            box_office: "$292,587,330".into(),
        })
    }

    #[test]
    fn success_fills_enrichable_fields_and_row_number() {
        let mut t = one_row_table();
        merge(&mut t, 0, &found("2010", "Sci-Fi", "8.8"), false);

        assert_eq!(t.get(0, "Year"), "2010");
        assert_eq!(t.get(0, "Genre"), "Sci-Fi");
        assert_eq!(t.get(0, "imdbRating"), "8.8");
        assert_eq!(t.get(0, "Actors (Main)"), "Leonardo DiCaprio");
        assert_eq!(t.get(0, "BoxOffice"), "$292,587,330");
        assert_eq!(t.get(0, "Row"), "1");
    }

    #[test]
    fn explicit_year_is_never_overwritten() {
        let mut t = one_row_table();
        t.set(0, "Year", "1999");
        merge(&mut t, 0, &found("2000", "Drama", "7.0"), true);

        assert_eq!(t.get(0, "Year"), "1999");
        assert_eq!(t.get(0, "Genre"), "Drama");
    }

    #[test]
    fn empty_remote_values_leave_local_cells_alone() {
        let mut t = one_row_table();
        t.set(0, "Genre", "Thriller");
        merge(&mut t, 0, &found("2010", "  ", ""), false);

        assert_eq!(t.get(0, "Genre"), "Thriller");
        assert_eq!(t.get(0, "imdbRating"), "");
    }

    #[test]
    fn not_found_annotates_only_an_empty_rating() {
        let mut t = one_row_table();
        merge(&mut t, 0, &FetchOutcome::NotFound("Movie not found!".into()), false);
        assert_eq!(t.get(0, "imdbRating"), "NOT FOUND: Movie not found!");

        // a later logical miss must not clobber a good rating
        t.set(0, "imdbRating", "8.8");
        merge(&mut t, 0, &FetchOutcome::NotFound("Movie not found!".into()), false);
        assert_eq!(t.get(0, "imdbRating"), "8.8");
    }

    #[test]
    fn record_error_annotates_and_stamps_row() {
        let mut t = one_row_table();
        record_error(&mut t, 0, "OMDb request failed after 3 attempts: timeout");
        assert_eq!(
            t.get(0, "imdbRating"),
            "ERROR: OMDb request failed after 3 attempts: timeout"
        );
        assert_eq!(t.get(0, "Row"), "1");

        t.set(0, "imdbRating", "7.5");
        record_error(&mut t, 0, "later failure");
        assert_eq!(t.get(0, "imdbRating"), "7.5");
    }
}
