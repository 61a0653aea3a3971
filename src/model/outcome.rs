use serde_json::Value;

/// The enrichable fields of a successful OMDb response, raw as returned
/// (cell-level cleaning happens at reconciliation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFields {
    pub year: String,
    pub genre: String,
    pub imdb_rating: String,
    pub actors: String,
    pub box_office: String,
}

/// Logical reading of a raw cached response body. Transport failures never
/// reach this type; they stay on the client's error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(MovieFields),
    NotFound(String),
}

impl FetchOutcome {
    /// OMDb signals success with `"Response": "True"`; everything else,
    /// including bodies that are not objects at all, is a logical miss.
    pub fn from_value(value: &Value) -> FetchOutcome {
        let is_found = value
            .get("Response")
            .and_then(|v| v.as_str())
            .map(|r| r == "True")
            .unwrap_or(false);

        if !is_found {
            let reason = value
                .get("Error")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown")
                .to_string();
            return FetchOutcome::NotFound(reason);
        }

        let field = |name: &str| {
            value
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        FetchOutcome::Found(MovieFields {
            year: field("Year"),
            genre: field("Genre"),
            imdb_rating: field("imdbRating"),
            actors: field("Actors"),
            box_office: field("BoxOffice"),
        })
    }
}
