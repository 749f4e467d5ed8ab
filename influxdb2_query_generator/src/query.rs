use serde::Serialize;

/// An HTTP request ready to be replayed by the benchmark runner.
///
/// A freshly allocated query has every field empty. Backends fill it in exactly once per
/// generated query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub human_label: String,
    pub human_description: String,
    pub method: String,
    pub path: String,
    pub raw_query: String,
    pub body: String,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A query tagged with its position in the generated corpus.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NumberedQuery<'a> {
    pub id: u64,
    #[serde(flatten)]
    pub query: &'a Query,
}
