//! Per-request modifiers: field selection, pagination and free-form filters.
//!
//! Endpoints that do not support a given modifier simply ignore the matching
//! query parameter, so the same `RequestOptions` can be applied uniformly.

/// Offset pagination (`page`, `per_page`, `include_totals`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub include_totals: Option<bool>,
}

/// Checkpoint pagination (`from`, `take`) for endpoints that page by cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkpoint {
    pub from: Option<String>,
    pub take: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub fields: Option<Vec<String>>,
    pub include_fields: Option<bool>,
    pub pagination: Option<Pagination>,
    pub checkpoint: Option<Checkpoint>,
    /// Extra query parameters, sent in insertion order after the known ones.
    pub filters: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields<I, S>(mut self, fields: I, include: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self.include_fields = Some(include);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_checkpoint(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Adds a filter; a repeated key replaces the earlier value in place.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.filters.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.filters.push((key, value)),
        }
        self
    }

    /// Query pairs in wire order: fields, include_fields, page, per_page,
    /// include_totals, from, take, then filters.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(fields) = self.fields.as_ref().filter(|f| !f.is_empty()) {
            pairs.push(("fields".to_string(), fields.join(",")));
            if let Some(include) = self.include_fields {
                pairs.push(("include_fields".to_string(), include.to_string()));
            }
        }

        if let Some(pagination) = &self.pagination {
            if let Some(page) = pagination.page {
                pairs.push(("page".to_string(), page.to_string()));
            }
            if let Some(per_page) = pagination.per_page {
                pairs.push(("per_page".to_string(), per_page.to_string()));
            }
            if let Some(include_totals) = pagination.include_totals {
                pairs.push(("include_totals".to_string(), include_totals.to_string()));
            }
        }

        if let Some(checkpoint) = &self.checkpoint {
            if let Some(from) = &checkpoint.from {
                pairs.push(("from".to_string(), from.clone()));
            }
            if let Some(take) = checkpoint.take {
                pairs.push(("take".to_string(), take.to_string()));
            }
        }

        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}
