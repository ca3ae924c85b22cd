use url::form_urlencoded;

/// The active filter parameters of a listing session.
///
/// Two `FilterSet`s comparing equal means the session is unchanged; any
/// difference requires the grid to reset and refetch from page 1.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    pub gender: Option<String>,
    pub country: Option<String>,
    pub age: Option<String>,
    pub body_type: Option<String>,
    pub ethnicity: Option<String>,
    pub tags: Vec<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The filter parameters as `(key, value)` pairs in a fixed field
    /// order. Tags expand to one `tag` pair each, in their given order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(gender) = self.gender.as_deref() {
            pairs.push(("gender", gender));
        }
        if let Some(country) = self.country.as_deref() {
            pairs.push(("country", country));
        }
        if let Some(age) = self.age.as_deref() {
            pairs.push(("age", age));
        }
        if let Some(body) = self.body_type.as_deref() {
            pairs.push(("body", body));
        }
        if let Some(ethnicity) = self.ethnicity.as_deref() {
            pairs.push(("ethnicity", ethnicity));
        }
        for tag in &self.tags {
            pairs.push(("tag", tag));
        }
        pairs
    }

    /// Deterministic token identifying these filters, independent of field
    /// order. Used as part of response cache keys.
    pub fn cache_token(&self) -> String {
        let mut pairs = self.query_pairs();
        pairs.sort_unstable();
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    pub fn is_empty(&self) -> bool {
        self.gender.is_none()
            && self.country.is_none()
            && self.age.is_none()
            && self.body_type.is_none()
            && self.ethnicity.is_none()
            && self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::FilterSet;

    #[test]
    fn empty_filters_encode_to_nothing() {
        let filters = FilterSet::new();
        assert!(filters.is_empty());
        assert!(filters.query_pairs().is_empty());
        assert_eq!(filters.cache_token(), "");
    }

    #[test]
    fn query_pairs_keep_field_order_and_expand_tags() {
        let filters = FilterSet {
            gender: Some("female".to_string()),
            country: Some("us".to_string()),
            tags: vec!["hd".to_string(), "new".to_string()],
            ..FilterSet::default()
        };
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("gender", "female"),
                ("country", "us"),
                ("tag", "hd"),
                ("tag", "new"),
            ]
        );
    }

    #[test]
    fn cache_token_is_sorted_and_escaped() {
        let filters = FilterSet {
            gender: Some("female".to_string()),
            age: Some("18 25".to_string()),
            ..FilterSet::default()
        };
        assert_eq!(filters.cache_token(), "age=18+25&gender=female");
    }
}
