use mongodb::bson::{Bson, Document, doc};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Paging and sorting parameters shared by every list endpoint
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Zero-based page number
    #[serde(default)]
    pub page: u64,
    /// Page size, 1 to 100
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
    /// `field:asc` or `field:desc`, e.g. `createdAt:desc`
    #[validate(custom(function = "validate_sort"))]
    pub sort: Option<String>,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            limit: DEFAULT_LIMIT,
            sort: None,
        }
    }
}

impl ListQuery {
    pub fn skip(&self) -> u64 {
        self.page.saturating_mul(self.limit.clamp(1, MAX_LIMIT) as u64)
    }

    /// Resolve into driver options, sorting by `default_field` descending when
    /// no `sort` was given.
    pub fn find_spec(&self, default_field: &str) -> FindSpec {
        let sort = self
            .sort
            .as_deref()
            .and_then(SortSpec::parse)
            .unwrap_or_else(|| SortSpec::descending(default_field));

        FindSpec {
            sort: sort.to_document(),
            skip: self.skip(),
            limit: self.limit.clamp(1, MAX_LIMIT),
        }
    }
}

/// A single `field:direction` sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub ascending: bool,
}

impl SortSpec {
    pub fn descending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            ascending: false,
        }
    }

    /// Parse `field[:dir]`. Only `asc` sorts ascending; any other direction
    /// sorts descending. Returns `None` for an empty field.
    pub fn parse(raw: &str) -> Option<Self> {
        let (field, direction) = raw.split_once(':').unwrap_or((raw, ""));
        let field = field.trim();
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            ascending: direction.trim().eq_ignore_ascii_case("asc"),
        })
    }

    pub fn to_document(&self) -> Document {
        let mut sort = Document::new();
        sort.insert(self.field.clone(), if self.ascending { 1 } else { -1 });
        sort
    }
}

fn validate_sort(raw: &str) -> Result<(), ValidationError> {
    let field = raw.split_once(':').map_or(raw, |(field, _)| field).trim();
    let valid = !field.is_empty()
        && !field.starts_with('$')
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("sort").with_message("sort must look like field:asc or field:desc".into()))
    }
}

/// Options for one `find` call
#[derive(Debug, Clone, PartialEq)]
pub struct FindSpec {
    pub sort: Document,
    pub skip: u64,
    pub limit: i64,
}

impl FindSpec {
    /// First document ordered by `field` descending
    pub fn latest_by(field: &str) -> Self {
        Self {
            sort: SortSpec::descending(field).to_document(),
            skip: 0,
            limit: 1,
        }
    }
}

/// `{"$regex": <escaped>, "$options": "i"}`: literal, case-insensitive substring match
pub fn contains_ignore_case(value: &str) -> Bson {
    Bson::Document(doc! { "$regex": regex::escape(value), "$options": "i" })
}

/// `{"$or": [{field: contains_ignore_case(search)}, ..]}` across `fields`
pub fn text_search(search: &str, fields: &[&str]) -> Document {
    let clauses: Vec<Document> = fields
        .iter()
        .map(|field| {
            let mut clause = Document::new();
            clause.insert(*field, contains_ignore_case(search));
            clause
        })
        .collect();

    doc! { "$or": clauses }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parse() {
        assert_eq!(
            SortSpec::parse("firstName:asc"),
            Some(SortSpec {
                field: "firstName".into(),
                ascending: true
            })
        );
        assert!(!SortSpec::parse("date:desc").unwrap().ascending);
        assert!(!SortSpec::parse("date").unwrap().ascending);
        assert!(!SortSpec::parse("date:sideways").unwrap().ascending);
        assert_eq!(SortSpec::parse(":asc"), None);
    }

    #[test]
    fn test_find_spec_defaults() {
        let spec = ListQuery::default().find_spec("createdAt");
        assert_eq!(spec.sort, doc! { "createdAt": -1 });
        assert_eq!(spec.skip, 0);
        assert_eq!(spec.limit, 10);
    }

    #[test]
    fn test_find_spec_skip_is_page_times_limit() {
        let query = ListQuery {
            page: 3,
            limit: 25,
            sort: Some("name:asc".into()),
        };
        let spec = query.find_spec("createdAt");
        assert_eq!(spec.sort, doc! { "name": 1 });
        assert_eq!(spec.skip, 75);
        assert_eq!(spec.limit, 25);
    }

    #[test]
    fn test_limit_bounds_are_validated() {
        let with_limit = |limit| ListQuery {
            limit,
            ..Default::default()
        };
        assert!(with_limit(0).validate().is_err());
        assert!(with_limit(101).validate().is_err());
        assert!(with_limit(1).validate().is_ok());
        assert!(with_limit(100).validate().is_ok());
    }

    #[test]
    fn test_sort_operator_injection_is_rejected() {
        let query = ListQuery {
            sort: Some("$where:asc".into()),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_text_search_escapes_input() {
        let filter = text_search("a.b(c", &["firstName", "lastName"]);
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 2);

        let first = clauses[0].as_document().unwrap();
        let pattern = first.get_document("firstName").unwrap();
        assert_eq!(pattern.get_str("$regex").unwrap(), r"a\.b\(c");
        assert_eq!(pattern.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_latest_by() {
        let spec = FindSpec::latest_by("orderNumber");
        assert_eq!(spec.sort, doc! { "orderNumber": -1 });
        assert_eq!(spec.limit, 1);
    }
}
