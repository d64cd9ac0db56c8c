use chrono::{Datelike, Utc};
use crud::{CrudResult, CrudService, FindSpec, ListQuery, Paged, Repository};
use mongodb::bson::{doc, oid::ObjectId};
use tracing::instrument;
use validator::Validate;

use crate::models::{CreateOrder, Order, OrderFilter, UpdateOrder};

const PREFIX: &str = "SO-";

/// Order CRUD on top of [`CrudService`], plus order number allocation.
///
/// Numbers are read-then-written with no lock. Two concurrent creates can
/// pick the same number; the unique index turns the second into a conflict.
pub struct OrderService<R> {
    crud: CrudService<Order, R>,
}

impl<R> Clone for OrderService<R> {
    fn clone(&self) -> Self {
        Self {
            crud: self.crud.clone(),
        }
    }
}

impl<R: Repository<Order>> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            crud: CrudService::new(repository),
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateOrder) -> CrudResult<Order> {
        input.validate()?;
        let order_number = self.allocate_number(Utc::now().year()).await?;
        tracing::debug!(%order_number, "allocated order number");
        self.crud.insert(Order::new(input, order_number)).await
    }

    pub async fn list(&self, filter: &OrderFilter, query: &ListQuery) -> CrudResult<Paged<Order>> {
        self.crud.list(filter, query).await
    }

    pub async fn get(&self, id: ObjectId) -> CrudResult<Order> {
        self.crud.get(id).await
    }

    pub async fn update(&self, id: ObjectId, update: UpdateOrder) -> CrudResult<Order> {
        self.crud.update(id, update).await
    }

    pub async fn delete(&self, id: ObjectId) -> CrudResult<()> {
        self.crud.delete(id).await
    }

    /// Next free number for `year`, based on the highest one already stored.
    pub async fn allocate_number(&self, year: i32) -> CrudResult<String> {
        let filter = doc! { "orderNumber": { "$regex": format!("^{PREFIX}{year}-") } };
        let latest = self
            .crud
            .repository()
            .find_many(filter, FindSpec::latest_by("orderNumber"))
            .await?;

        Ok(next_order_number(
            latest.first().map(|order| order.order_number.as_str()),
            year,
        ))
    }
}

/// `SO-<year>-<seq>` following `latest`.
///
/// The sequence restarts at 1 when there is no previous number or it does
/// not parse. It is zero-padded to at least three digits.
pub fn next_order_number(latest: Option<&str>, year: i32) -> String {
    let next = latest.and_then(sequence_of).map_or(1, |seq| seq + 1);
    format!("{PREFIX}{year}-{next:03}")
}

/// Leading digits after `SO-dddd-`
fn sequence_of(number: &str) -> Option<u64> {
    let rest = number.strip_prefix(PREFIX)?;
    let (year, suffix) = rest.split_at_checked(4)?;
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let suffix = suffix.strip_prefix('-')?;
    let end = suffix
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(suffix.len());
    suffix[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crud::{CrudError, MockRepository};
    use serde_json::json;

    fn create_input() -> CreateOrder {
        serde_json::from_value(json!({
            "customerId": "507f1f77bcf86cd799439011",
            "date": "2026-05-10T09:00:00Z",
            "status": "draft",
            "currency": "USD",
            "paymentStatus": "unpaid",
            "items": []
        }))
        .unwrap()
    }

    fn stored(number: &str) -> Order {
        Order::new(create_input(), number.to_string())
    }

    #[test]
    fn test_first_number_of_year() {
        assert_eq!(next_order_number(None, 2026), "SO-2026-001");
    }

    #[test]
    fn test_increments_latest() {
        assert_eq!(next_order_number(Some("SO-2026-007"), 2026), "SO-2026-008");
        assert_eq!(next_order_number(Some("SO-2026-099"), 2026), "SO-2026-100");
        assert_eq!(next_order_number(Some("SO-2026-999"), 2026), "SO-2026-1000");
    }

    #[test]
    fn test_unparseable_latest_restarts_at_one() {
        assert_eq!(next_order_number(Some("SO-2026-abc"), 2026), "SO-2026-001");
        assert_eq!(next_order_number(Some("SO-26-004"), 2026), "SO-2026-001");
        assert_eq!(next_order_number(Some("garbage"), 2026), "SO-2026-001");
    }

    #[test]
    fn test_trailing_text_after_sequence_is_ignored() {
        assert_eq!(next_order_number(Some("SO-2026-012-b"), 2026), "SO-2026-013");
    }

    #[tokio::test]
    async fn test_allocate_number_queries_latest_for_year() {
        let mut repo = MockRepository::<Order>::new();
        repo.expect_find_many()
            .withf(|filter, spec| {
                filter.get_document("orderNumber").ok()
                    == Some(&doc! { "$regex": "^SO-2026-" })
                    && *spec == FindSpec::latest_by("orderNumber")
            })
            .returning(|_, _| Ok(vec![stored("SO-2026-041")]));

        let service = OrderService::new(repo);
        assert_eq!(service.allocate_number(2026).await.unwrap(), "SO-2026-042");
    }

    #[tokio::test]
    async fn test_create_assigns_number_for_current_year() {
        let year = Utc::now().year();
        let mut repo = MockRepository::<Order>::new();
        repo.expect_find_many().returning(|_, _| Ok(vec![]));
        repo.expect_find_one().returning(|_| Ok(None));
        repo.expect_insert().returning(Ok);

        let order = OrderService::new(repo).create(create_input()).await.unwrap();
        assert_eq!(order.order_number, format!("SO-{year}-001"));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_numbering() {
        let mut repo = MockRepository::<Order>::new();
        repo.expect_find_many().never();
        repo.expect_insert().never();

        let mut input = create_input();
        input.customer_id = "bogus".into();
        let err = OrderService::new(repo).create(input).await.unwrap_err();
        assert!(matches!(err, CrudError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_with_raced_number_is_conflict() {
        let mut repo = MockRepository::<Order>::new();
        repo.expect_find_many().returning(|_, _| Ok(vec![]));
        repo.expect_find_one().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|_| Err(CrudError::Conflict("E11000 duplicate key".into())));

        let err = OrderService::new(repo).create(create_input()).await.unwrap_err();
        match err {
            CrudError::Conflict(message) => {
                assert_eq!(message, "Order with this number already exists")
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }
}
