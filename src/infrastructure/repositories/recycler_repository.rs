use super::traits::RecyclerRepository;
use crate::domain::{BoundingBox, NewRecycler, Recycler};
use crate::error::AppResult;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

const RECYCLER_SELECT: &str = r#"
    SELECT r.recycler_id AS id, r.name, r.address, r.phone_number, r.email,
           r.latitude, r.longitude, r.rating,
           COALESCE(
               (SELECT array_agg(i.item ORDER BY i.position)
                FROM recycler_accepted_items i
                WHERE i.recycler_id = r.recycler_id),
               ARRAY[]::text[]
           ) AS accepted_items,
           r.open_hours, r.is_verified, r.description, r.created_at, r.updated_at
    FROM recyclers r
"#;

pub struct RecyclerRepositoryImpl {
    pool: PgPool,
}

impl RecyclerRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, filter: &str, order_by: &str) -> AppResult<Vec<Recycler>> {
        let recyclers = sqlx::query_as::<_, Recycler>(&format!(
            "{RECYCLER_SELECT} {filter} ORDER BY {order_by}"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(recyclers)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Recycler> {
        let recycler = sqlx::query_as::<_, Recycler>(&format!(
            "{RECYCLER_SELECT} WHERE r.recycler_id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(recycler)
    }
}

#[async_trait]
impl RecyclerRepository for RecyclerRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Recycler>> {
        self.fetch("", "r.recycler_id").await
    }

    async fn find_verified(&self) -> AppResult<Vec<Recycler>> {
        self.fetch("WHERE r.is_verified", "r.recycler_id").await
    }

    async fn find_all_by_rating_desc(&self) -> AppResult<Vec<Recycler>> {
        self.fetch("", "r.rating DESC, r.recycler_id").await
    }

    async fn find_within_bounds(&self, bounds: Option<&BoundingBox>) -> AppResult<Vec<Recycler>> {
        let Some(bounds) = bounds else {
            return self.find_all().await;
        };

        let mut builder = QueryBuilder::<Postgres>::new(RECYCLER_SELECT);
        builder.push(" WHERE r.latitude BETWEEN ");
        builder.push_bind(bounds.min_latitude);
        builder.push(" AND ");
        builder.push_bind(bounds.max_latitude);
        builder.push(" AND r.longitude BETWEEN ");
        builder.push_bind(bounds.min_longitude);
        builder.push(" AND ");
        builder.push_bind(bounds.max_longitude);
        builder.push(" ORDER BY r.recycler_id");

        let recyclers = builder
            .build_query_as::<Recycler>()
            .fetch_all(&self.pool)
            .await?;
        Ok(recyclers)
    }

    async fn create(&self, recycler: &NewRecycler) -> AppResult<Recycler> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO recyclers
                (name, address, phone_number, email, latitude, longitude, rating,
                 open_hours, is_verified, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING recycler_id
            "#,
        )
        .bind(&recycler.name)
        .bind(&recycler.address)
        .bind(&recycler.phone_number)
        .bind(&recycler.email)
        .bind(recycler.latitude)
        .bind(recycler.longitude)
        .bind(recycler.rating)
        .bind(&recycler.open_hours)
        .bind(recycler.is_verified)
        .bind(&recycler.description)
        .fetch_one(&mut *tx)
        .await?;

        if !recycler.accepted_items.is_empty() {
            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO recycler_accepted_items (recycler_id, position, item) ",
            );
            builder.push_values(
                recycler.accepted_items.iter().enumerate(),
                |mut row, (position, item)| {
                    row.push_bind(id)
                        .push_bind(position as i32)
                        .push_bind(item);
                },
            );
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        self.find_by_id(id).await
    }
}
