//! # Postgres Repository
//!
//! Diesel implementation of [`ApiToolRepository`] over an r2d2 pool. Calls
//! block the current thread; handlers run them through `web::block`.

use crate::models::api_tool_providers::{
    ApiToolProviders, CreateApiToolProviders, UpdateApiToolProviders,
};
use crate::models::api_tools::{ApiTools, CreateApiTools};
use crate::schema::{api_tool_providers, api_tools};
use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use llmops_core::{
    ApiTool, ApiToolProvider, ApiToolRepository, AppError, AppResult, ProviderDraft,
    ProviderWithTools, TakeSkip,
};
use log::debug;
use std::fmt::Display;
use uuid::Uuid;

/// Connection pool type.
pub type DbPool = Pool<ConnectionManager<PgConnection>>;

fn db_err(err: impl Display) -> AppError {
    AppError::Database(err.to_string())
}

/// Builds a pool of at most `max_size` connections.
pub fn build_pool(database_url: &str, max_size: u32) -> AppResult<DbPool> {
    Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(db_err)
}

/// Escapes LIKE wildcards so the search word matches literally.
fn like_pattern(word: &str) -> String {
    let mut pattern = String::with_capacity(word.len() + 2);
    pattern.push('%');
    for c in word.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Ids are UUIDs in storage; anything else cannot match a row.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

fn providers_of<'a>(
    account_id: &'a str,
    name_like: Option<&str>,
) -> api_tool_providers::BoxedQuery<'a, Pg> {
    let mut query = api_tool_providers::table
        .filter(api_tool_providers::account_id.eq(account_id))
        .into_boxed();
    if let Some(word) = name_like {
        query = query.filter(api_tool_providers::name.like(like_pattern(word)));
    }
    query
}

/// Repository backed by Postgres.
#[derive(Clone)]
pub struct PgRepository {
    pool: DbPool,
}

impl PgRepository {
    /// Wraps an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Builds a pool and wraps it.
    pub fn connect(database_url: &str, max_size: u32) -> AppResult<Self> {
        build_pool(database_url, max_size).map(Self::new)
    }

    fn conn(&self) -> AppResult<PooledConnection<ConnectionManager<PgConnection>>> {
        self.pool.get().map_err(db_err)
    }
}

impl ApiToolRepository for PgRepository {
    fn has_same_provider_name(
        &self,
        account_id: &str,
        name: &str,
        exclude_provider_id: Option<&str>,
    ) -> AppResult<bool> {
        let mut query = api_tool_providers::table
            .filter(api_tool_providers::account_id.eq(account_id))
            .filter(api_tool_providers::name.eq(name))
            .into_boxed();
        if let Some(id) = exclude_provider_id.and_then(parse_id) {
            query = query.filter(api_tool_providers::id.ne(id));
        }
        let count: i64 = query
            .count()
            .get_result(&mut self.conn()?)
            .map_err(db_err)?;
        Ok(count > 0)
    }

    fn save_provider(&self, draft: ProviderDraft) -> AppResult<ApiToolProvider> {
        let now = Utc::now().naive_utc();
        let provider_id = Uuid::new_v4();
        let provider_row = CreateApiToolProviders::from_draft(provider_id, &draft, now)?;
        let tool_rows = CreateApiTools::from_draft(provider_id, &draft, now)?;

        let saved = self
            .conn()?
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let saved = diesel::insert_into(api_tool_providers::table)
                    .values(&provider_row)
                    .returning(ApiToolProviders::as_returning())
                    .get_result(conn)?;
                diesel::insert_into(api_tools::table)
                    .values(&tool_rows)
                    .execute(conn)?;
                Ok(saved)
            })
            .map_err(db_err)?;
        debug!("inserted provider {} with {} tools", provider_id, tool_rows.len());
        saved.into_domain()
    }

    fn list_providers_with_tools(
        &self,
        account_id: &str,
        name_like: Option<&str>,
        window: TakeSkip,
    ) -> AppResult<(Vec<ProviderWithTools>, i64)> {
        let mut conn = self.conn()?;
        let count: i64 = providers_of(account_id, name_like)
            .count()
            .get_result(&mut conn)
            .map_err(db_err)?;

        let providers: Vec<ApiToolProviders> = providers_of(account_id, name_like)
            .order((
                api_tool_providers::created_at.desc(),
                api_tool_providers::id.desc(),
            ))
            .limit(window.take)
            .offset(window.skip)
            .select(ApiToolProviders::as_select())
            .load(&mut conn)
            .map_err(db_err)?;

        let tools: Vec<ApiTools> = ApiTools::belonging_to(&providers)
            .order(api_tools::position.asc())
            .select(ApiTools::as_select())
            .load(&mut conn)
            .map_err(db_err)?;

        let list = tools
            .grouped_by(&providers)
            .into_iter()
            .zip(providers)
            .map(|(tools, provider)| {
                Ok(ProviderWithTools {
                    provider: provider.into_domain()?,
                    tools: tools
                        .into_iter()
                        .map(ApiTools::into_domain)
                        .collect::<AppResult<Vec<ApiTool>>>()?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        Ok((list, count))
    }

    fn delete_provider_and_tools(&self, account_id: &str, provider_id: &str) -> AppResult<()> {
        let Some(id) = parse_id(provider_id) else {
            return Ok(());
        };
        self.conn()?
            .transaction::<_, diesel::result::Error, _>(|conn| {
                diesel::delete(
                    api_tools::table
                        .filter(api_tools::provider_id.eq(id))
                        .filter(api_tools::account_id.eq(account_id)),
                )
                .execute(conn)?;
                diesel::delete(
                    api_tool_providers::table
                        .filter(api_tool_providers::id.eq(id))
                        .filter(api_tool_providers::account_id.eq(account_id)),
                )
                .execute(conn)?;
                Ok(())
            })
            .map_err(db_err)
    }

    fn get_provider(&self, account_id: &str, provider_id: &str) -> AppResult<Option<ApiToolProvider>> {
        let Some(id) = parse_id(provider_id) else {
            return Ok(None);
        };
        api_tool_providers::table
            .filter(api_tool_providers::id.eq(id))
            .filter(api_tool_providers::account_id.eq(account_id))
            .select(ApiToolProviders::as_select())
            .first(&mut self.conn()?)
            .optional()
            .map_err(db_err)?
            .map(ApiToolProviders::into_domain)
            .transpose()
    }

    fn update_provider_and_reset_tools(&self, provider_id: &str, draft: ProviderDraft) -> AppResult<bool> {
        let Some(id) = parse_id(provider_id) else {
            return Ok(false);
        };
        let now = Utc::now().naive_utc();
        let changes = UpdateApiToolProviders::from_draft(&draft, now)?;
        let tool_rows = CreateApiTools::from_draft(id, &draft, now)?;
        let account_id = draft.account_id.as_str();

        self.conn()?
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let updated = diesel::update(
                    api_tool_providers::table
                        .filter(api_tool_providers::id.eq(id))
                        .filter(api_tool_providers::account_id.eq(account_id)),
                )
                .set(&changes)
                .execute(conn)?;
                if updated == 0 {
                    return Ok(false);
                }

                diesel::delete(
                    api_tools::table
                        .filter(api_tools::provider_id.eq(id))
                        .filter(api_tools::account_id.eq(account_id)),
                )
                .execute(conn)?;
                diesel::insert_into(api_tools::table)
                    .values(&tool_rows)
                    .execute(conn)?;
                Ok(true)
            })
            .map_err(db_err)
    }

    fn get_tool_by_operation_id(
        &self,
        account_id: &str,
        provider_id: &str,
        operation_id: &str,
    ) -> AppResult<Option<(ApiTool, ApiToolProvider)>> {
        let Some(id) = parse_id(provider_id) else {
            return Ok(None);
        };
        let row: Option<(ApiTools, ApiToolProviders)> = api_tools::table
            .inner_join(api_tool_providers::table)
            .filter(api_tools::provider_id.eq(id))
            .filter(api_tools::name.eq(operation_id))
            .filter(api_tools::account_id.eq(account_id))
            .select((ApiTools::as_select(), ApiToolProviders::as_select()))
            .first(&mut self.conn()?)
            .optional()
            .map_err(db_err)?;

        row.map(|(tool, provider)| Ok((tool.into_domain()?, provider.into_domain()?)))
            .transpose()
    }
}
