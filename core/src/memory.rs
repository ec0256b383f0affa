#![deny(missing_docs)]

//! # In-Memory Repository
//!
//! A process-local [`ApiToolRepository`] backed by two vectors behind a
//! single `RwLock`. Every write takes the write lock once, so multi-row
//! writes are atomic with respect to readers.

use crate::api_tool::{ApiTool, ApiToolProvider, ApiToolRepository, ProviderDraft, ProviderWithTools};
use crate::error::{AppError, AppResult};
use crate::paginator::TakeSkip;
use chrono::Utc;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    /// Insertion order; newest last.
    providers: Vec<ApiToolProvider>,
    tools: Vec<ApiTool>,
}

impl State {
    fn provider(&self, account_id: &str, provider_id: &str) -> Option<&ApiToolProvider> {
        self.providers
            .iter()
            .find(|p| p.id == provider_id && p.account_id == account_id)
    }

    fn tools_of(&self, provider_id: &str) -> Vec<ApiTool> {
        self.tools
            .iter()
            .filter(|t| t.provider_id == provider_id)
            .cloned()
            .collect()
    }

    fn insert_tools(&mut self, provider_id: &str, draft: &ProviderDraft) {
        let now = Utc::now();
        self.tools.extend(draft.tools.iter().map(|tool| ApiTool {
            id: Uuid::new_v4().to_string(),
            provider_id: provider_id.to_string(),
            account_id: draft.account_id.clone(),
            name: tool.name.clone(),
            description: tool.description.clone(),
            url: tool.url.clone(),
            method: tool.method,
            parameters: tool.parameters.clone(),
            created_at: now,
        }));
    }
}

/// Repository that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<State>,
}

impl MemoryRepository {
    fn read(&self) -> AppResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| AppError::General("memory repository lock poisoned".into()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| AppError::General("memory repository lock poisoned".into()))
    }
}

impl ApiToolRepository for MemoryRepository {
    fn has_same_provider_name(
        &self,
        account_id: &str,
        name: &str,
        exclude_provider_id: Option<&str>,
    ) -> AppResult<bool> {
        Ok(self.read()?.providers.iter().any(|p| {
            p.account_id == account_id && p.name == name && Some(p.id.as_str()) != exclude_provider_id
        }))
    }

    fn save_provider(&self, draft: ProviderDraft) -> AppResult<ApiToolProvider> {
        let provider = ApiToolProvider {
            id: Uuid::new_v4().to_string(),
            account_id: draft.account_id.clone(),
            name: draft.name.clone(),
            icon: draft.icon.clone(),
            description: draft.description().to_string(),
            openapi_schema: draft.openapi_schema.clone(),
            headers: draft.headers.clone(),
            created_at: Utc::now(),
        };

        let mut state = self.write()?;
        state.insert_tools(&provider.id, &draft);
        state.providers.push(provider.clone());
        Ok(provider)
    }

    fn list_providers_with_tools(
        &self,
        account_id: &str,
        name_like: Option<&str>,
        window: TakeSkip,
    ) -> AppResult<(Vec<ProviderWithTools>, i64)> {
        let state = self.read()?;
        let matching: Vec<&ApiToolProvider> = state
            .providers
            .iter()
            .rev()
            .filter(|p| p.account_id == account_id)
            .filter(|p| name_like.map_or(true, |needle| p.name.contains(needle)))
            .collect();

        let count = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(window.skip).unwrap_or(0))
            .take(usize::try_from(window.take).unwrap_or(0))
            .map(|p| ProviderWithTools {
                provider: p.clone(),
                tools: state.tools_of(&p.id),
            })
            .collect();
        Ok((page, count))
    }

    fn delete_provider_and_tools(&self, account_id: &str, provider_id: &str) -> AppResult<()> {
        let mut state = self.write()?;
        state
            .tools
            .retain(|t| !(t.provider_id == provider_id && t.account_id == account_id));
        state
            .providers
            .retain(|p| !(p.id == provider_id && p.account_id == account_id));
        Ok(())
    }

    fn get_provider(&self, account_id: &str, provider_id: &str) -> AppResult<Option<ApiToolProvider>> {
        Ok(self.read()?.provider(account_id, provider_id).cloned())
    }

    fn update_provider_and_reset_tools(&self, provider_id: &str, draft: ProviderDraft) -> AppResult<bool> {
        let mut state = self.write()?;
        let Some(provider) = state
            .providers
            .iter_mut()
            .find(|p| p.id == provider_id && p.account_id == draft.account_id)
        else {
            return Ok(false);
        };

        provider.name = draft.name.clone();
        provider.icon = draft.icon.clone();
        provider.description = draft.description().to_string();
        provider.openapi_schema = draft.openapi_schema.clone();
        provider.headers = draft.headers.clone();

        state
            .tools
            .retain(|t| !(t.provider_id == provider_id && t.account_id == draft.account_id));
        state.insert_tools(provider_id, &draft);
        Ok(true)
    }

    fn get_tool_by_operation_id(
        &self,
        account_id: &str,
        provider_id: &str,
        operation_id: &str,
    ) -> AppResult<Option<(ApiTool, ApiToolProvider)>> {
        let state = self.read()?;
        let Some(provider) = state.provider(account_id, provider_id) else {
            return Ok(None);
        };
        Ok(state
            .tools
            .iter()
            .find(|t| t.provider_id == provider_id && t.name == operation_id)
            .map(|t| (t.clone(), provider.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_tool::format_api_tools;
    use crate::openapi_schema::validate_openapi_schema;

    fn draft(account_id: &str, name: &str) -> ProviderDraft {
        let openapi = validate_openapi_schema(
            r#"{"server":"https://api.example.com","description":"d","paths":{"/a":{"get":{"description":"a","operationId":"a","parameters":[]}}}}"#,
        )
        .unwrap();
        ProviderDraft {
            account_id: account_id.into(),
            name: name.into(),
            icon: "https://example.com/icon.png".into(),
            headers: vec![],
            tools: format_api_tools(&openapi),
            openapi_schema: openapi,
        }
    }

    #[test]
    fn test_list_is_newest_first() {
        let repo = MemoryRepository::default();
        repo.save_provider(draft("acc", "first")).unwrap();
        repo.save_provider(draft("acc", "second")).unwrap();
        repo.save_provider(draft("other", "third")).unwrap();

        let (page, count) = repo
            .list_providers_with_tools("acc", None, TakeSkip { take: 10, skip: 0 })
            .unwrap();
        assert_eq!(count, 2);
        let names: Vec<_> = page.iter().map(|p| p.provider.name.as_str()).collect();
        assert_eq!(names, ["second", "first"]);
        assert_eq!(page[0].tools.len(), 1);
    }

    #[test]
    fn test_skip_past_end_is_empty() {
        let repo = MemoryRepository::default();
        repo.save_provider(draft("acc", "first")).unwrap();
        let (page, count) = repo
            .list_providers_with_tools("acc", None, TakeSkip { take: 10, skip: 20 })
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(count, 1);
    }

    #[test]
    fn test_update_is_scoped_to_account() {
        let repo = MemoryRepository::default();
        let provider = repo.save_provider(draft("acc", "first")).unwrap();
        assert!(!repo
            .update_provider_and_reset_tools(&provider.id, draft("other", "renamed"))
            .unwrap());
        assert!(repo
            .update_provider_and_reset_tools(&provider.id, draft("acc", "renamed"))
            .unwrap());
        assert_eq!(repo.read().unwrap().tools.len(), 1);
    }
}
