//! Model directory operations over the capability traits.
//!
//! These functions add no behaviour of their own beyond pagination in
//! [`list_all_models`]: backend errors pass through unchanged and nothing
//! is retried or cached.

use std::collections::HashSet;

use crate::capabilities::{ModelGetter, ModelLister};
use crate::error::{GeminiResult, ResponseError};
use crate::types::{ListModelsParams, ListModelsResponse, Model};

/// Returns the first page of models, exactly as the lister returned it.
pub async fn list_models<L>(lister: &L) -> GeminiResult<ListModelsResponse>
where
    L: ModelLister + ?Sized,
{
    lister.list_models(None).await
}

/// Returns every model, following page tokens until the listing is
/// exhausted. The first failing page aborts the walk.
///
/// # Errors
///
/// `ResponseError::UnexpectedFormat` if the backend hands out a page token
/// it has already returned, which would otherwise page forever.
pub async fn list_all_models<L>(lister: &L, page_size: Option<i32>) -> GeminiResult<Vec<Model>>
where
    L: ModelLister + ?Sized,
{
    let mut models = Vec::new();
    let mut page_token: Option<String> = None;
    let mut seen_tokens = HashSet::new();

    loop {
        let params = ListModelsParams {
            page_size,
            page_token: page_token.take(),
        };
        let page = lister.list_models(Some(params)).await?;
        models.extend(page.models);

        match page.next_page_token {
            Some(token) if !token.is_empty() => {
                if !seen_tokens.insert(token.clone()) {
                    return Err(ResponseError::UnexpectedFormat {
                        message: format!("page token {token:?} returned twice while listing models"),
                    }
                    .into());
                }
                page_token = Some(token);
            }
            _ => break,
        }
    }

    Ok(models)
}

/// Fetches one model by name. The name is passed through unvalidated.
pub async fn models_get<G>(getter: &G, name: &str) -> GeminiResult<Model>
where
    G: ModelGetter + ?Sized,
{
    getter.get_model(name, None).await
}

/// Names of the models whose supported actions include `action`, in input
/// order. Matching is exact and case-sensitive.
///
/// ```
/// use gemini_llm_utils::directory::filter_models_by_action;
/// use gemini_llm_utils::types::Model;
///
/// let models = vec![
///     Model { name: "gemini-1".into(), supported_actions: vec!["generateContent".into()], ..Default::default() },
///     Model { name: "gemini-2".into(), supported_actions: vec!["embedContent".into()], ..Default::default() },
/// ];
/// assert_eq!(filter_models_by_action(&models, "generateContent"), vec!["gemini-1"]);
/// assert!(filter_models_by_action(&models, "nonexistent").is_empty());
/// ```
pub fn filter_models_by_action(models: &[Model], action: &str) -> Vec<String> {
    models
        .iter()
        .filter(|model| model.supports(action))
        .map(|model| model.name.clone())
        .collect()
}
