//! Integration tests for the model directory operations, using `mockall`
//! doubles for the capability traits.

use async_trait::async_trait;
use gemini_llm_utils::directory::{filter_models_by_action, list_all_models, list_models, models_get};
use gemini_llm_utils::error::{GeminiResult, NetworkError, ResourceError, ResponseError};
use gemini_llm_utils::fixtures::load_json_fixture;
use gemini_llm_utils::types::{GetModelConfig, ListModelsParams, ListModelsResponse, Model};
use gemini_llm_utils::{GeminiError, ModelGetter, ModelLister};
use mockall::predicate::eq;
use mockall::{mock, Sequence};
use pretty_assertions::assert_eq;

mock! {
    pub Lister {}

    #[async_trait]
    impl ModelLister for Lister {
        async fn list_models(&self, config: Option<ListModelsParams>) -> GeminiResult<ListModelsResponse>;
    }
}

mock! {
    pub Getter {}

    #[async_trait]
    impl ModelGetter for Getter {
        async fn get_model(&self, name: &str, config: Option<GetModelConfig>) -> GeminiResult<Model>;
    }
}

fn page(names: &[&str], token: Option<&str>) -> ListModelsResponse {
    ListModelsResponse {
        models: names
            .iter()
            .map(|name| Model {
                name: (*name).to_string(),
                ..Default::default()
            })
            .collect(),
        next_page_token: token.map(str::to_string),
    }
}

fn names(models: &[Model]) -> Vec<&str> {
    models.iter().map(|m| m.name.as_str()).collect()
}

#[tokio::test]
async fn test_list_models_requests_first_page_only() {
    // Arrange
    let mut lister = MockLister::new();
    lister
        .expect_list_models()
        .with(eq(None))
        .times(1)
        .returning(|_| Ok(load_json_fixture("models/list_response.json")));

    // Act
    let result = list_models(&lister).await.unwrap();

    // Assert
    assert_eq!(result.models.len(), 3);
    assert_eq!(result.next_page_token.as_deref(), Some("Cg9tb2RlbHMvZ2VtbWEtMw=="));
}

#[tokio::test]
async fn test_list_models_passes_error_through() {
    // Arrange
    let mut lister = MockLister::new();
    lister
        .expect_list_models()
        .returning(|_| Err(GeminiError::Network(NetworkError::Timeout)));

    // Act
    let result = list_models(&lister).await;

    // Assert
    assert!(matches!(result, Err(GeminiError::Network(NetworkError::Timeout))));
}

#[tokio::test]
async fn test_list_all_models_follows_page_tokens() {
    // Arrange
    let mut lister = MockLister::new();
    let mut seq = Sequence::new();
    lister
        .expect_list_models()
        .with(eq(Some(ListModelsParams { page_size: Some(2), page_token: None })))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(page(&["models/a", "models/b"], Some("t1"))));
    lister
        .expect_list_models()
        .with(eq(Some(ListModelsParams {
            page_size: Some(2),
            page_token: Some("t1".to_string()),
        })))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(page(&["models/c", "models/d"], Some("t2"))));
    lister
        .expect_list_models()
        .with(eq(Some(ListModelsParams {
            page_size: Some(2),
            page_token: Some("t2".to_string()),
        })))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(page(&["models/e"], None)));

    // Act
    let models = list_all_models(&lister, Some(2)).await.unwrap();

    // Assert
    assert_eq!(names(&models), vec!["models/a", "models/b", "models/c", "models/d", "models/e"]);
}

#[tokio::test]
async fn test_list_all_models_stops_on_empty_token() {
    // Arrange
    let mut lister = MockLister::new();
    lister
        .expect_list_models()
        .times(1)
        .returning(|_| Ok(page(&["models/only"], Some(""))));

    // Act
    let models = list_all_models(&lister, None).await.unwrap();

    // Assert
    assert_eq!(names(&models), vec!["models/only"]);
}

#[tokio::test]
async fn test_list_all_models_aborts_on_failed_page() {
    // Arrange
    let mut lister = MockLister::new();
    let mut seq = Sequence::new();
    lister
        .expect_list_models()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(page(&["models/a"], Some("t1"))));
    lister
        .expect_list_models()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Err(GeminiError::Network(NetworkError::ConnectionFailed {
                message: "connection reset".to_string(),
            }))
        });

    // Act
    let result = list_all_models(&lister, None).await;

    // Assert
    assert!(matches!(
        result,
        Err(GeminiError::Network(NetworkError::ConnectionFailed { .. }))
    ));
}

#[tokio::test]
async fn test_list_all_models_rejects_repeated_token() {
    // Arrange
    let mut lister = MockLister::new();
    lister
        .expect_list_models()
        .times(2)
        .returning(|_| Ok(page(&["models/a"], Some("same"))));

    // Act
    let result = list_all_models(&lister, None).await;

    // Assert
    assert!(matches!(
        result,
        Err(GeminiError::Response(ResponseError::UnexpectedFormat { .. }))
    ));
}

#[tokio::test]
async fn test_models_get_passes_name_verbatim() {
    // Arrange
    let mut getter = MockGetter::new();
    getter
        .expect_get_model()
        .withf(|name, config| name.to_string() == "tunedModels/my-model" && config.is_none())
        .times(1)
        .returning(|name, _| {
            Ok(Model {
                name: name.to_string(),
                ..Default::default()
            })
        });

    // Act
    let model = models_get(&getter, "tunedModels/my-model").await.unwrap();

    // Assert
    assert_eq!(model.name, "tunedModels/my-model");
}

#[tokio::test]
async fn test_models_get_not_found() {
    // Arrange
    let mut getter = MockGetter::new();
    getter.expect_get_model().returning(|name, _| {
        Err(GeminiError::Resource(ResourceError::ModelNotFound {
            model: name.to_string(),
        }))
    });

    // Act
    let result = models_get(&getter, "models/missing").await;

    // Assert
    match result {
        Err(GeminiError::Resource(ResourceError::ModelNotFound { model })) => {
            assert_eq!(model, "models/missing");
        }
        other => panic!("Expected ModelNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_then_filter_by_action() {
    // Arrange
    let mut lister = MockLister::new();
    lister
        .expect_list_models()
        .returning(|_| Ok(load_json_fixture("models/list_response.json")));

    // Act
    let result = list_models(&lister).await.unwrap();
    let generating = filter_models_by_action(&result.models, "generateContent");
    let caching = filter_models_by_action(&result.models, "createCachedContent");
    let case_mismatch = filter_models_by_action(&result.models, "GenerateContent");

    // Assert
    assert_eq!(generating, vec!["models/gemini-1.5-pro", "models/gemini-2.0-flash"]);
    assert_eq!(caching, vec!["models/gemini-2.0-flash"]);
    assert!(case_mismatch.is_empty());
}

#[test]
fn test_filter_empty_input() {
    assert!(filter_models_by_action(&[], "generateContent").is_empty());
}
