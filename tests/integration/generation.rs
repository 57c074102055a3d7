//! Generation runs through the library API.

use modelgen::config::GeneratorConfig;
use modelgen::core::GeneratorError;
use modelgen::explicit::{ExplicitCache, explicit_model};
use modelgen::generator::Generator;
use modelgen::models::{GenerationRequest, RequestFormat, TemplateInput};
use modelgen::test_utils::{init_test_logging, template};

use crate::common::{blog_models, blog_request};

#[tokio::test]
async fn test_blog_request_generates_ordered_files() {
    init_test_logging(None);
    let request = blog_request();

    let results = Generator::default().generate(&request).await.unwrap();

    let paths: Vec<&str> = results.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["src/models/user_profile.rs", "src/models/blog_post.rs", "src/models/mod.rs"]
    );
    assert!(results[0].content.starts_with("pub struct UserProfile {"));
    assert!(results[0].content.contains("    pub password_hash: String,"));
    assert!(results[1].content.contains("    pub longitude: String,"));
    assert_eq!(results[2].content, "pub mod user_profile;\npub mod blog_post;\n");
}

#[tokio::test]
async fn test_request_ids_restrict_generation() {
    let mut request = blog_request();
    request.ids = Some(vec!["p1".to_string()]);

    let results = Generator::default().generate(&request).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].path, "src/models/blog_post.rs");
    assert_eq!(results[1].path, "src/models/mod.rs");
}

#[tokio::test]
async fn test_yaml_request_round_trip() {
    let request = blog_request();
    let yaml = serde_yaml::to_string(&request).unwrap();
    let parsed = GenerationRequest::parse(&yaml, RequestFormat::Yaml).unwrap();
    assert_eq!(parsed, request);

    let results = Generator::default().generate(&parsed).await.unwrap();
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn test_templates_see_relations_and_accesses() {
    let templates = vec![template(
        "{kebab}.txt",
        TemplateInput::One,
        "deps={% for d in model.dependencies.list %}{{ d.id }}{% endfor %};\
         self={{ model.dependencies[\"self\"] }};\
         refs={% for r in model.referencedIn %}{{ r.id }}:{{ r.fields | length }},{% endfor %};\
         geo={{ model.properties.isGeoSearchable }};\
         update={{ model.accesses.update.level }};\
         owner={{ model.accesses.owner | length }}",
    )];

    let results = Generator::default().run(&templates, &blog_models(), None).await.unwrap();

    assert_eq!(results[0].path, "user-profile.txt");
    assert_eq!(
        results[0].content,
        "deps=;self=false;refs=p1:1,;geo=false;update=owner;owner=1"
    );
    assert_eq!(results[1].path, "blog-post.txt");
    assert_eq!(
        results[1].content,
        "deps=u1;self=true;refs=p1:1,;geo=true;update=guest;owner=1"
    );
}

#[tokio::test]
async fn test_concurrent_runs_are_independent() {
    let generator = Generator::default();
    let request = blog_request();

    let (first, second) = tokio::join!(generator.generate(&request), generator.generate(&request));
    assert_eq!(first.unwrap(), second.unwrap());
}

#[tokio::test]
async fn test_failure_returns_no_partial_output() {
    let mut request = blog_request();
    request.templates.push(template("broken.rs", TemplateInput::All, "{% for %}"));

    let error = Generator::default().generate(&request).await.unwrap_err();
    assert_eq!(error.code(), 2004);
    let payload = error.payload();
    assert_eq!(payload.name, "GeneratorEvaluationError");
    assert_eq!(payload.file.as_deref(), Some("broken.rs"));
    assert!(payload.line.is_some());
}

#[tokio::test]
async fn test_slow_template_times_out() {
    let config = GeneratorConfig {
        timeout_ms: 10,
        ..GeneratorConfig::default()
    };
    let templates = vec![template(
        "slow.rs",
        TemplateInput::All,
        "{% for i in range(end=2000) %}{% for j in range(end=1000) %}{% endfor %}{% endfor %}",
    )];

    let error = Generator::new(config).run(&templates, &blog_models(), None).await.unwrap_err();
    assert_eq!(
        error,
        GeneratorError::Timeout {
            timeout_ms: 10
        }
    );
}

#[test]
fn test_explicit_model_is_memoized_per_cache() {
    let models = blog_models();
    let mut cache = ExplicitCache::default();

    let post = explicit_model(&models, &models[1], &mut cache, 0);
    let again = explicit_model(&models, &models[1], &mut cache, 0);
    assert!(std::sync::Arc::ptr_eq(&post, &again));

    let mut other_run = ExplicitCache::default();
    let fresh = explicit_model(&models, &models[1], &mut other_run, 0);
    assert!(!std::sync::Arc::ptr_eq(&post, &fresh));
}
