use actix_web::{dev::{ServiceRequest, ServiceResponse}, HttpMessage};
use std::{rc::Rc, sync::Arc, task::{Context, Poll}};
use actix_web::Error;
use actix_service::{Service, Transform};
use futures::future::{ok, LocalBoxFuture, Ready};

use crate::utils::config::AppConfig;

pub const LABEL_APP_NAME: &str = "_tag_appName";
pub const LABEL_NAME: &str = "_tag_Name";
pub const LABEL_PLUGIN: &str = "_plugin";
pub const STACKTRACE_PLUGIN: &str = "stacktrace";

/// Labels attached to the span of every request the middleware wraps.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanLabels {
    pub app_name: String,
    pub name: String,
    pub plugin: &'static str,
}

impl SpanLabels {
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (LABEL_APP_NAME, self.app_name.as_str()),
            (LABEL_NAME, self.name.as_str()),
            (LABEL_PLUGIN, self.plugin),
        ]
    }
}

#[derive(Clone, Default)]
pub struct ApmLabels {
    labels: Option<Arc<SpanLabels>>
}

impl ApmLabels {

    pub fn from_config(config: &AppConfig) -> Self {
        if !config.apm_enabled {
            return Self::disabled();
        }
        Self::enabled(&config.tag_app_name, &config.tag_name)
    }

    pub fn enabled(app_name: &str, name: &str) -> Self {
        ApmLabels {
            labels: Some(Arc::new(SpanLabels {
                app_name: app_name.to_string(),
                name: name.to_string(),
                plugin: STACKTRACE_PLUGIN,
            }))
        }
    }

    pub fn disabled() -> Self {
        ApmLabels { labels: None }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApmLabels
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = ApmLabelsService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ApmLabelsService {
            service: Rc::new(service),
            labels: self.labels.clone()
        })
    }
}

pub struct ApmLabelsService<S> {
    service: Rc<S>,
    labels: Option<Arc<SpanLabels>>
}

impl<S, B> Service<ServiceRequest> for ApmLabelsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        if let Some(labels) = &self.labels {
            log::debug!(
                "span labels for {} {}: {:?}",
                req.method(),
                req.path(),
                labels.pairs()
            );
            req.extensions_mut().insert(SpanLabels::clone(labels));
        }

        Box::pin(service.call(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{call_and_read_body, init_service, TestRequest};
    use actix_web::{web, App, HttpRequest, HttpResponse};

    async fn echo_labels(req: HttpRequest) -> HttpResponse {
        match req.extensions().get::<SpanLabels>() {
            Some(labels) => HttpResponse::Ok().body(format!("{}|{}|{}", labels.app_name, labels.name, labels.plugin)),
            None => HttpResponse::Ok().body("none"),
        }
    }

    #[actix_web::test]
    async fn test_enabled_middleware_attaches_labels() {
        let app = init_service(
            App::new()
                .wrap(ApmLabels::enabled("petclinic", "pets"))
                .route("/labels", web::get().to(echo_labels))
        ).await;

        let req = TestRequest::get().uri("/labels").to_request();
        let body = call_and_read_body(&app, req).await;

        assert_eq!(&body[..], b"petclinic|pets|stacktrace");
    }

    #[actix_web::test]
    async fn test_disabled_middleware_attaches_nothing() {
        let app = init_service(
            App::new()
                .wrap(ApmLabels::disabled())
                .route("/labels", web::get().to(echo_labels))
        ).await;

        let req = TestRequest::get().uri("/labels").to_request();
        let body = call_and_read_body(&app, req).await;

        assert_eq!(&body[..], b"none");
    }

    #[test]
    fn test_from_config_respects_flag() {
        let mut config = AppConfig {
            database_url: None,
            database_name: "petclinic".to_string(),
            bind_address: "127.0.0.1:8080".to_string(),
            log_level: "info".to_string(),
            apm_enabled: false,
            tag_app_name: "petclinic".to_string(),
            tag_name: "pets".to_string(),
        };
        assert!(ApmLabels::from_config(&config).labels.is_none());

        config.apm_enabled = true;
        let labels = ApmLabels::from_config(&config).labels.unwrap();
        assert_eq!(labels.pairs(), [
            ("_tag_appName", "petclinic"),
            ("_tag_Name", "pets"),
            ("_plugin", "stacktrace"),
        ]);
    }
}
