use crate::{
    error::LookupError,
    gateway::WeatherGateway,
    model::{Reply, WeatherReport},
    validate::validate,
};

/// Query Validator + Weather Gateway, shared by every entry point.
///
/// Holds no mutable state, so one instance can serve any number of concurrent requests.
#[derive(Debug)]
pub struct WeatherService {
    gateway: Box<dyn WeatherGateway>,
}

impl WeatherService {
    pub fn new(gateway: Box<dyn WeatherGateway>) -> Self {
        Self { gateway }
    }

    /// Validate `raw_city` and, if it holds a city, fetch its current weather.
    pub async fn lookup(&self, raw_city: Option<&str>) -> Result<WeatherReport, LookupError> {
        let query = validate(raw_city)?;
        let report = self.gateway.fetch_weather(&query).await?;

        if let Ok(summary) = report.summary() {
            tracing::debug!(
                city = query.city(),
                location = %summary.name,
                condition = summary.condition().map(|c| c.main.as_str()),
                temp = summary.main.temp,
                "weather lookup succeeded"
            );
        }

        Ok(report)
    }

    /// Run a lookup and render the outcome as a status plus JSON body.
    pub async fn respond(&self, raw_city: Option<&str>) -> Reply {
        match self.lookup(raw_city).await {
            Ok(report) => Reply {
                status: 200,
                body: report.into_body(),
            },
            Err(err) => {
                match &err {
                    LookupError::MissingCity => {
                        tracing::debug!("rejected weather lookup without a city");
                    }
                    LookupError::Upstream(cause) => {
                        tracing::error!(error = %format!("{cause:#}"), "failed to fetch weather data");
                    }
                }
                err.to_reply()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeatherQuery;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records every city it is asked for and answers from a fixed script.
    #[derive(Debug, Default)]
    struct ScriptedGateway {
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl WeatherGateway for ScriptedGateway {
        async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReport, LookupError> {
            self.calls.lock().unwrap().push(query.city().to_string());
            if self.fail {
                return Err(LookupError::Upstream(anyhow::anyhow!("connection reset")));
            }
            let body = format!(r#"{{"name":"{}","weather":[],"main":{{"temp":1.5}}}}"#, query.city());
            Ok(WeatherReport::from_json(body).unwrap())
        }
    }

    fn service(fail: bool) -> (WeatherService, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let gateway = ScriptedGateway {
            calls: Arc::clone(&calls),
            fail,
        };
        (WeatherService::new(Box::new(gateway)), calls)
    }

    #[tokio::test]
    async fn missing_city_never_reaches_gateway() {
        let (svc, calls) = service(false);

        for raw in [None, Some(""), Some("   ")] {
            let reply = svc.respond(raw).await;
            assert_eq!(reply.status, 400);
            assert_eq!(reply.body, r#"{"error":"City name required"}"#);
        }

        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn valid_city_calls_gateway_once_with_trimmed_name() {
        let (svc, calls) = service(false);

        let reply = svc.respond(Some(" Tokyo ")).await;

        assert_eq!(reply.status, 200);
        assert!(reply.is_success());
        assert_eq!(reply.body, r#"{"name":"Tokyo","weather":[],"main":{"temp":1.5}}"#);
        assert_eq!(*calls.lock().unwrap(), vec!["Tokyo".to_string()]);
    }

    #[tokio::test]
    async fn gateway_failure_becomes_generic_500() {
        let (svc, calls) = service(true);

        let reply = svc.respond(Some("Berlin")).await;

        assert_eq!(reply.status, 500);
        assert_eq!(reply.body, r#"{"error":"Failed to fetch weather data"}"#);
        assert!(!reply.body.contains("connection reset"));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn lookup_surfaces_typed_errors() {
        let (svc, _) = service(true);

        assert!(matches!(svc.lookup(None).await, Err(LookupError::MissingCity)));
        assert!(matches!(svc.lookup(Some("Rome")).await, Err(LookupError::Upstream(_))));
    }
}
