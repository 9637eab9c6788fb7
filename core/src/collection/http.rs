use crate::entity::VehicleRecord;
use crate::prelude::{LocatorError, LocatorResult};
use log::debug;

/// Fetches the vehicle array over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpVehicleSource {
    client: reqwest::Client,
}

impl HttpVehicleSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Joins the API base and resource path into the absolute fetch URL.
    pub fn resolve(api_base: &str, path: &str) -> LocatorResult<String> {
        let base = reqwest::Url::parse(api_base)
            .map_err(|err| LocatorError::InvalidUrl(format!("{api_base}: {err}")))?;
        let url = base
            .join(path)
            .map_err(|err| LocatorError::InvalidUrl(format!("{path}: {err}")))?;
        Ok(url.into())
    }

    pub async fn fetch(&self, url: &str) -> LocatorResult<Vec<VehicleRecord>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocatorError::Status(status));
        }
        let body = response.bytes().await?;
        let records: Vec<VehicleRecord> = serde_json::from_slice(&body)?;
        debug!("fetched {} vehicle records from {}", records.len(), url);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use warp::Filter;

    fn serve(body: &'static str, status: warp::http::StatusCode) -> SocketAddr {
        let route = warp::path!("api" / "vehicles.json").map(move || {
            warp::reply::with_status(
                warp::reply::with_header(body, "content-type", "application/json"),
                status,
            )
        });
        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        addr
    }

    #[test]
    fn resolve_joins_base_and_path() {
        let url = HttpVehicleSource::resolve("http://127.0.0.1:8000", "/api/vehicles.json").unwrap();
        assert_eq!(url, "http://127.0.0.1:8000/api/vehicles.json");
        assert!(HttpVehicleSource::resolve("not a url", "/api").is_err());
    }

    #[tokio::test]
    async fn fetch_decodes_vehicle_array() {
        let addr = serve(
            r#"[{"id":1,"lat":10,"long":20,"power_level_percent":80},
                {"id":2,"lat":-5,"long":100,"power_level_percent":30}]"#,
            warp::http::StatusCode::OK,
        );
        let source = HttpVehicleSource::default();
        let records = source
            .fetch(&format!("http://{addr}/api/vehicles.json"))
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].long, 100.0);
    }

    #[tokio::test]
    async fn fetch_surfaces_http_status() {
        let addr = serve("[]", warp::http::StatusCode::INTERNAL_SERVER_ERROR);
        let source = HttpVehicleSource::default();
        let result = source.fetch(&format!("http://{addr}/api/vehicles.json")).await;
        assert!(matches!(result, Err(LocatorError::Status(status)) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn fetch_rejects_malformed_payload() {
        let addr = serve(r#"{"vehicles": []}"#, warp::http::StatusCode::OK);
        let source = HttpVehicleSource::default();
        let result = source.fetch(&format!("http://{addr}/api/vehicles.json")).await;
        assert!(matches!(result, Err(LocatorError::Decode(_))));
    }
}
