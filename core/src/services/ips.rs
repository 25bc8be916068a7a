use url::form_urlencoded::byte_serialize;

use crate::client::NanManagerClient;
use crate::error::ClientError;
use crate::http::QueryParams;
use crate::types::{BanIpRequest, IpInfo, IpListData, IpStatistics, ListIpsParams, Pagination, UnbanIpRequest};

/// IP reputation endpoints under `/api/v1/ips`.
#[derive(Debug, Clone, Copy)]
pub struct IpService<'a> {
    client: &'a NanManagerClient,
}

impl<'a> IpService<'a> {
    pub(crate) fn new(client: &'a NanManagerClient) -> Self {
        Self { client }
    }

    /// Look up one address. IPv6 colons are percent-encoded in the path.
    pub fn info(&self, ip: &str) -> Result<IpInfo, ClientError> {
        let segment: String = byte_serialize(ip.as_bytes()).collect();
        self.client
            .get(&format!("/api/v1/ips/{segment}"), QueryParams::new())
    }

    pub fn list(&self, params: &ListIpsParams) -> Result<IpListData, ClientError> {
        self.client.get("/api/v1/ips", params.query())
    }

    pub fn ban(&self, request: &BanIpRequest) -> Result<(), ClientError> {
        self.client.post_empty("/api/v1/ips/ban", Some(request))
    }

    pub fn unban(&self, request: &UnbanIpRequest) -> Result<(), ClientError> {
        self.client.post_empty("/api/v1/ips/unban", Some(request))
    }

    pub fn banned(&self, page: &Pagination) -> Result<IpListData, ClientError> {
        self.client.get("/api/v1/ips/banned", page.query())
    }

    pub fn suspicious(&self, page: &Pagination) -> Result<IpListData, ClientError> {
        self.client.get("/api/v1/ips/suspicious", page.query())
    }

    pub fn high_risk(&self, page: &Pagination) -> Result<IpListData, ClientError> {
        self.client.get("/api/v1/ips/high-risk", page.query())
    }

    pub fn statistics(&self) -> Result<IpStatistics, ClientError> {
        self.client.get("/api/v1/ips/statistics", QueryParams::new())
    }
}
