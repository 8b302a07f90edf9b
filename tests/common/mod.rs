#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use padel_slot_finder::error::{Result, SlotFinderError};
use padel_slot_finder::{Config, SlotFinder, Transport};

pub const API: &str = "http://stub.test/v1";
pub const GEO: &str = "http://geo.test/search";
pub const TENANTS: &str = "http://stub.test/v1/tenants";
pub const AVAILABILITY: &str = "http://stub.test/v1/availability";

#[derive(Debug, Clone)]
enum Canned {
    Body(String),
    Status(u16),
    Network,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Canned responses per URL, served in order; the last one repeats.
#[derive(Debug, Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<String, VecDeque<Canned>>>,
    calls: Mutex<Vec<Call>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, url: &str, canned: Canned) -> Self {
        self.routes.lock().unwrap().entry(url.to_string()).or_default().push_back(canned);
        self
    }

    pub fn respond(self, url: &str, body: &str) -> Self {
        self.push(url, Canned::Body(body.to_string()))
    }

    pub fn status(self, url: &str, code: u16) -> Self {
        self.push(url, Canned::Status(code))
    }

    pub fn network_error(self, url: &str) -> Self {
        self.push(url, Canned::Network)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        });
        let mut routes = self.routes.lock().unwrap();
        let queue = routes
            .get_mut(url)
            .unwrap_or_else(|| panic!("no stubbed response for {}", url));
        let canned = if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        };
        match canned {
            Canned::Body(body) => Ok(body),
            Canned::Status(code) => Err(SlotFinderError::api(format!("HTTP status {}", code), Some(code))),
            Canned::Network => Err(SlotFinderError::api("Request failed: connection refused", None)),
        }
    }
}

pub fn config() -> Config {
    Config::default().with_api_base_url(API).with_geocoding_url(GEO)
}

pub fn finder(transport: StubTransport) -> SlotFinder<StubTransport> {
    SlotFinder::new(transport, config())
}

pub fn tenant_lemon() -> &'static str {
    include_str!("../fixtures/tenant_lemon.json")
}

pub fn availability_lemon() -> &'static str {
    include_str!("../fixtures/availability_lemon.json")
}

pub fn availability_messy() -> &'static str {
    include_str!("../fixtures/availability_messy.json")
}

pub fn tenant_search() -> &'static str {
    include_str!("../fixtures/tenant_search.json")
}

pub fn geocode_berlin() -> &'static str {
    include_str!("../fixtures/geocode_berlin.json")
}

/// Stub serving the Lemon Padel Club directory record and its availability.
pub fn lemon_transport() -> StubTransport {
    StubTransport::new()
        .respond(TENANTS, tenant_lemon())
        .respond(AVAILABILITY, availability_lemon())
}
