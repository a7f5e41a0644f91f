//! Integration tests: resolver and API wired together with a stub
//! search service.

mod api_flow;
mod resolver_flow;
mod stub_client;
