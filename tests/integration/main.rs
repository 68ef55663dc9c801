//! Integration tests for ptt-harvest
//!
//! These run the harvester against wiremock servers over real HTTP.

mod crawl_tests;
