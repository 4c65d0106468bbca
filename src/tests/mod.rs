//! Scenario test suite for the station binary, driving only the public
//! library API.
