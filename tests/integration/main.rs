//! Integration tests: the betting session driven end to end through the
//! public library API.

mod mock_sink;
mod scenarios;
