// Library root
// -----------
// This crate fetches the episodes that aired over the past week and turns
// them into a terminal report. The binary (`main.rs`) wires the real HTTP
// client and theme into these modules.
//
// Module responsibilities:
// - `query`: the 7-day UTC window and the GraphQL query text.
// - `api`: request envelope and the blocking HTTP transport.
// - `decode`: response envelope parsing.
// - `organize`: per-day grouping of the decoded records.
// - `ui`: styled rendering of the grouped schedule.
// - `pipeline`: runs the stages in order and returns a single result.
// - `error`: the error type shared by every stage.
pub mod api;
pub mod decode;
pub mod error;
pub mod organize;
pub mod pipeline;
pub mod query;
pub mod ui;
